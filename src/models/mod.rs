pub mod layout;
pub mod matrix;
pub mod record;
pub mod report;

pub use layout::{FieldRole, Layout, LayoutKind, Orientation};
pub use matrix::DotMatrix;
pub use record::{DecodedRecord, DocumentKind, ExtraField, Timestamp, Unconfirmed};
pub use report::{CoherenceViolation, DiagnosticReport};
