//! MIC decoding modules
//!
//! This module contains the logic applied to a dot grid once it has been
//! entered:
//! - Positional decoding of field lines
//! - Integrity checks (parity, separator, calendar coherence)
//! - Record extraction (date, serial, device-specific fields)
//! - Printer family lookup

/// Calendar plausibility checks
pub mod coherence;
/// Decoded record assembly
pub mod extract;
/// Printer family table
pub mod families;
/// Field line decoding
pub mod field;
/// Column and row parity on the printed grid
pub mod parity;
/// Separator field check
pub mod separator;
/// Composition of all checks into a report
pub mod validator;

pub use extract::extract;
pub use families::{FAMILIES, Family, find_family, layout_for};
pub use field::FieldDecoder;
pub use parity::ParityConvention;
pub use validator::{ValidationOptions, Validator, Verbosity};
