//! Error types for MIC grid handling
//!
//! Only structural problems are errors. Parity, separator and calendar
//! findings are reported as data in [`crate::DiagnosticReport`].

use std::fmt;

use thiserror::Error;

/// Axis an out-of-range index was supplied for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    /// Physical column of the printed grid
    Column,
    /// Physical row of the printed grid
    Row,
    /// Field index along the field axis
    Field,
    /// Bit index along the bit axis
    Bit,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Axis::Column => "column",
            Axis::Row => "row",
            Axis::Field => "field",
            Axis::Bit => "bit",
        };
        f.write_str(name)
    }
}

/// Core MIC errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MicError {
    /// A cell write outside `{0, 1}`
    #[error("invalid dot value {0}: cells only accept 0 (empty) or 1 (dot)")]
    InvalidValue(u8),

    /// A bulk load whose dimensions disagree with the bound layout
    #[error(
        "grid shape mismatch: expected {expected_columns} columns x {expected_rows} rows, \
         got {found_columns} columns x {found_rows} rows"
    )]
    ShapeMismatch {
        /// Columns declared by the layout
        expected_columns: usize,
        /// Rows declared by the layout
        expected_rows: usize,
        /// Columns in the rejected grid
        found_columns: usize,
        /// Rows of the first offending column (or of the first column)
        found_rows: usize,
    },

    /// Caller-supplied index outside the declared geometry
    #[error("{axis} index {index} out of range (len {len})")]
    IndexOutOfRange {
        /// Axis the index applies to
        axis: Axis,
        /// Offending index
        index: usize,
        /// Length of that axis
        len: usize,
    },

    /// Family name with no entry in the family table
    #[error("unknown printer family: {0}")]
    UnknownFamily(String),
}

/// Result alias for core operations
pub type Result<T> = std::result::Result<T, MicError>;
