//! mic_decoder - printer tracking dot decoder
//!
//! Decodes the Machine Identification Code (MIC): the grid of faint dots some
//! colour laser printers and copiers add to every page. Input is a grid of
//! `0`/`1` cells already transcribed from a page plus the printer family it
//! came from; output is the printed date and time, the serial number and an
//! integrity report.
//!
//! ```
//! use mic_decoder::MicDecoder;
//!
//! let mut session = MicDecoder::for_family("DocuColor").unwrap();
//! session.set(1, 0, 1).unwrap(); // one dot in the minute column
//! let outcome = session.decode();
//! assert_eq!(outcome.record.timestamp.minute, 1);
//! ```

#![warn(missing_docs)]
#![allow(clippy::missing_docs_in_private_items)]

/// Decoding, validation and family lookup
pub mod decoder;
/// Error types
pub mod error;
/// Core data structures (Layout, DotMatrix, DecodedRecord, DiagnosticReport)
pub mod models;
/// Grid file I/O and CLI helpers
pub mod tools;

pub use decoder::{
    FieldDecoder, ParityConvention, ValidationOptions, Validator, Verbosity, find_family,
    layout_for,
};
pub use error::{MicError, Result};
pub use models::{
    CoherenceViolation, DecodedRecord, DiagnosticReport, DotMatrix, FieldRole, Layout, LayoutKind,
    Orientation, Timestamp,
};

use rayon::prelude::*;
use serde::Serialize;
use tracing::debug;

/// Decoded record together with its integrity report
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DecodeOutcome {
    /// Decoded values
    pub record: DecodedRecord,
    /// Integrity findings
    pub report: DiagnosticReport,
}

/// Decode and validate one column-major grid (`grid[column][row]`)
pub fn decode(
    layout: &'static Layout,
    grid: &[Vec<u8>],
    options: ValidationOptions,
) -> Result<DecodeOutcome> {
    let mut session = MicDecoder::new(layout).with_options(options);
    session.load(grid)?;
    Ok(session.decode())
}

/// Decode many grids in parallel, one independent matrix per grid
pub fn decode_batch(
    layout: &'static Layout,
    grids: &[Vec<Vec<u8>>],
    options: ValidationOptions,
) -> Vec<Result<DecodeOutcome>> {
    grids
        .par_iter()
        .map(|grid| decode(layout, grid, options))
        .collect()
}

/// One decode session: a dot matrix bound to a layout plus validator options
#[derive(Debug, Clone)]
pub struct MicDecoder {
    matrix: DotMatrix,
    options: ValidationOptions,
}

impl MicDecoder {
    /// Create an empty session for `layout`
    pub fn new(layout: &'static Layout) -> Self {
        Self {
            matrix: DotMatrix::new(layout),
            options: ValidationOptions::default(),
        }
    }

    /// Create an empty session for a named printer family
    pub fn for_family(name: &str) -> Result<Self> {
        Ok(Self::new(layout_for(name)?))
    }

    /// Replace the validator options
    pub fn with_options(mut self, options: ValidationOptions) -> Self {
        self.options = options;
        self
    }

    /// Active validator options
    pub fn options(&self) -> ValidationOptions {
        self.options
    }

    /// Bound layout
    pub fn layout(&self) -> &'static Layout {
        self.matrix.layout()
    }

    /// Current grid
    pub fn matrix(&self) -> &DotMatrix {
        &self.matrix
    }

    /// Set one dot at (column, row)
    pub fn set(&mut self, column: usize, row: usize, value: u8) -> Result<()> {
        self.matrix.set(column, row, value)
    }

    /// Get one dot at (column, row)
    pub fn get(&self, column: usize, row: usize) -> Result<u8> {
        self.matrix.get(column, row)
    }

    /// Replace the grid; a rejected grid leaves the session unchanged
    pub fn load(&mut self, grid: &[Vec<u8>]) -> Result<()> {
        self.matrix.load(grid)
    }

    /// Clear every dot
    pub fn clear(&mut self) {
        self.matrix.clear();
    }

    /// Decoded values, recomputed from the current grid
    pub fn record(&self) -> DecodedRecord {
        decoder::extract(&self.matrix)
    }

    /// Integrity report for the current grid
    pub fn report(&self) -> DiagnosticReport {
        Validator::new(self.options).validate(&self.matrix)
    }

    /// Record and report for the current grid
    pub fn decode(&self) -> DecodeOutcome {
        let record = self.record();
        let report = self.report();
        debug!(
            layout = %record.layout,
            date = %record.timestamp,
            serial = %record.serial,
            clean = report.is_clean(),
            "decoded grid"
        );
        DecodeOutcome { record, report }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_empty() {
        let session = MicDecoder::for_family("DocuColor").unwrap();
        assert_eq!(session.layout().kind(), LayoutKind::Standard);
        let outcome = session.decode();
        assert_eq!(outcome.record.serial, "00000000");
        assert!(outcome.report.separator_malformed);
    }

    #[test]
    fn test_session_unknown_family() {
        assert!(matches!(
            MicDecoder::for_family("nope"),
            Err(MicError::UnknownFamily(_))
        ));
    }

    #[test]
    fn test_decode_rejects_bad_shape() {
        let grid = vec![vec![0u8; 15]; 8];
        assert!(matches!(
            decode(LayoutKind::Standard.layout(), &grid, ValidationOptions::default()),
            Err(MicError::ShapeMismatch { .. })
        ));
        // the same grid fits the rotated layout
        assert!(decode(LayoutKind::Rotated.layout(), &grid, ValidationOptions::default()).is_ok());
    }

    #[test]
    fn test_decode_batch_keeps_order() {
        let mut grids = Vec::new();
        for minute in 0..10u8 {
            let mut grid = vec![vec![0u8; 8]; 15];
            for bit in 0..7 {
                grid[1][bit] = (minute >> bit) & 1;
            }
            grids.push(grid);
        }
        grids.push(vec![vec![0u8; 8]; 3]);

        let results = decode_batch(LayoutKind::Standard.layout(), &grids, ValidationOptions::default());
        assert_eq!(results.len(), 11);
        for (minute, result) in results.iter().take(10).enumerate() {
            let outcome = result.as_ref().unwrap();
            assert_eq!(outcome.record.timestamp.minute, minute as u32);
        }
        assert!(results[10].is_err());
    }
}
