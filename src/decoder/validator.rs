//! Runs every integrity check on a dot matrix

use serde::Serialize;
use tracing::warn;

use super::coherence;
use super::extract::extract;
use super::parity::{self, ParityConvention};
use super::separator::separator_malformed;
use crate::models::{DiagnosticReport, DotMatrix};

/// Whether findings are also emitted as log events
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum Verbosity {
    /// Findings only go into the report
    #[default]
    Silent,
    /// Each finding is also logged with `tracing::warn!`
    Warn,
}

/// Validator settings
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ValidationOptions {
    /// Log emission of findings
    pub verbosity: Verbosity,
    /// Parity convention for both parity checks
    pub parity: ParityConvention,
}

impl ValidationOptions {
    /// Options with warnings logged
    pub fn verbose() -> Self {
        Self {
            verbosity: Verbosity::Warn,
            ..Self::default()
        }
    }

    /// Replace the parity convention
    pub fn with_parity(mut self, parity: ParityConvention) -> Self {
        self.parity = parity;
        self
    }
}

/// Parity, separator and coherence checks over any layout
#[derive(Debug, Clone, Copy, Default)]
pub struct Validator {
    options: ValidationOptions,
}

impl Validator {
    /// Create a validator
    pub fn new(options: ValidationOptions) -> Self {
        Self { options }
    }

    /// Active options
    pub fn options(&self) -> ValidationOptions {
        self.options
    }

    /// Run all checks. Never fails; malformed grids yield findings.
    pub fn validate(&self, matrix: &DotMatrix) -> DiagnosticReport {
        let report = DiagnosticReport {
            failed_columns: parity::failed_columns(matrix, self.options.parity),
            failed_rows: parity::failed_rows(matrix, self.options.parity),
            separator_malformed: separator_malformed(matrix),
            coherence: coherence::check(&extract(matrix).timestamp),
        };

        if self.options.verbosity == Verbosity::Warn {
            let layout = matrix.layout().kind();
            for column in &report.failed_columns {
                warn!(%layout, column, "column failed parity check");
            }
            for row in &report.failed_rows {
                warn!(%layout, row, "row failed parity check");
            }
            if report.separator_malformed {
                warn!(%layout, "separator is malformed");
            }
            for violation in &report.coherence {
                warn!(%layout, %violation, "incoherent date field");
            }
        }

        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CoherenceViolation;
    use crate::models::layout::{SEPARATOR_FIELD, STANDARD, VARIANT_B};

    #[test]
    fn test_empty_standard_grid() {
        let mut matrix = DotMatrix::new(&STANDARD);
        for bit in 0..7 {
            matrix.set_field_bit(SEPARATOR_FIELD, bit, 1).unwrap();
        }
        let report = Validator::default().validate(&matrix);
        assert!(!report.separator_malformed);
        assert!(report.coherence.is_empty());
        assert_eq!(report.coherence_message(), "");
        // seven separator dots with a clear meta bit break even parity
        assert_eq!(report.failed_columns, vec![SEPARATOR_FIELD]);
    }

    #[test]
    fn test_odd_parity_accepts_separator() {
        let mut matrix = DotMatrix::new(&STANDARD);
        for bit in 0..7 {
            matrix.set_field_bit(SEPARATOR_FIELD, bit, 1).unwrap();
        }
        let options = ValidationOptions::default().with_parity(ParityConvention::Odd);
        let report = Validator::new(options).validate(&matrix);
        assert!(!report.failed_columns.contains(&SEPARATOR_FIELD));
    }

    #[test]
    fn test_verbosity_does_not_change_findings() {
        let mut matrix = DotMatrix::new(&VARIANT_B);
        for bit in 0..6 {
            matrix.set_field_bit(1, bit, 1).unwrap(); // minute 63
        }
        let quiet = Validator::default().validate(&matrix);
        let loud = Validator::new(ValidationOptions::verbose()).validate(&matrix);
        assert_eq!(quiet, loud);
        assert_eq!(quiet.coherence, vec![CoherenceViolation::Minute(63)]);
        assert!(quiet.separator_malformed);
    }
}
