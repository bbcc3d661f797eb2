use std::fmt;

use serde::Serialize;

/// Implausible calendar value found by the coherence check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CoherenceViolation {
    /// Minute above 59
    Minute(u32),
    /// Hour above 23
    Hour(u32),
    /// Day above 31
    Day(u32),
    /// Month above 31
    Month(u32),
    /// Day 31 in a shorter month, or more than 29 days in February
    DayForMonth {
        /// Decoded day
        day: u32,
        /// Decoded month
        month: u32,
    },
    /// 29th of February in a year not divisible by four
    NonLeapFebruary {
        /// Decoded day
        day: u32,
        /// Decoded two-digit year
        year: u32,
    },
}

impl fmt::Display for CoherenceViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CoherenceViolation::Minute(v) => write!(f, "impossible number of minutes, got {}", v),
            CoherenceViolation::Hour(v) => write!(f, "impossible number of hours, got {}", v),
            CoherenceViolation::Day(v) => write!(f, "impossible number of days, got {}", v),
            CoherenceViolation::Month(v) => write!(f, "impossible number of months, got {}", v),
            CoherenceViolation::DayForMonth { .. } => {
                f.write_str("impossible number of days for the month")
            }
            CoherenceViolation::NonLeapFebruary { .. } => {
                f.write_str("29+ days in february in a non-leap year")
            }
        }
    }
}

/// Outcome of all integrity checks on one grid
///
/// Indices are 0-based. Nothing here is an error: a report with every
/// check failing is still a valid report.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DiagnosticReport {
    /// Printed columns whose parity dot in the top row does not match
    pub failed_columns: Vec<usize>,
    /// Printed rows whose parity dot in column 0 does not match
    pub failed_rows: Vec<usize>,
    /// Separator field does not hold its expected pattern
    pub separator_malformed: bool,
    /// Calendar plausibility findings
    pub coherence: Vec<CoherenceViolation>,
}

impl DiagnosticReport {
    /// True when no check found anything
    pub fn is_clean(&self) -> bool {
        self.failed_columns.is_empty()
            && self.failed_rows.is_empty()
            && !self.separator_malformed
            && self.coherence.is_empty()
    }

    /// True when both parity checks passed
    pub fn parity_ok(&self) -> bool {
        self.failed_columns.is_empty() && self.failed_rows.is_empty()
    }

    /// Coherence messages joined by newlines, empty when coherent
    pub fn coherence_message(&self) -> String {
        self.coherence
            .iter()
            .map(|v| format!("{}\n", v))
            .collect()
    }

    /// One line per finding
    pub fn messages(&self) -> Vec<String> {
        let mut messages = Vec::new();
        for column in &self.failed_columns {
            messages.push(format!("column {} failed parity check", column));
        }
        for row in &self.failed_rows {
            messages.push(format!("row {} failed parity check", row));
        }
        if self.separator_malformed {
            messages.push("separator is malformed".to_string());
        }
        messages.extend(self.coherence.iter().map(|v| v.to_string()));
        messages
    }
}

impl fmt::Display for DiagnosticReport {
    /// Integrity summary with 1-based line numbers
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.parity_ok() {
            let columns: Vec<usize> = self.failed_columns.iter().map(|i| i + 1).collect();
            let rows: Vec<usize> = self.failed_rows.iter().map(|i| i + 1).collect();
            writeln!(f, "Warning:")?;
            writeln!(f, "{} columns parity errors: {:?}", columns.len(), columns)?;
            writeln!(f, "{} rows parity errors: {:?}", rows.len(), rows)?;
        }
        if self.separator_malformed {
            writeln!(f, "Warning: separator is malformed.")?;
        }
        f.write_str(&self.coherence_message())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_report() {
        let report = DiagnosticReport::default();
        assert!(report.is_clean());
        assert!(report.messages().is_empty());
        assert_eq!(report.to_string(), "");
    }

    #[test]
    fn test_report_summary() {
        let report = DiagnosticReport {
            failed_columns: vec![0, 4],
            failed_rows: vec![2],
            separator_malformed: true,
            coherence: vec![CoherenceViolation::Minute(60)],
        };
        assert!(!report.is_clean());
        assert_eq!(
            report.to_string(),
            "Warning:\n2 columns parity errors: [1, 5]\n1 rows parity errors: [3]\n\
             Warning: separator is malformed.\nimpossible number of minutes, got 60\n"
        );
        assert_eq!(report.messages().len(), 5);
    }
}
