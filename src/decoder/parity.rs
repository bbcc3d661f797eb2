//! Column and row parity on the printed grid
//!
//! Parity follows the printed geometry in every orientation. Each column
//! is checked against its top dot, and each row below the top is checked
//! against column 0 with column 0 left out of the sum. The top row is
//! never row-checked; its corner dot covers column 0.
//!
//! In the standard orientation columns are fields and rows are bit
//! positions. The rotated layouts are not a transpose of that: their top
//! row is the last field, which holds column parity, and column 0 holds
//! the meta bits of each field.

use serde::Serialize;

use crate::models::DotMatrix;

/// How a parity bit relates to the bits it covers
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum ParityConvention {
    /// Parity bit equals the sum of the covered bits mod 2
    #[default]
    Even,
    /// Parity bit makes the total count of dots odd
    Odd,
}

impl ParityConvention {
    /// Expected parity bit for `ones` covered dots
    pub fn expected_bit(self, ones: u32) -> u8 {
        let even = (ones % 2) as u8;
        match self {
            ParityConvention::Even => even,
            ParityConvention::Odd => 1 - even,
        }
    }

    /// Parse `even`/`odd`
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "even" => Some(ParityConvention::Even),
            "odd" => Some(ParityConvention::Odd),
            _ => None,
        }
    }
}

/// Printed column that carries the cross parity of every checked row
pub const CARRIER_COLUMN: usize = 0;

/// Printed columns whose dots disagree with their parity dot in the top row
pub fn failed_columns(matrix: &DotMatrix, convention: ParityConvention) -> Vec<usize> {
    let top = matrix.layout().parity_row();

    (0..matrix.width())
        .filter(|&column| {
            let ones: u32 = (0..top).map(|row| matrix.bit(column, row) as u32).sum();
            matrix.bit(column, top) != convention.expected_bit(ones)
        })
        .collect()
}

/// Printed rows below the top whose dots disagree with the carrier column
pub fn failed_rows(matrix: &DotMatrix, convention: ParityConvention) -> Vec<usize> {
    let top = matrix.layout().parity_row();

    (0..top)
        .filter(|&row| {
            let ones: u32 = (CARRIER_COLUMN + 1..matrix.width())
                .map(|column| matrix.bit(column, row) as u32)
                .sum();
            matrix.bit(CARRIER_COLUMN, row) != convention.expected_bit(ones)
        })
        .collect()
}
