/// Positional decoding of one field line
use crate::error::Result;
use crate::models::{DotMatrix, FieldRole};

/// Reads fields out of a dot matrix through its layout
pub struct FieldDecoder<'a> {
    matrix: &'a DotMatrix,
}

impl<'a> FieldDecoder<'a> {
    /// Create a decoder over `matrix`
    pub fn new(matrix: &'a DotMatrix) -> Self {
        Self { matrix }
    }

    /// Decode one field as an unsigned integer
    ///
    /// Bit `i` weighs `2^i` for every bit below the meta position; dots are
    /// read from the lowest bit upward. The meta bit is never part of the
    /// value, so the result lies in `[0, 2^(bits_per_field - 1) - 1]`.
    pub fn decode_line(&self, field: usize) -> Result<u32> {
        let layout = self.matrix.layout();
        let mut value = 0u32;
        for bit in 0..layout.meta_position() {
            let (column, row) = layout.cell(field, bit)?;
            value |= (self.matrix.bit(column, row) as u32) << bit;
        }
        Ok(value)
    }

    /// Meta (parity) bit of one field
    pub fn meta_bit(&self, field: usize) -> Result<u8> {
        let layout = self.matrix.layout();
        self.matrix.field_bit(field, layout.meta_position())
    }

    /// Decode every field, paired with its role
    pub fn decode_all(&self) -> Vec<(FieldRole, u32)> {
        let layout = self.matrix.layout();
        layout
            .labels()
            .iter()
            .enumerate()
            .map(|(field, role)| (*role, self.line_value(field)))
            .collect()
    }

    /// Decode a field index known to be in range
    pub(crate) fn line_value(&self, field: usize) -> u32 {
        self.decode_line(field).unwrap_or(0)
    }

    /// Read a logical bit known to be in range
    pub(crate) fn bit(&self, field: usize, bit: usize) -> u8 {
        self.matrix.field_bit(field, bit).unwrap_or(0)
    }
}
