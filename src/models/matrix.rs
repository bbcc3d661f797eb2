use tracing::debug;

use super::layout::Layout;
use crate::error::{Axis, MicError, Result};

/// Compact dot grid bound to a layout
///
/// Cells are addressed by the printed `(column, row)`, row 0 at the bottom.
/// Dimensions come from the layout and never change after construction.
#[derive(Debug, Clone)]
pub struct DotMatrix {
    layout: &'static Layout,
    data: Vec<u8>,
}

impl DotMatrix {
    /// Create an empty (all zero) matrix for `layout`
    pub fn new(layout: &'static Layout) -> Self {
        let bytes_needed = (layout.columns() * layout.rows()).div_ceil(8);
        Self {
            layout,
            data: vec![0; bytes_needed],
        }
    }

    /// Bound layout
    pub fn layout(&self) -> &'static Layout {
        self.layout
    }

    /// Grid width
    pub fn width(&self) -> usize {
        self.layout.columns()
    }

    /// Grid height
    pub fn height(&self) -> usize {
        self.layout.rows()
    }

    /// Get the dot at (column, row)
    pub fn get(&self, column: usize, row: usize) -> Result<u8> {
        self.check_bounds(column, row)?;
        Ok(self.bit(column, row))
    }

    /// Set the dot at (column, row) to 0 or 1
    pub fn set(&mut self, column: usize, row: usize, value: u8) -> Result<()> {
        check_value(value)?;
        self.check_bounds(column, row)?;
        self.write_bit(column, row, value == 1);
        Ok(())
    }

    /// Get a bit by logical (field, bit) coordinates
    pub fn field_bit(&self, field: usize, bit: usize) -> Result<u8> {
        let (column, row) = self.layout.cell(field, bit)?;
        Ok(self.bit(column, row))
    }

    /// Set a bit by logical (field, bit) coordinates
    pub fn set_field_bit(&mut self, field: usize, bit: usize, value: u8) -> Result<()> {
        check_value(value)?;
        let (column, row) = self.layout.cell(field, bit)?;
        self.write_bit(column, row, value == 1);
        Ok(())
    }

    /// Replace the whole grid from column-major cells (`grid[column][row]`)
    ///
    /// The grid is validated in full before anything is written, so a
    /// rejected load leaves the current contents untouched.
    pub fn load(&mut self, grid: &[Vec<u8>]) -> Result<()> {
        let (columns, rows) = (self.width(), self.height());
        let mismatch = |found_rows: usize| MicError::ShapeMismatch {
            expected_columns: columns,
            expected_rows: rows,
            found_columns: grid.len(),
            found_rows,
        };

        if grid.len() != columns {
            return Err(mismatch(grid.first().map_or(0, Vec::len)));
        }
        if let Some(bad) = grid.iter().find(|column| column.len() != rows) {
            return Err(mismatch(bad.len()));
        }
        for &value in grid.iter().flatten() {
            check_value(value)?;
        }

        let mut data = vec![0u8; self.data.len()];
        for (column, cells) in grid.iter().enumerate() {
            for (row, &value) in cells.iter().enumerate() {
                if value == 1 {
                    let index = row * columns + column;
                    data[index / 8] |= 1 << (index % 8);
                }
            }
        }
        self.data = data;
        debug!(
            layout = %self.layout.kind(),
            dots = self.count_ones(),
            "loaded dot grid"
        );
        Ok(())
    }

    /// Copy the contents out as column-major cells
    pub fn to_grid(&self) -> Vec<Vec<u8>> {
        (0..self.width())
            .map(|column| (0..self.height()).map(|row| self.bit(column, row)).collect())
            .collect()
    }

    /// Number of dots set
    pub fn count_ones(&self) -> usize {
        self.data.iter().map(|b| b.count_ones() as usize).sum()
    }

    /// Clear all dots
    pub fn clear(&mut self) {
        self.data.fill(0);
    }

    /// Read a cell the caller already bounds-checked
    pub(crate) fn bit(&self, column: usize, row: usize) -> u8 {
        let index = row * self.width() + column;
        (self.data[index / 8] >> (index % 8)) & 1
    }

    fn write_bit(&mut self, column: usize, row: usize, value: bool) {
        let index = row * self.width() + column;
        let byte_index = index / 8;
        let bit_index = index % 8;
        if value {
            self.data[byte_index] |= 1 << bit_index;
        } else {
            self.data[byte_index] &= !(1 << bit_index);
        }
    }

    fn check_bounds(&self, column: usize, row: usize) -> Result<()> {
        if column >= self.width() {
            return Err(MicError::IndexOutOfRange {
                axis: Axis::Column,
                index: column,
                len: self.width(),
            });
        }
        if row >= self.height() {
            return Err(MicError::IndexOutOfRange {
                axis: Axis::Row,
                index: row,
                len: self.height(),
            });
        }
        Ok(())
    }
}

fn check_value(value: u8) -> Result<()> {
    if value > 1 {
        return Err(MicError::InvalidValue(value));
    }
    Ok(())
}
