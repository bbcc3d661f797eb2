#![allow(dead_code)]

use mic_decoder::{DotMatrix, Layout, ParityConvention};

/// Field indices shared by every layout
pub const MINUTE: usize = 1;
pub const HOUR: usize = 4;
pub const DAY: usize = 5;
pub const MONTH: usize = 6;
pub const YEAR: usize = 7;
pub const SEPARATOR: usize = 9;
pub const SERIAL_B4: usize = 10;
pub const SERIAL_B1: usize = 13;

/// Write `value` into the non-meta bits of `field`
pub fn write_value(matrix: &mut DotMatrix, field: usize, value: u32) {
    for bit in 0..matrix.layout().meta_position() {
        matrix
            .set_field_bit(field, bit, ((value >> bit) & 1) as u8)
            .expect("field in range");
    }
}

/// Build a grid holding `values`, then seal it under `convention`
pub fn sealed_grid(
    layout: &'static Layout,
    values: &[(usize, u32)],
    convention: ParityConvention,
) -> DotMatrix {
    let mut matrix = DotMatrix::new(layout);
    for &(field, value) in values {
        write_value(&mut matrix, field, value);
    }
    seal(&mut matrix, convention);
    matrix
}

/// Write row parity into column 0, then column parity into the top row
pub fn seal(matrix: &mut DotMatrix, convention: ParityConvention) {
    let top = matrix.height() - 1;
    for row in 0..top {
        let ones: u32 = (1..matrix.width())
            .map(|column| matrix.get(column, row).unwrap() as u32)
            .sum();
        matrix.set(0, row, convention.expected_bit(ones)).unwrap();
    }
    for column in 0..matrix.width() {
        let ones: u32 = (0..top)
            .map(|row| matrix.get(column, row).unwrap() as u32)
            .sum();
        matrix.set(column, top, convention.expected_bit(ones)).unwrap();
    }
}

/// A page printed 11 April 2008 at 18:50 by serial 21 05 56 77
pub fn sample_values() -> Vec<(usize, u32)> {
    vec![
        (MINUTE, 50),
        (HOUR, 18),
        (DAY, 11),
        (MONTH, 4),
        (YEAR, 8),
        (SEPARATOR, 127),
        (SERIAL_B1, 21),
        (12, 5),
        (11, 56),
        (SERIAL_B4, 77),
    ]
}
