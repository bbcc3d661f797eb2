/// Separator field check
use super::field::FieldDecoder;
use crate::models::layout::SEPARATOR_FIELD;
use crate::models::{DotMatrix, FieldRole};

/// Returns true when the separator field is malformed
///
/// With its meta bit clear the separator must have every other bit set;
/// with the meta bit set it must be empty.
pub fn separator_malformed(matrix: &DotMatrix) -> bool {
    let layout = matrix.layout();
    let field = layout
        .position_of(FieldRole::Separator)
        .unwrap_or(SEPARATOR_FIELD);
    let decoder = FieldDecoder::new(matrix);

    let value = decoder.line_value(field);
    let expected = if decoder.bit(field, layout.meta_position()) == 0 {
        layout.max_field_value()
    } else {
        0
    };
    value != expected
}
