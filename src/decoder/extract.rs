/// Assembles the decoded record from a dot matrix
use super::field::FieldDecoder;
use crate::models::{
    DecodedRecord, DocumentKind, DotMatrix, ExtraField, FieldRole, Timestamp, Unconfirmed,
};

/// Decode date, time, serial number and device-specific fields
///
/// Values are raw; run the validator for plausibility.
pub fn extract(matrix: &DotMatrix) -> DecodedRecord {
    let layout = matrix.layout();
    let decoder = FieldDecoder::new(matrix);
    let read = |role: FieldRole| {
        layout
            .position_of(role)
            .map_or(0, |field| decoder.line_value(field))
    };

    let timestamp = Timestamp {
        year: read(FieldRole::Year),
        month: read(FieldRole::Month),
        day: read(FieldRole::Day),
        hour: read(FieldRole::Hour),
        minute: read(FieldRole::Minute),
    };

    let serial_bytes = [
        read(FieldRole::SerialByte(1)),
        read(FieldRole::SerialByte(2)),
        read(FieldRole::SerialByte(3)),
        read(FieldRole::SerialByte(4)),
    ];
    let serial = serial_bytes.iter().map(|b| format!("{:02}", b)).collect();

    let extras = layout
        .labels()
        .iter()
        .enumerate()
        .filter(|(_, role)| matches!(role, FieldRole::Unknown(_)))
        .map(|(field, role)| ExtraField {
            label: role.label(),
            field,
            value: decoder.line_value(field),
        })
        .collect();

    // Unconfirmed: a filled field reads as a print, an empty one as a copy.
    let document_type = layout.document_type_field().map(|field| {
        let kind = if decoder.line_value(field) > 0 {
            DocumentKind::Printed
        } else {
            DocumentKind::Copied
        };
        Unconfirmed::new(kind)
    });

    DecodedRecord {
        layout: layout.kind(),
        timestamp,
        serial_bytes,
        serial,
        extras,
        document_type,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::LayoutKind;
    use crate::models::layout::{ROTATED, STANDARD, VARIANT_A, VARIANT_B};

    fn write_value(matrix: &mut DotMatrix, field: usize, value: u32) {
        for bit in 0..7 {
            matrix
                .set_field_bit(field, bit, ((value >> bit) & 1) as u8)
                .unwrap();
        }
    }

    fn fill(matrix: &mut DotMatrix) {
        write_value(matrix, 1, 50); // minute
        write_value(matrix, 4, 18); // hour
        write_value(matrix, 5, 11); // day
        write_value(matrix, 6, 4); // month
        write_value(matrix, 7, 8); // year
        write_value(matrix, 9, 127); // separator
        write_value(matrix, 13, 21); // serial_b1
        write_value(matrix, 12, 5); // serial_b2
        write_value(matrix, 11, 56); // serial_b3
        write_value(matrix, 10, 77); // serial_b4
        write_value(matrix, 2, 6);
        write_value(matrix, 3, 1);
        write_value(matrix, 14, 99);
    }

    #[test]
    fn test_extract_standard() {
        let mut matrix = DotMatrix::new(&STANDARD);
        fill(&mut matrix);
        let record = extract(&matrix);
        assert_eq!(record.layout, LayoutKind::Standard);
        assert_eq!(record.timestamp.to_string(), "18:50 11-04-08");
        assert_eq!(record.serial_bytes, [21, 5, 56, 77]);
        assert_eq!(record.serial, "21055677");
        assert_eq!(record.document_type, Some(Unconfirmed::new(DocumentKind::Printed)));
        assert_eq!(record.extras.len(), 1);
        assert_eq!(record.extras[0].label, "unknown");
        assert_eq!(record.extras[0].value, 99);
    }

    #[test]
    fn test_extract_rotated_matches_standard() {
        let mut standard = DotMatrix::new(&STANDARD);
        let mut rotated = DotMatrix::new(&ROTATED);
        fill(&mut standard);
        fill(&mut rotated);
        let a = extract(&standard);
        let b = extract(&rotated);
        assert_eq!(a.timestamp, b.timestamp);
        assert_eq!(a.serial, b.serial);
        assert_eq!(b.layout, LayoutKind::Rotated);
    }

    #[test]
    fn test_extract_variants_expose_unknowns() {
        for layout in [&VARIANT_A, &VARIANT_B] {
            let mut matrix = DotMatrix::new(layout);
            fill(&mut matrix);
            let record = extract(&matrix);
            assert_eq!(record.document_type, None);
            let extras: Vec<(String, u32)> = record
                .extras
                .iter()
                .map(|e| (e.label.clone(), e.value))
                .collect();
            assert_eq!(
                extras,
                vec![
                    ("unknown1".to_string(), 6),
                    ("unknown2".to_string(), 1),
                    ("unknown3".to_string(), 99)
                ]
            );
        }
    }

    #[test]
    fn test_extract_empty_grid() {
        let record = extract(&DotMatrix::new(&STANDARD));
        assert_eq!(record.timestamp, Timestamp::default());
        assert_eq!(record.serial, "00000000");
        assert_eq!(record.document_type, Some(Unconfirmed::new(DocumentKind::Copied)));
    }
}
