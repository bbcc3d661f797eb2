use std::fmt;

use serde::Serialize;

use crate::error::{Axis, MicError, Result};

/// Which matrix axis a field runs along
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Orientation {
    /// One field per column, bits stacked bottom (weight 1) to top (meta)
    Standard,
    /// One field per row, bits read right (weight 1) to left (meta)
    Rotated,
}

/// Named layout families
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum LayoutKind {
    /// Xerox DocuColor, 15 columns x 8 rows
    Standard,
    /// DocuColor pattern printed rotated, 8 columns x 15 rows
    Rotated,
    /// Standard geometry with fields 2 and 3 in use (Xerox Phaser)
    VariantA,
    /// Rotated geometry with fields 2 and 3 in use (Dell ColorLaser)
    VariantB,
}

impl LayoutKind {
    /// All layout kinds
    pub const ALL: [LayoutKind; 4] = [
        LayoutKind::Standard,
        LayoutKind::Rotated,
        LayoutKind::VariantA,
        LayoutKind::VariantB,
    ];

    /// Shared descriptor for this kind
    pub fn layout(self) -> &'static Layout {
        match self {
            LayoutKind::Standard => &STANDARD,
            LayoutKind::Rotated => &ROTATED,
            LayoutKind::VariantA => &VARIANT_A,
            LayoutKind::VariantB => &VARIANT_B,
        }
    }

    /// Short lowercase name
    pub fn name(self) -> &'static str {
        match self {
            LayoutKind::Standard => "standard",
            LayoutKind::Rotated => "rotated",
            LayoutKind::VariantA => "variant-a",
            LayoutKind::VariantB => "variant-b",
        }
    }
}

impl fmt::Display for LayoutKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Semantic meaning of one field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum FieldRole {
    /// Cross-parity carrier (field 0)
    RowParity,
    /// Minute, 0-59
    Minute,
    /// Hour, 0-23
    Hour,
    /// Day of month
    Day,
    /// Month
    Month,
    /// Two-digit year
    Year,
    /// Fixed pattern marking a well-formed grid
    Separator,
    /// One byte of the serial number, `SerialByte(1)` is printed first
    SerialByte(u8),
    /// Always empty on the devices seen so far; `0` means unnumbered
    Unused(u8),
    /// Carries data of unknown meaning; `0` means unnumbered
    Unknown(u8),
}

impl FieldRole {
    /// Label as shown next to the grid
    pub fn label(&self) -> String {
        match self {
            FieldRole::RowParity => "row parity".to_string(),
            FieldRole::Minute => "minute".to_string(),
            FieldRole::Hour => "hour".to_string(),
            FieldRole::Day => "day".to_string(),
            FieldRole::Month => "month".to_string(),
            FieldRole::Year => "year".to_string(),
            FieldRole::Separator => "separator".to_string(),
            FieldRole::SerialByte(n) => format!("serial_b{}", n),
            FieldRole::Unused(0) => "unused".to_string(),
            FieldRole::Unused(n) => format!("unused{}", n),
            FieldRole::Unknown(0) => "unknown".to_string(),
            FieldRole::Unknown(n) => format!("unknown{}", n),
        }
    }
}

impl fmt::Display for FieldRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

/// Static geometry and semantics of one device family
///
/// `field_count` is the length of the field axis (one semantic value per
/// line) and `bits_per_field` the length of the bit axis, the last bit of
/// which is the meta (parity) bit. `orientation` decides how a logical
/// `(field, bit)` pair lands on the printed `(column, row)` grid.
#[derive(Debug, PartialEq, Eq)]
pub struct Layout {
    kind: LayoutKind,
    field_count: usize,
    bits_per_field: usize,
    orientation: Orientation,
    labels: &'static [FieldRole],
    document_type_field: Option<usize>,
}

static DOCUCOLOR_LABELS: [FieldRole; 15] = [
    FieldRole::RowParity,
    FieldRole::Minute,
    FieldRole::Unused(1),
    FieldRole::Unused(2),
    FieldRole::Hour,
    FieldRole::Day,
    FieldRole::Month,
    FieldRole::Year,
    FieldRole::Unused(3),
    FieldRole::Separator,
    FieldRole::SerialByte(4),
    FieldRole::SerialByte(3),
    FieldRole::SerialByte(2),
    FieldRole::SerialByte(1),
    FieldRole::Unknown(0),
];

// Fields 2 and 3 carry values on these devices. The dataset is too small to
// say what they mean, so they are decoded raw.
static REPURPOSED_LABELS: [FieldRole; 15] = [
    FieldRole::RowParity,
    FieldRole::Minute,
    FieldRole::Unknown(1),
    FieldRole::Unknown(2),
    FieldRole::Hour,
    FieldRole::Day,
    FieldRole::Month,
    FieldRole::Year,
    FieldRole::Unused(0),
    FieldRole::Separator,
    FieldRole::SerialByte(4),
    FieldRole::SerialByte(3),
    FieldRole::SerialByte(2),
    FieldRole::SerialByte(1),
    FieldRole::Unknown(3),
];

/// Index of the separator field in every layout
pub const SEPARATOR_FIELD: usize = 9;

/// Xerox DocuColor
pub static STANDARD: Layout = Layout {
    kind: LayoutKind::Standard,
    field_count: 15,
    bits_per_field: 8,
    orientation: Orientation::Standard,
    labels: &DOCUCOLOR_LABELS,
    document_type_field: Some(SEPARATOR_FIELD),
};

/// DocuColor pattern turned 90 degrees on the page
pub static ROTATED: Layout = Layout {
    kind: LayoutKind::Rotated,
    field_count: 15,
    bits_per_field: 8,
    orientation: Orientation::Rotated,
    labels: &DOCUCOLOR_LABELS,
    document_type_field: Some(SEPARATOR_FIELD),
};

/// Xerox Phaser / WorkCentre
pub static VARIANT_A: Layout = Layout {
    kind: LayoutKind::VariantA,
    field_count: 15,
    bits_per_field: 8,
    orientation: Orientation::Standard,
    labels: &REPURPOSED_LABELS,
    document_type_field: None,
};

/// Dell ColorLaser / Epson AcuLaser C3000, C4000
pub static VARIANT_B: Layout = Layout {
    kind: LayoutKind::VariantB,
    field_count: 15,
    bits_per_field: 8,
    orientation: Orientation::Rotated,
    labels: &REPURPOSED_LABELS,
    document_type_field: None,
};

impl Layout {
    /// Layout kind
    pub fn kind(&self) -> LayoutKind {
        self.kind
    }

    /// Number of fields (length of the field axis)
    pub fn field_count(&self) -> usize {
        self.field_count
    }

    /// Bits per field including the meta bit (length of the bit axis)
    pub fn bits_per_field(&self) -> usize {
        self.bits_per_field
    }

    /// Axis orientation
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Bit index of the meta (parity) bit
    pub fn meta_position(&self) -> usize {
        self.bits_per_field - 1
    }

    /// Largest value a field can decode to (all non-meta bits set)
    pub fn max_field_value(&self) -> u32 {
        (1u32 << self.meta_position()) - 1
    }

    /// Per-field roles, indexed by field
    pub fn labels(&self) -> &'static [FieldRole] {
        self.labels
    }

    /// Role of one field
    pub fn role(&self, field: usize) -> Result<FieldRole> {
        self.labels
            .get(field)
            .copied()
            .ok_or(MicError::IndexOutOfRange {
                axis: Axis::Field,
                index: field,
                len: self.field_count,
            })
    }

    /// First field carrying `role`
    pub fn position_of(&self, role: FieldRole) -> Option<usize> {
        self.labels.iter().position(|r| *r == role)
    }

    /// Field used for the print/copy guess, if the layout exposes one
    pub fn document_type_field(&self) -> Option<usize> {
        self.document_type_field
    }

    /// Printed grid width
    pub fn columns(&self) -> usize {
        match self.orientation {
            Orientation::Standard => self.field_count,
            Orientation::Rotated => self.bits_per_field,
        }
    }

    /// Printed grid height
    pub fn rows(&self) -> usize {
        match self.orientation {
            Orientation::Standard => self.bits_per_field,
            Orientation::Rotated => self.field_count,
        }
    }

    /// Printed row holding the column parity dots
    ///
    /// This is the top row in both orientations. For rotated layouts it is
    /// the last field rather than the meta bit of each field.
    pub fn parity_row(&self) -> usize {
        self.rows() - 1
    }

    /// Map a logical `(field, bit)` to the printed `(column, row)`
    ///
    /// Row 0 is the bottom row of the printed grid. In the rotated layout
    /// column 0 holds the meta bits, so bit weights grow from right to left.
    pub fn cell(&self, field: usize, bit: usize) -> Result<(usize, usize)> {
        if field >= self.field_count {
            return Err(MicError::IndexOutOfRange {
                axis: Axis::Field,
                index: field,
                len: self.field_count,
            });
        }
        if bit >= self.bits_per_field {
            return Err(MicError::IndexOutOfRange {
                axis: Axis::Bit,
                index: bit,
                len: self.bits_per_field,
            });
        }
        Ok(match self.orientation {
            Orientation::Standard => (field, bit),
            Orientation::Rotated => (self.bits_per_field - 1 - bit, field),
        })
    }
}
