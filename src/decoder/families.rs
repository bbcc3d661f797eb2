use crate::error::{MicError, Result};
use crate::models::layout::{Layout, ROTATED, STANDARD, VARIANT_A, VARIANT_B};
use crate::models::LayoutKind;

/// A named printer family and the layout its dots follow
#[derive(Debug, PartialEq, Eq)]
pub struct Family {
    /// Manufacturer
    pub vendor: &'static str,
    /// Model line
    pub model: &'static str,
    /// Shared layout descriptor
    pub layout: &'static Layout,
}

impl Family {
    /// `Vendor Model`
    pub fn name(&self) -> String {
        format!("{} {}", self.vendor, self.model)
    }
}

/// Known printer families
///
/// Families printing exactly another family's pattern point at the same
/// descriptor.
pub static FAMILIES: [Family; 7] = [
    Family {
        vendor: "Xerox",
        model: "DocuColor",
        layout: &STANDARD,
    },
    Family {
        vendor: "Xerox",
        model: "DocuColor (flipped)",
        layout: &ROTATED,
    },
    Family {
        vendor: "Xerox",
        model: "Phaser",
        layout: &VARIANT_A,
    },
    Family {
        vendor: "Xerox",
        model: "WorkCentre",
        layout: &VARIANT_A,
    },
    Family {
        vendor: "Dell",
        model: "ColorLaser",
        layout: &VARIANT_B,
    },
    Family {
        vendor: "Epson",
        model: "AcuLaser C4000",
        layout: &VARIANT_B,
    },
    Family {
        vendor: "Epson",
        model: "AcuLaser C3000",
        layout: &VARIANT_B,
    },
];

// Family picked when only the vendor is given
const VENDOR_DEFAULTS: [(&str, usize); 3] = [("xerox", 0), ("dell", 4), ("epson", 5)];

fn normalize(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// Look up a family by model, `vendor model`, vendor or layout kind name
///
/// Matching ignores case, spaces and punctuation, so `"docucolor-flipped"`
/// and `"Xerox DocuColor (flipped)"` find the same entry.
pub fn find_family(name: &str) -> Result<&'static Family> {
    let key = normalize(name);
    if key.is_empty() {
        return Err(MicError::UnknownFamily(name.to_string()));
    }

    if let Some(family) = FAMILIES
        .iter()
        .find(|f| normalize(f.model) == key || normalize(&f.name()) == key)
    {
        return Ok(family);
    }
    if let Some((_, index)) = VENDOR_DEFAULTS.iter().find(|(vendor, _)| *vendor == key) {
        return Ok(&FAMILIES[*index]);
    }
    if let Some(kind) = LayoutKind::ALL.iter().find(|k| normalize(k.name()) == key) {
        if let Some(family) = FAMILIES.iter().find(|f| f.layout.kind() == *kind) {
            return Ok(family);
        }
    }

    Err(MicError::UnknownFamily(name.to_string()))
}

/// Layout for a family name
pub fn layout_for(name: &str) -> Result<&'static Layout> {
    Ok(find_family(name)?.layout)
}

/// Families printing with `kind`
pub fn families_using(kind: LayoutKind) -> impl Iterator<Item = &'static Family> {
    FAMILIES.iter().filter(move |f| f.layout.kind() == kind)
}
