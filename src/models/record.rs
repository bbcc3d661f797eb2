use std::fmt;

use serde::Serialize;

use super::layout::LayoutKind;

/// Raw date and time fields, exactly as decoded (no range checks)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Timestamp {
    /// Two-digit year
    pub year: u32,
    /// Month
    pub month: u32,
    /// Day of month
    pub day: u32,
    /// Hour
    pub hour: u32,
    /// Minute
    pub minute: u32,
}

impl Timestamp {
    /// `HH:MM`
    pub fn time(&self) -> String {
        format!("{:02}:{:02}", self.hour, self.minute)
    }
}

impl fmt::Display for Timestamp {
    /// `HH:MM DD-MM-YY`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {:02}-{:02}-{:02}",
            self.time(),
            self.day,
            self.month,
            self.year
        )
    }
}

/// A value without confirmed meaning, shown with a trailing `(?)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Unconfirmed<T> {
    /// Best guess
    pub value: T,
}

impl<T> Unconfirmed<T> {
    /// Wrap a guess
    pub fn new(value: T) -> Self {
        Self { value }
    }
}

impl<T: fmt::Display> fmt::Display for Unconfirmed<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(?)", self.value)
    }
}

/// Whether the page came out of the printer or the copier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DocumentKind {
    /// Printed page
    Printed,
    /// Copied page
    Copied,
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentKind::Printed => f.write_str("printed"),
            DocumentKind::Copied => f.write_str("copied"),
        }
    }
}

/// A device-specific field decoded raw
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExtraField {
    /// Field label, e.g. `unknown3`
    pub label: String,
    /// Field index in the layout
    pub field: usize,
    /// Decoded value
    pub value: u32,
}

/// Everything decoded from one grid
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DecodedRecord {
    /// Layout the grid was read with
    pub layout: LayoutKind,
    /// Date and time fields
    pub timestamp: Timestamp,
    /// Serial bytes in printed order (b1, b2, b3, b4)
    pub serial_bytes: [u32; 4],
    /// Serial number, each byte as two decimal digits
    pub serial: String,
    /// Unknown-meaning fields in field order
    pub extras: Vec<ExtraField>,
    /// Print/copy guess for layouts that expose it
    pub document_type: Option<Unconfirmed<DocumentKind>>,
}

impl fmt::Display for DecodedRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "date: {}, serial: {}", self.timestamp, self.serial)?;
        if let Some(kind) = &self.document_type {
            write!(f, ", type: {}", kind)?;
        }
        for extra in &self.extras {
            write!(f, ", {}: {}", extra.label, extra.value)?;
        }
        Ok(())
    }
}
