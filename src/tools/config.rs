//! Environment-driven defaults for the command line tools
//!
//! The decoding core never reads the environment; only `mictool` and the
//! helpers in [`crate::tools`] consult these values, and CLI flags override
//! them.

use std::sync::OnceLock;

use crate::decoder::{ParityConvention, ValidationOptions, Verbosity};

/// Family used when none is given on the command line or in a grid file
pub const DEFAULT_FAMILY: &str = "DocuColor";

fn parse_usize(value: &str) -> Option<usize> {
    value.trim().parse::<usize>().ok()
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

fn env_string(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

static FAMILY: OnceLock<String> = OnceLock::new();

/// `MIC_FAMILY`, default `DocuColor`
pub fn family() -> &'static str {
    FAMILY.get_or_init(|| env_string("MIC_FAMILY").unwrap_or_else(|| DEFAULT_FAMILY.to_string()))
}

static PARITY: OnceLock<ParityConvention> = OnceLock::new();

/// `MIC_PARITY` (`even`/`odd`), default even
pub fn parity() -> ParityConvention {
    *PARITY.get_or_init(|| {
        env_string("MIC_PARITY")
            .and_then(|v| ParityConvention::parse(&v))
            .unwrap_or_default()
    })
}

static VERBOSE: OnceLock<bool> = OnceLock::new();

/// `MIC_VERBOSE`, default off
pub fn verbose() -> bool {
    *VERBOSE.get_or_init(|| env_string("MIC_VERBOSE").is_some_and(|v| parse_flag(&v)))
}

static BATCH_LIMIT: OnceLock<Option<usize>> = OnceLock::new();

/// `MIC_BATCH_LIMIT`; `None` (whole directory) when unset or `0`
pub fn batch_limit() -> Option<usize> {
    *BATCH_LIMIT.get_or_init(|| {
        env_string("MIC_BATCH_LIMIT")
            .and_then(|v| parse_usize(&v))
            .filter(|&v| v > 0)
    })
}

/// Validator options from the environment
pub fn validation_options() -> ValidationOptions {
    ValidationOptions {
        verbosity: if verbose() {
            Verbosity::Warn
        } else {
            Verbosity::Silent
        },
        parity: parity(),
    }
}
