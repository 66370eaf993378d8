//! Common types and utilities shared across the meeple crates.
//!
//! This crate holds the small vocabulary that both the configuration layer
//! and the binary need to agree on, plus the tracing initialisation used by
//! every entrypoint and integration test.
//!
//! # Overview
//!
//! - [`OutputFormat`]: how harvested records are rendered on stdout
//! - [`observability`]: centralised tracing/logging initialisation
//! - [`FormatError`]: returned when a format name is not recognised
//!
//! # Examples
//!
//! ```rust
//! use meeple_common::OutputFormat;
//!
//! let fmt: OutputFormat = "json".parse().unwrap();
//! assert_eq!(fmt, OutputFormat::Json);
//! assert_eq!(OutputFormat::default(), OutputFormat::Text);
//! ```
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub mod observability;

/// Placeholder substituted for any text field missing from a listing card.
pub const NO_INFORMATION: &str = "No information";

/// Preferred output format for harvested records.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// One `{Title: .., Price: ..}` line per record.
    #[default]
    Text,
    /// One JSON object per line.
    Json,
}

/// A format name that is neither `text` nor `json`.
#[derive(thiserror::Error, Debug)]
#[error("unknown format `{0}` (expected `text` or `json`)")]
pub struct FormatError(pub String);

impl FromStr for OutputFormat {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            other => Err(FormatError(other.to_string())),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text => f.write_str("text"),
            Self::Json => f.write_str("json"),
        }
    }
}
