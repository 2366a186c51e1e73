//! # Quote Error Types Module
//!
//! This module defines the error conditions raised while building a quotation.
//! Extraction itself never fails: text without measures simply yields an empty list.

/// Custom error types for quotation operations
#[derive(Debug, Clone, PartialEq)]
pub enum QuoteError {
    /// A required field was blank (e.g. "length", "width", "phone")
    MissingRequiredField(&'static str),
    /// A field was present but not a valid positive number
    InvalidNumber { field: &'static str, value: String },
    /// A 1-based position outside `1..=len`
    IndexOutOfRange { position: usize, len: usize },
    /// A quotation was built without any measure
    EmptyQuotation,
    /// Unrecognized extraction mode name
    UnknownMode(String),
    /// Configuration value rejected
    InvalidConfig(String),
}

impl std::fmt::Display for QuoteError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            QuoteError::MissingRequiredField(field) => {
                write!(f, "Missing required field: {field}")
            }
            QuoteError::InvalidNumber { field, value } => {
                write!(f, "Invalid number for {field}: '{value}'")
            }
            QuoteError::IndexOutOfRange { position, len } => {
                write!(f, "Position {position} out of range (list has {len} measures)")
            }
            QuoteError::EmptyQuotation => write!(f, "Quotation has no measures"),
            QuoteError::UnknownMode(mode) => write!(f, "Unknown extraction mode: {mode}"),
            QuoteError::InvalidConfig(msg) => write!(f, "Configuration error: {msg}"),
        }
    }
}

impl std::error::Error for QuoteError {}
