//! Error types for form inspection and filling.
//!
//! [`FormError`] covers the fatal conditions only: a document that cannot be
//! read, parsed or written. Per-widget problems are not errors; they are
//! reported through [`crate::SkipReason`].

use std::fmt;

/// Fatal error types for form processing.
#[derive(Debug, Clone, PartialEq)]
pub enum FormError {
    /// Error parsing PDF structure or syntax.
    ParseError(String),
    /// I/O error reading or writing a file.
    IoError(String),
    /// The PDF is encrypted and cannot be edited.
    PasswordRequired,
    /// Error serializing the document or an output artifact.
    WriteError(String),
}

impl fmt::Display for FormError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormError::ParseError(msg) => write!(f, "parse error: {msg}"),
            FormError::IoError(msg) => write!(f, "I/O error: {msg}"),
            FormError::PasswordRequired => write!(f, "PDF is encrypted and requires a password"),
            FormError::WriteError(msg) => write!(f, "write error: {msg}"),
        }
    }
}

impl std::error::Error for FormError {}

impl From<std::io::Error> for FormError {
    fn from(err: std::io::Error) -> Self {
        FormError::IoError(err.to_string())
    }
}
