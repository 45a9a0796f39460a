//! Caller-supplied values and their per-widget interpretation.
//!
//! Callers hand over an [`InputValue`] (text, a boolean, or nothing). Right
//! before a widget is mutated it is resolved into a [`FieldValue`]: either
//! literal text or a checkbox state.

use std::borrow::Cow;
use std::fmt;

/// Tokens (compared upper-cased) that turn a checkbox on.
pub const TRUTHY_TOKENS: [&str; 5] = ["Y", "YES", "TRUE", "ON", "1"];

/// Whether `token` means "checked". Unrecognized tokens are simply false.
pub fn is_truthy(token: &str) -> bool {
    let upper = token.trim().to_uppercase();
    TRUTHY_TOKENS.contains(&upper.as_str())
}

/// A value as supplied by the caller, before the target widget is known.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum InputValue {
    Text(String),
    Bool(bool),
    /// No value; clears text fields and unchecks checkboxes.
    Absent,
}

impl InputValue {
    /// String form of the value. Booleans render as `True` / `False`.
    pub fn as_text(&self) -> Cow<'_, str> {
        match self {
            Self::Text(s) => Cow::Borrowed(s.as_str()),
            Self::Bool(true) => Cow::Borrowed("True"),
            Self::Bool(false) => Cow::Borrowed("False"),
            Self::Absent => Cow::Borrowed(""),
        }
    }

    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Bool(b) => *b,
            Self::Text(s) => is_truthy(s),
            Self::Absent => false,
        }
    }
}

impl From<&str> for InputValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for InputValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<bool> for InputValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl<T: Into<InputValue>> From<Option<T>> for InputValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Absent, Into::into)
    }
}

impl fmt::Display for InputValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_text())
    }
}

/// The value actually written into a widget.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FieldValue {
    Text(String),
    Checkbox(bool),
}

impl FieldValue {
    /// Interpret `input` for a widget that is (or is forced to be) a checkbox.
    pub fn resolve(input: &InputValue, as_checkbox: bool) -> Self {
        if as_checkbox {
            Self::Checkbox(input.is_truthy())
        } else {
            Self::Text(input.as_text().into_owned())
        }
    }
}
