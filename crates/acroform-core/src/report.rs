//! Best-effort outcome tracking for widget mutation and flattening.
//!
//! Individual widgets may fail to update (dangling references, malformed
//! dictionaries). Those failures never abort the surrounding operation;
//! they are recorded here so callers and tests can observe them.

use std::fmt;

/// Why a widget was left untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SkipReason {
    /// The widget, its field dictionary, or a parent points at an object
    /// that no longer exists.
    OrphanedReference,
    /// The object exists but does not have the expected structure.
    Malformed(String),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::OrphanedReference => f.write_str("orphaned widget reference"),
            SkipReason::Malformed(msg) => write!(f, "malformed widget: {msg}"),
        }
    }
}

/// Result of touching a single widget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WidgetOutcome {
    Updated,
    Skipped(SkipReason),
}

/// Aggregate outcome of applying one value to every widget of one name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldUpdate {
    /// Widgets whose trimmed name matched.
    pub matched: usize,
    /// Widgets that took the new value.
    pub updated: usize,
    pub skipped: Vec<SkipReason>,
}

impl FieldUpdate {
    pub fn record(&mut self, outcome: WidgetOutcome) {
        self.matched += 1;
        match outcome {
            WidgetOutcome::Updated => self.updated += 1,
            WidgetOutcome::Skipped(reason) => self.skipped.push(reason),
        }
    }

    /// Whether at least one widget was found and updated.
    pub fn found(&self) -> bool {
        self.updated > 0
    }
}

/// Per-document summary of a batch of field applications.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApplyReport {
    /// Names for which at least one widget was updated.
    pub applied: usize,
    /// Names with no updated widget, in application order.
    pub missing: Vec<String>,
    pub widgets_updated: usize,
    pub widgets_skipped: usize,
}

impl ApplyReport {
    pub fn absorb(&mut self, name: &str, update: &FieldUpdate) {
        if update.found() {
            self.applied += 1;
        } else {
            self.missing.push(name.to_string());
        }
        self.widgets_updated += update.updated;
        self.widgets_skipped += update.skipped.len();
    }
}

/// Summary of a flatten pass over a whole document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlattenReport {
    /// Widgets drawn into page content and removed from `/Annots`.
    pub flattened: usize,
    /// Hidden or appearance-less widgets removed without drawing.
    pub dropped: usize,
    /// Widgets left in place.
    pub skipped: Vec<SkipReason>,
}
