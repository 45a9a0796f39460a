//! Field enumeration for the inspector.

use std::path::Path;

use acroform_core::{FieldRecord, FormError};
use acroform_parse::FormDocument;
use chrono::{Local, NaiveDateTime};
use serde::Serialize;

/// Contents of `fields.json`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldReport {
    pub template: String,
    pub generated: NaiveDateTime,
    pub count: usize,
    pub fields: Vec<FieldRecord>,
}

impl FieldReport {
    pub fn new(template: &Path, fields: Vec<FieldRecord>) -> Self {
        Self {
            template: template.display().to_string(),
            generated: Local::now().naive_local(),
            count: fields.len(),
            fields,
        }
    }
}

/// One record per widget instance, in page order then `/Annots` order.
pub fn inspect(doc: &FormDocument) -> Result<Vec<FieldRecord>, FormError> {
    Ok(doc.form_widgets()?.iter().map(FieldRecord::from).collect())
}

/// Open `template` and enumerate its widgets.
pub fn inspect_template(template: &Path) -> Result<FieldReport, FormError> {
    let doc = FormDocument::open_file(template)?;
    let fields = inspect(&doc)?;
    tracing::debug!(template = %template.display(), count = fields.len(), "fields enumerated");
    Ok(FieldReport::new(template, fields))
}
