//! The fill pipeline: open a fresh template copy, apply a record, flatten
//! and save.

use std::path::{Path, PathBuf};

use acroform_core::{ApplyReport, FlattenReport, FormError};
use acroform_parse::FormDocument;

use crate::options::FillOptions;
use crate::record::ApplicationRecord;
use crate::synth::synthesize;

/// What happened to one generated sample.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleReport {
    pub path: PathBuf,
    pub apply: ApplyReport,
    pub flatten: FlattenReport,
}

/// `<out_dir>/ACORD_125_Sample_<n>.pdf`, `n` 1-based.
pub fn sample_path(out_dir: &Path, n: usize) -> PathBuf {
    out_dir.join(format!("ACORD_125_Sample_{n}.pdf"))
}

/// Write every assignment of `record` into `doc`.
pub fn fill_document(doc: &mut FormDocument, record: &ApplicationRecord) -> ApplyReport {
    let plan = record.fill_plan();
    doc.apply_many(&plan.values, &plan.checkboxes)
}

/// Fill, flatten and save one sample from a freshly opened template.
pub fn fill_sample(
    template: &Path,
    out_path: &Path,
    record: &ApplicationRecord,
) -> Result<SampleReport, FormError> {
    let mut doc = FormDocument::open_file(template)?;
    let apply = fill_document(&mut doc, record);
    let flatten = doc.flatten();
    doc.save(out_path)?;

    tracing::info!(
        path = %out_path.display(),
        industry = record.industry.name,
        entity = record.entity.label(),
        losses = record.losses.len(),
        applied = apply.applied,
        missing = apply.missing.len(),
        flattened = flatten.flattened,
        skipped = flatten.skipped.len(),
        "sample written"
    );
    Ok(SampleReport {
        path: out_path.to_path_buf(),
        apply,
        flatten,
    })
}

/// Generate `options.samples` filled samples in sequence.
///
/// `on_written` is called after each file is saved. The first failure
/// stops the batch.
pub fn generate_samples(
    options: &FillOptions,
    mut on_written: impl FnMut(&SampleReport),
) -> Result<Vec<SampleReport>, FormError> {
    if !options.template.is_file() {
        return Err(FormError::IoError(format!(
            "template not found: {}",
            options.template.display()
        )));
    }
    std::fs::create_dir_all(&options.out_dir)?;

    let mut rng = options.rng();
    let effective = options.effective_date();
    let mut reports = Vec::with_capacity(options.samples);
    for index in 0..options.samples {
        let record = synthesize(index, effective, &mut rng);
        let path = sample_path(&options.out_dir, index + 1);
        let report = fill_sample(&options.template, &path, &record)?;
        on_written(&report);
        reports.push(report);
    }
    Ok(reports)
}
