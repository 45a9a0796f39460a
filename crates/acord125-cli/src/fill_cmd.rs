use acord125::{FillOptions, generate_samples};

use crate::shared::fail;

pub fn run(opts: &FillOptions) -> Result<(), i32> {
    let reports = generate_samples(opts, |report| {
        if !report.apply.missing.is_empty() {
            tracing::debug!(
                path = %report.path.display(),
                missing = report.apply.missing.len(),
                "fields absent from template"
            );
        }
        println!("Wrote: {}", report.path.display());
    })
    .map_err(fail)?;

    let skipped: usize = reports.iter().map(|r| r.flatten.skipped.len()).sum();
    if skipped > 0 {
        tracing::warn!(skipped, "widgets left unflattened");
    }
    Ok(())
}
