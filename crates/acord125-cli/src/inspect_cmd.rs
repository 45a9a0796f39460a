use std::fs;
use std::path::PathBuf;

use acord125::{FieldRecord, InspectOptions, inspect_template, legend_lines};

use crate::shared::{csv_escape, fail};

pub const JSON_FILE: &str = "fields.json";
pub const CSV_FILE: &str = "fields.csv";
pub const LEGEND_FILE: &str = "field_type_legend.txt";

const CSV_HEADER: &str =
    "page,field_name,field_type,field_type_name,left,top,right,bottom,current_value,choices";

pub fn run(opts: &InspectOptions) -> Result<(), i32> {
    let report = inspect_template(&opts.template).map_err(fail)?;
    fs::create_dir_all(&opts.out_dir).map_err(fail)?;

    let json_path = opts.out_dir.join(JSON_FILE);
    let json = serde_json::to_string_pretty(&report).map_err(fail)?;
    fs::write(&json_path, json).map_err(fail)?;

    let csv_path = opts.out_dir.join(CSV_FILE);
    fs::write(&csv_path, render_csv(&report.fields)).map_err(fail)?;

    let legend_path = opts.out_dir.join(LEGEND_FILE);
    fs::write(&legend_path, render_legend()).map_err(fail)?;

    tracing::info!(count = report.count, "inspection complete");
    println!("Wrote: {}", joined(&[json_path, csv_path, legend_path]));
    Ok(())
}

/// One row per widget instance, choices joined with `|`.
///
/// Rect values use the shortest round-trip form, as in `fields.json`.
pub fn render_csv(fields: &[FieldRecord]) -> String {
    let mut out = String::from(CSV_HEADER);
    out.push('\n');
    for field in fields {
        let [left, top, right, bottom] = field.rect;
        out.push_str(&format!(
            "{},{},{},{},{:?},{:?},{:?},{:?},{},{}\n",
            field.page,
            csv_escape(&field.field_name),
            field.field_type,
            field.field_type_name,
            left,
            top,
            right,
            bottom,
            csv_escape(&field.value),
            csv_escape(&field.choices.join("|")),
        ));
    }
    out
}

fn render_legend() -> String {
    let mut out = legend_lines().join("\n");
    out.push('\n');
    out
}

fn joined(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
