use std::path::PathBuf;

use acord125::schema::{OUT_DIR, SAMPLE_COUNT, TEMPLATE};
use acord125::{FillOptions, InspectOptions};
use chrono::NaiveDate;
use clap::Parser;

/// Enumerate the fillable widgets of the ACORD 125 template into
/// fields.json, fields.csv and field_type_legend.txt.
#[derive(Debug, Parser)]
#[command(name = "inspect-fields", about, version)]
pub struct InspectCli {
    /// Path to the blank template
    #[arg(long, value_name = "FILE", default_value = TEMPLATE)]
    pub template: PathBuf,

    /// Directory for the generated artifacts
    #[arg(long, value_name = "DIR", default_value = OUT_DIR)]
    pub out_dir: PathBuf,
}

impl InspectCli {
    pub fn options(&self) -> InspectOptions {
        InspectOptions {
            template: self.template.clone(),
            out_dir: self.out_dir.clone(),
        }
    }
}

/// Fill the ACORD 125 template with synthetic applicants and save
/// flattened samples.
#[derive(Debug, Parser)]
#[command(name = "fill-acord125", about, version)]
pub struct FillCli {
    /// Path to the blank template
    #[arg(long, value_name = "FILE", default_value = TEMPLATE)]
    pub template: PathBuf,

    /// Directory for ACORD_125_Sample_<n>.pdf
    #[arg(long, value_name = "DIR", default_value = OUT_DIR)]
    pub out_dir: PathBuf,

    /// Number of samples to generate
    #[arg(long, default_value_t = SAMPLE_COUNT)]
    pub samples: usize,

    /// Seed for reproducible data
    #[arg(long)]
    pub seed: Option<u64>,

    /// Policy effective date (YYYY-MM-DD). Default: today
    #[arg(long, value_name = "DATE")]
    pub effective_date: Option<NaiveDate>,
}

impl FillCli {
    pub fn options(&self) -> FillOptions {
        FillOptions {
            template: self.template.clone(),
            out_dir: self.out_dir.clone(),
            samples: self.samples,
            seed: self.seed,
            effective_date: self.effective_date,
        }
    }
}
