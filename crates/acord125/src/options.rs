use std::path::PathBuf;

use chrono::{Local, NaiveDate};
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::schema::{OUT_DIR, SAMPLE_COUNT, TEMPLATE};

/// Options for generating filled samples.
#[derive(Debug, Clone, PartialEq)]
pub struct FillOptions {
    /// Blank ACORD 125 template.
    pub template: PathBuf,
    /// Directory that receives `ACORD_125_Sample_<n>.pdf`.
    pub out_dir: PathBuf,
    /// Number of samples to generate.
    pub samples: usize,
    /// Seed for reproducible data. `None` draws from OS entropy.
    pub seed: Option<u64>,
    /// Policy effective date. `None` means today.
    pub effective_date: Option<NaiveDate>,
}

impl Default for FillOptions {
    fn default() -> Self {
        Self {
            template: PathBuf::from(TEMPLATE),
            out_dir: PathBuf::from(OUT_DIR),
            samples: SAMPLE_COUNT,
            seed: None,
            effective_date: None,
        }
    }
}

impl FillOptions {
    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }

    pub fn effective_date(&self) -> NaiveDate {
        self.effective_date
            .unwrap_or_else(|| Local::now().date_naive())
    }
}

/// Options for the field inspector.
#[derive(Debug, Clone, PartialEq)]
pub struct InspectOptions {
    pub template: PathBuf,
    /// Directory that receives `fields.json`, `fields.csv` and the legend.
    pub out_dir: PathBuf,
}

impl Default for InspectOptions {
    fn default() -> Self {
        Self {
            template: PathBuf::from(TEMPLATE),
            out_dir: PathBuf::from(OUT_DIR),
        }
    }
}
