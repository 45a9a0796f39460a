//! acord125: Inspect and fill the ACORD 125 commercial insurance application.
//!
//! This is the public API facade crate. It re-exports the form types from
//! acroform-core and the lopdf backend from acroform-parse, and adds the
//! ACORD 125 specifics on top.
//!
//! # Architecture
//!
//! - **acroform-core**: Backend-independent widget, value and report types
//! - **acroform-parse**: lopdf backend (enumeration, value writing, flattening)
//! - **acord125** (this crate): schema tables, record synthesis, the fill
//!   pipeline and field inspection
//!
//! # Example
//!
//! ```no_run
//! use acord125::{FillOptions, generate_samples};
//!
//! let opts = FillOptions { samples: 2, seed: Some(7), ..FillOptions::default() };
//! generate_samples(&opts, |r| println!("Wrote: {}", r.path.display()))?;
//! # Ok::<(), acord125::FormError>(())
//! ```

pub use acroform_core;
pub use acroform_parse;

pub mod fill;
pub mod inspect;
pub mod options;
pub mod record;
pub mod schema;
pub mod synth;

pub use acroform_core::{
    ApplyReport, BBox, FieldRecord, FlattenReport, FormError, FormWidget, InputValue, SkipReason,
    WidgetKind, legend_lines,
};
pub use acroform_parse::FormDocument;
pub use fill::{SampleReport, fill_document, fill_sample, generate_samples, sample_path};
pub use inspect::{FieldReport, inspect, inspect_template};
pub use options::{FillOptions, InspectOptions};
pub use record::{ApplicationRecord, FillPlan, LineSelection, LossEntry};
pub use schema::LegalEntity;
pub use synth::synthesize;
