//! acroform-core: Backend-independent data types for AcroForm tooling.
//!
//! This crate provides the foundational types ([`BBox`], [`FormWidget`],
//! [`FieldRecord`], [`InputValue`], [`FieldValue`]) and the best-effort
//! outcome reports used by the lopdf backend and the ACORD 125 tools.

pub mod error;
pub mod form_field;
pub mod geometry;
pub mod report;
pub mod value;

pub use error::FormError;
pub use form_field::{
    FF_COMBO, FF_PUSHBUTTON, FF_RADIO, FieldRecord, FieldType, FormWidget, WidgetKind,
    legend_lines,
};
pub use geometry::BBox;
pub use report::{ApplyReport, FieldUpdate, FlattenReport, SkipReason, WidgetOutcome};
pub use value::{FieldValue, InputValue, TRUTHY_TOKENS, is_truthy};
