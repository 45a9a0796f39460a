//! acroform-parse: lopdf backend for AcroForm widgets.
//!
//! Opens a PDF with [lopdf](https://crates.io/crates/lopdf), enumerates the
//! widget annotations page by page, writes text and checkbox values into
//! them (regenerating appearances), flattens them into page content and
//! saves with garbage collection. It depends on acroform-core for shared
//! data types.

pub mod appearance;
pub mod error;
pub mod flatten;
pub mod lopdf_backend;
pub mod pdf_string;
pub mod writer;

pub use acroform_core;
pub use error::BackendError;
pub use lopdf_backend::{FormDocument, LopdfWidget};
