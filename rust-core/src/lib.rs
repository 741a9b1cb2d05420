//! Pole-Zero Workbench - filter model core
//!
//! Builds a rational transfer function from user-edited poles and zeros,
//! evaluates its frequency and time responses, and reconciles the GUI's
//! row-based edits with the stored root sets. Python bindings are compiled
//! with the `python` feature.

// Suppress PyO3 non-local impl warnings (harmless macro-generated code)
#![cfg_attr(feature = "python", allow(non_local_definitions))]

pub mod editing;
pub mod error;
pub mod filters;
pub mod logging;
pub mod model;
pub mod session;
pub mod spectrum;

#[cfg(feature = "python")]
pub mod python_bindings;

pub use error::{FilterError, FilterResult};
pub use filters::TransferFunction;
pub use model::{ComplexMultiset, DefaultFilterConfig, FilterKind, FilterMode, FilterModel};
pub use session::{EditSummary, FilterSession};
pub use spectrum::{FrequencyResponse, ResponseKind, TimeResponse};
