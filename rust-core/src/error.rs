//! Error types shared by the model, synthesis and response layers

use std::io;
use thiserror::Error;

/// Result type for filter model operations
pub type FilterResult<T> = Result<T, FilterError>;

/// Errors that can occur while building or evaluating a filter model
#[derive(Error, Debug)]
pub enum FilterError {
    /// Configuration file could not be read
    #[error("Failed to read filter configuration: {0}")]
    ConfigIo(#[from] io::Error),

    /// Configuration file is not valid JSON for the expected layout
    #[error("Failed to parse filter configuration: {0}")]
    ConfigParse(#[from] serde_json::Error),

    /// No default filter is configured for this mode/kind combination
    #[error("No default filter configured for {mode} / {kind}")]
    MissingDefault { mode: String, kind: String },

    /// A seed root was not a `[real, imaginary]` pair
    #[error("Seed root must be a [real, imaginary] pair, got {len} values")]
    MalformedSeedEntry { len: usize },

    /// A UI label did not match any known mode or filter kind
    #[error("Unknown label: {0}")]
    UnknownLabel(String),

    /// Synthesized coefficients carry an imaginary part, so some complex
    /// root is missing its conjugate partner
    #[error("Transfer function coefficients are not real (imaginary residue {residue:e})")]
    NonRealCoefficients { residue: f64 },

    /// More zeros than poles; no causal realization exists
    #[error("Improper transfer function: numerator degree {numerator_degree} exceeds denominator degree {denominator_degree}")]
    ImproperTransferFunction {
        numerator_degree: usize,
        denominator_degree: usize,
    },

    /// Sampling time must be finite and positive
    #[error("Invalid sampling time: {0}")]
    InvalidSamplingTime(f64),

    /// Frequency or time grids need at least one point
    #[error("Invalid grid length: {0}")]
    InvalidGridLength(usize),

    /// FFT backend failure
    #[error("FFT evaluation failed: {0}")]
    Fft(String),
}
