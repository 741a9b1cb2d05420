//! Default filter configuration and model settings
//!
//! The configuration resource is a JSON object keyed by mode name, then by
//! filter-kind name, holding the seed poles and zeros:
//!
//! ```json
//! {
//!   "settings": { "sampling_time": 0.1 },
//!   "DIGITAL": {
//!     "LOWPASS": { "poles": [[0.5, 0.0]], "zeros": null }
//!   }
//! }
//! ```
//!
//! Only one member of each conjugate pair is listed; the conjugate is added
//! when the seed is expanded. Listing a root twice raises its multiplicity.

use super::multiset::{conjugate_batch, ComplexMultiset};
use crate::error::{FilterError, FilterResult};
use num_complex::Complex64;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::num::NonZeroU32;
use std::path::Path;

/// Configuration shipped with the crate
const EMBEDDED_DEFAULTS: &str = include_str!("../../config/default_filters.json");

/// Discretization semantics for response evaluation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum FilterMode {
    /// Sampled system, z-domain, evaluated on the unit circle
    Digital,
    /// Continuous system, s-domain, evaluated on the imaginary axis
    Analog,
}

impl FilterMode {
    /// Key used in the configuration file
    pub fn config_key(&self) -> &'static str {
        match self {
            FilterMode::Digital => "DIGITAL",
            FilterMode::Analog => "ANALOG",
        }
    }

    pub const ALL: [FilterMode; 2] = [FilterMode::Digital, FilterMode::Analog];

    /// Label shown in the mode menu
    pub fn label(&self) -> &'static str {
        match self {
            FilterMode::Digital => "Digital",
            FilterMode::Analog => "Analog",
        }
    }

    /// Parse the label shown in the mode menu
    pub fn from_label(label: &str) -> FilterResult<Self> {
        Self::ALL
            .into_iter()
            .find(|mode| mode.label() == label)
            .ok_or_else(|| FilterError::UnknownLabel(label.to_string()))
    }
}

impl fmt::Display for FilterMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.config_key())
    }
}

/// Provenance of the current pole/zero set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum FilterKind {
    Manual,
    Lowpass,
    Highpass,
    Bandpass,
    Bandstop,
    Allpass,
}

impl FilterKind {
    pub const ALL: [FilterKind; 6] = [
        FilterKind::Manual,
        FilterKind::Lowpass,
        FilterKind::Highpass,
        FilterKind::Bandpass,
        FilterKind::Bandstop,
        FilterKind::Allpass,
    ];

    /// Keys accepted in the configuration file, preferred key first
    pub fn config_keys(&self) -> &'static [&'static str] {
        match self {
            FilterKind::Manual => &["MANUAL"],
            FilterKind::Lowpass => &["LOWPASS", "TP"],
            FilterKind::Highpass => &["HIGHPASS", "HP"],
            FilterKind::Bandpass => &["BANDPASS", "BP"],
            FilterKind::Bandstop => &["BANDSTOP", "BS"],
            FilterKind::Allpass => &["ALLPASS", "AP"],
        }
    }

    /// Label shown in the filter menu
    pub fn label(&self) -> &'static str {
        match self {
            FilterKind::Manual => "Manual",
            FilterKind::Lowpass => "Tief pass",
            FilterKind::Highpass => "Hoch pass",
            FilterKind::Bandpass => "Band pass",
            FilterKind::Bandstop => "Band stop",
            FilterKind::Allpass => "All pass",
        }
    }

    /// Parse the label shown in the filter menu
    pub fn from_label(label: &str) -> FilterResult<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.label() == label)
            .ok_or_else(|| FilterError::UnknownLabel(label.to_string()))
    }
}

impl fmt::Display for FilterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.config_keys()[0])
    }
}

/// Numeric settings for response evaluation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelSettings {
    /// Sampling period in seconds (digital mode time axis)
    pub sampling_time: f64,

    /// Number of points on the digital frequency grid [0, pi)
    pub digital_grid_len: usize,

    /// Number of points on the analog frequency grid
    pub analog_grid_len: usize,

    /// Number of samples in the digital impulse/step response
    pub digital_time_samples: usize,

    /// Number of points in the analog impulse/step response
    pub analog_time_samples: usize,
}

impl Default for ModelSettings {
    fn default() -> Self {
        Self {
            sampling_time: 0.1,
            digital_grid_len: 10000,
            analog_grid_len: 1000,
            digital_time_samples: 30,
            analog_time_samples: 100,
        }
    }
}

impl ModelSettings {
    /// Reject settings that no evaluation can use
    pub fn validate(&self) -> FilterResult<()> {
        if !(self.sampling_time.is_finite() && self.sampling_time > 0.0) {
            return Err(FilterError::InvalidSamplingTime(self.sampling_time));
        }
        for len in [
            self.digital_grid_len,
            self.analog_grid_len,
            self.digital_time_samples,
            self.analog_time_samples,
        ] {
            if len == 0 {
                return Err(FilterError::InvalidGridLength(len));
            }
        }
        Ok(())
    }
}

fn unit_gain() -> f64 {
    1.0
}

/// Seed poles and zeros for one default filter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterSeed {
    /// `[real, imaginary]` pairs, one per conjugate pair
    #[serde(default)]
    pub poles: Option<Vec<Vec<f64>>>,

    #[serde(default)]
    pub zeros: Option<Vec<Vec<f64>>>,

    #[serde(default = "unit_gain")]
    pub gain: f64,
}

impl FilterSeed {
    /// Expand seed poles into a conjugate-complete multiset
    pub fn pole_set(&self) -> FilterResult<ComplexMultiset> {
        expand_seed(self.poles.as_deref())
    }

    /// Expand seed zeros into a conjugate-complete multiset
    pub fn zero_set(&self) -> FilterResult<ComplexMultiset> {
        expand_seed(self.zeros.as_deref())
    }
}

fn expand_seed(entries: Option<&[Vec<f64>]>) -> FilterResult<ComplexMultiset> {
    let mut set = ComplexMultiset::new();
    for entry in entries.unwrap_or_default() {
        let z = complex_from_pair(entry)?;
        set.add(conjugate_batch(z, NonZeroU32::MIN));
    }
    Ok(set)
}

fn complex_from_pair(pair: &[f64]) -> FilterResult<Complex64> {
    match pair {
        [re, im] => Ok(Complex64::new(*re, *im)),
        _ => Err(FilterError::MalformedSeedEntry { len: pair.len() }),
    }
}

/// Default filters keyed by mode, then by filter kind
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DefaultFilterConfig {
    #[serde(default)]
    pub settings: ModelSettings,

    #[serde(flatten)]
    modes: BTreeMap<String, BTreeMap<String, FilterSeed>>,
}

impl DefaultFilterConfig {
    /// Configuration embedded in the crate
    pub fn embedded() -> FilterResult<Self> {
        Self::from_json(EMBEDDED_DEFAULTS)
    }

    /// Parse configuration from a JSON string
    pub fn from_json(json: &str) -> FilterResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.settings.validate()?;
        Ok(config)
    }

    /// Load configuration from a JSON file
    pub fn load(path: impl AsRef<Path>) -> FilterResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        tracing::debug!(path = %path.display(), modes = config.modes.len(), "loaded filter configuration");
        Ok(config)
    }

    /// Look up the seed for a mode/kind combination
    ///
    /// # Errors
    /// [`FilterError::MissingDefault`] if the combination is not configured.
    pub fn seed(&self, mode: FilterMode, kind: FilterKind) -> FilterResult<&FilterSeed> {
        let missing = || FilterError::MissingDefault {
            mode: mode.to_string(),
            kind: kind.to_string(),
        };
        let kinds = self.modes.get(mode.config_key()).ok_or_else(missing)?;
        kind.config_keys()
            .iter()
            .find_map(|key| kinds.get(*key))
            .ok_or_else(missing)
    }

    /// Add or replace a seed
    pub fn insert_seed(&mut self, mode: FilterMode, kind: FilterKind, seed: FilterSeed) {
        self.modes
            .entry(mode.config_key().to_string())
            .or_default()
            .insert(kind.config_keys()[0].to_string(), seed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_config_has_every_kind() {
        let config = DefaultFilterConfig::embedded().unwrap();
        for mode in [FilterMode::Digital, FilterMode::Analog] {
            for kind in FilterKind::ALL {
                assert!(config.seed(mode, kind).is_ok(), "{} / {}", mode, kind);
            }
        }
        assert_eq!(config.settings, ModelSettings::default());
    }

    #[test]
    fn test_seed_expands_conjugates() {
        let json = r#"{ "DIGITAL": { "BANDPASS": { "poles": [[0.0, 0.9]], "zeros": [[1.0, 0.0], [1.0, 0.0]] } } }"#;
        let config = DefaultFilterConfig::from_json(json).unwrap();
        let seed = config.seed(FilterMode::Digital, FilterKind::Bandpass).unwrap();

        let poles = seed.pole_set().unwrap();
        assert_eq!(poles.len(), 2);
        assert_eq!(poles.multiplicity(Complex64::new(0.0, -0.9)), 1);

        let zeros = seed.zero_set().unwrap();
        assert_eq!(zeros.len(), 1);
        assert_eq!(zeros.multiplicity(Complex64::new(1.0, 0.0)), 2);
        assert_eq!(seed.gain, 1.0);
    }

    #[test]
    fn test_legacy_kind_keys() {
        let json = r#"{ "ANALOG": { "TP": { "poles": [[-1.0, 0.0]], "zeros": null, "gain": 2.0 } } }"#;
        let config = DefaultFilterConfig::from_json(json).unwrap();
        let seed = config.seed(FilterMode::Analog, FilterKind::Lowpass).unwrap();

        assert_eq!(seed.gain, 2.0);
        assert!(seed.zero_set().unwrap().is_empty());
    }

    #[test]
    fn test_missing_combination_is_lookup_error() {
        let config = DefaultFilterConfig::from_json(r#"{ "DIGITAL": {} }"#).unwrap();

        assert!(matches!(
            config.seed(FilterMode::Digital, FilterKind::Allpass),
            Err(FilterError::MissingDefault { .. })
        ));
        assert!(matches!(
            config.seed(FilterMode::Analog, FilterKind::Manual),
            Err(FilterError::MissingDefault { .. })
        ));
    }

    #[test]
    fn test_malformed_seed_entry() {
        let json = r#"{ "DIGITAL": { "MANUAL": { "poles": [[0.5]], "zeros": null } } }"#;
        let config = DefaultFilterConfig::from_json(json).unwrap();
        let seed = config.seed(FilterMode::Digital, FilterKind::Manual).unwrap();

        assert!(matches!(
            seed.pole_set(),
            Err(FilterError::MalformedSeedEntry { len: 1 })
        ));
    }

    #[test]
    fn test_settings_override() {
        let json = r#"{ "settings": { "sampling_time": 0.5, "digital_grid_len": 512 } }"#;
        let config = DefaultFilterConfig::from_json(json).unwrap();

        assert_eq!(config.settings.sampling_time, 0.5);
        assert_eq!(config.settings.digital_grid_len, 512);
        assert_eq!(config.settings.analog_grid_len, 1000);
    }

    #[test]
    fn test_invalid_settings_rejected() {
        let json = r#"{ "settings": { "sampling_time": -1.0 } }"#;
        assert!(matches!(
            DefaultFilterConfig::from_json(json),
            Err(FilterError::InvalidSamplingTime(_))
        ));
    }

    #[test]
    fn test_labels() {
        assert_eq!(FilterMode::from_label("Analog").unwrap(), FilterMode::Analog);
        assert_eq!(FilterKind::from_label("Tief pass").unwrap(), FilterKind::Lowpass);
        assert!(FilterKind::from_label("Notch").is_err());
    }
}
