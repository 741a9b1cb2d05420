//! Pole-zero model: root multisets, configured defaults and the filter state

pub mod config;
pub mod filter_model;
pub mod multiset;
pub mod pole_zero_map;

pub use config::{DefaultFilterConfig, FilterKind, FilterMode, FilterSeed, ModelSettings};
pub use filter_model::{FilterModel, RootTarget};
pub use multiset::ComplexMultiset;
pub use pole_zero_map::{MarkerKind, PoleZeroMap, RootMarker};
