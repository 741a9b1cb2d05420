//! Pole-zero filter model with derived transfer function and response
//!
//! Mutations only touch the pole/zero sets. The derived coefficients and
//! response stay as they were until the caller runs
//! [`FilterModel::recompute_coefficients`] and
//! [`FilterModel::recompute_response`], normally once per batch of edits.

use super::config::{DefaultFilterConfig, FilterKind, FilterMode, ModelSettings};
use super::multiset::ComplexMultiset;
use super::pole_zero_map::PoleZeroMap;
use crate::editing::{apply_outcome, EditOutcome};
use crate::error::{FilterError, FilterResult};
use crate::filters::{synthesize, TransferFunction};
use crate::spectrum::{evaluate, time_response, FrequencyResponse, ResponseKind, TimeResponse};
use num_complex::Complex64;
use std::num::NonZeroU32;

/// Which root set an operation applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RootTarget {
    Poles,
    Zeros,
}

#[derive(Debug, Clone)]
pub struct FilterModel {
    mode: FilterMode,
    kind: FilterKind,
    poles: ComplexMultiset,
    zeros: ComplexMultiset,

    /// Overall gain applied to the numerator
    gain: f64,

    settings: ModelSettings,

    // Derived, only written by the recompute operations
    transfer: TransferFunction,
    response: FrequencyResponse,

    /// A mutation happened since the last coefficient recompute
    stale: bool,
}

impl FilterModel {
    /// Empty manual model (no poles, no zeros, unit gain)
    ///
    /// Derived fields hold `H = 1` and an empty response until recomputed.
    pub fn new(mode: FilterMode, settings: ModelSettings) -> Self {
        Self {
            mode,
            kind: FilterKind::Manual,
            poles: ComplexMultiset::new(),
            zeros: ComplexMultiset::new(),
            gain: 1.0,
            settings,
            transfer: TransferFunction::identity(),
            response: FrequencyResponse::default(),
            stale: true,
        }
    }

    /// Build a model from a configured default filter and compute its responses
    pub fn from_default(
        config: &DefaultFilterConfig,
        mode: FilterMode,
        kind: FilterKind,
    ) -> FilterResult<Self> {
        let mut model = Self::new(mode, config.settings.clone());
        model.init_default(config, mode, kind)?;
        Ok(model)
    }

    /// Replace the pole/zero sets with a configured default and recompute
    ///
    /// # Errors
    /// [`FilterError::MissingDefault`] for a combination the configuration
    /// does not list; the model is left untouched in that case.
    pub fn init_default(
        &mut self,
        config: &DefaultFilterConfig,
        mode: FilterMode,
        kind: FilterKind,
    ) -> FilterResult<()> {
        let seed = config.seed(mode, kind)?;
        let poles = seed.pole_set()?;
        let zeros = seed.zero_set()?;

        self.mode = mode;
        self.kind = kind;
        self.poles = poles;
        self.zeros = zeros;
        self.gain = seed.gain;
        self.settings = config.settings.clone();
        self.stale = true;

        tracing::info!(
            %mode,
            %kind,
            poles = self.poles.total_multiplicity(),
            zeros = self.zeros.total_multiplicity(),
            "initialized default filter"
        );

        self.recompute_coefficients()?;
        self.recompute_response()
    }

    pub fn add_poles<I>(&mut self, entries: I)
    where
        I: IntoIterator<Item = (Complex64, NonZeroU32)>,
    {
        self.add_roots(RootTarget::Poles, entries);
    }

    pub fn remove_poles<I>(&mut self, keys: I)
    where
        I: IntoIterator<Item = Complex64>,
    {
        self.remove_roots(RootTarget::Poles, keys);
    }

    pub fn add_zeros<I>(&mut self, entries: I)
    where
        I: IntoIterator<Item = (Complex64, NonZeroU32)>,
    {
        self.add_roots(RootTarget::Zeros, entries);
    }

    pub fn remove_zeros<I>(&mut self, keys: I)
    where
        I: IntoIterator<Item = Complex64>,
    {
        self.remove_roots(RootTarget::Zeros, keys);
    }

    /// Merge entries into the pole or zero set (callers pass conjugate-complete batches)
    pub fn add_roots<I>(&mut self, target: RootTarget, entries: I)
    where
        I: IntoIterator<Item = (Complex64, NonZeroU32)>,
    {
        self.roots_mut(target).add(entries);
        self.stale = true;
    }

    /// Delete entries from the pole or zero set
    pub fn remove_roots<I>(&mut self, target: RootTarget, keys: I)
    where
        I: IntoIterator<Item = Complex64>,
    {
        self.roots_mut(target).remove(keys);
        self.stale = true;
    }

    /// Apply a reconciled edit: deletion keys first, then additions
    pub fn apply_edit(&mut self, target: RootTarget, outcome: &EditOutcome) {
        if outcome.is_ignore() {
            return;
        }
        apply_outcome(self.roots_mut(target), outcome);
        self.stale = true;
    }

    fn roots_mut(&mut self, target: RootTarget) -> &mut ComplexMultiset {
        match target {
            RootTarget::Poles => &mut self.poles,
            RootTarget::Zeros => &mut self.zeros,
        }
    }

    /// Synthesize numerator/denominator coefficients from the current roots
    ///
    /// # Errors
    /// [`FilterError::NonRealCoefficients`] if a complex root lacks its
    /// conjugate; the previous coefficients are kept in that case.
    pub fn recompute_coefficients(&mut self) -> FilterResult<()> {
        self.transfer = synthesize(&self.zeros, &self.poles, self.gain)?;
        self.stale = false;

        tracing::debug!(
            numerator_degree = self.transfer.numerator_degree(),
            denominator_degree = self.transfer.denominator_degree(),
            "recomputed transfer function"
        );
        Ok(())
    }

    /// Evaluate the frequency response of the current coefficients
    pub fn recompute_response(&mut self) -> FilterResult<()> {
        if self.stale {
            tracing::debug!("evaluating response of stale coefficients");
        }
        self.response = evaluate(
            &self.transfer,
            self.mode,
            &self.zeros.expand(),
            &self.poles.expand(),
            &self.settings,
        )?;

        tracing::debug!(mode = %self.mode, points = self.response.len(), "recomputed frequency response");
        Ok(())
    }

    /// Impulse or step response of the current coefficients
    pub fn time_response(&self, kind: ResponseKind) -> FilterResult<TimeResponse> {
        time_response(
            &self.transfer,
            self.mode,
            &self.poles.expand(),
            kind,
            &self.settings,
        )
    }

    /// Marker data for the pole-zero plot
    pub fn pole_zero_map(&self) -> PoleZeroMap {
        PoleZeroMap::new(self.mode, &self.poles, &self.zeros)
    }

    pub fn mode(&self) -> FilterMode {
        self.mode
    }

    pub fn kind(&self) -> FilterKind {
        self.kind
    }

    pub fn poles(&self) -> &ComplexMultiset {
        &self.poles
    }

    pub fn zeros(&self) -> &ComplexMultiset {
        &self.zeros
    }

    pub fn roots(&self, target: RootTarget) -> &ComplexMultiset {
        match target {
            RootTarget::Poles => &self.poles,
            RootTarget::Zeros => &self.zeros,
        }
    }

    pub fn gain(&self) -> f64 {
        self.gain
    }

    /// Change the overall gain (takes effect on the next coefficient recompute)
    pub fn set_gain(&mut self, gain: f64) {
        self.gain = gain;
        self.stale = true;
    }

    pub fn settings(&self) -> &ModelSettings {
        &self.settings
    }

    pub fn sampling_time(&self) -> f64 {
        self.settings.sampling_time
    }

    /// Set the sampling period used for the digital time axis
    pub fn set_sampling_time(&mut self, sampling_time: f64) -> FilterResult<()> {
        if !(sampling_time.is_finite() && sampling_time > 0.0) {
            return Err(FilterError::InvalidSamplingTime(sampling_time));
        }
        self.settings.sampling_time = sampling_time;
        Ok(())
    }

    pub fn transfer_function(&self) -> &TransferFunction {
        &self.transfer
    }

    /// Numerator coefficients, highest power first
    pub fn numerator(&self) -> &[f64] {
        self.transfer.numerator()
    }

    /// Denominator coefficients, highest power first
    pub fn denominator(&self) -> &[f64] {
        self.transfer.denominator()
    }

    pub fn response(&self) -> &FrequencyResponse {
        &self.response
    }

    pub fn frequencies(&self) -> &[f64] {
        self.response.frequencies()
    }

    pub fn complex_response(&self) -> &[Complex64] {
        self.response.response()
    }

    /// Roots changed since the last coefficient recompute
    pub fn is_stale(&self) -> bool {
        self.stale
    }
}
