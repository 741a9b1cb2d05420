//! Frequency response of a rational transfer function
//!
//! Digital systems are evaluated on the unit circle, `z = e^{jw}` for
//! `w` in [0, pi). Analog systems are evaluated on the imaginary axis,
//! `s = jw`, over a log-spaced grid placed around the pole/zero locations.

use super::fft::FftEngine;
use crate::error::{FilterError, FilterResult};
use crate::filters::TransferFunction;
use crate::model::config::{FilterMode, ModelSettings};
use num_complex::Complex64;
use std::f64::consts::PI;

/// Sampled complex frequency response
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrequencyResponse {
    /// Angular frequencies (rad/sample for digital, rad/s for analog)
    frequencies: Vec<f64>,

    /// H evaluated at each frequency, same length and order
    response: Vec<Complex64>,
}

impl FrequencyResponse {
    pub fn new(frequencies: Vec<f64>, response: Vec<Complex64>) -> Self {
        debug_assert_eq!(frequencies.len(), response.len());
        Self {
            frequencies,
            response,
        }
    }

    pub fn frequencies(&self) -> &[f64] {
        &self.frequencies
    }

    pub fn response(&self) -> &[Complex64] {
        &self.response
    }

    pub fn len(&self) -> usize {
        self.frequencies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frequencies.is_empty()
    }
}

/// Evaluate the frequency response for the given mode
///
/// # Arguments
/// * `tf` - Transfer function (coefficients highest power first)
/// * `mode` - Digital (unit circle) or analog (imaginary axis)
/// * `zeros`, `poles` - Expanded roots of `tf`, used to place the analog grid
/// * `settings` - Grid lengths
pub fn evaluate(
    tf: &TransferFunction,
    mode: FilterMode,
    zeros: &[Complex64],
    poles: &[Complex64],
    settings: &ModelSettings,
) -> FilterResult<FrequencyResponse> {
    match mode {
        FilterMode::Digital => digital_response(tf, settings.digital_grid_len),
        FilterMode::Analog => {
            let frequencies = analog_frequency_grid(zeros, poles, settings.analog_grid_len)?;
            Ok(analog_response(tf, frequencies))
        }
    }
}

/// Evaluate `H(e^{jw})` at `w = pi * k / n`, k = 0..n
///
/// # Algorithm
/// With `2n`-point real FFTs of the zero-padded coefficient sequences,
/// `FFT(b)[k] = sum_m b[m] e^{-jwm} = e^{-jwM} B(e^{jw})` for a degree-M
/// numerator, and likewise for the denominator. The ratio therefore needs
/// the correction `e^{jw(M - N)}`. Coefficient sequences longer than the
/// FFT fall back to Horner evaluation.
pub fn digital_response(tf: &TransferFunction, n: usize) -> FilterResult<FrequencyResponse> {
    if n == 0 {
        return Err(FilterError::InvalidGridLength(n));
    }

    let frequencies: Vec<f64> = (0..n).map(|k| PI * k as f64 / n as f64).collect();

    let mut engine = FftEngine::new(2 * n);
    let response = if engine.fits(tf.numerator().len()) && engine.fits(tf.denominator().len()) {
        let b = engine.spectrum(tf.numerator())?[..n].to_vec();
        let a = engine.spectrum(tf.denominator())?[..n].to_vec();
        let shift = tf.numerator_degree() as f64 - tf.denominator_degree() as f64;

        frequencies
            .iter()
            .zip(b.iter().zip(a.iter()))
            .map(|(&omega, (&b_k, &a_k))| Complex64::from_polar(1.0, omega * shift) * b_k / a_k)
            .collect()
    } else {
        frequencies
            .iter()
            .map(|&omega| tf.evaluate(Complex64::from_polar(1.0, omega)))
            .collect()
    };

    Ok(FrequencyResponse::new(frequencies, response))
}

/// Evaluate `H(jw)` at the given angular frequencies
pub fn analog_response(tf: &TransferFunction, frequencies: Vec<f64>) -> FrequencyResponse {
    let response = frequencies
        .iter()
        .map(|&omega| tf.evaluate(Complex64::new(0.0, omega)))
        .collect();

    FrequencyResponse::new(frequencies, response)
}

/// Choose a log-spaced analog grid around the pole/zero locations
///
/// # Algorithm
/// Roots considered: poles (a lone pole at -1000 if there are none) and
/// zeros with `|z| < 1e5`, upper half-plane members only. With `d = 1` for
/// roots at the origin (else 0):
///
/// ```text
/// hi = round(log10(max(3|re + d| + 1.5 im)) + 0.5)
/// lo = round(log10(0.1 * min(|re + d| + 2 im)) - 0.5)
/// w  = logspace(lo, hi, n)
/// ```
///
/// so the grid runs at least a decade beyond the extreme root magnitudes.
pub fn analog_frequency_grid(
    zeros: &[Complex64],
    poles: &[Complex64],
    n: usize,
) -> FilterResult<Vec<f64>> {
    if n == 0 {
        return Err(FilterError::InvalidGridLength(n));
    }

    let fallback_pole = [Complex64::new(-1000.0, 0.0)];
    let poles = if poles.is_empty() { &fallback_pole[..] } else { poles };

    let mut roots: Vec<Complex64> = poles
        .iter()
        .copied()
        .filter(|p| p.im >= 0.0)
        .chain(zeros.iter().copied().filter(|z| z.norm() < 1e5 && z.im >= 0.0))
        .collect();
    if roots.is_empty() {
        roots.extend_from_slice(&fallback_pole);
    }

    let shifted_re = |z: &Complex64| {
        let d = if z.norm() < 1e-10 { 1.0 } else { 0.0 };
        (z.re + d).abs()
    };

    let upper = roots
        .iter()
        .map(|z| 3.0 * shifted_re(z) + 1.5 * z.im)
        .fold(f64::NEG_INFINITY, f64::max);
    let lower = roots
        .iter()
        .map(|z| shifted_re(z) + 2.0 * z.im)
        .fold(f64::INFINITY, f64::min);

    let hi = (upper.log10() + 0.5).round_ties_even();
    let lo = ((0.1 * lower).log10() - 0.5).round_ties_even();
    let (lo, hi) = if lo.is_finite() && hi.is_finite() && lo < hi {
        (lo, hi)
    } else {
        tracing::warn!(lo, hi, "degenerate analog grid bounds, using 0.1..10 rad/s");
        (-1.0, 1.0)
    };

    Ok(logspace(lo, hi, n))
}

/// `n` points spaced evenly on a log scale from `10^lo` to `10^hi` (inclusive)
pub fn logspace(lo: f64, hi: f64, n: usize) -> Vec<f64> {
    if n == 1 {
        return vec![10f64.powf(lo)];
    }
    let step = (hi - lo) / (n - 1) as f64;
    (0..n).map(|i| 10f64.powf(lo + step * i as f64)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lowpass() -> TransferFunction {
        TransferFunction::new(vec![1.0], vec![1.0, -0.5])
    }

    #[test]
    fn test_digital_grid_layout() {
        let resp = digital_response(&lowpass(), 8).unwrap();

        assert_eq!(resp.len(), 8);
        assert_eq!(resp.frequencies()[0], 0.0);
        assert!((resp.frequencies()[4] - PI / 2.0).abs() < 1e-12);
        assert!(*resp.frequencies().last().unwrap() < PI);
    }

    #[test]
    fn test_digital_matches_direct_evaluation() {
        // Improper in z on purpose: numerator degree 2, denominator degree 1
        let tf = TransferFunction::new(vec![1.0, 0.3, -0.2], vec![1.0, -0.5]);
        let resp = digital_response(&tf, 64).unwrap();

        for (&omega, &h) in resp.frequencies().iter().zip(resp.response()) {
            let expected = tf.evaluate(Complex64::from_polar(1.0, omega));
            assert!((h - expected).norm() < 1e-10, "w = {}", omega);
        }
    }

    #[test]
    fn test_digital_horner_fallback() {
        // 5 coefficients do not fit a 2*2-point FFT
        let tf = TransferFunction::new(vec![1.0, 0.0, 0.0, 0.0, 0.5], vec![1.0]);
        let resp = digital_response(&tf, 2).unwrap();

        let expected = tf.evaluate(Complex64::from_polar(1.0, PI / 2.0));
        assert!((resp.response()[1] - expected).norm() < 1e-12);
    }

    #[test]
    fn test_digital_dc_gain() {
        // 1 / (1 - 0.5) = 2 at w = 0, 1 / 1.5 at w -> pi
        let resp = digital_response(&lowpass(), 1000).unwrap();
        assert!((resp.response()[0].norm() - 2.0).abs() < 1e-12);
        assert!((resp.response()[999].norm() - 1.0 / 1.5).abs() < 1e-4);
    }

    #[test]
    fn test_zero_length_grid_rejected() {
        assert!(matches!(
            digital_response(&lowpass(), 0),
            Err(FilterError::InvalidGridLength(0))
        ));
        assert!(analog_frequency_grid(&[], &[], 0).is_err());
    }

    #[test]
    fn test_analog_grid_brackets_roots() {
        // Pole at -1: hi = round(log10(3) + 0.5) = 1, lo = round(log10(0.1) - 0.5) = -2
        let grid = analog_frequency_grid(&[], &[Complex64::new(-1.0, 0.0)], 1000).unwrap();

        assert_eq!(grid.len(), 1000);
        assert!((grid[0] - 0.01).abs() < 1e-12);
        assert!((grid[999] - 10.0).abs() < 1e-9);
        assert!(grid.windows(2).all(|w| w[1] > w[0]));
    }

    #[test]
    fn test_analog_grid_without_poles() {
        // Falls back to a pole at -1000: hi = round(log10(3000) + 0.5) = 4, lo = round(2 - 0.5) = 2
        let grid = analog_frequency_grid(&[], &[], 3).unwrap();
        assert!((grid[0] - 100.0).abs() < 1e-9);
        assert!((grid[2] - 10000.0).abs() < 1e-6);
    }

    #[test]
    fn test_analog_grid_origin_root() {
        // Zero at the origin counts as |0 + 1| = 1
        let grid = analog_frequency_grid(
            &[Complex64::new(0.0, 0.0)],
            &[Complex64::new(-1.0, 0.0)],
            10,
        )
        .unwrap();
        assert!((grid[0] - 0.01).abs() < 1e-12);
        assert!((grid[9] - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_analog_first_order_lowpass() {
        // H(s) = 1 / (s + 1): |H(j1)| = 1/sqrt(2)
        let tf = TransferFunction::new(vec![1.0], vec![1.0, 1.0]);
        let resp = analog_response(&tf, vec![0.0, 1.0]);

        assert!((resp.response()[0] - Complex64::new(1.0, 0.0)).norm() < 1e-12);
        assert!((resp.response()[1].norm() - 0.5f64.sqrt()).abs() < 1e-12);
        assert!((resp.response()[1].arg() + PI / 4.0).abs() < 1e-12);
    }

    #[test]
    fn test_logspace_single_point() {
        assert_eq!(logspace(2.0, 5.0, 1), vec![100.0]);
    }
}
