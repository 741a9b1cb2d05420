//! Impulse and step responses
//!
//! Digital systems run the direct-form difference equation. Analog systems
//! use the controllable canonical state space with exact zero-order-hold
//! stepping, on a time span derived from the slowest pole.

use super::state_space::{normalized_padded, StateSpace};
use crate::error::{FilterError, FilterResult};
use crate::filters::TransferFunction;
use crate::model::config::{FilterMode, ModelSettings};
use num_complex::Complex64;

/// Test input applied to the system
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseKind {
    Impulse,
    Step,
}

/// Sampled time-domain response
#[derive(Debug, Clone, PartialEq)]
pub struct TimeResponse {
    pub kind: ResponseKind,

    /// Sample times in seconds
    pub time: Vec<f64>,

    /// Output amplitude at each sample time
    pub values: Vec<f64>,
}

/// Compute the impulse or step response for the given mode
pub fn time_response(
    tf: &TransferFunction,
    mode: FilterMode,
    poles: &[Complex64],
    kind: ResponseKind,
    settings: &ModelSettings,
) -> FilterResult<TimeResponse> {
    match mode {
        FilterMode::Digital => digital_time_response(
            tf,
            kind,
            settings.digital_time_samples,
            settings.sampling_time,
        ),
        FilterMode::Analog => {
            analog_time_response(tf, poles, kind, settings.analog_time_samples)
        }
    }
}

/// Discrete response over `n` samples spaced `sampling_time` apart
///
/// # Algorithm
/// With `H(z) = B(z) / A(z)` proper and the numerator padded to the
/// denominator length (both read as polynomials in `z^-1`):
/// ```text
/// y[k] = sum_i b[i] x[k - i] - sum_{i >= 1} a[i] y[k - i]
/// ```
pub fn digital_time_response(
    tf: &TransferFunction,
    kind: ResponseKind,
    n: usize,
    sampling_time: f64,
) -> FilterResult<TimeResponse> {
    check_proper(tf)?;
    if n == 0 {
        return Err(FilterError::InvalidGridLength(n));
    }
    if !(sampling_time.is_finite() && sampling_time > 0.0) {
        return Err(FilterError::InvalidSamplingTime(sampling_time));
    }

    let (b, a) = normalized_padded(tf);
    let input = |k: usize| match kind {
        ResponseKind::Impulse => {
            if k == 0 {
                1.0
            } else {
                0.0
            }
        }
        ResponseKind::Step => 1.0,
    };

    let mut values = Vec::with_capacity(n);
    for k in 0..n {
        let mut y = 0.0;
        for (i, &b_i) in b.iter().enumerate().take(k + 1) {
            y += b_i * input(k - i);
        }
        for (i, &a_i) in a.iter().enumerate().skip(1).take(k) {
            y -= a_i * values[k - i];
        }
        values.push(y);
    }

    let time = (0..n).map(|k| k as f64 * sampling_time).collect();
    Ok(TimeResponse { kind, time, values })
}

/// Continuous response on `n` points spanning `0 .. 7 / r` seconds
///
/// `r` is the smallest `|Re(pole)|` after replacing zeros by 1, or 1 when
/// there are no poles. The impulse response is `C e^{At} B`; a direct feedthrough
/// impulse is not represented.
pub fn analog_time_response(
    tf: &TransferFunction,
    poles: &[Complex64],
    kind: ResponseKind,
    n: usize,
) -> FilterResult<TimeResponse> {
    if n == 0 {
        return Err(FilterError::InvalidGridLength(n));
    }
    let ss = StateSpace::from_transfer_function(tf)?;

    // Marginal poles count as rate 1 before taking the minimum
    let slowest = poles
        .iter()
        .map(|p| p.re.abs())
        .map(|r| if r == 0.0 { 1.0 } else { r })
        .fold(f64::INFINITY, f64::min);
    let rate = if slowest.is_finite() { slowest } else { 1.0 };
    let t_end = 7.0 / rate;
    let dt = if n > 1 { t_end / (n - 1) as f64 } else { 0.0 };
    let time: Vec<f64> = (0..n).map(|k| k as f64 * dt).collect();

    let (ad, bd) = ss.discretize(dt);
    let mut values = Vec::with_capacity(n);
    match kind {
        ResponseKind::Impulse => {
            let mut x = ss.b.clone();
            for _ in 0..n {
                values.push(ss.c.dot(&x));
                x = ad.dot(&x);
            }
        }
        ResponseKind::Step => {
            let mut x = ndarray::Array1::<f64>::zeros(ss.order());
            for _ in 0..n {
                values.push(ss.c.dot(&x) + ss.d);
                x = ad.dot(&x) + &bd;
            }
        }
    }

    Ok(TimeResponse { kind, time, values })
}

fn check_proper(tf: &TransferFunction) -> FilterResult<()> {
    if tf.is_proper() {
        Ok(())
    } else {
        Err(FilterError::ImproperTransferFunction {
            numerator_degree: tf.numerator_degree(),
            denominator_degree: tf.denominator_degree(),
        })
    }
}
