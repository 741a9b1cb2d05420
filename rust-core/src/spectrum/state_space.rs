//! Continuous state-space realization and zero-order-hold discretization

use crate::error::{FilterError, FilterResult};
use crate::filters::TransferFunction;
use ndarray::{s, Array1, Array2};

/// Taylor terms used by [`expm`] after scaling
const TAYLOR_TERMS: usize = 18;

/// Single-input single-output state space `x' = Ax + Bu`, `y = Cx + Du`
#[derive(Debug, Clone)]
pub struct StateSpace {
    pub a: Array2<f64>,
    pub b: Array1<f64>,
    pub c: Array1<f64>,
    pub d: f64,
}

impl StateSpace {
    /// Controllable canonical realization of a proper transfer function
    ///
    /// # Algorithm
    /// Normalize so the denominator is monic, pad the numerator to the
    /// denominator's length, then
    /// ```text
    /// A = [ -a1 -a2 ... -an ]      B = e1
    ///     [  1   0  ...  0  ]      D = b0
    ///     [      ...        ]      C = b[1..] - D * a[1..]
    ///     [  0  ...  1   0  ]
    /// ```
    ///
    /// # Errors
    /// [`FilterError::ImproperTransferFunction`] when the numerator degree
    /// exceeds the denominator degree.
    pub fn from_transfer_function(tf: &TransferFunction) -> FilterResult<Self> {
        if !tf.is_proper() {
            return Err(FilterError::ImproperTransferFunction {
                numerator_degree: tf.numerator_degree(),
                denominator_degree: tf.denominator_degree(),
            });
        }

        let (num, den) = normalized_padded(tf);
        let order = den.len() - 1;

        let d = num[0];
        let mut a = Array2::<f64>::zeros((order, order));
        let mut c = Array1::<f64>::zeros(order);
        for i in 0..order {
            a[[0, i]] = -den[i + 1];
            c[i] = num[i + 1] - d * den[i + 1];
            if i > 0 {
                a[[i, i - 1]] = 1.0;
            }
        }
        let mut b = Array1::<f64>::zeros(order);
        if order > 0 {
            b[0] = 1.0;
        }

        Ok(Self { a, b, c, d })
    }

    /// Number of states
    pub fn order(&self) -> usize {
        self.b.len()
    }

    /// Exact zero-order-hold discretization for step `dt`
    ///
    /// Returns `(Ad, Bd)` with `Ad = e^{A dt}` and `Bd = (integral_0^dt e^{A t} dt) B`,
    /// both read off `expm([[A, B], [0, 0]] * dt)`.
    pub fn discretize(&self, dt: f64) -> (Array2<f64>, Array1<f64>) {
        let n = self.order();
        let mut block = Array2::<f64>::zeros((n + 1, n + 1));
        block.slice_mut(s![..n, ..n]).assign(&(&self.a * dt));
        block.slice_mut(s![..n, n]).assign(&(&self.b * dt));

        let exp = expm(&block);
        (exp.slice(s![..n, ..n]).to_owned(), exp.slice(s![..n, n]).to_owned())
    }
}

/// Pad the numerator to the denominator length and make the denominator monic
pub(crate) fn normalized_padded(tf: &TransferFunction) -> (Vec<f64>, Vec<f64>) {
    let den = tf.denominator();
    let lead = den[0];
    let mut num = vec![0.0; den.len().saturating_sub(tf.numerator().len())];
    num.extend(tf.numerator().iter().map(|c| c / lead));
    (num, den.iter().map(|c| c / lead).collect())
}

/// Matrix exponential by scaling and squaring with a truncated Taylor series
pub fn expm(m: &Array2<f64>) -> Array2<f64> {
    let n = m.nrows();
    let norm = m
        .rows()
        .into_iter()
        .map(|row| row.iter().map(|x| x.abs()).sum::<f64>())
        .fold(0.0, f64::max);

    // Scale so the series converges quickly, then square back up
    let squarings = if norm > 0.5 {
        (norm / 0.5).log2().ceil() as i32
    } else {
        0
    };
    let scaled = m / 2f64.powi(squarings);

    let mut result = Array2::<f64>::eye(n);
    let mut term = Array2::<f64>::eye(n);
    for k in 1..=TAYLOR_TERMS {
        term = term.dot(&scaled) / k as f64;
        result = result + &term;
    }
    for _ in 0..squarings {
        result = result.dot(&result);
    }
    result
}
