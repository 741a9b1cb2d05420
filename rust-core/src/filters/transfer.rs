//! Transfer function synthesis from zero/pole/gain form

use super::polynomial::{poly_from_roots, poly_mul, polyval, real_factor, split_real};
use crate::error::{FilterError, FilterResult};
use crate::model::multiset::is_real;
use crate::model::ComplexMultiset;
use num_complex::Complex64;

/// Rational transfer function `B(x) / A(x)`, coefficients highest power first
#[derive(Debug, Clone, PartialEq)]
pub struct TransferFunction {
    numerator: Vec<f64>,
    denominator: Vec<f64>,
}

impl TransferFunction {
    pub fn new(numerator: Vec<f64>, denominator: Vec<f64>) -> Self {
        Self {
            numerator,
            denominator,
        }
    }

    /// `H = 1 / 1`
    pub fn identity() -> Self {
        Self::new(vec![1.0], vec![1.0])
    }

    pub fn numerator(&self) -> &[f64] {
        &self.numerator
    }

    pub fn denominator(&self) -> &[f64] {
        &self.denominator
    }

    pub fn numerator_degree(&self) -> usize {
        self.numerator.len().saturating_sub(1)
    }

    pub fn denominator_degree(&self) -> usize {
        self.denominator.len().saturating_sub(1)
    }

    /// At least as many poles as zeros
    pub fn is_proper(&self) -> bool {
        self.numerator_degree() <= self.denominator_degree()
    }

    /// Evaluate `B(x) / A(x)` at a complex point
    pub fn evaluate(&self, x: Complex64) -> Complex64 {
        polyval(&self.numerator, x) / polyval(&self.denominator, x)
    }
}

impl Default for TransferFunction {
    fn default() -> Self {
        Self::identity()
    }
}

/// Derive numerator and denominator coefficients from zeros, poles and gain
///
/// # Algorithm
/// 1. Check that both root sets are conjugate symmetric
/// 2. Multiply one real factor per root and multiplicity: `x - r` for a real
///    root, `x^2 - 2 Re(z) x + |z|^2` for a conjugate pair
/// 3. Scale the numerator by `gain`
///
/// The coefficients are real by construction, so rounding cannot make a
/// valid root set fail however high its degree.
///
/// # Errors
/// [`FilterError::NonRealCoefficients`] when a non-real root lacks its
/// conjugate at the same multiplicity. The reported residue is the largest
/// imaginary coefficient the complex expansion would carry.
pub fn synthesize(
    zeros: &ComplexMultiset,
    poles: &ComplexMultiset,
    gain: f64,
) -> FilterResult<TransferFunction> {
    let numerator = real_polynomial(zeros)?
        .into_iter()
        .map(|c| gain * c)
        .collect();
    let denominator = real_polynomial(poles)?;

    Ok(TransferFunction::new(numerator, denominator))
}

fn real_polynomial(roots: &ComplexMultiset) -> FilterResult<Vec<f64>> {
    if !roots.is_conjugate_symmetric() {
        let (_, residue) = split_real(&poly_from_roots(&roots.expand()));
        tracing::error!(residue, roots = roots.len(), "root set is not conjugate symmetric");
        return Err(FilterError::NonRealCoefficients { residue });
    }

    let mut coeffs = vec![1.0];
    for (z, k) in roots.representatives() {
        let factor = real_factor(z, !is_real(z));
        for _ in 0..k.get() {
            coeffs = poly_mul(&coeffs, &factor);
        }
    }
    Ok(coeffs)
}
