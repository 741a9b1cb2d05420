//! Polynomial helpers (coefficients ordered highest power first)

use num_complex::Complex64;

/// Build the monic polynomial whose zeros are `roots`
///
/// Returns `len(roots) + 1` complex coefficients, highest power first.
/// An empty root list gives the constant polynomial `[1]`.
pub fn poly_from_roots(roots: &[Complex64]) -> Vec<Complex64> {
    let mut coeffs = Vec::with_capacity(roots.len() + 1);
    coeffs.push(Complex64::new(1.0, 0.0));

    // Multiply by (x - r) for each root
    for &r in roots {
        coeffs.push(Complex64::new(0.0, 0.0));
        for i in (1..coeffs.len()).rev() {
            let prev = coeffs[i - 1];
            coeffs[i] -= r * prev;
        }
    }

    coeffs
}

/// Split complex coefficients into real parts and the largest imaginary part
pub fn split_real(coeffs: &[Complex64]) -> (Vec<f64>, f64) {
    let residue = coeffs.iter().map(|c| c.im.abs()).fold(0.0, f64::max);
    (coeffs.iter().map(|c| c.re).collect(), residue)
}

/// Evaluate a real polynomial at a complex point (Horner's scheme)
#[inline]
pub fn polyval(coeffs: &[f64], x: Complex64) -> Complex64 {
    coeffs
        .iter()
        .fold(Complex64::new(0.0, 0.0), |acc, &c| acc * x + c)
}

/// Multiply two real polynomials
pub fn poly_mul(a: &[f64], b: &[f64]) -> Vec<f64> {
    if a.is_empty() || b.is_empty() {
        return Vec::new();
    }
    let mut out = vec![0.0; a.len() + b.len() - 1];
    for (i, &x) in a.iter().enumerate() {
        for (j, &y) in b.iter().enumerate() {
            out[i + j] += x * y;
        }
    }
    out
}

/// Real factor of a root: `x - r` for a real root, `x^2 - 2 Re(z) x + |z|^2`
/// for the pair `{z, conj(z)}`
pub fn real_factor(z: Complex64, paired: bool) -> Vec<f64> {
    if paired {
        vec![1.0, -2.0 * z.re, z.norm_sqr()]
    } else {
        vec![1.0, -z.re]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_poly_from_no_roots() {
        let p = poly_from_roots(&[]);
        assert_eq!(p, vec![Complex64::new(1.0, 0.0)]);
    }

    #[test]
    fn test_poly_from_real_roots() {
        // (x - 1)(x - 2) = x^2 - 3x + 2
        let p = poly_from_roots(&[Complex64::new(1.0, 0.0), Complex64::new(2.0, 0.0)]);
        let (re, residue) = split_real(&p);

        assert_eq!(residue, 0.0);
        assert!((re[0] - 1.0).abs() < 1e-12);
        assert!((re[1] + 3.0).abs() < 1e-12);
        assert!((re[2] - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_poly_from_conjugate_pair_is_real() {
        // (x - (1+2j))(x - (1-2j)) = x^2 - 2x + 5
        let p = poly_from_roots(&[Complex64::new(1.0, 2.0), Complex64::new(1.0, -2.0)]);
        let (re, residue) = split_real(&p);

        assert!(residue < 1e-12);
        assert!((re[1] + 2.0).abs() < 1e-12);
        assert!((re[2] - 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_real_factors_match_complex_expansion() {
        let z = Complex64::new(0.3, 0.9);
        let pair = poly_mul(&real_factor(z, true), &real_factor(Complex64::new(-2.0, 0.0), false));
        let (expanded, _) = split_real(&poly_from_roots(&[z, z.conj(), Complex64::new(-2.0, 0.0)]));

        assert_eq!(pair.len(), 4);
        for (a, b) in pair.iter().zip(expanded.iter()) {
            assert!((a - b).abs() < 1e-12);
        }
    }

    #[test]
    fn test_polyval_horner() {
        // x^2 - 3x + 2 at x = j  ->  -1 - 3j + 2 = 1 - 3j
        let v = polyval(&[1.0, -3.0, 2.0], Complex64::new(0.0, 1.0));
        assert!((v - Complex64::new(1.0, -3.0)).norm() < 1e-12);
    }
}
