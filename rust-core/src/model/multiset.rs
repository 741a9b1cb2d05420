//! Complex roots with integer multiplicities
//!
//! Poles and zeros are stored as a multiset: each distinct complex value maps
//! to a positive multiplicity ("Fach"). A value with multiplicity zero is not
//! stored at all. Conjugate symmetry is maintained by the callers, which always
//! build their batches with [`conjugate_batch`] / [`conjugate_keys`].

use num_complex::Complex64;
use std::num::NonZeroU32;

/// Imaginary parts at or below this magnitude count as zero
pub const IMAG_TOLERANCE: f64 = 1e-12;

/// Largest multiplicity accepted for a single edit of one root
pub const MAX_MULTIPLICITY: u32 = 100;

/// Check whether a root lies on the real axis (within [`IMAG_TOLERANCE`])
#[inline]
pub fn is_real(z: Complex64) -> bool {
    z.im.abs() <= IMAG_TOLERANCE
}

/// Move a near-real root exactly onto the real axis
///
/// Also folds `-0.0` into `0.0` so that stored keys compare consistently.
#[inline]
pub fn snap_to_real_axis(z: Complex64) -> Complex64 {
    if is_real(z) {
        Complex64::new(z.re + 0.0, 0.0)
    } else {
        z
    }
}

/// Build the addition batch for a root and its conjugate
///
/// Real roots are self-conjugate and yield a single entry.
pub fn conjugate_batch(z: Complex64, multiplicity: NonZeroU32) -> Vec<(Complex64, NonZeroU32)> {
    let z = snap_to_real_axis(z);
    if is_real(z) {
        vec![(z, multiplicity)]
    } else {
        vec![(z, multiplicity), (z.conj(), multiplicity)]
    }
}

/// Build the removal keys for a root and its conjugate
pub fn conjugate_keys(z: Complex64) -> Vec<Complex64> {
    let z = snap_to_real_axis(z);
    if is_real(z) {
        vec![z]
    } else {
        vec![z, z.conj()]
    }
}

/// Mapping from complex root to multiplicity, kept in insertion order
#[derive(Debug, Clone, Default)]
pub struct ComplexMultiset {
    entries: Vec<(Complex64, NonZeroU32)>,
}

impl ComplexMultiset {
    /// Create an empty multiset
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge entries: new multiplicity = old multiplicity + increment
    pub fn add<I>(&mut self, entries: I)
    where
        I: IntoIterator<Item = (Complex64, NonZeroU32)>,
    {
        for (z, k) in entries {
            let z = snap_to_real_axis(z);
            match self.entries.iter_mut().find(|(key, _)| *key == z) {
                Some((_, count)) => *count = count.saturating_add(k.get()),
                None => self.entries.push((z, k)),
            }
        }
    }

    /// Delete entries outright; keys that are not present are ignored
    pub fn remove<I>(&mut self, keys: I)
    where
        I: IntoIterator<Item = Complex64>,
    {
        for key in keys {
            let key = snap_to_real_axis(key);
            self.entries.retain(|(z, _)| *z != key);
        }
    }

    /// Iterate over `(root, multiplicity)` pairs
    pub fn items(&self) -> impl Iterator<Item = (Complex64, NonZeroU32)> + '_ {
        self.entries.iter().copied()
    }

    /// Multiplicity of `z`, or 0 if absent
    pub fn multiplicity(&self, z: Complex64) -> u32 {
        let z = snap_to_real_axis(z);
        self.entries
            .iter()
            .find(|(key, _)| *key == z)
            .map_or(0, |(_, k)| k.get())
    }

    pub fn contains(&self, z: Complex64) -> bool {
        self.multiplicity(z) > 0
    }

    /// Number of distinct roots
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all multiplicities (the polynomial degree these roots produce)
    pub fn total_multiplicity(&self) -> usize {
        self.entries.iter().map(|(_, k)| k.get() as usize).sum()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Flatten into a root list, repeating each root by its multiplicity
    pub fn expand(&self) -> Vec<Complex64> {
        let mut roots = Vec::with_capacity(self.total_multiplicity());
        for &(z, k) in &self.entries {
            roots.extend(std::iter::repeat(z).take(k.get() as usize));
        }
        roots
    }

    /// One entry per conjugate pair (the member with non-negative imaginary part)
    pub fn representatives(&self) -> impl Iterator<Item = (Complex64, NonZeroU32)> + '_ {
        self.entries.iter().copied().filter(|(z, _)| z.im >= 0.0)
    }

    /// Every non-real root has its conjugate with the same multiplicity
    pub fn is_conjugate_symmetric(&self) -> bool {
        self.entries
            .iter()
            .filter(|(z, _)| !is_real(*z))
            .all(|&(z, k)| self.multiplicity(z.conj()) == k.get())
    }
}

impl FromIterator<(Complex64, NonZeroU32)> for ComplexMultiset {
    fn from_iter<I: IntoIterator<Item = (Complex64, NonZeroU32)>>(iter: I) -> Self {
        let mut set = Self::new();
        set.add(iter);
        set
    }
}
