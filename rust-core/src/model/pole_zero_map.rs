//! Marker data for the S-plane / Z-plane pole-zero plot

use super::config::FilterMode;
use super::multiset::ComplexMultiset;
use num_complex::Complex64;
use std::f64::consts::PI;

/// Points used to outline the unit circle in the Z-plane
pub const UNIT_CIRCLE_POINTS: usize = 150;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerKind {
    Pole,
    Zero,
}

/// One plotted root, labelled with its multiplicity
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RootMarker {
    pub position: Complex64,
    pub multiplicity: u32,
    pub kind: MarkerKind,
}

impl RootMarker {
    /// Annotation drawn next to the marker, e.g. `x2`
    pub fn label(&self) -> String {
        format!("x{}", self.multiplicity)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PoleZeroMap {
    pub mode: FilterMode,
    pub markers: Vec<RootMarker>,

    /// Unit circle outline (digital mode only)
    pub unit_circle: Vec<Complex64>,
}

impl PoleZeroMap {
    pub fn new(mode: FilterMode, poles: &ComplexMultiset, zeros: &ComplexMultiset) -> Self {
        let markers = poles
            .items()
            .map(|(z, k)| (z, k, MarkerKind::Pole))
            .chain(zeros.items().map(|(z, k)| (z, k, MarkerKind::Zero)))
            .map(|(position, k, kind)| RootMarker {
                position,
                multiplicity: k.get(),
                kind,
            })
            .collect();

        let unit_circle = match mode {
            FilterMode::Digital => unit_circle(UNIT_CIRCLE_POINTS),
            FilterMode::Analog => Vec::new(),
        };

        Self {
            mode,
            markers,
            unit_circle,
        }
    }

    pub fn poles(&self) -> impl Iterator<Item = &RootMarker> {
        self.markers.iter().filter(|m| m.kind == MarkerKind::Pole)
    }

    pub fn zeros(&self) -> impl Iterator<Item = &RootMarker> {
        self.markers.iter().filter(|m| m.kind == MarkerKind::Zero)
    }
}

/// `n` points on the unit circle from angle 0 to 2*pi inclusive
fn unit_circle(n: usize) -> Vec<Complex64> {
    let step = if n > 1 { 2.0 * PI / (n - 1) as f64 } else { 0.0 };
    (0..n)
        .map(|i| Complex64::from_polar(1.0, step * i as f64))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::multiset::conjugate_batch;
    use std::num::NonZeroU32;

    #[test]
    fn test_markers_carry_multiplicity() {
        let poles: ComplexMultiset =
            conjugate_batch(Complex64::new(0.2, 0.6), NonZeroU32::new(2).unwrap())
                .into_iter()
                .collect();
        let zeros: ComplexMultiset = [(Complex64::new(1.0, 0.0), NonZeroU32::MIN)]
            .into_iter()
            .collect();
        let map = PoleZeroMap::new(FilterMode::Digital, &poles, &zeros);

        assert_eq!(map.poles().count(), 2);
        assert_eq!(map.zeros().count(), 1);
        assert!(map.poles().all(|m| m.label() == "x2"));
        assert_eq!(map.unit_circle.len(), UNIT_CIRCLE_POINTS);
        assert!(map.unit_circle.iter().all(|z| (z.norm() - 1.0).abs() < 1e-12));
    }

    #[test]
    fn test_analog_map_has_no_circle() {
        let map = PoleZeroMap::new(
            FilterMode::Analog,
            &ComplexMultiset::new(),
            &ComplexMultiset::new(),
        );
        assert!(map.markers.is_empty());
        assert!(map.unit_circle.is_empty());
    }
}
