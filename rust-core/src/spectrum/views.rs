//! Magnitude, phase and normalized-gain views of a frequency response

use super::response::FrequencyResponse;

/// Floor applied before taking logarithms (avoids log(0))
const MAGNITUDE_FLOOR: f64 = 1e-10;

impl FrequencyResponse {
    /// `|H|` at each grid point
    pub fn magnitude(&self) -> Vec<f64> {
        self.response().iter().map(|h| h.norm()).collect()
    }

    /// `arg H` in radians, in (-pi, pi]
    pub fn phase(&self) -> Vec<f64> {
        self.response().iter().map(|h| h.arg()).collect()
    }

    /// Magnitude in dB: 20*log10(|H|)
    pub fn magnitude_db(&self) -> Vec<f64> {
        self.response()
            .iter()
            .map(|h| 20.0 * h.norm().max(MAGNITUDE_FLOOR).log10())
            .collect()
    }

    /// Largest finite magnitude on the grid (0 for an empty or all-zero response)
    pub fn peak_magnitude(&self) -> f64 {
        self.response()
            .iter()
            .map(|h| h.norm())
            .filter(|m| m.is_finite())
            .fold(0.0, f64::max)
    }

    /// Magnitude scaled by the grid's peak, so different filters share a 0-1 scale
    pub fn normalized_magnitude(&self) -> Vec<f64> {
        let peak = self.peak_magnitude();
        let magnitude = self.magnitude();
        if peak > 0.0 {
            magnitude.iter().map(|m| m / peak).collect()
        } else {
            magnitude
        }
    }
}
