//! FFT engine using realfft for real-valued coefficient sequences
//!
//! Evaluates a real polynomial on a uniform grid around the unit circle in
//! one transform instead of one Horner pass per frequency.

use crate::error::{FilterError, FilterResult};
use num_complex::Complex64;
use realfft::{RealFftPlanner, RealToComplex};
use std::sync::Arc;

/// FFT engine for real-valued sequences
pub struct FftEngine {
    /// FFT size (number of samples)
    fft_size: usize,

    /// Real FFT processor
    r2c: Arc<dyn RealToComplex<f64>>,

    /// Reusable input buffer
    input_buffer: Vec<f64>,

    /// Reusable output buffer (complex spectrum)
    output_buffer: Vec<Complex64>,
}

impl FftEngine {
    /// Create new FFT engine
    ///
    /// # Arguments
    /// * `fft_size` - FFT size (number of samples)
    pub fn new(fft_size: usize) -> Self {
        let mut planner = RealFftPlanner::<f64>::new();
        let r2c = planner.plan_fft_forward(fft_size);

        let input_buffer = r2c.make_input_vec();
        let output_buffer = r2c.make_output_vec();

        Self {
            fft_size,
            r2c,
            input_buffer,
            output_buffer,
        }
    }

    /// Whether a sequence of `len` samples fits without truncation
    pub fn fits(&self, len: usize) -> bool {
        len <= self.fft_size
    }

    /// Compute the spectrum of a zero-padded sequence
    ///
    /// # Arguments
    /// * `sequence` - Input samples, at most `fft_size` long
    ///
    /// # Returns
    /// `X[k] = sum_n x[n] e^{-j 2 pi k n / fft_size}` for k = 0..fft_size/2
    pub fn spectrum(&mut self, sequence: &[f64]) -> FilterResult<&[Complex64]> {
        if !self.fits(sequence.len()) {
            return Err(FilterError::Fft(format!(
                "sequence of {} samples exceeds FFT size {}",
                sequence.len(),
                self.fft_size
            )));
        }

        // Copy sequence to input buffer with zero-padding
        let copy_len = sequence.len();
        self.input_buffer[..copy_len].copy_from_slice(sequence);
        self.input_buffer[copy_len..].fill(0.0);

        self.r2c
            .process(&mut self.input_buffer, &mut self.output_buffer)
            .map_err(|e| FilterError::Fft(e.to_string()))?;

        Ok(&self.output_buffer)
    }
}
