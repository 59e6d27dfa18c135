use std::sync::Arc;
use rustfft::{num_complex::Complex32, Fft, FftPlanner};
use crate::drivers::SpectralError;
/// Real-input forward transform of a fixed size.
///
/// Output is `2 * size` values laid out as interleaved `re, im` pairs, one
/// pair per complex bin.
pub trait TransformProvider: Send + Sync {
    fn size(&self) -> usize;
    /// Zeroed output buffer with the shape `real_transform` expects.
    fn create_complex_array(&self) -> Vec<f32> {
        vec![0.0; 2 * self.size()]
    }
    fn real_transform(&self, output: &mut [f32], input: &[f32]) -> Result<(), SpectralError>;
}
/// Sizes the transform layer accepts: powers of two, at least two bins.
pub fn is_supported_size(size: usize) -> bool {
    size >= 2 && size.is_power_of_two()
}
/// `TransformProvider` backed by a planned `rustfft` forward FFT.
pub struct RustFftProvider {
    size: usize,
    fft: Arc<dyn Fft<f32>>,
}
impl RustFftProvider {
    pub fn new(size: usize) -> Result<Self, SpectralError> {
        if !is_supported_size(size) {
            return Err(SpectralError::UnsupportedSize(size));
        }
        let mut planner = FftPlanner::<f32>::new();
        let fft = planner.plan_fft_forward(size);
        Ok(Self { size, fft })
    }
}
impl TransformProvider for RustFftProvider {
    fn size(&self) -> usize {
        self.size
    }
    fn real_transform(&self, output: &mut [f32], input: &[f32]) -> Result<(), SpectralError> {
        if input.len() != self.size {
            return Err(SpectralError::LengthMismatch {
                expected: self.size,
                actual: input.len(),
            });
        }
        if output.len() != 2 * self.size {
            return Err(SpectralError::LengthMismatch {
                expected: 2 * self.size,
                actual: output.len(),
            });
        }
        let mut buffer: Vec<Complex32> = input.iter().map(|&v| Complex32::new(v, 0.0)).collect();
        self.fft.process(&mut buffer);
        for (pair, bin) in output.chunks_exact_mut(2).zip(&buffer) {
            pair[0] = bin.re;
            pair[1] = bin.im;
        }
        Ok(())
    }
}
#[cfg(test)]
mod tests {
    use super::*;
    #[test]
    fn rejects_sizes_that_are_not_powers_of_two() {
        for size in [0, 1, 3, 6, 100] {
            assert_eq!(
                RustFftProvider::new(size).err(),
                Some(SpectralError::UnsupportedSize(size))
            );
        }
        assert!(RustFftProvider::new(2).is_ok());
        assert!(RustFftProvider::new(4096).is_ok());
    }
    #[test]
    fn dc_signal_lands_in_bin_zero() {
        let provider = RustFftProvider::new(4).unwrap();
        let mut out = provider.create_complex_array();
        assert_eq!(out.len(), 8);
        provider.real_transform(&mut out, &[1.0, 1.0, 1.0, 1.0]).unwrap();
        assert!((out[0] - 4.0).abs() < 1e-6);
        assert!(out[1..].iter().all(|v| v.abs() < 1e-6));
    }
    #[test]
    fn checks_buffer_shapes() {
        let provider = RustFftProvider::new(4).unwrap();
        let mut out = provider.create_complex_array();
        assert!(matches!(
            provider.real_transform(&mut out, &[1.0, 2.0]),
            Err(SpectralError::LengthMismatch { expected: 4, actual: 2 })
        ));
        let mut short = vec![0.0; 4];
        assert!(provider.real_transform(&mut short, &[0.0; 4]).is_err());
    }
}
