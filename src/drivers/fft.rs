use std::borrow::Cow;
use std::sync::Arc;
use ndarray::ArrayView2;
use serde::{Deserialize, Serialize};
use crate::drivers::transform::is_supported_size;
use crate::drivers::{SpectralError, TransformCache};
/// What to do when a signal's length differs from the transform size.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LengthPolicy {
    /// Length must equal the transform size.
    #[default]
    Strict,
    /// Shorter signals are zero-padded; longer ones are rejected.
    ZeroPad,
    /// Longer signals keep their first `size` samples; shorter ones are rejected.
    Truncate,
    /// Pad or truncate as needed.
    Fit,
}
impl LengthPolicy {
    fn pads(self) -> bool {
        matches!(self, LengthPolicy::ZeroPad | LengthPolicy::Fit)
    }
    fn truncates(self) -> bool {
        matches!(self, LengthPolicy::Truncate | LengthPolicy::Fit)
    }
    /// Brings `signal` to exactly `size` samples, or reports why it can't.
    pub fn adapt<'a>(self, size: usize, signal: &'a [f32]) -> Result<Cow<'a, [f32]>, SpectralError> {
        match signal.len() {
            len if len == size => Ok(Cow::Borrowed(signal)),
            len if len > size && self.truncates() => Ok(Cow::Borrowed(&signal[..size])),
            len if len < size && self.pads() => {
                let mut padded = signal.to_vec();
                padded.resize(size, 0.0);
                Ok(Cow::Owned(padded))
            }
            len => Err(SpectralError::LengthMismatch {
                expected: size,
                actual: len,
            }),
        }
    }
}
/// Computes magnitude spectra through a shared transform cache.
#[derive(Clone)]
pub struct PsdEngine {
    cache: Arc<TransformCache>,
}
impl PsdEngine {
    pub fn new(cache: Arc<TransformCache>) -> Self {
        Self { cache }
    }
    /// Engine backed by the process-wide cache.
    pub fn shared() -> Self {
        Self::new(TransformCache::shared())
    }
    pub fn cache(&self) -> &TransformCache {
        &self.cache
    }
    /// PSD of `signal`, which must hold exactly `size` samples.
    pub fn compute_psd(&self, size: usize, signal: &[f32]) -> Result<Vec<f32>, SpectralError> {
        self.compute_psd_with(size, signal, LengthPolicy::Strict)
    }
    /// Magnitudes of bins `0..size/2`, in increasing frequency order.
    pub fn compute_psd_with(
        &self,
        size: usize,
        signal: &[f32],
        policy: LengthPolicy,
    ) -> Result<Vec<f32>, SpectralError> {
        let spectrum = self.transform(size, signal, policy)?;
        // `size` interleaved values cover the first size/2 bins.
        Ok(magnitudes(&spectrum[..size]))
    }
    /// Magnitudes of all `size` bins, mirrored half included.
    pub fn magnitude_spectrum(
        &self,
        size: usize,
        signal: &[f32],
        policy: LengthPolicy,
    ) -> Result<Vec<f32>, SpectralError> {
        let spectrum = self.transform(size, signal, policy)?;
        Ok(magnitudes(&spectrum))
    }
    fn transform(
        &self,
        size: usize,
        signal: &[f32],
        policy: LengthPolicy,
    ) -> Result<Vec<f32>, SpectralError> {
        if !is_supported_size(size) {
            return Err(SpectralError::UnsupportedSize(size));
        }
        let input = policy.adapt(size, signal)?;
        let provider = self.cache.get(size)?;
        let mut spectrum = provider.create_complex_array();
        provider.real_transform(&mut spectrum, &input)?;
        Ok(spectrum)
    }
}
impl Default for PsdEngine {
    fn default() -> Self {
        Self::shared()
    }
}
fn magnitudes(interleaved: &[f32]) -> Vec<f32> {
    interleaved
        .chunks_exact(2)
        .map(|bin| (bin[0] * bin[0] + bin[1] * bin[1]).sqrt())
        .collect()
}
/// Center frequency of each PSD bin for a transform of `size` points.
pub fn bin_frequencies(size: usize, sample_rate_hz: f32) -> Vec<f32> {
    let resolution = sample_rate_hz / size as f32;
    (0..size / 2).map(|k| k as f32 * resolution).collect()
}
/// PSD for each channel of one window.
#[derive(Clone, Debug)]
pub struct FrequencySpectrum {
    pub sample_rate_hz: f32,
    pub fft_size: usize,
    pub frequencies_hz: Vec<f32>,
    pub psd: Vec<Vec<f32>>, // channel -> bins
}
/// Helper that computes per-channel PSDs for a given transform size.
#[derive(Clone)]
pub struct SpectrumBuilder {
    engine: PsdEngine,
    fft_size: usize,
    policy: LengthPolicy,
}
impl SpectrumBuilder {
    pub fn with_size(fft_size: usize) -> Self {
        Self::with_engine(PsdEngine::shared(), fft_size)
    }
    pub fn with_engine(engine: PsdEngine, fft_size: usize) -> Self {
        Self {
            engine,
            fft_size,
            policy: LengthPolicy::Strict,
        }
    }
    pub fn length_policy(mut self, policy: LengthPolicy) -> Self {
        self.policy = policy;
        self
    }
    pub fn fft_size(&self) -> usize {
        self.fft_size
    }
    pub fn compute(
        &self,
        window: ArrayView2<'_, f32>,
        sample_rate_hz: f32,
    ) -> Result<FrequencySpectrum, SpectralError> {
        if !(sample_rate_hz > 0.0 && sample_rate_hz.is_finite()) {
            return Err(SpectralError::InvalidSampleRate);
        }
        let psd = window
            .rows()
            .into_iter()
            .map(|channel| {
                let samples = channel.to_vec();
                self.engine
                    .compute_psd_with(self.fft_size, &samples, self.policy)
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(FrequencySpectrum {
            sample_rate_hz,
            fft_size: self.fft_size,
            frequencies_hz: bin_frequencies(self.fft_size, sample_rate_hz),
            psd,
        })
    }
}
#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array2;
    fn approx(actual: &[f32], expected: &[f32]) {
        assert_eq!(actual.len(), expected.len(), "{actual:?} vs {expected:?}");
        for (a, e) in actual.iter().zip(expected) {
            assert!((a - e).abs() < 1e-4, "{actual:?} vs {expected:?}");
        }
    }
    #[test]
    fn psd_of_eight_point_signal() {
        let engine = PsdEngine::new(Arc::new(TransformCache::new()));
        let psd = engine
            .compute_psd(8, &[1.0, 2.0, 1.0, 2.0, 5.0, 2.0, 1.0, 2.0])
            .unwrap();
        approx(&psd, &[16.0, 4.0, 4.0, 4.0]);
    }
    #[test]
    fn truncated_signal_uses_leading_samples() {
        let engine = PsdEngine::new(Arc::new(TransformCache::new()));
        let signal = [1.0_f32, 2.0, 3.0, 4.0];
        assert!(matches!(
            engine.compute_psd(2, &signal),
            Err(SpectralError::LengthMismatch { expected: 2, actual: 4 })
        ));
        let psd = engine
            .compute_psd_with(2, &signal, LengthPolicy::Truncate)
            .unwrap();
        approx(&psd, &[3.0]);
        let full = engine
            .magnitude_spectrum(2, &signal, LengthPolicy::Truncate)
            .unwrap();
        approx(&full, &[3.0, 1.0]);
    }
    #[test]
    fn psd_has_half_length_and_is_non_negative() {
        let engine = PsdEngine::new(Arc::new(TransformCache::new()));
        for size in [2usize, 4, 16, 256, 1024] {
            let signal: Vec<f32> = (0..size).map(|i| ((i * 7 % 13) as f32) - 6.0).collect();
            let psd = engine.compute_psd(size, &signal).unwrap();
            assert_eq!(psd.len(), size / 2);
            assert!(psd.iter().all(|v| *v >= 0.0));
        }
    }
    #[test]
    fn repeated_calls_reuse_provider_and_agree() {
        let engine = PsdEngine::new(Arc::new(TransformCache::new()));
        let signal: Vec<f32> = (0..64).map(|i| (i as f32 * 0.3).sin()).collect();
        let a = engine.compute_psd(64, &signal).unwrap();
        let b = engine.compute_psd(64, &signal).unwrap();
        assert_eq!(a, b);
        assert_eq!(engine.cache().len(), 1);
    }
    #[test]
    fn rejects_unsupported_sizes() {
        let engine = PsdEngine::new(Arc::new(TransformCache::new()));
        assert_eq!(
            engine.compute_psd(0, &[]).err(),
            Some(SpectralError::UnsupportedSize(0))
        );
        assert_eq!(
            engine.compute_psd(6, &[0.0; 6]).err(),
            Some(SpectralError::UnsupportedSize(6))
        );
        assert!(engine.cache().is_empty());
    }
    #[test]
    fn length_policies() {
        let short = [1.0, 1.0];
        let long = [1.0; 8];
        assert!(LengthPolicy::Strict.adapt(4, &short).is_err());
        assert_eq!(
            LengthPolicy::ZeroPad.adapt(4, &short).unwrap().into_owned(),
            vec![1.0, 1.0, 0.0, 0.0]
        );
        assert!(LengthPolicy::ZeroPad.adapt(4, &long).is_err());
        assert_eq!(LengthPolicy::Truncate.adapt(4, &long).unwrap().len(), 4);
        assert!(LengthPolicy::Truncate.adapt(4, &short).is_err());
        assert_eq!(LengthPolicy::Fit.adapt(4, &short).unwrap().len(), 4);
        assert_eq!(LengthPolicy::Fit.adapt(4, &long).unwrap().len(), 4);
    }
    #[test]
    fn builder_computes_every_channel() {
        let mut window = Array2::<f32>::zeros((2, 128));
        window.row_mut(1).fill(1.0);
        let spectrum = SpectrumBuilder::with_size(64)
            .length_policy(LengthPolicy::Fit)
            .compute(window.view(), 250.0)
            .unwrap();
        assert_eq!(spectrum.psd.len(), 2);
        assert_eq!(spectrum.frequencies_hz.len(), 32);
        assert!((spectrum.psd[1][0] - 64.0).abs() < 1e-3);
        assert!(spectrum.psd[0].iter().all(|v| *v == 0.0));
    }
    #[test]
    fn bin_axis_spacing() {
        let axis = bin_frequencies(8, 256.0);
        assert_eq!(axis, vec![0.0, 32.0, 64.0, 96.0]);
    }
}
