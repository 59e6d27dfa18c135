//! Spectral features for multi-channel EEG: PSD, band power, fixed-size
//! sample windows and a multi-tone test signal generator.
pub mod config;
pub mod drivers;
pub use config::SpectralConfig;
pub use drivers::{
    band_power, generate, BandPowerPipeline, BandPowers, BandSpec, EegBand, EegWindow,
    FrequencyBand, LengthPolicy, PsdEngine, SpectralError, TransformCache, WindowBuffer,
};
/// PSD of `signal` through the process-wide transform cache.
///
/// `signal` must hold exactly `size` samples; use [`PsdEngine::compute_psd_with`]
/// for padding or truncation.
pub fn get_psd(size: usize, signal: &[f32]) -> Result<Vec<f32>, SpectralError> {
    PsdEngine::shared().compute_psd(size, signal)
}
/// Mean PSD power inside `band`, named or explicit.
pub fn get_band_power(
    size: usize,
    psd: &[f32],
    sample_rate_hz: f32,
    band: impl Into<BandSpec>,
) -> Result<f32, SpectralError> {
    band_power(size, psd, sample_rate_hz, band)
}
