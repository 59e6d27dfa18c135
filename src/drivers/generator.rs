use std::f32::consts::PI;
use rand::Rng;
use crate::drivers::SpectralError;
/// Sum of sinusoids sampled at `sample_rate_hz` for `duration_secs`.
///
/// Produces `floor(duration * rate)` samples at `t = n / rate`. The count is
/// taken in `f64`, so durations like 0.7 s at 10 Hz give 7 samples.
pub fn generate(
    amplitudes: &[f32],
    frequencies_hz: &[f32],
    sample_rate_hz: f32,
    duration_secs: f64,
) -> Result<Vec<f32>, SpectralError> {
    if amplitudes.len() != frequencies_hz.len() {
        return Err(SpectralError::GeneratorMismatch {
            amplitudes: amplitudes.len(),
            frequencies: frequencies_hz.len(),
        });
    }
    if !(sample_rate_hz > 0.0 && sample_rate_hz.is_finite()) {
        return Err(SpectralError::InvalidSampleRate);
    }
    if !(duration_secs >= 0.0 && duration_secs.is_finite()) {
        return Err(SpectralError::InvalidDuration);
    }
    let count = (duration_secs * f64::from(sample_rate_hz)).floor() as usize;
    let samples = (0..count)
        .map(|n| {
            let t = n as f32 / sample_rate_hz;
            amplitudes
                .iter()
                .zip(frequencies_hz)
                .map(|(amp, freq)| amp * (2.0 * PI * freq * t).sin())
                .sum()
        })
        .collect();
    Ok(samples)
}
/// One tone set per channel, returned as channels x samples.
pub fn generate_channels(
    tones: &[(Vec<f32>, Vec<f32>)], // (amplitudes, frequencies) per channel
    sample_rate_hz: f32,
    duration_secs: f64,
) -> Result<Vec<Vec<f32>>, SpectralError> {
    tones
        .iter()
        .map(|(amplitudes, frequencies)| {
            generate(amplitudes, frequencies, sample_rate_hz, duration_secs)
        })
        .collect()
}
/// Adds uniform noise in `[-amplitude, amplitude)` to every sample.
pub fn add_noise<R: Rng + ?Sized>(signal: &mut [f32], amplitude: f32, rng: &mut R) {
    if amplitude <= 0.0 {
        return;
    }
    for sample in signal.iter_mut() {
        *sample += rng.gen_range(-amplitude..amplitude);
    }
}
