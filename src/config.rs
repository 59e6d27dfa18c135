use serde::{Deserialize, Serialize};
use crate::drivers::transform::is_supported_size;
use crate::drivers::{EegBand, LengthPolicy, SpectralError};
/// Settings for a band-power pipeline.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpectralConfig {
    pub sample_rate_hz: f32,
    /// Transform size; a power of two.
    pub fft_size: usize,
    /// Samples per channel collected before each transform.
    pub window_size: usize,
    pub channels: usize,
    pub length_policy: LengthPolicy,
    pub bands: Vec<EegBand>,
}
impl SpectralConfig {
    pub fn from_json_str(json: &str) -> Result<Self, SpectralError> {
        let config: SpectralConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }
    pub fn to_json_string(&self) -> Result<String, SpectralError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
    pub fn validate(&self) -> Result<(), SpectralError> {
        if !(self.sample_rate_hz > 0.0 && self.sample_rate_hz.is_finite()) {
            return Err(SpectralError::Config(format!(
                "sample_rate_hz must be positive, got {}",
                self.sample_rate_hz
            )));
        }
        if !is_supported_size(self.fft_size) {
            return Err(SpectralError::Config(format!(
                "fft_size must be a power of two >= 2, got {}",
                self.fft_size
            )));
        }
        if self.window_size == 0 || self.channels == 0 {
            return Err(SpectralError::Config(format!(
                "window_size and channels must be non-zero, got {} and {}",
                self.window_size, self.channels
            )));
        }
        if self.window_size != self.fft_size && self.length_policy == LengthPolicy::Strict {
            return Err(SpectralError::Config(format!(
                "window_size {} differs from fft_size {} under the strict length policy",
                self.window_size, self.fft_size
            )));
        }
        let unreachable = match self.length_policy {
            LengthPolicy::ZeroPad => self.window_size > self.fft_size,
            LengthPolicy::Truncate => self.window_size < self.fft_size,
            LengthPolicy::Strict | LengthPolicy::Fit => false,
        };
        if unreachable {
            return Err(SpectralError::Config(format!(
                "window_size {} can never be transformed at fft_size {} under {:?}",
                self.window_size, self.fft_size, self.length_policy
            )));
        }
        Ok(())
    }
    pub fn window_seconds(&self) -> f32 {
        self.window_size as f32 / self.sample_rate_hz
    }
    /// Spectral resolution in Hz per bin.
    pub fn resolution_hz(&self) -> f32 {
        self.sample_rate_hz / self.fft_size as f32
    }
}
impl Default for SpectralConfig {
    fn default() -> Self {
        // OpenBCI Cyton rate, one-second-ish windows.
        Self {
            sample_rate_hz: 250.0,
            fft_size: 256,
            window_size: 256,
            channels: 1,
            length_policy: LengthPolicy::Fit,
            bands: EegBand::ALL.to_vec(),
        }
    }
}
#[cfg(test)]
mod tests {
    use super::*;
    #[test]
    fn default_is_valid() {
        let config = SpectralConfig::default();
        config.validate().unwrap();
        assert_eq!(config.bands.len(), 9);
        assert!((config.window_seconds() - 1.024).abs() < 1e-6);
    }
    #[test]
    fn partial_json_falls_back_to_defaults() {
        let config = SpectralConfig::from_json_str(
            r#"{ "channels": 4, "bands": ["alpha", "lowbeta"], "length_policy": "zero_pad" }"#,
        )
        .unwrap();
        assert_eq!(config.channels, 4);
        assert_eq!(config.bands, vec![EegBand::Alpha, EegBand::LowBeta]);
        assert_eq!(config.length_policy, LengthPolicy::ZeroPad);
        assert_eq!(config.fft_size, 256);
    }
    #[test]
    fn rejects_bad_values() {
        assert!(SpectralConfig::from_json_str(r#"{ "fft_size": 250 }"#).is_err());
        assert!(SpectralConfig::from_json_str(r#"{ "bands": ["kappa"] }"#).is_err());
        assert!(SpectralConfig::from_json_str(r#"{ "sample_rate_hz": 0.0 }"#).is_err());
        assert!(SpectralConfig::from_json_str(
            r#"{ "window_size": 200, "length_policy": "strict" }"#
        )
        .is_err());
    }
    #[test]
    fn rejects_windows_the_policy_cannot_fit() {
        let zero_pad = SpectralConfig {
            fft_size: 64,
            window_size: 128,
            length_policy: LengthPolicy::ZeroPad,
            ..SpectralConfig::default()
        };
        assert!(matches!(zero_pad.validate(), Err(SpectralError::Config(_))));
        let truncate = SpectralConfig {
            fft_size: 256,
            window_size: 128,
            length_policy: LengthPolicy::Truncate,
            ..SpectralConfig::default()
        };
        assert!(matches!(truncate.validate(), Err(SpectralError::Config(_))));
        SpectralConfig {
            window_size: 64,
            ..zero_pad
        }
        .validate()
        .unwrap();
        SpectralConfig {
            window_size: 512,
            ..truncate
        }
        .validate()
        .unwrap();
    }
    #[test]
    fn survives_a_json_round_trip() {
        let config = SpectralConfig {
            channels: 8,
            ..SpectralConfig::default()
        };
        let json = config.to_json_string().unwrap();
        assert_eq!(SpectralConfig::from_json_str(&json).unwrap(), config);
    }
}
