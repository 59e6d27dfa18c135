use thiserror::Error;
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SpectralError {
    #[error("transform size {0} is not supported; expected a power of two >= 2")]
    UnsupportedSize(usize),
    #[error("signal length mismatch: transform size {expected}, got {actual} samples")]
    LengthMismatch { expected: usize, actual: usize },
    #[error("unknown band name `{0}`")]
    UnknownBand(String),
    #[error("invalid band range [{low_hz}, {high_hz})")]
    InvalidBand { low_hz: f32, high_hz: f32 },
    #[error("sample rate must be greater than zero")]
    InvalidSampleRate,
    #[error("sample rate mismatch: expected {expected}, got {actual}")]
    SampleRateMismatch { expected: f32, actual: f32 },
    #[error("band maps to an empty bin range (start {start}, end {end})")]
    EmptyBandRange { start: i64, end: i64 },
    #[error("band bins [{start}, {end}] fall outside the PSD of length {len}")]
    BandOutOfBounds { start: i64, end: i64, len: usize },
    #[error("channel count mismatch: expected {expected}, got {actual}")]
    ChannelMismatch { expected: usize, actual: usize },
    #[error("window needs a non-zero size and channel count (size {size}, channels {channels})")]
    InvalidWindow { size: usize, channels: usize },
    #[error("amplitude/frequency count mismatch: {amplitudes} amplitudes, {frequencies} frequencies")]
    GeneratorMismatch {
        amplitudes: usize,
        frequencies: usize,
    },
    #[error("duration must be finite and non-negative")]
    InvalidDuration,
    #[error("invalid configuration: {0}")]
    Config(String),
}
impl From<serde_json::Error> for SpectralError {
    fn from(value: serde_json::Error) -> Self {
        SpectralError::Config(value.to_string())
    }
}
