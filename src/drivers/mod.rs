// src/drivers/mod.rs
pub mod bands;
pub mod buffer;
pub mod cache;
pub mod error;
pub mod fft;
pub mod generator;
pub mod pipeline;
pub mod source;
pub mod transform;
pub use bands::{
    band_bins, band_power, band_power_by_name, band_powers, BandPowers, BandSpec, EegBand,
    FrequencyBand,
};
pub use buffer::{EegWindow, WindowBuffer};
pub use cache::TransformCache;
pub use error::SpectralError;
pub use fft::{bin_frequencies, FrequencySpectrum, LengthPolicy, PsdEngine, SpectrumBuilder};
pub use generator::{add_noise, generate, generate_channels};
pub use pipeline::{BandPowerPipeline, WindowFeatures};
pub use source::{GeneratorSource, ManualSource, SignalBatch, SignalSource};
pub use transform::{RustFftProvider, TransformProvider};
