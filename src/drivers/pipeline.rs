use log::{debug, warn};
use crate::config::SpectralConfig;
use crate::drivers::bands::{band_bins, band_powers, BandPowers, EegBand};
use crate::drivers::fft::{FrequencySpectrum, PsdEngine, SpectrumBuilder};
use crate::drivers::source::{SignalBatch, SignalSource};
use crate::drivers::{SpectralError, WindowBuffer};
/// Everything computed for one completed window.
#[derive(Clone, Debug)]
pub struct WindowFeatures {
    /// Zero-based count of windows emitted by the pipeline.
    pub index: u64,
    pub channel_labels: Vec<String>,
    pub spectrum: FrequencySpectrum,
    pub band_powers: Vec<BandPowers>, // channel -> bands
}
/// Feeds batches from a source through a window and turns every full window
/// into per-channel band powers.
pub struct BandPowerPipeline<S: SignalSource> {
    source: S,
    config: SpectralConfig,
    window: WindowBuffer,
    builder: SpectrumBuilder,
    bands: Vec<EegBand>,
    channel_labels: Vec<String>,
    windows_emitted: u64,
}
impl<S: SignalSource> BandPowerPipeline<S> {
    pub fn new(source: S, config: SpectralConfig) -> Result<Self, SpectralError> {
        Self::with_engine(source, config, PsdEngine::shared())
    }
    pub fn with_engine(
        source: S,
        config: SpectralConfig,
        engine: PsdEngine,
    ) -> Result<Self, SpectralError> {
        config.validate()?;
        let window = WindowBuffer::new(config.window_size, config.channels)?;
        let builder =
            SpectrumBuilder::with_engine(engine, config.fft_size).length_policy(config.length_policy);
        let bands = usable_bands(&config);
        let channel_labels = (1..=config.channels).map(|i| format!("Ch{i}")).collect();
        Ok(Self {
            source,
            config,
            window,
            builder,
            bands,
            channel_labels,
            windows_emitted: 0,
        })
    }
    pub fn config(&self) -> &SpectralConfig {
        &self.config
    }
    /// Bands that fit below Nyquist for this configuration.
    pub fn bands(&self) -> &[EegBand] {
        &self.bands
    }
    pub fn windows_emitted(&self) -> u64 {
        self.windows_emitted
    }
    pub fn pending_samples(&self) -> usize {
        self.window.len()
    }
    /// Drops the partially filled window.
    pub fn reset(&mut self) {
        self.window.clear();
    }
    /// Pulls one batch from the source. `None` once the source is exhausted.
    pub fn pump_once(&mut self) -> Result<Option<Vec<WindowFeatures>>, SpectralError> {
        let Some(batch) = self.source.next_batch()? else {
            return Ok(None);
        };
        self.push_batch(&batch).map(Some)
    }
    /// Pumps until the source runs dry.
    pub fn drain(&mut self) -> Result<Vec<WindowFeatures>, SpectralError> {
        let mut all = Vec::new();
        while let Some(features) = self.pump_once()? {
            all.extend(features);
        }
        Ok(all)
    }
    pub fn push_batch(&mut self, batch: &SignalBatch) -> Result<Vec<WindowFeatures>, SpectralError> {
        batch.validate()?;
        if batch.sample_rate_hz != self.config.sample_rate_hz {
            return Err(SpectralError::SampleRateMismatch {
                expected: self.config.sample_rate_hz,
                actual: batch.sample_rate_hz,
            });
        }
        if batch.num_channels() != self.config.channels {
            return Err(SpectralError::ChannelMismatch {
                expected: self.config.channels,
                actual: batch.num_channels(),
            });
        }
        self.channel_labels.clone_from(&batch.channel_labels);
        let sample_rate_hz = self.config.sample_rate_hz;
        let mut completed = Vec::new();
        let mut frame = vec![0.0; self.config.channels];
        for index in 0..batch.samples_per_channel().unwrap_or(0) {
            batch.fill_frame(index, &mut frame)?;
            let builder = &self.builder;
            let mut finished = None;
            self.window.push_sample(&frame, |view| {
                finished = Some(builder.compute(view, sample_rate_hz));
            })?;
            if let Some(spectrum) = finished {
                completed.push(self.features(spectrum?)?);
            }
        }
        Ok(completed)
    }
    fn features(&mut self, spectrum: FrequencySpectrum) -> Result<WindowFeatures, SpectralError> {
        let band_powers = spectrum
            .psd
            .iter()
            .map(|psd| band_powers(spectrum.fft_size, psd, spectrum.sample_rate_hz, &self.bands))
            .collect::<Result<Vec<_>, _>>()?;
        let index = self.windows_emitted;
        self.windows_emitted += 1;
        debug!(
            "window {index}: {} channels, {} bands",
            band_powers.len(),
            self.bands.len()
        );
        Ok(WindowFeatures {
            index,
            channel_labels: self.channel_labels.clone(),
            spectrum,
            band_powers,
        })
    }
}
fn usable_bands(config: &SpectralConfig) -> Vec<EegBand> {
    let psd_len = config.fft_size / 2;
    config
        .bands
        .iter()
        .copied()
        .filter(|band| {
            match band_bins(config.fft_size, psd_len, config.sample_rate_hz, band.frequency_band()) {
                Ok(_) => true,
                Err(err) => {
                    warn!("skipping band {band}: {err}");
                    false
                }
            }
        })
        .collect()
}
