use std::collections::VecDeque;
use crate::drivers::generator::generate_channels;
use crate::drivers::SpectralError;
/// Single batch of multi-channel EEG samples.
#[derive(Clone, Debug)]
pub struct SignalBatch {
    pub sample_rate_hz: f32,
    pub samples: Vec<Vec<f32>>, // channels x samples
    pub channel_labels: Vec<String>,
}
impl SignalBatch {
    pub fn new(sample_rate_hz: f32, samples: Vec<Vec<f32>>, channel_labels: Vec<String>) -> Self {
        Self {
            sample_rate_hz,
            samples,
            channel_labels,
        }
    }
    pub fn validate(&self) -> Result<(), SpectralError> {
        if !(self.sample_rate_hz > 0.0 && self.sample_rate_hz.is_finite()) {
            return Err(SpectralError::InvalidSampleRate);
        }
        let channel_count = self.samples.len();
        if channel_count != self.channel_labels.len() {
            return Err(SpectralError::ChannelMismatch {
                expected: self.channel_labels.len(),
                actual: channel_count,
            });
        }
        if let Some(expected) = self.samples_per_channel() {
            if let Some(ragged) = self.samples.iter().find(|c| c.len() != expected) {
                return Err(SpectralError::LengthMismatch {
                    expected,
                    actual: ragged.len(),
                });
            }
        }
        Ok(())
    }
    pub fn num_channels(&self) -> usize {
        self.samples.len()
    }
    pub fn samples_per_channel(&self) -> Option<usize> {
        self.samples.first().map(|c| c.len())
    }
    /// Copies sample `index` of every channel into `frame`, one slot per channel.
    pub fn fill_frame(&self, index: usize, frame: &mut [f32]) -> Result<(), SpectralError> {
        if frame.len() != self.num_channels() {
            return Err(SpectralError::ChannelMismatch {
                expected: self.num_channels(),
                actual: frame.len(),
            });
        }
        for (slot, channel) in frame.iter_mut().zip(&self.samples) {
            *slot = *channel.get(index).ok_or(SpectralError::LengthMismatch {
                expected: index + 1,
                actual: channel.len(),
            })?;
        }
        Ok(())
    }
}
/// Trait representing something that can yield signal batches on demand.
pub trait SignalSource {
    fn next_batch(&mut self) -> Result<Option<SignalBatch>, SpectralError>;
}
/// In-memory source useful for tests and deterministic playback.
pub struct ManualSource {
    queue: VecDeque<SignalBatch>,
}
impl ManualSource {
    pub fn new(batches: impl IntoIterator<Item = SignalBatch>) -> Self {
        Self {
            queue: batches.into_iter().collect(),
        }
    }
}
impl SignalSource for ManualSource {
    fn next_batch(&mut self) -> Result<Option<SignalBatch>, SpectralError> {
        Ok(self.queue.pop_front())
    }
}
/// Synthetic multi-tone recording replayed in fixed-size batches.
pub struct GeneratorSource {
    samples: Vec<Vec<f32>>, // channels x samples
    channel_labels: Vec<String>,
    sample_rate_hz: f32,
    batch_len: usize,
    cursor: usize,
}
impl GeneratorSource {
    pub fn new(
        tones: &[(Vec<f32>, Vec<f32>)],
        sample_rate_hz: f32,
        duration_secs: f64,
        batch_len: usize,
    ) -> Result<Self, SpectralError> {
        let samples = generate_channels(tones, sample_rate_hz, duration_secs)?;
        let channel_labels = (1..=samples.len()).map(|i| format!("Ch{i}")).collect();
        Ok(Self {
            samples,
            channel_labels,
            sample_rate_hz,
            batch_len: batch_len.max(1),
            cursor: 0,
        })
    }
    pub fn remaining(&self) -> usize {
        let total = self.samples.first().map_or(0, Vec::len);
        total - self.cursor
    }
}
impl SignalSource for GeneratorSource {
    fn next_batch(&mut self) -> Result<Option<SignalBatch>, SpectralError> {
        let take = self.batch_len.min(self.remaining());
        if take == 0 {
            return Ok(None);
        }
        let range = self.cursor..self.cursor + take;
        self.cursor += take;
        let samples = self
            .samples
            .iter()
            .map(|channel| channel[range.clone()].to_vec())
            .collect();
        Ok(Some(SignalBatch::new(
            self.sample_rate_hz,
            samples,
            self.channel_labels.clone(),
        )))
    }
}
