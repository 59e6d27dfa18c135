use log::trace;
use ndarray::{s, Array2, ArrayView2};
use crate::drivers::SpectralError;
/// Fixed-length multi-channel window that fills one sample at a time.
///
/// Storage is `channels x size`; only the first `len` columns are live.
#[derive(Clone, Debug)]
pub struct WindowBuffer {
    samples: Array2<f32>, // channels x samples
    len: usize,
}
impl WindowBuffer {
    pub fn new(size: usize, channels: usize) -> Result<Self, SpectralError> {
        if size == 0 || channels == 0 {
            return Err(SpectralError::InvalidWindow { size, channels });
        }
        Ok(Self {
            samples: Array2::zeros((channels, size)),
            len: 0,
        })
    }
    pub fn size(&self) -> usize {
        self.samples.ncols()
    }
    pub fn channels(&self) -> usize {
        self.samples.nrows()
    }
    pub fn len(&self) -> usize {
        self.len
    }
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
    /// Samples collected so far.
    pub fn view(&self) -> ArrayView2<'_, f32> {
        self.samples.slice(s![.., ..self.len])
    }
    /// Appends one value per channel. When the window fills up, `on_full` sees
    /// the complete window and the buffer is emptied before this returns.
    ///
    /// Returns `true` when the window fired.
    pub fn push_sample<F>(&mut self, sample: &[f32], on_full: F) -> Result<bool, SpectralError>
    where
        F: FnOnce(ArrayView2<'_, f32>),
    {
        if sample.len() != self.channels() {
            return Err(SpectralError::ChannelMismatch {
                expected: self.channels(),
                actual: sample.len(),
            });
        }
        let column = self.len;
        for (row, &value) in sample.iter().enumerate() {
            self.samples[[row, column]] = value;
        }
        self.len += 1;
        if self.len < self.size() {
            return Ok(false);
        }
        trace!("window of {} samples full", self.size());
        on_full(self.samples.view());
        self.clear();
        Ok(true)
    }
    pub fn clear(&mut self) {
        self.len = 0;
    }
}
/// Window that hands each completed batch to a consumer chosen at
/// construction.
///
/// `add_data` borrows the window mutably, so the consumer can never push into
/// the same window while it runs.
pub struct EegWindow<F>
where
    F: FnMut(ArrayView2<'_, f32>),
{
    buffer: WindowBuffer,
    consumer: F,
}
impl<F> EegWindow<F>
where
    F: FnMut(ArrayView2<'_, f32>),
{
    pub fn new(size: usize, channels: usize, consumer: F) -> Result<Self, SpectralError> {
        Ok(Self {
            buffer: WindowBuffer::new(size, channels)?,
            consumer,
        })
    }
    pub fn add_data(&mut self, sample: &[f32]) -> Result<bool, SpectralError> {
        let consumer = &mut self.consumer;
        self.buffer.push_sample(sample, |window| consumer(window))
    }
    pub fn clear(&mut self) {
        self.buffer.clear();
    }
    pub fn len(&self) -> usize {
        self.buffer.len()
    }
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }
    pub fn size(&self) -> usize {
        self.buffer.size()
    }
    pub fn channels(&self) -> usize {
        self.buffer.channels()
    }
}
#[cfg(test)]
mod tests {
    use super::*;
    #[test]
    fn fires_once_with_samples_in_order() {
        let mut seen: Vec<Vec<Vec<f32>>> = Vec::new();
        let mut window = EegWindow::new(4, 2, |view: ArrayView2<'_, f32>| {
            seen.push(view.rows().into_iter().map(|r| r.to_vec()).collect());
        })
        .unwrap();
        let mut fired = Vec::new();
        for i in 0..4 {
            let i = i as f32;
            fired.push(window.add_data(&[i, 10.0 + i]).unwrap());
        }
        assert_eq!(fired, vec![false, false, false, true]);
        assert_eq!(window.len(), 0);
        drop(window);
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0], vec![vec![0.0, 1.0, 2.0, 3.0], vec![10.0, 11.0, 12.0, 13.0]]);
    }
    #[test]
    fn keeps_firing_on_every_full_window() {
        let mut count = 0;
        let mut window = EegWindow::new(3, 1, |view: ArrayView2<'_, f32>| {
            assert_eq!(view.dim(), (1, 3));
            count += 1;
        })
        .unwrap();
        for i in 0..10 {
            window.add_data(&[i as f32]).unwrap();
        }
        assert_eq!(window.len(), 1);
        drop(window);
        assert_eq!(count, 3);
    }
    #[test]
    fn wrong_channel_count_leaves_state_alone() {
        let mut buffer = WindowBuffer::new(4, 3).unwrap();
        buffer.push_sample(&[1.0, 2.0, 3.0], |_| {}).unwrap();
        assert_eq!(
            buffer.push_sample(&[1.0, 2.0], |_| {}).err(),
            Some(SpectralError::ChannelMismatch {
                expected: 3,
                actual: 2
            })
        );
        assert_eq!(buffer.len(), 1);
        assert_eq!(buffer.view().column(0).to_vec(), vec![1.0, 2.0, 3.0]);
    }
    #[test]
    fn clear_discards_partial_window() {
        let mut fired = false;
        let mut window = EegWindow::new(2, 1, |_: ArrayView2<'_, f32>| fired = true).unwrap();
        window.add_data(&[1.0]).unwrap();
        window.clear();
        assert!(window.is_empty());
        window.add_data(&[2.0]).unwrap();
        assert_eq!(window.len(), 1);
        drop(window);
        assert!(!fired);
    }
    #[test]
    fn rejects_empty_shapes() {
        assert!(WindowBuffer::new(0, 2).is_err());
        assert!(WindowBuffer::new(8, 0).is_err());
    }
}
