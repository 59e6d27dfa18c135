// src/main.rs
// Demo runner: streams a synthetic two-channel recording through the pipeline.
use anyhow::Result;
use eeg_bandpower::drivers::GeneratorSource;
use eeg_bandpower::{BandPowerPipeline, SpectralConfig};
use log::info;
fn main() -> Result<()> {
    env_logger::init();
    let config = SpectralConfig {
        channels: 2,
        ..SpectralConfig::default()
    };
    info!(
        "fft {} @ {} Hz ({:.3} Hz/bin), window {:.2} s",
        config.fft_size,
        config.sample_rate_hz,
        config.resolution_hz(),
        config.window_seconds()
    );
    // Alpha-dominant first channel, beta-dominant second.
    let tones = vec![
        (vec![40.0, 5.0], vec![10.0, 22.0]),
        (vec![10.0, 30.0], vec![6.0, 18.0]),
    ];
    let source = GeneratorSource::new(&tones, config.sample_rate_hz, 4.0, 32)?;
    let mut pipeline = BandPowerPipeline::new(source, config)?;
    for window in pipeline.drain()? {
        for (label, powers) in window.channel_labels.iter().zip(&window.band_powers) {
            let relative = serde_json::to_string(&powers.relative())?;
            println!("window {} {label}: {relative}", window.index);
        }
    }
    info!("{} samples left in the open window", pipeline.pending_samples());
    Ok(())
}
