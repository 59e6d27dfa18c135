//! Frequency bands and band-power averaging over a PSD.
//!
//! A band maps to PSD bins with `start = ceil(low / rate * size)` and
//! `end = floor(high / rate * size)`; the power is the mean of the bins in
//! `start..=end`. Changing that rounding changes every reported number.
use std::collections::BTreeMap;
use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;
use serde::{Deserialize, Serialize};
use crate::drivers::SpectralError;
/// Named EEG rhythms.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EegBand {
    Delta,
    Theta,
    Alpha,
    Mu,
    Smr,
    LowBeta,
    Beta,
    HighBeta,
    Gamma,
}
impl EegBand {
    pub const ALL: [EegBand; 9] = [
        EegBand::Delta,
        EegBand::Theta,
        EegBand::Alpha,
        EegBand::Mu,
        EegBand::Smr,
        EegBand::LowBeta,
        EegBand::Beta,
        EegBand::HighBeta,
        EegBand::Gamma,
    ];
    /// `(low_hz, high_hz)` for this rhythm.
    pub const fn range_hz(self) -> (f32, f32) {
        match self {
            EegBand::Delta => (1.0, 3.0),
            EegBand::Theta => (4.0, 7.0),
            EegBand::Alpha => (7.5, 12.5),
            EegBand::Mu => (7.5, 12.5),
            EegBand::Smr => (12.5, 15.5),
            EegBand::LowBeta => (12.5, 16.0),
            EegBand::Beta => (16.5, 20.0),
            EegBand::HighBeta => (20.5, 28.0),
            EegBand::Gamma => (30.0, 45.0),
        }
    }
    pub const fn name(self) -> &'static str {
        match self {
            EegBand::Delta => "delta",
            EegBand::Theta => "theta",
            EegBand::Alpha => "alpha",
            EegBand::Mu => "mu",
            EegBand::Smr => "smr",
            EegBand::LowBeta => "lowbeta",
            EegBand::Beta => "beta",
            EegBand::HighBeta => "highbeta",
            EegBand::Gamma => "gamma",
        }
    }
    pub const fn frequency_band(self) -> FrequencyBand {
        let (low_hz, high_hz) = self.range_hz();
        FrequencyBand { low_hz, high_hz }
    }
}
impl fmt::Display for EegBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
impl FromStr for EegBand {
    type Err = SpectralError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EegBand::ALL
            .into_iter()
            .find(|band| band.name() == s)
            .ok_or_else(|| SpectralError::UnknownBand(s.to_owned()))
    }
}
/// Explicit `[low_hz, high_hz)` range with `0 <= low_hz < high_hz`, both finite.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawBand", into = "RawBand")]
pub struct FrequencyBand {
    low_hz: f32,
    high_hz: f32,
}
impl FrequencyBand {
    pub fn new(low_hz: f32, high_hz: f32) -> Result<Self, SpectralError> {
        if !is_valid_range(low_hz, high_hz) {
            return Err(SpectralError::InvalidBand { low_hz, high_hz });
        }
        Ok(Self { low_hz, high_hz })
    }
    pub fn low_hz(&self) -> f32 {
        self.low_hz
    }
    pub fn high_hz(&self) -> f32 {
        self.high_hz
    }
}
fn is_valid_range(low_hz: f32, high_hz: f32) -> bool {
    low_hz.is_finite() && high_hz.is_finite() && low_hz >= 0.0 && low_hz < high_hz
}
// Wire shape of `FrequencyBand`; deserialization goes through `new`.
#[derive(Clone, Copy, Serialize, Deserialize)]
struct RawBand {
    low_hz: f32,
    high_hz: f32,
}
impl TryFrom<RawBand> for FrequencyBand {
    type Error = SpectralError;
    fn try_from(raw: RawBand) -> Result<Self, Self::Error> {
        FrequencyBand::new(raw.low_hz, raw.high_hz)
    }
}
impl From<FrequencyBand> for RawBand {
    fn from(band: FrequencyBand) -> Self {
        RawBand {
            low_hz: band.low_hz,
            high_hz: band.high_hz,
        }
    }
}
impl TryFrom<[f32; 2]> for FrequencyBand {
    type Error = SpectralError;
    fn try_from([low_hz, high_hz]: [f32; 2]) -> Result<Self, Self::Error> {
        FrequencyBand::new(low_hz, high_hz)
    }
}
/// A band given either by name or by explicit range.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum BandSpec {
    Named(EegBand),
    Range(FrequencyBand),
}
impl BandSpec {
    pub fn resolve(self) -> FrequencyBand {
        match self {
            BandSpec::Named(band) => band.frequency_band(),
            BandSpec::Range(range) => range,
        }
    }
}
impl From<EegBand> for BandSpec {
    fn from(value: EegBand) -> Self {
        BandSpec::Named(value)
    }
}
impl From<FrequencyBand> for BandSpec {
    fn from(value: FrequencyBand) -> Self {
        BandSpec::Range(value)
    }
}
impl FromStr for BandSpec {
    type Err = SpectralError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<EegBand>().map(BandSpec::Named)
    }
}
/// Inclusive PSD bin range covered by `band`.
pub fn band_bins(
    size: usize,
    psd_len: usize,
    sample_rate_hz: f32,
    band: FrequencyBand,
) -> Result<RangeInclusive<usize>, SpectralError> {
    if !(sample_rate_hz > 0.0 && sample_rate_hz.is_finite()) {
        return Err(SpectralError::InvalidSampleRate);
    }
    if !is_valid_range(band.low_hz, band.high_hz) {
        return Err(SpectralError::InvalidBand {
            low_hz: band.low_hz,
            high_hz: band.high_hz,
        });
    }
    let bins_per_hz = size as f64 / f64::from(sample_rate_hz);
    let start = (f64::from(band.low_hz) * bins_per_hz).ceil() as i64;
    let end = (f64::from(band.high_hz) * bins_per_hz).floor() as i64;
    if end < start {
        return Err(SpectralError::EmptyBandRange { start, end });
    }
    if start < 0 || end >= psd_len as i64 {
        return Err(SpectralError::BandOutOfBounds {
            start,
            end,
            len: psd_len,
        });
    }
    Ok(start as usize..=end as usize)
}
/// Mean PSD magnitude inside `band`.
pub fn band_power(
    size: usize,
    psd: &[f32],
    sample_rate_hz: f32,
    band: impl Into<BandSpec>,
) -> Result<f32, SpectralError> {
    let spec: BandSpec = band.into();
    let bins = band_bins(size, psd.len(), sample_rate_hz, spec.resolve())?;
    let selected = &psd[bins];
    Ok(selected.iter().sum::<f32>() / selected.len() as f32)
}
/// String-keyed variant of [`band_power`].
pub fn band_power_by_name(
    size: usize,
    psd: &[f32],
    sample_rate_hz: f32,
    name: &str,
) -> Result<f32, SpectralError> {
    band_power(size, psd, sample_rate_hz, name.parse::<BandSpec>()?)
}
/// Power of every band in `bands`; fails on the first band that doesn't fit.
pub fn band_powers(
    size: usize,
    psd: &[f32],
    sample_rate_hz: f32,
    bands: &[EegBand],
) -> Result<BandPowers, SpectralError> {
    let mut powers = BandPowers::default();
    for &band in bands {
        powers.insert(band, band_power(size, psd, sample_rate_hz, band)?);
    }
    Ok(powers)
}
/// Band -> mean power, ordered by band.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct BandPowers {
    powers: BTreeMap<EegBand, f32>,
}
impl BandPowers {
    pub fn insert(&mut self, band: EegBand, power: f32) {
        self.powers.insert(band, power);
    }
    pub fn get(&self, band: EegBand) -> Option<f32> {
        self.powers.get(&band).copied()
    }
    pub fn iter(&self) -> impl Iterator<Item = (EegBand, f32)> + '_ {
        self.powers.iter().map(|(band, power)| (*band, *power))
    }
    pub fn len(&self) -> usize {
        self.powers.len()
    }
    pub fn is_empty(&self) -> bool {
        self.powers.is_empty()
    }
    pub fn total(&self) -> f32 {
        self.powers.values().sum()
    }
    /// Each power divided by the total; all zeros when the total is zero.
    pub fn relative(&self) -> BandPowers {
        let total = self.total();
        let powers = self
            .powers
            .iter()
            .map(|(band, power)| {
                let share = if total > 0.0 { power / total } else { 0.0 };
                (*band, share)
            })
            .collect();
        BandPowers { powers }
    }
}
