use super::constants::{BASS_BINS, MID_BINS, TREBLE_BINS};

/// Bass/mid/treble levels in `[0, 1]`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct BandLevels {
    pub bass: f32,
    pub mid: f32,
    pub treble: f32,
}

/// Average of `data[start..end]` scaled to `[0, 1]`. The divisor is the
/// nominal band width, so bins past the end of `data` count as silence.
#[inline]
pub fn band_level(data: &[u8], (start, end): (usize, usize)) -> f32 {
    let width = end.saturating_sub(start);
    if width == 0 {
        return 0.0;
    }
    let lo = start.min(data.len());
    let hi = end.min(data.len());
    let sum: u32 = data[lo..hi].iter().map(|&b| b as u32).sum();
    (sum as f32 / width as f32 / 255.0).clamp(0.0, 1.0)
}

pub fn band_levels(data: &[u8]) -> BandLevels {
    BandLevels {
        bass: band_level(data, BASS_BINS),
        mid: band_level(data, MID_BINS),
        treble: band_level(data, TREBLE_BINS),
    }
}
