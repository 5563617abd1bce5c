//! Frequency-to-bar mapping for the visualizer.
//!
//! The audible range is partitioned into equal-width segments in log10 space
//! so every bar covers a perceptually similar span, then each bar averages
//! the amplitude bytes of the FFT bins its segment covers.

pub const MIN_FREQ: f32 = 20.0;
pub const MAX_FREQ: f32 = 20_000.0;

/// Bars sit here when nothing is playing (display units).
pub const REST_HEIGHT: f32 = 5.0;

const HEIGHT_SCALE: f32 = 0.15;
const HEIGHT_FLOOR: f32 = 3.0;

/// Height when every bin in a bar saturates; renderers normalize against it.
pub const MAX_HEIGHT: f32 = 255.0 * HEIGHT_SCALE + HEIGHT_FLOOR;

/// Bin index covering `freq`, for `bin_count` bins spanning
/// [0, sample_rate / 2].
pub fn freq_to_bin(freq: f32, bin_count: usize, sample_rate: u32) -> usize {
    ((freq * bin_count as f32) / sample_rate as f32).round() as usize
}

#[derive(Debug, Clone)]
pub struct BarSegment {
    pub freq_start: f32,
    pub freq_end: f32,
    pub start_bin: usize,
    pub end_bin: usize,
}

/// Precomputed per-bar bin ranges for one (bar_count, bin_count, sample_rate)
/// combination. Rebuilt only when the source sample rate changes.
#[derive(Debug, Clone)]
pub struct BarMapper {
    segments: Vec<BarSegment>,
    sample_rate: u32,
}

impl BarMapper {
    pub fn new(bar_count: usize, bin_count: usize, sample_rate: u32) -> Self {
        let sample_rate = sample_rate.max(1);
        let min_bin = freq_to_bin(MIN_FREQ, bin_count, sample_rate);
        let max_bin =
            freq_to_bin(MAX_FREQ, bin_count, sample_rate).min(bin_count.saturating_sub(1));

        let log_min = MIN_FREQ.log10();
        let log_range = MAX_FREQ.log10() - log_min;

        let mut segments = Vec::with_capacity(bar_count);
        for i in 0..bar_count {
            let freq_start = 10f32.powf(log_min + (i as f32 / bar_count as f32) * log_range);
            let freq_end = 10f32.powf(log_min + ((i + 1) as f32 / bar_count as f32) * log_range);
            let start_bin = freq_to_bin(freq_start, bin_count, sample_rate)
                .max(min_bin)
                .min(max_bin);
            let end_bin = freq_to_bin(freq_end, bin_count, sample_rate)
                .min(max_bin)
                .max(start_bin);
            segments.push(BarSegment {
                freq_start,
                freq_end,
                start_bin,
                end_bin,
            });
        }
        Self {
            segments,
            sample_rate,
        }
    }

    pub fn bar_count(&self) -> usize {
        self.segments.len()
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn segments(&self) -> &[BarSegment] {
        &self.segments
    }

    /// Bar heights in display units: mean amplitude over the bar's inclusive
    /// bin range, scaled and floored. A single-bin segment divides by one.
    pub fn heights(&self, data: &[u8]) -> Vec<f32> {
        if data.is_empty() {
            return self.rest();
        }
        self.segments
            .iter()
            .map(|seg| {
                let end = seg.end_bin.min(data.len() - 1);
                let start = seg.start_bin.min(end);
                let sum: u32 = data[start..=end].iter().map(|&b| b as u32).sum();
                let mean = sum as f32 / (end - start + 1) as f32;
                mean * HEIGHT_SCALE + HEIGHT_FLOOR
            })
            .collect()
    }

    pub fn rest(&self) -> Vec<f32> {
        vec![REST_HEIGHT; self.segments.len()]
    }
}
