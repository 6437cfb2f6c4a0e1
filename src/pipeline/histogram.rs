use std::collections::BTreeMap;

use crate::color::Color;
use crate::config::FilterConfig;
use crate::pipeline::source::PixelSample;

/// Significant bits kept per channel when bucketing.
pub const QUANTIZE_BITS: u32 = 5;
const SHIFT: u32 = 8 - QUANTIZE_BITS;

/// A color truncated to [`QUANTIZE_BITS`] per channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct QuantizedColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl QuantizedColor {
    pub fn from_sample(p: &PixelSample) -> Self {
        Self {
            r: p.r >> SHIFT,
            g: p.g >> SHIFT,
            b: p.b >> SHIFT,
        }
    }
}

/// One histogram bucket. Besides the count it keeps the full-precision channel
/// sums so that averages are not biased by truncation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HistogramEntry {
    pub key: QuantizedColor,
    pub population: u64,
    pub sum_r: u64,
    pub sum_g: u64,
    pub sum_b: u64,
}

impl HistogramEntry {
    fn new(key: QuantizedColor) -> Self {
        Self {
            key,
            population: 0,
            sum_r: 0,
            sum_g: 0,
            sum_b: 0,
        }
    }

    fn add(&mut self, p: &PixelSample) {
        self.population += 1;
        self.sum_r += u64::from(p.r);
        self.sum_g += u64::from(p.g);
        self.sum_b += u64::from(p.b);
    }
}

/// Rounded mean of channel sums over `count` pixels.
pub(crate) fn mean_color(sums: [u64; 3], count: u64) -> Color {
    let n = count.max(1);
    let mean = |s: u64| u8::try_from((s + n / 2) / n).unwrap_or(u8::MAX);
    Color::new(mean(sums[0]), mean(sums[1]), mean(sums[2]))
}

/// Bucketed pixel counts in ascending key order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Histogram {
    pub entries: Vec<HistogramEntry>,
    /// Samples rejected by the filter.
    pub filtered: usize,
}

impl Histogram {
    pub fn total_population(&self) -> u64 {
        self.entries.iter().map(|e| e.population).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FilterConfig {
    /// Whether a raw pixel should be excluded from the histogram.
    pub fn rejects(&self, p: &PixelSample) -> bool {
        let is_transparent = p.a < self.min_alpha;
        let is_white =
            p.r >= self.white_threshold && p.g >= self.white_threshold && p.b >= self.white_threshold;
        let is_black =
            p.r <= self.black_threshold && p.g <= self.black_threshold && p.b <= self.black_threshold;
        is_transparent || is_white || is_black
    }
}

/// Filter and bucket the samples.
pub fn build_histogram(samples: &[PixelSample], filter: &FilterConfig) -> Histogram {
    let mut buckets: BTreeMap<QuantizedColor, HistogramEntry> = BTreeMap::new();
    let mut filtered = 0;

    for p in samples {
        if filter.rejects(p) {
            filtered += 1;
            continue;
        }
        let key = QuantizedColor::from_sample(p);
        buckets
            .entry(key)
            .or_insert_with(|| HistogramEntry::new(key))
            .add(p);
    }

    log::debug!(
        "histogram: {} buckets from {} samples ({} filtered)",
        buckets.len(),
        samples.len(),
        filtered
    );

    Histogram {
        entries: buckets.into_values().collect(),
        filtered,
    }
}
