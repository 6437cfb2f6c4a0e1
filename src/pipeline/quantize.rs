use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

use crate::pipeline::histogram::{mean_color, Histogram, HistogramEntry};
use crate::swatch::Swatch;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Channel {
    Red,
    Green,
    Blue,
}

/// A histogram entry tagged with its position in the original histogram.
#[derive(Debug, Clone, Copy)]
struct Member {
    order: usize,
    entry: HistogramEntry,
}

impl Member {
    fn channel(&self, channel: Channel) -> u8 {
        match channel {
            Channel::Red => self.entry.key.r,
            Channel::Green => self.entry.key.g,
            Channel::Blue => self.entry.key.b,
        }
    }
}

/// A partition of the histogram. Owned by the worklist; splitting consumes it.
#[derive(Debug)]
struct ColorBox {
    /// Creation sequence number, used for tie-breaks and output order.
    seq: usize,
    members: Vec<Member>,
    population: u64,
    min: [u8; 3],
    max: [u8; 3],
}

impl ColorBox {
    fn new(seq: usize, members: Vec<Member>) -> Self {
        let mut min = [u8::MAX; 3];
        let mut max = [u8::MIN; 3];
        let mut population = 0;
        for m in &members {
            let key = [m.entry.key.r, m.entry.key.g, m.entry.key.b];
            for i in 0..3 {
                min[i] = min[i].min(key[i]);
                max[i] = max[i].max(key[i]);
            }
            population += m.entry.population;
        }
        Self {
            seq,
            members,
            population,
            min,
            max,
        }
    }

    fn can_split(&self) -> bool {
        self.members.len() > 1
    }

    /// Widest channel; ties resolve red, then green, then blue.
    fn longest_channel(&self) -> Channel {
        let r = self.max[0] - self.min[0];
        let g = self.max[1] - self.min[1];
        let b = self.max[2] - self.min[2];
        if r >= g && r >= b {
            Channel::Red
        } else if g >= b {
            Channel::Green
        } else {
            Channel::Blue
        }
    }

    /// Split at the population-weighted median of the longest channel.
    /// Both halves are non-empty.
    fn split(mut self, left_seq: usize, right_seq: usize) -> (ColorBox, ColorBox) {
        let channel = self.longest_channel();
        self.members
            .sort_by_key(|m| (m.channel(channel), m.order));

        let mut cumulative = 0u64;
        let mut split_at = self.members.len() - 1;
        for (i, m) in self.members.iter().enumerate() {
            cumulative += m.entry.population;
            if cumulative * 2 >= self.population {
                split_at = i + 1;
                break;
            }
        }
        let split_at = split_at.clamp(1, self.members.len() - 1);

        let right = self.members.split_off(split_at);
        (
            ColorBox::new(left_seq, self.members),
            ColorBox::new(right_seq, right),
        )
    }

    fn into_swatch(self) -> Swatch {
        let mut sum = [0u64; 3];
        for m in &self.members {
            sum[0] += m.entry.sum_r;
            sum[1] += m.entry.sum_g;
            sum[2] += m.entry.sum_b;
        }
        Swatch::new(mean_color(sum, self.population), self.population)
    }
}

/// Heap ordering: greatest population first, then earliest created.
impl Ord for ColorBox {
    fn cmp(&self, other: &Self) -> Ordering {
        self.population
            .cmp(&other.population)
            .then_with(|| Reverse(self.seq).cmp(&Reverse(other.seq)))
    }
}

impl PartialOrd for ColorBox {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for ColorBox {
    fn eq(&self, other: &Self) -> bool {
        self.seq == other.seq
    }
}

impl Eq for ColorBox {}

/// Median-cut the histogram into at most `max_colors` swatches.
///
/// Swatches come out in box creation order. Their populations sum to the
/// histogram's total population.
pub fn quantize(histogram: &Histogram, max_colors: usize) -> Vec<Swatch> {
    if histogram.is_empty() || max_colors == 0 {
        return Vec::new();
    }

    let members: Vec<Member> = histogram
        .entries
        .iter()
        .enumerate()
        .map(|(order, entry)| Member {
            order,
            entry: *entry,
        })
        .collect();

    let mut next_seq = 0;
    let root = ColorBox::new(next_seq, members);
    next_seq += 1;

    let mut pending: BinaryHeap<ColorBox> = BinaryHeap::new();
    let mut done: Vec<ColorBox> = Vec::new();
    if root.can_split() {
        pending.push(root);
    } else {
        done.push(root);
    }

    let mut splits = 0;
    while pending.len() + done.len() < max_colors {
        let Some(parent) = pending.pop() else {
            break;
        };
        let (left, right) = parent.split(next_seq, next_seq + 1);
        next_seq += 2;
        splits += 1;
        for child in [left, right] {
            if child.can_split() {
                pending.push(child);
            } else {
                done.push(child);
            }
        }
    }
    log::debug!("median cut: {splits} splits, {} boxes", pending.len() + done.len());

    let mut boxes: Vec<ColorBox> = done.into_iter().chain(pending).collect();
    boxes.sort_by_key(|b| b.seq);
    boxes.into_iter().map(ColorBox::into_swatch).collect()
}
