//! Population-weighted median cut over a color histogram.

use super::histogram::HistogramEntry;

/// A set of histogram entries with their bounding ranges.
#[derive(Debug, Clone)]
struct ColorBox {
    members: Vec<usize>,
    population: u64,
    ranges: [u8; 4],
}

impl ColorBox {
    fn new(members: Vec<usize>, entries: &[HistogramEntry]) -> Self {
        let mut low = [u8::MAX; 4];
        let mut high = [u8::MIN; 4];
        let mut population = 0u64;
        for &member in &members {
            let entry = &entries[member];
            population += entry.count as u64;
            for channel in 0..4 {
                let value = entry.color.channel(channel);
                low[channel] = low[channel].min(value);
                high[channel] = high[channel].max(value);
            }
        }
        let ranges = std::array::from_fn(|channel| high[channel].saturating_sub(low[channel]));
        Self {
            members,
            population,
            ranges,
        }
    }

    /// Channel with the widest range; R, G, B, A order on ties.
    fn widest_channel(&self) -> usize {
        let mut best = 0;
        for channel in 1..4 {
            if self.ranges[channel] > self.ranges[best] {
                best = channel;
            }
        }
        best
    }

    /// Split priority. Zero means the box cannot be split.
    fn score(&self) -> u64 {
        if self.members.len() < 2 {
            return 0;
        }
        self.ranges[self.widest_channel()] as u64 * self.population
    }

    /// Split at the population median along the widest channel.
    fn split(mut self, entries: &[HistogramEntry]) -> (ColorBox, ColorBox) {
        let channel = self.widest_channel();
        // Stable, so equal values keep first-occurrence order.
        self.members
            .sort_by_key(|&member| entries[member].color.channel(channel));

        let half = self.population.div_ceil(2);
        let mut running = 0u64;
        let mut cut = self.members.len();
        for (position, &member) in self.members.iter().enumerate() {
            running += entries[member].count as u64;
            if running >= half {
                cut = position + 1;
                break;
            }
        }
        let cut = cut.clamp(1, self.members.len() - 1);

        let upper = self.members.split_off(cut);
        (
            ColorBox::new(self.members, entries),
            ColorBox::new(upper, entries),
        )
    }
}

/// Partition `entries` into at most `max_boxes` clusters.
///
/// Returns the cluster id of every entry together with the number of
/// clusters. The box with the highest score is split next, the earliest
/// box winning ties, until the target is reached or nothing is splittable.
pub(crate) fn median_cut(entries: &[HistogramEntry], max_boxes: usize) -> (Vec<usize>, usize) {
    if entries.is_empty() || max_boxes == 0 {
        return (Vec::new(), 0);
    }

    let mut boxes = vec![ColorBox::new((0..entries.len()).collect(), entries)];
    while boxes.len() < max_boxes {
        let mut best: Option<(usize, u64)> = None;
        for (position, color_box) in boxes.iter().enumerate() {
            let score = color_box.score();
            if score > 0 && best.map_or(true, |(_, top)| score > top) {
                best = Some((position, score));
            }
        }
        let Some((position, _)) = best else {
            break;
        };

        let (lower, upper) = boxes.remove(position).split(entries);
        boxes.insert(position, upper);
        boxes.insert(position, lower);
    }

    let mut assignment = vec![0; entries.len()];
    for (cluster, color_box) in boxes.iter().enumerate() {
        for &member in &color_box.members {
            assignment[member] = cluster;
        }
    }
    (assignment, boxes.len())
}
