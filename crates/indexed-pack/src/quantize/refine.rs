//! Perceptual k-means refinement of a cluster assignment.

use super::centroid::ColorSum;
use super::histogram::HistogramEntry;
use crate::color::PerceptualColor;

/// Run up to `iterations` rounds of nearest-center reassignment.
///
/// Each round computes the alpha-weighted mean of every cluster, then moves
/// every entry to the closest mean (lowest cluster id on ties). A cluster
/// that ends up empty is reseeded with the entry that contributes the most
/// weighted error, so the cluster count never shrinks. Stops early once an
/// assignment repeats.
pub(crate) fn refine(
    entries: &[HistogramEntry],
    mut assignment: Vec<usize>,
    clusters: usize,
    iterations: usize,
) -> Vec<usize> {
    if clusters < 2 {
        return assignment;
    }
    let points: Vec<PerceptualColor> = entries
        .iter()
        .map(|entry| PerceptualColor::from(entry.color))
        .collect();

    for _ in 0..iterations {
        let sums = cluster_sums(entries, &assignment, clusters);
        let centers: Vec<Option<PerceptualColor>> = sums
            .iter()
            .map(|sum| (sum.count() > 0).then(|| PerceptualColor::from(sum.mean())))
            .collect();

        let mut next = Vec::with_capacity(points.len());
        let mut errors = Vec::with_capacity(points.len());
        for point in &points {
            let (cluster, distance) = nearest(point, &centers);
            next.push(cluster);
            errors.push(distance);
        }
        reseed_empty(entries, &mut next, &errors, clusters);

        if next == assignment {
            break;
        }
        assignment = next;
    }
    assignment
}

/// Per-cluster color sums for an assignment.
pub(crate) fn cluster_sums(
    entries: &[HistogramEntry],
    assignment: &[usize],
    clusters: usize,
) -> Vec<ColorSum> {
    let mut sums = vec![ColorSum::default(); clusters];
    for (entry, &cluster) in entries.iter().zip(assignment) {
        sums[cluster].add(entry.color, entry.count);
    }
    sums
}

fn nearest(point: &PerceptualColor, centers: &[Option<PerceptualColor>]) -> (usize, f32) {
    let mut best = (0, f32::INFINITY);
    for (cluster, center) in centers.iter().enumerate() {
        if let Some(center) = center {
            let distance = point.distance_squared(*center);
            if distance < best.1 {
                best = (cluster, distance);
            }
        }
    }
    best
}

fn reseed_empty(
    entries: &[HistogramEntry],
    assignment: &mut [usize],
    errors: &[f32],
    clusters: usize,
) {
    let mut sizes = vec![0usize; clusters];
    for &cluster in assignment.iter() {
        sizes[cluster] += 1;
    }
    let mut moved = vec![false; assignment.len()];

    for empty in 0..clusters {
        if sizes[empty] > 0 {
            continue;
        }
        let mut donor: Option<(usize, f32)> = None;
        for (index, &cluster) in assignment.iter().enumerate() {
            if moved[index] || sizes[cluster] < 2 {
                continue;
            }
            let weighted = errors[index] * entries[index].count as f32;
            if donor.map_or(true, |(_, top)| weighted > top) {
                donor = Some((index, weighted));
            }
        }
        let Some((index, _)) = donor else {
            return;
        };
        sizes[assignment[index]] -= 1;
        assignment[index] = empty;
        sizes[empty] = 1;
        moved[index] = true;
    }
}
