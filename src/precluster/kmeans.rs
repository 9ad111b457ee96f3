//! 1-D k-means over scalar values
//!
//! Small Lloyd-iteration clustering used by the `cluster` grouping
//! strategy. Centroids are seeded evenly across the value range,
//! which keeps the assignment deterministic for a given input.

/// Cluster scalar values into k groups, returning per-value labels
///
/// Labels are in 0..k. With fewer distinct values than clusters some
/// clusters simply stay empty; the assignment is still total.
pub fn kmeans_1d(values: &[f64], k: usize, max_iterations: usize) -> Vec<usize> {
    if values.is_empty() || k == 0 {
        return Vec::new();
    }
    if k == 1 {
        return vec![0; values.len()];
    }

    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    // Seed centroids evenly over the value range
    let mut centroids: Vec<f64> = (0..k)
        .map(|i| min + (max - min) * (i as f64 + 0.5) / k as f64)
        .collect();

    let mut assignment = vec![0usize; values.len()];

    for _ in 0..max_iterations {
        let mut changed = false;
        for (i, &v) in values.iter().enumerate() {
            let mut best = 0usize;
            let mut best_dist = f64::INFINITY;
            for (c, &centroid) in centroids.iter().enumerate() {
                let dist = (v - centroid).abs();
                if dist < best_dist {
                    best_dist = dist;
                    best = c;
                }
            }
            if assignment[i] != best {
                assignment[i] = best;
                changed = true;
            }
        }

        if !changed {
            break;
        }

        // Move each centroid to the mean of its members
        let mut sums = vec![0.0f64; k];
        let mut counts = vec![0usize; k];
        for (i, &v) in values.iter().enumerate() {
            sums[assignment[i]] += v;
            counts[assignment[i]] += 1;
        }
        for c in 0..k {
            if counts[c] > 0 {
                centroids[c] = sums[c] / counts[c] as f64;
            }
        }
    }

    assignment
}
