//! Size-stratified grouping of regions
//!
//! Partitions region ids into buckets of comparable size so that
//! downstream sampling can stratify over them. Two interchangeable
//! strategies: a deterministic percentile-style split over the
//! descending size order, and a 1-D k-means clustering over the raw
//! sizes.

pub mod kmeans;
#[cfg(test)]
mod tests;

use log::info;

use crate::precluster::kmeans::kmeans_1d;
use crate::scanner::record::RegionRecord;
use crate::volume::errors::{VolumeError, VolumeResult};

/// Iteration cap for the k-means strategy
const KMEANS_MAX_ITERATIONS: usize = 100;

/// Grouping strategy selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupStrategy {
    /// Sort by size descending, split into contiguous chunks
    Simple,
    /// 1-D k-means over the size values
    Cluster,
}

impl GroupStrategy {
    /// Parse a strategy from its configuration string
    pub fn parse(value: &str) -> VolumeResult<Self> {
        match value {
            "simple" => Ok(GroupStrategy::Simple),
            "cluster" => Ok(GroupStrategy::Cluster),
            other => Err(VolumeError::InvalidConfig(format!(
                "Unknown grouping strategy '{}'. Expected 'simple' or 'cluster'",
                other
            ))),
        }
    }
}

/// Partition region ids into n_groups buckets by size
///
/// Every input id lands in exactly one bucket; bucket sizes may be
/// unequal, especially under the cluster strategy.
pub fn group_regions(
    records: &[RegionRecord],
    strategy: GroupStrategy,
    n_groups: usize,
) -> VolumeResult<Vec<Vec<u32>>> {
    if n_groups == 0 {
        return Err(VolumeError::InvalidConfig(
            "Group count must be at least 1".to_string(),
        ));
    }

    let buckets = match strategy {
        GroupStrategy::Simple => group_simple(records, n_groups),
        GroupStrategy::Cluster => group_cluster(records, n_groups),
    };

    info!(
        "Grouped {} regions into {} buckets ({:?})",
        records.len(),
        buckets.len(),
        strategy
    );
    Ok(buckets)
}

/// Descending size sort, split into nearly-equal contiguous chunks
///
/// The first `len % n_groups` chunks take one extra element, the
/// same split an even array partition produces.
fn group_simple(records: &[RegionRecord], n_groups: usize) -> Vec<Vec<u32>> {
    let mut by_size: Vec<(u32, u64)> = records.iter().map(|r| (r.id, r.size)).collect();
    by_size.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));

    let base = by_size.len() / n_groups;
    let remainder = by_size.len() % n_groups;

    let mut buckets = Vec::with_capacity(n_groups);
    let mut cursor = 0usize;
    for g in 0..n_groups {
        let chunk = base + usize::from(g < remainder);
        let ids = by_size[cursor..cursor + chunk]
            .iter()
            .map(|(id, _)| *id)
            .collect();
        buckets.push(ids);
        cursor += chunk;
    }
    buckets
}

/// Cluster membership over the raw size values
fn group_cluster(records: &[RegionRecord], n_groups: usize) -> Vec<Vec<u32>> {
    let sizes: Vec<f64> = records.iter().map(|r| r.size as f64).collect();
    let assignment = kmeans_1d(&sizes, n_groups, KMEANS_MAX_ITERATIONS);

    let mut buckets = vec![Vec::new(); n_groups];
    for (record, &bucket) in records.iter().zip(assignment.iter()) {
        buckets[bucket].push(record.id);
    }
    buckets
}
