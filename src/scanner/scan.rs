//! Region metadata scanner
//!
//! Scans a label slice stack and produces one record per label value,
//! summarizing its total voxel count and the slices it appears in.
//! Each worker holds at most one decoded slice at a time; the merged
//! mapping is built only on the coordinating thread by folding the
//! per-slice partial histograms, so no shared mutable state crosses
//! the pool.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use log::info;
use rayon::prelude::*;
use rayon::ThreadPool;

use crate::scanner::record::RegionRecord;
use crate::volume::errors::{VolumeError, VolumeResult};
use crate::volume::slice::SliceStack;

/// Scanner over a label slice stack
pub struct RegionScanner<'a> {
    /// Label slice stack to scan
    stack: &'a SliceStack,
    /// Number of slices dispatched per wave, bounding how many
    /// partial histograms are in flight at once (None = all at once)
    chunk_size: Option<usize>,
}

/// Partial result for one slice: label -> voxel count
type SliceHistogram = Vec<(u32, u64)>;

impl<'a> RegionScanner<'a> {
    /// Create a scanner over a label stack
    pub fn new(stack: &'a SliceStack) -> Self {
        RegionScanner {
            stack,
            chunk_size: None,
        }
    }

    /// Bound the number of slices scanned per dispatch wave
    pub fn with_chunk_size(mut self, chunk_size: Option<usize>) -> Self {
        self.chunk_size = chunk_size.filter(|c| *c > 0);
        self
    }

    /// Scan the whole stack into per-region records
    ///
    /// Records are returned sorted by id. The fold over worker
    /// results is commutative (counts sum, slice lists append and are
    /// sorted afterwards), so worker completion order never matters.
    pub fn scan(&self, pool: &ThreadPool) -> VolumeResult<Vec<RegionRecord>> {
        let total = self.stack.len();
        let wave = self.chunk_size.unwrap_or(total).max(1);
        let mut merged: BTreeMap<u32, RegionRecord> = BTreeMap::new();

        let mut start = 0usize;
        while start < total {
            let end = (start + wave).min(total);
            let indices: Vec<u32> = (start as u32..end as u32).collect();

            let partials: Vec<(u32, SliceHistogram)> = pool.install(|| {
                indices
                    .par_iter()
                    .map(|&idx| {
                        let histogram = self.slice_histogram(idx)?;
                        Ok((idx, histogram))
                    })
                    .collect::<VolumeResult<Vec<_>>>()
            })?;

            for (slice_index, histogram) in partials {
                for (label, count) in histogram {
                    merged
                        .entry(label)
                        .and_modify(|record| {
                            record.size += count;
                            record.slices.push(slice_index);
                        })
                        .or_insert_with(|| RegionRecord::new(label, count, slice_index));
                }
            }

            start = end;
        }

        let mut records: Vec<RegionRecord> = merged.into_values().collect();
        for record in &mut records {
            record.slices.sort_unstable();
        }

        info!("Scan found {} labeled regions over {} slices", records.len(), total);
        Ok(records)
    }

    /// Histogram of nonzero label values in one slice
    fn slice_histogram(&self, index: u32) -> VolumeResult<SliceHistogram> {
        let slice = self.stack.read_slice(index)?;

        let mut counts: BTreeMap<u32, u64> = BTreeMap::new();
        for &value in &slice.data {
            // Label 0 is reserved background
            if value == 0 {
                continue;
            }
            *counts.entry(value).or_insert(0) += 1;
        }

        Ok(counts.into_iter().collect())
    }
}

/// Persist scanned records as a JSON snapshot
pub fn save_snapshot(records: &[RegionRecord], path: &str) -> VolumeResult<()> {
    let json = serde_json::to_string(records)
        .map_err(|e| VolumeError::SnapshotError(e.to_string()))?;
    fs::write(path, json)?;
    info!("Saved region metadata snapshot to {}", path);
    Ok(())
}

/// Load records from a JSON snapshot
pub fn load_snapshot(path: &str) -> VolumeResult<Vec<RegionRecord>> {
    let json = fs::read_to_string(path)?;
    serde_json::from_str(&json).map_err(|e| VolumeError::SnapshotError(e.to_string()))
}

/// True when a snapshot file exists and is nonempty
///
/// Snapshot invalidation is the caller's responsibility; this only
/// rejects missing or truncated-to-empty files.
pub fn snapshot_usable(path: &str) -> bool {
    match fs::metadata(Path::new(path)) {
        Ok(meta) => meta.is_file() && meta.len() > 0,
        Err(_) => false,
    }
}

/// Load the snapshot when usable, otherwise rescan and persist
pub fn scan_or_load(
    stack: &SliceStack,
    snapshot_path: &str,
    chunk_size: Option<usize>,
    pool: &ThreadPool,
) -> VolumeResult<Vec<RegionRecord>> {
    if snapshot_usable(snapshot_path) {
        info!("Using region metadata snapshot {}", snapshot_path);
        return load_snapshot(snapshot_path);
    }

    let records = RegionScanner::new(stack)
        .with_chunk_size(chunk_size)
        .scan(pool)?;
    save_snapshot(&records, snapshot_path)?;
    Ok(records)
}
