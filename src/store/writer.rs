//! Batched, resumable store population
//!
//! Drives extraction over the filtered region list in fixed-size
//! batches: each batch is extracted in parallel on the worker pool
//! and written back by the coordinator at `batch_start + j`, the
//! result's declared position. Pool dispatch guarantees positional
//! input/output correspondence but not completion order, so results
//! are never appended as they arrive. A batch failure aborts the
//! whole run; a partially written, misindexed store would be worse
//! than a clean abort.

use log::{error, info};
use rayon::prelude::*;
use rayon::ThreadPool;

use crate::extractor::locate::ExtentSource;
use crate::extractor::resample::extract_sample;
use crate::scanner::record::RegionRecord;
use crate::store::array_store::ArrayStore;
use crate::utils::progress::ProgressTracker;
use crate::volume::errors::{VolumeError, VolumeResult};

/// Extraction driver settings
#[derive(Debug, Clone)]
pub struct WriterSettings {
    /// Regions survive only with lower_limit < size (strict)
    pub lower_limit: u64,
    /// Regions survive only with size < upper_limit (strict)
    pub upper_limit: u64,
    /// Optional cap on the filtered region count
    pub region_limit: Option<usize>,
    /// Target per-sample volume shape (depth, height, width)
    pub target: (u32, u32, u32),
    /// Worker count of the pool
    pub workers: usize,
    /// Batch size multiplier: one batch is workers * batch_factor
    pub batch_factor: usize,
}

impl WriterSettings {
    /// Regions per parallel batch
    pub fn batch_size(&self) -> usize {
        (self.workers * self.batch_factor).max(1)
    }
}

/// Writer populating an array store from scanned regions
pub struct StoreWriter {
    settings: WriterSettings,
}

impl StoreWriter {
    /// Create a writer with the given settings
    pub fn new(settings: WriterSettings) -> Self {
        StoreWriter { settings }
    }

    /// Apply the size filter and the optional region cap
    ///
    /// Both bounds are strict; a region whose size equals either
    /// limit is dropped. The cap truncates after filtering, and the
    /// upstream order is preserved throughout so the surviving list
    /// defines the store index assignment.
    pub fn filter_regions(&self, records: &[RegionRecord]) -> Vec<RegionRecord> {
        let mut filtered: Vec<RegionRecord> = records
            .iter()
            .filter(|r| r.size > self.settings.lower_limit && r.size < self.settings.upper_limit)
            .cloned()
            .collect();

        info!(
            "{} of {} regions within limits {} and {}",
            filtered.len(),
            records.len(),
            self.settings.lower_limit,
            self.settings.upper_limit
        );

        if let Some(limit) = self.settings.region_limit {
            if filtered.len() > limit {
                filtered.truncate(limit);
                info!("{} regions kept due to region limit", limit);
            }
        }

        filtered
    }

    /// Populate the store at a path from the scanned region list
    ///
    /// In append mode an existing store is reopened and extraction
    /// resumes at the first slot whose content is entirely zero;
    /// otherwise a fresh store sized to the filtered count is
    /// created. Returns the number of samples written in this run.
    pub fn run<L: ExtentSource>(
        &self,
        records: &[RegionRecord],
        locator: &L,
        store_path: &str,
        append: bool,
        pool: &ThreadPool,
    ) -> VolumeResult<u64> {
        let filtered = self.filter_regions(records);
        let total = filtered.len() as u64;

        let (mut store, start) = if append && ArrayStore::exists(store_path) {
            let mut store = ArrayStore::open(store_path)?;
            if store.target() != self.settings.target {
                return Err(VolumeError::StoreShapeMismatch(
                    self.settings.target,
                    store.target(),
                ));
            }
            if store.len() != total {
                return Err(VolumeError::GenericError(format!(
                    "Store {} holds {} slots but the filtered region list has {}",
                    store_path,
                    store.len(),
                    total
                )));
            }
            let resume = store.first_unwritten()?.unwrap_or(total);
            info!("Resuming extraction at index {} of {}", resume, total);
            (store, resume)
        } else {
            (
                ArrayStore::create(store_path, total, self.settings.target)?,
                0,
            )
        };

        if start >= total {
            info!("Store {} already complete, nothing to extract", store_path);
            return Ok(0);
        }

        let batch_size = self.settings.batch_size();
        let progress = ProgressTracker::new(total - start, "Extracting regions");
        let mut written = 0u64;

        let mut offset = start as usize;
        while offset < filtered.len() {
            let end = (offset + batch_size).min(filtered.len());
            let batch = &filtered[offset..end];

            // One batch's worth of volumes in memory at most
            let samples = pool
                .install(|| {
                    batch
                        .par_iter()
                        .map(|record| {
                            let extent = locator.locate(record)?;
                            Ok(extract_sample(record.id, &extent, self.settings.target))
                        })
                        .collect::<VolumeResult<Vec<_>>>()
                })
                .map_err(|e| {
                    error!("Extraction batch at offset {} failed: {}", offset, e);
                    VolumeError::BatchFailed(offset as u64, e.to_string())
                })?;

            // Write by declared position, never completion order
            for (j, sample) in samples.iter().enumerate() {
                store.write_sample((offset + j) as u64, sample)?;
            }

            written += samples.len() as u64;
            progress.increment(samples.len() as u64);
            offset = end;
        }

        progress.finish();
        info!("Wrote {} samples to {}", written, store_path);
        Ok(written)
    }
}
