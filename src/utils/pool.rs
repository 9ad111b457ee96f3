//! Worker pool construction

use rayon::{ThreadPool, ThreadPoolBuilder};

use crate::volume::errors::{VolumeError, VolumeResult};

/// Build a fixed-size worker pool
///
/// All parallel phases run on one explicitly sized pool rather than
/// the implicit global one, so the configured worker count is honored
/// everywhere.
pub fn build_worker_pool(workers: usize) -> VolumeResult<ThreadPool> {
    ThreadPoolBuilder::new()
        .num_threads(workers.max(1))
        .build()
        .map_err(|e| VolumeError::GenericError(format!("Cannot build worker pool: {}", e)))
}
