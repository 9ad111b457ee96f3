//! Size-bucket grouping command
//!
//! Partitions the scanned regions into size buckets for stratified
//! sampling and prints the bucket summary.

use clap::ArgMatches;
use log::info;

use crate::commands::command_traits::Command;
use crate::config::PipelineConfig;
use crate::precluster::group_regions;
use crate::scanner;
use crate::utils::logger::Logger;
use crate::utils::pool::build_worker_pool;
use crate::volume::errors::{VolumeError, VolumeResult};
use crate::volume::slice::SliceStack;

/// Command grouping regions into size buckets
pub struct GroupCommand<'a> {
    /// Pipeline configuration
    config: PipelineConfig,
    /// Logger for recording operations
    logger: &'a Logger,
}

impl<'a> GroupCommand<'a> {
    /// Create a new group command
    ///
    /// # Arguments
    /// * `args` - CLI argument matches from clap
    /// * `logger` - Logger for recording operations
    pub fn new(args: &ArgMatches, logger: &'a Logger) -> VolumeResult<Self> {
        let config_path = args
            .get_one::<String>("config")
            .ok_or_else(|| VolumeError::InvalidConfig("Missing config file path".to_string()))?;
        let config = PipelineConfig::load(config_path)?;
        Ok(GroupCommand { config, logger })
    }
}

impl<'a> Command for GroupCommand<'a> {
    fn execute(&self) -> VolumeResult<()> {
        let stack = SliceStack::discover(&self.config.label_dir, &self.config.file_extension)?;
        let pool = build_worker_pool(self.config.effective_workers())?;

        let records = scanner::scan_or_load(
            &stack,
            &self.config.snapshot_path,
            self.config.chunk_size,
            &pool,
        )?;

        let strategy = self.config.strategy()?;
        let buckets = group_regions(&records, strategy, self.config.n_groups)?;

        for (i, bucket) in buckets.iter().enumerate() {
            info!("Bucket {}: {} regions", i, bucket.len());
            self.logger
                .log_line(&format!("Bucket {}: {:?}", i, bucket))?;
        }
        Ok(())
    }
}
