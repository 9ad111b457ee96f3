//! Region metadata scan command
//!
//! Scans the label stack, reports how many regions exist and
//! persists the region metadata snapshot for later runs.

use clap::ArgMatches;
use log::info;

use crate::commands::command_traits::Command;
use crate::config::PipelineConfig;
use crate::scanner;
use crate::utils::logger::Logger;
use crate::utils::pool::build_worker_pool;
use crate::volume::errors::{VolumeError, VolumeResult};
use crate::volume::slice::SliceStack;

/// Command scanning a label stack into region metadata
pub struct ScanCommand<'a> {
    /// Pipeline configuration
    config: PipelineConfig,
    /// Logger for recording operations
    logger: &'a Logger,
}

impl<'a> ScanCommand<'a> {
    /// Create a new scan command
    ///
    /// # Arguments
    /// * `args` - CLI argument matches from clap
    /// * `logger` - Logger for recording operations
    pub fn new(args: &ArgMatches, logger: &'a Logger) -> VolumeResult<Self> {
        let config_path = args
            .get_one::<String>("config")
            .ok_or_else(|| VolumeError::InvalidConfig("Missing config file path".to_string()))?;
        let config = PipelineConfig::load(config_path)?;
        Ok(ScanCommand { config, logger })
    }
}

impl<'a> Command for ScanCommand<'a> {
    fn execute(&self) -> VolumeResult<()> {
        let stack = SliceStack::discover(&self.config.label_dir, &self.config.file_extension)?;
        let pool = build_worker_pool(self.config.effective_workers())?;

        let records = scanner::scan_or_load(
            &stack,
            &self.config.snapshot_path,
            self.config.chunk_size,
            &pool,
        )?;

        info!(
            "{} regions recorded in snapshot {}",
            records.len(),
            self.config.snapshot_path
        );
        self.logger.log_line(&format!(
            "Scan summary: {} slices, {} regions",
            stack.len(),
            records.len()
        ))?;
        Ok(())
    }
}
