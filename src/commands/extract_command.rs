//! Sample extraction command
//!
//! Runs the full extraction pipeline: scan (or reuse the snapshot),
//! filter by size, extract every surviving region in parallel batches
//! and populate the sample store.

use clap::ArgMatches;
use log::info;

use crate::commands::command_traits::Command;
use crate::config::PipelineConfig;
use crate::extractor::locate::RegionLocator;
use crate::scanner;
use crate::store::writer::{StoreWriter, WriterSettings};
use crate::utils::logger::Logger;
use crate::utils::pool::build_worker_pool;
use crate::volume::errors::{VolumeError, VolumeResult};
use crate::volume::slice::SliceStack;

/// Command extracting the sample store from a scanned dataset
pub struct ExtractCommand<'a> {
    /// Pipeline configuration
    config: PipelineConfig,
    /// Whether to resume an existing store instead of recreating it
    append: bool,
    /// Logger for recording operations
    logger: &'a Logger,
}

impl<'a> ExtractCommand<'a> {
    /// Create a new extract command
    ///
    /// # Arguments
    /// * `args` - CLI argument matches from clap
    /// * `logger` - Logger for recording operations
    pub fn new(args: &ArgMatches, logger: &'a Logger) -> VolumeResult<Self> {
        let config_path = args
            .get_one::<String>("config")
            .ok_or_else(|| VolumeError::InvalidConfig("Missing config file path".to_string()))?;
        let config = PipelineConfig::load(config_path)?;
        let append = args.get_flag("append");
        Ok(ExtractCommand {
            config,
            append,
            logger,
        })
    }
}

impl<'a> Command for ExtractCommand<'a> {
    fn execute(&self) -> VolumeResult<()> {
        let label_stack =
            SliceStack::discover(&self.config.label_dir, &self.config.file_extension)?;
        let intensity_stack =
            SliceStack::discover(&self.config.volume_dir, &self.config.file_extension)?;

        let workers = self.config.effective_workers();
        let pool = build_worker_pool(workers)?;

        let records = scanner::scan_or_load(
            &label_stack,
            &self.config.snapshot_path,
            self.config.chunk_size,
            &pool,
        )?;
        info!("{} regions found in the label stack", records.len());

        let locator = RegionLocator::new(&label_stack, &intensity_stack, self.config.offset)?;

        let writer = StoreWriter::new(WriterSettings {
            lower_limit: self.config.lower_limit,
            upper_limit: self.config.upper_limit,
            region_limit: self.config.region_limit,
            target: self.config.target_shape(),
            workers,
            batch_factor: self.config.batch_factor,
        });

        let written = writer.run(
            &records,
            &locator,
            &self.config.store_path,
            self.append,
            &pool,
        )?;

        info!(
            "Extraction complete: {} samples written to {}",
            written, self.config.store_path
        );
        self.logger.log_line(&format!(
            "Extraction summary: {} samples written to {}",
            written, self.config.store_path
        ))?;
        Ok(())
    }
}
