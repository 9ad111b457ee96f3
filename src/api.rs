use log::info;

use crate::config::PipelineConfig;
use crate::extractor::locate::RegionLocator;
use crate::precluster::group_regions;
use crate::scanner::{self, RegionRecord};
use crate::store::array_store::ArrayStore;
use crate::store::writer::{StoreWriter, WriterSettings};
use crate::utils::pool::build_worker_pool;
use crate::volume::errors::VolumeResult;
use crate::volume::slice::SliceStack;

/// Main interface to the voxelkit library
///
/// Wraps the scan / extract / group operations behind one validated
/// configuration, for consumers that embed the pipeline instead of
/// running the CLI.
pub struct VoxelKit {
    config: PipelineConfig,
}

impl VoxelKit {
    /// Create a VoxelKit instance from a validated configuration
    pub fn new(config: PipelineConfig) -> VolumeResult<Self> {
        config.validate()?;
        Ok(VoxelKit { config })
    }

    /// Create a VoxelKit instance from a TOML configuration file
    pub fn from_config_file(path: &str) -> VolumeResult<Self> {
        Ok(VoxelKit {
            config: PipelineConfig::load(path)?,
        })
    }

    /// Scan the label stack into region records
    ///
    /// Reuses the configured snapshot when it exists and is nonempty,
    /// otherwise rescans and persists a fresh snapshot.
    pub fn scan(&self) -> VolumeResult<Vec<RegionRecord>> {
        let stack = SliceStack::discover(&self.config.label_dir, &self.config.file_extension)?;
        let pool = build_worker_pool(self.config.effective_workers())?;
        scanner::scan_or_load(
            &stack,
            &self.config.snapshot_path,
            self.config.chunk_size,
            &pool,
        )
    }

    /// Extract the sample store; returns the number of samples written
    ///
    /// # Arguments
    /// * `append` - Resume an existing store at its first unwritten
    ///   slot instead of recreating it
    pub fn extract(&self, append: bool) -> VolumeResult<u64> {
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

        writer.run(&records, &locator, &self.config.store_path, append, &pool)
    }

    /// Group scanned regions into size buckets of region ids
    pub fn group(&self) -> VolumeResult<Vec<Vec<u32>>> {
        let records = self.scan()?;
        group_regions(&records, self.config.strategy()?, self.config.n_groups)
    }

    /// Open the configured sample store for random-access reads
    pub fn open_store(&self) -> VolumeResult<ArrayStore> {
        ArrayStore::open(&self.config.store_path)
    }
}
