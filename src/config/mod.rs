//! Pipeline configuration
//!
//! The configuration surface is a TOML file deserialized into
//! `PipelineConfig` and validated fail-fast, before any worker pool
//! is built or any file is touched.

use std::fs;
use std::thread;

use serde::Deserialize;

use crate::precluster::GroupStrategy;
use crate::volume::errors::{VolumeError, VolumeResult};

/// Configuration for one extraction run
#[derive(Debug, Clone, Deserialize)]
pub struct PipelineConfig {
    /// Directory holding the intensity slice files
    pub volume_dir: String,
    /// Directory holding the label slice files
    pub label_dir: String,
    /// Slice file extension, without the dot
    #[serde(default = "default_extension")]
    pub file_extension: String,
    /// Slices scanned per dispatch wave (None = whole stack at once)
    #[serde(default)]
    pub chunk_size: Option<usize>,
    /// Worker count (None = all available cores)
    #[serde(default)]
    pub workers: Option<usize>,
    /// Optional cap on how many filtered regions are extracted
    #[serde(default)]
    pub region_limit: Option<usize>,
    /// Strict lower size bound for extracted regions
    pub lower_limit: u64,
    /// Strict upper size bound for extracted regions
    pub upper_limit: u64,
    /// Target per-sample volume shape as [depth, height, width]
    pub target: [u32; 3],
    /// Batch size multiplier: one batch is workers * batch_factor
    #[serde(default = "default_batch_factor")]
    pub batch_factor: usize,
    /// Symmetric y/x offset padded around each region's bounding box
    #[serde(default)]
    pub offset: u32,
    /// Path of the region metadata snapshot file
    #[serde(default = "default_snapshot_path")]
    pub snapshot_path: String,
    /// Path of the sample store file
    #[serde(default = "default_store_path")]
    pub store_path: String,
    /// Number of size buckets produced by grouping
    #[serde(default = "default_n_groups")]
    pub n_groups: usize,
    /// Grouping strategy: "simple" or "cluster"
    #[serde(default = "default_group_strategy")]
    pub group_strategy: String,
}

fn default_extension() -> String {
    "png".to_string()
}

fn default_batch_factor() -> usize {
    2
}

fn default_snapshot_path() -> String {
    "region_info.json".to_string()
}

fn default_store_path() -> String {
    "samples.vxk".to_string()
}

fn default_n_groups() -> usize {
    5
}

fn default_group_strategy() -> String {
    "simple".to_string()
}

impl PipelineConfig {
    /// Load and validate a configuration from a TOML file
    pub fn load(path: &str) -> VolumeResult<Self> {
        let text = fs::read_to_string(path)
            .map_err(|e| VolumeError::InvalidConfig(format!("Cannot read {}: {}", path, e)))?;
        let config: PipelineConfig = toml::from_str(&text)
            .map_err(|e| VolumeError::InvalidConfig(format!("Cannot parse {}: {}", path, e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration, failing fast on bad values
    pub fn validate(&self) -> VolumeResult<()> {
        if self.volume_dir.is_empty() {
            return Err(VolumeError::InvalidConfig("volume_dir is not set".to_string()));
        }
        if self.label_dir.is_empty() {
            return Err(VolumeError::InvalidConfig("label_dir is not set".to_string()));
        }
        if self.file_extension.is_empty() {
            return Err(VolumeError::InvalidConfig("file_extension is empty".to_string()));
        }
        if self.lower_limit >= self.upper_limit {
            return Err(VolumeError::InvalidConfig(format!(
                "lower_limit ({}) must be below upper_limit ({})",
                self.lower_limit, self.upper_limit
            )));
        }
        if self.target.iter().any(|d| *d == 0) {
            return Err(VolumeError::InvalidConfig(format!(
                "target shape {:?} has a zero dimension",
                self.target
            )));
        }
        if self.batch_factor == 0 {
            return Err(VolumeError::InvalidConfig("batch_factor must be at least 1".to_string()));
        }
        if self.n_groups == 0 {
            return Err(VolumeError::InvalidConfig("n_groups must be at least 1".to_string()));
        }
        if let Some(workers) = self.workers {
            if workers == 0 {
                return Err(VolumeError::InvalidConfig("workers must be at least 1".to_string()));
            }
        }
        // Strategy strings are rejected here, before any worker spawns
        GroupStrategy::parse(&self.group_strategy)?;
        Ok(())
    }

    /// Worker count to use, falling back to the available cores
    pub fn effective_workers(&self) -> usize {
        self.workers.unwrap_or_else(|| {
            thread::available_parallelism().map(|n| n.get()).unwrap_or(1)
        })
    }

    /// Target shape as a tuple
    pub fn target_shape(&self) -> (u32, u32, u32) {
        (self.target[0], self.target[1], self.target[2])
    }

    /// Parsed grouping strategy
    pub fn strategy(&self) -> VolumeResult<GroupStrategy> {
        GroupStrategy::parse(&self.group_strategy)
    }
}
