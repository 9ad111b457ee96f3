pub mod volume;
pub mod scanner;
pub mod extractor;
pub mod store;
pub mod precluster;
pub mod config;
pub mod commands;
pub mod utils;
pub mod api;

pub use crate::api::VoxelKit;

pub use config::PipelineConfig;
pub use extractor::{ExtentSource, RegionLocator, Sample};
pub use scanner::{RegionRecord, RegionScanner};
pub use store::{ArrayStore, StoreWriter, WriterSettings};
pub use volume::{BoundingBox3, SampleVolume, SliceStack, VolumeError, VolumeResult};
