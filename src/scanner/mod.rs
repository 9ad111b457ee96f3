//! Region metadata scanning
//!
//! This module discovers which labels exist in a stack, how many
//! voxels each occupies and which slices it touches, without ever
//! materializing the full volume.

pub mod record;
pub mod scan;
#[cfg(test)]
pub(crate) mod tests;

pub use record::RegionRecord;
pub use scan::{load_snapshot, save_snapshot, scan_or_load, snapshot_usable, RegionScanner};
