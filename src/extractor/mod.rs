//! Region extent location and sample extraction
//!
//! This module rebuilds one region's minimal sub-volume pair from the
//! slice stacks, verifies its connectivity and resamples it to the
//! fixed sample shape.

pub mod components;
pub mod locate;
pub mod resample;
#[cfg(test)]
mod tests;

pub use components::{connected_components, largest_component, Component};
pub use locate::{ExtentSource, RegionExtent, RegionLocator};
pub use resample::{extract_sample, normalize_max, resample_nearest, Sample};
