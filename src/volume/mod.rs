//! Core volume types: errors, slice stacks, arrays, bounding boxes
//!
//! This module provides the shared building blocks used by the
//! scanner, extractor and store layers.

pub mod errors;
pub mod array;
pub mod bbox;
pub mod slice;
#[cfg(test)]
mod tests;

pub use errors::{VolumeError, VolumeResult};
pub use array::{LabelSlice, SampleVolume, VoxelGrid};
pub use bbox::BoundingBox3;
pub use slice::SliceStack;
