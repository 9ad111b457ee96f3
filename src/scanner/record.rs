//! Per-region metadata records

use serde::{Deserialize, Serialize};

/// Summary of one labeled region across the whole slice stack
///
/// `size` is the total voxel count of the label over every slice it
/// appears in; `slices` is the sorted set of slice indices with a
/// nonzero count for the label. Ids are the label values themselves,
/// so they are unique across the dataset and stable across rescans of
/// the same input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionRecord {
    /// Label value of the region (always > 0; 0 is background)
    pub id: u32,
    /// Total voxel count over all slices
    pub size: u64,
    /// Sorted slice indices in which the label appears
    pub slices: Vec<u32>,
}

impl RegionRecord {
    /// Create a record for a label first seen in one slice
    pub fn new(id: u32, size: u64, slice_index: u32) -> Self {
        RegionRecord {
            id,
            size,
            slices: vec![slice_index],
        }
    }
}
