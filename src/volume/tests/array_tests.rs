//! Tests for the flat-vector array types

extern crate std;

use crate::volume::array::{LabelSlice, SampleVolume, VoxelGrid};

#[test]
fn test_label_slice_get_set() {
    let mut slice = LabelSlice::zeros(4, 3);
    slice.set(2, 1, 17);
    std::assert_eq!(slice.get(2, 1), Some(17));
    std::assert_eq!(slice.get(0, 0), Some(0));
    std::assert_eq!(slice.get(4, 0), None);
    std::assert_eq!(slice.get(0, 3), None);
}

#[test]
fn test_voxel_grid_from_slices() {
    let mut first = LabelSlice::zeros(3, 2);
    first.set(0, 0, 1);
    let mut second = LabelSlice::zeros(3, 2);
    second.set(2, 1, 2);

    let grid = VoxelGrid::from_slices(&[first, second]);
    std::assert_eq!(grid.depth, 2);
    std::assert_eq!(grid.height, 2);
    std::assert_eq!(grid.width, 3);
    std::assert_eq!(grid.get(0, 0, 0), Some(1));
    std::assert_eq!(grid.get(1, 1, 2), Some(2));
    std::assert_eq!(grid.nonzero_count(), 2);
}

#[test]
fn test_voxel_grid_index_exceeds_u32_range() {
    // On a 2048^3 grid the last voxel's flat index is 2^33 - 1, which
    // 32-bit arithmetic wraps. No data is allocated so only the index
    // arithmetic is exercised.
    let grid = VoxelGrid {
        depth: 2048,
        height: 2048,
        width: 2048,
        data: Vec::new(),
    };
    std::assert_eq!(grid.index(2047, 2047, 2047), 8_589_934_591usize);
    std::assert_eq!(grid.index(0, 0, 0), 0);
}

#[test]
fn test_large_dims_stay_in_bounds_checks() {
    // Flat indices past u32 must not wrap inside get, even over an
    // empty backing vector
    let slice = LabelSlice {
        width: 65536,
        height: 131072,
        data: Vec::new(),
    };
    std::assert_eq!(slice.get(65535, 131071), None);

    let volume = SampleVolume {
        depth: 2048,
        height: 2048,
        width: 2048,
        data: Vec::new(),
    };
    std::assert_eq!(volume.get(2047, 2047, 2047), None);
}

#[test]
fn test_sample_volume_shape_has_channel_axis() {
    let volume = SampleVolume::zeros(4, 5, 6);
    std::assert_eq!(volume.shape(), (1, 4, 5, 6));
}

#[test]
fn test_sample_volume_max_and_zero_checks() {
    let mut volume = SampleVolume::zeros(2, 2, 2);
    std::assert!(volume.is_all_zero());
    std::assert_eq!(volume.max_value(), 0.0);

    volume.data[5] = 0.75;
    std::assert!(!volume.is_all_zero());
    std::assert_eq!(volume.max_value(), 0.75);
}
