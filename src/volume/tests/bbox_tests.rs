//! Tests for the 3-D bounding box

extern crate std;

use crate::volume::bbox::BoundingBox3;

#[test]
fn test_dimensions() {
    let bbox = BoundingBox3::new(1, 4, 2, 8, 3, 5);
    std::assert_eq!(bbox.depth(), 3);
    std::assert_eq!(bbox.height(), 6);
    std::assert_eq!(bbox.width(), 2);
}

#[test]
fn test_include_grows_to_cover_voxel() {
    let mut bbox = BoundingBox3::at_voxel(2, 2, 2);
    bbox.include(0, 5, 2);
    std::assert_eq!(bbox, BoundingBox3::new(0, 3, 2, 6, 2, 3));
}

#[test]
fn test_expand_interior_box() {
    let bbox = BoundingBox3::new(0, 2, 4, 6, 4, 6);
    let expanded = bbox.expand(2, 10, 10);
    std::assert_eq!(expanded, BoundingBox3::new(0, 2, 2, 8, 2, 8));
}

#[test]
fn test_expand_never_leaves_parent() {
    let bbox = BoundingBox3::new(0, 2, 0, 3, 7, 10);
    let expanded = bbox.expand(2, 10, 10);
    // Clamped sides keep their unexpanded value, free sides grow
    std::assert_eq!(expanded.y0, 0);
    std::assert_eq!(expanded.y1, 5);
    std::assert_eq!(expanded.x0, 5);
    std::assert_eq!(expanded.x1, 10);
    std::assert!(expanded.y1 <= 10 && expanded.x1 <= 10);
}

#[test]
fn test_expand_keeps_z_axis() {
    let bbox = BoundingBox3::new(1, 3, 4, 6, 4, 6);
    let expanded = bbox.expand(1, 10, 10);
    std::assert_eq!(expanded.z0, 1);
    std::assert_eq!(expanded.z1, 3);
}
