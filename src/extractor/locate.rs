//! Region extent location
//!
//! Rebuilds the minimal sub-volume pair (label mask + intensity) for
//! one region by restacking only the slices the region appears in,
//! never the whole volume. Every voxel whose label differs from the
//! target id is zeroed in both planes, so intensity at background or
//! other-label voxels is discarded.

use log::warn;

use crate::extractor::components::{connected_components, largest_component};
use crate::scanner::record::RegionRecord;
use crate::volume::array::VoxelGrid;
use crate::volume::bbox::BoundingBox3;
use crate::volume::errors::{VolumeError, VolumeResult};
use crate::volume::slice::SliceStack;

/// Masked sub-volume pair for one region, with its component box
#[derive(Debug)]
pub struct RegionExtent {
    /// Label values masked to the target id (other labels zeroed)
    pub label_volume: VoxelGrid,
    /// Intensity values masked through the label plane
    pub intensity_volume: VoxelGrid,
    /// Minimal bounding box of the region, within the restacked volume
    pub bbox: BoundingBox3,
}

/// Source of region extents
///
/// The seam between locating a region and writing its sample: the
/// store writer dispatches any source across the worker pool, so
/// implementations must be shareable between threads.
pub trait ExtentSource: Sync {
    /// Produce the masked sub-volume pair for one region
    fn locate(&self, record: &RegionRecord) -> VolumeResult<RegionExtent>;
}

/// Locator over a parallel pair of label and intensity stacks
pub struct RegionLocator<'a> {
    /// Label (groundtruth) slice stack
    label_stack: &'a SliceStack,
    /// Intensity slice stack, co-registered with the labels
    intensity_stack: &'a SliceStack,
    /// Symmetric y/x offset applied around the component box
    offset: u32,
}

impl<'a> RegionLocator<'a> {
    /// Create a locator over a label/intensity stack pair
    ///
    /// # Arguments
    /// * `label_stack` - Stack holding the segmentation labels
    /// * `intensity_stack` - Co-registered intensity stack
    /// * `offset` - Symmetric y/x padding around the located box
    ///
    /// # Returns
    /// A locator, or an error when the stacks differ in length
    pub fn new(
        label_stack: &'a SliceStack,
        intensity_stack: &'a SliceStack,
        offset: u32,
    ) -> VolumeResult<Self> {
        if label_stack.len() != intensity_stack.len() {
            return Err(VolumeError::StackLengthMismatch(
                label_stack.len(),
                intensity_stack.len(),
            ));
        }
        Ok(RegionLocator {
            label_stack,
            intensity_stack,
            offset,
        })
    }

    /// Locate one region's masked sub-volume pair and bounding box
    ///
    /// Reads only the slices named in the record. The masked label
    /// content is expected to form exactly one connected component;
    /// any other count is a data-quality anomaly that is logged, and
    /// the largest component carries on as a best-effort result.
    pub fn locate(&self, record: &RegionRecord) -> VolumeResult<RegionExtent> {
        let mut label_slices = Vec::with_capacity(record.slices.len());
        let mut intensity_slices = Vec::with_capacity(record.slices.len());

        for &slice_index in &record.slices {
            let mut label = self.label_stack.read_slice(slice_index)?;
            let mut intensity = self.intensity_stack.read_slice(slice_index)?;

            // Mask intensity through the label plane
            for (lv, iv) in label.data.iter_mut().zip(intensity.data.iter_mut()) {
                if *lv != record.id {
                    *lv = 0;
                    *iv = 0;
                }
            }

            label_slices.push(label);
            intensity_slices.push(intensity);
        }

        let label_volume = VoxelGrid::from_slices(&label_slices);
        let intensity_volume = VoxelGrid::from_slices(&intensity_slices);

        let components = connected_components(&label_volume);
        if components.len() != 1 {
            warn!(
                "Region {} yielded {} connected components instead of 1",
                record.id,
                components.len()
            );
        }

        let component = largest_component(&components).ok_or_else(|| {
            VolumeError::GenericError(format!(
                "Region {} has no nonzero voxels in its restacked volume",
                record.id
            ))
        })?;

        let bbox = component
            .bbox
            .expand(self.offset, label_volume.height, label_volume.width);

        Ok(RegionExtent {
            label_volume,
            intensity_volume,
            bbox,
        })
    }
}

impl<'a> ExtentSource for RegionLocator<'a> {
    fn locate(&self, record: &RegionRecord) -> VolumeResult<RegionExtent> {
        RegionLocator::locate(self, record)
    }
}
