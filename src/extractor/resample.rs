//! Volume cropping, resampling and normalization
//!
//! Turns a located region into a fixed-shape sample: crop both
//! sub-volumes to the bounding box, resample to the target shape with
//! order-0 nearest-neighbor interpolation (hard label and intensity
//! edges survive), then divide each volume by its own maximum.

use log::warn;

use crate::extractor::locate::RegionExtent;
use crate::volume::array::{SampleVolume, VoxelGrid};
use crate::volume::bbox::BoundingBox3;

/// One persisted unit of the training corpus
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    /// Originating region id
    pub id: u32,
    /// Label mask, cropped + resampled, max-normalized
    pub shape: SampleVolume,
    /// Intensity, cropped + resampled, max-normalized
    pub texture: SampleVolume,
}

/// Crop a grid to a bounding box as a float volume
fn crop(grid: &VoxelGrid, bbox: &BoundingBox3) -> SampleVolume {
    let mut out = SampleVolume::zeros(bbox.depth(), bbox.height(), bbox.width());
    let mut i = 0usize;
    for z in bbox.z0..bbox.z1 {
        for y in bbox.y0..bbox.y1 {
            for x in bbox.x0..bbox.x1 {
                out.data[i] = grid.get(z, y, x).unwrap_or(0) as f32;
                i += 1;
            }
        }
    }
    out
}

/// Resample a volume to a target shape with nearest-neighbor lookup
///
/// Source coordinates are sampled at cell centers, matching an
/// order-0 resize with no anti-aliasing.
pub fn resample_nearest(volume: &SampleVolume, target: (u32, u32, u32)) -> SampleVolume {
    let (td, th, tw) = target;
    let mut out = SampleVolume::zeros(td, th, tw);
    if volume.depth == 0 || volume.height == 0 || volume.width == 0 {
        return out;
    }

    let scale_z = volume.depth as f32 / td as f32;
    let scale_y = volume.height as f32 / th as f32;
    let scale_x = volume.width as f32 / tw as f32;

    let mut i = 0usize;
    for z in 0..td {
        let sz = (((z as f32 + 0.5) * scale_z) as u32).min(volume.depth - 1);
        for y in 0..th {
            let sy = (((y as f32 + 0.5) * scale_y) as u32).min(volume.height - 1);
            for x in 0..tw {
                let sx = (((x as f32 + 0.5) * scale_x) as u32).min(volume.width - 1);
                let idx = (sz as usize * volume.height as usize + sy as usize)
                    * volume.width as usize
                    + sx as usize;
                out.data[i] = volume.data[idx];
                i += 1;
            }
        }
    }
    out
}

/// Divide a volume by its own maximum, guarding the degenerate case
///
/// A volume whose maximum is zero passes through unscaled; dividing
/// by zero would poison every later consumer with NaN.
pub fn normalize_max(mut volume: SampleVolume, region_id: u32, kind: &str) -> SampleVolume {
    let max = volume.max_value();
    if max == 0.0 {
        warn!(
            "Region {} {} volume has zero maximum, skipping normalization",
            region_id, kind
        );
        return volume;
    }
    for v in &mut volume.data {
        *v /= max;
    }
    volume
}

/// Extract the fixed-shape sample for a located region
pub fn extract_sample(id: u32, extent: &RegionExtent, target: (u32, u32, u32)) -> Sample {
    let shape_crop = crop(&extent.label_volume, &extent.bbox);
    let texture_crop = crop(&extent.intensity_volume, &extent.bbox);

    let shape = normalize_max(resample_nearest(&shape_crop, target), id, "shape");
    let texture = normalize_max(resample_nearest(&texture_crop, target), id, "texture");

    Sample { id, shape, texture }
}
