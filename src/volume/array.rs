//! Flat-vector array types for slice and volume data
//!
//! Slices and volumes are stored as flat row-major vectors with
//! explicit dimensions, which keeps them cheap to send across the
//! worker pool and trivial to serialize into the sample store.

/// A single 2-D label or intensity slice
///
/// Values are widened to u32 so that 8-bit intensity slices and
/// 16-bit label slices share one representation.
#[derive(Debug, Clone)]
pub struct LabelSlice {
    /// Width of the slice (columns)
    pub width: u32,
    /// Height of the slice (rows)
    pub height: u32,
    /// Raw values in row-major order
    pub data: Vec<u32>,
}

impl LabelSlice {
    /// Create a slice filled with zeros
    pub fn zeros(width: u32, height: u32) -> Self {
        LabelSlice {
            width,
            height,
            data: vec![0; width as usize * height as usize],
        }
    }

    /// Get the value at a position, or None if out of bounds
    pub fn get(&self, x: u32, y: u32) -> Option<u32> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = y as usize * self.width as usize + x as usize;
        self.data.get(idx).copied()
    }

    /// Set the value at a position, ignoring out-of-bounds writes
    pub fn set(&mut self, x: u32, y: u32, value: u32) {
        if x < self.width && y < self.height {
            let idx = y as usize * self.width as usize + x as usize;
            if let Some(slot) = self.data.get_mut(idx) {
                *slot = value;
            }
        }
    }
}

/// A 3-D integer volume built by stacking masked slices
///
/// The leading axis is the stacking (z) axis, in slice order.
#[derive(Debug, Clone)]
pub struct VoxelGrid {
    /// Depth (number of stacked slices)
    pub depth: u32,
    /// Height of each slice (rows)
    pub height: u32,
    /// Width of each slice (columns)
    pub width: u32,
    /// Raw values in z-major, then row-major order
    pub data: Vec<u32>,
}

impl VoxelGrid {
    /// Create a volume filled with zeros
    ///
    /// The voxel count is computed in usize; dimension products well
    /// past u32 stay exact.
    pub fn zeros(depth: u32, height: u32, width: u32) -> Self {
        VoxelGrid {
            depth,
            height,
            width,
            data: vec![0; depth as usize * height as usize * width as usize],
        }
    }

    /// Stack 2-D slices into a volume along a new leading axis
    ///
    /// All slices must share the dimensions of the first; the caller
    /// guarantees this because parallel stacks come from one dataset.
    pub fn from_slices(slices: &[LabelSlice]) -> Self {
        if slices.is_empty() {
            return VoxelGrid::zeros(0, 0, 0);
        }
        let height = slices[0].height;
        let width = slices[0].width;
        let mut data = Vec::with_capacity(slices.len() * height as usize * width as usize);
        for slice in slices {
            data.extend_from_slice(&slice.data);
        }
        VoxelGrid {
            depth: slices.len() as u32,
            height,
            width,
            data,
        }
    }

    /// Flat index for a voxel position
    #[inline]
    pub fn index(&self, z: u32, y: u32, x: u32) -> usize {
        (z as usize * self.height as usize + y as usize) * self.width as usize + x as usize
    }

    /// Get the voxel value at a position, or None if out of bounds
    pub fn get(&self, z: u32, y: u32, x: u32) -> Option<u32> {
        if z >= self.depth || y >= self.height || x >= self.width {
            return None;
        }
        self.data.get(self.index(z, y, x)).copied()
    }

    /// Count of nonzero voxels
    pub fn nonzero_count(&self) -> u64 {
        self.data.iter().filter(|v| **v != 0).count() as u64
    }
}

/// A resampled floating-point sample volume
///
/// Carries a leading singleton channel axis: `shape()` reports
/// `(1, depth, height, width)`, matching the per-sample layout of the
/// array store.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleVolume {
    /// Depth of the volume
    pub depth: u32,
    /// Height of the volume
    pub height: u32,
    /// Width of the volume
    pub width: u32,
    /// Raw values in z-major, then row-major order
    pub data: Vec<f32>,
}

impl SampleVolume {
    /// Create a volume filled with zeros
    pub fn zeros(depth: u32, height: u32, width: u32) -> Self {
        SampleVolume {
            depth,
            height,
            width,
            data: vec![0.0; depth as usize * height as usize * width as usize],
        }
    }

    /// Shape of the volume including the leading channel axis
    pub fn shape(&self) -> (u32, u32, u32, u32) {
        (1, self.depth, self.height, self.width)
    }

    /// Get the value at a position, or None if out of bounds
    pub fn get(&self, z: u32, y: u32, x: u32) -> Option<f32> {
        if z >= self.depth || y >= self.height || x >= self.width {
            return None;
        }
        let idx = (z as usize * self.height as usize + y as usize) * self.width as usize
            + x as usize;
        self.data.get(idx).copied()
    }

    /// Maximum value over the volume, 0.0 for an empty volume
    pub fn max_value(&self) -> f32 {
        self.data.iter().copied().fold(0.0f32, f32::max)
    }

    /// True when every value is exactly zero
    pub fn is_all_zero(&self) -> bool {
        self.data.iter().all(|v| *v == 0.0)
    }
}
