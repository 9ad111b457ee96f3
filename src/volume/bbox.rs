//! Axis-aligned 3-D bounding box for region extents
//!
//! Extents use exclusive upper bounds, so a box covers
//! `[z0, z1) x [y0, y1) x [x0, x1)` in voxel coordinates. The leading
//! axis is the slice-stacking (z) axis.

/// Axis-aligned 3-D integer bounding box (exclusive upper bounds)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundingBox3 {
    /// First slice index covered
    pub z0: u32,
    /// One past the last slice index covered
    pub z1: u32,
    /// First row covered
    pub y0: u32,
    /// One past the last row covered
    pub y1: u32,
    /// First column covered
    pub x0: u32,
    /// One past the last column covered
    pub x1: u32,
}

impl BoundingBox3 {
    /// Create a new bounding box
    pub fn new(z0: u32, z1: u32, y0: u32, y1: u32, x0: u32, x1: u32) -> Self {
        BoundingBox3 { z0, z1, y0, y1, x0, x1 }
    }

    /// Depth of the box (slices)
    pub fn depth(&self) -> u32 {
        self.z1 - self.z0
    }

    /// Height of the box (rows)
    pub fn height(&self) -> u32 {
        self.y1 - self.y0
    }

    /// Width of the box (columns)
    pub fn width(&self) -> u32 {
        self.x1 - self.x0
    }

    /// Grow the box to include a voxel position
    pub fn include(&mut self, z: u32, y: u32, x: u32) {
        if z < self.z0 { self.z0 = z; }
        if z + 1 > self.z1 { self.z1 = z + 1; }
        if y < self.y0 { self.y0 = y; }
        if y + 1 > self.y1 { self.y1 = y + 1; }
        if x < self.x0 { self.x0 = x; }
        if x + 1 > self.x1 { self.x1 = x + 1; }
    }

    /// A degenerate box positioned at a single voxel
    pub fn at_voxel(z: u32, y: u32, x: u32) -> Self {
        BoundingBox3::new(z, z + 1, y, y + 1, x, x + 1)
    }

    /// Expand the y/x extents symmetrically by an offset
    ///
    /// A side that would leave the parent slice extent keeps its
    /// unexpanded value instead; the box is never re-centered, so
    /// padding near a volume boundary comes out asymmetric. The z
    /// axis is never expanded.
    pub fn expand(&self, offset: u32, parent_height: u32, parent_width: u32) -> Self {
        let y0 = if self.y0 >= offset { self.y0 - offset } else { self.y0 };
        let y1 = if self.y1 + offset <= parent_height { self.y1 + offset } else { self.y1 };
        let x0 = if self.x0 >= offset { self.x0 - offset } else { self.x0 };
        let x1 = if self.x1 + offset <= parent_width { self.x1 + offset } else { self.x1 };
        BoundingBox3::new(self.z0, self.z1, y0, y1, x0, x1)
    }
}
