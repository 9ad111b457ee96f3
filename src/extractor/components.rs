//! 3-D connected-component labeling
//!
//! Flood-fill labeling over a voxel grid with 26-connectivity
//! (face, edge and corner neighbors all connect). Used to verify
//! that a masked region really forms a single component and to
//! compute its minimal bounding box.

use crate::volume::array::VoxelGrid;
use crate::volume::bbox::BoundingBox3;

/// One connected component of nonzero voxels
#[derive(Debug, Clone)]
pub struct Component {
    /// Minimal bounding box of the component
    pub bbox: BoundingBox3,
    /// Number of voxels in the component
    pub voxel_count: u64,
}

/// Label the connected components of the nonzero voxels in a grid
///
/// Components are returned in discovery (scan) order. Two nonzero
/// voxels belong to the same component when they are 26-adjacent;
/// the voxel values themselves are not compared, since the grids
/// handed in here are already masked to a single label.
pub fn connected_components(grid: &VoxelGrid) -> Vec<Component> {
    let (depth, height, width) = (grid.depth, grid.height, grid.width);
    let voxels = (depth as usize) * (height as usize) * (width as usize);
    if voxels == 0 {
        return Vec::new();
    }

    let mut visited = vec![false; voxels];
    let mut components = Vec::new();
    let mut queue: Vec<(u32, u32, u32)> = Vec::new();

    for z in 0..depth {
        for y in 0..height {
            for x in 0..width {
                let idx = grid.index(z, y, x);
                if visited[idx] || grid.data[idx] == 0 {
                    continue;
                }

                // New component; flood fill from this seed
                visited[idx] = true;
                queue.clear();
                queue.push((z, y, x));
                let mut bbox = BoundingBox3::at_voxel(z, y, x);
                let mut voxel_count = 0u64;

                while let Some((cz, cy, cx)) = queue.pop() {
                    voxel_count += 1;
                    bbox.include(cz, cy, cx);

                    for dz in -1i64..=1 {
                        for dy in -1i64..=1 {
                            for dx in -1i64..=1 {
                                if dz == 0 && dy == 0 && dx == 0 {
                                    continue;
                                }
                                let nz = cz as i64 + dz;
                                let ny = cy as i64 + dy;
                                let nx = cx as i64 + dx;
                                if nz < 0 || ny < 0 || nx < 0 {
                                    continue;
                                }
                                let (nz, ny, nx) = (nz as u32, ny as u32, nx as u32);
                                if nz >= depth || ny >= height || nx >= width {
                                    continue;
                                }
                                let nidx = grid.index(nz, ny, nx);
                                if !visited[nidx] && grid.data[nidx] != 0 {
                                    visited[nidx] = true;
                                    queue.push((nz, ny, nx));
                                }
                            }
                        }
                    }
                }

                components.push(Component { bbox, voxel_count });
            }
        }
    }

    components
}

/// Pick the largest component by voxel count
pub fn largest_component(components: &[Component]) -> Option<&Component> {
    components.iter().max_by_key(|c| c.voxel_count)
}
