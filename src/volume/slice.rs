//! Slice stack discovery and reading
//!
//! A dataset arrives as a directory of 2-D image slices. Files are
//! discovered by extension and sorted lexicographically; the sort
//! order defines the slice index assignment and must stay stable
//! across runs, since region records refer to slices by index.

use std::fs;
use std::path::{Path, PathBuf};

use log::info;

use crate::volume::array::LabelSlice;
use crate::volume::errors::{VolumeError, VolumeResult};

/// An ordered stack of slice files backing one volume
#[derive(Debug, Clone)]
pub struct SliceStack {
    /// Directory the stack was discovered in
    dir: String,
    /// Slice file paths, sorted lexicographically
    paths: Vec<PathBuf>,
}

impl SliceStack {
    /// Discover a slice stack under a directory
    ///
    /// # Arguments
    /// * `dir` - Directory containing the slice files
    /// * `extension` - File extension to match (without the dot)
    ///
    /// # Returns
    /// A stack with at least one slice, or an error
    pub fn discover(dir: &str, extension: &str) -> VolumeResult<Self> {
        let mut paths: Vec<PathBuf> = fs::read_dir(dir)?
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| {
                path.extension()
                    .map(|ext| ext.eq_ignore_ascii_case(extension))
                    .unwrap_or(false)
            })
            .collect();

        // Lexicographic order assigns the slice indices
        paths.sort();

        if paths.is_empty() {
            return Err(VolumeError::EmptySliceStack(dir.to_string()));
        }

        info!("Discovered {} slices in {}", paths.len(), dir);

        Ok(SliceStack {
            dir: dir.to_string(),
            paths,
        })
    }

    /// Number of slices in the stack
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    /// True when the stack holds no slices
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Path of the slice at an index
    pub fn path(&self, index: u32) -> VolumeResult<&Path> {
        self.paths
            .get(index as usize)
            .map(|p| p.as_path())
            .ok_or(VolumeError::SliceIndexOutOfRange(index, self.paths.len()))
    }

    /// Read one slice into a 2-D integer array
    ///
    /// 8-bit luma input widens its raw sample values to u32 unchanged,
    /// so label ids survive as written; anything else converts through
    /// 16-bit luma first. Both paths land in one representation.
    pub fn read_slice(&self, index: u32) -> VolumeResult<LabelSlice> {
        let path = self.path(index)?;
        if !path.exists() {
            return Err(VolumeError::MissingSlice(path.display().to_string()));
        }

        let (width, height, data) = match image::open(path)? {
            image::DynamicImage::ImageLuma8(buffer) => {
                let (w, h) = buffer.dimensions();
                let data: Vec<u32> = buffer.into_raw().into_iter().map(u32::from).collect();
                (w, h, data)
            }
            other => {
                let buffer = other.to_luma16();
                let (w, h) = buffer.dimensions();
                let data: Vec<u32> = buffer.into_raw().into_iter().map(u32::from).collect();
                (w, h, data)
            }
        };

        Ok(LabelSlice {
            width,
            height,
            data,
        })
    }
}
