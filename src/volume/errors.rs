//! Custom error types for volume processing

use std::fmt;
use std::io;

/// Volume-pipeline error types
#[derive(Debug)]
pub enum VolumeError {
    /// I/O error
    IoError(io::Error),
    /// Image decode error for a slice file
    ImageError(image::ImageError),
    /// A slice file named by the stack is missing
    MissingSlice(String),
    /// No slice files found under a directory
    EmptySliceStack(String),
    /// Two parallel slice stacks disagree in length
    StackLengthMismatch(usize, usize),
    /// A slice index is outside the stack
    SliceIndexOutOfRange(u32, usize),
    /// Invalid configuration value
    InvalidConfig(String),
    /// Region metadata snapshot could not be read or parsed
    SnapshotError(String),
    /// The store file header is not a valid voxelkit store
    InvalidStoreHeader,
    /// Store was created with a different target shape
    StoreShapeMismatch((u32, u32, u32), (u32, u32, u32)),
    /// Store index outside the allocated record count
    StoreIndexOutOfRange(u64, u64),
    /// A parallel extraction batch failed; carries the batch start offset
    BatchFailed(u64, String),
    /// Generic error with message
    GenericError(String),
}

impl fmt::Display for VolumeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VolumeError::IoError(e) => write!(f, "I/O error: {}", e),
            VolumeError::ImageError(e) => write!(f, "Image decode error: {}", e),
            VolumeError::MissingSlice(path) => write!(f, "Missing slice file: {}", path),
            VolumeError::EmptySliceStack(dir) => write!(f, "No slice files found in: {}", dir),
            VolumeError::StackLengthMismatch(a, b) =>
                write!(f, "Slice stacks differ in length: {} vs {}", a, b),
            VolumeError::SliceIndexOutOfRange(idx, len) =>
                write!(f, "Slice index {} outside stack of {} slices", idx, len),
            VolumeError::InvalidConfig(msg) => write!(f, "Invalid configuration: {}", msg),
            VolumeError::SnapshotError(msg) => write!(f, "Snapshot error: {}", msg),
            VolumeError::InvalidStoreHeader => write!(f, "Invalid store file header"),
            VolumeError::StoreShapeMismatch(expected, found) =>
                write!(f, "Store target shape mismatch: expected {:?}, found {:?}", expected, found),
            VolumeError::StoreIndexOutOfRange(idx, len) =>
                write!(f, "Store index {} outside store of {} samples", idx, len),
            VolumeError::BatchFailed(offset, msg) =>
                write!(f, "Extraction batch starting at offset {} failed: {}", offset, msg),
            VolumeError::GenericError(msg) => write!(f, "Volume error: {}", msg),
        }
    }
}

impl std::error::Error for VolumeError {}

impl From<io::Error> for VolumeError {
    fn from(error: io::Error) -> Self {
        VolumeError::IoError(error)
    }
}

impl From<image::ImageError> for VolumeError {
    fn from(error: image::ImageError) -> Self {
        VolumeError::ImageError(error)
    }
}

impl From<String> for VolumeError {
    fn from(msg: String) -> Self {
        VolumeError::GenericError(msg)
    }
}

/// Result type for volume operations
pub type VolumeResult<T> = Result<T, VolumeError>;
