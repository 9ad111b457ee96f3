//! Random-access sample store file
//!
//! A store is a single little-endian binary file holding three
//! co-indexed sequences of equal length: `shape_volume[i]`,
//! `texture_volume[i]` and `id[i]`. The record count and the target
//! volume shape are fixed at creation time and every record slot is
//! zero-filled up front, so indices 0..N-1 are stable handles from
//! the first write on.
//!
//! Layout: an 8-byte magic, a format version, the record count and
//! the target depth/height/width, followed by `count` fixed-size
//! records of `{id: u64, shape: D*H*W f32, texture: D*H*W f32}`.

use std::fs::{File, OpenOptions};
use std::io::{BufReader, BufWriter, Read, Seek, SeekFrom, Write};
use std::path::Path;

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use log::info;

use crate::extractor::resample::Sample;
use crate::volume::array::SampleVolume;
use crate::volume::errors::{VolumeError, VolumeResult};

/// Magic bytes identifying a voxelkit store file
const STORE_MAGIC: &[u8; 8] = b"VXKSTORE";
/// Current store format version
const STORE_VERSION: u32 = 1;
/// Header: magic + version + count + target dims
const HEADER_SIZE: u64 = 8 + 4 + 8 + 12;

/// Random-access store of fixed-shape samples
pub struct ArrayStore {
    /// Backing file, opened for reading and writing
    file: File,
    /// Number of record slots allocated at creation
    count: u64,
    /// Target volume shape (depth, height, width)
    target: (u32, u32, u32),
}

impl ArrayStore {
    /// Create a new store pre-sized to a record count
    ///
    /// Every record slot is zero-filled, which is what marks a slot
    /// as not yet written for resume purposes.
    ///
    /// # Arguments
    /// * `path` - Store file path
    /// * `count` - Number of record slots to allocate
    /// * `target` - Per-sample volume shape (depth, height, width)
    pub fn create(path: &str, count: u64, target: (u32, u32, u32)) -> VolumeResult<Self> {
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(true)
            .open(path)?;

        let mut writer = BufWriter::new(&file);
        writer.write_all(STORE_MAGIC)?;
        writer.write_u32::<LittleEndian>(STORE_VERSION)?;
        writer.write_u64::<LittleEndian>(count)?;
        writer.write_u32::<LittleEndian>(target.0)?;
        writer.write_u32::<LittleEndian>(target.1)?;
        writer.write_u32::<LittleEndian>(target.2)?;

        // Zero-fill every record slot
        let record_size = Self::record_size_for(target);
        let zeros = vec![0u8; record_size.min(1 << 20) as usize];
        let mut remaining = record_size * count;
        while remaining > 0 {
            let chunk = remaining.min(zeros.len() as u64) as usize;
            writer.write_all(&zeros[..chunk])?;
            remaining -= chunk as u64;
        }
        writer.flush()?;
        drop(writer);

        info!(
            "Created store {} with {} slots of target shape {:?}",
            path, count, target
        );

        Ok(ArrayStore { file, count, target })
    }

    /// Open an existing store and validate its header
    pub fn open(path: &str) -> VolumeResult<Self> {
        let file = OpenOptions::new().read(true).write(true).open(path)?;
        let mut reader = BufReader::new(&file);

        let mut magic = [0u8; 8];
        reader.read_exact(&mut magic)?;
        if &magic != STORE_MAGIC {
            return Err(VolumeError::InvalidStoreHeader);
        }
        let version = reader.read_u32::<LittleEndian>()?;
        if version != STORE_VERSION {
            return Err(VolumeError::InvalidStoreHeader);
        }
        let count = reader.read_u64::<LittleEndian>()?;
        let target = (
            reader.read_u32::<LittleEndian>()?,
            reader.read_u32::<LittleEndian>()?,
            reader.read_u32::<LittleEndian>()?,
        );
        drop(reader);

        Ok(ArrayStore { file, count, target })
    }

    /// True when a store file exists at a path
    pub fn exists(path: &str) -> bool {
        Path::new(path).is_file()
    }

    /// Number of record slots in the store
    pub fn len(&self) -> u64 {
        self.count
    }

    /// True when the store holds no slots
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Target volume shape the store was created with
    pub fn target(&self) -> (u32, u32, u32) {
        self.target
    }

    /// Per-sample volume shape including the leading channel axis
    pub fn sample_shape(&self) -> (u32, u32, u32, u32) {
        (1, self.target.0, self.target.1, self.target.2)
    }

    /// Voxels per stored volume
    fn voxels(&self) -> u64 {
        self.target.0 as u64 * self.target.1 as u64 * self.target.2 as u64
    }

    /// Byte size of one record for a target shape
    fn record_size_for(target: (u32, u32, u32)) -> u64 {
        let voxels = target.0 as u64 * target.1 as u64 * target.2 as u64;
        8 + 2 * 4 * voxels
    }

    /// File offset of a record slot
    fn record_offset(&self, index: u64) -> u64 {
        HEADER_SIZE + index * Self::record_size_for(self.target)
    }

    /// Validate an index against the allocated slot count
    fn check_index(&self, index: u64) -> VolumeResult<()> {
        if index >= self.count {
            return Err(VolumeError::StoreIndexOutOfRange(index, self.count));
        }
        Ok(())
    }

    /// Write a sample into a record slot
    ///
    /// The caller controls the index explicitly; samples are never
    /// appended in completion order.
    pub fn write_sample(&mut self, index: u64, sample: &Sample) -> VolumeResult<()> {
        self.check_index(index)?;
        let voxels = self.voxels() as usize;
        if sample.shape.data.len() != voxels || sample.texture.data.len() != voxels {
            return Err(VolumeError::StoreShapeMismatch(
                self.target,
                (sample.shape.depth, sample.shape.height, sample.shape.width),
            ));
        }

        self.file.seek(SeekFrom::Start(self.record_offset(index)))?;
        let mut writer = BufWriter::new(&self.file);
        writer.write_u64::<LittleEndian>(sample.id as u64)?;
        for &v in &sample.shape.data {
            writer.write_f32::<LittleEndian>(v)?;
        }
        for &v in &sample.texture.data {
            writer.write_f32::<LittleEndian>(v)?;
        }
        writer.flush()?;
        Ok(())
    }

    /// Read the sample stored at an index
    pub fn get(&mut self, index: u64) -> VolumeResult<Sample> {
        self.check_index(index)?;
        let (d, h, w) = self.target;
        let voxels = self.voxels() as usize;

        self.file.seek(SeekFrom::Start(self.record_offset(index)))?;
        let mut reader = BufReader::new(&self.file);
        let id = reader.read_u64::<LittleEndian>()? as u32;

        let mut shape = SampleVolume::zeros(d, h, w);
        for v in &mut shape.data[..voxels] {
            *v = reader.read_f32::<LittleEndian>()?;
        }
        let mut texture = SampleVolume::zeros(d, h, w);
        for v in &mut texture.data[..voxels] {
            *v = reader.read_f32::<LittleEndian>()?;
        }

        Ok(Sample { id, shape, texture })
    }

    /// Find the first record slot not yet written
    ///
    /// A slot counts as unwritten when both of its volumes are
    /// entirely zero. A genuinely all-zero valid sample is
    /// indistinguishable from an unwritten slot under this
    /// convention; that ambiguity is a known limitation of the
    /// format, not handled here.
    pub fn first_unwritten(&mut self) -> VolumeResult<Option<u64>> {
        for index in 0..self.count {
            let sample = self.get(index)?;
            if sample.shape.is_all_zero() && sample.texture.is_all_zero() {
                return Ok(Some(index));
            }
        }
        Ok(None)
    }
}
