use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::extractor::resample::Sample;
use crate::volume::array::SampleVolume;

static FILE_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Creates a unique store file path under the system temp dir
pub fn scratch_store_path(tag: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .subsec_nanos();
    let counter = FILE_COUNTER.fetch_add(1, Ordering::SeqCst);
    std::env::temp_dir().join(format!(
        "voxelkit-store-{}-{}-{}-{}.vxk",
        tag,
        std::process::id(),
        nanos,
        counter
    ))
}

/// Builds a sample whose volumes are filled with a constant value
pub fn constant_sample(id: u32, target: (u32, u32, u32), fill: f32) -> Sample {
    let mut shape = SampleVolume::zeros(target.0, target.1, target.2);
    let mut texture = SampleVolume::zeros(target.0, target.1, target.2);
    for v in &mut shape.data {
        *v = fill;
    }
    for v in &mut texture.data {
        *v = fill / 2.0;
    }
    Sample { id, shape, texture }
}

/// Builds the all-zero sample used to simulate unwritten slots
pub fn zero_sample(target: (u32, u32, u32)) -> Sample {
    Sample {
        id: 0,
        shape: SampleVolume::zeros(target.0, target.1, target.2),
        texture: SampleVolume::zeros(target.0, target.1, target.2),
    }
}
