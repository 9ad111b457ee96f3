//! Tests for the batched store writer

extern crate std;

use std::fs;
use std::thread;
use std::time::Duration;

use crate::extractor::locate::{ExtentSource, RegionExtent, RegionLocator};
use crate::scanner::record::RegionRecord;
use crate::scanner::scan::RegionScanner;
use crate::scanner::tests::test_utils::{scratch_dir, write_stack};
use crate::store::array_store::ArrayStore;
use crate::store::tests::test_utils::{scratch_store_path, zero_sample};
use crate::store::writer::{StoreWriter, WriterSettings};
use crate::utils::pool::build_worker_pool;
use crate::volume::array::VoxelGrid;
use crate::volume::bbox::BoundingBox3;
use crate::volume::errors::VolumeResult;

fn settings(lower: u64, upper: u64, limit: Option<usize>) -> WriterSettings {
    WriterSettings {
        lower_limit: lower,
        upper_limit: upper,
        region_limit: limit,
        target: (4, 4, 4),
        workers: 2,
        batch_factor: 1,
    }
}

fn record(id: u32, size: u64) -> RegionRecord {
    RegionRecord {
        id,
        size,
        slices: vec![0],
    }
}

/// Builds a 6-slice 12x12 label stack holding three disjoint cuboids
/// with ids 1 (18 voxels), 2 (48) and 3 (48)
fn three_region_slices() -> Vec<Vec<u16>> {
    let mut slices = vec![vec![0u16; 144]; 6];
    for z in 0..2 {
        for y in 0..3u32 {
            for x in 0..3u32 {
                slices[z][(y * 12 + x) as usize] = 1;
            }
        }
    }
    for z in 0..3 {
        for y in 4..8u32 {
            for x in 4..8u32 {
                slices[z][(y * 12 + x) as usize] = 2;
            }
        }
    }
    for z in 3..6 {
        for y in 8..12u32 {
            for x in 0..4u32 {
                slices[z][(y * 12 + x) as usize] = 3;
            }
        }
    }
    slices
}

#[test]
fn test_filter_is_strict_and_order_preserving() {
    let writer = StoreWriter::new(settings(50, 200, None));
    let records = vec![
        record(1, 10),
        record(2, 50),
        record(3, 51),
        record(4, 120),
        record(5, 199),
        record(6, 200),
        record(7, 250),
    ];

    let filtered = writer.filter_regions(&records);
    let ids: Vec<u32> = filtered.iter().map(|r| r.id).collect();
    std::assert_eq!(ids, vec![3, 4, 5]);
}

#[test]
fn test_filter_limit_truncates_after_filtering() {
    let writer = StoreWriter::new(settings(50, 200, Some(2)));
    let records = vec![record(1, 10), record(2, 60), record(3, 70), record(4, 80)];

    let filtered = writer.filter_regions(&records);
    let ids: Vec<u32> = filtered.iter().map(|r| r.id).collect();
    std::assert_eq!(ids, vec![2, 3]);
}

#[test]
fn test_run_writes_samples_in_filter_order() {
    let label_dir = scratch_dir("writer-labels");
    let vol_dir = scratch_dir("writer-vol");
    let store_path = scratch_store_path("writer-run");

    let label_stack = write_stack(&label_dir, 12, 12, &three_region_slices());
    let intensity: Vec<Vec<u16>> = vec![vec![90u16; 144]; 6];
    let vol_stack = write_stack(&vol_dir, 12, 12, &intensity);

    let pool = build_worker_pool(2).unwrap();
    let records = RegionScanner::new(&label_stack).scan(&pool).unwrap();
    let locator = RegionLocator::new(&label_stack, &vol_stack, 0).unwrap();

    // Batch size workers * factor = 2, so three regions span two
    // batches of sizes 2 and 1
    let writer = StoreWriter::new(settings(10, 100, None));
    let written = writer
        .run(&records, &locator, store_path.to_str().unwrap(), false, &pool)
        .unwrap();
    std::assert_eq!(written, 3);

    let mut store = ArrayStore::open(store_path.to_str().unwrap()).unwrap();
    std::assert_eq!(store.len(), 3);
    std::assert_eq!(store.get(0).unwrap().id, 1);
    std::assert_eq!(store.get(1).unwrap().id, 2);
    std::assert_eq!(store.get(2).unwrap().id, 3);
    for i in 0..3 {
        let sample = store.get(i).unwrap();
        std::assert_eq!(sample.shape.shape(), (1, 4, 4, 4));
        std::assert!((sample.shape.max_value() - 1.0).abs() < 1e-6);
    }

    fs::remove_dir_all(label_dir).unwrap();
    fs::remove_dir_all(vol_dir).unwrap();
    fs::remove_file(store_path).unwrap();
}

/// Extent source that synthesizes a solid cube per region and stalls
/// on one id, forcing that batch element to complete last
struct StallingSource {
    stall_id: u32,
}

impl ExtentSource for StallingSource {
    fn locate(&self, record: &RegionRecord) -> VolumeResult<RegionExtent> {
        if record.id == self.stall_id {
            thread::sleep(Duration::from_millis(100));
        }
        let mut volume = VoxelGrid::zeros(2, 2, 2);
        for v in &mut volume.data {
            *v = record.id;
        }
        Ok(RegionExtent {
            label_volume: volume.clone(),
            intensity_volume: volume,
            bbox: BoundingBox3::new(0, 2, 0, 2, 0, 2),
        })
    }
}

#[test]
fn test_run_placement_survives_out_of_order_completion() {
    let store_path = scratch_store_path("writer-stall");
    let pool = build_worker_pool(2).unwrap();

    // Batch size 2: ids 1 and 2 share the first batch, and id 1 is
    // stalled so it finishes after id 2. Placement must still follow
    // the filtered order, not completion order.
    let source = StallingSource { stall_id: 1 };
    let records = vec![record(1, 60), record(2, 60), record(3, 60)];
    let writer = StoreWriter::new(settings(10, 100, None));
    let written = writer
        .run(&records, &source, store_path.to_str().unwrap(), false, &pool)
        .unwrap();
    std::assert_eq!(written, 3);

    let mut store = ArrayStore::open(store_path.to_str().unwrap()).unwrap();
    for i in 0..3 {
        std::assert_eq!(store.get(i).unwrap().id, i as u32 + 1);
    }

    fs::remove_file(store_path).unwrap();
}

#[test]
fn test_append_resumes_at_first_zero_slot() {
    let label_dir = scratch_dir("resume-labels");
    let vol_dir = scratch_dir("resume-vol");
    let full_path = scratch_store_path("resume-full");
    let resumed_path = scratch_store_path("resume-partial");

    let label_stack = write_stack(&label_dir, 12, 12, &three_region_slices());
    let intensity: Vec<Vec<u16>> = vec![vec![90u16; 144]; 6];
    let vol_stack = write_stack(&vol_dir, 12, 12, &intensity);

    let pool = build_worker_pool(2).unwrap();
    let records = RegionScanner::new(&label_stack).scan(&pool).unwrap();
    let locator = RegionLocator::new(&label_stack, &vol_stack, 0).unwrap();
    let writer = StoreWriter::new(settings(10, 100, None));

    // Reference: one uninterrupted run
    writer
        .run(&records, &locator, full_path.to_str().unwrap(), false, &pool)
        .unwrap();

    // Interrupted run: extract fully, then zero out everything from
    // index 1 on to simulate lost progress
    writer
        .run(&records, &locator, resumed_path.to_str().unwrap(), false, &pool)
        .unwrap();
    {
        let mut store = ArrayStore::open(resumed_path.to_str().unwrap()).unwrap();
        for i in 1..store.len() {
            store.write_sample(i, &zero_sample((4, 4, 4))).unwrap();
        }
        std::assert_eq!(store.first_unwritten().unwrap(), Some(1));
    }

    let written = writer
        .run(&records, &locator, resumed_path.to_str().unwrap(), true, &pool)
        .unwrap();
    std::assert_eq!(written, 2);

    // The resumed store is bit-identical to the uninterrupted one
    let mut full = ArrayStore::open(full_path.to_str().unwrap()).unwrap();
    let mut resumed = ArrayStore::open(resumed_path.to_str().unwrap()).unwrap();
    std::assert_eq!(full.len(), resumed.len());
    for i in 0..full.len() {
        std::assert_eq!(full.get(i).unwrap(), resumed.get(i).unwrap());
    }

    // A complete store resumes as a no-op
    let rewritten = writer
        .run(&records, &locator, resumed_path.to_str().unwrap(), true, &pool)
        .unwrap();
    std::assert_eq!(rewritten, 0);

    fs::remove_dir_all(label_dir).unwrap();
    fs::remove_dir_all(vol_dir).unwrap();
    fs::remove_file(full_path).unwrap();
    fs::remove_file(resumed_path).unwrap();
}
