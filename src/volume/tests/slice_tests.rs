//! Tests for slice stack reading

extern crate std;

use std::fs;

use image::{ImageBuffer, Luma};

use crate::scanner::tests::test_utils::scratch_dir;
use crate::volume::slice::SliceStack;

#[test]
fn test_read_slice_preserves_8bit_label_values() {
    let dir = scratch_dir("luma8");
    let img: ImageBuffer<Luma<u8>, Vec<u8>> =
        ImageBuffer::from_raw(3, 2, vec![0u8, 7, 0, 0, 0, 200]).unwrap();
    img.save(dir.join("slice_000.png")).unwrap();

    let stack = SliceStack::discover(dir.to_str().unwrap(), "png").unwrap();
    let slice = stack.read_slice(0).unwrap();

    // Raw 8-bit sample values carry through without rescaling
    std::assert_eq!(slice.get(1, 0), Some(7));
    std::assert_eq!(slice.get(2, 1), Some(200));
    std::assert_eq!(slice.get(0, 0), Some(0));

    fs::remove_dir_all(dir).unwrap();
}

#[test]
fn test_read_slice_preserves_16bit_label_values() {
    let dir = scratch_dir("luma16");
    let img: ImageBuffer<Luma<u16>, Vec<u16>> =
        ImageBuffer::from_raw(2, 2, vec![0u16, 300, 65535, 0]).unwrap();
    img.save(dir.join("slice_000.png")).unwrap();

    let stack = SliceStack::discover(dir.to_str().unwrap(), "png").unwrap();
    let slice = stack.read_slice(0).unwrap();

    std::assert_eq!(slice.get(1, 0), Some(300));
    std::assert_eq!(slice.get(0, 1), Some(65535));

    fs::remove_dir_all(dir).unwrap();
}
