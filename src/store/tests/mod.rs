//! Tests for the sample store and the batched writer

pub(crate) mod test_utils;
mod writer_tests;
