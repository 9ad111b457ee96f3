//! Tests for the core volume types

mod bbox_tests;
mod array_tests;
mod slice_tests;
