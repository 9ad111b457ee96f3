//! Tests for size-bucket grouping
