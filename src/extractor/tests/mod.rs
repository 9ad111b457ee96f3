//! Tests for component labeling, location and resampling
