//! Tests for the region metadata scanner
