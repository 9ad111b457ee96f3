//! Tests for the shared utilities
