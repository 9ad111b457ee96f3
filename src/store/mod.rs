//! Persistent random-access sample store
//!
//! This module owns the store file format and the batched extraction
//! driver that populates it.

pub mod array_store;
pub mod writer;
#[cfg(test)]
mod tests;

pub use array_store::ArrayStore;
pub use writer::{StoreWriter, WriterSettings};
