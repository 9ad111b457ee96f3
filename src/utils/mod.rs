//! Shared utilities: logging, progress reporting, pool construction

pub mod logger;
pub mod pool;
pub mod progress;
#[cfg(test)]
mod tests;
