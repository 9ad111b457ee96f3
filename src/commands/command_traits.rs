//! Command pattern interfaces
//!
//! Core Command pattern interfaces for the CLI application, keeping
//! argument parsing separate from pipeline execution.

use crate::utils::logger::Logger;
use crate::volume::errors::VolumeResult;

/// Represents an executable command in the application
pub trait Command {
    /// Execute the command
    ///
    /// # Returns
    /// Result indicating success or an error
    fn execute(&self) -> VolumeResult<()>;
}

/// Factory for creating commands from CLI arguments
pub trait CommandFactory<'a> {
    /// Create a new Command instance based on CLI arguments
    ///
    /// # Arguments
    /// * `args` - CLI argument matches from clap
    /// * `logger` - Logger for recording operations
    ///
    /// # Returns
    /// A command that implements the Command trait, or an error
    fn create_command(&self, args: &clap::ArgMatches, logger: &'a Logger) -> VolumeResult<Box<dyn Command + 'a>>;
}
