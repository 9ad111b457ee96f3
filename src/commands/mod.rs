//! CLI command implementations
//!
//! This module contains implementations of the commands supported by
//! the CLI application using the Command pattern.

pub mod command_traits;
pub mod scan_command;
pub mod extract_command;
pub mod group_command;

pub use command_traits::{Command, CommandFactory};
pub use scan_command::ScanCommand;
pub use extract_command::ExtractCommand;
pub use group_command::GroupCommand;

use clap::ArgMatches;
use crate::utils::logger::Logger;
use crate::volume::errors::VolumeResult;

/// Factory for creating command instances based on CLI arguments
pub struct VoxelkitCommandFactory;

impl VoxelkitCommandFactory {
    /// Create a new factory instance
    pub fn new() -> Self {
        VoxelkitCommandFactory
    }
}

impl Default for VoxelkitCommandFactory {
    fn default() -> Self {
        VoxelkitCommandFactory::new()
    }
}

impl<'a> CommandFactory<'a> for VoxelkitCommandFactory {
    fn create_command(&self, args: &ArgMatches, logger: &'a Logger) -> VolumeResult<Box<dyn Command + 'a>> {
        // Determine which command to run based on args
        if args.get_flag("extract") {
            Ok(Box::new(ExtractCommand::new(args, logger)?))
        } else if args.get_flag("group") {
            Ok(Box::new(GroupCommand::new(args, logger)?))
        } else {
            // Default to the metadata scan
            Ok(Box::new(ScanCommand::new(args, logger)?))
        }
    }
}
