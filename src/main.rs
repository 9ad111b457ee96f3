use clap::{Arg, ArgAction, Command as ClapCommand};
use log::error;
use std::process;

use voxelkit::commands::{CommandFactory, VoxelkitCommandFactory};
use voxelkit::utils::logger::Logger;

fn main() {
    let matches = ClapCommand::new("VoxelKit")
        .version("0.1")
        .about("Extract a training corpus from 3D labeled volume stacks")
        .arg(
            Arg::new("config")
                .help("Pipeline configuration file (TOML)")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Enable verbose output")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("extract")
                .short('e')
                .long("extract")
                .help("Extract the sample store")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("append")
                .short('a')
                .long("append")
                .help("Resume an existing store at its first unwritten slot")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("group")
                .short('g')
                .long("group")
                .help("Group scanned regions into size buckets")
                .action(ArgAction::SetTrue),
        )
        .get_matches();

    let verbose = matches.get_flag("verbose");
    let logger = match Logger::new("voxelkit.log", verbose) {
        Ok(l) => l,
        Err(e) => {
            eprintln!("Error initializing logger: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = Logger::init_global_logger("voxelkit-global.log", verbose) {
        eprintln!("Error setting up global logger: {}", e);
        process::exit(1);
    }

    let factory = VoxelkitCommandFactory::new();

    match factory.create_command(&matches, &logger) {
        Ok(command) => {
            if let Err(e) = command.execute() {
                error!("Command execution error: {}", e);
                eprintln!("Error: {}", e);
                process::exit(1);
            }
        }
        Err(e) => {
            error!("Failed to create command: {}", e);
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };
}
