//! Logger utility for application-wide logging
//!
//! A small file logger that plugs into the standard log crate,
//! echoing records to the console and appending them to a log file.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;
use std::sync::Mutex;
use log::{Level, LevelFilter, Log, Metadata, Record};

/// File-backed logger
pub struct Logger {
    /// File handle for log output
    file: Mutex<Option<File>>,
    /// Most verbose level written
    level: Level,
}

impl Logger {
    /// Creates a new logger writing to a file
    ///
    /// # Arguments
    /// * `log_file` - Path to the log file
    /// * `verbose` - Whether debug records are written
    ///
    /// # Returns
    /// A new Logger instance or an error if the file cannot be created
    pub fn new(log_file: &str, verbose: bool) -> io::Result<Self> {
        let file = File::create(Path::new(log_file))?;
        Ok(Logger {
            file: Mutex::new(Some(file)),
            level: if verbose { Level::Debug } else { Level::Info },
        })
    }

    /// Writes one line to the log file
    pub fn log_line(&self, message: &str) -> io::Result<()> {
        if let Some(file) = &mut *self.file.lock().unwrap() {
            writeln!(file, "{}", message)?;
            file.flush()?;
        }
        Ok(())
    }

    /// Installs a logger as the global log crate backend
    pub fn init_global_logger(log_file: &str, verbose: bool) -> io::Result<()> {
        let logger = Logger::new(log_file, verbose)?;
        let level = logger.level;

        if log::set_boxed_logger(Box::new(logger)).is_err() {
            // Logger was already set; only happens when init runs twice
            eprintln!("Warning: Global logger was already initialized");
        }

        log::set_max_level(match level {
            Level::Debug => LevelFilter::Debug,
            _ => LevelFilter::Info,
        });
        Ok(())
    }
}

impl Log for Logger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let message = format!("[{}] {}", record.level(), record.args());
            let _ = self.log_line(&message);
            println!("{}", message);
        }
    }

    fn flush(&self) {
        // log_line already flushes after every record
    }
}
