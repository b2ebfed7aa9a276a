//! Debug logging for teamdeck
//!
//! The `log` facade is used throughout the crate. `init_log_bridge` installs a
//! logger that appends every record to `teamdeck_debug.log` in the system temp
//! directory, so the CLI's stdout stays clean. When `RUST_LOG` is set, records
//! are mirrored to stderr as well.
//!
//! The `debug_*!` macros log under an explicit category, which becomes the
//! record's target:
//!
//! ```ignore
//! debug_info!("SESSION", "restored {} tabs", count);
//! ```

use log::{LevelFilter, Log, Metadata, Record};
use parking_lot::Mutex;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::PathBuf;
use std::sync::OnceLock;

/// Log file location
pub fn log_path() -> PathBuf {
    std::env::temp_dir().join("teamdeck_debug.log")
}

struct LogBridge {
    file: Option<Mutex<File>>,
    mirror_stderr: bool,
}

impl LogBridge {
    fn new(level: LevelFilter) -> Self {
        let path = log_path();
        let file = match OpenOptions::new()
            .write(true)
            .truncate(true)
            .create(true)
            .open(&path)
        {
            Ok(mut f) => {
                let rule = "=".repeat(80);
                let _ = writeln!(
                    f,
                    "{}\nteamdeck debug session started at {} (level={})\n{}",
                    rule,
                    timestamp(),
                    level,
                    rule
                );
                Some(Mutex::new(f))
            }
            // No log file is not fatal; stderr mirroring may still apply
            Err(_) => None,
        };
        Self {
            file,
            mirror_stderr: std::env::var_os("RUST_LOG").is_some(),
        }
    }
}

impl Log for LogBridge {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = format!(
            "[{}] [{:<5}] [{}] {}\n",
            timestamp(),
            record.level(),
            record.target(),
            record.args()
        );
        if let Some(file) = &self.file {
            let mut file = file.lock();
            let _ = file.write_all(line.as_bytes());
        }
        if self.mirror_stderr {
            eprint!("{}", line);
        }
    }

    fn flush(&self) {
        if let Some(file) = &self.file {
            let _ = file.lock().flush();
        }
    }
}

static BRIDGE: OnceLock<LogBridge> = OnceLock::new();

/// Install the log bridge.
///
/// Level precedence: the explicit `level` (CLI flag or config), then
/// `RUST_LOG`, then off. Calling this again only adjusts the level.
pub fn init_log_bridge(level: Option<LevelFilter>) {
    let level = level
        .or_else(level_from_env)
        .unwrap_or(LevelFilter::Off);

    if BRIDGE.get().is_none() && level != LevelFilter::Off {
        let bridge = BRIDGE.get_or_init(|| LogBridge::new(level));
        if log::set_logger(bridge).is_err() {
            // Another logger (e.g. a test harness) is already installed
            return;
        }
    }
    log::set_max_level(level);
}

/// `RUST_LOG` parsed as a plain level name
fn level_from_env() -> Option<LevelFilter> {
    std::env::var("RUST_LOG")
        .ok()
        .and_then(|v| v.trim().parse::<LevelFilter>().ok())
}

fn timestamp() -> String {
    chrono::Local::now()
        .format("%Y-%m-%d %H:%M:%S%.3f")
        .to_string()
}

// Convenience macros for logging under a category
#[macro_export]
macro_rules! debug_error {
    ($category:expr, $($arg:tt)*) => {
        log::error!(target: $category, $($arg)*)
    };
}

#[macro_export]
macro_rules! debug_info {
    ($category:expr, $($arg:tt)*) => {
        log::info!(target: $category, $($arg)*)
    };
}

#[macro_export]
macro_rules! debug_log {
    ($category:expr, $($arg:tt)*) => {
        log::debug!(target: $category, $($arg)*)
    };
}
