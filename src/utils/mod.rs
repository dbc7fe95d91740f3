//! Utilities: logging (dynamic level).
//!
//! Diagnostics write to stderr; stdout is reserved for the response
//! document. Nothing logs below Debug, so the default level stays silent
//! and the one-document-per-stream contract holds.
//!
//! Key items:
//!   init_logging / derive_level
//!   log_debug! / log_trace!

use std::sync::OnceLock;
use std::sync::atomic::{AtomicU8, Ordering};

/// Logging helpers.
pub mod logging {
    use super::*;

    #[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd)]
    pub enum LogLevel {
        Error = 0,
        Info = 1,
        Debug = 2,
        Trace = 3,
    }

    impl LogLevel {
        pub fn as_str(&self) -> &'static str {
            match self {
                LogLevel::Error => "ERROR",
                LogLevel::Info => "INFO",
                LogLevel::Debug => "DEBUG",
                LogLevel::Trace => "TRACE",
            }
        }
    }

    static GLOBAL_LEVEL: OnceLock<AtomicU8> = OnceLock::new();

    fn inner_cell() -> &'static AtomicU8 {
        GLOBAL_LEVEL.get_or_init(|| AtomicU8::new(LogLevel::Info as u8))
    }

    pub fn init_logging(level: LogLevel) {
        set_log_level(level);
    }

    pub fn set_log_level(level: LogLevel) {
        inner_cell().store(level as u8, Ordering::Relaxed);
    }

    pub fn current_log_level() -> LogLevel {
        match inner_cell().load(Ordering::Relaxed) {
            0 => LogLevel::Error,
            1 => LogLevel::Info,
            2 => LogLevel::Debug,
            _ => LogLevel::Trace,
        }
    }

    pub fn derive_level(verbose: u8, quiet: bool) -> LogLevel {
        if quiet {
            return LogLevel::Error;
        }
        match verbose {
            0 => LogLevel::Info,
            1 => LogLevel::Debug,
            _ => LogLevel::Trace,
        }
    }

    fn should_emit(level: LogLevel) -> bool {
        level <= current_log_level()
    }

    pub fn log(level: LogLevel, msg: impl AsRef<str>) {
        if should_emit(level) {
            eprintln!("[{}] {}", level.as_str(), msg.as_ref());
        }
    }

    pub fn debug(msg: impl AsRef<str>) {
        log(LogLevel::Debug, msg);
    }
    pub fn trace(msg: impl AsRef<str>) {
        log(LogLevel::Trace, msg);
    }

    #[macro_export]
    macro_rules! log_debug {
        ($($t:tt)*) => { $crate::utils::logging::debug(format!($($t)*)) };
    }
    #[macro_export]
    macro_rules! log_trace {
        ($($t:tt)*) => { $crate::utils::logging::trace(format!($($t)*)) };
    }
}

pub use logging::{derive_level, init_logging};

/* --------------------------------- Tests ---------------------------------- */
