//! log
//!
//! Level-threshold logging.
//!
//! # Design
//!
//! Output goes straight to stdout/stderr; there is no log file and no
//! structured sink. The threshold is picked once from the global flags
//! (`--trace`, `--debug`, `--quiet`) and lives on the [`Logger`] carried by
//! the global context. Warnings and errors go to stderr so tool output on
//! stdout stays clean.

use std::fmt;
use std::str::FromStr;

/// Log level, ordered from most to least verbose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warning,
    Error,
}

impl LogLevel {
    /// Create a level from the global verbosity flags.
    ///
    /// `--trace` wins over `--debug` wins over `--quiet`.
    pub fn from_flags(trace: bool, debug: bool, quiet: bool) -> Self {
        if trace {
            LogLevel::Trace
        } else if debug {
            LogLevel::Debug
        } else if quiet {
            LogLevel::Warning
        } else {
            LogLevel::Info
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warning => "warning",
            LogLevel::Error => "error",
        };
        f.write_str(name)
    }
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warning" | "warn" => Ok(LogLevel::Warning),
            "error" => Ok(LogLevel::Error),
            other => Err(format!("unknown log level '{}'", other)),
        }
    }
}

/// Threshold logger.
///
/// Cheap to copy; the dispatcher and matcher take it by reference.
#[derive(Debug, Clone, Copy)]
pub struct Logger {
    threshold: LogLevel,
}

impl Logger {
    /// Create a logger with the given threshold.
    pub fn new(threshold: LogLevel) -> Self {
        Self { threshold }
    }

    /// Current threshold.
    pub fn threshold(&self) -> LogLevel {
        self.threshold
    }

    /// Change the threshold (global flags re-applied per shell line).
    pub fn set_threshold(&mut self, threshold: LogLevel) {
        self.threshold = threshold;
    }

    /// Whether messages at `level` would be emitted.
    pub fn enabled(&self, level: LogLevel) -> bool {
        level >= self.threshold
    }

    pub fn trace(&self, message: impl fmt::Display) {
        if self.enabled(LogLevel::Trace) {
            eprintln!("[trace] {}", message);
        }
    }

    pub fn debug(&self, message: impl fmt::Display) {
        if self.enabled(LogLevel::Debug) {
            eprintln!("[debug] {}", message);
        }
    }

    pub fn info(&self, message: impl fmt::Display) {
        if self.enabled(LogLevel::Info) {
            println!("{}", message);
        }
    }

    pub fn warning(&self, message: impl fmt::Display) {
        if self.enabled(LogLevel::Warning) {
            eprintln!("warning: {}", message);
        }
    }

    pub fn error(&self, message: impl fmt::Display) {
        eprintln!("error: {}", message);
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new(LogLevel::Info)
    }
}
