//! gale's built-in logging.
//! Enabled with the `tracing` feature (enabled by default).
//!
//! The core logs route registration, lookups, group merges and WebSocket peer
//! lifecycle events through the [`trace!`] macro, which your own code can use
//! as well. Records below the global level are discarded by the macro itself,
//! before their message is ever formatted, so disabled levels cost a single
//! atomic load.
//!
//! Where records go is decided by the installed [`Logger`]. Out of the box
//! they land on stderr; [`set_logger`] swaps in anything else, from a file
//! writer to a bridge into another logging system.
//!
//! ## Example
//! ```
//! use gale::{
//!     trace,
//!     trace::{set_log_level, set_logger, Level, Logger},
//! };
//!
//! struct Prefixed;
//!
//! impl Logger for Prefixed {
//!     fn log(&self, level: Level, msg: std::fmt::Arguments) {
//!         println!("myapp {level}: {msg}");
//!     }
//! }
//!
//! set_log_level(Level::Debug);
//! set_logger(Prefixed);
//!
//! trace!(Level::Info, "listening on {}", 8080);
//! trace!("shorthand for Level::Info");
//! ```

use std::{
    fmt::{self, Arguments},
    io::{self, Write},
    sync::{
        atomic::{AtomicU8, Ordering},
        RwLock,
    },
};

/// Verbosity levels, in increasing order of chattiness.
/// The global default is [`Level::Error`].
#[repr(u8)]
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum Level {
    /// Discard everything.
    Off = 0,
    /// Things that went wrong.
    Error = 1,
    /// Recoverable oddities: bad request bodies, overridden routes.
    Warn = 2,
    /// Startup progress and registration events.
    Info = 3,
    /// Per-request lookups and raw socket chatter.
    /// Mostly useful when debugging gale itself.
    Debug = 4,
}

/// Highest level that will currently be logged.
static MAX_LEVEL: AtomicU8 = AtomicU8::new(Level::Error as u8);

/// The installed log sink, if any.
/// Records fall back to stderr while this is unset.
static LOGGER: RwLock<Option<Box<dyn Logger>>> = RwLock::new(None);

/// A destination for log records.
///
/// Implementations receive only records that passed the level check, already
/// assembled into [`Arguments`], and decide how to write them out.
pub trait Logger: Send + Sync {
    /// Handle one record.
    fn log(&self, level: Level, msg: Arguments);
}

/// Sets the global log level.
/// [`Level::Off`] silences gale entirely.
pub fn set_log_level(level: Level) {
    MAX_LEVEL.store(level as u8, Ordering::Relaxed);
}

/// Installs the [`Logger`] that records are delivered to, replacing the
/// stderr default (or a previously installed one).
pub fn set_logger(logger: impl Logger + 'static) {
    *LOGGER.write().unwrap() = Some(Box::new(logger));
}

/// Whether a record at `level` would currently be logged.
/// The [`trace!`] macro consults this before building its message.
pub fn log_enabled(level: Level) -> bool {
    level != Level::Off && level as u8 <= MAX_LEVEL.load(Ordering::Relaxed)
}

/// Delivers an already level-checked record to the installed logger.
/// Hidden from the docs, as it is only intended for use through the
/// [`trace!`] macro.
#[doc(hidden)]
pub fn _log(level: Level, msg: Arguments) {
    match LOGGER.read().unwrap().as_deref() {
        Some(logger) => logger.log(level, msg),
        None => StderrLogger::new().log(level, msg),
    }
}

/// Simple logging system.
/// See [`mod@crate::trace`] for more information.
///
/// Enabled with the `tracing` feature.
#[macro_export]
macro_rules! trace {
    (Level::$level: ident, $($arg: tt) +) => {
        #[cfg(feature = "tracing")]
        if $crate::trace::log_enabled($crate::trace::Level::$level) {
            $crate::trace::_log($crate::trace::Level::$level, format_args!($($arg)+));
        }
    };
    ($($arg: tt) +) => {
        $crate::trace!(Level::Info, $($arg)+);
    };
}

/// The fallback logger.
/// Writes `gale:<level> <message>` lines to stderr, tinted by level unless
/// colors are turned off.
pub struct StderrLogger {
    /// Whether to wrap records in ANSI color codes.
    pub color: bool,
}

impl StderrLogger {
    /// A colorized stderr logger.
    pub fn new() -> StderrLogger {
        StderrLogger { color: true }
    }

    /// A stderr logger without ANSI colors, for dumb terminals and log
    /// files.
    pub fn plain() -> StderrLogger {
        StderrLogger { color: false }
    }
}

impl Logger for StderrLogger {
    fn log(&self, level: Level, msg: Arguments) {
        let mut out = io::stderr().lock();
        let _ = if self.color {
            writeln!(out, "\x1b[{}mgale:{level}\x1b[0m {msg}", level.color_code())
        } else {
            writeln!(out, "gale:{level} {msg}")
        };
    }
}

impl Default for StderrLogger {
    fn default() -> StderrLogger {
        StderrLogger::new()
    }
}

impl Level {
    /// The ANSI color the stderr logger tints this level with.
    fn color_code(&self) -> u8 {
        match self {
            Level::Error => 31,
            Level::Warn => 33,
            Level::Debug => 36,
            Level::Off | Level::Info => 0,
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Level::Off => "off",
            Level::Error => "error",
            Level::Warn => "warn",
            Level::Info => "info",
            Level::Debug => "debug",
        })
    }
}

#[cfg(test)]
mod test {
    use super::{log_enabled, set_log_level, Level};

    #[test]
    fn test_level_gate() {
        set_log_level(Level::Warn);
        assert!(log_enabled(Level::Error));
        assert!(log_enabled(Level::Warn));
        assert!(!log_enabled(Level::Info));
        assert!(!log_enabled(Level::Debug));
        // Off is never loggable, whatever the global level.
        assert!(!log_enabled(Level::Off));
        set_log_level(Level::Error);
    }
}
