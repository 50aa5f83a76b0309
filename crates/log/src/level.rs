//! Severity levels and the shared threshold cell.

use std::fmt;
use std::sync::atomic::{AtomicI8, Ordering};

/// Ordered log severity.
///
/// The numeric values step by 4 between the standard levels, with TRACE
/// inserted at an unused value between DEBUG and INFO. Consumers that
/// filter numerically depend on these exact values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Level(pub i8);

impl Level {
    pub const DEBUG: Level = Level(-4);
    pub const TRACE: Level = Level(-2);
    pub const INFO: Level = Level(0);
    pub const WARN: Level = Level(4);
    pub const ERROR: Level = Level(8);

    /// Sentinel below every named level, returned by level probes when
    /// nothing is enabled.
    pub const UNSET: Level = Level(-10);
}

/// Named levels in ascending severity; the fixed probe order used by
/// [`crate::Logger::log_level`].
pub const LEVELS: [Level; 5] = [
    Level::DEBUG,
    Level::TRACE,
    Level::INFO,
    Level::WARN,
    Level::ERROR,
];

impl fmt::Display for Level {
    /// Standard level names, with the literal `TRACE` for the custom level
    /// and `NAME+n` offsets for unnamed values.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn offset(f: &mut fmt::Formatter<'_>, name: &str, delta: i8) -> fmt::Result {
            if delta == 0 {
                f.write_str(name)
            } else {
                write!(f, "{name}{delta:+}")
            }
        }

        if *self == Level::TRACE {
            f.write_str("TRACE")
        } else if self.0 < Level::INFO.0 {
            offset(f, "DEBUG", self.0 - Level::DEBUG.0)
        } else if self.0 < Level::WARN.0 {
            offset(f, "INFO", self.0 - Level::INFO.0)
        } else if self.0 < Level::ERROR.0 {
            offset(f, "WARN", self.0 - Level::WARN.0)
        } else {
            offset(f, "ERROR", self.0 - Level::ERROR.0)
        }
    }
}

/// Lock-free shared severity threshold.
///
/// Safe for concurrent reads from gating checks and concurrent writes from
/// `set_level`, without external locking. Relaxed ordering suffices: the
/// cell is a single word with no dependent data.
#[derive(Debug)]
pub struct LevelVar(AtomicI8);

impl LevelVar {
    pub fn new(level: Level) -> Self {
        Self(AtomicI8::new(level.0))
    }

    pub fn level(&self) -> Level {
        Level(self.0.load(Ordering::Relaxed))
    }

    pub fn set(&self, level: Level) {
        self.0.store(level.0, Ordering::Relaxed);
    }
}

impl Default for LevelVar {
    fn default() -> Self {
        Self::new(Level::INFO)
    }
}
