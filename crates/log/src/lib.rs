//! Leveled structured logging for corekit applications.
//!
//! This crate provides a small JSON logger with an atomically adjustable
//! severity threshold, a custom TRACE level between DEBUG and INFO, and a
//! context type for threading a logger through a call chain without
//! explicit parameter passing.
//!
//! The sink is abstracted behind the [`Handler`] trait so loggers can share
//! one output and tests can capture records. [`Logger::disabled`] gives a
//! capability-compatible no-op for code paths where logging must be
//! structurally present but silent.

mod context;
mod handler;
mod level;
mod logger;
mod record;

pub use context::Context;
pub use handler::{Handler, JsonHandler, NoopHandler};
pub use level::{LEVELS, Level, LevelVar};
pub use logger::Logger;
pub use record::Record;
