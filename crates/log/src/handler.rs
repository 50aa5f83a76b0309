//! Record sinks.
//!
//! A [`Handler`] receives records that already passed the logger's level
//! gate. Handlers are shared across loggers via `Arc` and must be safe for
//! concurrent dispatch.

use crate::context::Context;
use crate::level::Level;
use crate::record::Record;
use serde_json::Value;
use std::io::{self, Write};
use std::sync::Mutex;

/// Sink and formatter for accepted log records.
pub trait Handler: Send + Sync {
    /// Whether the sink itself accepts records at `level`. The logger
    /// consults this in addition to its own threshold.
    fn enabled(&self, level: Level) -> bool;

    /// Consume one record. Dispatch failures must be swallowed here;
    /// logging is never allowed to fail the operation being logged.
    fn handle(&self, ctx: &Context, record: &Record);
}

/// Writes one JSON object per record.
///
/// Fields: `time` (RFC 3339), `level` (label, `TRACE` for the custom
/// level), `source` (`file:line` of the call site), `msg`, and every
/// attribute pair flattened into the object.
pub struct JsonHandler<W: Write + Send> {
    out: Mutex<W>,
}

impl JsonHandler<io::Stdout> {
    /// Handler writing to the process's standard output stream.
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write + Send> JsonHandler<W> {
    pub fn new(out: W) -> Self {
        Self { out: Mutex::new(out) }
    }
}

impl<W: Write + Send> Handler for JsonHandler<W> {
    fn enabled(&self, _level: Level) -> bool {
        true
    }

    fn handle(&self, _ctx: &Context, record: &Record) {
        let mut body = serde_json::Map::new();
        body.insert("time".to_string(), Value::String(record.time.to_rfc3339()));
        body.insert("level".to_string(), Value::String(record.level.to_string()));
        body.insert(
            "source".to_string(),
            Value::String(format!("{}:{}", record.source.file(), record.source.line())),
        );
        body.insert("msg".to_string(), Value::String(record.message.clone()));
        for (key, value) in &record.attrs {
            body.insert(key.clone(), value.clone());
        }

        // Write failures (and a poisoned writer lock) are swallowed.
        if let Ok(mut out) = self.out.lock() {
            let _ = serde_json::to_writer(&mut *out, &Value::Object(body));
            let _ = out.write_all(b"\n");
        }
    }
}

/// Handler that accepts nothing and emits nothing.
///
/// Backing a [`crate::Logger`] with this gives a guaranteed-no-effect
/// logger whose `enabled()` is always false.
pub struct NoopHandler;

impl Handler for NoopHandler {
    fn enabled(&self, _level: Level) -> bool {
        false
    }

    fn handle(&self, _ctx: &Context, _record: &Record) {}
}
