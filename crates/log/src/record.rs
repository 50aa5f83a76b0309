//! In-memory representation of one log event.

use crate::level::Level;
use chrono::{DateTime, Utc};
use std::panic::Location;

/// One log event, built only after the level gate passes.
#[derive(Debug, Clone)]
pub struct Record {
    pub time: DateTime<Utc>,
    pub level: Level,
    pub message: String,
    /// Call site of the public logging method's caller, not of any wrapper
    /// frame inside this crate.
    pub source: &'static Location<'static>,
    pub attrs: Vec<(String, serde_json::Value)>,
}

impl Record {
    /// Timestamp the event and capture the call site.
    ///
    /// `#[track_caller]` propagates through the logging wrapper frames, so
    /// the captured location is wherever user code invoked the public
    /// method.
    #[track_caller]
    pub fn new(
        level: Level,
        message: impl Into<String>,
        attrs: Vec<(String, serde_json::Value)>,
    ) -> Self {
        Self {
            time: Utc::now(),
            level,
            message: message.into(),
            source: Location::caller(),
            attrs,
        }
    }
}
