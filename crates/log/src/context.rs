//! Call context carrying an attached logger.

use crate::logger::Logger;
use std::sync::Arc;

/// Explicitly passed call context.
///
/// The only value it carries is the logger attached by
/// [`Logger::with_context`], held in a slot callers cannot reach directly,
/// so the attachment cannot collide with any caller-visible key space.
/// Cancellation is not modeled; emission is always fast and synchronous.
#[derive(Clone, Default)]
pub struct Context {
    logger: Option<Arc<Logger>>,
}

impl Context {
    /// An empty context with nothing attached.
    pub fn background() -> Self {
        Self::default()
    }

    pub(crate) fn with_logger(&self, logger: Arc<Logger>) -> Self {
        Self {
            logger: Some(logger),
        }
    }

    pub(crate) fn logger(&self) -> Option<&Arc<Logger>> {
        self.logger.as_ref()
    }
}
