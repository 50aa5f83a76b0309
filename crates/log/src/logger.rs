//! The leveled logger.
//!
//! Every emission follows the same path: check the gate (threshold compare
//! plus the handler's own `enabled`), return immediately when disabled
//! with no record built, otherwise capture the call site, build a
//! [`Record`], and dispatch it to the handler.

use crate::context::Context;
use crate::handler::{Handler, JsonHandler, NoopHandler};
use crate::level::{LEVELS, Level, LevelVar};
use crate::record::Record;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// Leveled logger over a shared [`Handler`].
///
/// The handler may be shared by several loggers; the threshold is this
/// logger's own gating state, adjustable at any time via
/// [`Logger::set_level`].
pub struct Logger {
    handler: Arc<dyn Handler>,
    level: Arc<LevelVar>,
}

impl Logger {
    /// JSON logger on stdout with the given initial threshold.
    pub fn new(level: Level) -> Self {
        Self::with_handler(level, Arc::new(JsonHandler::stdout()))
    }

    /// Logger over an injected handler.
    pub fn with_handler(level: Level, handler: Arc<dyn Handler>) -> Self {
        Self {
            handler,
            level: Arc::new(LevelVar::new(level)),
        }
    }

    /// Guaranteed-no-effect logger: `enabled()` is always false and every
    /// emission method returns without observable effect. Useful as a
    /// default before a real logger is injected.
    pub fn disabled() -> Self {
        Self::with_handler(Level::INFO, Arc::new(NoopHandler))
    }

    /// Atomically update the threshold. Takes effect for every subsequent
    /// gating check on this logger and on any [`Logger::share`]d handle;
    /// never affects records already dispatched.
    pub fn set_level(&self, level: Level) {
        self.level.set(level);
    }

    /// The current threshold value.
    pub fn level(&self) -> Level {
        self.level.level()
    }

    fn is_enabled(&self, level: Level) -> bool {
        level >= self.level.level() && self.handler.enabled(level)
    }

    /// Whether a record at the current threshold would be accepted; a
    /// coarse verbosity check, not tied to a specific level.
    pub fn enabled(&self) -> bool {
        self.is_enabled(self.level.level())
    }

    /// Lowest named level currently enabled, probing [`LEVELS`] in
    /// ascending order; [`Level::UNSET`] when the threshold is above every
    /// named level. Introspection only; the hot path re-checks the gate
    /// directly.
    pub fn log_level(&self) -> Level {
        for level in LEVELS {
            if self.is_enabled(level) {
                return level;
            }
        }
        Level::UNSET
    }

    /// Generic entry point every convenience method funnels through.
    ///
    /// When the gate rejects `level`, returns with no record construction
    /// and no handler dispatch.
    #[track_caller]
    pub fn log(&self, ctx: &Context, level: Level, msg: &str, attrs: &[(&str, Value)]) {
        if !self.is_enabled(level) {
            return;
        }
        let attrs = attrs
            .iter()
            .map(|(key, value)| (key.to_string(), value.clone()))
            .collect();
        let record = Record::new(level, msg, attrs);
        self.handler.handle(ctx, &record);
    }

    #[track_caller]
    pub fn trace(&self, msg: &str, attrs: &[(&str, Value)]) {
        self.log(&Context::background(), Level::TRACE, msg, attrs);
    }

    #[track_caller]
    pub fn info(&self, msg: &str, attrs: &[(&str, Value)]) {
        self.log(&Context::background(), Level::INFO, msg, attrs);
    }

    /// Info with a message built by format-string substitution, no
    /// attributes. Callers pass `format_args!(..)`, so nothing is formatted
    /// unless the gate passes.
    #[track_caller]
    pub fn infof(&self, args: fmt::Arguments<'_>) {
        if !self.is_enabled(Level::INFO) {
            return;
        }
        self.log(&Context::background(), Level::INFO, &args.to_string(), &[]);
    }

    #[track_caller]
    pub fn info_context(&self, ctx: &Context, msg: &str, attrs: &[(&str, Value)]) {
        self.log(ctx, Level::INFO, msg, attrs);
    }

    #[track_caller]
    pub fn warn(&self, msg: &str, attrs: &[(&str, Value)]) {
        self.log(&Context::background(), Level::WARN, msg, attrs);
    }

    #[track_caller]
    pub fn error(&self, msg: &str, attrs: &[(&str, Value)]) {
        self.log(&Context::background(), Level::ERROR, msg, attrs);
    }

    /// Derived context carrying this logger, recoverable later via
    /// [`Logger::from_context`].
    pub fn with_context(self: &Arc<Self>, ctx: &Context) -> Context {
        ctx.with_logger(Arc::clone(self))
    }

    /// Recover the logger attached by [`Logger::with_context`]. Returns
    /// the identical instance, not a copy.
    pub fn from_context(ctx: &Context) -> Option<Arc<Logger>> {
        ctx.logger().cloned()
    }

    /// Second handle aliasing this logger's threshold: `set_level` on
    /// either handle is observed by both. Contrast with `clone`, which
    /// detaches the threshold.
    pub fn share(&self) -> Logger {
        Logger {
            handler: Arc::clone(&self.handler),
            level: Arc::clone(&self.level),
        }
    }
}

impl Clone for Logger {
    /// Independent copy: the handler is shared, the threshold is
    /// snapshotted into a fresh cell, so `set_level` on one handle never
    /// leaks to the other.
    fn clone(&self) -> Self {
        Self {
            handler: Arc::clone(&self.handler),
            level: Arc::new(LevelVar::new(self.level.level())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Handler counting dispatches, for gate assertions.
    #[derive(Default)]
    struct CountingHandler {
        handled: AtomicUsize,
    }

    impl Handler for CountingHandler {
        fn enabled(&self, _level: Level) -> bool {
            true
        }

        fn handle(&self, _ctx: &Context, _record: &Record) {
            self.handled.fetch_add(1, Ordering::Relaxed);
        }
    }

    fn counting_logger(level: Level) -> (Logger, Arc<CountingHandler>) {
        let handler = Arc::new(CountingHandler::default());
        let logger = Logger::with_handler(level, handler.clone());
        (logger, handler)
    }

    #[test]
    fn test_gate_blocks_below_threshold() {
        let (logger, handler) = counting_logger(Level::WARN);

        logger.trace("dropped", &[]);
        logger.info("dropped", &[]);
        assert_eq!(handler.handled.load(Ordering::Relaxed), 0);

        logger.warn("kept", &[]);
        logger.error("kept", &[]);
        assert_eq!(handler.handled.load(Ordering::Relaxed), 2);
    }

    #[test]
    fn test_set_level_applies_to_subsequent_calls() {
        let (logger, handler) = counting_logger(Level::ERROR);

        logger.info("dropped", &[]);
        logger.set_level(Level::DEBUG);
        logger.info("kept", &[]);
        logger.trace("kept", &[]);

        assert_eq!(handler.handled.load(Ordering::Relaxed), 2);
    }

    #[test]
    fn test_log_level_probes_lowest_enabled() {
        let (logger, _handler) = counting_logger(Level::DEBUG);
        assert_eq!(logger.log_level(), Level::DEBUG);

        logger.set_level(Level::TRACE);
        assert_eq!(logger.log_level(), Level::TRACE);

        // threshold between named points: lowest named level at or above it
        logger.set_level(Level(2));
        assert_eq!(logger.log_level(), Level::WARN);

        logger.set_level(Level::ERROR);
        assert_eq!(logger.log_level(), Level::ERROR);
    }

    #[test]
    fn test_log_level_sentinel_when_threshold_above_error() {
        let (logger, _handler) = counting_logger(Level(9));
        assert_eq!(logger.log_level(), Level::UNSET);
    }

    #[test]
    fn test_disabled_logger_has_no_effect() {
        let logger = Logger::disabled();
        assert!(!logger.enabled());
        assert_eq!(logger.log_level(), Level::UNSET);

        // must be a guaranteed-no-effect call at every level
        logger.trace("ignored", &[]);
        logger.error("ignored", &[]);
    }

    #[test]
    fn test_infof_does_not_format_when_disabled() {
        struct PanicsOnDisplay;

        impl fmt::Display for PanicsOnDisplay {
            fn fmt(&self, _f: &mut fmt::Formatter<'_>) -> fmt::Result {
                panic!("formatted a disabled record");
            }
        }

        let (logger, handler) = counting_logger(Level::WARN);
        logger.infof(format_args!("value: {}", PanicsOnDisplay));
        assert_eq!(handler.handled.load(Ordering::Relaxed), 0);
    }

    #[test]
    fn test_with_context_round_trips_identical_logger() {
        let logger = Arc::new(Logger::disabled());
        let ctx = logger.with_context(&Context::background());

        let recovered = Logger::from_context(&ctx).expect("logger should be attached");
        assert!(Arc::ptr_eq(&logger, &recovered));
    }

    #[test]
    fn test_from_context_on_background_is_none() {
        assert!(Logger::from_context(&Context::background()).is_none());
    }

    #[test]
    fn test_clone_detaches_threshold() {
        let (logger, handler) = counting_logger(Level::INFO);
        let copy = logger.clone();

        logger.set_level(Level::ERROR);
        // the copy keeps its snapshotted threshold
        copy.info("kept", &[]);
        logger.info("dropped", &[]);

        assert_eq!(handler.handled.load(Ordering::Relaxed), 1);
        assert_eq!(copy.level(), Level::INFO);
        assert_eq!(logger.level(), Level::ERROR);
    }

    #[test]
    fn test_share_aliases_threshold() {
        let (logger, _handler) = counting_logger(Level::INFO);
        let handle = logger.share();

        handle.set_level(Level::ERROR);
        assert_eq!(logger.level(), Level::ERROR);

        logger.set_level(Level::DEBUG);
        assert_eq!(handle.level(), Level::DEBUG);
    }

    #[test]
    fn test_concurrent_set_level_and_gating() {
        let (logger, _handler) = counting_logger(Level::INFO);
        let logger = Arc::new(logger);

        let writers: Vec<_> = (0..4)
            .map(|i| {
                let logger = Arc::clone(&logger);
                std::thread::spawn(move || {
                    let level = if i % 2 == 0 { Level::DEBUG } else { Level::ERROR };
                    for _ in 0..1_000 {
                        logger.set_level(level);
                    }
                })
            })
            .collect();

        let readers: Vec<_> = (0..4)
            .map(|_| {
                let logger = Arc::clone(&logger);
                std::thread::spawn(move || {
                    for _ in 0..1_000 {
                        // a torn value would fall outside the two stored levels
                        let level = logger.level();
                        assert!(level == Level::DEBUG || level == Level::ERROR || level == Level::INFO);
                        logger.info("spin", &[]);
                    }
                })
            })
            .collect();

        for handle in writers.into_iter().chain(readers) {
            handle.join().unwrap();
        }
    }
}
