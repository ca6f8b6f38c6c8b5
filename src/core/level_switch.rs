//! Dynamic level control
//!
//! A `DynamicLevelSwitch` is a shared mutable severity threshold consulted
//! per event by a `LevelSwitchStage`. Every mutator first awaits the bound
//! flush delegate and only then commits the new threshold, so events
//! admitted under the old criterion are fully delivered before the filter
//! changes.

use crate::core::error::Result;
use crate::core::event::LogEvent;
use crate::core::level::{is_enabled, LogEventLevel};
use futures::future::BoxFuture;
use parking_lot::RwLock;
use std::sync::Arc;

/// Zero-argument completion callback, wired by the configuration layer to
/// the owning pipeline's flush.
pub type FlushDelegate = Arc<dyn Fn() -> BoxFuture<'static, Result<()>> + Send + Sync>;

#[derive(Default)]
pub struct DynamicLevelSwitch {
    min_level: RwLock<Option<LogEventLevel>>,
    flush_delegate: RwLock<Option<FlushDelegate>>,
}

impl DynamicLevelSwitch {
    /// A switch with no restriction: every level is enabled until a
    /// threshold is set.
    pub fn new() -> Self {
        Self::default()
    }

    /// A switch with an explicit initial threshold.
    pub fn with_level(level: LogEventLevel) -> Self {
        Self {
            min_level: RwLock::new(Some(level)),
            flush_delegate: RwLock::new(None),
        }
    }

    /// Binds the flush delegate. Set by the configuration layer when the
    /// owning pipeline is created; callers should not normally touch this.
    pub fn set_flush_delegate(&self, delegate: FlushDelegate) {
        *self.flush_delegate.write() = Some(delegate);
    }

    pub fn is_enabled(&self, level: LogEventLevel) -> bool {
        match *self.min_level.read() {
            None => true,
            Some(min) => is_enabled(min, level),
        }
    }

    /// Flushes the owning pipeline, then commits the new threshold.
    /// A delegate failure aborts the commit.
    pub async fn set(&self, level: LogEventLevel) -> Result<LogEventLevel> {
        let delegate = self.flush_delegate.read().clone();
        if let Some(delegate) = delegate {
            delegate().await?;
        }
        *self.min_level.write() = Some(level);
        Ok(level)
    }

    pub async fn fatal(&self) -> Result<LogEventLevel> {
        self.set(LogEventLevel::Fatal).await
    }

    pub async fn error(&self) -> Result<LogEventLevel> {
        self.set(LogEventLevel::Error).await
    }

    pub async fn warning(&self) -> Result<LogEventLevel> {
        self.set(LogEventLevel::Warning).await
    }

    pub async fn information(&self) -> Result<LogEventLevel> {
        self.set(LogEventLevel::Information).await
    }

    pub async fn debug(&self) -> Result<LogEventLevel> {
        self.set(LogEventLevel::Debug).await
    }

    pub async fn verbose(&self) -> Result<LogEventLevel> {
        self.set(LogEventLevel::Verbose).await
    }

    pub async fn off(&self) -> Result<LogEventLevel> {
        self.set(LogEventLevel::Off).await
    }
}

/// Filter stage parameterized by a live switch threshold.
pub struct LevelSwitchStage {
    switch: Arc<DynamicLevelSwitch>,
}

impl LevelSwitchStage {
    pub fn new(switch: Arc<DynamicLevelSwitch>) -> Self {
        Self { switch }
    }

    pub fn set_flush_delegate(&self, delegate: FlushDelegate) {
        self.switch.set_flush_delegate(delegate);
    }

    pub fn emit(&self, events: Vec<LogEvent>) -> Vec<LogEvent> {
        events
            .into_iter()
            .filter(|event| self.switch.is_enabled(event.level))
            .collect()
    }
}
