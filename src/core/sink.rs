//! Sink capability trait and the stage adapter that hosts a sink inside a
//! pipeline

use crate::core::error::Result;
use crate::core::event::LogEvent;
use async_trait::async_trait;
use std::sync::Arc;

/// Terminal collaborator that delivers events to a destination.
///
/// `emit` accepts a batch fire-and-forget; delivery confirmation and
/// failures surface only through `flush`.
#[async_trait]
pub trait Sink: Send + Sync {
    /// Accept a batch of events for delivery.
    fn emit(&self, events: &[LogEvent]);

    /// Resolve once every accepted event has been delivered.
    async fn flush(&self) -> Result<()>;

    /// Sink name used in stage failure diagnostics.
    fn name(&self) -> &str {
        "sink"
    }
}

/// Adapts a shared sink into the stage contract: forwards the batch to the
/// sink and passes it through unchanged, so later stages still observe it.
pub struct SinkStage {
    sink: Arc<dyn Sink>,
}

impl SinkStage {
    pub fn new(sink: Arc<dyn Sink>) -> Self {
        Self { sink }
    }

    /// The shared sink, for identity-preserving pipeline rebuilds.
    pub fn sink(&self) -> &Arc<dyn Sink> {
        &self.sink
    }

    pub fn emit(&self, events: Vec<LogEvent>) -> Vec<LogEvent> {
        self.sink.emit(&events);
        events
    }

    pub async fn flush(&self) -> Result<()> {
        self.sink.flush().await
    }

    pub fn name(&self) -> String {
        format!("sink:{}", self.sink.name())
    }
}
