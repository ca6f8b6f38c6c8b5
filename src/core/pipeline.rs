//! Ordered stage pipeline
//!
//! A pipeline threads a batch of events through its stages in registration
//! order. `emit` is fully synchronous; anything asynchronous a sink does is
//! only observable through `flush`.

use crate::core::enrich::EnrichStage;
use crate::core::error::{LoggerError, Result};
use crate::core::event::LogEvent;
use crate::core::filter::FilterStage;
use crate::core::level_switch::LevelSwitchStage;
use crate::core::sink::SinkStage;
use futures::future::join_all;
use std::sync::Arc;

/// The closed set of pipeline stage variants.
pub enum PipelineStage {
    Filter(FilterStage),
    Enrich(EnrichStage),
    LevelSwitch(LevelSwitchStage),
    Sink(SinkStage),
}

impl PipelineStage {
    pub fn emit(&self, events: Vec<LogEvent>) -> Vec<LogEvent> {
        match self {
            PipelineStage::Filter(stage) => stage.emit(events),
            PipelineStage::Enrich(stage) => stage.emit(events),
            PipelineStage::LevelSwitch(stage) => stage.emit(events),
            PipelineStage::Sink(stage) => stage.emit(events),
        }
    }

    /// Transform stages flush trivially; only sink-backed stages have
    /// pending work to settle.
    pub async fn flush(&self) -> Result<()> {
        match self {
            PipelineStage::Filter(_) | PipelineStage::Enrich(_) | PipelineStage::LevelSwitch(_) => {
                Ok(())
            }
            PipelineStage::Sink(stage) => stage.flush().await,
        }
    }

    pub fn name(&self) -> String {
        match self {
            PipelineStage::Filter(_) => "filter".to_string(),
            PipelineStage::Enrich(_) => "enrich".to_string(),
            PipelineStage::LevelSwitch(_) => "level-switch".to_string(),
            PipelineStage::Sink(stage) => stage.name(),
        }
    }

    pub fn is_sink(&self) -> bool {
        matches!(self, PipelineStage::Sink(_))
    }
}

/// Ordered sequence of stages. Stages are appended at configuration time
/// and never removed.
#[derive(Default)]
pub struct Pipeline {
    stages: Vec<Arc<PipelineStage>>,
}

impl Pipeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a stage to the pipeline.
    pub fn add_stage(&mut self, stage: PipelineStage) {
        self.stages.push(Arc::new(stage));
    }

    /// Appends an already-shared stage, preserving its identity. Used for
    /// child pipeline derivation, where sink stages are shared by
    /// reference rather than copied.
    pub fn add_shared_stage(&mut self, stage: Arc<PipelineStage>) {
        self.stages.push(stage);
    }

    pub fn stages(&self) -> &[Arc<PipelineStage>] {
        &self.stages
    }

    /// Folds the batch through every stage in order. A stage that returns
    /// an empty batch short-circuits the remaining stages for this call.
    pub fn emit(&self, events: Vec<LogEvent>) -> Vec<LogEvent> {
        let mut batch = events;
        for stage in &self.stages {
            if batch.is_empty() {
                break;
            }
            batch = stage.emit(batch);
        }
        batch
    }

    /// Flushes every stage and resolves once all flushes have settled.
    /// Fails with the first stage failure, in registration order.
    pub async fn flush(&self) -> Result<()> {
        let results = join_all(self.stages.iter().map(|stage| stage.flush())).await;
        for (stage, result) in self.stages.iter().zip(results) {
            result.map_err(|e| {
                LoggerError::stage_failure(stage.name(), "flush", e.to_string())
            })?;
        }
        Ok(())
    }
}
