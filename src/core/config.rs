//! Fluent pipeline configuration
//!
//! `LoggerConfiguration` assembles a pipeline stage by stage and produces
//! a `Logger`. Configuration-time errors (unparseable level labels,
//! invalid sink parameters) surface synchronously here and are never
//! subject to runtime error suppression.

use crate::core::enrich::{EnrichStage, Enricher};
use crate::core::error::Result;
use crate::core::event::LogEvent;
use crate::core::filter::FilterStage;
use crate::core::level::{is_enabled, LogEventLevel};
use crate::core::level_switch::{DynamicLevelSwitch, LevelSwitchStage};
use crate::core::logger::Logger;
use crate::core::pipeline::{Pipeline, PipelineStage};
use crate::core::sink::{Sink, SinkStage};
use crate::core::template::{PropertyMap, DEFAULT_CAPTURED_STRING_LENGTH};
use futures::future::BoxFuture;
use std::sync::{Arc, Weak};

/// Builder for a logger pipeline with a fluent API.
///
/// # Example
/// ```
/// use rust_structured_log::prelude::*;
/// use rust_structured_log::sinks::MemorySink;
/// use std::sync::Arc;
///
/// let sink = Arc::new(MemorySink::new());
/// let logger = configure()
///     .min_level(LogEventLevel::Debug)
///     .filter(|e| !e.properties.contains_key("internal"))
///     .write_to_shared(sink)
///     .create();
/// logger.info("Configured", vec![]);
/// ```
pub struct LoggerConfiguration {
    pipeline: Pipeline,
    switches: Vec<Arc<DynamicLevelSwitch>>,
    suppress_errors: bool,
    captured_string_max_length: i32,
}

impl std::fmt::Debug for LoggerConfiguration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoggerConfiguration")
            .field("suppress_errors", &self.suppress_errors)
            .field("captured_string_max_length", &self.captured_string_max_length)
            .finish_non_exhaustive()
    }
}

impl LoggerConfiguration {
    pub fn new() -> Self {
        Self {
            pipeline: Pipeline::new(),
            switches: Vec::new(),
            suppress_errors: true,
            captured_string_max_length: DEFAULT_CAPTURED_STRING_LENGTH,
        }
    }

    /// Adds a sink stage to the pipeline.
    #[must_use = "builder methods return a new value"]
    pub fn write_to<S: Sink + 'static>(self, sink: S) -> Self {
        self.write_to_shared(Arc::new(sink))
    }

    /// Adds a sink stage over an already-shared sink.
    #[must_use = "builder methods return a new value"]
    pub fn write_to_shared(mut self, sink: Arc<dyn Sink>) -> Self {
        self.pipeline.add_stage(PipelineStage::Sink(SinkStage::new(sink)));
        self
    }

    /// Sets the minimum level for subsequent stages via a fixed filter.
    #[must_use = "builder methods return a new value"]
    pub fn min_level(self, level: LogEventLevel) -> Self {
        self.filter(move |event| is_enabled(level, event.level))
    }

    /// Sets the minimum level from a textual label. Unknown labels fail
    /// fast with `InvalidLevel`.
    pub fn min_level_label(self, label: &str) -> Result<Self> {
        let level: LogEventLevel = label.parse()?;
        Ok(self.min_level(level))
    }

    /// Sets the minimum level from a dynamic switch. The switch's flush
    /// delegate is bound to the created pipeline's flush in [`create`].
    ///
    /// [`create`]: LoggerConfiguration::create
    #[must_use = "builder methods return a new value"]
    pub fn min_level_switch(mut self, switch: Arc<DynamicLevelSwitch>) -> Self {
        self.switches.push(Arc::clone(&switch));
        self.pipeline
            .add_stage(PipelineStage::LevelSwitch(LevelSwitchStage::new(switch)));
        self
    }

    /// Adds a filter stage with the given predicate.
    #[must_use = "builder methods return a new value"]
    pub fn filter(mut self, predicate: impl Fn(&LogEvent) -> bool + Send + Sync + 'static) -> Self {
        self.pipeline
            .add_stage(PipelineStage::Filter(FilterStage::new(predicate)));
        self
    }

    /// Adds an enrich stage merging a static property map.
    #[must_use = "builder methods return a new value"]
    pub fn enrich(mut self, properties: PropertyMap) -> Self {
        self.pipeline
            .add_stage(PipelineStage::Enrich(EnrichStage::new(Enricher::from(properties))));
        self
    }

    /// Adds an enrich stage computing properties per event.
    #[must_use = "builder methods return a new value"]
    pub fn enrich_with(
        mut self,
        factory: impl Fn(&PropertyMap) -> PropertyMap + Send + Sync + 'static,
    ) -> Self {
        self.pipeline
            .add_stage(PipelineStage::Enrich(EnrichStage::new(Enricher::from_fn(factory))));
        self
    }

    /// Enables or disables runtime error suppression (default: enabled).
    #[must_use = "builder methods return a new value"]
    pub fn suppress_errors(mut self, suppress: bool) -> Self {
        self.suppress_errors = suppress;
        self
    }

    /// Sets the structured-capture string cap for loggers created from
    /// this configuration. Negative disables the cap.
    #[must_use = "builder methods return a new value"]
    pub fn captured_string_max_length(mut self, max_length: i32) -> Self {
        self.captured_string_max_length = max_length;
        self
    }

    /// Creates the logger, binding every registered level switch's flush
    /// delegate to the finished pipeline.
    pub fn create(self) -> Logger {
        let pipeline = Arc::new(self.pipeline);
        for switch in &self.switches {
            let weak: Weak<Pipeline> = Arc::downgrade(&pipeline);
            switch.set_flush_delegate(Arc::new(move || {
                let weak = weak.clone();
                let flush: BoxFuture<'static, Result<()>> = Box::pin(async move {
                    match weak.upgrade() {
                        Some(pipeline) => pipeline.flush().await,
                        None => Ok(()),
                    }
                });
                flush
            }));
        }

        let mut logger = Logger::new(pipeline, self.suppress_errors);
        logger.set_captured_string_max_length(self.captured_string_max_length);
        logger
    }
}

impl Default for LoggerConfiguration {
    fn default() -> Self {
        Self::new()
    }
}
