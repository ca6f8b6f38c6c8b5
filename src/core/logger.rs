//! Main logger implementation
//!
//! A `Logger` owns a shared pipeline and turns template-plus-arguments
//! calls into single-event batches. Runtime failures inside stages are
//! caught at this boundary: suppressed by default (reported on stderr),
//! propagated when suppression is disabled.

use crate::core::enrich::{EnrichStage, Enricher};
use crate::core::error::Result;
use crate::core::event::{DynError, LogEvent};
use crate::core::level::LogEventLevel;
use crate::core::pipeline::{Pipeline, PipelineStage};
use crate::core::sink::Sink;
use crate::core::template::{MessageTemplate, DEFAULT_CAPTURED_STRING_LENGTH};
use async_trait::async_trait;
use serde_json::Value;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

pub struct Logger {
    pipeline: Arc<Pipeline>,
    suppress_errors: bool,
    captured_string_max_length: i32,
}

impl Logger {
    /// Creates a logger over an existing pipeline. Most callers should go
    /// through [`crate::configure`] instead.
    pub fn new(pipeline: Arc<Pipeline>, suppress_errors: bool) -> Self {
        Self {
            pipeline,
            suppress_errors,
            captured_string_max_length: DEFAULT_CAPTURED_STRING_LENGTH,
        }
    }

    /// Sets the cap applied when structured arguments are captured as JSON
    /// text. Negative disables the cap.
    pub fn set_captured_string_max_length(&mut self, max_length: i32) {
        self.captured_string_max_length = max_length;
    }

    pub fn suppress_errors(&self) -> bool {
        self.suppress_errors
    }

    /// Derives a child logger: every non-sink stage is carried over in
    /// order, one new enrich stage is appended after them, and the sink
    /// stages follow, shared by reference so parent and child deliver to
    /// the same destinations.
    pub fn create_child(&self, enricher: impl Into<Enricher>) -> Logger {
        let mut transforms = Vec::new();
        let mut sinks = Vec::new();
        for stage in self.pipeline.stages() {
            if stage.is_sink() {
                sinks.push(Arc::clone(stage));
            } else {
                transforms.push(Arc::clone(stage));
            }
        }

        let mut pipeline = Pipeline::new();
        for stage in transforms {
            pipeline.add_shared_stage(stage);
        }
        pipeline.add_stage(PipelineStage::Enrich(EnrichStage::new(enricher.into())));
        for stage in sinks {
            pipeline.add_shared_stage(stage);
        }

        Logger {
            pipeline: Arc::new(pipeline),
            suppress_errors: self.suppress_errors,
            captured_string_max_length: self.captured_string_max_length,
        }
    }

    pub fn log(&self, level: LogEventLevel, template: &str, args: Vec<Value>) {
        self.write(level, template, args, None);
    }

    pub fn log_with(
        &self,
        level: LogEventLevel,
        error: DynError,
        template: &str,
        args: Vec<Value>,
    ) {
        self.write(level, template, args, Some(error));
    }

    #[inline]
    pub fn fatal(&self, template: &str, args: Vec<Value>) {
        self.write(LogEventLevel::Fatal, template, args, None);
    }

    #[inline]
    pub fn error(&self, template: &str, args: Vec<Value>) {
        self.write(LogEventLevel::Error, template, args, None);
    }

    #[inline]
    pub fn warn(&self, template: &str, args: Vec<Value>) {
        self.write(LogEventLevel::Warning, template, args, None);
    }

    #[inline]
    pub fn info(&self, template: &str, args: Vec<Value>) {
        self.write(LogEventLevel::Information, template, args, None);
    }

    #[inline]
    pub fn debug(&self, template: &str, args: Vec<Value>) {
        self.write(LogEventLevel::Debug, template, args, None);
    }

    #[inline]
    pub fn verbose(&self, template: &str, args: Vec<Value>) {
        self.write(LogEventLevel::Verbose, template, args, None);
    }

    pub fn fatal_with(&self, error: DynError, template: &str, args: Vec<Value>) {
        self.write(LogEventLevel::Fatal, template, args, Some(error));
    }

    pub fn error_with(&self, error: DynError, template: &str, args: Vec<Value>) {
        self.write(LogEventLevel::Error, template, args, Some(error));
    }

    pub fn warn_with(&self, error: DynError, template: &str, args: Vec<Value>) {
        self.write(LogEventLevel::Warning, template, args, Some(error));
    }

    pub fn info_with(&self, error: DynError, template: &str, args: Vec<Value>) {
        self.write(LogEventLevel::Information, template, args, Some(error));
    }

    pub fn debug_with(&self, error: DynError, template: &str, args: Vec<Value>) {
        self.write(LogEventLevel::Debug, template, args, Some(error));
    }

    pub fn verbose_with(&self, error: DynError, template: &str, args: Vec<Value>) {
        self.write(LogEventLevel::Verbose, template, args, Some(error));
    }

    /// Flushes the pipeline. When suppression is enabled the result is
    /// always `Ok`; failures go to the diagnostic side channel.
    pub async fn flush(&self) -> Result<()> {
        match self.pipeline.flush().await {
            Ok(()) => Ok(()),
            Err(e) if self.suppress_errors => {
                eprintln!("[LOGGER ERROR] Pipeline flush failed: {}", e);
                Ok(())
            }
            Err(e) => Err(e),
        }
    }

    fn write(
        &self,
        level: LogEventLevel,
        template: &str,
        args: Vec<Value>,
        error: Option<DynError>,
    ) {
        let template =
            MessageTemplate::with_max_captured_length(template, self.captured_string_max_length);
        let properties = template.bind_properties(args);
        let mut event = LogEvent::new(level, template, properties);
        if let Some(error) = error {
            event = event.with_error(error);
        }
        self.dispatch(vec![event]);
    }

    /// Emits a batch with panic isolation: caller-supplied predicates,
    /// enrichers, and sinks must not be able to crash the logging call
    /// while suppression is on.
    fn dispatch(&self, events: Vec<LogEvent>) {
        let result = panic::catch_unwind(AssertUnwindSafe(|| self.pipeline.emit(events)));
        if let Err(payload) = result {
            if self.suppress_errors {
                eprintln!(
                    "[LOGGER ERROR] Pipeline stage panicked: {}. Event batch dropped.",
                    panic_message(&payload)
                );
            } else {
                panic::resume_unwind(payload);
            }
        }
    }
}

#[async_trait]
impl Sink for Logger {
    fn emit(&self, events: &[LogEvent]) {
        self.dispatch(events.to_vec());
    }

    async fn flush(&self) -> Result<()> {
        Logger::flush(self).await
    }

    fn name(&self) -> &str {
        "logger"
    }
}

fn panic_message(payload: &Box<dyn std::any::Any + Send>) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "Unknown panic".to_string()
    }
}
