//! # Rust Structured Log
//!
//! A structured, Serilog-style event logging pipeline: message templates
//! with positionally bound arguments, a composable stage pipeline
//! (filter, enrich, dynamic level switch, sinks), and a bitmask severity
//! model with O(1) enablement checks.
//!
//! ## Features
//!
//! - **Message Templates**: Parse-once templates with named/positional
//!   placeholders, destructuring hints, and size-bounded capture
//! - **Composable Pipeline**: Ordered filter/enrich/sink stages over
//!   event batches
//! - **Dynamic Level Control**: A shared level switch that flushes the
//!   pipeline before changing its threshold
//! - **Forgiving by Design**: Malformed templates and mismatched
//!   arguments degrade gracefully; logging never crashes the caller

pub mod core;
pub mod macros;
pub mod sinks;

pub mod prelude {
    pub use crate::configure;
    pub use crate::core::{
        DynamicLevelSwitch, Enricher, LogEvent, LogEventLevel, Logger, LoggerConfiguration,
        LoggerError, MessageTemplate, Pipeline, PipelineStage, PropertyMap, Result, Sink,
    };
}

pub use crate::core::{
    is_enabled, DestructureHint, DynError, DynamicLevelSwitch, EnrichStage, Enricher, FilterStage,
    FlushDelegate, LevelSwitchStage, LogEvent, LogEventLevel, Logger, LoggerConfiguration,
    LoggerError, MessageTemplate, Pipeline, PipelineStage, PropertyMap, PropertyToken, Result,
    Sink, SinkStage, Token, DEFAULT_CAPTURED_STRING_LENGTH,
};

/// Starts a fluent logger configuration.
///
/// # Example
/// ```
/// use rust_structured_log::prelude::*;
/// use rust_structured_log::sinks::MemorySink;
/// use std::sync::Arc;
///
/// let sink = Arc::new(MemorySink::new());
/// let logger = configure()
///     .min_level(LogEventLevel::Information)
///     .write_to_shared(sink)
///     .create();
/// logger.info("Hello {name}", vec![serde_json::json!("World")]);
/// ```
pub fn configure() -> LoggerConfiguration {
    LoggerConfiguration::new()
}

#[doc(hidden)]
pub mod __private {
    pub use serde_json::json;
}
