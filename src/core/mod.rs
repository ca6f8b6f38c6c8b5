//! Core pipeline types and traits

pub mod config;
pub mod enrich;
pub mod error;
pub mod event;
pub mod filter;
pub mod level;
pub mod level_switch;
pub mod logger;
pub mod pipeline;
pub mod sink;
pub mod template;

pub use config::LoggerConfiguration;
pub use enrich::{EnrichStage, Enricher};
pub use error::{LoggerError, Result};
pub use event::{DynError, LogEvent};
pub use filter::{FilterPredicate, FilterStage};
pub use level::{is_enabled, LogEventLevel};
pub use level_switch::{DynamicLevelSwitch, FlushDelegate, LevelSwitchStage};
pub use logger::Logger;
pub use pipeline::{Pipeline, PipelineStage};
pub use sink::{Sink, SinkStage};
pub use template::{
    DestructureHint, MessageTemplate, PropertyMap, PropertyToken, Token,
    DEFAULT_CAPTURED_STRING_LENGTH,
};
