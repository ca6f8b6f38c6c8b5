//! Log event structure

use crate::core::level::LogEventLevel;
use crate::core::template::{MessageTemplate, PropertyMap};
use chrono::{DateTime, SecondsFormat, Utc};
use std::sync::Arc;

/// Shared handle to an attached error.
///
/// `Arc` keeps error identity stable while events are cloned between
/// pipeline stages and sinks.
pub type DynError = Arc<dyn std::error::Error + Send + Sync + 'static>;

/// An immutable leveled event flowing through the pipeline.
///
/// Events are read-only past construction except for their property map,
/// which enrich stages alone may add to or overwrite.
#[derive(Debug, Clone)]
pub struct LogEvent {
    pub timestamp: DateTime<Utc>,
    pub level: LogEventLevel,
    pub message_template: MessageTemplate,
    pub properties: PropertyMap,
    pub error: Option<DynError>,
}

impl LogEvent {
    pub fn new(
        level: LogEventLevel,
        message_template: MessageTemplate,
        properties: PropertyMap,
    ) -> Self {
        Self {
            timestamp: Utc::now(),
            level,
            message_template,
            properties,
            error: None,
        }
    }

    pub fn with_error(mut self, error: DynError) -> Self {
        self.error = Some(error);
        self
    }

    /// ISO-8601 timestamp with millisecond precision, e.g.
    /// `2025-01-08T10:30:45.123Z`.
    pub fn iso_timestamp(&self) -> String {
        self.timestamp.to_rfc3339_opts(SecondsFormat::Millis, true)
    }

    /// Renders the message template against this event's properties.
    pub fn rendered_message(&self) -> String {
        self.message_template.render(&self.properties)
    }
}
