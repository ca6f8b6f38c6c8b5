//! Console sink implementation

use crate::core::error::Result;
use crate::core::event::LogEvent;
use crate::core::level::LogEventLevel;
use crate::core::sink::Sink;
use async_trait::async_trait;
use colored::Colorize;

fn level_color(level: LogEventLevel) -> colored::Color {
    use colored::Color::*;
    match level {
        LogEventLevel::Verbose => BrightBlack,
        LogEventLevel::Debug => Blue,
        LogEventLevel::Information => Green,
        LogEventLevel::Warning => Yellow,
        LogEventLevel::Error => Red,
        LogEventLevel::Fatal | LogEventLevel::Off => BrightRed,
    }
}

pub struct ConsoleSink {
    use_colors: bool,
    include_timestamps: bool,
    include_properties: bool,
}

impl ConsoleSink {
    pub fn new() -> Self {
        Self {
            use_colors: true,
            include_timestamps: true,
            include_properties: false,
        }
    }

    #[must_use]
    pub fn with_colors(mut self, use_colors: bool) -> Self {
        self.use_colors = use_colors;
        self
    }

    #[must_use]
    pub fn with_timestamps(mut self, include_timestamps: bool) -> Self {
        self.include_timestamps = include_timestamps;
        self
    }

    /// Append bound properties as trailing `key=value` pairs.
    #[must_use]
    pub fn with_properties(mut self, include_properties: bool) -> Self {
        self.include_properties = include_properties;
        self
    }

    fn format_line(&self, event: &LogEvent) -> String {
        let level_str = if self.use_colors {
            format!("{:7}", event.level.to_str())
                .color(level_color(event.level))
                .to_string()
        } else {
            format!("{:7}", event.level.to_str())
        };

        let mut line = if self.include_timestamps {
            format!(
                "[{}] [{}] {}",
                event.iso_timestamp(),
                level_str,
                event.rendered_message()
            )
        } else {
            format!("[{}] {}", level_str, event.rendered_message())
        };

        if self.include_properties && !event.properties.is_empty() {
            let fields = event
                .properties
                .iter()
                .map(|(k, v)| format!("{}={}", k, v))
                .collect::<Vec<_>>()
                .join(" ");
            line.push(' ');
            line.push_str(&fields);
        }

        if let Some(ref error) = event.error {
            line.push_str(&format!(" error={}", error));
        }

        line
    }
}

impl Default for ConsoleSink {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Sink for ConsoleSink {
    fn emit(&self, events: &[LogEvent]) {
        for event in events {
            let line = self.format_line(event);
            // Route error and fatal levels to stderr, others to stdout
            match event.level {
                LogEventLevel::Error | LogEventLevel::Fatal => eprintln!("{}", line),
                _ => println!("{}", line),
            }
        }
    }

    async fn flush(&self) -> Result<()> {
        use std::io::Write;
        // Flush both stdout and stderr since we write to both
        std::io::stdout().flush()?;
        std::io::stderr().flush()?;
        Ok(())
    }

    fn name(&self) -> &str {
        "console"
    }
}
