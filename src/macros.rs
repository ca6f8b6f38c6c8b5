//! Logging macros for ergonomic template calls.
//!
//! The macros convert each argument to a `serde_json::Value` and forward
//! to the matching `Logger` level method.
//!
//! # Examples
//!
//! ```
//! use rust_structured_log::prelude::*;
//! use rust_structured_log::info;
//!
//! let logger = configure().create();
//!
//! // Basic logging
//! info!(logger, "Server started");
//!
//! // With bound template properties
//! let port = 8080;
//! info!(logger, "Server listening on port {port}", port);
//! ```

/// Log a message template at an explicit level.
///
/// # Examples
///
/// ```
/// # use rust_structured_log::prelude::*;
/// # let logger = configure().create();
/// use rust_structured_log::log_event;
/// log_event!(logger, LogEventLevel::Information, "Simple message");
/// log_event!(logger, LogEventLevel::Error, "Error code: {code}", 500);
/// ```
#[macro_export]
macro_rules! log_event {
    ($logger:expr, $level:expr, $template:expr $(, $arg:expr)* $(,)?) => {
        $logger.log($level, $template, vec![$($crate::__private::json!($arg)),*])
    };
}

/// Log a verbose-level event.
#[macro_export]
macro_rules! verbose {
    ($logger:expr, $template:expr $(, $arg:expr)* $(,)?) => {
        $crate::log_event!($logger, $crate::LogEventLevel::Verbose, $template $(, $arg)*)
    };
}

/// Log a debug-level event.
#[macro_export]
macro_rules! debug {
    ($logger:expr, $template:expr $(, $arg:expr)* $(,)?) => {
        $crate::log_event!($logger, $crate::LogEventLevel::Debug, $template $(, $arg)*)
    };
}

/// Log an information-level event.
#[macro_export]
macro_rules! info {
    ($logger:expr, $template:expr $(, $arg:expr)* $(,)?) => {
        $crate::log_event!($logger, $crate::LogEventLevel::Information, $template $(, $arg)*)
    };
}

/// Log a warning-level event.
#[macro_export]
macro_rules! warn {
    ($logger:expr, $template:expr $(, $arg:expr)* $(,)?) => {
        $crate::log_event!($logger, $crate::LogEventLevel::Warning, $template $(, $arg)*)
    };
}

/// Log an error-level event.
#[macro_export]
macro_rules! error {
    ($logger:expr, $template:expr $(, $arg:expr)* $(,)?) => {
        $crate::log_event!($logger, $crate::LogEventLevel::Error, $template $(, $arg)*)
    };
}

/// Log a fatal-level event.
#[macro_export]
macro_rules! fatal {
    ($logger:expr, $template:expr $(, $arg:expr)* $(,)?) => {
        $crate::log_event!($logger, $crate::LogEventLevel::Fatal, $template $(, $arg)*)
    };
}
