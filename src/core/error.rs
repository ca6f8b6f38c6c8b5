//! Error types for the logging pipeline

pub type Result<T> = std::result::Result<T, LoggerError>;

#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    /// Unparseable severity label at configuration time
    #[error("Invalid log event level: '{label}'")]
    InvalidLevel { label: String },

    /// Configuration argument of the wrong shape
    #[error("Invalid argument for {component}: {message}")]
    InvalidArgument { component: String, message: String },

    /// A pipeline stage failed during emit or flush
    #[error("Stage '{stage}' failed during {operation}: {message}")]
    StageFailure {
        stage: String,
        operation: String,
        message: String,
    },

    /// Sink delivery error
    #[error("Sink '{name}' failed: {message}")]
    SinkFailure { name: String, message: String },

    /// Generic IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl LoggerError {
    /// Create an invalid level error
    pub fn invalid_level(label: impl Into<String>) -> Self {
        LoggerError::InvalidLevel {
            label: label.into(),
        }
    }

    /// Create an invalid argument error
    pub fn invalid_argument(component: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::InvalidArgument {
            component: component.into(),
            message: message.into(),
        }
    }

    /// Create a stage failure error
    pub fn stage_failure(
        stage: impl Into<String>,
        operation: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        LoggerError::StageFailure {
            stage: stage.into(),
            operation: operation.into(),
            message: message.into(),
        }
    }

    /// Create a sink failure error
    pub fn sink_failure(name: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::SinkFailure {
            name: name.into(),
            message: message.into(),
        }
    }

    /// Create a generic error
    pub fn other<S: Into<String>>(msg: S) -> Self {
        LoggerError::Other(msg.into())
    }
}
