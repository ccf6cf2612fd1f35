use thiserror::Error;

/// Unified error type for history-graph operations
#[derive(Error, Debug)]
pub enum HistoryGraphError {
    #[error("Input error: {0}")]
    Input(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Log query failed: {0}")]
    Log(String),

    #[error("Render failed: {0}")]
    Render(String),

    #[error("Tag error: {0}")]
    Tag(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in history-graph
pub type Result<T> = std::result::Result<T, HistoryGraphError>;

impl HistoryGraphError {
    /// Create an input error with context
    pub fn input(msg: impl Into<String>) -> Self {
        HistoryGraphError::Input(msg.into())
    }

    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        HistoryGraphError::Config(msg.into())
    }

    /// Create a log-query error with context
    pub fn log(msg: impl Into<String>) -> Self {
        HistoryGraphError::Log(msg.into())
    }

    /// Create a render error with context
    pub fn render(msg: impl Into<String>) -> Self {
        HistoryGraphError::Render(msg.into())
    }

    /// Create a tag error with context
    pub fn tag(msg: impl Into<String>) -> Self {
        HistoryGraphError::Tag(msg.into())
    }
}
