use thiserror::Error;

/// Custom error type for pmview
#[derive(Error, Debug)]
pub enum PmError {
    #[error("Configuration error: {0}")]
    Config(String),

    /// Transport failure, timeout or non-2xx response from the metrics source.
    #[error("Fetch error: {0}")]
    Fetch(String),

    /// Payload did not have the expected `{ p, i, v }` shape.
    #[error("Parse error: {0}")]
    Parse(String),

    #[error("{0}")]
    Other(String),
}

/// Result type alias for pmview
pub type Result<T> = std::result::Result<T, PmError>;

impl PmError {
    /// Create a config error
    pub fn config<S: Into<String>>(msg: S) -> Self {
        PmError::Config(msg.into())
    }

    /// Create a fetch error
    pub fn fetch<S: Into<String>>(msg: S) -> Self {
        PmError::Fetch(msg.into())
    }

    /// Create a parse error
    pub fn parse<S: Into<String>>(msg: S) -> Self {
        PmError::Parse(msg.into())
    }

    /// Create a generic error
    pub fn other<S: Into<String>>(msg: S) -> Self {
        PmError::Other(msg.into())
    }

    /// Fetch and parse failures are reported per tick and never stop polling.
    pub fn is_tick_error(&self) -> bool {
        matches!(self, PmError::Fetch(_) | PmError::Parse(_))
    }
}
