use miette::{Diagnostic, Result};
use thiserror::Error;

/// Main error type for the calendar engine
#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("Feed fetch error: {0}")]
    #[diagnostic(code(calendar_lookahead::fetch))]
    Fetch(String),

    #[error("Feed parse error: {0}")]
    #[diagnostic(code(calendar_lookahead::parse))]
    Parse(String),

    #[error("Environment error: {0}")]
    #[diagnostic(code(calendar_lookahead::environment))]
    Environment(String),

    #[error("Configuration error: {0}")]
    #[diagnostic(code(calendar_lookahead::config))]
    Config(String),

    #[error("Component error: {0}")]
    #[diagnostic(code(calendar_lookahead::component))]
    Component(String),

    #[error(transparent)]
    #[diagnostic(code(calendar_lookahead::io))]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    #[diagnostic(code(calendar_lookahead::serialization))]
    Serialization(String),

    #[error("Other error: {0}")]
    #[diagnostic(code(calendar_lookahead::other))]
    Other(String),
}

// Implement From for TOML deserialization errors
impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}

/// Type alias for Result with our Error type
pub type CalendarResult<T> = Result<T, Error>;

/// Helper to create environment errors
pub fn env_error(var: &str) -> Error {
    Error::Environment(format!("Missing environment variable: {}", var))
}

/// Helper to create configuration errors
pub fn config_error(message: &str) -> Error {
    Error::Config(message.to_string())
}

/// Helper to create component errors
pub fn component_error(message: &str) -> Error {
    Error::Component(message.to_string())
}

/// Helper to create feed fetch errors
pub fn fetch_error(message: &str) -> Error {
    Error::Fetch(message.to_string())
}

/// Helper to create feed parse errors
pub fn parse_error(message: &str) -> Error {
    Error::Parse(message.to_string())
}

/// Helper to create other errors
pub fn other_error(message: &str) -> Error {
    Error::Other(message.to_string())
}
