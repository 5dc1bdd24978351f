//! Error types for the unified feed SDK

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Main error type for the feed SDK
#[derive(Error, Debug)]
pub enum FeedError {
    /// Configuration related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Endpoint resolution errors
    #[error("Endpoint error: {0}")]
    Endpoint(String),
}

/// Result type alias for feed SDK operations
pub type Result<T> = std::result::Result<T, FeedError>;

/// Configuration specific errors
///
/// All configuration failures are raised synchronously at the call site;
/// nothing is clamped or deferred.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Empty or malformed setter argument
    #[error("Invalid value for {field}: {message}")]
    InvalidArgument { field: &'static str, message: String },

    /// Bounded numeric value outside its inclusive range
    #[error("{field} must be between {min} and {max}, got {value}")]
    OutOfRange {
        field: &'static str,
        value: i64,
        min: i64,
        max: i64,
    },

    /// A required value was explicitly requested but absent
    #[error("Missing required configuration value: {key}")]
    MissingValue { key: &'static str },
}

/// Endpoint resolution specific errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EndpointError {
    /// URL template argument arity mismatch
    #[error("Template expects {expected} parameters, got {provided}")]
    ParameterCount { expected: usize, provided: usize },
}

impl From<ConfigError> for FeedError {
    fn from(err: ConfigError) -> Self {
        FeedError::Configuration(err.to_string())
    }
}

impl From<EndpointError> for FeedError {
    fn from(err: EndpointError) -> Self {
        FeedError::Endpoint(err.to_string())
    }
}

/// How exceptions raised while dispatching feed data are surfaced to the
/// consumer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExceptionHandlingStrategy {
    /// Catch and report through the SDK (default)
    #[default]
    Catch,
    /// Propagate to the caller
    Throw,
}

impl FromStr for ExceptionHandlingStrategy {
    type Err = ConfigError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "catch" => Ok(ExceptionHandlingStrategy::Catch),
            "throw" => Ok(ExceptionHandlingStrategy::Throw),
            _ => Err(ConfigError::InvalidArgument {
                field: "exception_handling_strategy",
                message: format!("unknown strategy: {}", s),
            }),
        }
    }
}
