//! Shared types for the unified feed SDK
//!
//! This crate contains the domain types shared across the feed SDK
//! components: environments, locales, listener settings and the error
//! taxonomy.

pub mod environment;
pub mod error;
pub mod listener;
pub mod locale;

// Re-export commonly used types
pub use environment::Environment;
pub use error::{ConfigError, EndpointError, ExceptionHandlingStrategy, FeedError, Result};
pub use listener::ConcurrentListenerConfig;
pub use locale::Locale;
