//! Configuration assembly for the unified feed SDK
//!
//! This crate merges explicit builder calls, properties/YAML option
//! sources and fixed environment defaults into one immutable, validated
//! runtime configuration.

pub mod builder;
pub mod resolver;
pub mod schema;
pub mod source;

pub use builder::{
    with_custom_defaults, with_environment_defaults, with_integration_defaults,
    with_production_defaults, with_replay_defaults, ConfigurationBuilder,
};
pub use resolver::{resolve, EnvironmentSettings};
pub use schema::FeedConfiguration;
pub use source::{ConfigOptionSource, PropertiesSource, YamlSource};
