//! Data-provider endpoint resolution for the unified feed SDK
//!
//! Maps each logical sports API endpoint to the URL template, fetcher
//! kind and deserializer kind appropriate for an assembled
//! [`FeedConfiguration`], including the replay-session URL rewriting.
//!
//! [`FeedConfiguration`]: config::FeedConfiguration

pub mod catalog;
pub mod descriptor;

pub use catalog::{Endpoint, EndpointCatalog};
pub use descriptor::{DeserializerKind, EndpointDescriptor, FetcherKind};
