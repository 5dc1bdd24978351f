//! Concurrent listener settings

use serde::{Deserialize, Serialize};

/// Minimum number of dispatch threads
pub const THREADS_MIN: u32 = 1;
/// Maximum number of dispatch threads
pub const THREADS_MAX: u32 = 100;
/// Default number of dispatch threads
pub const THREADS_DEFAULT: u32 = 10;

/// Minimum dispatch queue size
pub const QUEUE_SIZE_MIN: u32 = 100;
/// Maximum dispatch queue size
pub const QUEUE_SIZE_MAX: u32 = 1_000_000;
/// Default dispatch queue size
pub const QUEUE_SIZE_DEFAULT: u32 = 10_000;

/// Settings for the optional concurrent feed listener
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConcurrentListenerConfig {
    /// Whether messages are dispatched on a worker pool
    pub enabled: bool,
    /// Number of dispatch threads
    pub threads: u32,
    /// Size of the dispatch queue
    pub queue_size: u32,
    /// Whether dispatch errors are handled asynchronously
    pub handle_errors_asynchronously: bool,
}

impl Default for ConcurrentListenerConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            threads: THREADS_DEFAULT,
            queue_size: QUEUE_SIZE_DEFAULT,
            handle_errors_asynchronously: true,
        }
    }
}
