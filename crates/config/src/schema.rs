//! The immutable runtime configuration

use serde::Serialize;
use types::{ConcurrentListenerConfig, ExceptionHandlingStrategy, Locale};

/// Timeout used on sports API HTTP requests (seconds)
pub const HTTP_CLIENT_TIMEOUT: u32 = 30;
/// Connection pool size for the sports API HTTP client
pub const HTTP_CLIENT_MAX_CONN_TOTAL: u32 = 20;
/// Maximum concurrent connections per route for the sports API HTTP client
pub const HTTP_CLIENT_MAX_CONN_PER_ROUTE: u32 = 15;
/// Timeout used on recovery HTTP requests (seconds)
pub const RECOVERY_HTTP_CLIENT_TIMEOUT: u32 = 30;
/// Connection pool size for the recovery HTTP client
pub const RECOVERY_HTTP_CLIENT_MAX_CONN_TOTAL: u32 = 20;
/// Maximum concurrent connections per route for the recovery HTTP client
pub const RECOVERY_HTTP_CLIENT_MAX_CONN_PER_ROUTE: u32 = 15;

/// The assembled feed configuration.
///
/// Created exactly once per [`ConfigurationBuilder::build`] invocation and
/// never mutated afterwards, so it is safe for unrestricted concurrent
/// reads.
///
/// [`ConfigurationBuilder::build`]: crate::ConfigurationBuilder::build
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeedConfiguration {
    /// Account access token
    pub access_token: Option<String>,
    /// Default language for translatable data
    pub default_locale: Locale,
    /// Languages in which translatable data is auto-fetched
    pub desired_locales: Vec<Locale>,
    /// AMQP broker host
    pub messaging_host: String,
    /// Sports API host
    pub api_host: String,
    /// Sports API port
    pub api_port: u16,
    /// Seconds of producer inactivity before it is flagged as down
    pub inactivity_seconds: u32,
    /// Maximum execution time of a recovery request (minutes)
    pub max_recovery_execution_minutes: u32,
    /// Minimal time between two successive recovery requests (seconds)
    pub min_interval_between_recovery_requests: u32,
    /// Whether the broker connection uses SSL
    pub use_messaging_ssl: bool,
    /// Whether API requests use SSL
    pub use_api_ssl: bool,
    /// AMQP broker port
    pub messaging_port: u16,
    /// Broker password, when the broker requires one
    pub messaging_password: Option<String>,
    /// Identifier distinguishing SDK instances sharing one account
    pub node_id: Option<i32>,
    /// Whether this configuration targets the integration environment
    pub use_integration_environment: bool,
    /// Whether this configuration targets a replay session
    pub replay_session: bool,
    /// Producers disabled at startup
    pub disabled_producers: Vec<u32>,
    /// How dispatch exceptions are surfaced
    pub exception_handling_strategy: ExceptionHandlingStrategy,
    /// Timeout used on sports API HTTP requests (seconds)
    pub http_client_timeout: u32,
    /// Connection pool size for the sports API HTTP client
    pub http_client_max_conn_total: u32,
    /// Maximum concurrent connections per route for the sports API client
    pub http_client_max_conn_per_route: u32,
    /// Timeout used on recovery HTTP requests (seconds)
    pub recovery_http_client_timeout: u32,
    /// Connection pool size for the recovery HTTP client
    pub recovery_http_client_max_conn_total: u32,
    /// Maximum concurrent connections per route for the recovery client
    pub recovery_http_client_max_conn_per_route: u32,
    /// Concurrent listener settings
    pub concurrent_listener: ConcurrentListenerConfig,
}

impl FeedConfiguration {
    /// The API authority as used in absolute URLs: the host alone on the
    /// default port 80, `host:port` otherwise.
    pub fn api_host_and_port(&self) -> String {
        if self.api_port == 80 {
            self.api_host.clone()
        } else {
            format!("{}:{}", self.api_host, self.api_port)
        }
    }

    /// Whether this configuration targets a replay session
    pub fn is_replay_session(&self) -> bool {
        self.replay_session
    }
}

#[cfg(test)]
mod tests {
    use crate::ConfigurationBuilder;

    #[test]
    fn api_host_and_port_omits_default_port() {
        let mut builder = ConfigurationBuilder::new();
        let cfg = builder.build();
        assert_eq!(cfg.api_host_and_port(), "api.betradar.com");

        builder.set_api_host("api.example.com").unwrap();
        builder.set_api_port(8443).unwrap();
        let cfg = builder.build();
        assert_eq!(cfg.api_host_and_port(), "api.example.com:8443");
    }
}
