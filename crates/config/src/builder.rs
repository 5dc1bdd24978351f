//! Mutable configuration builder yielding an immutable [`FeedConfiguration`]

use types::{
    listener, ConcurrentListenerConfig, ConfigError, Environment, ExceptionHandlingStrategy,
    Locale,
};

use crate::resolver;
use crate::schema::{
    FeedConfiguration, HTTP_CLIENT_MAX_CONN_PER_ROUTE, HTTP_CLIENT_MAX_CONN_TOTAL,
    HTTP_CLIENT_TIMEOUT, RECOVERY_HTTP_CLIENT_MAX_CONN_PER_ROUTE,
    RECOVERY_HTTP_CLIENT_MAX_CONN_TOTAL, RECOVERY_HTTP_CLIENT_TIMEOUT,
};
use crate::source::ConfigOptionSource;

const MIN_INACTIVITY_SECONDS: u32 = 20;
const MAX_INACTIVITY_SECONDS: u32 = 180;
const MIN_RECOVERY_EXECUTION_MINUTES: u32 = 15;
const MAX_RECOVERY_EXECUTION_MINUTES: u32 = 6 * 60;
const MIN_INTERVAL_BETWEEN_RECOVERY_REQUESTS: u32 = 20;
const MAX_INTERVAL_BETWEEN_RECOVERY_REQUESTS: u32 = 180;
const DEFAULT_INTERVAL_BETWEEN_RECOVERY_REQUESTS: u32 = 30;

/// Environment variable consulted by [`ConfigurationBuilder::set_access_token_from_env`]
pub const ACCESS_TOKEN_ENV_VAR: &str = "UF_ACCESS_TOKEN";

/// Accumulates settings from explicit calls and option sources, validates
/// each field eagerly and assembles one immutable [`FeedConfiguration`]
/// per [`build`] call.
///
/// Setters return `Result<&mut Self, ConfigError>` so callers chain with
/// `?`; a failed setter mutates nothing. Sources loaded later overwrite
/// values set earlier, so callers control precedence through call order.
/// The list-valued fields (desired locales, disabled producers) are
/// additive across all calls and sources.
///
/// [`build`]: ConfigurationBuilder::build
#[derive(Debug)]
pub struct ConfigurationBuilder {
    access_token: Option<String>,
    default_locale: Locale,
    desired_locales: Vec<Locale>,
    use_messaging_ssl: bool,
    use_api_ssl: bool,
    messaging_host: String,
    api_host: String,
    api_port: u16,
    messaging_port: u16,
    inactivity_seconds: u32,
    max_recovery_execution_minutes: u32,
    min_interval_between_recovery_requests: u32,
    messaging_password: Option<String>,
    node_id: Option<i32>,
    use_integration_environment: bool,
    replay_session: bool,
    disabled_producers: Vec<u32>,
    exception_handling_strategy: ExceptionHandlingStrategy,
    concurrent_listener_enabled: bool,
    concurrent_listener_threads: u32,
    concurrent_listener_queue_size: u32,
    concurrent_listener_handle_errors_asynchronously: bool,
}

impl Default for ConfigurationBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigurationBuilder {
    /// A builder populated with the compiled-in defaults (production
    /// hosts, SSL on, no token, no node id)
    pub fn new() -> Self {
        Self {
            access_token: None,
            default_locale: default_locale(),
            desired_locales: Vec::new(),
            use_messaging_ssl: true,
            use_api_ssl: true,
            messaging_host: resolver::PRODUCTION.messaging_host.to_string(),
            api_host: resolver::PRODUCTION.api_host.to_string(),
            api_port: 80,
            messaging_port: resolver::PRODUCTION.port,
            inactivity_seconds: MIN_INACTIVITY_SECONDS,
            max_recovery_execution_minutes: MAX_RECOVERY_EXECUTION_MINUTES,
            min_interval_between_recovery_requests: DEFAULT_INTERVAL_BETWEEN_RECOVERY_REQUESTS,
            messaging_password: None,
            node_id: None,
            use_integration_environment: false,
            replay_session: false,
            disabled_producers: Vec::new(),
            exception_handling_strategy: ExceptionHandlingStrategy::Catch,
            concurrent_listener_enabled: false,
            concurrent_listener_threads: listener::THREADS_DEFAULT,
            concurrent_listener_queue_size: listener::QUEUE_SIZE_DEFAULT,
            concurrent_listener_handle_errors_asynchronously: true,
        }
    }

    /// Set the account access token. Without it the feed connection will
    /// be refused.
    pub fn set_access_token(&mut self, access_token: &str) -> Result<&mut Self, ConfigError> {
        if access_token.is_empty() {
            return Err(ConfigError::InvalidArgument {
                field: "access_token",
                message: "access token must be non-empty".to_string(),
            });
        }

        self.access_token = Some(access_token.to_string());
        Ok(self)
    }

    /// Set the access token from the `UF_ACCESS_TOKEN` environment
    /// variable; fails when the variable is unset or empty.
    pub fn set_access_token_from_env(&mut self) -> Result<&mut Self, ConfigError> {
        let token = std::env::var(ACCESS_TOKEN_ENV_VAR)
            .ok()
            .filter(|t| !t.is_empty())
            .ok_or(ConfigError::MissingValue {
                key: ACCESS_TOKEN_ENV_VAR,
            })?;

        self.set_access_token(&token)
    }

    /// Set the access token from an option source; fails when the source
    /// has no token entry.
    pub fn set_access_token_from_source(
        &mut self,
        source: &dyn ConfigOptionSource,
    ) -> Result<&mut Self, ConfigError> {
        let token = source
            .read_access_token()
            .ok_or(ConfigError::MissingValue {
                key: "access_token",
            })?;

        self.set_access_token(&token)
    }

    /// Set the default language for translatable data
    pub fn set_default_locale(&mut self, locale: Locale) -> &mut Self {
        self.default_locale = locale;
        self
    }

    /// Add languages in which translatable data should be auto-fetched.
    /// Additive across calls and sources; duplicates are ignored.
    pub fn add_desired_locales(&mut self, locales: &[Locale]) -> &mut Self {
        for locale in locales {
            if !self.desired_locales.contains(locale) {
                self.desired_locales.push(locale.clone());
            }
        }
        self
    }

    /// Set whether SSL is used when connecting to the AMQP broker
    pub fn set_messaging_use_ssl(&mut self, use_ssl: bool) -> &mut Self {
        self.use_messaging_ssl = use_ssl;
        self
    }

    /// Set whether SSL is used when requesting API endpoints
    pub fn set_api_use_ssl(&mut self, use_ssl: bool) -> &mut Self {
        self.use_api_ssl = use_ssl;
        self
    }

    /// Set the host messages are received from
    pub fn set_messaging_host(&mut self, host: &str) -> Result<&mut Self, ConfigError> {
        if host.is_empty() {
            return Err(ConfigError::InvalidArgument {
                field: "messaging_host",
                message: "messaging host must be non-empty".to_string(),
            });
        }

        self.messaging_host = host.to_string();
        Ok(self)
    }

    /// Set the host used for API access
    pub fn set_api_host(&mut self, api_host: &str) -> Result<&mut Self, ConfigError> {
        if api_host.is_empty() {
            return Err(ConfigError::InvalidArgument {
                field: "api_host",
                message: "API host must be non-empty".to_string(),
            });
        }

        self.api_host = api_host.to_string();
        Ok(self)
    }

    /// Set the port used for API access
    pub fn set_api_port(&mut self, api_port: u16) -> Result<&mut Self, ConfigError> {
        if api_port == 0 {
            return Err(ConfigError::InvalidArgument {
                field: "api_port",
                message: "API port must be greater than zero".to_string(),
            });
        }

        self.api_port = api_port;
        Ok(self)
    }

    /// Set the port used to connect to the AMQP broker
    pub fn set_messaging_port(&mut self, port: u16) -> Result<&mut Self, ConfigError> {
        if port == 0 {
            return Err(ConfigError::InvalidArgument {
                field: "messaging_port",
                message: "messaging port must be greater than zero".to_string(),
            });
        }

        self.messaging_port = port;
        Ok(self)
    }

    /// Set the maximum seconds of producer inactivity before it is
    /// flagged as down
    pub fn set_inactivity_seconds(&mut self, seconds: u32) -> Result<&mut Self, ConfigError> {
        check_range(
            "inactivity_seconds",
            seconds,
            MIN_INACTIVITY_SECONDS,
            MAX_INACTIVITY_SECONDS,
        )?;

        self.inactivity_seconds = seconds;
        Ok(self)
    }

    /// Set the maximum execution time of a recovery request (minutes)
    pub fn set_max_recovery_execution_minutes(
        &mut self,
        minutes: u32,
    ) -> Result<&mut Self, ConfigError> {
        check_range(
            "max_recovery_execution_minutes",
            minutes,
            MIN_RECOVERY_EXECUTION_MINUTES,
            MAX_RECOVERY_EXECUTION_MINUTES,
        )?;

        self.max_recovery_execution_minutes = minutes;
        Ok(self)
    }

    /// Set the minimal time between two successive recovery requests
    /// initiated by alive messages (seconds)
    pub fn set_min_interval_between_recovery_requests(
        &mut self,
        seconds: u32,
    ) -> Result<&mut Self, ConfigError> {
        check_range(
            "min_interval_between_recovery_requests",
            seconds,
            MIN_INTERVAL_BETWEEN_RECOVERY_REQUESTS,
            MAX_INTERVAL_BETWEEN_RECOVERY_REQUESTS,
        )?;

        self.min_interval_between_recovery_requests = seconds;
        Ok(self)
    }

    /// Set the broker password; not required for the default brokers
    pub fn set_messaging_password(&mut self, password: &str) -> Result<&mut Self, ConfigError> {
        if password.is_empty() {
            return Err(ConfigError::InvalidArgument {
                field: "messaging_password",
                message: "messaging password must be non-empty".to_string(),
            });
        }

        self.messaging_password = Some(password.to_string());
        Ok(self)
    }

    /// Set the node identifier distinguishing SDK instances sharing one
    /// account. Negative values are reserved for internal use.
    pub fn set_node_id(&mut self, node_id: i32) -> &mut Self {
        self.node_id = Some(node_id);
        self
    }

    /// Target the integration environment. When set, `build()` force-
    /// overwrites hosts, ports and SSL flags with the fixed integration
    /// values regardless of call order.
    pub fn set_use_integration_environment(&mut self, use_integration: bool) -> &mut Self {
        self.use_integration_environment = use_integration;
        self
    }

    /// Mark the assembled configuration as targeting a replay session
    pub fn set_replay_session(&mut self, replay_session: bool) -> &mut Self {
        self.replay_session = replay_session;
        self
    }

    /// Add producers to disable at startup. Additive across calls and
    /// sources; duplicates are ignored.
    pub fn add_disabled_producers(&mut self, producer_ids: &[u32]) -> &mut Self {
        for id in producer_ids {
            if !self.disabled_producers.contains(id) {
                self.disabled_producers.push(*id);
            }
        }
        self
    }

    /// Set how dispatch exceptions are surfaced
    pub fn set_exception_handling_strategy(
        &mut self,
        strategy: ExceptionHandlingStrategy,
    ) -> &mut Self {
        self.exception_handling_strategy = strategy;
        self
    }

    /// Enable dispatching feed messages on a worker pool
    pub fn set_concurrent_listener_enabled(&mut self, enabled: bool) -> &mut Self {
        self.concurrent_listener_enabled = enabled;
        self
    }

    /// Set the number of concurrent listener dispatch threads
    pub fn set_concurrent_listener_threads(
        &mut self,
        thread_count: u32,
    ) -> Result<&mut Self, ConfigError> {
        check_range(
            "concurrent_listener_threads",
            thread_count,
            listener::THREADS_MIN,
            listener::THREADS_MAX,
        )?;

        self.concurrent_listener_threads = thread_count;
        Ok(self)
    }

    /// Set the concurrent listener dispatch queue size
    pub fn set_concurrent_listener_queue_size(
        &mut self,
        queue_size: u32,
    ) -> Result<&mut Self, ConfigError> {
        check_range(
            "concurrent_listener_queue_size",
            queue_size,
            listener::QUEUE_SIZE_MIN,
            listener::QUEUE_SIZE_MAX,
        )?;

        self.concurrent_listener_queue_size = queue_size;
        Ok(self)
    }

    /// Set whether concurrent listener errors are handled asynchronously
    pub fn set_concurrent_listener_handle_errors_asynchronously(
        &mut self,
        asynchronously: bool,
    ) -> &mut Self {
        self.concurrent_listener_handle_errors_asynchronously = asynchronously;
        self
    }

    /// Overwrite builder values with every field the SDK properties
    /// source carries
    pub fn load_from_sdk_properties(
        &mut self,
        source: &dyn ConfigOptionSource,
    ) -> Result<&mut Self, ConfigError> {
        self.apply_source(source)
    }

    /// Overwrite builder values with every field the application YAML
    /// source carries
    pub fn load_from_application_yml(
        &mut self,
        source: &dyn ConfigOptionSource,
    ) -> Result<&mut Self, ConfigError> {
        self.apply_source(source)
    }

    fn apply_source(
        &mut self,
        source: &dyn ConfigOptionSource,
    ) -> Result<&mut Self, ConfigError> {
        // Present fields go through the validating setters so an
        // out-of-range source value fails the load at the call site.
        if let Some(token) = source.read_access_token() {
            self.set_access_token(&token)?;
        }
        if let Some(locale) = source.read_default_locale() {
            self.set_default_locale(locale);
        }
        if let Some(host) = source.read_messaging_host() {
            self.set_messaging_host(&host)?;
        }
        if let Some(port) = source.read_messaging_port() {
            self.set_messaging_port(port)?;
        }
        if let Some(password) = source.read_messaging_password() {
            self.set_messaging_password(&password)?;
        }
        if let Some(use_ssl) = source.read_use_messaging_ssl() {
            self.set_messaging_use_ssl(use_ssl);
        }
        if let Some(host) = source.read_api_host() {
            self.set_api_host(&host)?;
        }
        if let Some(port) = source.read_api_port() {
            self.set_api_port(port)?;
        }
        if let Some(use_ssl) = source.read_use_api_ssl() {
            self.set_api_use_ssl(use_ssl);
        }
        if let Some(seconds) = source.read_max_inactivity_seconds() {
            self.set_inactivity_seconds(seconds)?;
        }
        if let Some(minutes) = source.read_max_recovery_time() {
            self.set_max_recovery_execution_minutes(minutes)?;
        }
        if let Some(seconds) = source.read_min_interval_between_recovery_requests() {
            self.set_min_interval_between_recovery_requests(seconds)?;
        }
        if let Some(use_integration) = source.read_use_integration() {
            self.set_use_integration_environment(use_integration);
        }
        if let Some(node_id) = source.read_node_id() {
            self.set_node_id(node_id);
        }
        if let Some(strategy) = source.read_exception_handling_strategy() {
            self.set_exception_handling_strategy(strategy);
        }
        if let Some(enabled) = source.read_concurrent_listener_enabled() {
            self.set_concurrent_listener_enabled(enabled);
        }
        if let Some(threads) = source.read_concurrent_listener_threads() {
            self.set_concurrent_listener_threads(threads)?;
        }
        if let Some(queue_size) = source.read_concurrent_listener_queue_size() {
            self.set_concurrent_listener_queue_size(queue_size)?;
        }
        if let Some(asynchronously) =
            source.read_concurrent_listener_handle_errors_asynchronously()
        {
            self.set_concurrent_listener_handle_errors_asynchronously(asynchronously);
        }

        let locales = source.read_desired_locales();
        self.add_desired_locales(&locales);
        let producers = source.read_disabled_producers();
        self.add_disabled_producers(&producers);

        tracing::debug!(
            desired_locales = self.desired_locales.len(),
            disabled_producers = self.disabled_producers.len(),
            "Applied configuration option source"
        );

        Ok(self)
    }

    /// Assemble the immutable configuration and reset the builder to the
    /// compiled-in defaults so the instance is reusable.
    ///
    /// If the integration-environment flag is set, hosts, SSL flags and
    /// the messaging port are overwritten with the fixed integration
    /// values, superseding anything configured earlier.
    pub fn build(&mut self) -> FeedConfiguration {
        if self.use_integration_environment {
            self.messaging_host = resolver::INTEGRATION.messaging_host.to_string();
            self.api_host = resolver::INTEGRATION.api_host.to_string();
            self.use_messaging_ssl = resolver::INTEGRATION.use_ssl;
            self.use_api_ssl = resolver::INTEGRATION.use_ssl;
            self.messaging_port = resolver::INTEGRATION.port;
        }

        let configuration = FeedConfiguration {
            access_token: self.access_token.take(),
            default_locale: std::mem::replace(&mut self.default_locale, default_locale()),
            desired_locales: std::mem::take(&mut self.desired_locales),
            messaging_host: self.messaging_host.clone(),
            api_host: self.api_host.clone(),
            api_port: self.api_port,
            inactivity_seconds: self.inactivity_seconds,
            max_recovery_execution_minutes: self.max_recovery_execution_minutes,
            min_interval_between_recovery_requests: self.min_interval_between_recovery_requests,
            use_messaging_ssl: self.use_messaging_ssl,
            use_api_ssl: self.use_api_ssl,
            messaging_port: self.messaging_port,
            messaging_password: self.messaging_password.take(),
            node_id: self.node_id,
            use_integration_environment: self.use_integration_environment,
            replay_session: self.replay_session,
            disabled_producers: std::mem::take(&mut self.disabled_producers),
            exception_handling_strategy: self.exception_handling_strategy,
            http_client_timeout: HTTP_CLIENT_TIMEOUT,
            http_client_max_conn_total: HTTP_CLIENT_MAX_CONN_TOTAL,
            http_client_max_conn_per_route: HTTP_CLIENT_MAX_CONN_PER_ROUTE,
            recovery_http_client_timeout: RECOVERY_HTTP_CLIENT_TIMEOUT,
            recovery_http_client_max_conn_total: RECOVERY_HTTP_CLIENT_MAX_CONN_TOTAL,
            recovery_http_client_max_conn_per_route: RECOVERY_HTTP_CLIENT_MAX_CONN_PER_ROUTE,
            concurrent_listener: ConcurrentListenerConfig {
                enabled: self.concurrent_listener_enabled,
                threads: self.concurrent_listener_threads,
                queue_size: self.concurrent_listener_queue_size,
                handle_errors_asynchronously: self
                    .concurrent_listener_handle_errors_asynchronously,
            },
        };

        *self = Self::new();
        configuration
    }
}

fn default_locale() -> Locale {
    // "en" is statically valid
    Locale::new("en").unwrap_or_else(|_| unreachable!())
}

fn check_range(field: &'static str, value: u32, min: u32, max: u32) -> Result<(), ConfigError> {
    if value < min || value > max {
        return Err(ConfigError::OutOfRange {
            field,
            value: i64::from(value),
            min: i64::from(min),
            max: i64::from(max),
        });
    }
    Ok(())
}

/// Pre-populate a builder with an environment's fixed connection
/// defaults. `Custom` carries no defaults, so only the token is applied.
pub fn with_environment_defaults(
    access_token: &str,
    environment: Environment,
) -> Result<ConfigurationBuilder, ConfigError> {
    let mut builder = ConfigurationBuilder::new();
    builder.set_access_token(access_token)?;

    if let Some(settings) = resolver::resolve(environment) {
        builder.set_messaging_host(settings.messaging_host)?;
        builder.set_api_host(settings.api_host)?;
        builder.set_messaging_port(settings.port)?;
        builder.set_messaging_use_ssl(settings.use_ssl);
        builder.set_api_use_ssl(settings.use_ssl);
    }

    if environment == Environment::Replay {
        builder.set_replay_session(true);
    }

    Ok(builder)
}

/// A builder pre-populated for the production environment
pub fn with_production_defaults(
    access_token: &str,
) -> Result<ConfigurationBuilder, ConfigError> {
    with_environment_defaults(access_token, Environment::Production)
}

/// A builder pre-populated for the integration environment
pub fn with_integration_defaults(
    access_token: &str,
) -> Result<ConfigurationBuilder, ConfigError> {
    with_environment_defaults(access_token, Environment::Integration)
}

/// A builder pre-populated for a replay session
pub fn with_replay_defaults(access_token: &str) -> Result<ConfigurationBuilder, ConfigError> {
    with_environment_defaults(access_token, Environment::Replay)
}

/// A builder for a custom environment: integration connection defaults,
/// everything else left to the caller
pub fn with_custom_defaults(access_token: &str) -> Result<ConfigurationBuilder, ConfigError> {
    with_environment_defaults(access_token, Environment::Integration)
}
