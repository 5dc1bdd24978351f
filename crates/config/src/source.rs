//! Read-only configuration option sources
//!
//! A [`ConfigOptionSource`] exposes one typed optional read per
//! recognized field. The builder overwrites its current value only for
//! fields the source actually carries; the list-valued reads return an
//! empty collection (never absence) when the source has no entry.

use std::collections::BTreeMap;
use std::path::Path;
use std::str::FromStr;

use anyhow::{Context, Result};
use figment::{
    providers::{Env, Format, Yaml},
    Figment,
};
use serde::Deserialize;
use types::{ExceptionHandlingStrategy, FeedError, Locale};

/// Typed optional reads over an opaque key/value configuration source
pub trait ConfigOptionSource {
    fn read_access_token(&self) -> Option<String> {
        None
    }

    fn read_default_locale(&self) -> Option<Locale> {
        None
    }

    /// Languages to auto-fetch; empty when the source has no entry
    fn read_desired_locales(&self) -> Vec<Locale> {
        Vec::new()
    }

    fn read_messaging_host(&self) -> Option<String> {
        None
    }

    fn read_messaging_port(&self) -> Option<u16> {
        None
    }

    fn read_messaging_password(&self) -> Option<String> {
        None
    }

    fn read_use_messaging_ssl(&self) -> Option<bool> {
        None
    }

    fn read_api_host(&self) -> Option<String> {
        None
    }

    fn read_api_port(&self) -> Option<u16> {
        None
    }

    fn read_use_api_ssl(&self) -> Option<bool> {
        None
    }

    fn read_max_inactivity_seconds(&self) -> Option<u32> {
        None
    }

    fn read_max_recovery_time(&self) -> Option<u32> {
        None
    }

    fn read_min_interval_between_recovery_requests(&self) -> Option<u32> {
        None
    }

    fn read_use_integration(&self) -> Option<bool> {
        None
    }

    fn read_node_id(&self) -> Option<i32> {
        None
    }

    /// Producers disabled at startup; empty when the source has no entry
    fn read_disabled_producers(&self) -> Vec<u32> {
        Vec::new()
    }

    fn read_exception_handling_strategy(&self) -> Option<ExceptionHandlingStrategy> {
        None
    }

    fn read_concurrent_listener_enabled(&self) -> Option<bool> {
        None
    }

    fn read_concurrent_listener_threads(&self) -> Option<u32> {
        None
    }

    fn read_concurrent_listener_queue_size(&self) -> Option<u32> {
        None
    }

    fn read_concurrent_listener_handle_errors_asynchronously(&self) -> Option<bool> {
        None
    }
}

// Property keys recognized in SDK properties sources.
const KEY_ACCESS_TOKEN: &str = "uf.sdk.accessToken";
const KEY_DEFAULT_LOCALE: &str = "uf.sdk.defaultLocale";
const KEY_DESIRED_LOCALES: &str = "uf.sdk.desiredLocales";
const KEY_MESSAGING_HOST: &str = "uf.sdk.messagingHost";
const KEY_MESSAGING_PORT: &str = "uf.sdk.messagingPort";
const KEY_MESSAGING_PASSWORD: &str = "uf.sdk.messagingPassword";
const KEY_MESSAGING_USE_SSL: &str = "uf.sdk.messagingUseSsl";
const KEY_API_HOST: &str = "uf.sdk.apiHost";
const KEY_API_PORT: &str = "uf.sdk.apiPort";
const KEY_API_USE_SSL: &str = "uf.sdk.apiUseSsl";
const KEY_MAX_INACTIVITY_SECONDS: &str = "uf.sdk.maxInactivitySeconds";
const KEY_MAX_RECOVERY_TIME: &str = "uf.sdk.maxRecoveryTime";
const KEY_MIN_INTERVAL_BETWEEN_RECOVERY_REQUESTS: &str =
    "uf.sdk.minIntervalBetweenRecoveryRequests";
const KEY_USE_INTEGRATION: &str = "uf.sdk.useIntegration";
const KEY_NODE_ID: &str = "uf.sdk.nodeId";
const KEY_DISABLED_PRODUCERS: &str = "uf.sdk.disabledProducers";
const KEY_EXCEPTION_HANDLING_STRATEGY: &str = "uf.sdk.exceptionHandlingStrategy";
const KEY_CONCURRENT_LISTENER_ENABLED: &str = "uf.sdk.concurrentListener.enabled";
const KEY_CONCURRENT_LISTENER_THREADS: &str = "uf.sdk.concurrentListener.threads";
const KEY_CONCURRENT_LISTENER_QUEUE_SIZE: &str = "uf.sdk.concurrentListener.queueSize";
const KEY_CONCURRENT_LISTENER_HANDLE_ERRORS_ASYNCHRONOUSLY: &str =
    "uf.sdk.concurrentListener.handleErrorsAsynchronously";

/// An SDK properties source backed by an opaque key/value map.
///
/// How the map was produced (properties file, command line, tests) is not
/// this type's concern; it only performs the typed reads. A value that
/// fails to parse is logged and read as absent.
#[derive(Debug, Clone, Default)]
pub struct PropertiesSource {
    entries: BTreeMap<String, String>,
}

impl PropertiesSource {
    pub fn from_map(entries: BTreeMap<String, String>) -> Self {
        Self { entries }
    }

    fn string(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn parsed<T: FromStr>(&self, key: &str) -> Option<T> {
        let raw = self.entries.get(key)?;
        match raw.parse::<T>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(key, value = %raw, "Ignoring unparseable property value");
                None
            }
        }
    }

    fn list<T: FromStr>(&self, key: &str) -> Vec<T> {
        let Some(raw) = self.entries.get(key) else {
            return Vec::new();
        };

        raw.split(',')
            .map(str::trim)
            .filter(|item| !item.is_empty())
            .filter_map(|item| match item.parse::<T>() {
                Ok(value) => Some(value),
                Err(_) => {
                    tracing::warn!(key, value = item, "Ignoring unparseable list entry");
                    None
                }
            })
            .collect()
    }
}

impl ConfigOptionSource for PropertiesSource {
    fn read_access_token(&self) -> Option<String> {
        self.string(KEY_ACCESS_TOKEN)
    }

    fn read_default_locale(&self) -> Option<Locale> {
        self.parsed(KEY_DEFAULT_LOCALE)
    }

    fn read_desired_locales(&self) -> Vec<Locale> {
        self.list(KEY_DESIRED_LOCALES)
    }

    fn read_messaging_host(&self) -> Option<String> {
        self.string(KEY_MESSAGING_HOST)
    }

    fn read_messaging_port(&self) -> Option<u16> {
        self.parsed(KEY_MESSAGING_PORT)
    }

    fn read_messaging_password(&self) -> Option<String> {
        self.string(KEY_MESSAGING_PASSWORD)
    }

    fn read_use_messaging_ssl(&self) -> Option<bool> {
        self.parsed(KEY_MESSAGING_USE_SSL)
    }

    fn read_api_host(&self) -> Option<String> {
        self.string(KEY_API_HOST)
    }

    fn read_api_port(&self) -> Option<u16> {
        self.parsed(KEY_API_PORT)
    }

    fn read_use_api_ssl(&self) -> Option<bool> {
        self.parsed(KEY_API_USE_SSL)
    }

    fn read_max_inactivity_seconds(&self) -> Option<u32> {
        self.parsed(KEY_MAX_INACTIVITY_SECONDS)
    }

    fn read_max_recovery_time(&self) -> Option<u32> {
        self.parsed(KEY_MAX_RECOVERY_TIME)
    }

    fn read_min_interval_between_recovery_requests(&self) -> Option<u32> {
        self.parsed(KEY_MIN_INTERVAL_BETWEEN_RECOVERY_REQUESTS)
    }

    fn read_use_integration(&self) -> Option<bool> {
        self.parsed(KEY_USE_INTEGRATION)
    }

    fn read_node_id(&self) -> Option<i32> {
        self.parsed(KEY_NODE_ID)
    }

    fn read_disabled_producers(&self) -> Vec<u32> {
        self.list(KEY_DISABLED_PRODUCERS)
    }

    fn read_exception_handling_strategy(&self) -> Option<ExceptionHandlingStrategy> {
        self.parsed(KEY_EXCEPTION_HANDLING_STRATEGY)
    }

    fn read_concurrent_listener_enabled(&self) -> Option<bool> {
        self.parsed(KEY_CONCURRENT_LISTENER_ENABLED)
    }

    fn read_concurrent_listener_threads(&self) -> Option<u32> {
        self.parsed(KEY_CONCURRENT_LISTENER_THREADS)
    }

    fn read_concurrent_listener_queue_size(&self) -> Option<u32> {
        self.parsed(KEY_CONCURRENT_LISTENER_QUEUE_SIZE)
    }

    fn read_concurrent_listener_handle_errors_asynchronously(&self) -> Option<bool> {
        self.parsed(KEY_CONCURRENT_LISTENER_HANDLE_ERRORS_ASYNCHRONOUSLY)
    }
}

/// Raw optional fields of an application YAML source
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct RawOptions {
    access_token: Option<String>,
    default_locale: Option<String>,
    desired_locales: Vec<String>,
    messaging_host: Option<String>,
    messaging_port: Option<u16>,
    messaging_password: Option<String>,
    messaging_use_ssl: Option<bool>,
    api_host: Option<String>,
    api_port: Option<u16>,
    api_use_ssl: Option<bool>,
    max_inactivity_seconds: Option<u32>,
    max_recovery_time: Option<u32>,
    min_interval_between_recovery_requests: Option<u32>,
    use_integration: Option<bool>,
    node_id: Option<i32>,
    disabled_producers: Vec<u32>,
    exception_handling_strategy: Option<String>,
    concurrent_listener: RawListenerOptions,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct RawListenerOptions {
    enabled: Option<bool>,
    threads: Option<u32>,
    queue_size: Option<u32>,
    handle_errors_asynchronously: Option<bool>,
}

/// An application YAML source, optionally layered with `UF_SDK_`-prefixed
/// environment variables.
#[derive(Debug, Clone, Default)]
pub struct YamlSource {
    raw: RawOptions,
}

impl YamlSource {
    /// Load from a YAML file, with `UF_SDK_`-prefixed environment
    /// variables taking precedence over file values.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(FeedError::Configuration(format!(
                "Configuration file not found: {}",
                path.display()
            ))
            .into());
        }

        let raw: RawOptions = Figment::new()
            .merge(Yaml::file(path))
            .merge(Env::prefixed("UF_SDK_"))
            .extract()
            .context("Failed to parse application YAML")?;

        Ok(Self { raw })
    }

    /// Load from a YAML string (for testing)
    pub fn load_from_str(yaml_content: &str) -> Result<Self> {
        let raw: RawOptions = serde_yaml::from_str(yaml_content)
            .context("Failed to parse application YAML from string")?;

        Ok(Self { raw })
    }

    fn locale(&self, code: &str) -> Option<Locale> {
        match Locale::new(code) {
            Ok(locale) => Some(locale),
            Err(_) => {
                tracing::warn!(code, "Ignoring invalid locale in YAML source");
                None
            }
        }
    }
}

impl ConfigOptionSource for YamlSource {
    fn read_access_token(&self) -> Option<String> {
        self.raw.access_token.clone()
    }

    fn read_default_locale(&self) -> Option<Locale> {
        self.raw.default_locale.as_deref().and_then(|c| self.locale(c))
    }

    fn read_desired_locales(&self) -> Vec<Locale> {
        self.raw
            .desired_locales
            .iter()
            .filter_map(|c| self.locale(c))
            .collect()
    }

    fn read_messaging_host(&self) -> Option<String> {
        self.raw.messaging_host.clone()
    }

    fn read_messaging_port(&self) -> Option<u16> {
        self.raw.messaging_port
    }

    fn read_messaging_password(&self) -> Option<String> {
        self.raw.messaging_password.clone()
    }

    fn read_use_messaging_ssl(&self) -> Option<bool> {
        self.raw.messaging_use_ssl
    }

    fn read_api_host(&self) -> Option<String> {
        self.raw.api_host.clone()
    }

    fn read_api_port(&self) -> Option<u16> {
        self.raw.api_port
    }

    fn read_use_api_ssl(&self) -> Option<bool> {
        self.raw.api_use_ssl
    }

    fn read_max_inactivity_seconds(&self) -> Option<u32> {
        self.raw.max_inactivity_seconds
    }

    fn read_max_recovery_time(&self) -> Option<u32> {
        self.raw.max_recovery_time
    }

    fn read_min_interval_between_recovery_requests(&self) -> Option<u32> {
        self.raw.min_interval_between_recovery_requests
    }

    fn read_use_integration(&self) -> Option<bool> {
        self.raw.use_integration
    }

    fn read_node_id(&self) -> Option<i32> {
        self.raw.node_id
    }

    fn read_disabled_producers(&self) -> Vec<u32> {
        self.raw.disabled_producers.clone()
    }

    fn read_exception_handling_strategy(&self) -> Option<ExceptionHandlingStrategy> {
        let raw = self.raw.exception_handling_strategy.as_deref()?;
        match raw.parse() {
            Ok(strategy) => Some(strategy),
            Err(_) => {
                tracing::warn!(value = raw, "Ignoring unknown exception handling strategy");
                None
            }
        }
    }

    fn read_concurrent_listener_enabled(&self) -> Option<bool> {
        self.raw.concurrent_listener.enabled
    }

    fn read_concurrent_listener_threads(&self) -> Option<u32> {
        self.raw.concurrent_listener.threads
    }

    fn read_concurrent_listener_queue_size(&self) -> Option<u32> {
        self.raw.concurrent_listener.queue_size
    }

    fn read_concurrent_listener_handle_errors_asynchronously(&self) -> Option<bool> {
        self.raw.concurrent_listener.handle_errors_asynchronously
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_properties() -> PropertiesSource {
        let entries = BTreeMap::from([
            ("uf.sdk.accessToken".to_string(), "test-token".to_string()),
            ("uf.sdk.nodeId".to_string(), "46".to_string()),
            ("uf.sdk.maxInactivitySeconds".to_string(), "25".to_string()),
            ("uf.sdk.desiredLocales".to_string(), "fr, de,en".to_string()),
            ("uf.sdk.disabledProducers".to_string(), "5,6,7,8".to_string()),
            ("uf.sdk.apiUseSsl".to_string(), "true".to_string()),
            (
                "uf.sdk.exceptionHandlingStrategy".to_string(),
                "throw".to_string(),
            ),
        ]);
        PropertiesSource::from_map(entries)
    }

    #[test]
    fn properties_typed_reads() {
        let source = sample_properties();

        assert_eq!(source.read_access_token().as_deref(), Some("test-token"));
        assert_eq!(source.read_node_id(), Some(46));
        assert_eq!(source.read_max_inactivity_seconds(), Some(25));
        assert_eq!(source.read_use_api_ssl(), Some(true));
        assert_eq!(
            source.read_exception_handling_strategy(),
            Some(ExceptionHandlingStrategy::Throw)
        );
        assert_eq!(
            source.read_desired_locales(),
            vec![
                Locale::new("fr").unwrap(),
                Locale::new("de").unwrap(),
                Locale::new("en").unwrap(),
            ]
        );
        assert_eq!(source.read_disabled_producers(), vec![5, 6, 7, 8]);
    }

    #[test]
    fn absent_properties_read_as_absent_or_empty() {
        let source = PropertiesSource::default();

        assert_eq!(source.read_access_token(), None);
        assert_eq!(source.read_node_id(), None);
        assert!(source.read_desired_locales().is_empty());
        assert!(source.read_disabled_producers().is_empty());
    }

    #[test]
    fn unparseable_property_reads_as_absent() {
        let entries = BTreeMap::from([("uf.sdk.nodeId".to_string(), "not-a-number".to_string())]);
        let source = PropertiesSource::from_map(entries);

        assert_eq!(source.read_node_id(), None);
    }

    #[test]
    fn yaml_source_reads_nested_listener_settings() {
        let source = YamlSource::load_from_str(
            r#"
access_token: "test-token-yaml"
node_id: 46
max_inactivity_seconds: 25
desired_locales: ["fr", "de", "en"]
disabled_producers: [5, 6, 7, 8]
exception_handling_strategy: "throw"
concurrent_listener:
  enabled: true
  threads: 25
  queue_size: 1000
  handle_errors_asynchronously: false
"#,
        )
        .unwrap();

        assert_eq!(source.read_access_token().as_deref(), Some("test-token-yaml"));
        assert_eq!(source.read_node_id(), Some(46));
        assert_eq!(source.read_max_inactivity_seconds(), Some(25));
        assert_eq!(
            source.read_exception_handling_strategy(),
            Some(ExceptionHandlingStrategy::Throw)
        );
        assert_eq!(source.read_concurrent_listener_enabled(), Some(true));
        assert_eq!(source.read_concurrent_listener_threads(), Some(25));
        assert_eq!(source.read_concurrent_listener_queue_size(), Some(1000));
        assert_eq!(
            source.read_concurrent_listener_handle_errors_asynchronously(),
            Some(false)
        );
        assert_eq!(source.read_disabled_producers(), vec![5, 6, 7, 8]);
    }

    #[test]
    fn yaml_source_from_file() {
        use std::io::Write;

        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "access_token: file-token\napi_host: api.example.com\n").unwrap();

        let source = YamlSource::from_file(file.path()).unwrap();
        assert_eq!(source.read_access_token().as_deref(), Some("file-token"));
        assert_eq!(source.read_api_host().as_deref(), Some("api.example.com"));
    }

    #[test]
    fn yaml_source_missing_file_is_an_error() {
        let result = YamlSource::from_file("/nonexistent/application.yml");
        assert!(result.is_err());
    }
}
