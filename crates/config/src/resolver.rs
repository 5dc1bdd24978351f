//! Fixed connection defaults per named environment

use types::Environment;

/// Connection defaults bundled with a named environment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnvironmentSettings {
    /// AMQP broker host
    pub messaging_host: &'static str,
    /// Sports API host
    pub api_host: &'static str,
    /// AMQP broker port
    pub port: u16,
    /// Whether both the broker and API connections use SSL
    pub use_ssl: bool,
}

pub const INTEGRATION: EnvironmentSettings = EnvironmentSettings {
    messaging_host: "stgmq.betradar.com",
    api_host: "stgapi.betradar.com",
    port: 5671,
    use_ssl: true,
};

pub const PRODUCTION: EnvironmentSettings = EnvironmentSettings {
    messaging_host: "mq.betradar.com",
    api_host: "api.betradar.com",
    port: 5671,
    use_ssl: true,
};

pub const REPLAY: EnvironmentSettings = EnvironmentSettings {
    messaging_host: "replaymq.betradar.com",
    api_host: "stgapi.betradar.com",
    port: 5671,
    use_ssl: true,
};

pub const GLOBAL_PRODUCTION: EnvironmentSettings = EnvironmentSettings {
    messaging_host: "global.mq.betradar.com",
    api_host: "global.api.betradar.com",
    port: 5671,
    use_ssl: true,
};

pub const GLOBAL_INTEGRATION: EnvironmentSettings = EnvironmentSettings {
    messaging_host: "global.stgmq.betradar.com",
    api_host: "global.stgapi.betradar.com",
    port: 5671,
    use_ssl: true,
};

pub const PROXY_SINGAPORE: EnvironmentSettings = EnvironmentSettings {
    messaging_host: "mq.ap-southeast-1.betradar.com",
    api_host: "api.ap-southeast-1.betradar.com",
    port: 5671,
    use_ssl: true,
};

pub const PROXY_TOKYO: EnvironmentSettings = EnvironmentSettings {
    messaging_host: "mq.ap-northeast-1.betradar.com",
    api_host: "api.ap-northeast-1.betradar.com",
    port: 5671,
    use_ssl: true,
};

/// Resolve the fixed connection defaults of a named environment.
///
/// The deprecated staging alias maps to the integration tuple. `Custom`
/// carries no fixed defaults and yields `None`; callers handle the
/// "no match" case explicitly.
#[allow(deprecated)]
pub fn resolve(environment: Environment) -> Option<EnvironmentSettings> {
    match environment {
        Environment::Staging | Environment::Integration => Some(INTEGRATION),
        Environment::Production => Some(PRODUCTION),
        Environment::Replay => Some(REPLAY),
        Environment::GlobalProduction => Some(GLOBAL_PRODUCTION),
        Environment::GlobalIntegration => Some(GLOBAL_INTEGRATION),
        Environment::ProxySingapore => Some(PROXY_SINGAPORE),
        Environment::ProxyTokyo => Some(PROXY_TOKYO),
        Environment::Custom => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[allow(deprecated)]
    fn staging_alias_resolves_to_integration_tuple() {
        assert_eq!(resolve(Environment::Staging), resolve(Environment::Integration));
        assert_eq!(resolve(Environment::Integration), Some(INTEGRATION));
    }

    #[test]
    fn custom_has_no_fixed_defaults() {
        assert_eq!(resolve(Environment::Custom), None);
    }

    #[test]
    fn every_fixed_environment_uses_ssl_on_5671() {
        for env in [
            Environment::Integration,
            Environment::Production,
            Environment::Replay,
            Environment::GlobalProduction,
            Environment::GlobalIntegration,
            Environment::ProxySingapore,
            Environment::ProxyTokyo,
        ] {
            let settings = resolve(env).unwrap();
            assert_eq!(settings.port, 5671);
            assert!(settings.use_ssl);
        }
    }
}
