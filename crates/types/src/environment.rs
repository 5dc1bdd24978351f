//! Named feed environments

use serde::{Deserialize, Serialize};

/// A description of the environment the SDK connects to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Environment {
    /// Legacy name kept for configuration files written against older
    /// SDK versions; resolves to the same targets as [`Integration`].
    ///
    /// [`Integration`]: Environment::Integration
    #[deprecated(note = "use Environment::Integration")]
    Staging,

    Integration,

    Production,

    Custom,

    Replay,

    GlobalProduction,

    GlobalIntegration,

    ProxySingapore,

    ProxyTokyo,
}

impl Environment {
    /// Resolve an environment from its configured name.
    ///
    /// `"Staging"` maps to [`Environment::Integration`] so legacy
    /// configurations observe unchanged behavior. An unrecognized name
    /// yields `None`, never an error.
    pub fn from_name(name: &str) -> Option<Environment> {
        match name {
            "Staging" | "Integration" => Some(Environment::Integration),
            "Production" => Some(Environment::Production),
            "Custom" => Some(Environment::Custom),
            "Replay" => Some(Environment::Replay),
            "GlobalProduction" => Some(Environment::GlobalProduction),
            "GlobalIntegration" => Some(Environment::GlobalIntegration),
            "ProxySingapore" => Some(Environment::ProxySingapore),
            "ProxyTokyo" => Some(Environment::ProxyTokyo),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn staging_aliases_to_integration() {
        assert_eq!(
            Environment::from_name("Staging"),
            Some(Environment::Integration)
        );
        assert_eq!(
            Environment::from_name("Integration"),
            Some(Environment::Integration)
        );
    }

    #[test]
    fn unknown_name_yields_no_match() {
        assert_eq!(Environment::from_name("Sandbox"), None);
        assert_eq!(Environment::from_name(""), None);
    }

    #[test]
    fn every_current_name_round_trips() {
        for (name, env) in [
            ("Production", Environment::Production),
            ("Custom", Environment::Custom),
            ("Replay", Environment::Replay),
            ("GlobalProduction", Environment::GlobalProduction),
            ("GlobalIntegration", Environment::GlobalIntegration),
            ("ProxySingapore", Environment::ProxySingapore),
            ("ProxyTokyo", Environment::ProxyTokyo),
        ] {
            assert_eq!(Environment::from_name(name), Some(env));
        }
    }
}
