//! Language codes for translatable feed data

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// A lowercase ISO 639-1 style language code (e.g. `en`, `fr`, `de`)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Locale(String);

impl Locale {
    /// Create a locale from a language code.
    ///
    /// The code must be non-empty and purely alphabetic; it is stored
    /// lowercased so `EN` and `en` compare equal.
    pub fn new(code: &str) -> Result<Self, ConfigError> {
        if code.is_empty() || !code.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(ConfigError::InvalidArgument {
                field: "locale",
                message: format!("invalid language code: {:?}", code),
            });
        }

        Ok(Locale(code.to_ascii_lowercase()))
    }

    /// The language code
    pub fn code(&self) -> &str {
        &self.0
    }
}

impl FromStr for Locale {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Locale::new(s)
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_are_normalized_to_lowercase() {
        assert_eq!(Locale::new("EN").unwrap(), Locale::new("en").unwrap());
        assert_eq!(Locale::new("fr").unwrap().code(), "fr");
    }

    #[test]
    fn rejects_empty_and_non_alphabetic_codes() {
        assert!(Locale::new("").is_err());
        assert!(Locale::new("e n").is_err());
        assert!(Locale::new("en-US").is_err());
    }
}
