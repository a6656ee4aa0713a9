// SPDX-License-Identifier: MPL-2.0
//! Engine configuration: the supported language set and the external
//! contract strings (storage key, query parameter, bundle directory,
//! trusted frame origins).
//!
//! # Examples
//!
//! ```
//! use langswap::config::EngineConfig;
//!
//! let config = EngineConfig::new(["en", "de", "ja"], "en")
//!     .with_allowed_origins(["https://example.org"]);
//!
//! assert!(config.is_supported("de"));
//! assert!(!config.is_supported("fr"));
//! ```

use serde::{Deserialize, Serialize};

pub mod defaults;

pub use defaults::{BUNDLE_DIR, DEFAULT_LANGUAGE, DEFAULT_LANGUAGES, QUERY_PARAM, STORAGE_KEY};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Supported language codes. Detection and switching both validate
    /// membership before committing a code.
    #[serde(default = "default_languages")]
    pub languages: Vec<String>,

    /// The fallback language, used when detection finds nothing and when a
    /// bundle load fails. Must be a member of `languages`.
    #[serde(default = "default_language")]
    pub default_language: String,

    /// Durable-storage key for the persisted preference.
    #[serde(default = "default_storage_key")]
    pub storage_key: String,

    /// URL query parameter carrying the language code.
    #[serde(default = "default_query_param")]
    pub query_param: String,

    /// Directory holding `<code>.json` bundles, relative to the document.
    #[serde(default = "default_bundle_dir")]
    pub bundle_dir: String,

    /// Origins trusted for cross-frame language messages, on both send and
    /// receive. Empty means no frame traffic is accepted.
    #[serde(default)]
    pub allowed_origins: Vec<String>,
}

fn default_languages() -> Vec<String> {
    DEFAULT_LANGUAGES.iter().map(|s| s.to_string()).collect()
}

fn default_language() -> String {
    DEFAULT_LANGUAGE.to_string()
}

fn default_storage_key() -> String {
    STORAGE_KEY.to_string()
}

fn default_query_param() -> String {
    QUERY_PARAM.to_string()
}

fn default_bundle_dir() -> String {
    BUNDLE_DIR.to_string()
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            languages: default_languages(),
            default_language: default_language(),
            storage_key: default_storage_key(),
            query_param: default_query_param(),
            bundle_dir: default_bundle_dir(),
            allowed_origins: Vec::new(),
        }
    }
}

impl EngineConfig {
    /// Creates a configuration for the given supported set and default.
    /// Contract strings keep their default values.
    pub fn new<I, S>(languages: I, default_language: &str) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            languages: languages.into_iter().map(Into::into).collect(),
            default_language: default_language.to_string(),
            ..Self::default()
        }
    }

    /// Sets the trusted frame origins.
    #[must_use]
    pub fn with_allowed_origins<I, S>(mut self, origins: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allowed_origins = origins.into_iter().map(Into::into).collect();
        self
    }

    /// Returns `true` if `code` is a member of the supported set.
    pub fn is_supported(&self, code: &str) -> bool {
        self.languages.iter().any(|l| l == code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_supports_default_language() {
        let config = EngineConfig::default();
        assert!(config.is_supported(&config.default_language));
        assert_eq!(config.storage_key, "eea-lang");
        assert_eq!(config.query_param, "lang");
    }

    #[test]
    fn is_supported_rejects_unknown_codes() {
        let config = EngineConfig::default();
        assert!(!config.is_supported("de"));
        assert!(!config.is_supported(""));
        assert!(!config.is_supported("EN"));
    }

    #[test]
    fn custom_set_replaces_defaults() {
        let config = EngineConfig::new(["de", "ja"], "de");
        assert!(config.is_supported("ja"));
        assert!(!config.is_supported("en"));
        assert_eq!(config.default_language, "de");
    }

    #[test]
    fn deserializes_with_missing_fields() {
        let config: EngineConfig = toml::from_str("languages = [\"en\", \"it\"]\n")
            .expect("partial config should deserialize");
        assert!(config.is_supported("it"));
        assert_eq!(config.default_language, "en");
        assert_eq!(config.bundle_dir, "lang");
    }
}
