// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for the engine configuration.
//!
//! This module is the single source of truth for the external contract
//! strings: the supported language set, the storage key, the URL query
//! parameter, and the bundle directory. Deployments override them through
//! [`EngineConfig`](super::EngineConfig); the constants here match the
//! markup and translation files a page ships by default.

// ==========================================================================
// Language Defaults
// ==========================================================================

/// Language codes understood out of the box. The first entry is the
/// default/fallback language.
pub const DEFAULT_LANGUAGES: &[&str] = &["en", "fr", "es"];

/// Default and fallback language code.
pub const DEFAULT_LANGUAGE: &str = "en";

// ==========================================================================
// External Contract Strings
// ==========================================================================

/// Key under which the current language is persisted in durable storage.
pub const STORAGE_KEY: &str = "eea-lang";

/// URL query parameter read at startup and rewritten on every switch.
pub const QUERY_PARAM: &str = "lang";

/// Directory (relative to the hosting document) containing `<code>.json`
/// translation bundles.
pub const BUNDLE_DIR: &str = "lang";

// ==========================================================================
// Compile-time Validation
// ==========================================================================

const _: () = {
    assert!(!DEFAULT_LANGUAGES.is_empty());
    assert!(!DEFAULT_LANGUAGE.is_empty());
    assert!(!STORAGE_KEY.is_empty());
    assert!(!QUERY_PARAM.is_empty());
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_language_is_in_the_supported_set() {
        assert!(DEFAULT_LANGUAGES.contains(&DEFAULT_LANGUAGE));
    }

    #[test]
    fn contract_strings_are_stable() {
        // Page markup and stored preferences depend on these exact values.
        assert_eq!(STORAGE_KEY, "eea-lang");
        assert_eq!(QUERY_PARAM, "lang");
        assert_eq!(BUNDLE_DIR, "lang");
    }
}
