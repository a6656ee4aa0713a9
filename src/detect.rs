// SPDX-License-Identifier: MPL-2.0
//! Language detection from ranked environment sources.
//!
//! Pure: the caller snapshots the environment into [`DetectionInputs`] and
//! detection neither reads nor writes anything else.

use log::debug;
use unic_langid::LanguageIdentifier;

use crate::config::EngineConfig;

/// Snapshot of the environment detection reads.
#[derive(Debug, Clone, Default)]
pub struct DetectionInputs {
    /// Value of the language query parameter, if the URL carries one.
    pub query_lang: Option<String>,
    /// Persisted preference from durable storage.
    pub stored: Option<String>,
    /// The host's reported locale as a full tag (e.g. `fr-CA`).
    pub host_locale: Option<String>,
}

/// Determines the active language.
///
/// Deterministic priority order, first match wins:
/// 1. the URL query parameter,
/// 2. the persisted preference,
/// 3. the host locale's primary subtag,
/// 4. the configured default.
///
/// Every tier validates membership in the supported set; values outside it
/// are ignored, never promoted.
pub fn detect_language(config: &EngineConfig, inputs: DetectionInputs) -> String {
    if let Some(lang) = &inputs.query_lang {
        if config.is_supported(lang) {
            debug!("language '{lang}' selected from query parameter");
            return lang.clone();
        }
    }

    if let Some(lang) = &inputs.stored {
        if config.is_supported(lang) {
            debug!("language '{lang}' selected from stored preference");
            return lang.clone();
        }
    }

    if let Some(tag) = &inputs.host_locale {
        if let Some(primary) = primary_subtag(tag) {
            if config.is_supported(&primary) {
                debug!("language '{primary}' selected from host locale '{tag}'");
                return primary;
            }
        }
    }

    debug!(
        "language '{}' selected from configured default",
        config.default_language
    );
    config.default_language.clone()
}

/// Primary subtag of a locale tag (`fr-CA` → `fr`), or `None` for tags
/// that are not well-formed language identifiers.
fn primary_subtag(tag: &str) -> Option<String> {
    tag.parse::<LanguageIdentifier>()
        .ok()
        .map(|id| id.language.as_str().to_string())
}
