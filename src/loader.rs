// SPDX-License-Identifier: MPL-2.0
//! Asynchronous translation loading with single-level fallback.
//!
//! [`TranslationSource`] is the port for fetching raw bundle bodies;
//! adapters cover HTTP (document-relative, like the page's own fetches),
//! a directory on disk, and an in-memory map. [`load_bundle`] walks the
//! fallback chain: the requested language, then the default once, then
//! pass-through mode.

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use log::warn;
use url::Url;

use crate::bundle::Bundle;
use crate::config::EngineConfig;
use crate::error::{Error, Result};

/// Port for fetching a raw bundle body by document-relative path.
#[allow(async_fn_in_trait)]
pub trait TranslationSource {
    /// Fetches the body at `path` (e.g. `lang/fr.json`).
    async fn fetch(&self, path: &str) -> Result<String>;
}

// ==========================================================================
// HttpSource
// ==========================================================================

/// Fetches bundles over HTTP, resolving paths against the hosting
/// document's URL. Relative paths resolve per document, so iframe
/// nesting needs no special casing.
#[derive(Debug, Clone)]
pub struct HttpSource {
    client: reqwest::Client,
    base: Url,
}

impl HttpSource {
    pub fn new(document_url: &Url) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("langswap/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            client,
            base: document_url.clone(),
        })
    }
}

impl TranslationSource for HttpSource {
    async fn fetch(&self, path: &str) -> Result<String> {
        let url = self.base.join(path)?;
        let response = self.client.get(url).send().await?;
        if !response.status().is_success() {
            return Err(Error::Fetch(format!("HTTP status: {}", response.status())));
        }
        Ok(response.text().await?)
    }
}

// ==========================================================================
// DirSource
// ==========================================================================

/// Serves bundles from a directory on disk (local embeddings and demos).
#[derive(Debug, Clone)]
pub struct DirSource {
    root: PathBuf,
}

impl DirSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl TranslationSource for DirSource {
    async fn fetch(&self, path: &str) -> Result<String> {
        fs::read_to_string(self.root.join(path)).map_err(|e| Error::Fetch(e.to_string()))
    }
}

// ==========================================================================
// StaticSource
// ==========================================================================

/// In-memory source for tests and embedded bundles.
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    files: HashMap<String, String>,
}

impl StaticSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: registers a bundle body under a path.
    #[must_use]
    pub fn with_file(mut self, path: &str, body: &str) -> Self {
        self.files.insert(path.to_string(), body.to_string());
        self
    }
}

impl TranslationSource for StaticSource {
    async fn fetch(&self, path: &str) -> Result<String> {
        self.files
            .get(path)
            .cloned()
            .ok_or_else(|| Error::Fetch(format!("no entry for '{path}'")))
    }
}

// ==========================================================================
// Fallback chain
// ==========================================================================

/// Loads the bundle for `lang`, falling back once to the default language
/// when the fetch or parse fails. Returns `None` when the default itself
/// fails: pass-through mode, where key paths render verbatim.
///
/// The chain is a single step: requesting the default language and failing
/// terminates immediately, so a broken default can never loop.
pub async fn load_bundle<S: TranslationSource>(
    source: &S,
    config: &EngineConfig,
    lang: &str,
) -> Option<Bundle> {
    let mut attempt = Some(lang);
    while let Some(code) = attempt {
        let path = format!("{}/{code}.json", config.bundle_dir);
        match fetch_and_parse(source, &path, code).await {
            Ok(bundle) => return Some(bundle),
            Err(error) => {
                warn!("failed to load translations for '{code}' from '{path}': {error}");
                attempt = (code != config.default_language).then_some(config.default_language.as_str());
            }
        }
    }
    None
}

async fn fetch_and_parse<S: TranslationSource>(source: &S, path: &str, lang: &str) -> Result<Bundle> {
    let body = source.fetch(path).await?;
    Bundle::parse(lang, &body)
}
