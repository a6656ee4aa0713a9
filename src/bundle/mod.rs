// SPDX-License-Identifier: MPL-2.0
//! Translation bundles and key-path resolution.
//!
//! A bundle is the parsed translation data for exactly one language: an
//! arbitrarily nested mapping from string keys to leaf values, immutable
//! once loaded. Key paths are dot-separated addresses into that tree.
//! Resolution never fails hard: a miss is reported through
//! [`Resolution::Missing`] so callers can keep whatever text the page
//! already shows.

use std::collections::BTreeMap;

use log::warn;
use serde::Deserialize;

use crate::error::{Error, Result};

/// One node of a bundle tree: a nested table or a leaf value.
///
/// The untagged representation maps JSON objects to tables and everything
/// else (strings, numbers, booleans, arrays, null) to leaves, so any JSON
/// object parses without schema validation.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Node {
    Table(BTreeMap<String, Node>),
    Leaf(serde_json::Value),
}

/// Outcome of resolving a key path against a bundle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// The full path resolved to a displayable leaf.
    Resolved(String),
    /// A segment was absent, crossed a non-table value, or the path ended
    /// on a table.
    Missing,
}

impl Resolution {
    /// The resolved text, if resolution succeeded.
    pub fn resolved(&self) -> Option<&str> {
        match self {
            Resolution::Resolved(text) => Some(text),
            Resolution::Missing => None,
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, Resolution::Missing)
    }
}

/// Parsed translation data for one language.
#[derive(Debug, Clone)]
pub struct Bundle {
    lang: String,
    root: BTreeMap<String, Node>,
}

impl Bundle {
    /// Parses a JSON bundle body. The root must be an object; anything
    /// else is a parse failure (and triggers the loader's fallback).
    pub fn parse(lang: &str, body: &str) -> Result<Self> {
        let node: Node = serde_json::from_str(body)?;
        match node {
            Node::Table(root) => Ok(Self {
                lang: lang.to_string(),
                root,
            }),
            Node::Leaf(_) => Err(Error::Parse(format!(
                "bundle for '{lang}' is not a JSON object"
            ))),
        }
    }

    /// The language this bundle was loaded for.
    pub fn lang(&self) -> &str {
        &self.lang
    }

    /// Resolves a dot-separated key path.
    ///
    /// Descends one table per segment. Missing segments, segments that
    /// cross a leaf, and paths that stop on a table all log a warning and
    /// produce [`Resolution::Missing`]; this never panics or errors.
    pub fn resolve(&self, key_path: &str) -> Resolution {
        let mut table = &self.root;
        let mut segments = key_path.split('.').peekable();

        while let Some(segment) = segments.next() {
            match table.get(segment) {
                Some(Node::Table(next)) => {
                    if segments.peek().is_none() {
                        warn!("translation key '{key_path}' stops on a table, not a leaf");
                        return Resolution::Missing;
                    }
                    table = next;
                }
                Some(Node::Leaf(value)) => {
                    if segments.peek().is_some() {
                        warn!("translation key '{key_path}' descends through a leaf at '{segment}'");
                        return Resolution::Missing;
                    }
                    return Resolution::Resolved(leaf_text(value));
                }
                None => {
                    warn!("translation key '{key_path}' not found (no segment '{segment}')");
                    return Resolution::Missing;
                }
            }
        }

        Resolution::Missing
    }
}

fn leaf_text(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Bundle {
        Bundle::parse(
            "en",
            r#"{
                "title": { "main": "Hello", "sub": "World" },
                "nav": { "deep": { "leaf": "Down here" } },
                "count": 3,
                "flat": "Top level"
            }"#,
        )
        .expect("sample bundle should parse")
    }

    #[test]
    fn resolves_nested_string_leaf() {
        let bundle = sample();
        assert_eq!(
            bundle.resolve("title.main"),
            Resolution::Resolved("Hello".to_string())
        );
        assert_eq!(
            bundle.resolve("nav.deep.leaf"),
            Resolution::Resolved("Down here".to_string())
        );
    }

    #[test]
    fn resolves_single_segment_path() {
        let bundle = sample();
        assert_eq!(
            bundle.resolve("flat"),
            Resolution::Resolved("Top level".to_string())
        );
    }

    #[test]
    fn non_string_leaf_renders_as_json() {
        let bundle = sample();
        assert_eq!(bundle.resolve("count"), Resolution::Resolved("3".to_string()));
    }

    #[test]
    fn missing_segment_is_missing() {
        let bundle = sample();
        assert!(bundle.resolve("title.absent").is_missing());
        assert!(bundle.resolve("absent.anything").is_missing());
    }

    #[test]
    fn path_through_leaf_is_missing() {
        let bundle = sample();
        assert!(bundle.resolve("title.main.deeper").is_missing());
    }

    #[test]
    fn path_ending_on_table_is_missing() {
        let bundle = sample();
        assert!(bundle.resolve("title").is_missing());
        assert!(bundle.resolve("nav.deep").is_missing());
    }

    #[test]
    fn empty_path_is_missing() {
        let bundle = sample();
        assert!(bundle.resolve("").is_missing());
    }

    #[test]
    fn non_object_root_fails_to_parse() {
        assert!(Bundle::parse("en", "\"just a string\"").is_err());
        assert!(Bundle::parse("en", "[1, 2, 3]").is_err());
        assert!(Bundle::parse("en", "not json at all").is_err());
    }

    #[test]
    fn lang_is_recorded() {
        assert_eq!(sample().lang(), "en");
    }
}
