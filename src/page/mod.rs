// SPDX-License-Identifier: MPL-2.0
//! Owned document model: the element tree, the document URL with its
//! history slot, and the document language attribute.
//!
//! The attribute names below are the external contract authored in page
//! markup; they are consumed here and never invented elsewhere.

use url::Url;

use crate::error::Result;

mod element;

pub use element::{Content, Element};

/// Text/markup content key.
pub const ATTR_TEXT: &str = "data-i18n";

/// Presence flag: write resolved content as markup instead of text.
pub const ATTR_HTML: &str = "data-i18n-html";

/// Placeholder-attribute key.
pub const ATTR_PLACEHOLDER: &str = "data-i18n-placeholder";

/// Title-attribute key.
pub const ATTR_TITLE: &str = "data-i18n-title";

/// Language code carried by a switch control.
pub const ATTR_SWITCH: &str = "data-lang";

/// Element id of the optional language dropdown.
pub const SELECT_ID: &str = "lang-select";

/// Class toggled on the switch control matching the current language.
pub const ACTIVE_CLASS: &str = "active";

/// A page: URL, navigation history, language attribute, element tree.
#[derive(Debug, Clone)]
pub struct Document {
    url: Url,
    history: Vec<String>,
    lang: String,
    root: Element,
}

impl Document {
    /// Creates a document at `url` with the given root element.
    pub fn new(url: &str, root: Element) -> Result<Self> {
        let url = Url::parse(url)?;
        let history = vec![url.to_string()];
        Ok(Self {
            url,
            history,
            lang: String::new(),
            root,
        })
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    /// ASCII serialization of the document origin (scheme://host[:port]).
    pub fn origin(&self) -> String {
        self.url.origin().ascii_serialization()
    }

    /// The document language attribute.
    pub fn lang(&self) -> &str {
        &self.lang
    }

    pub fn set_lang(&mut self, code: &str) {
        self.lang = code.to_string();
    }

    /// Navigation history entries. Query rewrites replace the current
    /// entry in place, so the length only grows on real navigation.
    pub fn history(&self) -> &[String] {
        &self.history
    }

    /// Value of a query parameter, if present.
    pub fn query_param(&self, name: &str) -> Option<String> {
        self.url
            .query_pairs()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.into_owned())
    }

    /// Rewrites one query parameter in place, preserving the others, and
    /// replaces the current history entry rather than pushing a new one.
    pub fn replace_query_param(&mut self, name: &str, value: &str) {
        let pairs: Vec<(String, String)> = self
            .url
            .query_pairs()
            .map(|(key, val)| (key.into_owned(), val.into_owned()))
            .collect();

        {
            let mut editor = self.url.query_pairs_mut();
            editor.clear();
            let mut replaced = false;
            for (key, val) in &pairs {
                if key == name {
                    editor.append_pair(key, value);
                    replaced = true;
                } else {
                    editor.append_pair(key, val);
                }
            }
            if !replaced {
                editor.append_pair(name, value);
            }
        }

        if let Some(current) = self.history.last_mut() {
            *current = self.url.to_string();
        }
    }

    pub fn root(&self) -> &Element {
        &self.root
    }

    pub fn root_mut(&mut self) -> &mut Element {
        &mut self.root
    }

    /// Visits every element in the tree.
    pub fn for_each(&self, mut f: impl FnMut(&Element)) {
        self.root.visit(&mut f);
    }

    /// Mutable visit over every element in the tree.
    pub fn for_each_mut(&mut self, mut f: impl FnMut(&mut Element)) {
        self.root.visit_mut(&mut f);
    }

    /// Returns `true` if any element matches the predicate.
    pub fn any(&self, pred: impl Fn(&Element) -> bool) -> bool {
        self.root.find(&pred).is_some()
    }

    pub fn element_by_id(&self, id: &str) -> Option<&Element> {
        self.root.find(&|el| el.attr("id") == Some(id))
    }

    pub fn element_by_id_mut(&mut self, id: &str) -> Option<&mut Element> {
        self.root.find_mut(&|el| el.attr("id") == Some(id))
    }
}
