// SPDX-License-Identifier: MPL-2.0
//! Writes resolved translations into the document.
//!
//! Bindings are discovered on every run by scanning for the annotation
//! attributes, so the applier can be re-run at any time after markup or
//! bundle changes. A key that does not resolve never overwrites anything:
//! the authored fallback content for the default language stays visible.

use crate::bundle::{Bundle, Resolution};
use crate::page::{self, Document};

/// Applies the bundle to every annotated element. Idempotent.
///
/// Three independent passes: text/markup content, the placeholder
/// attribute, the title attribute.
pub fn apply_translations(doc: &mut Document, bundle: Option<&Bundle>) {
    apply_content(doc, bundle);
    apply_attribute(doc, bundle, page::ATTR_PLACEHOLDER, "placeholder");
    apply_attribute(doc, bundle, page::ATTR_TITLE, "title");
}

fn apply_content(doc: &mut Document, bundle: Option<&Bundle>) {
    doc.for_each_mut(|el| {
        let Some(key) = el.attr(page::ATTR_TEXT).map(str::to_string) else {
            return;
        };
        let Some(text) = resolve(bundle, &key) else {
            return;
        };
        if el.has_attr(page::ATTR_HTML) {
            el.set_markup(&text);
        } else {
            el.set_text(&text);
        }
    });
}

fn apply_attribute(doc: &mut Document, bundle: Option<&Bundle>, key_attr: &str, target: &str) {
    doc.for_each_mut(|el| {
        let Some(key) = el.attr(key_attr).map(str::to_string) else {
            return;
        };
        if let Some(text) = resolve(bundle, &key) {
            el.set_attr(target, &text);
        }
    });
}

fn resolve(bundle: Option<&Bundle>, key: &str) -> Option<String> {
    match bundle?.resolve(key) {
        Resolution::Resolved(text) => Some(text),
        Resolution::Missing => None,
    }
}
