// SPDX-License-Identifier: MPL-2.0
//! Element tree underlying the document model.

use std::collections::BTreeMap;

/// Visible content of an element.
///
/// `Markup` is content that was assigned as raw markup (the counterpart of
/// writing HTML instead of text); the engine never interprets it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Content {
    Text(String),
    Markup(String),
}

impl Content {
    /// The inner string, regardless of kind.
    pub fn as_str(&self) -> &str {
        match self {
            Content::Text(s) | Content::Markup(s) => s,
        }
    }
}

/// One element of the page: a tag name, attributes, content, children.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    tag: String,
    attrs: BTreeMap<String, String>,
    content: Content,
    children: Vec<Element>,
}

impl Element {
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_string(),
            attrs: BTreeMap::new(),
            content: Content::Text(String::new()),
            children: Vec::new(),
        }
    }

    /// Builder: sets an attribute.
    #[must_use]
    pub fn with_attr(mut self, name: &str, value: &str) -> Self {
        self.set_attr(name, value);
        self
    }

    /// Builder: sets plain text content.
    #[must_use]
    pub fn with_text(mut self, text: &str) -> Self {
        self.set_text(text);
        self
    }

    /// Builder: appends a child element.
    #[must_use]
    pub fn with_child(mut self, child: Element) -> Self {
        self.children.push(child);
        self
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs.get(name).map(String::as_str)
    }

    pub fn has_attr(&self, name: &str) -> bool {
        self.attrs.contains_key(name)
    }

    pub fn set_attr(&mut self, name: &str, value: &str) {
        self.attrs.insert(name.to_string(), value.to_string());
    }

    pub fn content(&self) -> &Content {
        &self.content
    }

    /// Plain text content, if the element holds text (not markup).
    pub fn text(&self) -> Option<&str> {
        match &self.content {
            Content::Text(s) => Some(s),
            Content::Markup(_) => None,
        }
    }

    /// Raw markup content, if the element holds markup.
    pub fn markup(&self) -> Option<&str> {
        match &self.content {
            Content::Markup(s) => Some(s),
            Content::Text(_) => None,
        }
    }

    pub fn set_text(&mut self, text: &str) {
        self.content = Content::Text(text.to_string());
    }

    pub fn set_markup(&mut self, markup: &str) {
        self.content = Content::Markup(markup.to_string());
    }

    // ======================================================================
    // Class tokens
    // ======================================================================

    pub fn has_class(&self, name: &str) -> bool {
        self.attr("class")
            .is_some_and(|list| list.split_whitespace().any(|token| token == name))
    }

    pub fn add_class(&mut self, name: &str) {
        if self.has_class(name) {
            return;
        }
        let value = match self.attr("class") {
            Some(list) if !list.is_empty() => format!("{list} {name}"),
            _ => name.to_string(),
        };
        self.set_attr("class", &value);
    }

    pub fn remove_class(&mut self, name: &str) {
        let Some(list) = self.attr("class") else {
            return;
        };
        let kept: Vec<&str> = list
            .split_whitespace()
            .filter(|token| *token != name)
            .collect();
        if kept.is_empty() {
            self.attrs.remove("class");
        } else {
            let joined = kept.join(" ");
            self.set_attr("class", &joined);
        }
    }

    // ======================================================================
    // Traversal
    // ======================================================================

    pub fn children(&self) -> &[Element] {
        &self.children
    }

    pub fn children_mut(&mut self) -> &mut Vec<Element> {
        &mut self.children
    }

    /// Visits this element and every descendant, depth first.
    pub fn visit(&self, f: &mut impl FnMut(&Element)) {
        f(self);
        for child in &self.children {
            child.visit(f);
        }
    }

    /// Mutable depth-first visit of this element and every descendant.
    pub fn visit_mut(&mut self, f: &mut impl FnMut(&mut Element)) {
        f(self);
        for child in &mut self.children {
            child.visit_mut(f);
        }
    }

    /// First element (depth first, self included) matching the predicate.
    pub fn find(&self, pred: &impl Fn(&Element) -> bool) -> Option<&Element> {
        if pred(self) {
            return Some(self);
        }
        for child in &self.children {
            if let Some(found) = child.find(pred) {
                return Some(found);
            }
        }
        None
    }

    /// Mutable variant of [`Element::find`].
    pub fn find_mut(&mut self, pred: &impl Fn(&Element) -> bool) -> Option<&mut Element> {
        if pred(self) {
            return Some(self);
        }
        for child in &mut self.children {
            if let Some(found) = child.find_mut(pred) {
                return Some(found);
            }
        }
        None
    }
}
