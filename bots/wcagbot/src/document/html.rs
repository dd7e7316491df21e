// SPDX-License-Identifier: PMPL-1.0-or-later
//! [`DocumentSnapshot`] over a scraper parse.
//!
//! The element tree is flattened into a preorder arena once, at parse time,
//! together with each element's computed `color` and `background-color`.
//! `color` inherits (initial `rgb(0, 0, 0)`); `background-color` does not
//! (initial `rgba(0, 0, 0, 0)`).

use scraper::{ElementRef, Html, Selector};
use std::collections::HashMap;
use tracing::debug;

use super::style::StyleSheet;
use super::{DocumentSnapshot, NodeId, StyleProperty};
use crate::color::normalize_css_color;

const INITIAL_COLOR: &str = "rgb(0, 0, 0)";
const INITIAL_BACKGROUND: &str = "rgba(0, 0, 0, 0)";

/// A child of an element, in source order
#[derive(Debug, Clone)]
enum Child {
    Text(String),
    Element(NodeId),
}

#[derive(Debug, Clone)]
struct ElementData {
    tag: String,
    attributes: Vec<(String, String)>,
    parent: Option<NodeId>,
    children: Vec<Child>,
    color: String,
    background: String,
}

/// A parsed HTML document with styles resolved
#[derive(Debug)]
pub struct HtmlSnapshot {
    html: Html,
    elements: Vec<ElementData>,
    ids: HashMap<String, NodeId>,
}

impl HtmlSnapshot {
    /// Parse a full HTML document
    pub fn parse(source: &str) -> Self {
        Self::from_html(Html::parse_document(source))
    }

    /// Parse an HTML fragment; the snapshot root is scraper's synthetic `<html>`
    pub fn parse_fragment(source: &str) -> Self {
        Self::from_html(Html::parse_fragment(source))
    }

    pub fn from_html(html: Html) -> Self {
        let sheet = StyleSheet::from_document(&html);
        let elements = collect(&html, &sheet);

        let mut ids = HashMap::new();
        for (index, element) in elements.iter().enumerate() {
            if let Some((_, id)) = element.attributes.iter().find(|(name, _)| name == "id") {
                if !id.is_empty() {
                    ids.entry(id.clone()).or_insert(NodeId::new(index));
                }
            }
        }

        debug!(
            "Snapshot built: {} elements, {} style rules",
            elements.len(),
            sheet.len()
        );

        Self {
            html,
            elements,
            ids,
        }
    }

    /// Number of elements in the snapshot
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    fn element(&self, node: NodeId) -> Option<&ElementData> {
        self.elements.get(node.index())
    }
}

/// Flatten the tree into a preorder arena; arena index equals the element's
/// position in `descendants()`. Parents precede their children, so inherited
/// styles are always resolved by the time a child is reached.
fn collect(html: &Html, sheet: &StyleSheet) -> Vec<ElementData> {
    let mut elements: Vec<ElementData> = Vec::new();
    let mut arena_index: HashMap<_, NodeId> = HashMap::new();

    for node in html.root_element().descendants() {
        let tree_id = node.id();
        let parent = node
            .parent()
            .and_then(|p| arena_index.get(&p.id()).copied());

        if let Some(text) = node.value().as_text() {
            if let Some(parent) = parent.and_then(|p| elements.get_mut(p.index())) {
                parent.children.push(Child::Text(String::from(&**text)));
            }
            continue;
        }

        let Some(element) = ElementRef::wrap(node) else {
            continue;
        };

        let id = NodeId::new(elements.len());
        arena_index.insert(tree_id, id);

        let declared = sheet.cascade(&element, element.value().attr("style"));
        let (inherited_color, parent_background) = match parent.and_then(|p| elements.get(p.index())) {
            Some(p) => (p.color.clone(), p.background.clone()),
            None => (INITIAL_COLOR.to_string(), INITIAL_BACKGROUND.to_string()),
        };

        let color = resolve(
            declared.color.as_deref(),
            &Keywords {
                inherited: &inherited_color,
                unset: &inherited_color,
                initial: INITIAL_COLOR,
                current: &inherited_color,
            },
        );
        let background = resolve(
            declared.background.as_deref(),
            &Keywords {
                inherited: &parent_background,
                unset: INITIAL_BACKGROUND,
                initial: INITIAL_BACKGROUND,
                current: &color,
            },
        );

        if let Some(parent) = parent.and_then(|p| elements.get_mut(p.index())) {
            parent.children.push(Child::Element(id));
        }

        elements.push(ElementData {
            tag: element.value().name().to_string(),
            attributes: element
                .value()
                .attrs()
                .map(|(name, value)| (name.to_string(), value.to_string()))
                .collect(),
            parent,
            children: Vec::new(),
            color,
            background,
        });
    }

    elements
}

/// What each CSS-wide keyword resolves to for one property
struct Keywords<'a> {
    inherited: &'a str,
    unset: &'a str,
    initial: &'a str,
    current: &'a str,
}

fn resolve(declared: Option<&str>, keywords: &Keywords<'_>) -> String {
    let Some(value) = declared else {
        return keywords.unset.to_string();
    };
    match value.trim().to_ascii_lowercase().as_str() {
        "inherit" => keywords.inherited.to_string(),
        "initial" => keywords.initial.to_string(),
        "unset" | "revert" => keywords.unset.to_string(),
        "currentcolor" => keywords.current.to_string(),
        other => normalize_css_color(other),
    }
}

impl DocumentSnapshot for HtmlSnapshot {
    fn document_element(&self) -> Option<NodeId> {
        (!self.elements.is_empty()).then_some(NodeId::new(0))
    }

    fn query_selector_all(&self, selector: &str) -> Vec<NodeId> {
        let selector = match Selector::parse(selector) {
            Ok(selector) => selector,
            Err(_) => {
                debug!("Invalid selector ignored: {}", selector);
                return Vec::new();
            }
        };

        self.html
            .root_element()
            .descendants()
            .filter_map(ElementRef::wrap)
            .enumerate()
            .filter(|(_, element)| selector.matches(element))
            .map(|(index, _)| NodeId::new(index))
            .collect()
    }

    fn tag_name(&self, node: NodeId) -> &str {
        self.element(node).map_or("", |e| e.tag.as_str())
    }

    fn attribute(&self, node: NodeId, name: &str) -> Option<&str> {
        self.element(node)?
            .attributes
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    fn text_content(&self, node: NodeId) -> String {
        let mut text = String::new();
        let Some(element) = self.element(node) else {
            return text;
        };

        let mut pending: Vec<&Child> = element.children.iter().rev().collect();
        while let Some(child) = pending.pop() {
            match child {
                Child::Text(t) => text.push_str(t),
                Child::Element(id) => {
                    if let Some(e) = self.element(*id) {
                        pending.extend(e.children.iter().rev());
                    }
                }
            }
        }
        text
    }

    fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.element(node)?.parent
    }

    fn computed_style(&self, node: NodeId, property: StyleProperty) -> Option<String> {
        let element = self.element(node)?;
        Some(match property {
            StyleProperty::Color => element.color.clone(),
            StyleProperty::BackgroundColor => element.background.clone(),
        })
    }

    fn element_by_id(&self, id: &str) -> Option<NodeId> {
        self.ids.get(id).copied()
    }
}
