// SPDX-License-Identifier: PMPL-1.0-or-later
//! Document snapshots the rule engine inspects.
//!
//! Rules never talk to a parser or a browser directly. They see a
//! [`DocumentSnapshot`]: selector queries in document order, attribute reads,
//! computed `color`/`background-color`, parent links and id lookup. Any
//! DOM-like layer that can answer those questions can be scanned.
//! [`HtmlSnapshot`] is the built-in implementation over a server-side parse.

pub mod html;
pub mod style;

pub use html::HtmlSnapshot;

/// Opaque handle to an element inside one snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(usize);

impl NodeId {
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    pub const fn index(self) -> usize {
        self.0
    }
}

/// Style properties the rules need resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StyleProperty {
    Color,
    BackgroundColor,
}

impl StyleProperty {
    pub fn css_name(self) -> &'static str {
        match self {
            StyleProperty::Color => "color",
            StyleProperty::BackgroundColor => "background-color",
        }
    }
}

/// Read-only view of a parsed document.
///
/// Element handles are only meaningful for the snapshot that produced them.
pub trait DocumentSnapshot {
    /// The root element (`<html>`), if the document has one
    fn document_element(&self) -> Option<NodeId>;

    /// All elements matching a CSS selector list, in document order.
    ///
    /// An invalid selector matches nothing.
    fn query_selector_all(&self, selector: &str) -> Vec<NodeId>;

    /// Lower-case tag name
    fn tag_name(&self, node: NodeId) -> &str;

    /// Attribute value, `None` when the attribute is absent
    fn attribute(&self, node: NodeId, name: &str) -> Option<&str>;

    /// Concatenated text of the element and its descendants
    fn text_content(&self, node: NodeId) -> String;

    /// Parent element, `None` for the root
    fn parent(&self, node: NodeId) -> Option<NodeId>;

    /// Computed value of a style property, serialized like a browser would
    /// (`rgb(r, g, b)` / `rgba(r, g, b, a)`), or `None` if unknown
    fn computed_style(&self, node: NodeId, property: StyleProperty) -> Option<String>;

    /// First element carrying `id`
    fn element_by_id(&self, id: &str) -> Option<NodeId>;

    fn has_attribute(&self, node: NodeId, name: &str) -> bool {
        self.attribute(node, name).is_some()
    }
}

/// Iterator over the strict ancestors of an element, nearest first
pub struct Ancestors<'a> {
    document: &'a dyn DocumentSnapshot,
    next: Option<NodeId>,
}

impl Iterator for Ancestors<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let current = self.next?;
        self.next = self.document.parent(current);
        Some(current)
    }
}

/// Walk up from `node` (exclusive) to the root
pub fn ancestors(document: &dyn DocumentSnapshot, node: NodeId) -> Ancestors<'_> {
    Ancestors {
        document,
        next: document.parent(node),
    }
}

/// Nearest element with tag `tag`, starting at `node` itself
pub fn closest(document: &dyn DocumentSnapshot, node: NodeId, tag: &str) -> Option<NodeId> {
    std::iter::once(node)
        .chain(ancestors(document, node))
        .find(|&n| document.tag_name(n) == tag)
}

/// First `max_chars` characters of the trimmed text content
pub fn text_excerpt(document: &dyn DocumentSnapshot, node: NodeId, max_chars: usize) -> String {
    document
        .text_content(node)
        .trim()
        .chars()
        .take(max_chars)
        .collect()
}
