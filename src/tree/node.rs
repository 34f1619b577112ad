//! Node types for the document tree

use crate::style::{primary_family, Style, StyleKind};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque handle to a node in a [`Tree`](super::Tree)
///
/// Handles are never reused, so a handle to a removed node stays invalid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    /// Raw slot number, for hosts that key their own maps by node
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Structural tag of a container
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Tag {
    /// Document root
    Body,
    Bold,
    Italic,
    Underline,
    Strikethrough,
    Font,
    /// Non-formatting wrapper (`span`, `p`, `div`, ...)
    Neutral(String),
}

impl Tag {
    pub fn for_kind(kind: StyleKind) -> Tag {
        match kind {
            StyleKind::Bold => Tag::Bold,
            StyleKind::Italic => Tag::Italic,
            StyleKind::Underline => Tag::Underline,
            StyleKind::Strikethrough => Tag::Strikethrough,
            StyleKind::Font => Tag::Font,
        }
    }

    /// Tag for an element name read from markup
    pub fn from_name(name: &str) -> Tag {
        match StyleKind::from_tag(name) {
            Some(kind) => Tag::for_kind(kind),
            None => Tag::Neutral(name.to_ascii_lowercase()),
        }
    }

    /// Kind carried by the tag itself
    pub fn kind(&self) -> Option<StyleKind> {
        match self {
            Tag::Bold => Some(StyleKind::Bold),
            Tag::Italic => Some(StyleKind::Italic),
            Tag::Underline => Some(StyleKind::Underline),
            Tag::Strikethrough => Some(StyleKind::Strikethrough),
            Tag::Font => Some(StyleKind::Font),
            Tag::Body | Tag::Neutral(_) => None,
        }
    }

    /// Element name used when writing markup
    pub fn name(&self) -> &str {
        match self {
            Tag::Body => "body",
            Tag::Neutral(name) => name.as_str(),
            styled => styled.kind().map_or("span", |kind| kind.spec().tag),
        }
    }
}

/// One inline CSS declaration (`property: value`)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Declaration {
    pub property: String,
    pub value: String,
}

impl Declaration {
    pub fn new(property: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            property: property.into(),
            value: value.into(),
        }
    }

    /// Parse a `style` attribute into declarations, skipping malformed entries
    pub fn parse_list(style: &str) -> Vec<Declaration> {
        style
            .split(';')
            .filter_map(|entry| {
                let (property, value) = entry.split_once(':')?;
                let property = property.trim().to_ascii_lowercase();
                let value = value.trim();
                if property.is_empty() || value.is_empty() {
                    None
                } else {
                    Some(Declaration::new(property, value))
                }
            })
            .collect()
    }

    /// Styles this declaration implies
    pub fn implied_styles(&self) -> impl Iterator<Item = Style> + '_ {
        StyleKind::ALL.into_iter().filter_map(move |kind| {
            if !kind.matches_declaration(&self.property, &self.value) {
                return None;
            }
            match kind {
                StyleKind::Font => primary_family(&self.value).map(Style::font),
                other => Style::plain(other),
            }
        })
    }
}

/// Formatting or grouping element holding child nodes
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Container {
    pub tag: Tag,
    /// Font family for `font` containers (the `face` attribute)
    pub family: Option<String>,
    /// Inline CSS parameters from the `style` attribute
    pub declarations: Vec<Declaration>,
    /// Any other attributes, kept verbatim
    pub attributes: Vec<(String, String)>,
}

impl Container {
    pub fn new(tag: Tag) -> Self {
        Self {
            tag,
            family: None,
            declarations: Vec::new(),
            attributes: Vec::new(),
        }
    }

    pub fn body() -> Self {
        Self::new(Tag::Body)
    }

    pub fn neutral(name: impl Into<String>) -> Self {
        Self::new(Tag::Neutral(name.into()))
    }

    /// Container that applies exactly one style
    pub fn for_style(style: &Style) -> Self {
        let mut container = Self::new(Tag::for_kind(style.kind()));
        container.family = style.family().map(str::to_string);
        container
    }

    pub fn with_declaration(mut self, property: &str, value: &str) -> Self {
        self.declarations.push(Declaration::new(property, value));
        self
    }

    /// Every style this container implies, by tag or by declaration
    ///
    /// The same style may appear twice (`<b style="font-weight:bold">`);
    /// callers collecting into a set deduplicate.
    pub fn implied_styles(&self) -> Vec<Style> {
        let mut styles = Vec::new();
        match self.tag.kind() {
            Some(StyleKind::Font) => {
                if let Some(family) = &self.family {
                    styles.push(Style::font(family.clone()));
                }
            }
            Some(kind) => styles.extend(Style::plain(kind)),
            None => {}
        }
        for declaration in &self.declarations {
            styles.extend(declaration.implied_styles());
        }
        styles
    }

    /// Whether the tag or any declaration carries this kind
    pub fn implies_kind(&self, kind: StyleKind) -> bool {
        self.tag.kind() == Some(kind)
            || self
                .declarations
                .iter()
                .any(|d| kind.matches_declaration(&d.property, &d.value))
    }

    /// Nearest-font lookup helper: the family this container sets, if any
    pub fn font_family(&self) -> Option<String> {
        let declared = self
            .declarations
            .iter()
            .rev()
            .filter(|d| StyleKind::Font.matches_declaration(&d.property, &d.value))
            .find_map(|d| primary_family(&d.value));
        declared.or_else(|| {
            if self.tag == Tag::Font {
                self.family.clone()
            } else {
                None
            }
        })
    }

    /// The formatting left once `kind` is taken away
    ///
    /// Returns `None` when nothing worth keeping remains, i.e. the container
    /// would be a bare neutral wrapper.
    pub fn without_kind(&self, kind: StyleKind) -> Option<Container> {
        let mut residual = self.clone();
        if residual.tag.kind() == Some(kind) {
            residual.tag = Tag::Neutral("span".to_string());
            residual.family = None;
        }
        residual.declarations = self
            .declarations
            .iter()
            .filter_map(|d| {
                if kind.matches_declaration(&d.property, &d.value) {
                    kind.strip_from_value(&d.value)
                        .map(|value| Declaration::new(d.property.clone(), value))
                } else {
                    Some(d.clone())
                }
            })
            .collect();

        let bare = matches!(residual.tag, Tag::Neutral(_))
            && residual.declarations.is_empty()
            && residual.attributes.is_empty();
        if bare {
            None
        } else {
            Some(residual)
        }
    }

    /// Serialized `style` attribute, if there are declarations
    pub fn style_attribute(&self) -> Option<String> {
        if self.declarations.is_empty() {
            return None;
        }
        Some(
            self.declarations
                .iter()
                .map(|d| format!("{}: {}", d.property, d.value))
                .collect::<Vec<_>>()
                .join("; "),
        )
    }
}

/// Payload of a node
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    /// Leaf holding a text run
    Text(String),
    Container(Container),
    /// Atomic content (image, line break); never empty, never a text leaf
    Embed {
        name: String,
        attributes: Vec<(String, String)>,
    },
}

/// A node stored in the tree arena
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub(crate) kind: NodeKind,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
}

impl Node {
    pub(crate) fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            parent: None,
            children: Vec::new(),
        }
    }

    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn is_text(&self) -> bool {
        matches!(self.kind, NodeKind::Text(_))
    }

    pub fn text(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn container(&self) -> Option<&Container> {
        match &self.kind {
            NodeKind::Container(container) => Some(container),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bold_tag_and_weight_imply_bold_twice() {
        let container = Container::new(Tag::Bold).with_declaration("font-weight", "bold");
        let styles = container.implied_styles();
        assert_eq!(styles, vec![Style::Bold, Style::Bold]);
    }

    #[test]
    fn test_span_declarations_imply_styles() {
        let container = Container::neutral("span")
            .with_declaration("font-style", "italic")
            .with_declaration("font-family", "\"Courier New\", monospace");
        let styles = container.implied_styles();
        assert!(styles.contains(&Style::Italic));
        assert!(styles.contains(&Style::font("Courier New")));
    }

    #[test]
    fn test_without_kind_drops_bare_wrapper() {
        let bold = Container::new(Tag::Bold);
        assert_eq!(bold.without_kind(StyleKind::Bold), None);
    }

    #[test]
    fn test_without_kind_keeps_other_formatting() {
        let span = Container::neutral("span")
            .with_declaration("font-weight", "700")
            .with_declaration("color", "red");
        let residual = span.without_kind(StyleKind::Bold).unwrap();
        assert_eq!(residual.declarations, vec![Declaration::new("color", "red")]);

        let decorated = Container::new(Tag::Underline)
            .with_declaration("text-decoration", "underline line-through");
        let residual = decorated.without_kind(StyleKind::Underline).unwrap();
        assert_eq!(residual.tag, Tag::Neutral("span".to_string()));
        assert_eq!(
            residual.declarations,
            vec![Declaration::new("text-decoration", "line-through")]
        );
    }

    #[test]
    fn test_parse_declaration_list() {
        let list = Declaration::parse_list("Font-Weight: bold; ; color:red;broken");
        assert_eq!(
            list,
            vec![Declaration::new("font-weight", "bold"), Declaration::new("color", "red")]
        );
    }

    #[test]
    fn test_tag_names_round_trip() {
        assert_eq!(Tag::from_name("strong"), Tag::Bold);
        assert_eq!(Tag::Bold.name(), "b");
        assert_eq!(Tag::from_name("DIV"), Tag::Neutral("div".to_string()));
        assert_eq!(Tag::Font.name(), "font");
    }
}
