//! Parameterised styles and style sets

use super::kind::StyleKind;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// A single formatting entry: a kind plus its parameters
///
/// Doubles as the style request sent by the toolbar.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Style {
    Bold,
    Italic,
    Underline,
    Strikethrough,
    Font { family: String },
}

/// Style requested by a collaborator (toolbar, key binding)
pub type StyleRequest = Style;

impl Style {
    pub fn font(family: impl Into<String>) -> Self {
        Style::Font {
            family: family.into(),
        }
    }

    pub fn kind(&self) -> StyleKind {
        match self {
            Style::Bold => StyleKind::Bold,
            Style::Italic => StyleKind::Italic,
            Style::Underline => StyleKind::Underline,
            Style::Strikethrough => StyleKind::Strikethrough,
            Style::Font { .. } => StyleKind::Font,
        }
    }

    pub fn family(&self) -> Option<&str> {
        match self {
            Style::Font { family } => Some(family),
            _ => None,
        }
    }

    /// Unparameterised style for a kind; `None` for `Font`, which needs a family
    pub fn plain(kind: StyleKind) -> Option<Self> {
        match kind {
            StyleKind::Bold => Some(Style::Bold),
            StyleKind::Italic => Some(Style::Italic),
            StyleKind::Underline => Some(Style::Underline),
            StyleKind::Strikethrough => Some(Style::Strikethrough),
            StyleKind::Font => None,
        }
    }
}

impl fmt::Display for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Style::Font { family } => write!(f, "font:{}", family),
            other => f.write_str(other.kind().name()),
        }
    }
}

/// Set of styles active on a node or uniformly across a range
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StyleSet(BTreeSet<Style>);

impl StyleSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a style; returns false if it was already present
    pub fn insert(&mut self, style: Style) -> bool {
        self.0.insert(style)
    }

    pub fn contains(&self, style: &Style) -> bool {
        self.0.contains(style)
    }

    /// Whether any entry has this kind, whatever its parameters
    pub fn contains_kind(&self, kind: StyleKind) -> bool {
        self.0.iter().any(|s| s.kind() == kind)
    }

    /// Keep only the entries also present in `other`
    ///
    /// Font entries must agree on the family to survive.
    pub fn retain_shared(&mut self, other: &StyleSet) {
        self.0.retain(|style| other.contains(style));
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Style> {
        self.0.iter()
    }

    /// Display names, e.g. `["bold", "font:Arial"]`
    pub fn names(&self) -> Vec<String> {
        self.0.iter().map(|s| s.to_string()).collect()
    }
}

impl FromIterator<Style> for StyleSet {
    fn from_iter<I: IntoIterator<Item = Style>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a StyleSet {
    type Item = &'a Style;
    type IntoIter = std::collections::btree_set::Iter<'a, Style>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
