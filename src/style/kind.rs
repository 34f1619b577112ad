//! Style kinds and the kind lookup table
//!
//! Every formatting kind the engine knows about is described once in
//! [`KIND_TABLE`]: which element names carry it structurally and which inline
//! CSS declarations carry it as a parameter.

use crate::error::StyleError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Formatting kind, without parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StyleKind {
    Bold,
    Italic,
    Underline,
    Strikethrough,
    Font,
}

/// How a CSS declaration value is matched against a kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueMatch {
    /// Value equals one of the keywords (case-insensitive)
    Keyword(&'static [&'static str]),
    /// Keyword match, or a numeric weight at or above the threshold
    Weight(u16),
    /// Whitespace-separated value contains this token
    Token(&'static str),
    /// Any non-empty value; the value is the style parameter
    Any,
}

/// Lookup table row for one style kind
#[derive(Debug, Clone, Copy)]
pub struct KindSpec {
    pub kind: StyleKind,
    /// Canonical element name written by the markup serializer
    pub tag: &'static str,
    /// Additional element names that imply this kind
    pub aliases: &'static [&'static str],
    /// CSS properties that can carry this kind inline
    pub properties: &'static [&'static str],
    pub values: ValueMatch,
}

const BOLD_KEYWORDS: &[&str] = &["bold", "bolder"];

pub static KIND_TABLE: [KindSpec; 5] = [
    KindSpec {
        kind: StyleKind::Bold,
        tag: "b",
        aliases: &["strong"],
        properties: &["font-weight"],
        values: ValueMatch::Weight(600),
    },
    KindSpec {
        kind: StyleKind::Italic,
        tag: "i",
        aliases: &["em"],
        properties: &["font-style"],
        values: ValueMatch::Keyword(&["italic", "oblique"]),
    },
    KindSpec {
        kind: StyleKind::Underline,
        tag: "u",
        aliases: &["ins"],
        properties: &["text-decoration", "text-decoration-line"],
        values: ValueMatch::Token("underline"),
    },
    KindSpec {
        kind: StyleKind::Strikethrough,
        tag: "s",
        aliases: &["strike", "del"],
        properties: &["text-decoration", "text-decoration-line"],
        values: ValueMatch::Token("line-through"),
    },
    KindSpec {
        kind: StyleKind::Font,
        tag: "font",
        aliases: &[],
        properties: &["font-family"],
        values: ValueMatch::Any,
    },
];

impl StyleKind {
    pub const ALL: [StyleKind; 5] = [
        StyleKind::Bold,
        StyleKind::Italic,
        StyleKind::Underline,
        StyleKind::Strikethrough,
        StyleKind::Font,
    ];

    /// Table row for this kind
    pub fn spec(self) -> &'static KindSpec {
        // KIND_TABLE is ordered like the enum
        &KIND_TABLE[self as usize]
    }

    /// Kind carried structurally by an element name, if any
    pub fn from_tag(name: &str) -> Option<StyleKind> {
        let name = name.to_ascii_lowercase();
        KIND_TABLE
            .iter()
            .find(|spec| spec.tag == name || spec.aliases.contains(&name.as_str()))
            .map(|spec| spec.kind)
    }

    pub fn name(self) -> &'static str {
        match self {
            StyleKind::Bold => "bold",
            StyleKind::Italic => "italic",
            StyleKind::Underline => "underline",
            StyleKind::Strikethrough => "strikethrough",
            StyleKind::Font => "font",
        }
    }

    /// Whether a CSS declaration carries this kind
    pub fn matches_declaration(self, property: &str, value: &str) -> bool {
        let spec = self.spec();
        if !spec.properties.iter().any(|p| p.eq_ignore_ascii_case(property)) {
            return false;
        }
        let value = value.trim();
        match spec.values {
            ValueMatch::Keyword(keywords) => keywords.iter().any(|k| k.eq_ignore_ascii_case(value)),
            ValueMatch::Weight(threshold) => {
                BOLD_KEYWORDS.iter().any(|k| k.eq_ignore_ascii_case(value))
                    || value.parse::<u16>().map_or(false, |w| w >= threshold)
            }
            ValueMatch::Token(token) => value
                .split_whitespace()
                .any(|t| t.eq_ignore_ascii_case(token)),
            ValueMatch::Any => !value.is_empty(),
        }
    }

    /// Value left after removing this kind from a declaration
    ///
    /// Only token-valued properties (`text-decoration`) can keep a remainder;
    /// every other matching declaration disappears entirely.
    pub fn strip_from_value(self, value: &str) -> Option<String> {
        match self.spec().values {
            ValueMatch::Token(token) => {
                let rest: Vec<&str> = value
                    .split_whitespace()
                    .filter(|t| !t.eq_ignore_ascii_case(token))
                    .collect();
                if rest.is_empty() || rest.iter().all(|t| t.eq_ignore_ascii_case("none")) {
                    None
                } else {
                    Some(rest.join(" "))
                }
            }
            _ => None,
        }
    }
}

impl fmt::Display for StyleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for StyleKind {
    type Err = StyleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "bold" => Ok(StyleKind::Bold),
            "italic" => Ok(StyleKind::Italic),
            "underline" => Ok(StyleKind::Underline),
            "strikethrough" | "strike" => Ok(StyleKind::Strikethrough),
            "font" => Ok(StyleKind::Font),
            other => Err(StyleError::UnknownStyle(other.to_string())),
        }
    }
}

/// First family in a CSS `font-family` list, without quotes
pub fn primary_family(value: &str) -> Option<String> {
    let first = value.split(',').next()?.trim();
    let unquoted = first.trim_matches(|c| c == '"' || c == '\'').trim();
    if unquoted.is_empty() {
        None
    } else {
        Some(unquoted.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_order_matches_enum() {
        for kind in StyleKind::ALL {
            assert_eq!(kind.spec().kind, kind);
        }
    }

    #[test]
    fn test_from_tag_accepts_aliases() {
        assert_eq!(StyleKind::from_tag("B"), Some(StyleKind::Bold));
        assert_eq!(StyleKind::from_tag("strong"), Some(StyleKind::Bold));
        assert_eq!(StyleKind::from_tag("em"), Some(StyleKind::Italic));
        assert_eq!(StyleKind::from_tag("del"), Some(StyleKind::Strikethrough));
        assert_eq!(StyleKind::from_tag("span"), None);
    }

    #[test]
    fn test_weight_declarations() {
        assert!(StyleKind::Bold.matches_declaration("font-weight", "bold"));
        assert!(StyleKind::Bold.matches_declaration("Font-Weight", " 700 "));
        assert!(!StyleKind::Bold.matches_declaration("font-weight", "400"));
        assert!(!StyleKind::Bold.matches_declaration("font-style", "bold"));
    }

    #[test]
    fn test_decoration_tokens() {
        let value = "underline line-through";
        assert!(StyleKind::Underline.matches_declaration("text-decoration", value));
        assert!(StyleKind::Strikethrough.matches_declaration("text-decoration", value));
        assert_eq!(
            StyleKind::Underline.strip_from_value(value),
            Some("line-through".to_string())
        );
        assert_eq!(StyleKind::Underline.strip_from_value("underline"), None);
    }

    #[test]
    fn test_primary_family() {
        assert_eq!(primary_family("'Times New Roman', serif"), Some("Times New Roman".to_string()));
        assert_eq!(primary_family("  "), None);
    }

    #[test]
    fn test_parse_kind_names() {
        assert_eq!("Bold".parse::<StyleKind>(), Ok(StyleKind::Bold));
        assert_eq!("strike".parse::<StyleKind>(), Ok(StyleKind::Strikethrough));
        assert!(matches!("blink".parse::<StyleKind>(), Err(StyleError::UnknownStyle(_))));
    }
}
