//! Markup import and export
//!
//! The host hands the engine an XHTML-like fragment (`Hello <b>World</b>`)
//! and reads it back after every command. Parsing goes through roxmltree, so
//! input must be well-formed XML; only XML entities are understood.

use super::document::Tree;
use super::node::{Container, Declaration, NodeId, NodeKind, Tag};
use crate::error::{StyleError, StyleResult};
use quick_xml::escape::escape;
use roxmltree::Document as XmlDocument;

/// Elements imported as atomic content rather than containers
const EMBED_TAGS: &[&str] = &[
    "img", "br", "hr", "embed", "object", "video", "audio", "iframe", "input",
];

/// Parse a markup fragment into a tree
///
/// The fragment may be bare content or a complete `<body>` element.
pub fn parse_markup(markup: &str, placeholder: char) -> StyleResult<Tree> {
    let trimmed = markup.trim_start();
    let source = if trimmed.starts_with("<body") {
        markup.to_string()
    } else {
        format!("<body>{}</body>", markup)
    };

    let doc = XmlDocument::parse(&source).map_err(|e| StyleError::Markup(e.to_string()))?;

    let mut tree = Tree::with_placeholder(placeholder);
    let root = tree.root();
    for child in doc.root_element().children() {
        import_node(&mut tree, root, child)?;
    }

    log::debug!("parsed markup into {} nodes", tree.len());
    Ok(tree)
}

fn import_node(tree: &mut Tree, parent: NodeId, xml: roxmltree::Node<'_, '_>) -> StyleResult<()> {
    if xml.is_text() {
        let text = xml.text().unwrap_or_default();
        if !text.is_empty() {
            tree.push_text(parent, text)?;
        }
        return Ok(());
    }
    if !xml.is_element() {
        // Comments and processing instructions carry no content
        return Ok(());
    }

    let name = xml.tag_name().name().to_ascii_lowercase();
    if EMBED_TAGS.contains(&name.as_str()) {
        let attributes = xml
            .attributes()
            .map(|a| (a.name().to_string(), a.value().to_string()))
            .collect();
        let embed = tree.create_embed(name, attributes);
        return tree.append_child(parent, embed);
    }

    let mut container = Container::new(Tag::from_name(&name));
    for attribute in xml.attributes() {
        match attribute.name() {
            "style" => container.declarations = Declaration::parse_list(attribute.value()),
            "face" if container.tag == Tag::Font => {
                container.family = Some(attribute.value().trim().to_string());
            }
            other => container
                .attributes
                .push((other.to_string(), attribute.value().to_string())),
        }
    }

    let id = tree.push_container(parent, container)?;
    for child in xml.children() {
        import_node(tree, id, child)?;
    }
    Ok(())
}

/// Serialize the tree's content (the body's children) back to markup
pub fn to_markup(tree: &Tree) -> String {
    let mut out = String::new();
    for &child in tree.children(tree.root()) {
        write_node(tree, child, &mut out);
    }
    out
}

fn write_node(tree: &Tree, id: NodeId, out: &mut String) {
    let Some(node) = tree.get(id) else {
        return;
    };
    match node.kind() {
        NodeKind::Text(text) => out.push_str(&escape(text)),
        NodeKind::Embed { name, attributes } => {
            out.push('<');
            out.push_str(name);
            write_attributes(attributes.iter().map(|(k, v)| (k.as_str(), v.as_str())), out);
            out.push_str("/>");
        }
        NodeKind::Container(container) => {
            let name = container.tag.name();
            out.push('<');
            out.push_str(name);

            let style = container.style_attribute();
            let mut attributes: Vec<(&str, &str)> = Vec::new();
            if container.tag == Tag::Font {
                if let Some(family) = &container.family {
                    attributes.push(("face", family.as_str()));
                }
            }
            if let Some(style) = &style {
                attributes.push(("style", style.as_str()));
            }
            attributes.extend(container.attributes.iter().map(|(k, v)| (k.as_str(), v.as_str())));
            write_attributes(attributes.into_iter(), out);

            if node.children().is_empty() {
                out.push_str("/>");
                return;
            }
            out.push('>');
            for &child in node.children() {
                write_node(tree, child, out);
            }
            out.push_str("</");
            out.push_str(name);
            out.push('>');
        }
    }
}

fn write_attributes<'a>(attributes: impl Iterator<Item = (&'a str, &'a str)>, out: &mut String) {
    for (key, value) in attributes {
        out.push(' ');
        out.push_str(key);
        out.push_str("=\"");
        out.push_str(&escape(value));
        out.push('"');
    }
}
