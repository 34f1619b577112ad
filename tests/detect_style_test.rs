// Test style detection over selections

use richtext_wasm::{EditorConfig, Endpoint, Range, Style, StyleEngine, StyleKind};

fn engine(markup: &str) -> StyleEngine {
    StyleEngine::from_markup(markup, EditorConfig::default()).expect("markup should parse")
}

#[test]
fn test_detect_tag_and_css_styles() {
    let engine = engine(r#"<b><span style="text-decoration: underline line-through">x</span></b>"#);
    let leaf = engine.tree().leaves()[0];

    let styles = engine.detect_styles(&Range::within(leaf, 0, 1)).unwrap();

    assert!(styles.contains(&Style::Bold));
    assert!(styles.contains(&Style::Underline));
    assert!(styles.contains(&Style::Strikethrough));
    assert!(!styles.contains(&Style::Italic));
}

#[test]
fn test_detect_requires_every_leaf() {
    let engine = engine("<i><b>ab</b>cd</i>");
    let leaves = engine.tree().leaves();
    let range = Range::new(Endpoint::new(leaves[0], 0), Endpoint::new(leaves[1], 2));

    let styles = engine.detect_styles(&range).unwrap();

    assert!(styles.contains(&Style::Italic));
    assert!(!styles.contains(&Style::Bold));
}

#[test]
fn test_detect_font_family_must_match() {
    let same = engine(r#"<font face="Arial">a</font><span style="font-family: 'Arial', sans-serif">b</span>"#);
    let leaves = same.tree().leaves();
    let range = Range::new(Endpoint::new(leaves[0], 0), Endpoint::new(leaves[1], 1));
    assert!(same.detect_styles(&range).unwrap().contains(&Style::font("Arial")));

    let mixed = engine(r#"<font face="Arial">a</font><font face="Georgia">b</font>"#);
    let leaves = mixed.tree().leaves();
    let range = Range::new(Endpoint::new(leaves[0], 0), Endpoint::new(leaves[1], 1));
    assert!(!mixed.detect_styles(&range).unwrap().contains_kind(StyleKind::Font));
}

#[test]
fn test_boundary_leaf_touched_at_edge_is_ignored() {
    // Selection starts at the very end of the bold leaf
    let engine = engine("<b>ab</b>cd");
    let leaves = engine.tree().leaves();
    let range = Range::new(Endpoint::new(leaves[0], 2), Endpoint::new(leaves[1], 2));

    let styles = engine.detect_styles(&range).unwrap();

    assert!(styles.is_empty());
}

#[test]
fn test_caret_reports_surrounding_styles() {
    let engine = engine("<u>abc</u>");
    let leaf = engine.tree().leaves()[0];

    let styles = engine.detect_styles(&Range::collapsed(leaf, 1)).unwrap();

    assert_eq!(styles.names(), vec!["underline".to_string()]);
}

#[test]
fn test_empty_document_detects_nothing() {
    let engine = engine("");
    let root = engine.tree().root();

    let styles = engine.detect_styles(&Range::collapsed(root, 0)).unwrap();

    assert!(styles.is_empty());
}
