//! WASM build test
//!
//! Checks that the exported editor class works across the JS boundary.
#![cfg(target_arch = "wasm32")]

use richtext_wasm::*;
use wasm_bindgen::JsValue;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

fn range_js(editor: &RichTextEditor, start: usize, end: usize) -> JsValue {
    let leaf = editor.engine().tree().leaves()[0];
    serde_wasm_bindgen::to_value(&Range::within(leaf, start, end)).unwrap()
}

#[wasm_bindgen_test]
fn test_editor_creation() {
    let editor = RichTextEditor::new("Hello World", JsValue::UNDEFINED);
    assert!(editor.is_ok());
}

#[wasm_bindgen_test]
fn test_apply_style_from_js_objects() {
    let mut editor = RichTextEditor::new("Hello World", JsValue::NULL).unwrap();
    let style = serde_wasm_bindgen::to_value(&Style::Bold).unwrap();

    let result = editor.apply_style(style, range_js(&editor, 0, 5));

    assert!(result.is_ok());
    assert_eq!(editor.to_markup(), "<b>Hello</b> World");
}

#[wasm_bindgen_test]
fn test_unknown_kind_is_an_error() {
    let mut editor = RichTextEditor::new("abc", JsValue::UNDEFINED).unwrap();
    let range = range_js(&editor, 0, 1);
    assert!(editor.remove_style("sparkle", range).is_err());
}

#[wasm_bindgen_test]
fn test_active_styles_names() {
    let editor = RichTextEditor::new("<i>abc</i>", JsValue::UNDEFINED).unwrap();
    let names = editor.active_styles(range_js(&editor, 0, 3)).unwrap();
    assert_eq!(names.length(), 1);
    assert_eq!(names.get(0).as_string(), Some("italic".to_string()));
}
