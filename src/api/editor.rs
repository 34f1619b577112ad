//! Exported editor class
//!
//! Each `RichTextEditor` owns one document tree. Ranges come in as plain
//! objects (`{ start: { node, offset }, end: { node, offset } }`) and are
//! never kept between calls.

use super::helpers::{config_from_js, deserialize, serialize, to_js_error};
use super::types::CommandResult;
use crate::engine::{Range, StyleEngine};
use crate::style::{Style, StyleKind};
use crate::tree::parse_markup;
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
pub struct RichTextEditor {
    engine: StyleEngine,
}

#[wasm_bindgen]
impl RichTextEditor {
    /// Create an editor over `markup`
    ///
    /// `config` may be omitted; see `EditorConfig` for the recognised fields.
    #[wasm_bindgen(constructor)]
    pub fn new(markup: &str, config: JsValue) -> Result<RichTextEditor, JsValue> {
        let config = config_from_js(config)?;

        let engine = StyleEngine::from_markup(markup, config)
            .map_err(|e| to_js_error("Failed to parse markup", e))?;
        log::info!("RichTextEditor created with {} nodes", engine.tree().len());
        Ok(RichTextEditor { engine })
    }

    /// Replace the whole document
    #[wasm_bindgen(js_name = loadMarkup)]
    pub fn load_markup(&mut self, markup: &str) -> Result<(), JsValue> {
        let tree = parse_markup(markup, self.engine.config().placeholder)
            .map_err(|e| to_js_error("Failed to parse markup", e))?;
        *self.engine.tree_mut() = tree;
        Ok(())
    }

    /// Apply a style request such as `{ kind: "bold" }` or
    /// `{ kind: "font", family: "Georgia" }`
    #[wasm_bindgen(js_name = applyStyle)]
    pub fn apply_style(&mut self, style: JsValue, range: JsValue) -> Result<JsValue, JsValue> {
        let style: Style = deserialize(style, "Failed to read style")?;
        let range: Range = deserialize(range, "Failed to read range")?;

        let reselect = self
            .engine
            .apply_style(&style, &range)
            .map_err(|e| to_js_error("applyStyle failed", e))?;
        self.command_result(reselect)
    }

    /// Remove every style of `kind` ("bold", "italic", "underline",
    /// "strikethrough" or "font") from the range
    #[wasm_bindgen(js_name = removeStyle)]
    pub fn remove_style(&mut self, kind: &str, range: JsValue) -> Result<JsValue, JsValue> {
        let kind: StyleKind = kind.parse().map_err(|e| to_js_error("removeStyle", e))?;
        let range: Range = deserialize(range, "Failed to read range")?;

        let reselect = self
            .engine
            .remove_style(kind, &range)
            .map_err(|e| to_js_error("removeStyle failed", e))?;
        self.command_result(reselect)
    }

    #[wasm_bindgen(js_name = toggleStyle)]
    pub fn toggle_style(&mut self, style: JsValue, range: JsValue) -> Result<JsValue, JsValue> {
        let style: Style = deserialize(style, "Failed to read style")?;
        let range: Range = deserialize(range, "Failed to read range")?;

        let reselect = self
            .engine
            .toggle_style(&style, &range)
            .map_err(|e| to_js_error("toggleStyle failed", e))?;
        self.command_result(reselect)
    }

    /// Styles shared by the whole range, as style request objects
    #[wasm_bindgen(js_name = detectStyles)]
    pub fn detect_styles(&self, range: JsValue) -> Result<JsValue, JsValue> {
        let range: Range = deserialize(range, "Failed to read range")?;
        let styles = self
            .engine
            .detect_styles(&range)
            .map_err(|e| to_js_error("detectStyles failed", e))?;
        serialize(&styles, "Failed to serialize styles")
    }

    /// Styles shared by the whole range, as display names for toolbar state
    #[wasm_bindgen(js_name = activeStyles)]
    pub fn active_styles(&self, range: JsValue) -> Result<js_sys::Array, JsValue> {
        let range: Range = deserialize(range, "Failed to read range")?;
        let styles = self
            .engine
            .detect_styles(&range)
            .map_err(|e| to_js_error("activeStyles failed", e))?;
        Ok(styles.names().into_iter().map(JsValue::from).collect())
    }

    #[wasm_bindgen(js_name = toMarkup)]
    pub fn to_markup(&self) -> String {
        self.engine.to_markup()
    }

    /// Node tree with handles, for mapping host selections to `{ node, offset }`
    pub fn snapshot(&self) -> Result<JsValue, JsValue> {
        serialize(&self.engine.tree().snapshot(), "Failed to serialize snapshot")
    }

    #[wasm_bindgen(js_name = textContent)]
    pub fn text_content(&self) -> String {
        self.engine.tree().text_content()
    }
}

impl RichTextEditor {
    pub fn engine(&self) -> &StyleEngine {
        &self.engine
    }

    fn command_result(&self, range: Range) -> Result<JsValue, JsValue> {
        let result = CommandResult {
            range,
            markup: self.engine.to_markup(),
        };
        serialize(&result, "Failed to serialize command result")
    }
}
