//! Rich Text Editor WASM Module
//!
//! Inline style engine for a rich-text editor: detects, applies and removes
//! bold, italic, underline, strikethrough and font-family formatting over a
//! selection inside a document tree.

pub mod api;
pub mod config;
pub mod engine;
pub mod error;
pub mod style;
pub mod tree;

// Re-export commonly used types
pub use api::RichTextEditor;
pub use config::EditorConfig;
pub use engine::{Endpoint, Range, ResolvedRange, StyleEngine};
pub use error::{StyleError, StyleResult};
pub use style::{Style, StyleKind, StyleRequest, StyleSet};
pub use tree::{parse_markup, to_markup, Container, NodeId, NodeKind, Tag, Tree, DEFAULT_PLACEHOLDER};

use wasm_bindgen::prelude::*;

// This is like the `main` function, but for WASM modules.
#[wasm_bindgen(start)]
pub fn main() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();

    // A logger is already installed when the host initialized one first
    #[cfg(feature = "console_log")]
    let _ = console_log::init_with_level(log::Level::Trace);

    log::info!("Rich text editor WASM module initialized");
}
