//! Rich text editor WASM API
//!
//! JavaScript-facing surface of the style engine.
//!
//! # Module Structure
//!
//! - `helpers`: serialization and error conversion
//! - `types`: result objects handed back to JavaScript
//! - `editor`: the exported `RichTextEditor` class

pub mod editor;
pub mod helpers;
pub mod types;

pub use editor::RichTextEditor;
pub use types::CommandResult;
