//! Formatting vocabulary shared by the tree and the engine
//!
//! - `kind`: the fixed set of style kinds and their lookup table
//! - `set`: parameterised styles and style sets

pub mod kind;
pub mod set;

pub use kind::{primary_family, KindSpec, StyleKind, ValueMatch, KIND_TABLE};
pub use set::{Style, StyleRequest, StyleSet};
