//! Document tree model
//!
//! - `node`: node handles, containers, tags and inline declarations
//! - `document`: the arena tree with its structural primitives
//! - `markup`: import/export of XHTML-like fragments
//! - `snapshot`: serializable view handed to the host

pub mod document;
pub mod markup;
pub mod node;
pub mod snapshot;

pub use document::{Ancestors, Tree, DEFAULT_PLACEHOLDER};
pub use markup::{parse_markup, to_markup};
pub use node::{Container, Declaration, Node, NodeId, NodeKind, Tag};
pub use snapshot::NodeSnapshot;
