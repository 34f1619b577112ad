//! Inline style engine
//!
//! Locates a selection inside the document tree, reports which styles apply
//! uniformly across it, and applies or removes a style across it.
//!
//! ## Modules
//!
//! - `range`: selection ranges and the range resolver
//! - `inspect`: per-leaf style walk and cross-leaf intersection
//! - `apply`: wrap every leaf of a range in a style container
//! - `remove`: unwrap the nearest container of a kind around every leaf
//!
//! Every command takes its range explicitly; the engine keeps no selection
//! between calls.

pub mod apply;
pub mod inspect;
pub mod range;
pub mod remove;

pub use apply::apply_style;
pub use inspect::{detect, has_style, leaf_styles, selected_leaves};
pub use range::{resolve, Endpoint, Range, ResolvedRange};
pub use remove::remove_style;

use crate::config::EditorConfig;
use crate::error::{StyleError, StyleResult};
use crate::style::{Style, StyleKind, StyleSet};
use crate::tree::{parse_markup, to_markup, Tree};

/// Abort after a structural primitive failed on a range that had already been
/// validated. The tree can no longer be trusted.
pub(crate) fn corrupted(operation: &str, err: StyleError) -> ! {
    log::error!("{} corrupted the document tree: {}", operation, err);
    panic!("document tree corrupted during {}: {}", operation, err);
}

/// Owns the document tree and runs style commands against it
#[derive(Debug, Clone)]
pub struct StyleEngine {
    tree: Tree,
    config: EditorConfig,
}

impl Default for StyleEngine {
    fn default() -> Self {
        Self::new(EditorConfig::default())
    }
}

impl StyleEngine {
    /// Engine over an empty document
    pub fn new(config: EditorConfig) -> Self {
        let tree = Tree::with_placeholder(config.placeholder);
        Self::with_tree(tree, config)
    }

    /// Engine over an existing tree; the config's log level takes effect
    pub fn with_tree(tree: Tree, config: EditorConfig) -> Self {
        log::set_max_level(config.level_filter());
        Self { tree, config }
    }

    pub fn from_markup(markup: &str, config: EditorConfig) -> StyleResult<Self> {
        let tree = parse_markup(markup, config.placeholder)?;
        Ok(Self::with_tree(tree, config))
    }

    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    pub fn tree_mut(&mut self) -> &mut Tree {
        &mut self.tree
    }

    pub fn into_tree(self) -> Tree {
        self.tree
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn to_markup(&self) -> String {
        to_markup(&self.tree)
    }

    pub fn resolve(&self, range: &Range) -> StyleResult<ResolvedRange> {
        resolve(&self.tree, range).map_err(|err| {
            log::warn!("rejected range {:?}: {}", range, err);
            err
        })
    }

    /// Styles that apply to every selected character of `range`
    ///
    /// For a caret this is the formatting at the caret's leaf.
    pub fn detect_styles(&self, range: &Range) -> StyleResult<StyleSet> {
        let resolved = self.resolve(range)?;
        let leaves = selected_leaves(&self.tree, &resolved);
        Ok(detect(&self.tree, &leaves))
    }

    pub fn apply_style(&mut self, style: &Style, range: &Range) -> StyleResult<Range> {
        log::debug!("apply_style {} over {:?}", style, range);
        apply_style(&mut self.tree, style, range).map_err(|err| {
            log::warn!("apply_style {} failed: {}", style, err);
            err
        })
    }

    pub fn remove_style(&mut self, kind: StyleKind, range: &Range) -> StyleResult<Range> {
        log::debug!("remove_style {} over {:?}", kind, range);
        remove_style(&mut self.tree, kind, range).map_err(|err| {
            log::warn!("remove_style {} failed: {}", kind, err);
            err
        })
    }

    /// Remove the style if the whole range already has it, otherwise apply it
    pub fn toggle_style(&mut self, style: &Style, range: &Range) -> StyleResult<Range> {
        if self.detect_styles(range)?.contains(style) {
            self.remove_style(style.kind(), range)
        } else {
            self.apply_style(style, range)
        }
    }
}
