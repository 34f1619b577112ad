//! Style inspector: which styles apply uniformly across a set of leaves

use super::range::ResolvedRange;
use crate::style::{Style, StyleKind, StyleSet};
use crate::tree::{NodeId, Tree};

/// Styles in effect on one leaf
///
/// Walks from the leaf's parent to the root collecting everything each
/// container implies. Only the nearest font counts, since an inner font
/// overrides an outer one.
pub fn leaf_styles(tree: &Tree, leaf: NodeId) -> StyleSet {
    let mut styles = StyleSet::new();
    let mut font_seen = false;

    for ancestor in tree.ancestors(leaf) {
        let Some(container) = tree.container(ancestor) else {
            continue;
        };
        for style in container.implied_styles() {
            if style.kind() != StyleKind::Font {
                styles.insert(style);
            }
        }
        if !font_seen {
            if let Some(family) = container.font_family() {
                styles.insert(Style::font(family));
                font_seen = true;
            }
        }
    }
    styles
}

/// Whether `style` is already in effect on the leaf
pub fn has_style(tree: &Tree, leaf: NodeId, style: &Style) -> bool {
    leaf_styles(tree, leaf).contains(style)
}

/// Styles present on every counted leaf
///
/// Blank leaves (empty or placeholder-only) are not counted unless every leaf
/// is blank. The first counted leaf seeds the result; each further leaf prunes
/// whatever it lacks.
pub fn detect(tree: &Tree, leaves: &[NodeId]) -> StyleSet {
    let content: Vec<NodeId> = leaves
        .iter()
        .copied()
        .filter(|&leaf| !tree.is_blank(leaf))
        .collect();
    let counted: &[NodeId] = if content.is_empty() { leaves } else { &content };

    let mut iter = counted.iter();
    let Some(&first) = iter.next() else {
        return StyleSet::new();
    };
    let mut shared = leaf_styles(tree, first);
    for &leaf in iter {
        if shared.is_empty() {
            break;
        }
        shared.retain_shared(&leaf_styles(tree, leaf));
    }
    shared
}

/// Leaves of a resolved range that contribute selected characters
///
/// A boundary leaf the selection merely touches (start offset at its end, or
/// end offset 0) is dropped, unless nothing would be left.
pub fn selected_leaves(tree: &Tree, resolved: &ResolvedRange) -> Vec<NodeId> {
    let leaves = &resolved.leaves;
    if leaves.len() < 2 {
        return leaves.clone();
    }

    let last_index = leaves.len() - 1;
    let selected: Vec<NodeId> = leaves
        .iter()
        .enumerate()
        .filter(|&(index, &leaf)| {
            let touches_only_start = index == 0 && resolved.start_offset >= tree.char_len(leaf);
            let touches_only_end = index == last_index && resolved.end_offset == 0;
            !touches_only_start && !touches_only_end
        })
        .map(|(_, &leaf)| leaf)
        .collect();

    if selected.is_empty() {
        leaves.clone()
    } else {
        selected
    }
}
