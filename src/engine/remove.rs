//! Style remover
//!
//! For each leaf in the range, the nearest ancestor carrying the style kind is
//! split around the leaf: content before the leaf stays in the original
//! container, the leaf moves out (still inside copies of the containers that
//! sat between it and the removed one), and content after the leaf moves into
//! a copy of the removed container placed right behind it.

use super::corrupted;
use super::range::{check_range, resolve, Range, ResolvedRange};
use crate::error::{StyleError, StyleResult};
use crate::style::StyleKind;
use crate::tree::{NodeId, Tree};

/// Remove `kind` across `range`, returning the range to reselect
///
/// Leaves without the style are skipped. Collapsed or leafless ranges are
/// no-ops and return `range` unchanged.
pub fn remove_style(tree: &mut Tree, kind: StyleKind, range: &Range) -> StyleResult<Range> {
    check_range(tree, range)?;
    if range.is_collapsed() {
        log::debug!("remove {}: caret only", kind);
        return Ok(*range);
    }

    let resolved = resolve(tree, range)?;
    if resolved.is_empty() || resolved.is_collapsed() {
        log::debug!("remove {}: nothing selected", kind);
        return Ok(*range);
    }

    let reselect = remove_resolved(tree, kind, &resolved).unwrap_or_else(|err| corrupted("remove", err));
    Ok(reselect.unwrap_or(*range))
}

fn remove_resolved(tree: &mut Tree, kind: StyleKind, resolved: &ResolvedRange) -> StyleResult<Option<Range>> {
    let pieces = resolved.split_boundaries(tree)?;

    // Interior leaves last to first, then the first leaf, then the last leaf
    let order: Vec<NodeId> = match pieces.as_slice() {
        [] => Vec::new(),
        [only] => vec![*only],
        [first, interior @ .., last] => interior
            .iter()
            .rev()
            .copied()
            .chain([*first, *last])
            .collect(),
    };

    let mut unwrapped = 0;
    let mut touched = Vec::new();
    for leaf in order {
        while let Some(found) = nearest_with_kind(tree, leaf, kind) {
            unwrap_around(tree, leaf, found, kind, &mut touched)?;
            unwrapped += 1;
        }
    }

    // Only after every leaf is out, so blank leaves later in the range were
    // still unwrapped before their containers go.
    let pruned = prune_empty(tree, &touched)?;

    log::debug!(
        "remove {}: {} containers unwrapped, {} pruned over {} leaves",
        kind,
        unwrapped,
        pruned,
        pieces.len()
    );
    let remaining: Vec<NodeId> = pieces
        .into_iter()
        .filter(|&piece| tree.is_attached(piece))
        .collect();
    Ok(Range::spanning(tree, &remaining))
}

/// Remove every touched container that holds no content, along with
/// ancestors left empty by that removal. The root always stays.
fn prune_empty(tree: &mut Tree, touched: &[NodeId]) -> StyleResult<usize> {
    let root = tree.root();
    let mut pruned = 0;
    for &id in touched {
        let mut current = id;
        while current != root
            && tree.is_attached(current)
            && tree.container(current).is_some()
            && tree.is_empty(current)
        {
            let parent = tree.parent(current);
            tree.remove(current)?;
            pruned += 1;
            match parent {
                Some(parent) => current = parent,
                None => break,
            }
        }
    }
    Ok(pruned)
}

/// Nearest ancestor below the root whose tag or declarations carry `kind`
fn nearest_with_kind(tree: &Tree, leaf: NodeId, kind: StyleKind) -> Option<NodeId> {
    let root = tree.root();
    tree.ancestors(leaf)
        .take_while(|&ancestor| ancestor != root)
        .find(|&ancestor| tree.container(ancestor).map_or(false, |c| c.implies_kind(kind)))
}

/// Move `leaf` out of `found`, rebuilding the structure around it
///
/// Every container this creates or empties is recorded in `touched`.
fn unwrap_around(
    tree: &mut Tree,
    leaf: NodeId,
    found: NodeId,
    kind: StyleKind,
    touched: &mut Vec<NodeId>,
) -> StyleResult<()> {
    // leaf, then every container strictly between it and `found`
    let mut path = vec![leaf];
    for ancestor in tree.ancestors(leaf) {
        if ancestor == found {
            break;
        }
        path.push(ancestor);
    }

    let outer = tree.parent(found).ok_or(StyleError::Detached(found))?;
    let found_index = tree.index_in_parent(found).ok_or(StyleError::Detached(found))?;

    // Content after the leaf, level by level from the inside out, moves into
    // copies of each holder so its nesting is unchanged.
    let mut following: Option<NodeId> = None;
    for (level, &node) in path.iter().enumerate() {
        let holder = path.get(level + 1).copied().unwrap_or(found);
        let siblings = tree.children(holder);
        let index = siblings
            .iter()
            .position(|&c| c == node)
            .ok_or(StyleError::Detached(node))?;
        let after: Vec<NodeId> = siblings[index + 1..].to_vec();

        let copy = tree.clone_shallow(holder)?;
        if let Some(inner) = following.take() {
            tree.append_child(copy, inner)?;
        }
        for sibling in after {
            tree.append_child(copy, sibling)?;
        }
        if tree.children(copy).is_empty() {
            tree.remove(copy)?;
        } else {
            touched.push(copy);
            following = Some(copy);
        }
    }

    // The leaf itself, re-nested in copies of the intermediate containers and,
    // if the removed container had other formatting, in what is left of it.
    tree.detach(leaf)?;
    let mut extracted = leaf;
    for &between in &path[1..] {
        let copy = tree.clone_shallow(between)?;
        tree.append_child(copy, extracted)?;
        touched.push(copy);
        extracted = copy;
    }
    let residual = tree.container(found).and_then(|c| c.without_kind(kind));
    if let Some(residual) = residual {
        let copy = tree.create_container(residual);
        tree.append_child(copy, extracted)?;
        touched.push(copy);
        extracted = copy;
    }

    // Whatever precedes the leaf stays put; drop containers left childless.
    // Ones still holding placeholders are pruned once the whole range is done.
    touched.push(found);
    touched.extend_from_slice(&path[1..]);
    for &between in &path[1..] {
        if !tree.children(between).is_empty() {
            break;
        }
        tree.remove(between)?;
    }
    let mut index = if tree.children(found).is_empty() {
        tree.remove(found)?;
        found_index
    } else {
        found_index + 1
    };

    tree.insert_child(outer, index, extracted)?;
    index += 1;
    if let Some(copy) = following {
        tree.insert_child(outer, index, copy)?;
    }

    log::trace!("unwrapped {} from {}", leaf, found);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::inspect::leaf_styles;
    use crate::engine::range::Endpoint;
    use crate::style::Style;
    use crate::tree::{parse_markup, to_markup, Container, Tag, DEFAULT_PLACEHOLDER};

    fn tree(markup: &str) -> Tree {
        parse_markup(markup, DEFAULT_PLACEHOLDER).unwrap()
    }

    fn whole(tree: &Tree) -> Range {
        let leaves = tree.leaves();
        Range::spanning(tree, &leaves).unwrap()
    }

    #[test]
    fn test_remove_middle_of_bold_run() {
        let mut tree = tree("<b>Hello World</b>");
        let leaf = tree.leaves()[0];

        remove_style(&mut tree, StyleKind::Bold, &Range::within(leaf, 2, 7)).unwrap();

        assert_eq!(to_markup(&tree), "<b>He</b>llo W<b>orld</b>");
    }

    #[test]
    fn test_remove_keeps_inner_containers() {
        let mut tree = tree("<b>ab<i>cd</i></b>");
        let range = whole(&tree);

        remove_style(&mut tree, StyleKind::Bold, &range).unwrap();

        assert_eq!(to_markup(&tree), "ab<i>cd</i>");
    }

    #[test]
    fn test_remove_preserves_following_structure() {
        let mut tree = tree("<b><i>ab</i><u>cd</u>ef</b>");
        let first = tree.leaves()[0];

        remove_style(&mut tree, StyleKind::Bold, &Range::within(first, 0, 1)).unwrap();

        assert_eq!(to_markup(&tree), "<i>a</i><b><i>b</i><u>cd</u>ef</b>");
    }

    #[test]
    fn test_remove_nested_duplicates() {
        let mut tree = tree("<b>a<strong>b</strong></b>");
        let b = tree.leaves()[1];

        remove_style(&mut tree, StyleKind::Bold, &Range::within(b, 0, 1)).unwrap();

        assert_eq!(to_markup(&tree), "<b>a</b>b");
        assert!(leaf_styles(&tree, b).is_empty());
    }

    #[test]
    fn test_remove_keeps_residual_formatting() {
        let mut tree = tree(r#"<span style="font-weight: bold; color: red">abc</span>"#);
        let leaf = tree.leaves()[0];

        remove_style(&mut tree, StyleKind::Bold, &Range::within(leaf, 0, 3)).unwrap();

        assert_eq!(to_markup(&tree), r#"<span style="color: red">abc</span>"#);
    }

    #[test]
    fn test_remove_prunes_placeholder_only_container() {
        let mut tree = tree("<b>\u{200B}<i>abc</i></b>");
        let abc = tree.leaves()[1];

        remove_style(&mut tree, StyleKind::Bold, &Range::within(abc, 0, 3)).unwrap();

        assert_eq!(to_markup(&tree), "<i>abc</i>");
        let root = tree.root();
        assert!(tree.children(root).iter().all(|&child| !tree.is_empty(child)));
    }

    #[test]
    fn test_remove_over_blank_and_text_leaves() {
        // "a", a placeholder and "b" as three leaves inside one bold
        let mut tree = Tree::new();
        let root = tree.root();
        let bold = tree.push_container(root, Container::new(Tag::Bold)).unwrap();
        let a = tree.push_text(bold, "a").unwrap();
        tree.push_text(bold, "\u{200B}").unwrap();
        let b = tree.push_text(bold, "b").unwrap();

        let range = Range::new(Endpoint::new(a, 0), Endpoint::new(b, 1));
        let reselect = remove_style(&mut tree, StyleKind::Bold, &range).unwrap();

        assert_eq!(to_markup(&tree), "a\u{200B}b");
        assert!(tree.is_attached(reselect.start.node));
        assert!(tree.is_attached(reselect.end.node));
    }

    #[test]
    fn test_caret_on_container_is_noop() {
        let mut tree = tree("aa<b>bb<i>cc</i></b>dd");
        let root = tree.root();
        let bold = tree.children(root)[1];
        let before = tree.clone();
        let caret = Range::collapsed(bold, 2);

        let reselect = remove_style(&mut tree, StyleKind::Bold, &caret).unwrap();

        assert_eq!(reselect, caret);
        assert_eq!(tree, before);
    }

    #[test]
    fn test_remove_absent_style_is_noop() {
        let mut tree = tree("<i>abc</i>");
        let before = to_markup(&tree);
        let range = whole(&tree);

        remove_style(&mut tree, StyleKind::Underline, &range).unwrap();

        assert_eq!(to_markup(&tree), before);
    }

    #[test]
    fn test_remove_font_any_family() {
        let mut tree = tree(r#"x<font face="Arial">abc</font>"#);
        let leaves = tree.leaves();
        let range = Range::new(Endpoint::new(leaves[0], 0), Endpoint::new(leaves[1], 3));

        remove_style(&mut tree, StyleKind::Font, &range).unwrap();

        assert_eq!(to_markup(&tree), "xabc");
        assert!(!leaf_styles(&tree, leaves[1]).contains(&Style::font("Arial")));
    }
}
