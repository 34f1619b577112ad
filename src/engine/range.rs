//! Selection ranges and the range resolver
//!
//! A [`Range`] arrives from the host as two `(node, offset)` endpoints. The
//! resolver turns it into the ordered run of text leaves it touches plus the
//! exact character offsets inside the first and last leaf.

use crate::error::{StyleError, StyleResult};
use crate::tree::{NodeId, NodeKind, Tree};
use serde::{Deserialize, Serialize};

/// One end of a selection
///
/// For a text leaf `offset` counts characters; for a container it counts
/// children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Endpoint {
    pub node: NodeId,
    pub offset: usize,
}

impl Endpoint {
    pub fn new(node: NodeId, offset: usize) -> Self {
        Self { node, offset }
    }
}

/// Selection as reported by the host; never stored by the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Range {
    pub start: Endpoint,
    pub end: Endpoint,
}

impl Range {
    pub fn new(start: Endpoint, end: Endpoint) -> Self {
        Self { start, end }
    }

    /// Range inside a single leaf
    pub fn within(leaf: NodeId, start: usize, end: usize) -> Self {
        Self::new(Endpoint::new(leaf, start), Endpoint::new(leaf, end))
    }

    /// Caret position (start == end)
    pub fn collapsed(node: NodeId, offset: usize) -> Self {
        Self::within(node, offset, offset)
    }

    pub fn is_collapsed(&self) -> bool {
        self.start == self.end
    }

    /// Range from the start of the first leaf to the end of the last one
    pub fn spanning(tree: &Tree, leaves: &[NodeId]) -> Option<Self> {
        let first = *leaves.first()?;
        let last = *leaves.last()?;
        Some(Self::new(
            Endpoint::new(first, 0),
            Endpoint::new(last, tree.char_len(last)),
        ))
    }
}

/// Leaves touched by a range, in document order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedRange {
    pub leaves: Vec<NodeId>,
    /// Character offset in the first leaf
    pub start_offset: usize,
    /// Character offset in the last leaf
    pub end_offset: usize,
}

impl ResolvedRange {
    pub fn is_empty(&self) -> bool {
        self.leaves.is_empty()
    }

    /// Single leaf with start == end
    pub fn is_collapsed(&self) -> bool {
        self.leaves.len() == 1 && self.start_offset == self.end_offset
    }

    /// Split the boundary leaves so the range covers whole leaves
    ///
    /// Returns the pieces inside the range in document order. Halves that
    /// fall outside stay in the tree untouched; empty halves are never made.
    pub fn split_boundaries(&self, tree: &mut Tree) -> StyleResult<Vec<NodeId>> {
        match self.leaves.as_slice() {
            [] => Ok(Vec::new()),
            [only] => {
                let (prefix, _) = tree.split_leaf(*only, self.end_offset)?;
                let Some(prefix) = prefix else {
                    return Ok(Vec::new());
                };
                let (_, middle) = tree.split_leaf(prefix, self.start_offset)?;
                Ok(middle.into_iter().collect())
            }
            [first, interior @ .., last] => {
                let (_, head) = tree.split_leaf(*first, self.start_offset)?;
                let (tail, _) = tree.split_leaf(*last, self.end_offset)?;
                Ok(head
                    .into_iter()
                    .chain(interior.iter().copied())
                    .chain(tail)
                    .collect())
            }
        }
    }
}

/// Resolve a range against the tree
///
/// Fails with `InvalidRange` if an endpoint is not reachable from the root,
/// an offset is out of bounds, or the end precedes the start. An endpoint that
/// points at a container resolves to leaves inside it: the start to the first
/// leaf at or after the child offset, the end to the last leaf of the
/// container (select-to-end-of-node).
pub fn resolve(tree: &Tree, range: &Range) -> StyleResult<ResolvedRange> {
    check_range(tree, range)?;
    if range.is_collapsed() {
        return Ok(resolve_caret(tree, &range.start));
    }

    let (start_leaf, start_offset) = if tree.is_leaf(range.start.node) {
        (Some(range.start.node), range.start.offset)
    } else {
        (leaf_at_boundary(tree, range.start.node, range.start.offset), 0)
    };

    let (end_leaf, end_offset) = if tree.is_leaf(range.end.node) {
        (Some(range.end.node), range.end.offset)
    } else {
        let last = tree.last_leaf_in(range.end.node);
        (last, last.map_or(0, |leaf| tree.char_len(leaf)))
    };

    let (Some(start_leaf), Some(end_leaf)) = (start_leaf, end_leaf) else {
        return Ok(ResolvedRange::default());
    };

    if start_leaf == end_leaf {
        if start_offset > end_offset {
            return Err(StyleError::InvalidRange(format!(
                "end offset {} precedes start offset {} in {}",
                end_offset, start_offset, start_leaf
            )));
        }
        return Ok(ResolvedRange {
            leaves: vec![start_leaf],
            start_offset,
            end_offset,
        });
    }

    let mut leaves = Vec::new();
    let mut cursor = Some(start_leaf);
    while let Some(current) = cursor {
        if tree.is_leaf(current) {
            leaves.push(current);
            if current == end_leaf {
                return Ok(ResolvedRange {
                    leaves,
                    start_offset,
                    end_offset,
                });
            }
        }
        cursor = tree.next_in_preorder(current);
    }

    Err(StyleError::InvalidRange(format!(
        "end {} precedes start {} in document order",
        end_leaf, start_leaf
    )))
}

/// Fail with `InvalidRange` unless both endpoints are reachable and in bounds
pub fn check_range(tree: &Tree, range: &Range) -> StyleResult<()> {
    check_endpoint(tree, &range.start, "start")?;
    check_endpoint(tree, &range.end, "end")
}

/// Leaf a caret sits in
///
/// A caret between two children of a container belongs to the leaf that ends
/// just before it, or to the first leaf after it when nothing precedes it.
fn resolve_caret(tree: &Tree, caret: &Endpoint) -> ResolvedRange {
    if tree.is_leaf(caret.node) {
        return ResolvedRange {
            leaves: vec![caret.node],
            start_offset: caret.offset,
            end_offset: caret.offset,
        };
    }

    let before = caret
        .offset
        .checked_sub(1)
        .and_then(|index| tree.children(caret.node).get(index).copied())
        .and_then(|child| tree.last_leaf_in(child));
    let (leaf, offset) = match before {
        Some(leaf) => (Some(leaf), tree.char_len(leaf)),
        None => (leaf_at_boundary(tree, caret.node, caret.offset), 0),
    };

    match leaf {
        Some(leaf) => ResolvedRange {
            leaves: vec![leaf],
            start_offset: offset,
            end_offset: offset,
        },
        None => ResolvedRange::default(),
    }
}

fn check_endpoint(tree: &Tree, endpoint: &Endpoint, which: &str) -> StyleResult<()> {
    if !tree.is_attached(endpoint.node) {
        return Err(StyleError::InvalidRange(format!(
            "{} node {} is not reachable from the root",
            which, endpoint.node
        )));
    }
    let len = match tree.get(endpoint.node).map(|n| n.kind()) {
        Some(NodeKind::Text(_)) => tree.char_len(endpoint.node),
        _ => tree.children(endpoint.node).len(),
    };
    if endpoint.offset > len {
        return Err(StyleError::InvalidRange(format!(
            "{} offset {} exceeds length {} of {}",
            which, endpoint.offset, len, endpoint.node
        )));
    }
    Ok(())
}

/// First leaf at or after the boundary before child `offset` of `node`
fn leaf_at_boundary(tree: &Tree, node: NodeId, offset: usize) -> Option<NodeId> {
    let from = match tree.children(node).get(offset) {
        Some(&child) => child,
        None => tree.next_after_subtree(node)?,
    };
    tree.first_leaf_from(from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::{Container, Tag};

    /// a <b>b c</b> d, with "b c" as two leaves
    fn sample() -> (Tree, Vec<NodeId>, NodeId) {
        let mut tree = Tree::new();
        let root = tree.root();
        let a = tree.push_text(root, "aa").unwrap();
        let bold = tree.push_container(root, Container::new(Tag::Bold)).unwrap();
        let b = tree.push_text(bold, "bb").unwrap();
        let c = tree.push_text(bold, "cc").unwrap();
        let d = tree.push_text(root, "dd").unwrap();
        (tree, vec![a, b, c, d], bold)
    }

    #[test]
    fn test_resolve_across_containers() {
        let (tree, leaves, _) = sample();
        let range = Range::new(Endpoint::new(leaves[0], 1), Endpoint::new(leaves[3], 1));

        let resolved = resolve(&tree, &range).unwrap();

        assert_eq!(resolved.leaves, leaves);
        assert_eq!(resolved.start_offset, 1);
        assert_eq!(resolved.end_offset, 1);
    }

    #[test]
    fn test_collapsed_range_is_single_leaf() {
        let (tree, leaves, _) = sample();
        let resolved = resolve(&tree, &Range::collapsed(leaves[1], 1)).unwrap();
        assert_eq!(resolved.leaves, vec![leaves[1]]);
        assert!(resolved.is_collapsed());
    }

    #[test]
    fn test_container_end_selects_to_end_of_node() {
        let (tree, leaves, bold) = sample();
        let range = Range::new(Endpoint::new(leaves[0], 0), Endpoint::new(bold, 0));

        let resolved = resolve(&tree, &range).unwrap();

        assert_eq!(resolved.leaves, leaves[..3].to_vec());
        assert_eq!(resolved.end_offset, 2);
    }

    #[test]
    fn test_container_start_uses_child_offset() {
        let (tree, leaves, bold) = sample();
        let range = Range::new(Endpoint::new(bold, 1), Endpoint::new(leaves[3], 2));

        let resolved = resolve(&tree, &range).unwrap();

        assert_eq!(resolved.leaves, leaves[2..].to_vec());
        assert_eq!(resolved.start_offset, 0);
    }

    #[test]
    fn test_container_caret_after_last_child() {
        let (tree, leaves, bold) = sample();

        let resolved = resolve(&tree, &Range::collapsed(bold, 2)).unwrap();

        assert_eq!(resolved.leaves, vec![leaves[2]]);
        assert_eq!(resolved.start_offset, 2);
        assert!(resolved.is_collapsed());
    }

    #[test]
    fn test_container_caret_before_first_child() {
        let (tree, leaves, bold) = sample();
        let resolved = resolve(&tree, &Range::collapsed(bold, 0)).unwrap();
        assert_eq!(resolved.leaves, vec![leaves[1]]);
        assert_eq!(resolved.start_offset, 0);
    }

    #[test]
    fn test_reversed_range_is_invalid() {
        let (tree, leaves, _) = sample();
        let range = Range::new(Endpoint::new(leaves[3], 0), Endpoint::new(leaves[0], 1));
        assert!(matches!(resolve(&tree, &range), Err(StyleError::InvalidRange(_))));

        let backwards = Range::within(leaves[0], 2, 1);
        assert!(matches!(resolve(&tree, &backwards), Err(StyleError::InvalidRange(_))));
    }

    #[test]
    fn test_unreachable_or_out_of_bounds_endpoints() {
        let (mut tree, leaves, _) = sample();
        let loose = tree.create_text("loose");
        assert!(resolve(&tree, &Range::within(loose, 0, 1)).is_err());
        assert!(resolve(&tree, &Range::within(leaves[0], 0, 3)).is_err());
    }

    #[test]
    fn test_split_boundaries_single_leaf() {
        let mut tree = Tree::new();
        let root = tree.root();
        let leaf = tree.push_text(root, "Hello World").unwrap();
        let resolved = resolve(&tree, &Range::within(leaf, 2, 7)).unwrap();

        let pieces = resolved.split_boundaries(&mut tree).unwrap();

        assert_eq!(pieces.len(), 1);
        assert_eq!(tree.text(pieces[0]), Some("llo W"));
        assert_eq!(tree.text_content(), "Hello World");
        assert_eq!(tree.children(root).len(), 3);
    }

    #[test]
    fn test_split_boundaries_skips_untouched_edges() {
        let (mut tree, leaves, _) = sample();
        let range = Range::new(Endpoint::new(leaves[0], 2), Endpoint::new(leaves[3], 0));
        let resolved = resolve(&tree, &range).unwrap();

        let pieces = resolved.split_boundaries(&mut tree).unwrap();

        assert_eq!(pieces, vec![leaves[1], leaves[2]]);
    }
}
