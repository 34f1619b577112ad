//! Style applicator
//!
//! Aligns the range to leaf edges, then wraps each leaf inside it in its own
//! style container. Leaves that already carry the style are left alone, so
//! applying twice is the same as applying once.

use super::inspect::has_style;
use super::range::{check_range, resolve, Range, ResolvedRange};
use super::corrupted;
use crate::error::StyleResult;
use crate::style::Style;
use crate::tree::{Container, NodeId, Tree};

/// Apply `style` across `range`, returning the range to reselect
///
/// Collapsed or leafless ranges are no-ops and return `range` unchanged.
pub fn apply_style(tree: &mut Tree, style: &Style, range: &Range) -> StyleResult<Range> {
    check_range(tree, range)?;
    if range.is_collapsed() {
        log::debug!("apply {}: caret only", style);
        return Ok(*range);
    }

    let resolved = resolve(tree, range)?;
    if resolved.is_empty() || resolved.is_collapsed() {
        log::debug!("apply {}: nothing selected", style);
        return Ok(*range);
    }

    let reselect = apply_resolved(tree, style, &resolved).unwrap_or_else(|err| corrupted("apply", err));
    Ok(reselect.unwrap_or(*range))
}

fn apply_resolved(tree: &mut Tree, style: &Style, resolved: &ResolvedRange) -> StyleResult<Option<Range>> {
    let pieces = resolved.split_boundaries(tree)?;

    let mut wrapped = 0;
    for &leaf in &pieces {
        if wrap_leaf(tree, style, leaf)? {
            wrapped += 1;
        }
    }

    log::debug!(
        "apply {}: {} of {} leaves wrapped",
        style,
        wrapped,
        pieces.len()
    );
    Ok(Range::spanning(tree, &pieces))
}

/// Wrap one leaf unless it is blank or already styled
fn wrap_leaf(tree: &mut Tree, style: &Style, leaf: NodeId) -> StyleResult<bool> {
    if tree.is_blank(leaf) {
        return Ok(false);
    }
    if has_style(tree, leaf, style) {
        log::trace!("{} already has {}", leaf, style);
        return Ok(false);
    }
    tree.wrap(leaf, Container::for_style(style))?;
    Ok(true)
}
