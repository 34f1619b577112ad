//! Document tree arena
//!
//! The tree owns every node in a slot vector. Ownership runs strictly from
//! parent to child through `children`; `parent` links are back references used
//! for lookup only. Every structural primitive here is local: it touches the
//! node, its parent and any nodes it creates, and never reorders unrelated
//! siblings.

use super::node::{Container, Node, NodeId, NodeKind};
use crate::error::{StyleError, StyleResult};

/// Zero-width space kept in otherwise empty leaves as a caret landing point
pub const DEFAULT_PLACEHOLDER: char = '\u{200B}';

/// Rooted document tree
#[derive(Debug, Clone, PartialEq)]
pub struct Tree {
    nodes: Vec<Option<Node>>,
    root: NodeId,
    placeholder: char,
}

impl Default for Tree {
    fn default() -> Self {
        Self::new()
    }
}

impl Tree {
    /// Create a tree holding only an empty body
    pub fn new() -> Self {
        Self::with_placeholder(DEFAULT_PLACEHOLDER)
    }

    pub fn with_placeholder(placeholder: char) -> Self {
        let root = Node::new(NodeKind::Container(Container::body()));
        Self {
            nodes: vec![Some(root)],
            root: NodeId(0),
            placeholder,
        }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn placeholder(&self) -> char {
        self.placeholder
    }

    // ------------------------------------------------------------------
    // Lookup
    // ------------------------------------------------------------------

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0).and_then(Option::as_ref)
    }

    pub fn node(&self, id: NodeId) -> StyleResult<&Node> {
        self.get(id).ok_or(StyleError::NodeNotFound(id))
    }

    fn node_mut(&mut self, id: NodeId) -> StyleResult<&mut Node> {
        self.nodes
            .get_mut(id.0)
            .and_then(Option::as_mut)
            .ok_or(StyleError::NodeNotFound(id))
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.get(id).is_some()
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.parent)
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.get(id).map(|n| n.children.as_slice()).unwrap_or(&[])
    }

    pub fn index_in_parent(&self, id: NodeId) -> Option<usize> {
        let parent = self.parent(id)?;
        self.children(parent).iter().position(|&c| c == id)
    }

    pub fn text(&self, id: NodeId) -> Option<&str> {
        self.get(id).and_then(Node::text)
    }

    pub fn container(&self, id: NodeId) -> Option<&Container> {
        self.get(id).and_then(Node::container)
    }

    pub fn is_leaf(&self, id: NodeId) -> bool {
        self.get(id).map_or(false, Node::is_text)
    }

    /// Length of a leaf in characters (0 for anything else)
    pub fn char_len(&self, id: NodeId) -> usize {
        self.text(id).map_or(0, |t| t.chars().count())
    }

    /// Number of live nodes, root included
    pub fn len(&self) -> usize {
        self.nodes.iter().filter(|slot| slot.is_some()).count()
    }

    pub fn is_attached(&self, id: NodeId) -> bool {
        if !self.contains(id) {
            return false;
        }
        let mut current = id;
        while let Some(parent) = self.parent(current) {
            current = parent;
        }
        current == self.root
    }

    /// Ancestors from the parent up to and including the root
    pub fn ancestors(&self, id: NodeId) -> Ancestors<'_> {
        Ancestors {
            tree: self,
            next: self.parent(id),
        }
    }

    // ------------------------------------------------------------------
    // Construction
    // ------------------------------------------------------------------

    fn alloc(&mut self, kind: NodeKind) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Some(Node::new(kind)));
        id
    }

    /// Create a detached text leaf
    pub fn create_text(&mut self, text: impl Into<String>) -> NodeId {
        self.alloc(NodeKind::Text(text.into()))
    }

    /// Create a detached, childless container
    pub fn create_container(&mut self, container: Container) -> NodeId {
        self.alloc(NodeKind::Container(container))
    }

    /// Create a detached atomic node
    pub fn create_embed(&mut self, name: impl Into<String>, attributes: Vec<(String, String)>) -> NodeId {
        self.alloc(NodeKind::Embed {
            name: name.into(),
            attributes,
        })
    }

    /// Create a detached copy of a container with no children
    pub fn clone_shallow(&mut self, id: NodeId) -> StyleResult<NodeId> {
        let container = self
            .container(id)
            .cloned()
            .ok_or(StyleError::NotAContainer(id))?;
        Ok(self.create_container(container))
    }

    /// Append a text leaf to `parent` and return its handle
    pub fn push_text(&mut self, parent: NodeId, text: impl Into<String>) -> StyleResult<NodeId> {
        let id = self.create_text(text);
        self.append_child(parent, id)?;
        Ok(id)
    }

    /// Append an empty container to `parent` and return its handle
    pub fn push_container(&mut self, parent: NodeId, container: Container) -> StyleResult<NodeId> {
        let id = self.create_container(container);
        self.append_child(parent, id)?;
        Ok(id)
    }

    // ------------------------------------------------------------------
    // Linking
    // ------------------------------------------------------------------

    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> StyleResult<()> {
        let index = self.node(parent)?.children.len();
        self.insert_child(parent, index, child)
    }

    /// Insert a detached node at `index` among `parent`'s children
    pub fn insert_child(&mut self, parent: NodeId, index: usize, child: NodeId) -> StyleResult<()> {
        if child == self.root {
            return Err(StyleError::RootOperation("move"));
        }
        if parent == child || self.ancestors(parent).any(|a| a == child) {
            return Err(StyleError::WouldCycle(child));
        }
        if self.node(child)?.parent.is_some() {
            self.detach(child)?;
        }
        let parent_node = self.node_mut(parent)?;
        if !matches!(parent_node.kind, NodeKind::Container(_)) {
            return Err(StyleError::NotAContainer(parent));
        }
        let len = parent_node.children.len();
        if index > len {
            return Err(StyleError::OffsetOutOfBounds {
                node: parent,
                offset: index,
                len,
            });
        }
        parent_node.children.insert(index, child);
        self.node_mut(child)?.parent = Some(parent);
        Ok(())
    }

    /// Insert `node` as the next sibling of `anchor`
    pub fn insert_after(&mut self, anchor: NodeId, node: NodeId) -> StyleResult<()> {
        let parent = self.parent(anchor).ok_or(StyleError::Detached(anchor))?;
        let index = self
            .index_in_parent(anchor)
            .ok_or(StyleError::Detached(anchor))?;
        self.insert_child(parent, index + 1, node)
    }

    /// Unlink a node from its parent, keeping it (and its subtree) alive
    pub fn detach(&mut self, id: NodeId) -> StyleResult<()> {
        if id == self.root {
            return Err(StyleError::RootOperation("detach"));
        }
        let parent = self.node(id)?.parent.ok_or(StyleError::Detached(id))?;
        let siblings = &mut self.node_mut(parent)?.children;
        siblings.retain(|&c| c != id);
        self.node_mut(id)?.parent = None;
        Ok(())
    }

    /// Detach a node and free it together with its subtree
    ///
    /// Parent emptiness is left for the caller to re-check.
    pub fn remove(&mut self, id: NodeId) -> StyleResult<()> {
        if id == self.root {
            return Err(StyleError::RootOperation("remove"));
        }
        if self.node(id)?.parent.is_some() {
            self.detach(id)?;
        }
        let mut pending = vec![id];
        while let Some(next) = pending.pop() {
            if let Some(node) = self.nodes.get_mut(next.0).and_then(Option::take) {
                pending.extend(node.children);
            }
        }
        Ok(())
    }

    // ------------------------------------------------------------------
    // Structural primitives
    // ------------------------------------------------------------------

    /// Split a leaf at a character offset
    ///
    /// The original handle keeps the prefix; the suffix becomes a new sibling
    /// directly after it. Empty halves are not created: splitting at 0 returns
    /// `(None, Some(leaf))` and splitting at the end returns `(Some(leaf), None)`.
    pub fn split_leaf(&mut self, leaf: NodeId, offset: usize) -> StyleResult<(Option<NodeId>, Option<NodeId>)> {
        let text = self.text(leaf).ok_or(StyleError::NotALeaf(leaf))?;
        let len = text.chars().count();
        if offset > len {
            return Err(StyleError::OffsetOutOfBounds { node: leaf, offset, len });
        }
        if offset == 0 {
            return Ok((None, Some(leaf)));
        }
        if offset == len {
            return Ok((Some(leaf), None));
        }
        if self.parent(leaf).is_none() {
            return Err(StyleError::Detached(leaf));
        }

        let byte = text
            .char_indices()
            .nth(offset)
            .map_or(text.len(), |(index, _)| index);
        let suffix = text[byte..].to_string();
        if let NodeKind::Text(prefix) = &mut self.node_mut(leaf)?.kind {
            prefix.truncate(byte);
        }
        let right = self.create_text(suffix);
        self.insert_after(leaf, right)?;
        log::trace!("split {} at {} -> {}", leaf, offset, right);
        Ok((Some(leaf), Some(right)))
    }

    /// Replace `id` in its parent with a new container holding `id` as sole child
    pub fn wrap(&mut self, id: NodeId, container: Container) -> StyleResult<NodeId> {
        if id == self.root {
            return Err(StyleError::RootOperation("wrap"));
        }
        let parent = self.parent(id).ok_or(StyleError::Detached(id))?;
        let wrapper = self.create_container(container);

        let slot = self
            .node_mut(parent)?
            .children
            .iter_mut()
            .find(|c| **c == id)
            .ok_or(StyleError::Detached(id))?;
        *slot = wrapper;

        let wrapper_node = self.node_mut(wrapper)?;
        wrapper_node.parent = Some(parent);
        wrapper_node.children.push(id);
        self.node_mut(id)?.parent = Some(wrapper);
        log::trace!("wrapped {} in {}", id, wrapper);
        Ok(wrapper)
    }

    /// Leaf with no content besides placeholder characters
    pub fn is_blank(&self, id: NodeId) -> bool {
        self.text(id)
            .map_or(false, |t| t.chars().all(|c| c == self.placeholder))
    }

    /// Whether a subtree holds no content
    ///
    /// Content is any non-placeholder character or any atomic node.
    pub fn is_empty(&self, id: NodeId) -> bool {
        let mut pending = vec![id];
        while let Some(next) = pending.pop() {
            let Some(node) = self.get(next) else {
                continue;
            };
            match &node.kind {
                NodeKind::Text(_) => {
                    if !self.is_blank(next) {
                        return false;
                    }
                }
                NodeKind::Embed { .. } => return false,
                NodeKind::Container(_) => pending.extend(node.children.iter().copied()),
            }
        }
        true
    }

    // ------------------------------------------------------------------
    // Traversal (pre-order, left to right)
    // ------------------------------------------------------------------

    /// Next node in pre-order: first child, else next sibling, else the
    /// next sibling of the nearest ancestor that has one
    pub fn next_in_preorder(&self, id: NodeId) -> Option<NodeId> {
        match self.children(id).first() {
            Some(&first) => Some(first),
            None => self.next_after_subtree(id),
        }
    }

    /// First node after `id`'s subtree in pre-order
    pub fn next_after_subtree(&self, id: NodeId) -> Option<NodeId> {
        let mut current = id;
        loop {
            if current == self.root {
                return None;
            }
            let parent = self.parent(current)?;
            let siblings = self.children(parent);
            let index = siblings.iter().position(|&c| c == current)?;
            if let Some(&next) = siblings.get(index + 1) {
                return Some(next);
            }
            current = parent;
        }
    }

    /// First leaf at or after `id` in pre-order
    pub fn first_leaf_from(&self, id: NodeId) -> Option<NodeId> {
        let mut cursor = Some(id);
        while let Some(current) = cursor {
            if self.is_leaf(current) {
                return Some(current);
            }
            cursor = self.next_in_preorder(current);
        }
        None
    }

    /// Last leaf inside `id`'s subtree (itself, if it is a leaf)
    pub fn last_leaf_in(&self, id: NodeId) -> Option<NodeId> {
        if self.is_leaf(id) {
            return Some(id);
        }
        self.children(id)
            .iter()
            .rev()
            .find_map(|&child| self.last_leaf_in(child))
    }

    /// All leaves in document order
    pub fn leaves(&self) -> Vec<NodeId> {
        let mut leaves = Vec::new();
        let mut cursor = Some(self.root);
        while let Some(current) = cursor {
            if self.is_leaf(current) {
                leaves.push(current);
            }
            cursor = self.next_in_preorder(current);
        }
        leaves
    }

    /// Concatenated text of every leaf, placeholders included
    pub fn text_content(&self) -> String {
        self.leaves()
            .into_iter()
            .filter_map(|leaf| self.text(leaf))
            .collect()
    }
}

/// Iterator over a node's ancestors, innermost first
#[derive(Debug, Clone)]
pub struct Ancestors<'a> {
    tree: &'a Tree,
    next: Option<NodeId>,
}

impl Iterator for Ancestors<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let current = self.next?;
        self.next = self.tree.parent(current);
        Some(current)
    }
}
