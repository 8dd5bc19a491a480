//! Null-safe node handle
//!
//! Navigation on a null handle yields another null handle, so chains like
//! `node.left_child().right_sibling().parent()` never fault. Reading data
//! or computing metrics on a null handle is an explicit `InvalidState`.

use std::collections::VecDeque;
use std::fmt;
use std::iter::FusedIterator;

use super::algorithms;
use super::node::NodeId;
use super::GeneralTree;
use crate::error::{TreeError, TreeResult};

/// Read-only view of one node, borrowed from its tree.
///
/// A handle may be null: the root of an empty tree, the missing child of a
/// leaf, or an id that does not resolve in this tree.
pub struct NodeRef<'a, T> {
    tree: &'a GeneralTree<T>,
    index: Option<usize>,
}

impl<'a, T> NodeRef<'a, T> {
    pub(crate) fn new(tree: &'a GeneralTree<T>, index: Option<usize>) -> Self {
        Self { tree, index }
    }

    fn with(&self, index: Option<usize>) -> Self {
        Self::new(self.tree, index)
    }

    fn live(&self, what: &'static str) -> TreeResult<usize> {
        self.index.ok_or(TreeError::InvalidState(what))
    }

    /// Detached id of this node, `None` for a null handle
    pub fn id(&self) -> Option<NodeId> {
        self.index.map(|index| self.tree.store.id_of(index))
    }

    /// True when the handle has no backing node
    #[inline]
    pub fn is_null(&self) -> bool {
        self.index.is_none()
    }

    /// True for the node without parent
    pub fn is_root(&self) -> bool {
        self.index
            .map_or(false, |index| self.tree.store.links(index).parent.is_none())
    }

    /// True for a node without children
    pub fn is_leaf(&self) -> bool {
        self.index
            .map_or(false, |index| self.tree.store.links(index).left_child.is_none())
    }

    /// True when the node has at least one child
    pub fn has_left_child(&self) -> bool {
        self.index
            .map_or(false, |index| self.tree.store.links(index).left_child.is_some())
    }

    /// True when another child of the same parent follows this node
    pub fn has_right_sibling(&self) -> bool {
        self.index
            .map_or(false, |index| self.tree.store.links(index).right_sibling.is_some())
    }

    /// First child
    pub fn left_child(&self) -> Self {
        self.with(self.index.and_then(|index| self.tree.store.links(index).left_child))
    }

    /// Next sibling
    pub fn right_sibling(&self) -> Self {
        self.with(self.index.and_then(|index| self.tree.store.links(index).right_sibling))
    }

    /// Parent node
    pub fn parent(&self) -> Self {
        self.with(self.index.and_then(|index| self.tree.store.links(index).parent))
    }

    /// Stored value
    pub fn data(&self) -> TreeResult<&'a T> {
        let index = self.live("cannot get data from null node")?;
        self.tree
            .store
            .value(index)
            .ok_or(TreeError::InvalidState("cannot get data from null node"))
    }

    /// Child at `index` (zero-based).
    ///
    /// Running off the end of the sibling chain gives a null handle rather
    /// than an error.
    pub fn child(&self, index: usize) -> TreeResult<Self> {
        let node = self.live("cannot get child of null node")?;
        let child = algorithms::children(&self.tree.store, node).nth(index);
        Ok(self.with(child))
    }

    /// Length of the sibling chain below this node
    pub fn children_count(&self) -> TreeResult<usize> {
        let node = self.live("cannot count children of null node")?;
        Ok(algorithms::children(&self.tree.store, node).count())
    }

    /// Number of parent hops up to the root
    pub fn depth(&self) -> TreeResult<usize> {
        let mut node = self.live("cannot get depth of null node")?;
        let mut depth = 0;
        while let Some(parent) = self.tree.store.links(node).parent {
            depth += 1;
            node = parent;
        }
        Ok(depth)
    }

    /// Number of nodes below this one
    pub fn descendants_count(&self) -> TreeResult<usize> {
        let node = self.live("cannot get descendants count of null node")?;
        Ok(algorithms::count_descendants(&self.tree.store, node))
    }

    /// Number of nodes in the subtree, this node included
    pub fn subtree_size(&self) -> TreeResult<usize> {
        self.descendants_count().map(|count| count + 1)
    }

    /// Children left to right; empty for a null handle
    pub fn children(&self) -> Children<'a, T> {
        Children {
            tree: self.tree,
            next: self.left_child().index,
        }
    }

    /// Ancestors from the parent up to the root
    pub fn ancestors(&self) -> impl Iterator<Item = NodeRef<'a, T>> + 'a {
        let tree = self.tree;
        std::iter::successors(self.parent().index, move |&index| tree.store.links(index).parent)
            .map(move |index| NodeRef::new(tree, Some(index)))
    }

    /// Breadth-first list of this node and every descendant
    pub fn subtree_breadth_first(&self) -> Vec<NodeRef<'a, T>> {
        let mut nodes = Vec::new();
        let mut queue: VecDeque<usize> = self.index.into_iter().collect();
        while let Some(index) = queue.pop_front() {
            queue.extend(algorithms::children(&self.tree.store, index));
            nodes.push(self.with(Some(index)));
        }
        nodes
    }
}

impl<T> Clone for NodeRef<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for NodeRef<'_, T> {}

/// Same node of the same tree, or both null
impl<T> PartialEq for NodeRef<'_, T> {
    fn eq(&self, other: &Self) -> bool {
        match (self.index, other.index) {
            (None, None) => true,
            (Some(a), Some(b)) => a == b && std::ptr::eq(self.tree, other.tree),
            _ => false,
        }
    }
}

impl<T> Eq for NodeRef<'_, T> {}

impl<T: fmt::Debug> fmt::Debug for NodeRef<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.index {
            None => f.write_str("NodeRef(null)"),
            Some(index) => f
                .debug_struct("NodeRef")
                .field("id", &self.tree.store.id_of(index))
                .field("data", &self.tree.store.value(index))
                .finish(),
        }
    }
}

/// Iterator over the children of one node
pub struct Children<'a, T> {
    tree: &'a GeneralTree<T>,
    next: Option<usize>,
}

impl<'a, T> Iterator for Children<'a, T> {
    type Item = NodeRef<'a, T>;

    fn next(&mut self) -> Option<Self::Item> {
        let index = self.next?;
        self.next = self.tree.store.links(index).right_sibling;
        Some(NodeRef::new(self.tree, Some(index)))
    }
}

impl<T> FusedIterator for Children<'_, T> {}

impl<T> fmt::Debug for Children<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Children").field("next", &self.next).finish()
    }
}
