//! Ordered n-ary tree in left-child/right-sibling form
//!
//! Every node carries three links: its parent, its first child and its
//! next sibling. The children of a node are the sibling chain starting at
//! its first child, so any branching factor fits in two owning links.
//!
//! The tree owns all nodes through a single arena. Callers hold either a
//! borrowed [`NodeRef`] (navigation and queries) or a detached [`NodeId`]
//! (input to every mutating operation).

mod algorithms;
mod handle;
mod node;
#[cfg(feature = "visualize")]
mod snapshot;
mod traversal;

pub use handle::{Children, NodeRef};
pub use node::NodeId;
#[cfg(feature = "visualize")]
pub use snapshot::SnapshotEntry;
pub use traversal::{Cursor, CursorMut, DepthFirst, IterationType, Iter, IterMut};

use std::fmt;

use node::{Links, NodeStore};

use crate::error::{TreeError, TreeResult};
use crate::outline;

/// Owning container of an ordered general tree
pub struct GeneralTree<T> {
    store: NodeStore<T>,
    root: Option<usize>,
}

impl<T> GeneralTree<T> {
    /// Create an empty tree
    pub fn new() -> Self {
        Self {
            store: NodeStore::new(),
            root: None,
        }
    }

    /// Create a tree holding a single root node
    pub fn with_root(value: T) -> Self {
        let mut store = NodeStore::new();
        let root = store.alloc(value, Links::default());
        Self {
            store,
            root: Some(root),
        }
    }

    /// True when the tree has no root
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Number of nodes in the tree
    pub fn len(&self) -> usize {
        self.store.len()
    }

    /// Handle to the root, null for an empty tree
    pub fn root(&self) -> NodeRef<'_, T> {
        NodeRef::new(self, self.root)
    }

    /// Handle to the node behind `id`, null if the id does not resolve here
    pub fn node(&self, id: impl Into<Option<NodeId>>) -> NodeRef<'_, T> {
        NodeRef::new(self, self.resolve(id))
    }

    /// True if `id` names a live node of this tree
    pub fn contains(&self, id: NodeId) -> bool {
        self.store.resolve(id).is_some()
    }

    /// Value of the node behind `id`
    pub fn data(&self, id: impl Into<Option<NodeId>>) -> TreeResult<&T> {
        let index = self.target(id, "cannot get data from null node")?;
        self.store
            .value(index)
            .ok_or(TreeError::InvalidState("cannot get data from null node"))
    }

    /// Mutable value of the node behind `id`
    pub fn data_mut(&mut self, id: impl Into<Option<NodeId>>) -> TreeResult<&mut T> {
        let index = self.target(id, "cannot get data from null node")?;
        self.store
            .value_mut(index)
            .ok_or(TreeError::InvalidState("cannot get data from null node"))
    }

    fn resolve(&self, id: impl Into<Option<NodeId>>) -> Option<usize> {
        id.into().and_then(|id| self.store.resolve(id))
    }

    fn target(&self, id: impl Into<Option<NodeId>>, what: &'static str) -> TreeResult<usize> {
        self.resolve(id).ok_or(TreeError::InvalidState(what))
    }

    /// Create the root node.
    ///
    /// Fails with `InvalidOperation` if the tree already has a root.
    pub fn create_root(&mut self, value: T) -> TreeResult<NodeId> {
        self.emplace_root(|| value)
    }

    /// Create the root node from a lazily built value.
    ///
    /// `make` only runs once the call is known to succeed.
    pub fn emplace_root(&mut self, make: impl FnOnce() -> T) -> TreeResult<NodeId> {
        if self.root.is_some() {
            return Err(TreeError::InvalidOperation("root already exists"));
        }
        let root = self.store.alloc(make(), Links::default());
        self.root = Some(root);
        tracing::trace!(index = root, "created root");
        Ok(self.store.id_of(root))
    }

    /// Insert `value` as the new first child of `dest`.
    ///
    /// The previous first child becomes the new node's right sibling.
    pub fn insert_left_child(&mut self, dest: impl Into<Option<NodeId>>, value: T) -> TreeResult<NodeId> {
        self.emplace_left_child(dest, || value)
    }

    /// Lazily built variant of [`insert_left_child`](Self::insert_left_child)
    pub fn emplace_left_child(
        &mut self,
        dest: impl Into<Option<NodeId>>,
        make: impl FnOnce() -> T,
    ) -> TreeResult<NodeId> {
        let dest = self.target(dest, "cannot insert left child to null node")?;
        let links = Links {
            parent: Some(dest),
            left_child: None,
            right_sibling: self.store.links(dest).left_child,
        };
        let node = self.store.alloc(make(), links);
        self.store.links_mut(dest).left_child = Some(node);
        tracing::trace!(parent = dest, index = node, "inserted left child");
        Ok(self.store.id_of(node))
    }

    /// Insert `value` immediately after `dest` among its parent's children.
    ///
    /// Fails with `InvalidOperation` on the root, which has no siblings.
    pub fn insert_right_sibling(&mut self, dest: impl Into<Option<NodeId>>, value: T) -> TreeResult<NodeId> {
        self.emplace_right_sibling(dest, || value)
    }

    /// Lazily built variant of [`insert_right_sibling`](Self::insert_right_sibling)
    pub fn emplace_right_sibling(
        &mut self,
        dest: impl Into<Option<NodeId>>,
        make: impl FnOnce() -> T,
    ) -> TreeResult<NodeId> {
        let dest = self.target(dest, "cannot insert right sibling to null node")?;
        let dest_links = self.store.links(dest);
        if dest_links.parent.is_none() {
            return Err(TreeError::InvalidOperation("cannot insert right sibling to root"));
        }
        let links = Links {
            parent: dest_links.parent,
            left_child: None,
            right_sibling: dest_links.right_sibling,
        };
        let node = self.store.alloc(make(), links);
        self.store.links_mut(dest).right_sibling = Some(node);
        tracing::trace!(sibling = dest, index = node, "inserted right sibling");
        Ok(self.store.id_of(node))
    }

    /// Move the whole of `source` in as the new first child of `dest`.
    ///
    /// `source` is left empty. Returns the id of the spliced root, or `None`
    /// when `source` was already empty.
    ///
    /// The nodes of `source` are relocated into this tree's arena, so the
    /// cost is linear in the size of `source`. Ids previously taken from
    /// `source` stop resolving; reach the moved nodes through the returned
    /// id.
    pub fn splice_left_child(
        &mut self,
        dest: impl Into<Option<NodeId>>,
        source: &mut GeneralTree<T>,
    ) -> TreeResult<Option<NodeId>> {
        let dest = dest.into();
        if Self::belongs_to(dest, source) {
            return Err(TreeError::InvalidOperation("cannot insert a tree as its own child"));
        }
        let dest = self.target(dest, "cannot insert left child to null node")?;
        let Some(spliced) = self.absorb(source) else {
            return Ok(None);
        };

        let previous = self.store.links(dest).left_child;
        let links = self.store.links_mut(spliced);
        links.parent = Some(dest);
        links.right_sibling = previous;
        self.store.links_mut(dest).left_child = Some(spliced);
        Ok(Some(self.store.id_of(spliced)))
    }

    /// Move the whole of `source` in right after `dest`.
    ///
    /// `source` is left empty. Fails with `InvalidOperation` on the root.
    /// As with [`splice_left_child`](Self::splice_left_child), the nodes are
    /// relocated and only the returned id refers to the moved subtree.
    pub fn splice_right_sibling(
        &mut self,
        dest: impl Into<Option<NodeId>>,
        source: &mut GeneralTree<T>,
    ) -> TreeResult<Option<NodeId>> {
        let dest = dest.into();
        if Self::belongs_to(dest, source) {
            return Err(TreeError::InvalidOperation("cannot insert a tree as its own sibling"));
        }
        let dest = self.target(dest, "cannot insert right sibling to null node")?;
        let dest_links = self.store.links(dest);
        if dest_links.parent.is_none() {
            return Err(TreeError::InvalidOperation("cannot insert right sibling to root"));
        }
        let Some(spliced) = self.absorb(source) else {
            return Ok(None);
        };

        let links = self.store.links_mut(spliced);
        links.parent = dest_links.parent;
        links.right_sibling = dest_links.right_sibling;
        self.store.links_mut(dest).right_sibling = Some(spliced);
        Ok(Some(self.store.id_of(spliced)))
    }

    fn belongs_to(dest: Option<NodeId>, tree: &GeneralTree<T>) -> bool {
        dest.map_or(false, |id| tree.contains(id))
    }

    /// Relocate every node of `source` into this arena, leaving `source`
    /// empty. Returns the new index of its root.
    fn absorb(&mut self, source: &mut GeneralTree<T>) -> Option<usize> {
        let source_root = source.root.take()?;
        let store = std::mem::take(&mut source.store);
        let (root, moved) = algorithms::relocate(store, source_root, &mut self.store)?;
        tracing::trace!(moved, root, "spliced subtree");
        Some(root)
    }

    /// Remove the node behind `id` and its whole subtree.
    ///
    /// A null or unresolvable id is a no-op. Returns the number of nodes
    /// removed.
    pub fn delete_subtree(&mut self, id: impl Into<Option<NodeId>>) -> usize {
        match self.resolve(id) {
            Some(index) => self.delete_from(index),
            None => 0,
        }
    }

    /// Remove the first child of `id` together with its subtree.
    ///
    /// Having no first child is not an error.
    pub fn delete_left_child(&mut self, id: impl Into<Option<NodeId>>) -> TreeResult<usize> {
        let index = self.target(id, "cannot delete left child of null node")?;
        Ok(self
            .store
            .links(index)
            .left_child
            .map_or(0, |child| self.delete_from(child)))
    }

    /// Remove the right sibling of `id` together with its subtree.
    ///
    /// Fails with `InvalidOperation` on the root.
    pub fn delete_right_sibling(&mut self, id: impl Into<Option<NodeId>>) -> TreeResult<usize> {
        let index = self.target(id, "cannot delete right sibling of null node")?;
        let links = self.store.links(index);
        if links.parent.is_none() {
            return Err(TreeError::InvalidOperation("cannot delete right sibling of root node"));
        }
        Ok(links
            .right_sibling
            .map_or(0, |sibling| self.delete_from(sibling)))
    }

    fn delete_from(&mut self, index: usize) -> usize {
        if self.root == Some(index) {
            self.root = None;
        }
        algorithms::detach(&mut self.store, index);
        let removed = algorithms::free_subtree(&mut self.store, index);
        tracing::trace!(index, removed, "deleted subtree");
        removed
    }

    /// Remove every node. Calling it on an empty tree does nothing.
    pub fn clear(&mut self) {
        if let Some(root) = self.root {
            let removed = self.delete_from(root);
            tracing::debug!(removed, "cleared tree");
        }
        self.store.reset();
    }

    /// Move the contents out in O(1), leaving this tree empty
    pub fn take(&mut self) -> Self {
        std::mem::take(self)
    }

    /// Release this tree's nodes, then move `other`'s contents in.
    ///
    /// `other` is left empty and no value is cloned.
    pub fn assign_from(&mut self, other: &mut Self) {
        self.clear();
        std::mem::swap(self, other);
    }

    /// Cursor at the first node of the walk
    pub fn begin(&self, order: IterationType) -> Cursor<'_, T> {
        Cursor::new(self, traversal::first(&self.store, self.root, order), order)
    }

    /// Past-the-end cursor
    pub fn end(&self, order: IterationType) -> Cursor<'_, T> {
        Cursor::new(self, None, order)
    }

    /// Mutable cursor at the first node of the walk
    pub fn begin_mut(&mut self, order: IterationType) -> CursorMut<'_, T> {
        CursorMut::new(self, order)
    }

    /// Values in the given order
    pub fn iter(&self, order: IterationType) -> Iter<'_, T> {
        Iter::new(self.begin(order))
    }

    /// Mutable values in the given order
    pub fn iter_mut(&mut self, order: IterationType) -> IterMut<'_, T> {
        IterMut::new(self, order)
    }

    /// Preorder values paired with their depth
    pub fn iter_with_depth(&self) -> DepthFirst<'_, T> {
        DepthFirst::new(self)
    }

    /// Greatest depth of any node, `None` for an empty tree
    pub fn height(&self) -> Option<usize> {
        self.iter_with_depth().map(|(depth, _)| depth).max()
    }
}

impl<T> Default for GeneralTree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> From<T> for GeneralTree<T> {
    fn from(value: T) -> Self {
        Self::with_root(value)
    }
}

/// Breadth-first deep copy; the copy shares no node with the original
impl<T: Clone> Clone for GeneralTree<T> {
    fn clone(&self) -> Self {
        let Some(root) = self.root else {
            return Self::new();
        };
        match algorithms::deep_copy(&self.store, root) {
            Some((store, root)) => {
                tracing::debug!(nodes = store.len(), "deep copied tree");
                Self {
                    store,
                    root: Some(root),
                }
            }
            None => Self::new(),
        }
    }

    fn clone_from(&mut self, source: &Self) {
        self.clear();
        *self = source.clone();
    }
}

impl<T: PartialEq> PartialEq for GeneralTree<T> {
    fn eq(&self, other: &Self) -> bool {
        if std::ptr::eq(self, other) {
            return true;
        }
        match (self.root, other.root) {
            (None, None) => true,
            (Some(left), Some(right)) => {
                algorithms::structurally_equal(&self.store, left, &other.store, right)
            }
            _ => false,
        }
    }
}

impl<T: Eq> Eq for GeneralTree<T> {}

impl<T: fmt::Debug> fmt::Debug for GeneralTree<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeneralTree")
            .field("len", &self.len())
            .field("preorder", &self.iter(IterationType::Preorder).collect::<Vec<_>>())
            .finish()
    }
}

/// Outline form, [`outline::DEFAULT_INDENT`] spaces per level
impl<T: fmt::Display> fmt::Display for GeneralTree<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        outline::write_outline(f, self, outline::DEFAULT_INDENT)
    }
}

impl<'a, T> IntoIterator for &'a GeneralTree<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter(IterationType::Preorder)
    }
}

impl<'a, T> IntoIterator for &'a mut GeneralTree<T> {
    type Item = &'a mut T;
    type IntoIter = IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut(IterationType::Preorder)
    }
}
