//! Traversal cursors
//!
//! Cursors keep O(1) state: the current node and the iteration order.
//! Each step follows the links only:
//!
//! Preorder: left child, else right sibling, else climb until an ancestor
//! has a right sibling and step to it. Climbing past the root ends the walk.
//!
//! Postorder: start at the leftmost-deepest node. Step to the right sibling
//! and descend to its leftmost-deepest node, or else step to the parent.
//! Every child is emitted before its parent.

use std::fmt;
use std::iter::FusedIterator;

use super::node::{NodeId, NodeStore};
use super::{GeneralTree, NodeRef};

/// Order in which a cursor visits the nodes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum IterationType {
    /// Node before its subtree
    #[default]
    Preorder,
    /// Node after its subtree
    Postorder,
}

pub(crate) fn leftmost_deepest<T>(store: &NodeStore<T>, mut index: usize) -> usize {
    while let Some(child) = store.links(index).left_child {
        index = child;
    }
    index
}

pub(crate) fn first<T>(store: &NodeStore<T>, root: Option<usize>, order: IterationType) -> Option<usize> {
    let root = root?;
    match order {
        IterationType::Preorder => Some(root),
        IterationType::Postorder => Some(leftmost_deepest(store, root)),
    }
}

pub(crate) fn step<T>(store: &NodeStore<T>, index: usize, order: IterationType) -> Option<usize> {
    let links = store.links(index);
    match order {
        IterationType::Preorder => {
            if links.left_child.is_some() {
                return links.left_child;
            }
            if links.right_sibling.is_some() {
                return links.right_sibling;
            }
            // climb until an ancestor with a right sibling shows up
            let mut ancestor = links.parent;
            while let Some(current) = ancestor {
                let up = store.links(current);
                if up.right_sibling.is_some() {
                    return up.right_sibling;
                }
                ancestor = up.parent;
            }
            None
        }
        IterationType::Postorder => match links.right_sibling {
            Some(sibling) => Some(leftmost_deepest(store, sibling)),
            None => links.parent,
        },
    }
}

/// Read-only traversal position
pub struct Cursor<'a, T> {
    tree: &'a GeneralTree<T>,
    current: Option<usize>,
    order: IterationType,
}

impl<'a, T> Cursor<'a, T> {
    pub(crate) fn new(tree: &'a GeneralTree<T>, current: Option<usize>, order: IterationType) -> Self {
        Self {
            tree,
            current,
            order,
        }
    }

    /// Move to the next node; stays past-end once there
    pub fn advance(&mut self) {
        if let Some(index) = self.current {
            self.current = step(&self.tree.store, index, self.order);
        }
    }

    /// Value at the current position, `None` past the end
    pub fn get(&self) -> Option<&'a T> {
        self.tree.store.value(self.current?)
    }

    /// Handle to the current node (null past the end)
    pub fn node(&self) -> NodeRef<'a, T> {
        NodeRef::new(self.tree, self.current)
    }

    /// Id of the current node
    pub fn id(&self) -> Option<NodeId> {
        self.current.map(|index| self.tree.store.id_of(index))
    }

    /// True once the walk is exhausted
    pub fn is_end(&self) -> bool {
        self.current.is_none()
    }

    /// Order this cursor walks in
    pub fn order(&self) -> IterationType {
        self.order
    }
}

impl<T> Clone for Cursor<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Cursor<'_, T> {}

/// Same node of the same tree, or both past the end
impl<T> PartialEq for Cursor<'_, T> {
    fn eq(&self, other: &Self) -> bool {
        match (self.current, other.current) {
            (None, None) => true,
            (Some(a), Some(b)) => a == b && std::ptr::eq(self.tree, other.tree),
            _ => false,
        }
    }
}

impl<T> Eq for Cursor<'_, T> {}

impl<T> fmt::Debug for Cursor<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cursor")
            .field("current", &self.id())
            .field("order", &self.order)
            .finish()
    }
}

/// Mutable traversal position.
///
/// Converts one way into a [`Cursor`]; there is no way back.
pub struct CursorMut<'a, T> {
    tree: &'a mut GeneralTree<T>,
    current: Option<usize>,
    order: IterationType,
}

impl<'a, T> CursorMut<'a, T> {
    pub(crate) fn new(tree: &'a mut GeneralTree<T>, order: IterationType) -> Self {
        let current = first(&tree.store, tree.root, order);
        Self {
            tree,
            current,
            order,
        }
    }

    /// Move to the next node; stays past-end once there
    pub fn advance(&mut self) {
        if let Some(index) = self.current {
            self.current = step(&self.tree.store, index, self.order);
        }
    }

    /// Value at the current position
    pub fn get(&self) -> Option<&T> {
        self.tree.store.value(self.current?)
    }

    /// Mutable value at the current position
    pub fn get_mut(&mut self) -> Option<&mut T> {
        self.tree.store.value_mut(self.current?)
    }

    /// Id of the current node
    pub fn id(&self) -> Option<NodeId> {
        self.current.map(|index| self.tree.store.id_of(index))
    }

    /// True once the walk is exhausted
    pub fn is_end(&self) -> bool {
        self.current.is_none()
    }

    /// Give up mutable access, keeping the position
    pub fn into_cursor(self) -> Cursor<'a, T> {
        Cursor::new(self.tree, self.current, self.order)
    }
}

impl<'a, T> From<CursorMut<'a, T>> for Cursor<'a, T> {
    fn from(cursor: CursorMut<'a, T>) -> Self {
        cursor.into_cursor()
    }
}

impl<T> fmt::Debug for CursorMut<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CursorMut")
            .field("current", &self.id())
            .field("order", &self.order)
            .finish()
    }
}

/// Iterator over values in preorder or postorder
#[derive(Debug)]
pub struct Iter<'a, T> {
    cursor: Cursor<'a, T>,
    remaining: usize,
}

impl<'a, T> Iter<'a, T> {
    pub(crate) fn new(cursor: Cursor<'a, T>) -> Self {
        let remaining = if cursor.is_end() {
            0
        } else {
            cursor.tree.len()
        };
        Self { cursor, remaining }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let value = self.cursor.get()?;
        self.cursor.advance();
        self.remaining = self.remaining.saturating_sub(1);
        Some(value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Self {
            cursor: self.cursor,
            remaining: self.remaining,
        }
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> FusedIterator for Iter<'_, T> {}

/// Iterator over mutable values in preorder or postorder.
///
/// The visit order is computed from the links up front, then each value is
/// handed out exactly once.
pub struct IterMut<'a, T> {
    order: std::vec::IntoIter<usize>,
    values: Vec<Option<&'a mut T>>,
}

impl<'a, T> IterMut<'a, T> {
    pub(crate) fn new(tree: &'a mut GeneralTree<T>, order: IterationType) -> Self {
        let mut visit = Vec::with_capacity(tree.len());
        let mut current = first(&tree.store, tree.root, order);
        while let Some(index) = current {
            visit.push(index);
            current = step(&tree.store, index, order);
        }

        Self {
            order: visit.into_iter(),
            values: tree.store.values_mut_by_slot(),
        }
    }
}

impl<'a, T> Iterator for IterMut<'a, T> {
    type Item = &'a mut T;

    fn next(&mut self) -> Option<Self::Item> {
        for index in self.order.by_ref() {
            if let Some(value) = self.values.get_mut(index).and_then(Option::take) {
                return Some(value);
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.order.len()))
    }
}

impl<T> FusedIterator for IterMut<'_, T> {}

impl<T> fmt::Debug for IterMut<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IterMut")
            .field("remaining", &self.order.len())
            .finish()
    }
}

/// Preorder walk that also reports each node's depth below the root
pub struct DepthFirst<'a, T> {
    tree: &'a GeneralTree<T>,
    current: Option<(usize, usize)>,
}

impl<'a, T> DepthFirst<'a, T> {
    pub(crate) fn new(tree: &'a GeneralTree<T>) -> Self {
        Self {
            tree,
            current: tree.root.map(|root| (root, 0)),
        }
    }
}

impl<'a, T> Iterator for DepthFirst<'a, T> {
    type Item = (usize, &'a T);

    fn next(&mut self) -> Option<Self::Item> {
        let (index, depth) = self.current?;
        let store = &self.tree.store;
        let links = store.links(index);

        self.current = if let Some(child) = links.left_child {
            Some((child, depth + 1))
        } else if let Some(sibling) = links.right_sibling {
            Some((sibling, depth))
        } else {
            let mut ancestor = links.parent.map(|parent| (parent, depth - 1));
            loop {
                match ancestor {
                    Some((up, up_depth)) => {
                        let up_links = store.links(up);
                        if let Some(sibling) = up_links.right_sibling {
                            break Some((sibling, up_depth));
                        }
                        ancestor = up_links.parent.map(|parent| (parent, up_depth - 1));
                    }
                    None => break None,
                }
            }
        };

        store.value(index).map(|value| (depth, value))
    }
}

impl<T> FusedIterator for DepthFirst<'_, T> {}

impl<T> fmt::Debug for DepthFirst<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DepthFirst")
            .field("current", &self.current)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 1 -> [2 -> [4, 5], 3 -> [6]]
    fn example() -> GeneralTree<i32> {
        let mut tree = GeneralTree::new();
        let root = tree.create_root(1).unwrap();
        let n2 = tree.insert_left_child(root, 2).unwrap();
        let n3 = tree.insert_right_sibling(n2, 3).unwrap();
        let n4 = tree.insert_left_child(n2, 4).unwrap();
        tree.insert_right_sibling(n4, 5).unwrap();
        tree.insert_left_child(n3, 6).unwrap();
        tree
    }

    #[test]
    fn test_preorder_and_postorder() {
        let tree = example();
        let pre: Vec<i32> = tree.iter(IterationType::Preorder).copied().collect();
        let post: Vec<i32> = tree.iter(IterationType::Postorder).copied().collect();

        assert_eq!(pre, vec![1, 2, 4, 5, 3, 6]);
        assert_eq!(post, vec![4, 5, 2, 6, 3, 1]);
    }

    #[test]
    fn test_cursor_reaches_end() {
        let tree = example();
        let mut cursor = tree.begin(IterationType::Postorder);
        let end = tree.end(IterationType::Postorder);

        let mut steps = 0;
        while cursor != end {
            cursor.advance();
            steps += 1;
        }
        assert_eq!(steps, 6);
        assert!(cursor.is_end());
        assert_eq!(cursor.get(), None);

        // Advancing past the end is a no-op
        cursor.advance();
        assert!(cursor.is_end());
    }

    #[test]
    fn test_empty_tree_begin_is_end() {
        let tree: GeneralTree<i32> = GeneralTree::new();
        assert_eq!(tree.begin(IterationType::Preorder), tree.end(IterationType::Preorder));
        assert_eq!(tree.begin(IterationType::Postorder), tree.end(IterationType::Postorder));
        assert_eq!(tree.iter(IterationType::Postorder).count(), 0);
    }

    #[test]
    fn test_cursor_mut_converts_to_cursor() {
        let mut tree = example();
        let mut cursor = tree.begin_mut(IterationType::Preorder);
        if let Some(value) = cursor.get_mut() {
            *value *= 10;
        }
        cursor.advance();

        let cursor: Cursor<'_, i32> = cursor.into();
        assert_eq!(cursor.get(), Some(&2));
        assert_eq!(tree.root().data(), Ok(&10));
    }

    #[test]
    fn test_iter_mut_visits_each_value_once() {
        let mut tree = example();
        let mut seen = Vec::new();
        for value in tree.iter_mut(IterationType::Postorder) {
            seen.push(*value);
            *value += 100;
        }

        assert_eq!(seen, vec![4, 5, 2, 6, 3, 1]);
        let pre: Vec<i32> = tree.iter(IterationType::Preorder).copied().collect();
        assert_eq!(pre, vec![101, 102, 104, 105, 103, 106]);
    }

    #[test]
    fn test_depth_first_depths() {
        let tree = example();
        let walk: Vec<(usize, i32)> = tree.iter_with_depth().map(|(d, v)| (d, *v)).collect();
        assert_eq!(walk, vec![(0, 1), (1, 2), (2, 4), (2, 5), (1, 3), (2, 6)]);
    }
}
