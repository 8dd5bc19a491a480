//! Serializable preorder listing for debugging and visualization

use serde::Serialize;

use super::GeneralTree;

/// One node of a snapshot: its depth below the root and its value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SnapshotEntry<'a, T> {
    /// Parent hops to the root
    pub depth: usize,
    /// Node value
    pub value: &'a T,
}

impl<T> GeneralTree<T> {
    /// Flat preorder `(depth, value)` listing of the tree
    pub fn snapshot(&self) -> Vec<SnapshotEntry<'_, T>> {
        self.iter_with_depth()
            .map(|(depth, value)| SnapshotEntry { depth, value })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_serializes_in_preorder() {
        let mut tree = GeneralTree::with_root(1);
        let root = tree.root().id();
        let two = tree.insert_left_child(root, 2).unwrap();
        tree.insert_right_sibling(two, 3).unwrap();

        let json = serde_json::to_string(&tree.snapshot()).unwrap();
        assert_eq!(
            json,
            r#"[{"depth":0,"value":1},{"depth":1,"value":2},{"depth":1,"value":3}]"#
        );
    }
}
