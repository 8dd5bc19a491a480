//! Test helpers: sample trees and a value type that counts clones and drops

#![allow(dead_code)]
use std::cell::Cell;

use general_tree::{GeneralTree, NodeId};

/// Ids of the six-node example tree
///
/// ```text
///     1
///    / \
///   2   3
///  / \   \
/// 4   5   6
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Example {
    pub n1: NodeId,
    pub n2: NodeId,
    pub n3: NodeId,
    pub n4: NodeId,
    pub n5: NodeId,
    pub n6: NodeId,
}

/// Build the example tree in the same order the links are described:
/// root=1, left child 2 of root, right sibling 3 of 2, left child 4 of 2,
/// right sibling 5 of 4, left child 6 of 3
pub fn example_tree() -> (GeneralTree<i32>, Example) {
    let mut tree = GeneralTree::new();
    let n1 = tree.create_root(1).expect("empty tree accepts a root");
    let n2 = tree.insert_left_child(n1, 2).expect("root is live");
    let n3 = tree.insert_right_sibling(n2, 3).expect("2 is not the root");
    let n4 = tree.insert_left_child(n2, 4).expect("2 is live");
    let n5 = tree.insert_right_sibling(n4, 5).expect("4 is not the root");
    let n6 = tree.insert_left_child(n3, 6).expect("3 is live");
    (
        tree,
        Example {
            n1,
            n2,
            n3,
            n4,
            n5,
            n6,
        },
    )
}

/// Build a tree whose nodes `0..n` are laid out breadth first, three
/// children per node
pub fn seed_tree(n: usize) -> GeneralTree<LifecycleCounter> {
    let mut tree = GeneralTree::new();
    if n == 0 {
        return tree;
    }
    let mut ids = vec![tree
        .create_root(LifecycleCounter::new("string0", 0))
        .expect("empty tree accepts a root")];

    for i in 1..n {
        let value = LifecycleCounter::new(&format!("string{i}"), i as i32);
        let id = if (i - 1) % 3 == 0 {
            tree.insert_left_child(ids[(i - 1) / 3], value)
        } else {
            tree.insert_right_sibling(ids[i - 1], value)
        }
        .expect("seed targets are live");
        ids.push(id);
    }
    tree
}

/// Same shape as [`seed_tree`] with plain integers
pub fn seed_int_tree(n: usize) -> GeneralTree<i32> {
    let mut tree = GeneralTree::new();
    if n == 0 {
        return tree;
    }
    let mut ids = vec![tree.create_root(0).expect("empty tree accepts a root")];
    for i in 1..n {
        let id = if (i - 1) % 3 == 0 {
            tree.insert_left_child(ids[(i - 1) / 3], i as i32)
        } else {
            tree.insert_right_sibling(ids[i - 1], i as i32)
        }
        .expect("seed targets are live");
        ids.push(id);
    }
    tree
}

thread_local! {
    static CLONES: Cell<usize> = const { Cell::new(0) };
    static DROPS: Cell<usize> = const { Cell::new(0) };
}

/// Value that records how often it is cloned and dropped on this thread
#[derive(Debug, PartialEq, Eq)]
pub struct LifecycleCounter {
    pub name: String,
    pub id: i32,
}

impl LifecycleCounter {
    pub fn new(name: &str, id: i32) -> Self {
        Self {
            name: name.to_string(),
            id,
        }
    }

    /// Zero both counters
    pub fn reset() {
        CLONES.with(|c| c.set(0));
        DROPS.with(|c| c.set(0));
    }

    pub fn clones() -> usize {
        CLONES.with(Cell::get)
    }

    pub fn drops() -> usize {
        DROPS.with(Cell::get)
    }
}

impl Clone for LifecycleCounter {
    fn clone(&self) -> Self {
        CLONES.with(|c| c.set(c.get() + 1));
        Self {
            name: self.name.clone(),
            id: self.id,
        }
    }
}

impl Drop for LifecycleCounter {
    fn drop(&mut self) {
        DROPS.with(|c| c.set(c.get() + 1));
    }
}
