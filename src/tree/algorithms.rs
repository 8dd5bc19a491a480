//! Breadth-first routines over the node graph
//!
//! All of these walk the left-child/right-sibling links with an explicit
//! `VecDeque` worklist, so neither depth nor width of the tree can grow the
//! call stack.

use std::collections::VecDeque;

use super::node::{Links, NodeStore};

/// Iterate the children of `index` left to right
pub(crate) fn children<T>(store: &NodeStore<T>, index: usize) -> impl Iterator<Item = usize> + '_ {
    std::iter::successors(store.links(index).left_child, move |&child| {
        store.links(child).right_sibling
    })
}

/// Count every node reachable below `index`, excluding `index` itself
pub(crate) fn count_descendants<T>(store: &NodeStore<T>, index: usize) -> usize {
    let mut count = 0;
    let mut queue = VecDeque::from([index]);

    while let Some(current) = queue.pop_front() {
        for child in children(store, current) {
            queue.push_back(child);
            count += 1;
        }
    }

    count
}

/// Unlink `index` from its parent and siblings.
///
/// Either the node is its parent's left child, or it is reached by walking
/// the sibling chain from that left child. A root has nothing to unlink.
pub(crate) fn detach<T>(store: &mut NodeStore<T>, index: usize) {
    let links = store.links(index);
    let Some(parent) = links.parent else {
        return;
    };

    match store.links(parent).left_child {
        Some(first) if first == index => {
            store.links_mut(parent).left_child = links.right_sibling;
        }
        Some(first) => {
            let mut sibling = first;
            while let Some(next) = store.links(sibling).right_sibling {
                if next == index {
                    store.links_mut(sibling).right_sibling = links.right_sibling;
                    break;
                }
                sibling = next;
            }
        }
        None => {}
    }

    let unlinked = store.links_mut(index);
    unlinked.parent = None;
    unlinked.right_sibling = None;
}

/// Free the subtree rooted at a detached node.
///
/// A node's children are queued before its slot is freed, so no descendant
/// is leaked. Returns the number of nodes freed.
pub(crate) fn free_subtree<T>(store: &mut NodeStore<T>, index: usize) -> usize {
    let mut freed = 0;
    let mut queue = VecDeque::from([index]);

    while let Some(current) = queue.pop_front() {
        queue.extend(children(store, current));
        if store.release(current).is_some() {
            freed += 1;
        }
    }

    freed
}

/// Replicate the subtree at `root` into a fresh arena.
///
/// Returns the new arena and the index of the copied root inside it.
pub(crate) fn deep_copy<T: Clone>(source: &NodeStore<T>, root: usize) -> Option<(NodeStore<T>, usize)> {
    let mut copy = NodeStore::with_capacity(count_descendants(source, root) + 1);
    let copy_root = copy.alloc(source.value(root)?.clone(), Links::default());

    // nodes whose children still need to be copied
    let mut pending = VecDeque::from([(root, copy_root)]);

    while let Some((original, copied)) = pending.pop_front() {
        let mut previous: Option<usize> = None;

        for child in children(source, original) {
            let Some(value) = source.value(child) else {
                continue;
            };
            let child_copy = copy.alloc(
                value.clone(),
                Links {
                    parent: Some(copied),
                    ..Links::default()
                },
            );

            match previous {
                None => copy.links_mut(copied).left_child = Some(child_copy),
                Some(prev) => copy.links_mut(prev).right_sibling = Some(child_copy),
            }

            pending.push_back((child, child_copy));
            previous = Some(child_copy);
        }
    }

    Some((copy, copy_root))
}

/// Compare two subtrees value by value and shape by shape.
///
/// Paired nodes must hold equal values and the same number of children.
pub(crate) fn structurally_equal<T: PartialEq>(
    left: &NodeStore<T>,
    left_root: usize,
    right: &NodeStore<T>,
    right_root: usize,
) -> bool {
    if left.value(left_root) != right.value(right_root) {
        return false;
    }

    let mut equal_nodes = VecDeque::from([(left_root, right_root)]);

    while let Some((l, r)) = equal_nodes.pop_front() {
        let mut left_child = left.links(l).left_child;
        let mut right_child = right.links(r).left_child;

        while let (Some(lc), Some(rc)) = (left_child, right_child) {
            if left.value(lc) != right.value(rc) {
                return false;
            }
            equal_nodes.push_back((lc, rc));
            left_child = left.links(lc).right_sibling;
            right_child = right.links(rc).right_sibling;
        }

        // one node has more children than the other
        if left_child.is_some() || right_child.is_some() {
            return false;
        }
    }

    true
}

/// Move every node of `source` into `target`, keeping the link structure.
///
/// Values are moved, not cloned. Returns the index `source_root` now has in
/// `target` and the number of nodes moved. The source arena is consumed.
pub(crate) fn relocate<T>(
    source: NodeStore<T>,
    source_root: usize,
    target: &mut NodeStore<T>,
) -> Option<(usize, usize)> {
    target.reserve(source.len());

    let mut remap: Vec<Option<usize>> = vec![None; source.slot_count()];
    let mut moved = Vec::with_capacity(source.len());

    for (old, links, value) in source.into_live() {
        let new = target.alloc(value, Links::default());
        remap[old] = Some(new);
        moved.push((new, links));
    }

    let translate = |link: Option<usize>| link.and_then(|old| remap.get(old).copied().flatten());
    for &(new, links) in &moved {
        *target.links_mut(new) = Links {
            parent: translate(links.parent),
            left_child: translate(links.left_child),
            right_sibling: translate(links.right_sibling),
        };
    }

    let new_root = remap.get(source_root).copied().flatten()?;
    Some((new_root, moved.len()))
}
