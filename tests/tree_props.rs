use std::collections::HashMap;

use general_tree::{outline, GeneralTree, IterationType, NodeId};
use proptest::prelude::*;

/// One build step: 0 inserts a left child, 1 a right sibling (left child on
/// the root), applied to the node picked by index
fn build_steps() -> impl Strategy<Value = Vec<(u8, usize, i32)>> {
    proptest::collection::vec((0u8..2, any::<usize>(), -50i32..50), 0..48)
}

fn build(root: i32, steps: &[(u8, usize, i32)]) -> (GeneralTree<i32>, Vec<NodeId>) {
    let mut tree = GeneralTree::with_root(root);
    let mut ids: Vec<NodeId> = tree.root().id().into_iter().collect();

    for &(op, pick, value) in steps {
        let target = ids[pick % ids.len()];
        let id = if op == 1 && !tree.node(target).is_root() {
            tree.insert_right_sibling(target, value)
        } else {
            tree.insert_left_child(target, value)
        }
        .expect("targets are live nodes of this tree");
        ids.push(id);
    }
    (tree, ids)
}

fn positions(tree: &GeneralTree<i32>, order: IterationType) -> HashMap<NodeId, usize> {
    let mut map = HashMap::new();
    let mut cursor = tree.begin(order);
    while let Some(id) = cursor.id() {
        map.insert(id, map.len());
        cursor.advance();
    }
    map
}

proptest! {
    #[test]
    fn copy_equals_original(root in any::<i32>(), steps in build_steps()) {
        let (tree, ids) = build(root, &steps);
        let copy = tree.clone();

        prop_assert_eq!(&copy, &tree);
        prop_assert_eq!(copy.len(), tree.len());
        for id in ids {
            prop_assert!(!copy.contains(id), "copy must not share nodes");
        }
    }

    #[test]
    fn walks_cover_every_node(root in any::<i32>(), steps in build_steps()) {
        let (tree, _) = build(root, &steps);

        prop_assert_eq!(tree.len(), steps.len() + 1);
        prop_assert_eq!(tree.iter(IterationType::Preorder).count(), tree.len());
        prop_assert_eq!(tree.iter(IterationType::Postorder).count(), tree.len());
        prop_assert_eq!(tree.root().descendants_count().unwrap() + 1, tree.len());
        prop_assert_eq!(tree.iter(IterationType::Preorder).next(), Some(&root));
        prop_assert_eq!(tree.iter(IterationType::Postorder).last(), Some(&root));
    }

    #[test]
    fn parents_are_ordered_around_children(root in any::<i32>(), steps in build_steps()) {
        let (tree, ids) = build(root, &steps);
        let pre = positions(&tree, IterationType::Preorder);
        let post = positions(&tree, IterationType::Postorder);

        for id in ids {
            let node = tree.node(id);
            if let Some(parent) = node.parent().id() {
                prop_assert!(pre[&parent] < pre[&id], "preorder visits parent first");
                prop_assert!(post[&parent] > post[&id], "postorder visits parent last");
                prop_assert_eq!(node.depth().unwrap(), tree.node(parent).depth().unwrap() + 1);
            }
        }
    }

    #[test]
    fn deleting_removes_whole_subtree(
        root in any::<i32>(),
        steps in build_steps(),
        pick in any::<usize>(),
    ) {
        let (mut tree, ids) = build(root, &steps);
        let victim = ids[pick % ids.len()];
        let before = tree.len();
        let size = tree.node(victim).subtree_size().unwrap();

        let removed = tree.delete_subtree(victim);

        prop_assert_eq!(removed, size);
        prop_assert_eq!(tree.len(), before - size);
        prop_assert_eq!(tree.iter(IterationType::Preorder).count(), tree.len());
        prop_assert_eq!(tree.iter(IterationType::Postorder).count(), tree.len());
        prop_assert!(tree.node(victim).is_null());
        let alive = ids.iter().filter(|id| tree.contains(**id)).count();
        prop_assert_eq!(alive, tree.len());
    }

    #[test]
    fn splice_keeps_both_shapes(
        a_steps in build_steps(),
        b_steps in build_steps(),
        pick in any::<usize>(),
    ) {
        let (mut host, ids) = build(0, &a_steps);
        let (mut graft, _) = build(1000, &b_steps);
        let graft_copy = graft.clone();
        let (host_len, graft_len) = (host.len(), graft.len());

        let spliced = host
            .splice_left_child(ids[pick % ids.len()], &mut graft)
            .unwrap()
            .expect("graft is not empty");

        prop_assert!(graft.is_empty());
        prop_assert_eq!(host.len(), host_len + graft_len);
        prop_assert_eq!(host.node(spliced).subtree_size().unwrap(), graft_len);

        // breadth-first order of the spliced subtree matches the graft
        let node = host.node(spliced);
        let expected: Vec<i32> = node
            .subtree_breadth_first()
            .iter()
            .map(|n| *n.data().unwrap())
            .collect();
        let original: Vec<i32> = graft_copy
            .root()
            .subtree_breadth_first()
            .iter()
            .map(|n| *n.data().unwrap())
            .collect();
        prop_assert_eq!(expected, original);
        prop_assert_eq!(host.delete_subtree(spliced), graft_len);
        prop_assert_eq!(host.len(), host_len);
    }

    #[test]
    fn outline_round_trip(root in any::<i32>(), steps in build_steps(), indent in 1usize..5) {
        let (tree, _) = build(root, &steps);
        let text = outline::render(&tree, indent);
        let parsed = outline::parse(&text, indent).unwrap();

        prop_assert_eq!(parsed.len(), tree.len());
        prop_assert_eq!(outline::render(&parsed, indent), text);
        let values: Vec<String> = tree.iter(IterationType::Postorder).map(i32::to_string).collect();
        let parsed_values: Vec<String> = parsed.iter(IterationType::Postorder).cloned().collect();
        prop_assert_eq!(values, parsed_values);
    }
}
