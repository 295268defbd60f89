use rb_ordered_tree::OrderedTree;

fn main() {
    let mut tree = OrderedTree::new();
    for k in [42, 7, 19, 3, 7, 88] {
        tree.insert(k);
    }

    // repeatedly erasing the minimum drains the keys in ascending order
    let mut drained = Vec::new();
    while let Some(node) = tree.min() {
        drained.push(tree.erase(node).expect("handle from min is live"));
    }

    assert_eq!(drained, [3, 7, 7, 19, 42, 88]);
    assert!(tree.is_empty());
    assert!(tree.max().is_none());
}
