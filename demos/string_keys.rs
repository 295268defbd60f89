use rb_ordered_tree::OrderedTree;

fn main() {
    let mut tree = OrderedTree::new();
    for word in ["pear", "apple", "quince", "fig", "apple"] {
        tree.insert(word.to_string());
    }
    assert_eq!(tree.len(), 5);

    let min = tree.min().unwrap();
    assert_eq!(tree.key(min).map(String::as_str), Some("apple"));
    let max = tree.max().unwrap();
    assert_eq!(tree.key(max).map(String::as_str), Some("quince"));

    let words: Vec<&str> = tree
        .to_ordered_vec()
        .into_iter()
        .map(String::as_str)
        .collect();
    assert_eq!(words, ["apple", "apple", "fig", "pear", "quince"]);

    // erasing through the handle removes one occurrence, not the key
    assert_eq!(tree.erase(min), Ok("apple".to_string()));
    assert!(tree.contains(&"apple".to_string()));
}
