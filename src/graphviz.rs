//! Render the tree to a Graphviz DOT file. Debug aid behind the
//! `graphviz` feature; the sentinel is not drawn.

use std::fmt::{self, Write as _};
use std::fs;
use std::io;
use std::path::Path;

use crate::handle::IndexType;
use crate::node::Node;
use crate::tree::OrderedTree;

impl<K, Ix> OrderedTree<K, Ix>
where
    K: Ord + fmt::Debug,
    Ix: IndexType,
{
    /// Write the tree as a DOT digraph, node fill matching node color.
    #[inline]
    pub fn draw<P: AsRef<Path>>(&self, path: P) -> io::Result<()> {
        let mut dot = String::from("digraph tree {\n");
        let _ignore = writeln!(
            dot,
            "    node [shape=circle, style=filled, fontcolor=white];"
        );
        let mut stack = vec![];
        if !self.node_ref(self.root, Node::is_sentinel) {
            stack.push(self.root);
        }
        while let Some(x) = stack.pop() {
            let label = format!("{:?}", self.node_ref(x, Node::key)).replace('"', "\\\"");
            let fill = if self.node_ref(x, Node::is_red) {
                "red"
            } else {
                "black"
            };
            let _ignore = writeln!(
                dot,
                "    n{} [label=\"{}\", fillcolor={}];",
                x.index(),
                label,
                fill
            );
            for child in [self.node_ref(x, Node::left), self.node_ref(x, Node::right)] {
                if !self.node_ref(child, Node::is_sentinel) {
                    let _ignore = writeln!(dot, "    n{} -> n{};", x.index(), child.index());
                    stack.push(child);
                }
            }
        }
        dot.push_str("}\n");
        fs::write(path, dot)
    }
}
