//! Debug views of a parsed tree.

use std::fmt::Write;

use petal_dom::{DomTree, NodeId, NodeType};

/// Render the subtree at `id` as an indented outline, one node per line.
///
/// Elements print as `<tag key="value">` with attributes sorted by key; text
/// prints quoted with newlines escaped.
#[must_use]
pub fn tree_to_string(tree: &DomTree, id: NodeId) -> String {
    let mut out = String::new();
    write_node(tree, id, 0, &mut out);
    out
}

/// Print the subtree at `id` to stdout.
pub fn print_tree(tree: &DomTree, id: NodeId) {
    print!("{}", tree_to_string(tree, id));
}

fn write_node(tree: &DomTree, id: NodeId, indent: usize, out: &mut String) {
    // Explicit stack so arbitrarily deep trees cannot overflow the call stack.
    let mut pending = vec![(id, indent)];
    while let Some((id, indent)) = pending.pop() {
        let Some(node) = tree.get(id) else {
            continue;
        };
        let prefix = "  ".repeat(indent);
        match &node.node_type {
            NodeType::Element(data) => {
                if data.attrs.is_empty() {
                    let _ = writeln!(out, "{prefix}<{}>", data.tag_name);
                } else {
                    let mut attrs: Vec<(&String, &String)> = data.attrs.iter().collect();
                    attrs.sort();
                    let attrs: Vec<String> = attrs
                        .into_iter()
                        .map(|(k, v)| {
                            if v.is_empty() {
                                k.clone()
                            } else {
                                format!("{k}=\"{v}\"")
                            }
                        })
                        .collect();
                    let _ = writeln!(out, "{prefix}<{} {}>", data.tag_name, attrs.join(" "));
                }
            }
            NodeType::Text(data) => {
                let display = data.replace('\n', "\\n");
                let _ = writeln!(out, "{prefix}\"{display}\"");
            }
        }
        pending.extend(node.children.iter().rev().map(|&child| (child, indent + 1)));
    }
}

/// Concatenate every text node in document order, tags stripped.
#[must_use]
pub fn text_content(tree: &DomTree) -> String {
    tree.descendants(tree.root())
        .filter_map(|id| tree.as_text(id))
        .collect()
}
