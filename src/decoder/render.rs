//! Text and JSON rendering of a decoded field tree

use std::fmt::Write;

use super::sink::FieldNode;

/// Indented tree, one node per line
///
/// ```text
/// header [0, 24 bytes]
///   magic: 0xbf0c6bbd (mainnet) [0, 4 bytes]
/// ```
pub fn render_text(root: &FieldNode, show_offsets: bool) -> String {
    let mut out = String::new();
    for child in &root.children {
        write_node(&mut out, child, 0, show_offsets);
    }
    out
}

fn write_node(out: &mut String, node: &FieldNode, depth: usize, show_offsets: bool) {
    let _ = write!(out, "{:indent$}{}", "", node.label, indent = depth * 2);
    if let Some(value) = &node.value {
        let _ = write!(out, ": {}", value);
    }
    if show_offsets {
        let _ = write!(out, " [{}, {} bytes]", node.offset, node.length);
    }
    out.push('\n');
    for child in &node.children {
        write_node(out, child, depth + 1, show_offsets);
    }
}

pub fn render_json(root: &FieldNode) -> serde_json::Result<String> {
    serde_json::to_string_pretty(root)
}
