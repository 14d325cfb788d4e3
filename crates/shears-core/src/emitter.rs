use crate::ast::{Content, Node, NodeKind};

/// Renders a node back to stylesheet source text, restoring the delimiters
/// the parser strips (see the shape contract in `ast`).
pub fn render(node: &Node) -> String {
    let mut out = String::new();
    write_node(node, &mut out);
    out
}

fn write_node(node: &Node, out: &mut String) {
    match node.kind {
        NodeKind::Variable => {
            out.push('$');
            write_content(node, out);
        }
        NodeKind::Interpolation => {
            out.push_str("#{");
            write_content(node, out);
            out.push('}');
        }
        NodeKind::Parenthesis => {
            out.push('(');
            write_content(node, out);
            out.push(')');
        }
        NodeKind::Block => {
            out.push('{');
            write_content(node, out);
            out.push('}');
        }
        NodeKind::Comment => {
            out.push_str("/*");
            write_content(node, out);
            out.push_str("*/");
        }
        _ => write_content(node, out),
    }
}

fn write_content(node: &Node, out: &mut String) {
    match &node.content {
        Content::Children(children) => {
            for child in children {
                write_node(child, out);
            }
        }
        Content::Text(text) => out.push_str(text),
    }
}
