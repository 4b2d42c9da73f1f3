//! BML inspection command handler

use anyhow::{Context, Result};
use kart_bml::Node;
use std::fmt::Write;
use std::path::Path;

/// Handle the bml command
pub fn show(path: &Path, json: bool) -> Result<()> {
    let root = kart_bml::read_document(path)
        .with_context(|| format!("Failed to decode {}", path.display()))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&root)?);
    } else {
        print!("{}", render_tree(&root));
        println!("\n{} nodes", root.node_count());
    }

    Ok(())
}

/// Render `root` as an indented outline, one node per line
pub fn render_tree(root: &Node) -> String {
    let mut out = String::new();
    let mut stack = vec![(root, 0usize)];

    while let Some((node, depth)) = stack.pop() {
        let _ = write!(out, "{:indent$}{}", "", node.name, indent = depth * 2);
        for (key, value) in node.attributes.iter() {
            let _ = write!(out, " {}={:?}", key, value);
        }
        if !node.text.is_empty() {
            let _ = write!(out, " {:?}", node.text);
        }
        out.push('\n');

        stack.extend(node.children.iter().rev().map(|child| (child, depth + 1)));
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use kart_bml::testing::{encode, Element};

    #[test]
    fn test_render_tree() {
        let doc = Element::new("root").children([
            Element::new("track")
                .attr("id", "village_R01")
                .attr("name", "城镇 高速公路"),
            Element::new("group")
                .text("note")
                .child(Element::new("track_rvs").attr("refId", "village_R01")),
        ]);
        let root = kart_bml::decode(&encode(&doc)).unwrap().unwrap();

        assert_eq!(
            render_tree(&root),
            "root\n\
             \x20 track id=\"village_R01\" name=\"城镇 高速公路\"\n\
             \x20 group \"note\"\n\
             \x20   track_rvs refId=\"village_R01\"\n"
        );
    }

    #[test]
    fn test_show_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        assert!(show(&dir.path().join("missing.bml"), false).is_err());
    }
}
