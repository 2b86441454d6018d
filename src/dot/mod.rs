//! Graphviz DOT export of a decision tree.
//!
//! Produces a `digraph` with one node per tree node and colored edges:
//! green for "yes", red for "no". Rendering the DOT file into an image is
//! left to the `dot` tool.
//!
//! ```text
//! digraph akitree {
//! graph [nodesep=0.5];
//! node [fontname="Helvetica", color="Lavender", style="filled"];
//! node0 [label="bird"];
//! ...
//! edge [color="Green"];
//! node0 -> node1;
//! edge [color="Red"];
//! node0 -> node2;
//! }
//! ```

use crate::model::DecisionTree;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// File extension of DOT files
pub const DOT_EXTENSION: &str = "dot";

const HEADER: &str = "digraph akitree {\n\
                      graph [nodesep=0.5];\n\
                      node [fontname=\"Helvetica\", color=\"Lavender\", style=\"filled\"];\n";

const YES_EDGE: &str = "edge [color=\"Green\"];\n";
const NO_EDGE: &str = "edge [color=\"Red\"];\n";

/// Returns the DOT representation of `tree`.
///
/// # Example
/// ```
/// use akitree::dot::to_dot;
/// use akitree::format::parse_str;
///
/// let tree = parse_str(r#"{"bird"{"wings"}{"dog"}}"#).unwrap();
/// let dot = to_dot(&tree);
/// assert!(dot.contains("node2 [label=\"dog\"];"));
/// assert!(dot.contains("node0 -> node1;"));
/// ```
pub fn to_dot(tree: &DecisionTree) -> String {
    let mut out = String::with_capacity(HEADER.len() + tree.num_nodes() * 48 + tree.labels().len());
    out.push_str(HEADER);

    for node in tree.nodes() {
        out.push_str(&format!(
            "node{} [label=\"{}\"];\n",
            node.index,
            escape_dot_label(node.label)
        ));
    }

    for node in tree.nodes() {
        if let (Some(left), Some(right)) = (node.left, node.right) {
            out.push_str(YES_EDGE);
            out.push_str(&format!("node{} -> node{};\n", node.index, left));
            out.push_str(NO_EDGE);
            out.push_str(&format!("node{} -> node{};\n", node.index, right));
        }
    }

    out.push_str("}\n");
    out
}

/// Writes the DOT representation of `tree` to `path`.
///
/// # Errors
/// Returns an I/O error if the file cannot be created or written.
pub fn write_dot_file<P: AsRef<Path>>(tree: &DecisionTree, path: P) -> io::Result<()> {
    let path = path.as_ref();
    let mut writer = BufWriter::new(File::create(path)?);
    writer.write_all(to_dot(tree).as_bytes())?;
    writer.flush()?;
    tracing::info!(path = %path.display(), num_nodes = tree.num_nodes(), "Wrote DOT file");
    Ok(())
}

/// Escapes backslashes and double quotes for a DOT string.
fn escape_dot_label(label: &str) -> String {
    label.replace('\\', "\\\\").replace('"', "\\\"")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_dot_label() {
        assert_eq!(escape_dot_label("plain"), "plain");
        assert_eq!(escape_dot_label(r"back\slash"), r"back\\slash");
    }
}
