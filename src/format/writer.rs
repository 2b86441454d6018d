//! Bracket format writing for decision trees.

use crate::format::defs::{BYTES_PER_NODE, CLOSE, INDENT, OPEN, QUOTE};
use crate::model::node::{NodeIndex, ROOT_INDEX};
use crate::model::tree::DecisionTree;
use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

/// Suffix of the scratch file written before it replaces the target
const TEMP_SUFFIX: &str = ".tmp";

/// Layout of the serialized tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormatStyle {
    /// Everything on one line, e.g. `{"bird"{"wings"}{"dog"}}`
    #[default]
    Compact,
    /// One node per line, children indented by two spaces
    Indented,
}

/// Which child a node on the writer stack emits next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NextChild {
    Yes,
    No,
    Done,
}

/// Returns the bracket representation of `tree`.
///
/// Walks the tree in pre-order with an explicit stack, so the depth of the
/// tree is not limited by the call stack. Parsing the result yields a tree
/// with the same topology and labels.
///
/// # Example
/// ```
/// use akitree::format::{FormatStyle, parse_str, to_bracket_string};
///
/// let tree = parse_str(r#" { "bird" { "wings" } { "dog" } } "#).unwrap();
/// assert_eq!(
///     to_bracket_string(&tree, FormatStyle::Compact),
///     r#"{"bird"{"wings"}{"dog"}}"#
/// );
/// ```
pub fn to_bracket_string(tree: &DecisionTree, style: FormatStyle) -> String {
    let mut out = String::with_capacity(estimate_len(tree, style));

    let mut stack: Vec<(NodeIndex, NextChild)> = Vec::new();
    open_node(&mut out, tree, ROOT_INDEX, 0, style);
    stack.push((ROOT_INDEX, NextChild::Yes));

    while let Some(&(index, next)) = stack.last() {
        let child = match (tree.node(index).children(), next) {
            (Some((left, _)), NextChild::Yes) => Some((left, NextChild::No)),
            (Some((_, right)), NextChild::No) => Some((right, NextChild::Done)),
            _ => None,
        };

        match child {
            Some((child, after)) => {
                if let Some(top) = stack.last_mut() {
                    top.1 = after;
                }
                open_node(&mut out, tree, child, stack.len(), style);
                stack.push((child, NextChild::Yes));
            }
            None => {
                stack.pop();
                close_node(&mut out, tree, index, stack.len(), style);
            }
        }
    }

    out
}

/// Writes `tree` to a file, replacing any previous content.
///
/// The tree is first written to `<path>.tmp`, which is then renamed over
/// `path`, so an interrupted write leaves the previous file intact.
///
/// # Errors
/// Returns an I/O error if writing or renaming fails; the scratch file is
/// removed in that case.
pub fn write_file<P: AsRef<Path>>(tree: &DecisionTree, path: P, style: FormatStyle) -> io::Result<()> {
    let path = path.as_ref();
    let temp_path = temp_path_for(path);
    let text = to_bracket_string(tree, style);

    let result = write_all(&temp_path, text.as_bytes()).and_then(|()| fs::rename(&temp_path, path));
    match &result {
        Ok(()) => tracing::info!(path = %path.display(), bytes = text.len(), "Saved tree"),
        Err(err) => {
            tracing::warn!(path = %path.display(), error = %err, "Saving tree failed");
            let _ = fs::remove_file(&temp_path);
        }
    }
    result
}

fn write_all(path: &Path, bytes: &[u8]) -> io::Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    writer.write_all(bytes)?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    Ok(())
}

fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(TEMP_SUFFIX);
    PathBuf::from(name)
}

fn open_node(out: &mut String, tree: &DecisionTree, index: NodeIndex, depth: usize, style: FormatStyle) {
    if style == FormatStyle::Indented && depth > 0 {
        out.push('\n');
        push_indent(out, depth);
    }
    out.push(OPEN as char);
    out.push(QUOTE as char);
    out.push_str(tree.label(index));
    out.push(QUOTE as char);
}

fn close_node(out: &mut String, tree: &DecisionTree, index: NodeIndex, depth: usize, style: FormatStyle) {
    if style == FormatStyle::Indented && tree.node(index).is_internal() {
        out.push('\n');
        push_indent(out, depth);
    }
    out.push(CLOSE as char);
}

fn push_indent(out: &mut String, depth: usize) {
    for _ in 0..depth {
        out.push_str(INDENT);
    }
}

/// Estimates the length of the serialized tree, to pre-allocate the output.
fn estimate_len(tree: &DecisionTree, style: FormatStyle) -> usize {
    let structure = tree.num_nodes() * BYTES_PER_NODE;
    let layout = match style {
        FormatStyle::Compact => 0,
        // Newline plus a guessed average indent per opening and closing line
        FormatStyle::Indented => (tree.num_nodes() + tree.num_internal()) * (1 + 4 * INDENT.len()),
    };
    structure + layout + tree.labels().len()
}

impl DecisionTree {
    /// Convenience method to convert this tree to its bracket representation.
    pub fn to_bracket_string(&self, style: FormatStyle) -> String {
        to_bracket_string(self, style)
    }
}
