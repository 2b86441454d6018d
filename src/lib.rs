//! Akitree is a guess-the-character game backed by a binary decision tree
//! that learns from its mistakes and persists itself to a plain-text file.
//!
//! Core functionality provided:
//! - Model: [DecisionTree] stores yes/no questions at internal nodes and
//!   characters at leaves, using the arena pattern (see [crate::model]).
//! - Queries: depth, lowest common ancestor, root-ward paths and the property
//!   difference of two characters.
//! - Teaching: a wrong guess splits the leaf into a new question with the old
//!   and the new character below it.
//! - Format: bracket format parser and writer, `{"question"{yes}{no}}`
//!   (see [crate::format]).
//! - Sessions: [GuessSession](session::GuessSession) is the guessing game as
//!   an I/O-free state machine; [Console](console::Console) wraps it in a
//!   line-oriented menu.
//! - DOT export for rendering a tree with Graphviz (see [crate::dot]).
//!
//! Limitations:
//! - Strictly binary trees; every internal node has exactly two children
//! - Labels cannot contain `"`
//! - Nodes are never removed
//!
//! # Example
//! ```
//! use akitree::{DecisionTree, parse_tree_str};
//!
//! let mut tree = parse_tree_str(r#"{"has wings"{"bird"}{"dog"}}"#).unwrap();
//! let dog = tree.find_leaf_by_label("dog").unwrap();
//! tree.teach(dog, "barks", "cat").unwrap();
//!
//! let comparison = tree.compare_labels("dog", "cat").unwrap();
//! assert_eq!(tree.properties_text(&comparison.common), "NOT has wings; ");
//! assert_eq!(tree.properties_text(&comparison.first_only), "barks; ");
//! assert_eq!(tree.properties_text(&comparison.second_only), "NOT barks; ");
//! ```

pub mod console;
pub mod dot;
pub mod format;
pub mod model;
pub mod parser;
pub mod session;

pub use crate::format::FormatStyle;
pub use crate::model::{DecisionTree, NodeIndex};
pub use crate::parser::ParsingError;

use std::io;
use std::path::Path;

// ============================================================================
// Quick API
// ============================================================================
/// Loads a tree from `path`, or the default tree if the file does not exist.
///
/// See [`format::read_file`] for full documentation.
pub fn load_tree_file<P: AsRef<Path>>(path: P) -> Result<DecisionTree, ParsingError> {
    format::read_file(path)
}

/// Parses a tree from a bracket format string.
///
/// See [`format::parse_str`] for full documentation.
pub fn parse_tree_str<S: AsRef<str>>(text: S) -> Result<DecisionTree, ParsingError> {
    format::parse_str(text)
}

/// Saves `tree` to `path` in compact style, replacing the file.
///
/// See [`format::write_file`] for full documentation.
pub fn save_tree_file<P: AsRef<Path>>(tree: &DecisionTree, path: P) -> io::Result<()> {
    format::write_file(tree, path, FormatStyle::Compact)
}
