//! Bracket format parser and writer for decision trees.
//!
//! This module provides [`TreeParser`] to read persisted trees and
//! [`to_bracket_string`]/[`write_file`] to write them back.
//!
//! # Quick API
//! * [`read_file`] - reads a tree file; a missing file yields the default tree
//! * [`parse_str`] - parses a tree from a string
//! * [`write_file`] - writes a tree, replacing the target file
//!
//! # Format
//! * `tree ::= node`
//! * `node ::= '{' '"' label '"' [node node] '}'`
//!
//! Furthermore:
//! * The first child is reached by answering "yes", the second by "no"
//! * Whitespace can occur anywhere outside of labels
//! * Labels cannot contain `"`
//!
//! Example: `{"has wings"{"bird"}{"dog"}}`

pub(crate) mod defs;
mod parser;
mod writer;

pub use self::parser::TreeParser;
pub use self::writer::{FormatStyle, to_bracket_string, write_file};

use crate::model::DecisionTree;
use crate::parser::byte_source::InMemoryByteSource;
use crate::parser::{ByteParser, ParsingError};
use std::io::ErrorKind;
use std::path::Path;

// ============================================================================
// QUICK PARSING API (pub)
// ============================================================================
/// Reads a tree from the file at `path`.
///
/// If no file exists at `path`, the default one-node tree (labelled
/// [`DEFAULT_ROOT_LABEL`](crate::model::DEFAULT_ROOT_LABEL)) is returned;
/// nothing is written.
///
/// # Errors
/// Returns a [`ParsingError`] if the file exists but cannot be read or is
/// malformed.
///
/// # Example
/// ```no_run
/// use akitree::format::read_file;
///
/// let tree = read_file("characters.tree")?;
/// println!("Knows {} characters", tree.num_leaves());
/// # Ok::<(), akitree::parser::ParsingError>(())
/// ```
pub fn read_file<P: AsRef<Path>>(path: P) -> Result<DecisionTree, ParsingError> {
    let path = path.as_ref();
    let source = match InMemoryByteSource::from_file(path) {
        Ok(source) => source,
        Err(err) if err.kind() == ErrorKind::NotFound => {
            tracing::info!(path = %path.display(), "No tree file, starting with default tree");
            return Ok(DecisionTree::new_default());
        }
        Err(err) => return Err(err.into()),
    };

    let mut byte_parser = ByteParser::new(source);
    let tree = TreeParser::new().parse(&mut byte_parser)?;
    tracing::info!(
        path = %path.display(),
        num_nodes = tree.num_nodes(),
        num_characters = tree.num_leaves(),
        "Loaded tree"
    );
    Ok(tree)
}

/// Parses a tree from a string using default settings.
///
/// # Example
/// ```
/// use akitree::format::parse_str;
///
/// let tree = parse_str(r#"{"can fly"{"kea"}{"kakapo"}}"#).unwrap();
/// assert_eq!(tree.num_leaves(), 2);
/// ```
pub fn parse_str<S: AsRef<str>>(text: S) -> Result<DecisionTree, ParsingError> {
    let mut byte_parser = ByteParser::for_str(text.as_ref());
    TreeParser::new().parse(&mut byte_parser)
}
