//! Stack-based parser for the bracket tree format.

use crate::format::defs::{CLOSE, OPEN, QUOTE};
use crate::model::label_arena::Label;
use crate::model::node::{Node, NodeIndex};
use crate::model::tree::DecisionTree;
use crate::parser::byte_parser::ByteParser;
use crate::parser::byte_source::ByteSource;
use crate::parser::parsing_error::{ParsingError, ParsingErrorType};

// =#========================================================================#=
// TREE PARSER
// =#========================================================================$=
/// Parser for persisted decision trees.
///
/// Reads the whole tree in one left-to-right scan with an explicit stack of
/// open nodes, so deep trees cannot overflow the call stack.
///
/// # Format
/// * `tree ::= node`
/// * `node ::= '{' label [node node] '}'`
/// * `label ::= '"' <any bytes but '"'> '"'`
///
/// The first child group is the "yes" answer, the second the "no" answer.
/// Whitespace outside of labels is ignored.
///
/// # Errors
/// Parsing fails without producing a partial tree on
/// * an odd number of quote characters,
/// * a `}` without open node, or the input ending while a node is open,
/// * a node without label, with two labels, or with one or three children,
/// * any other byte outside of labels, or content after the root.
///
/// Input consisting only of whitespace yields the default one-node tree.
///
/// # Example
/// ```
/// use akitree::format::TreeParser;
/// use akitree::parser::ByteParser;
///
/// let mut byte_parser = ByteParser::for_str(r#"{"bird"{"wings"}{"dog"}}"#);
/// let tree = TreeParser::new().parse(&mut byte_parser).unwrap();
/// assert_eq!(tree.num_nodes(), 3);
/// assert_eq!(tree.label(0), "bird");
/// ```
#[derive(Debug, Default)]
pub struct TreeParser {
    /// Maximum nesting depth seen by the last parse
    max_depth: usize,
}

/// An open node on the parse stack.
#[derive(Debug)]
struct Frame {
    index: NodeIndex,
    /// Set as soon as the first child group opens
    left: Option<NodeIndex>,
    right: Option<NodeIndex>,
}

impl Frame {
    fn new(index: NodeIndex) -> Self {
        Frame {
            index,
            left: None,
            right: None,
        }
    }
}

impl TreeParser {
    /// Creates a new parser.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the maximum nesting depth of the last parsed tree.
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Parses a complete tree from the given [ByteParser].
    ///
    /// # Returns
    /// * `Ok(DecisionTree)` - The parsed tree, root at index `0`
    /// * `Err(ParsingError)` - If the input is malformed
    pub fn parse<S: ByteSource>(
        &mut self,
        parser: &mut ByteParser<S>,
    ) -> Result<DecisionTree, ParsingError> {
        self.max_depth = 0;

        // Pre-scan: quote balance and capacity estimate
        let num_quotes = parser.count_remaining(QUOTE);
        if num_quotes % 2 != 0 {
            return Err(ParsingError::without_context(ParsingErrorType::OddQuoteCount));
        }

        if parser.only_whitespace_remains() {
            tracing::debug!("Empty tree input, using default tree");
            return Ok(DecisionTree::new_default());
        }

        parser.skip_whitespace();
        let mut tree = DecisionTree::with_capacity(num_quotes / 2, parser.remaining_len());
        let mut stack: Vec<Frame> = Vec::with_capacity(num_quotes / 4 + 1);

        if !parser.consume_if(OPEN) {
            return Err(unexpected_byte(parser));
        }
        let root = Self::open_node(parser, &mut tree, None)?;
        stack.push(Frame::new(root));

        while let Some(top) = stack.last_mut() {
            parser.skip_whitespace();
            match parser.next_byte() {
                None => return Err(ParsingError::unexpected_eof(parser)),
                Some(OPEN) => {
                    let parent = top.index;
                    let child = tree.num_nodes();
                    if top.left.is_none() {
                        top.left = Some(child);
                    } else if top.right.is_none() {
                        top.right = Some(child);
                    } else {
                        return Err(ParsingError::invalid_tree_structure(
                            parser,
                            format!("node {parent} has more than two children"),
                        ));
                    }
                    Self::open_node(parser, &mut tree, Some(parent))?;
                    stack.push(Frame::new(child));
                    self.max_depth = self.max_depth.max(stack.len() - 1);
                }
                Some(CLOSE) => {
                    let frame = top;
                    match (frame.left, frame.right) {
                        (None, None) => {}
                        (Some(left), Some(right)) => {
                            tree.node_mut(frame.index).set_children(Some((left, right)));
                        }
                        _ => {
                            return Err(ParsingError::invalid_tree_structure(
                                parser,
                                format!("node {} has a single child", frame.index),
                            ));
                        }
                    }
                    stack.pop();
                }
                Some(QUOTE) => {
                    return Err(ParsingError::from_parser(
                        ParsingErrorType::DuplicateLabel,
                        parser,
                    ));
                }
                Some(b) => {
                    return Err(ParsingError::from_parser(
                        ParsingErrorType::UnexpectedByte(b as char),
                        parser,
                    ));
                }
            }
        }

        parser.skip_whitespace();
        match parser.peek() {
            None => {}
            Some(CLOSE) => return Err(ParsingError::unbalanced_brackets(parser)),
            Some(_) => {
                return Err(ParsingError::from_parser(
                    ParsingErrorType::TrailingContent,
                    parser,
                ));
            }
        }

        tracing::debug!(
            num_nodes = tree.num_nodes(),
            max_depth = self.max_depth,
            label_bytes = tree.labels().len(),
            "Parsed tree"
        );

        Ok(tree)
    }

    /// Allocates a node right after its `{` and reads its label.
    fn open_node<S: ByteSource>(
        parser: &mut ByteParser<S>,
        tree: &mut DecisionTree,
        parent: Option<NodeIndex>,
    ) -> Result<NodeIndex, ParsingError> {
        let index = tree.push_node(Node::new_leaf(Label::default(), parent));

        parser.skip_whitespace();
        match parser.peek() {
            Some(QUOTE) => {}
            Some(CLOSE) | Some(OPEN) => {
                return Err(ParsingError::from_parser(ParsingErrorType::ExpectedLabel, parser));
            }
            None => return Err(ParsingError::unexpected_eof(parser)),
            Some(_) => return Err(unexpected_byte(parser)),
        }
        let text = parser.parse_quoted_label()?;
        let label = tree.append_label(&text);
        tree.node_mut(index).set_label(label);

        Ok(index)
    }
}

fn unexpected_byte<S: ByteSource>(parser: &ByteParser<S>) -> ParsingError {
    match parser.peek() {
        Some(b) => ParsingError::from_parser(ParsingErrorType::UnexpectedByte(b as char), parser),
        None => ParsingError::unexpected_eof(parser),
    }
}
