//! Teaching the tree a new character.
//!
//! A wrong guess at a leaf is fixed by splitting that leaf: a new question
//! node takes the leaf's place, the old leaf becomes its "yes" child and a
//! new leaf with the missing character becomes its "no" child.
//!
//! ```text
//!        parent                 parent
//!          |                      |
//!         dog        ==>      "has fur?"
//!                             /        \
//!                           dog        cat
//! ```

use crate::format::defs::QUOTE;
use crate::model::node::{Node, NodeIndex, ROOT_INDEX};
use crate::model::tree::DecisionTree;
use thiserror::Error;

/// Rejected input for [`DecisionTree::teach`]; the tree is left unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TeachError {
    #[error("the distinguishing question must not be empty")]
    EmptyQuestion,
    #[error("the character name must not be empty")]
    EmptyLabel,
    #[error("text must not contain a double quote: {0}")]
    QuoteInText(String),
}

/// Where the nodes involved in a [`teach`](DecisionTree::teach) ended up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TeachOutcome {
    /// The new question node, in the former slot of the taught leaf
    pub question: NodeIndex,
    /// The taught leaf, now the "yes" child of `question`
    pub yes_leaf: NodeIndex,
    /// The new character, the "no" child of `question`
    pub no_leaf: NodeIndex,
}

impl DecisionTree {
    /// Splits `leaf` into a question with two leaves.
    ///
    /// The new internal node carries `question` and takes over the tree slot
    /// of `leaf`. The old leaf keeps its label and becomes the "yes" child; a
    /// fresh leaf labelled `new_label` becomes the "no" child. Exactly two
    /// nodes are appended, and apart from `leaf` and its former parent no
    /// existing node is touched.
    ///
    /// Since index `0` always holds the root, teaching the root leaf moves the
    /// old leaf to a new index and puts the question at `0`. The returned
    /// [TeachOutcome] reports the final indices in both cases.
    ///
    /// Both texts are trimmed before they are stored.
    ///
    /// # Errors
    /// Returns a [TeachError] if either text is empty or contains `"`, which
    /// the file format cannot hold.
    ///
    /// # Panics
    /// Panics if `leaf` is out of bounds or not a leaf.
    ///
    /// # Example
    /// ```
    /// use akitree::format::parse_str;
    ///
    /// let mut tree = parse_str(r#"{"bird"{"wings"}{"dog"}}"#).unwrap();
    /// let dog = tree.find_leaf_by_label("dog").unwrap();
    /// let outcome = tree.teach(dog, "has fur?", "cat").unwrap();
    ///
    /// assert_eq!(tree.num_nodes(), 5);
    /// assert_eq!(outcome.yes_leaf, dog);
    /// assert_eq!(tree.find_leaf_by_label("cat"), Some(outcome.no_leaf));
    /// ```
    pub fn teach(
        &mut self,
        leaf: NodeIndex,
        question: &str,
        new_label: &str,
    ) -> Result<TeachOutcome, TeachError> {
        assert!(
            self.contains(leaf),
            "Node index {leaf} out of range for tree with {} nodes",
            self.num_nodes()
        );
        assert!(self.is_leaf(leaf), "Cannot teach at internal node {leaf}");

        let question = validate_text(question, TeachError::EmptyQuestion)?;
        let new_label = validate_text(new_label, TeachError::EmptyLabel)?;

        let question_label = self.append_label(question);
        let new_leaf_label = self.append_label(new_label);

        let outcome = match self.node(leaf).parent() {
            Some(parent) => {
                let question_index = self.num_nodes();
                let no_leaf = question_index + 1;
                self.push_node(Node::new_internal(
                    question_label,
                    Some(parent),
                    (leaf, no_leaf),
                ));
                self.push_node(Node::new_leaf(new_leaf_label, Some(question_index)));
                self.node_mut(parent).replace_child(leaf, question_index);
                self.node_mut(leaf).set_parent(Some(question_index));

                TeachOutcome {
                    question: question_index,
                    yes_leaf: leaf,
                    no_leaf,
                }
            }
            None => {
                // Root leaf: relocate it, the question stays at index 0
                let old_root_label = self.node(ROOT_INDEX).label();
                let yes_leaf = self.push_node(Node::new_leaf(old_root_label, Some(ROOT_INDEX)));
                let no_leaf = self.push_node(Node::new_leaf(new_leaf_label, Some(ROOT_INDEX)));
                let root = self.node_mut(ROOT_INDEX);
                root.set_label(question_label);
                root.set_children(Some((yes_leaf, no_leaf)));

                TeachOutcome {
                    question: ROOT_INDEX,
                    yes_leaf,
                    no_leaf,
                }
            }
        };

        tracing::info!(
            question = outcome.question,
            yes_leaf = outcome.yes_leaf,
            no_leaf = outcome.no_leaf,
            num_nodes = self.num_nodes(),
            "Taught new character"
        );

        Ok(outcome)
    }
}

/// Trims `text` and checks it can be stored as a label.
pub(crate) fn validate_text(text: &str, empty: TeachError) -> Result<&str, TeachError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(empty);
    }
    if text.bytes().any(|b| b == QUOTE) {
        return Err(TeachError::QuoteInText(text.to_string()));
    }
    Ok(text)
}
