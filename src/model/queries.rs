//! Ancestor queries and property-path diffing on a [DecisionTree].
//!
//! All queries walk parent links, so they cost `O(height)` unless noted.
//! Out-of-range indices are programming errors and panic.

use crate::model::node::{NodeIndex, ROOT_INDEX};
use crate::model::tree::DecisionTree;
use thiserror::Error;

// =#========================================================================#=
// PATH STEP & COMPARISON
// =#========================================================================#=
/// One answered question on the way from a node up to one of its ancestors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PathStep {
    /// Index of the internal node holding the question
    pub question: NodeIndex,
    /// `true` if the path leaves the question through its "yes" edge
    pub answer: bool,
}

/// Property diff of two nodes, as produced by [`DecisionTree::compare`].
///
/// Every list is ordered innermost first, like [`DecisionTree::collect_path`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comparison {
    /// Lowest common ancestor of both nodes
    pub lca: NodeIndex,
    /// Answers shared by both nodes (root down to the LCA)
    pub common: Vec<PathStep>,
    /// Answers only the first node has (LCA down to the first node)
    pub first_only: Vec<PathStep>,
    /// Answers only the second node has (LCA down to the second node)
    pub second_only: Vec<PathStep>,
}

/// Failure to resolve a character name to a leaf.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
    #[error("there is no character named \"{0}\"")]
    UnknownCharacter(String),
}

// ============================================================================
// Queries (pub)
// ============================================================================
impl DecisionTree {
    /// Returns the number of parent links between `index` and the root.
    ///
    /// # Panics
    /// Panics if `index` is out of bounds.
    pub fn depth(&self, index: NodeIndex) -> usize {
        self.assert_in_range(index);
        let mut depth = 0;
        let mut current = index;
        while let Some(parent) = self.node(current).parent() {
            current = parent;
            depth += 1;
        }
        depth
    }

    /// Returns `true` if the node at `index` has no children.
    ///
    /// # Panics
    /// Panics if `index` is out of bounds.
    pub fn is_leaf(&self, index: NodeIndex) -> bool {
        self.node(index).is_leaf()
    }

    /// Returns the first leaf whose label equals `text` exactly,
    /// scanning all nodes in index order.
    pub fn find_leaf_by_label(&self, text: &str) -> Option<NodeIndex> {
        self.nodes()
            .find(|view| view.is_leaf && view.label == text)
            .map(|view| view.index)
    }

    /// Returns whether `ancestor` lies on the parent chain of `index`
    /// (a node counts as its own ancestor).
    ///
    /// # Panics
    /// Panics if either index is out of bounds.
    pub fn is_ancestor(&self, ancestor: NodeIndex, index: NodeIndex) -> bool {
        self.assert_in_range(ancestor);
        self.assert_in_range(index);
        let mut current = Some(index);
        while let Some(node) = current {
            if node == ancestor {
                return true;
            }
            current = self.node(node).parent();
        }
        false
    }

    /// Returns the deepest node that is an ancestor of both `a` and `b`.
    ///
    /// The deeper node is first lifted to the depth of the other, then both
    /// climb in lockstep until they meet.
    ///
    /// # Panics
    /// Panics if either index is out of bounds.
    pub fn lowest_common_ancestor(&self, a: NodeIndex, b: NodeIndex) -> NodeIndex {
        let depth_a = self.depth(a);
        let depth_b = self.depth(b);

        let (mut deep, mut shallow, diff) = if depth_a >= depth_b {
            (a, b, depth_a - depth_b)
        } else {
            (b, a, depth_b - depth_a)
        };

        for _ in 0..diff {
            deep = self.parent_of(deep);
        }

        while deep != shallow {
            deep = self.parent_of(deep);
            shallow = self.parent_of(shallow);
        }

        deep
    }

    /// Collects the answers on the way from `from` up to, but excluding, `to`.
    ///
    /// Each step names the question node passed and whether `from` lies in
    /// its "yes" subtree. Steps are ordered innermost first; the result is
    /// empty if `from == to` and has `depth(from) - depth(to)` entries
    /// otherwise.
    ///
    /// # Panics
    /// Panics if an index is out of bounds or `to` is not an ancestor of `from`.
    pub fn collect_path(&self, from: NodeIndex, to: NodeIndex) -> Vec<PathStep> {
        self.assert_in_range(from);
        self.assert_in_range(to);

        let mut steps = Vec::new();
        let mut current = from;
        while current != to {
            let Some(question) = self.node(current).parent() else {
                panic!("Node {to} is not an ancestor of node {from}");
            };
            steps.push(PathStep {
                question,
                answer: self.node(question).left() == Some(current),
            });
            current = question;
        }

        steps
    }

    /// Splits the properties of two nodes into shared and unique answers.
    ///
    /// # Panics
    /// Panics if either index is out of bounds.
    pub fn compare(&self, first: NodeIndex, second: NodeIndex) -> Comparison {
        let lca = self.lowest_common_ancestor(first, second);
        Comparison {
            lca,
            common: self.collect_path(lca, ROOT_INDEX),
            first_only: self.collect_path(first, lca),
            second_only: self.collect_path(second, lca),
        }
    }

    /// Looks up two characters by name and compares them.
    ///
    /// # Errors
    /// Returns [LookupError::UnknownCharacter] for the first name without a
    /// matching leaf.
    pub fn compare_labels(&self, first: &str, second: &str) -> Result<Comparison, LookupError> {
        let first = self.lookup_leaf(first)?;
        let second = self.lookup_leaf(second)?;
        Ok(self.compare(first, second))
    }

    /// Like [`find_leaf_by_label`](Self::find_leaf_by_label), with a typed miss.
    pub fn lookup_leaf(&self, text: &str) -> Result<NodeIndex, LookupError> {
        self.find_leaf_by_label(text)
            .ok_or_else(|| LookupError::UnknownCharacter(text.to_string()))
    }

    /// Renders one step as a property, e.g. `has fur` or `NOT has fur`.
    ///
    /// A trailing `?` of the question is dropped.
    pub fn property_text(&self, step: PathStep) -> String {
        let question = self.label(step.question);
        let property = question.strip_suffix('?').unwrap_or(question).trim_end();
        if step.answer {
            property.to_string()
        } else {
            format!("NOT {property}")
        }
    }

    /// Renders steps outermost first, each followed by `"; "`.
    pub fn properties_text(&self, steps: &[PathStep]) -> String {
        let mut text = String::new();
        for step in steps.iter().rev() {
            text.push_str(&self.property_text(*step));
            text.push_str("; ");
        }
        text
    }
}

// ============================================================================
// Helpers (private)
// ============================================================================
impl DecisionTree {
    fn assert_in_range(&self, index: NodeIndex) {
        assert!(
            self.contains(index),
            "Node index {index} out of range for tree with {} nodes",
            self.num_nodes()
        );
    }

    /// Parent of a non-root node. Callers only climb to depths known to exist.
    fn parent_of(&self, index: NodeIndex) -> NodeIndex {
        match self.node(index).parent() {
            Some(parent) => parent,
            None => panic!("Node {index} has no parent"),
        }
    }
}
