//! Node module for the decision tree representation.

use crate::model::label_arena::Label;

/// Index of a node in a tree (arena).
pub type NodeIndex = usize;

/// Index of the root node; never used for anything else.
pub const ROOT_INDEX: NodeIndex = 0;

// =#========================================================================#=
// NODE
// =#========================================================================#=
/// Represents a node of a decision tree.
///
/// A node is either
/// - a **leaf**: no children, its label names a character, or
/// - an **internal node**: exactly two children, its label is a question.
///
/// # Invariants
/// - `children` is either `None` or both children; a node never has one child.
/// - The left child is the "yes" answer, the right child the "no" answer.
/// - Only the root has no `parent`.
/// - Absent links are `None`, never a sentinel index, since index `0` is
///   the root.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Node {
    /// Span of this node's text in the tree's label arena
    label: Label,
    /// Index of the parent node, `None` for the root
    parent: Option<NodeIndex>,
    /// Indices of the (yes, no) children, `None` for a leaf
    children: Option<(NodeIndex, NodeIndex)>,
}

impl Node {
    /// Creates a new leaf.
    ///
    /// # Arguments
    /// * `label` - Span of the character name
    /// * `parent` - Index of the parent, `None` for a root
    pub fn new_leaf(label: Label, parent: Option<NodeIndex>) -> Self {
        Node {
            label,
            parent,
            children: None,
        }
    }

    /// Creates a new internal node.
    ///
    /// # Arguments
    /// * `label` - Span of the question
    /// * `parent` - Index of the parent, `None` for a root
    /// * `children` - Indices of the (yes, no) children
    pub fn new_internal(
        label: Label,
        parent: Option<NodeIndex>,
        children: (NodeIndex, NodeIndex),
    ) -> Self {
        Node {
            label,
            parent,
            children: Some(children),
        }
    }

    /// Returns the label span of this node.
    pub fn label(&self) -> Label {
        self.label
    }

    /// Returns the index of the parent, or `None` for the root.
    pub fn parent(&self) -> Option<NodeIndex> {
        self.parent
    }

    /// Returns the (yes, no) children, or `None` for a leaf.
    pub fn children(&self) -> Option<(NodeIndex, NodeIndex)> {
        self.children
    }

    /// Returns the "yes" child, if any.
    pub fn left(&self) -> Option<NodeIndex> {
        self.children.map(|(left, _)| left)
    }

    /// Returns the "no" child, if any.
    pub fn right(&self) -> Option<NodeIndex> {
        self.children.map(|(_, right)| right)
    }

    /// Returns `true` if this node has no children.
    pub fn is_leaf(&self) -> bool {
        self.children.is_none()
    }

    /// Returns `true` if this node has two children.
    pub fn is_internal(&self) -> bool {
        self.children.is_some()
    }

    /// Returns `true` if this node has no parent.
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    pub(crate) fn set_label(&mut self, label: Label) {
        self.label = label;
    }

    pub(crate) fn set_parent(&mut self, parent: Option<NodeIndex>) {
        self.parent = parent;
    }

    pub(crate) fn set_children(&mut self, children: Option<(NodeIndex, NodeIndex)>) {
        self.children = children;
    }

    /// Replaces `old` by `new` in whichever child slot holds `old`.
    ///
    /// # Panics
    /// Panics if `old` is not a child of this node.
    pub(crate) fn replace_child(&mut self, old: NodeIndex, new: NodeIndex) {
        match &mut self.children {
            Some((left, _)) if *left == old => *left = new,
            Some((_, right)) if *right == old => *right = new,
            _ => panic!("Node {old} is not a child of this node"),
        }
    }
}
