//! Provides the decision tree store.
//!
//! * [DecisionTree] - nodes in an arena plus a shared [LabelArena]
//! * [NodeView] - read-only snapshot of one node for renderers
//! * [PreOrderIter] - non-recursive traversal, yes-branch first

use crate::model::label_arena::{Label, LabelArena};
use crate::model::node::{Node, NodeIndex, ROOT_INDEX};

/// Label of the single node of a tree that was never taught anything.
pub const DEFAULT_ROOT_LABEL: &str = "unknown";

/// Guess for the number of nodes when nothing is known about the tree.
const DEFAULT_NODE_CAPACITY: usize = 16;

/// Guess for the label bytes when nothing is known about the tree.
const DEFAULT_LABEL_CAPACITY: usize = 128;

// =$========================================================================$=
// TREE
// =$========================================================================$=
/// A binary decision tree represented using the arena pattern on [Node].
///
/// Nodes are stored in a contiguous vector and referenced by [NodeIndex].
/// All label text lives in one [LabelArena] owned by the tree; nodes only
/// keep [Label] spans into it.
///
/// # Structure
/// - Index `0` is the root, always.
/// - Every internal node has exactly two children, left = "yes", right = "no".
/// - Leaves name characters, internal nodes carry questions.
/// - Nodes are only ever appended, never removed.
///
/// # Construction
/// Trees come from [format](crate::format) parsing or from
/// [`DecisionTree::new_default()`], and grow through
/// [`teach`](DecisionTree::teach).
#[derive(Debug, Clone)]
pub struct DecisionTree {
    /// Nodes of this tree (arena pattern)
    nodes: Vec<Node>,

    /// Text of all labels
    labels: LabelArena,
}

// ============================================================================
// New, Getters / Accessors, etc. (pub)
// ============================================================================
impl DecisionTree {
    /// Creates the one-node tree whose only leaf is labelled
    /// [DEFAULT_ROOT_LABEL].
    pub fn new_default() -> Self {
        Self::with_root_label(DEFAULT_ROOT_LABEL)
    }

    /// Creates a one-node tree whose only leaf is labelled `text`.
    pub fn with_root_label(text: &str) -> Self {
        let label_bytes = DEFAULT_LABEL_CAPACITY.max(text.len());
        let mut tree = Self::with_capacity(DEFAULT_NODE_CAPACITY, label_bytes);
        let label = tree.labels.append(text);
        tree.nodes.push(Node::new_leaf(label, None));
        tree
    }

    /// Creates an empty tree with pre-allocated storage; the first node pushed
    /// becomes the root.
    pub(crate) fn with_capacity(num_nodes: usize, label_bytes: usize) -> Self {
        DecisionTree {
            nodes: Vec::with_capacity(num_nodes),
            labels: LabelArena::with_capacity(label_bytes),
        }
    }

    /// Appends a node and returns its index.
    pub(crate) fn push_node(&mut self, node: Node) -> NodeIndex {
        let index = self.nodes.len();
        self.nodes.push(node);
        index
    }

    /// Appends label text to the arena.
    pub(crate) fn append_label(&mut self, text: &str) -> Label {
        self.labels.append(text)
    }

    pub(crate) fn node_mut(&mut self, index: NodeIndex) -> &mut Node {
        &mut self.nodes[index]
    }

    /// Returns the index of the root, which is always `0`.
    pub fn root_index(&self) -> NodeIndex {
        ROOT_INDEX
    }

    /// Returns a reference to the root node.
    pub fn root(&self) -> &Node {
        &self.nodes[ROOT_INDEX]
    }

    /// Returns a reference to the node at the given index.
    ///
    /// # Panics
    /// Panics if `index` is out of bounds.
    pub fn node(&self, index: NodeIndex) -> &Node {
        &self.nodes[index]
    }

    /// Returns the node at the given index, or `None` if out of bounds.
    pub fn get(&self, index: NodeIndex) -> Option<&Node> {
        self.nodes.get(index)
    }

    /// Returns the label text of the node at the given index.
    ///
    /// # Panics
    /// Panics if `index` is out of bounds.
    pub fn label(&self, index: NodeIndex) -> &str {
        self.labels.resolve(self.nodes[index].label())
    }

    /// Returns the arena holding all label text.
    pub fn labels(&self) -> &LabelArena {
        &self.labels
    }

    /// Returns whether `index` refers to a node of this tree.
    pub fn contains(&self, index: NodeIndex) -> bool {
        index < self.nodes.len()
    }

    /// Returns the number of nodes in this tree.
    pub fn num_nodes(&self) -> usize {
        self.nodes.len()
    }

    /// Returns the number of leaves (characters) in this tree.
    pub fn num_leaves(&self) -> usize {
        self.nodes.iter().filter(|n| n.is_leaf()).count()
    }

    /// Returns the number of internal nodes (questions) in this tree.
    pub fn num_internal(&self) -> usize {
        self.nodes.iter().filter(|n| n.is_internal()).count()
    }

    /// Validates the tree structure and all index references.
    ///
    /// Checks:
    /// - Tree is non-empty and the root sits at index `0` without parent
    /// - Every other node has a parent that holds it in exactly one child slot
    /// - All child indices are in bounds and point back to their parent
    /// - Every node is reachable from the root exactly once (no cycles)
    /// - All labels lie within the arena
    ///
    /// # Returns
    /// `true` if tree is valid, `false` otherwise
    pub fn is_valid(&self) -> bool {
        let num_nodes = self.nodes.len();
        if num_nodes == 0 || !self.root().is_root() {
            return false;
        }

        for (index, node) in self.nodes.iter().enumerate() {
            if !self.labels.contains(node.label()) {
                return false;
            }

            if let Some((left, right)) = node.children() {
                if left >= num_nodes || right >= num_nodes || left == right {
                    return false;
                }
                if left == ROOT_INDEX || right == ROOT_INDEX {
                    return false;
                }
                if self.nodes[left].parent() != Some(index)
                    || self.nodes[right].parent() != Some(index)
                {
                    return false;
                }
            }

            if index != ROOT_INDEX {
                match node.parent() {
                    None => return false,
                    Some(parent) if parent >= num_nodes => return false,
                    Some(parent) => match self.nodes[parent].children() {
                        Some((left, right)) if left == index || right == index => {}
                        _ => return false,
                    },
                }
            }
        }

        // Reachability, guarding against cycles
        let mut seen = vec![false; num_nodes];
        let mut stack = vec![ROOT_INDEX];
        let mut reached = 0;
        while let Some(index) = stack.pop() {
            if seen[index] {
                return false;
            }
            seen[index] = true;
            reached += 1;
            if let Some((left, right)) = self.nodes[index].children() {
                stack.push(right);
                stack.push(left);
            }
        }

        reached == num_nodes
    }
}

impl Default for DecisionTree {
    fn default() -> Self {
        Self::new_default()
    }
}

impl std::ops::Index<NodeIndex> for DecisionTree {
    type Output = Node;

    fn index(&self, index: NodeIndex) -> &Self::Output {
        &self.nodes[index]
    }
}

// =$========================================================================$=
// ITERATORS
// =$========================================================================$=
/// Read-only view of one node, as handed to renderers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeView<'a> {
    /// Index of the node
    pub index: NodeIndex,
    /// Resolved label text
    pub label: &'a str,
    /// "Yes" child, if any
    pub left: Option<NodeIndex>,
    /// "No" child, if any
    pub right: Option<NodeIndex>,
    /// Whether the node has no children
    pub is_leaf: bool,
}

impl DecisionTree {
    /// Returns an iterator over all nodes in index order.
    ///
    /// # Example
    /// ```
    /// use akitree::format::parse_str;
    ///
    /// let tree = parse_str(r#"{"can fly"{"kea"}{"kakapo"}}"#).unwrap();
    /// let leaves: Vec<_> = tree.nodes().filter(|n| n.is_leaf).map(|n| n.label).collect();
    /// assert_eq!(leaves, ["kea", "kakapo"]);
    /// ```
    pub fn nodes(&self) -> impl Iterator<Item = NodeView<'_>> + '_ {
        (0..self.nodes.len()).map(move |index| self.view(index))
    }

    /// Returns a [NodeView] of the node at the given index.
    ///
    /// # Panics
    /// Panics if `index` is out of bounds.
    pub fn view(&self, index: NodeIndex) -> NodeView<'_> {
        let node = &self.nodes[index];
        NodeView {
            index,
            label: self.labels.resolve(node.label()),
            left: node.left(),
            right: node.right(),
            is_leaf: node.is_leaf(),
        }
    }

    /// Returns an iterator over the tree in pre-order (parents before
    /// children, yes-branch before no-branch).
    pub fn pre_order_iter(&self) -> PreOrderIter<'_> {
        PreOrderIter::new(self)
    }
}

/// Iterator for pre-order traversal (parents before children).
///
/// This iterator uses a stack-based approach to traverse the tree without recursion.
pub struct PreOrderIter<'a> {
    tree: &'a DecisionTree,
    stack: Vec<NodeIndex>,
}

impl<'a> PreOrderIter<'a> {
    fn new(tree: &'a DecisionTree) -> Self {
        let mut stack = Vec::new();
        if !tree.nodes.is_empty() {
            stack.push(ROOT_INDEX);
        }
        PreOrderIter { tree, stack }
    }
}

impl Iterator for PreOrderIter<'_> {
    type Item = NodeIndex;

    fn next(&mut self) -> Option<Self::Item> {
        let index = self.stack.pop()?;

        // Push children onto stack (right first, so left is processed first)
        if let Some((left, right)) = self.tree.nodes[index].children() {
            self.stack.push(right);
            self.stack.push(left);
        }

        Some(index)
    }
}
