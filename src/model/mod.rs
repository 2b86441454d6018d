//! Data model of the guessing game's decision tree.
//!
//! # Tree representation
//! Trees are represented by [DecisionTree], which uses the arena pattern to
//! store [Node]s, referenced by [NodeIndex]. Index `0` is always the root.
//! Absent parents and children are `None`, never a sentinel index.
//!
//! | Node kind | Children | Label |
//! |-----------|----------|-------|
//! | Leaf | none | character name |
//! | Internal | (yes, no) | yes/no question |
//!
//! # Label handling
//! All label text is appended to one [LabelArena] per tree. Nodes hold
//! [Label] spans (offset + length) into it, so labels stay valid however
//! much the arena grows.
//!
//! # Operations
//! - [queries]: depth, lowest common ancestor, path collection, property diff
//! - [teach]: split a leaf into a question with two leaves

pub mod label_arena;
pub mod node;
pub mod queries;
pub mod teach;
pub mod tree;

pub use label_arena::{Label, LabelArena};
pub use node::{Node, NodeIndex, ROOT_INDEX};
pub use queries::{Comparison, LookupError, PathStep};
pub use teach::{TeachError, TeachOutcome};
pub use tree::{DEFAULT_ROOT_LABEL, DecisionTree, NodeView, PreOrderIter};
