//! Constants of the bracket tree format.

/// Opens a node group
pub(crate) const OPEN: u8 = b'{';

/// Closes a node group
pub(crate) const CLOSE: u8 = b'}';

/// Encloses a label
pub(crate) const QUOTE: u8 = b'"';

/// Indentation per depth level of [FormatStyle::Indented](super::FormatStyle::Indented)
pub(crate) const INDENT: &str = "  ";

/// Extra bytes per node in output length estimate: `{`, `}` and two quotes
pub(crate) const BYTES_PER_NODE: usize = 4;
