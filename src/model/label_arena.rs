//! Append-only text storage for node labels.
//!
//! - [LabelArena]: single growable buffer holding the text of every label.
//! - [Label]: `(offset, length)` span into a [LabelArena].

use std::fmt;

// =#========================================================================#=
// LABEL
// =#========================================================================#=
/// Half-open byte range `[offset, offset + len)` into a [LabelArena].
///
/// A label never stores a reference into the buffer, only its position, so
/// it stays valid when the arena grows and reallocates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Label {
    offset: usize,
    len: usize,
}

impl Label {
    /// Start of the span in the arena.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Length of the span in bytes.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the span covers no bytes.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// One past the last byte of the span.
    pub fn end(&self) -> usize {
        self.offset + self.len
    }
}

// =#========================================================================#=
// LABEL ARENA
// =#========================================================================#=
/// Append-only storage for label text.
///
/// Labels are handed out as [Label] spans. Nothing is ever removed or
/// overwritten, so spans are monotonic, non-overlapping and valid for the
/// lifetime of the arena.
///
/// # Example
/// ```
/// use akitree::model::LabelArena;
///
/// let mut arena = LabelArena::with_capacity(16);
/// let kea = arena.append("kea");
/// let kaka = arena.append("kaka");
///
/// assert_eq!(arena.resolve(kea), "kea");
/// assert_eq!(arena.resolve(kaka), "kaka");
/// assert_eq!(kaka.offset(), kea.end());
/// ```
#[derive(Debug, Clone, Default)]
pub struct LabelArena {
    text: String,
}

impl LabelArena {
    /// Creates an empty arena.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty arena with room for `bytes` bytes of label text.
    pub fn with_capacity(bytes: usize) -> Self {
        LabelArena {
            text: String::with_capacity(bytes),
        }
    }

    /// Appends `text` and returns the span covering it.
    pub fn append(&mut self, text: &str) -> Label {
        let offset = self.text.len();
        self.text.push_str(text);
        Label {
            offset,
            len: text.len(),
        }
    }

    /// Returns the text of `label`.
    ///
    /// # Panics
    /// Panics if `label` was not issued by this arena.
    pub fn resolve(&self, label: Label) -> &str {
        &self.text[label.offset..label.end()]
    }

    /// Returns the raw bytes of `label`.
    ///
    /// # Panics
    /// Panics if `label` was not issued by this arena.
    pub fn resolve_bytes(&self, label: Label) -> &[u8] {
        &self.text.as_bytes()[label.offset..label.end()]
    }

    /// Returns whether `label` lies within the stored text.
    pub fn contains(&self, label: Label) -> bool {
        label.end() <= self.text.len()
            && self.text.is_char_boundary(label.offset)
            && self.text.is_char_boundary(label.end())
    }

    /// Total number of bytes stored.
    pub fn len(&self) -> usize {
        self.text.len()
    }

    /// Returns `true` if no text has been appended yet.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

impl fmt::Display for LabelArena {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "LabelArena ({} bytes)", self.text.len())
    }
}
