//! Low-level byte-by-byte parser for tree files.
//!
//! This module provides [ByteParser] for reading text-based formats with
//! support for peeking, consuming, whitespace skipping and double-quoted
//! label reading. Used as the foundation for the
//! [bracket format parser](crate::format::TreeParser).

use crate::format::defs::QUOTE;
use crate::parser::byte_source::{ByteSource, InMemoryByteSource};
use crate::parser::parsing_error::{ParsingError, ParsingErrorType};
use std::path::Path;

// =#========================================================================#=
// BYTE PARSER
// =#========================================================================#=
/// A byte-by-byte parser with support for peeking, consuming, and label reading.
///
/// # Example
/// ```
/// use akitree::parser::ByteParser;
///
/// let mut parser = ByteParser::for_str("  {\"kea\"}");
/// parser.skip_whitespace();
/// assert!(parser.consume_if(b'{'));
/// assert_eq!(parser.parse_quoted_label().unwrap(), "kea");
/// assert_eq!(parser.next_byte(), Some(b'}'));
/// assert!(parser.is_eof());
/// ```
pub struct ByteParser<S: ByteSource = InMemoryByteSource> {
    source: S,
}

impl ByteParser<InMemoryByteSource> {
    /// Creates a new `ByteParser` from a byte slice by copying it into a Vec.
    pub fn for_bytes(input: &[u8]) -> Self {
        Self::new(InMemoryByteSource::from_vec(input.to_vec()))
    }

    /// Creates a new `ByteParser` from a string by copying it into a Vec.
    pub fn for_str(input: &str) -> Self {
        Self::for_bytes(input.as_bytes())
    }

    /// Creates a new `ByteParser` over the full contents of a file.
    ///
    /// # Errors
    /// Returns a [ParsingError] of type `IoError` if the file cannot be read.
    pub fn for_file<P: AsRef<Path>>(path: P) -> Result<Self, ParsingError> {
        Ok(Self::new(InMemoryByteSource::from_file(path)?))
    }
}

impl<S: ByteSource> ByteParser<S> {
    /// Creates a new `ByteParser` from a byte source.
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// Peeks at the current byte without consuming it.
    #[inline(always)]
    pub fn peek(&self) -> Option<u8> {
        self.source.peek()
    }

    /// Gets the current byte and advances the position (consumes it).
    #[inline(always)]
    pub fn next_byte(&mut self) -> Option<u8> {
        self.source.next_byte()
    }

    /// Skips (consumes) all consecutive ASCII whitespace.
    pub fn skip_whitespace(&mut self) {
        while let Some(b) = self.peek() {
            if b.is_ascii_whitespace() {
                self.next_byte();
            } else {
                break;
            }
        }
    }

    /// Consumes the current byte if it equals `ch`.
    ///
    /// # Returns
    /// `true` if the byte was matched and consumed, `false` otherwise
    pub fn consume_if(&mut self, ch: u8) -> bool {
        if self.peek() == Some(ch) {
            self.next_byte();
            true
        } else {
            false
        }
    }

    /// Consumes bytes until the target byte is found.
    ///
    /// # Arguments
    /// * `target` - The byte to search for
    /// * `mode` - Whether to consume the target byte (`Inclusive`) or stop before it (`Exclusive`)
    ///
    /// # Returns
    /// `true` if the target was found, `false` if EOF was reached first
    pub fn consume_until(&mut self, target: u8, mode: ConsumeMode) -> bool {
        while let Some(b) = self.peek() {
            if b == target {
                if mode == ConsumeMode::Inclusive {
                    self.next_byte();
                }
                return true;
            }
            self.next_byte();
        }
        false
    }

    /// Counts occurrences of `target` in the bytes not consumed yet,
    /// without moving.
    pub fn count_remaining(&self, target: u8) -> usize {
        self.source.remaining().iter().filter(|&&b| b == target).count()
    }

    /// Returns the number of bytes not consumed yet.
    pub fn remaining_len(&self) -> usize {
        self.source.remaining().len()
    }

    /// Returns `true` if only whitespace remains.
    pub fn only_whitespace_remains(&self) -> bool {
        self.source.remaining().iter().all(|b| b.is_ascii_whitespace())
    }

    /// Returns whether the end of data (EOF) has been reached.
    pub fn is_eof(&self) -> bool {
        self.source.is_eof()
    }

    /// Returns the current parser position in the input.
    pub fn position(&self) -> usize {
        self.source.position()
    }

    /// Returns a slice of the input from a start position to the current position,
    /// or an empty slice if not available.
    pub fn slice_from(&self, start: usize) -> &[u8] {
        self.source.slice_from(start).unwrap_or(&[])
    }

    /// Returns up to `k` bytes from the current position as a string for error
    /// context. Invalid UTF-8 sequences are replaced with the Unicode replacement
    /// character.
    pub fn get_context_as_string(&self, k: usize) -> String {
        String::from_utf8_lossy(self.source.peek_slice(k)).into_owned()
    }

    /// Parses a label enclosed in double quotes.
    ///
    /// Expects the parser at the opening quote. Everything up to the next
    /// quote is the label; quotes inside labels are not supported.
    ///
    /// # Errors
    /// Returns an error if there is no opening quote, the closing quote is
    /// missing, or the label is not valid UTF-8.
    pub fn parse_quoted_label(&mut self) -> Result<String, ParsingError> {
        if !self.consume_if(QUOTE) {
            return Err(ParsingError::from_parser(ParsingErrorType::ExpectedLabel, self));
        }

        let start = self.position();
        if !self.consume_until(QUOTE, ConsumeMode::Exclusive) {
            return Err(ParsingError::from_parser(ParsingErrorType::UnterminatedLabel, self));
        }
        let label = String::from_utf8(self.slice_from(start).to_vec())
            .map_err(|_| ParsingError::from_parser(ParsingErrorType::InvalidUtf8, self))?;

        self.next_byte(); // consume closing "
        Ok(label)
    }
}

/// Specifies whether to consume or leave the target when using `consume_until`.
///
/// # Examples
/// ```
/// use akitree::parser::byte_parser::{ByteParser, ConsumeMode};
///
/// let mut parser = ByteParser::for_str("{\"kea\"}");
/// parser.consume_until(b'"', ConsumeMode::Inclusive);
/// assert_eq!(parser.peek(), Some(b'k'));
///
/// let mut parser = ByteParser::for_str("{\"kea\"}");
/// parser.consume_until(b'"', ConsumeMode::Exclusive);
/// assert_eq!(parser.peek(), Some(b'"'));
/// ```
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum ConsumeMode {
    /// Consume the target byte along with everything before it.
    Inclusive,

    /// Stop before the target byte without consuming it.
    Exclusive,
}
