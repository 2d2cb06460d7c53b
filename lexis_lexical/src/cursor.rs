//! Contains the [`Cursor`] that walks over the source text during one tokenization.

use std::{iter::Peekable, str::CharIndices};

use lexis_base::source_file::Location;

/// Is an unsigned integer that represents a byte index in the source text.
pub type ByteIndex = usize;

/// Is an iterator over the characters of a source text that can be peeked at and that keeps track
/// of the [`Location`] of the next character.
///
/// A cursor lives for exactly one tokenization; nothing of it outlives the call that created it.
#[derive(Debug, Clone)]
pub struct Cursor<'a> {
    source: &'a str,
    iterator: Peekable<CharIndices<'a>>,
    location: Location,
}

impl<'a> Cursor<'a> {
    /// Creates a cursor positioned at the first character of `source`.
    #[must_use]
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            iterator: source.char_indices().peekable(),
            location: Location::START,
        }
    }

    /// Peeks at the next character.
    pub fn peek(&mut self) -> Option<(ByteIndex, char)> { self.iterator.peek().copied() }

    /// Peeks at the character right after the next one.
    #[must_use]
    pub fn peek_second(&self) -> Option<char> {
        self.iterator.clone().nth(1).map(|(_, character)| character)
    }

    /// Gets the location of the next character.
    #[must_use]
    pub fn location(&self) -> Location { self.location }

    /// Gets the byte index of the next character, or the length of the source once exhausted.
    pub fn offset(&mut self) -> ByteIndex {
        self.iterator
            .peek()
            .map_or(self.source.len(), |(index, _)| *index)
    }

    /// Gets the source text from `start` up to, but excluding, the next character.
    pub fn slice_from(&mut self, start: ByteIndex) -> &'a str {
        let end = self.offset();
        &self.source[start..end]
    }
}

impl<'a> Iterator for Cursor<'a> {
    type Item = (ByteIndex, char);

    fn next(&mut self) -> Option<Self::Item> {
        let (index, character) = self.iterator.next()?;
        self.location = self.location.advance(character);

        Some((index, character))
    }
}
