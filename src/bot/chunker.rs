//! Outbound message chunking.
//!
//! Discord rejects messages over its length limit, so long replies are cut
//! into chunks at a delimiter (a newline by default). A chunk is never cut in
//! the middle of a line: text that can't be split small enough at a
//! delimiter is refused rather than sent partially.

use crate::common::error::ChunkError;

/// Splits outbound text at a delimiter into chunks within a character limit.
#[derive(Debug, Clone)]
pub struct Chunker {
    delimiter: String,
    char_limit: usize,
}

impl Chunker {
    pub fn new(delimiter: impl Into<String>, char_limit: usize) -> Result<Self, ChunkError> {
        let delimiter = delimiter.into();
        if delimiter.is_empty() {
            return Err(ChunkError::EmptyDelimiter);
        }
        if char_limit == 0 {
            return Err(ChunkError::ZeroLimit);
        }
        Ok(Self {
            delimiter,
            char_limit,
        })
    }

    /// Lazily split `text` into chunks.
    ///
    /// The iterator can be cloned to restart from the current position.
    pub fn chunks<'a>(&'a self, text: &'a str) -> Chunks<'a> {
        Chunks {
            chunker: self,
            remaining: Some(text),
        }
    }
}

/// Iterator over the chunks of one outbound message.
///
/// Ends when the remaining text is blank. After yielding an error it is
/// exhausted.
#[derive(Debug, Clone)]
pub struct Chunks<'a> {
    chunker: &'a Chunker,
    remaining: Option<&'a str>,
}

impl<'a> Iterator for Chunks<'a> {
    type Item = Result<&'a str, ChunkError>;

    fn next(&mut self) -> Option<Self::Item> {
        let text = self.remaining.take()?;
        if text.trim().is_empty() {
            return None;
        }

        let limit = self.chunker.char_limit;
        let delimiter = self.chunker.delimiter.as_str();

        if text.chars().count() <= limit {
            return Some(Ok(text));
        }

        let mut first = text;
        while first.chars().count() > limit {
            match first.rfind(delimiter) {
                Some(idx) => first = &first[..idx],
                None => {
                    return Some(Err(ChunkError::Unsplittable {
                        fragment: first.to_string(),
                    }));
                }
            }
        }

        self.remaining = Some(&text[first.len() + delimiter.len()..]);
        Some(Ok(first))
    }
}

impl std::iter::FusedIterator for Chunks<'_> {}
