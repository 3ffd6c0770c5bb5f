// Chunk: docs/chunks/attributed_buffer - Edit validation errors

use thiserror::Error;

use crate::types::TextRange;

/// Errors returned when an edit cannot be applied to a buffer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BufferError {
    /// The edited range extends past the end of the text.
    #[error("range {}..{} is out of bounds for text of length {len}", range.start, range.end)]
    OutOfBounds { range: TextRange, len: usize },

    /// An edit boundary splits a UTF-8 character.
    #[error("offset {offset} is not on a character boundary")]
    NotCharBoundary { offset: usize },
}
