// Chunk: docs/chunks/attributed_buffer - TextSurface trait

//!
//! The text surface abstraction.
//!
//! [`TextSurface`] is the boundary between the markup engine and whatever owns
//! the live text: it exposes the text, its length, and two kinds of attribute
//! writes. The engine never owns the surface's lifecycle; it only reads the
//! text and requests attribute writes.

use crate::attributes::AttributeSet;
use crate::error::BufferError;
use crate::types::TextRange;

/// Editable text with per-range display attributes.
///
/// This trait is object-safe: it can be used as `&mut dyn TextSurface`.
///
/// # Implementors
///
/// - [`AttributedBuffer`](crate::AttributedBuffer): in-memory string plus
///   attribute runs
pub trait TextSurface {
    /// Returns the length of the text in bytes.
    fn len(&self) -> usize;

    /// Returns the full text.
    fn text(&self) -> &str;

    /// Replaces all attributes over `range` with `attributes`.
    ///
    /// Ranges past the end of the text are clamped.
    fn set_attributes(&mut self, range: TextRange, attributes: &AttributeSet);

    /// Overlays `attributes` on `range`: keys present in `attributes` replace
    /// existing values, other keys are kept.
    ///
    /// Ranges past the end of the text are clamped.
    fn add_attributes(&mut self, range: TextRange, attributes: &AttributeSet);

    /// Replaces the text in `range` with `text`.
    fn replace_range(&mut self, range: TextRange, text: &str) -> Result<(), BufferError>;

    /// Marks the start of a batch of mutations.
    ///
    /// Batches nest; observers of the surface see a single change when the
    /// outermost batch ends.
    fn begin_editing(&mut self) {}

    /// Marks the end of a batch started with [`begin_editing`](Self::begin_editing).
    fn end_editing(&mut self) {}

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the range covering the whole text.
    fn bounds(&self) -> TextRange {
        TextRange::new(0, self.len())
    }
}
