// Chunk: docs/chunks/attributed_buffer - Attributed text buffer with overlay writes

//! markstore-buffer: attributed text and the attribute model for markstore.
//!
//! This crate provides the text surface the markup engine renders into, and
//! the attribute types it renders with.
//!
//! # Overview
//!
//! - [`TextSurface`]: the boundary trait the engine consumes (text, length,
//!   replacing and overlaying attribute writes, batched editing).
//! - [`AttributedBuffer`]: an in-memory surface storing contiguous
//!   [`AttributeRun`]s over a `String`.
//! - [`AttributeSet`]: the per-range mapping of [`AttributeKey`] to
//!   [`AttributeValue`], including the [`FontTraits`] directive used for
//!   cascading fonts.
//!
//! # Example
//!
//! ```
//! use markstore_buffer::{AttributeSet, AttributedBuffer, Color, FontTraits, TextRange, TextSurface};
//!
//! let mut buffer = AttributedBuffer::from_str("hello world");
//! let base = AttributeSet::new().with_foreground(Color::Indexed(7));
//! buffer.set_attributes(buffer.bounds(), &base);
//!
//! // Overlay writes keep keys they don't mention.
//! let emphasis = AttributeSet::new().with_font_traits(FontTraits::ITALIC);
//! buffer.add_attributes(TextRange::new(6, 11), &emphasis);
//!
//! let at_world = buffer.attributes_at(6).unwrap();
//! assert_eq!(at_world.foreground(), Some(Color::Indexed(7)));
//! assert_eq!(at_world.font_traits(), Some(FontTraits::ITALIC));
//! assert_eq!(buffer.runs().len(), 2);
//! ```
//!
//! # Offsets
//!
//! All ranges are UTF-8 byte ranges ([`TextRange`]). Edits must start and end
//! on character boundaries; attribute writes are clamped to the text length.

mod attributed_buffer;
mod attributes;
mod error;
mod surface;
mod types;

pub use attributed_buffer::{AttributeRun, AttributedBuffer};
pub use attributes::{
    AttributeKey, AttributeSet, AttributeValue, Color, Font, FontTraits, NamedColor,
    UnderlineStyle,
};
pub use error::BufferError;
pub use surface::TextSurface;
pub use types::TextRange;
