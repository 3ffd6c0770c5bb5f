// Chunk: docs/chunks/reparse_controller - Markup storage core

//! markstore: rich text rendered from lightweight markup.
//!
//! [`MarkupStorage`] owns a text surface, a parser and a theme. Text edits
//! mark it dirty; parsing resets the text to the theme's base attributes and
//! projects the parsed [`Document`] back onto it with [`AttributeProjector`],
//! cascading font traits from parent nodes to their children.
//!
//! # Example
//!
//! ```
//! use markstore::{FontTraits, MarkupStorage, TextRange};
//!
//! let mut storage = MarkupStorage::markdown("a *b* c");
//! storage.parse();
//!
//! let emphasis = storage.buffer().attributes_at(3).unwrap();
//! assert!(emphasis.font().unwrap().traits.contains(FontTraits::ITALIC));
//!
//! storage.replace_characters(TextRange::new(7, 7), "!").unwrap();
//! assert!(storage.needs_parse());
//! assert!(storage.parse_if_needed());
//! ```

mod delegate;
mod projector;
mod storage;

pub use delegate::StorageDelegate;
pub use projector::{AttributeProjector, StyledRange};
pub use storage::{MarkupStorage, ParseState};

pub use markstore_buffer::{
    AttributeKey, AttributeRun, AttributeSet, AttributeValue, AttributedBuffer, BufferError,
    Color, Font, FontTraits, NamedColor, TextRange, TextSurface, UnderlineStyle,
};
pub use markstore_syntax::{
    DefaultTheme, Document, MarkdownParser, Node, NodeKind, StyleTheme, SyntaxParser,
    ThemeConfig, ThemeError,
};
