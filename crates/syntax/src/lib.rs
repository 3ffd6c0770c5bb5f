// Chunk: docs/chunks/markdown_syntax_tree - Markup parsing and style themes

//! markstore-syntax: markup syntax trees and style themes.
//!
//! # Overview
//!
//! The main types are:
//!
//! - [`Document`] and [`Node`]: an immutable syntax tree of byte-ranged
//!   nodes with a closed [`NodeKind`].
//!
//! - [`SyntaxParser`]: turns text into a [`Document`]. [`MarkdownParser`]
//!   implements it with tree-sitter's Markdown grammars.
//!
//! - [`StyleTheme`]: maps nodes to attribute sets. [`DefaultTheme`] uses the
//!   Catppuccin Mocha palette and can be customized from a [`ThemeConfig`].
//!
//! # Example
//!
//! ```
//! use markstore_syntax::{DefaultTheme, MarkdownParser, NodeKind, StyleTheme, SyntaxParser};
//!
//! let document = MarkdownParser::new().parse("a *b* c").unwrap();
//! let emphasis = document.find(NodeKind::Emphasis).unwrap();
//!
//! let theme = DefaultTheme::catppuccin_mocha();
//! assert!(theme.attributes_for(emphasis).is_some());
//! ```

mod config;
mod error;
mod node;
mod parser;
mod theme;

pub use config::{StyleConfig, ThemeConfig, UnderlineConfig};
pub use error::ThemeError;
pub use node::{Document, Node, NodeKind, Walk};
pub use parser::{MarkdownParser, SyntaxParser};
pub use theme::{DefaultTheme, Style, StyleTheme};
