// Chunk: docs/chunks/reparse_controller - Dirty tracking and the parse cycle

//! Markup storage: text surface, parser and theme kept in sync.
//!
//! [`MarkupStorage`] wraps a [`TextSurface`] and re-renders its attributes
//! from the markup in its text. Every text change marks the storage dirty.
//! [`parse_if_needed`](MarkupStorage::parse_if_needed) runs the parse cycle
//! only when dirty; [`parse`](MarkupStorage::parse) always runs it.
//!
//! The parse cycle happens inside one editing batch:
//!
//! 1. mark the storage clean
//! 2. reset the whole text to the theme's base attributes
//! 3. parse the full text
//! 4. on success store the document, notify the delegate and project it;
//!    on failure drop the stored document and keep the base attributes
//!
//! Parsing is never incremental. A single keystroke can move markup
//! boundaries arbitrarily far, so the whole text is reset and re-projected.

use std::rc::{Rc, Weak};

use markstore_buffer::{AttributeSet, AttributedBuffer, BufferError, TextRange, TextSurface};
use markstore_syntax::{DefaultTheme, Document, MarkdownParser, StyleTheme, SyntaxParser};

use crate::delegate::StorageDelegate;
use crate::projector::AttributeProjector;

/// Whether the text has changed since the last completed parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseState {
    Clean,
    Dirty,
}

/// Rich text storage that projects parsed markup onto its text attributes.
pub struct MarkupStorage<B, P> {
    buffer: B,
    parser: P,
    theme: Box<dyn StyleTheme>,
    /// The last successfully parsed document.
    document: Option<Rc<Document>>,
    needs_parse: bool,
    delegate: Option<Weak<dyn StorageDelegate>>,
}

impl MarkupStorage<AttributedBuffer, MarkdownParser> {
    /// Creates Markdown storage over `text` with the default theme.
    ///
    /// Nothing is parsed until the first [`parse`](Self::parse).
    pub fn markdown(text: &str) -> Self {
        Self::new(
            AttributedBuffer::from_str(text),
            MarkdownParser::new(),
            Box::new(DefaultTheme::default()),
        )
    }
}

impl<B, P> MarkupStorage<B, P>
where
    B: TextSurface,
    P: SyntaxParser,
{
    pub fn new(buffer: B, parser: P, theme: Box<dyn StyleTheme>) -> Self {
        Self {
            buffer,
            parser,
            theme,
            document: None,
            needs_parse: false,
            delegate: None,
        }
    }

    // ==================== Text changes ====================

    /// Records that the host changed the text in `range`.
    ///
    /// Hosts that mutate the surface directly call this around every
    /// mutation. Edits made through [`replace_characters`](Self::replace_characters)
    /// call it themselves.
    pub fn notify_text_changed(&mut self, range: TextRange, replacement: &str) {
        tracing::trace!(?range, inserted = replacement.len(), "text changed");
        self.needs_parse = true;
    }

    /// Replaces the text in `range` with `text`.
    ///
    /// A rejected edit leaves the text and the parse state untouched.
    pub fn replace_characters(&mut self, range: TextRange, text: &str) -> Result<(), BufferError> {
        self.buffer.replace_range(range, text)?;
        self.notify_text_changed(range, text);
        Ok(())
    }

    /// Replaces the text in `range` if the delegate allows it.
    ///
    /// Returns `Ok(false)` without touching the text when the delegate
    /// refuses the edit.
    pub fn perform_edit(
        &mut self,
        range: TextRange,
        text: &str,
        action_name: &str,
    ) -> Result<bool, BufferError> {
        if let Some(delegate) = self.delegate() {
            if !delegate.should_change_text(range, text, action_name) {
                tracing::debug!(?range, action = action_name, "edit refused by delegate");
                return Ok(false);
            }
        }
        self.replace_characters(range, text)?;
        Ok(true)
    }

    // ==================== Parsing ====================

    /// Runs the parse cycle if the text changed since the last parse.
    ///
    /// Returns true if a parse ran.
    pub fn parse_if_needed(&mut self) -> bool {
        if !self.needs_parse {
            return false;
        }
        self.parse();
        true
    }

    /// Runs the parse cycle unconditionally.
    pub fn parse(&mut self) {
        let span = tracing::debug_span!("parse", len = self.buffer.len());
        let _enter = span.enter();

        self.buffer.begin_editing();
        self.needs_parse = false;
        self.reset_attributes();

        match self.parser.parse(self.buffer.text()) {
            Some(document) => {
                let document = Rc::new(document);
                tracing::debug!(nodes = document.node_count(), "parsed document");
                self.document = Some(Rc::clone(&document));
                if let Some(delegate) = self.delegate() {
                    delegate.did_parse_document(&document);
                }
                self.project(&document);
            }
            None => {
                tracing::debug!("text has no parseable structure");
                self.document = None;
            }
        }

        self.buffer.end_editing();
    }

    /// Re-applies attributes from the stored document without parsing.
    ///
    /// Call after [`set_theme`](Self::set_theme) to show the new theme.
    /// Ranges of a document parsed before later edits are clamped by the
    /// surface, so parse first if the storage is dirty.
    pub fn rerender(&mut self) {
        self.buffer.begin_editing();
        self.reset_attributes();
        if let Some(document) = self.document.clone() {
            self.project(&document);
        }
        self.buffer.end_editing();
    }

    fn reset_attributes(&mut self) {
        let base = self.theme.base_attributes();
        let bounds = self.buffer.bounds();
        self.buffer.set_attributes(bounds, &base);
    }

    fn project(&mut self, document: &Document) {
        let font = self.theme.font();
        AttributeProjector::new(self.theme.as_ref()).project(document, &font, &mut self.buffer);
    }

    // ==================== Theme ====================

    /// Changes the theme's font size and re-renders with the stored document.
    ///
    /// Setting the current size does nothing. Non-finite and non-positive
    /// sizes are ignored. While the storage is dirty the new size takes
    /// effect at the next parse.
    pub fn set_font_size(&mut self, size: f32) {
        if !size.is_finite() || size <= 0.0 {
            tracing::warn!(size, "ignoring invalid font size");
            return;
        }
        if size == self.theme.font_size() {
            return;
        }

        tracing::debug!(from = self.theme.font_size(), to = size, "font size changed");
        self.theme.set_font_size(size);
        if !self.needs_parse {
            self.rerender();
        }
    }

    /// Replaces the theme and notifies the delegate.
    ///
    /// The text keeps its current attributes until the next
    /// [`rerender`](Self::rerender) or parse.
    pub fn set_theme(&mut self, theme: Box<dyn StyleTheme>) {
        self.theme = theme;
        if let Some(delegate) = self.delegate() {
            delegate.did_change_theme(self.theme.as_ref());
        }
    }

    pub fn theme(&self) -> &dyn StyleTheme {
        self.theme.as_ref()
    }

    pub fn font_size(&self) -> f32 {
        self.theme.font_size()
    }

    /// Attributes for text typed at an insertion point.
    pub fn typing_attributes(&self) -> AttributeSet {
        self.theme.base_attributes()
    }

    // ==================== Delegate ====================

    /// Sets the delegate without taking ownership of it.
    pub fn set_delegate<D: StorageDelegate + 'static>(&mut self, delegate: &Rc<D>) {
        let delegate: Weak<D> = Rc::downgrade(delegate);
        self.delegate = Some(delegate);
    }

    pub fn clear_delegate(&mut self) {
        self.delegate = None;
    }

    /// Passes a host selection change on to the delegate.
    pub fn relay_selection_change(&self, range: TextRange) {
        if let Some(delegate) = self.delegate() {
            delegate.did_update_selected_range(range);
        }
    }

    fn delegate(&self) -> Option<Rc<dyn StorageDelegate>> {
        self.delegate.as_ref()?.upgrade()
    }

    // ==================== Accessors ====================

    pub fn state(&self) -> ParseState {
        if self.needs_parse {
            ParseState::Dirty
        } else {
            ParseState::Clean
        }
    }

    pub fn needs_parse(&self) -> bool {
        self.needs_parse
    }

    /// The last successfully parsed document, if the last parse succeeded.
    pub fn current_document(&self) -> Option<&Rc<Document>> {
        self.document.as_ref()
    }

    pub fn bounds(&self) -> TextRange {
        self.buffer.bounds()
    }

    pub fn text(&self) -> &str {
        self.buffer.text()
    }

    pub fn buffer(&self) -> &B {
        &self.buffer
    }

    pub fn into_inner(self) -> B {
        self.buffer
    }
}
