// Chunk: docs/chunks/storage_delegate - Outward notifications from markup storage

//! Observer interface for [`MarkupStorage`](crate::MarkupStorage).
//!
//! The storage holds its delegate weakly, so a listener that goes away simply
//! stops receiving calls. Every method has a no-op default; implement only
//! the events you care about.

use std::rc::Rc;

use markstore_buffer::TextRange;
use markstore_syntax::{Document, StyleTheme};

pub trait StorageDelegate {
    /// A parse produced a new document. Called before its attributes are
    /// projected onto the text.
    fn did_parse_document(&self, _document: &Rc<Document>) {}

    /// The storage's theme was replaced.
    fn did_change_theme(&self, _theme: &dyn StyleTheme) {}

    /// Asked before an edit made through
    /// [`perform_edit`](crate::MarkupStorage::perform_edit). Returning false
    /// refuses it.
    fn should_change_text(&self, _range: TextRange, _replacement: &str, _action_name: &str) -> bool {
        true
    }

    /// Relayed host selection change.
    fn did_update_selected_range(&self, _range: TextRange) {}
}
