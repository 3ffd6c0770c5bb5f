// Chunk: docs/chunks/attributed_buffer - Attributed text buffer with overlay writes

//! AttributedBuffer stores text together with contiguous attribute runs.
//!
//! The runs always tile the text: they are sorted, non-empty, adjacent and
//! together cover `[0, len)`. Adjacent runs with equal attributes are merged
//! after every write, so [`AttributedBuffer::runs`] is the minimal description
//! of the styling.

use crate::attributes::AttributeSet;
use crate::error::BufferError;
use crate::surface::TextSurface;
use crate::types::TextRange;

/// A maximal range of text carrying one attribute set.
#[derive(Debug, Clone, PartialEq)]
pub struct AttributeRun {
    pub range: TextRange,
    pub attributes: AttributeSet,
}

impl AttributeRun {
    pub fn new(range: TextRange, attributes: AttributeSet) -> Self {
        Self { range, attributes }
    }
}

/// An in-memory [`TextSurface`].
///
/// Besides the surface operations it tracks a generation counter that
/// increments once per outermost editing batch (or once per mutation made
/// outside a batch), letting a host redraw only when something changed.
#[derive(Debug, Default)]
pub struct AttributedBuffer {
    text: String,
    runs: Vec<AttributeRun>,
    /// Nesting depth of `begin_editing` calls.
    editing_depth: usize,
    /// Whether a mutation happened inside the current batch.
    pending_change: bool,
    generation: u64,
}

impl AttributedBuffer {
    /// Creates a new empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a buffer holding `text` with empty attributes.
    ///
    /// Note: We don't implement `FromStr` because it requires returning `Result`,
    /// but building a buffer from a string cannot fail.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(text: &str) -> Self {
        let runs = if text.is_empty() {
            Vec::new()
        } else {
            vec![AttributeRun::new(
                TextRange::new(0, text.len()),
                AttributeSet::new(),
            )]
        };
        Self {
            text: text.to_string(),
            runs,
            ..Self::default()
        }
    }

    /// Returns the coalesced attribute runs covering the text.
    pub fn runs(&self) -> &[AttributeRun] {
        &self.runs
    }

    /// Returns the attributes in effect at `offset`, or `None` past the end.
    pub fn attributes_at(&self, offset: usize) -> Option<&AttributeSet> {
        self.run_index_at(offset).map(|idx| &self.runs[idx].attributes)
    }

    /// Returns the change counter.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    // ==================== Run bookkeeping ====================

    fn run_index_at(&self, offset: usize) -> Option<usize> {
        let idx = self.runs.partition_point(|run| run.range.end <= offset);
        match self.runs.get(idx) {
            Some(run) if run.range.contains(offset) => Some(idx),
            _ => None,
        }
    }

    /// Splits the run containing `offset` so that a run boundary falls on it.
    fn split_at(&mut self, offset: usize) {
        let Some(idx) = self.run_index_at(offset) else {
            return;
        };
        let run = &mut self.runs[idx];
        if run.range.start == offset {
            return;
        }
        let tail = AttributeRun::new(
            TextRange::new(offset, run.range.end),
            run.attributes.clone(),
        );
        run.range.end = offset;
        self.runs.insert(idx + 1, tail);
    }

    /// Returns the index range of runs lying inside `range` after splitting
    /// at its boundaries.
    fn isolate(&mut self, range: TextRange) -> std::ops::Range<usize> {
        self.split_at(range.start);
        self.split_at(range.end);
        let first = self.runs.partition_point(|run| run.range.start < range.start);
        let last = self.runs.partition_point(|run| run.range.end <= range.end);
        first..last
    }

    /// Merges adjacent runs with equal attributes.
    fn coalesce(&mut self) {
        let mut merged: Vec<AttributeRun> = Vec::with_capacity(self.runs.len());
        for run in self.runs.drain(..) {
            if let Some(last) = merged.last_mut() {
                if last.attributes == run.attributes && last.range.end == run.range.start {
                    last.range.end = run.range.end;
                    continue;
                }
            }
            merged.push(run);
        }
        self.runs = merged;
    }

    fn record_change(&mut self) {
        if self.editing_depth > 0 {
            self.pending_change = true;
        } else {
            self.generation = self.generation.wrapping_add(1);
        }
    }

    fn check_edit_range(&self, range: TextRange) -> Result<(), BufferError> {
        if range.start > range.end || range.end > self.text.len() {
            return Err(BufferError::OutOfBounds {
                range,
                len: self.text.len(),
            });
        }
        for offset in [range.start, range.end] {
            if !self.text.is_char_boundary(offset) {
                return Err(BufferError::NotCharBoundary { offset });
            }
        }
        Ok(())
    }
}

impl TextSurface for AttributedBuffer {
    fn len(&self) -> usize {
        self.text.len()
    }

    fn text(&self) -> &str {
        &self.text
    }

    fn set_attributes(&mut self, range: TextRange, attributes: &AttributeSet) {
        let range = range.clamp_to(self.text.len());
        if range.is_empty() {
            return;
        }
        let span = self.isolate(range);
        self.runs
            .splice(span, [AttributeRun::new(range, attributes.clone())]);
        self.coalesce();
        self.record_change();
    }

    fn add_attributes(&mut self, range: TextRange, attributes: &AttributeSet) {
        let range = range.clamp_to(self.text.len());
        if range.is_empty() || attributes.is_empty() {
            return;
        }
        let span = self.isolate(range);
        for run in &mut self.runs[span] {
            run.attributes.overlay(attributes);
        }
        self.coalesce();
        self.record_change();
    }

    fn replace_range(&mut self, range: TextRange, text: &str) -> Result<(), BufferError> {
        self.check_edit_range(range)?;
        if range.is_empty() && text.is_empty() {
            return Ok(());
        }

        // Inserted text takes the attributes of the character before it, or
        // of the replaced/following character at the start of the text.
        let inherited = range
            .start
            .checked_sub(1)
            .and_then(|prev| self.attributes_at(prev))
            .or_else(|| self.attributes_at(range.start))
            .cloned()
            .unwrap_or_default();

        let span = self.isolate(range);
        self.runs.drain(span.clone());

        let removed = range.len();
        for run in &mut self.runs[span.start..] {
            run.range.start = run.range.start - removed + text.len();
            run.range.end = run.range.end - removed + text.len();
        }
        if !text.is_empty() {
            self.runs.insert(
                span.start,
                AttributeRun::new(TextRange::with_len(range.start, text.len()), inherited),
            );
        }

        self.text.replace_range(range.start..range.end, text);
        self.coalesce();
        self.record_change();
        Ok(())
    }

    fn begin_editing(&mut self) {
        self.editing_depth += 1;
    }

    fn end_editing(&mut self) {
        if self.editing_depth == 0 {
            return;
        }
        self.editing_depth -= 1;
        if self.editing_depth == 0 && self.pending_change {
            self.pending_change = false;
            self.generation = self.generation.wrapping_add(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attributes::{Color, FontTraits, NamedColor};

    fn red() -> AttributeSet {
        AttributeSet::new().with_foreground(Color::Named(NamedColor::Red))
    }

    fn bold() -> AttributeSet {
        AttributeSet::new().with_font_traits(FontTraits::BOLD)
    }

    /// Asserts the tiling invariant: sorted, non-empty, adjacent, covering.
    fn assert_runs_tile(buffer: &AttributedBuffer) {
        let mut expected_start = 0;
        for run in buffer.runs() {
            assert_eq!(run.range.start, expected_start, "runs must be adjacent: {:?}", buffer.runs());
            assert!(!run.range.is_empty(), "runs must be non-empty");
            expected_start = run.range.end;
        }
        assert_eq!(expected_start, buffer.len(), "runs must cover the text");
    }

    #[test]
    fn test_from_str_single_run() {
        let buffer = AttributedBuffer::from_str("hello");
        assert_eq!(buffer.runs().len(), 1);
        assert_runs_tile(&buffer);
    }

    #[test]
    fn test_empty_buffer_has_no_runs() {
        let buffer = AttributedBuffer::new();
        assert!(buffer.runs().is_empty());
        assert!(buffer.attributes_at(0).is_none());
    }

    #[test]
    fn test_set_attributes_replaces_inner_range() {
        let mut buffer = AttributedBuffer::from_str("hello world");
        buffer.set_attributes(TextRange::new(0, 11), &bold());
        buffer.set_attributes(TextRange::new(6, 11), &red());

        assert_eq!(buffer.attributes_at(0), Some(&bold()));
        assert_eq!(buffer.attributes_at(6), Some(&red()));
        assert_eq!(buffer.runs().len(), 2);
        assert_runs_tile(&buffer);
    }

    #[test]
    fn test_add_attributes_overlays() {
        let mut buffer = AttributedBuffer::from_str("0123456789");
        buffer.set_attributes(TextRange::new(0, 10), &bold());
        buffer.add_attributes(TextRange::new(2, 5), &red());

        let expected = bold().overlaid(&red());
        assert_eq!(buffer.attributes_at(3), Some(&expected));
        assert_eq!(buffer.attributes_at(1), Some(&bold()));
        assert_eq!(buffer.attributes_at(5), Some(&bold()));
        assert_eq!(buffer.runs().len(), 3);
        assert_runs_tile(&buffer);
    }

    #[test]
    fn test_writes_clamp_past_end() {
        let mut buffer = AttributedBuffer::from_str("abc");
        buffer.add_attributes(TextRange::new(1, 40), &red());
        assert_eq!(buffer.attributes_at(2), Some(&red()));
        assert_runs_tile(&buffer);
    }

    #[test]
    fn test_equal_runs_coalesce() {
        let mut buffer = AttributedBuffer::from_str("abcdef");
        buffer.set_attributes(TextRange::new(0, 3), &red());
        buffer.set_attributes(TextRange::new(3, 6), &red());
        assert_eq!(buffer.runs().len(), 1);
    }

    #[test]
    fn test_insert_inherits_preceding_attributes() {
        let mut buffer = AttributedBuffer::from_str("ab");
        buffer.set_attributes(TextRange::new(0, 1), &red());
        buffer.set_attributes(TextRange::new(1, 2), &bold());

        buffer.replace_range(TextRange::new(1, 1), "XY").unwrap();

        assert_eq!(buffer.text(), "aXYb");
        assert_eq!(buffer.attributes_at(1), Some(&red()));
        assert_eq!(buffer.attributes_at(2), Some(&red()));
        assert_eq!(buffer.attributes_at(3), Some(&bold()));
        assert_runs_tile(&buffer);
    }

    #[test]
    fn test_insert_at_start_inherits_following() {
        let mut buffer = AttributedBuffer::from_str("ab");
        buffer.set_attributes(TextRange::new(0, 2), &red());
        buffer.replace_range(TextRange::new(0, 0), "__").unwrap();
        assert_eq!(buffer.attributes_at(0), Some(&red()));
        assert_eq!(buffer.runs().len(), 1);
    }

    #[test]
    fn test_delete_shifts_later_runs() {
        let mut buffer = AttributedBuffer::from_str("aaBBcc");
        buffer.set_attributes(TextRange::new(4, 6), &red());
        buffer.replace_range(TextRange::new(2, 4), "").unwrap();

        assert_eq!(buffer.text(), "aacc");
        assert_eq!(buffer.attributes_at(2), Some(&red()));
        assert_eq!(buffer.attributes_at(1), Some(&AttributeSet::new()));
        assert_runs_tile(&buffer);
    }

    #[test]
    fn test_replace_everything_with_nothing() {
        let mut buffer = AttributedBuffer::from_str("abc");
        buffer.replace_range(TextRange::new(0, 3), "").unwrap();
        assert!(buffer.is_empty());
        assert!(buffer.runs().is_empty());
    }

    #[test]
    fn test_insert_into_empty_buffer() {
        let mut buffer = AttributedBuffer::new();
        buffer.replace_range(TextRange::new(0, 0), "hi").unwrap();
        assert_eq!(buffer.text(), "hi");
        assert_eq!(buffer.attributes_at(1), Some(&AttributeSet::new()));
        assert_runs_tile(&buffer);
    }

    #[test]
    fn test_replace_out_of_bounds() {
        let mut buffer = AttributedBuffer::from_str("abc");
        let err = buffer.replace_range(TextRange::new(2, 9), "x").unwrap_err();
        assert_eq!(
            err,
            BufferError::OutOfBounds {
                range: TextRange::new(2, 9),
                len: 3
            }
        );
        assert_eq!(buffer.text(), "abc");
    }

    #[test]
    fn test_replace_inverted_range_is_rejected() {
        let mut buffer = AttributedBuffer::from_str("abcdef");
        let inverted = TextRange { start: 4, end: 2 };
        let err = buffer.replace_range(inverted, "x").unwrap_err();
        assert_eq!(
            err,
            BufferError::OutOfBounds {
                range: inverted,
                len: 6
            }
        );
        assert_eq!(buffer.text(), "abcdef");
        assert_eq!(buffer.runs().len(), 1);
    }

    #[test]
    fn test_replace_inside_multibyte_char() {
        let mut buffer = AttributedBuffer::from_str("h\u{e9}llo");
        let err = buffer.replace_range(TextRange::new(2, 2), "x").unwrap_err();
        assert_eq!(err, BufferError::NotCharBoundary { offset: 2 });
    }

    #[test]
    fn test_generation_counts_batches_once() {
        let mut buffer = AttributedBuffer::from_str("abc");
        let start = buffer.generation();

        buffer.begin_editing();
        buffer.set_attributes(TextRange::new(0, 3), &red());
        buffer.begin_editing();
        buffer.add_attributes(TextRange::new(0, 1), &bold());
        buffer.end_editing();
        assert_eq!(buffer.generation(), start);
        buffer.end_editing();

        assert_eq!(buffer.generation(), start + 1);
    }

    #[test]
    fn test_generation_unbatched_mutation() {
        let mut buffer = AttributedBuffer::from_str("abc");
        let start = buffer.generation();
        buffer.replace_range(TextRange::new(3, 3), "d").unwrap();
        assert_eq!(buffer.generation(), start + 1);
    }

    #[test]
    fn test_empty_batch_does_not_bump_generation() {
        let mut buffer = AttributedBuffer::from_str("abc");
        buffer.begin_editing();
        buffer.end_editing();
        buffer.end_editing();
        assert_eq!(buffer.generation(), 0);
    }
}
