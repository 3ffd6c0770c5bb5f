// Chunk: docs/chunks/attributed_buffer - Byte ranges over the text

/// A half-open byte range `[start, end)` into the text.
///
/// Offsets are UTF-8 byte offsets, matching what the parser reports for
/// node boundaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TextRange {
    pub start: usize,
    pub end: usize,
}

impl TextRange {
    /// Creates a new range. `end` is raised to `start` if it is smaller.
    pub fn new(start: usize, end: usize) -> Self {
        Self {
            start,
            end: end.max(start),
        }
    }

    /// Creates a range starting at `start` spanning `len` bytes.
    pub fn with_len(start: usize, len: usize) -> Self {
        Self {
            start,
            end: start + len,
        }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Returns true if `offset` falls inside the range.
    pub fn contains(&self, offset: usize) -> bool {
        offset >= self.start && offset < self.end
    }

    /// Returns true if `other` lies entirely within this range.
    pub fn contains_range(&self, other: TextRange) -> bool {
        other.start >= self.start && other.end <= self.end
    }

    /// Returns the overlapping part of two ranges, if they overlap at all.
    pub fn intersection(&self, other: TextRange) -> Option<TextRange> {
        let start = self.start.max(other.start);
        let end = self.end.min(other.end);
        if start < end {
            Some(TextRange { start, end })
        } else {
            None
        }
    }

    /// Clamps both ends to `len`.
    pub fn clamp_to(&self, len: usize) -> TextRange {
        TextRange {
            start: self.start.min(len),
            end: self.end.min(len),
        }
    }
}

impl From<std::ops::Range<usize>> for TextRange {
    fn from(range: std::ops::Range<usize>) -> Self {
        TextRange::new(range.start, range.end)
    }
}

impl From<TextRange> for std::ops::Range<usize> {
    fn from(range: TextRange) -> Self {
        range.start..range.end
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn new_normalizes_inverted_range() {
        let range = TextRange::new(5, 2);
        assert_eq!(range, TextRange::new(5, 5));
        assert!(range.is_empty());
    }

    #[test]
    fn with_len_spans_bytes() {
        let range = TextRange::with_len(3, 4);
        assert_eq!(range.end, 7);
        assert_eq!(range.len(), 4);
    }

    #[rstest]
    #[case(0, true)]
    #[case(4, true)]
    #[case(5, false)]
    #[case(10, false)]
    fn contains_is_half_open(#[case] offset: usize, #[case] expected: bool) {
        let range = TextRange::new(0, 5);
        assert_eq!(range.contains(offset), expected);
    }

    #[rstest]
    #[case(TextRange::new(2, 5), TextRange::new(0, 10), Some(TextRange::new(2, 5)))]
    #[case(TextRange::new(0, 5), TextRange::new(3, 8), Some(TextRange::new(3, 5)))]
    #[case(TextRange::new(0, 3), TextRange::new(3, 8), None)]
    fn intersection_of_ranges(
        #[case] a: TextRange,
        #[case] b: TextRange,
        #[case] expected: Option<TextRange>,
    ) {
        assert_eq!(a.intersection(b), expected);
        assert_eq!(b.intersection(a), expected);
    }

    #[test]
    fn contains_range_nested() {
        let parent = TextRange::new(0, 10);
        assert!(parent.contains_range(TextRange::new(2, 5)));
        assert!(parent.contains_range(parent));
        assert!(!parent.contains_range(TextRange::new(8, 12)));
    }

    #[test]
    fn clamp_to_shortens_past_end() {
        assert_eq!(TextRange::new(4, 20).clamp_to(8), TextRange::new(4, 8));
        assert_eq!(TextRange::new(12, 20).clamp_to(8), TextRange::new(8, 8));
    }

    #[test]
    fn converts_from_std_range() {
        let range: TextRange = (1..4).into();
        assert_eq!(range, TextRange::new(1, 4));
        let back: std::ops::Range<usize> = range.into();
        assert_eq!(back, 1..4);
    }
}
