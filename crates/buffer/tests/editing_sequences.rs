// Chunk: docs/chunks/attributed_buffer - Attributed text buffer with overlay writes

//! Integration tests for realistic editing sequences.
//!
//! These tests verify that text and attribute runs stay in sync through
//! typing, deleting and restyling.

use markstore_buffer::{
    AttributeSet, AttributedBuffer, Color, FontTraits, NamedColor, TextRange, TextSurface,
};

fn base() -> AttributeSet {
    AttributeSet::new().with_foreground(Color::Named(NamedColor::White))
}

fn assert_covering(buffer: &AttributedBuffer) {
    let covered: usize = buffer.runs().iter().map(|run| run.range.len()).sum();
    assert_eq!(covered, buffer.len(), "runs should cover {:?}", buffer.text());
}

#[test]
fn test_type_word_then_delete_entirely() {
    let mut buf = AttributedBuffer::new();

    for (i, ch) in "hello".char_indices() {
        buf.replace_range(TextRange::new(i, i), &ch.to_string())
            .unwrap();
    }
    assert_eq!(buf.text(), "hello");
    assert_eq!(buf.runs().len(), 1);

    for end in (1..=5).rev() {
        buf.replace_range(TextRange::new(end - 1, end), "").unwrap();
    }
    assert!(buf.is_empty());
    assert!(buf.runs().is_empty());
}

#[test]
fn test_typing_inside_styled_word_extends_style() {
    let mut buf = AttributedBuffer::from_str("say *hi* now");
    buf.set_attributes(buf.bounds(), &base());
    let italic = AttributeSet::new().with_font_traits(FontTraits::ITALIC);
    buf.add_attributes(TextRange::new(4, 8), &italic);

    // Type inside the emphasis: "*hi*" -> "*hiya*"
    buf.replace_range(TextRange::new(7, 7), "ya").unwrap();

    assert_eq!(buf.text(), "say *hiya* now");
    let styled = base().overlaid(&italic);
    for offset in 4..10 {
        assert_eq!(buf.attributes_at(offset), Some(&styled), "offset {offset}");
    }
    assert_eq!(buf.attributes_at(10), Some(&base()));
    assert_covering(&buf);
}

#[test]
fn test_replace_across_runs_then_restyle() {
    let mut buf = AttributedBuffer::from_str("one two three");
    buf.set_attributes(TextRange::new(0, 3), &base());
    buf.set_attributes(
        TextRange::new(4, 7),
        &AttributeSet::new().with_font_traits(FontTraits::BOLD),
    );

    // Replace "e two t" spanning three runs
    buf.replace_range(TextRange::new(2, 9), "_").unwrap();
    assert_eq!(buf.text(), "on_hree");
    assert_eq!(buf.attributes_at(2), Some(&base()));
    assert_covering(&buf);

    // A full reset leaves a single run
    buf.set_attributes(buf.bounds(), &base());
    assert_eq!(buf.runs().len(), 1);
    assert_eq!(buf.runs()[0].range, TextRange::new(0, 7));
}

#[test]
fn test_multibyte_text_edits() {
    let mut buf = AttributedBuffer::from_str("caf\u{e9} \u{1F600}");
    buf.set_attributes(buf.bounds(), &base());

    let emoji_start = buf.text().find('\u{1F600}').unwrap();
    buf.replace_range(TextRange::new(emoji_start, emoji_start + 4), "!")
        .unwrap();

    assert_eq!(buf.text(), "caf\u{e9} !");
    assert_eq!(buf.attributes_at(emoji_start), Some(&base()));
    assert_covering(&buf);
}

#[test]
fn test_surface_is_object_safe() {
    let mut buf = AttributedBuffer::from_str("abc");
    let surface: &mut dyn TextSurface = &mut buf;
    surface.begin_editing();
    surface.set_attributes(surface.bounds(), &base());
    surface.end_editing();
    assert_eq!(surface.len(), 3);
    assert_eq!(buf.generation(), 1);
}
