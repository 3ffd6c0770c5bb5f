// Chunk: docs/chunks/attributed_buffer - Attribute model for styled ranges
//!
//! Display attributes applied to ranges of text.
//!
//! An [`AttributeSet`] maps [`AttributeKey`]s to [`AttributeValue`]s. Writing
//! one set over another (an overlay) replaces only the keys present in the
//! incoming set, so narrower ranges written later refine wider ones.
//!
//! # Font traits
//!
//! [`AttributeKey::FontTraits`] is a directive rather than a literal
//! attribute: it carries [`FontTraits`] to merge into whatever font the range
//! inherits. The projector resolves it into a concrete [`AttributeKey::Font`]
//! entry before the set reaches a buffer.

use std::collections::BTreeMap;
use std::fmt;
use std::ops::{BitOr, BitOrAssign};

// =============================================================================
// Color Types
// =============================================================================

/// The 16 standard ANSI colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NamedColor {
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
    BrightBlack,
    BrightRed,
    BrightGreen,
    BrightYellow,
    BrightBlue,
    BrightMagenta,
    BrightCyan,
    BrightWhite,
}

/// Text color.
///
/// - Default (let the host surface decide)
/// - Named ANSI colors (16 colors)
/// - Indexed (256-color palette)
/// - True color RGB (24-bit)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Color {
    /// Default foreground/background (host decides).
    #[default]
    Default,
    /// Named ANSI colors (0-15).
    Named(NamedColor),
    /// 256-color palette index.
    Indexed(u8),
    /// 24-bit RGB color.
    Rgb { r: u8, g: u8, b: u8 },
}

impl Color {
    /// Parses a `#rrggbb` (or `rrggbb`) hex color.
    ///
    /// ```
    /// use markstore_buffer::Color;
    ///
    /// assert_eq!(Color::from_hex("#cba6f7"), Some(Color::Rgb { r: 0xcb, g: 0xa6, b: 0xf7 }));
    /// assert_eq!(Color::from_hex("#xyz"), None);
    /// ```
    pub fn from_hex(hex: &str) -> Option<Self> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if digits.len() != 6 || !digits.is_ascii() {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();
        Some(Color::Rgb {
            r: channel(0)?,
            g: channel(2)?,
            b: channel(4)?,
        })
    }
}

// =============================================================================
// Underline Types
// =============================================================================

/// Underline rendering style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnderlineStyle {
    /// No underline.
    #[default]
    None,
    /// Single straight underline.
    Single,
    /// Double straight underline.
    Double,
    /// Curly/wavy underline (often used for spelling errors).
    Curly,
    /// Dotted underline.
    Dotted,
    /// Dashed underline.
    Dashed,
}

// =============================================================================
// Fonts
// =============================================================================

/// Symbolic font traits.
///
/// Traits are additive: merging `BOLD` into an `ITALIC` font yields a bold
/// italic font, never a replacement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct FontTraits(u8);

impl FontTraits {
    pub const NONE: FontTraits = FontTraits(0);
    pub const BOLD: FontTraits = FontTraits(1 << 0);
    pub const ITALIC: FontTraits = FontTraits(1 << 1);
    pub const MONOSPACE: FontTraits = FontTraits(1 << 2);

    /// Returns the raw bit representation.
    pub fn bits(self) -> u8 {
        self.0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Returns true if every trait in `other` is also set here.
    pub fn contains(self, other: FontTraits) -> bool {
        self.0 & other.0 == other.0
    }

    pub fn union(self, other: FontTraits) -> FontTraits {
        FontTraits(self.0 | other.0)
    }
}

impl BitOr for FontTraits {
    type Output = FontTraits;

    fn bitor(self, rhs: FontTraits) -> FontTraits {
        self.union(rhs)
    }
}

impl BitOrAssign for FontTraits {
    fn bitor_assign(&mut self, rhs: FontTraits) {
        *self = self.union(rhs);
    }
}

impl fmt::Display for FontTraits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = [
            (FontTraits::BOLD, "bold"),
            (FontTraits::ITALIC, "italic"),
            (FontTraits::MONOSPACE, "monospace"),
        ]
        .into_iter()
        .filter(|(flag, _)| self.contains(*flag))
        .map(|(_, name)| name)
        .collect();

        if names.is_empty() {
            f.write_str("regular")
        } else {
            f.write_str(&names.join("+"))
        }
    }
}

/// A font description: family, point size and symbolic traits.
#[derive(Debug, Clone, PartialEq)]
pub struct Font {
    pub family: String,
    pub size: f32,
    pub traits: FontTraits,
}

impl Font {
    pub fn new(family: impl Into<String>, size: f32) -> Self {
        Self {
            family: family.into(),
            size,
            traits: FontTraits::NONE,
        }
    }

    /// Returns a copy of this font with `traits` merged into its own.
    pub fn adding_traits(&self, traits: FontTraits) -> Font {
        Font {
            traits: self.traits | traits,
            ..self.clone()
        }
    }

    /// Returns a copy of this font at a different point size.
    pub fn with_size(&self, size: f32) -> Font {
        Font {
            size,
            ..self.clone()
        }
    }
}

// =============================================================================
// Attribute Sets
// =============================================================================

/// Keys of an [`AttributeSet`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AttributeKey {
    /// A concrete [`Font`].
    Font,
    /// [`FontTraits`] to merge into the inherited font.
    FontTraits,
    Foreground,
    Background,
    Underline,
    /// Underline color (absent = use the foreground color).
    UnderlineColor,
    Strikethrough,
}

/// Values stored in an [`AttributeSet`].
#[derive(Debug, Clone, PartialEq)]
pub enum AttributeValue {
    Font(Font),
    Traits(FontTraits),
    Color(Color),
    Underline(UnderlineStyle),
    Flag(bool),
}

/// A mapping from attribute keys to values, applied to a range of text.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AttributeSet {
    entries: BTreeMap<AttributeKey, AttributeValue>,
}

impl AttributeSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, key: AttributeKey) -> Option<&AttributeValue> {
        self.entries.get(&key)
    }

    pub fn contains(&self, key: AttributeKey) -> bool {
        self.entries.contains_key(&key)
    }

    /// Inserts a value, returning the previous one for that key.
    pub fn insert(&mut self, key: AttributeKey, value: AttributeValue) -> Option<AttributeValue> {
        self.entries.insert(key, value)
    }

    pub fn remove(&mut self, key: AttributeKey) -> Option<AttributeValue> {
        self.entries.remove(&key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&AttributeKey, &AttributeValue)> {
        self.entries.iter()
    }

    /// Writes every entry of `other` over this set.
    ///
    /// Keys absent from `other` keep their current values.
    pub fn overlay(&mut self, other: &AttributeSet) {
        for (key, value) in &other.entries {
            self.entries.insert(*key, value.clone());
        }
    }

    /// Returns this set with `other` overlaid on top.
    pub fn overlaid(&self, other: &AttributeSet) -> AttributeSet {
        let mut merged = self.clone();
        merged.overlay(other);
        merged
    }

    // ==================== Typed accessors ====================

    pub fn with_font(mut self, font: Font) -> Self {
        self.set_font(font);
        self
    }

    pub fn set_font(&mut self, font: Font) {
        self.entries.insert(AttributeKey::Font, AttributeValue::Font(font));
    }

    pub fn font(&self) -> Option<&Font> {
        match self.entries.get(&AttributeKey::Font) {
            Some(AttributeValue::Font(font)) => Some(font),
            _ => None,
        }
    }

    pub fn with_font_traits(mut self, traits: FontTraits) -> Self {
        self.entries
            .insert(AttributeKey::FontTraits, AttributeValue::Traits(traits));
        self
    }

    pub fn font_traits(&self) -> Option<FontTraits> {
        match self.entries.get(&AttributeKey::FontTraits) {
            Some(AttributeValue::Traits(traits)) => Some(*traits),
            _ => None,
        }
    }

    /// Removes and returns the font traits directive, if any.
    pub fn take_font_traits(&mut self) -> Option<FontTraits> {
        match self.entries.remove(&AttributeKey::FontTraits) {
            Some(AttributeValue::Traits(traits)) => Some(traits),
            _ => None,
        }
    }

    pub fn with_foreground(mut self, color: Color) -> Self {
        self.entries
            .insert(AttributeKey::Foreground, AttributeValue::Color(color));
        self
    }

    pub fn foreground(&self) -> Option<Color> {
        self.color(AttributeKey::Foreground)
    }

    pub fn with_background(mut self, color: Color) -> Self {
        self.entries
            .insert(AttributeKey::Background, AttributeValue::Color(color));
        self
    }

    pub fn background(&self) -> Option<Color> {
        self.color(AttributeKey::Background)
    }

    pub fn with_underline(mut self, style: UnderlineStyle) -> Self {
        self.entries
            .insert(AttributeKey::Underline, AttributeValue::Underline(style));
        self
    }

    pub fn underline(&self) -> Option<UnderlineStyle> {
        match self.entries.get(&AttributeKey::Underline) {
            Some(AttributeValue::Underline(style)) => Some(*style),
            _ => None,
        }
    }

    pub fn with_underline_color(mut self, color: Color) -> Self {
        self.entries
            .insert(AttributeKey::UnderlineColor, AttributeValue::Color(color));
        self
    }

    pub fn with_strikethrough(mut self, enabled: bool) -> Self {
        self.entries
            .insert(AttributeKey::Strikethrough, AttributeValue::Flag(enabled));
        self
    }

    pub fn strikethrough(&self) -> Option<bool> {
        match self.entries.get(&AttributeKey::Strikethrough) {
            Some(AttributeValue::Flag(enabled)) => Some(*enabled),
            _ => None,
        }
    }

    fn color(&self, key: AttributeKey) -> Option<Color> {
        match self.entries.get(&key) {
            Some(AttributeValue::Color(color)) => Some(*color),
            _ => None,
        }
    }
}

impl FromIterator<(AttributeKey, AttributeValue)> for AttributeSet {
    fn from_iter<I: IntoIterator<Item = (AttributeKey, AttributeValue)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}
