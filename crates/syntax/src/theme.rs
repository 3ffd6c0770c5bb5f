// Chunk: docs/chunks/style_theme - Catppuccin Mocha theme for markup styling

//! Style themes mapping node kinds to attribute sets.
//!
//! [`StyleTheme`] is the contract the projector consumes. [`DefaultTheme`]
//! implements it with the Catppuccin Mocha palette: each node kind's style
//! class (see [`NodeKind::style_name`](crate::NodeKind::style_name)) is looked
//! up in a map of [`Style`] declarations, falling back to shorter dotted
//! prefixes, and the matching style is resolved at the current font size.

use std::collections::HashMap;

use markstore_buffer::{AttributeSet, Color, Font, FontTraits, UnderlineStyle};

use crate::config::ThemeConfig;
use crate::error::ThemeError;
use crate::node::Node;

/// Maps syntax nodes to display attributes.
pub trait StyleTheme {
    /// Returns the attributes for `node`, or `None` if the node has no visual
    /// treatment of its own and only inherits.
    fn attributes_for(&self, node: &Node) -> Option<AttributeSet>;

    /// Attributes applied to the whole text before any node attributes.
    fn base_attributes(&self) -> AttributeSet;

    /// The base font, root of the font cascade.
    fn font(&self) -> Font;

    fn font_size(&self) -> f32;

    fn set_font_size(&mut self, size: f32);
}

/// Catppuccin Mocha color palette constants.
///
/// These are 24-bit RGB colors from the Catppuccin Mocha theme.
pub(crate) mod catppuccin {
    use markstore_buffer::Color;

    // Accent colors
    pub const MAUVE: Color = Color::Rgb {
        r: 0xcb,
        g: 0xa6,
        b: 0xf7,
    }; // #cba6f7
    pub const BLUE: Color = Color::Rgb {
        r: 0x89,
        g: 0xb4,
        b: 0xfa,
    }; // #89b4fa
    pub const SAPPHIRE: Color = Color::Rgb {
        r: 0x74,
        g: 0xc7,
        b: 0xec,
    }; // #74c7ec
    pub const GREEN: Color = Color::Rgb {
        r: 0xa6,
        g: 0xe3,
        b: 0xa1,
    }; // #a6e3a1
    pub const PINK: Color = Color::Rgb {
        r: 0xf5,
        g: 0xc2,
        b: 0xe7,
    }; // #f5c2e7
    pub const PEACH: Color = Color::Rgb {
        r: 0xfa,
        g: 0xb3,
        b: 0x87,
    }; // #fab387
    pub const LAVENDER: Color = Color::Rgb {
        r: 0xb4,
        g: 0xbe,
        b: 0xfe,
    }; // #b4befe

    // Surface/text colors
    pub const TEXT: Color = Color::Rgb {
        r: 0xcd,
        g: 0xd6,
        b: 0xf4,
    }; // #cdd6f4
    pub const OVERLAY0: Color = Color::Rgb {
        r: 0x6c,
        g: 0x70,
        b: 0x86,
    }; // #6c7086
    pub const SUBTEXT0: Color = Color::Rgb {
        r: 0xa6,
        g: 0xad,
        b: 0xc8,
    }; // #a6adc8
}

/// A style declaration for one style class.
///
/// Colors left at [`Color::Default`] are not written, so the inherited color
/// shows through. `bold`, `italic` and `monospace` become a font traits
/// directive and cascade into nested nodes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Style {
    pub fg: Color,
    pub bg: Color,
    pub bold: bool,
    pub italic: bool,
    /// Switch to the theme's monospace family.
    pub monospace: bool,
    pub underline: UnderlineStyle,
    pub strikethrough: bool,
    /// Font size relative to the theme's base size.
    pub scale: f32,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            fg: Color::Default,
            bg: Color::Default,
            bold: false,
            italic: false,
            monospace: false,
            underline: UnderlineStyle::None,
            strikethrough: false,
            scale: 1.0,
        }
    }
}

impl Style {
    fn traits(&self) -> FontTraits {
        let mut traits = FontTraits::NONE;
        if self.bold {
            traits |= FontTraits::BOLD;
        }
        if self.italic {
            traits |= FontTraits::ITALIC;
        }
        if self.monospace {
            traits |= FontTraits::MONOSPACE;
        }
        traits
    }
}

/// The built-in theme.
#[derive(Debug, Clone)]
pub struct DefaultTheme {
    /// Map from style class to style
    styles: HashMap<String, Style>,
    font_family: String,
    monospace_family: String,
    font_size: f32,
    foreground: Color,
    background: Color,
}

impl Default for DefaultTheme {
    fn default() -> Self {
        Self::catppuccin_mocha()
    }
}

impl DefaultTheme {
    pub const DEFAULT_FONT_FAMILY: &'static str = "system-ui";
    pub const DEFAULT_MONOSPACE_FAMILY: &'static str = "monospace";
    pub const DEFAULT_FONT_SIZE: f32 = 16.0;

    /// Creates the Catppuccin Mocha markup theme.
    pub fn catppuccin_mocha() -> Self {
        let mut styles = HashMap::new();
        let mut insert = |name: &str, style: Style| {
            styles.insert(name.to_string(), style);
        };

        // Headings - Mauve (bold), scaled by level
        let title = Style {
            fg: catppuccin::MAUVE,
            bold: true,
            ..Style::default()
        };
        insert("text.title", title);
        insert("text.title.1", Style { scale: 1.6, ..title });
        insert("text.title.2", Style { scale: 1.4, ..title });
        insert("text.title.3", Style { scale: 1.2, ..title });

        insert(
            "text.emphasis",
            Style {
                italic: true,
                ..Style::default()
            },
        );
        insert(
            "text.strong",
            Style {
                bold: true,
                ..Style::default()
            },
        );
        insert(
            "text.strike",
            Style {
                strikethrough: true,
                ..Style::default()
            },
        );

        // Code - Green, monospace
        insert(
            "text.literal",
            Style {
                fg: catppuccin::GREEN,
                monospace: true,
                scale: 0.9,
                ..Style::default()
            },
        );

        // URIs - Blue with underline
        insert(
            "text.uri",
            Style {
                fg: catppuccin::BLUE,
                underline: UnderlineStyle::Single,
                ..Style::default()
            },
        );
        // Links - Lavender
        insert(
            "text.reference",
            Style {
                fg: catppuccin::LAVENDER,
                ..Style::default()
            },
        );
        insert(
            "text.reference.image",
            Style {
                fg: catppuccin::SAPPHIRE,
                ..Style::default()
            },
        );

        // Quotes - Overlay0 with italic
        insert(
            "text.quote",
            Style {
                fg: catppuccin::OVERLAY0,
                italic: true,
                ..Style::default()
            },
        );
        insert(
            "text.html",
            Style {
                fg: catppuccin::PEACH,
                ..Style::default()
            },
        );

        // Markup punctuation (# for headings, * for emphasis, ``` fences) - Subtext0
        insert(
            "punctuation.special",
            Style {
                fg: catppuccin::SUBTEXT0,
                ..Style::default()
            },
        );
        insert(
            "escape",
            Style {
                fg: catppuccin::PINK,
                ..Style::default()
            },
        );

        Self {
            styles,
            font_family: Self::DEFAULT_FONT_FAMILY.to_string(),
            monospace_family: Self::DEFAULT_MONOSPACE_FAMILY.to_string(),
            font_size: Self::DEFAULT_FONT_SIZE,
            foreground: catppuccin::TEXT,
            background: Color::Default,
        }
    }

    /// Builds a theme from configuration, layering its overrides on the
    /// Catppuccin Mocha defaults.
    pub fn from_config(config: &ThemeConfig) -> Result<Self, ThemeError> {
        if !config.font_size.is_finite() || config.font_size <= 0.0 {
            return Err(ThemeError::InvalidFontSize(config.font_size));
        }

        let mut theme = Self::catppuccin_mocha();
        theme.font_family = config.font_family.clone();
        theme.monospace_family = config.monospace_family.clone();
        theme.font_size = config.font_size;
        if let Some(hex) = &config.foreground {
            theme.foreground = parse_color(hex)?;
        }
        if let Some(hex) = &config.background {
            theme.background = parse_color(hex)?;
        }

        for (class, overrides) in &config.styles {
            let style = theme.styles.entry(class.clone()).or_default();
            overrides.apply(class, style)?;
        }

        tracing::debug!(
            styles = theme.styles.len(),
            font = %theme.font_family,
            size = theme.font_size,
            "built theme from config"
        );
        Ok(theme)
    }

    /// Returns the style for a style class, if defined.
    ///
    /// First tries an exact match, then tries prefix matching
    /// (e.g., "text.title.4" would match "text.title").
    pub fn style_for_class(&self, name: &str) -> Option<&Style> {
        // Try exact match first
        if let Some(style) = self.styles.get(name) {
            return Some(style);
        }

        // Try progressively shorter prefixes
        let mut prefix = name;
        while let Some(dot_pos) = prefix.rfind('.') {
            prefix = &prefix[..dot_pos];
            if let Some(style) = self.styles.get(prefix) {
                return Some(style);
            }
        }

        None
    }

    /// Resolves a style into attributes at the current font size.
    pub fn resolve(&self, style: &Style) -> AttributeSet {
        let mut attributes = AttributeSet::new();

        let traits = style.traits();
        if !traits.is_empty() {
            attributes = attributes.with_font_traits(traits);
        }
        if style.monospace || style.scale != 1.0 {
            let family = if style.monospace {
                &self.monospace_family
            } else {
                &self.font_family
            };
            attributes.set_font(Font::new(family.as_str(), self.font_size * style.scale));
        }
        if style.fg != Color::Default {
            attributes = attributes.with_foreground(style.fg);
        }
        if style.bg != Color::Default {
            attributes = attributes.with_background(style.bg);
        }
        if style.underline != UnderlineStyle::None {
            attributes = attributes.with_underline(style.underline);
        }
        if style.strikethrough {
            attributes = attributes.with_strikethrough(true);
        }
        attributes
    }
}

impl StyleTheme for DefaultTheme {
    fn attributes_for(&self, node: &Node) -> Option<AttributeSet> {
        let style = self.style_for_class(node.kind.style_name()?)?;
        let attributes = self.resolve(style);
        (!attributes.is_empty()).then_some(attributes)
    }

    fn base_attributes(&self) -> AttributeSet {
        let mut attributes = AttributeSet::new()
            .with_font(self.font())
            .with_foreground(self.foreground);
        if self.background != Color::Default {
            attributes = attributes.with_background(self.background);
        }
        attributes
    }

    fn font(&self) -> Font {
        Font::new(self.font_family.as_str(), self.font_size)
    }

    fn font_size(&self) -> f32 {
        self.font_size
    }

    fn set_font_size(&mut self, size: f32) {
        self.font_size = size;
    }
}

pub(crate) fn parse_color(hex: &str) -> Result<Color, ThemeError> {
    Color::from_hex(hex).ok_or_else(|| ThemeError::InvalidColor(hex.to_string()))
}
