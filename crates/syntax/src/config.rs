// Chunk: docs/chunks/theme_config - Theme overrides loaded from JSON

//! Serializable theme configuration.
//!
//! A [`ThemeConfig`] describes fonts, page colors and per-class style
//! overrides. Missing fields fall back to the built-in defaults, so
//! `{}` is a valid configuration.
//!
//! ```
//! use markstore_syntax::{DefaultTheme, StyleTheme, ThemeConfig};
//!
//! let config = ThemeConfig::from_json(r##"{
//!     "font_size": 14.0,
//!     "styles": { "text.strong": { "fg": "#f38ba8" } }
//! }"##).unwrap();
//! let theme = DefaultTheme::from_config(&config).unwrap();
//! assert_eq!(theme.font_size(), 14.0);
//! ```

use std::collections::BTreeMap;

use markstore_buffer::UnderlineStyle;
use serde::{Deserialize, Serialize};

use crate::error::ThemeError;
use crate::theme::{parse_color, DefaultTheme, Style};

/// Top-level theme configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    pub font_family: String,
    pub monospace_family: String,
    pub font_size: f32,
    /// Base text color as `#rrggbb`.
    pub foreground: Option<String>,
    /// Page background as `#rrggbb`. Unset leaves the host background.
    pub background: Option<String>,
    /// Overrides keyed by style class, e.g. `text.title.1`.
    pub styles: BTreeMap<String, StyleConfig>,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            font_family: DefaultTheme::DEFAULT_FONT_FAMILY.to_string(),
            monospace_family: DefaultTheme::DEFAULT_MONOSPACE_FAMILY.to_string(),
            font_size: DefaultTheme::DEFAULT_FONT_SIZE,
            foreground: None,
            background: None,
            styles: BTreeMap::new(),
        }
    }
}

impl ThemeConfig {
    pub fn from_json(json: &str) -> Result<Self, ThemeError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, ThemeError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Overrides for one style class. Unset fields keep the existing value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StyleConfig {
    pub fg: Option<String>,
    pub bg: Option<String>,
    pub bold: Option<bool>,
    pub italic: Option<bool>,
    pub monospace: Option<bool>,
    pub underline: Option<UnderlineConfig>,
    pub strikethrough: Option<bool>,
    pub scale: Option<f32>,
}

/// Underline style names accepted in configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnderlineConfig {
    None,
    Single,
    Double,
    Curly,
    Dotted,
    Dashed,
}

impl From<UnderlineConfig> for UnderlineStyle {
    fn from(config: UnderlineConfig) -> Self {
        match config {
            UnderlineConfig::None => UnderlineStyle::None,
            UnderlineConfig::Single => UnderlineStyle::Single,
            UnderlineConfig::Double => UnderlineStyle::Double,
            UnderlineConfig::Curly => UnderlineStyle::Curly,
            UnderlineConfig::Dotted => UnderlineStyle::Dotted,
            UnderlineConfig::Dashed => UnderlineStyle::Dashed,
        }
    }
}

impl StyleConfig {
    /// Applies these overrides to `style`.
    pub(crate) fn apply(&self, class: &str, style: &mut Style) -> Result<(), ThemeError> {
        if let Some(hex) = &self.fg {
            style.fg = parse_color(hex)?;
        }
        if let Some(hex) = &self.bg {
            style.bg = parse_color(hex)?;
        }
        if let Some(bold) = self.bold {
            style.bold = bold;
        }
        if let Some(italic) = self.italic {
            style.italic = italic;
        }
        if let Some(monospace) = self.monospace {
            style.monospace = monospace;
        }
        if let Some(underline) = self.underline {
            style.underline = underline.into();
        }
        if let Some(strikethrough) = self.strikethrough {
            style.strikethrough = strikethrough;
        }
        if let Some(scale) = self.scale {
            if !scale.is_finite() || scale <= 0.0 {
                return Err(ThemeError::InvalidScale {
                    class: class.to_string(),
                    scale,
                });
            }
            style.scale = scale;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::{Node, NodeKind};
    use crate::theme::StyleTheme;
    use markstore_buffer::{Color, FontTraits, TextRange};

    #[test]
    fn test_empty_config_matches_defaults() {
        let config = ThemeConfig::from_json("{}").unwrap();
        assert_eq!(config, ThemeConfig::default());

        let theme = DefaultTheme::from_config(&config).unwrap();
        let default = DefaultTheme::catppuccin_mocha();
        assert_eq!(theme.font(), default.font());
        assert_eq!(theme.base_attributes(), default.base_attributes());
    }

    #[test]
    fn test_style_override_merges_with_default() {
        let config = ThemeConfig::from_json(
            r##"{ "styles": { "text.emphasis": { "fg": "#f38ba8" } } }"##,
        )
        .unwrap();
        let theme = DefaultTheme::from_config(&config).unwrap();

        let emphasis = Node::new(NodeKind::Emphasis, TextRange::new(0, 3));
        let attributes = theme.attributes_for(&emphasis).unwrap();
        assert_eq!(
            attributes.foreground(),
            Some(Color::Rgb {
                r: 0xf3,
                g: 0x8b,
                b: 0xa8
            })
        );
        // Italic from the built-in style is kept
        assert_eq!(attributes.font_traits(), Some(FontTraits::ITALIC));
    }

    #[test]
    fn test_new_class_and_background() {
        let config = ThemeConfig::from_json(
            r##"{
                "background": "#1e1e2e",
                "styles": { "text.title.4": { "scale": 1.1, "underline": "double" } }
            }"##,
        )
        .unwrap();
        let theme = DefaultTheme::from_config(&config).unwrap();

        let base = theme.base_attributes();
        assert_eq!(base.background(), Color::from_hex("#1e1e2e"));

        let style = theme.style_for_class("text.title.4").unwrap();
        assert_eq!(style.scale, 1.1);
        assert_eq!(style.underline, UnderlineStyle::Double);
    }

    #[test]
    fn test_invalid_color_is_rejected() {
        let config = ThemeConfig {
            foreground: Some("blue".to_string()),
            ..ThemeConfig::default()
        };
        let err = DefaultTheme::from_config(&config).unwrap_err();
        assert!(matches!(err, ThemeError::InvalidColor(ref s) if s == "blue"));
    }

    #[test]
    fn test_invalid_font_size_is_rejected() {
        let config = ThemeConfig {
            font_size: 0.0,
            ..ThemeConfig::default()
        };
        assert!(matches!(
            DefaultTheme::from_config(&config),
            Err(ThemeError::InvalidFontSize(_))
        ));
    }

    #[test]
    fn test_invalid_scale_names_class() {
        let config = ThemeConfig::from_json(r#"{ "styles": { "text.strong": { "scale": -1.0 } } }"#)
            .unwrap();
        let err = DefaultTheme::from_config(&config).unwrap_err();
        assert_eq!(err.to_string(), "invalid scale -1 for style class \"text.strong\"");
    }

    #[test]
    fn test_unknown_style_field_is_a_json_error() {
        let err = ThemeConfig::from_json(r#"{ "styles": { "text.strong": { "colour": "red" } } }"#)
            .unwrap_err();
        assert!(matches!(err, ThemeError::Json(_)));
    }

    #[test]
    fn test_config_serializes_back() {
        let config = ThemeConfig {
            font_size: 13.0,
            ..ThemeConfig::default()
        };
        let json = config.to_json().unwrap();
        assert_eq!(ThemeConfig::from_json(&json).unwrap(), config);
    }
}
