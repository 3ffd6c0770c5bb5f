// Chunk: docs/chunks/theme_config - Theme overrides loaded from JSON

use thiserror::Error;

/// Errors raised while building a theme from configuration.
#[derive(Debug, Error)]
pub enum ThemeError {
    #[error("invalid theme config: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid color {0:?}, expected #rrggbb")]
    InvalidColor(String),

    #[error("invalid font size {0}, expected a positive finite size")]
    InvalidFontSize(f32),

    #[error("invalid scale {scale} for style class {class:?}")]
    InvalidScale { class: String, scale: f32 },
}
