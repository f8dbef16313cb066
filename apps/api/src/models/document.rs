//! Render-ready document blocks shared by the tailoring pipeline and the renderer.

use serde::{Deserialize, Serialize};

/// Visual role of a block. The renderer maps each style to a font, size and indent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockStyle {
    /// Large centred line (candidate name).
    Title,
    /// Small centred line (contact details).
    Subtitle,
    /// Underlined section heading.
    Heading,
    /// Plain body text at the left margin.
    Body,
    /// Smaller body text indented under a heading.
    Indented,
    /// Vertical gap of one blank line.
    Spacer,
}

/// One paragraph of text with a style. Embedded newlines are hard line breaks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    pub style: BlockStyle,
    pub text: String,
}

impl Block {
    pub fn new(style: BlockStyle, text: impl Into<String>) -> Self {
        Self {
            style,
            text: text.into(),
        }
    }

    pub fn spacer() -> Self {
        Self::new(BlockStyle::Spacer, "")
    }
}
