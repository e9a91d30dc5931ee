pub mod line_box;
pub mod line_breaker;
pub mod text_layout;

pub use line_box::{GlyphInfo, Line, PlacedGlyph};
pub use line_breaker::{normalize_newlines, split_lines, wrap_line, wrap_text};
pub use text_layout::{LayoutOptions, TextBlock};

use crate::error::{RenderError, Result};

/// Writing direction of the rendered block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Orientation {
    /// Lines stacked top to bottom, characters left to right.
    #[default]
    Horizontal,
    /// One column, characters top to bottom.
    Vertical,
}

impl TryFrom<i64> for Orientation {
    type Error = RenderError;

    fn try_from(value: i64) -> Result<Self> {
        match value {
            0 => Ok(Orientation::Horizontal),
            1 => Ok(Orientation::Vertical),
            other => Err(RenderError::UnsupportedOrientation(other)),
        }
    }
}

/// Horizontal placement of each line inside the block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Alignment {
    #[default]
    Start,
    Center,
    End,
}

impl From<i64> for Alignment {
    /// 1 centers, 2 aligns to the end, anything else aligns to the start.
    fn from(value: i64) -> Self {
        match value {
            1 => Alignment::Center,
            2 => Alignment::End,
            _ => Alignment::Start,
        }
    }
}

impl Alignment {
    /// Offset of a line of `line_width` inside a block of `block_width`.
    pub fn offset(self, block_width: u32, line_width: u32) -> u32 {
        let slack = block_width.saturating_sub(line_width);
        match self {
            Alignment::Start => 0,
            Alignment::Center => slack / 2,
            Alignment::End => slack,
        }
    }
}

/// Alignment actually used for a request.
///
/// Right-to-left text laid out in visual order reads as a left-anchored
/// block, so the centered default becomes start. Start and end requests are
/// kept.
pub fn effective_alignment(rtl: bool, requested: Alignment) -> Alignment {
    if rtl && requested == Alignment::Center {
        Alignment::Start
    } else {
        requested
    }
}
