//! Options for the hex text form of a metafile.

use crate::common::hex::LineEnding;

/// Hex characters per line for DIB palette data.
pub const DEFAULT_PALETTE_WRAP: usize = 64;

/// Hex characters per line for DIB pixel data.
pub const DEFAULT_BITMAP_WRAP: usize = 76;

/// Text writer options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextOptions {
    /// Line terminator inserted after the header, inside DIB payloads
    /// and after every wrapped palette or pixel line
    pub line_ending: LineEnding,
    /// Wrap width for palette hex, in hex characters
    pub palette_wrap: usize,
    /// Wrap width for pixel hex, in hex characters
    pub bitmap_wrap: usize,
}

impl Default for TextOptions {
    fn default() -> Self {
        Self {
            line_ending: LineEnding::Lf,
            palette_wrap: DEFAULT_PALETTE_WRAP,
            bitmap_wrap: DEFAULT_BITMAP_WRAP,
        }
    }
}

impl TextOptions {
    /// Same options with a different line terminator.
    pub fn with_line_ending(mut self, line_ending: LineEnding) -> Self {
        self.line_ending = line_ending;
        self
    }
}
