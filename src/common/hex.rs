//! Hex-dump routines for the text form of a metafile.
//!
//! The text form carries the same little-endian bytes as the binary form,
//! rendered as lowercase hex pairs without separators, so that it can be
//! pasted verbatim into a host document (for example an RTF `\pict` group).
//!
//! # Examples
//!
//! ```
//! use litchi_wmf::common::hex::{print16, print32};
//!
//! let mut out = Vec::new();
//! print16(&mut out, 0x1234).unwrap();
//! print32(&mut out, 0x01020304).unwrap();
//! assert_eq!(out, b"341204030201");
//! ```

use crate::common::error::Result;
use std::io::Write;

/// Line terminator used between wrapped hex lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineEnding {
    /// `\n`
    #[default]
    Lf,
    /// `\r\n`, the separator Windows hosts write
    CrLf,
}

impl LineEnding {
    /// The terminator as a string.
    #[inline]
    pub const fn as_str(self) -> &'static str {
        match self {
            LineEnding::Lf => "\n",
            LineEnding::CrLf => "\r\n",
        }
    }

    /// Write the terminator to `writer`.
    #[inline]
    pub fn write_to<W: Write + ?Sized>(self, writer: &mut W) -> Result<()> {
        writer.write_all(self.as_str().as_bytes())?;
        Ok(())
    }
}

/// Write `bytes` as lowercase hex pairs, no separators.
pub fn print<W: Write + ?Sized>(writer: &mut W, bytes: &[u8]) -> Result<()> {
    if !bytes.is_empty() {
        writer.write_all(hex::encode(bytes).as_bytes())?;
    }
    Ok(())
}

/// Write a 16-bit value as two little-endian hex pairs.
#[inline]
pub fn print16<W: Write + ?Sized>(writer: &mut W, word: u16) -> Result<()> {
    print(writer, &word.to_le_bytes())
}

/// Write a 32-bit value as four little-endian hex pairs.
#[inline]
pub fn print32<W: Write + ?Sized>(writer: &mut W, dword: u32) -> Result<()> {
    print(writer, &dword.to_le_bytes())
}

/// Write `bytes` as hex, breaking the line after every `width / 2` input bytes.
///
/// `width` counts hex characters. Every line, including a shorter final one,
/// is terminated with `line_ending`; the last line is not padded. Widths
/// below 2 fall back to one byte per line.
///
/// # Examples
///
/// ```
/// use litchi_wmf::common::hex::{LineEnding, print_wrapped};
///
/// let mut out = Vec::new();
/// print_wrapped(&mut out, &[1, 2, 3, 4, 5], 4, LineEnding::Lf).unwrap();
/// assert_eq!(out, b"0102\n0304\n05\n");
/// ```
pub fn print_wrapped<W: Write + ?Sized>(
    writer: &mut W,
    bytes: &[u8],
    width: usize,
    line_ending: LineEnding,
) -> Result<()> {
    let per_line = (width / 2).max(1);
    for line in bytes.chunks(per_line) {
        print(writer, line)?;
        line_ending.write_to(writer)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(f: impl FnOnce(&mut Vec<u8>) -> Result<()>) -> String {
        let mut out = Vec::new();
        f(&mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_print16_is_little_endian() {
        assert_eq!(render(|w| print16(w, 0x1234)), "3412");
        assert_eq!(render(|w| print16(w, 0xABCD)), "cdab");
    }

    #[test]
    fn test_print32_is_little_endian() {
        assert_eq!(render(|w| print32(w, 0x01020304)), "04030201");
        assert_eq!(render(|w| print32(w, 0xDEADBEEF)), "efbeadde");
    }

    #[test]
    fn test_print_long_input() {
        let data: Vec<u8> = (0..=255).collect();
        let text = render(|w| print(w, &data));
        assert_eq!(text.len(), 512);
        assert!(text.starts_with("000102"));
        assert!(text.ends_with("fdfeff"));
    }

    #[test]
    fn test_wrapped_line_lengths() {
        let data = vec![0xAAu8; 100];
        let text = render(|w| print_wrapped(w, &data, 64, LineEnding::Lf));
        let lines: Vec<&str> = text.split_terminator('\n').collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[..3].iter().all(|l| l.len() == 64));
        assert_eq!(lines[3].len(), 8);
        assert!(text.ends_with('\n'));
    }

    #[test]
    fn test_wrapped_exact_multiple_and_empty() {
        let text = render(|w| print_wrapped(w, &[0u8; 76], 76, LineEnding::CrLf));
        assert_eq!(text.matches("\r\n").count(), 2);
        assert_eq!(render(|w| print_wrapped(w, &[], 76, LineEnding::Lf)), "");
    }

    #[test]
    fn test_wrapped_degenerate_width() {
        let text = render(|w| print_wrapped(w, &[1, 2], 1, LineEnding::Lf));
        assert_eq!(text, "01\n02\n");
    }
}
