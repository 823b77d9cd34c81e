//! Device-independent bitmap payload.
//!
//! A [`Dib`] is the `BITMAPINFOHEADER`, color table and pixel bytes that follow
//! the parameters of a `META_DIBBITBLT` record. Field values are written as
//! given: dimensions, bit depth and compression are not checked against the
//! pixel data.

use super::options::TextOptions;
use super::rle;
use crate::common::error::{Error, Result};
use crate::common::hex;
use std::io::Write;
use zerocopy::{FromBytes, I32, Immutable, IntoBytes, KnownLayout, LE, U16, U32, Unaligned};

/// Size of `BITMAPINFOHEADER` in bytes.
pub const DIB_HEADER_SIZE: u32 = 40;

/// Color planes; always 1.
pub const PLANES: u16 = 1;

/// Bytes of the info header printed on the first text line
/// (size, width, height, planes, bit count).
const TEXT_FIRST_LINE: usize = 16;

/// Bitmap compression type.
///
/// Kept as the raw value so that unknown codes pass through unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Compression(pub u32);

impl Compression {
    /// Uncompressed
    pub const RGB: Self = Self(0);
    /// 8-bit run-length encoding
    pub const RLE8: Self = Self(1);
    /// 4-bit run-length encoding
    pub const RLE4: Self = Self(2);
    /// Uncompressed with color masks
    pub const BITFIELDS: Self = Self(3);
}

/// On-disk `BITMAPINFOHEADER`
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromBytes, IntoBytes, Immutable, KnownLayout, Unaligned)]
#[repr(C)]
pub struct BitmapInfoHeader {
    pub size: U32<LE>,
    pub width: I32<LE>,
    pub height: I32<LE>,
    pub planes: U16<LE>,
    pub bit_count: U16<LE>,
    pub compression: U32<LE>,
    pub size_image: U32<LE>,
    pub x_pels_per_meter: U32<LE>,
    pub y_pels_per_meter: U32<LE>,
    pub clr_used: U32<LE>,
    pub clr_important: U32<LE>,
}

impl BitmapInfoHeader {
    /// Read the header from the start of `data`.
    pub fn parse(data: &[u8]) -> Result<Self> {
        Self::read_from_prefix(data)
            .map(|(header, _)| header)
            .map_err(|_| Error::InsufficientData {
                expected: DIB_HEADER_SIZE as usize,
                available: data.len(),
            })
    }
}

/// In-memory DIB
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dib {
    /// Image width in pixels
    pub width: i32,
    /// Image height in pixels; positive for bottom-up rows
    pub height: i32,
    /// Bits per pixel
    pub bit_count: u16,
    /// Compression type
    pub compression: Compression,
    /// Size of the pixel data in bytes; 0 means "the whole bitmap buffer"
    pub size_image: u32,
    /// Horizontal resolution in pixels per meter
    pub x_pels_per_meter: u32,
    /// Vertical resolution in pixels per meter
    pub y_pels_per_meter: u32,
    /// Number of color table entries used
    pub clr_used: u32,
    /// Number of colors required to display the image
    pub clr_important: u32,
    /// Color table, four bytes (blue, green, red, reserved) per entry
    pub palette: Vec<u8>,
    /// Pixel data
    pub bitmap: Vec<u8>,
}

impl Dib {
    /// Create an empty bitmap with the given geometry.
    pub fn new(width: i32, height: i32, bit_count: u16) -> Self {
        Self {
            width,
            height,
            bit_count,
            ..Self::default()
        }
    }

    /// Build an RLE8-compressed 8-bit bitmap from palette indices.
    ///
    /// `pixels` holds `width` bytes per row, bottom row first. Every row ends
    /// with an end-of-line escape and the data with an end-of-bitmap escape.
    /// `clr_used` is derived from the palette length.
    pub fn indexed_rle8(width: i32, height: i32, palette: Vec<u8>, pixels: &[u8]) -> Self {
        let row_len = usize::try_from(width).unwrap_or(0);
        let bitmap = rle::encode_rows(pixels, row_len);
        Self {
            width,
            height,
            bit_count: 8,
            compression: Compression::RLE8,
            size_image: saturate(bitmap.len()),
            clr_used: saturate(palette.len() / 4),
            palette,
            bitmap,
            ..Self::default()
        }
    }

    /// Set the color table.
    pub fn with_palette(mut self, palette: Vec<u8>) -> Self {
        self.palette = palette;
        self
    }

    /// Set the pixel data.
    pub fn with_bitmap(mut self, bitmap: Vec<u8>) -> Self {
        self.bitmap = bitmap;
        self
    }

    /// Set the compression type and the declared pixel data size.
    pub fn with_compression(mut self, compression: Compression, size_image: u32) -> Self {
        self.compression = compression;
        self.size_image = size_image;
        self
    }

    /// Set the resolution in pixels per meter.
    pub fn with_resolution(mut self, x_pels_per_meter: u32, y_pels_per_meter: u32) -> Self {
        self.x_pels_per_meter = x_pels_per_meter;
        self.y_pels_per_meter = y_pels_per_meter;
        self
    }

    /// Serialized size in 16-bit words.
    ///
    /// An odd byte count is truncated, dropping the last half-word from the
    /// accounting while the bytes themselves are still written.
    pub fn size(&self) -> u32 {
        let bytes = u64::from(DIB_HEADER_SIZE) + self.palette.len() as u64 + self.pixel_len() as u64;
        u32::try_from(bytes / 2).unwrap_or(u32::MAX)
    }

    /// The info header for the current field values.
    pub fn info_header(&self) -> BitmapInfoHeader {
        BitmapInfoHeader {
            size: U32::new(DIB_HEADER_SIZE),
            width: I32::new(self.width),
            height: I32::new(self.height),
            planes: U16::new(PLANES),
            bit_count: U16::new(self.bit_count),
            compression: U32::new(self.compression.0),
            size_image: U32::new(self.size_image),
            x_pels_per_meter: U32::new(self.x_pels_per_meter),
            y_pels_per_meter: U32::new(self.y_pels_per_meter),
            clr_used: U32::new(self.clr_used),
            clr_important: U32::new(self.clr_important),
        }
    }

    /// Write header, palette and pixels as little-endian bytes.
    pub fn write_binary<W: Write + ?Sized>(&self, writer: &mut W) -> Result<()> {
        let pixels = self.pixels()?;
        writer.write_all(self.info_header().as_bytes())?;
        writer.write_all(&self.palette)?;
        writer.write_all(pixels)?;
        Ok(())
    }

    /// Write the same bytes as hex text.
    ///
    /// The info header takes two lines; palette and pixel data are wrapped at
    /// the widths in `options`.
    pub fn write_text<W: Write + ?Sized>(&self, writer: &mut W, options: &TextOptions) -> Result<()> {
        let pixels = self.pixels()?;
        let header = self.info_header();
        let (first, second) = header.as_bytes().split_at(TEXT_FIRST_LINE);

        hex::print(writer, first)?;
        options.line_ending.write_to(writer)?;
        hex::print(writer, second)?;
        options.line_ending.write_to(writer)?;

        hex::print_wrapped(writer, &self.palette, options.palette_wrap, options.line_ending)?;
        hex::print_wrapped(writer, pixels, options.bitmap_wrap, options.line_ending)?;
        Ok(())
    }

    #[inline]
    fn pixel_len(&self) -> usize {
        if self.size_image != 0 {
            self.size_image as usize
        } else {
            self.bitmap.len()
        }
    }

    /// Fail with [`Error::TruncatedBitmap`] if the declared pixel data is
    /// longer than the buffer.
    pub(crate) fn validate(&self) -> Result<()> {
        self.pixels().map(|_| ())
    }

    fn pixels(&self) -> Result<&[u8]> {
        self.bitmap
            .get(..self.pixel_len())
            .ok_or(Error::TruncatedBitmap {
                size_image: self.size_image,
                available: self.bitmap.len(),
            })
    }
}

#[inline]
fn saturate(len: usize) -> u32 {
    u32::try_from(len).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Dib {
        Dib::new(2, 1, 8)
            .with_palette(vec![0, 0, 0, 0, 0xFF, 0xFF, 0xFF, 0])
            .with_bitmap(vec![0, 1, 0, 0])
            .with_resolution(2835, 2835)
    }

    #[test]
    fn test_header_layout() {
        assert_eq!(std::mem::size_of::<BitmapInfoHeader>(), DIB_HEADER_SIZE as usize);
    }

    #[test]
    fn test_size_truncates_odd_byte_count() {
        let dib = Dib::new(10, 10, 8)
            .with_palette(vec![0; 16])
            .with_bitmap(vec![0; 101]);
        assert_eq!(dib.size(), (40 + 16 + 101) / 2);
        assert_eq!(dib.size(), 78);
    }

    #[test]
    fn test_size_prefers_size_image() {
        let dib = Dib::new(1, 1, 8)
            .with_bitmap(vec![0; 64])
            .with_compression(Compression::RLE8, 10);
        assert_eq!(dib.size(), 25);
    }

    #[test]
    fn test_write_binary() {
        let dib = sample();
        let mut out = Vec::new();
        dib.write_binary(&mut out).unwrap();
        assert_eq!(out.len(), 40 + 8 + 4);

        let header = BitmapInfoHeader::parse(&out).unwrap();
        assert_eq!(header.size.get(), 40);
        assert_eq!(header.width.get(), 2);
        assert_eq!(header.height.get(), 1);
        assert_eq!(header.planes.get(), 1);
        assert_eq!(header.bit_count.get(), 8);
        assert_eq!(header.compression.get(), 0);
        assert_eq!(header.x_pels_per_meter.get(), 2835);
        assert_eq!(&out[40..48], &dib.palette[..]);
        assert_eq!(&out[48..], &[0, 1, 0, 0]);
    }

    #[test]
    fn test_write_binary_honors_size_image() {
        let dib = Dib::new(4, 1, 8)
            .with_bitmap(vec![9, 8, 7, 6, 5, 4])
            .with_compression(Compression::RLE8, 4);
        let mut out = Vec::new();
        dib.write_binary(&mut out).unwrap();
        assert_eq!(&out[40..], &[9, 8, 7, 6]);
    }

    #[test]
    fn test_unknown_fields_pass_through() {
        let dib = Dib::new(-3, 0, 7).with_compression(Compression(9), 0);
        let mut out = Vec::new();
        dib.write_binary(&mut out).unwrap();
        let header = BitmapInfoHeader::parse(&out).unwrap();
        assert_eq!(header.width.get(), -3);
        assert_eq!(header.bit_count.get(), 7);
        assert_eq!(header.compression.get(), 9);
    }

    #[test]
    fn test_truncated_bitmap() {
        let dib = Dib::new(4, 4, 8)
            .with_bitmap(vec![0; 3])
            .with_compression(Compression::RLE8, 16);
        let mut out = Vec::new();
        assert!(matches!(
            dib.write_binary(&mut out),
            Err(Error::TruncatedBitmap {
                size_image: 16,
                available: 3
            })
        ));
        assert!(out.is_empty());
        assert!(dib.validate().is_err());
        assert!(sample().validate().is_ok());
    }

    #[test]
    fn test_write_text() {
        let mut out = Vec::new();
        sample().write_text(&mut out, &TextOptions::default()).unwrap();
        let expected = concat!(
            "28000000", "02000000", "01000000", "0100", "0800", "\n",
            "00000000", "00000000", "130b0000", "130b0000", "00000000", "00000000", "\n",
            "00000000ffffff00", "\n",
            "00010000", "\n",
        );
        assert_eq!(String::from_utf8(out).unwrap(), expected);
    }

    #[test]
    fn test_write_text_wraps_pixels() {
        let dib = Dib::new(100, 1, 8).with_bitmap(vec![0x11; 100]);
        let mut out = Vec::new();
        dib.write_text(&mut out, &TextOptions::default()).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.split_terminator('\n').collect();
        // Two header lines, no palette, then 38 + 38 + 24 bytes of pixels.
        assert_eq!(lines.len(), 5);
        assert_eq!(lines[2].len(), 76);
        assert_eq!(lines[3].len(), 76);
        assert_eq!(lines[4].len(), 48);
    }

    #[test]
    fn test_indexed_rle8() {
        let palette = vec![0u8; 8];
        let pixels = [1, 1, 1, 0, 0, 0];
        let dib = Dib::indexed_rle8(3, 2, palette, &pixels);
        assert_eq!(dib.compression, Compression::RLE8);
        assert_eq!(dib.bit_count, 8);
        assert_eq!(dib.clr_used, 2);
        assert_eq!(dib.bitmap, [3, 1, 0, 0, 3, 0, 0, 0, 0, 1]);
        assert_eq!(dib.size_image, 10);
        assert_eq!(rle::decode(&dib.bitmap).unwrap(), pixels);
    }
}
