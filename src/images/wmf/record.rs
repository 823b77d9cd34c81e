//! Metafile records.
//!
//! A record is a 32-bit size in words, a 16-bit function code and a list of
//! 16-bit parameters. The DIB block-transfer record additionally carries a
//! bitmap payload after its parameters; both shapes share one [`Record`]
//! type and dispatch on [`RecordKind`].

use super::constants::{record, rop};
use super::dib::Dib;
use super::options::TextOptions;
use crate::common::binary::{write_u16_le, write_u32_le};
use crate::common::error::Result;
use crate::common::hex;
use smallvec::SmallVec;
use std::io::Write;

/// Words taken by the size and function fields.
pub const RECORD_HEADER_WORDS: u32 = 3;

/// Number of parameters of a DIB block-transfer record.
pub const BLT_PARAM_COUNT: usize = 8;

/// Payload carried after the parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordKind {
    /// Parameters only
    Plain,
    /// `META_DIBBITBLT` with its bitmap
    DibBlockTransfer(Dib),
}

/// Source and destination of a DIB block transfer.
///
/// Coordinates are logical units; they are narrowed to 16 bits when the
/// record is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BltParams {
    /// Ternary raster operation
    pub rop: u32,
    pub y_src: i32,
    pub x_src: i32,
    pub height: i32,
    pub width: i32,
    pub y_dest: i32,
    pub x_dest: i32,
}

impl BltParams {
    /// Copy a whole `width` x `height` bitmap to the origin.
    pub fn src_copy(width: i32, height: i32) -> Self {
        Self {
            rop: rop::SRCCOPY,
            width,
            height,
            ..Self::default()
        }
    }

    /// Parameter words in record order: ROP low, ROP high, y-src, x-src,
    /// height, width, y-dest, x-dest.
    pub fn to_words(&self) -> [u16; BLT_PARAM_COUNT] {
        [
            self.rop as u16,
            (self.rop >> 16) as u16,
            self.y_src as u16,
            self.x_src as u16,
            self.height as u16,
            self.width as u16,
            self.y_dest as u16,
            self.x_dest as u16,
        ]
    }
}

/// Integer that can be stored as a 16-bit record parameter.
///
/// Only the low 16 bits are kept; negative values end up in two's
/// complement.
pub trait Narrow: Copy {
    fn narrow(self) -> u16;
}

macro_rules! impl_narrow {
    ($($ty:ty),*) => {
        $(
            impl Narrow for $ty {
                #[inline]
                fn narrow(self) -> u16 {
                    self as u16
                }
            }
        )*
    };
}

impl_narrow!(u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize);

/// One metafile instruction
///
/// Immutable once built; the size is fixed at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    function: u16,
    params: SmallVec<[u16; BLT_PARAM_COUNT]>,
    kind: RecordKind,
    size: u32,
}

impl Record {
    /// Build a plain record.
    ///
    /// Parameters may be any primitive integer. Each keeps only its low 16
    /// bits; wider values are truncated without error.
    ///
    /// # Example
    ///
    /// ```
    /// use litchi_wmf::images::wmf::Record;
    ///
    /// let record = Record::new(0x020C, [100, 0x1_0002]);
    /// assert_eq!(record.params(), &[100, 2]);
    /// assert_eq!(record.size(), 5);
    /// ```
    pub fn new<I>(function: u16, params: I) -> Self
    where
        I: IntoIterator,
        I::Item: Narrow,
    {
        let params = params.into_iter().map(Narrow::narrow).collect();
        Self::build(function, params, RecordKind::Plain)
    }

    /// The zero-function record that ends every metafile.
    pub fn trailer() -> Self {
        Self::build(record::EOF, SmallVec::new(), RecordKind::Plain)
    }

    /// Build a `META_DIBBITBLT` record carrying `dib`.
    pub fn dib_bit_blt(params: BltParams, dib: Dib) -> Self {
        let words = SmallVec::from_buf(params.to_words());
        Self::build(record::DIB_BIT_BLT, words, RecordKind::DibBlockTransfer(dib))
    }

    fn build(function: u16, params: SmallVec<[u16; BLT_PARAM_COUNT]>, kind: RecordKind) -> Self {
        let param_words = u32::try_from(params.len()).unwrap_or(u32::MAX);
        let payload_words = match &kind {
            RecordKind::Plain => 0,
            RecordKind::DibBlockTransfer(dib) => dib.size(),
        };
        let size = RECORD_HEADER_WORDS
            .saturating_add(param_words)
            .saturating_add(payload_words);
        Self {
            function,
            params,
            kind,
            size,
        }
    }

    /// Function code.
    #[inline]
    pub fn function(&self) -> u16 {
        self.function
    }

    /// Parameter words.
    #[inline]
    pub fn params(&self) -> &[u16] {
        &self.params
    }

    /// Payload kind.
    #[inline]
    pub fn kind(&self) -> &RecordKind {
        &self.kind
    }

    /// Total size in 16-bit words, including the size and function fields.
    #[inline]
    pub fn size(&self) -> u32 {
        self.size
    }

    /// Write the record as little-endian bytes.
    pub fn write_binary<W: Write + ?Sized>(&self, writer: &mut W) -> Result<()> {
        write_u32_le(writer, self.size)?;
        write_u16_le(writer, self.function)?;
        for &param in &self.params {
            write_u16_le(writer, param)?;
        }
        if let RecordKind::DibBlockTransfer(dib) = &self.kind {
            dib.write_binary(writer)?;
        }
        Ok(())
    }

    /// Write the record as hex text.
    ///
    /// Fixed fields are printed on the current line without a terminator; a
    /// bitmap payload follows immediately in its own line layout.
    pub fn write_text<W: Write + ?Sized>(&self, writer: &mut W, options: &TextOptions) -> Result<()> {
        hex::print32(writer, self.size)?;
        hex::print16(writer, self.function)?;
        for &param in &self.params {
            hex::print16(writer, param)?;
        }
        if let RecordKind::DibBlockTransfer(dib) = &self.kind {
            dib.write_text(writer, options)?;
        }
        Ok(())
    }
}
