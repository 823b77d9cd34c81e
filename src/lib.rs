//! Litchi WMF - Windows Metafile writer for embedding raster images in documents
//!
//! This library wraps a device-independent bitmap (DIB) in a Windows Metafile
//! (WMF) and writes it either as raw little-endian bytes or as the wrapped hex
//! text that rich-text formats embed inline.
//!
//! # Features
//!
//! - **Record accounting**: file size and largest record size are kept in step
//!   as records are added
//! - **DIB payloads**: `META_DIBBITBLT` records carrying header, palette and pixels
//! - **RLE8 compression**: scanline encoder compatible with existing RTF readers
//! - **Two output forms**: binary stream or lowercase hex with fixed line wrapping
//!
//! # Example - Writing a metafile
//!
//! ```
//! use litchi_wmf::images::wmf::{BltParams, Dib, MetafileWriter, Record};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let palette = vec![0, 0, 0, 0, 0xFF, 0xFF, 0xFF, 0];
//! let dib = Dib::indexed_rle8(2, 2, palette, &[0, 1, 1, 0]);
//!
//! let mut wmf = MetafileWriter::new();
//! wmf.add(Record::dib_bit_blt(BltParams::src_copy(2, 2), dib));
//!
//! let bytes = wmf.to_bytes()?;
//! assert_eq!(&bytes[..6], &[2, 0, 9, 0, 0, 3]);
//!
//! let hex = wmf.to_hex_string()?;
//! println!("{{\\pict\\wmetafile8 {}}}", hex);
//! # Ok(())
//! # }
//! ```
//!
//! # Example - Compressing pixel rows
//!
//! ```
//! use litchi_wmf::images::wmf::rle;
//!
//! let packed = rle::encode(&[0xAB; 600]);
//! assert_eq!(packed, [255, 0xAB, 255, 0xAB, 90, 0xAB]);
//! ```

/// Shared binary, hex and error utilities
pub mod common;

/// Image payloads
///
/// Currently the WMF writer and its DIB and RLE8 building blocks.
pub mod images;

// Re-export commonly used types for convenience
pub use common::error::{Error, Result};
pub use images::wmf::{BltParams, Compression, Dib, MetafileWriter, Record, RecordKind, TextOptions};
