// Windows Metafile (WMF) writer
//
// This module builds WMF streams that wrap a single device-independent
// bitmap, ready to be embedded in a host document either as raw bytes or as
// the hex text an RTF `\pict\wmetafile8` group expects.
//
// WMF is a 16-bit vector graphics format for Windows, introduced in Windows 3.0.
// Sizes in the header and in every record are counted in 16-bit words.
//
// References:
// - [MS-WMF]: Windows Metafile Format Specification
// - https://learn.microsoft.com/en-us/openspecs/windows_protocols/ms-wmf/

pub mod constants;
pub mod dib;
pub mod options;
pub mod parser;
pub mod record;
pub mod rle;
pub mod writer;

pub use dib::{BitmapInfoHeader, Compression, Dib};
pub use options::TextOptions;
pub use parser::{WmfHeader, WmfParser, WmfRecord};
pub use record::{BltParams, Narrow, Record, RecordKind};
pub use writer::MetafileWriter;

use crate::common::error::Result;

/// Wrap one bitmap in a metafile that copies it to the origin.
///
/// The metafile sets an anisotropic mapping with a window matching the bitmap
/// so that the host document can scale it freely.
///
/// # Example
///
/// ```
/// use litchi_wmf::images::wmf::{Dib, bitmap_metafile};
///
/// let dib = Dib::new(1, 1, 24).with_bitmap(vec![0xFF, 0x00, 0x00, 0x00]);
/// let wmf = bitmap_metafile(dib);
/// assert_eq!(wmf.records().len(), 4);
/// ```
pub fn bitmap_metafile(dib: Dib) -> MetafileWriter {
    use constants::{map_mode, record};

    let (width, height) = (dib.width, dib.height);
    let mut wmf = MetafileWriter::new();
    wmf.add(Record::new(record::SET_MAP_MODE, [map_mode::MM_ANISOTROPIC]));
    wmf.add(Record::new(record::SET_WINDOW_ORG, [0, 0]));
    wmf.add(Record::new(record::SET_WINDOW_EXT, [height, width]));
    wmf.add(Record::dib_bit_blt(BltParams::src_copy(width, height), dib));
    wmf
}

/// Encode a bitmap as a binary metafile
pub fn bitmap_to_wmf(dib: Dib) -> Result<Vec<u8>> {
    bitmap_metafile(dib).to_bytes()
}

/// Encode a bitmap as the hex text of a metafile
pub fn bitmap_to_wmf_hex(dib: Dib) -> Result<String> {
    bitmap_metafile(dib).to_hex_string()
}
