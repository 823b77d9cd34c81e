// WMF reader
//
// Reads back the plain header and record stream produced by the writer.
// Placeable (Aldus) headers are not recognized.

use super::constants::header::HEADER_WORDS;
use super::record::RECORD_HEADER_WORDS;
use crate::common::binary::{read_u16_le, read_u32_le};
use crate::common::error::{Error, Result};
use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout, LE, U16, U32, Unaligned};

/// Size of the standard header in bytes.
pub const HEADER_BYTES: usize = HEADER_WORDS as usize * 2;

/// WMF standard header
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromBytes, IntoBytes, Immutable, KnownLayout, Unaligned)]
#[repr(C)]
pub struct WmfHeader {
    /// File type (1 = memory, 2 = disk)
    pub file_type: U16<LE>,
    /// Header size in words (always 9)
    pub header_size: U16<LE>,
    /// Windows version
    pub version: U16<LE>,
    /// Size of file in words
    pub file_size: U32<LE>,
    /// Number of objects
    pub num_objects: U16<LE>,
    /// Size of largest record in words
    pub max_record: U32<LE>,
    /// Not used (always 0)
    pub num_params: U16<LE>,
}

impl WmfHeader {
    /// Parse WMF standard header
    pub fn parse(data: &[u8]) -> Result<Self> {
        Self::read_from_prefix(data)
            .map(|(header, _)| header)
            .map_err(|_| Error::ParseError("WMF header too short".into()))
    }
}

/// WMF record as read from a stream
#[derive(Debug, Clone)]
pub struct WmfRecord {
    /// Record size in words (including size and function)
    pub size: u32,
    /// Record function
    pub function: u16,
    /// Raw bytes after the function field
    pub params: Vec<u8>,
}

impl WmfRecord {
    /// Parse a WMF record, returning it and the number of bytes consumed
    pub fn parse(data: &[u8], offset: usize) -> Result<(Self, usize)> {
        let size = read_u32_le(data, offset)?;
        let function = read_u16_le(data, offset + 4)?;

        let size_bytes = (size as usize).saturating_mul(2);
        if size < RECORD_HEADER_WORDS || offset.saturating_add(size_bytes) > data.len() {
            return Err(Error::ParseError(format!(
                "Invalid WMF record size: {} at offset {}",
                size, offset
            )));
        }

        let params = data[offset + 6..offset + size_bytes].to_vec();

        Ok((
            Self {
                size,
                function,
                params,
            },
            size_bytes,
        ))
    }

    /// Check if this is an EOF record
    pub const fn is_eof(&self) -> bool {
        self.function == 0x0000
    }

    /// Parameter bytes as 16-bit words; a trailing odd byte is ignored
    pub fn words(&self) -> Vec<u16> {
        self.params
            .chunks_exact(2)
            .map(|w| u16::from_le_bytes([w[0], w[1]]))
            .collect()
    }
}

/// WMF file parser
#[derive(Debug)]
pub struct WmfParser {
    /// Standard WMF header
    pub header: WmfHeader,
    /// All records up to and including EOF
    pub records: Vec<WmfRecord>,
}

impl WmfParser {
    /// Parse a metafile from raw data
    ///
    /// Stops at the EOF record; a malformed record is an error.
    pub fn new(data: &[u8]) -> Result<Self> {
        let header = WmfHeader::parse(data)?;
        let mut offset = HEADER_BYTES;

        let mut records = Vec::new();
        while offset < data.len() {
            let (record, consumed) = WmfRecord::parse(data, offset)?;
            let is_eof = record.is_eof();
            records.push(record);
            offset += consumed;

            if is_eof {
                break;
            }
        }

        Ok(Self { header, records })
    }

    /// Whether the stream ended with an EOF record
    pub fn is_terminated(&self) -> bool {
        self.records.last().is_some_and(WmfRecord::is_eof)
    }
}
