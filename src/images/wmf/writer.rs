//! Metafile writer.
//!
//! [`MetafileWriter`] collects records and keeps the header totals in step:
//! the file size and the largest record size, both in 16-bit words. Output is
//! either the binary metafile or its hex text form, which is what an RTF
//! `\pict\wmetafile8` group embeds.
//!
//! # Example
//!
//! ```
//! use litchi_wmf::images::wmf::{BltParams, Dib, MetafileWriter, Record};
//! use litchi_wmf::images::wmf::constants::{map_mode, record};
//!
//! let palette = vec![0, 0, 0, 0, 0xFF, 0xFF, 0xFF, 0];
//! let pixels = [0, 1, 1, 1, 1, 0];
//! let dib = Dib::indexed_rle8(3, 2, palette, &pixels);
//!
//! let mut wmf = MetafileWriter::new();
//! wmf.add(Record::new(record::SET_MAP_MODE, [map_mode::MM_ANISOTROPIC]));
//! wmf.add(Record::new(record::SET_WINDOW_EXT, [2, 3]));
//! wmf.add(Record::dib_bit_blt(BltParams::src_copy(3, 2), dib));
//!
//! let bytes = wmf.to_bytes()?;
//! assert_eq!(bytes.len(), wmf.size() as usize * 2);
//! let hex = wmf.to_hex_string()?;
//! assert!(hex.starts_with("020009000003"));
//! # Ok::<(), litchi_wmf::Error>(())
//! ```

use super::constants::header::{FILE_TYPE_DISK, HEADER_WORDS, VERSION_300};
use super::options::TextOptions;
use super::parser::WmfHeader;
use super::record::{Record, RecordKind};
use crate::common::error::Result;
use crate::common::hex;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use zerocopy::{IntoBytes, U16, U32};

/// Windows metafile writer
///
/// Records are appended in order and never removed. Writing does not reset
/// the writer; a second write produces the same output.
#[derive(Debug, Clone)]
pub struct MetafileWriter {
    file_type: u16,
    header_size: u16,
    version: u16,
    /// Total size in words, including the header and trailer
    file_size: u32,
    num_objects: u16,
    /// Largest record in words
    max_record_size: u32,
    num_params: u16,
    records: Vec<Record>,
    trailer: Record,
    options: TextOptions,
}

impl Default for MetafileWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl MetafileWriter {
    /// Create an empty writer with default text options.
    pub fn new() -> Self {
        Self::with_options(TextOptions::default())
    }

    /// Create an empty writer with the given text options.
    pub fn with_options(options: TextOptions) -> Self {
        let trailer = Record::trailer();
        Self {
            file_type: FILE_TYPE_DISK,
            header_size: HEADER_WORDS,
            version: VERSION_300,
            file_size: u32::from(HEADER_WORDS) + trailer.size(),
            num_objects: 0,
            max_record_size: trailer.size(),
            num_params: 0,
            records: Vec::new(),
            trailer,
            options,
        }
    }

    /// Append a record and update the header totals.
    pub fn add(&mut self, record: Record) {
        let size = record.size();
        self.file_size = self.file_size.wrapping_add(size);
        self.max_record_size = self.max_record_size.max(size);
        log::trace!(
            "added WMF record 0x{:04X} ({} words), file size now {} words",
            record.function(),
            size,
            self.file_size
        );
        self.records.push(record);
    }

    /// Total size in 16-bit words.
    #[inline]
    pub fn size(&self) -> u32 {
        self.file_size
    }

    /// Largest record size in 16-bit words.
    #[inline]
    pub fn max_record_size(&self) -> u32 {
        self.max_record_size
    }

    /// Records added so far, in order.
    #[inline]
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// The header as it will be written.
    pub fn header(&self) -> WmfHeader {
        WmfHeader {
            file_type: U16::new(self.file_type),
            header_size: U16::new(self.header_size),
            version: U16::new(self.version),
            file_size: U32::new(self.file_size),
            num_objects: U16::new(self.num_objects),
            max_record: U32::new(self.max_record_size),
            num_params: U16::new(self.num_params),
        }
    }

    /// Check every bitmap payload before anything reaches the sink.
    fn validate(&self) -> Result<()> {
        for record in &self.records {
            if let RecordKind::DibBlockTransfer(dib) = record.kind() {
                dib.validate()?;
            }
        }
        Ok(())
    }

    /// Write header, records and trailer as a binary metafile.
    ///
    /// A bitmap with less pixel data than it declares fails the write before
    /// any byte is written.
    pub fn write_binary<W: Write + ?Sized>(&self, writer: &mut W) -> Result<()> {
        self.validate()?;
        log::debug!(
            "writing binary WMF: {} records, {} words",
            self.records.len(),
            self.file_size
        );
        writer.write_all(self.header().as_bytes())?;
        for record in &self.records {
            record.write_binary(writer)?;
        }
        self.trailer.write_binary(writer)
    }

    /// Write the metafile as hex text.
    ///
    /// The header is followed by a line break; records run on without
    /// separators except where a bitmap payload breaks lines.
    pub fn write_text<W: Write + ?Sized>(&self, writer: &mut W) -> Result<()> {
        self.validate()?;
        log::debug!(
            "writing hex WMF: {} records, {} words",
            self.records.len(),
            self.file_size
        );
        hex::print(writer, self.header().as_bytes())?;
        self.options.line_ending.write_to(writer)?;
        for record in &self.records {
            record.write_text(writer, &self.options)?;
        }
        self.trailer.write_text(writer, &self.options)
    }

    /// Binary metafile in memory.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        // Declared sizes are not trusted for preallocation.
        let mut out = Vec::new();
        self.write_binary(&mut out)?;
        Ok(out)
    }

    /// Hex text form in memory.
    pub fn to_hex_string(&self) -> Result<String> {
        let mut out = Vec::new();
        self.write_text(&mut out)?;
        // Only hex digits and line terminators are written.
        Ok(out.into_iter().map(char::from).collect())
    }

    /// Write the binary metafile to `path`.
    ///
    /// The file is closed on every path; a failed flush is reported.
    pub fn write_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let mut out = BufWriter::new(File::create(path)?);
        self.write_binary(&mut out)?;
        out.flush()?;
        Ok(())
    }

    /// Write the hex text form to `path`.
    pub fn write_text_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let mut out = BufWriter::new(File::create(path)?);
        self.write_text(&mut out)?;
        out.flush()?;
        Ok(())
    }
}
