//! Little-endian binary primitives shared by the metafile serializers.
//!
//! Writers go through `zerocopy`'s byte-order aware integer types so the
//! on-disk layout never depends on the host endianness.

use crate::common::error::{Error, Result};
use std::io::Write;
use zerocopy::{FromBytes, I32, IntoBytes, LE, U16, U32};

/// Write a little-endian u16.
///
/// # Examples
///
/// ```
/// use litchi_wmf::common::binary::write_u16_le;
/// let mut out = Vec::new();
/// write_u16_le(&mut out, 0x1234).unwrap();
/// assert_eq!(out, [0x34, 0x12]);
/// ```
#[inline]
pub fn write_u16_le<W: Write + ?Sized>(writer: &mut W, value: u16) -> Result<()> {
    writer.write_all(U16::<LE>::new(value).as_bytes())?;
    Ok(())
}

/// Write a little-endian u32.
///
/// # Examples
///
/// ```
/// use litchi_wmf::common::binary::write_u32_le;
/// let mut out = Vec::new();
/// write_u32_le(&mut out, 0x12345678).unwrap();
/// assert_eq!(out, [0x78, 0x56, 0x34, 0x12]);
/// ```
#[inline]
pub fn write_u32_le<W: Write + ?Sized>(writer: &mut W, value: u32) -> Result<()> {
    writer.write_all(U32::<LE>::new(value).as_bytes())?;
    Ok(())
}

/// Write a little-endian i32.
#[inline]
pub fn write_i32_le<W: Write + ?Sized>(writer: &mut W, value: i32) -> Result<()> {
    writer.write_all(I32::<LE>::new(value).as_bytes())?;
    Ok(())
}

/// Read a little-endian u16 from a byte slice at the given offset.
///
/// # Examples
///
/// ```
/// use litchi_wmf::common::binary::read_u16_le;
/// let data = [0x34, 0x12, 0x78, 0x56];
/// assert_eq!(read_u16_le(&data, 0).unwrap(), 0x1234);
/// assert_eq!(read_u16_le(&data, 2).unwrap(), 0x5678);
/// ```
#[inline]
pub fn read_u16_le(data: &[u8], offset: usize) -> Result<u16> {
    let bytes = slice_at(data, offset, 2)?;
    U16::<LE>::read_from_bytes(bytes)
        .map(|v| v.get())
        .map_err(|_| Error::ParseError("Failed to read u16".to_string()))
}

/// Read a little-endian u32 from a byte slice at the given offset.
///
/// # Examples
///
/// ```
/// use litchi_wmf::common::binary::read_u32_le;
/// let data = [0x78, 0x56, 0x34, 0x12];
/// assert_eq!(read_u32_le(&data, 0).unwrap(), 0x12345678);
/// ```
#[inline]
pub fn read_u32_le(data: &[u8], offset: usize) -> Result<u32> {
    let bytes = slice_at(data, offset, 4)?;
    U32::<LE>::read_from_bytes(bytes)
        .map(|v| v.get())
        .map_err(|_| Error::ParseError("Failed to read u32".to_string()))
}

#[inline]
fn slice_at(data: &[u8], offset: usize, len: usize) -> Result<&[u8]> {
    let end = offset.checked_add(len).unwrap_or(usize::MAX);
    data.get(offset..end).ok_or(Error::InsufficientData {
        expected: end,
        available: data.len(),
    })
}
