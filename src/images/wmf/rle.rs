//! RLE8 compression for 8-bit DIB pixel data.
//!
//! The stream is a sequence of byte pairs. A non-zero first byte is a coded
//! run: `(count, value)` repeats `value` `count` times. A zero first byte is
//! an escape whose second byte selects end-of-line (0), end-of-bitmap (1),
//! delta (2), or an absolute run of that many literal bytes, padded to a
//! 16-bit boundary.
//!
//! The run/literal boundaries are fixed: pictures embedded by older RTF
//! writers use exactly this shape and readers compare against it, so the
//! splitting is not tuned for ratio.
//!
//! # Examples
//!
//! ```
//! use litchi_wmf::images::wmf::rle;
//!
//! let packed = rle::encode(&[7, 7, 7, 7, 1, 2, 3, 9, 9]);
//! assert_eq!(packed, [4, 7, 0, 3, 1, 2, 3, 0, 2, 9]);
//! assert_eq!(rle::decode(&packed).unwrap(), [7, 7, 7, 7, 1, 2, 3, 9, 9]);
//! ```

use crate::common::error::{Error, Result};
use std::convert::Infallible;

/// First byte of every escape pair.
pub const ESCAPE: u8 = 0x00;
/// Escape code: end of scanline.
pub const END_OF_LINE: u8 = 0x00;
/// Escape code: end of bitmap.
pub const END_OF_BITMAP: u8 = 0x01;
/// Escape code: cursor delta, followed by x and y offsets.
pub const DELTA: u8 = 0x02;

/// Longest run or absolute block a single pair can describe.
const MAX_SPAN: usize = 255;

/// Upper bound on the encoded size of `input_len` bytes.
///
/// No input byte costs more than two output bytes: runs use at most one pair
/// per two bytes, absolute blocks of three or more bytes add at most three
/// bytes of framing, and isolated bytes become one `(1, value)` pair each.
#[inline]
pub const fn max_encoded_len(input_len: usize) -> usize {
    input_len.saturating_mul(2)
}

/// Destination of encoded bytes.
trait Output {
    type Error;

    fn push(&mut self, byte: u8) -> std::result::Result<(), Self::Error>;

    fn extend(&mut self, bytes: &[u8]) -> std::result::Result<(), Self::Error> {
        for &b in bytes {
            self.push(b)?;
        }
        Ok(())
    }
}

impl Output for Vec<u8> {
    type Error = Infallible;

    #[inline]
    fn push(&mut self, byte: u8) -> std::result::Result<(), Infallible> {
        Vec::push(self, byte);
        Ok(())
    }

    #[inline]
    fn extend(&mut self, bytes: &[u8]) -> std::result::Result<(), Infallible> {
        self.extend_from_slice(bytes);
        Ok(())
    }
}

/// Bounded cursor over a caller-supplied slice.
struct SliceOutput<'a> {
    buf: &'a mut [u8],
    pos: usize,
}

impl Output for SliceOutput<'_> {
    type Error = Error;

    #[inline]
    fn push(&mut self, byte: u8) -> Result<()> {
        let capacity = self.buf.len();
        let slot = self
            .buf
            .get_mut(self.pos)
            .ok_or(Error::BufferTooSmall { capacity })?;
        *slot = byte;
        self.pos += 1;
        Ok(())
    }
}

/// Compress one buffer into a freshly allocated RLE8 stream.
///
/// No end-of-line or end-of-bitmap escapes are added; see [`encode_rows`]
/// for whole bitmaps.
pub fn encode(input: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(max_encoded_len(input.len()));
    match encode_to(input, &mut out) {
        Ok(()) => out,
        Err(never) => match never {},
    }
}

/// Compress `input` into `output`, returning the number of bytes written.
///
/// Fails with [`Error::BufferTooSmall`] as soon as the encoded stream would
/// run past the end of `output`. A buffer of [`max_encoded_len`] bytes is
/// always large enough.
pub fn encode_into(input: &[u8], output: &mut [u8]) -> Result<usize> {
    let mut sink = SliceOutput {
        buf: output,
        pos: 0,
    };
    encode_to(input, &mut sink)?;
    Ok(sink.pos)
}

/// Compress a bitmap scanline by scanline.
///
/// Each `row_len` chunk of `pixels` is encoded on its own and followed by an
/// end-of-line escape; the stream closes with an end-of-bitmap escape. Rows
/// are taken in buffer order, so bottom-up DIBs must be passed bottom row
/// first.
pub fn encode_rows(pixels: &[u8], row_len: usize) -> Vec<u8> {
    let mut out = Vec::with_capacity(max_encoded_len(pixels.len()) + 2);
    if row_len > 0 {
        for row in pixels.chunks(row_len) {
            out.extend_from_slice(&encode(row));
            out.extend_from_slice(&[ESCAPE, END_OF_LINE]);
        }
    }
    out.extend_from_slice(&[ESCAPE, END_OF_BITMAP]);
    log::trace!(
        "RLE8 encoded {} bytes in rows of {} into {} bytes",
        pixels.len(),
        row_len,
        out.len()
    );
    out
}

fn encode_to<O: Output>(input: &[u8], out: &mut O) -> std::result::Result<(), O::Error> {
    let n = input.len();
    let mut i = 0;

    while i < n {
        // Length of the run of identical bytes starting at i.
        let mut j = i + 1;
        let mut len = 1;
        while j < n && input[j] == input[j - 1] {
            j += 1;
            len += 1;
        }

        if len > 1 {
            let value = input[i];
            while len > MAX_SPAN {
                out.extend(&[MAX_SPAN as u8, value])?;
                len -= MAX_SPAN;
            }
            out.extend(&[len as u8, value])?;
            i = j;
            continue;
        }

        // Mixed span: stops before the byte that opens the next run. At the end
        // of input the scan leaves the last byte for the next iteration.
        j += 1;
        while j < n && input[j] != input[j - 1] {
            j += 1;
            len += 1;
        }

        while len > MAX_SPAN {
            out.extend(&[ESCAPE, MAX_SPAN as u8])?;
            out.extend(&input[i..i + MAX_SPAN])?;
            out.push(0)?;
            i += MAX_SPAN;
            len -= MAX_SPAN;
        }

        if len > 2 {
            out.extend(&[ESCAPE, len as u8])?;
            out.extend(&input[i..i + len])?;
            if len % 2 != 0 {
                out.push(0)?;
            }
            i += len;
        } else {
            for &b in &input[i..i + len] {
                out.extend(&[1, b])?;
            }
            i += len;
        }
    }

    Ok(())
}

/// Expand an RLE8 stream.
///
/// End-of-line escapes are skipped, so the rows of a multi-line stream are
/// concatenated. Decoding stops at end-of-bitmap or at the end of the data.
/// Delta escapes need a bitmap geometry and are rejected.
pub fn decode(data: &[u8]) -> Result<Vec<u8>> {
    let mut out = Vec::with_capacity(data.len() * 2);
    let mut pos = 0;

    while pos < data.len() {
        let (count, code) = match data.get(pos..pos + 2) {
            Some(&[count, code]) => (count, code),
            _ => {
                return Err(Error::ParseError(format!(
                    "Truncated RLE8 pair at offset {}",
                    pos
                )));
            },
        };
        pos += 2;

        if count != ESCAPE {
            out.resize(out.len() + count as usize, code);
            continue;
        }

        match code {
            END_OF_LINE => {},
            END_OF_BITMAP => break,
            DELTA => {
                return Err(Error::Unsupported(
                    "RLE8 delta escape in a linear stream".to_string(),
                ));
            },
            literal => {
                let len = literal as usize;
                let bytes = data.get(pos..pos + len).ok_or(Error::InsufficientData {
                    expected: pos + len,
                    available: data.len(),
                })?;
                out.extend_from_slice(bytes);
                pos += len;
                if len % 2 != 0 {
                    pos += 1;
                }
            },
        }
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input() {
        assert!(encode(&[]).is_empty());
        assert_eq!(encode_into(&[], &mut []).unwrap(), 0);
    }

    #[test]
    fn test_single_byte() {
        assert_eq!(encode(&[0x42]), [1, 0x42]);
    }

    #[test]
    fn test_long_run_is_split_at_255() {
        let input = vec![0xAB; 600];
        assert_eq!(encode(&input), [255, 0xAB, 255, 0xAB, 90, 0xAB]);
    }

    #[test]
    fn test_run_of_exactly_255_and_256() {
        assert_eq!(encode(&[3; 255]), [255, 3]);
        assert_eq!(encode(&[3; 256]), [255, 3, 1, 3]);
    }

    #[test]
    fn test_two_distinct_bytes_use_coded_pairs() {
        assert_eq!(encode(&[1, 2]), [1, 1, 1, 2]);
    }

    #[test]
    fn test_trailing_byte_left_out_of_mixed_span() {
        // The scan stops one short of the end, so [1, 2, 3] is a two-byte span
        // followed by a lone final byte.
        assert_eq!(encode(&[1, 2, 3]), [1, 1, 1, 2, 1, 3]);
        assert_eq!(encode(&[1, 2, 3, 4]), [0, 3, 1, 2, 3, 0, 1, 4]);
    }

    #[test]
    fn test_mixed_span_stops_before_next_run() {
        // The span covers 1, 2 and stops before 5 5.
        assert_eq!(encode(&[1, 2, 5, 5]), [1, 1, 1, 2, 2, 5]);
        assert_eq!(encode(&[1, 2, 3, 4, 4]), [0, 3, 1, 2, 3, 0, 2, 4]);
    }

    #[test]
    fn test_even_absolute_block_is_not_padded() {
        assert_eq!(encode(&[1, 2, 3, 4, 9, 9]), [0, 4, 1, 2, 3, 4, 2, 9]);
    }

    #[test]
    fn test_long_literal_span_is_chunked() {
        let input: Vec<u8> = (0..300u32).map(|v| (v % 2) as u8).collect();
        let packed = encode(&input);
        // 299 bytes in the span: a padded 255 block, then 44, then the final byte.
        assert_eq!(&packed[..2], &[0, 255]);
        assert_eq!(&packed[2..257], &input[..255]);
        assert_eq!(packed[257], 0);
        assert_eq!(&packed[258..260], &[0, 44]);
        assert_eq!(&packed[260..304], &input[255..299]);
        assert_eq!(&packed[304..], &[1, input[299]]);
        assert_eq!(decode(&packed).unwrap(), input);
    }

    #[test]
    fn test_encode_into_reports_small_buffer() {
        let mut out = [0u8; 3];
        let err = encode_into(&[1, 2, 3, 4], &mut out).unwrap_err();
        assert!(matches!(err, Error::BufferTooSmall { capacity: 3 }));
    }

    #[test]
    fn test_encode_into_empty_buffer() {
        assert_eq!(encode_into(&[], &mut []).unwrap(), 0);
        let err = encode_into(&[9], &mut []).unwrap_err();
        assert!(matches!(err, Error::BufferTooSmall { capacity: 0 }));
    }

    #[test]
    fn test_encode_into_matches_encode() {
        let input = [5, 5, 5, 1, 2, 3, 4, 4, 7];
        let mut out = [0u8; 18];
        let n = encode_into(&input, &mut out).unwrap();
        assert_eq!(&out[..n], encode(&input).as_slice());
    }

    #[test]
    fn test_encode_rows_adds_escapes() {
        let pixels = [1, 1, 1, 1, 2, 3];
        let packed = encode_rows(&pixels, 3);
        assert_eq!(packed, [3, 1, 0, 0, 1, 1, 1, 2, 1, 3, 0, 0, 0, 1]);
        assert_eq!(decode(&packed).unwrap(), pixels);
        assert_eq!(encode_rows(&[], 4), [0, 1]);
    }

    #[test]
    fn test_decode_errors() {
        assert!(matches!(decode(&[3]), Err(Error::ParseError(_))));
        assert!(matches!(decode(&[0, 2, 1, 1]), Err(Error::Unsupported(_))));
        assert!(matches!(
            decode(&[0, 4, 1, 2]),
            Err(Error::InsufficientData { .. })
        ));
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        fn alternating(len: usize) -> Vec<u8> {
            (0..len).map(|i| if i % 2 == 0 { 0x55 } else { 0xAA }).collect()
        }

        proptest! {
            #![proptest_config(ProptestConfig::with_cases(200))]

            #[test]
            fn prop_random_round_trip(input in prop::collection::vec(any::<u8>(), 0..2000)) {
                let packed = encode(&input);
                prop_assert!(packed.len() <= max_encoded_len(input.len()));
                prop_assert_eq!(decode(&packed).unwrap(), input);
            }

            #[test]
            fn prop_small_alphabet_round_trip(input in prop::collection::vec(0u8..3, 0..2000)) {
                prop_assert_eq!(decode(&encode(&input)).unwrap(), input);
            }

            #[test]
            fn prop_uniform_round_trip(value in any::<u8>(), len in 0usize..2000) {
                let input = vec![value; len];
                let packed = encode(&input);
                prop_assert_eq!(packed.len(), 2 * len.div_ceil(255));
                prop_assert_eq!(decode(&packed).unwrap(), input);
            }

            #[test]
            fn prop_alternating_round_trip(len in 0usize..2000) {
                let input = alternating(len);
                prop_assert_eq!(decode(&encode(&input)).unwrap(), input);
            }

            #[test]
            fn prop_encode_into_exact_bound(input in prop::collection::vec(any::<u8>(), 0..600)) {
                let expected = encode(&input);
                let mut out = vec![0u8; expected.len()];
                prop_assert_eq!(encode_into(&input, &mut out).unwrap(), expected.len());
                prop_assert_eq!(out, expected);
            }
        }
    }
}
