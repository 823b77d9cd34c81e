// Image payloads for embedding in documents
//
// # Architecture
//
// - `wmf`: Windows Metafile (WMF) writer with DIB payloads and RLE8 compression
//
// # Example: wrapping a bitmap for an RTF picture
//
// ```
// use litchi_wmf::images::wmf::{Dib, bitmap_to_wmf_hex};
//
// let palette = vec![0, 0, 0, 0, 0xFF, 0xFF, 0xFF, 0];
// let dib = Dib::indexed_rle8(4, 1, palette, &[0, 0, 1, 1]);
// let hex = bitmap_to_wmf_hex(dib)?;
// assert!(hex.lines().count() > 1);
// # Ok::<(), litchi_wmf::Error>(())
// ```

pub mod wmf;
