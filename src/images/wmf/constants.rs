//! WMF constants and enumerations
//!
//! Record function codes, raster operations and mapping modes that callers
//! need when assembling a metafile by hand.

/// WMF record function codes
pub mod record {
    /// Terminal record; the writer always appends it
    pub const EOF: u16 = 0x0000;

    // State records
    pub const SAVE_DC: u16 = 0x001E;
    pub const RESTORE_DC: u16 = 0x0127;
    pub const SET_BK_MODE: u16 = 0x0102;
    pub const SET_MAP_MODE: u16 = 0x0103;
    pub const SET_STRETCH_BLT_MODE: u16 = 0x0107;
    pub const SET_WINDOW_ORG: u16 = 0x020B;
    pub const SET_WINDOW_EXT: u16 = 0x020C;
    pub const SET_VIEWPORT_ORG: u16 = 0x020D;
    pub const SET_VIEWPORT_EXT: u16 = 0x020E;

    // Bitmap records
    pub const BIT_BLT: u16 = 0x0922;
    pub const STRETCH_BLT: u16 = 0x0B23;
    pub const DIB_BIT_BLT: u16 = 0x0940;
    pub const DIB_STRETCH_BLT: u16 = 0x0B41;
    pub const SET_DIB_TO_DEV: u16 = 0x0D33;
    pub const STRETCH_DIB: u16 = 0x0F43;
}

/// Common raster operations (ternary ROP codes)
pub mod rop {
    pub const SRCCOPY: u32 = 0x00CC0020; // dest = source
    pub const SRCPAINT: u32 = 0x00EE0086; // dest = source OR dest
    pub const SRCAND: u32 = 0x008800C6; // dest = source AND dest
    pub const SRCINVERT: u32 = 0x00660046; // dest = source XOR dest
    pub const NOTSRCCOPY: u32 = 0x00330008; // dest = (NOT source)
    pub const BLACKNESS: u32 = 0x00000042; // dest = BLACK
    pub const WHITENESS: u32 = 0x00FF0062; // dest = WHITE
}

/// Mapping modes
pub mod map_mode {
    pub const MM_TEXT: u16 = 1;
    pub const MM_LOMETRIC: u16 = 2;
    pub const MM_HIMETRIC: u16 = 3;
    pub const MM_LOENGLISH: u16 = 4;
    pub const MM_HIENGLISH: u16 = 5;
    pub const MM_TWIPS: u16 = 6;
    pub const MM_ISOTROPIC: u16 = 7;
    pub const MM_ANISOTROPIC: u16 = 8;
}

/// Header field values of a plain (non-placeable) disk metafile
pub mod header {
    /// Disk metafile
    pub const FILE_TYPE_DISK: u16 = 2;
    /// Header length in 16-bit words
    pub const HEADER_WORDS: u16 = 9;
    /// Windows 3.0 metafile version
    pub const VERSION_300: u16 = 0x0300;
}
