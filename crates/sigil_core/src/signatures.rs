//! Magic byte table and the binary-content heuristic.

use crate::types::MimeType;

/// Signatures checked at offset 0, in evaluation order. First match wins.
pub const SIGNATURES: &[(MimeType, &[&[u8]])] = &[
    (MimeType::Postscript, &[b"%!PS"]),
    (MimeType::Flac, &[b"fLaC"]),
    (MimeType::Gif, &[b"GIF89a", b"GIF87a"]),
    (MimeType::Jpeg, &[&[0xFF, 0xD8, 0xFF]]),
    (MimeType::Png, &[&[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A]]),
    (MimeType::Xml, &[b"<?xml "]),
];

/// Length of the prefix read for offset-0 signatures.
pub const PREFIX_LEN: usize = 8;

/// WebP's RIFF form type, found after the 4-byte tag and 4-byte size.
pub const WEBP_OFFSET: u64 = 8;
pub const WEBP_SIGNATURE: &[u8] = b"WEBP";

const fn binary_indicators() -> [bool; 256] {
    let mut table = [false; 256];
    let mut b = 0;
    while b < 256 {
        table[b] = matches!(b, 0..=8 | 11 | 12 | 14..=31 | 127);
        b += 1;
    }
    table
}

/// Control bytes that never appear in printable text.
/// Tab, LF and CR are excluded.
static BINARY_INDICATORS: [bool; 256] = binary_indicators();

#[inline]
pub fn is_binary_indicator(byte: u8) -> bool {
    BINARY_INDICATORS[byte as usize]
}

pub fn looks_binary(data: &[u8]) -> bool {
    data.iter().copied().any(is_binary_indicator)
}
