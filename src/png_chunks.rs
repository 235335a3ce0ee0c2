//! PNG stream assembly
//!
//! Frames the raw scanline buffer into a PNG byte stream: the fixed
//! signature followed by the `IHDR`, `IDAT` and `IEND` chunks. Each chunk
//! is a big-endian length, a four byte tag, the payload, and a CRC32 over
//! the tag and payload.

use anyhow::{bail, Result};
use crc32fast::Hasher;
use miniz_oxide::deflate::compress_to_vec_zlib;

/// The eight bytes every PNG file starts with.
pub const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

pub const BIT_DEPTH: u8 = 8;
/// Truecolor with alpha.
pub const COLOR_TYPE_RGBA: u8 = 6;
pub const BYTES_PER_PIXEL: usize = 4;

/// Filter byte prepended to each scanline (no filtering).
pub const FILTER_NONE: u8 = 0;

/// zlib level used for `IDAT`.
pub const COMPRESSION_LEVEL: u8 = 9;

/// CRC32 of the bare `IEND` tag; an empty payload makes it constant.
pub const IEND_CRC: u32 = 0xAE42_6082;

/// Append one length/CRC framed chunk to `out`.
pub fn write_chunk(out: &mut Vec<u8>, tag: &[u8; 4], payload: &[u8]) {
    out.reserve(12 + payload.len());
    out.extend_from_slice(&(payload.len() as u32).to_be_bytes());
    out.extend_from_slice(tag);
    out.extend_from_slice(payload);

    let mut hasher = Hasher::new();
    hasher.update(tag);
    hasher.update(payload);
    out.extend_from_slice(&hasher.finalize().to_be_bytes());
}

/// Build the 13 byte `IHDR` payload for an 8-bit RGBA, non-interlaced image.
pub fn ihdr_payload(width: u32, height: u32) -> [u8; 13] {
    let mut ihdr = [0u8; 13];
    ihdr[0..4].copy_from_slice(&width.to_be_bytes());
    ihdr[4..8].copy_from_slice(&height.to_be_bytes());
    ihdr[8] = BIT_DEPTH;
    ihdr[9] = COLOR_TYPE_RGBA;
    // compression, filter and interlace methods stay 0
    ihdr
}

/// Expected length of a raw scanline buffer, filter bytes included.
pub fn raw_len(width: u32, height: u32) -> usize {
    height as usize * (1 + width as usize * BYTES_PER_PIXEL)
}

/// Encode a raw scanline buffer (filter byte + RGBA row, per row) as PNG.
pub fn encode_png(raw: &[u8], width: u32, height: u32) -> Result<Vec<u8>> {
    if width == 0 || height == 0 {
        bail!("PNG dimensions must be non-zero, got {}x{}", width, height);
    }

    let expected = raw_len(width, height);
    if raw.len() != expected {
        bail!(
            "Raw scanline buffer is {} bytes, expected {} for a {}x{} RGBA image",
            raw.len(),
            expected,
            width,
            height
        );
    }

    let idat = compress_to_vec_zlib(raw, COMPRESSION_LEVEL);

    let mut png = Vec::with_capacity(PNG_SIGNATURE.len() + 3 * 12 + 13 + idat.len());
    png.extend_from_slice(&PNG_SIGNATURE);
    write_chunk(&mut png, b"IHDR", &ihdr_payload(width, height));
    write_chunk(&mut png, b"IDAT", &idat);
    write_chunk(&mut png, b"IEND", &[]);

    Ok(png)
}
