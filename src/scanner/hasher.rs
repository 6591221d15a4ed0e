//! BLAKE3 content digests over normalized icon pixels.
//!
//! # Overview
//!
//! Deduplication keys are computed over the canonical icon's pixel content,
//! not over the source file bytes: the same image stored as a 32-bit DIB in
//! one executable and as a PNG frame in an `.ico` must collide.
//!
//! Normalization is carried by the type: every decoder produces an
//! [`RgbaImage`], which stores pixels as tightly packed RGBA8 in row-major
//! order with no stride padding. Hashing that logical buffer makes the digest
//! reproducible across platforms and source formats.

use image::RgbaImage;

/// Length of the rendered hex digest (BLAKE3, 256 bits).
pub const DIGEST_HEX_LEN: usize = 64;

/// Compute the content digest of a canonical icon.
///
/// Returns the BLAKE3 hash of the icon's raw RGBA8 buffer as a fixed-width
/// lowercase hex string, suitable for use as a dedup-registry key.
///
/// Two icons with byte-identical normalized pixel buffers always produce the
/// same digest, regardless of which file or worker they came from.
#[must_use]
pub fn pixel_digest(image: &RgbaImage) -> String {
    blake3::hash(image.as_raw()).to_hex().to_string()
}
