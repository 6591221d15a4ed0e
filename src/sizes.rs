//! Canonical icon sizing.
//!
//! Extracted icons arrive at whatever resolution the source offers. Before
//! hashing and storage they are snapped to a fixed descending ladder of
//! square sizes: the largest tier that fits inside both native dimensions
//! wins, and icons smaller than every tier keep their native size. Icons are
//! never upscaled.

use image::imageops::{self, FilterType};
use image::RgbaImage;

/// Preferred square output resolutions, largest first.
pub const SIZE_LADDER: [u32; 6] = [256, 128, 64, 48, 32, 16];

/// Select the target tier for a native resolution.
///
/// Returns the largest ladder tier that is `<=` both dimensions, or `None`
/// when the icon is smaller than every tier (in which case it is kept as-is).
#[must_use]
pub fn select_target(width: u32, height: u32) -> Option<u32> {
    SIZE_LADDER
        .iter()
        .copied()
        .find(|&tier| tier <= width && tier <= height)
}

/// Resize an extracted icon to its canonical resolution.
///
/// When a ladder tier applies and differs from the native size, the bitmap is
/// stretched directly onto a square canvas of that tier with a bicubic-class
/// filter. Icons already at a tier size, or below the whole ladder, pass
/// through untouched.
#[must_use]
pub fn canonicalize(icon: RgbaImage) -> RgbaImage {
    match select_target(icon.width(), icon.height()) {
        Some(tier) if (icon.width(), icon.height()) != (tier, tier) => {
            imageops::resize(&icon, tier, tier, FilterType::CatmullRom)
        }
        _ => icon,
    }
}
