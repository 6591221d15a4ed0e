//! Platform icon extraction for executables and libraries.
//!
//! On Windows this goes through the shell via the `windows-icons` crate,
//! which resolves the file's associated icon (PE resources included) to an
//! RGBA bitmap. Other platforms have no comparable capability for PE
//! binaries, so extraction reports "no icon" there.

use std::path::Path;

use image::RgbaImage;

/// Extract the associated icon of an executable or library.
///
/// Every failure shape here (no resource, unsupported layout, shell refusal)
/// degrades to `None`: arbitrary binaries routinely have no icon and must not
/// disturb the pipeline.
#[cfg(windows)]
pub fn decode_executable_icon(path: &Path) -> Option<RgbaImage> {
    let Some(path_str) = path.to_str() else {
        log::debug!("non-UTF-8 path, skipping icon lookup: {}", path.display());
        return None;
    };

    match windows_icons::get_icon_by_path(path_str) {
        Ok(icon) => Some(icon),
        Err(e) => {
            log::debug!("no icon extracted from {}: {}", path.display(), e);
            None
        }
    }
}

/// Extract the associated icon of an executable or library.
///
/// Non-Windows platforms cannot resolve PE-embedded icons; candidates of
/// this kind decode to "no icon".
#[cfg(not(windows))]
pub fn decode_executable_icon(path: &Path) -> Option<RgbaImage> {
    log::trace!(
        "executable icon extraction unavailable on this platform: {}",
        path.display()
    );
    None
}
