//! `.ico` container decoding.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use image::RgbaImage;

use super::DecodeError;

/// Decode the best frame of an `.ico` container.
///
/// Picks the largest directory entry (the file's best native resolution) and
/// decodes it to RGBA8. A file that opens but fails to parse as an ICO
/// container decodes to `None`; only failing to open the file is an error.
pub fn decode_ico_file(path: &Path) -> Result<Option<RgbaImage>, DecodeError> {
    let file = File::open(path).map_err(|source| DecodeError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let dir = match ico::IconDir::read(BufReader::new(file)) {
        Ok(dir) => dir,
        Err(e) => {
            log::debug!("not a valid ICO container {}: {}", path.display(), e);
            return Ok(None);
        }
    };

    let Some(entry) = dir.entries().iter().max_by_key(|e| e.width()) else {
        log::debug!("ICO container has no entries: {}", path.display());
        return Ok(None);
    };

    let icon = match entry.decode() {
        Ok(icon) => icon,
        Err(e) => {
            log::debug!("undecodable ICO entry in {}: {}", path.display(), e);
            return Ok(None);
        }
    };

    Ok(RgbaImage::from_raw(
        icon.width(),
        icon.height(),
        icon.rgba_data().to_vec(),
    ))
}
