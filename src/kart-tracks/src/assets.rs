//! Image asset caching from an unpack directory
//!
//! - `trackThumb.rho/<track id>/xt_trackThumb.png` -> `<cache>/<track id>.png`
//! - `dialog2_selectTrackEx.rho/<theme>_1.png` -> `<cache>/<theme>.png`

use std::fs;
use std::path::Path;

use crate::Result;

/// Package directory holding one folder of thumbnails per track id
pub const THUMBNAIL_DIR: &str = "trackThumb.rho";

/// Thumbnail file name inside each track folder
pub const THUMBNAIL_FILE: &str = "xt_trackThumb.png";

/// Package directory holding theme icons
pub const THEME_ICON_DIR: &str = "dialog2_selectTrackEx.rho";

/// Suffix of the theme icon variant that gets cached
pub const THEME_ICON_SUFFIX: &str = "_1.png";

/// Copy one thumbnail per track into `cache_dir`, returning how many
pub fn cache_thumbnails(unpack_dir: &Path, cache_dir: &Path) -> Result<usize> {
    let source = unpack_dir.join(THUMBNAIL_DIR);
    fs::create_dir_all(cache_dir)?;
    if !source.is_dir() {
        return Ok(0);
    }

    let mut copied = 0;
    for entry in fs::read_dir(&source)? {
        let entry = entry?;
        if !entry.file_type()?.is_dir() {
            continue;
        }

        let thumb = entry.path().join(THUMBNAIL_FILE);
        if !thumb.is_file() {
            continue;
        }

        let mut target = entry.file_name();
        target.push(".png");
        fs::copy(&thumb, cache_dir.join(target))?;
        copied += 1;
    }

    tracing::debug!("Cached {} thumbnails into {}", copied, cache_dir.display());
    Ok(copied)
}

/// Copy theme icons into `cache_dir`, returning how many
pub fn cache_theme_icons(unpack_dir: &Path, cache_dir: &Path) -> Result<usize> {
    let source = unpack_dir.join(THEME_ICON_DIR);
    fs::create_dir_all(cache_dir)?;
    if !source.is_dir() {
        return Ok(0);
    }

    let mut copied = 0;
    for entry in fs::read_dir(&source)? {
        let entry = entry?;
        let name = entry.file_name();
        let Some(theme) = name
            .to_str()
            .and_then(|n| n.strip_suffix(THEME_ICON_SUFFIX))
        else {
            continue;
        };
        if theme.is_empty() || !entry.file_type()?.is_file() {
            continue;
        }

        fs::copy(entry.path(), cache_dir.join(format!("{}.png", theme)))?;
        copied += 1;
    }

    tracing::debug!("Cached {} theme icons into {}", copied, cache_dir.display());
    Ok(copied)
}
