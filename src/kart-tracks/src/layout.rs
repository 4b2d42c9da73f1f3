//! File naming and element naming conventions of an unpacked package

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Element tag names that carry track data
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ElementTags {
    /// Primary track definition (`track`)
    pub primary: String,
    /// Crazy-mode variant (`track_crz`)
    pub crz_variant: String,
    /// Reverse-direction variant referencing another track (`track_rvs`)
    pub reverse_variant: String,
}

impl Default for ElementTags {
    fn default() -> Self {
        Self {
            primary: "track".to_string(),
            crz_variant: "track_crz".to_string(),
            reverse_variant: "track_rvs".to_string(),
        }
    }
}

/// Where track files live inside an unpack directory and how they are named
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackLayout {
    /// Base metadata file, relative to the unpack directory
    pub base_file: PathBuf,
    /// Locale file name prefix, up to and including `@`
    pub locale_prefix: String,
    /// Locale file extension, without the dot
    pub locale_extension: String,
    pub tags: ElementTags,
}

impl Default for TrackLayout {
    fn default() -> Self {
        Self {
            base_file: PathBuf::from("track_common.rho").join("track@zz.bml"),
            locale_prefix: "trackLocale@".to_string(),
            locale_extension: "bml".to_string(),
            tags: ElementTags::default(),
        }
    }
}

impl TrackLayout {
    /// Absolute path of the base metadata file
    pub fn base_path(&self, base_dir: &Path) -> PathBuf {
        base_dir.join(&self.base_file)
    }

    /// Directory scanned for locale files (the base file's directory)
    pub fn locale_dir(&self, base_dir: &Path) -> PathBuf {
        match self.base_file.parent() {
            Some(parent) => base_dir.join(parent),
            None => base_dir.to_path_buf(),
        }
    }

    /// Extract the language code from a locale file name
    ///
    /// `trackLocale@cn.bml` -> `cn`. The code is the text between the prefix
    /// and the first `.`; names with a different prefix or extension, or an
    /// empty code, are not locale files.
    pub fn locale_code<'a>(&self, file_name: &'a str) -> Option<&'a str> {
        let rest = file_name.strip_prefix(self.locale_prefix.as_str())?;
        let extension = file_name.rsplit_once('.').map(|(_, ext)| ext)?;
        if extension != self.locale_extension {
            return None;
        }

        let code = rest.split('.').next()?;
        if code.is_empty() {
            return None;
        }
        Some(code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_paths() {
        let layout = TrackLayout::default();
        let base = Path::new("/tmp/unpack");
        assert_eq!(
            layout.base_path(base),
            Path::new("/tmp/unpack/track_common.rho/track@zz.bml")
        );
        assert_eq!(
            layout.locale_dir(base),
            Path::new("/tmp/unpack/track_common.rho")
        );
    }

    #[test]
    fn test_flat_layout_uses_base_dir() {
        let layout = TrackLayout {
            base_file: PathBuf::from("track@zz.bml"),
            ..TrackLayout::default()
        };
        let base = Path::new("/data");
        assert_eq!(layout.locale_dir(base), Path::new("/data"));
    }

    #[test]
    fn test_locale_code() {
        let layout = TrackLayout::default();
        assert_eq!(layout.locale_code("trackLocale@cn.bml"), Some("cn"));
        assert_eq!(layout.locale_code("trackLocale@tw.bml"), Some("tw"));
        assert_eq!(layout.locale_code("trackLocale@kr.extra.bml"), Some("kr"));

        assert_eq!(layout.locale_code("trackLocale@.bml"), None);
        assert_eq!(layout.locale_code("trackLocale@cn.xml"), None);
        assert_eq!(layout.locale_code("trackLocale@cn"), None);
        assert_eq!(layout.locale_code("track@zz.bml"), None);
        assert_eq!(layout.locale_code("TrackLocale@cn.bml"), None);
    }

    #[test]
    fn test_layout_from_partial_config() {
        let layout: TrackLayout =
            serde_json::from_str(r#"{"locale_extension": "xml"}"#).unwrap();
        assert_eq!(layout.locale_extension, "xml");
        assert_eq!(layout.locale_prefix, "trackLocale@");
        assert_eq!(layout.tags.primary, "track");
    }
}
