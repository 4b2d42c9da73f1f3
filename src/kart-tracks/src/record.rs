//! Canonical per-track record

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Game type code used when the id carries no mode segment
pub const FALLBACK_GAME_TYPE: char = 'O';

/// Theme label for ids without a theme segment
pub const UNKNOWN_THEME: &str = "unknown";

/// Theme code of a track id: the first `_`-delimited segment
pub fn theme_of(id: &str) -> &str {
    match id.split('_').next() {
        Some(theme) if !theme.is_empty() => theme,
        _ => UNKNOWN_THEME,
    }
}

/// Game type code of a track id
///
/// First character of the second `_`-delimited segment:
/// `village_R01` -> `R`, `standalone` -> `O`.
pub fn game_type_of(id: &str) -> char {
    id.split('_')
        .nth(1)
        .and_then(|mode| mode.chars().next())
        .unwrap_or(FALLBACK_GAME_TYPE)
}

/// One track identity merged from the base and locale files
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapRecord {
    pub id: String,
    /// Locale code -> display name, only for locales that named this track
    pub translations: BTreeMap<String, String>,
    pub difficulty: Option<u8>,
    pub game_type: char,
    pub has_reverse_mode: bool,
    /// `gameType` annotations, deduplicated, in first-seen order
    pub tags: Vec<String>,
}

impl MapRecord {
    pub fn new(id: impl Into<String>) -> Self {
        let id = id.into();
        let game_type = game_type_of(&id);
        Self {
            id,
            translations: BTreeMap::new(),
            difficulty: None,
            game_type,
            has_reverse_mode: false,
            tags: Vec::new(),
        }
    }

    pub fn theme(&self) -> &str {
        theme_of(&self.id)
    }

    /// Add a tag unless already present
    pub fn add_tag(&mut self, tag: &str) {
        if !self.tags.iter().any(|t| t == tag) {
            self.tags.push(tag.to_string());
        }
    }

    /// Set the difficulty if none has been recorded yet
    pub fn set_difficulty_once(&mut self, difficulty: u8) {
        self.difficulty.get_or_insert(difficulty);
    }

    /// Recompute fields that are pure functions of the id
    pub fn refresh_derived(&mut self) {
        self.game_type = game_type_of(&self.id);
    }

    /// Display name for a locale
    pub fn name(&self, locale: &str) -> Option<&str> {
        self.translations.get(locale).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_game_type_of() {
        assert_eq!(game_type_of("village_R01"), 'R');
        assert_eq!(game_type_of("mine_C02"), 'C');
        assert_eq!(game_type_of("forest_I01_rvs"), 'I');
        assert_eq!(game_type_of("standalone"), 'O');
        assert_eq!(game_type_of("trailing_"), 'O');
        assert_eq!(game_type_of(""), 'O');
    }

    #[test]
    fn test_theme_of() {
        assert_eq!(theme_of("village_R01"), "village");
        assert_eq!(theme_of("standalone"), "standalone");
        assert_eq!(theme_of("_R01"), UNKNOWN_THEME);
        assert_eq!(theme_of(""), UNKNOWN_THEME);
    }

    #[test]
    fn test_new_record_defaults() {
        let record = MapRecord::new("forest_I01");
        assert_eq!(record.id, "forest_I01");
        assert_eq!(record.game_type, 'I');
        assert_eq!(record.theme(), "forest");
        assert!(record.translations.is_empty());
        assert!(record.tags.is_empty());
        assert_eq!(record.difficulty, None);
        assert!(!record.has_reverse_mode);
    }

    #[test]
    fn test_add_tag_deduplicates_in_order() {
        let mut record = MapRecord::new("forest_I01");
        record.add_tag("I");
        record.add_tag("R");
        record.add_tag("I");
        assert_eq!(record.tags, ["I", "R"]);
    }

    #[test]
    fn test_difficulty_first_writer_wins() {
        let mut record = MapRecord::new("forest_I01");
        record.set_difficulty_once(3);
        record.set_difficulty_once(5);
        assert_eq!(record.difficulty, Some(3));
    }

    #[test]
    fn test_refresh_derived_ignores_stale_value() {
        let mut record = MapRecord::new("village_R01");
        record.game_type = 'X';
        record.refresh_derived();
        assert_eq!(record.game_type, 'R');
    }
}
