//! SQLite map store using rusqlite (synchronous)
//!
//! One row per track id. Translations for the four shipped locales are kept
//! in their own columns; tags are stored as a JSON array.

use rusqlite::{params, Connection};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use crate::import::MapSink;
use crate::record::MapRecord;
use crate::Result;

/// Default database location
pub const DEFAULT_DB_PATH: &str = "data/maps.db";

/// Locales with a dedicated name column
pub const NAME_LOCALES: [&str; 4] = ["cn", "tw", "kr", "en"];

const SCHEMA: &str = r#"
    CREATE TABLE IF NOT EXISTS maps (
        id TEXT PRIMARY KEY,
        theme TEXT,
        name_cn TEXT,
        name_tw TEXT,
        name_kr TEXT,
        name_en TEXT,
        difficulty INTEGER,
        game_type TEXT,
        has_reverse_mode BOOLEAN NOT NULL DEFAULT 0,
        tags TEXT
    );
"#;

/// A row of the `maps` table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredMap {
    pub id: String,
    pub theme: String,
    pub name_cn: Option<String>,
    pub name_tw: Option<String>,
    pub name_kr: Option<String>,
    pub name_en: Option<String>,
    pub difficulty: Option<u8>,
    pub game_type: String,
    pub has_reverse_mode: bool,
    pub tags: Vec<String>,
}

/// SQLite-backed map store
pub struct MapStore {
    conn: Connection,
}

impl MapStore {
    /// Open or create the database
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let conn = Connection::open(path.as_ref())?;
        Ok(Self { conn })
    }

    /// Open an in-memory database (for testing)
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Ok(Self { conn })
    }

    /// Create the schema if missing
    pub fn init(&self) -> Result<()> {
        self.conn.execute_batch(SCHEMA)?;
        Ok(())
    }

    /// Insert or replace all records in one transaction
    pub fn save_maps_batch(&mut self, records: &[MapRecord]) -> Result<()> {
        let tx = self.conn.transaction()?;
        {
            let mut stmt = tx.prepare(
                "INSERT OR REPLACE INTO maps \
                 (id, theme, name_cn, name_tw, name_kr, name_en, difficulty, game_type, has_reverse_mode, tags) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
            )?;
            for record in records {
                let [cn, tw, kr, en] = NAME_LOCALES.map(|locale| record.name(locale));
                let tags = serde_json::to_string(&record.tags)?;
                stmt.execute(params![
                    record.id,
                    record.theme(),
                    cn,
                    tw,
                    kr,
                    en,
                    record.difficulty,
                    record.game_type.to_string(),
                    record.has_reverse_mode,
                    tags,
                ])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    /// All rows grouped by theme, ordered by theme then id
    pub fn maps_by_theme(&self) -> Result<BTreeMap<String, Vec<StoredMap>>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, theme, name_cn, name_tw, name_kr, name_en, difficulty, game_type, has_reverse_mode, tags \
             FROM maps ORDER BY theme, id",
        )?;

        let rows = stmt.query_map([], |row| {
            Ok((
                StoredMap {
                    id: row.get(0)?,
                    theme: row.get(1)?,
                    name_cn: row.get(2)?,
                    name_tw: row.get(3)?,
                    name_kr: row.get(4)?,
                    name_en: row.get(5)?,
                    difficulty: row.get(6)?,
                    game_type: row.get(7)?,
                    has_reverse_mode: row.get(8)?,
                    tags: Vec::new(),
                },
                row.get::<_, Option<String>>(9)?,
            ))
        })?;

        let mut themes: BTreeMap<String, Vec<StoredMap>> = BTreeMap::new();
        for row in rows {
            let (mut map, tags) = row?;
            if let Some(tags) = tags {
                map.tags = serde_json::from_str(&tags)?;
            }
            themes.entry(map.theme.clone()).or_default().push(map);
        }
        Ok(themes)
    }

    /// Number of stored maps
    pub fn count(&self) -> Result<usize> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM maps", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    /// Delete every stored map
    pub fn clear(&self) -> Result<()> {
        self.conn.execute("DELETE FROM maps", [])?;
        Ok(())
    }
}

impl MapSink for MapStore {
    fn save_maps_batch(&mut self, records: &[MapRecord]) -> Result<()> {
        MapStore::save_maps_batch(self, records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> MapStore {
        let store = MapStore::open_in_memory().unwrap();
        store.init().unwrap();
        store
    }

    fn village() -> MapRecord {
        let mut record = MapRecord::new("village_R01");
        record
            .translations
            .insert("cn".to_string(), "城镇 高速公路".to_string());
        record
            .translations
            .insert("tw".to_string(), "城鎮 高速公路".to_string());
        record.difficulty = Some(1);
        record.has_reverse_mode = true;
        record.add_tag("R");
        record
    }

    #[test]
    fn test_save_and_group_by_theme() {
        let mut store = store();
        store
            .save_maps_batch(&[
                village(),
                MapRecord::new("forest_I01"),
                MapRecord::new("village_I02"),
            ])
            .unwrap();

        let themes = store.maps_by_theme().unwrap();
        let theme_names: Vec<_> = themes.keys().map(String::as_str).collect();
        assert_eq!(theme_names, ["forest", "village"]);

        let village_rows = &themes["village"];
        assert_eq!(village_rows.len(), 2);
        let row = &village_rows[0];
        assert_eq!(row.id, "village_R01");
        assert_eq!(row.name_cn.as_deref(), Some("城镇 高速公路"));
        assert_eq!(row.name_tw.as_deref(), Some("城鎮 高速公路"));
        assert_eq!(row.name_kr, None);
        assert_eq!(row.difficulty, Some(1));
        assert_eq!(row.game_type, "R");
        assert!(row.has_reverse_mode);
        assert_eq!(row.tags, ["R"]);
    }

    #[test]
    fn test_upsert_replaces_by_id() {
        let mut store = store();
        store.save_maps_batch(&[village()]).unwrap();

        let mut updated = village();
        updated.difficulty = Some(4);
        updated.translations.remove("tw");
        store.save_maps_batch(&[updated]).unwrap();

        assert_eq!(store.count().unwrap(), 1);
        let themes = store.maps_by_theme().unwrap();
        let row = &themes["village"][0];
        assert_eq!(row.difficulty, Some(4));
        assert_eq!(row.name_tw, None);
    }

    #[test]
    fn test_clear() {
        let mut store = store();
        store.save_maps_batch(&[village()]).unwrap();
        store.clear().unwrap();
        assert_eq!(store.count().unwrap(), 0);
        assert!(store.maps_by_theme().unwrap().is_empty());
    }

    #[test]
    fn test_open_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("maps.db");
        {
            let mut store = MapStore::open(&path).unwrap();
            store.init().unwrap();
            store.save_maps_batch(&[village()]).unwrap();
        }
        let store = MapStore::open(&path).unwrap();
        assert_eq!(store.count().unwrap(), 1);
    }
}
