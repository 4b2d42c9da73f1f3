//! Track metadata aggregation for kart resource packages
//!
//! An unpacked `track_common.rho` package holds one base metadata file
//! (`track@zz.bml`) and one translation file per language
//! (`trackLocale@<lang>.bml`), all in BML format. This crate merges them into
//! one [`MapRecord`] per track id and proposes display names for theme codes.
//!
//! # Example
//!
//! ```no_run
//! use kart_tracks::{aggregate, infer_theme_names, LogProgress};
//! use std::path::Path;
//!
//! let result = aggregate(Path::new("data/temp_unpack"), &mut LogProgress).unwrap();
//! println!("{} maps", result.count());
//!
//! for (theme, name) in infer_theme_names(result.records.values()) {
//!     println!("{theme}: {name}");
//! }
//! ```
//!
//! # Features
//!
//! - `db` (default) - SQLite [`MapStore`] using rusqlite

pub mod aggregate;
pub mod assets;
pub mod element;
pub mod import;
pub mod layout;
pub mod progress;
pub mod record;
#[cfg(feature = "db")]
pub mod store;
pub mod themes;

pub use aggregate::{aggregate, Aggregation, Aggregator};
pub use assets::{cache_theme_icons, cache_thumbnails};
pub use element::{ElementKind, ElementScan, TrackElement};
pub use import::{import, ImportSummary, Importer, MapSink, NullSink};
pub use layout::{ElementTags, TrackLayout};
pub use progress::{Level, LogProgress, Progress};
pub use record::{game_type_of, theme_of, MapRecord, FALLBACK_GAME_TYPE, UNKNOWN_THEME};
#[cfg(feature = "db")]
pub use store::{MapStore, StoredMap, DEFAULT_DB_PATH};
pub use themes::{clean_candidate, infer_theme_names, ThemeInference};

/// Errors from track aggregation and import
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Aggregation cancelled")]
    Cancelled,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Store error: {0}")]
    Sink(String),

    #[cfg(feature = "db")]
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[cfg(feature = "db")]
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
