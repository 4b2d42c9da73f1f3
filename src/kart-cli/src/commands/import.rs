//! Import command handler
//!
//! Runs the full pipeline over an unpack directory: aggregation, theme name
//! inference, persistence and optional image caching.

use crate::config::Config;
use anyhow::{Context, Result};
use kart_tracks::{
    cache_theme_icons, cache_thumbnails, Aggregator, ImportSummary, Importer, LogProgress,
    MapStore, NullSink,
};
use std::fs;
use std::path::{Path, PathBuf};

/// Where the import results go
pub struct Targets {
    /// Map database, `None` to skip persistence
    pub db: Option<PathBuf>,
    pub json: Option<PathBuf>,
    pub cache: Option<PathBuf>,
}

/// Handle the import command
pub fn handle(
    path: &Path,
    db: Option<PathBuf>,
    no_db: bool,
    json: Option<PathBuf>,
    cache: Option<PathBuf>,
) -> Result<()> {
    let config = Config::load()?;
    let targets = Targets {
        db: if no_db {
            None
        } else {
            Some(config.resolve_db_path(db))
        },
        json,
        cache: cache.or_else(|| config.cache_dir.clone()),
    };

    let summary = run(&config, path, &targets)?;
    print_summary(&summary);
    Ok(())
}

/// Run the import against `targets`
pub fn run(config: &Config, path: &Path, targets: &Targets) -> Result<ImportSummary> {
    if !path.is_dir() {
        anyhow::bail!("Unpack directory not found: {}", path.display());
    }

    let importer = Importer::new(Aggregator::new(config.layout.clone()));
    let mut progress = LogProgress;

    let summary = match &targets.db {
        Some(db_path) => {
            if let Some(parent) = db_path.parent() {
                fs::create_dir_all(parent).with_context(|| {
                    format!("Failed to create database directory {}", parent.display())
                })?;
            }
            let mut store = MapStore::open(db_path)
                .with_context(|| format!("Failed to open database {}", db_path.display()))?;
            store.init().context("Failed to initialize database")?;
            importer.run(path, &mut store, &mut progress)?
        }
        None => importer.run(path, &mut NullSink, &mut progress)?,
    };

    if let Some(json_path) = &targets.json {
        let contents = serde_json::to_string_pretty(&summary)?;
        fs::write(json_path, contents)
            .with_context(|| format!("Failed to write {}", json_path.display()))?;
        tracing::info!("Wrote import summary to {}", json_path.display());
    }

    if let Some(cache_dir) = &targets.cache {
        let thumbnails = cache_thumbnails(path, &cache_dir.join("thumbnails"))?;
        let icons = cache_theme_icons(path, &cache_dir.join("theme_icons"))?;
        tracing::info!(
            "Cached {} thumbnails and {} theme icons in {}",
            thumbnails,
            icons,
            cache_dir.display()
        );
    }

    Ok(summary)
}

fn print_summary(summary: &ImportSummary) {
    println!("Imported {} maps", summary.count);

    if !summary.theme_names.is_empty() {
        println!("\nTheme names ({}):", summary.theme_names.len());
        for (theme, name) in &summary.theme_names {
            println!("  {:<16} {}", theme, name);
        }
    }
}
