//! Configuration command handlers
//!
//! Handles the `configure` subcommand for setting kart CLI defaults.

use crate::config::Config;
use anyhow::Result;
use std::path::PathBuf;

/// Handle the configure command
///
/// # Arguments
/// * `db` - Optional default map database
/// * `cache` - Optional default image cache directory
/// * `show` - If true, show current configuration
pub fn handle(db: Option<PathBuf>, cache: Option<PathBuf>, show: bool) -> Result<()> {
    let mut config = Config::load()?;

    if show {
        show_config(&config);
        return Ok(());
    }

    if db.is_none() && cache.is_none() {
        show_usage();
        return Ok(());
    }

    apply(&mut config, db, cache);
    config.save()?;

    if let Some(path) = &config.db_path {
        println!("Map database: {}", path.display());
    }
    if let Some(path) = &config.cache_dir {
        println!("Image cache: {}", path.display());
    }
    if let Ok(path) = Config::config_path() {
        println!("Config saved to: {}", path.display());
    }

    Ok(())
}

fn apply(config: &mut Config, db: Option<PathBuf>, cache: Option<PathBuf>) {
    if db.is_some() {
        config.db_path = db;
    }
    if cache.is_some() {
        config.cache_dir = cache;
    }
}

/// Display current configuration
fn show_config(config: &Config) {
    println!("Map database: {}", config.resolve_db_path(None).display());

    match &config.cache_dir {
        Some(path) => println!("Image cache: {}", path.display()),
        None => println!("No image cache configured"),
    }

    println!("Base file: {}", config.layout.base_file.display());
    println!(
        "Locale files: {}<lang>.{}",
        config.layout.locale_prefix, config.layout.locale_extension
    );

    if let Ok(path) = Config::config_path() {
        println!("Config file: {}", path.display());
    }
}

/// Show usage help for the configure command
fn show_usage() {
    println!("Usage: kart configure --db PATH --cache DIR");
    println!("   or: kart configure --show");
    println!();
    println!("Element tags and file names can be changed in the [layout]");
    println!("section of the config file.");
}
