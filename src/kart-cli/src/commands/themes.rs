//! Theme name command handler

use crate::config::Config;
use anyhow::Result;
use kart_tracks::{Aggregator, LogProgress, ThemeInference};
use std::path::Path;

/// Handle the themes command
pub fn handle(path: &Path, json: bool) -> Result<()> {
    let config = Config::load()?;
    let aggregation = Aggregator::new(config.layout).aggregate(path, &mut LogProgress)?;
    let themes = aggregation.by_theme();
    let names = ThemeInference::default().infer(aggregation.records.values());

    if json {
        println!("{}", serde_json::to_string_pretty(&names)?);
        return Ok(());
    }

    println!("{:<16} {:>5}  Name", "Theme", "Maps");
    println!("{}", "-".repeat(40));
    for (theme, records) in &themes {
        let name = names.get(*theme).map(String::as_str).unwrap_or("-");
        println!("{:<16} {:>5}  {}", theme, records.len(), name);
    }

    Ok(())
}
