mod cli;
mod commands;
mod config;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use cli::*;

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "kart=info,kart_tracks=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Import {
            path,
            db,
            no_db,
            json,
            cache,
        } => {
            commands::import::handle(&path, db, no_db, json, cache)?;
        }

        Commands::Themes { path, json } => {
            commands::themes::handle(&path, json)?;
        }

        Commands::Bml { path, json } => {
            commands::bml::show(&path, json)?;
        }

        Commands::Configure { db, cache, show } => {
            commands::configure::handle(db, cache, show)?;
        }
    }

    Ok(())
}
