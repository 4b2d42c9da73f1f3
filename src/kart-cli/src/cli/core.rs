//! Core CLI definitions

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "kart")]
#[command(about = "Kart track metadata importer", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Aggregate an unpack directory and store the resulting maps
    #[command(visible_alias = "i")]
    Import {
        /// Directory produced by the package unpacker
        path: PathBuf,

        /// Map database (uses configured default if not provided)
        #[arg(long)]
        db: Option<PathBuf>,

        /// Do not write to the map database
        #[arg(long, conflicts_with = "db")]
        no_db: bool,

        /// Also write the import summary as JSON
        #[arg(long)]
        json: Option<PathBuf>,

        /// Copy thumbnails and theme icons into this directory
        #[arg(long)]
        cache: Option<PathBuf>,
    },

    /// Show theme names inferred from an unpack directory
    #[command(visible_alias = "t")]
    Themes {
        /// Directory produced by the package unpacker
        path: PathBuf,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Decode a single BML file and print its tree
    #[command(visible_alias = "b")]
    Bml {
        /// Path to .bml file
        path: PathBuf,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Configure default settings
    #[command(visible_alias = "c")]
    Configure {
        /// Set default map database
        #[arg(long)]
        db: Option<PathBuf>,

        /// Set default image cache directory
        #[arg(long)]
        cache: Option<PathBuf>,

        /// Show current configuration
        #[arg(long)]
        show: bool,
    },
}
