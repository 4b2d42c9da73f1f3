//! Command handlers for kart CLI
//!
//! Each subcommand has its own module with handler functions.

pub mod bml;
pub mod configure;
pub mod import;
pub mod themes;
