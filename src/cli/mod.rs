//! CLI module for port-sync
//!
//! Single `sync` subcommand running the full pipeline once.

pub mod sync;

use clap::{Parser, Subcommand};

/// port-sync - Syncs identity-provider users and teams into the Port catalog
#[derive(Parser)]
#[command(name = "port-sync")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Fetch users and teams and upsert them as catalog entities
    Sync,
}
