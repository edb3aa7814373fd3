//! src/cli.rs

use clap::{Parser, Subcommand};

use crate::models;
use crate::startup::AppContext;

#[derive(Parser, Debug)]
#[command(name = "account-service", about = "Account REST API service")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Serve HTTP requests (default)
    Serve,
    /// Recreates a local database. You probably should not use this on production.
    DbCreate,
}

impl Cli {
    pub fn command(&self) -> Command {
        self.command.unwrap_or(Command::Serve)
    }
}

pub async fn db_create(context: &AppContext) -> anyhow::Result<()> {
    models::recreate_db(&context.db_pool).await?;
    tracing::info!("Database tables recreated");
    Ok(())
}
