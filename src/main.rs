//! src/main.rs

use anyhow::Context;
use clap::Parser;

// this binary will target "package name"
use account_service::cli::{db_create, Cli, Command};
use account_service::configuration::{
    database_url_banner, get_configuration, DATABASE_URL_VAR,
};
use account_service::error::exit_on_startup_failure;
use account_service::startup::{bootstrap, Application};
use account_service::telemetry::{get_subscriber, init_subscriber};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    println!(
        "{}",
        database_url_banner(std::env::var(DATABASE_URL_VAR).ok().as_deref())
    );

    let configuration =
        get_configuration().context("Failed to read configuration")?;

    let subscriber = get_subscriber(
        configuration.application.log_channel.clone(),
        configuration.application.log_level.clone(),
        std::io::stdout,
    );
    init_subscriber(subscriber);

    let context = match bootstrap(configuration).await {
        Ok(context) => context,
        Err(e) => exit_on_startup_failure(e),
    };

    match cli.command() {
        Command::Serve => {
            Application::build(context)?.run_until_stopped().await?;
        }
        Command::DbCreate => db_create(&context).await?,
    }
    Ok(())
}
