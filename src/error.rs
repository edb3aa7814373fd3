//! src/error.rs

use sqlx::migrate::MigrateError;

/// Exit code telling the process supervisor not to restart the service.
pub const FATAL_EXIT_CODE: i32 = 4;

/// Any failure that leaves the service unable to serve requests.
#[derive(thiserror::Error)]
pub enum StartupError {
    #[error("Invalid database connection string: {0}")]
    InvalidDatabaseUrl(#[source] sqlx::Error),
    #[error("Failed to connect to the database: {0}")]
    DatabaseUnreachable(#[source] sqlx::Error),
    #[error("Failed to create or verify the database tables: {0}")]
    Schema(#[from] MigrateError),
}

impl StartupError {
    pub fn exit_code(&self) -> i32 {
        FATAL_EXIT_CODE
    }
}

impl std::fmt::Debug for StartupError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

pub fn error_chain_fmt(
    e: &impl std::error::Error,
    f: &mut std::fmt::Formatter<'_>,
) -> std::fmt::Result {
    writeln!(f, "{}\n", e)?;
    let mut current = e.source();
    while let Some(cause) = current {
        writeln!(f, "Caused by:\n\t{}", cause)?;
        current = cause.source();
    }
    Ok(())
}

/// Logs `error` once at critical severity and terminates the process.
pub fn exit_on_startup_failure(error: StartupError) -> ! {
    tracing::error!(
        severity = "CRITICAL",
        error.cause_chain = ?error,
        "{}: Cannot continue",
        error
    );
    std::process::exit(error.exit_code())
}
