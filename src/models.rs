//! src/models.rs

use sqlx::migrate::{MigrateError, Migrator};
use sqlx::{Executor, PgPool};

static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Makes sure our database tables exist.
#[tracing::instrument(name = "Initialising the database schema", skip(pool))]
pub async fn init_db(pool: &PgPool) -> Result<(), MigrateError> {
    MIGRATOR.run(pool).await
}

/// Drops every table and creates them again. Not meant for production.
#[tracing::instrument(name = "Recreating the database schema", skip(pool))]
pub async fn recreate_db(pool: &PgPool) -> Result<(), MigrateError> {
    pool.execute(
        r#"
        DROP TABLE IF EXISTS accounts;
        DROP TABLE IF EXISTS _sqlx_migrations;
        "#,
    )
    .await?;
    init_db(pool).await
}
