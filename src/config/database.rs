//! Database configuration module for `TariffKeeper`.
//!
//! Handles the `SQLite` connection and table creation using `SeaORM`. Tables
//! are generated from the entity definitions via
//! `Schema::create_table_from_entity`, so the database schema always matches
//! the Rust struct definitions without manual SQL.

use crate::entities::{BaseConfig, TariffOverrides};
use crate::errors::Result;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Schema};

/// Default `SQLite` location used when `DATABASE_URL` is not set.
const DEFAULT_DATABASE_URL: &str = "sqlite://data/tariff_keeper.sqlite?mode=rwc";

/// Gets the database URL from the `DATABASE_URL` environment variable,
/// falling back to a local `SQLite` file.
#[must_use]
pub fn get_database_url() -> String {
    std::env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string())
}

/// Establishes a connection to the `SQLite` database.
///
/// # Errors
/// Returns an error if the database cannot be opened.
pub async fn create_connection() -> Result<DatabaseConnection> {
    Database::connect(get_database_url()).await.map_err(Into::into)
}

/// Creates all necessary database tables from the entity definitions.
///
/// Safe to call on an existing in-memory database in tests; production code
/// calls it once at startup.
///
/// # Errors
/// Returns an error if a table creation statement fails.
pub async fn create_tables(db: &DatabaseConnection) -> Result<()> {
    let builder = db.get_database_backend();
    let schema = Schema::new(builder);

    let base_config_table = schema.create_table_from_entity(BaseConfig);
    let overrides_table = schema.create_table_from_entity(TariffOverrides);

    db.execute(builder.build(&base_config_table)).await?;
    db.execute(builder.build(&overrides_table)).await?;

    Ok(())
}
