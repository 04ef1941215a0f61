//! Shared test utilities for `TariffKeeper`.
//!
//! Provides the standard in-memory database setup and fixture helpers used
//! across the integration tests in the core modules.

use crate::{config::tariffs::TariffConfig, core::tariff, errors::Result};
use sea_orm::DatabaseConnection;

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Seeds a base configuration with typical residential rates.
///
/// # Defaults
/// * `on_peak_rate`: 30.0 c/kWh
/// * `off_peak_rate`: 15.0 c/kWh
/// * `peak_schedule`: "standard"
pub async fn seed_test_base_config(db: &DatabaseConnection) -> Result<bool> {
    tariff::seed_base_config(
        db,
        &TariffConfig {
            on_peak_rate: 30.0,
            off_peak_rate: 15.0,
            peak_schedule: Some("standard".to_string()),
        },
    )
    .await
}
