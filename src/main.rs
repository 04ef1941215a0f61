use chrono::Local;
use dotenvy::dotenv;
use std::env;
use tariff_keeper::config;
use tariff_keeper::core::{daily, notify::ReloadNotifier, tariff};
use tariff_keeper::errors::Result;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file (as early as possible)
    dotenv().ok(); // Non-fatal, env vars can be set externally

    // 3. Load the initial tariff configuration
    let tariff_config = match env::var("TARIFF_CONFIG_PATH") {
        Ok(path) => config::tariffs::load_config(path),
        Err(_) => config::tariffs::load_default_config(),
    }
    .inspect_err(|e| error!("Failed to load tariff configuration: {e}"))?;

    // 4. Initialize database
    let db = config::database::create_connection()
        .await
        .inspect_err(|e| error!("Failed to connect to database: {e}"))?;
    config::database::create_tables(&db)
        .await
        .inspect(|()| info!("Database initialized successfully."))?;

    // 5. Seed the base configuration on first run
    if tariff::seed_base_config(&db, &tariff_config.tariff).await? {
        info!("Seeded base tariff configuration from config file.");
    }

    // 6. Catch up on any transition that came due while the process was down
    let today = Local::now().date_naive();
    if let Some(result) = daily::apply_daily_check(&db, today).await? {
        info!("{}", daily::format_daily_check_summary(&result));
    }

    // 7. Run the daily scheduler
    let effective = tariff::load_effective_tariff(&db).await?;
    info!(
        "Effective tariff: on-peak {:.3} c/kWh, off-peak {:.3} c/kWh, schedule {:?}",
        effective.on_peak_rate, effective.off_peak_rate, effective.peak_schedule
    );
    let notifier = ReloadNotifier::new(effective);

    daily::run_daily_scheduler(db, notifier).await
}
