//! Daily check orchestration and the midnight scheduler.
//!
//! [`apply_daily_check`] is the read-evaluate-write critical section: it
//! loads the overrides row, runs the transition engine, and persists the
//! promoted overlay, all inside one database transaction so a concurrent
//! edit can neither be overwritten nor half-applied. A check that promotes
//! nothing performs no write at all.
//!
//! [`run_daily_scheduler`] is the long-lived trigger: it sleeps until one
//! second past the next local midnight, runs the check with the current
//! calendar date, and notifies subscribers when a promotion committed. The
//! engine's idempotence makes repeated or delayed firings safe, so the loop
//! does not track what it has already applied.

use crate::{
    core::{
        notify::ReloadNotifier,
        overrides::{Overrides, TariffField},
        tariff, transition,
    },
    errors::Result,
};
use chrono::{DateTime, Days, Local, NaiveDate, NaiveTime, TimeDelta, TimeZone};
use sea_orm::{DatabaseConnection, TransactionTrait};
use std::time::Duration;
use tracing::{debug, error, info};

/// The daily fire time is one second past local midnight.
const FIRE_OFFSET_SECONDS: i64 = 1;

/// The result of a daily check that promoted at least one staged field.
#[derive(Debug, Clone)]
pub struct DailyCheckResult {
    /// Fields promoted by this check, in evaluation order
    pub promoted_fields: Vec<TariffField>,
    /// The overlay as persisted after promotion
    pub overrides: Overrides,
    /// The date the check ran with
    pub check_date: NaiveDate,
}

/// Runs the scheduled-transition check for `today` against the persisted
/// overrides row.
///
/// Returns `Ok(None)` when nothing was due or eligible (the row is left
/// untouched) and `Ok(Some(result))` once the promoted overlay has been
/// committed. If the write fails the transaction rolls back and the staged
/// values stay in place for the next tick.
///
/// # Errors
/// Returns an error if loading or persisting the overrides row fails.
pub async fn apply_daily_check(
    db: &DatabaseConnection,
    today: NaiveDate,
) -> Result<Option<DailyCheckResult>> {
    let txn = db.begin().await?;

    let current = tariff::load_overrides(&txn).await?;
    let outcome = transition::evaluate(&current, today);

    if !outcome.promoted {
        txn.commit().await?;
        return Ok(None);
    }

    tariff::save_overrides(&txn, &outcome.overrides).await?;
    txn.commit().await?;

    Ok(Some(DailyCheckResult {
        promoted_fields: outcome.promoted_fields,
        overrides: outcome.overrides,
        check_date: today,
    }))
}

/// Formats a daily check result into a human-readable summary for logging.
#[must_use]
pub fn format_daily_check_summary(result: &DailyCheckResult) -> String {
    use std::fmt::Write;

    let mut summary = format!(
        "Scheduled tariff change applied on {} ({} field(s))\n",
        result.check_date,
        result.promoted_fields.len()
    );

    for field in &result.promoted_fields {
        let value = match field {
            TariffField::OnPeakRate => result
                .overrides
                .on_peak_rate
                .map_or_else(|| "-".to_string(), |r| format!("{r:.3} c/kWh")),
            TariffField::OffPeakRate => result
                .overrides
                .off_peak_rate
                .map_or_else(|| "-".to_string(), |r| format!("{r:.3} c/kWh")),
            TariffField::PeakSchedule => result
                .overrides
                .peak_schedule
                .clone()
                .unwrap_or_else(|| "-".to_string()),
        };

        // write! is infallible when writing to String, so unwrap is safe
        writeln!(summary, "  {} -> {}", field.key(), value).unwrap();
    }

    summary
}

/// Duration until the next daily fire time, one second past midnight in the
/// timezone of `now`.
///
/// Computed in naive local time; an occasional extra same-day fire around a
/// DST shift is absorbed by the engine's date gate.
#[must_use]
pub fn delay_until_next_check<Tz: TimeZone>(now: &DateTime<Tz>) -> Duration {
    let next_fire = (now.date_naive() + Days::new(1)).and_time(NaiveTime::MIN)
        + TimeDelta::seconds(FIRE_OFFSET_SECONDS);

    (next_fire - now.naive_local())
        .to_std()
        .unwrap_or(Duration::from_secs(1))
}

/// Long-lived daily trigger loop.
///
/// Sleeps until one second past each local midnight, runs
/// [`apply_daily_check`] with the current date, and broadcasts the
/// re-resolved effective tariff after a committed promotion. Check failures
/// are logged and retried on the next tick; the daily cadence self-heals.
///
/// # Errors
/// Does not return under normal operation; the `Result` covers future
/// shutdown paths.
pub async fn run_daily_scheduler(db: DatabaseConnection, notifier: ReloadNotifier) -> Result<()> {
    loop {
        let delay = delay_until_next_check(&Local::now());
        debug!("Next tariff check in {}s", delay.as_secs());
        tokio::time::sleep(delay).await;

        let today = Local::now().date_naive();
        match apply_daily_check(&db, today).await {
            Ok(Some(result)) => {
                info!("{}", format_daily_check_summary(&result));
                match tariff::load_effective_tariff(&db).await {
                    Ok(effective) => notifier.notify(effective),
                    Err(e) => error!("Failed to re-resolve effective tariff: {e}"),
                }
            }
            Ok(None) => debug!("No tariff transition due on {today}"),
            Err(e) => error!("Daily tariff check failed, retrying on next tick: {e}"),
        }
    }
}
