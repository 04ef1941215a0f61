//! Store operations over the persisted tariff configuration.
//!
//! All reads and writes of the `base_config` and `tariff_overrides` rows go
//! through this module. Every mutation follows the same protocol: load the
//! current overlay, modify it, write the whole row back inside a
//! transaction. Nothing mutates columns in place, so a concurrent reader
//! never observes a torn update and the daily check cannot race a user edit.
//!
//! Write-time validation lives here too: rates must be non-negative and a
//! scheduled date must parse as a real ISO calendar date before it is
//! stored. The transition engine downstream relies on this and performs no
//! validation of its own.

use crate::{
    config::tariffs::TariffConfig,
    core::{
        overrides::{Overrides, TariffField},
        resolver::{self, EffectiveTariff, FieldValue},
        transition::ISO_DATE_FORMAT,
    },
    entities::{BaseConfig, TariffOverrides, base_config, tariff_overrides},
    errors::{Error, Result},
};
use chrono::{NaiveDate, Utc};
use sea_orm::{Set, TransactionTrait, prelude::*};

/// A request to stage new values for deferred activation.
///
/// The staged slots replace the staging area wholesale: `None` means
/// "nothing staged for this field". Current values are untouched until the
/// daily check promotes the staged ones.
#[derive(Debug, Clone, Default)]
pub struct StagedTransition {
    /// Staged on-peak rate in cents/kWh
    pub future_on_peak_rate: Option<f64>,
    /// Staged off-peak rate in cents/kWh
    pub future_off_peak_rate: Option<f64>,
    /// Staged schedule identifier
    pub future_peak_schedule: Option<String>,
    /// Effective date, ISO `YYYY-MM-DD`
    pub scheduled_date: String,
}

fn validate_rate(rate: f64) -> Result<()> {
    // Also rejects NaN
    if rate >= 0.0 {
        Ok(())
    } else {
        Err(Error::InvalidRate { amount: rate })
    }
}

/// Parses and re-normalizes a user-supplied scheduled date.
///
/// Rejecting malformed dates here is what lets the transition engine use a
/// plain string comparison at check time.
fn normalize_scheduled_date(value: &str) -> Result<String> {
    NaiveDate::parse_from_str(value, ISO_DATE_FORMAT)
        .map(|d| d.format(ISO_DATE_FORMAT).to_string())
        .map_err(|_| Error::InvalidDate {
            value: value.to_string(),
        })
}

/// Loads the overrides overlay, or an empty one if no row exists yet.
///
/// # Errors
/// Returns an error if the query fails.
pub async fn load_overrides<C>(db: &C) -> Result<Overrides>
where
    C: ConnectionTrait,
{
    let row = TariffOverrides::find().one(db).await?;
    Ok(row.map(Overrides::from).unwrap_or_default())
}

/// Writes the overrides overlay as a single row, inserting it on first use.
///
/// # Errors
/// Returns an error if the write fails.
pub async fn save_overrides<C>(db: &C, overrides: &Overrides) -> Result<()>
where
    C: ConnectionTrait,
{
    let now = Utc::now().naive_utc();
    let existing = TariffOverrides::find().one(db).await?;

    if let Some(row) = existing {
        let mut active: tariff_overrides::ActiveModel = row.into();
        active.on_peak_rate = Set(overrides.on_peak_rate);
        active.off_peak_rate = Set(overrides.off_peak_rate);
        active.peak_schedule = Set(overrides.peak_schedule.clone());
        active.future_on_peak_rate = Set(overrides.future_on_peak_rate);
        active.future_off_peak_rate = Set(overrides.future_off_peak_rate);
        active.future_peak_schedule = Set(overrides.future_peak_schedule.clone());
        active.scheduled_date = Set(overrides.scheduled_date.clone());
        active.updated_at = Set(now);
        active.update(db).await?;
    } else {
        let row = tariff_overrides::ActiveModel {
            on_peak_rate: Set(overrides.on_peak_rate),
            off_peak_rate: Set(overrides.off_peak_rate),
            peak_schedule: Set(overrides.peak_schedule.clone()),
            future_on_peak_rate: Set(overrides.future_on_peak_rate),
            future_off_peak_rate: Set(overrides.future_off_peak_rate),
            future_peak_schedule: Set(overrides.future_peak_schedule.clone()),
            scheduled_date: Set(overrides.scheduled_date.clone()),
            updated_at: Set(now),
            ..Default::default()
        };
        row.insert(db).await?;
    }

    Ok(())
}

/// Loads the base configuration row, if one has been submitted.
///
/// # Errors
/// Returns an error if the query fails.
pub async fn load_base_config<C>(db: &C) -> Result<Option<base_config::Model>>
where
    C: ConnectionTrait,
{
    BaseConfig::find().one(db).await.map_err(Into::into)
}

/// Replaces the base configuration with an explicitly-submitted one.
///
/// # Errors
/// Returns [`Error::InvalidRate`] for a negative rate, or a database error.
pub async fn submit_base_config(
    db: &DatabaseConnection,
    on_peak_rate: f64,
    off_peak_rate: f64,
    peak_schedule: Option<String>,
) -> Result<base_config::Model> {
    validate_rate(on_peak_rate)?;
    validate_rate(off_peak_rate)?;

    let now = Utc::now().naive_utc();
    let txn = db.begin().await?;

    let model = if let Some(row) = BaseConfig::find().one(&txn).await? {
        let mut active: base_config::ActiveModel = row.into();
        active.on_peak_rate = Set(on_peak_rate);
        active.off_peak_rate = Set(off_peak_rate);
        active.peak_schedule = Set(peak_schedule);
        active.updated_at = Set(now);
        active.update(&txn).await?
    } else {
        let row = base_config::ActiveModel {
            on_peak_rate: Set(on_peak_rate),
            off_peak_rate: Set(off_peak_rate),
            peak_schedule: Set(peak_schedule),
            updated_at: Set(now),
            ..Default::default()
        };
        row.insert(&txn).await?
    };

    txn.commit().await?;
    Ok(model)
}

/// Seeds the base configuration from `config.toml` on first run.
///
/// Returns `true` if a row was inserted, `false` if one already existed.
///
/// # Errors
/// Returns [`Error::InvalidRate`] for a negative configured rate, or a
/// database error.
pub async fn seed_base_config(db: &DatabaseConnection, config: &TariffConfig) -> Result<bool> {
    if load_base_config(db).await?.is_some() {
        return Ok(false);
    }

    submit_base_config(
        db,
        config.on_peak_rate,
        config.off_peak_rate,
        config.peak_schedule.clone(),
    )
    .await?;
    Ok(true)
}

/// Sets the current value of a rate field with immediate effect.
///
/// # Errors
/// Returns [`Error::Config`] when called for the schedule field,
/// [`Error::InvalidRate`] for a negative value, or a database error.
pub async fn set_current_rate(
    db: &DatabaseConnection,
    field: TariffField,
    value: f64,
) -> Result<Overrides> {
    if field == TariffField::PeakSchedule {
        return Err(Error::Config {
            message: format!("{} is not a rate field", field.key()),
        });
    }
    validate_rate(value)?;

    let txn = db.begin().await?;
    let mut overrides = load_overrides(&txn).await?;
    match field {
        TariffField::OnPeakRate => overrides.on_peak_rate = Some(value),
        TariffField::OffPeakRate => overrides.off_peak_rate = Some(value),
        TariffField::PeakSchedule => unreachable!("rejected above"),
    }
    save_overrides(&txn, &overrides).await?;
    txn.commit().await?;

    Ok(overrides)
}

/// Sets the current schedule identifier with immediate effect; `None`
/// removes the override so resolution falls back to the base configuration.
///
/// # Errors
/// Returns an error if the write fails.
pub async fn set_current_schedule(
    db: &DatabaseConnection,
    schedule: Option<String>,
) -> Result<Overrides> {
    let txn = db.begin().await?;
    let mut overrides = load_overrides(&txn).await?;
    overrides.peak_schedule = schedule;
    save_overrides(&txn, &overrides).await?;
    txn.commit().await?;

    Ok(overrides)
}

/// Stages new values for deferred activation on the given date.
///
/// # Errors
/// Returns [`Error::InvalidDate`] when the date is not a real ISO calendar
/// date, [`Error::InvalidRate`] for a negative staged rate, or a database
/// error.
pub async fn stage_transition(
    db: &DatabaseConnection,
    staged: StagedTransition,
) -> Result<Overrides> {
    let scheduled_date = normalize_scheduled_date(&staged.scheduled_date)?;
    if let Some(rate) = staged.future_on_peak_rate {
        validate_rate(rate)?;
    }
    if let Some(rate) = staged.future_off_peak_rate {
        validate_rate(rate)?;
    }

    let txn = db.begin().await?;
    let mut overrides = load_overrides(&txn).await?;
    overrides.future_on_peak_rate = staged.future_on_peak_rate;
    overrides.future_off_peak_rate = staged.future_off_peak_rate;
    overrides.future_peak_schedule = staged.future_peak_schedule;
    overrides.scheduled_date = Some(scheduled_date);
    save_overrides(&txn, &overrides).await?;
    txn.commit().await?;

    Ok(overrides)
}

/// Cancels a scheduled transition: the staging slots return to their
/// cleared sentinels (`0.0` for rates, `None` for the schedule) and the
/// scheduled date is removed. Current values are untouched.
///
/// # Errors
/// Returns an error if the write fails.
pub async fn clear_scheduled_transition(db: &DatabaseConnection) -> Result<Overrides> {
    let txn = db.begin().await?;
    let mut overrides = load_overrides(&txn).await?;
    overrides.future_on_peak_rate = Some(0.0);
    overrides.future_off_peak_rate = Some(0.0);
    overrides.future_peak_schedule = None;
    overrides.scheduled_date = None;
    save_overrides(&txn, &overrides).await?;
    txn.commit().await?;

    Ok(overrides)
}

/// Resolves the effective tariff from the persisted base + overlay rows.
///
/// # Errors
/// Returns an error if a query fails.
pub async fn load_effective_tariff(db: &DatabaseConnection) -> Result<EffectiveTariff> {
    let base = load_base_config(db).await?;
    let overrides = load_overrides(db).await?;
    Ok(resolver::resolve(base.as_ref(), &overrides))
}

/// Resolves a single tracked field, the surface display components read.
///
/// # Errors
/// Returns an error if a query fails.
pub async fn get_effective_value(db: &DatabaseConnection, field: TariffField) -> Result<FieldValue> {
    let base = load_base_config(db).await?;
    let overrides = load_overrides(db).await?;
    Ok(resolver::resolve_field(base.as_ref(), &overrides, field))
}
