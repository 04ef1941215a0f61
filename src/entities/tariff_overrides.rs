//! Tariff overrides entity - the mutable current + pending overlay.
//!
//! Holds exactly one row. Column names are the wire contract other
//! components key on: `on_peak_rate`/`off_peak_rate`/`peak_schedule` are the
//! current overrides (NULL means "fall back to the base configuration"),
//! the `future_*` columns are the staged values, and `scheduled_date` is the
//! ISO calendar date on which the staged values take effect (NULL means no
//! transition is scheduled).

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Tariff overrides database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "tariff_overrides")]
pub struct Model {
    /// Unique identifier (single-row table)
    #[sea_orm(primary_key)]
    pub id: i32,
    /// Current on-peak rate override in cents/kWh
    pub on_peak_rate: Option<f64>,
    /// Current off-peak rate override in cents/kWh
    pub off_peak_rate: Option<f64>,
    /// Current schedule identifier override
    pub peak_schedule: Option<String>,
    /// Staged on-peak rate; reset to `0.0` after promotion
    pub future_on_peak_rate: Option<f64>,
    /// Staged off-peak rate; reset to `0.0` after promotion
    pub future_off_peak_rate: Option<f64>,
    /// Staged schedule identifier; reset to NULL after promotion
    pub future_peak_schedule: Option<String>,
    /// Effective date for the staged values, ISO `YYYY-MM-DD`
    pub scheduled_date: Option<String>,
    /// When this row was last written
    pub updated_at: DateTime,
}

/// `TariffOverrides` has no relationships with other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
