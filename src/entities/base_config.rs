//! Base configuration entity - the last explicitly-submitted tariff values.
//!
//! Holds exactly one row. Current values are resolved by overlaying the
//! `tariff_overrides` row on top of this record; absent overrides fall back
//! here, and absent base values fall back to field defaults.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Base tariff configuration database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "base_config")]
pub struct Model {
    /// Unique identifier (single-row table)
    #[sea_orm(primary_key)]
    pub id: i32,
    /// Submitted on-peak rate in cents/kWh
    pub on_peak_rate: f64,
    /// Submitted off-peak rate in cents/kWh
    pub off_peak_rate: f64,
    /// Submitted time-of-use schedule identifier, if any
    pub peak_schedule: Option<String>,
    /// When this configuration was last submitted
    pub updated_at: DateTime,
}

/// `BaseConfig` has no relationships with other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
