//! Effective value resolution.
//!
//! The current value of any tracked field is computed by overlay-then-fallback:
//! the override if present, else the base configuration, else a field default
//! (`0.0` for rates, no schedule). Resolution is pure and never fails;
//! absence is handled by fallback, not by error.

use crate::core::overrides::{Overrides, TariffField};
use crate::entities::base_config;

/// Default rate applied when neither an override nor a base value exists.
pub const DEFAULT_RATE: f64 = 0.0;

/// A resolved value for a single tracked field.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// A rate in cents/kWh
    Rate(f64),
    /// A schedule identifier, or `None` when no schedule is configured
    Schedule(Option<String>),
}

/// The fully-resolved tariff as seen by display components.
#[derive(Debug, Clone, PartialEq)]
pub struct EffectiveTariff {
    /// Effective on-peak rate in cents/kWh
    pub on_peak_rate: f64,
    /// Effective off-peak rate in cents/kWh
    pub off_peak_rate: f64,
    /// Effective schedule identifier, if any
    pub peak_schedule: Option<String>,
}

/// Resolves all tracked fields into an [`EffectiveTariff`] snapshot.
#[must_use]
pub fn resolve(base: Option<&base_config::Model>, overrides: &Overrides) -> EffectiveTariff {
    EffectiveTariff {
        on_peak_rate: overrides
            .on_peak_rate
            .or(base.map(|b| b.on_peak_rate))
            .unwrap_or(DEFAULT_RATE),
        off_peak_rate: overrides
            .off_peak_rate
            .or(base.map(|b| b.off_peak_rate))
            .unwrap_or(DEFAULT_RATE),
        peak_schedule: overrides
            .peak_schedule
            .clone()
            .or_else(|| base.and_then(|b| b.peak_schedule.clone())),
    }
}

/// Resolves a single tracked field.
#[must_use]
pub fn resolve_field(
    base: Option<&base_config::Model>,
    overrides: &Overrides,
    field: TariffField,
) -> FieldValue {
    let effective = resolve(base, overrides);
    match field {
        TariffField::OnPeakRate => FieldValue::Rate(effective.on_peak_rate),
        TariffField::OffPeakRate => FieldValue::Rate(effective.off_peak_rate),
        TariffField::PeakSchedule => FieldValue::Schedule(effective.peak_schedule),
    }
}
