//! The configuration overlay data model.
//!
//! `Overrides` mirrors the single `tariff_overrides` row: per-field current
//! overrides, per-field staged values, and the date the staged values take
//! effect. It is a plain data holder; resolution lives in
//! [`crate::core::resolver`] and promotion in [`crate::core::transition`].

use crate::entities::tariff_overrides;

/// One of the tracked tariff configuration fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TariffField {
    /// On-peak rate in cents/kWh
    OnPeakRate,
    /// Off-peak rate in cents/kWh
    OffPeakRate,
    /// Time-of-use schedule identifier
    PeakSchedule,
}

impl TariffField {
    /// The persisted column name for the current value of this field.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::OnPeakRate => "on_peak_rate",
            Self::OffPeakRate => "off_peak_rate",
            Self::PeakSchedule => "peak_schedule",
        }
    }
}

/// The mutable configuration overlay: current overrides plus staged values.
///
/// `None` in a current slot means "fall back to the base configuration";
/// `None` in a `future_*` slot means "nothing staged for this field". Note
/// the asymmetric reset sentinels: a promoted rate pending is cleared to
/// `Some(0.0)`, a promoted schedule pending to `None`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Overrides {
    /// Current on-peak rate override
    pub on_peak_rate: Option<f64>,
    /// Current off-peak rate override
    pub off_peak_rate: Option<f64>,
    /// Current schedule identifier override
    pub peak_schedule: Option<String>,
    /// Staged on-peak rate
    pub future_on_peak_rate: Option<f64>,
    /// Staged off-peak rate
    pub future_off_peak_rate: Option<f64>,
    /// Staged schedule identifier
    pub future_peak_schedule: Option<String>,
    /// ISO `YYYY-MM-DD` date on which staged values take effect
    pub scheduled_date: Option<String>,
}

impl Overrides {
    /// True when a transition is scheduled, whether or not any staged field
    /// would currently be eligible for promotion.
    #[must_use]
    pub const fn has_scheduled_transition(&self) -> bool {
        self.scheduled_date.is_some()
    }
}

impl From<tariff_overrides::Model> for Overrides {
    fn from(model: tariff_overrides::Model) -> Self {
        Self {
            on_peak_rate: model.on_peak_rate,
            off_peak_rate: model.off_peak_rate,
            peak_schedule: model.peak_schedule,
            future_on_peak_rate: model.future_on_peak_rate,
            future_off_peak_rate: model.future_off_peak_rate,
            future_peak_schedule: model.future_peak_schedule,
            scheduled_date: model.scheduled_date,
        }
    }
}
