//! The scheduled transition engine.
//!
//! Given an [`Overrides`] snapshot and today's date, [`evaluate`] decides
//! whether staged values have reached their effective date and, if so,
//! produces a new snapshot with the eligible values promoted to current and
//! the staging slots reset. The engine is a pure function: no I/O, no clock
//! access, and it never fails on valid input. Over-firing and late firing of
//! the daily trigger are both safe: once `scheduled_date` is cleared,
//! re-evaluation is a no-op, and the date comparison uses "on or after"
//! rather than "exactly on", so a missed day never permanently skips a
//! transition.

use crate::core::overrides::{Overrides, TariffField};
use chrono::NaiveDate;

/// Date format for `scheduled_date` comparisons. ISO calendar dates in this
/// format sort lexically in chronological order, which is what makes the
/// string comparison below correct; write-time validation keeps malformed
/// strings out of the store.
pub const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

/// The result of evaluating an overrides snapshot against today's date.
#[derive(Debug, Clone, PartialEq)]
pub struct TransitionOutcome {
    /// The overlay after evaluation; identical to the input unless `promoted`
    pub overrides: Overrides,
    /// Whether at least one staged field was promoted
    pub promoted: bool,
    /// The fields that were promoted, in evaluation order
    pub promoted_fields: Vec<TariffField>,
}

impl TransitionOutcome {
    fn unchanged(overrides: &Overrides) -> Self {
        Self {
            overrides: overrides.clone(),
            promoted: false,
            promoted_fields: Vec::new(),
        }
    }
}

/// A staged rate qualifies for promotion only when present and strictly
/// positive. Zero is the post-promotion reset sentinel and must never be
/// applied, or a completed transition would zero the rate on the next edit
/// of the schedule.
fn rate_eligible(pending: Option<f64>) -> bool {
    pending.is_some_and(|rate| rate > 0.0)
}

/// A staged schedule qualifies when present and non-empty.
fn schedule_eligible(pending: Option<&str>) -> bool {
    pending.is_some_and(|schedule| !schedule.is_empty())
}

/// Evaluates the overlay against `today` and promotes staged values that
/// have reached their effective date.
///
/// Fields are evaluated independently: a day can promote the rates while
/// leaving an ineligible schedule pending, or vice versa. After any
/// promotion event `scheduled_date` is cleared unconditionally, even when
/// some staged fields were ineligible and remain pending. When no staged
/// field is eligible the input is returned unchanged, `scheduled_date`
/// included, so the schedule keeps re-checking daily until a later edit
/// makes a field eligible or the user clears it.
#[must_use]
pub fn evaluate(overrides: &Overrides, today: NaiveDate) -> TransitionOutcome {
    // No schedule means nothing to do; this is the common case.
    let Some(scheduled_date) = overrides.scheduled_date.as_deref() else {
        return TransitionOutcome::unchanged(overrides);
    };

    let today_str = today.format(ISO_DATE_FORMAT).to_string();
    if today_str.as_str() < scheduled_date {
        return TransitionOutcome::unchanged(overrides);
    }

    let mut next = overrides.clone();
    let mut promoted_fields = Vec::new();

    if rate_eligible(next.future_on_peak_rate) {
        next.on_peak_rate = next.future_on_peak_rate;
        next.future_on_peak_rate = Some(0.0);
        promoted_fields.push(TariffField::OnPeakRate);
    }

    if rate_eligible(next.future_off_peak_rate) {
        next.off_peak_rate = next.future_off_peak_rate;
        next.future_off_peak_rate = Some(0.0);
        promoted_fields.push(TariffField::OffPeakRate);
    }

    if schedule_eligible(next.future_peak_schedule.as_deref()) {
        next.peak_schedule = next.future_peak_schedule.take();
        promoted_fields.push(TariffField::PeakSchedule);
    }

    if promoted_fields.is_empty() {
        // An ineligible-only schedule stays in place for tomorrow's check.
        return TransitionOutcome::unchanged(overrides);
    }

    next.scheduled_date = None;

    TransitionOutcome {
        overrides: next,
        promoted: true,
        promoted_fields,
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn staged_rates(scheduled_date: &str) -> Overrides {
        Overrides {
            on_peak_rate: Some(30.0),
            off_peak_rate: Some(15.0),
            future_on_peak_rate: Some(35.0),
            future_off_peak_rate: Some(17.5),
            scheduled_date: Some(scheduled_date.to_string()),
            ..Overrides::default()
        }
    }

    #[test]
    fn test_no_op_when_unscheduled() {
        let overrides = Overrides {
            on_peak_rate: Some(30.0),
            future_on_peak_rate: Some(35.0),
            ..Overrides::default()
        };

        let outcome = evaluate(&overrides, date(2025, 6, 1));
        assert!(!outcome.promoted);
        assert!(outcome.promoted_fields.is_empty());
        assert_eq!(outcome.overrides, overrides);
    }

    #[test]
    fn test_future_date_is_no_op() {
        let overrides = staged_rates("2025-06-01");

        let outcome = evaluate(&overrides, date(2025, 5, 31));
        assert!(!outcome.promoted);
        assert_eq!(outcome.overrides, overrides);
    }

    #[test]
    fn test_exact_and_late_promotion_are_identical() {
        // Catch-up semantics: a check on the scheduled day, the day after,
        // or a month late must all produce the same result.
        let overrides = staged_rates("2025-06-01");

        let on_time = evaluate(&overrides, date(2025, 6, 1));
        let next_day = evaluate(&overrides, date(2025, 6, 2));
        let a_month_late = evaluate(&overrides, date(2025, 7, 1));

        assert!(on_time.promoted);
        assert_eq!(on_time.overrides, next_day.overrides);
        assert_eq!(on_time.overrides, a_month_late.overrides);
        assert_eq!(on_time.promoted_fields, a_month_late.promoted_fields);
    }

    #[test]
    fn test_promotion_applies_rates_and_resets_pendings() {
        let outcome = evaluate(&staged_rates("2025-06-01"), date(2025, 6, 1));

        assert!(outcome.promoted);
        assert_eq!(
            outcome.promoted_fields,
            vec![TariffField::OnPeakRate, TariffField::OffPeakRate]
        );
        assert_eq!(outcome.overrides.on_peak_rate, Some(35.0));
        assert_eq!(outcome.overrides.off_peak_rate, Some(17.5));
        // Rate pendings reset to the 0.0 sentinel, not unset
        assert_eq!(outcome.overrides.future_on_peak_rate, Some(0.0));
        assert_eq!(outcome.overrides.future_off_peak_rate, Some(0.0));
        assert!(outcome.overrides.scheduled_date.is_none());
    }

    #[test]
    fn test_zero_pending_rate_is_never_promoted() {
        let overrides = Overrides {
            on_peak_rate: Some(30.0),
            future_on_peak_rate: Some(0.0),
            future_off_peak_rate: Some(17.5),
            scheduled_date: Some("2025-06-01".to_string()),
            ..Overrides::default()
        };

        let outcome = evaluate(&overrides, date(2025, 6, 1));
        assert!(outcome.promoted);
        assert_eq!(outcome.promoted_fields, vec![TariffField::OffPeakRate]);
        // The zero-staged on-peak rate stays exactly as it was
        assert_eq!(outcome.overrides.on_peak_rate, Some(30.0));
        assert_eq!(outcome.overrides.future_on_peak_rate, Some(0.0));
        assert_eq!(outcome.overrides.off_peak_rate, Some(17.5));
    }

    #[test]
    fn test_empty_schedule_name_is_never_promoted() {
        let overrides = Overrides {
            peak_schedule: Some("standard".to_string()),
            future_peak_schedule: Some(String::new()),
            scheduled_date: Some("2025-06-01".to_string()),
            ..Overrides::default()
        };

        let outcome = evaluate(&overrides, date(2025, 6, 1));
        assert!(!outcome.promoted);
        assert_eq!(outcome.overrides, overrides);
    }

    #[test]
    fn test_partial_eligibility_schedule_only() {
        let overrides = Overrides {
            future_peak_schedule: Some("winter-weekend".to_string()),
            scheduled_date: Some("2025-06-01".to_string()),
            ..Overrides::default()
        };

        let outcome = evaluate(&overrides, date(2025, 6, 1));
        assert!(outcome.promoted);
        assert_eq!(outcome.promoted_fields, vec![TariffField::PeakSchedule]);
        assert_eq!(
            outcome.overrides.peak_schedule.as_deref(),
            Some("winter-weekend")
        );
        // Schedule pending resets to None, rates untouched
        assert!(outcome.overrides.future_peak_schedule.is_none());
        assert!(outcome.overrides.on_peak_rate.is_none());
        assert!(outcome.overrides.off_peak_rate.is_none());
        assert!(outcome.overrides.scheduled_date.is_none());
    }

    #[test]
    fn test_ineligible_only_schedule_keeps_rechecking() {
        // Nothing eligible: the schedule date must survive so tomorrow's
        // check can try again after a user edit.
        let overrides = Overrides {
            future_on_peak_rate: Some(0.0),
            future_off_peak_rate: Some(0.0),
            scheduled_date: Some("2025-06-01".to_string()),
            ..Overrides::default()
        };

        let outcome = evaluate(&overrides, date(2025, 6, 15));
        assert!(!outcome.promoted);
        assert_eq!(outcome.overrides, overrides);
        assert_eq!(
            outcome.overrides.scheduled_date.as_deref(),
            Some("2025-06-01")
        );
    }

    #[test]
    fn test_date_cleared_even_when_some_fields_stay_pending() {
        // One eligible field clears the schedule for everything; the
        // ineligible zero-staged rate stays pending with no date left to
        // re-trigger it. Compatibility behavior, preserved deliberately.
        let overrides = Overrides {
            future_on_peak_rate: Some(0.0),
            future_peak_schedule: Some("shoulder".to_string()),
            scheduled_date: Some("2025-06-01".to_string()),
            ..Overrides::default()
        };

        let outcome = evaluate(&overrides, date(2025, 6, 1));
        assert!(outcome.promoted);
        assert!(outcome.overrides.scheduled_date.is_none());
        assert_eq!(outcome.overrides.future_on_peak_rate, Some(0.0));
    }

    #[test]
    fn test_idempotence_after_promotion() {
        let first = evaluate(&staged_rates("2025-06-01"), date(2025, 6, 1));
        assert!(first.promoted);

        let second = evaluate(&first.overrides, date(2025, 6, 1));
        assert!(!second.promoted);
        assert_eq!(second.overrides, first.overrides);

        // Still a no-op days later
        let third = evaluate(&first.overrides, date(2025, 6, 30));
        assert!(!third.promoted);
    }

    #[test]
    fn test_concrete_scenario_due_today() {
        let overrides = Overrides {
            on_peak_rate: Some(30.0),
            future_on_peak_rate: Some(35.0),
            future_off_peak_rate: Some(0.0),
            scheduled_date: Some("2025-06-01".to_string()),
            ..Overrides::default()
        };

        let outcome = evaluate(&overrides, date(2025, 6, 1));
        assert!(outcome.promoted);
        assert_eq!(
            outcome.overrides,
            Overrides {
                on_peak_rate: Some(35.0),
                future_on_peak_rate: Some(0.0),
                future_off_peak_rate: Some(0.0),
                scheduled_date: None,
                ..Overrides::default()
            }
        );
    }

    #[test]
    fn test_concrete_scenario_day_before() {
        let overrides = Overrides {
            on_peak_rate: Some(30.0),
            future_on_peak_rate: Some(35.0),
            future_off_peak_rate: Some(0.0),
            scheduled_date: Some("2025-06-01".to_string()),
            ..Overrides::default()
        };

        let outcome = evaluate(&overrides, date(2025, 5, 31));
        assert!(!outcome.promoted);
        assert_eq!(outcome.overrides, overrides);
    }
}
