//! Reload notification for downstream readers.
//!
//! After a committed save changes what the resolver would return, the new
//! effective tariff is broadcast on a watch channel so display components
//! can refresh without polling the store. Notification happens strictly
//! after persistence; a failed save never produces a notification.

use crate::core::resolver::EffectiveTariff;
use tokio::sync::watch;

/// Owner of the effective-tariff broadcast channel.
#[derive(Debug)]
pub struct ReloadNotifier {
    tx: watch::Sender<EffectiveTariff>,
}

impl ReloadNotifier {
    /// Creates a notifier seeded with the effective tariff at startup.
    #[must_use]
    pub fn new(initial: EffectiveTariff) -> Self {
        let (tx, _rx) = watch::channel(initial);
        Self { tx }
    }

    /// Returns a receiver that always holds the latest effective tariff.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<EffectiveTariff> {
        self.tx.subscribe()
    }

    /// Publishes a new effective tariff to all subscribers.
    pub fn notify(&self, effective: EffectiveTariff) {
        self.tx.send_replace(effective);
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;

    fn effective(on_peak: f64) -> EffectiveTariff {
        EffectiveTariff {
            on_peak_rate: on_peak,
            off_peak_rate: 15.0,
            peak_schedule: None,
        }
    }

    #[tokio::test]
    async fn test_subscriber_sees_initial_value() {
        let notifier = ReloadNotifier::new(effective(30.0));
        let rx = notifier.subscribe();
        assert_eq!(rx.borrow().on_peak_rate, 30.0);
    }

    #[tokio::test]
    async fn test_notify_wakes_subscribers() {
        let notifier = ReloadNotifier::new(effective(30.0));
        let mut rx = notifier.subscribe();

        notifier.notify(effective(35.0));
        rx.changed().await.unwrap();
        assert_eq!(rx.borrow().on_peak_rate, 35.0);
    }

    #[tokio::test]
    async fn test_notify_without_subscribers_is_harmless() {
        let notifier = ReloadNotifier::new(effective(30.0));
        notifier.notify(effective(35.0));

        // A late subscriber still observes the latest value
        let rx = notifier.subscribe();
        assert_eq!(rx.borrow().on_peak_rate, 35.0);
    }
}
