//! Alert generation
//!
//! Scans the subscription collection against the notification policy and
//! emits upcoming-action alerts:
//! - `trial_ending`: a trial period ends inside the advance window
//! - `renewal`: an active subscription bills inside the advance window
//! - `expiring`: a cancelled subscription lapses inside the advance window
//!
//! Per subscription, trial_ending takes precedence over renewal — never
//! both in one evaluation. The expiring check is independent and applies
//! only to cancelled records. Output is sorted ascending by days remaining;
//! ties preserve input order so the UI diffs deterministically.
//!
//! Pure and safe to invoke on every state change: `today` is captured once
//! by the caller and threaded through the whole pass.

use chrono::NaiveDate;
use tracing::warn;

use crate::models::{Alert, AlertType, NotificationPolicy, Subscription, SubscriptionStatus, Urgency};

/// Classify imminence into an urgency tier
fn urgency(days_remaining: i64) -> Urgency {
    if days_remaining <= 1 {
        Urgency::High
    } else if days_remaining <= 3 {
        Urgency::Medium
    } else {
        Urgency::Low
    }
}

/// Whole calendar days from `today` until `target`
///
/// Both sides are date-only, so this is the ceiling the original computed
/// from millisecond timestamps, without the midnight/DST hazards.
fn days_until(target: NaiveDate, today: NaiveDate) -> i64 {
    (target - today).num_days()
}

/// Generate the full alert set for one evaluation pass
///
/// A malformed record (a trial subscription missing its trial end date) is
/// skipped for the affected check only; it never aborts the batch.
pub fn generate_alerts(
    subscriptions: &[Subscription],
    policy: &NotificationPolicy,
    today: NaiveDate,
) -> Vec<Alert> {
    let advance_days = policy.advance_days.days();
    let mut alerts = Vec::new();

    for sub in subscriptions {
        let mut trial_alert_created = false;

        // Trial check first; suppresses the renewal check for this record
        if sub.status != SubscriptionStatus::Cancelled && policy.trial_ending && sub.is_trial_period
        {
            match sub.trial_end_date {
                Some(trial_end) => {
                    let days_until_trial_end = days_until(trial_end, today);
                    if (0..=advance_days).contains(&days_until_trial_end) {
                        alerts.push(Alert {
                            id: format!("trial-{}", sub.id),
                            subscription_id: sub.id,
                            subscription_name: sub.name.clone(),
                            alert_type: AlertType::TrialEnding,
                            days_remaining: days_until_trial_end,
                            amount: sub.amount,
                            currency: sub.currency.clone(),
                            urgency: urgency(days_until_trial_end),
                            // What the first real charge will land on
                            next_billing_date: Some(sub.next_billing),
                        });
                        trial_alert_created = true;
                    }
                }
                None => {
                    // Upstream validation should prevent this; skip the
                    // trial check rather than fail the whole evaluation
                    warn!(
                        subscription_id = sub.id,
                        name = %sub.name,
                        "trial subscription has no trial end date, skipping trial check"
                    );
                }
            }
        }

        // Renewal check for active/trial subscriptions not already covered
        // by a trial alert
        if !trial_alert_created
            && (sub.status == SubscriptionStatus::Active || sub.status == SubscriptionStatus::Trial)
            && policy.upcoming_payments
            && sub.reminder_enabled
        {
            let days_until_billing = days_until(sub.next_billing, today);
            if (0..=advance_days).contains(&days_until_billing) {
                alerts.push(Alert {
                    id: format!("billing-{}", sub.id),
                    subscription_id: sub.id,
                    subscription_name: sub.name.clone(),
                    alert_type: AlertType::Renewal,
                    days_remaining: days_until_billing,
                    amount: sub.amount,
                    currency: sub.currency.clone(),
                    urgency: urgency(days_until_billing),
                    next_billing_date: None,
                });
            }
        }

        // Expiration check for cancelled subscriptions still inside their
        // paid-up period
        if policy.subscription_expiring && sub.status == SubscriptionStatus::Cancelled {
            let days_until_expiration = days_until(sub.next_billing, today);
            if (0..=advance_days).contains(&days_until_expiration) {
                alerts.push(Alert {
                    id: format!("expiring-{}", sub.id),
                    subscription_id: sub.id,
                    subscription_name: sub.name.clone(),
                    alert_type: AlertType::Expiring,
                    days_remaining: days_until_expiration,
                    // Nothing will be charged; the subscription lapses
                    amount: 0.0,
                    currency: sub.currency.clone(),
                    urgency: urgency(days_until_expiration),
                    next_billing_date: None,
                });
            }
        }
    }

    // Stable: ties keep input order
    alerts.sort_by_key(|a| a.days_remaining);
    alerts
}
