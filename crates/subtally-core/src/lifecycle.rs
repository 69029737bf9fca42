//! Subscription lifecycle rules
//!
//! Cancellation is soft and reversible: the status flips to cancelled and
//! every date is left alone, so the record keeps counting down to the end
//! of its paid-up period. Reactivation reverses it; whether the billing
//! anchor moves depends on whether that period already lapsed.

use chrono::NaiveDate;
use tracing::debug;

use crate::error::Result;
use crate::models::{Subscription, SubscriptionStatus};
use crate::recurrence;

/// Outcome of reactivating a cancelled subscription
///
/// The resolver is pure; the store applies these fields to the record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reactivation {
    pub status: SubscriptionStatus,
    pub start_date: NaiveDate,
    pub next_billing: NaiveDate,
}

/// Decide the new anchor dates when reactivating a cancelled subscription
///
/// Not expired (next billing today or later): the paid-up period still
/// covers us, so only the status changes. Expired: the billing cycle
/// restarts today, and the next billing is exactly one frequency step out —
/// a direct single step, not a recurrence scan.
pub fn reactivate(subscription: &Subscription, today: NaiveDate) -> Result<Reactivation> {
    let is_expired = subscription.next_billing < today;

    if !is_expired {
        return Ok(Reactivation {
            status: SubscriptionStatus::Active,
            start_date: subscription.start_date,
            next_billing: subscription.next_billing,
        });
    }

    let next_billing = recurrence::advance_one_period(today, subscription.frequency)?;
    debug!(
        subscription_id = subscription.id,
        %next_billing,
        "reactivating expired subscription with a fresh cycle"
    );

    Ok(Reactivation {
        status: SubscriptionStatus::Active,
        start_date: today,
        next_billing,
    })
}
