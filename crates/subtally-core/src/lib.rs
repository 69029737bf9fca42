//! subtally Core Library
//!
//! Recurring-billing and alert engine for the subtally subscription
//! tracker:
//! - Recurrence calculation (next billing date after a reference date)
//! - Cost normalization across billing frequencies
//! - Upcoming-action alert generation with precedence and urgency tiers
//! - Cancellation/reactivation lifecycle rules
//! - Date-humanization helpers for countdown display
//! - In-memory subscription store applying engine outputs
//!
//! Everything is synchronous and pure: callers capture "today" once per
//! evaluation pass and thread it through; the engine never reads the clock
//! or ambient settings.

pub mod alerts;
pub mod cost;
pub mod error;
pub mod humanize;
pub mod lifecycle;
pub mod models;
pub mod recurrence;
pub mod store;

#[cfg(test)]
pub(crate) mod test_utils;

pub use alerts::generate_alerts;
pub use cost::{annual_equivalent, annual_total, monthly_equivalent, monthly_total};
pub use error::{Error, Result};
pub use humanize::{days_remaining, format_days_remaining};
pub use lifecycle::{reactivate, Reactivation};
pub use models::{
    AdvanceWindow, Alert, AlertType, Frequency, NewSubscription, NotificationPolicy,
    PaymentRecord, PaymentStatus, Subscription, SubscriptionStatus, Urgency,
};
pub use recurrence::{advance_one_period, next_occurrence_on_or_after};
pub use store::SubscriptionStore;
