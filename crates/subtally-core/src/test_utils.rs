//! Test fixtures shared across module tests

use chrono::{NaiveDate, Utc};

use crate::models::{Frequency, Subscription, SubscriptionStatus};

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

/// A plain active subscription with sensible defaults; tests override the
/// fields they care about.
pub fn subscription(id: i64, frequency: Frequency, amount: f64) -> Subscription {
    Subscription {
        id,
        name: format!("Service {}", id),
        category: "video_streaming".to_string(),
        amount,
        currency: "$".to_string(),
        frequency,
        start_date: date(2025, 1, 1),
        next_billing: date(2025, 2, 1),
        is_trial_period: false,
        trial_end_date: None,
        status: SubscriptionStatus::Active,
        reminder_enabled: true,
        payment_history: vec![],
        created_at: Utc::now(),
        updated_at: Utc::now(),
        amount_updated_at: None,
        next_billing_updated_at: None,
        reactivated_at: None,
    }
}
