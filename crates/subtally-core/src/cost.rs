//! Cost normalization
//!
//! Converts periodic amounts into monthly equivalents so subscriptions with
//! different billing frequencies can be ranked and aggregated. The weekly
//! and biweekly factors are statistical averages (52/12 and 26/12 rounded);
//! these figures are for comparison only and are never fed back into
//! billing-due-date math.

use crate::models::{Frequency, Subscription, SubscriptionStatus};

/// Average weeks per month
pub const WEEKS_PER_MONTH: f64 = 4.33;
/// Average biweekly periods per month (26/12)
pub const BIWEEKS_PER_MONTH: f64 = 2.17;

/// Convert a periodic amount into its monthly equivalent
pub fn monthly_equivalent(amount: f64, frequency: Frequency) -> f64 {
    match frequency {
        Frequency::Weekly => amount * WEEKS_PER_MONTH,
        Frequency::Biweekly => amount * BIWEEKS_PER_MONTH,
        Frequency::Monthly => amount,
        Frequency::Yearly => amount / 12.0,
    }
}

/// Convert a periodic amount into its annual equivalent
pub fn annual_equivalent(amount: f64, frequency: Frequency) -> f64 {
    monthly_equivalent(amount, frequency) * 12.0
}

/// Total monthly-equivalent spend across non-cancelled subscriptions
pub fn monthly_total(subscriptions: &[Subscription]) -> f64 {
    subscriptions
        .iter()
        .filter(|sub| sub.status != SubscriptionStatus::Cancelled)
        .map(|sub| monthly_equivalent(sub.amount, sub.frequency))
        .sum()
}

/// Total annual-equivalent spend across non-cancelled subscriptions
pub fn annual_total(subscriptions: &[Subscription]) -> f64 {
    monthly_total(subscriptions) * 12.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_monthly_is_identity() {
        assert_eq!(monthly_equivalent(9.99, Frequency::Monthly), 9.99);
    }

    #[test]
    fn test_yearly_round_trips() {
        // Yearly must round-trip exactly: /12 then *12 restores the amount
        let amount = 12.0;
        assert_eq!(monthly_equivalent(amount, Frequency::Yearly), 1.0);
        assert_eq!(annual_equivalent(amount, Frequency::Yearly), amount);
    }

    #[test]
    fn test_weekly_uses_average_weeks() {
        assert!((monthly_equivalent(10.0, Frequency::Weekly) - 43.3).abs() < 1e-9);
        assert!((monthly_equivalent(10.0, Frequency::Biweekly) - 21.7).abs() < 1e-9);
    }

    #[test]
    fn test_monthly_total_skips_cancelled() {
        let mut streaming = crate::test_utils::subscription(1, Frequency::Monthly, 10.0);
        let mut news = crate::test_utils::subscription(2, Frequency::Yearly, 120.0);
        let mut gym = crate::test_utils::subscription(3, Frequency::Monthly, 30.0);
        streaming.status = SubscriptionStatus::Active;
        news.status = SubscriptionStatus::Trial;
        gym.status = SubscriptionStatus::Cancelled;

        let subs = vec![streaming, news, gym];
        // 10 + 120/12, cancelled gym excluded
        assert!((monthly_total(&subs) - 20.0).abs() < 1e-9);
        assert!((annual_total(&subs) - 240.0).abs() < 1e-9);
    }
}
