//! Recurrence calculation
//!
//! A subscription's billing dates form the sequence
//! {anchor, anchor + step, anchor + 2·step, ...} where the step is the
//! billing frequency. Weekly and biweekly steps are fixed day counts;
//! monthly and yearly steps are calendar steps, clamped to the last valid
//! day of the target month (Jan 31 + 1 month = Feb 28, or Feb 29 in leap
//! years).
//!
//! All dates are timezone-naive calendar days; callers must truncate any
//! time component before passing a reference date.

use chrono::{Days, Months, NaiveDate};

use crate::error::{Error, Result};
use crate::models::Frequency;

/// Advance a date by exactly one billing period
pub fn advance_one_period(date: NaiveDate, frequency: Frequency) -> Result<NaiveDate> {
    let advanced = match frequency {
        Frequency::Weekly => date.checked_add_days(Days::new(7)),
        Frequency::Biweekly => date.checked_add_days(Days::new(14)),
        Frequency::Monthly => date.checked_add_months(Months::new(1)),
        Frequency::Yearly => date.checked_add_months(Months::new(12)),
    };

    advanced.ok_or_else(|| {
        Error::DateOutOfRange(format!("{} + 1 {} period overflows", date, frequency))
    })
}

/// Compute the first occurrence of the billing sequence strictly after
/// `reference`
///
/// If the anchor is already past the reference it is returned unchanged (no
/// step taken). Terminates because every step strictly advances the date.
pub fn next_occurrence_on_or_after(
    anchor: NaiveDate,
    frequency: Frequency,
    reference: NaiveDate,
) -> Result<NaiveDate> {
    let mut next = anchor;
    while next <= reference {
        next = advance_one_period(next, frequency)?;
    }
    Ok(next)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_monthly_next_occurrence() {
        let next =
            next_occurrence_on_or_after(d(2025, 1, 15), Frequency::Monthly, d(2025, 1, 20))
                .unwrap();
        assert_eq!(next, d(2025, 2, 15));
    }

    #[test]
    fn test_future_anchor_returned_unchanged() {
        let anchor = d(2025, 6, 1);
        let next =
            next_occurrence_on_or_after(anchor, Frequency::Weekly, d(2025, 5, 1)).unwrap();
        assert_eq!(next, anchor);
    }

    #[test]
    fn test_anchor_equal_to_reference_steps_once() {
        // "Strictly after": an occurrence falling on the reference day is due,
        // not upcoming
        let next =
            next_occurrence_on_or_after(d(2025, 3, 10), Frequency::Weekly, d(2025, 3, 10))
                .unwrap();
        assert_eq!(next, d(2025, 3, 17));
    }

    #[test]
    fn test_scan_skips_multiple_periods() {
        let next =
            next_occurrence_on_or_after(d(2024, 1, 1), Frequency::Biweekly, d(2024, 3, 1))
                .unwrap();
        // 2024-01-01 + 5 * 14 days = 2024-03-11
        assert_eq!(next, d(2024, 3, 11));
        assert_eq!((next - d(2024, 1, 1)).num_days() % 14, 0);
    }

    #[test]
    fn test_month_end_clamps() {
        assert_eq!(
            advance_one_period(d(2025, 1, 31), Frequency::Monthly).unwrap(),
            d(2025, 2, 28)
        );
        assert_eq!(
            advance_one_period(d(2024, 1, 31), Frequency::Monthly).unwrap(),
            d(2024, 2, 29)
        );
        assert_eq!(
            advance_one_period(d(2025, 3, 31), Frequency::Monthly).unwrap(),
            d(2025, 4, 30)
        );
    }

    #[test]
    fn test_leap_day_yearly_clamps() {
        assert_eq!(
            advance_one_period(d(2024, 2, 29), Frequency::Yearly).unwrap(),
            d(2025, 2, 28)
        );
    }

    #[test]
    fn test_result_is_on_sequence_for_fixed_steps() {
        let anchor = d(2025, 1, 3);
        for reference in (0..120).map(|n| anchor + Days::new(n)) {
            let next = next_occurrence_on_or_after(anchor, Frequency::Weekly, reference).unwrap();
            assert!(next > reference);
            assert_eq!((next - anchor).num_days() % 7, 0);
        }
    }

    #[test]
    fn test_overflow_is_an_error() {
        let err = advance_one_period(NaiveDate::MAX, Frequency::Yearly).unwrap_err();
        assert!(matches!(err, Error::DateOutOfRange(_)));
    }
}
