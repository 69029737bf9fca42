//! Date humanization helpers
//!
//! Renders a countdown to a target date the way the dashboard displays it:
//! "Today", "Tomorrow", day counts inside a week, then the largest whole
//! calendar unit (weeks, months, years) counted with real calendar steps so
//! "1 month" means the same calendar month the billing math uses.

use chrono::{Days, Months, NaiveDate};

/// Whole calendar days from `today` until `target` (negative when overdue)
pub fn days_remaining(target: NaiveDate, today: NaiveDate) -> i64 {
    (target - today).num_days()
}

fn count_days(days: i64) -> String {
    if days == 1 {
        "1 day".to_string()
    } else {
        format!("{} days", days)
    }
}

/// Human-friendly rendering of the time until `target`
///
/// Overdue targets render the absolute day count; the caller decides how to
/// flag the overdue state.
pub fn format_days_remaining(target: NaiveDate, today: NaiveDate) -> String {
    let diff_days = days_remaining(target, today);

    if diff_days < 0 {
        return count_days(diff_days.abs());
    }
    match diff_days {
        0 => return "Today".to_string(),
        1 => return "Tomorrow".to_string(),
        2..=6 => return count_days(diff_days),
        _ => {}
    }

    // Count the largest whole calendar units that fit
    let mut current = today;

    let mut years = 0;
    while let Some(next) = current.checked_add_months(Months::new(12)) {
        if next > target {
            break;
        }
        years += 1;
        current = next;
    }

    let mut months = 0;
    while let Some(next) = current.checked_add_months(Months::new(1)) {
        if next > target {
            break;
        }
        months += 1;
        current = next;
    }

    let mut weeks = 0;
    while let Some(next) = current.checked_add_days(Days::new(7)) {
        if next > target {
            break;
        }
        weeks += 1;
        current = next;
    }

    let remaining_days = (target - current).num_days();

    if years > 0 {
        return if years == 1 {
            "1 year".to_string()
        } else {
            format!("{} years", years)
        };
    }
    if months > 0 {
        return if months == 1 {
            "1 month".to_string()
        } else {
            format!("{} months", months)
        };
    }
    if weeks > 0 {
        return if weeks == 1 {
            "1 week".to_string()
        } else {
            format!("{} weeks", weeks)
        };
    }
    if remaining_days > 0 {
        return count_days(remaining_days);
    }

    count_days(diff_days)
}
