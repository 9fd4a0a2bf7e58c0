// SPDX-FileCopyrightText: 2026 Briefpilot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Date-derived task attributes: due dates, priority, display month.
//!
//! Everything here takes an explicit reference date so batch runs are
//! deterministic under test. Send dates arrive as strict `YYYY-MM-DD`
//! strings; anything that does not parse degrades to the low-urgency
//! defaults rather than failing the task.

use chrono::{Datelike, Duration, NaiveDate, Weekday};

pub const PRIORITY_HIGH: &str = "High";
pub const PRIORITY_LOW: &str = "Low";

/// How many calendar days out a send date still counts as urgent,
/// inclusive of the reference date itself.
const PRIORITY_WINDOW_DAYS: i64 = 7;

/// The date `days` business days after `start`, skipping Saturdays and
/// Sundays. `days = 0` returns `start` unchanged.
pub fn business_days_from(start: NaiveDate, days: u32) -> NaiveDate {
    let mut current = start;
    let mut added = 0;
    while added < days {
        current += Duration::days(1);
        if !matches!(current.weekday(), Weekday::Sat | Weekday::Sun) {
            added += 1;
        }
    }
    current
}

/// Task priority from its send date: high when the send lands within the
/// next seven days (today included), low otherwise. Absent or malformed
/// dates are low.
pub fn calculate_priority(send_date: Option<&str>, today: NaiveDate) -> &'static str {
    let Some(date) = send_date.and_then(parse_date) else {
        return PRIORITY_LOW;
    };
    let days_until = (date - today).num_days();
    if (0..=PRIORITY_WINDOW_DAYS).contains(&days_until) {
        PRIORITY_HIGH
    } else {
        PRIORITY_LOW
    }
}

/// The full month name of a send date ("December"), or `None` when the
/// date is absent or malformed.
pub fn month_name(send_date: Option<&str>) -> Option<String> {
    send_date
        .and_then(parse_date)
        .map(|d| d.format("%B").to_string())
}

fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
}
