use chrono::{Months, NaiveDateTime, Utc};

/// Current UTC wall-clock time, the timestamp stored on every ledger row.
pub fn now_naive() -> NaiveDateTime {
    Utc::now().naive_utc()
}

/// Shifts `start` forward by `months` calendar months.
///
/// Days past the end of the target month are clamped to its last day
/// (Jan 31 + 1 month = Feb 28/29). Saturates at the start value if the
/// result would overflow the calendar.
pub fn add_months(start: NaiveDateTime, months: u32) -> NaiveDateTime {
    start
        .checked_add_months(Months::new(months))
        .unwrap_or(start)
}

/// Due dates for `count` monthly installments, the first one month after `start`.
pub fn monthly_due_dates(start: NaiveDateTime, count: u32) -> Vec<NaiveDateTime> {
    (1..=count).map(|i| add_months(start, i)).collect()
}
