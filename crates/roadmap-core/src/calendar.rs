//! Date and calendar helpers shared by the recommender and the generator.
//!
//! "Business days" are always Monday to Friday, independent of any engineer's
//! working-day mask. Per-engineer availability goes through
//! [`is_working_day`] and [`is_unavailable`] instead.

use chrono::{Datelike, Duration, NaiveDate, Weekday};

use crate::model::{Engineer, ScheduledBlock};

/// Iterate every calendar day in `[start, end]`. Empty when `end < start`.
pub fn days_inclusive(start: NaiveDate, end: NaiveDate) -> impl Iterator<Item = NaiveDate> {
    start.iter_days().take_while(move |day| *day <= end)
}

pub fn is_business_day(date: NaiveDate) -> bool {
    !matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Number of Monday-to-Friday days in `[start, end]`
pub fn business_days_between(start: NaiveDate, end: NaiveDate) -> u32 {
    days_inclusive(start, end)
        .filter(|day| is_business_day(*day))
        .count() as u32
}

/// Business days shared by `[a_start, a_end]` and `[b_start, b_end]`
pub fn business_day_overlap(
    a_start: NaiveDate,
    a_end: NaiveDate,
    b_start: NaiveDate,
    b_end: NaiveDate,
) -> u32 {
    let start = a_start.max(b_start);
    let end = a_end.min(b_end);
    if end < start {
        return 0;
    }
    business_days_between(start, end)
}

/// Monday of the week containing `date`
pub fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(date.weekday().num_days_from_monday() as i64)
}

/// Sunday closing the Monday-start week containing `date`
pub fn week_end(date: NaiveDate) -> NaiveDate {
    week_start(date) + Duration::days(6)
}

/// Weekday index with 0 = Sunday, the convention of `Engineer::working_days`
pub fn weekday_index(date: NaiveDate) -> u8 {
    date.weekday().num_days_from_sunday() as u8
}

pub fn is_working_day(engineer: &Engineer, date: NaiveDate) -> bool {
    engineer.working_days.contains(&weekday_index(date))
}

pub fn is_unavailable(engineer: &Engineer, date: NaiveDate) -> bool {
    engineer.unavailability.iter().any(|block| block.covers(date))
}

/// Day counts toward capacity: working day and not blocked out
pub fn has_capacity_on(engineer: &Engineer, date: NaiveDate) -> bool {
    is_working_day(engineer, date) && !is_unavailable(engineer, date)
}

/// Hours of `block` falling inside `[window_start, window_end]`.
///
/// The block's hours are spread evenly over its business days; a block with no
/// business days is treated as a single-day block.
pub fn committed_hours_in(
    block: &ScheduledBlock,
    window_start: NaiveDate,
    window_end: NaiveDate,
) -> f64 {
    let overlap = business_day_overlap(block.start_date, block.end_date, window_start, window_end);
    if overlap == 0 {
        return 0.0;
    }
    let block_days = business_days_between(block.start_date, block.end_date).max(1);
    overlap as f64 * (block.hours_allocated / block_days as f64)
}
