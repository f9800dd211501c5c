//! Helpers for records carrying a `[start, end]` validity window.

use std::cmp::Ordering;

use chrono::{Local, NaiveDateTime};

use crate::ordering::{compare_ord, Direction, NullHandling};

/// Returns `true` if `now` lies outside the inclusive window `[start, end]`.
pub fn is_expired_at(start: NaiveDateTime, end: NaiveDateTime, now: NaiveDateTime) -> bool {
    now < start || now > end
}

/// [`is_expired_at`] evaluated against the local wall clock.
pub fn is_expired(start: NaiveDateTime, end: NaiveDateTime) -> bool {
    is_expired_at(start, end, local_now())
}

/// Orders two windows: expired ones first (for ascending order), then by
/// end date.
///
/// Arguments are `(start1, start2, end1, end2)`, i.e. both starts before
/// both ends.
///
/// # Example
///
/// ```
/// use std::cmp::Ordering;
/// use chrono::NaiveDate;
/// use pagewise::{compare_expired_at, Direction, NullHandling};
///
/// let day = |d| NaiveDate::from_ymd_opt(2024, 1, d).unwrap().and_hms_opt(0, 0, 0).unwrap();
/// let now = day(10);
///
/// // The first window ended before `now`, the second is still running
/// let ordering = compare_expired_at(
///     day(1),
///     day(1),
///     day(5),
///     day(20),
///     Direction::Asc,
///     NullHandling::NullsLast,
///     now,
/// );
/// assert_eq!(ordering, Ordering::Less);
/// ```
#[allow(clippy::too_many_arguments)]
pub fn compare_expired_at(
    start1: NaiveDateTime,
    start2: NaiveDateTime,
    end1: NaiveDateTime,
    end2: NaiveDateTime,
    direction: Direction,
    null_handling: NullHandling,
    now: NaiveDateTime,
) -> Ordering {
    let expired1 = is_expired_at(start1, end1, now);
    let expired2 = is_expired_at(start2, end2, now);
    match (expired1, expired2) {
        (true, false) => direction.apply(Ordering::Less),
        (false, true) => direction.apply(Ordering::Greater),
        _ => compare_ord(Some(&end1), Some(&end2), direction, null_handling),
    }
}

/// [`compare_expired_at`] evaluated against the local wall clock.
pub fn compare_expired(
    start1: NaiveDateTime,
    start2: NaiveDateTime,
    end1: NaiveDateTime,
    end2: NaiveDateTime,
    direction: Direction,
    null_handling: NullHandling,
) -> Ordering {
    compare_expired_at(start1, start2, end1, end2, direction, null_handling, local_now())
}

/// Filter predicate on a validity window.
///
/// - `None`: no window filter requested, never matches.
/// - `Some(true)`: matches windows containing `now` (bounds included).
/// - `Some(false)`: matches windows not containing `now`.
pub fn filter_expired_at(
    expired: Option<bool>,
    start: NaiveDateTime,
    end: NaiveDateTime,
    now: NaiveDateTime,
) -> bool {
    match expired {
        None => false,
        Some(true) => !is_expired_at(start, end, now),
        Some(false) => is_expired_at(start, end, now),
    }
}

/// [`filter_expired_at`] evaluated against the local wall clock.
pub fn filter_expired(expired: Option<bool>, start: NaiveDateTime, end: NaiveDateTime) -> bool {
    filter_expired_at(expired, start, end, local_now())
}

fn local_now() -> NaiveDateTime {
    Local::now().naive_local()
}
