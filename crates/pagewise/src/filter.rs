//! Structural filter matching.
//!
//! A filter is any [`Inspect`] value. Each non-null property it exposes is a
//! constraint on the same-named property of the candidate, checked with a
//! [`Constraint`] chosen from the two declared kinds.

use std::collections::HashSet;

use chrono::{Datelike, NaiveDateTime};
use tracing::debug;

use crate::resolve::resolve;
use crate::traits::{lineage, Inspect};
use crate::value::{Kind, Value};

/// How a single filter property constrains its candidate peer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Constraint {
    /// Case-insensitive substring match of strings.
    Contains,
    /// Same calendar day, time of day ignored.
    SameDay,
    /// Deep equality of the two values.
    DeepEquality,
}

impl Constraint {
    /// Selects the constraint for a filter property of `filter` kind against
    /// a candidate property of `candidate` kind.
    pub fn select(filter: Kind, candidate: Kind) -> Self {
        match (filter, candidate) {
            (Kind::String, Kind::String) => Constraint::Contains,
            (Kind::DateTime, Kind::DateTime) => Constraint::SameDay,
            _ => Constraint::DeepEquality,
        }
    }

    /// Checks a non-null filter value against a candidate value.
    pub fn is_satisfied(self, test: &Value<'_>, value: &Value<'_>) -> bool {
        match self {
            Constraint::Contains => contains_ignore_case(test.as_str(), value.as_str()),
            Constraint::SameDay => same_day(test.as_date_time(), value.as_date_time()),
            Constraint::DeepEquality => test == value,
        }
    }
}

/// Returns `true` if `candidate` satisfies every constraint of `filter`.
///
/// - No filter matches everything; a missing candidate matches nothing.
/// - Properties are taken from the filter's type and its ancestors, each
///   name once (most-derived level wins), skipping names in `exclude`.
/// - A property with no same-named peer on the candidate, a null filter
///   value, or a filter value that cannot be read imposes no constraint.
/// - A candidate value that cannot be read is a mismatch.
///
/// # Example
///
/// ```
/// use pagewise::{matches, Inspect};
///
/// #[derive(Inspect)]
/// struct User {
///     #[inspect(String)]
///     name: String,
///     #[inspect(Number)]
///     age: Option<u32>,
/// }
///
/// let alice = User { name: "Alice Liddell".into(), age: Some(7) };
/// let filter = User { name: "liddell".into(), age: None };
///
/// assert!(matches(Some(&filter), Some(&alice), &[]));
/// assert!(!matches(Some(&filter), None, &[]));
/// assert!(matches(None, Some(&alice), &[]));
/// ```
pub fn matches(
    filter: Option<&dyn Inspect>,
    candidate: Option<&dyn Inspect>,
    exclude: &[&str],
) -> bool {
    let Some(filter) = filter else {
        return true;
    };
    let Some(candidate) = candidate else {
        return false;
    };

    let target = candidate.shape();
    let mut seen = HashSet::new();

    for level in lineage(filter) {
        for property in level.shape().properties {
            if !seen.insert(property.name) || exclude.contains(&property.name) {
                continue;
            }

            let Some(peer) = resolve(target, property.name) else {
                continue;
            };

            let test = match level.read(property.name) {
                Some(test) if property.kind.admits(&test) => test,
                Some(test) => {
                    debug!(
                        property = property.name,
                        declared = %property.kind,
                        actual = ?test.kind(),
                        "filter value has the wrong kind, skipping"
                    );
                    continue;
                }
                None => {
                    debug!(
                        property = property.name,
                        filter = level.shape().type_name,
                        "filter property cannot be read, skipping"
                    );
                    continue;
                }
            };
            if test.is_none() {
                continue;
            }

            let value = match peer.read(candidate) {
                Ok(value) => value,
                Err(err) => {
                    debug!(property = property.name, error = %err, "candidate read failed");
                    return false;
                }
            };

            if !Constraint::select(property.kind, peer.kind()).is_satisfied(&test, &value) {
                return false;
            }
        }
    }

    true
}

/// Returns the items matching `filter`, in input order. See [`matches`].
pub fn filter_items<'a, T: Inspect>(
    items: &'a [T],
    filter: Option<&dyn Inspect>,
    exclude: &[&str],
) -> Vec<&'a T> {
    items
        .iter()
        .filter(|item| matches(filter, Some(*item as &dyn Inspect), exclude))
        .collect()
}

/// Case-insensitive containment test.
///
/// An empty or absent `test` matches anything, as does an exact match;
/// otherwise an empty or absent `value` never matches.
///
/// # Example
///
/// ```
/// use pagewise::contains_ignore_case;
///
/// assert!(contains_ignore_case(Some("es"), Some("TEST")));
/// assert!(contains_ignore_case(Some(""), None));
/// assert!(!contains_ignore_case(Some("x"), Some("")));
/// ```
pub fn contains_ignore_case(test: Option<&str>, value: Option<&str>) -> bool {
    let test = match test {
        None | Some("") => return true,
        Some(test) => test,
    };
    match value {
        Some(value) if value == test => true,
        None | Some("") => false,
        Some(value) => value.to_lowercase().contains(&test.to_lowercase()),
    }
}

/// Returns `true` if both date-times fall on the same calendar day.
///
/// An absent `test` matches anything; an absent `value` never matches.
pub fn same_day(test: Option<NaiveDateTime>, value: Option<NaiveDateTime>) -> bool {
    match (test, value) {
        (None, _) => true,
        (_, None) => false,
        (Some(test), Some(value)) => {
            test.year() == value.year()
                && test.month() == value.month()
                && test.day() == value.day()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(d: u32, h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 5, d)
            .unwrap()
            .and_hms_opt(h, 0, 0)
            .unwrap()
    }

    #[test]
    fn constraint_selection() {
        assert_eq!(Constraint::select(Kind::String, Kind::String), Constraint::Contains);
        assert_eq!(Constraint::select(Kind::DateTime, Kind::DateTime), Constraint::SameDay);
        assert_eq!(Constraint::select(Kind::Number, Kind::Number), Constraint::DeepEquality);
        assert_eq!(Constraint::select(Kind::Any, Kind::String), Constraint::DeepEquality);
        assert_eq!(Constraint::select(Kind::String, Kind::Enum), Constraint::DeepEquality);
    }

    #[test]
    fn contains_rules() {
        assert!(contains_ignore_case(None, Some("abc")));
        assert!(contains_ignore_case(Some(""), Some("abc")));
        assert!(contains_ignore_case(Some("abc"), Some("abc")));
        assert!(contains_ignore_case(Some("B"), Some("abc")));
        assert!(!contains_ignore_case(Some("abc"), None));
        assert!(!contains_ignore_case(Some("abc"), Some("")));
        assert!(!contains_ignore_case(Some("abcd"), Some("abc")));
    }

    #[test]
    fn same_day_rules() {
        assert!(same_day(None, None));
        assert!(same_day(None, Some(at(1, 0))));
        assert!(!same_day(Some(at(1, 0)), None));
        assert!(same_day(Some(at(3, 1)), Some(at(3, 23))));
        assert!(!same_day(Some(at(3, 23)), Some(at(4, 0))));
    }

    #[test]
    fn constraint_satisfaction() {
        assert!(Constraint::Contains.is_satisfied(&Value::String("te"), &Value::String("TEST")));
        // A null candidate never contains a non-empty test
        assert!(!Constraint::Contains.is_satisfied(&Value::String("te"), &Value::None));
        assert!(Constraint::SameDay
            .is_satisfied(&Value::DateTime(at(2, 5)), &Value::DateTime(at(2, 9))));
        assert!(!Constraint::DeepEquality.is_satisfied(&Value::Enum("A"), &Value::Enum("B")));
    }
}
