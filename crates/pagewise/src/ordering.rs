//! Sort criteria and value comparison.
//!
//! Provides [`Direction`], [`NullHandling`], [`Order`] and [`Sort`] for
//! describing a sort request, and [`compare`] for ordering two property
//! values under a direction and null policy.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::value::{Kind, Value};

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Direction {
    /// Ascending order (smallest first).
    #[default]
    #[serde(alias = "asc")]
    Asc,
    /// Descending order (largest first).
    #[serde(alias = "desc")]
    Desc,
}

impl Direction {
    /// Returns `true` if this is ascending order.
    pub fn is_asc(self) -> bool {
        matches!(self, Direction::Asc)
    }

    /// Returns `true` if this is descending order.
    pub fn is_desc(self) -> bool {
        matches!(self, Direction::Desc)
    }

    /// Applies this direction to an ordering.
    ///
    /// For `Asc`, returns the ordering unchanged.
    /// For `Desc`, reverses the ordering.
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Direction::Asc => ordering,
            Direction::Desc => ordering.reverse(),
        }
    }

    /// Returns the display name of this direction.
    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Asc => "asc",
            Direction::Desc => "desc",
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Placement of null values relative to present ones.
///
/// The placement is expressed for ascending order; a descending sort
/// reverses it along with everything else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NullHandling {
    /// Nulls sort before present values.
    NullsFirst,
    /// Nulls sort after present values.
    #[default]
    NullsLast,
}

impl NullHandling {
    /// Ordering of a null value against a present one.
    fn null_vs_present(self) -> Ordering {
        match self {
            NullHandling::NullsFirst => Ordering::Less,
            NullHandling::NullsLast => Ordering::Greater,
        }
    }
}

/// A single sort criterion.
///
/// # Example
///
/// ```
/// use pagewise::{Direction, NullHandling, Order};
///
/// let order = Order::desc("name").nulls_first().ignore_case();
/// assert_eq!(order.direction, Direction::Desc);
/// assert_eq!(order.null_handling, NullHandling::NullsFirst);
/// assert!(order.ignore_case);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    /// The property to sort by.
    pub property: String,
    /// The sort direction.
    #[serde(default)]
    pub direction: Direction,
    /// Where nulls go.
    #[serde(default)]
    pub null_handling: NullHandling,
    /// Compare strings and enum names without regard to case.
    #[serde(default)]
    pub ignore_case: bool,
}

impl Order {
    /// Creates a new ordering with the given direction.
    pub fn new(property: impl Into<String>, direction: Direction) -> Self {
        Order {
            property: property.into(),
            direction,
            null_handling: NullHandling::default(),
            ignore_case: false,
        }
    }

    /// Creates a new ascending ordering for the given property.
    pub fn asc(property: impl Into<String>) -> Self {
        Order::new(property, Direction::Asc)
    }

    /// Creates a new descending ordering for the given property.
    pub fn desc(property: impl Into<String>) -> Self {
        Order::new(property, Direction::Desc)
    }

    /// Sets the null handling.
    pub fn with(mut self, null_handling: NullHandling) -> Self {
        self.null_handling = null_handling;
        self
    }

    /// Places nulls first.
    pub fn nulls_first(self) -> Self {
        self.with(NullHandling::NullsFirst)
    }

    /// Places nulls last.
    pub fn nulls_last(self) -> Self {
        self.with(NullHandling::NullsLast)
    }

    /// Makes string comparison case-insensitive.
    pub fn ignore_case(mut self) -> Self {
        self.ignore_case = true;
        self
    }

    /// Compares two values according to this ordering.
    ///
    /// Returns `None` if the values cannot be compared.
    pub fn compare(&self, a: &Value<'_>, b: &Value<'_>) -> Option<Ordering> {
        compare(a, b, self.ignore_case, self.direction, self.null_handling)
    }
}

/// An ordered list of sort criteria. Empty means unsorted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Sort {
    orders: Vec<Order>,
}

impl Sort {
    /// Creates an unsorted request.
    pub fn unsorted() -> Self {
        Sort::default()
    }

    /// Creates a sort from criteria, most significant first.
    pub fn by(orders: impl IntoIterator<Item = Order>) -> Self {
        Sort {
            orders: orders.into_iter().collect(),
        }
    }

    /// Returns `true` if no criterion is present.
    pub fn is_unsorted(&self) -> bool {
        self.orders.is_empty()
    }

    /// Returns the leading criterion.
    pub fn first(&self) -> Option<&Order> {
        self.orders.first()
    }

    /// Returns all criteria.
    pub fn orders(&self) -> &[Order] {
        &self.orders
    }
}

impl From<Order> for Sort {
    fn from(order: Order) -> Self {
        Sort::by([order])
    }
}

/// Compares two property values.
///
/// - Equal values (including two nulls) compare `Equal` in any direction.
/// - A single null is placed by `null_handling`, then `direction` applies.
/// - Strings compare lexically, case-folded when `ignore_case` is set;
///   enums compare by variant name the same way; numbers, booleans and
///   date-times by their natural order.
///
/// Returns `None` when the pair has no order (opaque values, or values of
/// different kinds).
///
/// # Example
///
/// ```
/// use std::cmp::Ordering;
/// use pagewise::{compare, Direction, NullHandling, Value};
///
/// let test = Value::String("test");
/// let upper = Value::String("TEST");
/// assert_eq!(
///     compare(&test, &upper, true, Direction::Asc, NullHandling::NullsLast),
///     Some(Ordering::Equal)
/// );
/// assert_eq!(
///     compare(&Value::None, &test, false, Direction::Asc, NullHandling::NullsFirst),
///     Some(Ordering::Less)
/// );
/// ```
pub fn compare(
    a: &Value<'_>,
    b: &Value<'_>,
    ignore_case: bool,
    direction: Direction,
    null_handling: NullHandling,
) -> Option<Ordering> {
    if a == b {
        return Some(Ordering::Equal);
    }
    let raw = match (a, b) {
        (Value::None, _) => null_handling.null_vs_present(),
        (_, Value::None) => null_handling.null_vs_present().reverse(),
        (Value::String(a), Value::String(b)) => cmp_str(a, b, ignore_case),
        (Value::Enum(a), Value::Enum(b)) => cmp_str(a, b, ignore_case),
        (Value::Number(a), Value::Number(b)) => a.compare(*b),
        (Value::Bool(a), Value::Bool(b)) => a.cmp(b),
        (Value::DateTime(a), Value::DateTime(b)) => a.cmp(b),
        _ => return None,
    };
    Some(direction.apply(raw))
}

/// Compares two optional strings with the same rules as [`compare`].
pub fn compare_strings(
    a: Option<&str>,
    b: Option<&str>,
    ignore_case: bool,
    direction: Direction,
    null_handling: NullHandling,
) -> Ordering {
    let raw = match (a, b) {
        (a, b) if a == b => return Ordering::Equal,
        (None, _) => null_handling.null_vs_present(),
        (_, None) => null_handling.null_vs_present().reverse(),
        (Some(a), Some(b)) => cmp_str(a, b, ignore_case),
    };
    direction.apply(raw)
}

/// Compares two optional values of any totally ordered type.
pub fn compare_ord<T: Ord + ?Sized>(
    a: Option<&T>,
    b: Option<&T>,
    direction: Direction,
    null_handling: NullHandling,
) -> Ordering {
    let raw = match (a, b) {
        (None, None) => return Ordering::Equal,
        (None, Some(_)) => null_handling.null_vs_present(),
        (Some(_), None) => null_handling.null_vs_present().reverse(),
        (Some(a), Some(b)) => a.cmp(b),
    };
    direction.apply(raw)
}

fn cmp_str(a: &str, b: &str, ignore_case: bool) -> Ordering {
    if ignore_case {
        a.chars()
            .flat_map(char::to_lowercase)
            .cmp(b.chars().flat_map(char::to_lowercase))
    } else {
        a.cmp(b)
    }
}

/// Comparison strategy for a sort column, selected once from its kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    /// Lexical string comparison.
    Lexical,
    /// Comparison of enum variant names.
    EnumName,
    /// Natural order of numbers, booleans and date-times.
    Natural,
}

impl Comparison {
    /// Selects the strategy for a property kind, or `None` if the kind has
    /// no total order.
    pub fn for_kind(kind: Kind) -> Option<Self> {
        match kind {
            Kind::String => Some(Comparison::Lexical),
            Kind::Enum => Some(Comparison::EnumName),
            Kind::Number | Kind::Bool | Kind::DateTime => Some(Comparison::Natural),
            Kind::Opaque | Kind::Any => None,
        }
    }

    /// Compares two values read from a column using this strategy.
    ///
    /// Returns `None` if a value does not fit the strategy.
    pub fn compare(self, a: &Value<'_>, b: &Value<'_>, order: &Order) -> Option<Ordering> {
        if !(self.fits(a) && self.fits(b)) {
            return None;
        }
        order.compare(a, b)
    }

    fn fits(self, value: &Value<'_>) -> bool {
        match (self, value) {
            (_, Value::None) => true,
            (Comparison::Lexical, Value::String(_)) => true,
            (Comparison::EnumName, Value::Enum(_)) => true,
            (Comparison::Natural, Value::Number(_) | Value::Bool(_) | Value::DateTime(_)) => true,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Number;
    use chrono::NaiveDate;

    const ASC: Direction = Direction::Asc;
    const DESC: Direction = Direction::Desc;
    const FIRST: NullHandling = NullHandling::NullsFirst;
    const LAST: NullHandling = NullHandling::NullsLast;

    #[test]
    fn direction_apply() {
        assert_eq!(ASC.apply(Ordering::Less), Ordering::Less);
        assert_eq!(ASC.apply(Ordering::Equal), Ordering::Equal);
        assert_eq!(DESC.apply(Ordering::Less), Ordering::Greater);
        assert_eq!(DESC.apply(Ordering::Equal), Ordering::Equal);
    }

    #[test]
    fn direction_serde() {
        let dir: Direction = serde_json::from_str("\"DESC\"").unwrap();
        assert_eq!(dir, DESC);
        let dir: Direction = serde_json::from_str("\"asc\"").unwrap();
        assert_eq!(dir, ASC);
        assert_eq!(serde_json::to_string(&DESC).unwrap(), "\"DESC\"");
    }

    #[test]
    fn order_defaults() {
        let order = Order::asc("name");
        assert_eq!(order.direction, ASC);
        assert_eq!(order.null_handling, LAST);
        assert!(!order.ignore_case);

        let order: Order = serde_json::from_str(r#"{"property":"id"}"#).unwrap();
        assert_eq!(order, Order::asc("id"));
    }

    #[test]
    fn compare_equal_values_any_direction() {
        for dir in [ASC, DESC] {
            for nulls in [FIRST, LAST] {
                assert_eq!(
                    compare(&Value::None, &Value::None, false, dir, nulls),
                    Some(Ordering::Equal)
                );
                assert_eq!(
                    compare(&Value::String("a"), &Value::String("a"), false, dir, nulls),
                    Some(Ordering::Equal)
                );
            }
        }
    }

    #[test]
    fn compare_string_case() {
        let test = Value::String("test");
        let upper = Value::String("TEST");
        assert_eq!(compare(&test, &upper, true, ASC, LAST), Some(Ordering::Equal));
        // 't' > 'T' in code point order
        assert_eq!(compare(&test, &upper, false, ASC, LAST), Some(Ordering::Greater));
        assert_eq!(compare(&test, &upper, false, DESC, LAST), Some(Ordering::Less));
    }

    #[test]
    fn compare_nulls() {
        let x = Value::Number(Number::I64(1));
        assert_eq!(compare(&Value::None, &x, false, ASC, FIRST), Some(Ordering::Less));
        assert_eq!(compare(&Value::None, &x, false, ASC, LAST), Some(Ordering::Greater));
        assert_eq!(compare(&x, &Value::None, false, ASC, FIRST), Some(Ordering::Greater));
        assert_eq!(compare(&x, &Value::None, false, ASC, LAST), Some(Ordering::Less));
        // Descending reverses the null placement too
        assert_eq!(compare(&Value::None, &x, false, DESC, LAST), Some(Ordering::Less));
    }

    #[test]
    fn compare_enums_by_name() {
        let b = Value::Enum("B");
        let c = Value::Enum("C");
        assert_eq!(compare(&b, &c, false, ASC, LAST), Some(Ordering::Less));
        assert_eq!(compare(&Value::Enum("b"), &c, true, ASC, LAST), Some(Ordering::Less));
    }

    #[test]
    fn compare_natural_order() {
        let early = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap().and_hms_opt(0, 0, 0).unwrap();
        let late = NaiveDate::from_ymd_opt(2021, 1, 1).unwrap().and_hms_opt(0, 0, 0).unwrap();
        assert_eq!(
            compare(&Value::DateTime(early), &Value::DateTime(late), false, ASC, LAST),
            Some(Ordering::Less)
        );
        assert_eq!(
            compare(&Value::Bool(false), &Value::Bool(true), false, DESC, LAST),
            Some(Ordering::Greater)
        );
    }

    #[test]
    fn compare_without_order_is_none() {
        let a = vec![1];
        let b = vec![2];
        assert_eq!(compare(&Value::Opaque(&a), &Value::Opaque(&b), false, ASC, LAST), None);
        assert_eq!(
            compare(&Value::String("1"), &Value::Number(Number::I64(1)), false, ASC, LAST),
            None
        );
    }

    #[test]
    fn compare_strings_typed() {
        assert_eq!(compare_strings(Some("test"), Some("TEST"), true, ASC, LAST), Ordering::Equal);
        assert_eq!(compare_strings(None, None, true, ASC, LAST), Ordering::Equal);
        assert_eq!(compare_strings(None, Some("a"), false, ASC, FIRST), Ordering::Less);
    }

    #[test]
    fn compare_ord_typed() {
        assert_eq!(
            compare_ord(Some("test"), Some("TEST"), DESC, LAST),
            "test".cmp("TEST").reverse()
        );
        assert_eq!(compare_ord::<i32>(None, Some(&1), ASC, LAST), Ordering::Greater);
        assert_eq!(compare_ord::<i32>(None, None, DESC, FIRST), Ordering::Equal);
    }

    #[test]
    fn comparison_for_kind() {
        assert_eq!(Comparison::for_kind(Kind::String), Some(Comparison::Lexical));
        assert_eq!(Comparison::for_kind(Kind::Enum), Some(Comparison::EnumName));
        assert_eq!(Comparison::for_kind(Kind::DateTime), Some(Comparison::Natural));
        assert_eq!(Comparison::for_kind(Kind::Opaque), None);
        assert_eq!(Comparison::for_kind(Kind::Any), None);
    }

    #[test]
    fn comparison_rejects_misfit_values() {
        let order = Order::asc("name");
        assert_eq!(
            Comparison::Lexical.compare(&Value::String("a"), &Value::None, &order),
            Some(Ordering::Less)
        );
        assert_eq!(
            Comparison::Lexical.compare(&Value::Enum("A"), &Value::Enum("B"), &order),
            None
        );
    }

    #[test]
    fn sort_descriptor() {
        assert!(Sort::unsorted().is_unsorted());
        let sort = Sort::by([Order::asc("a"), Order::desc("b")]);
        assert_eq!(sort.first(), Some(&Order::asc("a")));
        assert_eq!(sort.orders().len(), 2);
        assert_eq!(Sort::from(Order::desc("x")).first().unwrap().direction, DESC);
    }
}
