//! Property-based tests for pagewise using proptest.

use std::cmp::Ordering;

use proptest::prelude::*;
use pagewise::{
    compare, matches, page, sort_by_property, Direction, Inspect, NullHandling, Number, Order,
    PageRequest, Sort, Value,
};

// ============================================================================
// Test helpers
// ============================================================================

#[derive(Debug, Clone, Inspect)]
struct TestItem {
    #[inspect(Number)]
    value: Option<i64>,
    #[inspect(String)]
    name: String,
    #[inspect(Bool)]
    active: bool,
    // Input position, for stability checks
    position: usize,
}

fn test_item_strategy() -> impl Strategy<Value = (Option<i64>, String, bool)> {
    (
        prop::option::of(-50i64..50),
        "[a-zA-Z]{0,6}",
        any::<bool>(),
    )
}

fn items_strategy() -> impl Strategy<Value = Vec<TestItem>> {
    prop::collection::vec(test_item_strategy(), 0..60).prop_map(|raw| {
        raw.into_iter()
            .enumerate()
            .map(|(position, (value, name, active))| TestItem {
                value,
                name,
                active,
                position,
            })
            .collect()
    })
}

fn direction_strategy() -> impl Strategy<Value = Direction> {
    prop_oneof![Just(Direction::Asc), Just(Direction::Desc)]
}

fn nulls_strategy() -> impl Strategy<Value = NullHandling> {
    prop_oneof![Just(NullHandling::NullsFirst), Just(NullHandling::NullsLast)]
}

fn number(n: Option<i64>) -> Value<'static> {
    n.map_or(Value::None, |n| Value::Number(Number::I64(n)))
}

// ============================================================================
// Comparison properties
// ============================================================================

proptest! {
    /// Equal values compare equal under every policy.
    #[test]
    fn equal_values_compare_equal(
        n in prop::option::of(any::<i64>()),
        s in "[a-zA-Z]{0,8}",
        ignore_case in any::<bool>(),
        dir in direction_strategy(),
        nulls in nulls_strategy(),
    ) {
        prop_assert_eq!(compare(&number(n), &number(n), ignore_case, dir, nulls), Some(Ordering::Equal));
        let s = Value::String(&s);
        prop_assert_eq!(compare(&s, &s, ignore_case, dir, nulls), Some(Ordering::Equal));
    }

    /// Descending is exactly the reverse of ascending.
    #[test]
    fn descending_negates_ascending(
        a in prop::option::of(any::<i64>()),
        b in prop::option::of(any::<i64>()),
        nulls in nulls_strategy(),
    ) {
        let (a, b) = (number(a), number(b));
        let asc = compare(&a, &b, false, Direction::Asc, nulls).unwrap();
        let desc = compare(&a, &b, false, Direction::Desc, nulls).unwrap();
        prop_assert_eq!(asc, desc.reverse());
    }

    /// Swapping the arguments reverses the result.
    #[test]
    fn comparison_is_antisymmetric(
        a in "[a-zA-Z]{0,8}",
        b in prop::option::of("[a-zA-Z]{0,8}"),
        ignore_case in any::<bool>(),
        dir in direction_strategy(),
        nulls in nulls_strategy(),
    ) {
        let a = Value::String(&a);
        let b = b.as_deref().map_or(Value::None, Value::String);
        let forward = compare(&a, &b, ignore_case, dir, nulls).unwrap();
        let backward = compare(&b, &a, ignore_case, dir, nulls).unwrap();
        prop_assert_eq!(forward, backward.reverse());
    }

    /// Null placement follows the policy in ascending order.
    #[test]
    fn null_placement(n in any::<i64>()) {
        let x = Value::Number(Number::I64(n));
        prop_assert_eq!(
            compare(&Value::None, &x, false, Direction::Asc, NullHandling::NullsFirst),
            Some(Ordering::Less)
        );
        prop_assert_eq!(
            compare(&Value::None, &x, false, Direction::Asc, NullHandling::NullsLast),
            Some(Ordering::Greater)
        );
        prop_assert_eq!(
            compare(&x, &Value::None, false, Direction::Asc, NullHandling::NullsFirst),
            Some(Ordering::Greater)
        );
    }

    /// Case folding makes strings differing only in case equal.
    #[test]
    fn ignore_case_folds(s in "[a-z]{1,8}") {
        let upper = s.to_uppercase();
        prop_assert_eq!(
            compare(&Value::String(&s), &Value::String(&upper), true, Direction::Asc, NullHandling::NullsLast),
            Some(Ordering::Equal)
        );
        prop_assert_ne!(
            compare(&Value::String(&s), &Value::String(&upper), false, Direction::Asc, NullHandling::NullsLast),
            Some(Ordering::Equal)
        );
    }
}

// ============================================================================
// Sort properties
// ============================================================================

proptest! {
    /// Sorting is a permutation of the input.
    #[test]
    fn sort_preserves_items(
        mut items in items_strategy(),
        dir in direction_strategy(),
        nulls in nulls_strategy(),
    ) {
        let before = items.len();
        sort_by_property(&mut items, &Sort::from(Order::new("value", dir).with(nulls)), None).unwrap();
        prop_assert_eq!(items.len(), before);
        let mut positions: Vec<_> = items.iter().map(|i| i.position).collect();
        positions.sort_unstable();
        prop_assert_eq!(positions, (0..before).collect::<Vec<_>>());
    }

    /// Adjacent items are in order after sorting.
    #[test]
    fn sort_orders_adjacent_pairs(
        mut items in items_strategy(),
        dir in direction_strategy(),
        nulls in nulls_strategy(),
    ) {
        let order = Order::new("value", dir).with(nulls);
        sort_by_property(&mut items, &Sort::from(order.clone()), None).unwrap();
        for pair in items.windows(2) {
            let ordering = order
                .compare(&number(pair[0].value), &number(pair[1].value))
                .unwrap();
            prop_assert_ne!(ordering, Ordering::Greater);
        }
    }

    /// Items that compare equal keep their input order.
    #[test]
    fn sort_is_stable(mut items in items_strategy(), ignore_case in any::<bool>()) {
        let order = if ignore_case {
            Order::asc("name").ignore_case()
        } else {
            Order::asc("name")
        };
        sort_by_property(&mut items, &Sort::from(order.clone()), None).unwrap();
        for pair in items.windows(2) {
            let tie = order.compare(&Value::String(&pair[0].name), &Value::String(&pair[1].name));
            if tie == Some(Ordering::Equal) {
                prop_assert!(pair[0].position < pair[1].position);
            }
        }
    }

    /// An unknown column always fails, whatever the items.
    #[test]
    fn unknown_column_always_fails(mut items in items_strategy(), column in "[a-z]{1,8}") {
        prop_assume!(!["value", "name", "active"].contains(&column.as_str()));
        prop_assert!(sort_by_property(&mut items, &Sort::from(Order::asc(column)), None).is_err());
    }
}

// ============================================================================
// Filter and page properties
// ============================================================================

proptest! {
    /// Every item matches itself.
    #[test]
    fn matching_is_reflexive(items in items_strategy()) {
        for item in &items {
            prop_assert!(matches(Some(item as &dyn Inspect), Some(item as &dyn Inspect), &[]));
        }
    }

    /// No filter matches everything; no candidate matches nothing.
    #[test]
    fn missing_sides(items in items_strategy()) {
        for item in &items {
            prop_assert!(matches(None, Some(item as &dyn Inspect), &[]));
            prop_assert!(!matches(Some(item as &dyn Inspect), None, &[]));
        }
    }

    /// Excluding every property makes any filter match.
    #[test]
    fn excluding_everything_matches(items in items_strategy(), filter in items_strategy()) {
        if let Some(filter) = filter.first() {
            for item in &items {
                prop_assert!(matches(
                    Some(filter as &dyn Inspect),
                    Some(item as &dyn Inspect),
                    &["value", "name", "active"],
                ));
            }
        }
    }

    /// Pages partition the list.
    #[test]
    fn pages_partition_the_list(items in items_strategy(), size in 1usize..10) {
        let total = items.len();
        let mut seen = Vec::new();
        for index in 0..=total / size {
            let p = page(items.clone(), &PageRequest::new(index, size));
            prop_assert!(p.content.len() <= size);
            prop_assert_eq!(p.total, total);
            seen.extend(p.content.into_iter().map(|i| i.position));
        }
        prop_assert_eq!(seen, (0..total).collect::<Vec<_>>());
    }
}
