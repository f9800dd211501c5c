//! Property-based list sorting.
//!
//! [`sort_by_property`] orders a slice by the leading criterion of a
//! [`Sort`], either through a registered custom comparator or by resolving
//! the named property on the item type and comparing the values read from
//! each item.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;

use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::ordering::{Comparison, Order, Sort};
use crate::resolve::{resolve_comparable, Accessor};
use crate::traits::{Described, Inspect};

type Comparator<T> = Box<dyn Fn(&T, &T) -> Ordering + Send + Sync>;

/// Custom comparators keyed by sort property name.
///
/// A registered comparator takes precedence over property resolution and
/// is used as given: the request's direction and null handling do not
/// apply to it.
///
/// # Example
///
/// ```
/// use pagewise::Comparators;
///
/// struct Row {
///     tags: Vec<String>,
/// }
///
/// let comparators = Comparators::<Row>::new()
///     .with("tags", |a, b| a.tags.len().cmp(&b.tags.len()));
/// assert!(comparators.get("tags").is_some());
/// ```
pub struct Comparators<T> {
    entries: HashMap<String, Comparator<T>>,
}

impl<T> Comparators<T> {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Comparators {
            entries: HashMap::new(),
        }
    }

    /// Registers a comparator for `property`, replacing any previous one.
    pub fn with<F>(mut self, property: impl Into<String>, comparator: F) -> Self
    where
        F: Fn(&T, &T) -> Ordering + Send + Sync + 'static,
    {
        self.insert(property, comparator);
        self
    }

    /// Registers a comparator for `property` in place.
    pub fn insert<F>(&mut self, property: impl Into<String>, comparator: F)
    where
        F: Fn(&T, &T) -> Ordering + Send + Sync + 'static,
    {
        self.entries.insert(property.into(), Box::new(comparator));
    }

    /// Looks up the comparator registered for `property`.
    pub fn get(&self, property: &str) -> Option<&(dyn Fn(&T, &T) -> Ordering + Send + Sync)> {
        self.entries.get(property).map(|c| c.as_ref())
    }

    /// Returns `true` if nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<T> Default for Comparators<T> {
    fn default() -> Self {
        Comparators::new()
    }
}

impl<T> fmt::Debug for Comparators<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.entries.keys()).finish()
    }
}

/// Sorts `items` in place by the leading criterion of `sort`.
///
/// - An unsorted request leaves the slice untouched.
/// - A comparator registered under the property name is used directly.
/// - Otherwise the property is resolved on `T`; if it is unknown or not
///   comparable, [`Error::UnknownSortProperty`] is returned before any item
///   is examined.
///
/// The sort is stable. A pair whose values cannot be read or compared is
/// treated as equal and logged.
///
/// # Example
///
/// ```
/// use pagewise::{sort_by_property, Inspect, Order, Sort};
///
/// #[derive(Inspect)]
/// struct City {
///     #[inspect(String)]
///     name: String,
///     #[inspect(Number)]
///     population: Option<u32>,
/// }
///
/// let mut cities = vec![
///     City { name: "Lyon".into(), population: Some(522_000) },
///     City { name: "Bern".into(), population: None },
///     City { name: "Oslo".into(), population: Some(709_000) },
/// ];
///
/// sort_by_property(&mut cities, &Sort::from(Order::desc("population")), None).unwrap();
/// let names: Vec<_> = cities.iter().map(|c| c.name.as_str()).collect();
/// assert_eq!(names, ["Bern", "Oslo", "Lyon"]);
/// ```
pub fn sort_by_property<T: Described>(
    items: &mut [T],
    sort: &Sort,
    comparators: Option<&Comparators<T>>,
) -> Result<()> {
    let Some(order) = sort.first() else {
        return Ok(());
    };
    if sort.orders().len() > 1 {
        debug!(
            property = %order.property,
            ignored = sort.orders().len() - 1,
            "only the leading sort criterion is applied"
        );
    }

    if let Some(comparator) = comparators.and_then(|c| c.get(&order.property)) {
        items.sort_by(|a, b| comparator(a, b));
        return Ok(());
    }

    let accessor = resolve_comparable(T::SHAPE, &order.property)
        .ok_or_else(|| Error::unknown_sort_property(&order.property))?;
    let Some(comparison) = Comparison::for_kind(accessor.kind()) else {
        return Err(Error::unknown_sort_property(&order.property));
    };

    items.sort_by(|a, b| compare_items(a, b, &accessor, comparison, order));
    Ok(())
}

/// Sorts an owned list and returns it. See [`sort_by_property`].
pub fn sorted_by_property<T: Described>(
    mut items: Vec<T>,
    sort: &Sort,
    comparators: Option<&Comparators<T>>,
) -> Result<Vec<T>> {
    sort_by_property(&mut items, sort, comparators)?;
    Ok(items)
}

fn compare_items(
    a: &dyn Inspect,
    b: &dyn Inspect,
    accessor: &Accessor,
    comparison: Comparison,
    order: &Order,
) -> Ordering {
    let (a, b) = match (accessor.read(a), accessor.read(b)) {
        (Ok(a), Ok(b)) => (a, b),
        (Err(err), _) | (_, Err(err)) => {
            warn!(
                property = accessor.name(),
                error = %err,
                "sort read failed, treating pair as equal"
            );
            return Ordering::Equal;
        }
    };

    comparison.compare(&a, &b, order).unwrap_or_else(|| {
        warn!(
            property = accessor.name(),
            left = ?a,
            right = ?b,
            "values are not comparable, treating pair as equal"
        );
        Ordering::Equal
    })
}
