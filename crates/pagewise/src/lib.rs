//! Pagewise - Property-name sorting and structural filtering for list endpoints.
//!
//! Pagewise orders and filters already-materialized collections of structs
//! from criteria that arrive as strings: a sort column name, a direction, a
//! filter object. It supports:
//!
//! - Sorting by property name, with case folding and null placement
//! - Custom comparators for columns that are not plain properties
//! - Structural filtering: a filter object's non-null fields as constraints
//! - Page requests and in-memory page slicing
//! - Enum conversion from request strings with designated wire values
//!
//! # Quick Start
//!
//! ```rust
//! use pagewise::{filter_items, sort_by_property, Inspect, Order, Sort};
//!
//! #[derive(Inspect)]
//! struct Task {
//!     #[inspect(String)]
//!     name: String,
//!     #[inspect(Number)]
//!     priority: Option<i32>,
//!     #[inspect(Bool)]
//!     archived: bool,
//! }
//!
//! let mut tasks = vec![
//!     Task { name: "Write docs".into(), priority: Some(3), archived: false },
//!     Task { name: "Fix bug".into(), priority: Some(5), archived: false },
//!     Task { name: "Old task".into(), priority: None, archived: true },
//! ];
//!
//! sort_by_property(&mut tasks, &Sort::from(Order::asc("priority")), None)?;
//! assert_eq!(tasks[0].name, "Write docs");
//! assert_eq!(tasks[2].name, "Old task");
//!
//! let filter = Task { name: "BUG".into(), priority: None, archived: false };
//! let found = filter_items(&tasks, Some(&filter), &[]);
//! assert_eq!(found.len(), 1);
//! assert_eq!(found[0].name, "Fix bug");
//! # Ok::<(), pagewise::Error>(())
//! ```
//!
//! # Sorting
//!
//! [`sort_by_property`] honors the leading [`Order`] of a [`Sort`]. The
//! column is resolved on the item type's [`Shape`], its own properties first
//! and then its ancestors. Only comparable kinds can be sort columns:
//!
//! | Kind | Order |
//! |------|-------|
//! | `String` | Lexical, optionally case-insensitive |
//! | `Enum` | By variant name, optionally case-insensitive |
//! | `Number` | Numeric, across integer and float representations |
//! | `Bool` | `false` before `true` |
//! | `DateTime` | Chronological |
//!
//! `Opaque` and `Any` properties cannot be sorted on unless a custom
//! comparator is registered in [`Comparators`] under the column name.
//!
//! # Filtering
//!
//! [`matches`] treats every non-null property of the filter object as a
//! constraint on the same-named property of the candidate:
//!
//! | Filter / candidate kinds | Constraint |
//! |--------------------------|------------|
//! | both `String` | case-insensitive containment |
//! | both `DateTime` | same calendar day |
//! | anything else | deep equality |
//!
//! Properties the candidate does not have, and names passed in the
//! exclusion list, impose nothing. A filter type with no property in common
//! with the candidate therefore matches everything.
//!
//! # Derive Macros
//!
//! `#[derive(Inspect)]` generates [`Inspect`] and [`Described`] from field
//! attributes, and `#[derive(PropertyEnum)]` the [`PropertyEnum`] tables
//! used by [`parse_enum`]. See the `pagewise-macros` crate for the attribute
//! reference.

// Lets generated `::pagewise::` paths resolve inside this crate.
extern crate self as pagewise;

mod convert;
mod error;
mod filter;
mod ordering;
mod page;
mod resolve;
mod sort;
mod traits;
mod validity;
mod value;

// Re-export public API
pub use convert::{deserialize_enum, parse_enum, Conversion, PropertyEnum};
pub use error::{AccessError, ConvertError, Error, Result};
pub use filter::{contains_ignore_case, filter_items, matches, same_day, Constraint};
pub use ordering::{
    compare, compare_ord, compare_strings, Comparison, Direction, NullHandling, Order, Sort,
};
pub use page::{page, OrderRequest, Page, PageFilter, PageRequest};
pub use resolve::{resolve, resolve_comparable, Accessor};
pub use sort::{sort_by_property, sorted_by_property, Comparators};
pub use traits::{lineage, AsDateTime, Described, Inspect, Property, Shape};
pub use validity::{
    compare_expired, compare_expired_at, filter_expired, filter_expired_at, is_expired,
    is_expired_at,
};
pub use value::{Kind, Number, Opaque, Scalar, Value};

pub use pagewise_macros::{Inspect, PropertyEnum};
