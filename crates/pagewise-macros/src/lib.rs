//! Proc macros for Pagewise.
//!
//! This crate provides the derive macros that implement the property
//! capability traits of `pagewise`. It is re-exported by `pagewise`, so
//! depending on it directly is not necessary.
//!
//! # Available Macros
//!
//! - [`Inspect`] - Generate `Inspect` and `Described` from field annotations
//! - [`PropertyEnum`] - Generate name and wire-value tables for a fieldless enum
//!
//! Generated code refers to the `pagewise` crate by absolute path.

mod inspect;
mod property_enum;

use proc_macro::TokenStream;
use syn::{parse_macro_input, DeriveInput};

/// Derives the `Inspect` and `Described` traits.
///
/// Only annotated fields become properties; the rest are invisible to
/// sorting and filtering.
///
/// # Field Attributes
///
/// | Attribute | Field type | Kind |
/// |-----------|------------|------|
/// | `String` | anything `AsRef<str>` | compared lexically, filtered by containment |
/// | `Enum` | a `PropertyEnum` | compared by variant name |
/// | `Number` | a `Copy` numeric type | compared numerically |
/// | `Bool` | `bool` | `false` before `true` |
/// | `DateTime` | anything `AsDateTime` | chronological, filtered by calendar day |
/// | `Opaque` | `Debug + PartialEq + 'static` | equality only, not sortable |
/// | `Any` | `pagewise::Scalar` | dynamically typed, not sortable |
/// | `ancestor` | a type implementing `Described` | parent level for lookups |
/// | `skip` | any | excluded |
/// | `rename = "..."` | any | custom property name |
///
/// Each property field may be wrapped in `Option<_>` (spelled as such);
/// `None` reads as the null value. At most one field may be the ancestor,
/// optionally as `Option<Parent>`.
///
/// `enum` and other keywords can be given as a string: `ty = "enum"`.
///
/// # Generated Code
///
/// 1. Property name constants (e.g., `Task::NAME`, `Task::DUE_AT`)
/// 2. `Described::SHAPE`, listing the properties in declaration order
/// 3. `Inspect::read()` and, with an ancestor, `Inspect::ancestor()`
///
/// # Example
///
/// ```ignore
/// use pagewise::{Inspect, PropertyEnum};
///
/// #[derive(Debug, Clone, Copy, PartialEq, PropertyEnum)]
/// enum Status {
///     Open,
///     Closed,
/// }
///
/// #[derive(Inspect)]
/// struct Record {
///     #[inspect(Number)]
///     id: Option<i64>,
/// }
///
/// #[derive(Inspect)]
/// struct Ticket {
///     #[inspect(ancestor)]
///     record: Record,
///
///     #[inspect(String, rename = "title")]
///     summary: String,
///
///     #[inspect(Enum)]
///     status: Status,
///
///     #[inspect(skip)]
///     cache: Vec<u8>,
/// }
///
/// assert_eq!(Ticket::TITLE, "title");
/// ```
#[proc_macro_derive(Inspect, attributes(inspect))]
pub fn inspect_derive(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    inspect::inspect_derive_impl(input)
        .unwrap_or_else(|e| e.to_compile_error())
        .into()
}

/// Derives the `PropertyEnum` trait for a fieldless enum.
///
/// # Container Attributes
///
/// | Attribute | Default | Description |
/// |-----------|---------|-------------|
/// | `ignore_case = bool` | `true` | Match wire values case-insensitively |
/// | `name_if_no_match` | off | Fall back to exact variant names |
///
/// # Variant Attributes
///
/// | Attribute | Description |
/// |-----------|-------------|
/// | `value = "..."` | Wire value accepted for this variant |
///
/// When no variant has a wire value, only exact variant names convert.
/// The enum must also be `Copy`.
///
/// # Example
///
/// ```ignore
/// use pagewise::{parse_enum, PropertyEnum};
///
/// #[derive(Debug, Clone, Copy, PartialEq, PropertyEnum)]
/// #[property_enum(ignore_case = false, name_if_no_match)]
/// enum Unit {
///     #[property_enum(value = "kg")]
///     Kilogram,
///     #[property_enum(value = "g")]
///     Gram,
/// }
///
/// assert_eq!(parse_enum::<Unit>("kg").unwrap(), Some(Unit::Kilogram));
/// assert_eq!(parse_enum::<Unit>("Gram").unwrap(), Some(Unit::Gram));
/// assert!(parse_enum::<Unit>("KG").is_err());
/// ```
#[proc_macro_derive(PropertyEnum, attributes(property_enum))]
pub fn property_enum_derive(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    property_enum::property_enum_derive_impl(input)
        .unwrap_or_else(|e| e.to_compile_error())
        .into()
}
