//! Property capability traits.
//!
//! A type takes part in sorting and filtering by implementing [`Inspect`]
//! (object-safe, per instance) and [`Described`] (its static [`Shape`]).
//! Both are normally generated with `#[derive(Inspect)]`.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, TimeZone};

use crate::value::{Kind, Value};

/// A property declared on a type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Property {
    /// The property name used for lookups.
    pub name: &'static str,
    /// The declared kind.
    pub kind: Kind,
}

impl Property {
    /// Creates a property declaration.
    pub const fn new(name: &'static str, kind: Kind) -> Self {
        Property { name, kind }
    }
}

/// Static description of a type's properties.
///
/// `ancestor` links to the shape of the embedded parent type, if any.
/// Lookups try the type's own properties first and then walk the ancestors,
/// so a property redeclared on a derived type shadows the parent's.
#[derive(Debug)]
pub struct Shape {
    /// Name of the described type.
    pub type_name: &'static str,
    /// Properties declared directly on the type, in declaration order.
    pub properties: &'static [Property],
    /// Shape of the parent type.
    pub ancestor: Option<&'static Shape>,
}

impl Shape {
    /// Finds a property declared directly on this shape.
    pub fn declared(&self, name: &str) -> Option<&'static Property> {
        self.properties.iter().find(|p| p.name == name)
    }

    /// Iterates over this shape and its ancestors, most-derived first.
    pub fn lineage(&'static self) -> impl Iterator<Item = &'static Shape> {
        std::iter::successors(Some(self), |shape| shape.ancestor)
    }
}

/// Instance-level property access.
///
/// # Manual Implementation
///
/// ```
/// use pagewise::{Described, Inspect, Kind, Number, Property, Shape, Value};
///
/// struct Task {
///     name: String,
///     priority: Option<u8>,
/// }
///
/// impl Described for Task {
///     const SHAPE: &'static Shape = &Shape {
///         type_name: "Task",
///         properties: &[
///             Property::new("name", Kind::String),
///             Property::new("priority", Kind::Number),
///         ],
///         ancestor: None,
///     };
/// }
///
/// impl Inspect for Task {
///     fn shape(&self) -> &'static Shape {
///         Self::SHAPE
///     }
///
///     fn read(&self, property: &str) -> Option<Value<'_>> {
///         match property {
///             "name" => Some(Value::String(&self.name)),
///             "priority" => Some(self.priority.map_or(Value::None, |p| Value::Number(Number::from(p)))),
///             _ => None,
///         }
///     }
/// }
/// ```
pub trait Inspect {
    /// Returns the shape of this value's type.
    fn shape(&self) -> &'static Shape;

    /// Reads a property declared directly on this type.
    ///
    /// Returns `None` if the property is not declared at this level; a
    /// declared property holding null reads as `Some(Value::None)`.
    fn read(&self, property: &str) -> Option<Value<'_>>;

    /// Returns the embedded parent value, if any.
    fn ancestor(&self) -> Option<&dyn Inspect> {
        None
    }
}

/// Type-level access to a type's [`Shape`].
///
/// Sorting resolves the sort column against the shape before looking at
/// any item, so an unknown column is reported even for an empty list.
pub trait Described: Inspect {
    /// The static shape of this type.
    const SHAPE: &'static Shape;
}

/// Iterates over a value and its ancestors, most-derived first.
pub fn lineage(item: &dyn Inspect) -> impl Iterator<Item = &dyn Inspect> {
    std::iter::successors(Some(item), |level| level.ancestor())
}

/// Conversion of date-like types into [`NaiveDateTime`].
///
/// Used by `#[inspect(DateTime)]` fields. Zoned date-times convert to their
/// local wall-clock time, so calendar-day filtering follows the zone the
/// value was recorded in.
///
/// # Example
///
/// ```
/// use chrono::NaiveDateTime;
/// use pagewise::AsDateTime;
///
/// struct Millis(i64);
///
/// impl AsDateTime for Millis {
///     fn as_date_time(&self) -> NaiveDateTime {
///         chrono::DateTime::from_timestamp_millis(self.0)
///             .unwrap_or_default()
///             .naive_utc()
///     }
/// }
/// ```
pub trait AsDateTime {
    /// Converts this value to a date-time.
    fn as_date_time(&self) -> NaiveDateTime;
}

impl AsDateTime for NaiveDateTime {
    fn as_date_time(&self) -> NaiveDateTime {
        *self
    }
}

impl AsDateTime for NaiveDate {
    fn as_date_time(&self) -> NaiveDateTime {
        self.and_time(NaiveTime::MIN)
    }
}

impl<Tz: TimeZone> AsDateTime for DateTime<Tz> {
    fn as_date_time(&self) -> NaiveDateTime {
        self.naive_local()
    }
}
