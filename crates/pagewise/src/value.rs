//! Runtime value types for property comparison.
//!
//! The [`Value`] enum represents the value of a property read from a struct,
//! and [`Kind`] the kind a property is declared with. Values borrow from the
//! source struct wherever possible.

use std::any::Any;
use std::cmp::Ordering;
use std::fmt;

use chrono::NaiveDateTime;
use serde::de::{self, Deserialize, Deserializer, Visitor};

/// Declared kind of a property.
///
/// The kind is fixed per property, independently of the value currently
/// stored, so that a null value still carries its kind. Sorting and filtering
/// select their strategy from the kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    /// Text, compared lexically.
    String,
    /// Fieldless enum, compared by variant name.
    Enum,
    /// Any numeric type.
    Number,
    /// Boolean.
    Bool,
    /// Date and time of day, without a time zone.
    DateTime,
    /// A value that only supports equality.
    Opaque,
    /// Dynamically typed; may hold any value variant.
    Any,
}

impl Kind {
    /// Returns `true` if properties of this kind have a total order.
    ///
    /// Only comparable properties can be used as sort columns.
    pub fn is_comparable(self) -> bool {
        matches!(
            self,
            Kind::String | Kind::Enum | Kind::Number | Kind::Bool | Kind::DateTime
        )
    }

    /// Returns `true` if a property of this kind may produce `value`.
    ///
    /// `Value::None` is admitted by every kind.
    pub fn admits(self, value: &Value<'_>) -> bool {
        match (self, value) {
            (_, Value::None) | (Kind::Any, _) => true,
            (kind, value) => value.kind() == Some(kind),
        }
    }

    /// Returns the display name of this kind.
    pub fn as_str(self) -> &'static str {
        match self {
            Kind::String => "string",
            Kind::Enum => "enum",
            Kind::Number => "number",
            Kind::Bool => "bool",
            Kind::DateTime => "datetime",
            Kind::Opaque => "opaque",
            Kind::Any => "any",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Runtime value of a property, borrowed from the source struct.
///
/// Equality is deep equality: numbers compare by numeric value across
/// representations, opaque values through their own `PartialEq`.
///
/// # Example
///
/// ```
/// use pagewise::{Number, Value};
///
/// assert_eq!(Value::Number(Number::I64(5)), Value::Number(Number::U64(5)));
/// assert_ne!(Value::String("a"), Value::None);
/// ```
#[derive(Debug, Clone, Copy)]
pub enum Value<'a> {
    /// String value (borrowed).
    String(&'a str),
    /// Enum variant name.
    Enum(&'static str),
    /// Numeric value.
    Number(Number),
    /// Boolean value.
    Bool(bool),
    /// Date and time value.
    DateTime(NaiveDateTime),
    /// Value with equality only.
    Opaque(&'a dyn Opaque),
    /// Null.
    None,
}

impl<'a> Value<'a> {
    /// Returns `true` if this is the null value.
    pub fn is_none(&self) -> bool {
        matches!(self, Value::None)
    }

    /// Returns the kind of this value, or `None` for the null value.
    pub fn kind(&self) -> Option<Kind> {
        match self {
            Value::String(_) => Some(Kind::String),
            Value::Enum(_) => Some(Kind::Enum),
            Value::Number(_) => Some(Kind::Number),
            Value::Bool(_) => Some(Kind::Bool),
            Value::DateTime(_) => Some(Kind::DateTime),
            Value::Opaque(_) => Some(Kind::Opaque),
            Value::None => None,
        }
    }

    /// Extracts the string value, if present.
    pub fn as_str(&self) -> Option<&'a str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Extracts the enum variant name, if present.
    pub fn as_enum(&self) -> Option<&'static str> {
        match self {
            Value::Enum(name) => Some(name),
            _ => None,
        }
    }

    /// Extracts the number value, if present.
    pub fn as_number(&self) -> Option<Number> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Extracts the boolean value, if present.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Extracts the date-time value, if present.
    pub fn as_date_time(&self) -> Option<NaiveDateTime> {
        match self {
            Value::DateTime(dt) => Some(*dt),
            _ => None,
        }
    }
}

impl PartialEq for Value<'_> {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Enum(a), Value::Enum(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => a.compare(*b) == Ordering::Equal,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::DateTime(a), Value::DateTime(b)) => a == b,
            (Value::Opaque(a), Value::Opaque(b)) => (**a).opaque_eq(*b),
            (Value::None, Value::None) => true,
            _ => false,
        }
    }
}

/// A value that can be compared for equality behind a trait object.
///
/// Implemented for every `'static` type with `Debug` and `PartialEq`, so a
/// struct-valued property only needs those derives.
pub trait Opaque: Any + fmt::Debug {
    /// Upcasts to [`Any`] for downcasting.
    fn as_any(&self) -> &dyn Any;

    /// Compares with another opaque value. Values of different types are
    /// never equal.
    fn opaque_eq(&self, other: &dyn Opaque) -> bool;
}

impl<T: Any + fmt::Debug + PartialEq> Opaque for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn opaque_eq(&self, other: &dyn Opaque) -> bool {
        other
            .as_any()
            .downcast_ref::<T>()
            .is_some_and(|other| self == other)
    }
}

/// Numeric value supporting all common numeric types.
///
/// Numbers are stored in one of three variants to preserve precision:
/// - `I64` for signed integers
/// - `U64` for unsigned integers
/// - `F64` for floating point
///
/// Ordering is total: floats use IEEE total order, so `NaN` sorts after every
/// other number instead of making the comparison undefined. Equality agrees
/// with the ordering, so `I64(5) == U64(5) == F64(5.0)`.
#[derive(Debug, Clone, Copy)]
pub enum Number {
    /// Signed 64-bit integer.
    I64(i64),
    /// Unsigned 64-bit integer.
    U64(u64),
    /// 64-bit floating point.
    F64(f64),
}

impl Number {
    /// Converts the number to f64.
    pub fn to_f64(self) -> f64 {
        match self {
            Number::I64(n) => n as f64,
            Number::U64(n) => n as f64,
            Number::F64(n) => n,
        }
    }

    /// Compares two numbers, handling mixed representations.
    pub fn compare(self, other: Number) -> Ordering {
        match (self, other) {
            (Number::I64(a), Number::I64(b)) => a.cmp(&b),
            (Number::U64(a), Number::U64(b)) => a.cmp(&b),
            (Number::F64(a), Number::F64(b)) => a.total_cmp(&b),

            // Integers of different signedness compare exactly
            (Number::I64(a), Number::U64(b)) => match u64::try_from(a) {
                Ok(a) => a.cmp(&b),
                Err(_) => Ordering::Less,
            },
            (Number::U64(_), Number::I64(_)) => other.compare(self).reverse(),

            _ => self.to_f64().total_cmp(&other.to_f64()),
        }
    }
}

impl PartialEq for Number {
    fn eq(&self, other: &Self) -> bool {
        self.compare(*other) == Ordering::Equal
    }
}

impl PartialOrd for Number {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.compare(*other))
    }
}

macro_rules! number_from {
    ($variant:ident as $target:ty: $($source:ty),*) => {
        $(
            impl From<$source> for Number {
                fn from(n: $source) -> Self {
                    Number::$variant(n as $target)
                }
            }
        )*
    };
}

number_from!(I64 as i64: i8, i16, i32, i64, isize);
number_from!(U64 as u64: u8, u16, u32, u64, usize);
number_from!(F64 as f64: f32, f64);

/// Owned value for dynamically typed properties.
///
/// A property declared with [`Kind::Any`] stores a `Scalar` (usually as
/// `Option<Scalar>`) and reads it back as the matching [`Value`] variant.
/// Filter objects use it to express constraints without committing to the
/// candidate's exact types.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    /// String value.
    String(String),
    /// Enum variant name.
    Enum(&'static str),
    /// Numeric value.
    Number(Number),
    /// Boolean value.
    Bool(bool),
    /// Date and time value.
    DateTime(NaiveDateTime),
}

impl Scalar {
    /// Borrows this scalar as a [`Value`].
    pub fn as_value(&self) -> Value<'_> {
        match self {
            Scalar::String(s) => Value::String(s),
            Scalar::Enum(name) => Value::Enum(name),
            Scalar::Number(n) => Value::Number(*n),
            Scalar::Bool(b) => Value::Bool(*b),
            Scalar::DateTime(dt) => Value::DateTime(*dt),
        }
    }
}

impl From<String> for Scalar {
    fn from(s: String) -> Self {
        Scalar::String(s)
    }
}

impl From<&str> for Scalar {
    fn from(s: &str) -> Self {
        Scalar::String(s.to_string())
    }
}

impl From<bool> for Scalar {
    fn from(b: bool) -> Self {
        Scalar::Bool(b)
    }
}

impl From<NaiveDateTime> for Scalar {
    fn from(dt: NaiveDateTime) -> Self {
        Scalar::DateTime(dt)
    }
}

impl From<Number> for Scalar {
    fn from(n: Number) -> Self {
        Scalar::Number(n)
    }
}

// Request bodies carry untyped JSON scalars. Date-times arrive as strings
// and stay strings.
impl<'de> Deserialize<'de> for Scalar {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct ScalarVisitor;

        impl Visitor<'_> for ScalarVisitor {
            type Value = Scalar;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a string, number or boolean")
            }

            fn visit_bool<E: de::Error>(self, v: bool) -> Result<Scalar, E> {
                Ok(Scalar::Bool(v))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<Scalar, E> {
                Ok(Scalar::from(v))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<Scalar, E> {
                Ok(Scalar::from(v))
            }

            fn visit_f64<E: de::Error>(self, v: f64) -> Result<Scalar, E> {
                Ok(Scalar::from(v))
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Scalar, E> {
                Ok(Scalar::from(v))
            }

            fn visit_string<E: de::Error>(self, v: String) -> Result<Scalar, E> {
                Ok(Scalar::String(v))
            }
        }

        deserializer.deserialize_any(ScalarVisitor)
    }
}

macro_rules! scalar_from_number {
    ($($source:ty),*) => {
        $(
            impl From<$source> for Scalar {
                fn from(n: $source) -> Self {
                    Scalar::Number(Number::from(n))
                }
            }
        )*
    };
}

scalar_from_number!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64);
