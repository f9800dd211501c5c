//! Error types for the pagewise crate.

use thiserror::Error;

use crate::value::Kind;

/// Errors surfaced to callers of the sort and conversion operations.
///
/// Both variants describe a bad request rather than a fault.
#[derive(Debug, Error)]
pub enum Error {
    /// The requested sort property resolves to no comparable accessor and
    /// no custom comparator is registered for it.
    #[error("invalid sort field: '{property}'")]
    UnknownSortProperty { property: String },

    /// A request value could not be converted.
    #[error(transparent)]
    Convert(#[from] ConvertError),
}

impl Error {
    /// Create an unknown sort property error.
    pub fn unknown_sort_property(property: impl Into<String>) -> Self {
        Self::UnknownSortProperty {
            property: property.into(),
        }
    }
}

/// Failure to convert a string into a typed request value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConvertError {
    /// A string does not name any variant of the target enum.
    #[error("invalid value '{value}' for {type_name}")]
    InvalidValue {
        value: String,
        type_name: &'static str,
    },
}

/// Failure to read a property through a resolved accessor.
///
/// These never escape a sort: the affected pair is treated as equal and the
/// failure is logged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AccessError {
    /// The item has no parent at the depth the property was resolved at.
    #[error("'{property}' is declared on an ancestor that {type_name} does not carry")]
    MissingAncestor {
        property: &'static str,
        type_name: &'static str,
    },

    /// The item does not declare the property at the expected level.
    #[error("{type_name} does not declare '{property}'")]
    Undeclared {
        property: &'static str,
        type_name: &'static str,
    },

    /// The value read does not have the declared kind.
    #[error("'{property}' is declared as {declared} but produced a {actual} value")]
    KindMismatch {
        property: &'static str,
        declared: Kind,
        actual: Kind,
    },
}

/// Result type for pagewise operations.
pub type Result<T> = std::result::Result<T, Error>;
