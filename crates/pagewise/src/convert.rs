//! Conversion of request strings into fieldless enums.
//!
//! An enum implementing [`PropertyEnum`] may designate a wire value per
//! variant. Conversion matches wire values first and optionally falls back
//! to variant names, as configured by [`PropertyEnum::CONVERSION`].

use serde::{Deserialize, Deserializer};

use crate::error::ConvertError;

/// Conversion settings for a [`PropertyEnum`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Conversion {
    /// Match wire values without regard to case.
    pub ignore_case: bool,
    /// Retry with an exact variant-name match when no wire value matches.
    pub name_if_no_match: bool,
}

impl Conversion {
    /// Case-insensitive wire-value matching, no name fallback.
    pub const DEFAULT: Conversion = Conversion {
        ignore_case: true,
        name_if_no_match: false,
    };
}

impl Default for Conversion {
    fn default() -> Self {
        Conversion::DEFAULT
    }
}

/// A fieldless enum convertible from request strings.
///
/// Normally derived with `#[derive(PropertyEnum)]`:
///
/// ```
/// use pagewise::{parse_enum, PropertyEnum};
///
/// #[derive(Debug, Clone, Copy, PartialEq, PropertyEnum)]
/// #[property_enum(name_if_no_match)]
/// enum Status {
///     #[property_enum(value = "on")]
///     Active,
///     #[property_enum(value = "off")]
///     Inactive,
/// }
///
/// assert_eq!(parse_enum::<Status>("ON").unwrap(), Some(Status::Active));
/// assert_eq!(parse_enum::<Status>("Inactive").unwrap(), Some(Status::Inactive));
/// assert_eq!(parse_enum::<Status>("").unwrap(), None);
/// assert!(parse_enum::<Status>("paused").is_err());
/// ```
pub trait PropertyEnum: Sized + Copy + 'static {
    /// All variants, in declaration order.
    const VARIANTS: &'static [Self];

    /// Conversion settings.
    const CONVERSION: Conversion = Conversion::DEFAULT;

    /// Name of the enum type, used in error messages.
    const TYPE_NAME: &'static str;

    /// The variant name.
    fn name(&self) -> &'static str;

    /// The designated wire value, if any.
    fn wire_value(&self) -> Option<&'static str> {
        None
    }
}

/// Converts `source` into a variant of `E`.
///
/// - An empty source converts to `None`.
/// - If no variant designates a wire value, the source must be an exact
///   variant name.
/// - Otherwise wire values are matched (case-insensitively unless
///   configured otherwise), then variant names if `name_if_no_match` is set.
pub fn parse_enum<E: PropertyEnum>(source: &str) -> Result<Option<E>, ConvertError> {
    if source.is_empty() {
        return Ok(None);
    }

    let by_name = || E::VARIANTS.iter().copied().find(|v| v.name() == source);

    let found = if E::VARIANTS.iter().all(|v| v.wire_value().is_none()) {
        by_name()
    } else {
        let conversion = E::CONVERSION;
        let by_value = E::VARIANTS.iter().copied().find(|v| {
            v.wire_value().is_some_and(|value| {
                if conversion.ignore_case {
                    value.to_lowercase() == source.to_lowercase()
                } else {
                    value == source
                }
            })
        });
        match by_value {
            Some(variant) => Some(variant),
            None if conversion.name_if_no_match => by_name(),
            None => None,
        }
    };

    found.map(Some).ok_or_else(|| ConvertError::InvalidValue {
        value: source.to_string(),
        type_name: E::TYPE_NAME,
    })
}

/// Deserializes an optional [`PropertyEnum`] from a string with
/// [`parse_enum`]. A missing or empty string becomes `None`.
///
/// ```
/// use pagewise::{deserialize_enum, PropertyEnum};
/// use serde::Deserialize;
///
/// #[derive(Debug, Clone, Copy, PartialEq, PropertyEnum)]
/// enum Level {
///     Low,
///     High,
/// }
///
/// #[derive(Deserialize)]
/// struct Query {
///     #[serde(default, deserialize_with = "deserialize_enum")]
///     level: Option<Level>,
/// }
///
/// let query: Query = serde_json::from_str(r#"{"level": "High"}"#).unwrap();
/// assert_eq!(query.level, Some(Level::High));
/// ```
pub fn deserialize_enum<'de, D, E>(deserializer: D) -> Result<Option<E>, D::Error>
where
    D: Deserializer<'de>,
    E: PropertyEnum,
{
    let source: Option<String> = Option::deserialize(deserializer)?;
    match source {
        None => Ok(None),
        Some(source) => parse_enum(&source).map_err(serde::de::Error::custom),
    }
}
