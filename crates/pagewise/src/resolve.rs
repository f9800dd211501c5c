//! Resolution of property names to accessors.
//!
//! [`resolve`] searches a type's own properties first and then its ancestors,
//! returning an [`Accessor`] that remembers at which level the property was
//! found. Absence is not an error; callers decide whether it is fatal.

use crate::error::AccessError;
use crate::traits::{Inspect, Property, Shape};
use crate::value::{Kind, Value};

/// A property resolved on a type, ready to be read from instances.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Accessor {
    property: &'static Property,
    depth: usize,
}

impl Accessor {
    /// The property name.
    pub fn name(&self) -> &'static str {
        self.property.name
    }

    /// The declared kind.
    pub fn kind(&self) -> Kind {
        self.property.kind
    }

    /// Number of ancestor links between the resolved type and the level
    /// declaring the property. `0` means declared on the type itself.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Returns `true` if the accessor can be used as a sort column.
    pub fn is_comparable(&self) -> bool {
        self.kind().is_comparable()
    }

    /// Reads the property from an item of the resolved type.
    pub fn read<'a>(&self, item: &'a dyn Inspect) -> Result<Value<'a>, AccessError> {
        let mut level = item;
        for _ in 0..self.depth {
            level = level.ancestor().ok_or(AccessError::MissingAncestor {
                property: self.name(),
                type_name: level.shape().type_name,
            })?;
        }

        let value = level.read(self.name()).ok_or(AccessError::Undeclared {
            property: self.name(),
            type_name: level.shape().type_name,
        })?;

        match value.kind() {
            Some(actual) if !self.kind().admits(&value) => Err(AccessError::KindMismatch {
                property: self.name(),
                declared: self.kind(),
                actual,
            }),
            _ => Ok(value),
        }
    }
}

/// Resolves `name` on `shape`, falling back through its ancestors.
///
/// The most-derived declaration wins.
///
/// # Example
///
/// ```
/// use pagewise::{resolve, Kind, Property, Shape};
///
/// static BASE: Shape = Shape {
///     type_name: "Base",
///     properties: &[Property::new("id", Kind::Number)],
///     ancestor: None,
/// };
/// static ITEM: Shape = Shape {
///     type_name: "Item",
///     properties: &[Property::new("name", Kind::String)],
///     ancestor: Some(&BASE),
/// };
///
/// let id = resolve(&ITEM, "id").unwrap();
/// assert_eq!(id.depth(), 1);
/// assert!(resolve(&ITEM, "missing").is_none());
/// ```
pub fn resolve(shape: &'static Shape, name: &str) -> Option<Accessor> {
    shape
        .lineage()
        .enumerate()
        .find_map(|(depth, level)| {
            level
                .declared(name)
                .map(|property| Accessor { property, depth })
        })
}

/// Resolves `name` and accepts the result only if it is comparable.
pub fn resolve_comparable(shape: &'static Shape, name: &str) -> Option<Accessor> {
    resolve(shape, name).filter(Accessor::is_comparable)
}
