//! The property model of a record type.
//!
//! A [`Model`] lists its [`Property`] entries: a name, a declared type and a
//! pair of erased accessors. Contracts and the model codec work only through
//! this list. `#[derive(Model)]` writes it for named-field structs; a manual
//! implementation looks like:
//!
//! ```
//! use core::any::Any;
//! use tri_optional::Optional;
//! use tri_optional::info::Declared;
//! use tri_optional::model::{Model, Property};
//!
//! #[derive(Default)]
//! struct Point {
//!     x: Optional<i32>,
//! }
//!
//! fn get_x(point: &Point) -> &dyn Any {
//!     &point.x
//! }
//!
//! fn set_x(point: &mut Point, value: Box<dyn Any>) -> Result<(), Box<dyn Any>> {
//!     point.x = *value.downcast::<Optional<i32>>()?;
//!     Ok(())
//! }
//!
//! impl Model for Point {
//!     fn type_path() -> &'static str {
//!         "doc::Point"
//!     }
//!     fn type_ident() -> &'static str {
//!         "Point"
//!     }
//!     fn properties() -> &'static [Property<Self>] {
//!         static PROPERTIES: [Property<Point>; 1] =
//!             [Property::new("x", <Optional<i32>>::declared_type, get_x, set_x)];
//!         &PROPERTIES
//!     }
//! }
//!
//! let mut point = Point::default();
//! let x = Point::property("x").unwrap();
//!
//! x.set(&mut point, Box::new(Optional::present(4))).unwrap();
//! assert_eq!(point.x, Optional::present(4));
//! assert!(x.set(&mut point, Box::new(4_i32)).is_err());
//! ```

use core::any::Any;
use core::fmt;

use crate::ConfigError;
use crate::info::DeclaredType;

// -----------------------------------------------------------------------------
// Property

/// One property of a model `M`.
pub struct Property<M> {
    name: &'static str,
    declared: fn() -> &'static DeclaredType,
    get: fn(&M) -> &dyn Any,
    set: fn(&mut M, Box<dyn Any>) -> Result<(), Box<dyn Any>>,
}

impl<M> Property<M> {
    /// Creates a property; usable in `static` items.
    ///
    /// `get` must return the field as its declared type, and `set` must
    /// accept exactly that type, handing anything else back.
    pub const fn new(
        name: &'static str,
        declared: fn() -> &'static DeclaredType,
        get: fn(&M) -> &dyn Any,
        set: fn(&mut M, Box<dyn Any>) -> Result<(), Box<dyn Any>>,
    ) -> Self {
        Self {
            name,
            declared,
            get,
            set,
        }
    }

    /// The property name, also its JSON key.
    #[inline]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    #[inline]
    pub fn declared(&self) -> &'static DeclaredType {
        (self.declared)()
    }

    /// Reads the property from `model`.
    #[inline]
    pub fn get<'a>(&self, model: &'a M) -> &'a dyn Any {
        (self.get)(model)
    }
}

impl<M: Model> Property<M> {
    /// Writes the property on `model`.
    ///
    /// Fails with [`ConfigError::AccessorMismatch`] if `value` is not of the
    /// declared type; the field is left as it was.
    pub fn set(&self, model: &mut M, value: Box<dyn Any>) -> Result<(), ConfigError> {
        (self.set)(model, value).map_err(|_| ConfigError::AccessorMismatch {
            model: M::type_path(),
            property: self.name,
            expected: self.declared().type_path(),
        })
    }

    /// Like [`set`](Self::set), but `None` leaves the field untouched.
    pub fn set_value(&self, model: &mut M, value: Option<Box<dyn Any>>) -> Result<(), ConfigError> {
        match value {
            Some(value) => self.set(model, value),
            None => Ok(()),
        }
    }
}

impl<M> fmt::Debug for Property<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Property")
            .field("name", &self.name)
            .field("declared", &self.declared().type_path())
            .finish_non_exhaustive()
    }
}

// -----------------------------------------------------------------------------
// Model

/// A record type with a fixed list of properties.
///
/// `Default` provides the starting point of decoding: every optional field
/// unspecified.
pub trait Model: Default + 'static {
    /// Fully qualified name, used in errors.
    fn type_path() -> &'static str;

    /// Bare type name, used as the serde struct name.
    fn type_ident() -> &'static str;

    /// The properties, in declaration order.
    fn properties() -> &'static [Property<Self>];

    /// Looks up a property by name.
    fn property(name: &str) -> Option<&'static Property<Self>> {
        Self::properties().iter().find(|property| property.name() == name)
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(all(test, feature = "derive"))]
mod tests {
    use super::Model;
    use crate::derive::Model;
    use crate::{ConfigError, Optional};

    #[derive(Model, Default, Debug, PartialEq)]
    struct Record {
        count: Optional<Option<i32>>,
        label: String,
        #[model(skip)]
        scratch: u8,
    }

    #[test]
    fn derived_properties_in_order() {
        let names: Vec<_> = Record::properties().iter().map(|p| p.name()).collect();

        assert_eq!(names, ["count", "label"]);
        assert!(Record::property("scratch").is_none());
        assert_eq!(<Record as Model>::type_ident(), "Record");
        assert!(<Record as Model>::type_path().ends_with("::Record"));
    }

    #[test]
    fn accessors_read_and_write_fields() {
        let mut record = Record::default();
        let count = Record::property("count").unwrap();

        count.set(&mut record, Box::new(Optional::<Option<i32>>::null())).unwrap();
        assert_eq!(record.count, Optional::null());

        let read = count.get(&record).downcast_ref::<Optional<Option<i32>>>();
        assert_eq!(read, Some(&Optional::null()));
        assert_eq!(record.scratch, 0);
    }

    #[test]
    fn accessor_rejects_foreign_values() {
        let mut record = Record {
            count: Optional::non_null(1),
            ..Record::default()
        };
        let count = Record::property("count").unwrap();

        let err = count.set(&mut record, Box::new(1_i32)).unwrap_err();
        assert!(matches!(err, ConfigError::AccessorMismatch { property: "count", .. }));
        assert_eq!(record.count, Optional::non_null(1));
    }

    #[test]
    fn set_value_skips_none() {
        let mut record = Record {
            label: "kept".to_owned(),
            ..Record::default()
        };
        let label = Record::property("label").unwrap();

        label.set_value(&mut record, None).unwrap();
        assert_eq!(record.label, "kept");

        label.set_value(&mut record, Some(Box::new("new".to_owned()))).unwrap();
        assert_eq!(record.label, "new");
    }
}
