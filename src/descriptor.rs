//! Static descriptions of composite types.

use std::any::Any;

use crate::error::DecodeError;
use crate::json::Parser;
use crate::shape::Shape;
use crate::ToJson;

/// The serializable members of a composite type, in declaration order.
///
/// Descriptors are usually generated by
/// [derive::Json](crate::derive::Json) as `static` values, so they
/// are built once and never change.
pub struct TypeDescriptor<T: 'static> {
    /// The type name, used in shapes and log events.
    pub name: &'static str,

    pub members: &'static [Member<T>],

    /// Creates the instance that decoded members are assigned into.
    pub new: fn() -> T,
}

/// One named, typed member of a composite.
pub struct Member<T: 'static> {
    /// The JSON key.
    pub name: &'static str,

    /// Returns the member's classification. Resolved statically from
    /// the member type.
    pub shape: fn() -> Shape,

    pub get: fn(&T) -> &dyn ToJson,

    /// Reads the member's value from the parser and assigns it.
    pub set: fn(&mut T, &mut Parser<'_>) -> Result<(), DecodeError>,
}

impl<T: 'static> TypeDescriptor<T> {
    /// Finds the member for a JSON key. Matching ignores case, and the
    /// first matching member in declaration order wins.
    pub fn member(&self, key: &str) -> Option<&Member<T>> {
        self.members.iter().find(|m| eq_ignore_case(m.name, key))
    }

    /// The shape of composites described by this.
    pub fn shape(&self) -> Shape {
        Shape::Composite(self.name)
    }
}

fn eq_ignore_case(a: &str, b: &str) -> bool {
    if a.is_ascii() && b.is_ascii() {
        return a.eq_ignore_ascii_case(b);
    }

    a.chars()
        .flat_map(char::to_lowercase)
        .eq(b.chars().flat_map(char::to_lowercase))
}

/// A type-erased [TypeDescriptor], for decoding when the target type
/// is only known at runtime. The caller downcasts the result.
pub trait AnyDescriptor: Sync {
    fn type_name(&self) -> &'static str;

    fn decode_any(&self, parser: &mut Parser<'_>) -> Result<Box<dyn Any>, DecodeError>;
}

impl<T: 'static> AnyDescriptor for TypeDescriptor<T> {
    fn type_name(&self) -> &'static str {
        self.name
    }

    fn decode_any(&self, parser: &mut Parser<'_>) -> Result<Box<dyn Any>, DecodeError> {
        parser
            .parse_object(self)
            .map(|value| Box::new(value) as Box<dyn Any>)
    }
}
