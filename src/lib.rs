//! typejson converts between Rust values and JSON text without a
//! general-purpose JSON library. Encoding walks a value's
//! [TypeDescriptor] and writes compact JSON. Decoding walks the text
//! with a single forward-moving cursor and builds the value member by
//! member, using the same descriptor to find the target type of each
//! key.
//!
//! ## Data Model
//!
//! Every supported type has a [Shape](shape::Shape):
//!
//! * quoted scalars: `String`, `char`, [uuid::Uuid], and the `time`
//!   date types,
//! * unquoted scalars: integers, floats and `bool`,
//! * arrays: `[T; N]` and `Box<[T]>`,
//! * collections: `Vec<T>` and `VecDeque<T>`,
//! * composites: structs deriving [derive::Json].
//!
//! `Option<T>` has the shape of `T`, and maps `None` to `null`.
//!
//! ## Example
//!
//! ```
//! use typejson::derive::Json;
//!
//! #[derive(Debug, Default, Json, PartialEq)]
//! #[json(rename_all = "PascalCase")]
//! struct Item {
//!     id: i32,
//!     name: String,
//! }
//!
//! let item = Item { id: 1, name: "Test".to_owned() };
//! let json = typejson::serialize(&item).unwrap();
//! assert_eq!(json, r#"{"Id":1,"Name":"Test"}"#);
//!
//! let back: Item = typejson::deserialize(r#"{"NAME": "Test", "id": 1}"#).unwrap();
//! assert_eq!(back, item);
//! ```
//!
//! Keys are matched ignoring case, and keys without a member are
//! skipped. Decoding fails on the first error; there are no partial
//! results.

extern crate self as typejson;

use std::any::Any;
use std::fmt;

use tracing::debug;

pub mod derive {
    pub use typejson_derive::Json;
}

mod descriptor;
pub use descriptor::AnyDescriptor;
pub use descriptor::Member;
pub use descriptor::TypeDescriptor;

mod error;
pub use error::DecodeError;
pub use error::EncodeError;
pub use error::Error;
pub use error::FormatErrorKind;

mod from;
mod into;

pub mod json;
use json::JsonWriter;
use json::Parser;

pub mod options;
pub use options::DecodeOptions;

pub mod shape;
use shape::Shape;

/// Writes a value as JSON.
///
/// Implemented for scalars and containers by this crate, and for
/// composites by [derive::Json].
pub trait ToJson {
    fn write_json(&self, w: &mut JsonWriter<'_>) -> Result<(), EncodeError>;
}

/// Reads a value from JSON.
///
/// Implementations consume exactly one JSON value from the parser.
pub trait FromJson: Sized {
    /// The classification of this type.
    fn shape() -> Shape;

    fn read_json(p: &mut Parser<'_>) -> Result<Self, DecodeError>;
}

/// A type encoded as a JSON object, described by a static
/// [TypeDescriptor].
pub trait Composite: Sized + 'static {
    fn descriptor() -> &'static TypeDescriptor<Self>;
}

/// Encodes a composite as compact JSON.
pub fn serialize<T: Composite>(value: &T) -> Result<String, EncodeError> {
    let mut out = String::new();
    serialize_into(&mut out, value)?;

    Ok(out)
}

/// Like [serialize], but appends to `out`.
pub fn serialize_into<W: fmt::Write, T: Composite>(
    out: &mut W,
    value: &T,
) -> Result<(), EncodeError> {
    debug!(type_name = T::descriptor().name, "serializing");

    JsonWriter::new(out)
        .object(value)
        .inspect_err(|err| debug!(%err, "serialize failed"))
}

/// Decodes JSON text into a composite, using the [STRICT](options::STRICT) options.
pub fn deserialize<T: Composite>(json: &str) -> Result<T, DecodeError> {
    deserialize_with(json, options::STRICT)
}

/// Decodes JSON text into a composite.
pub fn deserialize_with<T: Composite>(
    json: &str,
    options: &DecodeOptions,
) -> Result<T, DecodeError> {
    let descriptor = T::descriptor();
    debug!(type_name = descriptor.name, len = json.len(), "deserializing");

    Parser::new(json, options)
        .document(|p| p.parse_object(descriptor))
        .inspect_err(|err| debug!(%err, "deserialize failed"))
}

/// Decodes JSON text into the type of a runtime-selected descriptor.
/// The caller downcasts the result.
///
/// ```
/// use typejson::derive::Json;
/// use typejson::Composite;
///
/// #[derive(Default, Json)]
/// struct Flag {
///     on: bool,
/// }
///
/// let any = typejson::deserialize_as(r#"{"on":true}"#, Flag::descriptor()).unwrap();
/// assert!(any.downcast::<Flag>().unwrap().on);
/// ```
pub fn deserialize_as(
    json: &str,
    descriptor: &dyn AnyDescriptor,
) -> Result<Box<dyn Any>, DecodeError> {
    debug!(type_name = descriptor.type_name(), len = json.len(), "deserializing");

    Parser::new(json, options::STRICT)
        .document(|p| descriptor.decode_any(p))
        .inspect_err(|err| debug!(%err, "deserialize failed"))
}
