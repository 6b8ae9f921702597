//! Type classifications.
//!
//! Every type that takes part in encoding or decoding has exactly one
//! [Shape]. Leaves are either quoted (written inside double quotes) or
//! unquoted. Containers carry the shape of their element, so nothing
//! needs to be discovered from a live value.

use std::fmt;

/// The concrete kind of a leaf value.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Scalar {
    Str,
    Char,
    DateTime,
    Date,
    Time,
    Uuid,
    Int,
    Float,
    Bool,
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match self {
            Self::Str => "string",
            Self::Char => "char",
            Self::DateTime => "date-time",
            Self::Date => "date",
            Self::Time => "time",
            Self::Uuid => "uuid",
            Self::Int => "integer",
            Self::Float => "number",
            Self::Bool => "bool",
        })
    }
}

/// The classification of a type.
///
/// * [Quoted](Shape::Quoted): strings, characters, dates and UUIDs.
/// * [Unquoted](Shape::Unquoted): numbers and booleans.
/// * [Array](Shape::Array): a fixed-size homogeneous sequence.
/// * [Collection](Shape::Collection): a growable sequence with one element type.
/// * [Composite](Shape::Composite): an object with its own descriptor.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Shape {
    Quoted(Scalar),
    Unquoted(Scalar),
    Array(Box<Shape>),
    Collection(Box<Shape>),
    Composite(&'static str),
}

/// Displays a short label, e.g. `list of object Address`.
impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Quoted(s) | Self::Unquoted(s) => s.fmt(f),
            Self::Array(elem) => write!(f, "array of {}", elem),
            Self::Collection(elem) => write!(f, "list of {}", elem),
            Self::Composite(name) => write!(f, "object {}", name),
        }
    }
}
