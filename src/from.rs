use std::collections::VecDeque;

use time::format_description::well_known::iso8601::Config;
use time::format_description::well_known::iso8601::EncodedConfig;
use time::format_description::well_known::iso8601::FormattedComponents;
use time::format_description::well_known::Iso8601;
use time::format_description::well_known::Rfc3339;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;

use crate::error::DecodeError;
use crate::json::Number;
use crate::json::Parser;
use crate::json::Value;
use crate::shape::Scalar;
use crate::shape::Shape;
use crate::FromJson;

const DATE_TIME_CONFIG: EncodedConfig = Config::DEFAULT
    .set_formatted_components(FormattedComponents::DateTime)
    .encode();

/// ISO 8601 date and time without an offset.
pub(crate) const DATE_TIME: Iso8601<DATE_TIME_CONFIG> = Iso8601::<DATE_TIME_CONFIG>;

pub(crate) const DATE: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");

/// The fraction is optional when parsing. Formatting always writes it.
pub(crate) const TIME: &[BorrowedFormatItem<'static>] =
    format_description!("[hour]:[minute]:[second][optional [.[subsecond]]]");

/// Reads a scalar and converts it with `convert`. A `None` from
/// `convert` becomes a coercion error at the value's position.
fn read_scalar<T: FromJson>(
    p: &mut Parser<'_>,
    convert: impl FnOnce(&Value) -> Option<T>,
) -> Result<T, DecodeError> {
    let shape = T::shape();
    let (position, value) = p.scalar(&shape)?;

    convert(&value).ok_or_else(|| DecodeError::coercion(position, &shape, &value))
}

macro_rules! int_from_json [
    ($($ty:ty),*$(,)?) => {
        $(impl FromJson for $ty {
            fn shape() -> Shape {
                Shape::Unquoted(Scalar::Int)
            }

            fn read_json(p: &mut Parser<'_>) -> Result<Self, DecodeError> {
                read_scalar(p, |value| match value {
                    Value::Number(Number::Int(v)) => <$ty>::try_from(*v).ok(),
                    Value::Number(Number::UInt(v)) => <$ty>::try_from(*v).ok(),
                    _ => None,
                })
            }
        })*
    };
];

int_from_json![u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize];

macro_rules! float_from_json [
    ($($ty:ty),*$(,)?) => {
        $(impl FromJson for $ty {
            fn shape() -> Shape {
                Shape::Unquoted(Scalar::Float)
            }

            fn read_json(p: &mut Parser<'_>) -> Result<Self, DecodeError> {
                read_scalar(p, |value| match value {
                    Value::Number(n) => Some(n.as_f64() as $ty).filter(|v| v.is_finite()),
                    _ => None,
                })
            }
        })*
    };
];

float_from_json![f32, f64];

impl FromJson for bool {
    fn shape() -> Shape {
        Shape::Unquoted(Scalar::Bool)
    }

    fn read_json(p: &mut Parser<'_>) -> Result<Self, DecodeError> {
        read_scalar(p, |value| match value {
            Value::Bool(v) => Some(*v),
            _ => None,
        })
    }
}

/// Implements [FromJson] for quoted scalars, parsing the string with
/// the given function.
macro_rules! quoted_from_json [
    ($($ty:ty => $scalar:ident, $parse:expr);*$(;)?) => {
        $(impl FromJson for $ty {
            fn shape() -> Shape {
                Shape::Quoted(Scalar::$scalar)
            }

            fn read_json(p: &mut Parser<'_>) -> Result<Self, DecodeError> {
                read_scalar(p, |value| match value {
                    Value::String(s) => ($parse)(s.as_str()),
                    _ => None,
                })
            }
        })*
    };
];

quoted_from_json![
    String => Str, |s: &str| Some(s.to_owned());
    char => Char, |s: &str| {
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Some(c),
            _ => None,
        }
    };
    uuid::Uuid => Uuid, |s: &str| uuid::Uuid::parse_str(s).ok();
    time::OffsetDateTime => DateTime, |s: &str| time::OffsetDateTime::parse(s, &Rfc3339).ok();
    time::PrimitiveDateTime => DateTime, |s: &str| time::PrimitiveDateTime::parse(s, &DATE_TIME).ok();
    time::Date => Date, |s: &str| time::Date::parse(s, DATE).ok();
    time::Time => Time, |s: &str| time::Time::parse(s, TIME).ok();
];

/// `null` reads as `None`. Otherwise the value must fit `T`.
impl<T: FromJson> FromJson for Option<T> {
    fn shape() -> Shape {
        T::shape()
    }

    fn read_json(p: &mut Parser<'_>) -> Result<Self, DecodeError> {
        if p.null()? {
            Ok(None)
        } else {
            T::read_json(p).map(Some)
        }
    }
}

impl<T: FromJson> FromJson for Box<T> {
    fn shape() -> Shape {
        T::shape()
    }

    fn read_json(p: &mut Parser<'_>) -> Result<Self, DecodeError> {
        T::read_json(p).map(Box::new)
    }
}

impl<T: FromJson> FromJson for Box<[T]> {
    fn shape() -> Shape {
        Shape::Array(Box::new(T::shape()))
    }

    fn read_json(p: &mut Parser<'_>) -> Result<Self, DecodeError> {
        p.sequence(&Self::shape(), T::read_json)
            .map(Vec::into_boxed_slice)
    }
}

/// The JSON array must have exactly `N` elements.
impl<T: FromJson, const N: usize> FromJson for [T; N] {
    fn shape() -> Shape {
        Shape::Array(Box::new(T::shape()))
    }

    fn read_json(p: &mut Parser<'_>) -> Result<Self, DecodeError> {
        p.peek()?;

        let position = p.position();
        let items = p.sequence(&Self::shape(), T::read_json)?;
        let len = items.len();

        <[T; N]>::try_from(items).map_err(|_| {
            DecodeError::coercion(
                position,
                format_args!("{} of length {}", Self::shape(), N),
                format_args!("array of {}", len),
            )
        })
    }
}

impl<T: FromJson> FromJson for Vec<T> {
    fn shape() -> Shape {
        Shape::Collection(Box::new(T::shape()))
    }

    fn read_json(p: &mut Parser<'_>) -> Result<Self, DecodeError> {
        p.sequence(&Self::shape(), T::read_json)
    }
}

impl<T: FromJson> FromJson for VecDeque<T> {
    fn shape() -> Shape {
        Shape::Collection(Box::new(T::shape()))
    }

    fn read_json(p: &mut Parser<'_>) -> Result<Self, DecodeError> {
        p.sequence(&Self::shape(), T::read_json).map(VecDeque::from)
    }
}
