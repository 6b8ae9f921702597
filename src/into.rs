use std::collections::VecDeque;

use time::format_description::well_known::Rfc3339;

use crate::error::EncodeError;
use crate::from::DATE;
use crate::from::DATE_TIME;
use crate::from::TIME;
use crate::json::JsonWriter;
use crate::ToJson;

macro_rules! unquoted_to_json [
    ($($ty:ty),*$(,)?) => {
        $(impl ToJson for $ty {
            fn write_json(&self, w: &mut JsonWriter<'_>) -> Result<(), EncodeError> {
                w.unquoted(self)
            }
        })*
    };
];

unquoted_to_json![bool, u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize];

impl ToJson for f32 {
    fn write_json(&self, w: &mut JsonWriter<'_>) -> Result<(), EncodeError> {
        w.float(f64::from(*self), self)
    }
}

impl ToJson for f64 {
    fn write_json(&self, w: &mut JsonWriter<'_>) -> Result<(), EncodeError> {
        w.float(*self, self)
    }
}

impl ToJson for str {
    fn write_json(&self, w: &mut JsonWriter<'_>) -> Result<(), EncodeError> {
        w.string(self)
    }
}

impl ToJson for String {
    fn write_json(&self, w: &mut JsonWriter<'_>) -> Result<(), EncodeError> {
        w.string(self)
    }
}

impl ToJson for char {
    fn write_json(&self, w: &mut JsonWriter<'_>) -> Result<(), EncodeError> {
        w.string(self.encode_utf8(&mut [0; 4]))
    }
}

/// Writes the hyphenated lowercase form.
impl ToJson for uuid::Uuid {
    fn write_json(&self, w: &mut JsonWriter<'_>) -> Result<(), EncodeError> {
        w.quoted(&self.hyphenated())
    }
}

/// Writes RFC 3339, e.g. `2025-01-30T14:28:56Z`.
impl ToJson for time::OffsetDateTime {
    fn write_json(&self, w: &mut JsonWriter<'_>) -> Result<(), EncodeError> {
        let s = self.format(&Rfc3339).map_err(EncodeError::unsupported)?;
        w.string(&s)
    }
}

/// Writes ISO 8601 without an offset.
impl ToJson for time::PrimitiveDateTime {
    fn write_json(&self, w: &mut JsonWriter<'_>) -> Result<(), EncodeError> {
        let s = self.format(&DATE_TIME).map_err(EncodeError::unsupported)?;
        w.string(&s)
    }
}

impl ToJson for time::Date {
    fn write_json(&self, w: &mut JsonWriter<'_>) -> Result<(), EncodeError> {
        let s = self.format(DATE).map_err(EncodeError::unsupported)?;
        w.string(&s)
    }
}

/// Writes the time of day, e.g. `14:28:56.0`.
impl ToJson for time::Time {
    fn write_json(&self, w: &mut JsonWriter<'_>) -> Result<(), EncodeError> {
        let s = self.format(TIME).map_err(EncodeError::unsupported)?;
        w.string(&s)
    }
}

impl<T: ToJson> ToJson for Option<T> {
    fn write_json(&self, w: &mut JsonWriter<'_>) -> Result<(), EncodeError> {
        match self {
            Some(v) => v.write_json(w),
            None => w.null(),
        }
    }
}

impl<T: ToJson + ?Sized> ToJson for &T {
    fn write_json(&self, w: &mut JsonWriter<'_>) -> Result<(), EncodeError> {
        (**self).write_json(w)
    }
}

impl<T: ToJson + ?Sized> ToJson for Box<T> {
    fn write_json(&self, w: &mut JsonWriter<'_>) -> Result<(), EncodeError> {
        (**self).write_json(w)
    }
}

impl<T: ToJson> ToJson for [T] {
    fn write_json(&self, w: &mut JsonWriter<'_>) -> Result<(), EncodeError> {
        w.array(self.iter())
    }
}

impl<T: ToJson, const N: usize> ToJson for [T; N] {
    fn write_json(&self, w: &mut JsonWriter<'_>) -> Result<(), EncodeError> {
        w.array(self.iter())
    }
}

impl<T: ToJson> ToJson for Vec<T> {
    fn write_json(&self, w: &mut JsonWriter<'_>) -> Result<(), EncodeError> {
        w.array(self.iter())
    }
}

impl<T: ToJson> ToJson for VecDeque<T> {
    fn write_json(&self, w: &mut JsonWriter<'_>) -> Result<(), EncodeError> {
        w.array(self.iter())
    }
}

#[cfg(test)]
mod tests {
    use time::macros::date;
    use time::macros::datetime;
    use time::macros::time;

    use super::*;

    fn to_json<T: ToJson + ?Sized>(v: &T) -> String {
        let mut got = String::new();
        v.write_json(&mut JsonWriter::new(&mut got)).unwrap();
        got
    }

    #[test]
    fn test_unquoted_to_json() {
        assert_eq!(to_json(&true), "true");
        assert_eq!(to_json(&false), "false");
        assert_eq!(to_json(&42u8), "42");
        assert_eq!(to_json(&-42i64), "-42");
        assert_eq!(to_json(&u128::MAX), "340282366920938463463374607431768211455");
        assert_eq!(to_json(&1.5f32), "1.5");
        assert_eq!(to_json(&0.1f64), "0.1");
        assert_eq!(to_json(&3.0f64), "3");
    }

    #[test]
    fn test_quoted_to_json() {
        assert_eq!(to_json("hi"), r#""hi""#);
        assert_eq!(to_json(&"a\"b".to_owned()), r#""a\"b""#);
        assert_eq!(to_json(&'é'), r#""é""#);
        assert_eq!(
            to_json(&uuid::Uuid::from_u128(0x3fa85f64_5717_4562_b3fc_2c963f66afa6)),
            r#""3fa85f64-5717-4562-b3fc-2c963f66afa6""#
        );
        assert_eq!(
            to_json(&datetime!(2025-01-30 14:28:56 UTC)),
            r#""2025-01-30T14:28:56Z""#
        );
        assert_eq!(to_json(&date!(2025 - 01 - 30)), r#""2025-01-30""#);
        assert_eq!(
            to_json(&datetime!(2025-01-30 14:28:56)),
            r#""2025-01-30T14:28:56.000000000""#
        );
        assert_eq!(to_json(&time!(14:28:56)), r#""14:28:56.0""#);
        assert_eq!(to_json(&time!(8:00:00.25)), r#""08:00:00.25""#);
    }

    #[test]
    fn test_containers_to_json() {
        assert_eq!(to_json(&Some(1)), "1");
        assert_eq!(to_json(&None::<i32>), "null");
        assert_eq!(to_json(&vec!["a", "b"]), r#"["a","b"]"#);
        assert_eq!(to_json(&Vec::<u32>::new()), "[]");
        assert_eq!(to_json(&[1, 2, 3]), "[1,2,3]");
        assert_eq!(to_json(&VecDeque::from(vec![true])), "[true]");
        assert_eq!(
            to_json(&vec![vec![1], vec![], vec![2, 3]].into_boxed_slice()),
            "[[1],[],[2,3]]"
        );
        assert_eq!(to_json(&vec![Some(1), None]), "[1,null]");
    }
}
