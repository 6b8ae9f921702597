use std::fmt;

/// A JSON number, as lexed. Integers are kept exact.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Number {
    Int(i128),
    /// Only for integers above `i128::MAX`.
    UInt(u128),
    Float(f64),
}

impl Number {
    pub fn as_f64(&self) -> f64 {
        match self {
            Self::Int(v) => *v as f64,
            Self::UInt(v) => *v as f64,
            Self::Float(v) => *v,
        }
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Int(v) => v.fmt(f),
            Self::UInt(v) => v.fmt(f),
            Self::Float(v) => v.fmt(f),
        }
    }
}

/// An untyped JSON value.
///
/// The decoder produces these for scalars before converting them to
/// the member type, and for values of keys that no member claims.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    Array(Vec<Value>),
    Object(Vec<(String, Value)>),
}

impl Value {
    /// The JSON type name.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "boolean",
            Self::Number(_) => "number",
            Self::String(_) => "string",
            Self::Array(_) => "array",
            Self::Object(_) => "object",
        }
    }
}

/// Describes the value for error messages, e.g. `string "abc"` or
/// `array of 3`. Long strings are cut.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        const MAX_CHARS: usize = 32;

        let kind = self.kind();

        match self {
            Self::Null | Self::Object(_) => f.write_str(kind),
            Self::Bool(v) => write!(f, "{} {}", kind, v),
            Self::Number(v) => write!(f, "{} {}", kind, v),
            Self::String(s) if s.chars().count() > MAX_CHARS => {
                let cut: String = s.chars().take(MAX_CHARS).collect();
                write!(f, "{} {:?}...", kind, cut)
            }
            Self::String(s) => write!(f, "{} {:?}", kind, s),
            Self::Array(items) => write!(f, "{} of {}", kind, items.len()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_display() {
        let cases = vec![
            (Value::Null, "null"),
            (Value::Bool(false), "boolean false"),
            (Value::Number(Number::Int(-3)), "number -3"),
            (Value::Number(Number::Float(2.5)), "number 2.5"),
            (
                Value::Number(Number::UInt(u128::MAX)),
                "number 340282366920938463463374607431768211455",
            ),
            (Value::String("abc".to_owned()), "string \"abc\""),
            (
                Value::String("x".repeat(40)),
                "string \"xxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxx\"...",
            ),
            (Value::Array(vec![Value::Null, Value::Null]), "array of 2"),
            (Value::Object(vec![]), "object"),
        ];

        for (value, want) in cases {
            assert_eq!(value.to_string(), want);
        }
    }
}
