use std::fmt;

use thiserror::Error;

/// What was wrong with the JSON text at the failing position.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum FormatErrorKind {
    #[error("unexpected end of input")]
    UnexpectedEnd,

    #[error("expected {expected}, found {found:?}")]
    Expected {
        expected: &'static str,
        found: char,
    },

    #[error("invalid literal, expected `{0}`")]
    InvalidLiteral(&'static str),

    #[error("invalid number {0:?}")]
    InvalidNumber(String),

    #[error("invalid escape sequence")]
    InvalidEscape,

    #[error("unescaped control character in string")]
    ControlCharacter,

    #[error("trailing characters after the document")]
    TrailingCharacters,
}

/// The error returned when decoding JSON text.
///
/// Positions are byte offsets into the source text.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum DecodeError {
    /// The text violates the JSON grammar.
    #[error("invalid JSON at offset {position}: {kind}")]
    Format {
        position: usize,
        kind: FormatErrorKind,
    },

    /// A syntactically valid value doesn't fit the declared member type.
    #[error("cannot convert {found} at offset {position} into {expected}{}", DisplayPath(.path))]
    TypeCoercion {
        position: usize,
        path: String,
        expected: String,
        found: String,
    },

    /// Objects and arrays are nested deeper than allowed.
    #[error("nesting deeper than {limit} at offset {position}")]
    DepthLimit { position: usize, limit: usize },
}

impl DecodeError {
    pub(crate) fn format(position: usize, kind: FormatErrorKind) -> Self {
        Self::Format { position, kind }
    }

    pub(crate) fn coercion(
        position: usize,
        expected: impl fmt::Display,
        found: impl fmt::Display,
    ) -> Self {
        Self::TypeCoercion {
            position,
            path: String::new(),
            expected: expected.to_string(),
            found: found.to_string(),
        }
    }

    /// The byte offset where decoding failed.
    pub fn position(&self) -> usize {
        match self {
            Self::Format { position, .. } => *position,
            Self::TypeCoercion { position, .. } => *position,
            Self::DepthLimit { position, .. } => *position,
        }
    }

    /// The dotted member path of a coercion failure, e.g. `Addresses[1].City`.
    pub fn path(&self) -> Option<&str> {
        match self {
            Self::TypeCoercion { path, .. } => Some(path.as_str()),
            _ => None,
        }
    }

    pub(crate) fn in_member(mut self, name: &str) -> Self {
        if let Self::TypeCoercion { path, .. } = &mut self {
            prefix_member(path, name);
        }

        self
    }

    pub(crate) fn at_index(mut self, index: usize) -> Self {
        if let Self::TypeCoercion { path, .. } = &mut self {
            prefix_index(path, index);
        }

        self
    }
}

/// The error returned when encoding a value.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum EncodeError {
    /// The value has no JSON representation.
    #[error("unsupported type{}: {reason}", DisplayPath(.path))]
    UnsupportedType { path: String, reason: String },

    /// The string formatter (or I/O) failed.
    #[error(transparent)]
    Fmt(#[from] fmt::Error),
}

impl EncodeError {
    pub(crate) fn unsupported(reason: impl fmt::Display) -> Self {
        Self::UnsupportedType {
            path: String::new(),
            reason: reason.to_string(),
        }
    }

    /// The dotted member path of the offending value.
    pub fn path(&self) -> Option<&str> {
        match self {
            Self::UnsupportedType { path, .. } => Some(path.as_str()),
            Self::Fmt(_) => None,
        }
    }

    pub(crate) fn in_member(mut self, name: &str) -> Self {
        if let Self::UnsupportedType { path, .. } = &mut self {
            prefix_member(path, name);
        }

        self
    }

    pub(crate) fn at_index(mut self, index: usize) -> Self {
        if let Self::UnsupportedType { path, .. } = &mut self {
            prefix_index(path, index);
        }

        self
    }
}

/// Either direction's error, for callers that want a single type.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Encode(#[from] EncodeError),

    #[error(transparent)]
    Decode(#[from] DecodeError),
}

fn prefix_member(path: &mut String, name: &str) {
    if !path.is_empty() && !path.starts_with('[') {
        path.insert(0, '.');
    }
    path.insert_str(0, name);
}

fn prefix_index(path: &mut String, index: usize) {
    if !path.is_empty() && !path.starts_with('[') {
        path.insert(0, '.');
    }
    path.insert_str(0, &format!("[{}]", index));
}

/// Renders ` in member `a.b`` for non-empty paths.
struct DisplayPath<'a>(&'a String);

impl fmt::Display for DisplayPath<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.0.is_empty() {
            Ok(())
        } else {
            write!(f, " in member `{}`", self.0)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_prefixing() {
        let err = DecodeError::coercion(7, "date-time", "string \"x\"")
            .in_member("City")
            .at_index(1)
            .in_member("Addresses");
        assert_eq!(err.path(), Some("Addresses[1].City"));
        assert_eq!(err.position(), 7);
        assert_eq!(
            err.to_string(),
            "cannot convert string \"x\" at offset 7 into date-time in member `Addresses[1].City`"
        );
    }

    #[test]
    fn test_path_ignored_for_format_errors() {
        let err = DecodeError::format(3, FormatErrorKind::UnexpectedEnd).in_member("Name");
        assert_eq!(err.path(), None);
        assert_eq!(err.to_string(), "invalid JSON at offset 3: unexpected end of input");
    }

    #[test]
    fn test_encode_error_path() {
        let err = EncodeError::unsupported("NaN has no JSON form")
            .at_index(0)
            .in_member("Scores");
        assert_eq!(err.path(), Some("Scores[0]"));
        assert_eq!(
            err.to_string(),
            "unsupported type in member `Scores[0]`: NaN has no JSON form"
        );
    }
}
