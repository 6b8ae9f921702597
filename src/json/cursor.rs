use crate::error::DecodeError;
use crate::error::FormatErrorKind;
use crate::json::value::Number;

/// A read position into JSON text.
///
/// The position is a byte offset. It only ever moves forward.
pub struct Cursor<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(src: &'a str) -> Self {
        Self { src, pos: 0 }
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    fn rest(&self) -> &'a str {
        &self.src[self.pos..]
    }

    pub fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    pub fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();

        Some(c)
    }

    /// Skips JSON whitespace: space, tab, line feed and carriage return.
    pub fn skip_whitespace(&mut self) {
        let rest = self.rest();
        let trimmed = rest.trim_start_matches([' ', '\t', '\n', '\r']);

        self.pos += rest.len() - trimmed.len();
    }

    /// Skips whitespace and returns the next character without
    /// consuming it.
    pub fn peek_token(&mut self) -> Result<char, DecodeError> {
        self.skip_whitespace();
        self.peek().ok_or_else(|| self.error(FormatErrorKind::UnexpectedEnd))
    }

    /// Skips whitespace and consumes the next character.
    pub fn next_token(&mut self) -> Result<char, DecodeError> {
        let c = self.peek_token()?;
        self.pos += c.len_utf8();

        Ok(c)
    }

    /// Skips whitespace and consumes `want`, or fails without moving.
    pub fn expect(&mut self, want: char, expected: &'static str) -> Result<(), DecodeError> {
        match self.peek_token()? {
            c if c == want => {
                self.pos += c.len_utf8();
                Ok(())
            }
            found => Err(self.error(FormatErrorKind::Expected { expected, found })),
        }
    }

    /// Consumes a fixed literal like `true`.
    pub fn literal(&mut self, lit: &'static str) -> Result<(), DecodeError> {
        if self.rest().starts_with(lit) {
            self.pos += lit.len();
            Ok(())
        } else if lit.starts_with(self.rest()) {
            Err(self.error_at(self.src.len(), FormatErrorKind::UnexpectedEnd))
        } else {
            Err(self.error(FormatErrorKind::InvalidLiteral(lit)))
        }
    }

    /// Lexes a quoted string, resolving escape sequences.
    pub fn string(&mut self) -> Result<String, DecodeError> {
        self.expect('"', "'\"'")?;

        let mut out = String::new();

        loop {
            let rest = self.rest();
            let run = rest
                .find(|c: char| c == '"' || c == '\\' || c < ' ')
                .unwrap_or(rest.len());
            out.push_str(&rest[..run]);
            self.pos += run;

            match self.bump() {
                None => return Err(self.error(FormatErrorKind::UnexpectedEnd)),
                Some('"') => return Ok(out),
                Some('\\') => out.push(self.escape()?),
                Some(_) => {
                    return Err(self.error_at(self.pos - 1, FormatErrorKind::ControlCharacter))
                }
            }
        }
    }

    /// Resolves the escape after a backslash.
    fn escape(&mut self) -> Result<char, DecodeError> {
        let start = self.pos - 1;

        let c = match self.bump() {
            None => return Err(self.error(FormatErrorKind::UnexpectedEnd)),
            Some('"') => '"',
            Some('\\') => '\\',
            Some('/') => '/',
            Some('b') => '\x08',
            Some('f') => '\x0C',
            Some('n') => '\n',
            Some('r') => '\r',
            Some('t') => '\t',
            Some('u') => {
                let hi = self.hex4()?;
                let code = if (0xD800..0xDC00).contains(&hi) {
                    if !self.rest().starts_with("\\u") {
                        return Err(self.error_at(start, FormatErrorKind::InvalidEscape));
                    }
                    self.pos += 2;

                    let lo = self.hex4()?;
                    if !(0xDC00..0xE000).contains(&lo) {
                        return Err(self.error_at(start, FormatErrorKind::InvalidEscape));
                    }

                    0x10000 + ((hi - 0xD800) << 10) + (lo - 0xDC00)
                } else {
                    hi
                };

                return char::from_u32(code)
                    .ok_or_else(|| self.error_at(start, FormatErrorKind::InvalidEscape));
            }
            Some(_) => return Err(self.error_at(start, FormatErrorKind::InvalidEscape)),
        };

        Ok(c)
    }

    fn hex4(&mut self) -> Result<u32, DecodeError> {
        let mut code = 0;

        for i in 0..4 {
            let digit = match self.src.as_bytes().get(self.pos + i) {
                None => return Err(self.error_at(self.src.len(), FormatErrorKind::UnexpectedEnd)),
                Some(b) => (*b as char)
                    .to_digit(16)
                    .ok_or_else(|| self.error_at(self.pos + i, FormatErrorKind::InvalidEscape))?,
            };
            code = code * 16 + digit;
        }
        self.pos += 4;

        Ok(code)
    }

    /// Lexes a number: an optional minus, digits without a leading
    /// zero, an optional fraction and an optional exponent. A fraction
    /// or exponent makes it a float, and so does an integer too wide
    /// for `i128` and `u128`.
    pub fn number(&mut self) -> Result<Number, DecodeError> {
        self.skip_whitespace();

        let bytes = self.src.as_bytes();
        let start = self.pos;
        let mut end = start;
        let mut float = false;
        let mut valid = true;

        if bytes.get(end) == Some(&b'-') {
            end += 1;
        }

        let int_end = skip_digits(bytes, end);
        valid &= int_end > end && (bytes.get(end) != Some(&b'0') || int_end == end + 1);
        end = int_end;

        if bytes.get(end) == Some(&b'.') {
            float = true;
            let frac_end = skip_digits(bytes, end + 1);
            valid &= frac_end > end + 1;
            end = frac_end;
        }

        if matches!(bytes.get(end), Some(b'e' | b'E')) {
            float = true;
            end += 1;
            if matches!(bytes.get(end), Some(b'+' | b'-')) {
                end += 1;
            }
            let exp_end = skip_digits(bytes, end);
            valid &= exp_end > end;
            end = exp_end;
        }

        let text = &self.src[start..end];
        let invalid = || DecodeError::format(start, FormatErrorKind::InvalidNumber(text.to_owned()));

        if !valid {
            return Err(invalid());
        }

        let number = if float {
            text.parse().map(Number::Float).map_err(|_| invalid())?
        } else if let Ok(v) = text.parse::<i128>() {
            Number::Int(v)
        } else if let Ok(v) = text.parse::<u128>() {
            Number::UInt(v)
        } else {
            text.parse().map(Number::Float).map_err(|_| invalid())?
        };
        self.pos = end;

        Ok(number)
    }

    /// Skips whitespace and returns the first remaining character, if any.
    pub fn trailing(&mut self) -> Option<char> {
        self.skip_whitespace();
        self.peek()
    }

    pub fn error(&self, kind: FormatErrorKind) -> DecodeError {
        DecodeError::format(self.pos, kind)
    }

    fn error_at(&self, position: usize, kind: FormatErrorKind) -> DecodeError {
        DecodeError::format(position, kind)
    }
}

fn skip_digits(bytes: &[u8], mut i: usize) -> usize {
    while matches!(bytes.get(i), Some(b'0'..=b'9')) {
        i += 1;
    }

    i
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string() {
        let cases = vec![
            (r#""""#, ""),
            (r#""hello""#, "hello"),
            (r#"  "spaced""#, "spaced"),
            (r#""a\"b""#, "a\"b"),
            (r#""\\\/\b\f\n\r\t""#, "\\/\x08\x0C\n\r\t"),
            (r#""Aé""#, "Aé"),
            (r#""😀""#, "\u{1F600}"),
            ("\"❤️\"", "❤️"),
        ];

        for (input, want) in cases {
            let mut cursor = Cursor::new(input);
            assert_eq!(cursor.string().unwrap(), want, "input {:?}", input);
            assert_eq!(cursor.position(), input.len());
        }
    }

    #[test]
    fn test_string_errors() {
        let cases = vec![
            (r#""abc"#, DecodeError::format(4, FormatErrorKind::UnexpectedEnd)),
            (r#""\x""#, DecodeError::format(1, FormatErrorKind::InvalidEscape)),
            (r#""\u12""#, DecodeError::format(5, FormatErrorKind::InvalidEscape)),
            (r#""\u12"#, DecodeError::format(5, FormatErrorKind::UnexpectedEnd)),
            (r#""\ud83d""#, DecodeError::format(1, FormatErrorKind::InvalidEscape)),
            (r#""\ud83dA""#, DecodeError::format(1, FormatErrorKind::InvalidEscape)),
            ("\"a\nb\"", DecodeError::format(2, FormatErrorKind::ControlCharacter)),
            (
                "abc",
                DecodeError::format(
                    0,
                    FormatErrorKind::Expected {
                        expected: "'\"'",
                        found: 'a',
                    },
                ),
            ),
        ];

        for (input, want) in cases {
            assert_eq!(Cursor::new(input).string().unwrap_err(), want, "input {:?}", input);
        }
    }

    #[test]
    fn test_number() {
        let cases = vec![
            ("0", Number::Int(0), 1),
            ("42,", Number::Int(42), 2),
            ("-17}", Number::Int(-17), 3),
            ("3.25", Number::Float(3.25), 4),
            ("-0.5", Number::Float(-0.5), 4),
            ("1e3", Number::Float(1000.0), 3),
            ("2.5E-1", Number::Float(0.25), 6),
            ("1-2", Number::Int(1), 1),
            ("18446744073709551615", Number::Int(18446744073709551615), 20),
            (
                "340282366920938463463374607431768211455",
                Number::UInt(u128::MAX),
                39,
            ),
            ("0.5", Number::Float(0.5), 3),
            ("-0", Number::Int(0), 2),
        ];

        for (input, want, pos) in cases {
            let mut cursor = Cursor::new(input);
            assert_eq!(cursor.number().unwrap(), want, "input {:?}", input);
            assert_eq!(cursor.position(), pos, "input {:?}", input);
        }
    }

    #[test]
    fn test_number_wider_than_integers() {
        let cases = vec![
            (format!("1{}", "0".repeat(40)), Number::Float(1e40)),
            (format!("-1{}", "0".repeat(40)), Number::Float(-1e40)),
            (format!("1{}", "0".repeat(300)), Number::Float(1e300)),
            (
                "-170141183460469231731687303715884105728".to_owned(),
                Number::Int(i128::MIN),
            ),
        ];

        for (input, want) in cases {
            let mut cursor = Cursor::new(&input);
            assert_eq!(cursor.number().unwrap(), want, "input {:?}", input);
            assert_eq!(cursor.position(), input.len());
        }
    }

    #[test]
    fn test_number_errors() {
        for input in ["-", "1.", "1e", "-.5", "1.e5", "+1", "01", "-01", "00.5"] {
            match Cursor::new(input).number() {
                Err(DecodeError::Format {
                    position: 0,
                    kind: FormatErrorKind::InvalidNumber(_),
                }) => {}
                other => panic!("input {:?}: got {:?}", input, other),
            }
        }
    }

    #[test]
    fn test_literal() {
        let mut cursor = Cursor::new("truefalse");
        cursor.literal("true").unwrap();
        cursor.literal("false").unwrap();
        assert_eq!(cursor.position(), 9);

        assert_eq!(
            Cursor::new("nul").literal("null").unwrap_err(),
            DecodeError::format(3, FormatErrorKind::UnexpectedEnd),
        );
        assert_eq!(
            Cursor::new("nope").literal("null").unwrap_err(),
            DecodeError::format(0, FormatErrorKind::InvalidLiteral("null")),
        );
    }

    #[test]
    fn test_expect_does_not_move_on_failure() {
        let mut cursor = Cursor::new("  x");
        assert!(cursor.expect(':', "':'").is_err());
        assert_eq!(cursor.position(), 2);
        assert_eq!(cursor.next_token().unwrap(), 'x');
        assert_eq!(cursor.trailing(), None);
    }
}
