use tracing::trace;

use crate::descriptor::TypeDescriptor;
use crate::error::DecodeError;
use crate::error::FormatErrorKind;
use crate::json::cursor::Cursor;
use crate::json::value::Value;
use crate::options::DecodeOptions;
use crate::shape::Shape;

/// A recursive-descent JSON parser driven by type descriptors.
///
/// One parser is created per decode call. All parse functions share
/// its cursor, which only moves forward.
pub struct Parser<'a> {
    cursor: Cursor<'a>,
    options: &'a DecodeOptions,
    depth: usize,
}

impl<'a> Parser<'a> {
    pub fn new(src: &'a str, options: &'a DecodeOptions) -> Self {
        Self {
            cursor: Cursor::new(src),
            options,
            depth: 0,
        }
    }

    /// The byte offset of the cursor.
    pub fn position(&self) -> usize {
        self.cursor.position()
    }

    /// Skips whitespace and returns the lead character of the next
    /// value.
    pub fn peek(&mut self) -> Result<char, DecodeError> {
        self.cursor.peek_token()
    }

    /// Runs `f` over the whole text, then checks that nothing but
    /// whitespace follows, unless the options allow it.
    pub(crate) fn document<T>(
        mut self,
        f: impl FnOnce(&mut Self) -> Result<T, DecodeError>,
    ) -> Result<T, DecodeError> {
        let value = f(&mut self)?;

        if !self.options.allow_trailing && self.cursor.trailing().is_some() {
            return Err(self.cursor.error(FormatErrorKind::TrailingCharacters));
        }

        Ok(value)
    }

    fn enter(&mut self) -> Result<(), DecodeError> {
        if self.depth >= self.options.max_depth {
            return Err(DecodeError::DepthLimit {
                position: self.position(),
                limit: self.options.max_depth,
            });
        }
        self.depth += 1;

        Ok(())
    }

    fn leave(&mut self) {
        self.depth -= 1;
    }

    /// Parses an object into a new instance of the described type.
    ///
    /// Keys are matched against members ignoring case. Values of
    /// unknown keys are parsed and dropped.
    pub fn parse_object<T: 'static>(
        &mut self,
        descriptor: &TypeDescriptor<T>,
    ) -> Result<T, DecodeError> {
        self.cursor.expect('{', "'{'")?;
        self.enter()?;

        let mut target = (descriptor.new)();

        if self.cursor.peek_token()? == '}' {
            self.cursor.bump();
            self.leave();
            return Ok(target);
        }

        loop {
            let key = self.cursor.string()?;
            self.cursor.expect(':', "':'")?;

            match descriptor.member(&key) {
                Some(member) => {
                    (member.set)(&mut target, self).map_err(|err| err.in_member(member.name))?
                }
                None => {
                    trace!(key = key.as_str(), type_name = descriptor.name, "ignoring unknown key");
                    self.parse_value()?;
                }
            }

            match self.cursor.next_token()? {
                ',' => {}
                '}' => break,
                found => {
                    return Err(DecodeError::format(
                        self.position() - found.len_utf8(),
                        FormatErrorKind::Expected {
                            expected: "',' or '}'",
                            found,
                        },
                    ))
                }
            }
        }

        self.leave();

        Ok(target)
    }

    /// Reads a composite member value. Anything other than an object
    /// is a coercion error.
    pub fn composite<T: 'static>(
        &mut self,
        descriptor: &TypeDescriptor<T>,
    ) -> Result<T, DecodeError> {
        if self.peek()? == '{' {
            self.parse_object(descriptor)
        } else {
            self.mismatch(&descriptor.shape())
        }
    }

    /// Parses an array, reading each element with `element`.
    pub fn parse_array<E>(
        &mut self,
        mut element: impl FnMut(&mut Self) -> Result<E, DecodeError>,
    ) -> Result<Vec<E>, DecodeError> {
        self.cursor.expect('[', "'['")?;
        self.enter()?;

        let mut items = Vec::new();

        if self.cursor.peek_token()? == ']' {
            self.cursor.bump();
            self.leave();
            return Ok(items);
        }

        loop {
            let i = items.len();
            items.push(element(self).map_err(|err| err.at_index(i))?);

            match self.cursor.next_token()? {
                ',' => {}
                ']' => break,
                found => {
                    return Err(DecodeError::format(
                        self.position() - found.len_utf8(),
                        FormatErrorKind::Expected {
                            expected: "',' or ']'",
                            found,
                        },
                    ))
                }
            }
        }

        self.leave();

        Ok(items)
    }

    /// Reads a sequence member value. Anything other than an array is
    /// a coercion error.
    pub fn sequence<E>(
        &mut self,
        shape: &Shape,
        element: impl FnMut(&mut Self) -> Result<E, DecodeError>,
    ) -> Result<Vec<E>, DecodeError> {
        if self.peek()? == '[' {
            self.parse_array(element)
        } else {
            self.mismatch(shape)
        }
    }

    /// Parses any JSON value without a target type.
    pub fn parse_value(&mut self) -> Result<Value, DecodeError> {
        match self.peek()? {
            '"' => self.cursor.string().map(Value::String),
            '-' | '0'..='9' => self.cursor.number().map(Value::Number),
            '{' => {
                self.cursor.bump();
                self.enter()?;

                let mut pairs = Vec::new();

                if self.cursor.peek_token()? != '}' {
                    loop {
                        let key = self.cursor.string()?;
                        self.cursor.expect(':', "':'")?;
                        pairs.push((key, self.parse_value()?));

                        match self.cursor.next_token()? {
                            ',' => {}
                            '}' => break,
                            found => {
                                return Err(DecodeError::format(
                                    self.position() - found.len_utf8(),
                                    FormatErrorKind::Expected {
                                        expected: "',' or '}'",
                                        found,
                                    },
                                ))
                            }
                        }
                    }
                } else {
                    self.cursor.bump();
                }

                self.leave();

                Ok(Value::Object(pairs))
            }
            '[' => self.parse_array(Self::parse_value).map(Value::Array),
            't' => self.cursor.literal("true").map(|_| Value::Bool(true)),
            'f' => self.cursor.literal("false").map(|_| Value::Bool(false)),
            'n' => self.cursor.literal("null").map(|_| Value::Null),
            found => Err(self.cursor.error(FormatErrorKind::Expected {
                expected: "a JSON value",
                found,
            })),
        }
    }

    /// Lexes a scalar for a member of the given shape. Returns the
    /// value's position with it, for coercion errors. Objects and
    /// arrays are coercion errors.
    pub fn scalar(&mut self, shape: &Shape) -> Result<(usize, Value), DecodeError> {
        match self.peek()? {
            '{' | '[' => self.mismatch(shape),
            _ => {
                let position = self.position();

                Ok((position, self.parse_value()?))
            }
        }
    }

    /// Consumes a `null` if it is next.
    pub fn null(&mut self) -> Result<bool, DecodeError> {
        if self.peek()? == 'n' {
            self.cursor.literal("null")?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    /// Parses whatever value is next, and reports that it doesn't fit
    /// `shape`.
    pub fn mismatch<T>(&mut self, shape: &Shape) -> Result<T, DecodeError> {
        let position = self.position();
        let found = self.parse_value()?;

        Err(DecodeError::coercion(position, shape, found))
    }
}
