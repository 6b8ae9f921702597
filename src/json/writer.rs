use std::fmt;

use crate::error::EncodeError;
use crate::Composite;
use crate::ToJson;

/// Writes compact JSON: no whitespace, keys in member declaration
/// order, no trailing commas.
pub struct JsonWriter<'w> {
    out: &'w mut dyn fmt::Write,
}

impl<'w> JsonWriter<'w> {
    pub fn new(out: &'w mut dyn fmt::Write) -> Self {
        Self { out }
    }

    /// Writes the default text form of a value, unquoted.
    pub fn unquoted(&mut self, v: &dyn fmt::Display) -> Result<(), EncodeError> {
        write!(self.out, "{}", v)?;

        Ok(())
    }

    /// Writes the default text form of a value as a JSON string.
    pub fn quoted(&mut self, v: &dyn fmt::Display) -> Result<(), EncodeError> {
        self.string(&v.to_string())
    }

    /// Writes a JSON string, escaping quotes, backslashes and control
    /// characters.
    pub fn string(&mut self, s: &str) -> Result<(), EncodeError> {
        let mut start = 0;
        let w = &mut self.out;

        w.write_char('"')?;

        for (end, c) in s.char_indices() {
            if c != '\\' && c != '"' && c >= ' ' {
                continue;
            }

            w.write_str(&s[start..end])?;
            w.write_char('\\')?;

            match c {
                '\x08' => w.write_char('b')?,
                '\x0C' => w.write_char('f')?,
                '\n' => w.write_char('n')?,
                '\r' => w.write_char('r')?,
                '\t' => w.write_char('t')?,
                c if c < ' ' => write!(w, "u{:04X}", c as u32)?,
                c => w.write_char(c)?,
            }

            start = end + c.len_utf8();
        }

        w.write_str(&s[start..])?;
        w.write_char('"')?;

        Ok(())
    }

    pub fn null(&mut self) -> Result<(), EncodeError> {
        self.out.write_str("null")?;

        Ok(())
    }

    /// Writes a float, which must be finite.
    pub fn float(&mut self, v: f64, display: &dyn fmt::Display) -> Result<(), EncodeError> {
        if !v.is_finite() {
            return Err(EncodeError::unsupported(format_args!(
                "{} has no JSON representation",
                v
            )));
        }

        self.unquoted(display)
    }

    /// Writes the elements as a JSON array. Empty sequences become `[]`.
    pub fn array<'i, T, I>(&mut self, items: I) -> Result<(), EncodeError>
    where
        T: ToJson + ?Sized + 'i,
        I: IntoIterator<Item = &'i T>,
    {
        self.out.write_char('[')?;

        for (i, item) in items.into_iter().enumerate() {
            if i > 0 {
                self.out.write_char(',')?;
            }
            item.write_json(self).map_err(|err| err.at_index(i))?;
        }

        self.out.write_char(']')?;

        Ok(())
    }

    /// Writes a composite as a JSON object, one key per member. A
    /// composite without members becomes `{}`.
    pub fn object<T: Composite>(&mut self, value: &T) -> Result<(), EncodeError> {
        let descriptor = T::descriptor();

        if descriptor.members.is_empty() {
            self.out.write_str("{}")?;
            return Ok(());
        }

        self.out.write_char('{')?;

        for (i, member) in descriptor.members.iter().enumerate() {
            if i > 0 {
                self.out.write_char(',')?;
            }
            self.string(member.name)?;
            self.out.write_char(':')?;
            (member.get)(value)
                .write_json(self)
                .map_err(|err| err.in_member(member.name))?;
        }

        self.out.write_char('}')?;

        Ok(())
    }
}
