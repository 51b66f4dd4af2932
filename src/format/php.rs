//! Decoder for PHP `serialize()` output (`format=php`)

use super::ResponseFormat;
use crate::errors::WikiError;
use serde_json::{Map, Number, Value};

/// Deepest array/object nesting accepted, same as serde_json's default
pub const MAX_DEPTH: usize = 128;

/// `format=php`
#[derive(Debug, Clone, Copy, Default)]
pub struct PhpFormat;

impl ResponseFormat for PhpFormat {
    fn name(&self) -> &'static str {
        "php"
    }

    fn decode(&self, body: &str) -> Result<Value, WikiError> {
        unserialize(body)
    }
}

/// Decode one serialized PHP value
///
/// Arrays whose keys are exactly `0..n` in order become JSON arrays, every
/// other array (and every object) becomes a JSON object with its keys as
/// strings. Non-finite floats become `null`.
///
/// # Example
/// ```
/// use wikibot_api::format::unserialize;
/// let value = unserialize(r#"a:1:{s:5:"login";a:1:{s:6:"result";s:7:"Success";}}"#).unwrap();
/// assert_eq!(value["login"]["result"], "Success");
/// ```
pub fn unserialize(input: &str) -> Result<Value, WikiError> {
    let mut parser = Parser {
        bytes: input.as_bytes(),
        pos: 0,
        depth: 0,
    };
    let value = parser.parse_value()?;
    while parser.pos < parser.bytes.len() && parser.bytes[parser.pos].is_ascii_whitespace() {
        parser.pos += 1;
    }
    if parser.pos != parser.bytes.len() {
        return Err(parser.error("trailing characters after value"));
    }
    Ok(value)
}

enum Key {
    Int(i64),
    Str(String),
}

struct Parser<'a> {
    bytes: &'a [u8],
    pos: usize,
    depth: usize,
}

impl<'a> Parser<'a> {
    fn error(&self, message: impl Into<String>) -> WikiError {
        WikiError::DecodeError {
            offset: self.pos,
            message: message.into(),
        }
    }

    fn bump(&mut self) -> Result<u8, WikiError> {
        let byte = *self
            .bytes
            .get(self.pos)
            .ok_or_else(|| self.error("unexpected end of input"))?;
        self.pos += 1;
        Ok(byte)
    }

    fn expect(&mut self, wanted: u8) -> Result<(), WikiError> {
        let found = self.bump()?;
        if found != wanted {
            self.pos -= 1;
            return Err(self.error(format!(
                "expected '{}', found '{}'",
                wanted as char, found as char
            )));
        }
        Ok(())
    }

    /// Reads up to `terminator`, consuming it
    fn read_until(&mut self, terminator: u8) -> Result<&'a str, WikiError> {
        let bytes = self.bytes;
        let start = self.pos;
        let len = bytes[start..]
            .iter()
            .position(|&b| b == terminator)
            .ok_or_else(|| self.error(format!("missing '{}'", terminator as char)))?;
        self.pos = start + len + 1;
        std::str::from_utf8(&bytes[start..start + len]).map_err(|_| WikiError::DecodeError {
            offset: start,
            message: "invalid utf-8".to_string(),
        })
    }

    fn read_number<T: std::str::FromStr>(&mut self, terminator: u8) -> Result<T, WikiError> {
        let start = self.pos;
        let raw = self.read_until(terminator)?;
        raw.parse().map_err(|_| WikiError::DecodeError {
            offset: start,
            message: format!("invalid number '{}'", raw),
        })
    }

    fn parse_value(&mut self) -> Result<Value, WikiError> {
        let tag = self.bump()?;
        match tag {
            b'N' => {
                self.expect(b';')?;
                Ok(Value::Null)
            }
            b'b' => {
                self.expect(b':')?;
                match self.read_until(b';')? {
                    "0" => Ok(Value::Bool(false)),
                    "1" => Ok(Value::Bool(true)),
                    other => Err(self.error(format!("invalid boolean '{}'", other))),
                }
            }
            b'i' => {
                self.expect(b':')?;
                let n: i64 = self.read_number(b';')?;
                Ok(Value::from(n))
            }
            b'd' => {
                self.expect(b':')?;
                let f: f64 = self.read_number(b';')?;
                Ok(Number::from_f64(f).map_or(Value::Null, Value::Number))
            }
            b's' => {
                self.expect(b':')?;
                let s = self.parse_string()?;
                self.expect(b';')?;
                Ok(Value::String(s))
            }
            b'a' => {
                self.expect(b':')?;
                self.parse_entries()
            }
            b'O' => {
                self.expect(b':')?;
                // class name is dropped
                self.parse_string()?;
                self.expect(b':')?;
                self.parse_entries()
            }
            other => {
                self.pos -= 1;
                Err(self.error(format!("unknown type tag '{}'", other as char)))
            }
        }
    }

    /// Parses `<len>:"<bytes>"`, the length counted in bytes
    fn parse_string(&mut self) -> Result<String, WikiError> {
        let len: usize = self.read_number(b':')?;
        self.expect(b'"')?;
        let start = self.pos;
        let end = start
            .checked_add(len)
            .filter(|&end| end <= self.bytes.len())
            .ok_or_else(|| self.error("string length exceeds input"))?;
        let s = std::str::from_utf8(&self.bytes[start..end]).map_err(|_| {
            WikiError::DecodeError {
                offset: start,
                message: "string length splits a utf-8 character".to_string(),
            }
        })?;
        self.pos = end;
        self.expect(b'"')?;
        Ok(s.to_string())
    }

    fn parse_key(&mut self) -> Result<Key, WikiError> {
        match self.bump()? {
            b'i' => {
                self.expect(b':')?;
                Ok(Key::Int(self.read_number(b';')?))
            }
            b's' => {
                self.expect(b':')?;
                let s = self.parse_string()?;
                self.expect(b';')?;
                Ok(Key::Str(s))
            }
            other => {
                self.pos -= 1;
                Err(self.error(format!("invalid array key tag '{}'", other as char)))
            }
        }
    }

    /// Parses `<count>:{<key><value>...}`
    fn parse_entries(&mut self) -> Result<Value, WikiError> {
        if self.depth >= MAX_DEPTH {
            return Err(self.error(format!("nesting deeper than {}", MAX_DEPTH)));
        }
        self.depth += 1;
        let value = self.parse_entries_inner();
        self.depth -= 1;
        value
    }

    fn parse_entries_inner(&mut self) -> Result<Value, WikiError> {
        let count: usize = self.read_number(b':')?;
        self.expect(b'{')?;
        let mut entries = Vec::with_capacity(count.min(1024));
        for _ in 0..count {
            let key = self.parse_key()?;
            let value = self.parse_value()?;
            entries.push((key, value));
        }
        self.expect(b'}')?;

        let is_list = entries
            .iter()
            .enumerate()
            .all(|(i, (key, _))| matches!(key, Key::Int(n) if usize::try_from(*n) == Ok(i)));
        if is_list {
            return Ok(Value::Array(entries.into_iter().map(|(_, v)| v).collect()));
        }

        let mut map = Map::with_capacity(entries.len());
        for (key, value) in entries {
            let key = match key {
                Key::Int(n) => n.to_string(),
                Key::Str(s) => s,
            };
            map.insert(key, value);
        }
        Ok(Value::Object(map))
    }
}
