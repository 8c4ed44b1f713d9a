use super::error::BencodeError;
use super::value::Value;
use bytes::Bytes;
use std::collections::BTreeMap;
use std::ops::Range;

/// Default limit on list/dictionary nesting.
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// Knobs for [`decode_with`] and [`decode_all_with`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeOptions {
    /// Maximum number of nested lists/dictionaries.
    pub max_depth: usize,
    /// Accept integers with leading zeros (`i03e`) and negative zero (`i-0e`).
    ///
    /// BEP-3 forbids them, but some torrent creators emit them anyway.
    pub lenient_integers: bool,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            lenient_integers: false,
        }
    }
}

impl DecodeOptions {
    /// Default options with `lenient_integers` enabled.
    pub fn lenient() -> Self {
        Self {
            lenient_integers: true,
            ..Self::default()
        }
    }
}

/// Decodes one value from the start of `data`.
///
/// Returns the value together with the number of bytes it occupied. Bytes
/// after the value are left untouched, so this can be used to walk a buffer
/// holding several concatenated values.
///
/// # Examples
///
/// ```
/// use torrent_inspect::bencode::{decode, Value};
///
/// let (value, consumed) = decode(b"4:spami42e").unwrap();
/// assert_eq!(value, Value::string("spam"));
/// assert_eq!(consumed, 6);
/// ```
pub fn decode(data: &[u8]) -> Result<(Value, usize), BencodeError> {
    decode_with(data, DecodeOptions::default())
}

pub fn decode_with(data: &[u8], options: DecodeOptions) -> Result<(Value, usize), BencodeError> {
    let mut decoder = Decoder::new(data, options);
    let value = decoder.value()?;
    Ok((value, decoder.pos))
}

/// Decodes `data` as exactly one value.
///
/// # Errors
///
/// Fails with [`BencodeError::TrailingData`] if anything follows the value.
///
/// # Examples
///
/// ```
/// use torrent_inspect::bencode::{decode_all, BencodeError};
///
/// assert!(decode_all(b"i42e").is_ok());
/// assert_eq!(
///     decode_all(b"i1ei2e"),
///     Err(BencodeError::TrailingData { offset: 3 })
/// );
/// ```
pub fn decode_all(data: &[u8]) -> Result<Value, BencodeError> {
    decode_all_with(data, DecodeOptions::default())
}

pub fn decode_all_with(data: &[u8], options: DecodeOptions) -> Result<Value, BencodeError> {
    let (value, consumed) = decode_with(data, options)?;

    if consumed != data.len() {
        return Err(BencodeError::TrailingData { offset: consumed });
    }

    Ok(value)
}

/// Byte range of the value stored under `key` in the top-level dictionary
/// of `data`, exactly as it appears in the input.
///
/// Returns `None` if `data` does not start with a dictionary or the key is
/// absent. Duplicate keys resolve to the last occurrence, matching
/// [`decode`]. Bytes after the dictionary are not examined.
///
/// # Examples
///
/// ```
/// use torrent_inspect::bencode::{dict_value_span, DecodeOptions};
///
/// let data = b"d4:infod1:bi1e1:ai2ee4:name1:xe";
/// let span = dict_value_span(data, b"info", DecodeOptions::default()).unwrap();
/// assert_eq!(span.map(|r| &data[r]), Some(b"d1:bi1e1:ai2ee".as_slice()));
/// ```
pub fn dict_value_span(
    data: &[u8],
    key: &[u8],
    options: DecodeOptions,
) -> Result<Option<Range<usize>>, BencodeError> {
    let mut decoder = Decoder::new(data, options);
    if decoder.peek() != Some(b'd') {
        return Ok(None);
    }

    let mut span = None;
    decoder.dict_entries(|entry_key, _, range| {
        if entry_key.as_ref() == key {
            span = Some(range);
        }
    })?;

    Ok(span)
}

struct Decoder<'a> {
    data: &'a [u8],
    pos: usize,
    depth: usize,
    options: DecodeOptions,
}

impl<'a> Decoder<'a> {
    fn new(data: &'a [u8], options: DecodeOptions) -> Self {
        Self {
            data,
            pos: 0,
            depth: 0,
            options,
        }
    }

    fn peek(&self) -> Option<u8> {
        self.data.get(self.pos).copied()
    }

    fn truncated(&self, needed: usize) -> BencodeError {
        BencodeError::TruncatedInput {
            offset: self.pos,
            needed,
            available: self.data.len() - self.pos,
        }
    }

    fn unterminated(&self, start: usize) -> BencodeError {
        BencodeError::UnterminatedContainer {
            offset: self.pos,
            start,
        }
    }

    fn skip_digits(&mut self) -> &'a [u8] {
        let data = self.data;
        let start = self.pos;
        while let Some(b'0'..=b'9') = self.peek() {
            self.pos += 1;
        }
        &data[start..self.pos]
    }

    fn value(&mut self) -> Result<Value, BencodeError> {
        match self.peek() {
            None => Err(self.truncated(1)),
            Some(b'i') => self.integer(),
            Some(b'l') => self.list(),
            Some(b'd') => self.dict(),
            Some(b'0'..=b'9') => self.byte_string().map(Value::Bytes),
            Some(byte) => Err(BencodeError::UnknownValueType {
                offset: self.pos,
                byte,
            }),
        }
    }

    fn integer(&mut self) -> Result<Value, BencodeError> {
        let start = self.pos;
        self.pos += 1;

        let negative = self.peek() == Some(b'-');
        if negative {
            self.pos += 1;
        }

        let digits = self.skip_digits();

        match self.peek() {
            None => return Err(self.truncated(1)),
            Some(b'e') => {}
            Some(_) => {
                return Err(BencodeError::InvalidInteger {
                    offset: self.pos,
                    reason: "unexpected character",
                })
            }
        }

        let invalid = |reason| BencodeError::InvalidInteger {
            offset: start,
            reason,
        };

        if digits.is_empty() {
            return Err(invalid("no digits"));
        }

        if !self.options.lenient_integers {
            if digits.len() > 1 && digits[0] == b'0' {
                return Err(invalid("leading zeros"));
            }
            if negative && digits == b"0" {
                return Err(invalid("negative zero"));
            }
        }

        let mut value: i64 = 0;
        for &digit in digits {
            let digit = i64::from(digit - b'0');
            value = value
                .checked_mul(10)
                .and_then(|v| {
                    if negative {
                        v.checked_sub(digit)
                    } else {
                        v.checked_add(digit)
                    }
                })
                .ok_or_else(|| invalid("out of range"))?;
        }

        self.pos += 1;
        Ok(Value::Integer(value))
    }

    fn byte_string(&mut self) -> Result<Bytes, BencodeError> {
        let start = self.pos;
        let digits = self.skip_digits();

        match self.peek() {
            None => return Err(self.truncated(1)),
            Some(b':') => {}
            Some(_) => return Err(BencodeError::InvalidLengthPrefix { offset: start }),
        }

        if digits.is_empty() || (digits.len() > 1 && digits[0] == b'0') {
            return Err(BencodeError::InvalidLengthPrefix { offset: start });
        }

        let len = digits
            .iter()
            .try_fold(0usize, |acc, &d| {
                acc.checked_mul(10)?.checked_add(usize::from(d - b'0'))
            })
            .ok_or(BencodeError::InvalidLengthPrefix { offset: start })?;

        self.pos += 1;

        let available = self.data.len() - self.pos;
        if len > available {
            return Err(BencodeError::TruncatedInput {
                offset: self.pos,
                needed: len,
                available,
            });
        }

        let bytes = Bytes::copy_from_slice(&self.data[self.pos..self.pos + len]);
        self.pos += len;
        Ok(bytes)
    }

    fn enter(&mut self) -> Result<usize, BencodeError> {
        if self.depth >= self.options.max_depth {
            return Err(BencodeError::RecursionLimitExceeded {
                offset: self.pos,
                limit: self.options.max_depth,
            });
        }
        self.depth += 1;

        let start = self.pos;
        self.pos += 1;
        Ok(start)
    }

    fn leave(&mut self) {
        self.pos += 1;
        self.depth -= 1;
    }

    fn list(&mut self) -> Result<Value, BencodeError> {
        let start = self.enter()?;
        let mut list = Vec::new();

        loop {
            match self.peek() {
                None => return Err(self.unterminated(start)),
                Some(b'e') => break,
                Some(_) => list.push(self.value()?),
            }
        }

        self.leave();
        Ok(Value::List(list))
    }

    fn dict(&mut self) -> Result<Value, BencodeError> {
        let mut dict = BTreeMap::new();

        // Duplicate keys: the last one wins.
        self.dict_entries(|key, value, _| {
            dict.insert(key, value);
        })?;

        Ok(Value::Dict(dict))
    }

    /// Walks a dictionary, handing each key, value and the value's byte
    /// range to `on_entry`.
    fn dict_entries(
        &mut self,
        mut on_entry: impl FnMut(Bytes, Value, Range<usize>),
    ) -> Result<(), BencodeError> {
        let start = self.enter()?;

        loop {
            let key = match self.peek() {
                None => return Err(self.unterminated(start)),
                Some(b'e') => break,
                Some(b'0'..=b'9') => self.byte_string()?,
                Some(_) => return Err(BencodeError::InvalidDictionaryKey { offset: self.pos }),
            };

            if self.peek().is_none() {
                return Err(self.unterminated(start));
            }

            let value_start = self.pos;
            let value = self.value()?;
            on_entry(key, value, value_start..self.pos);
        }

        self.leave();
        Ok(())
    }
}
