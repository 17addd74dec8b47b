//! Canonical RLP encoding and decoding.
//!
//! RLP is a length-prefixed, recursively nestable binary encoding over two
//! shapes: byte strings and lists. The decoder is strict: every length must
//! use its shortest form, and `decode` must consume its input exactly.

use thiserror::Error;

/// Errors that can occur while decoding RLP data
#[derive(Error, Debug, PartialEq, Eq)]
pub enum RlpError {
    #[error("unexpected end of input")]
    UnexpectedEof,

    #[error("trailing bytes after item: {0} left over")]
    TrailingBytes(usize),

    #[error("non-canonical encoding: {0}")]
    NonCanonical(&'static str),

    #[error("length prefix too large")]
    LengthOverflow,

    #[error("expected byte string, found list")]
    ExpectedBytes,

    #[error("expected list, found byte string")]
    ExpectedList,

    #[error("invalid unsigned integer: {0}")]
    InvalidUint(&'static str),
}

/// A decoded RLP item: a byte string or a list of items
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Rlp {
    Bytes(Vec<u8>),
    List(Vec<Rlp>),
}

impl Rlp {
    /// Byte-string item from anything byte-like
    pub fn bytes(data: impl Into<Vec<u8>>) -> Self {
        Rlp::Bytes(data.into())
    }

    /// Byte-string item holding the minimal big-endian form of `value`.
    /// Zero encodes as the empty string.
    pub fn uint(value: u64) -> Self {
        let be = value.to_be_bytes();
        let skip = be.iter().take_while(|b| **b == 0).count();
        Rlp::Bytes(be[skip..].to_vec())
    }

    /// Borrow the byte-string payload
    pub fn as_bytes(&self) -> Result<&[u8], RlpError> {
        match self {
            Rlp::Bytes(b) => Ok(b),
            Rlp::List(_) => Err(RlpError::ExpectedBytes),
        }
    }

    /// Borrow the list items
    pub fn as_list(&self) -> Result<&[Rlp], RlpError> {
        match self {
            Rlp::List(items) => Ok(items),
            Rlp::Bytes(_) => Err(RlpError::ExpectedList),
        }
    }

    /// Interpret a byte-string item as a minimal big-endian unsigned integer
    pub fn as_uint(&self) -> Result<u64, RlpError> {
        let bytes = self.as_bytes()?;
        if bytes.len() > 8 {
            return Err(RlpError::InvalidUint("more than 8 bytes"));
        }
        if bytes.first() == Some(&0) {
            return Err(RlpError::InvalidUint("leading zero"));
        }
        let mut value = 0u64;
        for b in bytes {
            value = (value << 8) | u64::from(*b);
        }
        Ok(value)
    }
}

/// Encode an item to its canonical RLP byte form
pub fn encode(item: &Rlp) -> Vec<u8> {
    match item {
        Rlp::Bytes(data) => {
            if data.len() == 1 && data[0] < 0x80 {
                data.clone()
            } else {
                let mut out = length_prefix(data.len(), 0x80);
                out.extend_from_slice(data);
                out
            }
        }
        Rlp::List(items) => {
            let mut payload = Vec::new();
            for item in items {
                payload.extend_from_slice(&encode(item));
            }
            let mut out = length_prefix(payload.len(), 0xc0);
            out.extend_from_slice(&payload);
            out
        }
    }
}

/// Decode a single item, requiring the input to be consumed exactly
pub fn decode(data: &[u8]) -> Result<Rlp, RlpError> {
    let (item, consumed) = decode_at(data)?;
    if consumed != data.len() {
        return Err(RlpError::TrailingBytes(data.len() - consumed));
    }
    Ok(item)
}

fn length_prefix(len: usize, offset: u8) -> Vec<u8> {
    if len <= 55 {
        vec![offset + len as u8]
    } else {
        let be = (len as u64).to_be_bytes();
        let skip = be.iter().take_while(|b| **b == 0).count();
        let mut out = vec![offset + 55 + (8 - skip) as u8];
        out.extend_from_slice(&be[skip..]);
        out
    }
}

/// Decode the item starting at the head of `data`, returning it together
/// with the number of bytes consumed.
fn decode_at(data: &[u8]) -> Result<(Rlp, usize), RlpError> {
    let first = *data.first().ok_or(RlpError::UnexpectedEof)?;
    match first {
        // single byte, its own encoding
        0x00..=0x7f => Ok((Rlp::Bytes(vec![first]), 1)),
        // short string
        0x80..=0xb7 => {
            let len = (first - 0x80) as usize;
            let payload = slice(data, 1, len)?;
            if len == 1 && payload[0] < 0x80 {
                return Err(RlpError::NonCanonical("single byte below 0x80 must encode itself"));
            }
            Ok((Rlp::Bytes(payload.to_vec()), 1 + len))
        }
        // long string
        0xb8..=0xbf => {
            let (len, header) = long_length(data, first - 0xb7)?;
            let payload = slice(data, header, len)?;
            Ok((Rlp::Bytes(payload.to_vec()), header + len))
        }
        // short list
        0xc0..=0xf7 => {
            let len = (first - 0xc0) as usize;
            let payload = slice(data, 1, len)?;
            Ok((Rlp::List(decode_list_payload(payload)?), 1 + len))
        }
        // long list
        0xf8..=0xff => {
            let (len, header) = long_length(data, first - 0xf7)?;
            let payload = slice(data, header, len)?;
            Ok((Rlp::List(decode_list_payload(payload)?), header + len))
        }
    }
}

fn decode_list_payload(mut payload: &[u8]) -> Result<Vec<Rlp>, RlpError> {
    let mut items = Vec::new();
    while !payload.is_empty() {
        let (item, consumed) = decode_at(payload)?;
        items.push(item);
        payload = &payload[consumed..];
    }
    Ok(items)
}

/// Read a long-form length of `len_len` bytes; returns (length, header size)
fn long_length(data: &[u8], len_len: u8) -> Result<(usize, usize), RlpError> {
    let len_len = len_len as usize;
    if len_len > std::mem::size_of::<usize>() {
        return Err(RlpError::LengthOverflow);
    }
    let len_bytes = slice(data, 1, len_len)?;
    if len_bytes[0] == 0 {
        return Err(RlpError::NonCanonical("length has leading zero"));
    }
    let mut len = 0usize;
    for b in len_bytes {
        len = (len << 8) | *b as usize;
    }
    if len <= 55 {
        return Err(RlpError::NonCanonical("long form used for short length"));
    }
    Ok((len, 1 + len_len))
}

fn slice(data: &[u8], start: usize, len: usize) -> Result<&[u8], RlpError> {
    let end = start.checked_add(len).ok_or(RlpError::LengthOverflow)?;
    data.get(start..end).ok_or(RlpError::UnexpectedEof)
}
