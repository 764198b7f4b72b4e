//! Binary encoding of identifiers, as embedded in save-file records.
//!
//! Layout, all integers little-endian, fields always present and in this order:
//!
//! | field        | encoding                                              |
//! |--------------|-------------------------------------------------------|
//! | kind         | `i32` ordinal                                         |
//! | numeric key  | `i64`                                                 |
//! | string key   | 7-bit varint byte length, then UTF-8 bytes            |
//!
//! An absent string key is written as the empty string and the empty string
//! reads back as absent. The length prefix uses 7 bits per byte with the high
//! bit as continuation flag, at most 5 bytes, and never exceeds `i32::MAX`.

use std::io::{Read, Write};

use crate::datatype::KindTag;
use crate::error::{IdentifierError, Result};
use crate::identifier::Identifier;
use crate::settings::CodecSettings;

const MAX_VARINT_BYTES: usize = 5;

// ------------- Writing -------------
pub fn write_identifier<W: Write>(writer: &mut W, identifier: &Identifier) -> Result<()> {
    writer.write_all(&identifier.kind().ordinal().to_le_bytes())?;
    writer.write_all(&identifier.numeric_key().to_le_bytes())?;
    write_string(writer, identifier.normalized_string_key())
}

fn write_string<W: Write>(writer: &mut W, value: &str) -> Result<()> {
    let length = u32::try_from(value.len())
        .ok()
        .filter(|length| *length <= i32::MAX as u32)
        .ok_or_else(|| {
            IdentifierError::Invariant(format!(
                "string key of {} bytes is too long to encode",
                value.len()
            ))
        })?;
    write_varint(writer, length)?;
    writer.write_all(value.as_bytes())?;
    Ok(())
}

fn write_varint<W: Write>(writer: &mut W, mut value: u32) -> Result<()> {
    let mut buffer = [0u8; MAX_VARINT_BYTES];
    let mut used = 0;
    while value >= 0x80 {
        buffer[used] = (value as u8 & 0x7F) | 0x80;
        value >>= 7;
        used += 1;
    }
    buffer[used] = value as u8;
    writer.write_all(&buffer[..=used])?;
    Ok(())
}

/// Encodes an identifier into a fresh buffer.
pub fn encode(identifier: &Identifier) -> Result<Vec<u8>> {
    let mut bytes = Vec::with_capacity(4 + 8 + 1 + identifier.normalized_string_key().len());
    write_identifier(&mut bytes, identifier)?;
    Ok(bytes)
}

// ------------- Reading -------------
pub fn read_identifier<R: Read>(reader: &mut R) -> Result<Identifier> {
    read_identifier_with(reader, &CodecSettings::default())
}

pub fn read_identifier_with<R: Read>(reader: &mut R, settings: &CodecSettings) -> Result<Identifier> {
    let kind = KindTag::from_ordinal(i32::from_le_bytes(read_array(reader, "kind")?));
    let numeric_key = i64::from_le_bytes(read_array(reader, "numeric key")?);
    let string_key = read_string(reader, settings.max_string_key_len)?;
    Ok(Identifier::new(kind, numeric_key, string_key))
}

/// Decodes exactly one identifier; leftover bytes make the buffer malformed.
pub fn decode(bytes: &[u8]) -> Result<Identifier> {
    let mut remaining = bytes;
    let identifier = read_identifier(&mut remaining)?;
    if !remaining.is_empty() {
        return Err(IdentifierError::MalformedStream(format!(
            "{} trailing bytes after identifier {}",
            remaining.len(),
            identifier
        )));
    }
    Ok(identifier)
}

fn read_array<R: Read, const N: usize>(reader: &mut R, field: &str) -> Result<[u8; N]> {
    let mut buffer = [0u8; N];
    reader
        .read_exact(&mut buffer)
        .map_err(|e| IdentifierError::MalformedStream(format!("reading {}: {}", field, e)))?;
    Ok(buffer)
}

fn read_varint<R: Read>(reader: &mut R) -> Result<u32> {
    let mut value: u32 = 0;
    for position in 0..MAX_VARINT_BYTES {
        let [byte] = read_array::<R, 1>(reader, "string key length")?;
        let bits = u32::from(byte & 0x7F);
        // the fifth byte may only contribute the top 4 bits
        if position == MAX_VARINT_BYTES - 1 && bits > 0x0F {
            return Err(IdentifierError::MalformedStream(String::from(
                "string key length overflows 32 bits",
            )));
        }
        value |= bits << (7 * position);
        if byte & 0x80 == 0 {
            return Ok(value);
        }
    }
    Err(IdentifierError::MalformedStream(String::from(
        "string key length prefix is longer than 5 bytes",
    )))
}

fn read_string<R: Read>(reader: &mut R, max_len: usize) -> Result<Option<String>> {
    let length = read_varint(reader)?;
    if length > i32::MAX as u32 {
        return Err(IdentifierError::MalformedStream(format!(
            "negative string key length {}",
            length as i32
        )));
    }
    let length = length as usize;
    if length > max_len {
        return Err(IdentifierError::MalformedStream(format!(
            "string key of {} bytes exceeds the limit of {}",
            length, max_len
        )));
    }
    if length == 0 {
        return Ok(None);
    }
    let mut buffer = vec![0u8; length];
    reader
        .read_exact(&mut buffer)
        .map_err(|e| IdentifierError::MalformedStream(format!("reading string key: {}", e)))?;
    String::from_utf8(buffer)
        .map(Some)
        .map_err(|e| IdentifierError::MalformedStream(format!("string key is not UTF-8: {}", e)))
}

impl Identifier {
    pub fn write_to<W: Write>(&self, writer: &mut W) -> Result<()> {
        write_identifier(writer, self)
    }
    pub fn read_from<R: Read>(reader: &mut R) -> Result<Self> {
        read_identifier(reader)
    }
}
