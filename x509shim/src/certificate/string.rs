// Copyright (c) 2026 Intel Corporation
//
// SPDX-License-Identifier: Apache-2.0 or MIT

//! Typed ASN.1 string values and their text rendering.
//!
//! Attribute values in distinguished names and most alternative-name entries
//! are carried as an [`Asn1String`]: the universal tag byte plus the content
//! octets, exactly as encoded. Keeping the raw form lets two rendering modes
//! coexist:
//!
//! - [`Rendering::Utf8Convert`] decodes characters according to the string
//!   type and emits UTF-8.
//! - [`Rendering::Raw`] decodes the same characters but writes anything above
//!   0xFF as a `\UXXXX` / `\WXXXXXXXX` escape and everything else as the raw
//!   byte; the resulting byte stream is then read as UTF-8.

extern crate alloc;

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use der::{
    asn1::{Ia5String, PrintableString},
    Decode, Encode, ErrorKind, Length, Reader, SliceReader,
};

use crate::error::{Error, NameError, ParseError, Result};

/// Universal tag bytes used by this crate.
pub mod tags {
    pub const BOOLEAN: u8 = 0x01;
    pub const OCTET_STRING: u8 = 0x04;
    pub const NULL: u8 = 0x05;
    pub const OBJECT_IDENTIFIER: u8 = 0x06;
    pub const UTF8_STRING: u8 = 0x0C;
    pub const NUMERIC_STRING: u8 = 0x12;
    pub const PRINTABLE_STRING: u8 = 0x13;
    pub const TELETEX_STRING: u8 = 0x14;
    pub const IA5_STRING: u8 = 0x16;
    pub const UTC_TIME: u8 = 0x17;
    pub const GENERALIZED_TIME: u8 = 0x18;
    pub const VISIBLE_STRING: u8 = 0x1A;
    pub const UNIVERSAL_STRING: u8 = 0x1C;
    pub const BMP_STRING: u8 = 0x1E;
}

/// How an [`Asn1String`] is turned into text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rendering {
    /// Convert embedded encodings to UTF-8.
    Utf8Convert,
    /// No conversion: wide characters are escaped, narrow ones copied.
    Raw,
}

/// A typed string value: universal tag byte and content octets.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Asn1String {
    tag: u8,
    data: Vec<u8>,
}

impl Asn1String {
    /// Wrap content octets with the given universal tag byte.
    pub fn new(tag: u8, data: impl Into<Vec<u8>>) -> Self {
        Self {
            tag,
            data: data.into(),
        }
    }

    /// UTF8String value.
    pub fn utf8(value: &str) -> Self {
        Self::new(tags::UTF8_STRING, value.as_bytes())
    }

    /// PrintableString value; rejects characters outside the printable set.
    pub fn printable(value: &str) -> Result<Self> {
        PrintableString::new(value)
            .map_err(|_| Error::invalid_attribute(format!("not printable: {:?}", value)))?;
        Ok(Self::new(tags::PRINTABLE_STRING, value.as_bytes()))
    }

    /// IA5String value; rejects non-ASCII input.
    pub fn ia5(value: &str) -> Result<Self> {
        Ia5String::new(value)
            .map_err(|_| Error::invalid_attribute(format!("not IA5: {:?}", value)))?;
        Ok(Self::new(tags::IA5_STRING, value.as_bytes()))
    }

    /// BMPString value (UTF-16BE); characters outside the BMP are rejected.
    pub fn bmp(value: &str) -> Result<Self> {
        let mut data = Vec::with_capacity(value.len() * 2);
        for ch in value.chars() {
            let unit = u16::try_from(u32::from(ch))
                .map_err(|_| Error::invalid_attribute(format!("outside BMP: {:?}", ch)))?;
            data.extend_from_slice(&unit.to_be_bytes());
        }
        Ok(Self::new(tags::BMP_STRING, data))
    }

    /// UniversalString value (UCS-4BE).
    pub fn universal(value: &str) -> Self {
        let data = value
            .chars()
            .flat_map(|ch| u32::from(ch).to_be_bytes())
            .collect::<Vec<u8>>();
        Self::new(tags::UNIVERSAL_STRING, data)
    }

    /// The universal tag byte.
    pub fn tag(&self) -> u8 {
        self.tag
    }

    /// The content octets.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Whether the value is one of the types that carry text or opaque
    /// octets, as opposed to BOOLEAN / NULL / OBJECT IDENTIFIER.
    pub fn is_string_like(&self) -> bool {
        !matches!(
            self.tag,
            tags::BOOLEAN | tags::NULL | tags::OBJECT_IDENTIFIER
        )
    }

    /// Parse exactly one TLV.
    ///
    /// Only low-tag-number identifiers are accepted. Unlike [`der::Tag`],
    /// any universal tag byte is kept (UniversalString 0x1C included).
    pub fn from_tlv(bytes: &[u8]) -> Result<Self> {
        let (&tag, rest) = bytes
            .split_first()
            .ok_or_else(|| Error::ParseError(ParseError::InvalidLength("empty TLV".into())))?;
        if tag & 0x1F == 0x1F {
            return Err(Error::ParseError(ParseError::UnsupportedTag(tag)));
        }
        Ok(Self::new(tag, split_value(rest)?))
    }

    /// Encode as a single TLV.
    pub fn to_tlv(&self) -> der::Result<Vec<u8>> {
        let mut out = Vec::with_capacity(self.data.len() + 6);
        out.push(self.tag);
        Length::try_from(self.data.len())?.encode_to_vec(&mut out)?;
        out.extend_from_slice(&self.data);
        Ok(out)
    }

    /// Length of the TLV encoding.
    pub(crate) fn encoded_len(&self) -> der::Result<Length> {
        let value_len = Length::try_from(self.data.len())?;
        (Length::ONE + value_len.encoded_len()?)? + value_len
    }

    /// Render as text. Malformed content renders as the empty string.
    pub fn render(&self, rendering: Rendering) -> String {
        let mut out = Vec::with_capacity(self.data.len());
        match self.write_chars(rendering, &mut out) {
            Ok(()) => String::from_utf8_lossy(&out).into_owned(),
            Err(_) => {
                log::debug!(
                    "unrenderable string value (tag 0x{:02x}, {} bytes)",
                    self.tag,
                    self.data.len()
                );
                String::new()
            }
        }
    }

    /// Render with UTF-8 conversion, failing on malformed content.
    pub fn to_utf8(&self) -> Result<String> {
        let mut out = Vec::with_capacity(self.data.len());
        if self.write_chars(Rendering::Utf8Convert, &mut out).is_err() {
            let err = NameError::InvalidEncoding(format!("tag 0x{:02x}", self.tag));
            return Err(Error::NameError(err));
        }
        String::from_utf8(out).map_err(|_| Error::invalid_attribute("invalid UTF-8 output"))
    }

    fn write_chars(&self, rendering: Rendering, out: &mut Vec<u8>) -> core::result::Result<(), ()> {
        let mut emit = |code_point: u32| match rendering {
            Rendering::Utf8Convert => {
                let ch = char::from_u32(code_point).unwrap_or(char::REPLACEMENT_CHARACTER);
                let mut buf = [0u8; 4];
                out.extend_from_slice(ch.encode_utf8(&mut buf).as_bytes());
            }
            Rendering::Raw => {
                if code_point > 0xFFFF {
                    out.extend_from_slice(format!("\\W{:08X}", code_point).as_bytes());
                } else if code_point > 0xFF {
                    out.extend_from_slice(format!("\\U{:04X}", code_point).as_bytes());
                } else {
                    out.push(code_point as u8);
                }
            }
        };

        match char_width(self.tag) {
            CharWidth::Utf8 => {
                let text = core::str::from_utf8(&self.data).map_err(|_| ())?;
                text.chars().for_each(|ch| emit(u32::from(ch)));
            }
            CharWidth::Fixed(width) => {
                if self.data.len() % width != 0 {
                    return Err(());
                }
                for chunk in self.data.chunks(width) {
                    let code_point = chunk
                        .iter()
                        .fold(0u32, |acc, byte| (acc << 8) | u32::from(*byte));
                    emit(code_point);
                }
            }
        }
        Ok(())
    }
}

enum CharWidth {
    Utf8,
    Fixed(usize),
}

/// Bytes per character for each universal string type; every type without
/// a defined width is read one byte at a time.
fn char_width(tag: u8) -> CharWidth {
    match tag {
        tags::UTF8_STRING => CharWidth::Utf8,
        tags::UNIVERSAL_STRING => CharWidth::Fixed(4),
        tags::BMP_STRING => CharWidth::Fixed(2),
        _ => CharWidth::Fixed(1),
    }
}

/// Split `length || value` and insist nothing trails the value.
fn split_value(bytes: &[u8]) -> Result<&[u8]> {
    let mut reader = SliceReader::new(bytes)?;
    let length = Length::decode(&mut reader)?;
    let value = reader.read_slice(length)?;
    reader.finish(value).map_err(|_| {
        Error::ParseError(ParseError::InvalidLength(format!(
            "trailing data after {} byte value",
            value.len()
        )))
    })
}

/// Read one TLV from a DER reader without going through [`der::Tag`].
pub(crate) fn read_tlv<'a, R: Reader<'a>>(reader: &mut R) -> der::Result<Asn1String> {
    let tag: u8 = reader.read_byte()?;
    if tag & 0x1F == 0x1F {
        return Err(ErrorKind::TagUnknown { byte: tag }.into());
    }
    let length = Length::decode(reader)?;
    let data = reader.read_vec(length)?;
    Ok(Asn1String::new(tag, data))
}

impl fmt::Display for Asn1String {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(Rendering::Utf8Convert))
    }
}
