// Copyright (c) 2026 Intel Corporation
//
// SPDX-License-Identifier: Apache-2.0 or MIT

//! Distinguished names and alternative names.
//!
//! This module provides parsing and representation for:
//! - RDNSequence (Distinguished Names) and its flattened entry view
//! - RelativeDistinguishedName (RDN)
//! - AttributeTypeAndValue, with the value kept as a typed [`Asn1String`]
//! - GeneralName / GeneralNames as carried by the subject and issuer
//!   alternative-name extensions

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use const_oid::ObjectIdentifier;
use der::{
    Decode, DecodeValue, Encode, EncodeValue, ErrorKind, Header, Length, Reader, Sequence, Tag,
    TagNumber, Tagged, Writer,
};

use super::string::{self, tags, Asn1String, Rendering};

// ============================================================================
// Common Attribute Type OIDs (RFC 5280, Appendix A.1)
// ============================================================================

/// Common Name (CN) - 2.5.4.3
pub const CN: ObjectIdentifier = ObjectIdentifier::new_unwrap("2.5.4.3");

/// Surname (SN) - 2.5.4.4
pub const SURNAME: ObjectIdentifier = ObjectIdentifier::new_unwrap("2.5.4.4");

/// Serial Number - 2.5.4.5
pub const SERIAL_NUMBER: ObjectIdentifier = ObjectIdentifier::new_unwrap("2.5.4.5");

/// Country (C) - 2.5.4.6
pub const COUNTRY_NAME: ObjectIdentifier = ObjectIdentifier::new_unwrap("2.5.4.6");

/// Locality (L) - 2.5.4.7
pub const LOCALITY_NAME: ObjectIdentifier = ObjectIdentifier::new_unwrap("2.5.4.7");

/// State or Province (ST) - 2.5.4.8
pub const STATE_OR_PROVINCE_NAME: ObjectIdentifier = ObjectIdentifier::new_unwrap("2.5.4.8");

/// Organization (O) - 2.5.4.10
pub const ORGANIZATION_NAME: ObjectIdentifier = ObjectIdentifier::new_unwrap("2.5.4.10");

/// Organizational Unit (OU) - 2.5.4.11
pub const ORGANIZATIONAL_UNIT_NAME: ObjectIdentifier = ObjectIdentifier::new_unwrap("2.5.4.11");

/// Domain Component (DC) - 0.9.2342.19200300.100.1.25
pub const DOMAIN_COMPONENT: ObjectIdentifier =
    ObjectIdentifier::new_unwrap("0.9.2342.19200300.100.1.25");

/// Email Address - 1.2.840.113549.1.9.1
pub const EMAIL_ADDRESS: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.2.840.113549.1.9.1");

// ============================================================================
// AttributeTypeAndValue - RFC 5280 Section 4.1.2.4
// ============================================================================

/// AttributeTypeAndValue represents a single attribute in an RDN.
///
/// The value keeps its universal tag byte so that string types not
/// representable in [`der::Tag`] (UniversalString 0x1C) survive decoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeTypeAndValue {
    /// Attribute type (OID)
    pub oid: ObjectIdentifier,
    value: Asn1String,
}

impl<'a> DecodeValue<'a> for AttributeTypeAndValue {
    fn decode_value<R: Reader<'a>>(reader: &mut R, header: Header) -> der::Result<Self> {
        reader.read_nested(header.length, |nested| {
            let oid = ObjectIdentifier::decode(nested)?;
            if nested.is_finished() {
                return Err(ErrorKind::Length { tag: Tag::Sequence }.into());
            }
            let value = string::read_tlv(nested)?;
            Ok(Self { oid, value })
        })
    }
}

impl EncodeValue for AttributeTypeAndValue {
    fn value_len(&self) -> der::Result<Length> {
        self.oid.encoded_len()? + self.value.encoded_len()?
    }

    fn encode_value(&self, writer: &mut impl Writer) -> der::Result<()> {
        self.oid.encode(writer)?;
        writer.write(&self.value.to_tlv()?)
    }
}

impl Sequence<'_> for AttributeTypeAndValue {}

impl AttributeTypeAndValue {
    /// Create a new AttributeTypeAndValue from a typed string value.
    pub fn new(oid: ObjectIdentifier, value: Asn1String) -> Self {
        Self { oid, value }
    }

    /// Create a new AttributeTypeAndValue with a UTF8String value.
    pub fn new_utf8(oid: ObjectIdentifier, value: &str) -> Self {
        Self::new(oid, Asn1String::utf8(value))
    }

    /// Create a new AttributeTypeAndValue with a PrintableString value.
    pub fn new_printable(oid: ObjectIdentifier, value: &str) -> crate::Result<Self> {
        Ok(Self::new(oid, Asn1String::printable(value)?))
    }

    /// Create a new AttributeTypeAndValue with an IA5String value.
    pub fn new_ia5(oid: ObjectIdentifier, value: &str) -> crate::Result<Self> {
        Ok(Self::new(oid, Asn1String::ia5(value)?))
    }

    /// The typed attribute value.
    pub fn value(&self) -> &Asn1String {
        &self.value
    }

    /// Render the attribute value as text.
    pub fn value_text(&self, rendering: Rendering) -> String {
        self.value.render(rendering)
    }

    /// Get a short name for the attribute type if known.
    pub fn attr_name(&self) -> &str {
        match self.oid {
            CN => "CN",
            SURNAME => "SN",
            SERIAL_NUMBER => "SERIALNUMBER",
            COUNTRY_NAME => "C",
            LOCALITY_NAME => "L",
            STATE_OR_PROVINCE_NAME => "ST",
            ORGANIZATION_NAME => "O",
            ORGANIZATIONAL_UNIT_NAME => "OU",
            DOMAIN_COMPONENT => "DC",
            EMAIL_ADDRESS => "emailAddress",
            _ => "OID",
        }
    }
}

impl fmt::Display for AttributeTypeAndValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = self.value_text(Rendering::Utf8Convert);
        match self.attr_name() {
            "OID" => write!(f, "{}={}", self.oid, value),
            name => write!(f, "{}={}", name, value),
        }
    }
}

// ============================================================================
// RelativeDistinguishedName - RFC 5280 Section 4.1.2.4
// ============================================================================

/// RelativeDistinguishedName (RDN) is a SET OF AttributeTypeAndValue.
///
/// Members are kept in encoded order and are not re-sorted, so a name
/// re-encodes to the bytes it was decoded from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelativeDistinguishedName {
    /// Attributes, in encoded order
    pub attributes: Vec<AttributeTypeAndValue>,
}

impl RelativeDistinguishedName {
    /// Create a new RDN with a single attribute.
    pub fn new(attr: AttributeTypeAndValue) -> Self {
        Self::from_attributes(alloc::vec![attr])
    }

    /// Create a new RDN from multiple attributes, kept in the given order.
    pub fn from_attributes(attributes: Vec<AttributeTypeAndValue>) -> Self {
        Self { attributes }
    }

    /// Check if this is a multi-valued RDN.
    pub fn is_multi_valued(&self) -> bool {
        self.attributes.len() > 1
    }
}

impl<'a> DecodeValue<'a> for RelativeDistinguishedName {
    fn decode_value<R: Reader<'a>>(reader: &mut R, header: Header) -> der::Result<Self> {
        reader.read_nested(header.length, |reader| {
            let mut attributes = Vec::new();
            while !reader.is_finished() {
                attributes.push(AttributeTypeAndValue::decode(reader)?);
            }
            Ok(Self { attributes })
        })
    }
}

impl EncodeValue for RelativeDistinguishedName {
    fn value_len(&self) -> der::Result<Length> {
        let mut len = Length::ZERO;
        for attr in &self.attributes {
            len = (len + attr.encoded_len()?)?;
        }
        Ok(len)
    }

    fn encode_value(&self, writer: &mut impl Writer) -> der::Result<()> {
        for attr in &self.attributes {
            attr.encode(writer)?;
        }
        Ok(())
    }
}

impl der::FixedTag for RelativeDistinguishedName {
    const TAG: Tag = Tag::Set;
}

impl fmt::Display for RelativeDistinguishedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let attrs: Vec<String> = self
            .attributes
            .iter()
            .map(|a| alloc::format!("{}", a))
            .collect();
        write!(f, "{}", attrs.join("+"))
    }
}

// ============================================================================
// RDNSequence (Name) - RFC 5280 Section 4.1.2.4
// ============================================================================

/// RDNSequence represents a Distinguished Name (DN).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RDNSequence {
    /// Sequence of RDNs, in encoded order
    pub rdns: Vec<RelativeDistinguishedName>,
}

impl<'a> DecodeValue<'a> for RDNSequence {
    fn decode_value<R: Reader<'a>>(reader: &mut R, header: Header) -> der::Result<Self> {
        reader.read_nested(header.length, |reader| {
            let mut rdns = Vec::new();
            while !reader.is_finished() {
                rdns.push(RelativeDistinguishedName::decode(reader)?);
            }
            Ok(Self { rdns })
        })
    }
}

impl EncodeValue for RDNSequence {
    fn value_len(&self) -> der::Result<Length> {
        let mut len = Length::ZERO;
        for rdn in &self.rdns {
            len = (len + rdn.encoded_len()?)?;
        }
        Ok(len)
    }

    fn encode_value(&self, writer: &mut impl Writer) -> der::Result<()> {
        for rdn in &self.rdns {
            rdn.encode(writer)?;
        }
        Ok(())
    }
}

impl der::FixedTag for RDNSequence {
    const TAG: Tag = Tag::Sequence;
}

impl RDNSequence {
    /// Create a new empty RDNSequence.
    pub fn new() -> Self {
        Self { rdns: Vec::new() }
    }

    /// Build a name with one single-valued RDN per attribute, in order.
    pub fn from_attributes(attrs: Vec<AttributeTypeAndValue>) -> Self {
        let rdns = attrs
            .into_iter()
            .map(RelativeDistinguishedName::new)
            .collect();
        Self { rdns }
    }

    /// Add an RDN to the sequence.
    pub fn push(&mut self, rdn: RelativeDistinguishedName) {
        self.rdns.push(rdn);
    }

    /// All attribute entries, flattened in encoded order.
    ///
    /// The iterator is double-ended; `.rev()` visits the last-encoded entry
    /// first.
    pub fn entries(&self) -> impl DoubleEndedIterator<Item = &AttributeTypeAndValue> + '_ {
        self.rdns.iter().flat_map(|rdn| rdn.attributes.iter())
    }

    /// Number of attribute entries across all RDNs.
    pub fn entry_count(&self) -> usize {
        self.rdns.iter().map(|rdn| rdn.attributes.len()).sum()
    }

    /// Every entry with the given attribute type, in encoded order.
    pub fn entries_with(
        &self,
        oid: ObjectIdentifier,
    ) -> impl DoubleEndedIterator<Item = &AttributeTypeAndValue> + '_ {
        self.entries().filter(move |attr| attr.oid == oid)
    }

    /// The last-encoded Common Name, converted to UTF-8.
    pub fn common_name(&self) -> Option<String> {
        self.entries_with(CN)
            .next_back()
            .map(|attr| attr.value_text(Rendering::Utf8Convert))
    }
}

impl Default for RDNSequence {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RDNSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rdns: Vec<String> = self
            .rdns
            .iter()
            .rev()
            .map(|r| alloc::format!("{}", r))
            .collect();
        write!(f, "{}", rdns.join(", "))
    }
}

/// Type alias for Name (which is just RDNSequence in practice).
pub type Name = RDNSequence;

// ============================================================================
// GeneralName - RFC 5280 Section 4.2.1.6
// ============================================================================

/// otherName: a type OID and an explicitly tagged value.
///
/// ```asn1
/// OtherName ::= SEQUENCE {
///      type-id    OBJECT IDENTIFIER,
///      value      [0] EXPLICIT ANY DEFINED BY type-id }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OtherName {
    pub type_id: ObjectIdentifier,
    pub value: Asn1String,
}

const EXPLICIT_VALUE_TAG: u8 = 0xA0;

impl OtherName {
    fn decode_body<'a, R: Reader<'a>>(reader: &mut R) -> der::Result<Self> {
        let type_id = ObjectIdentifier::decode(reader)?;
        let outer = Header::decode(reader)?;
        if outer.tag
            != (Tag::ContextSpecific {
                constructed: true,
                number: TagNumber::N0,
            })
        {
            return Err(ErrorKind::TagUnexpected {
                expected: Some(Tag::ContextSpecific {
                    constructed: true,
                    number: TagNumber::N0,
                }),
                actual: outer.tag,
            }
            .into());
        }
        let value = reader.read_nested(outer.length, |inner| string::read_tlv(inner))?;
        Ok(Self { type_id, value })
    }

    fn body_len(&self) -> der::Result<Length> {
        let inner = self.value.encoded_len()?;
        let explicit = ((Length::ONE + inner.encoded_len()?)? + inner)?;
        self.type_id.encoded_len()? + explicit
    }

    fn encode_body(&self, writer: &mut impl Writer) -> der::Result<()> {
        self.type_id.encode(writer)?;
        writer.write_byte(EXPLICIT_VALUE_TAG)?;
        self.value.encoded_len()?.encode(writer)?;
        writer.write(&self.value.to_tlv()?)
    }
}

/// GeneralName represents the name forms of the alternative-name extensions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GeneralName {
    /// otherName `[0]`
    OtherName(OtherName),
    /// rfc822Name `[1]` - Email address
    Rfc822Name(Asn1String),
    /// dNSName `[2]` - DNS hostname
    DnsName(Asn1String),
    /// x400Address `[3]`
    X400Address(Vec<u8>),
    /// directoryName `[4]` - Distinguished Name
    DirectoryName(Name),
    /// ediPartyName `[5]`
    EdiPartyName(Vec<u8>),
    /// uniformResourceIdentifier `[6]` - URI
    Uri(Asn1String),
    /// iPAddress `[7]` - IPv4 or IPv6 address
    IpAddress(Vec<u8>),
    /// registeredID `[8]` - OID
    RegisteredId(ObjectIdentifier),
}

impl GeneralName {
    /// DNS name entry from text; rejects non-ASCII input.
    pub fn dns(value: &str) -> crate::Result<Self> {
        Ok(GeneralName::DnsName(Asn1String::ia5(value)?))
    }

    /// Email entry from text; rejects non-ASCII input.
    pub fn email(value: &str) -> crate::Result<Self> {
        Ok(GeneralName::Rfc822Name(Asn1String::ia5(value)?))
    }

    /// URI entry from text; rejects non-ASCII input.
    pub fn uri(value: &str) -> crate::Result<Self> {
        Ok(GeneralName::Uri(Asn1String::ia5(value)?))
    }

    /// Other-name entry.
    pub fn other(type_id: ObjectIdentifier, value: Asn1String) -> Self {
        GeneralName::OtherName(OtherName { type_id, value })
    }

    fn tag_number(&self) -> TagNumber {
        match self {
            GeneralName::OtherName(_) => TagNumber::N0,
            GeneralName::Rfc822Name(_) => TagNumber::N1,
            GeneralName::DnsName(_) => TagNumber::N2,
            GeneralName::X400Address(_) => TagNumber::N3,
            GeneralName::DirectoryName(_) => TagNumber::N4,
            GeneralName::EdiPartyName(_) => TagNumber::N5,
            GeneralName::Uri(_) => TagNumber::N6,
            GeneralName::IpAddress(_) => TagNumber::N7,
            GeneralName::RegisteredId(_) => TagNumber::N8,
        }
    }

    /// Format an IP address entry (4 bytes for IPv4, 16 bytes for IPv6).
    pub fn ip_address_string(&self) -> Option<String> {
        if let GeneralName::IpAddress(bytes) = self {
            match bytes.len() {
                4 => Some(alloc::format!(
                    "{}.{}.{}.{}",
                    bytes[0],
                    bytes[1],
                    bytes[2],
                    bytes[3]
                )),
                16 => {
                    let parts: Vec<String> = bytes
                        .chunks(2)
                        .map(|c| alloc::format!("{:x}", u16::from_be_bytes([c[0], c[1]])))
                        .collect();
                    Some(parts.join(":"))
                }
                _ => None,
            }
        } else {
            None
        }
    }
}

fn ia5_value<'a, R: Reader<'a>>(reader: &mut R, length: Length) -> der::Result<Asn1String> {
    Ok(Asn1String::new(tags::IA5_STRING, reader.read_vec(length)?))
}

impl<'a> DecodeValue<'a> for GeneralName {
    fn decode_value<R: Reader<'a>>(reader: &mut R, header: Header) -> der::Result<Self> {
        let tag = header.tag;

        if !tag.is_context_specific() {
            return Err(ErrorKind::TagUnexpected {
                expected: None,
                actual: tag,
            }
            .into());
        }

        match tag.number() {
            TagNumber::N0 => {
                let other = reader.read_nested(header.length, OtherName::decode_body)?;
                Ok(GeneralName::OtherName(other))
            }
            TagNumber::N1 => Ok(GeneralName::Rfc822Name(ia5_value(reader, header.length)?)),
            TagNumber::N2 => Ok(GeneralName::DnsName(ia5_value(reader, header.length)?)),
            TagNumber::N3 => {
                let bytes = reader.read_vec(header.length)?;
                Ok(GeneralName::X400Address(bytes))
            }
            TagNumber::N4 => {
                // EXPLICIT [4] Name: the inner bytes start with a SEQUENCE.
                let name = reader.read_nested(header.length, Name::decode)?;
                Ok(GeneralName::DirectoryName(name))
            }
            TagNumber::N5 => {
                let bytes = reader.read_vec(header.length)?;
                Ok(GeneralName::EdiPartyName(bytes))
            }
            TagNumber::N6 => Ok(GeneralName::Uri(ia5_value(reader, header.length)?)),
            TagNumber::N7 => {
                let bytes = reader.read_vec(header.length)?;
                Ok(GeneralName::IpAddress(bytes))
            }
            TagNumber::N8 => {
                let bytes = reader.read_slice(header.length)?;
                let oid = ObjectIdentifier::from_bytes(bytes)
                    .map_err(|_| ErrorKind::Value { tag })?;
                Ok(GeneralName::RegisteredId(oid))
            }
            _ => Err(ErrorKind::TagUnexpected {
                expected: None,
                actual: tag,
            }
            .into()),
        }
    }
}

impl EncodeValue for GeneralName {
    fn value_len(&self) -> der::Result<Length> {
        match self {
            GeneralName::OtherName(other) => other.body_len(),
            GeneralName::Rfc822Name(s) | GeneralName::DnsName(s) | GeneralName::Uri(s) => {
                s.len().try_into()
            }
            GeneralName::X400Address(bytes) => bytes.len().try_into(),
            GeneralName::DirectoryName(name) => name.encoded_len(),
            GeneralName::EdiPartyName(bytes) => bytes.len().try_into(),
            GeneralName::IpAddress(bytes) => bytes.len().try_into(),
            GeneralName::RegisteredId(oid) => oid.as_bytes().len().try_into(),
        }
    }

    fn encode_value(&self, writer: &mut impl Writer) -> der::Result<()> {
        match self {
            GeneralName::OtherName(other) => other.encode_body(writer),
            GeneralName::Rfc822Name(s) | GeneralName::DnsName(s) | GeneralName::Uri(s) => {
                writer.write(s.as_bytes())
            }
            GeneralName::X400Address(bytes) => writer.write(bytes),
            GeneralName::DirectoryName(name) => name.encode(writer),
            GeneralName::EdiPartyName(bytes) => writer.write(bytes),
            GeneralName::IpAddress(bytes) => writer.write(bytes),
            GeneralName::RegisteredId(oid) => writer.write(oid.as_bytes()),
        }
    }
}

impl Tagged for GeneralName {
    fn tag(&self) -> Tag {
        Tag::ContextSpecific {
            constructed: matches!(
                self,
                GeneralName::OtherName(_)
                    | GeneralName::X400Address(_)
                    | GeneralName::DirectoryName(_)
                    | GeneralName::EdiPartyName(_)
            ),
            number: self.tag_number(),
        }
    }
}

impl fmt::Display for GeneralName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GeneralName::OtherName(other) => {
                write!(f, "othername:{};{}", other.type_id, other.value)
            }
            GeneralName::Rfc822Name(email) => write!(f, "email:{}", email),
            GeneralName::DnsName(dns) => write!(f, "DNS:{}", dns),
            GeneralName::X400Address(_) => write!(f, "X400:<unsupported>"),
            GeneralName::DirectoryName(name) => write!(f, "DirName:{}", name),
            GeneralName::EdiPartyName(_) => write!(f, "EDI:<unsupported>"),
            GeneralName::Uri(uri) => write!(f, "URI:{}", uri),
            GeneralName::IpAddress(_) => match self.ip_address_string() {
                Some(ip) => write!(f, "IP:{}", ip),
                None => write!(f, "IP:<invalid>"),
            },
            GeneralName::RegisteredId(oid) => write!(f, "RegID:{}", oid),
        }
    }
}

// ============================================================================
// GeneralNames - RFC 5280 Section 4.2.1.6 / 4.2.1.7
// ============================================================================

/// Body of the SubjectAltName and IssuerAltName extensions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneralNames {
    /// List of alternative names, in encoded order
    pub names: Vec<GeneralName>,
}

impl GeneralNames {
    pub fn new(names: Vec<GeneralName>) -> Self {
        Self { names }
    }

    pub fn iter(&self) -> core::slice::Iter<'_, GeneralName> {
        self.names.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Get all DNS names.
    pub fn dns_names(&self) -> impl Iterator<Item = &Asn1String> {
        self.names.iter().filter_map(|n| match n {
            GeneralName::DnsName(dns) => Some(dns),
            _ => None,
        })
    }

    /// Get all IP addresses.
    pub fn ip_addresses(&self) -> impl Iterator<Item = &[u8]> {
        self.names.iter().filter_map(|n| match n {
            GeneralName::IpAddress(ip) => Some(ip.as_slice()),
            _ => None,
        })
    }
}

impl<'a> DecodeValue<'a> for GeneralNames {
    fn decode_value<R: Reader<'a>>(reader: &mut R, header: Header) -> der::Result<Self> {
        let mut names = Vec::new();
        reader.read_nested(header.length, |reader| {
            while !reader.is_finished() {
                let name_header = Header::decode(reader)?;
                let name = GeneralName::decode_value(reader, name_header)?;
                names.push(name);
            }
            Ok(())
        })?;
        Ok(Self { names })
    }
}

impl EncodeValue for GeneralNames {
    fn value_len(&self) -> der::Result<Length> {
        let mut len = Length::ZERO;
        for name in &self.names {
            len = (len + name.encoded_len()?)?;
        }
        Ok(len)
    }

    fn encode_value(&self, writer: &mut impl Writer) -> der::Result<()> {
        for name in &self.names {
            name.encode(writer)?;
        }
        Ok(())
    }
}

impl der::FixedTag for GeneralNames {
    const TAG: Tag = Tag::Sequence;
}

impl fmt::Display for GeneralNames {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<String> = self
            .names
            .iter()
            .map(|n| alloc::format!("{}", n))
            .collect();
        write!(f, "{}", names.join(", "))
    }
}

// ============================================================================
// Tests
// ============================================================================
