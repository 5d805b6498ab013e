// Copyright (c) 2026 Intel Corporation
//
// SPDX-License-Identifier: Apache-2.0 or MIT

//! X.509 v3 alternative-name extensions.
//!
//! Name resolution and identity matching only read the Subject and Issuer
//! Alternative Name extensions. Both carry a `GeneralNames` body:
//!
//! ```asn1
//! SubjectAltName ::= GeneralNames
//! IssuerAltName  ::= GeneralNames
//! GeneralNames   ::= SEQUENCE SIZE (1..MAX) OF GeneralName
//! ```

use alloc::vec::Vec;

use const_oid::ObjectIdentifier;
use der::asn1::OctetString;
use der::{Decode, DecodeValue, EncodeValue, FixedTag, Header, Length, Reader, Sequence, Tag, Writer};

use crate::certificate::name::GeneralNames;
use crate::certificate::Certificate;
use crate::error::{Error, Result};

/// Subject Alternative Name (2.5.29.17).
pub const SUBJECT_ALT_NAME: ObjectIdentifier = ObjectIdentifier::new_unwrap("2.5.29.17");

/// Issuer Alternative Name (2.5.29.18).
pub const ISSUER_ALT_NAME: ObjectIdentifier = ObjectIdentifier::new_unwrap("2.5.29.18");

/// One `Extension` of a v3 certificate. `critical` defaults to false and is
/// omitted from the encoding when unset.
#[derive(Debug, Clone, PartialEq, Eq, Sequence)]
pub struct Extension {
    pub extn_id: ObjectIdentifier,
    #[asn1(default = "not_critical")]
    pub critical: bool,
    pub extn_value: OctetString,
}

fn not_critical() -> bool {
    false
}

impl Extension {
    pub fn new(extn_id: ObjectIdentifier, critical: bool, value: Vec<u8>) -> Result<Self> {
        let extn_value = OctetString::new(value).map_err(Error::Asn1)?;
        Ok(Self {
            extn_id,
            critical,
            extn_value,
        })
    }

    /// DER body carried in `extnValue`.
    pub fn value(&self) -> &[u8] {
        self.extn_value.as_bytes()
    }
}

/// The `[3]` extension list, kept in encoded order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Extensions(Vec<Extension>);

impl Extensions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, extension: Extension) {
        self.0.push(extension);
    }

    pub fn iter(&self) -> core::slice::Iter<'_, Extension> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// First extension with `oid`.
    pub fn find(&self, oid: &ObjectIdentifier) -> Option<&Extension> {
        self.iter().find(|ext| ext.extn_id == *oid)
    }

    /// The extension with `oid`, or `None` when it is missing or repeated.
    pub fn find_unique(&self, oid: &ObjectIdentifier) -> Option<&Extension> {
        let mut hits = self.iter().filter(|ext| ext.extn_id == *oid);
        let hit = hits.next()?;
        if hits.next().is_some() {
            log::debug!("extension {} appears more than once", oid);
            return None;
        }
        Some(hit)
    }
}

impl<'a> DecodeValue<'a> for Extensions {
    fn decode_value<R: Reader<'a>>(reader: &mut R, header: Header) -> der::Result<Self> {
        Vec::<Extension>::decode_value(reader, header).map(Self)
    }
}

impl EncodeValue for Extensions {
    fn value_len(&self) -> der::Result<Length> {
        self.0.value_len()
    }

    fn encode_value(&self, writer: &mut impl Writer) -> der::Result<()> {
        self.0.encode_value(writer)
    }
}

impl FixedTag for Extensions {
    const TAG: Tag = Tag::Sequence;
}

/// OID of the alternative-name extension for the subject or the issuer.
pub fn alt_name_oid(for_issuer: bool) -> ObjectIdentifier {
    if for_issuer {
        ISSUER_ALT_NAME
    } else {
        SUBJECT_ALT_NAME
    }
}

/// Decode the Subject (or Issuer) Alternative Name list of `cert`.
///
/// Returns `None` when the extension is missing, appears more than once, or
/// does not decode. The list is owned by the caller and freed when dropped.
pub fn alt_names(cert: &Certificate, for_issuer: bool) -> Option<GeneralNames> {
    let oid = alt_name_oid(for_issuer);
    let extension = cert.extensions()?.find_unique(&oid)?;
    match GeneralNames::from_der(extension.value()) {
        Ok(names) => Some(names),
        Err(e) => {
            log::debug!("ignoring undecodable extension {}: {}", oid, e);
            None
        }
    }
}
