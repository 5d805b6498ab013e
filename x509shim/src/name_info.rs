// Copyright (c) 2026 Intel Corporation
//
// SPDX-License-Identifier: Apache-2.0 or MIT

//! Display and matching names derived from a certificate.
//!
//! Resolution runs three phases in a fixed order, stopping at the first
//! answer:
//!
//! 1. [`NameType::Simple`] only: the Subject (or Issuer) scanned from the
//!    last-encoded entry backwards. A Common Name wins outright; otherwise
//!    Organizational Unit, Organization, email address and finally any other
//!    attribute are tried, in that order.
//! 2. The Subject (or Issuer) Alternative Name extension, scanned forward
//!    for the first entry of the type the query expects.
//! 3. [`NameType::Email`] and [`NameType::Dns`] only: a reverse scan of the
//!    name for an email address or Common Name, rendered without UTF-8
//!    conversion.

extern crate alloc;

use alloc::string::{String, ToString};
use core::fmt;

use const_oid::ObjectIdentifier;

use crate::certificate::name::{
    AttributeTypeAndValue, GeneralName, CN, EMAIL_ADDRESS, ORGANIZATIONAL_UNIT_NAME,
    ORGANIZATION_NAME,
};
use crate::certificate::string::{Asn1String, Rendering};
use crate::certificate::Certificate;
use crate::x509::extensions::alt_names;
use crate::x509::oids::USER_PRINCIPAL_NAME_TEXT;

/// Kind of name requested from [`resolve`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum NameType {
    Simple = 0,
    Email = 1,
    UserPrincipalName = 2,
    Dns = 3,
    DnsFromAlternativeName = 4,
    Url = 5,
}

impl TryFrom<i32> for NameType {
    type Error = i32;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(NameType::Simple),
            1 => Ok(NameType::Email),
            2 => Ok(NameType::UserPrincipalName),
            3 => Ok(NameType::Dns),
            4 => Ok(NameType::DnsFromAlternativeName),
            5 => Ok(NameType::Url),
            other => Err(other),
        }
    }
}

impl fmt::Display for NameType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            NameType::Simple => "simple",
            NameType::Email => "email",
            NameType::UserPrincipalName => "upn",
            NameType::Dns => "dns",
            NameType::DnsFromAlternativeName => "dns-alt",
            NameType::Url => "url",
        };
        f.write_str(s)
    }
}

/// Resolve the `name_type` name of `cert`'s subject, or of its issuer when
/// `for_issuer` is set.
pub fn resolve(cert: &Certificate, name_type: NameType, for_issuer: bool) -> Option<String> {
    if name_type == NameType::Simple {
        if let Some(answer) = simple_name(cert, for_issuer) {
            log::trace!("{} name resolved from distinguished name", name_type);
            return Some(answer);
        }
    }

    if let Some(answer) = alternative_name(cert, name_type, for_issuer) {
        log::trace!("{} name resolved from alternative name", name_type);
        return Some(answer);
    }

    let fallback = match name_type {
        NameType::Email => EMAIL_ADDRESS,
        NameType::Dns => CN,
        _ => return None,
    };
    let answer = cert
        .name(for_issuer)
        .entries_with(fallback)
        .next_back()
        .map(|attr| attr.value_text(Rendering::Raw));
    if answer.is_some() {
        log::trace!("{} name resolved from single attribute", name_type);
    }
    answer
}

fn simple_name(cert: &Certificate, for_issuer: bool) -> Option<String> {
    let mut ou: Option<&AttributeTypeAndValue> = None;
    let mut o: Option<&AttributeTypeAndValue> = None;
    let mut email: Option<&AttributeTypeAndValue> = None;
    let mut other: Option<&AttributeTypeAndValue> = None;

    for attr in cert.name(for_issuer).entries().rev() {
        let slot = if attr.oid == CN {
            return Some(attr.value_text(Rendering::Utf8Convert));
        } else if attr.oid == ORGANIZATIONAL_UNIT_NAME {
            &mut ou
        } else if attr.oid == ORGANIZATION_NAME {
            &mut o
        } else if attr.oid == EMAIL_ADDRESS {
            &mut email
        } else {
            &mut other
        };
        if slot.is_none() {
            *slot = Some(attr);
        }
    }

    ou.or(o)
        .or(email)
        .or(other)
        .map(|attr| attr.value_text(Rendering::Utf8Convert))
}

fn alternative_name(cert: &Certificate, name_type: NameType, for_issuer: bool) -> Option<String> {
    alt_names(cert, for_issuer)?
        .iter()
        .find_map(|name| expected_value(name, name_type))
        .map(|value| value.render(Rendering::Utf8Convert))
}

fn expected_value(name: &GeneralName, name_type: NameType) -> Option<&Asn1String> {
    match (name_type, name) {
        (NameType::Dns | NameType::DnsFromAlternativeName, GeneralName::DnsName(value)) => {
            Some(value)
        }
        (NameType::Simple | NameType::Email, GeneralName::Rfc822Name(value)) => Some(value),
        (NameType::Url, GeneralName::Uri(value)) => Some(value),
        (NameType::UserPrincipalName, GeneralName::OtherName(other))
            if is_upn(&other.type_id) && other.value.is_string_like() =>
        {
            Some(&other.value)
        }
        _ => None,
    }
}

/// Exact comparison of the dotted OID text.
fn is_upn(type_id: &ObjectIdentifier) -> bool {
    type_id.to_string() == USER_PRINCIPAL_NAME_TEXT
}
