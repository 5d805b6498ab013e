// Copyright (c) 2026 Intel Corporation
//
// SPDX-License-Identifier: Apache-2.0 or MIT

use x509shim::certificate::name::{
    AttributeTypeAndValue, GeneralName, Name, RelativeDistinguishedName, CN, EMAIL_ADDRESS,
    ORGANIZATIONAL_UNIT_NAME, ORGANIZATION_NAME,
};
use x509shim::certificate::string::Asn1String;
use x509shim::x509::oids;
use x509shim::{Certificate, CertificateBuilder};

pub const IPV4_ADDR: [u8; 4] = [192, 0, 2, 10];

/// IPv6 address whose last four bytes equal [`IPV4_ADDR`].
pub const IPV6_ADDR: [u8; 16] = [
    0x20, 0x01, 0x0d, 0xb8, 0, 0, 0, 0, 0, 0, 0, 0, 192, 0, 2, 10,
];

/// Decode an encoded certificate so the fixture goes through the DER path.
fn reparse(cert: Certificate) -> Certificate {
    let der = cert.to_der().unwrap();
    Certificate::from_der(&der).unwrap()
}

/// Server certificate with a subject CN, DNS and IP alternative names and
/// an issuer with its own alternative names.
pub fn server_certificate() -> Certificate {
    let cert = CertificateBuilder::new()
        .subject(AttributeTypeAndValue::new_utf8(ORGANIZATION_NAME, "Example Corp"))
        .subject(AttributeTypeAndValue::new_utf8(CN, "www.example.com"))
        .issuer(AttributeTypeAndValue::new_utf8(CN, "Example Issuing CA"))
        .subject_alt_name(GeneralName::dns("www.example.com").unwrap())
        .subject_alt_name(GeneralName::dns("*.api.example.com").unwrap())
        .subject_alt_name(GeneralName::email("ops@example.com").unwrap())
        .subject_alt_name(GeneralName::uri("https://www.example.com/").unwrap())
        .subject_alt_name(GeneralName::other(
            oids::USER_PRINCIPAL_NAME,
            Asn1String::utf8("svc@corp.example.com"),
        ))
        .subject_alt_name(GeneralName::IpAddress(IPV4_ADDR.to_vec()))
        .issuer_alt_name(GeneralName::dns("ca.example.com").unwrap())
        .issuer_alt_name(GeneralName::email("pki@example.com").unwrap())
        .build()
        .unwrap();
    reparse(cert)
}

/// Certificate whose only SAN IP entry is [`IPV6_ADDR`].
pub fn ipv6_only_certificate() -> Certificate {
    let cert = CertificateBuilder::new()
        .subject(AttributeTypeAndValue::new_utf8(CN, "v6 host"))
        .subject_alt_name(GeneralName::IpAddress(IPV6_ADDR.to_vec()))
        .build()
        .unwrap();
    reparse(cert)
}

/// Certificate naming its host only through a subject CN holding an address.
pub fn cn_address_certificate(text: &str) -> Certificate {
    let cert = CertificateBuilder::new()
        .subject(AttributeTypeAndValue::new_utf8(CN, text))
        .build()
        .unwrap();
    reparse(cert)
}

/// Subject without a CN, no extensions.
pub fn organizational_certificate() -> Certificate {
    let cert = CertificateBuilder::new()
        .subject(AttributeTypeAndValue::new_utf8(ORGANIZATION_NAME, "Example Corp"))
        .subject(AttributeTypeAndValue::new_utf8(ORGANIZATIONAL_UNIT_NAME, "Build Farm"))
        .subject(AttributeTypeAndValue::new_ia5(EMAIL_ADDRESS, "farm@example.com").unwrap())
        .build()
        .unwrap();
    reparse(cert)
}

/// UPN-like other name under an OID that only shares a prefix with the UPN.
pub fn near_upn_certificate() -> Certificate {
    let near = const_oid::ObjectIdentifier::new_unwrap("1.3.6.1.4.1.311.20.2.30");
    let cert = CertificateBuilder::new()
        .subject(AttributeTypeAndValue::new_utf8(CN, "near"))
        .subject_alt_name(GeneralName::other(near, Asn1String::utf8("not-a-upn@corp")))
        .build()
        .unwrap();
    reparse(cert)
}

/// Subject `SEQUENCE { SET { CN "b", CN "a" } }`, a multi-valued RDN whose
/// members are not in DER SET order.
pub const UNSORTED_RDN_SUBJECT: [u8; 24] = [
    0x30, 0x16, 0x31, 0x14, 0x30, 0x08, 0x06, 0x03, 0x55, 0x04, 0x03, 0x0c, 0x01, b'b', 0x30,
    0x08, 0x06, 0x03, 0x55, 0x04, 0x03, 0x0c, 0x01, b'a',
];

/// Certificate whose subject is [`UNSORTED_RDN_SUBJECT`].
pub fn unsorted_rdn_certificate() -> Certificate {
    let mut cert = CertificateBuilder::new().build().unwrap();
    cert.tbs_certificate.subject = Name {
        rdns: vec![RelativeDistinguishedName::from_attributes(vec![
            AttributeTypeAndValue::new_utf8(CN, "b"),
            AttributeTypeAndValue::new_utf8(CN, "a"),
        ])],
    };
    reparse(cert)
}

/// Certificate with neither names nor extensions.
pub fn empty_certificate() -> Certificate {
    reparse(CertificateBuilder::new().build().unwrap())
}
