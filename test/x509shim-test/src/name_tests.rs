// Copyright (c) 2026 Intel Corporation
//
// SPDX-License-Identifier: Apache-2.0 or MIT

use std::sync::Arc;

use x509shim::accessors::{
    asn1_string_bytes, public_key_parameter_bytes, x509_name_raw_bytes, x509_thumbprint,
    x509_version, NO_DATA, THUMBPRINT_LEN,
};
use x509shim::certificate::name::CN;
use x509shim::init::{InitGuard, ShutdownFlag};
use x509shim::name_info::NameType;
use x509shim::x509::oids;
use x509shim::{Certificate, CertificateBuilder};

use crate::common::fixtures;
use crate::common::{count, init_logger, MockLibrary};

const ALL_TYPES: [NameType; 6] = [
    NameType::Simple,
    NameType::Email,
    NameType::UserPrincipalName,
    NameType::Dns,
    NameType::DnsFromAlternativeName,
    NameType::Url,
];

fn ready() -> (Arc<MockLibrary>, InitGuard) {
    init_logger();
    let mock = Arc::new(MockLibrary::modern());
    let guard = InitGuard::new(mock.clone(), Arc::new(ShutdownFlag::new()));
    assert_eq!(guard.ensure_initialized_status(), 0);
    (mock, guard)
}

fn names(guard: &InitGuard, cert: &Certificate, for_issuer: bool) -> Vec<Option<String>> {
    let runtime = guard.runtime().unwrap();
    ALL_TYPES
        .iter()
        .map(|name_type| runtime.name_info(cert, *name_type, for_issuer).unwrap())
        .collect()
}

fn text(value: &str) -> Option<String> {
    Some(value.to_string())
}

#[test]
fn test_server_certificate_names() {
    let (_mock, guard) = ready();
    let cert = fixtures::server_certificate();

    assert_eq!(
        names(&guard, &cert, false),
        vec![
            text("www.example.com"),
            text("ops@example.com"),
            text("svc@corp.example.com"),
            text("www.example.com"),
            text("www.example.com"),
            text("https://www.example.com/"),
        ]
    );
    assert_eq!(
        names(&guard, &cert, true),
        vec![
            text("Example Issuing CA"),
            text("pki@example.com"),
            None,
            text("ca.example.com"),
            text("ca.example.com"),
            None,
        ]
    );
}

#[test]
fn test_names_without_common_name() {
    let (_mock, guard) = ready();
    let cert = fixtures::organizational_certificate();

    assert_eq!(
        names(&guard, &cert, false),
        vec![
            text("Build Farm"),
            text("farm@example.com"),
            None,
            None,
            None,
            None,
        ]
    );
}

#[test]
fn test_upn_requires_exact_oid() {
    let (_mock, guard) = ready();
    let runtime = guard.runtime().unwrap();

    let near = fixtures::near_upn_certificate();
    assert_eq!(
        runtime
            .name_info(&near, NameType::UserPrincipalName, false)
            .unwrap(),
        None
    );
    assert_eq!(
        runtime.name_info(&near, NameType::Simple, false).unwrap(),
        text("near")
    );

    let exact = fixtures::server_certificate();
    assert_eq!(
        runtime
            .name_info(&exact, NameType::UserPrincipalName, false)
            .unwrap(),
        text("svc@corp.example.com")
    );
    assert_eq!(oids::USER_PRINCIPAL_NAME.to_string(), oids::USER_PRINCIPAL_NAME_TEXT);
}

#[test]
fn test_empty_certificate_has_no_names() {
    let (_mock, guard) = ready();
    let cert = fixtures::empty_certificate();
    assert!(names(&guard, &cert, false).iter().all(Option::is_none));
    assert!(names(&guard, &cert, true).iter().all(Option::is_none));
}

#[test]
fn test_repeated_resolution_leaves_no_residue() {
    let (mock, guard) = ready();
    let with_names = fixtures::server_certificate();
    let without_names = fixtures::organizational_certificate();
    let expected_with = names(&guard, &with_names, false);
    let expected_without = names(&guard, &without_names, false);
    let calls = count(&mock.calls.clear_error);

    const ROUNDS: usize = 500;
    for _ in 0..ROUNDS {
        assert_eq!(names(&guard, &with_names, false), expected_with);
        assert_eq!(names(&guard, &without_names, false), expected_without);
    }
    assert_eq!(
        count(&mock.calls.clear_error) - calls,
        2 * ROUNDS * ALL_TYPES.len()
    );
}

#[test]
fn test_multi_valued_rdn_resolves_in_encoded_order() {
    let (_mock, guard) = ready();
    let runtime = guard.runtime().unwrap();
    let cert = fixtures::unsorted_rdn_certificate();

    assert_eq!(runtime.name_info(&cert, NameType::Simple, false).unwrap(), text("a"));
    assert_eq!(runtime.name_info(&cert, NameType::Dns, false).unwrap(), text("a"));

    let needed = x509_name_raw_bytes(Some(cert.subject()), None);
    assert_eq!(needed, -(fixtures::UNSORTED_RDN_SUBJECT.len() as i32));
    let mut buf = vec![0u8; fixtures::UNSORTED_RDN_SUBJECT.len()];
    assert_eq!(x509_name_raw_bytes(Some(cert.subject()), Some(&mut buf[..])), 1);
    assert_eq!(buf, fixtures::UNSORTED_RDN_SUBJECT);
}

#[test]
fn test_string_size_then_copy() {
    let cert = fixtures::server_certificate();
    let value = cert.subject().entries_with(CN).next().unwrap().value();
    let len = value.as_bytes().len() as i32;

    assert_eq!(asn1_string_bytes(Some(value), None), -len);
    assert_eq!(asn1_string_bytes(Some(value), Some(&mut [0u8; 0][..])), -len);
    let mut short = vec![0u8; len as usize - 1];
    assert_eq!(asn1_string_bytes(Some(value), Some(&mut short[..])), -len);

    let mut buf = vec![0u8; len as usize];
    assert_eq!(asn1_string_bytes(Some(value), Some(&mut buf[..])), 1);
    assert_eq!(buf, b"www.example.com");
    assert_eq!(asn1_string_bytes(None, Some(&mut buf[..])), 0);
}

#[test]
fn test_name_size_then_copy() {
    let cert = fixtures::server_certificate();
    let needed = x509_name_raw_bytes(Some(cert.subject()), None);
    assert!(needed < 0);

    let mut buf = vec![0u8; (-needed) as usize];
    assert_eq!(x509_name_raw_bytes(Some(cert.subject()), Some(&mut buf[..])), 1);
    // SEQUENCE OF RelativeDistinguishedName
    assert_eq!(buf[0], 0x30);
    assert!(buf
        .windows(b"www.example.com".len())
        .any(|window| window == b"www.example.com"));
    assert_eq!(x509_name_raw_bytes(None, None), 0);
}

#[test]
fn test_thumbprint() {
    let cert = fixtures::server_certificate();
    let t = THUMBPRINT_LEN as i32;

    assert_eq!(x509_thumbprint(Some(&cert), None), -t);
    let mut short = [0u8; THUMBPRINT_LEN - 1];
    assert_eq!(x509_thumbprint(Some(&cert), Some(&mut short[..])), -t);

    let mut first = [0u8; THUMBPRINT_LEN];
    let mut second = [0u8; THUMBPRINT_LEN];
    assert_eq!(x509_thumbprint(Some(&cert), Some(&mut first[..])), 1);
    assert_eq!(x509_thumbprint(Some(&cert), Some(&mut second[..])), 1);
    assert_eq!(first, second);

    let other = fixtures::empty_certificate();
    let mut third = [0u8; THUMBPRINT_LEN];
    assert_eq!(x509_thumbprint(Some(&other), Some(&mut third[..])), 1);
    assert_ne!(first, third);
    assert_eq!(x509_thumbprint(None, Some(&mut third[..])), 0);
}

#[test]
fn test_public_key_parameters_and_version() {
    let cert = fixtures::server_certificate();
    let needed = public_key_parameter_bytes(Some(&cert), None);
    assert!(needed < 0);
    let mut buf = vec![0u8; (-needed) as usize];
    assert_eq!(public_key_parameter_bytes(Some(&cert), Some(&mut buf[..])), 1);
    // OBJECT IDENTIFIER naming the curve
    assert_eq!(buf[0], 0x06);

    let no_params = CertificateBuilder::new()
        .key_algorithm(oids::ED25519, None)
        .public_key(&[0u8; 32])
        .build()
        .unwrap();
    assert_eq!(public_key_parameter_bytes(Some(&no_params), None), NO_DATA);
    assert_eq!(public_key_parameter_bytes(None, None), 0);

    assert_eq!(x509_version(Some(&cert)), 2);
    assert_eq!(x509_version(None), -1);
}
