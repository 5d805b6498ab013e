// Copyright (c) 2026 Intel Corporation
//
// SPDX-License-Identifier: Apache-2.0 or MIT

use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};
use std::sync::Arc;

use x509shim::identity::InputErrorKind;
use x509shim::init::{InitGuard, ShutdownFlag};
use x509shim::library::CryptoLibrary;
use x509shim::MatchOutcome;

use crate::common::fixtures::{self, IPV4_ADDR, IPV6_ADDR};
use crate::common::{count, init_logger, MockLibrary};

fn ready(mock: MockLibrary) -> (Arc<MockLibrary>, InitGuard) {
    init_logger();
    let mock = Arc::new(mock);
    let guard = InitGuard::new(mock.clone(), Arc::new(ShutdownFlag::new()));
    assert_eq!(guard.ensure_initialized_status(), 0);
    (mock, guard)
}

fn error_kind(outcome: MatchOutcome) -> Option<InputErrorKind> {
    match outcome {
        MatchOutcome::InputError(e) => Some(e.kind()),
        _ => None,
    }
}

#[test]
fn test_hostname_matches() {
    for mock in [MockLibrary::legacy(), MockLibrary::modern()] {
        let (_mock, guard) = ready(mock);
        let runtime = guard.runtime().unwrap();
        let cert = fixtures::server_certificate();

        let check = |host: &str| runtime.match_hostname(&cert, host).unwrap();
        assert_eq!(check("www.example.com"), MatchOutcome::Match);
        assert_eq!(check("WWW.Example.COM"), MatchOutcome::Match);
        assert_eq!(check("v1.api.example.com"), MatchOutcome::Match);
        assert_eq!(check("api.example.com"), MatchOutcome::NoMatch);
        assert_eq!(check("a.b.api.example.com"), MatchOutcome::NoMatch);
        assert_eq!(check("mail.example.com"), MatchOutcome::NoMatch);
    }
}

#[test]
fn test_leading_dot_skips_library() {
    let (mock, guard) = ready(MockLibrary::modern());
    let runtime = guard.runtime().unwrap();
    let cert = fixtures::server_certificate();

    let outcome = runtime
        .check_hostname(Some(&cert), Some(&b".example.com"[..]), 12)
        .unwrap();
    assert_eq!(outcome, MatchOutcome::NoMatch);
    assert_eq!(count(&mock.calls.check_host), 0);
    assert_eq!(count(&mock.calls.clear_error), 1);

    let outcome = runtime
        .check_hostname(Some(&cert), Some(&b"www.example.com"[..]), 15)
        .unwrap();
    assert_eq!(outcome, MatchOutcome::Match);
    assert_eq!(count(&mock.calls.check_host), 1);
}

#[test]
fn test_hostname_length_bounds_the_name() {
    let (_mock, guard) = ready(MockLibrary::modern());
    let runtime = guard.runtime().unwrap();
    let cert = fixtures::server_certificate();
    let host: &[u8] = b"www.example.com.attacker.test";

    assert_eq!(
        runtime.check_hostname(Some(&cert), Some(host), 15).unwrap(),
        MatchOutcome::Match
    );
    assert_eq!(
        runtime.check_hostname(Some(&cert), Some(host), 29).unwrap(),
        MatchOutcome::NoMatch
    );
}

#[test]
fn test_hostname_input_errors() {
    let (mock, guard) = ready(MockLibrary::modern());
    let runtime = guard.runtime().unwrap();
    let cert = fixtures::server_certificate();

    let outcome = runtime.check_hostname(None, Some(&b"a"[..]), 1).unwrap();
    assert_eq!(outcome.status(), -3);
    assert_eq!(error_kind(outcome), Some(InputErrorKind::MissingCertificate));

    let outcome = runtime.check_hostname(Some(&cert), None, 1).unwrap();
    assert_eq!(outcome.status(), -4);
    assert_eq!(error_kind(outcome), Some(InputErrorKind::MissingHostname));

    let outcome = runtime.check_hostname(Some(&cert), Some(&b"a"[..]), -1).unwrap();
    assert_eq!(outcome.status(), -5);

    let outcome = runtime.check_hostname(Some(&cert), Some(&b"a"[..]), 2).unwrap();
    assert_eq!(error_kind(outcome), Some(InputErrorKind::LengthOverrun));

    // the checks above never reach the library
    assert_eq!(count(&mock.calls.check_host), 0);

    // absent and NUL-laden names are rejected by the library
    let outcome = runtime.check_hostname(Some(&cert), None, 0).unwrap();
    assert_eq!(outcome.status(), -2);
    assert_eq!(error_kind(outcome), Some(InputErrorKind::MalformedHostname));
    let outcome = runtime
        .check_hostname(Some(&cert), Some(&b"www\0.example.com"[..]), 16)
        .unwrap();
    assert_eq!(outcome.status(), -2);
    assert_eq!(count(&mock.calls.check_host), 2);

    // an empty name matches nothing
    let outcome = runtime.check_hostname(Some(&cert), Some(&b""[..]), 0).unwrap();
    assert_eq!(outcome, MatchOutcome::NoMatch);
    assert_eq!(count(&mock.calls.check_host), 3);
}

#[test]
fn test_ipv4_matches_only_ipv4_entries() {
    let (_mock, guard) = ready(MockLibrary::modern());
    let runtime = guard.runtime().unwrap();
    let v4 = IpAddr::V4(Ipv4Addr::from(IPV4_ADDR));
    let v6 = IpAddr::V6(Ipv6Addr::from(IPV6_ADDR));

    let server = fixtures::server_certificate();
    assert_eq!(runtime.match_ip_address(&server, v4).unwrap(), MatchOutcome::Match);
    assert_eq!(runtime.match_ip_address(&server, v6).unwrap(), MatchOutcome::NoMatch);
    assert_eq!(
        runtime
            .match_ip_address(&server, IpAddr::V4(Ipv4Addr::new(192, 0, 2, 11)))
            .unwrap(),
        MatchOutcome::NoMatch
    );

    // the low-order bytes of the IPv6 entry equal the IPv4 address
    let v6_only = fixtures::ipv6_only_certificate();
    assert_eq!(runtime.match_ip_address(&v6_only, v4).unwrap(), MatchOutcome::NoMatch);
    assert_eq!(
        runtime
            .check_ip_address(
                Some(&v6_only),
                Some(&IPV6_ADDR[12..]),
                4,
                Some(&b"192.0.2.10"[..]),
                10
            )
            .unwrap(),
        MatchOutcome::NoMatch
    );
    assert_eq!(runtime.match_ip_address(&v6_only, v6).unwrap(), MatchOutcome::Match);
}

#[test]
fn test_ip_common_name_fallback() {
    let (_mock, guard) = ready(MockLibrary::legacy());
    let runtime = guard.runtime().unwrap();

    let cert = fixtures::cn_address_certificate("198.51.100.7");
    let addr = IpAddr::V4(Ipv4Addr::new(198, 51, 100, 7));
    assert_eq!(runtime.match_ip_address(&cert, addr).unwrap(), MatchOutcome::Match);
    // a prefix of the CN text is not enough
    assert_eq!(
        runtime
            .check_ip_address(
                Some(&cert),
                Some(&[198, 51, 100, 7][..]),
                4,
                Some(&b"198.51.100.7"[..]),
                11
            )
            .unwrap(),
        MatchOutcome::NoMatch
    );

    let cert = fixtures::cn_address_certificate("2001:DB8::1");
    let addr = IpAddr::V6(Ipv6Addr::new(0x2001, 0xdb8, 0, 0, 0, 0, 0, 1));
    assert_eq!(runtime.match_ip_address(&cert, addr).unwrap(), MatchOutcome::Match);
}

#[test]
fn test_ip_input_errors() {
    let (mock, guard) = ready(MockLibrary::modern());
    let runtime = guard.runtime().unwrap();
    let cert = fixtures::server_certificate();
    let addr = &IPV4_ADDR[..];
    let host: &[u8] = b"192.0.2.10";

    let status = |outcome: x509shim::Result<MatchOutcome>| outcome.unwrap().status();
    assert_eq!(status(runtime.check_ip_address(None, Some(addr), 4, Some(host), 10)), -2);
    assert_eq!(status(runtime.check_ip_address(Some(&cert), Some(addr), 4, None, 10)), -3);
    assert_eq!(status(runtime.check_ip_address(Some(&cert), Some(addr), 4, Some(host), -1)), -4);
    assert_eq!(status(runtime.check_ip_address(Some(&cert), Some(addr), -4, Some(host), 10)), -5);
    assert_eq!(status(runtime.check_ip_address(Some(&cert), None, 4, Some(host), 10)), -6);
    assert_eq!(status(runtime.check_ip_address(Some(&cert), Some(addr), 5, Some(host), 10)), -7);
    assert_eq!(count(&mock.calls.clear_error), 0);

    // no host text is needed when the length is zero
    assert_eq!(status(runtime.check_ip_address(Some(&cert), Some(addr), 4, None, 0)), 1);
}

#[test]
fn test_repeated_matching_leaves_no_residue() {
    let (mock, guard) = ready(MockLibrary::legacy());
    let runtime = guard.runtime().unwrap();
    let with_names = fixtures::server_certificate();
    let without_names = fixtures::cn_address_certificate("192.0.2.10");
    let addr = IpAddr::V4(Ipv4Addr::from(IPV4_ADDR));

    const ROUNDS: usize = 1000;
    for _ in 0..ROUNDS {
        assert!(runtime.match_ip_address(&with_names, addr).unwrap().is_match());
        assert!(runtime.match_ip_address(&without_names, addr).unwrap().is_match());
        assert!(runtime.match_hostname(&with_names, "www.example.com").unwrap().is_match());
    }
    assert_eq!(count(&mock.calls.clear_error), 3 * ROUNDS);
    assert!(mock.last_error().is_none());
}
