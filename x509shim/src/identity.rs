// Copyright (c) 2026 Intel Corporation
//
// SPDX-License-Identifier: Apache-2.0 or MIT

//! Host name and IP address identity checks.
//!
//! The flat entry points take optional arguments and explicit lengths and
//! report argument problems as [`MatchOutcome::InputError`] carrying the
//! legacy negative status code. [`match_hostname`] and [`match_ip_address`]
//! are typed wrappers over them.

extern crate alloc;

use alloc::string::ToString;
use core::fmt;
use core::net::IpAddr;

use crate::certificate::name::CN;
use crate::certificate::Certificate;
use crate::library::{CryptoLibrary, HostCheckFlags};
use crate::x509::extensions::alt_names;

/// Which argument of an identity check was unusable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputErrorKind {
    MissingCertificate,
    MissingHostname,
    NegativeHostnameLength,
    NegativeAddressLength,
    MissingAddress,
    /// A length exceeds the buffer it describes
    LengthOverrun,
    /// Rejected by the library: empty or with an embedded NUL
    MalformedHostname,
}

/// Argument error with the status code of the entry point that raised it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputError {
    kind: InputErrorKind,
    code: i32,
}

impl InputError {
    const fn new(kind: InputErrorKind, code: i32) -> Self {
        InputError { kind, code }
    }

    pub fn kind(&self) -> InputErrorKind {
        self.kind
    }

    /// Negative legacy status code.
    pub fn code(&self) -> i32 {
        self.code
    }
}

impl fmt::Display for InputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} (status {})", self.kind, self.code)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchOutcome {
    Match,
    NoMatch,
    InputError(InputError),
}

impl MatchOutcome {
    /// 1, 0 or the negative input-error code.
    pub fn status(&self) -> i32 {
        match self {
            MatchOutcome::Match => 1,
            MatchOutcome::NoMatch => 0,
            MatchOutcome::InputError(e) => e.code(),
        }
    }

    pub fn is_match(&self) -> bool {
        *self == MatchOutcome::Match
    }

    fn from_bool(matched: bool) -> Self {
        if matched {
            MatchOutcome::Match
        } else {
            MatchOutcome::NoMatch
        }
    }
}

fn input_error(kind: InputErrorKind, code: i32) -> MatchOutcome {
    MatchOutcome::InputError(InputError::new(kind, code))
}

/// Check `cert` against the first `cch` bytes of `hostname`.
///
/// Partial-label wildcards are never accepted. A name starting with `.` is
/// reported as no match without consulting the library. An empty name is no
/// match; an absent one (with `cch` of 0) is rejected by the library as
/// malformed.
pub fn check_hostname(
    library: &dyn CryptoLibrary,
    cert: Option<&Certificate>,
    hostname: Option<&[u8]>,
    cch: i32,
) -> MatchOutcome {
    let Some(cert) = cert else {
        return input_error(InputErrorKind::MissingCertificate, -3);
    };
    if cch > 0 && hostname.is_none() {
        return input_error(InputErrorKind::MissingHostname, -4);
    }
    let Ok(len) = usize::try_from(cch) else {
        return input_error(InputErrorKind::NegativeHostnameLength, -5);
    };
    let host = match hostname {
        Some(hostname) => match hostname.get(..len) {
            Some(host) => Some(host),
            None => return input_error(InputErrorKind::LengthOverrun, -6),
        },
        None => None,
    };

    library.clear_error();

    if host.and_then(|host| host.first()) == Some(&b'.') {
        log::trace!("leading dot in host name, not matching");
        return MatchOutcome::NoMatch;
    }

    match library.check_host(cert, host, HostCheckFlags::NO_PARTIAL_WILDCARDS) {
        1 => MatchOutcome::Match,
        -2 => input_error(InputErrorKind::MalformedHostname, -2),
        result => {
            if result < 0 {
                log::debug!("{}: host check returned {}", library.name(), result);
            }
            MatchOutcome::NoMatch
        }
    }
}

/// Check `cert` against an IP address given both as raw bytes and as the
/// textual form the caller asked for.
///
/// Subject Alternative Name IP entries must match length and bytes exactly.
/// Otherwise every subject Common Name is compared with the first `cch`
/// bytes of `hostname`, ASCII case-insensitively and with equal length.
pub fn check_ip_address(
    library: &dyn CryptoLibrary,
    cert: Option<&Certificate>,
    address: Option<&[u8]>,
    address_len: i32,
    hostname: Option<&[u8]>,
    cch: i32,
) -> MatchOutcome {
    let Some(cert) = cert else {
        return input_error(InputErrorKind::MissingCertificate, -2);
    };
    if cch > 0 && hostname.is_none() {
        return input_error(InputErrorKind::MissingHostname, -3);
    }
    let Ok(cch) = usize::try_from(cch) else {
        return input_error(InputErrorKind::NegativeHostnameLength, -4);
    };
    let Ok(address_len) = usize::try_from(address_len) else {
        return input_error(InputErrorKind::NegativeAddressLength, -5);
    };
    let Some(address) = address else {
        return input_error(InputErrorKind::MissingAddress, -6);
    };
    let hostname = hostname.unwrap_or_default();
    let (Some(address), Some(host)) = (address.get(..address_len), hostname.get(..cch)) else {
        return input_error(InputErrorKind::LengthOverrun, -7);
    };

    library.clear_error();

    let san_match = alt_names(cert, false)
        .map(|names| names.ip_addresses().any(|entry| entry == address))
        .unwrap_or(false);
    if san_match {
        return MatchOutcome::Match;
    }

    let cn_match = cert
        .subject()
        .entries_with(CN)
        .any(|attr| attr.value().as_bytes().eq_ignore_ascii_case(host));
    MatchOutcome::from_bool(cn_match)
}

/// [`check_hostname`] for a host name already in hand.
pub fn match_hostname(
    library: &dyn CryptoLibrary,
    cert: &Certificate,
    hostname: &str,
) -> MatchOutcome {
    let Ok(cch) = i32::try_from(hostname.len()) else {
        return input_error(InputErrorKind::LengthOverrun, -6);
    };
    check_hostname(library, Some(cert), Some(hostname.as_bytes()), cch)
}

/// [`check_ip_address`] with the textual form derived from `address`.
pub fn match_ip_address(
    library: &dyn CryptoLibrary,
    cert: &Certificate,
    address: IpAddr,
) -> MatchOutcome {
    let octets = match address {
        IpAddr::V4(v4) => v4.octets().to_vec(),
        IpAddr::V6(v6) => v6.octets().to_vec(),
    };
    let text = address.to_string();
    let (Ok(address_len), Ok(cch)) = (i32::try_from(octets.len()), i32::try_from(text.len()))
    else {
        return input_error(InputErrorKind::LengthOverrun, -7);
    };
    check_ip_address(
        library,
        Some(cert),
        Some(octets.as_slice()),
        address_len,
        Some(text.as_bytes()),
        cch,
    )
}
