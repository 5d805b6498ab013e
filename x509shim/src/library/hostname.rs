// Copyright (c) 2026 Intel Corporation
//
// SPDX-License-Identifier: Apache-2.0 or MIT

//! DNS identity matching for [`super::SoftLibrary::check_host`].
//!
//! DNS entries of the subject alternative name are authoritative; subject
//! Common Names are only consulted when no DNS entry exists. Comparison is
//! ASCII case-insensitive. A wildcard is honoured in the left-most label
//! only, with at least two more labels after it, and never inside an IDNA
//! (`xn--`) label.

use super::HostCheckFlags;
use crate::certificate::name::{GeneralName, CN};
use crate::certificate::string::Rendering;
use crate::certificate::Certificate;
use crate::x509::extensions::alt_names;

const IDNA_PREFIX: &[u8] = b"xn--";

/// 1 on match, 0 on mismatch, -2 for an absent or unusable `host`.
///
/// An empty `host` is not an error; it matches nothing.
pub(crate) fn check_host(cert: &Certificate, host: Option<&[u8]>, flags: HostCheckFlags) -> i32 {
    let Some(host) = host else {
        return -2;
    };
    let host = match host {
        [rest @ .., 0] if !rest.is_empty() => rest,
        other => other,
    };
    if host.contains(&0) {
        return -2;
    }
    if host.is_empty() {
        return 0;
    }

    let dot_subdomains = host.len() > 1 && host[0] == b'.';

    let mut saw_dns = false;
    if let Some(names) = alt_names(cert, false) {
        for name in names.iter() {
            if let GeneralName::DnsName(dns) = name {
                saw_dns = true;
                if matches(dns.as_bytes(), host, flags, dot_subdomains) {
                    log::trace!("host matched a DNS alternative name");
                    return 1;
                }
            }
        }
    }
    if saw_dns {
        return 0;
    }

    for attr in cert.subject().entries_with(CN) {
        let text = attr.value_text(Rendering::Utf8Convert);
        if matches(text.as_bytes(), host, flags, dot_subdomains) {
            log::trace!("host matched a subject common name");
            return 1;
        }
    }
    0
}

fn matches(pattern: &[u8], host: &[u8], flags: HostCheckFlags, dot_subdomains: bool) -> bool {
    if pattern.is_empty() {
        return false;
    }
    if dot_subdomains {
        return equal_nocase(skip_prefix(pattern, host.len()), host);
    }
    match valid_star(pattern, flags) {
        Some(star) => wildcard_match(&pattern[..star], &pattern[star + 1..], host),
        None => equal_nocase(pattern, host),
    }
}

/// With a `.domain` host, compare only the trailing part of the pattern.
fn skip_prefix(pattern: &[u8], host_len: usize) -> &[u8] {
    if pattern.len() <= host_len {
        return pattern;
    }
    let prefix = &pattern[..pattern.len() - host_len];
    if prefix.contains(&0) {
        return pattern;
    }
    &pattern[pattern.len() - host_len..]
}

fn equal_nocase(pattern: &[u8], host: &[u8]) -> bool {
    pattern.len() == host.len() && !pattern.contains(&0) && pattern.eq_ignore_ascii_case(host)
}

fn starts_with_idna(label: &[u8]) -> bool {
    label.len() >= IDNA_PREFIX.len() && label[..IDNA_PREFIX.len()].eq_ignore_ascii_case(IDNA_PREFIX)
}

/// Position of a usable wildcard in `pattern`, or `None` when the pattern
/// has no wildcard or one that must be compared literally.
fn valid_star(pattern: &[u8], flags: HostCheckFlags) -> Option<usize> {
    let mut star = None;
    let mut label_start = true;
    let mut label_hyphen = false;
    let mut label_idna = false;
    let mut dots = 0;

    for (i, &c) in pattern.iter().enumerate() {
        match c {
            b'*' => {
                let at_start = label_start;
                let at_end = i == pattern.len() - 1 || pattern[i + 1] == b'.';
                if star.is_some() || label_idna || dots > 0 {
                    return None;
                }
                if flags.contains(HostCheckFlags::NO_PARTIAL_WILDCARDS) && !(at_start && at_end) {
                    return None;
                }
                if !at_start && !at_end {
                    return None;
                }
                star = Some(i);
                label_start = false;
            }
            c if c.is_ascii_alphanumeric() => {
                if label_start && starts_with_idna(&pattern[i..]) {
                    label_idna = true;
                }
                label_start = false;
                label_hyphen = false;
            }
            b'.' => {
                if label_start || label_hyphen {
                    return None;
                }
                label_start = true;
                label_hyphen = false;
                label_idna = false;
                dots += 1;
            }
            b'-' => {
                if label_start {
                    return None;
                }
                label_hyphen = true;
            }
            _ => return None,
        }
    }

    if label_start || label_hyphen || dots < 2 {
        return None;
    }
    star
}

fn wildcard_match(prefix: &[u8], suffix: &[u8], host: &[u8]) -> bool {
    if host.len() < prefix.len() + suffix.len() {
        return false;
    }
    if !equal_nocase(prefix, &host[..prefix.len()]) {
        return false;
    }
    let wildcard_end = host.len() - suffix.len();
    if !equal_nocase(&host[wildcard_end..], suffix) {
        return false;
    }
    let covered = &host[prefix.len()..wildcard_end];

    let full_label = prefix.is_empty() && suffix.first() == Some(&b'.');
    if full_label && covered.is_empty() {
        return false;
    }
    if !full_label && starts_with_idna(host) {
        return false;
    }
    if covered == b"*" {
        return true;
    }
    covered
        .iter()
        .all(|c| c.is_ascii_alphanumeric() || *c == b'-')
}
