// Copyright (c) 2026 Intel Corporation
//
// SPDX-License-Identifier: Apache-2.0 or MIT

//! Copy-out accessors using a size-then-copy buffer convention.
//!
//! Every accessor returns:
//!
//! - `1` when the value was copied into `buf`;
//! - `0` when the input is absent or cannot be encoded;
//! - `-len` when `buf` is absent or shorter than the `len`-byte value.
//!
//! Callers pass `None` first, allocate `len` bytes and call again.

use der::Encode;
use ring::digest;

use crate::certificate::name::Name;
use crate::certificate::string::Asn1String;
use crate::certificate::Certificate;

/// Size of a SHA-1 thumbprint.
pub const THUMBPRINT_LEN: usize = 20;

/// Returned by [`public_key_parameter_bytes`] when no parameters are encoded.
pub const NO_DATA: i32 = 2;

/// Copy `value` into `buf` or report the size needed.
pub fn size_or_copy(value: &[u8], buf: Option<&mut [u8]>) -> i32 {
    let Ok(len) = i32::try_from(value.len()) else {
        return 0;
    };
    match buf {
        Some(buf) if buf.len() >= value.len() => {
            buf[..value.len()].copy_from_slice(value);
            1
        }
        _ => -len,
    }
}

/// DER encoding of a distinguished name.
pub fn x509_name_raw_bytes(name: Option<&Name>, buf: Option<&mut [u8]>) -> i32 {
    let Some(name) = name else {
        return 0;
    };
    match name.to_der() {
        Ok(der) => size_or_copy(&der, buf),
        Err(e) => {
            log::debug!("name does not encode: {}", e);
            0
        }
    }
}

/// Content octets of a string value.
pub fn asn1_string_bytes(value: Option<&Asn1String>, buf: Option<&mut [u8]>) -> i32 {
    match value {
        Some(value) => size_or_copy(value.as_bytes(), buf),
        None => 0,
    }
}

/// DER encoding of the public key algorithm parameters, or [`NO_DATA`].
pub fn public_key_parameter_bytes(cert: Option<&Certificate>, buf: Option<&mut [u8]>) -> i32 {
    let Some(cert) = cert else {
        return 0;
    };
    let Some(parameters) = cert.public_key_parameters() else {
        return NO_DATA;
    };
    match parameters.to_der() {
        Ok(der) => size_or_copy(&der, buf),
        Err(e) => {
            log::debug!("key parameters do not encode: {}", e);
            0
        }
    }
}

/// SHA-1 over the DER encoding of `cert`.
///
/// Any buffer shorter than [`THUMBPRINT_LEN`] is answered with
/// `-THUMBPRINT_LEN` before anything is computed.
pub fn x509_thumbprint(cert: Option<&Certificate>, buf: Option<&mut [u8]>) -> i32 {
    let Some(cert) = cert else {
        return 0;
    };
    let buf = match buf {
        Some(buf) if buf.len() >= THUMBPRINT_LEN => buf,
        _ => return -(THUMBPRINT_LEN as i32),
    };
    let der = match cert.to_der() {
        Ok(der) => der,
        Err(e) => {
            log::debug!("certificate does not encode: {}", e);
            return 0;
        }
    };
    let hash = digest::digest(&digest::SHA1_FOR_LEGACY_USE_ONLY, &der);
    size_or_copy(hash.as_ref(), Some(buf))
}

/// Encoded version number (0 for v1 through 2 for v3), or -1 without a
/// certificate.
pub fn x509_version(cert: Option<&Certificate>) -> i32 {
    cert.map_or(-1, |cert| i32::from(cert.version().value()))
}
