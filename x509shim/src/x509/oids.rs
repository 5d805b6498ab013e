// Copyright (c) 2026 Intel Corporation
//
// SPDX-License-Identifier: Apache-2.0 or MIT

//! OID constants used outside of distinguished names.

use const_oid::ObjectIdentifier;

// =============================================================================
// Other-name types
// =============================================================================

/// Dotted text of the Microsoft User Principal Name other-name type.
///
/// Matching is done on this exact text, so longer arcs sharing the prefix
/// (`...20.2.30`) do not match.
pub const USER_PRINCIPAL_NAME_TEXT: &str = "1.3.6.1.4.1.311.20.2.3";

/// User Principal Name - 1.3.6.1.4.1.311.20.2.3
pub const USER_PRINCIPAL_NAME: ObjectIdentifier =
    ObjectIdentifier::new_unwrap("1.3.6.1.4.1.311.20.2.3");

// =============================================================================
// Public Key and Signature Algorithm OIDs
// =============================================================================

/// EC Public Key - 1.2.840.10045.2.1
pub const EC_PUBLIC_KEY: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.2.840.10045.2.1");

/// NIST P-256 named curve - 1.2.840.10045.3.1.7
pub const SECP256R1: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.2.840.10045.3.1.7");

/// NIST P-384 named curve - 1.3.132.0.34
pub const SECP384R1: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.3.132.0.34");

/// Ed25519 - 1.3.101.112
pub const ED25519: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.3.101.112");

/// ECDSA with SHA-256 - 1.2.840.10045.4.3.2
pub const ECDSA_WITH_SHA256: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.2.840.10045.4.3.2");
