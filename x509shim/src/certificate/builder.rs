// Copyright (c) 2026 Intel Corporation
//
// SPDX-License-Identifier: Apache-2.0 or MIT

//! Assembly of unsigned certificates.
//!
//! Name resolution and identity matching never look at the signature, so the
//! builder emits an empty signature BIT STRING. The output is still a fully
//! DER-encodable [`Certificate`] and round-trips through
//! [`Certificate::from_der`].
//!
//! ```no_run
//! use x509shim::certificate::name::{AttributeTypeAndValue, CN};
//! use x509shim::certificate::name::GeneralName;
//! use x509shim::CertificateBuilder;
//!
//! # fn example() -> x509shim::Result<()> {
//! let cert = CertificateBuilder::new()
//!     .subject(AttributeTypeAndValue::new_utf8(CN, "www.example.com"))
//!     .subject_alt_name(GeneralName::dns("www.example.com")?)
//!     .build()?;
//! # let _ = cert;
//! # Ok(())
//! # }
//! ```

extern crate alloc;

use alloc::vec::Vec;

use const_oid::ObjectIdentifier;
use der::asn1::BitString;
use der::Encode;
use spki::AlgorithmIdentifier;

use super::name::{AttributeTypeAndValue, GeneralName, GeneralNames, Name};
use super::{Certificate, SubjectPublicKeyInfo, TBSCertificate, Version};
use crate::error::Result;
use crate::time::Validity;
use crate::x509::extensions::{Extension, Extensions, ISSUER_ALT_NAME, SUBJECT_ALT_NAME};
use crate::x509::oids;

/// Placeholder uncompressed P-256 point.
const PLACEHOLDER_KEY: [u8; 65] = {
    let mut key = [0u8; 65];
    key[0] = 0x04;
    key
};

/// Consuming builder for test and fixture certificates.
#[derive(Debug, Clone)]
pub struct CertificateBuilder {
    version: Version,
    serial: Vec<u8>,
    subject: Vec<AttributeTypeAndValue>,
    issuer: Vec<AttributeTypeAndValue>,
    subject_alt_names: Vec<GeneralName>,
    issuer_alt_names: Vec<GeneralName>,
    extra_extensions: Vec<Extension>,
    not_before: u64,
    not_after: u64,
    key_algorithm: ObjectIdentifier,
    key_parameters: Option<ObjectIdentifier>,
    public_key: Vec<u8>,
}

impl Default for CertificateBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl CertificateBuilder {
    /// A v3 certificate with an EC P-256 key, valid 2020-01-01 to 2040-01-01.
    pub fn new() -> Self {
        Self {
            version: Version::V3,
            serial: alloc::vec![0x01],
            subject: Vec::new(),
            issuer: Vec::new(),
            subject_alt_names: Vec::new(),
            issuer_alt_names: Vec::new(),
            extra_extensions: Vec::new(),
            not_before: 1_577_836_800,
            not_after: 2_208_988_800,
            key_algorithm: oids::EC_PUBLIC_KEY,
            key_parameters: Some(oids::SECP256R1),
            public_key: PLACEHOLDER_KEY.to_vec(),
        }
    }

    #[must_use]
    pub fn version(mut self, version: Version) -> Self {
        self.version = version;
        self
    }

    #[must_use]
    pub fn serial(mut self, serial: &[u8]) -> Self {
        self.serial = serial.to_vec();
        self
    }

    /// Append a single-valued RDN to the subject.
    #[must_use]
    pub fn subject(mut self, attr: AttributeTypeAndValue) -> Self {
        self.subject.push(attr);
        self
    }

    /// Append a single-valued RDN to the issuer.
    #[must_use]
    pub fn issuer(mut self, attr: AttributeTypeAndValue) -> Self {
        self.issuer.push(attr);
        self
    }

    #[must_use]
    pub fn subject_alt_name(mut self, name: GeneralName) -> Self {
        self.subject_alt_names.push(name);
        self
    }

    #[must_use]
    pub fn issuer_alt_name(mut self, name: GeneralName) -> Self {
        self.issuer_alt_names.push(name);
        self
    }

    /// Add an extension verbatim, after the alternative-name extensions.
    #[must_use]
    pub fn extension(mut self, extension: Extension) -> Self {
        self.extra_extensions.push(extension);
        self
    }

    /// Validity window in seconds since the Unix epoch.
    #[must_use]
    pub fn validity(mut self, not_before: u64, not_after: u64) -> Self {
        self.not_before = not_before;
        self.not_after = not_after;
        self
    }

    /// Public key algorithm and optional OID parameter (a named curve).
    #[must_use]
    pub fn key_algorithm(
        mut self,
        algorithm: ObjectIdentifier,
        parameters: Option<ObjectIdentifier>,
    ) -> Self {
        self.key_algorithm = algorithm;
        self.key_parameters = parameters;
        self
    }

    #[must_use]
    pub fn public_key(mut self, key: &[u8]) -> Self {
        self.public_key = key.to_vec();
        self
    }

    pub fn build(self) -> Result<Certificate> {
        let subject = Name::from_attributes(self.subject);
        let issuer = Name::from_attributes(self.issuer);
        let validity = Validity::from_unix_secs(self.not_before, self.not_after)?;

        let parameters = self
            .key_parameters
            .as_ref()
            .map(|oid| der::Any::encode_from(oid))
            .transpose()?;
        let spki = SubjectPublicKeyInfo {
            algorithm: AlgorithmIdentifier {
                oid: self.key_algorithm,
                parameters,
            },
            subject_public_key: BitString::from_bytes(&self.public_key)?,
        };

        let signature_algorithm = AlgorithmIdentifier {
            oid: oids::ECDSA_WITH_SHA256,
            parameters: None,
        };

        let mut tbs = TBSCertificate::new(
            &self.serial,
            signature_algorithm.clone(),
            issuer,
            validity,
            subject,
            spki,
        )?;
        tbs.version = self.version;

        let mut extensions = Extensions::new();
        for (oid, names) in [
            (SUBJECT_ALT_NAME, self.subject_alt_names),
            (ISSUER_ALT_NAME, self.issuer_alt_names),
        ] {
            if !names.is_empty() {
                let value = GeneralNames::new(names).to_der()?;
                extensions.push(Extension::new(oid, false, value)?);
            }
        }
        for extension in self.extra_extensions {
            extensions.push(extension);
        }
        if !extensions.is_empty() {
            tbs.extensions = Some(extensions);
        }

        Ok(Certificate {
            tbs_certificate: tbs,
            signature_algorithm,
            signature_value: BitString::from_bytes(&[])?,
        })
    }
}
