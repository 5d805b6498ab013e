// Copyright (c) 2026 Intel Corporation
//
// SPDX-License-Identifier: Apache-2.0 or MIT

//! Decoded certificates.
//!
//! A [`Certificate`] is only ever read: name resolution and identity matching
//! look at the two names, the alternative-name extensions, the key algorithm
//! and the validity window. Signatures are carried but never checked.
//!
//! ```no_run
//! use x509shim::Certificate;
//!
//! # fn example(der_bytes: &[u8], pem_string: &str) -> x509shim::Result<()> {
//! let cert = Certificate::from_der(der_bytes)?;
//! println!("Subject: {}", cert.subject());
//!
//! let cert = Certificate::from_pem(pem_string)?;
//! let der_bytes = cert.to_der()?;
//! # let _ = der_bytes;
//! # Ok(())
//! # }
//! ```

pub mod builder;
pub mod name;
pub mod string;

use alloc::string::{String, ToString};
use alloc::vec::Vec;

use const_oid::ObjectIdentifier;
use der::asn1::{BitString, Uint};
use der::{
    Decode, DecodeValue, Encode, EncodeValue, ErrorKind, FixedTag, Header, Length, Reader,
    Sequence, Tag, Writer,
};
use spki::AlgorithmIdentifier;

use crate::certificate::name::Name;
use crate::error::{EncodingError, Error, Result};
use crate::time::{Time, Validity};
use crate::x509::extensions::Extensions;

pub use builder::CertificateBuilder;

/// Key info with undecoded algorithm parameters.
pub type SubjectPublicKeyInfo = spki::SubjectPublicKeyInfo<der::Any, BitString>;

const PEM_LABEL: &str = "CERTIFICATE";

/// Encoded as `INTEGER { v1(0), v2(1), v3(2) }`; anything else is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum Version {
    #[default]
    V1 = 0,
    V2 = 1,
    V3 = 2,
}

impl Version {
    pub fn value(&self) -> u8 {
        *self as u8
    }
}

impl<'a> DecodeValue<'a> for Version {
    fn decode_value<R: Reader<'a>>(reader: &mut R, header: Header) -> der::Result<Self> {
        match u8::decode_value(reader, header)? {
            0 => Ok(Version::V1),
            1 => Ok(Version::V2),
            2 => Ok(Version::V3),
            _ => Err(ErrorKind::Value { tag: Tag::Integer }.into()),
        }
    }
}

impl EncodeValue for Version {
    fn value_len(&self) -> der::Result<Length> {
        self.value().value_len()
    }

    fn encode_value(&self, writer: &mut impl Writer) -> der::Result<()> {
        self.value().encode_value(writer)
    }
}

impl FixedTag for Version {
    const TAG: Tag = Tag::Integer;
}

/// The signed body of a certificate (RFC 5280 section 4.1).
///
/// A v1 version field is left out of the encoding, as DER requires for a
/// DEFAULT value.
#[derive(Debug, Clone, PartialEq, Eq, Sequence)]
pub struct TBSCertificate {
    #[asn1(context_specific = "0", default = "Default::default")]
    pub version: Version,
    pub serial_number: Uint,
    pub signature: AlgorithmIdentifier<der::Any>,
    pub issuer: Name,
    pub validity: Validity,
    pub subject: Name,
    pub subject_public_key_info: SubjectPublicKeyInfo,
    #[asn1(context_specific = "1", tag_mode = "IMPLICIT", optional = "true")]
    pub issuer_unique_id: Option<BitString>,
    #[asn1(context_specific = "2", tag_mode = "IMPLICIT", optional = "true")]
    pub subject_unique_id: Option<BitString>,
    #[asn1(context_specific = "3", tag_mode = "EXPLICIT", optional = "true")]
    pub extensions: Option<Extensions>,
}

impl TBSCertificate {
    /// A v3 body without unique identifiers or extensions.
    pub fn new(
        serial: &[u8],
        signature: AlgorithmIdentifier<der::Any>,
        issuer: Name,
        validity: Validity,
        subject: Name,
        subject_public_key_info: SubjectPublicKeyInfo,
    ) -> Result<Self> {
        Ok(Self {
            version: Version::V3,
            serial_number: Uint::new(serial).map_err(Error::Asn1)?,
            signature,
            issuer,
            validity,
            subject,
            subject_public_key_info,
            issuer_unique_id: None,
            subject_unique_id: None,
            extensions: None,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Sequence)]
pub struct Certificate {
    pub tbs_certificate: TBSCertificate,
    pub signature_algorithm: AlgorithmIdentifier<der::Any>,
    pub signature_value: BitString,
}

impl Certificate {
    /// Decode one DER certificate; trailing bytes are an error.
    pub fn from_der(bytes: &[u8]) -> Result<Self> {
        <Self as Decode>::from_der(bytes).map_err(Error::Asn1)
    }

    /// Decode a single `CERTIFICATE` PEM block.
    pub fn from_pem(pem: &str) -> Result<Self> {
        let (label, der_bytes) = pem_rfc7468::decode_vec(pem.as_bytes())?;
        if label != PEM_LABEL {
            let err = EncodingError::InvalidPemLabel {
                expected: PEM_LABEL.to_string(),
                found: label.to_string(),
            };
            return Err(Error::EncodingError(err));
        }
        Self::from_der(&der_bytes)
    }

    pub fn to_der(&self) -> Result<Vec<u8>> {
        Encode::to_der(self).map_err(Error::Asn1)
    }

    pub fn to_pem(&self) -> Result<String> {
        let der_bytes = self.to_der()?;
        let pem = pem_rfc7468::encode_string(PEM_LABEL, pem_rfc7468::LineEnding::LF, &der_bytes)?;
        Ok(pem)
    }

    pub fn subject(&self) -> &Name {
        &self.tbs_certificate.subject
    }

    pub fn issuer(&self) -> &Name {
        &self.tbs_certificate.issuer
    }

    /// The issuer name when `for_issuer` is set, the subject otherwise.
    pub fn name(&self, for_issuer: bool) -> &Name {
        if for_issuer {
            self.issuer()
        } else {
            self.subject()
        }
    }

    pub fn version(&self) -> Version {
        self.tbs_certificate.version
    }

    pub fn not_before(&self) -> &Time {
        &self.tbs_certificate.validity.not_before
    }

    pub fn not_after(&self) -> &Time {
        &self.tbs_certificate.validity.not_after
    }

    pub fn extensions(&self) -> Option<&Extensions> {
        self.tbs_certificate.extensions.as_ref()
    }

    pub fn public_key_algorithm(&self) -> ObjectIdentifier {
        self.tbs_certificate.subject_public_key_info.algorithm.oid
    }

    /// Encoded key algorithm parameters, e.g. the named curve of an EC key.
    pub fn public_key_parameters(&self) -> Option<&der::Any> {
        let algorithm = &self.tbs_certificate.subject_public_key_info.algorithm;
        algorithm.parameters.as_ref()
    }

    /// Contents of the `subjectPublicKey` BIT STRING.
    pub fn public_key_bytes(&self) -> &[u8] {
        let spki = &self.tbs_certificate.subject_public_key_info;
        spki.subject_public_key.raw_bytes()
    }

    pub fn signature_algorithm_oid(&self) -> ObjectIdentifier {
        self.signature_algorithm.oid
    }
}
