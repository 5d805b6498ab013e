// Copyright (c) 2026 Intel Corporation
//
// SPDX-License-Identifier: Apache-2.0 or MIT

//! X.509 name and identity services over a version-straddling crypto library
//!
//! A no_std-compatible shim that initializes an underlying certificate/TLS
//! library exactly once, whichever of its two API generations is present,
//! and resolves display names and host/IP identities from certificates.
//! Certificates are decoded with `der`.
//!
//! # Features
//! - Thread-safe one-time initialization with caller-managed or
//!   self-managed locking
//! - Extension-data slot registration with owned and opaque policies
//! - Name resolution from Subject/Issuer and their alternative names
//! - Host name and IP address identity checks
//! - Size-then-copy accessors for raw certificate fields
//!
//! # Example
//! ```no_run
//! use x509shim::name_info::NameType;
//! use x509shim::Certificate;
//!
//! # fn example(cert_der: &[u8]) -> x509shim::Result<()> {
//! let cert = Certificate::from_der(cert_der)?;
//! let runtime = x509shim::init::runtime()?;
//! let _ = runtime.name_info(&cert, NameType::Dns, false)?;
//! let _ = runtime.match_hostname(&cert, "www.example.com")?;
//! # Ok(())
//! # }
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(unsafe_code)]

extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

pub mod accessors;
pub mod adapter;
pub mod certificate;
pub mod config;
pub mod error;
pub mod ex_data;
pub mod identity;
pub mod init;
pub mod library;
pub mod name_info;
pub mod time;
pub mod x509;

pub use certificate::{Certificate, CertificateBuilder};
pub use error::{Error, InitError, Result};
pub use identity::MatchOutcome;
pub use init::{ensure_initialized, ensure_initialized_status, InitGuard, Runtime};
pub use library::{CryptoLibrary, SoftLibrary};
pub use name_info::NameType;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::adapter::{ApiGeneration, VersionAdapter};
    pub use crate::identity::MatchOutcome;
    pub use crate::library::CryptoLibrary;
    pub use crate::name_info::NameType;
    pub use crate::{Certificate, Error, Result, Runtime};
}
