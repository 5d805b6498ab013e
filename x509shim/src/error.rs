// Copyright (c) 2026 Intel Corporation
//
// SPDX-License-Identifier: Apache-2.0 or MIT

//! Error types for the certificate shim
//!
//! Decoding failures, slot misuse and initialization failures all surface
//! through [`Error`]. Absence of a requested name or extension is never an
//! error; those paths return `None`.

extern crate alloc;

use alloc::string::{String, ToString};
use core::fmt;

/// Result type alias for shim operations
pub type Result<T> = core::result::Result<T, Error>;

/// Top-level error type
#[derive(Debug, Clone)]
#[non_exhaustive]
pub enum Error {
    /// Errors during DER/ASN.1 parsing
    ParseError(ParseError),

    /// Errors during DER/ASN.1 parsing (from der crate)
    Asn1(der::Error),

    /// Certificate encoding errors (PEM/DER conversion)
    EncodingError(EncodingError),

    /// Name and alternative-name errors
    NameError(NameError),

    /// Extension-data slot misuse
    SlotError(SlotError),

    /// The one-time library initialization failed
    Init(InitError),

    /// The shim has not been initialized yet
    NotInitialized,

    /// The library is being unloaded at process exit
    LibraryShutdown,
}

/// Errors that occur during DER/ASN.1 parsing
#[derive(Debug, Clone)]
pub enum ParseError {
    /// Invalid length encoding
    InvalidLength(String),

    /// Tag that cannot be represented as a single identifier octet
    UnsupportedTag(u8),

    /// Error from der crate
    DerError(String),
}

/// Errors related to certificate encoding
#[derive(Debug, Clone)]
pub enum EncodingError {
    /// Invalid PEM format
    InvalidPem(String),

    /// PEM label mismatch
    InvalidPemLabel { expected: String, found: String },
}

/// Errors related to distinguished and alternative names
#[derive(Debug, Clone)]
pub enum NameError {
    /// Invalid name encoding
    InvalidEncoding(String),

    /// Attribute value not valid for its string type
    InvalidAttribute(String),
}

/// Errors raised when attaching data to extension slots
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotError {
    /// Slot handle belongs to another object class
    ClassMismatch,

    /// Value kind does not match the policy the slot was registered with
    PolicyMismatch,
}

/// Failure of the one-time initialization sequence.
///
/// The numeric codes are the status values returned by
/// [`crate::init::ensure_initialized_status`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum InitError {
    /// The library reported a lock count of zero or less
    LockCountInvalid = 1,

    /// Lock array size overflowed or could not be reserved
    Allocation = 2,

    /// A lock slot could not be initialized
    ///
    /// Kept in the status numbering; `spin` lock slots are infallible.
    MutexInit = 3,

    /// Seeding the random generator failed
    RandomSeed = 4,

    /// Library bindings could not be resolved
    LoadFailure = 5,

    /// The library refused to hand out an extension-data slot
    SlotRegistration = 6,
}

impl InitError {
    /// Status code reported to callers of the flat entry point.
    pub fn code(&self) -> i32 {
        *self as i32
    }
}

// ============================================================================
// Error Display Implementation (works in both std and no_std)
// ============================================================================

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::ParseError(e) => write!(f, "Parse error: {}", e),
            Error::Asn1(e) => write!(f, "ASN.1 error: {}", e),
            Error::EncodingError(e) => write!(f, "Encoding error: {}", e),
            Error::NameError(e) => write!(f, "Name error: {}", e),
            Error::SlotError(e) => write!(f, "Slot error: {}", e),
            Error::Init(e) => write!(f, "Initialization failed: {}", e),
            Error::NotInitialized => write!(f, "Library not initialized"),
            Error::LibraryShutdown => write!(f, "Library is shutting down"),
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::InvalidLength(msg) => write!(f, "Invalid length: {}", msg),
            ParseError::UnsupportedTag(tag) => write!(f, "Unsupported tag: 0x{:02x}", tag),
            ParseError::DerError(msg) => write!(f, "DER error: {}", msg),
        }
    }
}

impl fmt::Display for EncodingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EncodingError::InvalidPem(msg) => write!(f, "Invalid PEM: {}", msg),
            EncodingError::InvalidPemLabel { expected, found } => {
                write!(
                    f,
                    "Invalid PEM label: expected '{}', found '{}'",
                    expected, found
                )
            }
        }
    }
}

impl fmt::Display for NameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NameError::InvalidEncoding(msg) => write!(f, "Invalid name encoding: {}", msg),
            NameError::InvalidAttribute(attr) => write!(f, "Invalid attribute: {}", attr),
        }
    }
}

impl fmt::Display for SlotError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SlotError::ClassMismatch => write!(f, "slot belongs to a different object class"),
            SlotError::PolicyMismatch => write!(f, "value does not match the slot policy"),
        }
    }
}

impl fmt::Display for InitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InitError::LockCountInvalid => write!(f, "library reported an invalid lock count"),
            InitError::Allocation => write!(f, "lock array allocation failed"),
            InitError::MutexInit => write!(f, "lock initialization failed"),
            InitError::RandomSeed => write!(f, "random generator seeding failed"),
            InitError::LoadFailure => write!(f, "library bindings could not be resolved"),
            InitError::SlotRegistration => write!(f, "extension-data slot registration failed"),
        }?;
        write!(f, " (status {})", self.code())
    }
}

// ============================================================================
// std::error::Error implementation (when std feature is enabled)
// ============================================================================

#[cfg(feature = "std")]
impl std::error::Error for Error {}

// ============================================================================
// Conversions from external crate errors
// ============================================================================

/// Convert from der crate errors
impl From<der::Error> for Error {
    fn from(err: der::Error) -> Self {
        Error::ParseError(ParseError::DerError(err.to_string()))
    }
}

/// Convert from PEM decoding errors
impl From<pem_rfc7468::Error> for Error {
    fn from(err: pem_rfc7468::Error) -> Self {
        Error::EncodingError(EncodingError::InvalidPem(err.to_string()))
    }
}

impl From<InitError> for Error {
    fn from(err: InitError) -> Self {
        Error::Init(err)
    }
}

impl From<SlotError> for Error {
    fn from(err: SlotError) -> Self {
        Error::SlotError(err)
    }
}

// ============================================================================
// Helper constructors for common error cases
// ============================================================================

impl Error {
    /// Create a name error for an attribute value rejected by its string type
    pub fn invalid_attribute<S: Into<String>>(msg: S) -> Self {
        Error::NameError(NameError::InvalidAttribute(msg.into()))
    }
}

// ============================================================================
// Tests
// ============================================================================
