// Copyright (c) 2026 Intel Corporation
//
// SPDX-License-Identifier: Apache-2.0 or MIT

//! Abstraction over the underlying certificate/TLS library.
//!
//! The shim drives initialization, extension-data registration and host
//! checks through the [`CryptoLibrary`] trait, so the same state machine runs
//! against either API generation and against instrumented test doubles.
//! [`SoftLibrary`] is the in-tree implementation.

extern crate alloc;

use alloc::string::String;
use alloc::sync::Arc;
use core::fmt;
use core::ops::BitOr;

use crate::certificate::Certificate;
use crate::ex_data::SlotPolicy;

mod hostname;
pub(crate) mod soft;

pub use soft::{
    SoftLibrary, DEFAULT_LEGACY_LOCK_COUNT, LOCK_ERR, LOCK_EX_DATA, LOCK_RAND, LOCK_X509,
    PROVIDERS, SIGNATURE_ALGORITHMS,
};

/// Version number reported by a legacy-generation library (1.0.2 series).
pub const LEGACY_VERSION_NUMBER: u64 = 0x1000_2150;

/// Version number reported by a modern-generation library (3.0 series).
pub const MODERN_VERSION_NUMBER: u64 = 0x3000_0000;

/// Whether the locking callback is asked to take or release a lock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockMode {
    Lock,
    Unlock,
}

impl LockMode {
    const CRYPTO_LOCK: i32 = 1;

    /// Decode a raw callback mode word; only the lock bit is significant.
    pub fn from_raw(mode: i32) -> Self {
        if mode & Self::CRYPTO_LOCK != 0 {
            LockMode::Lock
        } else {
            LockMode::Unlock
        }
    }
}

/// Callback a legacy library invokes around its internal critical sections.
pub type LockingCallback = Arc<dyn Fn(LockMode, usize) + Send + Sync>;

/// Optional entry points whose presence distinguishes API generations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    /// Per-connection state query; only legacy libraries export it.
    ConnectionStateQuery,
    /// Caller-supplied locking callbacks are honoured.
    LockingCallbacks,
    /// Single consolidated init entry point.
    InitEntryPoint,
    /// Algorithm providers loadable by name at run time.
    ProviderLoading,
    /// One-shot message sign and verify entry points.
    MessageSigning,
}

/// Option bits for the consolidated init entry point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InitFlags(u64);

impl InitFlags {
    pub const LOAD_CRYPTO_STRINGS: InitFlags = InitFlags(0x0000_0002);
    pub const ADD_ALL_CIPHERS: InitFlags = InitFlags(0x0000_0004);
    pub const ADD_ALL_DIGESTS: InitFlags = InitFlags(0x0000_0008);
    pub const LOAD_CONFIG: InitFlags = InitFlags(0x0000_0040);
    pub const NO_ATEXIT: InitFlags = InitFlags(0x0008_0000);
    pub const LOAD_SSL_STRINGS: InitFlags = InitFlags(0x0020_0000);

    pub const fn empty() -> Self {
        InitFlags(0)
    }

    pub const fn bits(&self) -> u64 {
        self.0
    }

    pub const fn contains(&self, other: InitFlags) -> bool {
        self.0 & other.0 == other.0
    }

    pub const fn union(self, other: InitFlags) -> Self {
        InitFlags(self.0 | other.0)
    }
}

impl BitOr for InitFlags {
    type Output = InitFlags;

    fn bitor(self, rhs: InitFlags) -> InitFlags {
        self.union(rhs)
    }
}

/// Option bits for [`CryptoLibrary::check_host`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HostCheckFlags(u32);

impl HostCheckFlags {
    /// Only accept a wildcard that makes up a whole label.
    pub const NO_PARTIAL_WILDCARDS: HostCheckFlags = HostCheckFlags(0x4);

    pub const fn empty() -> Self {
        HostCheckFlags(0)
    }

    pub const fn contains(&self, other: HostCheckFlags) -> bool {
        self.0 & other.0 == other.0
    }
}

impl BitOr for HostCheckFlags {
    type Output = HostCheckFlags;

    fn bitor(self, rhs: HostCheckFlags) -> HostCheckFlags {
        HostCheckFlags(self.0 | rhs.0)
    }
}

/// Entries of the library's error queue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LibraryError {
    /// Library symbols could not be resolved
    Unavailable(&'static str),
    /// Extension-data class number outside the supported range
    BadExDataClass(i32),
    /// No entropy source could be read
    RandomSourceUnavailable,
    /// Host name argument was empty or contained a NUL byte
    InvalidHostName,
    /// Entry point not provided by this API generation
    Unsupported(&'static str),
    /// No provider with this name could be loaded
    ProviderNotFound(String),
    /// No implementation of this signature algorithm is available
    AlgorithmNotFound(String),
}

impl fmt::Display for LibraryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LibraryError::Unavailable(what) => write!(f, "library unavailable: {}", what),
            LibraryError::BadExDataClass(class) => {
                write!(f, "invalid extension-data class {}", class)
            }
            LibraryError::RandomSourceUnavailable => write!(f, "random source unavailable"),
            LibraryError::InvalidHostName => write!(f, "invalid host name argument"),
            LibraryError::Unsupported(what) => write!(f, "unsupported entry point: {}", what),
            LibraryError::ProviderNotFound(name) => write!(f, "provider not found: {}", name),
            LibraryError::AlgorithmNotFound(name) => {
                write!(f, "signature algorithm not found: {}", name)
            }
        }
    }
}

/// Operations the shim needs from the certificate/TLS library.
///
/// Methods mirror the library's flat entry points: integer results keep the
/// library's sentinel conventions (`-1` for a failed index allocation, `-2`
/// for a rejected host argument).
pub trait CryptoLibrary: Send + Sync {
    /// Short library name for logging.
    fn name(&self) -> &str;

    /// Numeric version in MNNFFPPS form.
    fn version_number(&self) -> u64;

    /// Resolve the library's entry points.
    fn bind(&self) -> Result<(), LibraryError>;

    /// Whether an optional entry point is present.
    fn has_capability(&self, capability: Capability) -> bool;

    /// Number of locks the caller must provide to the locking callback.
    fn num_locks(&self) -> i32;

    /// Install or remove the locking callback.
    fn set_locking_callback(&self, callback: Option<LockingCallback>);

    /// Seed the random generator from the system.
    fn rand_poll(&self) -> Result<(), LibraryError>;

    /// Register every cipher and digest, honouring library configuration.
    fn add_all_algorithms_conf(&self);

    /// Load the error-string tables.
    fn load_crypto_strings(&self);

    /// Consolidated init entry point; returns whether the library accepted it.
    fn init_ssl(&self, flags: InitFlags) -> bool;

    /// Allocate an extension-data index in `class_index`; `-1` on failure.
    fn get_ex_new_index(&self, class_index: i32, policy: SlotPolicy) -> i32;

    /// Drop every queued error.
    fn clear_error(&self);

    /// Most recently queued error.
    fn last_error(&self) -> Option<LibraryError>;

    /// Match `host` against the certificate's DNS identities.
    ///
    /// Returns 1 on match, 0 on mismatch and -2 when `host` is absent or
    /// malformed. An empty `host` matches nothing.
    fn check_host(&self, cert: &Certificate, host: Option<&[u8]>, flags: HostCheckFlags) -> i32;

    /// Load the named algorithm provider; whether it is loaded afterwards.
    fn try_load_provider(&self, name: &str) -> bool;

    /// Whether a signature implementation named `algorithm` can be fetched.
    fn fetch_signature(&self, algorithm: &str) -> bool;
}

/// Whether the library's entry points resolve, without initializing it.
pub fn is_available(library: &dyn CryptoLibrary) -> bool {
    match library.bind() {
        Ok(()) => true,
        Err(e) => {
            log::debug!("{} not available: {}", library.name(), e);
            false
        }
    }
}
