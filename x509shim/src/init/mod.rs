// Copyright (c) 2026 Intel Corporation
//
// SPDX-License-Identifier: Apache-2.0 or MIT

//! One-time library initialization.
//!
//! [`InitGuard`] runs the setup sequence at most once. The first caller does
//! the work; every concurrent caller blocks on the same [`spin::Once`] and
//! sees the same outcome. A ready guard hands out the [`Runtime`], which is
//! the only way to reach name resolution and identity checks.
//!
//! Legacy libraries get a [`LockTable`] and a locking callback, a random
//! seed poll and explicit table loading. Modern libraries get their
//! consolidated init call and an exit hook. Both then register the
//! extension-data slots.
//!
//! # Example
//! ```no_run
//! use x509shim::init;
//! use x509shim::name_info::NameType;
//!
//! # fn example(cert: &x509shim::Certificate) -> x509shim::Result<()> {
//! let runtime = init::runtime()?;
//! let name = runtime.name_info(cert, NameType::Simple, false)?;
//! # let _ = name;
//! # Ok(())
//! # }
//! ```

extern crate alloc;

use alloc::string::String;
use alloc::sync::Arc;
use core::net::IpAddr;
use core::sync::atomic::{AtomicBool, Ordering};

use spin::{Lazy, Once};

mod locks;
mod shutdown;

pub use locks::LockTable;
pub use shutdown::{process_flag, register_exit_hook, ShutdownFlag};

use crate::adapter::{LockModel, VersionAdapter};
use crate::certificate::Certificate;
use crate::config::ShimConfig;
use crate::error::{Error, InitError, Result};
use crate::ex_data::{register_slots, SlotHandles};
use crate::identity::{self, MatchOutcome};
use crate::library::{self, Capability, CryptoLibrary, InitFlags, SoftLibrary};
use crate::name_info::{self, NameType};

/// Flags passed to a modern library's init entry point.
/// Provider holding algorithms a modern library no longer loads by default.
pub const LEGACY_PROVIDER: &str = "legacy";

/// Flags passed to a modern library's init entry point.
pub const MODERN_INIT_FLAGS: InitFlags = InitFlags::ADD_ALL_CIPHERS
    .union(InitFlags::ADD_ALL_DIGESTS)
    .union(InitFlags::LOAD_CONFIG)
    .union(InitFlags::NO_ATEXIT)
    .union(InitFlags::LOAD_CRYPTO_STRINGS)
    .union(InitFlags::LOAD_SSL_STRINGS);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitState {
    Uninitialized,
    Initializing,
    Ready,
    Failed(InitError),
}

/// Initialized library state.
pub struct Runtime {
    library: Arc<dyn CryptoLibrary>,
    adapter: VersionAdapter,
    slots: SlotHandles,
    locks: Option<Arc<LockTable>>,
    shutdown: Arc<ShutdownFlag>,
}

impl Runtime {
    pub fn library(&self) -> &dyn CryptoLibrary {
        self.library.as_ref()
    }

    pub fn adapter(&self) -> VersionAdapter {
        self.adapter
    }

    pub fn slots(&self) -> &SlotHandles {
        &self.slots
    }

    /// Size of the caller-managed lock array; 0 for self-managed libraries.
    pub fn lock_count(&self) -> usize {
        self.locks.as_ref().map_or(0, |locks| locks.len())
    }

    /// Numeric library version in MNNFFPPS form.
    pub fn library_version_number(&self) -> u64 {
        self.library.version_number()
    }

    pub fn is_shutting_down(&self) -> bool {
        self.shutdown.is_set()
    }

    fn ensure_live(&self) -> Result<()> {
        if self.shutdown.is_set() {
            return Err(Error::LibraryShutdown);
        }
        Ok(())
    }

    /// Make the library's legacy algorithms available.
    ///
    /// Only libraries that load providers do anything. Whether the provider
    /// loaded is not reported, and the error queue is left empty either way.
    pub fn register_legacy_algorithms(&self) -> Result<()> {
        self.ensure_live()?;
        if !self.adapter.loads_providers()
            || !self.library.has_capability(Capability::ProviderLoading)
        {
            return Ok(());
        }
        if !self.library.try_load_provider(LEGACY_PROVIDER) {
            log::debug!("{}: {} provider not loaded", self.library.name(), LEGACY_PROVIDER);
        }
        self.library.clear_error();
        Ok(())
    }

    /// Whether `algorithm` can be used for one-shot message signing.
    ///
    /// Always false for legacy libraries and for modern ones that lack the
    /// message sign/verify entry points.
    pub fn is_signature_algorithm_available(&self, algorithm: &str) -> Result<bool> {
        self.ensure_live()?;
        if !self.adapter.supports_message_signing()
            || !self.library.has_capability(Capability::MessageSigning)
        {
            return Ok(false);
        }
        Ok(self.library.fetch_signature(algorithm))
    }

    /// See [`name_info::resolve`].
    pub fn name_info(
        &self,
        cert: &Certificate,
        name_type: NameType,
        for_issuer: bool,
    ) -> Result<Option<String>> {
        self.ensure_live()?;
        self.library.clear_error();
        Ok(name_info::resolve(cert, name_type, for_issuer))
    }

    /// See [`identity::check_hostname`].
    pub fn check_hostname(
        &self,
        cert: Option<&Certificate>,
        hostname: Option<&[u8]>,
        cch: i32,
    ) -> Result<MatchOutcome> {
        self.ensure_live()?;
        Ok(identity::check_hostname(
            self.library.as_ref(),
            cert,
            hostname,
            cch,
        ))
    }

    /// See [`identity::check_ip_address`].
    pub fn check_ip_address(
        &self,
        cert: Option<&Certificate>,
        address: Option<&[u8]>,
        address_len: i32,
        hostname: Option<&[u8]>,
        cch: i32,
    ) -> Result<MatchOutcome> {
        self.ensure_live()?;
        Ok(identity::check_ip_address(
            self.library.as_ref(),
            cert,
            address,
            address_len,
            hostname,
            cch,
        ))
    }

    pub fn match_hostname(&self, cert: &Certificate, hostname: &str) -> Result<MatchOutcome> {
        self.ensure_live()?;
        Ok(identity::match_hostname(self.library.as_ref(), cert, hostname))
    }

    pub fn match_ip_address(&self, cert: &Certificate, address: IpAddr) -> Result<MatchOutcome> {
        self.ensure_live()?;
        Ok(identity::match_ip_address(
            self.library.as_ref(),
            cert,
            address,
        ))
    }
}

/// Exactly-once initialization of one library.
pub struct InitGuard {
    library: Arc<dyn CryptoLibrary>,
    shutdown: Arc<ShutdownFlag>,
    claimed: AtomicBool,
    outcome: Once<core::result::Result<Runtime, InitError>>,
}

impl InitGuard {
    pub fn new(library: Arc<dyn CryptoLibrary>, shutdown: Arc<ShutdownFlag>) -> Self {
        InitGuard {
            library,
            shutdown,
            claimed: AtomicBool::new(false),
            outcome: Once::new(),
        }
    }

    pub fn state(&self) -> InitState {
        match self.outcome.get() {
            Some(Ok(_)) => InitState::Ready,
            Some(Err(e)) => InitState::Failed(*e),
            None if self.claimed.load(Ordering::Acquire) => InitState::Initializing,
            None => InitState::Uninitialized,
        }
    }

    /// Run the setup sequence if no caller has yet, then return its outcome.
    pub fn ensure_initialized(&self) -> core::result::Result<&Runtime, InitError> {
        let outcome = self.outcome.call_once(|| {
            self.claimed.store(true, Ordering::Release);
            let outcome = initialize(&self.library, &self.shutdown);
            match &outcome {
                Ok(runtime) => log::info!(
                    "{} initialized ({} API, {:#010x})",
                    self.library.name(),
                    runtime.adapter.generation(),
                    runtime.library_version_number()
                ),
                Err(e) => log::error!("{} initialization failed: {}", self.library.name(), e),
            }
            outcome
        });
        outcome.as_ref().map_err(|e| *e)
    }

    /// 0 on success, otherwise the [`InitError`] code.
    pub fn ensure_initialized_status(&self) -> i32 {
        match self.ensure_initialized() {
            Ok(_) => 0,
            Err(e) => e.code(),
        }
    }

    /// Whether the library can be bound. Does not initialize it.
    pub fn library_available(&self) -> bool {
        library::is_available(self.library.as_ref())
    }

    /// The runtime if initialization already succeeded, without starting it.
    pub fn runtime(&self) -> Result<&Runtime> {
        match self.outcome.get() {
            Some(Ok(runtime)) => Ok(runtime),
            Some(Err(e)) => Err(Error::Init(*e)),
            None => Err(Error::NotInitialized),
        }
    }

    /// Forget the outcome so the next call initializes again.
    pub fn reset(&mut self) {
        if let Some(Ok(runtime)) = self.outcome.get() {
            if runtime.locks.is_some() {
                self.library.set_locking_callback(None);
            }
        }
        self.outcome = Once::new();
        self.claimed.store(false, Ordering::Release);
    }
}

fn initialize(
    library: &Arc<dyn CryptoLibrary>,
    shutdown: &Arc<ShutdownFlag>,
) -> core::result::Result<Runtime, InitError> {
    library.bind().map_err(|e| {
        log::error!("{}: {}", library.name(), e);
        InitError::LoadFailure
    })?;

    let adapter = VersionAdapter::detect(library.as_ref());
    log::info!("{}: {} API generation", library.name(), adapter.generation());

    let locks = match adapter.lock_model() {
        LockModel::CallerManaged => Some(init_caller_managed(library.as_ref())?),
        LockModel::SelfManaged => {
            init_self_managed(library.as_ref());
            None
        }
    };

    let slots = register_slots(library.as_ref(), &adapter).map_err(|e| {
        if locks.is_some() {
            library.set_locking_callback(None);
        }
        e
    })?;

    Ok(Runtime {
        library: library.clone(),
        adapter,
        slots,
        locks,
        shutdown: shutdown.clone(),
    })
}

fn init_caller_managed(
    library: &dyn CryptoLibrary,
) -> core::result::Result<Arc<LockTable>, InitError> {
    let locks = Arc::new(LockTable::new(library.num_locks())?);
    log::debug!("{}: {} caller-managed locks", library.name(), locks.len());
    library.set_locking_callback(Some(LockTable::callback(&locks)));

    if let Err(e) = library.rand_poll() {
        log::error!("{}: {}", library.name(), e);
        library.set_locking_callback(None);
        return Err(InitError::RandomSeed);
    }

    library.add_all_algorithms_conf();
    library.load_crypto_strings();
    Ok(locks)
}

fn init_self_managed(library: &dyn CryptoLibrary) {
    if !library.init_ssl(MODERN_INIT_FLAGS) {
        log::warn!(
            "{}: init entry point failed: {:?}",
            library.name(),
            library.last_error()
        );
    }
    register_exit_hook();
}

fn process_config() -> ShimConfig {
    #[cfg(feature = "std")]
    {
        ShimConfig::from_env()
    }
    #[cfg(not(feature = "std"))]
    {
        ShimConfig::default()
    }
}

static GLOBAL: Lazy<InitGuard> = Lazy::new(|| {
    let config = process_config();
    InitGuard::new(Arc::new(SoftLibrary::from_config(&config)), process_flag())
});

/// Process-wide [`InitGuard::ensure_initialized`].
pub fn ensure_initialized() -> core::result::Result<&'static Runtime, InitError> {
    GLOBAL.ensure_initialized()
}

/// Process-wide [`InitGuard::ensure_initialized_status`].
pub fn ensure_initialized_status() -> i32 {
    GLOBAL.ensure_initialized_status()
}

/// Process-wide [`InitGuard::library_available`].
pub fn library_available() -> bool {
    GLOBAL.library_available()
}

/// Initialize if needed and return the process-wide runtime.
pub fn runtime() -> Result<&'static Runtime> {
    Ok(ensure_initialized()?)
}
