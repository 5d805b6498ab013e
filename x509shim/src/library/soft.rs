// Copyright (c) 2026 Intel Corporation
//
// SPDX-License-Identifier: Apache-2.0 or MIT

//! In-tree [`CryptoLibrary`] backed by `ring`.
//!
//! `SoftLibrary` emulates either API generation. As a legacy library it
//! exports the connection-state query, honours the caller's locking callback
//! and wraps every internal critical section in a callback `Lock`/`Unlock`
//! pair on the matching lock index. As a modern library it manages its own
//! locking and accepts the consolidated init entry point.

extern crate alloc;

use alloc::collections::BTreeMap;
use alloc::string::{String, ToString};
use alloc::vec::Vec;

use ring::rand::{SecureRandom, SystemRandom};
use spin::{Mutex, RwLock};

use super::{
    hostname, Capability, CryptoLibrary, HostCheckFlags, InitFlags, LibraryError, LockMode,
    LockingCallback, LEGACY_VERSION_NUMBER, MODERN_VERSION_NUMBER,
};
use crate::adapter::ApiGeneration;
use crate::certificate::Certificate;
use crate::config::ShimConfig;
use crate::ex_data::SlotPolicy;

/// Lock guarding the error queue.
pub const LOCK_ERR: usize = 1;
/// Lock guarding extension-data class tables.
pub const LOCK_EX_DATA: usize = 2;
/// Lock guarding certificate lookups.
pub const LOCK_X509: usize = 3;
/// Lock guarding the random generator.
pub const LOCK_RAND: usize = 18;

/// Lock count a legacy library reports unless configured otherwise.
pub const DEFAULT_LEGACY_LOCK_COUNT: i32 = 41;

const LEGACY_MAX_EX_CLASS: i32 = 15;
const MODERN_MAX_EX_CLASS: i32 = 17;

const SEED_LEN: usize = 32;

/// Providers a modern library can load by name.
pub const PROVIDERS: [&str; 2] = ["default", "legacy"];

/// Signature algorithms a modern library can fetch, matched ignoring case.
pub const SIGNATURE_ALGORITHMS: [&str; 3] = ["RSA", "ECDSA", "ED25519"];

#[derive(Debug, Default)]
struct State {
    bound: bool,
    seeded: bool,
    algorithms_loaded: bool,
    strings_loaded: bool,
    init_flags: Option<InitFlags>,
    ex_classes: BTreeMap<i32, Vec<SlotPolicy>>,
    providers: Vec<String>,
    errors: Vec<LibraryError>,
}

pub struct SoftLibrary {
    generation: ApiGeneration,
    lock_count: i32,
    callback: RwLock<Option<LockingCallback>>,
    state: Mutex<State>,
    rng: SystemRandom,
}

impl SoftLibrary {
    /// A legacy-generation library with the default lock count.
    pub fn legacy() -> Self {
        Self::with_lock_count(DEFAULT_LEGACY_LOCK_COUNT)
    }

    /// A legacy-generation library reporting `lock_count` locks.
    ///
    /// Non-positive counts are kept as-is so initialization can reject them.
    pub fn with_lock_count(lock_count: i32) -> Self {
        Self::new(ApiGeneration::Legacy, lock_count)
    }

    /// A modern-generation library.
    pub fn modern() -> Self {
        Self::new(ApiGeneration::Modern, 1)
    }

    pub fn from_config(config: &ShimConfig) -> Self {
        match config.api_generation {
            ApiGeneration::Legacy => Self::with_lock_count(config.legacy_lock_count),
            ApiGeneration::Modern => Self::modern(),
        }
    }

    fn new(generation: ApiGeneration, lock_count: i32) -> Self {
        SoftLibrary {
            generation,
            lock_count,
            callback: RwLock::new(None),
            state: Mutex::new(State::default()),
            rng: SystemRandom::new(),
        }
    }

    pub fn generation(&self) -> ApiGeneration {
        self.generation
    }

    /// Flags accepted by the last successful [`CryptoLibrary::init_ssl`].
    pub fn init_flags(&self) -> Option<InitFlags> {
        self.with_lock(LOCK_ERR, |state| state.init_flags)
    }

    /// Policy recorded for `index` in extension-data class `class_index`.
    pub fn slot_policy(&self, class_index: i32, index: i32) -> Option<SlotPolicy> {
        let first = self.first_index();
        self.with_lock(LOCK_EX_DATA, |state| {
            let policies = state.ex_classes.get(&class_index)?;
            let offset = usize::try_from(index.checked_sub(first)?).ok()?;
            policies.get(offset).copied()
        })
    }

    /// Whether the random generator has been seeded.
    pub fn is_seeded(&self) -> bool {
        self.with_lock(LOCK_RAND, |state| state.seeded)
    }

    /// Whether the algorithm and error-string tables have been loaded.
    pub fn tables_loaded(&self) -> bool {
        self.with_lock(LOCK_ERR, |state| state.algorithms_loaded && state.strings_loaded)
    }

    /// Whether the named provider has been loaded.
    pub fn provider_loaded(&self, name: &str) -> bool {
        self.with_lock(LOCK_ERR, |state| state.providers.iter().any(|p| p == name))
    }

    fn is_legacy(&self) -> bool {
        self.generation == ApiGeneration::Legacy
    }

    fn first_index(&self) -> i32 {
        match self.generation {
            ApiGeneration::Legacy => 0,
            ApiGeneration::Modern => 1,
        }
    }

    fn max_ex_class(&self) -> i32 {
        match self.generation {
            ApiGeneration::Legacy => LEGACY_MAX_EX_CLASS,
            ApiGeneration::Modern => MODERN_MAX_EX_CLASS,
        }
    }

    /// Run `f` on the internal state, bracketed by the caller's locking
    /// callback on `index` when one is installed.
    fn with_lock<R>(&self, index: usize, f: impl FnOnce(&mut State) -> R) -> R {
        let callback = if self.is_legacy() {
            self.callback.read().clone()
        } else {
            None
        };

        if let Some(callback) = &callback {
            callback(LockMode::Lock, index);
        }
        let result = f(&mut self.state.lock());
        if let Some(callback) = &callback {
            callback(LockMode::Unlock, index);
        }
        result
    }

    fn push_error(&self, error: LibraryError) {
        log::trace!("{}: queued error: {}", self.name(), error);
        self.with_lock(LOCK_ERR, |state| state.errors.push(error));
    }
}

impl Default for SoftLibrary {
    fn default() -> Self {
        Self::modern()
    }
}

impl CryptoLibrary for SoftLibrary {
    fn name(&self) -> &str {
        match self.generation {
            ApiGeneration::Legacy => "soft-legacy",
            ApiGeneration::Modern => "soft-modern",
        }
    }

    fn version_number(&self) -> u64 {
        match self.generation {
            ApiGeneration::Legacy => LEGACY_VERSION_NUMBER,
            ApiGeneration::Modern => MODERN_VERSION_NUMBER,
        }
    }

    fn bind(&self) -> Result<(), LibraryError> {
        self.with_lock(LOCK_ERR, |state| state.bound = true);
        Ok(())
    }

    fn has_capability(&self, capability: Capability) -> bool {
        match capability {
            Capability::ConnectionStateQuery | Capability::LockingCallbacks => self.is_legacy(),
            Capability::InitEntryPoint
            | Capability::ProviderLoading
            | Capability::MessageSigning => !self.is_legacy(),
        }
    }

    fn num_locks(&self) -> i32 {
        self.lock_count
    }

    fn set_locking_callback(&self, callback: Option<LockingCallback>) {
        if !self.is_legacy() {
            return;
        }
        *self.callback.write() = callback;
    }

    fn rand_poll(&self) -> Result<(), LibraryError> {
        let mut seed = [0u8; SEED_LEN];
        let filled = self.rng.fill(&mut seed).is_ok();
        if !filled {
            self.push_error(LibraryError::RandomSourceUnavailable);
            return Err(LibraryError::RandomSourceUnavailable);
        }
        self.with_lock(LOCK_RAND, |state| state.seeded = true);
        Ok(())
    }

    fn add_all_algorithms_conf(&self) {
        self.with_lock(LOCK_ERR, |state| state.algorithms_loaded = true);
    }

    fn load_crypto_strings(&self) {
        self.with_lock(LOCK_ERR, |state| state.strings_loaded = true);
    }

    fn init_ssl(&self, flags: InitFlags) -> bool {
        if self.is_legacy() {
            self.push_error(LibraryError::Unsupported("init_ssl"));
            return false;
        }
        self.with_lock(LOCK_ERR, |state| {
            state.init_flags = Some(flags);
            state.algorithms_loaded |= flags.contains(InitFlags::ADD_ALL_CIPHERS)
                && flags.contains(InitFlags::ADD_ALL_DIGESTS);
            state.strings_loaded |= flags.contains(InitFlags::LOAD_CRYPTO_STRINGS);
        });
        true
    }

    fn get_ex_new_index(&self, class_index: i32, policy: SlotPolicy) -> i32 {
        if !(0..=self.max_ex_class()).contains(&class_index) {
            self.push_error(LibraryError::BadExDataClass(class_index));
            return -1;
        }
        let first = self.first_index();
        let index = self.with_lock(LOCK_EX_DATA, |state| {
            let policies = state.ex_classes.entry(class_index).or_default();
            policies.push(policy);
            i32::try_from(policies.len() - 1)
                .ok()
                .and_then(|offset| offset.checked_add(first))
        });
        match index {
            Some(index) => {
                log::trace!("class {} index {} -> {:?}", class_index, index, policy);
                index
            }
            None => -1,
        }
    }

    fn clear_error(&self) {
        self.with_lock(LOCK_ERR, |state| state.errors.clear());
    }

    fn last_error(&self) -> Option<LibraryError> {
        self.with_lock(LOCK_ERR, |state| state.errors.last().cloned())
    }

    fn check_host(&self, cert: &Certificate, host: Option<&[u8]>, flags: HostCheckFlags) -> i32 {
        let result = self.with_lock(LOCK_X509, |_| hostname::check_host(cert, host, flags));
        if result == -2 {
            self.push_error(LibraryError::InvalidHostName);
        }
        result
    }

    fn try_load_provider(&self, name: &str) -> bool {
        if self.is_legacy() {
            self.push_error(LibraryError::Unsupported("provider loading"));
            return false;
        }
        if !PROVIDERS.iter().any(|known| *known == name) {
            self.push_error(LibraryError::ProviderNotFound(name.to_string()));
            return false;
        }
        self.with_lock(LOCK_ERR, |state| {
            if !state.providers.iter().any(|p| p == name) {
                state.providers.push(name.to_string());
            }
        });
        log::trace!("{}: provider {} loaded", self.name(), name);
        true
    }

    fn fetch_signature(&self, algorithm: &str) -> bool {
        if self.is_legacy() {
            self.push_error(LibraryError::Unsupported("signature fetch"));
            return false;
        }
        let found = SIGNATURE_ALGORITHMS
            .iter()
            .any(|known| known.eq_ignore_ascii_case(algorithm));
        if !found {
            self.push_error(LibraryError::AlgorithmNotFound(algorithm.to_string()));
        }
        found
    }
}
