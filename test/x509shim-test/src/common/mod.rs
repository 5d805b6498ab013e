// Copyright (c) 2026 Intel Corporation
//
// SPDX-License-Identifier: Apache-2.0 or MIT

#![forbid(unsafe_code)]

pub mod fixtures;

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use x509shim::certificate::Certificate;
use x509shim::ex_data::SlotPolicy;
use x509shim::library::{
    Capability, CryptoLibrary, HostCheckFlags, InitFlags, LibraryError, LockingCallback,
};
use x509shim::SoftLibrary;

/// Failures the mock injects into the init sequence.
#[derive(Debug, Default, Clone, Copy)]
pub struct Faults {
    pub bind: bool,
    /// Overrides the lock count reported to the caller.
    pub lock_count: Option<i32>,
    pub rand_poll: bool,
    pub init_ssl: bool,
    /// Refuse slot registration in this extension-data class.
    pub ex_index_class: Option<i32>,
    /// Fail every provider load.
    pub provider_load: bool,
    /// Hide the message sign/verify entry points.
    pub no_message_signing: bool,
}

/// Calls observed by the mock.
#[derive(Debug, Default)]
pub struct CallCounts {
    pub bind: AtomicUsize,
    pub set_locking_callback: AtomicUsize,
    pub rand_poll: AtomicUsize,
    pub add_all_algorithms_conf: AtomicUsize,
    pub load_crypto_strings: AtomicUsize,
    pub init_ssl: AtomicUsize,
    pub get_ex_new_index: AtomicUsize,
    pub clear_error: AtomicUsize,
    pub check_host: AtomicUsize,
    pub try_load_provider: AtomicUsize,
    pub fetch_signature: AtomicUsize,
}

pub fn count(counter: &AtomicUsize) -> usize {
    counter.load(Ordering::SeqCst)
}

/// `SoftLibrary` wrapped with call counting and failure injection.
pub struct MockLibrary {
    inner: SoftLibrary,
    faults: Faults,
    bind_delay: Option<Duration>,
    callback: spin::Mutex<Option<LockingCallback>>,
    pub calls: CallCounts,
}

impl MockLibrary {
    pub fn legacy() -> Self {
        Self::wrap(SoftLibrary::legacy())
    }

    pub fn modern() -> Self {
        Self::wrap(SoftLibrary::modern())
    }

    fn wrap(inner: SoftLibrary) -> Self {
        MockLibrary {
            inner,
            faults: Faults::default(),
            bind_delay: None,
            callback: spin::Mutex::new(None),
            calls: CallCounts::default(),
        }
    }

    pub fn with_faults(mut self, faults: Faults) -> Self {
        self.faults = faults;
        self
    }

    /// Stall `bind` so concurrent callers pile up behind the first one.
    pub fn with_bind_delay(mut self, delay: Duration) -> Self {
        self.bind_delay = Some(delay);
        self
    }

    pub fn inner(&self) -> &SoftLibrary {
        &self.inner
    }

    /// Locking callback currently installed by the caller.
    pub fn installed_callback(&self) -> Option<LockingCallback> {
        self.callback.lock().clone()
    }
}

fn bump(counter: &AtomicUsize) {
    counter.fetch_add(1, Ordering::SeqCst);
}

impl CryptoLibrary for MockLibrary {
    fn name(&self) -> &str {
        "mock"
    }

    fn version_number(&self) -> u64 {
        self.inner.version_number()
    }

    fn bind(&self) -> Result<(), LibraryError> {
        bump(&self.calls.bind);
        if let Some(delay) = self.bind_delay {
            std::thread::sleep(delay);
        }
        if self.faults.bind {
            return Err(LibraryError::Unavailable("mock bind"));
        }
        self.inner.bind()
    }

    fn has_capability(&self, capability: Capability) -> bool {
        if capability == Capability::MessageSigning && self.faults.no_message_signing {
            return false;
        }
        self.inner.has_capability(capability)
    }

    fn num_locks(&self) -> i32 {
        self.faults
            .lock_count
            .unwrap_or_else(|| self.inner.num_locks())
    }

    fn set_locking_callback(&self, callback: Option<LockingCallback>) {
        bump(&self.calls.set_locking_callback);
        *self.callback.lock() = callback.clone();
        self.inner.set_locking_callback(callback);
    }

    fn rand_poll(&self) -> Result<(), LibraryError> {
        bump(&self.calls.rand_poll);
        if self.faults.rand_poll {
            return Err(LibraryError::RandomSourceUnavailable);
        }
        self.inner.rand_poll()
    }

    fn add_all_algorithms_conf(&self) {
        bump(&self.calls.add_all_algorithms_conf);
        self.inner.add_all_algorithms_conf()
    }

    fn load_crypto_strings(&self) {
        bump(&self.calls.load_crypto_strings);
        self.inner.load_crypto_strings()
    }

    fn init_ssl(&self, flags: InitFlags) -> bool {
        bump(&self.calls.init_ssl);
        if self.faults.init_ssl {
            return false;
        }
        self.inner.init_ssl(flags)
    }

    fn get_ex_new_index(&self, class_index: i32, policy: SlotPolicy) -> i32 {
        bump(&self.calls.get_ex_new_index);
        if self.faults.ex_index_class == Some(class_index) {
            return -1;
        }
        self.inner.get_ex_new_index(class_index, policy)
    }

    fn clear_error(&self) {
        bump(&self.calls.clear_error);
        self.inner.clear_error()
    }

    fn last_error(&self) -> Option<LibraryError> {
        self.inner.last_error()
    }

    fn check_host(&self, cert: &Certificate, host: Option<&[u8]>, flags: HostCheckFlags) -> i32 {
        bump(&self.calls.check_host);
        self.inner.check_host(cert, host, flags)
    }

    fn try_load_provider(&self, name: &str) -> bool {
        bump(&self.calls.try_load_provider);
        if self.faults.provider_load {
            // queue an error the caller is expected to discard
            return self.inner.try_load_provider("missing-provider");
        }
        self.inner.try_load_provider(name)
    }

    fn fetch_signature(&self, algorithm: &str) -> bool {
        bump(&self.calls.fetch_signature);
        self.inner.fetch_signature(algorithm)
    }
}

#[cfg(test)]
pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}
