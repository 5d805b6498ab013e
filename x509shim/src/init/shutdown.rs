// Copyright (c) 2026 Intel Corporation
//
// SPDX-License-Identifier: Apache-2.0 or MIT

//! Process-exit marker.
//!
//! A modern library tears itself down from its own exit handler. Once that
//! has started, nothing may call into it, so the shim registers an exit
//! handler of its own that raises [`ShutdownFlag`] and checks it before
//! every runtime operation.

extern crate alloc;

use alloc::sync::Arc;

use spin::{Lazy, Mutex, Once};

#[derive(Debug, Default)]
pub struct ShutdownFlag {
    unloaded: Mutex<bool>,
}

impl ShutdownFlag {
    pub const fn new() -> Self {
        ShutdownFlag {
            unloaded: Mutex::new(false),
        }
    }

    pub fn mark(&self) {
        *self.unloaded.lock() = true;
    }

    pub fn is_set(&self) -> bool {
        *self.unloaded.lock()
    }
}

static PROCESS_FLAG: Lazy<Arc<ShutdownFlag>> = Lazy::new(|| Arc::new(ShutdownFlag::new()));

static EXIT_HOOK: Once<bool> = Once::new();

/// Flag raised when the process exits.
pub fn process_flag() -> Arc<ShutdownFlag> {
    PROCESS_FLAG.clone()
}

/// Install the exit handler; later calls return the first result.
pub fn register_exit_hook() -> bool {
    *EXIT_HOOK.call_once(|| {
        let registered = install_exit_handler();
        if registered {
            log::debug!("exit handler registered");
        } else {
            log::warn!("exit handler could not be registered");
        }
        registered
    })
}

#[cfg(unix)]
#[allow(unsafe_code)]
fn install_exit_handler() -> bool {
    extern "C" fn handle_shutdown() {
        PROCESS_FLAG.mark();
    }

    // handle_shutdown is a plain function with no captured state.
    let rc = unsafe { libc::atexit(handle_shutdown) };
    rc == 0
}

#[cfg(not(unix))]
fn install_exit_handler() -> bool {
    false
}
