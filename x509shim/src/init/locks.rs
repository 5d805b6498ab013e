// Copyright (c) 2026 Intel Corporation
//
// SPDX-License-Identifier: Apache-2.0 or MIT

//! Lock array handed to a legacy library through its locking callback.

extern crate alloc;

use alloc::sync::Arc;
use alloc::vec::Vec;
use core::mem;

use spin::Mutex;

use crate::error::InitError;
use crate::library::{LockMode, LockingCallback};

/// One lock per index the library asked for.
///
/// The library calls back with separate lock and unlock requests, so a lock
/// is taken by leaking its guard and released with `force_unlock`.
pub struct LockTable {
    locks: Vec<Mutex<()>>,
}

impl LockTable {
    /// Allocate `count` locks.
    pub fn new(count: i32) -> Result<Self, InitError> {
        if count <= 0 {
            return Err(InitError::LockCountInvalid);
        }
        let count = usize::try_from(count).map_err(|_| InitError::Allocation)?;
        count
            .checked_mul(mem::size_of::<Mutex<()>>())
            .filter(|bytes| *bytes <= isize::MAX as usize)
            .ok_or(InitError::Allocation)?;

        let mut locks = Vec::new();
        locks
            .try_reserve_exact(count)
            .map_err(|_| InitError::Allocation)?;
        locks.extend((0..count).map(|_| Mutex::new(())));
        Ok(LockTable { locks })
    }

    pub fn len(&self) -> usize {
        self.locks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locks.is_empty()
    }

    pub fn is_locked(&self, index: usize) -> bool {
        self.locks.get(index).is_some_and(|lock| lock.is_locked())
    }

    /// Block until lock `index` is held.
    pub fn lock(&self, index: usize) {
        match self.locks.get(index) {
            Some(lock) => mem::forget(lock.lock()),
            None => log::warn!("lock index {} out of range ({})", index, self.len()),
        }
    }

    /// Release lock `index` taken by [`LockTable::lock`].
    #[allow(unsafe_code)]
    pub fn unlock(&self, index: usize) {
        let Some(lock) = self.locks.get(index) else {
            log::warn!("unlock index {} out of range ({})", index, self.len());
            return;
        };
        if !lock.is_locked() {
            log::warn!("unlock of lock {} which is not held", index);
            return;
        }
        // The guard for this lock was forgotten in `lock`.
        unsafe { lock.force_unlock() }
    }

    /// Locking callback serving `table`.
    pub fn callback(table: &Arc<LockTable>) -> LockingCallback {
        let table = table.clone();
        Arc::new(move |mode, index| {
            log::trace!("lock {} {:?}", index, mode);
            match mode {
                LockMode::Lock => table.lock(index),
                LockMode::Unlock => table.unlock(index),
            }
        })
    }
}
