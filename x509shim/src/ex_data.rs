// Copyright (c) 2026 Intel Corporation
//
// SPDX-License-Identifier: Apache-2.0 or MIT

//! Extension-data slots attached to certificates and sessions.
//!
//! Two slots are registered during initialization:
//!
//! - the OCSP response cache on certificates, which owns its value: the
//!   value is dropped with the certificate and never copied to duplicates;
//! - the session-certificate marker on sessions, an opaque tag copied
//!   verbatim when the session is duplicated.

extern crate alloc;

use alloc::boxed::Box;
use alloc::collections::BTreeMap;
use alloc::vec::Vec;
use core::any::Any;

use crate::adapter::{SlotClass, VersionAdapter};
use crate::error::{InitError, SlotError};
use crate::library::CryptoLibrary;

/// What the library does with a slot value on free and duplicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotPolicy {
    /// Released on free; the duplicate starts empty.
    OwnedResource,
    /// Untouched on free; copied verbatim on duplicate.
    OpaqueTag,
}

/// A registered slot: object class, library index and policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotHandle {
    class: SlotClass,
    index: i32,
    policy: SlotPolicy,
}

impl SlotHandle {
    pub fn class(&self) -> SlotClass {
        self.class
    }

    /// Index assigned by the library.
    pub fn index(&self) -> i32 {
        self.index
    }

    pub fn policy(&self) -> SlotPolicy {
        self.policy
    }
}

/// Handles produced by [`register_slots`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotHandles {
    /// Cached OCSP response on certificates.
    pub ocsp_response: SlotHandle,
    /// Marker linking a session to its peer certificate.
    pub session_certificate: SlotHandle,
}

/// Register both slots with `library`.
pub fn register_slots(
    library: &dyn CryptoLibrary,
    adapter: &VersionAdapter,
) -> Result<SlotHandles, InitError> {
    let ocsp_response = register(library, adapter, SlotClass::X509, SlotPolicy::OwnedResource)?;
    let session_certificate =
        register(library, adapter, SlotClass::SslSession, SlotPolicy::OpaqueTag)?;
    Ok(SlotHandles {
        ocsp_response,
        session_certificate,
    })
}

fn register(
    library: &dyn CryptoLibrary,
    adapter: &VersionAdapter,
    class: SlotClass,
    policy: SlotPolicy,
) -> Result<SlotHandle, InitError> {
    let class_index = adapter.ex_data_index_base(class);
    let index = library.get_ex_new_index(class_index, policy);
    if index < 0 {
        log::debug!(
            "{}: no {:?} slot in class {}: {:?}",
            library.name(),
            class,
            class_index,
            library.last_error()
        );
        return Err(InitError::SlotRegistration);
    }
    if index != adapter.first_slot_index() {
        log::debug!(
            "{:?} slot got index {}, expected {}",
            class,
            index,
            adapter.first_slot_index()
        );
    }
    log::debug!("registered {:?} slot {} in class {}", class, index, class_index);
    Ok(SlotHandle {
        class,
        index,
        policy,
    })
}

/// DER-encoded OCSP response kept in the certificate slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachedResponse {
    der: Vec<u8>,
}

impl CachedResponse {
    pub fn new(der: Vec<u8>) -> Self {
        CachedResponse { der }
    }

    pub fn as_der(&self) -> &[u8] {
        &self.der
    }
}

enum SlotValue {
    Owned(Box<dyn Any + Send + Sync>),
    Tag(usize),
}

/// Per-object slot storage.
pub struct ExData {
    class: SlotClass,
    values: BTreeMap<i32, SlotValue>,
}

impl ExData {
    pub fn new(class: SlotClass) -> Self {
        ExData {
            class,
            values: BTreeMap::new(),
        }
    }

    pub fn class(&self) -> SlotClass {
        self.class
    }

    /// Store an owned value, dropping any previous one.
    pub fn set_owned<T: Any + Send + Sync>(
        &mut self,
        handle: &SlotHandle,
        value: T,
    ) -> Result<(), SlotError> {
        self.check(handle, SlotPolicy::OwnedResource)?;
        self.values
            .insert(handle.index, SlotValue::Owned(Box::new(value)));
        Ok(())
    }

    pub fn set_tag(&mut self, handle: &SlotHandle, tag: usize) -> Result<(), SlotError> {
        self.check(handle, SlotPolicy::OpaqueTag)?;
        self.values.insert(handle.index, SlotValue::Tag(tag));
        Ok(())
    }

    /// Owned value in `handle`, if one of type `T` is stored.
    pub fn get<T: Any>(&self, handle: &SlotHandle) -> Option<&T> {
        if handle.class != self.class {
            return None;
        }
        match self.values.get(&handle.index)? {
            SlotValue::Owned(value) => value.downcast_ref::<T>(),
            SlotValue::Tag(_) => None,
        }
    }

    pub fn tag(&self, handle: &SlotHandle) -> Option<usize> {
        if handle.class != self.class {
            return None;
        }
        match self.values.get(&handle.index)? {
            SlotValue::Tag(tag) => Some(*tag),
            SlotValue::Owned(_) => None,
        }
    }

    /// Copy for a duplicated object: tags carry over, owned values do not.
    pub fn duplicate(&self) -> ExData {
        let values = self
            .values
            .iter()
            .filter_map(|(index, value)| match value {
                SlotValue::Tag(tag) => Some((*index, SlotValue::Tag(*tag))),
                SlotValue::Owned(_) => None,
            })
            .collect();
        ExData {
            class: self.class,
            values,
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    fn check(&self, handle: &SlotHandle, policy: SlotPolicy) -> Result<(), SlotError> {
        if handle.class != self.class {
            return Err(SlotError::ClassMismatch);
        }
        if handle.policy != policy {
            return Err(SlotError::PolicyMismatch);
        }
        Ok(())
    }
}

impl Drop for ExData {
    fn drop(&mut self) {
        let owned = self
            .values
            .values()
            .filter(|value| matches!(value, SlotValue::Owned(_)))
            .count();
        if owned > 0 {
            log::trace!("releasing {} owned {:?} slot value(s)", owned, self.class);
        }
    }
}
