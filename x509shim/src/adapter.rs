// Copyright (c) 2026 Intel Corporation
//
// SPDX-License-Identifier: Apache-2.0 or MIT

//! API-generation detection and the constants that differ between them.
//!
//! | | Legacy | Modern |
//! |---|---|---|
//! | locking | caller-managed callback | self-managed |
//! | X.509 ex-data class | 10 | 3 |
//! | session ex-data class | 3 | 2 |
//! | first slot index | 0 | 1 |
//! | algorithm providers | no | yes |
//! | message signing | no | when exported |

use core::fmt;

use crate::library::{Capability, CryptoLibrary};

/// API generation of the underlying library.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ApiGeneration {
    /// Caller-provided locks, separate init calls
    Legacy,
    /// Self-managed threading, single init entry point
    #[default]
    Modern,
}

impl fmt::Display for ApiGeneration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiGeneration::Legacy => write!(f, "legacy"),
            ApiGeneration::Modern => write!(f, "modern"),
        }
    }
}

/// Who provides mutual exclusion inside the library.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockModel {
    CallerManaged,
    SelfManaged,
}

/// Object classes the shim attaches extension data to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotClass {
    X509,
    SslSession,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VersionAdapter {
    generation: ApiGeneration,
}

impl VersionAdapter {
    /// Pick the generation from the library's exported entry points.
    ///
    /// Only legacy libraries export the per-connection state query.
    pub fn detect(library: &dyn CryptoLibrary) -> Self {
        let generation = if library.has_capability(Capability::ConnectionStateQuery) {
            ApiGeneration::Legacy
        } else {
            ApiGeneration::Modern
        };
        Self::for_generation(generation)
    }

    pub const fn for_generation(generation: ApiGeneration) -> Self {
        VersionAdapter { generation }
    }

    pub fn generation(&self) -> ApiGeneration {
        self.generation
    }

    pub fn lock_model(&self) -> LockModel {
        match self.generation {
            ApiGeneration::Legacy => LockModel::CallerManaged,
            ApiGeneration::Modern => LockModel::SelfManaged,
        }
    }

    /// Library class number for extension data on `class` objects.
    pub fn ex_data_index_base(&self, class: SlotClass) -> i32 {
        match (self.generation, class) {
            (ApiGeneration::Legacy, SlotClass::X509) => 10,
            (ApiGeneration::Legacy, SlotClass::SslSession) => 3,
            (ApiGeneration::Modern, SlotClass::X509) => 3,
            (ApiGeneration::Modern, SlotClass::SslSession) => 2,
        }
    }

    /// Whether algorithm providers can be loaded at run time.
    pub fn loads_providers(&self) -> bool {
        self.generation == ApiGeneration::Modern
    }

    /// Whether one-shot message signing can exist in this generation.
    ///
    /// Modern libraries still have to export the entry points; see
    /// [`Capability::MessageSigning`].
    pub fn supports_message_signing(&self) -> bool {
        self.generation == ApiGeneration::Modern
    }

    /// Index the library hands out for the first slot of a class.
    pub fn first_slot_index(&self) -> i32 {
        match self.generation {
            ApiGeneration::Legacy => 0,
            ApiGeneration::Modern => 1,
        }
    }
}
