// Copyright (c) 2026 Intel Corporation
//
// SPDX-License-Identifier: Apache-2.0 or MIT

//! Selection of the library the process-wide runtime drives.

use crate::adapter::ApiGeneration;
use crate::library::soft::DEFAULT_LEGACY_LOCK_COUNT;

/// Legacy-API switch: `true`/`1` or `false`/`0`.
pub const ENV_USE_LEGACY_API: &str = "X509SHIM_USE_LEGACY_API";

/// Lock count reported by a legacy library.
pub const ENV_LEGACY_LOCK_COUNT: &str = "X509SHIM_LEGACY_LOCK_COUNT";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShimConfig {
    pub api_generation: ApiGeneration,
    pub legacy_lock_count: i32,
}

impl Default for ShimConfig {
    fn default() -> Self {
        ShimConfig {
            api_generation: ApiGeneration::Modern,
            legacy_lock_count: DEFAULT_LEGACY_LOCK_COUNT,
        }
    }
}

impl ShimConfig {
    pub fn with_api_generation(mut self, api_generation: ApiGeneration) -> Self {
        self.api_generation = api_generation;
        self
    }

    pub fn with_legacy_lock_count(mut self, legacy_lock_count: i32) -> Self {
        self.legacy_lock_count = legacy_lock_count;
        self
    }

    /// Defaults overridden by the `X509SHIM_*` environment variables.
    ///
    /// Unparseable values are logged and ignored.
    #[cfg(feature = "std")]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    #[cfg(feature = "std")]
    fn from_lookup(lookup: impl Fn(&str) -> Option<std::string::String>) -> Self {
        let mut config = ShimConfig::default();

        if let Some(value) = lookup(ENV_USE_LEGACY_API) {
            match parse_bool(&value) {
                Some(true) => config.api_generation = ApiGeneration::Legacy,
                Some(false) => config.api_generation = ApiGeneration::Modern,
                None => log::warn!("ignoring {}={:?}", ENV_USE_LEGACY_API, value),
            }
        }

        if let Some(value) = lookup(ENV_LEGACY_LOCK_COUNT) {
            match value.trim().parse::<i32>() {
                Ok(count) => config.legacy_lock_count = count,
                Err(e) => log::warn!("ignoring {}={:?}: {}", ENV_LEGACY_LOCK_COUNT, value, e),
            }
        }

        config
    }
}

#[cfg(feature = "std")]
fn parse_bool(value: &str) -> Option<bool> {
    match value.trim() {
        "1" => Some(true),
        "0" => Some(false),
        v if v.eq_ignore_ascii_case("true") => Some(true),
        v if v.eq_ignore_ascii_case("false") => Some(false),
        _ => None,
    }
}
