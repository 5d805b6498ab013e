// Copyright (c) 2026 Intel Corporation
//
// SPDX-License-Identifier: Apache-2.0 or MIT

//! X.509 v3 extensions and OID constants.

pub mod extensions;
pub mod oids;

pub use extensions::{alt_names, Extension, Extensions, ISSUER_ALT_NAME, SUBJECT_ALT_NAME};
