// Copyright (c) 2026 Intel Corporation
//
// SPDX-License-Identifier: Apache-2.0 or MIT

#![forbid(unsafe_code)]

pub mod common;

#[cfg(test)]
mod identity_tests;
#[cfg(test)]
mod name_tests;
