// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: MIT
//! Wire types of the assembled model request and the markup sanitizer used
//! for documentation-safe renderings.
mod types;
pub mod sanitize;

pub use types::*;
pub use sanitize::sanitize_markup;
