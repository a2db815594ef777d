// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: MIT
//! Declarations of the tools offered to the model.
//!
//! Tools here are contracts only: a name, a description, and either a JSON
//! parameter schema or a grammar.  Nothing in this crate executes a tool.
mod registry;
pub mod builtin;

pub use registry::{ToolRegistry, DEFAULT_TOOL_ORDER};
