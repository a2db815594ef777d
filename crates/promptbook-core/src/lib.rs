// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: MIT
//! Assembly of the example request and its four rendered artifacts.
//!
//! The pipeline runs in three phases:
//!
//! 1. [`load_inputs`] reads every external document through a
//!    [`TextSource`](promptbook_runtime::TextSource).
//! 2. [`assemble`] combines configuration and documents into a
//!    [`Payload`](promptbook_model::Payload).  Pure.
//! 3. [`RenderedArtifacts::render_all`] produces the structured and
//!    flattened renderings plus their sanitized counterparts, and
//!    [`ArtifactPaths`] writes or checks them.
//!
//! Nothing is written until all three phases have succeeded.
pub mod prompts;
mod assembler;
mod artifacts;
mod error;
mod render;

pub use artifacts::{ArtifactKind, ArtifactPaths, ArtifactStatus, DriftEntry, DriftReport};
pub use assembler::{assemble, load_inputs, validate, ExampleInputs};
pub use error::AssemblyError;
pub use prompts::{merge_user_instructions, wrap_user_instructions, EnvironmentContext};
pub use render::{
    parse_flattened, render_flattened, render_structured, turn_label, FlatSection,
    RenderedArtifacts, INSTRUCTIONS_LABEL, TOOLS_LABEL,
};
