// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: MIT
pub mod shell_command;
pub mod mcp_resources;
pub mod update_plan;
pub mod apply_patch;
pub mod view_image;

use promptbook_model::{FunctionTool, ToolSpec};
use serde_json::Value;

/// Build a non-strict function tool.
pub(crate) fn function_tool(name: &str, description: &str, parameters: Value) -> ToolSpec {
    ToolSpec::Function(FunctionTool {
        name: name.to_string(),
        description: description.to_string(),
        strict: false,
        parameters,
    })
}
