// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: MIT
use promptbook_model::ToolSpec;
use serde_json::json;

use super::function_tool;

pub const NAME: &str = "shell_command";

const DESCRIPTION: &str = "Runs a shell command and returns its output.\n\
    - Always set the `workdir` param when using the shell_command function. \
    Do not use `cd` unless absolutely necessary.";

pub fn spec() -> ToolSpec {
    function_tool(
        NAME,
        DESCRIPTION,
        json!({
            "type": "object",
            "properties": {
                "command": {
                    "type": "string",
                    "description": "The shell script to execute in the user's default shell"
                },
                "workdir": {
                    "type": "string",
                    "description": "The working directory to execute the command in"
                },
                "login": {
                    "type": "boolean",
                    "description": "Whether to run the shell with login shell semantics. \
                        Defaults to false unless a shell snapshot is available."
                },
                "timeout_ms": {
                    "type": "number",
                    "description": "The timeout for the command in milliseconds"
                },
                "sandbox_permissions": {
                    "type": "string",
                    "description": "Sandbox permissions for the command. Set to \
                        \"require_escalated\" to request running without sandbox restrictions; \
                        defaults to \"use_default\"."
                },
                "justification": {
                    "type": "string",
                    "description": "Only set if sandbox_permissions is \"require_escalated\". \
                        1-sentence explanation of why we want to run this command."
                }
            },
            "required": ["command"],
            "additionalProperties": false
        }),
    )
}
