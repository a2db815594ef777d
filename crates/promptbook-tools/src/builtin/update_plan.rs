// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: MIT
use promptbook_model::ToolSpec;
use serde_json::json;

use super::function_tool;

pub const NAME: &str = "update_plan";

const DESCRIPTION: &str = "Updates the task plan.\n\
    Provide an optional explanation and a list of plan items, each with a step and status.\n\
    At most one step can be in_progress at a time.\n";

pub fn spec() -> ToolSpec {
    function_tool(
        NAME,
        DESCRIPTION,
        json!({
            "type": "object",
            "properties": {
                "explanation": { "type": "string" },
                "plan": {
                    "type": "array",
                    "description": "The list of steps",
                    "items": {
                        "type": "object",
                        "properties": {
                            "step": { "type": "string" },
                            "status": {
                                "type": "string",
                                "description": "One of: pending, in_progress, completed"
                            }
                        },
                        "required": ["step", "status"],
                        "additionalProperties": false
                    }
                }
            },
            "required": ["plan"],
            "additionalProperties": false
        }),
    )
}
