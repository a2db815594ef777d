// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: MIT
use promptbook_model::ToolSpec;
use serde_json::json;

use super::function_tool;

pub const NAME: &str = "view_image";

pub fn spec() -> ToolSpec {
    function_tool(
        NAME,
        "Attach a local image (by filesystem path) to the conversation context for this turn.",
        json!({
            "type": "object",
            "properties": {
                "path": {
                    "type": "string",
                    "description": "Local filesystem path to an image file"
                }
            },
            "required": ["path"],
            "additionalProperties": false
        }),
    )
}
