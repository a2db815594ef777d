// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: MIT
//! `apply_patch` in its two declaration styles.
//!
//! The free-form style is a `custom` tool: the model emits the patch as raw
//! text and the consumer parses it with a Lark grammar supplied verbatim from
//! an external document.  The function style wraps the same patch text in a
//! JSON `input` argument for consumers without grammar support.
use promptbook_model::{FreeformTool, FreeformToolFormat, ToolSpec};
use serde_json::json;

use super::function_tool;

pub const NAME: &str = "apply_patch";

/// Grammar dialect of the free-form declaration.
pub const GRAMMAR_SYNTAX: &str = "lark";

const FREEFORM_DESCRIPTION: &str =
    "Use the `apply_patch` tool to edit files. This is a FREEFORM tool, so do not wrap the patch in JSON.";

const FUNCTION_DESCRIPTION: &str = "Use the `apply_patch` tool to edit files.\n\
    Your patch language is a stripped-down, file-oriented diff format:\n\
    *** Begin Patch\n\
    *** Add File: path/to/new_file.rs\n\
    +content line\n\
    *** Delete File: path/to/old_file.rs\n\
    *** Update File: path/to/existing.rs\n\
    @@ context_line\n\
    \x20context line (space prefix)\n\
    -removed line\n\
    +added line\n\
    *** End Patch\n\
    File references must be relative, never absolute.";

/// Grammar-described declaration.  `grammar` is the Lark definition text.
pub fn freeform(grammar: &str) -> ToolSpec {
    ToolSpec::Freeform(FreeformTool {
        name: NAME.to_string(),
        description: FREEFORM_DESCRIPTION.to_string(),
        format: FreeformToolFormat::grammar(GRAMMAR_SYNTAX, grammar),
    })
}

/// Schema-described declaration taking the patch as a string.
pub fn function() -> ToolSpec {
    function_tool(
        NAME,
        FUNCTION_DESCRIPTION,
        json!({
            "type": "object",
            "properties": {
                "input": {
                    "type": "string",
                    "description": "The entire contents of the apply_patch command"
                }
            },
            "required": ["input"],
            "additionalProperties": false
        }),
    )
}
