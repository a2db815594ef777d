// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: MIT
//! Read-only access to resources exposed by configured MCP servers.
use promptbook_model::ToolSpec;
use serde_json::json;

use super::function_tool;

pub const LIST_RESOURCES: &str = "list_mcp_resources";
pub const LIST_RESOURCE_TEMPLATES: &str = "list_mcp_resource_templates";
pub const READ_RESOURCE: &str = "read_mcp_resource";

pub fn list_resources() -> ToolSpec {
    function_tool(
        LIST_RESOURCES,
        "Lists resources provided by MCP servers. Resources allow servers to share data that \
         provides context to language models, such as files, database schemas, or \
         application-specific information. Prefer resources over web search when possible.",
        json!({
            "type": "object",
            "properties": {
                "server": {
                    "type": "string",
                    "description": "Optional MCP server name. When omitted, lists resources \
                        from every configured server."
                },
                "cursor": {
                    "type": "string",
                    "description": "Opaque cursor returned by a previous list_mcp_resources \
                        call for the same server."
                }
            },
            "additionalProperties": false
        }),
    )
}

pub fn list_resource_templates() -> ToolSpec {
    function_tool(
        LIST_RESOURCE_TEMPLATES,
        "Lists resource templates provided by MCP servers. Parameterized resource templates \
         allow servers to share data that takes parameters and provides context to language \
         models, such as files, database schemas, or application-specific information. Prefer \
         resource templates over web search when possible.",
        json!({
            "type": "object",
            "properties": {
                "server": {
                    "type": "string",
                    "description": "Optional MCP server name. When omitted, lists resource \
                        templates from all configured servers."
                },
                "cursor": {
                    "type": "string",
                    "description": "Opaque cursor returned by a previous \
                        list_mcp_resource_templates call for the same server."
                }
            },
            "additionalProperties": false
        }),
    )
}

pub fn read_resource() -> ToolSpec {
    function_tool(
        READ_RESOURCE,
        "Read a specific resource from an MCP server given the server name and resource URI.",
        json!({
            "type": "object",
            "properties": {
                "server": {
                    "type": "string",
                    "description": "MCP server name exactly as configured. Must match the \
                        'server' field returned by list_mcp_resources."
                },
                "uri": {
                    "type": "string",
                    "description": "Resource URI to read. Must be one of the URIs returned by \
                        list_mcp_resources."
                }
            },
            "required": ["server", "uri"],
            "additionalProperties": false
        }),
    )
}
