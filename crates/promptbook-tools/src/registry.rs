// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: MIT
use promptbook_config::ToolsConfig;
use promptbook_model::ToolSpec;
use tracing::debug;

use crate::builtin::{mcp_resources, shell_command, update_plan, view_image};

/// Tool names in declaration order when every tool is enabled.
pub const DEFAULT_TOOL_ORDER: [&str; 7] = [
    shell_command::NAME,
    mcp_resources::LIST_RESOURCES,
    mcp_resources::LIST_RESOURCE_TEMPLATES,
    mcp_resources::READ_RESOURCE,
    update_plan::NAME,
    crate::builtin::apply_patch::NAME,
    view_image::NAME,
];

/// Ordered collection of tool declarations.
///
/// Unlike a name-keyed map, iteration order is registration order, which is
/// the order the tools appear in the request.
#[derive(Debug, Clone, Default)]
pub struct ToolRegistry {
    tools: Vec<ToolSpec>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the standard tool set.
    ///
    /// `apply_patch` is passed in already built because its free-form variant
    /// carries a grammar read from disk.
    pub fn from_config(cfg: &ToolsConfig, apply_patch: ToolSpec) -> Self {
        let mut reg = Self::new();
        reg.register(shell_command::spec());
        if cfg.mcp_resources {
            reg.register(mcp_resources::list_resources());
            reg.register(mcp_resources::list_resource_templates());
            reg.register(mcp_resources::read_resource());
        }
        if cfg.plan {
            reg.register(update_plan::spec());
        }
        reg.register(apply_patch);
        if cfg.view_image {
            reg.register(view_image::spec());
        }
        reg
    }

    /// Append a tool.  A tool with the same name is replaced in place and
    /// keeps its position.
    pub fn register(&mut self, spec: ToolSpec) {
        debug!(tool = spec.name(), kind = spec.kind(), "registering tool");
        match self.tools.iter_mut().find(|t| t.name() == spec.name()) {
            Some(slot) => *slot = spec,
            None => self.tools.push(spec),
        }
    }

    pub fn get(&self, name: &str) -> Option<&ToolSpec> {
        self.tools.iter().find(|t| t.name() == name)
    }

    pub fn names(&self) -> Vec<&str> {
        self.tools.iter().map(ToolSpec::name).collect()
    }

    pub fn specs(&self) -> &[ToolSpec] {
        &self.tools
    }

    pub fn into_specs(self) -> Vec<ToolSpec> {
        self.tools
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

// ─── Unit tests ──────────────────────────────────────────────────────────────
