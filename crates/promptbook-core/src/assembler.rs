// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: MIT
use std::path::Path;

use promptbook_config::{ApplyPatchStyle, Config};
use promptbook_model::{ConversationTurn, Payload, ToolChoice, ToolSpec};
use promptbook_runtime::{
    render_skills_section, resolve_injections, SkillDescriptor, SkillInjection, TextSource,
};
use promptbook_tools::{builtin::apply_patch, ToolRegistry};
use tracing::debug;

use crate::error::AssemblyError;
use crate::prompts::{merge_user_instructions, wrap_user_instructions, EnvironmentContext};

/// Everything read from outside the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExampleInputs {
    pub base_instructions: String,
    pub agents_md: String,
    /// `None` when `apply_patch` is declared as a function tool.
    pub apply_patch_grammar: Option<String>,
    /// Injections for the skills the request triggers, in registration order.
    pub injections: Vec<SkillInjection>,
}

/// Reject configuration values that would produce a malformed example.
pub fn validate(cfg: &Config) -> Result<(), AssemblyError> {
    if cfg.model.trim().is_empty() {
        return Err(AssemblyError::Configuration("model identifier is empty".into()));
    }
    if cfg.model.contains(['/', '\\']) {
        return Err(AssemblyError::Configuration(format!(
            "model identifier '{}' contains a path separator",
            cfg.model
        )));
    }
    if let Some(skill) = cfg.skills.iter().find(|s| s.name.trim().is_empty()) {
        return Err(AssemblyError::Configuration(format!(
            "skill at '{}' has an empty name",
            skill.path
        )));
    }
    if cfg.environment.cwd.is_none() {
        return Err(AssemblyError::Configuration("environment cwd is not set".into()));
    }
    Ok(())
}

fn skill_descriptors(cfg: &Config) -> Vec<SkillDescriptor> {
    cfg.skills
        .iter()
        .map(|s| SkillDescriptor::new(&s.name, &s.description, &s.path))
        .collect()
}

fn skills_enabled(cfg: &Config) -> bool {
    cfg.features.skills && !cfg.skills.is_empty()
}

fn read_input(
    source: &dyn TextSource,
    what: &'static str,
    path: &Path,
) -> Result<String, AssemblyError> {
    source.read_text(path).map_err(|source| AssemblyError::MissingInput {
        what,
        path: path.to_path_buf(),
        source,
    })
}

/// Read every document the example needs.
///
/// The first failure aborts; no partial [`ExampleInputs`] is returned.
pub fn load_inputs(cfg: &Config, source: &dyn TextSource) -> Result<ExampleInputs, AssemblyError> {
    validate(cfg)?;

    let base_instructions =
        read_input(source, "base instructions", &cfg.inputs.base_instructions)?;
    let agents_md = read_input(source, "agent instructions", &cfg.inputs.agents_md)?;
    let apply_patch_grammar = match cfg.tools.apply_patch {
        ApplyPatchStyle::Freeform => {
            Some(read_input(source, "apply_patch grammar", &cfg.inputs.apply_patch_grammar)?)
        }
        ApplyPatchStyle::Function => None,
    };

    let injections = if skills_enabled(cfg) {
        resolve_injections(&cfg.request.user_text, &skill_descriptors(cfg), source)?
    } else {
        Vec::new()
    };
    debug!(injections = injections.len(), "inputs loaded");

    Ok(ExampleInputs { base_instructions, agents_md, apply_patch_grammar, injections })
}

fn apply_patch_spec(cfg: &Config, inputs: &ExampleInputs) -> Result<ToolSpec, AssemblyError> {
    match (cfg.tools.apply_patch, inputs.apply_patch_grammar.as_deref()) {
        (ApplyPatchStyle::Freeform, Some(grammar)) => Ok(apply_patch::freeform(grammar)),
        (ApplyPatchStyle::Freeform, None) => Err(AssemblyError::Configuration(
            "free-form apply_patch requires a grammar definition".into(),
        )),
        (ApplyPatchStyle::Function, _) => Ok(apply_patch::function()),
    }
}

/// Build the request from configuration and loaded documents.
///
/// Turn order is fixed: wrapped instructions, environment, user request, then
/// one turn per skill injection.  Performs no I/O.
pub fn assemble(cfg: &Config, inputs: &ExampleInputs) -> Result<Payload, AssemblyError> {
    validate(cfg)?;
    let cwd = cfg.environment.cwd.as_deref().unwrap_or_default();

    let catalog = skills_enabled(cfg).then(|| render_skills_section(&skill_descriptors(cfg)));
    let merged = merge_user_instructions(&inputs.agents_md, catalog.as_deref());
    let environment = EnvironmentContext::from_config(&cfg.environment, cwd);

    let mut turns = vec![
        ConversationTurn::user(wrap_user_instructions(cwd, &merged)),
        ConversationTurn::user(environment.serialize_to_xml()),
        ConversationTurn::user(cfg.request.user_text.clone()),
    ];
    turns.extend(inputs.injections.iter().map(|inj| ConversationTurn::user(inj.render())));

    let tools = ToolRegistry::from_config(&cfg.tools, apply_patch_spec(cfg, inputs)?);
    debug!(turns = turns.len(), tools = tools.len(), model = %cfg.model, "payload assembled");

    Ok(Payload {
        model: cfg.model.clone(),
        instructions: inputs.base_instructions.clone(),
        turns,
        tools: tools.into_specs(),
        tool_choice: ToolChoice::Auto,
        allow_parallel_tool_calls: false,
    })
}

// ─── Unit tests ──────────────────────────────────────────────────────────────
