// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: MIT
use serde::{Deserialize, Serialize};

// ─── Content types ────────────────────────────────────────────────────────────

/// A single content segment of a conversation turn.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentItem {
    InputText { text: String },
}

impl ContentItem {
    /// Convenience constructor for a plain text segment.
    pub fn input_text(text: impl Into<String>) -> Self {
        Self::InputText { text: text.into() }
    }

    pub fn as_text(&self) -> &str {
        match self {
            Self::InputText { text } => text,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
}

// ─── Conversation turns ───────────────────────────────────────────────────────

/// One entry of the request `input` list.
///
/// Serialized as `{"type": "message", "role": ..., "content": [...]}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ConversationTurn {
    Message { role: Role, content: Vec<ContentItem> },
}

impl ConversationTurn {
    /// A user turn carrying exactly one text segment.
    pub fn user(text: impl Into<String>) -> Self {
        Self::Message { role: Role::User, content: vec![ContentItem::input_text(text)] }
    }

    pub fn role(&self) -> Role {
        match self {
            Self::Message { role, .. } => *role,
        }
    }

    pub fn content(&self) -> &[ContentItem] {
        match self {
            Self::Message { content, .. } => content,
        }
    }

    /// Concatenated text of every segment, in order.
    pub fn text(&self) -> String {
        self.content().iter().map(ContentItem::as_text).collect()
    }
}

// ─── Tool contracts ───────────────────────────────────────────────────────────

/// How the model passes arguments to a tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvocationStyle {
    /// A JSON object validated against a parameter schema.
    Structured,
    /// Raw text parsed by an external grammar.
    Freeform,
}

/// A callable tool declared to the model.
///
/// The variant is carried on the wire as the `type` tag: `"function"` for
/// schema-described tools and `"custom"` for grammar-described ones.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type")]
pub enum ToolSpec {
    #[serde(rename = "function")]
    Function(FunctionTool),
    #[serde(rename = "custom")]
    Freeform(FreeformTool),
}

/// Function tool: named arguments described by a JSON Schema object.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FunctionTool {
    pub name: String,
    pub description: String,
    pub strict: bool,
    /// JSON Schema of the parameters object
    pub parameters: serde_json::Value,
}

/// Free-form tool: a single raw-text argument checked by a grammar.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FreeformTool {
    pub name: String,
    pub description: String,
    pub format: FreeformToolFormat,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FreeformToolFormat {
    /// Always `"grammar"` for the tools declared here.
    #[serde(rename = "type")]
    pub kind: String,
    /// Grammar dialect, e.g. `"lark"`.
    pub syntax: String,
    /// Grammar source text, verbatim.
    pub definition: String,
}

impl FreeformToolFormat {
    pub fn grammar(syntax: impl Into<String>, definition: impl Into<String>) -> Self {
        Self { kind: "grammar".into(), syntax: syntax.into(), definition: definition.into() }
    }
}

impl ToolSpec {
    pub fn name(&self) -> &str {
        match self {
            Self::Function(t) => &t.name,
            Self::Freeform(t) => &t.name,
        }
    }

    pub fn description(&self) -> &str {
        match self {
            Self::Function(t) => &t.description,
            Self::Freeform(t) => &t.description,
        }
    }

    /// The wire `type` tag.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Function(_) => "function",
            Self::Freeform(_) => "custom",
        }
    }

    pub fn invocation_style(&self) -> InvocationStyle {
        match self {
            Self::Function(_) => InvocationStyle::Structured,
            Self::Freeform(_) => InvocationStyle::Freeform,
        }
    }
}

// ─── Request ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToolChoice {
    /// The model decides whether to call a tool.
    #[default]
    Auto,
    None,
    Required,
}

/// The complete request for one example interaction.
///
/// Field order is the serialized key order.  `turns` and `tools` keep their
/// assembly order; nothing reorders them after construction.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Payload {
    pub model: String,
    pub instructions: String,
    #[serde(rename = "input")]
    pub turns: Vec<ConversationTurn>,
    pub tools: Vec<ToolSpec>,
    pub tool_choice: ToolChoice,
    #[serde(rename = "parallel_tool_calls")]
    pub allow_parallel_tool_calls: bool,
}

impl Payload {
    pub fn tool_names(&self) -> Vec<&str> {
        self.tools.iter().map(ToolSpec::name).collect()
    }

    pub fn turn_texts(&self) -> Vec<String> {
        self.turns.iter().map(ConversationTurn::text).collect()
    }
}

// ─── Tests ────────────────────────────────────────────────────────────────────
