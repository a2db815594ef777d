// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: MIT
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};
use promptbook_config::ApplyPatchStyle;
use std::path::PathBuf;

/// Which rendering `print` writes to stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum PrintFormat {
    /// Pretty-printed request JSON.
    #[default]
    Json,
    /// Linear transcript with `==== <label> ====` delimiters.
    Flattened,
}

#[derive(Parser, Debug)]
#[command(
    name = "promptbook",
    about = "Assemble a reproducible example of a coding-agent model request",
    version,
    long_about = None,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Path to config file (layered on top of auto-discovered files)
    #[arg(long, short = 'c', global = true)]
    pub config: Option<PathBuf>,

    /// Repository root that relative input and output paths are resolved
    /// against.  Defaults to the enclosing git repository.
    #[arg(long, short = 'C', env = "PROMPTBOOK_REPO_ROOT", global = true)]
    pub repo_root: Option<PathBuf>,

    /// Model identifier, e.g. "gpt-5.1-codex"
    #[arg(long, short = 'M', env = "PROMPTBOOK_MODEL", global = true)]
    pub model: Option<String>,

    /// Directory receiving the four artifacts
    #[arg(long, short = 'o', value_name = "DIR", global = true)]
    pub out_dir: Option<PathBuf>,

    /// How the apply_patch tool is declared
    #[arg(long, value_enum, global = true)]
    pub apply_patch: Option<ApplyPatchStyle>,

    /// Omit the skills catalog and skill injections
    #[arg(long, global = true)]
    pub no_skills: bool,

    /// Increase verbosity (-v = debug, -vv = trace)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Write all four artifacts (default)
    Generate,
    /// Compare the artifacts on disk with a fresh rendering.
    /// Exits non-zero if any artifact is missing or out of date.
    Check,
    /// Render one artifact to stdout without writing files
    Print {
        #[arg(long, short = 'f', value_enum, default_value = "json")]
        format: PrintFormat,
        /// Escape `&`, `<` and `>` as HTML entities
        #[arg(long)]
        sanitized: bool,
    },
    /// Print the effective configuration and exit
    ShowConfig,
    /// Generate shell completion script
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}

impl Cli {
    /// The requested subcommand, defaulting to `generate`.
    pub fn subcommand(&self) -> Commands {
        self.command.clone().unwrap_or(Commands::Generate)
    }
}

pub fn print_completions(shell: Shell) {
    let mut cmd = Cli::command();
    generate(shell, &mut cmd, "promptbook", &mut std::io::stdout());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn no_subcommand_means_generate() {
        let cli = Cli::parse_from(["promptbook"]);
        assert_eq!(cli.subcommand(), Commands::Generate);
    }

    #[test]
    fn print_flags() {
        let cli = Cli::parse_from(["promptbook", "print", "--format", "flattened", "--sanitized"]);
        assert_eq!(
            cli.subcommand(),
            Commands::Print { format: PrintFormat::Flattened, sanitized: true }
        );
    }

    #[test]
    fn global_overrides_after_subcommand() {
        let cli = Cli::parse_from([
            "promptbook",
            "check",
            "--apply-patch",
            "function",
            "--model",
            "gpt-test",
            "--no-skills",
        ]);
        assert_eq!(cli.apply_patch, Some(ApplyPatchStyle::Function));
        assert_eq!(cli.model.as_deref(), Some("gpt-test"));
        assert!(cli.no_skills);
    }
}
