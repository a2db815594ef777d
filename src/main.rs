// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: MIT
mod cli;

use std::path::PathBuf;

use anyhow::Context;
use tracing::debug;
use tracing_subscriber::{filter::EnvFilter, fmt, prelude::*};

use clap::Parser;
use cli::{Cli, Commands, PrintFormat};
use promptbook_config::Config;
use promptbook_core::{assemble, load_inputs, ArtifactPaths, RenderedArtifacts};
use promptbook_runtime::{find_project_root, FsSource};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let command = cli.subcommand();
    if let Commands::Completions { shell } = command {
        cli::print_completions(shell);
        return Ok(());
    }

    let config = effective_config(&cli)?;

    match command {
        Commands::ShowConfig => {
            print!("{}", serde_yaml::to_string(&config)?);
        }
        Commands::Generate => {
            let artifacts = render(&config)?;
            for path in ArtifactPaths::from_config(&config).write_all(&artifacts)? {
                println!("Wrote {}", path.display());
            }
        }
        Commands::Check => {
            let artifacts = render(&config)?;
            let report = ArtifactPaths::from_config(&config).check_all(&artifacts)?;
            if !report.is_clean() {
                for entry in report.stale() {
                    eprintln!("{} ({}): {}", entry.path.display(), entry.kind, entry.status);
                }
                eprintln!("artifacts are out of date; run `promptbook generate`");
                std::process::exit(1);
            }
            println!("All artifacts up to date");
        }
        Commands::Print { format, sanitized } => {
            let artifacts = render(&config)?;
            let text = match (format, sanitized) {
                (PrintFormat::Json, false) => &artifacts.json,
                (PrintFormat::Json, true) => &artifacts.json_sanitized,
                (PrintFormat::Flattened, false) => &artifacts.flattened,
                (PrintFormat::Flattened, true) => &artifacts.flattened_sanitized,
            };
            if text.ends_with('\n') {
                print!("{text}");
            } else {
                println!("{text}");
            }
        }
        Commands::Completions { .. } => {}
    }

    Ok(())
}

/// Merge config layers, apply command-line overrides, and resolve paths
/// against the repository root.
fn effective_config(cli: &Cli) -> anyhow::Result<Config> {
    let root: PathBuf = match &cli.repo_root {
        Some(p) => std::fs::canonicalize(p)
            .with_context(|| format!("repository root '{}' is not accessible", p.display()))?,
        None => find_project_root()?,
    };
    debug!(root = %root.display(), "repository root");

    let mut config = promptbook_config::load(cli.config.as_deref())?;
    if let Some(model) = &cli.model {
        config.model = model.clone();
    }
    if let Some(dir) = &cli.out_dir {
        config.output.dir = dir.clone();
    }
    if let Some(style) = cli.apply_patch {
        config.tools.apply_patch = style;
    }
    if cli.no_skills {
        config.features.skills = false;
    }
    Ok(config.rooted(&root))
}

/// Load every input and render all four artifacts in memory.
fn render(config: &Config) -> anyhow::Result<RenderedArtifacts> {
    let inputs = load_inputs(config, &FsSource).context("loading example inputs")?;
    let payload = assemble(config, &inputs)?;
    Ok(RenderedArtifacts::render_all(&payload)?)
}

fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}
