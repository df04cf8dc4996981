//! Stencil CLI
//!
//! Watches a markdown vault and applies templates to notes whose filenames
//! match the configured rules.

use anyhow::{Context, Result, bail};
use chrono::Local;
use clap::Parser;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use stencil::rules::RuleEngine;
use stencil::vault::{FsVault, Vault, basename};
use stencil::{Config, TemplateController, Watcher, expand_path};

#[derive(Parser, Debug)]
#[command(name = "stencil")]
#[command(author, version, about = "Filename-triggered note templating")]
struct Cli {
    /// Path to config file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Vault root directory (overrides the config file)
    #[arg(long, value_name = "DIR")]
    vault: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Watch the vault and apply templates on note create/rename (default)
    Watch,

    /// List all rules
    Rules,

    /// Validate config file
    Check {
        /// Path to config file to validate
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// List template notes under the configured template folder
    Templates,

    /// Resolve and render the template for a single note (dry-run by default)
    Apply {
        /// Vault path of the note
        note: PathBuf,

        /// Actually overwrite the note instead of printing the result
        #[arg(long)]
        write: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("STENCIL_LOG").unwrap_or_else(|_| log_level.to_string()),
        ))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    match cli.command {
        None | Some(Commands::Watch) => {
            let config = Config::load(cli.config.as_deref())?;
            let vault_root = vault_root(&cli.vault, &config)?;
            run_watch(config, &vault_root).await?;
        }
        Some(Commands::Rules) => {
            let config = Config::load(cli.config.as_deref())?;
            println!("Rules:");
            for (i, rule) in config.rules.iter().enumerate() {
                println!(
                    "  [{}] {} \"{}\" -> {}",
                    i + 1,
                    rule.method,
                    rule.match_string,
                    rule.template_path.display()
                );
            }
        }
        Some(Commands::Check {
            config: config_path,
        }) => {
            let path = config_path.or(cli.config);
            match Config::load(path.as_deref()) {
                Ok(config) => {
                    let warnings = config.validate();
                    println!("✓ Config is valid");
                    println!("  {} rules", config.rules.len());
                    println!(
                        "  templating on rename: {}",
                        if config.templates.on_rename { "on" } else { "off" }
                    );
                    for warning in &warnings {
                        println!("  warning: {}", warning);
                    }
                }
                Err(e) => {
                    eprintln!("✗ Config error: {:#}", e);
                    std::process::exit(1);
                }
            }
        }
        Some(Commands::Templates) => {
            let config = Config::load(cli.config.as_deref())?;
            let vault_root = vault_root(&cli.vault, &config)?;
            let vault = FsVault::new(&vault_root);
            let folder = config.template_folder();

            match vault.list_files_recursively(&folder) {
                Ok(files) if files.is_empty() => {
                    println!("No templates under {}", folder.display());
                }
                Ok(files) => {
                    println!("Templates in {}:", folder.display());
                    for file in files {
                        println!("  {}", file.display());
                    }
                }
                Err(e) => {
                    // A missing folder is a config problem, not a crash
                    tracing::warn!(
                        "Template folder {} not readable: {}",
                        folder.display(),
                        e
                    );
                    println!("No templates under {}", folder.display());
                }
            }
        }
        Some(Commands::Apply { note, write }) => {
            let config = Config::load(cli.config.as_deref())?;
            let vault_root = vault_root(&cli.vault, &config)?;
            let controller = TemplateController::new(FsVault::new(&vault_root));

            let engine = RuleEngine::new(config.rules.clone());
            let Some(rule) = engine.find_match(basename(&note), config.templates.case_sensitive)
            else {
                println!("No rule matches {}", note.display());
                return Ok(());
            };

            let rendered = controller.render_template(&config, rule, &Local::now());
            if write {
                controller
                    .vault()
                    .overwrite_content(&note, &rendered)
                    .with_context(|| format!("Failed to write note {}", note.display()))?;
                println!("Applied {} to {}", rule.template_path.display(), note.display());
            } else {
                println!(
                    "[dry-run] {} -> {}",
                    rule.template_path.display(),
                    note.display()
                );
                println!("{}", rendered);
            }
        }
    }

    Ok(())
}

fn vault_root(cli_vault: &Option<PathBuf>, config: &Config) -> Result<PathBuf> {
    let Some(raw) = cli_vault.as_ref().or(config.vault.as_ref()) else {
        bail!("No vault configured: pass --vault or set `vault` in the config file");
    };

    let root = expand_path(raw);
    if !root.is_dir() {
        bail!("Vault directory does not exist: {}", root.display());
    }
    Ok(root)
}

async fn run_watch(config: Config, vault_root: &Path) -> Result<()> {
    info!(
        "Loaded config with {} rules (on_rename: {})",
        config.rules.len(),
        config.templates.on_rename
    );

    let mut watcher = Watcher::new(config, vault_root)?;
    watcher.watch()?;

    info!("Watching. Press Ctrl+C to stop.");

    let mut interval = tokio::time::interval(std::time::Duration::from_millis(500));
    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => break,
            _ = interval.tick() => {
                watcher.process_events();
            }
        }
    }

    info!(
        "Shutting down, {} notes templated this session",
        watcher.notes_templated()
    );
    watcher.unwatch()?;

    Ok(())
}
