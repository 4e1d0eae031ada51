//! CLI argument parsing and command dispatch

use anyhow::Result;
use clap::{Parser, Subcommand};

use git_mirror::output::OutputConfig;

use crate::commands;

/// git-mirror - Mirror Git repositories and keep Gitolite ACLs in sync
#[derive(Parser, Debug)]
#[command(name = "git-mirror")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Colorize output (always, never, auto)
    #[arg(long, global = true, value_name = "WHEN", default_value = "auto")]
    color: String,

    /// Set log level (error, warn, info, debug, trace)
    #[arg(long, global = true, value_name = "LEVEL", default_value = "warn")]
    log_level: String,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Mirror-clone or update a single repository URL
    Clone(commands::clone::CloneArgs),

    /// Fetch updates for all mirrors under the base directory
    UpdateAll(commands::update::UpdateArgs),

    /// List detected mirror repositories
    List(commands::list::ListArgs),

    /// Add a mirror's read-only stanza to the gitolite config
    GitoliteAdd(commands::gitolite_add::GitoliteAddArgs),

    /// Reconcile the gitolite config with on-disk mirrors
    GitoliteSync(commands::gitolite_sync::GitoliteSyncArgs),

    /// Report drift between mirrors and the gitolite config
    Status(commands::status::StatusArgs),

    /// Store default settings in the base directory
    Init(commands::init::InitArgs),

    /// Register a systemd user timer for periodic mirroring
    InstallTimer(commands::install_timer::InstallTimerArgs),

    /// Generate shell completion scripts
    Completions(commands::completions::CompletionsArgs),
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(self) -> Result<()> {
        env_logger::Builder::from_env(
            env_logger::Env::default().default_filter_or(self.log_level.as_str()),
        )
        .format_timestamp(None)
        .init();

        let output = OutputConfig::from_env_and_flag(&self.color);

        match self.command {
            Commands::Clone(args) => commands::clone::execute(args),
            Commands::UpdateAll(args) => commands::update::execute(args, &output),
            Commands::List(args) => commands::list::execute(args),
            Commands::GitoliteAdd(args) => commands::gitolite_add::execute(args),
            Commands::GitoliteSync(args) => commands::gitolite_sync::execute(args, &output),
            Commands::Status(args) => commands::status::execute(args, &output),
            Commands::Init(args) => commands::init::execute(args),
            Commands::InstallTimer(args) => commands::install_timer::execute(args),
            Commands::Completions(args) => commands::completions::execute(args),
        }
    }
}
