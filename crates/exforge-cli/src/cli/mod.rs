//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums.  No business logic lives here.

use std::path::PathBuf;

use clap::{Args, Parser, ValueEnum};

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "exforge",
    bin_name = "exforge",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "Scaffold an Express + TypeORM (PostgreSQL) API with JWT auth",
    long_about = "exforge asks a few database and API questions, then creates \
                  a ready-to-run Express + TypeORM backend: a users resource, \
                  JWT authentication, a seed script and migration scripts.",
    after_help = "EXAMPLES:\n\
        \x20 exforge my-api\n\
        \x20 exforge my-api --defaults --dir ~/code\n\
        \x20 exforge my-api --dry-run\n\
        \x20 exforge --completions bash > ~/.local/share/bash-completion/completions/exforge",
)]
pub struct Cli {
    /// Verbosity, colour and configuration flags.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// What to scaffold and how.
    #[command(flatten)]
    pub scaffold: ScaffoldArgs,

    /// Print a shell completion script and exit.
    #[arg(
        long = "completions",
        value_name = "SHELL",
        value_enum,
        conflicts_with_all = ["name", "dir", "package_manager", "defaults", "dry_run"],
        help = "Generate shell completions"
    )]
    pub completions: Option<Shell>,
}

// ── scaffold ──────────────────────────────────────────────────────────────────

/// Arguments for the scaffold run.
#[derive(Debug, Args)]
pub struct ScaffoldArgs {
    /// Project name; also the name of the directory created.
    #[arg(
        value_name = "NAME",
        help = "Project name (default: express-js-typeorm-app)"
    )]
    pub name: Option<String>,

    /// Directory the project directory is created in.
    #[arg(
        short = 'd',
        long = "dir",
        value_name = "DIR",
        help = "Parent directory for the project (default: current directory)"
    )]
    pub dir: Option<PathBuf>,

    /// Package manager program.
    #[arg(
        long = "package-manager",
        value_name = "PROGRAM",
        help = "Package manager to invoke (default: npm)"
    )]
    pub package_manager: Option<String>,

    /// Accept every default without prompting.
    #[arg(short = 'y', long = "defaults", help = "Accept all defaults without prompting")]
    pub defaults: bool,

    /// Print the plan without touching the filesystem.
    #[arg(long = "dry-run", help = "Show what would be done without doing it")]
    pub dry_run: bool,
}

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}
