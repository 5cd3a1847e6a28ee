//! # exforge CLI
//!
//! Scaffolds an Express + TypeORM (PostgreSQL) API with JWT authentication.
//!
//! ## Startup sequence
//!
//! 1. Load `.env` from the working directory, if any.
//! 2. Parse CLI arguments (clap handles `--help` / `--version` early-exit).
//! 3. Print completions and stop, when asked to.
//! 4. Initialise the tracing subscriber (logging).
//! 5. Load configuration (file + env + defaults).
//! 6. Build the [`OutputManager`] and run the scaffold.
//! 7. Translate any [`CliError`] into a user-facing message and exit code.
//!
//! ## Exit codes
//!
//! | Code | Meaning                                        |
//! |------|------------------------------------------------|
//! |  0   | Success                                        |
//! |  1   | Collision, failed step or internal error       |
//! |  2   | User / input error                             |
//! |  4   | Configuration error                            |

use std::process::ExitCode;

use clap::Parser;
use tracing::{debug, info};

use crate::{
    cli::Cli,
    config::AppConfig,
    error::{CliError, IntoCli as _},
    logging::init_logging,
    output::OutputManager,
};

mod cli;
mod commands;
mod config;
mod error;
mod logging;
mod output;
mod prompts;

fn main() -> ExitCode {
    // Missing .env is the normal case.
    let _ = dotenvy::dotenv();

    // ── 1. Parse arguments ────────────────────────────────────────────────
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if !e.use_stderr() => {
            // --help / --version
            let _ = e.print();
            return ExitCode::SUCCESS;
        }
        Err(e) => {
            eprintln!("{}", e.render().ansi());
            return ExitCode::from(2);
        }
    };

    // ── 2. Completions need neither logging nor config ────────────────────
    if let Some(shell) = cli.completions {
        return match commands::completions::execute(shell) {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => handle_error(e, &cli),
        };
    }

    // ── 3. Initialise tracing ─────────────────────────────────────────────
    if let Err(e) = init_logging(&cli.global) {
        eprintln!("Failed to initialise logging: {e}");
        return ExitCode::from(1);
    }

    debug!(
        verbose = cli.global.verbose,
        quiet = cli.global.quiet,
        no_color = cli.global.no_color,
        "CLI started"
    );

    // ── 4. Load configuration ─────────────────────────────────────────────
    let config = match AppConfig::load(cli.global.config.as_ref())
        .with_cli_context(|| "loading configuration")
    {
        Ok(cfg) => cfg,
        Err(e) => return handle_error(e, &cli),
    };

    // ── 5. Run ────────────────────────────────────────────────────────────
    let output = OutputManager::new(&cli.global, &config);
    let Cli { global, scaffold, .. } = cli;

    match commands::scaffold::execute(scaffold, config, output) {
        Ok(()) => {
            info!("exforge completed successfully");
            ExitCode::SUCCESS
        }
        Err(e) => report(e, global.verbose > 0, global.no_color),
    }
}

fn handle_error(err: CliError, cli: &Cli) -> ExitCode {
    report(err, cli.global.verbose > 0, cli.global.no_color)
}

/// Translate a `CliError` into a user message and an exit code.
///
/// Colour is used only when stderr is a terminal and `--no-color` is unset.
fn report(err: CliError, verbose: bool, no_color: bool) -> ExitCode {
    err.log();

    let colored = !no_color && std::io::IsTerminal::is_terminal(&std::io::stderr());
    let msg = if colored {
        err.format_colored(verbose)
    } else {
        err.format_plain(verbose)
    };
    eprint!("{msg}");

    ExitCode::from(err.exit_code())
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_structure_is_valid() {
        // Clap's internal consistency check: missing values, conflicts, etc.
        Cli::command().debug_assert();
    }

    #[test]
    fn cli_version_matches_cargo() {
        let cmd = Cli::command();
        assert_eq!(cmd.get_version(), Some(env!("CARGO_PKG_VERSION")));
    }

    #[test]
    fn cli_has_author() {
        let cmd = Cli::command();
        assert!(cmd.get_author().is_some());
    }

    #[test]
    fn exit_code_follows_the_error_category() {
        let err = CliError::InvalidInput {
            message: "x".into(),
        };
        assert_eq!(err.exit_code(), 2);
        let _ = report(err, false, true);
    }
}
