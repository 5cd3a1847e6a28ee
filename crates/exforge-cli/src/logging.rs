//! Diagnostics for a scaffold run go to stderr through `tracing`.
//!
//! The core and adapter crates emit events; this module is the one place a
//! subscriber is installed.
//!
//! | Flags      | Level |
//! |------------|-------|
//! | (none)     | warn  |
//! | `-v`       | info  |
//! | `-vv`      | debug |
//! | `-vvv`     | trace |
//! | `--quiet`  | error |
//!
//! A set `RUST_LOG` replaces the flag-derived filter entirely.

use std::io::IsTerminal as _;

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::{GlobalArgs, OutputFormat};

/// Crates whose events pass the flag-derived filter.
const LOG_TARGETS: [&str; 3] = ["exforge", "exforge_core", "exforge_adapters"];

/// Install the stderr subscriber for this process.
///
/// Fails when a subscriber is already installed.
pub fn init_logging(args: &GlobalArgs) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(directives(level_for(args))));

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .with_ansi(wants_ansi(args) && std::io::stderr().is_terminal())
        .with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialise tracing: {e}"))?;

    Ok(())
}

fn level_for(args: &GlobalArgs) -> &'static str {
    if args.quiet {
        return "error";
    }
    match args.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// `exforge=info,exforge_core=info,...` for the given level.
fn directives(level: &str) -> String {
    LOG_TARGETS
        .iter()
        .map(|target| format!("{target}={level}"))
        .collect::<Vec<_>>()
        .join(",")
}

/// Colour unless `--no-color` or `--output-format plain` asked for none.
fn wants_ansi(args: &GlobalArgs) -> bool {
    !args.no_color && args.output_format != OutputFormat::Plain
}
