//! jdep CLI: package design-quality metrics for compiled JVM classes.
//!
//! Subcommands analyze class files, list package dependency cycles, and
//! check dependency rules. See `jdep --help` for usage.

use clap::Parser;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod cli_args;
mod commands;

use cli_args::{Cli, Commands};

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let formatter: Box<dyn jdep_output::OutputFormatter> = if cli.json {
        Box::new(jdep_output::json::JsonFormatter)
    } else {
        Box::new(jdep_output::human::HumanFormatter)
    };

    let exit_code = match cli.command {
        Commands::Analyze {
            input,
            fail_on_cycles,
        } => commands::analyze::run(&*formatter, input, fail_on_cycles),
        Commands::Cycles {
            input,
            fail_on_cycles,
        } => commands::cycles::run(&*formatter, input, fail_on_cycles),
        Commands::Check {
            input,
            forbid,
            rules,
            expect,
        } => commands::check::run(&*formatter, input, forbid, rules, expect),
        Commands::Completion { shell } => commands::completion::run(shell),
    };

    std::process::exit(exit_code);
}

/// Log to stderr. `JDEP_LOG` takes an `EnvFilter` directive; otherwise
/// `--verbose` selects debug and the default is info.
fn init_tracing(verbose: bool) {
    let default = if verbose { "jdep=debug" } else { "jdep=info" };
    let filter = EnvFilter::try_from_env("JDEP_LOG").unwrap_or_else(|_| EnvFilter::new(default));

    let _ = tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(verbose)
                .without_time(),
        )
        .with(filter)
        .try_init();
}
