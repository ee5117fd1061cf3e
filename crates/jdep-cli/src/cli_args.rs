use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

#[derive(Parser, Debug)]
#[command(
    name = "jdep",
    version,
    about = "Package design-quality metrics and dependency rules for compiled classes"
)]
pub(crate) struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output as structured JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Log decoding and walking details to stderr
    #[arg(long, global = true)]
    pub verbose: bool,
}

/// Where the classes come from and how packages are named.
#[derive(Args, Debug, Clone, Default)]
pub struct InputArgs {
    /// Class files or directories of class files
    #[arg(required = true)]
    pub paths: Vec<PathBuf>,

    /// Configuration file (`.json`, otherwise properties format).
    /// Defaults to ./jdep.json when present
    #[arg(long, short = 'c', env = "JDEP_CONFIG")]
    pub config: Option<PathBuf>,

    /// Comma-separated package prefixes that each collapse into one package
    #[arg(long)]
    pub components: Option<String>,

    /// Package pattern to leave out, e.g. `java.*` (repeatable)
    #[arg(long = "exclude", short = 'x', value_name = "PATTERN")]
    pub exclude: Vec<String>,

    /// Skip inner classes (class files whose name contains `$`)
    #[arg(long)]
    pub no_inner_classes: bool,
}

#[derive(Subcommand, Debug)]
pub(crate) enum Commands {
    /// Report per-package metrics: Ca, Ce, A, I, D
    Analyze {
        #[command(flatten)]
        input: InputArgs,
        /// Exit 1 when any package dependency cycle exists
        #[arg(long)]
        fail_on_cycles: bool,
    },

    /// List package dependency cycles
    Cycles {
        #[command(flatten)]
        input: InputArgs,
        /// Exit 1 when any package dependency cycle exists
        #[arg(long)]
        fail_on_cycles: bool,
    },

    /// Check forbidden dependencies and the expected dependency shape
    Check {
        #[command(flatten)]
        input: InputArgs,
        /// Forbidden dependency, `owner=pattern`; a trailing `*` matches by prefix (repeatable)
        #[arg(long = "forbid", value_name = "OWNER=PATTERN")]
        forbid: Vec<String>,
        /// JSON file of forbidden-dependency rules
        #[arg(long)]
        rules: Option<PathBuf>,
        /// JSON file mapping every expected package to its allowed efferents
        #[arg(long)]
        expect: Option<PathBuf>,
    },

    /// Generate shell completion scripts
    Completion {
        /// Shell to generate for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[cfg(test)]
#[path = "cli_args_tests.rs"]
mod tests;
