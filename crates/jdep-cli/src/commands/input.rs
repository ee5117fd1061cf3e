use std::path::Path;

use jdep_core::config::JdepConfig;
use jdep_enforce::Analyzer;
use jdep_parsers::ClassFileWalker;

use crate::cli_args::InputArgs;

/// Resolve the configuration for a command: an explicit `--config` file must
/// load, while a broken `./jdep.json` only warns and falls back to defaults.
/// Command-line switches are layered on top.
pub fn resolve_config(cmd: &str, input: &InputArgs, cwd: &Path) -> Result<JdepConfig, i32> {
    let mut config = match &input.config {
        Some(path) => match JdepConfig::load_file(path) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("jdep {cmd}: {e}");
                return Err(2);
            }
        },
        None => JdepConfig::load(cwd).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "ignoring unusable configuration, using defaults");
            JdepConfig::default()
        }),
    };

    for pattern in &input.exclude {
        if !config.ignore.contains(pattern) {
            config.ignore.push(pattern.clone());
        }
    }
    if input.no_inner_classes {
        config.analyze_inner_classes = false;
    }
    Ok(config)
}

/// Load and analyze every class named by `input`.
///
/// Returns the exit code to use on failure.
pub fn analyze(cmd: &str, input: &InputArgs) -> Result<Analyzer, i32> {
    let cwd = match std::env::current_dir() {
        Ok(p) => p,
        Err(e) => {
            eprintln!("jdep {cmd}: failed to get current directory: {e}");
            return Err(2);
        }
    };
    let config = resolve_config(cmd, input, &cwd)?;

    let units = match ClassFileWalker::new(&input.paths)
        .analyze_inner_classes(config.analyze_inner_classes)
        .walk()
    {
        Ok(units) => units,
        Err(e) => {
            eprintln!("jdep {cmd}: {e}");
            return Err(2);
        }
    };

    let mut analyzer = Analyzer::new(&config);
    if let Some(components) = &input.components {
        analyzer.set_components(components);
    }

    let outcome = analyzer.analyze(&units);
    for failure in &outcome.failures {
        tracing::warn!(unit = %failure.id, error = %failure.error, "skipping undecodable class file");
    }
    tracing::info!(
        units = units.len(),
        folded = outcome.folded,
        skipped = outcome.skipped,
        failed = outcome.failures.len(),
        packages = analyzer.count_packages(),
        "analysis complete"
    );

    Ok(analyzer)
}
