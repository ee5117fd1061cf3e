use std::path::{Path, PathBuf};

use jdep_enforce::{DependencyConstraint, EfferentConstraints};
use jdep_output::OutputFormatter;

use super::{emit, input};
use crate::cli_args::InputArgs;

/// Run `jdep check <paths>`: forbidden dependencies and expected shape.
pub fn run(
    formatter: &dyn OutputFormatter,
    input: InputArgs,
    forbid: Vec<String>,
    rules: Option<PathBuf>,
    expect: Option<PathBuf>,
) -> i32 {
    if forbid.is_empty() && rules.is_none() && expect.is_none() {
        eprintln!("jdep check: nothing to check. Pass --forbid, --rules or --expect");
        return 2;
    }

    let mut constraints = match &rules {
        Some(path) => match read_json(path, EfferentConstraints::from_json) {
            Ok(c) => c,
            Err(msg) => {
                eprintln!("jdep check: {msg}");
                return 2;
            }
        },
        None => EfferentConstraints::new(),
    };
    for entry in &forbid {
        match parse_forbid(entry) {
            Ok((owner, pattern)) => {
                constraints.should_not_depend_upon(owner, pattern);
            }
            Err(msg) => {
                eprintln!("jdep check: {msg}");
                return 2;
            }
        }
    }

    let expected = match &expect {
        Some(path) => match read_json(path, DependencyConstraint::from_json) {
            Ok(c) => Some(c),
            Err(msg) => {
                eprintln!("jdep check: {msg}");
                return 2;
            }
        },
        None => None,
    };

    let analyzer = match input::analyze("check", &input) {
        Ok(a) => a,
        Err(code) => return code,
    };

    let report = analyzer.check(&constraints, expected.as_ref());
    emit(&formatter.format_check(&report));

    if report.passed() {
        0
    } else {
        1
    }
}

/// Split `owner=pattern`. Both halves must be non-empty after trimming.
pub(crate) fn parse_forbid(entry: &str) -> Result<(&str, &str), String> {
    match entry.split_once('=') {
        Some((owner, pattern)) if !owner.trim().is_empty() && !pattern.trim().is_empty() => {
            Ok((owner.trim(), pattern.trim()))
        }
        _ => Err(format!("invalid --forbid '{entry}', expected OWNER=PATTERN")),
    }
}

fn read_json<T>(
    path: &Path,
    parse: impl FnOnce(&str) -> Result<T, serde_json::Error>,
) -> Result<T, String> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| format!("failed to read {}: {e}", path.display()))?;
    parse(&text).map_err(|e| format!("invalid JSON in {}: {e}", path.display()))
}
