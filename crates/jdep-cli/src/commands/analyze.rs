use jdep_output::OutputFormatter;

use super::{emit, input};
use crate::cli_args::InputArgs;

/// Run `jdep analyze <paths>`: per-package metrics.
pub fn run(formatter: &dyn OutputFormatter, input: InputArgs, fail_on_cycles: bool) -> i32 {
    let analyzer = match input::analyze("analyze", &input) {
        Ok(a) => a,
        Err(code) => return code,
    };

    let report = analyzer.report();
    emit(&formatter.format_analysis(&report));

    if fail_on_cycles && report.contains_cycles {
        1
    } else {
        0
    }
}
