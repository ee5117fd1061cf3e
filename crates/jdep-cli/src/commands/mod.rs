pub mod analyze;
pub mod check;
pub mod completion;
pub mod cycles;
pub mod input;

/// Write formatter output to stdout, ending with exactly one newline.
pub(crate) fn emit(output: &str) {
    if output.is_empty() {
        return;
    }
    if output.ends_with('\n') {
        print!("{output}");
    } else {
        println!("{output}");
    }
}
