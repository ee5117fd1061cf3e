// Exit codes: 0 clean, 1 findings, 2 usage or I/O problems.

use std::process::Command;

use crate::common::{class_tree, jdep_bin};

fn jdep(args: &[&str], cwd: &std::path::Path) -> Option<i32> {
    Command::new(jdep_bin())
        .args(args)
        .current_dir(cwd)
        .output()
        .unwrap()
        .status
        .code()
}

#[test]
fn test_exit_code_0_without_cycles() {
    let (dir, _root) = class_tree(&[("a/A", &["b/B"]), ("b/B", &[])]);
    assert_eq!(jdep(&["analyze", "classes", "--fail-on-cycles"], dir.path()), Some(0));
}

#[test]
fn test_exit_code_1_on_cycles_when_requested() {
    let (dir, _root) = class_tree(&[("a/A", &["b/B"]), ("b/B", &["a/A"])]);
    assert_eq!(jdep(&["analyze", "classes"], dir.path()), Some(0));
    assert_eq!(jdep(&["analyze", "classes", "--fail-on-cycles"], dir.path()), Some(1));
    assert_eq!(jdep(&["cycles", "classes", "--fail-on-cycles"], dir.path()), Some(1));
}

#[test]
fn test_exit_code_2_for_missing_path() {
    let dir = tempfile::tempdir().unwrap();
    assert_eq!(jdep(&["analyze", "does-not-exist"], dir.path()), Some(2));
}

#[test]
fn test_exit_code_2_for_bad_config() {
    let (dir, _root) = class_tree(&[("a/A", &[])]);
    assert_eq!(
        jdep(&["analyze", "classes", "--config", "missing.properties"], dir.path()),
        Some(2)
    );
}

#[test]
fn test_exit_code_2_for_check_without_rules() {
    let (dir, _root) = class_tree(&[("a/A", &[])]);
    assert_eq!(jdep(&["check", "classes"], dir.path()), Some(2));
    assert_eq!(jdep(&["check", "classes", "--forbid", "no-equals"], dir.path()), Some(2));
}

#[test]
fn test_broken_default_config_is_not_fatal() {
    let (dir, _root) = class_tree(&[("a/A", &[])]);
    std::fs::write(dir.path().join("jdep.json"), "{ broken").unwrap();
    assert_eq!(jdep(&["analyze", "classes"], dir.path()), Some(0));
}

#[test]
fn test_completion() {
    let dir = tempfile::tempdir().unwrap();
    assert_eq!(jdep(&["completion", "bash"], dir.path()), Some(0));
}
