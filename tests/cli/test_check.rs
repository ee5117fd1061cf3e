// `jdep check` with inline and file-based rules.

use std::process::Command;

use crate::common::{class_tree, jdep_bin, LAYERED_APP};

#[test]
fn test_forbid_violation() {
    let (dir, root) = class_tree(LAYERED_APP);
    let out = Command::new(jdep_bin())
        .args(["check", "-x", "java.*", "--forbid", "com.acme.model=com.acme.web"])
        .arg(&root)
        .current_dir(dir.path())
        .output()
        .unwrap();

    assert_eq!(out.status.code(), Some(1));
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("FORBIDDEN: Package com.acme.model can't depend on com.acme.web"));
}

#[test]
fn test_forbid_passes() {
    let (dir, root) = class_tree(LAYERED_APP);
    let out = Command::new(jdep_bin())
        .args(["check", "-x", "java.*", "--forbid", "com.acme.service=com.acme.web*"])
        .arg(&root)
        .current_dir(dir.path())
        .output()
        .unwrap();

    assert_eq!(out.status.code(), Some(0));
    assert!(String::from_utf8_lossy(&out.stdout).contains("ok: 1 rule(s) satisfied"));
}

#[test]
fn test_rules_and_expected_shape_files() {
    let (dir, root) = class_tree(LAYERED_APP);
    let rules = dir.path().join("rules.json");
    std::fs::write(
        &rules,
        r#"[{"package": "com.acme.web", "forbidden": ["org.*"]}]"#,
    )
    .unwrap();
    let shape = dir.path().join("shape.json");
    std::fs::write(
        &shape,
        r#"{
            "com.acme.web": ["com.acme.service"],
            "com.acme.service": ["com.acme.model"],
            "com.acme.model": ["com.acme.web"]
        }"#,
    )
    .unwrap();

    let out = Command::new(jdep_bin())
        .args(["check", "--json", "-x", "java.*"])
        .arg("--rules")
        .arg(&rules)
        .arg("--expect")
        .arg(&shape)
        .arg(&root)
        .current_dir(dir.path())
        .output()
        .unwrap();

    assert_eq!(out.status.code(), Some(1));
    let json: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(json["status"], "violation");
    assert!(json["violation"].is_null());
    let difference = &json["dependency_match"]["efferent_differences"][0];
    assert_eq!(difference["package"], "com.acme.web");
    assert_eq!(difference["unexpected"], serde_json::json!(["com.acme.model"]));
}
