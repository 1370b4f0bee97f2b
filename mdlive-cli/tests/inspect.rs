use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::fs;
use tempfile::tempdir;

fn input(dir: &std::path::Path) -> std::path::PathBuf {
    let path = dir.join("doc.md");
    fs::write(&path, "# Title\n\n- a\n- b\n").unwrap();
    path
}

#[test]
fn inspect_defaults_to_treeviz() {
    let dir = tempdir().unwrap();
    let path = input(dir.path());

    let mut cmd = cargo_bin_cmd!("mdlive");
    cmd.current_dir(dir.path()).arg("inspect").arg(&path);

    cmd.assert().success().stdout(
        predicate::str::starts_with("⧉ Document (2 blocks)")
            .and(predicate::str::contains("☰ 2 items")),
    );
}

#[test]
fn inspect_ast_json() {
    let dir = tempdir().unwrap();
    let path = input(dir.path());

    let mut cmd = cargo_bin_cmd!("mdlive");
    cmd.current_dir(dir.path())
        .arg("inspect")
        .arg(&path)
        .arg("ast-json");

    let output = cmd.assert().success().get_output().stdout.clone();
    let value: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(value["blocks"][1]["type"], "list");
    assert_eq!(value["blocks"][1]["ordered"], false);
}

#[test]
fn inspect_rejects_unknown_transform() {
    let dir = tempdir().unwrap();
    let path = input(dir.path());

    let mut cmd = cargo_bin_cmd!("mdlive");
    cmd.current_dir(dir.path())
        .arg("inspect")
        .arg(&path)
        .arg("token-json");

    cmd.assert().failure();
}
