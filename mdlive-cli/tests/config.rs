use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::fs;
use tempfile::tempdir;

#[test]
fn explicit_config_disables_highlighting() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("doc.md");
    fs::write(&input, "```rust\nfn main() {}\n```\n").unwrap();

    let config_path = dir.path().join("custom.toml");
    fs::write(
        &config_path,
        r#"[highlight]
enabled = false
"#,
    )
    .unwrap();

    let mut cmd = cargo_bin_cmd!("mdlive");
    cmd.current_dir(dir.path())
        .arg("convert")
        .arg(&input)
        .arg("--to")
        .arg("html")
        .arg("--config")
        .arg(&config_path);

    let output = cmd.assert().success().get_output().stdout.clone();
    let stdout = String::from_utf8(output).unwrap();
    assert!(stdout.contains("fn main() {}"));
    assert!(!stdout.contains("<span"));
    assert!(!stdout.contains("<style>"));
}

#[test]
fn local_config_file_is_picked_up() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("doc.md");
    fs::write(&input, "line\n".repeat(10)).unwrap();
    fs::write(
        dir.path().join("mdlive.toml"),
        r#"[convert.pdf]
page_height = 100.0
margin = 10.0
line_height = 20.0
"#,
    )
    .unwrap();
    let output = dir.path().join("doc.pdf");

    let mut cmd = cargo_bin_cmd!("mdlive");
    cmd.current_dir(dir.path())
        .arg(&input)
        .arg("--to")
        .arg("pdf")
        .arg("-o")
        .arg(&output);
    cmd.assert().success();

    // 11 lines, 4 per page
    let pdf = String::from_utf8_lossy(&fs::read(&output).unwrap()).into_owned();
    assert!(pdf.contains("/Count 3"));
}

#[test]
fn missing_explicit_config_fails() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("doc.md");
    fs::write(&input, "text").unwrap();

    let mut cmd = cargo_bin_cmd!("mdlive");
    cmd.current_dir(dir.path())
        .arg(&input)
        .arg("--to")
        .arg("text")
        .arg("--config")
        .arg(dir.path().join("nope.toml"));

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load configuration"));
}

#[test]
fn highlight_css_follows_dark_mode() {
    let mut cmd = cargo_bin_cmd!("mdlive");
    cmd.arg("highlight-css");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("{").and(predicate::str::contains("color")));

    let mut cmd = cargo_bin_cmd!("mdlive");
    cmd.arg("highlight-css").arg("no-such-theme");
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("no-such-theme"));
}
