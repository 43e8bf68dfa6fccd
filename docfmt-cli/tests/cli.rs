use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

const UNFORMATTED: &str = "def f():\n    '''return x'''\n    pass\n";
const FORMATTED: &str = "def f():\n    \"\"\"return x.\"\"\"\n    pass\n";

fn write_fixture(dir: &TempDir, name: &str, contents: &[u8]) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).expect("fixture to be written");
    path
}

#[test]
fn prints_diff_for_changed_file() {
    let dir = TempDir::new().unwrap();
    write_fixture(&dir, "mod.py", UNFORMATTED.as_bytes());

    let mut cmd = cargo_bin_cmd!("docfmt");
    cmd.current_dir(dir.path()).arg("mod.py");

    let output_pred = predicate::str::contains("--- before/mod.py")
        .and(predicate::str::contains("+++ after/mod.py"))
        .and(predicate::str::contains("-    '''return x'''"))
        .and(predicate::str::contains("+    \"\"\"return x.\"\"\""));

    cmd.assert().success().stdout(output_pred);
    assert_eq!(fs::read_to_string(dir.path().join("mod.py")).unwrap(), UNFORMATTED);
}

#[test]
fn formatted_file_produces_no_output() {
    let dir = TempDir::new().unwrap();
    let path = write_fixture(&dir, "clean.py", FORMATTED.as_bytes());

    let mut cmd = cargo_bin_cmd!("docfmt");
    cmd.arg(&path);

    cmd.assert().success().stdout(predicate::str::is_empty());
}

#[test]
fn in_place_rewrites_and_keeps_backup() {
    let dir = TempDir::new().unwrap();
    let path = write_fixture(&dir, "mod.py", UNFORMATTED.as_bytes());

    let mut cmd = cargo_bin_cmd!("docfmt");
    cmd.arg("--in-place").arg(&path);

    cmd.assert().success().stdout(predicate::str::is_empty());
    assert_eq!(fs::read_to_string(&path).unwrap(), FORMATTED);
    assert_eq!(
        fs::read_to_string(dir.path().join("mod.py.backup")).unwrap(),
        UNFORMATTED
    );
}

#[test]
fn in_place_without_backup() {
    let dir = TempDir::new().unwrap();
    let path = write_fixture(&dir, "mod.py", UNFORMATTED.as_bytes());

    let mut cmd = cargo_bin_cmd!("docfmt");
    cmd.arg("-i").arg("--no-backup").arg(&path);

    cmd.assert().success();
    assert_eq!(fs::read_to_string(&path).unwrap(), FORMATTED);
    assert!(!dir.path().join("mod.py.backup").exists());
}

#[test]
fn in_place_keeps_latin1_encoding() {
    let dir = TempDir::new().unwrap();
    let source = b"# -*- coding: latin-1 -*-\ndef f():\n    '''caf\xE9'''\n";
    let path = write_fixture(&dir, "legacy.py", source);

    let mut cmd = cargo_bin_cmd!("docfmt");
    cmd.arg("-i").arg("--no-backup").arg(&path);

    cmd.assert().success();
    assert_eq!(
        fs::read(&path).unwrap(),
        b"# -*- coding: latin-1 -*-\ndef f():\n    \"\"\"caf\xE9.\"\"\"\n".to_vec()
    );
}

#[test]
fn check_reports_changes_with_failure_exit() {
    let dir = TempDir::new().unwrap();
    write_fixture(&dir, "dirty.py", UNFORMATTED.as_bytes());
    write_fixture(&dir, "clean.py", FORMATTED.as_bytes());

    let mut cmd = cargo_bin_cmd!("docfmt");
    cmd.current_dir(dir.path()).arg("--check").arg("dirty.py").arg("clean.py");

    cmd.assert()
        .failure()
        .stdout(predicate::str::contains("would reformat dirty.py"))
        .stdout(predicate::str::contains("clean.py").not());
    assert_eq!(fs::read_to_string(dir.path().join("dirty.py")).unwrap(), UNFORMATTED);
}

#[test]
fn wrap_flag_wraps_summaries() {
    let dir = TempDir::new().unwrap();
    let source = "def f():\n    '''This is a rather long summary line that needs wrapping'''\n";
    let path = write_fixture(&dir, "long.py", source.as_bytes());

    let mut cmd = cargo_bin_cmd!("docfmt");
    cmd.arg("--transform")
        .arg("formatted")
        .arg("--wrap-long-summaries")
        .arg("30")
        .arg(&path);

    cmd.assert().success().stdout(predicate::eq(
        "def f():\n    \"\"\"This is a rather long\nsummary line that needs\nwrapping.\"\"\"\n",
    ));
}

#[test]
fn project_config_file_is_picked_up() {
    let dir = TempDir::new().unwrap();
    write_fixture(&dir, "docfmt.toml", b"[output]\nin_place = true\nbackup_suffix = \".orig\"\n");
    write_fixture(&dir, "mod.py", UNFORMATTED.as_bytes());

    let mut cmd = cargo_bin_cmd!("docfmt");
    cmd.current_dir(dir.path()).arg("mod.py");

    cmd.assert().success();
    assert_eq!(fs::read_to_string(dir.path().join("mod.py")).unwrap(), FORMATTED);
    assert!(dir.path().join("mod.py.orig").exists());
}

#[test]
fn explicit_missing_config_fails() {
    let dir = TempDir::new().unwrap();
    let path = write_fixture(&dir, "mod.py", UNFORMATTED.as_bytes());

    let mut cmd = cargo_bin_cmd!("docfmt");
    cmd.arg("--config").arg(dir.path().join("missing.toml")).arg(&path);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("configuration error"));
}

#[test]
fn failing_file_does_not_stop_the_others() {
    let dir = TempDir::new().unwrap();
    write_fixture(&dir, "broken.py", b"def f(:\n    $\n");
    write_fixture(&dir, "mod.py", UNFORMATTED.as_bytes());

    let mut cmd = cargo_bin_cmd!("docfmt");
    cmd.current_dir(dir.path()).arg("broken.py").arg("missing.py").arg("mod.py");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("docfmt: broken.py: unparseable source"))
        .stderr(predicate::str::contains("docfmt: missing.py:"))
        .stdout(predicate::str::contains("+++ after/mod.py"));
}

#[test]
fn unsupported_encoding_fails_the_file() {
    let dir = TempDir::new().unwrap();
    write_fixture(&dir, "odd.py", b"# coding: klingon\nx = 1\n");

    let mut cmd = cargo_bin_cmd!("docfmt");
    cmd.current_dir(dir.path()).arg("odd.py");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("unsupported encoding: klingon"));
}

#[test]
fn token_simple_transform() {
    let dir = TempDir::new().unwrap();
    let path = write_fixture(&dir, "tiny.py", b"pass\n");

    let mut cmd = cargo_bin_cmd!("docfmt");
    cmd.arg("-t").arg("token-simple").arg(&path);

    cmd.assert()
        .success()
        .stdout("NAME \"pass\" 1:0-1:4\nNEWLINE \"\\n\" 1:4-1:5\nENDMARKER \"\" 2:0-2:0\n");
}

#[test]
fn unknown_transform_is_rejected_by_the_parser() {
    let mut cmd = cargo_bin_cmd!("docfmt");
    cmd.arg("--transform").arg("ast-tag").arg("x.py");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("invalid value 'ast-tag'"));
}

#[test]
fn version_flag() {
    let mut cmd = cargo_bin_cmd!("docfmt");
    cmd.arg("--version");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}
