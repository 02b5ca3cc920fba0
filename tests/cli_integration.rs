use assert_cmd::Command;
use predicates::prelude::*;
use std::path::Path;

fn planprefs(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("planprefs").unwrap();
    cmd.env("PLANPREFS_HOME", home).env("NO_COLOR", "1");
    cmd
}

#[test]
fn set_then_get_round_trips() {
    let temp_dir = tempfile::tempdir().unwrap();

    planprefs(temp_dir.path())
        .args(["set", "custom", "foo,a*b"])
        .assert()
        .success()
        .stdout(predicate::str::contains("showCustomCookie set to foo,a*b"));

    planprefs(temp_dir.path())
        .args(["get", "showCustomCookie"])
        .assert()
        .success()
        .stdout(predicate::str::contains("foo,a*b"));

    assert!(temp_dir.path().join("prefs.json").exists());
}

#[test]
fn match_without_patterns_is_false() {
    let temp_dir = tempfile::tempdir().unwrap();

    planprefs(temp_dir.path())
        .args(["match", "foo", "bar", "baz"])
        .assert()
        .success()
        .stdout(predicate::eq("false\n"));
}

#[test]
fn match_uses_last_pattern_unless_accumulating() {
    let temp_dir = tempfile::tempdir().unwrap();

    planprefs(temp_dir.path())
        .args(["set", "custom", "foo,xyz"])
        .assert()
        .success();

    planprefs(temp_dir.path())
        .args(["match", "foo", "bar", "baz"])
        .assert()
        .success()
        .stdout(predicate::eq("false\n"));

    planprefs(temp_dir.path())
        .args(["match", "foo", "bar", "baz", "--mode", "accumulate"])
        .assert()
        .success()
        .stdout(predicate::eq("true\n"));

    planprefs(temp_dir.path())
        .args(["config", "match-mode", "accumulate"])
        .assert()
        .success();

    planprefs(temp_dir.path())
        .args(["match", "foo", "bar", "baz"])
        .assert()
        .success()
        .stdout(predicate::eq("true\n"));
}

#[test]
fn wildcard_match_across_candidates() {
    let temp_dir = tempfile::tempdir().unwrap();

    planprefs(temp_dir.path())
        .args(["set", "custom", "a*b"])
        .assert()
        .success();

    // the third candidate is left out and treated as empty
    planprefs(temp_dir.path())
        .args(["match", "xay", "zbq"])
        .assert()
        .success()
        .stdout(predicate::eq("true\n"));
}

#[test]
fn show_writes_first_read_defaults() {
    let temp_dir = tempfile::tempdir().unwrap();

    planprefs(temp_dir.path())
        .arg("show")
        .assert()
        .success()
        .stdout(predicate::str::contains("generated nodes"))
        .stdout(predicate::str::contains("custom nodes"));

    planprefs(temp_dir.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("showGenCookie"))
        .stdout(predicate::str::contains("showLineCookie"))
        .stdout(predicate::str::contains("left"));
}

#[test]
fn layout_and_delete() {
    let temp_dir = tempfile::tempdir().unwrap();

    planprefs(temp_dir.path())
        .args(["layout", "12", "30", "2"])
        .assert()
        .success();

    planprefs(temp_dir.path())
        .args(["get", "pixels"])
        .assert()
        .success()
        .stdout(predicate::str::contains("12"));

    planprefs(temp_dir.path())
        .args(["delete", "pixels"])
        .assert()
        .success()
        .stdout(predicate::str::contains("showPixelsCookie deleted"));

    planprefs(temp_dir.path())
        .args(["get", "pixels"])
        .assert()
        .success()
        .stdout(predicate::str::contains("is not set"));
}

#[test]
fn unknown_key_fails() {
    let temp_dir = tempfile::tempdir().unwrap();

    planprefs(temp_dir.path())
        .args(["get", "colour"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown preference key: colour"));
}

#[test]
fn patterns_lists_fragments() {
    let temp_dir = tempfile::tempdir().unwrap();

    planprefs(temp_dir.path())
        .args(["set", "custom", "node*cmd,exact"])
        .assert()
        .success();

    planprefs(temp_dir.path())
        .arg("patterns")
        .assert()
        .success()
        .stdout(predicate::str::contains("node*cmd"))
        .stdout(predicate::str::contains("\"node\", \"cmd\""))
        .stdout(predicate::str::contains("\"exact\" literal"));
}

#[test]
fn controls_prints_add_plan_markup() {
    let temp_dir = tempfile::tempdir().unwrap();

    planprefs(temp_dir.path())
        .args(["controls", "--banner", "<b>default</b>"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("<b>default</b><div id=\"addplan\">"));
}

#[test]
fn config_rejects_bad_value() {
    let temp_dir = tempfile::tempdir().unwrap();

    planprefs(temp_dir.path())
        .args(["config", "expiry-days", "never"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Invalid value for expiry-days: never"));

    planprefs(temp_dir.path())
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("expiry-days = 365"))
        .stdout(predicate::str::contains("match-mode = overwrite"));
}
