use std::fs;
use std::path::PathBuf;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::tempdir;

fn fixture(path: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join(path)
}

fn diff_cmd() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("vyatta-cfg"));
    cmd.arg("diff")
        .arg(fixture("fixtures/config.active"))
        .arg(fixture("fixtures/config.working"));
    cmd
}

#[test]
fn diff_prints_deletes_and_sets() {
    diff_cmd()
        .assert()
        .success()
        .stdout(predicate::str::contains("delete firewall name WAN_LOCAL"))
        .stdout(predicate::str::contains("delete service telnet"))
        .stdout(predicate::str::contains(r#"set service ssh port "2222""#))
        .stdout(predicate::str::contains(r#"set system name-server "8.8.8.8""#))
        .stdout(predicate::str::contains(r#"set system name-server "1.1.1.1""#).not());
}

#[test]
fn diff_json_outputs_structured_entries() {
    diff_cmd()
        .arg("--format")
        .arg("json")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"deletes\""))
        .stdout(predicate::str::contains("\"sets\""))
        .stdout(predicate::str::contains("\"reason\": \"value_added\""));
}

#[test]
fn diff_summary_prints_counts() {
    diff_cmd()
        .arg("--summary")
        .assert()
        .success()
        .stdout(predicate::str::contains("deletes=5 sets=7 replaced=0"));
}

#[test]
fn identical_configs_report_no_changes() {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("vyatta-cfg"));
    cmd.arg("diff")
        .arg(fixture("fixtures/config.working"))
        .arg(fixture("fixtures/config.working"))
        .arg("--fail-on-changes")
        .assert()
        .success()
        .stdout(predicate::str::contains("no changes"));
}

#[test]
fn fail_on_changes_exits_nonzero() {
    diff_cmd()
        .arg("--fail-on-changes")
        .assert()
        .failure()
        .stderr(predicate::str::contains("configurations differ"));
}

#[test]
fn ignore_flag_leaves_subtree_alone() {
    diff_cmd()
        .arg("--ignore")
        .arg("firewall")
        .arg("--ignore")
        .arg("service")
        .assert()
        .success()
        .stdout(predicate::str::contains("firewall").not())
        .stdout(predicate::str::contains("service").not())
        .stdout(predicate::str::contains(r#"set system host-name "edge-router""#));
}

#[test]
fn output_writes_plain_script() {
    let dir = tempdir().expect("tempdir");
    let out = dir.path().join("changes.txt");

    diff_cmd().arg("--output").arg(&out).assert().success();

    let script = fs::read_to_string(&out).expect("read script");
    let lines: Vec<&str> = script.lines().collect();
    assert_eq!(lines.len(), 12);
    assert_eq!(lines[0], "delete firewall name WAN_LOCAL");
    assert!(lines.contains(&r#"set interfaces ethernet eth1 address "192.168.2.1/24""#));
}

#[test]
fn output_writes_wrapper_script() {
    let dir = tempdir().expect("tempdir");
    let out = dir.path().join("apply.sh");

    diff_cmd()
        .arg("--output")
        .arg(&out)
        .arg("--style")
        .arg("wrapper")
        .assert()
        .success();

    let script = fs::read_to_string(&out).expect("read script");
    assert!(script.starts_with("#!/bin/vbash\nW=/opt/vyatta/sbin/vyatta-cfg-cmd-wrapper\n$W begin\n"));
    assert!(script.contains("$W delete service telnet\n"));
    assert!(script.contains("$W set service ssh port '2222'\n"));
    assert!(script.ends_with("$W commit\n$W save\n$W end\n"));
}

#[test]
fn output_refuses_to_overwrite_input() {
    let current = fixture("fixtures/config.active");
    let before = fs::read_to_string(&current).expect("read fixture");

    diff_cmd()
        .arg("--output")
        .arg(&current)
        .assert()
        .failure()
        .stderr(predicate::str::contains("refusing to overwrite input file"));

    assert_eq!(fs::read_to_string(&current).expect("reread fixture"), before);
}

#[test]
fn settings_file_supplies_ignores_and_style() {
    let dir = tempdir().expect("tempdir");
    let out = dir.path().join("apply.sh");

    diff_cmd()
        .arg("--settings")
        .arg(fixture("fixtures/settings.toml"))
        .arg("--summary")
        .arg("--output")
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("deletes=4 sets=6 replaced=0"));

    let script = fs::read_to_string(&out).expect("read script");
    assert!(script.starts_with("#!/bin/vbash\n"));
    assert!(!script.contains("host-name"));
}

#[test]
fn desired_tree_may_be_json() {
    let dir = tempdir().expect("tempdir");
    let desired = dir.path().join("desired.json");
    fs::write(
        &desired,
        r#"{"service": {"ssh": {"port": "2222"}, "telnet": {"disable": ""}}}"#,
    )
    .expect("write json");

    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("vyatta-cfg"));
    cmd.arg("diff")
        .arg(fixture("fixtures/config.active"))
        .arg(&desired)
        .assert()
        .success()
        .stdout(predicate::str::contains("delete firewall"))
        .stdout(predicate::str::contains(r#"set service ssh port "2222""#))
        .stdout(predicate::str::contains("service telnet").not());
}
