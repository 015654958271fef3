use std::path::PathBuf;

use pretty_assertions::assert_eq;
use vyatta_cfg_core::{
    changeset, format_changeset_json, format_summary, format_text, parse, parse_file,
    DiffOptions, DiffReason,
};

fn fixture(path: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join(path)
}

#[test]
fn fixture_changeset_deletes_then_sets() {
    let current = parse_file(&fixture("fixtures/config.active")).expect("parse active");
    let desired = parse_file(&fixture("fixtures/config.working")).expect("parse working");

    let changes = changeset(&current, &desired, &DiffOptions::default());

    let deletes: Vec<String> = changes.delete_paths().map(ToString::to_string).collect();
    assert_eq!(
        deletes,
        vec![
            "firewall name WAN_LOCAL",
            r#"interfaces ethernet eth1 description "Local""#,
            r#"service ssh port "22""#,
            "service telnet",
            r#"system host-name "ubnt""#,
        ]
    );

    let sets: Vec<String> = changes.set_paths().map(ToString::to_string).collect();
    assert_eq!(
        sets,
        vec![
            r#"firewall name WAN_IN rule 20 action "drop""#,
            r#"firewall name WAN_IN rule 20 state invalid "enable""#,
            r#"interfaces ethernet eth1 address "192.168.2.1/24""#,
            r#"interfaces ethernet eth1 description "LAN""#,
            r#"service ssh port "2222""#,
            r#"system host-name "edge-router""#,
            r#"system name-server "8.8.8.8""#,
        ]
    );

    assert_eq!(changes.deletes[0].reason, DiffReason::Missing);
    assert_eq!(changes.deletes[1].reason, DiffReason::ValueAdded);
}

#[test]
fn changeset_against_self_is_empty() {
    let current = parse_file(&fixture("fixtures/config.active")).expect("parse active");
    let changes = changeset(&current, &current, &DiffOptions::default());
    assert!(changes.is_empty());
    assert_eq!(format_summary(&changes), "deletes=0 sets=0 replaced=0");
}

#[test]
fn ignored_paths_are_left_alone_in_both_directions() {
    let current = parse_file(&fixture("fixtures/config.active")).expect("parse active");
    let desired = parse_file(&fixture("fixtures/config.working")).expect("parse working");
    let opts = DiffOptions {
        ignore_paths: vec!["system host-name".to_string(), "service".to_string()],
        ..DiffOptions::default()
    };

    let changes = changeset(&current, &desired, &opts);
    assert!(!changes
        .delete_paths()
        .chain(changes.set_paths())
        .any(|path| path.starts_with_keys(&["service".to_string()])
            || path.starts_with_keys(&["system".to_string(), "host-name".to_string()])));
    assert_eq!(changes.deletes.len(), 2);
    assert_eq!(changes.sets.len(), 5);
}

#[test]
fn ignored_subtree_survives_removal_of_its_parent() {
    let current = parse(
        "firewall {\n    name WAN_LOCAL {\n        default-action drop\n    }\n    name WAN_IN {\n        default-action drop\n    }\n    all-ping enable\n}\nservice {\n    telnet {\n    }\n}\n",
    )
    .expect("parse current");
    let desired = parse("").expect("parse desired");
    let opts = DiffOptions {
        ignore_paths: vec!["firewall name WAN_LOCAL".to_string()],
        ..DiffOptions::default()
    };

    let changes = changeset(&current, &desired, &opts);
    let deletes: Vec<String> = changes.delete_paths().map(ToString::to_string).collect();
    assert_eq!(
        deletes,
        vec!["firewall name WAN_IN", "firewall all-ping", "service"]
    );
    assert!(changes
        .deletes
        .iter()
        .all(|entry| entry.reason == DiffReason::Missing));
    assert!(changes.sets.is_empty());
}

#[test]
fn formatters_render_changeset() {
    let current = parse_file(&fixture("fixtures/config.active")).expect("parse active");
    let desired = parse_file(&fixture("fixtures/config.working")).expect("parse working");
    let changes = changeset(&current, &desired, &DiffOptions::default());

    let text = format_text(&changes);
    assert!(text.starts_with("- firewall name WAN_LOCAL"));
    assert!(text.contains(r#"+ system name-server "8.8.8.8""#));

    let json = format_changeset_json(&changes);
    assert!(json.contains("\"deletes\""));
    assert!(json.contains("\"reason\": \"value_added\""));
    assert!(json.contains(r#""\"8.8.8.8\"""#));

    assert_eq!(format_summary(&changes), "deletes=5 sets=7 replaced=0");
}
