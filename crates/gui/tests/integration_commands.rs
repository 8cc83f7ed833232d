//! Integration tests for the ExplorerCommand JSON protocol.
//!
//! Tests the full command pipeline: JSON string -> parse -> execute -> response.

use lathe_explorer_lib::command::{execute_json, execute_json_batch};
use lathe_explorer_lib::harness::ExplorerHarness;

#[test]
fn test_command_hover_and_describe() {
    let mut h = ExplorerHarness::new();

    let resp = execute_json(&mut h, r#"{"command": "pointer_enter", "part": "tailstock"}"#).unwrap();
    assert!(resp.success);
    assert_eq!(resp.data.unwrap()["changed"], true);

    let resp = execute_json(&mut h, r#"{"command": "describe_scene"}"#).unwrap();
    let data = resp.data.unwrap();
    assert_eq!(data["mesh_count"], 7);
    let tailstock = data["meshes"]
        .as_array()
        .unwrap()
        .iter()
        .find(|m| m["part"] == "tailstock")
        .unwrap();
    assert_eq!(tailstock["color"], "#c084fc");
}

#[test]
fn test_command_batch_session() {
    let mut h = ExplorerHarness::new();
    let script = r#"[
        {"command": "pointer_enter", "part": "carriage"},
        {"command": "click", "part": "carriage"},
        {"command": "pointer_leave", "part": "carriage"},
        {"command": "orbit", "dx": 30.0, "dy": 0.0},
        {"command": "pan", "dx": 10.0, "dy": 10.0},
        {"command": "inspect"},
        {"command": "dismiss"},
        {"command": "dismiss"},
        {"command": "inspect"}
    ]"#;

    let responses = execute_json_batch(&mut h, script).unwrap();
    assert_eq!(responses.len(), 9);
    assert!(responses.iter().all(|r| r.success));

    let first = responses[5].data.as_ref().unwrap();
    assert!(first["hovered"].is_null());
    assert_eq!(first["selected"], "carriage");
    assert_eq!(first["overlay"]["title"], "Carriage");

    assert_eq!(responses[6].data.as_ref().unwrap()["changed"], true);
    assert_eq!(responses[7].data.as_ref().unwrap()["changed"], false);

    let last = responses[8].data.as_ref().unwrap();
    assert!(last["selected"].is_null());
    assert!(last["overlay"].is_null());
}

#[test]
fn test_command_pointer_move_misses_outside_parts() {
    let mut h = ExplorerHarness::new();
    let resp = execute_json(&mut h, r#"{"command": "pointer_move", "x": 1.0, "y": 1.0}"#).unwrap();
    assert!(resp.success);
    assert!(resp.data.unwrap()["hit"].is_null());
    assert!(h.hovered().is_none());
}

#[test]
fn test_command_unknown_part_reports_unchanged() {
    let mut h = ExplorerHarness::new();
    let resp = execute_json(&mut h, r#"{"command": "click", "part": "motor"}"#).unwrap();
    assert!(resp.success);
    assert_eq!(resp.data.unwrap()["changed"], false);
    assert!(h.selected().is_none());
}

#[test]
fn test_command_invalid_json() {
    let mut h = ExplorerHarness::new();
    assert!(execute_json(&mut h, "not json").is_err());
    assert!(execute_json(&mut h, r#"{"command": "spin"}"#).is_err());
    assert!(execute_json_batch(&mut h, r#"{"command": "inspect"}"#).is_err());
}
