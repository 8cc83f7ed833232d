//! JSON command protocol for driving the explorer headlessly.
//!
//! Every pointer and camera input the viewport produces has a command form,
//! so scripted sessions exercise the same transitions as a mouse does.

use serde::{Deserialize, Serialize};
use shared::hex_color;

use crate::harness::ExplorerHarness;

/// A command the harness can execute.
#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum ExplorerCommand {
    /// Pointer entered a part's hit region
    PointerEnter { part: String },
    /// Pointer left a part's hit region
    PointerLeave { part: String },
    Click { part: String },
    /// Overlay close control
    Dismiss,
    /// Move the pointer to viewport coordinates; hit-testing picks the part
    PointerMove { x: f32, y: f32 },
    /// Pointer left the viewport
    PointerExit,
    /// Click at viewport coordinates
    ClickAt { x: f32, y: f32 },
    /// Rotate by a drag delta in degrees
    Orbit { dx: f32, dy: f32 },
    /// Pointer drag in pixels over the viewport
    Drag { dx: f32, dy: f32 },
    /// Resize the virtual viewport used by screen-space commands
    Resize { width: f32, height: f32 },
    /// Scroll fraction, positive moves closer
    Dolly { delta: f32 },
    /// Accepted and ignored
    Pan { dx: f32, dy: f32 },
    /// Hovered and selected ids, overlay content, camera pose
    Inspect,
    /// Every renderable mesh with its resolved color
    DescribeScene,
}

/// Response from executing a command.
#[derive(Debug, Serialize, Deserialize)]
pub struct CommandResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

impl CommandResponse {
    fn ok() -> Self {
        Self {
            success: true,
            error: None,
            data: None,
        }
    }

    fn err(msg: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(msg.into()),
            data: None,
        }
    }

    fn ok_with_data(data: serde_json::Value) -> Self {
        Self {
            success: true,
            error: None,
            data: Some(data),
        }
    }
}

/// Execute a single command on the harness.
///
/// Unknown part ids are not errors: the state machine absorbs them and the
/// response reports `changed: false`.
pub fn execute_command(harness: &mut ExplorerHarness, cmd: ExplorerCommand) -> CommandResponse {
    match cmd {
        ExplorerCommand::PointerEnter { part } => {
            let t = harness.hover(&part);
            CommandResponse::ok_with_data(serde_json::json!({ "changed": !t.is_noop() }))
        }

        ExplorerCommand::PointerLeave { part } => {
            let t = harness.leave(&part);
            CommandResponse::ok_with_data(serde_json::json!({ "changed": !t.is_noop() }))
        }

        ExplorerCommand::Click { part } => {
            let t = harness.click(&part);
            CommandResponse::ok_with_data(serde_json::json!({ "changed": !t.is_noop() }))
        }

        ExplorerCommand::Dismiss => {
            let t = harness.dismiss();
            CommandResponse::ok_with_data(serde_json::json!({ "changed": !t.is_noop() }))
        }

        ExplorerCommand::PointerMove { x, y } => {
            let hit = harness.move_pointer(egui::pos2(x, y));
            CommandResponse::ok_with_data(serde_json::json!({ "hit": hit }))
        }

        ExplorerCommand::PointerExit => {
            harness.pointer_exit();
            CommandResponse::ok()
        }

        ExplorerCommand::ClickAt { x, y } => {
            let hit = harness.click_at(egui::pos2(x, y));
            CommandResponse::ok_with_data(serde_json::json!({ "hit": hit }))
        }

        ExplorerCommand::Orbit { dx, dy } => {
            harness.orbit(dx, dy);
            CommandResponse::ok()
        }

        ExplorerCommand::Drag { dx, dy } => {
            harness.drag(dx, dy);
            CommandResponse::ok()
        }

        ExplorerCommand::Resize { width, height } => {
            if width <= 0.0 || height <= 0.0 {
                return CommandResponse::err(format!("Invalid viewport size {width}x{height}"));
            }
            harness.set_viewport_size(width, height);
            CommandResponse::ok()
        }

        ExplorerCommand::Dolly { delta } => {
            harness.dolly(delta);
            CommandResponse::ok()
        }

        ExplorerCommand::Pan { dx, dy } => {
            harness.pan(dx, dy);
            CommandResponse::ok()
        }

        ExplorerCommand::Inspect => {
            let overlay = harness.overlay().map(|c| {
                serde_json::json!({
                    "title": c.title,
                    "description": c.description,
                })
            });
            let cam = &harness.session.camera;
            let eye = cam.eye_position();
            CommandResponse::ok_with_data(serde_json::json!({
                "hovered": harness.hovered(),
                "selected": harness.selected(),
                "overlay": overlay,
                "camera": {
                    "azimuth": cam.azimuth,
                    "polar": cam.polar,
                    "distance": cam.distance,
                    "eye": [eye.x, eye.y, eye.z],
                },
            }))
        }

        ExplorerCommand::DescribeScene => {
            let meshes: Vec<serde_json::Value> = harness
                .scene()
                .iter()
                .map(|m| {
                    serde_json::json!({
                        "label": m.label,
                        "part": m.part_id,
                        "color": hex_color(m.color),
                        "interactive": m.is_interactive(),
                    })
                })
                .collect();
            CommandResponse::ok_with_data(serde_json::json!({
                "mesh_count": meshes.len(),
                "meshes": meshes,
            }))
        }
    }
}

/// Parse and execute a single JSON command string.
pub fn execute_json(harness: &mut ExplorerHarness, json: &str) -> Result<CommandResponse, String> {
    let cmd: ExplorerCommand =
        serde_json::from_str(json).map_err(|e| format!("Invalid command JSON: {e}"))?;
    Ok(execute_command(harness, cmd))
}

/// Parse and execute multiple JSON commands (array).
pub fn execute_json_batch(
    harness: &mut ExplorerHarness,
    json: &str,
) -> Result<Vec<CommandResponse>, String> {
    let cmds: Vec<ExplorerCommand> =
        serde_json::from_str(json).map_err(|e| format!("Invalid commands JSON: {e}"))?;
    Ok(cmds
        .into_iter()
        .map(|cmd| execute_command(harness, cmd))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_serde_click() {
        let json = r#"{"command": "click", "part": "chuck"}"#;
        let cmd: ExplorerCommand = serde_json::from_str(json).unwrap();
        match cmd {
            ExplorerCommand::Click { part } => assert_eq!(part, "chuck"),
            _ => panic!("Expected Click"),
        }
    }

    #[test]
    fn test_command_serde_orbit() {
        let json = r#"{"command": "orbit", "dx": 10.0, "dy": -5.0}"#;
        let cmd: ExplorerCommand = serde_json::from_str(json).unwrap();
        assert!(matches!(cmd, ExplorerCommand::Orbit { dx, dy } if dx == 10.0 && dy == -5.0));
    }

    #[test]
    fn test_execute_click_then_inspect() {
        let mut h = ExplorerHarness::new();
        let resp = execute_json(&mut h, r#"{"command": "click", "part": "carriage"}"#).unwrap();
        assert!(resp.success);
        assert_eq!(resp.data.unwrap()["changed"], true);

        let data = execute_json(&mut h, r#"{"command": "inspect"}"#)
            .unwrap()
            .data
            .unwrap();
        assert_eq!(data["selected"], "carriage");
        assert_eq!(data["overlay"]["title"], "Carriage");
        assert!(data["hovered"].is_null());
    }

    #[test]
    fn test_unknown_part_is_noop_success() {
        let mut h = ExplorerHarness::new();
        let resp =
            execute_json(&mut h, r#"{"command": "pointer_enter", "part": "workpiece"}"#).unwrap();
        assert!(resp.success);
        assert_eq!(resp.data.unwrap()["changed"], false);
    }

    #[test]
    fn test_describe_scene_colors() {
        let mut h = ExplorerHarness::new();
        execute_json(&mut h, r#"{"command": "pointer_enter", "part": "toolpost"}"#).unwrap();
        let data = execute_json(&mut h, r#"{"command": "describe_scene"}"#)
            .unwrap()
            .data
            .unwrap();
        assert_eq!(data["mesh_count"], 7);
        let toolpost = data["meshes"]
            .as_array()
            .unwrap()
            .iter()
            .find(|m| m["part"] == "toolpost")
            .unwrap();
        assert_eq!(toolpost["color"], "#f87171");
        let workpiece = data["meshes"]
            .as_array()
            .unwrap()
            .iter()
            .find(|m| m["label"] == "workpiece")
            .unwrap();
        assert_eq!(workpiece["interactive"], false);
    }

    #[test]
    fn test_execute_invalid_json() {
        let mut h = ExplorerHarness::new();
        assert!(execute_json(&mut h, "not valid json").is_err());
        assert!(execute_json(&mut h, r#"{"command": "explode"}"#).is_err());
    }

    #[test]
    fn test_drag_follows_viewport_height() {
        let mut h = ExplorerHarness::new();
        let json = r#"[
            {"command": "resize", "width": 400.0, "height": 400.0},
            {"command": "drag", "dx": 100.0, "dy": 0.0}
        ]"#;
        let azimuth = h.session.camera.azimuth;
        let responses = execute_json_batch(&mut h, json).unwrap();
        assert!(responses.iter().all(|r| r.success));
        let turned = azimuth - h.session.camera.azimuth;
        assert!((turned - std::f32::consts::FRAC_PI_2).abs() < 1e-4);
        assert_eq!(h.viewport().height(), 400.0);
    }

    #[test]
    fn test_resize_rejects_degenerate_size() {
        let mut h = ExplorerHarness::new();
        let resp =
            execute_json(&mut h, r#"{"command": "resize", "width": 0.0, "height": 300.0}"#).unwrap();
        assert!(!resp.success);
        assert!(resp.error.unwrap().contains("Invalid viewport size"));
        assert_eq!(h.viewport().height(), 800.0);
    }
}
