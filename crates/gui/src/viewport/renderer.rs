//! Wireframe rendering for the viewport, used when no GL context is available

use egui::{Color32, Rect, Stroke, Ui};

use super::camera::ArcBallCamera;
use super::mesh::MeshData;
use crate::build::RenderableMesh;

/// Paint every mesh as edges in its resolved color
pub fn paint_viewport(
    ui: &Ui,
    rect: Rect,
    camera: &ArcBallCamera,
    meshes: &[RenderableMesh],
    geometry: &[MeshData],
    background: Color32,
) {
    let painter = ui.painter_at(rect);
    painter.rect_filled(rect, 0.0, background);

    draw_floor(&painter, rect, camera);

    for (mesh, data) in meshes.iter().zip(geometry) {
        let [r, g, b] = mesh.color;
        let stroke = Stroke::new(1.0, Color32::from_rgb(r, g, b));
        draw_wireframe(&painter, rect, camera, mesh, data, stroke);
    }
}

fn draw_wireframe(
    painter: &egui::Painter,
    rect: Rect,
    camera: &ArcBallCamera,
    mesh: &RenderableMesh,
    data: &MeshData,
    stroke: Stroke,
) {
    for (a, b) in data.edges() {
        let wa = mesh.world.transform_point3(data.position(a));
        let wb = mesh.world.transform_point3(data.position(b));
        if let (Some(pa), Some(pb)) = (camera.project(wa, rect), camera.project(wb, rect)) {
            painter.line_segment([pa, pb], stroke);
        }
    }
}

/// Faint reference grid under the bed
fn draw_floor(painter: &egui::Painter, rect: Rect, camera: &ArcBallCamera) {
    let stroke = Stroke::new(0.5, Color32::from_rgba_premultiplied(50, 55, 65, 120));
    let y = -0.75;
    let extent = 5.0_f32;

    for i in -5..=5 {
        let f = i as f32;
        let lines = [
            (glam::Vec3::new(f, y, -extent), glam::Vec3::new(f, y, extent)),
            (glam::Vec3::new(-extent, y, f), glam::Vec3::new(extent, y, f)),
        ];
        for (a, b) in lines {
            if let (Some(pa), Some(pb)) = (camera.project(a, rect), camera.project(b, rect)) {
                painter.line_segment([pa, pb], stroke);
            }
        }
    }
}
