//! Viewport overlay drawing (usage hint, camera readout)

use egui::Painter;

use crate::i18n::t;

use super::camera::ArcBallCamera;

/// Usage hint in a pill centered along the bottom edge
pub fn draw_hint(painter: &Painter, rect: egui::Rect) {
    let galley = painter.layout_no_wrap(
        t("lathe.hint").to_string(),
        egui::FontId::proportional(12.0),
        egui::Color32::from_rgb(0x9c, 0xa3, 0xaf),
    );
    let pill = egui::Rect::from_center_size(
        egui::pos2(rect.center().x, rect.bottom() - 32.0 - galley.size().y * 0.5),
        galley.size() + egui::vec2(48.0, 16.0),
    );
    painter.rect(
        pill,
        pill.height() * 0.5,
        egui::Color32::from_black_alpha(128),
        egui::Stroke::new(1.0, egui::Color32::from_white_alpha(26)),
        egui::StrokeKind::Inside,
    );
    painter.galley(pill.center() - galley.size() * 0.5, galley, egui::Color32::PLACEHOLDER);
}

/// Camera pose in the top-right corner
pub fn draw_camera_info(painter: &Painter, rect: egui::Rect, camera: &ArcBallCamera) {
    let overlay_rect = egui::Rect::from_min_size(
        egui::pos2(rect.right() - 170.0, rect.top() + 4.0),
        egui::vec2(166.0, 50.0),
    );
    painter.rect_filled(
        overlay_rect,
        4.0,
        egui::Color32::from_rgba_premultiplied(0, 0, 0, 140),
    );
    painter.text(
        overlay_rect.min + egui::vec2(6.0, 4.0),
        egui::Align2::LEFT_TOP,
        format!(
            "{}: {:.1}\n{}: {:.0}°\n{}: {:.0}°",
            t("camera.distance"),
            camera.distance,
            t("camera.azimuth"),
            camera.azimuth.to_degrees(),
            t("camera.polar"),
            camera.polar.to_degrees(),
        ),
        egui::FontId::monospace(10.0),
        egui::Color32::from_rgb(160, 160, 170),
    );
}
