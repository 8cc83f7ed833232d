//! Floating details card for the selected part

use egui::{Color32, RichText};

use crate::i18n::t;
use crate::state::{ExplorerSession, PointerMessage};

const TITLE_COLOR: Color32 = Color32::from_rgb(0x22, 0xd3, 0xee);
const BODY_COLOR: Color32 = Color32::from_rgb(0xd1, 0xd5, 0xdb);
const PANEL_WIDTH: f32 = 320.0;

/// Shown while a part is selected. The close button sends `Dismiss`.
pub fn show(ctx: &egui::Context, anchor: egui::Rect, session: &mut ExplorerSession) {
    let Some(content) = session.overlay_content() else {
        return;
    };
    let title = content.title.to_string();
    let description = content.description.to_string();
    let mut close = false;

    egui::Area::new(egui::Id::new("part_info_panel"))
        .order(egui::Order::Foreground)
        .fixed_pos(anchor.min + egui::vec2(32.0, 32.0))
        .show(ctx, |ui| {
            egui::Frame::new()
                .fill(Color32::from_black_alpha(153))
                .stroke(egui::Stroke::new(1.0, Color32::from_white_alpha(51)))
                .corner_radius(16)
                .inner_margin(egui::Margin::same(24))
                .show(ui, |ui| {
                    ui.set_width(PANEL_WIDTH - 48.0);
                    ui.horizontal(|ui| {
                        ui.label(RichText::new(&title).size(22.0).strong().color(TITLE_COLOR));
                        ui.with_layout(egui::Layout::right_to_left(egui::Align::Min), |ui| {
                            let button = egui::Button::new(RichText::new("✕").size(16.0)).frame(false);
                            if ui.add(button).on_hover_text(t("overlay.close")).clicked() {
                                close = true;
                            }
                        });
                    });
                    ui.add_space(8.0);
                    ui.label(RichText::new(&description).color(BODY_COLOR));
                });
        });

    if close {
        session.dispatch(PointerMessage::Dismiss);
    }
}
