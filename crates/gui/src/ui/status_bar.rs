use egui::Ui;

use crate::i18n::t;
use crate::state::{AppState, Route};

pub fn show(ui: &mut Ui, state: &AppState) {
    ui.horizontal(|ui| {
        match (state.route(), state.explorer()) {
            (Route::Lathe, Some(session)) => {
                ui.weak(format!("{}: {}", t("status.parts"), session.table().len()));
                ui.separator();

                let title_of = |id: Option<&String>| {
                    id.and_then(|id| session.table().get(id))
                        .map(|p| p.title.as_str())
                        .unwrap_or(t("status.none"))
                };
                ui.label(format!("{}: {}", t("status.hovered"), title_of(session.hovered_id())));
                ui.separator();
                let selected = session
                    .interaction()
                    .selected_part(session.table())
                    .map(|p| p.title.as_str())
                    .unwrap_or(t("status.none"));
                ui.label(format!("{}: {}", t("status.selected"), selected));
            }
            _ => {
                ui.weak(t("status.ready"));
            }
        }

        // Right-aligned version
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            ui.weak(concat!("lathe-explorer v", env!("CARGO_PKG_VERSION")));
        });
    });
}
