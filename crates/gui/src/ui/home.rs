use egui::{RichText, Ui};

use crate::i18n::t;
use crate::state::Route;

/// Landing page. Returns the route the user picked, if any.
pub fn show(ui: &mut Ui) -> Option<Route> {
    let mut next = None;
    ui.vertical_centered(|ui| {
        ui.add_space(ui.available_height() * 0.3);
        ui.label(RichText::new(t("home.title")).size(32.0).strong());
        ui.add_space(8.0);
        ui.label(RichText::new(t("home.subtitle")).weak());
        ui.add_space(24.0);
        if ui.button(RichText::new(t("home.open")).size(18.0)).clicked() {
            next = Some(Route::Lathe);
        }
    });
    next
}
