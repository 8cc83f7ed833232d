//! Navigation bar and settings window

use eframe::egui;

use crate::i18n::{set_lang, t, Lang};
use crate::state::settings::AppSettings;
use crate::state::{AppState, Route};

/// Show the navigation bar. Returns the route the user picked, if any.
pub fn nav_bar(ui: &mut egui::Ui, state: &mut AppState) -> Option<Route> {
    let mut next = None;
    let current = state.route();

    if ui.selectable_label(current == Route::Home, t("nav.home")).clicked() {
        next = Some(Route::Home);
    }
    if ui.selectable_label(current == Route::Lathe, t("nav.lathe")).clicked() {
        next = Some(Route::Lathe);
    }

    ui.separator();
    settings_menu(ui, state);
    next
}

/// Show the settings menu
fn settings_menu(ui: &mut egui::Ui, state: &mut AppState) {
    ui.menu_button(t("nav.settings"), |ui| {
        if ui.button(t("settings.title")).clicked() {
            state.show_settings_window = true;
            ui.close_menu();
        }
        ui.menu_button(t("nav.language"), |ui| {
            for &lang in Lang::all() {
                if ui
                    .selectable_label(state.settings.language == lang, lang.display_name())
                    .clicked()
                {
                    apply_language(&mut state.settings, lang);
                    state.settings.save();
                    ui.close_menu();
                }
            }
        });
        ui.separator();
        if ui.button(t("nav.quit")).clicked() {
            ui.ctx().send_viewport_cmd(egui::ViewportCommand::Close);
        }
    });
}

fn apply_language(settings: &mut AppSettings, lang: Lang) {
    settings.language = lang;
    set_lang(lang);
}

/// Show the settings window. Changes are saved as they are made.
pub fn settings_window(ctx: &egui::Context, state: &mut AppState) {
    let mut open = state.show_settings_window;
    let before = state.settings.clone();

    egui::Window::new(t("settings.title"))
        .open(&mut open)
        .resizable(false)
        .default_width(320.0)
        .show(ctx, |ui| {
            show_viewport_settings(ui, &mut state.settings);
            show_ui_settings(ui, &mut state.settings);
            show_settings_buttons(ui, state);
        });
    state.show_settings_window &= open;

    if state.settings != before {
        if state.settings.language != before.language {
            set_lang(state.settings.language);
        }
        state.settings.save();
    }
}

fn show_viewport_settings(ui: &mut egui::Ui, settings: &mut AppSettings) {
    ui.heading(t("settings.viewport"));
    ui.horizontal(|ui| {
        ui.label(t("settings.background"));
        let mut color = settings.background_color();
        if ui.color_edit_button_srgba(&mut color).changed() {
            settings.viewport.background_color = [color.r(), color.g(), color.b()];
        }
    });
    ui.checkbox(&mut settings.viewport.show_camera_info, t("settings.camera_info"));
    ui.add_space(10.0);
}

fn show_ui_settings(ui: &mut egui::Ui, settings: &mut AppSettings) {
    ui.heading(t("settings.interface"));
    ui.horizontal(|ui| {
        ui.label(t("settings.font_size"));
        ui.add(
            egui::DragValue::new(&mut settings.ui.font_size)
                .speed(0.5)
                .range(8.0..=24.0)
                .suffix(" pt"),
        );
    });
    ui.horizontal(|ui| {
        ui.label(t("settings.language"));
        egui::ComboBox::from_id_salt("language_combo")
            .selected_text(settings.language.display_name())
            .show_ui(ui, |ui| {
                for &lang in Lang::all() {
                    ui.selectable_value(&mut settings.language, lang, lang.display_name());
                }
            });
    });
    ui.add_space(10.0);
}

fn show_settings_buttons(ui: &mut egui::Ui, state: &mut AppState) {
    ui.separator();
    ui.horizontal(|ui| {
        if ui.button(t("settings.reset")).clicked() {
            state.settings = AppSettings::default();
        }
        if ui.button(t("settings.close")).clicked() {
            state.show_settings_window = false;
        }
    });
}
