//! Main application module

mod keyboard;
mod menus;
mod styles;

use eframe::egui;

use crate::i18n;
use crate::state::{AppState, Route};
use crate::ui::{home, info_panel, status_bar};
use crate::viewport::ExplorerViewport;

/// Main application
pub struct ExplorerApp {
    state: AppState,
    viewport: ExplorerViewport,
    /// Last applied font size (to detect changes)
    last_font_size: f32,
}

impl ExplorerApp {
    pub fn new(cc: &eframe::CreationContext<'_>, initial_route: Route) -> Self {
        let mut state = AppState::default();
        i18n::set_lang(state.settings.language);
        tracing::info!("settings loaded (language {:?})", state.settings.language);

        // Apply initial styles with font size from settings
        styles::configure_styles(&cc.egui_ctx, state.settings.ui.font_size);

        let mut viewport = ExplorerViewport::new();

        // Initialize GL renderer if glow context is available
        if let Some(gl) = cc.gl.as_ref() {
            viewport.init_gl(gl);
        }

        let last_font_size = state.settings.ui.font_size;
        let mut app = Self {
            state,
            viewport,
            last_font_size,
        };
        app.navigate(initial_route);
        app
    }

    fn navigate(&mut self, route: Route) {
        if route == self.state.route() {
            return;
        }
        self.state.navigate(route);
        if route == Route::Lathe {
            self.viewport.reset();
        }
    }
}

impl eframe::App for ExplorerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Apply font size if changed
        if self.state.settings.ui.font_size != self.last_font_size {
            styles::apply_font_size(ctx, self.state.settings.ui.font_size);
            self.last_font_size = self.state.settings.ui.font_size;
        }

        keyboard::handle_keyboard(ctx, &mut self.state);

        // ── Navigation bar ────────────────────────────────────
        let mut requested = None;
        egui::TopBottomPanel::top("nav_bar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                requested = menus::nav_bar(ui, &mut self.state);
            });
        });
        if let Some(route) = requested {
            self.navigate(route);
        }

        // ── Settings window ──────────────────────────────────
        menus::settings_window(ctx, &mut self.state);

        // ── Status bar ───────────────────────────────────────
        egui::TopBottomPanel::bottom("status_bar")
            .exact_height(22.0)
            .frame(
                egui::Frame::side_top_panel(&ctx.style()).inner_margin(egui::Margin::symmetric(8, 2)),
            )
            .show(ctx, |ui| {
                status_bar::show(ui, &self.state);
            });

        // ── Central panel: home page or 3D viewport ──────────
        let mut requested = None;
        egui::CentralPanel::default()
            .frame(egui::Frame::NONE.fill(self.state.settings.background_color()))
            .show(ctx, |ui| match self.state.route() {
                Route::Home => requested = home::show(ui),
                Route::Lathe => {
                    let settings = self.state.settings.clone();
                    if let Some(session) = self.state.explorer_mut() {
                        let anchor = ui.max_rect();
                        info_panel::show(ctx, anchor, session);
                        self.viewport.show(ui, session, &settings);
                    }
                }
            });
        if let Some(route) = requested {
            self.navigate(route);
        }
    }

    fn on_exit(&mut self, gl: Option<&glow::Context>) {
        // Unmount resets the cursor
        self.state.navigate(Route::Home);
        if let Some(gl) = gl {
            self.viewport.destroy_gl(gl);
        }
    }
}
