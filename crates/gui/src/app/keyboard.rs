//! Keyboard shortcut handling

use eframe::egui;

use crate::state::{AppState, PointerMessage};

/// Handle keyboard shortcuts for the application
pub fn handle_keyboard(ctx: &egui::Context, state: &mut AppState) {
    // Don't handle shortcuts when a text field is focused
    if ctx.memory(|m| m.focused().is_some()) {
        return;
    }

    // Escape: same as the info panel close button
    if ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
        if let Some(session) = state.explorer_mut() {
            session.dispatch(PointerMessage::Dismiss);
        }
    }
}
