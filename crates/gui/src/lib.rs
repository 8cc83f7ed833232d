// Library crate: exposes the explorer core for integration tests and the JSON command interface.
// Window-specific modules (app, ui, GL renderer, viewport panel) remain in the binary crate.

pub mod build;
pub mod command;
pub mod cursor;
pub mod harness;
pub mod i18n;
pub mod parts;
pub mod state;
pub mod validation;

/// Viewport types that don't need a GL context: geometry, picking and the orbit camera.
pub mod viewport {
    pub mod camera;
    pub mod mesh;
    pub mod picking;
}
