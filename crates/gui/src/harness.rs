//! Headless harness: a mounted explorer session with its render cache and a
//! virtual viewport, driven without a window.

use glam::Vec3;
use shared::{PartId, Rgb};

use crate::build::{RenderableMesh, SceneCache};
use crate::parts::PartTable;
use crate::state::{ExplorerSession, OverlayContent, PointerMessage, Transition};
use crate::validation::MeshValidator;
use crate::viewport::picking::Aabb;

/// Viewport size used when none is given
pub const DEFAULT_VIEWPORT: [f32; 2] = [1280.0, 800.0];

pub struct ExplorerHarness {
    pub session: ExplorerSession,
    cache: SceneCache,
    viewport: egui::Rect,
}

impl ExplorerHarness {
    /// Mount the lathe
    pub fn new() -> Self {
        Self::with_table(PartTable::lathe())
    }

    pub fn with_table(table: PartTable) -> Self {
        let session = ExplorerSession::mount(table);
        let mut cache = SceneCache::new();
        cache.rebuild(session.table(), session.interaction());
        Self {
            session,
            cache,
            viewport: egui::Rect::from_min_size(egui::Pos2::ZERO, DEFAULT_VIEWPORT.into()),
        }
    }

    pub fn set_viewport_size(&mut self, width: f32, height: f32) {
        self.viewport = egui::Rect::from_min_size(egui::Pos2::ZERO, egui::vec2(width, height));
    }

    pub fn viewport(&self) -> egui::Rect {
        self.viewport
    }

    // ── Pointer messages ──────────────────────────────────────

    pub fn send(&mut self, msg: PointerMessage) -> Transition {
        let t = self.session.dispatch(msg);
        self.refresh();
        t
    }

    pub fn hover(&mut self, id: &str) -> Transition {
        self.send(PointerMessage::Enter(id.to_string()))
    }

    pub fn leave(&mut self, id: &str) -> Transition {
        self.send(PointerMessage::Leave(id.to_string()))
    }

    pub fn click(&mut self, id: &str) -> Transition {
        self.send(PointerMessage::Click(id.to_string()))
    }

    pub fn dismiss(&mut self) -> Transition {
        self.send(PointerMessage::Dismiss)
    }

    // ── Screen-space pointer ──────────────────────────────────

    /// Part under a screen position, without changing any state
    pub fn pick_at(&self, pos: egui::Pos2) -> Option<PartId> {
        let ray = self.session.camera.screen_ray(pos, self.viewport);
        self.cache.pick(&ray).cloned()
    }

    /// Move the pointer to a screen position, emitting leave/enter as needed
    pub fn move_pointer(&mut self, pos: egui::Pos2) -> Option<PartId> {
        let hit = self.pick_at(pos);
        self.session.pointer_over(hit.as_deref());
        self.refresh();
        hit
    }

    /// Pointer left the viewport
    pub fn pointer_exit(&mut self) {
        self.session.pointer_over(None);
        self.refresh();
    }

    /// Click at a screen position. Empty space does nothing.
    pub fn click_at(&mut self, pos: egui::Pos2) -> Option<PartId> {
        let hit = self.pick_at(pos)?;
        self.click(&hit);
        Some(hit)
    }

    /// Screen position of a part's bounding-box center
    pub fn screen_pos_of(&self, id: &str) -> Option<egui::Pos2> {
        let index = self
            .cache
            .meshes()
            .iter()
            .position(|m| m.part_id.as_deref() == Some(id))?;
        let world = self.cache.meshes()[index].world;
        let local_center = Aabb::from_mesh(&self.cache.geometry()[index]).center();
        let center: Vec3 = world.transform_point3(local_center);
        self.session.camera.project(center, self.viewport)
    }

    // ── Camera ────────────────────────────────────────────────

    pub fn orbit(&mut self, dx: f32, dy: f32) {
        self.session.camera.rotate(dx, dy);
    }

    /// Pointer drag in pixels, scaled by the virtual viewport height
    pub fn drag(&mut self, dx: f32, dy: f32) {
        let height = self.viewport.height();
        self.session.camera.drag(dx, dy, height);
    }

    pub fn dolly(&mut self, delta: f32) {
        self.session.camera.dolly(delta);
    }

    pub fn pan(&mut self, dx: f32, dy: f32) {
        self.session.camera.pan(dx, dy);
    }

    // ── Inspection ────────────────────────────────────────────

    pub fn scene(&self) -> &[RenderableMesh] {
        self.cache.meshes()
    }

    /// Resolved color of an interactive part
    pub fn color_of(&self, id: &str) -> Option<Rgb> {
        self.scene()
            .iter()
            .find(|m| m.part_id.as_deref() == Some(id))
            .map(|m| m.color)
    }

    pub fn hovered(&self) -> Option<&str> {
        self.session.hovered_id().map(String::as_str)
    }

    pub fn selected(&self) -> Option<&str> {
        self.session.selected_id().map(String::as_str)
    }

    pub fn overlay(&self) -> Option<OverlayContent<'_>> {
        self.session.overlay_content()
    }

    pub fn rebuild_count(&self) -> u64 {
        self.cache.rebuild_count()
    }

    /// Validation errors for every generated mesh, prefixed by mesh label
    pub fn validate_meshes(&self) -> Vec<String> {
        self.cache
            .meshes()
            .iter()
            .zip(self.cache.geometry())
            .flat_map(|(m, g)| {
                MeshValidator::new(g)
                    .validate_all()
                    .into_iter()
                    .map(move |e| format!("{}: {e}", m.label))
            })
            .collect()
    }

    fn refresh(&mut self) {
        self.cache
            .rebuild_if_needed(self.session.table(), self.session.interaction());
    }
}

impl Default for ExplorerHarness {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BED_BASE: Rgb = [0x2a, 0x2a, 0x2a];
    const BED_HOVER: Rgb = [0x40, 0x40, 0x40];

    #[test]
    fn test_new_harness_is_idle() {
        let h = ExplorerHarness::new();
        assert_eq!(h.scene().len(), 7);
        assert!(h.hovered().is_none());
        assert!(h.selected().is_none());
        assert!(h.overlay().is_none());
        assert!(h.validate_meshes().is_empty());
    }

    #[test]
    fn test_hover_recolors() {
        let mut h = ExplorerHarness::new();
        h.hover("bed");
        assert_eq!(h.color_of("bed"), Some(BED_HOVER));
        h.leave("bed");
        assert_eq!(h.color_of("bed"), Some(BED_BASE));
    }

    #[test]
    fn test_noop_messages_do_not_rebuild() {
        let mut h = ExplorerHarness::new();
        let before = h.rebuild_count();
        h.leave("bed");
        h.click("spindle");
        h.dismiss();
        assert_eq!(h.rebuild_count(), before);
    }

    #[test]
    fn test_move_pointer_hits_visible_parts() {
        let mut h = ExplorerHarness::new();
        let pos = h.screen_pos_of("tailstock").unwrap();
        assert_eq!(h.move_pointer(pos).as_deref(), Some("tailstock"));
        assert_eq!(h.hovered(), Some("tailstock"));

        let pos = h.screen_pos_of("headstock").unwrap();
        assert_eq!(h.move_pointer(pos).as_deref(), Some("headstock"));
        assert_eq!(h.session.interaction().hovered_count(), 1);

        h.pointer_exit();
        assert!(h.hovered().is_none());
    }

    #[test]
    fn test_empty_space_click_keeps_selection() {
        let mut h = ExplorerHarness::new();
        h.click("chuck");
        assert!(h.click_at(egui::pos2(2.0, 2.0)).is_none());
        assert_eq!(h.selected(), Some("chuck"));
    }
}
