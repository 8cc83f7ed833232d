//! 3D viewport panel with OpenGL rendering

mod gl_renderer;
pub use lathe_explorer_lib::viewport::{camera, mesh};
mod overlays;
mod renderer;

use std::sync::{Arc, Mutex};

use egui::Ui;
use shared::PartId;

use crate::build::{LightRig, SceneCache};
use crate::cursor;
use crate::state::{AppSettings, ExplorerSession, PointerMessage};
use camera::ArcBallCamera;
use gl_renderer::{DrawItem, GlRenderer};
use mesh::MeshData;

/// Scroll points → dolly fraction
const DOLLY_SPEED: f32 = 0.002;

/// The lathe viewport: camera input, hit-testing and rendering
pub struct ExplorerViewport {
    gl_renderer: Option<Arc<Mutex<GlRenderer>>>,
    cache: SceneCache,
    lights: LightRig,
}

impl ExplorerViewport {
    pub fn new() -> Self {
        Self {
            gl_renderer: None,
            cache: SceneCache::new(),
            lights: LightRig::studio(),
        }
    }

    /// Initialize GL renderer (must be called with a GL context)
    pub fn init_gl(&mut self, gl: &glow::Context) {
        match GlRenderer::new(gl) {
            Ok(renderer) => self.gl_renderer = Some(Arc::new(Mutex::new(renderer))),
            Err(e) => tracing::error!("GL renderer unavailable, using wireframe: {e}"),
        }
    }

    pub fn destroy_gl(&mut self, gl: &glow::Context) {
        if let Some(renderer) = self.gl_renderer.take() {
            if let Ok(mut r) = renderer.lock() {
                r.destroy(gl);
            }
        }
    }

    /// Called when a new session is mounted
    pub fn reset(&mut self) {
        self.cache.invalidate();
    }

    pub fn show(&mut self, ui: &mut Ui, session: &mut ExplorerSession, settings: &AppSettings) {
        let (rect, response) = ui.allocate_exact_size(
            ui.available_size(),
            egui::Sense::click_and_drag(),
        );

        // ── Camera controls ─────────────────────────────
        self.handle_camera(&response, ui, &mut session.camera);

        self.cache
            .rebuild_if_needed(session.table(), session.interaction());

        // ── Hover and click ─────────────────────────────
        self.handle_pointer(&response, rect, session);

        self.cache
            .rebuild_if_needed(session.table(), session.interaction());

        if response.hovered() {
            ui.ctx().set_cursor_icon(cursor::affordance().icon());
        }

        if !ui.is_rect_visible(rect) {
            return;
        }

        // ── Rendering ───────────────────────────────────
        self.render(ui, rect, &session.camera, settings);

        // ── Overlays ────────────────────────────────────
        let painter = ui.painter_at(rect);
        overlays::draw_hint(&painter, rect);
        if settings.viewport.show_camera_info {
            overlays::draw_camera_info(&painter, rect, &session.camera);
        }
    }

    fn handle_camera(&self, response: &egui::Response, ui: &Ui, camera: &mut ArcBallCamera) {
        if response.dragged_by(egui::PointerButton::Primary) {
            let delta = response.drag_delta();
            camera.drag(delta.x, delta.y, response.rect.height());
        }

        if response.dragged_by(egui::PointerButton::Secondary)
            || response.dragged_by(egui::PointerButton::Middle)
        {
            let delta = response.drag_delta();
            camera.pan(delta.x, delta.y);
        }

        if response.hovered() {
            let scroll = ui.input(|i| i.smooth_scroll_delta.y);
            if scroll.abs() > 0.1 {
                camera.dolly(scroll * DOLLY_SPEED);
            }
        }
    }

    /// The part under the pointer becomes the hovered part. A pointer outside
    /// the viewport, or over a window on top of it, hovers nothing.
    fn handle_pointer(
        &self,
        response: &egui::Response,
        rect: egui::Rect,
        session: &mut ExplorerSession,
    ) {
        let camera = session.camera;
        let target: Option<PartId> = response
            .hover_pos()
            .and_then(|pos| self.cache.pick(&camera.screen_ray(pos, rect)).cloned());
        session.pointer_over(target.as_deref());

        if response.clicked_by(egui::PointerButton::Primary) {
            let hit = response
                .interact_pointer_pos()
                .and_then(|pos| self.cache.pick(&camera.screen_ray(pos, rect)).cloned());
            // Clicks on empty space leave the selection alone
            if let Some(id) = hit {
                session.dispatch(PointerMessage::Click(id));
            }
        }
    }

    fn render(&self, ui: &mut Ui, rect: egui::Rect, camera: &ArcBallCamera, settings: &AppSettings) {
        let Some(gl_renderer) = &self.gl_renderer else {
            // Fallback: software wireframe rendering
            renderer::paint_viewport(
                ui,
                rect,
                camera,
                self.cache.meshes(),
                self.cache.geometry(),
                settings.background_color(),
            );
            return;
        };

        // Geometry only crosses into the callback when the GPU copy is stale
        let generation = self.cache.geometry_generation();
        let stale = gl_renderer
            .lock()
            .map(|r| r.uploaded_generation() != Some(generation))
            .unwrap_or(true);
        let upload: Option<Vec<MeshData>> = stale.then(|| self.cache.geometry().to_vec());

        let items: Vec<DrawItem> = self
            .cache
            .meshes()
            .iter()
            .enumerate()
            .map(|(i, m)| DrawItem::from_mesh(i, m))
            .collect();

        let renderer_clone = gl_renderer.clone();
        let camera = *camera;
        let lights = self.lights;
        let bg_color = settings.viewport.background_color;

        let callback = egui::PaintCallback {
            rect,
            callback: Arc::new(egui_glow::CallbackFn::new(move |info, painter| {
                let gl = painter.gl();

                let clip = info.clip_rect_in_pixels();
                let viewport = [
                    clip.left_px as f32,
                    clip.from_bottom_px as f32,
                    clip.width_px as f32,
                    clip.height_px as f32,
                ];

                if let Ok(mut r) = renderer_clone.lock() {
                    if let Some(geometry) = upload.as_deref() {
                        r.upload_geometry(gl, geometry, generation);
                    }
                    let params = gl_renderer::RenderParams { viewport, bg_color };
                    r.paint(gl, &camera, &lights, &items, &params);
                }
            })),
        };

        ui.painter().add(callback);
    }
}
