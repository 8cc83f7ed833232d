pub mod interaction;
pub mod overlay;
pub mod settings;

use shared::PartId;

pub use interaction::{HoverState, InteractionState, PointerMessage, Transition};
pub use overlay::{OverlayChange, OverlayContent, OverlaySync};
pub use settings::AppSettings;

use crate::cursor::{self, CursorAffordance};
use crate::parts::PartTable;
use crate::viewport::camera::ArcBallCamera;

/// One mounted explorer view: table, interaction state, overlay and camera.
///
/// Owns the process-wide cursor while alive. Mounting and dropping both
/// reset it to the default affordance.
pub struct ExplorerSession {
    table: PartTable,
    interaction: InteractionState,
    overlay: OverlaySync,
    pub camera: ArcBallCamera,
}

impl ExplorerSession {
    pub fn mount(table: PartTable) -> Self {
        cursor::set_affordance(CursorAffordance::Default);
        tracing::info!("explorer mounted with {} parts", table.len());
        Self {
            interaction: InteractionState::new(&table),
            table,
            overlay: OverlaySync::default(),
            camera: ArcBallCamera::new(),
        }
    }

    pub fn table(&self) -> &PartTable {
        &self.table
    }

    pub fn interaction(&self) -> &InteractionState {
        &self.interaction
    }

    pub fn overlay(&self) -> &OverlaySync {
        &self.overlay
    }

    pub fn overlay_content(&self) -> Option<OverlayContent<'_>> {
        self.overlay.content(&self.table)
    }

    pub fn hovered_id(&self) -> Option<&PartId> {
        self.interaction.hovered_id()
    }

    pub fn selected_id(&self) -> Option<&PartId> {
        self.interaction.selected_id()
    }

    /// Apply one message, then push its effects out: cursor flips and
    /// overlay sync happen in the same step as the state change.
    pub fn dispatch(&mut self, msg: PointerMessage) -> Transition {
        let transition = self.interaction.apply(&msg);
        if let Some(affordance) = transition.cursor {
            cursor::set_affordance(affordance);
        }
        if transition.selection_changed {
            self.overlay.sync(self.interaction.selected_id());
        }
        transition
    }

    pub fn dismiss(&mut self) -> Transition {
        self.dispatch(PointerMessage::Dismiss)
    }

    /// Turn "part now under the pointer" into leave/enter messages.
    /// Leave is delivered before enter on a crossing.
    pub fn pointer_over(&mut self, target: Option<&str>) -> Transition {
        let current = self.interaction.hovered_id().cloned();
        if current.as_deref() == target {
            return Transition::default();
        }

        let mut combined = Transition::default();
        if let Some(old) = current {
            combined = combined.then(self.dispatch(PointerMessage::Leave(old)));
        }
        if let Some(new) = target {
            combined = combined.then(self.dispatch(PointerMessage::Enter(new.to_string())));
        }
        combined
    }
}

impl Drop for ExplorerSession {
    fn drop(&mut self) {
        cursor::set_affordance(CursorAffordance::Default);
        tracing::info!("explorer unmounted");
    }
}

/// Top-level page
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Route {
    #[default]
    Home,
    Lathe,
}

/// Combined application state
pub struct AppState {
    route: Route,
    /// Present only while the lathe page is shown
    explorer: Option<ExplorerSession>,
    pub settings: AppSettings,
    /// Show settings window
    pub show_settings_window: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self::with_settings(AppSettings::load())
    }
}

impl AppState {
    pub fn with_settings(settings: AppSettings) -> Self {
        Self {
            route: Route::Home,
            explorer: None,
            settings,
            show_settings_window: false,
        }
    }

    pub fn route(&self) -> Route {
        self.route
    }

    /// Switch pages. Entering the lathe always mounts a fresh session.
    pub fn navigate(&mut self, route: Route) {
        if route == self.route {
            return;
        }
        tracing::debug!("navigate {:?} -> {route:?}", self.route);
        // Unmount before mount so the reset order on the cursor is unambiguous
        self.explorer = None;
        if route == Route::Lathe {
            self.explorer = Some(ExplorerSession::mount(PartTable::lathe()));
        }
        self.route = route;
    }

    pub fn explorer(&self) -> Option<&ExplorerSession> {
        self.explorer.as_ref()
    }

    pub fn explorer_mut(&mut self) -> Option<&mut ExplorerSession> {
        self.explorer.as_mut()
    }
}
