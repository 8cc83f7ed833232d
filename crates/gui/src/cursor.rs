//! Process-wide pointer affordance.
//!
//! The rendering surface owns a single cursor; the explorer flips it only at
//! hover transitions and resets it on mount and unmount.

use std::sync::atomic::{AtomicU8, Ordering};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum CursorAffordance {
    #[default]
    Default,
    /// Something under the pointer reacts to clicks
    Interactive,
}

impl CursorAffordance {
    pub fn icon(self) -> egui::CursorIcon {
        match self {
            CursorAffordance::Default => egui::CursorIcon::Default,
            CursorAffordance::Interactive => egui::CursorIcon::PointingHand,
        }
    }
}

static CURRENT_AFFORDANCE: AtomicU8 = AtomicU8::new(0); // 0=Default

pub fn affordance() -> CursorAffordance {
    match CURRENT_AFFORDANCE.load(Ordering::Relaxed) {
        1 => CursorAffordance::Interactive,
        _ => CursorAffordance::Default,
    }
}

pub fn set_affordance(a: CursorAffordance) {
    let prev = CURRENT_AFFORDANCE.swap(
        match a {
            CursorAffordance::Default => 0,
            CursorAffordance::Interactive => 1,
        },
        Ordering::Relaxed,
    );
    if prev != a as u8 {
        tracing::debug!("cursor affordance -> {a:?}");
    }
}
