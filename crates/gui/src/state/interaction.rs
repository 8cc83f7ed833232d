//! Pointer interaction state machine.
//!
//! Every pointer event is a discrete [`PointerMessage`] fed through
//! [`InteractionState::apply`]. Per-part hover is `Idle`/`Hovered`; selection
//! is an orthogonal single value. Malformed input (unknown ids, leave without
//! enter, duplicate events) is absorbed without touching state.

use std::collections::HashMap;

use shared::{PartDescriptor, PartId};

use crate::cursor::CursorAffordance;
use crate::parts::PartTable;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum HoverState {
    #[default]
    Idle,
    Hovered,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PointerMessage {
    /// Pointer entered the part's hit region
    Enter(PartId),
    /// Pointer left the part's hit region
    Leave(PartId),
    Click(PartId),
    /// Overlay close control
    Dismiss,
}

/// What a message changed
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Transition {
    pub hover_changed: bool,
    pub selection_changed: bool,
    /// Set only when the "any part hovered" flag flips
    pub cursor: Option<CursorAffordance>,
}

impl Transition {
    pub fn is_noop(&self) -> bool {
        !self.hover_changed && !self.selection_changed
    }

    /// Fold a later transition into this one; the later cursor flip wins
    pub fn then(self, next: Transition) -> Transition {
        Transition {
            hover_changed: self.hover_changed || next.hover_changed,
            selection_changed: self.selection_changed || next.selection_changed,
            cursor: next.cursor.or(self.cursor),
        }
    }
}

/// Session-scoped interaction state, keyed by part id
pub struct InteractionState {
    hover: HashMap<PartId, HoverState>,
    selected: Option<PartId>,
    /// Bumped on every effective change (render cache invalidation)
    version: u64,
}

impl InteractionState {
    /// Every part in the table starts `Idle`; nothing selected
    pub fn new(table: &PartTable) -> Self {
        Self {
            hover: table
                .iter()
                .map(|p| (p.id.clone(), HoverState::Idle))
                .collect(),
            selected: None,
            version: 0,
        }
    }

    /// Hover state of a part, `None` for ids outside the table
    pub fn hover_state(&self, id: &str) -> Option<HoverState> {
        self.hover.get(id).copied()
    }

    pub fn hovered_id(&self) -> Option<&PartId> {
        self.hover
            .iter()
            .find(|(_, s)| **s == HoverState::Hovered)
            .map(|(id, _)| id)
    }

    pub fn hovered_count(&self) -> usize {
        self.hover
            .values()
            .filter(|s| **s == HoverState::Hovered)
            .count()
    }

    pub fn selected_id(&self) -> Option<&PartId> {
        self.selected.as_ref()
    }

    pub fn selected_part<'a>(&self, table: &'a PartTable) -> Option<&'a PartDescriptor> {
        self.selected.as_deref().and_then(|id| table.get(id))
    }

    /// Hover and selection share one highlight
    pub fn is_highlighted(&self, id: &str) -> bool {
        self.hover_state(id) == Some(HoverState::Hovered) || self.selected.as_deref() == Some(id)
    }

    pub fn cursor_affordance(&self) -> CursorAffordance {
        if self.hovered_id().is_some() {
            CursorAffordance::Interactive
        } else {
            CursorAffordance::Default
        }
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    /// Transition function
    pub fn apply(&mut self, msg: &PointerMessage) -> Transition {
        let transition = match msg {
            PointerMessage::Enter(id) => self.enter(id),
            PointerMessage::Leave(id) => self.leave(id),
            PointerMessage::Click(id) => self.click(id),
            PointerMessage::Dismiss => self.dismiss(),
        };
        if !transition.is_noop() {
            self.version += 1;
        }
        transition
    }

    fn enter(&mut self, id: &str) -> Transition {
        match self.hover.get(id) {
            None => {
                tracing::debug!("enter on unknown part '{id}' ignored");
                return Transition::default();
            }
            Some(HoverState::Hovered) => return Transition::default(),
            Some(HoverState::Idle) => {}
        }

        // A crossing without a delivered leave: the stale hover goes first
        let was_hovering = self.hovered_id().is_some();
        for (other, state) in self.hover.iter_mut() {
            if *state == HoverState::Hovered {
                tracing::debug!("stale hover on '{other}' cleared by enter on '{id}'");
                *state = HoverState::Idle;
            }
        }

        self.hover.insert(id.to_string(), HoverState::Hovered);
        Transition {
            hover_changed: true,
            selection_changed: false,
            cursor: (!was_hovering).then_some(CursorAffordance::Interactive),
        }
    }

    fn leave(&mut self, id: &str) -> Transition {
        match self.hover.get_mut(id) {
            Some(state) if *state == HoverState::Hovered => *state = HoverState::Idle,
            Some(_) => {
                tracing::debug!("leave on idle part '{id}' ignored");
                return Transition::default();
            }
            None => {
                tracing::debug!("leave on unknown part '{id}' ignored");
                return Transition::default();
            }
        }

        let still_hovering = self.hovered_id().is_some();
        Transition {
            hover_changed: true,
            selection_changed: false,
            cursor: (!still_hovering).then_some(CursorAffordance::Default),
        }
    }

    fn click(&mut self, id: &str) -> Transition {
        if !self.hover.contains_key(id) {
            tracing::debug!("click on unknown part '{id}' ignored");
            return Transition::default();
        }
        if self.selected.as_deref() == Some(id) {
            return Transition::default();
        }
        tracing::debug!("selected '{id}'");
        self.selected = Some(id.to_string());
        Transition {
            selection_changed: true,
            ..Transition::default()
        }
    }

    fn dismiss(&mut self) -> Transition {
        if self.selected.take().is_none() {
            return Transition::default();
        }
        tracing::debug!("selection dismissed");
        Transition {
            selection_changed: true,
            ..Transition::default()
        }
    }
}
