//! Mirrors the current selection into the 2D info panel

use shared::PartId;

use crate::parts::PartTable;

/// Panel visibility change produced by one sync
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OverlayChange {
    Unchanged,
    Shown(PartId),
    /// Contents swapped in place; the panel never hides in between
    Replaced { from: PartId, to: PartId },
    Hidden,
}

/// Text shown in the panel
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OverlayContent<'a> {
    pub title: &'a str,
    pub description: &'a str,
}

#[derive(Default)]
pub struct OverlaySync {
    shown: Option<PartId>,
}

impl OverlaySync {
    pub fn sync(&mut self, selected: Option<&PartId>) -> OverlayChange {
        let change = match (self.shown.as_ref(), selected) {
            (None, None) => OverlayChange::Unchanged,
            (Some(a), Some(b)) if a == b => OverlayChange::Unchanged,
            (None, Some(to)) => OverlayChange::Shown(to.clone()),
            (Some(from), Some(to)) => OverlayChange::Replaced {
                from: from.clone(),
                to: to.clone(),
            },
            (Some(_), None) => OverlayChange::Hidden,
        };
        if change != OverlayChange::Unchanged {
            tracing::debug!("overlay {change:?}");
            self.shown = selected.cloned();
        }
        change
    }

    pub fn is_visible(&self) -> bool {
        self.shown.is_some()
    }

    pub fn content<'a>(&self, table: &'a PartTable) -> Option<OverlayContent<'a>> {
        let part = table.get(self.shown.as_deref()?)?;
        Some(OverlayContent {
            title: &part.title,
            description: &part.description,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(s: &str) -> PartId {
        s.to_string()
    }

    #[test]
    fn test_initially_hidden() {
        let o = OverlaySync::default();
        assert!(!o.is_visible());
        assert!(o.content(&PartTable::lathe()).is_none());
    }

    #[test]
    fn test_show_replace_hide() {
        let mut o = OverlaySync::default();
        assert_eq!(o.sync(Some(&id("headstock"))), OverlayChange::Shown(id("headstock")));
        assert_eq!(
            o.sync(Some(&id("tailstock"))),
            OverlayChange::Replaced {
                from: id("headstock"),
                to: id("tailstock")
            }
        );
        assert!(o.is_visible());
        assert_eq!(o.sync(None), OverlayChange::Hidden);
        assert!(!o.is_visible());
    }

    #[test]
    fn test_repeated_sync_is_unchanged() {
        let mut o = OverlaySync::default();
        assert_eq!(o.sync(None), OverlayChange::Unchanged);
        o.sync(Some(&id("bed")));
        assert_eq!(o.sync(Some(&id("bed"))), OverlayChange::Unchanged);
    }

    #[test]
    fn test_content_comes_from_table() {
        let table = PartTable::lathe();
        let mut o = OverlaySync::default();
        o.sync(Some(&id("chuck")));
        let c = o.content(&table).unwrap();
        assert_eq!(c.title, "Chuck");
        assert!(c.description.starts_with("Clamps the workpiece"));
    }
}
