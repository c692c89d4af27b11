//! Row selection for one entity tab
//!
//! Invariants:
//! - the selection is always a subset of the visible (currently loaded) rows
//! - the protected id (the signed-in user on the Users tab) is never selected
//!
//! "Select all" means all loaded rows, not all rows on the server.

use std::collections::BTreeSet;

/// Result of toggling a single row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toggle {
    Selected,
    Deselected,
    /// The id is protected; the caller should tell the operator why nothing happened.
    Protected,
    /// The id is not among the loaded rows
    NotVisible,
}

#[derive(Debug, Clone, Default)]
pub struct SelectionModel {
    selected: BTreeSet<i64>,
    visible: BTreeSet<i64>,
    protected: Option<i64>,
}

impl SelectionModel {
    pub fn new(protected: Option<i64>) -> Self {
        Self {
            protected,
            ..Self::default()
        }
    }

    pub fn protected(&self) -> Option<i64> {
        self.protected
    }

    pub fn is_protected(&self, id: i64) -> bool {
        self.protected == Some(id)
    }

    /// Replace the visible rows. Clears the selection.
    pub fn set_visible(&mut self, ids: impl IntoIterator<Item = i64>) {
        self.visible = ids.into_iter().collect();
        self.selected.clear();
    }

    /// Shrink the visible rows (e.g. after deletes), keeping the rest selected.
    pub fn retain_visible(&mut self, ids: impl IntoIterator<Item = i64>) {
        self.visible = ids.into_iter().collect();
        let visible = &self.visible;
        self.selected.retain(|id| visible.contains(id));
    }

    pub fn toggle_one(&mut self, id: i64) -> Toggle {
        if self.is_protected(id) {
            return Toggle::Protected;
        }
        if !self.visible.contains(&id) {
            return Toggle::NotVisible;
        }
        if self.selected.remove(&id) {
            Toggle::Deselected
        } else {
            self.selected.insert(id);
            Toggle::Selected
        }
    }

    /// Clear when every eligible row is selected, otherwise select them all.
    pub fn toggle_all(&mut self) {
        if self.all_checked() {
            self.selected.clear();
        } else {
            self.selected = self.eligible().collect();
        }
    }

    pub fn clear(&mut self) {
        self.selected.clear();
    }

    /// Replace the selection with `ids`, dropping anything not eligible.
    pub fn reseed(&mut self, ids: impl IntoIterator<Item = i64>) {
        let eligible: BTreeSet<i64> = self.eligible().collect();
        self.selected = ids.into_iter().filter(|id| eligible.contains(id)).collect();
    }

    /// Visible rows minus the protected one
    fn eligible(&self) -> impl Iterator<Item = i64> + '_ {
        self.visible
            .iter()
            .copied()
            .filter(move |id| Some(*id) != self.protected)
    }

    fn eligible_count(&self) -> usize {
        self.eligible().count()
    }

    /// Header checkbox fully checked
    pub fn all_checked(&self) -> bool {
        let eligible = self.eligible_count();
        eligible > 0 && self.selected.len() == eligible
    }

    /// Header checkbox indeterminate
    pub fn partially_checked(&self) -> bool {
        !self.selected.is_empty() && !self.all_checked()
    }

    pub fn contains(&self, id: i64) -> bool {
        self.selected.contains(&id)
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    /// Selected ids in ascending order
    pub fn ids(&self) -> Vec<i64> {
        self.selected.iter().copied().collect()
    }
}
