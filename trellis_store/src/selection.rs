// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Selected-node bookkeeping.

use crate::model::NodeId;

/// The set of selected node ids plus a primary item and a revision counter.
///
/// The revision bumps only when the contents or the primary actually change,
/// so renderers and inspectors can cheaply tell whether to refresh.
///
/// Pointer input drives this with single-select semantics: a click replaces
/// the selection with one node ([`Selection::select_only`]).
#[derive(Clone, Debug, Default)]
pub struct Selection {
    items: Vec<NodeId>,
    primary: Option<usize>,
    revision: u64,
}

impl Selection {
    /// Creates an empty selection.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            items: Vec::new(),
            primary: None,
            revision: 0,
        }
    }

    /// Returns `true` if nothing is selected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of selected nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Selected ids. Order carries no meaning.
    #[must_use]
    pub fn items(&self) -> &[NodeId] {
        &self.items
    }

    /// Iterates over the selected ids.
    pub fn iter(&self) -> std::slice::Iter<'_, NodeId> {
        self.items.iter()
    }

    /// The most recently selected id, if any.
    #[must_use]
    pub fn primary(&self) -> Option<&NodeId> {
        self.primary.and_then(|idx| self.items.get(idx))
    }

    /// Counter bumped on every effective change.
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Returns `true` if `id` is selected.
    #[must_use]
    pub fn contains(&self, id: &NodeId) -> bool {
        self.items.contains(id)
    }

    /// Replaces the selection with exactly `id`.
    pub fn select_only(&mut self, id: NodeId) {
        if self.items.len() == 1 && self.items[0] == id {
            return;
        }
        self.items.clear();
        self.items.push(id);
        self.primary = Some(0);
        self.bump_revision();
    }

    /// Deselects everything.
    pub fn clear(&mut self) {
        if self.items.is_empty() {
            return;
        }
        self.items.clear();
        self.primary = None;
        self.bump_revision();
    }

    /// Deselects `id` if it is selected.
    pub fn remove(&mut self, id: &NodeId) {
        self.retain(|selected| selected != id);
    }

    /// Keeps only the ids for which `keep` returns `true`.
    pub fn retain(&mut self, mut keep: impl FnMut(&NodeId) -> bool) {
        let primary = self.primary().cloned();
        let before = self.items.len();
        self.items.retain(|id| keep(id));
        if self.items.len() == before {
            return;
        }
        self.primary = primary.and_then(|p| self.items.iter().position(|id| *id == p));
        self.bump_revision();
    }

    fn bump_revision(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }
}
