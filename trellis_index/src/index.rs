// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::vec::Vec;
use core::fmt::Debug;
use core::hash::Hash;

use hashbrown::HashMap;
use kurbo::{Point, Rect};

use crate::backend::Backend;
use crate::backends::quadtree::{QuadTree, QuadTreeConfig, QuadTreeDebugInfo};

/// Margin, in world units, added around a region by
/// [`SpatialIndex::visible_in_region`] unless configured otherwise.
pub const DEFAULT_VISIBLE_MARGIN: f64 = 50.0;

#[derive(Clone, Debug)]
struct Entry<K> {
    key: K,
    aabb: Rect,
    seq: u64,
}

/// Keyed AABB index over a slot-based [`Backend`].
///
/// The index owns only keys and cached AABBs; whatever the keys name lives
/// elsewhere. Slots freed by removal are recycled. Every entry carries an
/// insertion sequence number so hit-test ties resolve most-recent-first.
#[derive(Clone, Debug)]
pub struct SpatialIndex<K, B = QuadTree> {
    backend: B,
    slots: Vec<Option<Entry<K>>>,
    free: Vec<usize>,
    by_key: HashMap<K, usize>,
    next_seq: u64,
    visible_margin: f64,
}

impl<K: Clone + Eq + Hash> Default for SpatialIndex<K, QuadTree> {
    fn default() -> Self {
        Self::new(QuadTreeConfig::default())
    }
}

impl<K: Clone + Eq + Hash> SpatialIndex<K, QuadTree> {
    /// Creates an empty quadtree-backed index.
    #[must_use]
    pub fn new(config: QuadTreeConfig) -> Self {
        Self::with_backend(QuadTree::new(config))
    }

    /// Recursive tree shape plus item count, for diagnostics only.
    #[must_use]
    pub fn debug_info(&self) -> QuadTreeDebugInfo {
        self.backend.debug_info()
    }
}

impl<K: Clone + Eq + Hash, B: Backend> SpatialIndex<K, B> {
    /// Creates an empty index over the given backend.
    #[must_use]
    pub fn with_backend(backend: B) -> Self {
        Self {
            backend,
            slots: Vec::new(),
            free: Vec::new(),
            by_key: HashMap::new(),
            next_seq: 0,
            visible_margin: DEFAULT_VISIBLE_MARGIN,
        }
    }

    /// Sets the margin used by [`SpatialIndex::visible_in_region`].
    #[must_use]
    pub fn with_visible_margin(mut self, margin: f64) -> Self {
        self.set_visible_margin(margin);
        self
    }

    /// Sets the margin used by [`SpatialIndex::visible_in_region`].
    ///
    /// Negative or non-finite margins are treated as `0.0`.
    pub fn set_visible_margin(&mut self, margin: f64) {
        self.visible_margin = if margin.is_finite() { margin.max(0.0) } else { 0.0 };
    }

    /// Returns the margin used by [`SpatialIndex::visible_in_region`].
    #[must_use]
    pub fn visible_margin(&self) -> f64 {
        self.visible_margin
    }

    /// Number of indexed keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.by_key.len()
    }

    /// Returns `true` if nothing is indexed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_key.is_empty()
    }

    /// Returns `true` if `key` is indexed.
    #[must_use]
    pub fn contains(&self, key: &K) -> bool {
        self.by_key.contains_key(key)
    }

    /// Returns the cached AABB for `key`.
    #[must_use]
    pub fn get(&self, key: &K) -> Option<Rect> {
        let slot = *self.by_key.get(key)?;
        self.slots.get(slot)?.as_ref().map(|e| e.aabb)
    }

    /// Iterates over all indexed keys and their AABBs, in slot order.
    pub fn iter(&self) -> impl Iterator<Item = (&K, Rect)> + '_ {
        self.slots.iter().flatten().map(|e| (&e.key, e.aabb))
    }

    /// Indexes `key` with `aabb`.
    ///
    /// If `key` is already present this behaves like [`SpatialIndex::update`]
    /// and returns the previous AABB.
    ///
    /// A non-finite or inverted `aabb` is refused: nothing is recorded and an
    /// existing entry for `key` keeps its old box.
    pub fn insert(&mut self, key: K, aabb: Rect) -> Option<Rect> {
        if !is_valid_aabb(&aabb) {
            return None;
        }
        if let Some(&slot) = self.by_key.get(&key) {
            return self.update_slot(slot, aabb);
        }
        let slot = match self.free.pop() {
            Some(slot) => slot,
            None => {
                self.slots.push(None);
                self.slots.len() - 1
            }
        };
        let seq = self.next_seq;
        self.next_seq += 1;
        self.slots[slot] = Some(Entry {
            key: key.clone(),
            aabb,
            seq,
        });
        self.by_key.insert(key, slot);
        self.backend.insert(slot, aabb);
        None
    }

    /// Replaces the AABB of an indexed key. Returns `false` if `key` is absent
    /// or `aabb` is non-finite or inverted; the entry is then left as it was.
    ///
    /// The entry keeps its original insertion order for hit-test tie-breaks.
    pub fn update(&mut self, key: &K, aabb: Rect) -> bool {
        if !is_valid_aabb(&aabb) {
            return false;
        }
        match self.by_key.get(key) {
            Some(&slot) => self.update_slot(slot, aabb).is_some(),
            None => false,
        }
    }

    /// Removes `key`, returning its last AABB.
    pub fn remove(&mut self, key: &K) -> Option<Rect> {
        let slot = self.by_key.remove(key)?;
        let entry = self.slots.get_mut(slot)?.take()?;
        self.backend.remove(slot);
        self.free.push(slot);
        Some(entry.aabb)
    }

    /// Removes everything.
    pub fn clear(&mut self) {
        self.backend.clear();
        self.slots.clear();
        self.free.clear();
        self.by_key.clear();
    }

    /// Keys whose AABB intersects `rect` (edges included), in slot order.
    #[must_use]
    pub fn query(&self, rect: Rect) -> Vec<K> {
        let mut hits = self.backend.query_rect(rect);
        hits.sort_unstable();
        hits.into_iter()
            .filter_map(|slot| self.entry(slot).map(|e| e.key.clone()))
            .collect()
    }

    /// Keys whose AABB contains `pt`, smallest area first.
    ///
    /// Equal areas resolve to the most recently inserted key first, so the same
    /// point always yields the same order for an unchanged key set.
    #[must_use]
    pub fn hit_test(&self, pt: Point) -> Vec<K> {
        let mut hits: Vec<&Entry<K>> = self
            .backend
            .query_point(pt)
            .into_iter()
            .filter_map(|slot| self.entry(slot))
            .collect();
        hits.sort_by(|a, b| {
            a.aabb
                .area()
                .total_cmp(&b.aabb.area())
                .then_with(|| b.seq.cmp(&a.seq))
        });
        hits.into_iter().map(|e| e.key.clone()).collect()
    }

    /// [`SpatialIndex::query`] over `region` inflated by the visible margin, so
    /// items just outside a viewport edge are already present when it scrolls.
    #[must_use]
    pub fn visible_in_region(&self, region: Rect) -> Vec<K> {
        let m = self.visible_margin;
        self.query(region.abs().inflate(m, m))
    }

    fn entry(&self, slot: usize) -> Option<&Entry<K>> {
        self.slots.get(slot)?.as_ref()
    }

    fn update_slot(&mut self, slot: usize, aabb: Rect) -> Option<Rect> {
        let entry = self.slots.get_mut(slot)?.as_mut()?;
        let old = core::mem::replace(&mut entry.aabb, aabb);
        self.backend.update(slot, aabb);
        Some(old)
    }
}

fn is_valid_aabb(aabb: &Rect) -> bool {
    aabb.is_finite() && aabb.x0 <= aabb.x1 && aabb.y0 <= aabb.y1
}
