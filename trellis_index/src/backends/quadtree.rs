// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Region quadtree backend over an unbounded plane.
//!
//! Each tree node owns a square-ish region and a short list of slots. A leaf
//! splits into four quadrants once it holds more than
//! [`QuadTreeConfig::leaf_capacity`] slots, unless it already sits at
//! [`QuadTreeConfig::max_depth`]. A slot lives in the deepest node whose region
//! fully contains its AABB, so AABBs straddling a split line stay at the parent
//! instead of being duplicated.
//!
//! The root starts around the first inserted AABB and doubles toward any AABB
//! that falls outside it, with the old root becoming one quadrant of the new
//! one. When growth pushes the tree past the depth bound, the whole tree is
//! rebuilt over the live slots. Removals collapse subtrees that fit back into
//! a single leaf.

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::mem;

use kurbo::{Point, Rect};
use smallvec::SmallVec;

use crate::backend::{Backend, contains_point, contains_rect, intersects};

/// Tuning knobs for [`QuadTree`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct QuadTreeConfig {
    /// Number of slots a leaf holds before it splits. At least `1`.
    pub leaf_capacity: usize,
    /// Deepest level (root is depth `0`) that may still be created by a split.
    pub max_depth: usize,
    /// Side length of the root region seeded around the first AABB.
    pub initial_extent: f64,
}

impl Default for QuadTreeConfig {
    fn default() -> Self {
        Self {
            leaf_capacity: 8,
            max_depth: 12,
            initial_extent: 1024.0,
        }
    }
}

/// Region quadtree backend.
#[derive(Clone, Debug)]
pub struct QuadTree {
    config: QuadTreeConfig,
    root: Option<QuadNode>,
    entries: Vec<Option<Rect>>,
    len: usize,
    rebuilds: u32,
}

impl Default for QuadTree {
    fn default() -> Self {
        Self::new(QuadTreeConfig::default())
    }
}

impl QuadTree {
    /// Creates an empty tree.
    #[must_use]
    pub fn new(config: QuadTreeConfig) -> Self {
        let config = QuadTreeConfig {
            leaf_capacity: config.leaf_capacity.max(1),
            max_depth: config.max_depth,
            initial_extent: if config.initial_extent.is_finite() && config.initial_extent > 0.0 {
                config.initial_extent
            } else {
                QuadTreeConfig::default().initial_extent
            },
        };
        Self {
            config,
            root: None,
            entries: Vec::new(),
            len: 0,
            rebuilds: 0,
        }
    }

    /// Returns the configuration in effect.
    #[must_use]
    pub fn config(&self) -> &QuadTreeConfig {
        &self.config
    }

    /// Number of live slots.
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if no slot is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of levels in the tree; `0` when empty.
    #[must_use]
    pub fn height(&self) -> usize {
        self.root.as_ref().map_or(0, QuadNode::height)
    }

    /// Recursive description of the tree shape, for diagnostics only.
    #[must_use]
    pub fn debug_info(&self) -> QuadTreeDebugInfo {
        QuadTreeDebugInfo {
            root: self.root.as_ref().map(|r| r.debug_info(0)),
            total_items: self.len,
            height: self.height(),
            rebuilds: self.rebuilds,
        }
    }

    fn seed_region(&self, aabb: &Rect) -> Rect {
        let half = (self.config.initial_extent * 0.5)
            .max(aabb.width())
            .max(aabb.height());
        let c = aabb.center();
        Rect::new(c.x - half, c.y - half, c.x + half, c.y + half)
    }

    /// Links `slot` into the tree. `entries[slot]` must already hold `aabb`.
    fn place(&mut self, slot: usize, aabb: &Rect) {
        let rebuilt = match &self.root {
            None => {
                self.root = Some(QuadNode::leaf(self.seed_region(aabb)));
                false
            }
            Some(root) if !contains_rect(&root.region, aabb) => self.grow_to_fit(aabb),
            Some(_) => false,
        };
        // A rebuild re-inserts every live entry, this one included.
        if rebuilt {
            return;
        }
        if let Some(root) = self.root.as_mut() {
            root.insert(slot, aabb, 0, &self.entries, &self.config);
        }
    }

    fn detach(&mut self, slot: usize, old: &Rect) {
        if let Some(root) = self.root.as_mut()
            && !root.remove(slot, old, &self.config)
        {
            root.remove_anywhere(slot, &self.config);
        }
    }

    /// Doubles the root toward `aabb` until it fits. Returns `true` if the
    /// tree had to be rebuilt afterwards.
    fn grow_to_fit(&mut self, aabb: &Rect) -> bool {
        let Some(mut root) = self.root.take() else {
            return false;
        };
        while !contains_rect(&root.region, aabb) {
            let r = root.region;
            let (w, h) = (r.width(), r.height());
            let grow_left = aabb.x0 < r.x0;
            let grow_up = aabb.y0 < r.y0;
            let region = Rect::new(
                if grow_left { r.x0 - w } else { r.x0 },
                if grow_up { r.y0 - h } else { r.y0 },
                if grow_left { r.x1 } else { r.x1 + w },
                if grow_up { r.y1 } else { r.y1 + h },
            );
            let mut parent = QuadNode::leaf(region);
            if !root.is_empty() {
                let mut children = Box::new(quadrants(region).map(QuadNode::leaf));
                children[usize::from(grow_left) + 2 * usize::from(grow_up)] = root;
                parent.children = Some(children);
            }
            root = parent;
        }
        let too_deep = root.height() > self.config.max_depth + 1;
        self.root = Some(root);
        if too_deep {
            self.rebuild();
        }
        too_deep
    }

    fn rebuild(&mut self) {
        let live: Vec<(usize, Rect)> = self
            .entries
            .iter()
            .enumerate()
            .filter_map(|(slot, e)| e.map(|aabb| (slot, aabb)))
            .collect();
        self.root = None;
        let Some(bounds) = live.iter().map(|(_, aabb)| *aabb).reduce(|a, b| a.union(b)) else {
            return;
        };
        let mut root = QuadNode::leaf(self.seed_region(&bounds));
        for (slot, aabb) in &live {
            root.insert(*slot, aabb, 0, &self.entries, &self.config);
        }
        self.root = Some(root);
        self.rebuilds += 1;
    }
}

impl Backend for QuadTree {
    fn insert(&mut self, slot: usize, aabb: Rect) {
        debug_assert!(aabb.is_finite(), "quadtree AABBs must be finite");
        if !aabb.is_finite() {
            return;
        }
        if self.entries.len() <= slot {
            self.entries.resize_with(slot + 1, || None);
        }
        match self.entries[slot].replace(aabb) {
            Some(old) => self.detach(slot, &old),
            None => self.len += 1,
        }
        self.place(slot, &aabb);
    }

    fn update(&mut self, slot: usize, aabb: Rect) {
        self.insert(slot, aabb);
    }

    fn remove(&mut self, slot: usize) {
        let Some(old) = self.entries.get_mut(slot).and_then(Option::take) else {
            return;
        };
        self.detach(slot, &old);
        self.len -= 1;
        if self.len == 0 {
            self.root = None;
        }
    }

    fn clear(&mut self) {
        self.root = None;
        self.entries.clear();
        self.len = 0;
    }

    fn visit_point<F: FnMut(usize)>(&self, pt: Point, mut f: F) {
        if let Some(root) = &self.root {
            root.visit_point(pt, &self.entries, &mut f);
        }
    }

    fn visit_rect<F: FnMut(usize)>(&self, rect: Rect, mut f: F) {
        if let Some(root) = &self.root {
            root.visit_rect(&rect, &self.entries, &mut f);
        }
    }
}

#[derive(Clone, Debug)]
struct QuadNode {
    region: Rect,
    items: SmallVec<[usize; 8]>,
    children: Option<Box<[QuadNode; 4]>>,
}

impl QuadNode {
    fn leaf(region: Rect) -> Self {
        Self {
            region,
            items: SmallVec::new(),
            children: None,
        }
    }

    fn is_empty(&self) -> bool {
        self.items.is_empty() && self.children.is_none()
    }

    fn height(&self) -> usize {
        1 + self
            .children
            .as_deref()
            .map_or(0, |c| c.iter().map(Self::height).max().unwrap_or(0))
    }

    /// Index of the first child fully containing `aabb`.
    fn child_for(&self, aabb: &Rect) -> Option<usize> {
        self.children
            .as_deref()?
            .iter()
            .position(|c| contains_rect(&c.region, aabb))
    }

    fn insert(
        &mut self,
        slot: usize,
        aabb: &Rect,
        depth: usize,
        entries: &[Option<Rect>],
        config: &QuadTreeConfig,
    ) {
        if let Some(i) = self.child_for(aabb)
            && let Some(children) = self.children.as_deref_mut()
        {
            children[i].insert(slot, aabb, depth + 1, entries, config);
            return;
        }
        self.items.push(slot);
        if self.children.is_none()
            && self.items.len() > config.leaf_capacity
            && depth < config.max_depth
        {
            self.split(depth, entries, config);
        }
    }

    fn split(&mut self, depth: usize, entries: &[Option<Rect>], config: &QuadTreeConfig) {
        let mut children = Box::new(quadrants(self.region).map(Self::leaf));
        for slot in mem::take(&mut self.items) {
            let target = entries
                .get(slot)
                .copied()
                .flatten()
                .and_then(|aabb| children.iter().position(|c| contains_rect(&c.region, &aabb)));
            match target {
                Some(i) => children[i].items.push(slot),
                None => self.items.push(slot),
            }
        }
        for child in children.iter_mut() {
            if child.items.len() > config.leaf_capacity && depth + 1 < config.max_depth {
                child.split(depth + 1, entries, config);
            }
        }
        self.children = Some(children);
    }

    fn remove(&mut self, slot: usize, aabb: &Rect, config: &QuadTreeConfig) -> bool {
        let removed = if let Some(i) = self.child_for(aabb)
            && let Some(children) = self.children.as_deref_mut()
        {
            children[i].remove(slot, aabb, config)
        } else if let Some(pos) = self.items.iter().position(|&s| s == slot) {
            self.items.swap_remove(pos);
            true
        } else {
            false
        };
        if removed {
            self.try_collapse(config);
        }
        removed
    }

    /// Exhaustive removal used when the cached AABB no longer leads to the slot.
    fn remove_anywhere(&mut self, slot: usize, config: &QuadTreeConfig) -> bool {
        let mut found = false;
        if let Some(pos) = self.items.iter().position(|&s| s == slot) {
            self.items.swap_remove(pos);
            found = true;
        } else if let Some(children) = self.children.as_deref_mut() {
            found = children
                .iter_mut()
                .any(|c| c.remove_anywhere(slot, config));
        }
        if found {
            self.try_collapse(config);
        }
        found
    }

    fn try_collapse(&mut self, config: &QuadTreeConfig) {
        let Some(children) = self.children.as_deref() else {
            return;
        };
        if children.iter().any(|c| c.children.is_some()) {
            return;
        }
        let total = self.items.len() + children.iter().map(|c| c.items.len()).sum::<usize>();
        if total > config.leaf_capacity {
            return;
        }
        if let Some(children) = self.children.take() {
            let children: [Self; 4] = *children;
            for child in children {
                self.items.extend(child.items);
            }
        }
    }

    fn visit_point<F: FnMut(usize)>(&self, pt: Point, entries: &[Option<Rect>], f: &mut F) {
        if !contains_point(&self.region, pt) {
            return;
        }
        for &slot in &self.items {
            if let Some(Some(aabb)) = entries.get(slot)
                && contains_point(aabb, pt)
            {
                f(slot);
            }
        }
        if let Some(children) = self.children.as_deref() {
            for child in children {
                child.visit_point(pt, entries, f);
            }
        }
    }

    fn visit_rect<F: FnMut(usize)>(&self, rect: &Rect, entries: &[Option<Rect>], f: &mut F) {
        if !intersects(&self.region, rect) {
            return;
        }
        for &slot in &self.items {
            if let Some(Some(aabb)) = entries.get(slot)
                && intersects(aabb, rect)
            {
                f(slot);
            }
        }
        if let Some(children) = self.children.as_deref() {
            for child in children {
                child.visit_rect(rect, entries, f);
            }
        }
    }

    fn debug_info(&self, depth: usize) -> QuadNodeDebugInfo {
        QuadNodeDebugInfo {
            depth,
            region: self.region,
            items: self.items.len(),
            children: self
                .children
                .as_deref()
                .map(|c| c.iter().map(|n| n.debug_info(depth + 1)).collect())
                .unwrap_or_default(),
        }
    }
}

/// Splits `r` into NW, NE, SW, SE quadrants (y grows downward).
fn quadrants(r: Rect) -> [Rect; 4] {
    let c = r.center();
    [
        Rect::new(r.x0, r.y0, c.x, c.y),
        Rect::new(c.x, r.y0, r.x1, c.y),
        Rect::new(r.x0, c.y, c.x, r.y1),
        Rect::new(c.x, c.y, r.x1, r.y1),
    ]
}

/// Snapshot of a [`QuadTree`]'s shape.
#[derive(Clone, Debug, PartialEq)]
pub struct QuadTreeDebugInfo {
    /// Root node, if the tree holds anything.
    pub root: Option<QuadNodeDebugInfo>,
    /// Number of live slots.
    pub total_items: usize,
    /// Number of levels.
    pub height: usize,
    /// How many times the depth-bound fallback rebuilt the tree.
    pub rebuilds: u32,
}

/// One node of a [`QuadTreeDebugInfo`].
#[derive(Clone, Debug, PartialEq)]
pub struct QuadNodeDebugInfo {
    /// Distance from the root; the root is `0`.
    pub depth: usize,
    /// Region covered by this node.
    pub region: Rect,
    /// Slots stored directly at this node.
    pub items: usize,
    /// Four children, or empty for a leaf.
    pub children: Vec<QuadNodeDebugInfo>,
}

impl QuadNodeDebugInfo {
    /// Slots stored in this node and all of its descendants.
    #[must_use]
    pub fn subtree_items(&self) -> usize {
        self.items
            + self
                .children
                .iter()
                .map(Self::subtree_items)
                .sum::<usize>()
    }
}
