// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Backend trait for slot-based spatial structures.

use alloc::vec::Vec;

use kurbo::{Point, Rect};

/// Spatial backend abstraction used by [`SpatialIndex`](crate::SpatialIndex).
///
/// Backends only know dense `usize` slots and their AABBs; key bookkeeping,
/// ordering, and margins live in the index wrapper. Containment and
/// intersection are closed: an AABB touching the query counts as a match.
pub trait Backend {
    /// Insert a new slot into the spatial structure.
    fn insert(&mut self, slot: usize, aabb: Rect);

    /// Update an existing slot's AABB.
    fn update(&mut self, slot: usize, aabb: Rect);

    /// Remove a slot from the spatial structure.
    fn remove(&mut self, slot: usize);

    /// Clear all spatial structures.
    fn clear(&mut self);

    /// Visit slots whose AABB contains the point.
    fn visit_point<F: FnMut(usize)>(&self, pt: Point, f: F);

    /// Visit slots whose AABB intersects the rectangle.
    fn visit_rect<F: FnMut(usize)>(&self, rect: Rect, f: F);

    /// Query slots whose AABB contains the point. Default: collects `visit_point`.
    fn query_point(&self, pt: Point) -> Vec<usize> {
        let mut out = Vec::new();
        self.visit_point(pt, |i| out.push(i));
        out
    }

    /// Query slots whose AABB intersects the rectangle. Default: collects `visit_rect`.
    fn query_rect(&self, rect: Rect) -> Vec<usize> {
        let mut out = Vec::new();
        self.visit_rect(rect, |i| out.push(i));
        out
    }
}

/// Closed point containment: points on the boundary are inside.
#[inline]
pub(crate) fn contains_point(aabb: &Rect, pt: Point) -> bool {
    aabb.x0 <= pt.x && pt.x <= aabb.x1 && aabb.y0 <= pt.y && pt.y <= aabb.y1
}

/// Closed intersection: rectangles sharing only an edge still intersect.
#[inline]
pub(crate) fn intersects(a: &Rect, b: &Rect) -> bool {
    a.x0 <= b.x1 && b.x0 <= a.x1 && a.y0 <= b.y1 && b.y0 <= a.y1
}

/// Returns `true` if `inner` lies entirely inside `outer` (edges included).
#[inline]
pub(crate) fn contains_rect(outer: &Rect, inner: &Rect) -> bool {
    outer.x0 <= inner.x0 && inner.x1 <= outer.x1 && outer.y0 <= inner.y0 && inner.y1 <= outer.y1
}
