// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Trellis Index: a keyed 2D AABB index for diagram hit testing and culling.
//!
//! [`SpatialIndex`] maps caller keys (node ids) to axis-aligned bounding boxes
//! and answers two questions fast as the item count grows:
//! - **What is under this point?** [`SpatialIndex::hit_test`] returns every key
//!   whose box contains the point, smallest area first, so a small shape
//!   drawn over a large one wins.
//! - **What is in this region?** [`SpatialIndex::query`] and
//!   [`SpatialIndex::visible_in_region`] (the latter padded by a margin to
//!   avoid pop-in at viewport edges).
//!
//! The index never owns the items themselves; it stores a key and a cached
//! box. Keeping those boxes in sync with the owner is the caller's job.
//!
//! ## Backends
//!
//! Spatial work is delegated to a slot-based [`Backend`]:
//! - [`QuadTree`]: region quadtree over an unbounded plane (default).
//! - [`FlatVec`]: linear scan; a reference answer and fine for small sets.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::{Point, Rect};
//! use trellis_index::SpatialIndex;
//!
//! let mut index = SpatialIndex::default();
//! index.insert("frame", Rect::new(0.0, 0.0, 100.0, 100.0));
//! index.insert("button", Rect::new(40.0, 40.0, 60.0, 60.0));
//!
//! assert_eq!(index.hit_test(Point::new(50.0, 50.0)), ["button", "frame"]);
//! assert_eq!(index.query(Rect::new(80.0, 80.0, 90.0, 90.0)), ["frame"]);
//! ```
//!
//! Float inputs are assumed to be finite. This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod backend;
mod index;

/// Built-in [`Backend`] implementations.
pub mod backends {
    pub mod flatvec;
    pub mod quadtree;
}

pub use backend::Backend;
pub use backends::flatvec::FlatVec;
pub use backends::quadtree::{QuadNodeDebugInfo, QuadTree, QuadTreeConfig, QuadTreeDebugInfo};
pub use index::{DEFAULT_VISIBLE_MARGIN, SpatialIndex};
