// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Trellis Store: the authoritative node and edge registry of a diagram.
//!
//! [`DiagramStore`] owns every [`Node`] and [`Edge`] and keeps a
//! [`SpatialIndex`](trellis_index::SpatialIndex) over node bounds in lockstep
//! with the registry. It enforces:
//! - unique node and edge ids ([`StoreError::DuplicateId`]),
//! - edges only between registered nodes ([`StoreError::DanglingEndpoint`]),
//! - finite geometry with non-negative size ([`StoreError::InvalidGeometry`]).
//!
//! Removing a node removes every edge that touches it and drops it from the
//! [`Selection`]. Every rejected call leaves the store unchanged and is
//! reported through `tracing` at `warn` level.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::{Point, Size};
//! use trellis_store::{DiagramStore, Edge, Node, Shape};
//!
//! let mut store = DiagramStore::new();
//! store.add_node(Node::new("a", Shape::Rectangle, Point::ORIGIN, Size::new(80.0, 40.0)))?;
//! store.add_node(Node::new("b", Shape::Ellipse, Point::new(200.0, 0.0), Size::new(60.0, 60.0)))?;
//! store.add_edge(Edge::new("a->b", "a", "b"))?;
//!
//! assert_eq!(store.hit_test(Point::new(10.0, 10.0)), ["a".into()]);
//!
//! store.remove_node(&"a".into())?;
//! assert_eq!(store.edge_count(), 0);
//! # Ok::<(), trellis_store::StoreError>(())
//! ```

mod error;
mod model;
mod selection;
mod store;

pub use error::{Result, StoreError};
pub use model::{Edge, EdgeId, EdgeStyle, Node, NodeId, NodeStyle, Port, Shape};
pub use selection::Selection;
pub use store::DiagramStore;
