// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Trellis Interaction: pointer gestures for a diagram canvas.
//!
//! [`InteractionController`] is a three-state machine over [`DragState`]:
//!
//! - `Idle`: nothing in progress.
//! - `DraggingNode`: pointer went down on a node. That node becomes the only
//!   selection and follows the pointer until release.
//! - `DraggingViewport`: pointer went down on empty canvas. The selection is
//!   cleared and the canvas follows the pointer until release.
//!
//! Pointer-up and pointer-leave both keep the last applied state; there is no
//! revert. Wheel zoom and double-click lookups work in any state.
//!
//! Each handler borrows the [`DiagramStore`](trellis_store::DiagramStore) and
//! [`Viewport`](trellis_view::Viewport) it acts on and returns the
//! [`InteractionEvent`]s describing what changed.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::{Point, Size};
//! use trellis_interaction::InteractionController;
//! use trellis_store::{DiagramStore, Node, Shape};
//! use trellis_view::Viewport;
//!
//! let mut store = DiagramStore::new();
//! store.add_node(Node::new("n", Shape::Rectangle, Point::ORIGIN, Size::new(40.0, 40.0)))?;
//! let mut viewport = Viewport::new(Size::new(800.0, 600.0));
//! let mut controller = InteractionController::default();
//!
//! let grab = viewport.world_to_screen(Point::new(10.0, 10.0));
//! controller.pointer_down(&mut store, &viewport, grab);
//! controller.pointer_move(&mut store, &mut viewport, Point::new(grab.x + 50.0, grab.y));
//! controller.pointer_up();
//!
//! assert_eq!(store.node(&"n".into()).map(|n| n.position), Some(Point::new(50.0, 0.0)));
//! # Ok::<(), trellis_store::StoreError>(())
//! ```

mod controller;
mod drag;
mod event;

pub use controller::{InteractionConfig, InteractionController};
pub use drag::{DragKind, DragState};
pub use event::InteractionEvent;
