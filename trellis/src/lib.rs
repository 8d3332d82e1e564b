// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Trellis: a spatial diagram engine.
//!
//! An [`Engine`] owns one diagram surface:
//!
//! - a [`DiagramStore`] of nodes and edges with a quadtree over node bounds,
//! - a [`Viewport`] mapping world coordinates to screen pixels,
//! - an [`InteractionController`](trellis_interaction::InteractionController)
//!   turning pointer input into selection, drags, pans and zooms,
//! - a [`RenderLoop`](trellis_render::RenderLoop) producing draw commands for
//!   whatever the viewport shows.
//!
//! The host forwards pointer events and refresh ticks, and paints the
//! returned [`Frame`]s. Palette drops go through [`Engine::drop_node`].
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::{Point, Size};
//! use trellis::{Engine, EngineConfig, NodeTemplate, Shape};
//!
//! let mut engine = Engine::new(EngineConfig {
//!     screen_size: Size::new(800.0, 600.0),
//!     ..EngineConfig::default()
//! });
//!
//! let task = NodeTemplate::new("task", "Task", Shape::RoundedRectangle);
//! let id = engine.drop_node(&task, Point::new(400.0, 300.0))?;
//! assert_eq!(engine.store().node(&id).map(|n| n.position), Some(Point::ORIGIN));
//!
//! // Grab it and drag it 50 pixels to the right.
//! engine.pointer_down(Point::new(410.0, 310.0));
//! engine.pointer_move(Point::new(460.0, 310.0));
//! engine.pointer_up();
//! assert_eq!(engine.store().node(&id).map(|n| n.position), Some(Point::new(50.0, 0.0)));
//!
//! let frame = engine.render_frame();
//! assert_eq!(frame.stats.visible_nodes, 1);
//! # Ok::<(), trellis::StoreError>(())
//! ```

mod engine;
mod template;

pub use engine::{Engine, EngineConfig, EngineDebugInfo};
pub use template::{NodeTemplate, TEMPLATE_DATA_KEY};

pub use trellis_index as index;
pub use trellis_interaction as interaction;
pub use trellis_render as render;
pub use trellis_store as store;
pub use trellis_view as view;

pub use trellis_interaction::InteractionEvent;
pub use trellis_render::{DrawCommand, Frame, TickSource, TickToken};
pub use trellis_store::{DiagramStore, Edge, EdgeId, Node, NodeId, Shape, StoreError};
pub use trellis_view::{Viewport, ViewportUpdate};
