// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Trellis View: the pan/zoom camera of a diagram surface.
//!
//! A [`Viewport`] maps between **world space** (the unbounded plane node
//! positions live in) and **screen space** (pixels of the rendering surface,
//! origin at its top-left). The camera is described by a world-space center,
//! a uniform zoom factor clamped to `[MIN_ZOOM, MAX_ZOOM]`, and the surface size.
//!
//! It does **not** know about nodes, hit testing, or input. Higher layers:
//! - convert pointer positions with [`Viewport::screen_to_world`] before
//!   querying a spatial index,
//! - cull with [`Viewport::visible_world_rect`],
//! - route wheel input to [`Viewport::zoom_at`], which keeps the world point
//!   under the cursor fixed.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::{Point, Size};
//! use trellis_view::{Viewport, ViewportUpdate};
//!
//! let mut view = Viewport::new(Size::new(800.0, 600.0));
//!
//! // The world origin sits in the middle of the surface.
//! assert_eq!(view.world_to_screen(Point::ORIGIN), Point::new(400.0, 300.0));
//!
//! // Zoom in around the cursor; the world point under it does not move.
//! let cursor = Point::new(100.0, 80.0);
//! let before = view.screen_to_world(cursor);
//! view.zoom_at(cursor, 2.0);
//! let after = view.screen_to_world(cursor);
//! assert!((before - after).hypot() < 1e-9);
//!
//! // Host surface resized: pan and zoom are preserved.
//! view.set_viewport(ViewportUpdate::resize(1024.0, 768.0));
//! assert_eq!(view.zoom(), 2.0);
//! ```
//!
//! This crate is `no_std`.

#![no_std]

mod viewport;

pub use viewport::{MAX_ZOOM, MIN_ZOOM, Viewport, ViewportDebugInfo, ViewportUpdate};
