// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Trellis Render: turns the visible part of a diagram into draw commands.
//!
//! [`render_frame`] is a read-only function of the store, the viewport and the
//! current drag state. It produces a [`Frame`] of backend-neutral
//! [`DrawCommand`]s in screen pixels:
//!
//! - a [`DrawCommand::Line`] per edge with at least one visible endpoint,
//! - a [`DrawCommand::Fill`], a [`DrawCommand::Stroke`] and an optional
//!   [`DrawCommand::Label`] per visible node,
//! - a [`DrawCommand::DashedRect`] while the canvas is being panned.
//!
//! Hosts translate these into whatever their surface understands.
//!
//! [`RenderLoop`] wraps `render_frame` with timing and keeps a bounded
//! [`FrameStatsRing`]. [`RenderScheduler`] decides when to render, driven by a
//! host [`TickSource`], and guarantees no tick fires after it is stopped.

mod command;
mod frame;
mod scheduler;
mod stats;

pub use command::{DrawCommand, Outline};
pub use frame::{Frame, RenderConfig, RenderLoop, render_frame};
pub use scheduler::{RenderScheduler, TickSource, TickToken};
pub use stats::{DEFAULT_STATS_CAPACITY, FrameStats, FrameStatsRing};
