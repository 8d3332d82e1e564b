// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drag state: which gesture is in progress and what it captured at the start.

use kurbo::{Point, Vec2};
use trellis_store::NodeId;

/// Which kind of drag just ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DragKind {
    /// Selected nodes were being moved.
    Node,
    /// The canvas was being panned.
    Viewport,
}

/// Gesture in progress.
///
/// Everything a drag needs is captured on entry, so each pointer move computes
/// positions from the anchor rather than accumulating per-move deltas.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum DragState {
    /// No pointer gesture is active.
    #[default]
    Idle,
    /// Moving the selected nodes.
    DraggingNode {
        /// Screen point of the pointer-down.
        anchor: Point,
        /// World positions of the dragged nodes at pointer-down.
        originals: Vec<(NodeId, Point)>,
    },
    /// Panning the canvas.
    DraggingViewport {
        /// Screen point of the pointer-down.
        anchor: Point,
        /// Viewport center at pointer-down.
        original_center: Point,
    },
}

impl DragState {
    /// Returns `true` while a drag is active.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        !matches!(self, Self::Idle)
    }

    /// Returns `true` while the canvas is being panned.
    #[must_use]
    pub fn is_panning(&self) -> bool {
        matches!(self, Self::DraggingViewport { .. })
    }

    /// Screen point the active drag started at.
    #[must_use]
    pub fn anchor(&self) -> Option<Point> {
        match self {
            Self::Idle => None,
            Self::DraggingNode { anchor, .. } | Self::DraggingViewport { anchor, .. } => {
                Some(*anchor)
            }
        }
    }

    /// Screen-space offset of `pos` from the anchor.
    #[must_use]
    pub fn total_offset(&self, pos: Point) -> Option<Vec2> {
        self.anchor().map(|anchor| pos - anchor)
    }

    /// Kind of the active drag.
    #[must_use]
    pub fn kind(&self) -> Option<DragKind> {
        match self {
            Self::Idle => None,
            Self::DraggingNode { .. } => Some(DragKind::Node),
            Self::DraggingViewport { .. } => Some(DragKind::Viewport),
        }
    }

    /// Short state name for diagnostics.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::DraggingNode { .. } => "dragging-node",
            Self::DraggingViewport { .. } => "dragging-viewport",
        }
    }
}
