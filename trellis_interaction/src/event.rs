// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::Point;
use trellis_store::NodeId;

use crate::drag::DragKind;

/// Something the host may want to react to after an input event.
///
/// Every state change has already been applied to the store or viewport by the
/// time an event is returned; events are notifications, not requests.
#[derive(Clone, Debug, PartialEq)]
pub enum InteractionEvent {
    /// The selection now holds `selected` (or nothing).
    SelectionChanged {
        /// The newly selected node.
        selected: Option<NodeId>,
    },
    /// These nodes were moved by a drag.
    NodesMoved {
        /// Moved node ids.
        ids: Vec<NodeId>,
    },
    /// Viewport center or zoom changed.
    ViewportChanged,
    /// A drag ended and its last state was kept.
    DragFinished {
        /// What was being dragged.
        kind: DragKind,
    },
    /// A double-click landed at `world`.
    DoubleClicked {
        /// Topmost node under the point, if any.
        node: Option<NodeId>,
        /// The point in world coordinates.
        world: Point,
    },
}
