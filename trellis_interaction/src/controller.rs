// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::time::Duration;

use kurbo::Point;
use trellis_store::{DiagramStore, NodeId};
use trellis_view::Viewport;
use web_time::Instant;

use crate::drag::DragState;
use crate::event::InteractionEvent;

/// Tuning for [`InteractionController`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct InteractionConfig {
    /// Zoom factor applied per wheel notch toward the user (negative
    /// `delta_y`); its inverse is applied per notch away.
    pub wheel_zoom_step: f64,
}

impl Default for InteractionConfig {
    fn default() -> Self {
        Self {
            wheel_zoom_step: 1.1,
        }
    }
}

/// Turns pointer and wheel input into selection, node moves and viewport
/// changes.
///
/// The controller owns only the [`DragState`]; the store and viewport are
/// borrowed per event, so there is exactly one mutator at a time. Points are
/// screen pixels relative to the surface's top-left corner.
#[derive(Clone, Debug, Default)]
pub struct InteractionController {
    config: InteractionConfig,
    state: DragState,
    last_hit_test: Option<Duration>,
}

impl InteractionController {
    /// Creates an idle controller.
    #[must_use]
    pub fn new(config: InteractionConfig) -> Self {
        Self {
            config,
            state: DragState::Idle,
            last_hit_test: None,
        }
    }

    /// The active tuning.
    #[must_use]
    pub fn config(&self) -> InteractionConfig {
        self.config
    }

    /// Current gesture.
    #[must_use]
    pub fn state(&self) -> &DragState {
        &self.state
    }

    /// How long the most recent hit-test took.
    #[must_use]
    pub fn last_hit_test_duration(&self) -> Option<Duration> {
        self.last_hit_test
    }

    /// Starts a gesture at `point`.
    ///
    /// Over a node: that node becomes the only selected node and a node drag
    /// begins. Over empty canvas: the selection is cleared and a pan begins.
    /// A drag that is still active is committed first.
    pub fn pointer_down(
        &mut self,
        store: &mut DiagramStore,
        viewport: &Viewport,
        point: Point,
    ) -> Vec<InteractionEvent> {
        if !point.is_finite() {
            return Vec::new();
        }
        let mut events = self.finish_drag();

        let revision = store.selection().revision();
        let top = self.timed_hit_test(store, viewport, point);
        match top {
            Some(id) => {
                store.select_only(&id);
                let originals: Vec<(NodeId, Point)> = store
                    .selection()
                    .iter()
                    .filter_map(|selected| store.node(selected).map(|n| (selected.clone(), n.position)))
                    .collect();
                tracing::debug!(node = %id, "node drag started");
                self.state = DragState::DraggingNode {
                    anchor: point,
                    originals,
                };
                if store.selection().revision() != revision {
                    events.push(InteractionEvent::SelectionChanged { selected: Some(id) });
                }
            }
            None => {
                store.clear_selection();
                tracing::debug!(center = ?viewport.center(), "viewport drag started");
                self.state = DragState::DraggingViewport {
                    anchor: point,
                    original_center: viewport.center(),
                };
                if store.selection().revision() != revision {
                    events.push(InteractionEvent::SelectionChanged { selected: None });
                }
            }
        }
        events
    }

    /// Continues the active gesture with the pointer at `point`.
    ///
    /// The screen offset from the anchor is converted with the zoom in effect
    /// now, so zooming mid-drag keeps the grabbed point under the cursor.
    pub fn pointer_move(
        &mut self,
        store: &mut DiagramStore,
        viewport: &mut Viewport,
        point: Point,
    ) -> Vec<InteractionEvent> {
        if !point.is_finite() {
            return Vec::new();
        }
        let Some(offset) = self.state.total_offset(point) else {
            return Vec::new();
        };
        let delta = viewport.screen_to_world_vec(offset);
        match &self.state {
            DragState::Idle => Vec::new(),
            DragState::DraggingNode { originals, .. } => {
                let mut ids = Vec::with_capacity(originals.len());
                for (id, original) in originals {
                    // Removed by someone else mid-drag.
                    if !store.contains_node(id) {
                        continue;
                    }
                    if store.move_node(id, *original + delta).is_ok() {
                        ids.push(id.clone());
                    }
                }
                if ids.is_empty() {
                    Vec::new()
                } else {
                    vec![InteractionEvent::NodesMoved { ids }]
                }
            }
            DragState::DraggingViewport { original_center, .. } => {
                if viewport.pan_to(*original_center - delta) {
                    vec![InteractionEvent::ViewportChanged]
                } else {
                    Vec::new()
                }
            }
        }
    }

    /// Ends the active gesture, keeping whatever the last move applied.
    pub fn pointer_up(&mut self) -> Vec<InteractionEvent> {
        self.finish_drag()
    }

    /// Pointer left the surface. Same as [`Self::pointer_up`]: the drag is
    /// committed, not reverted.
    pub fn pointer_leave(&mut self) -> Vec<InteractionEvent> {
        self.finish_drag()
    }

    /// Reports the topmost node under `point` without touching selection or
    /// drag state.
    pub fn double_click(
        &mut self,
        store: &DiagramStore,
        viewport: &Viewport,
        point: Point,
    ) -> Vec<InteractionEvent> {
        if !point.is_finite() {
            return Vec::new();
        }
        let node = self.timed_hit_test(store, viewport, point);
        vec![InteractionEvent::DoubleClicked {
            node,
            world: viewport.screen_to_world(point),
        }]
    }

    /// Zooms about `point`, whatever the drag state.
    ///
    /// Negative `delta_y` (wheel toward the user) zooms in by
    /// [`InteractionConfig::wheel_zoom_step`].
    pub fn wheel(
        &mut self,
        viewport: &mut Viewport,
        delta_y: f64,
        point: Point,
    ) -> Vec<InteractionEvent> {
        if !point.is_finite() || !delta_y.is_finite() || delta_y == 0.0 {
            return Vec::new();
        }
        let step = self.config.wheel_zoom_step;
        let factor = if delta_y < 0.0 { step } else { step.recip() };
        if viewport.zoom_at(point, factor) {
            vec![InteractionEvent::ViewportChanged]
        } else {
            Vec::new()
        }
    }

    fn finish_drag(&mut self) -> Vec<InteractionEvent> {
        let finished = core::mem::take(&mut self.state);
        match finished.kind() {
            Some(kind) => {
                tracing::debug!(?kind, "drag finished");
                vec![InteractionEvent::DragFinished { kind }]
            }
            None => Vec::new(),
        }
    }

    fn timed_hit_test(
        &mut self,
        store: &DiagramStore,
        viewport: &Viewport,
        point: Point,
    ) -> Option<NodeId> {
        let start = Instant::now();
        let top = store
            .hit_test(viewport.screen_to_world(point))
            .into_iter()
            .next();
        self.last_hit_test = Some(start.elapsed());
        top
    }
}
