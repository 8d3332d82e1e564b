// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Point, Size};
use trellis_index::{DEFAULT_VISIBLE_MARGIN, QuadTreeConfig, QuadTreeDebugInfo};
use trellis_interaction::{InteractionConfig, InteractionController, InteractionEvent};
use trellis_render::{
    Frame, FrameStats, RenderConfig, RenderLoop, RenderScheduler, TickSource, TickToken,
};
use trellis_store::{DiagramStore, Edge, EdgeId, Node, NodeId, NodeStyle, Result, Selection};
use trellis_view::{Viewport, ViewportDebugInfo, ViewportUpdate};
use uuid::Uuid;

use crate::template::NodeTemplate;

/// Everything needed to build an [`Engine`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EngineConfig {
    /// Initial surface size in pixels.
    pub screen_size: Size,
    /// Quadtree tuning.
    pub index: QuadTreeConfig,
    /// World units added around the viewport when culling.
    pub visible_margin: f64,
    /// Pointer and wheel tuning.
    pub interaction: InteractionConfig,
    /// Colors, label sizing and stats history.
    pub render: RenderConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            screen_size: Size::new(800.0, 600.0),
            index: QuadTreeConfig::default(),
            visible_margin: DEFAULT_VISIBLE_MARGIN,
            interaction: InteractionConfig::default(),
            render: RenderConfig::default(),
        }
    }
}

/// Read-only snapshot for diagnostics overlays.
#[derive(Clone, Debug, PartialEq)]
pub struct EngineDebugInfo {
    /// Shape of the spatial index.
    pub index: QuadTreeDebugInfo,
    /// Viewport state.
    pub viewport: ViewportDebugInfo,
    /// Timing of the last rendered frame.
    pub last_frame: Option<FrameStats>,
    /// Name of the current drag state.
    pub drag_state: &'static str,
    /// Registered nodes.
    pub node_count: usize,
    /// Registered edges.
    pub edge_count: usize,
    /// Selection revision counter.
    pub selection_revision: u64,
}

/// One diagram surface: store, viewport, interaction and rendering.
///
/// Constructed and owned by the host; nothing is global. Every mutation goes
/// through `&mut self`, so input events and frames are naturally serialized.
#[derive(Debug)]
pub struct Engine {
    store: DiagramStore,
    viewport: Viewport,
    controller: InteractionController,
    render: RenderLoop,
    scheduler: RenderScheduler,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl Engine {
    /// Creates an empty diagram.
    #[must_use]
    pub fn new(config: EngineConfig) -> Self {
        Self {
            store: DiagramStore::with_index_config(config.index, config.visible_margin),
            viewport: Viewport::new(config.screen_size),
            controller: InteractionController::new(config.interaction),
            render: RenderLoop::new(config.render),
            scheduler: RenderScheduler::new(),
        }
    }

    /// Creates a diagram from node and edge descriptors.
    ///
    /// Nodes are added first, then edges, each in iteration order.
    ///
    /// # Errors
    ///
    /// The first rejected descriptor's [`StoreError`](trellis_store::StoreError).
    pub fn from_diagram(
        config: EngineConfig,
        nodes: impl IntoIterator<Item = Node>,
        edges: impl IntoIterator<Item = Edge>,
    ) -> Result<Self> {
        let mut engine = Self::new(config);
        for node in nodes {
            engine.store.add_node(node)?;
        }
        for edge in edges {
            engine.store.add_edge(edge)?;
        }
        tracing::debug!(
            nodes = engine.store.node_count(),
            edges = engine.store.edge_count(),
            "diagram loaded"
        );
        Ok(engine)
    }

    // --- Pointer contract ---

    /// Pointer pressed at a screen point.
    pub fn pointer_down(&mut self, point: Point) -> Vec<InteractionEvent> {
        self.controller.pointer_down(&mut self.store, &self.viewport, point)
    }

    /// Pointer moved to a screen point.
    pub fn pointer_move(&mut self, point: Point) -> Vec<InteractionEvent> {
        self.controller.pointer_move(&mut self.store, &mut self.viewport, point)
    }

    /// Pointer released.
    pub fn pointer_up(&mut self) -> Vec<InteractionEvent> {
        self.controller.pointer_up()
    }

    /// Pointer left the surface.
    pub fn pointer_leave(&mut self) -> Vec<InteractionEvent> {
        self.controller.pointer_leave()
    }

    /// Double-click at a screen point.
    pub fn double_click(&mut self, point: Point) -> Vec<InteractionEvent> {
        self.controller.double_click(&self.store, &self.viewport, point)
    }

    /// Wheel scrolled by `delta_y` with the cursor at a screen point.
    pub fn wheel(&mut self, delta_y: f64, point: Point) -> Vec<InteractionEvent> {
        self.controller.wheel(&mut self.viewport, delta_y, point)
    }

    // --- Drop contract ---

    /// Creates a node from a palette template dropped at a screen point.
    ///
    /// The node gets a fresh random id and its top-left corner is placed at
    /// the world point under `screen_point`.
    ///
    /// # Errors
    ///
    /// [`StoreError::InvalidGeometry`](trellis_store::StoreError::InvalidGeometry)
    /// if the point or template size is unusable.
    pub fn drop_node(&mut self, template: &NodeTemplate, screen_point: Point) -> Result<NodeId> {
        let world = self.viewport.screen_to_world(screen_point);
        let id = NodeId::new(Uuid::new_v4().to_string());
        self.store.add_node(template.instantiate(id.clone(), world))?;
        tracing::debug!(node = %id, template = %template.id, ?world, "node dropped");
        Ok(id)
    }

    // --- Viewport ---

    /// Applies a partial viewport update. Resizing never resets pan or zoom.
    pub fn set_viewport(&mut self, update: ViewportUpdate) -> bool {
        let changed = self.viewport.set_viewport(update);
        if !changed {
            tracing::debug!(?update, "viewport update left the view unchanged");
        }
        changed
    }

    /// The current viewport.
    #[must_use]
    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// Frames every node with `padding` pixels to spare. Returns `false` for
    /// an empty diagram.
    pub fn zoom_to_fit(&mut self, padding: f64) -> bool {
        let Some(bounds) = self.store.content_bounds() else {
            return false;
        };
        self.viewport.fit_rect(bounds, padding);
        true
    }

    // --- Model ---

    /// See [`DiagramStore::add_node`].
    ///
    /// # Errors
    ///
    /// As [`DiagramStore::add_node`].
    pub fn add_node(&mut self, node: Node) -> Result<()> {
        self.store.add_node(node)
    }

    /// See [`DiagramStore::add_edge`].
    ///
    /// # Errors
    ///
    /// As [`DiagramStore::add_edge`].
    pub fn add_edge(&mut self, edge: Edge) -> Result<()> {
        self.store.add_edge(edge)
    }

    /// See [`DiagramStore::remove_node`].
    ///
    /// # Errors
    ///
    /// As [`DiagramStore::remove_node`].
    pub fn remove_node(&mut self, id: &NodeId) -> Result<Node> {
        self.store.remove_node(id)
    }

    /// See [`DiagramStore::remove_edge`].
    ///
    /// # Errors
    ///
    /// As [`DiagramStore::remove_edge`].
    pub fn remove_edge(&mut self, id: &EdgeId) -> Result<Edge> {
        self.store.remove_edge(id)
    }

    /// See [`DiagramStore::move_node`].
    ///
    /// # Errors
    ///
    /// As [`DiagramStore::move_node`].
    pub fn move_node(&mut self, id: &NodeId, position: Point) -> Result<()> {
        self.store.move_node(id, position)
    }

    /// See [`DiagramStore::set_node_label`].
    ///
    /// # Errors
    ///
    /// As [`DiagramStore::set_node_label`].
    pub fn set_node_label(&mut self, id: &NodeId, label: impl Into<String>) -> Result<()> {
        self.store.set_node_label(id, label)
    }

    /// See [`DiagramStore::set_node_style`].
    ///
    /// # Errors
    ///
    /// As [`DiagramStore::set_node_style`].
    pub fn set_node_style(&mut self, id: &NodeId, style: NodeStyle) -> Result<()> {
        self.store.set_node_style(id, style)
    }

    /// Nodes the current viewport shows.
    #[must_use]
    pub fn visible_nodes(&self) -> Vec<&Node> {
        self.store.visible_nodes(&self.viewport)
    }

    /// The current selection.
    #[must_use]
    pub fn selection(&self) -> &Selection {
        self.store.selection()
    }

    /// Read access to the registry.
    #[must_use]
    pub fn store(&self) -> &DiagramStore {
        &self.store
    }

    /// Interaction state, including the current drag.
    #[must_use]
    pub fn controller(&self) -> &InteractionController {
        &self.controller
    }

    // --- Frames ---

    /// Builds a frame from the current state.
    pub fn render_frame(&mut self) -> Frame {
        self.render.render(
            &self.store,
            &self.viewport,
            self.controller.state(),
            self.controller.last_hit_test_duration(),
        )
    }

    /// Starts requesting refresh ticks from `source`.
    pub fn start(&mut self, source: &mut impl TickSource) {
        self.scheduler.start(source);
    }

    /// Stops rendering and cancels the pending tick.
    pub fn stop(&mut self, source: &mut impl TickSource) {
        self.scheduler.stop(source);
    }

    /// Handles a fired tick, returning a frame unless the tick is stale or
    /// the engine is stopped.
    pub fn tick(&mut self, source: &mut impl TickSource, token: TickToken) -> Option<Frame> {
        self.scheduler.tick(source, token).then(|| self.render_frame())
    }

    /// The refresh scheduler.
    #[must_use]
    pub fn scheduler(&self) -> &RenderScheduler {
        &self.scheduler
    }

    /// Diagnostics snapshot. Does not change any state.
    #[must_use]
    pub fn debug_info(&self) -> EngineDebugInfo {
        EngineDebugInfo {
            index: self.store.index_debug_info(),
            viewport: self.viewport.debug_info(),
            last_frame: self.render.last_stats().copied(),
            drag_state: self.controller.state().name(),
            node_count: self.store.node_count(),
            edge_count: self.store.edge_count(),
            selection_revision: self.store.selection().revision(),
        }
    }
}
