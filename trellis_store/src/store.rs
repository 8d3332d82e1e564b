// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::collections::HashSet;

use indexmap::IndexMap;
use kurbo::{Point, Rect, Size};
use trellis_index::{QuadTreeConfig, QuadTreeDebugInfo, SpatialIndex};
use trellis_view::Viewport;

use crate::error::{Result, StoreError};
use crate::model::{Edge, EdgeId, Node, NodeId, NodeStyle};
use crate::selection::Selection;

/// Authoritative registry of nodes and edges.
///
/// The store owns every [`Node`] and [`Edge`], the [`SpatialIndex`] over node
/// bounds, and the current [`Selection`]. All three are updated together:
/// registry first, then index, then selection. A rejected call changes
/// nothing.
///
/// Registry iteration follows insertion order; later nodes stack above earlier
/// ones of equal area.
#[derive(Clone, Debug)]
pub struct DiagramStore {
    nodes: IndexMap<NodeId, Node>,
    edges: IndexMap<EdgeId, Edge>,
    index: SpatialIndex<NodeId>,
    selection: Selection,
}

impl Default for DiagramStore {
    fn default() -> Self {
        Self::new()
    }
}

impl DiagramStore {
    /// Creates an empty store with the default quadtree tuning.
    #[must_use]
    pub fn new() -> Self {
        Self::with_index(SpatialIndex::default())
    }

    /// Creates an empty store with a custom quadtree and visible-region margin.
    #[must_use]
    pub fn with_index_config(config: QuadTreeConfig, visible_margin: f64) -> Self {
        Self::with_index(SpatialIndex::new(config).with_visible_margin(visible_margin))
    }

    fn with_index(index: SpatialIndex<NodeId>) -> Self {
        Self {
            nodes: IndexMap::new(),
            edges: IndexMap::new(),
            index,
            selection: Selection::new(),
        }
    }

    // --- Nodes ---

    /// Registers `node` and indexes its bounds.
    ///
    /// # Errors
    ///
    /// - [`StoreError::DuplicateId`] if a node with the same id exists.
    /// - [`StoreError::InvalidGeometry`] if position or size is non-finite,
    ///   the size is negative, or the bounds they span are not finite.
    pub fn add_node(&mut self, node: Node) -> Result<()> {
        if self.nodes.contains_key(&node.id) {
            return Err(rejected("add_node", StoreError::DuplicateId(node.id.to_string())));
        }
        check_geometry(&node.id, node.position, node.size)
            .map_err(|err| rejected("add_node", err))?;

        let id = node.id.clone();
        let bounds = node.bounds();
        self.nodes.insert(id.clone(), node);
        self.index.insert(id.clone(), bounds);
        tracing::debug!(node = %id, ?bounds, "node added");
        Ok(())
    }

    /// Moves `id` so its top-left corner is at `position`.
    ///
    /// This is the only way node geometry changes after creation; the index
    /// entry is updated in the same call.
    ///
    /// # Errors
    ///
    /// - [`StoreError::UnknownNode`] if `id` is absent.
    /// - [`StoreError::InvalidGeometry`] if `position` is non-finite or the
    ///   node's bounds at `position` would not be finite.
    pub fn move_node(&mut self, id: &NodeId, position: Point) -> Result<()> {
        let Some(node) = self.nodes.get_mut(id) else {
            return Err(rejected("move_node", StoreError::UnknownNode(id.clone())));
        };
        check_geometry(id, position, node.size).map_err(|err| rejected("move_node", err))?;
        if node.position == position {
            return Ok(());
        }
        node.position = position;
        let bounds = node.bounds();
        self.index.update(id, bounds);
        tracing::trace!(node = %id, ?position, "node moved");
        Ok(())
    }

    /// Removes `id`, every edge touching it, and its selection entry.
    ///
    /// # Errors
    ///
    /// [`StoreError::UnknownNode`] if `id` is absent.
    pub fn remove_node(&mut self, id: &NodeId) -> Result<Node> {
        let Some(node) = self.nodes.shift_remove(id) else {
            return Err(rejected("remove_node", StoreError::UnknownNode(id.clone())));
        };
        self.index.remove(id);
        let before = self.edges.len();
        self.edges.retain(|_, edge| !edge.touches(id));
        self.selection.remove(id);
        tracing::debug!(node = %id, edges_removed = before - self.edges.len(), "node removed");
        Ok(node)
    }

    /// Replaces the label of `id`. Geometry is untouched.
    ///
    /// # Errors
    ///
    /// [`StoreError::UnknownNode`] if `id` is absent.
    pub fn set_node_label(&mut self, id: &NodeId, label: impl Into<String>) -> Result<()> {
        let node = self
            .nodes
            .get_mut(id)
            .ok_or_else(|| rejected("set_node_label", StoreError::UnknownNode(id.clone())))?;
        node.label = label.into();
        Ok(())
    }

    /// Replaces the style of `id`. Geometry is untouched.
    ///
    /// # Errors
    ///
    /// [`StoreError::UnknownNode`] if `id` is absent.
    pub fn set_node_style(&mut self, id: &NodeId, style: NodeStyle) -> Result<()> {
        let node = self
            .nodes
            .get_mut(id)
            .ok_or_else(|| rejected("set_node_style", StoreError::UnknownNode(id.clone())))?;
        node.style = style;
        Ok(())
    }

    /// Looks up a node.
    #[must_use]
    pub fn node(&self, id: &NodeId) -> Option<&Node> {
        self.nodes.get(id)
    }

    /// Returns `true` if `id` is registered.
    #[must_use]
    pub fn contains_node(&self, id: &NodeId) -> bool {
        self.nodes.contains_key(id)
    }

    /// Position of `id` in insertion order; later means stacked higher.
    #[must_use]
    pub fn stacking_order(&self, id: &NodeId) -> Option<usize> {
        self.nodes.get_index_of(id)
    }

    /// All nodes in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> + '_ {
        self.nodes.values()
    }

    /// Number of nodes.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    // --- Edges ---

    /// Registers `edge`.
    ///
    /// Edges are not spatially indexed; they are resolved to their endpoint
    /// positions whenever they are drawn.
    ///
    /// # Errors
    ///
    /// - [`StoreError::DuplicateId`] if an edge with the same id exists.
    /// - [`StoreError::DanglingEndpoint`] if either endpoint is not registered.
    pub fn add_edge(&mut self, edge: Edge) -> Result<()> {
        if self.edges.contains_key(&edge.id) {
            return Err(rejected("add_edge", StoreError::DuplicateId(edge.id.to_string())));
        }
        for endpoint in [&edge.source, &edge.target] {
            if !self.nodes.contains_key(endpoint) {
                return Err(rejected(
                    "add_edge",
                    StoreError::DanglingEndpoint {
                        edge: edge.id.clone(),
                        endpoint: endpoint.clone(),
                    },
                ));
            }
        }
        tracing::debug!(edge = %edge.id, source = %edge.source, target = %edge.target, "edge added");
        self.edges.insert(edge.id.clone(), edge);
        Ok(())
    }

    /// Removes an edge.
    ///
    /// # Errors
    ///
    /// [`StoreError::UnknownEdge`] if `id` is absent.
    pub fn remove_edge(&mut self, id: &EdgeId) -> Result<Edge> {
        self.edges
            .shift_remove(id)
            .ok_or_else(|| rejected("remove_edge", StoreError::UnknownEdge(id.clone())))
    }

    /// Looks up an edge.
    #[must_use]
    pub fn edge(&self, id: &EdgeId) -> Option<&Edge> {
        self.edges.get(id)
    }

    /// All edges in insertion order.
    pub fn edges(&self) -> impl Iterator<Item = &Edge> + '_ {
        self.edges.values()
    }

    /// Edges with `id` as source or target.
    pub fn edges_of<'a>(&'a self, id: &'a NodeId) -> impl Iterator<Item = &'a Edge> + 'a {
        self.edges.values().filter(move |e| e.touches(id))
    }

    /// Number of edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    // --- Spatial queries ---

    /// Nodes whose bounds contain the world point, topmost (smallest) first.
    #[must_use]
    pub fn hit_test(&self, world: Point) -> Vec<NodeId> {
        self.index.hit_test(world)
    }

    /// Nodes whose bounds intersect a world rectangle.
    #[must_use]
    pub fn nodes_in_rect(&self, world: Rect) -> Vec<&Node> {
        self.resolve(self.index.query(world))
    }

    /// Nodes inside (or within the index margin of) what `viewport` shows.
    #[must_use]
    pub fn visible_nodes(&self, viewport: &Viewport) -> Vec<&Node> {
        let world = viewport.screen_to_world_rect(viewport.screen_rect());
        self.resolve(self.index.visible_in_region(world))
    }

    /// Edges with at least one endpoint among `visible`; the other end may be
    /// off screen.
    #[must_use]
    pub fn visible_edges(&self, visible: &[&Node]) -> Vec<&Edge> {
        let ids: HashSet<&NodeId> = visible.iter().map(|n| &n.id).collect();
        self.edges
            .values()
            .filter(|e| ids.contains(&e.source) || ids.contains(&e.target))
            .collect()
    }

    /// Union of all node bounds, or `None` when empty.
    #[must_use]
    pub fn content_bounds(&self) -> Option<Rect> {
        self.nodes.values().map(Node::bounds).reduce(|a, b| a.union(b))
    }

    /// The spatial index over node bounds.
    #[must_use]
    pub fn index(&self) -> &SpatialIndex<NodeId> {
        &self.index
    }

    /// Shape of the spatial index, for diagnostics.
    #[must_use]
    pub fn index_debug_info(&self) -> QuadTreeDebugInfo {
        self.index.debug_info()
    }

    // --- Selection ---

    /// The current selection.
    #[must_use]
    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Replaces the selection with `id`. Returns `false` (and leaves the
    /// selection alone) if `id` is not registered.
    pub fn select_only(&mut self, id: &NodeId) -> bool {
        if !self.nodes.contains_key(id) {
            return false;
        }
        self.selection.select_only(id.clone());
        true
    }

    /// Deselects everything.
    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    fn resolve(&self, ids: Vec<NodeId>) -> Vec<&Node> {
        ids.iter().filter_map(|id| self.nodes.get(id)).collect()
    }
}

fn check_geometry(id: &NodeId, position: Point, size: Size) -> Result<()> {
    let reason = if !position.is_finite() {
        "position is not finite"
    } else if !size.is_finite() {
        "size is not finite"
    } else if size.width < 0.0 || size.height < 0.0 {
        "size is negative"
    } else if !Rect::from_origin_size(position, size).is_finite() {
        "bounds overflow"
    } else {
        return Ok(());
    };
    Err(StoreError::InvalidGeometry {
        id: id.clone(),
        reason,
    })
}

fn rejected(op: &'static str, err: StoreError) -> StoreError {
    tracing::warn!(op, %err, "store mutation rejected");
    err
}
