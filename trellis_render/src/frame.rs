// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::time::Duration;

use peniko::Color;
use trellis_interaction::DragState;
use trellis_store::{DiagramStore, Node};
use trellis_view::Viewport;
use web_time::Instant;

use crate::command::{DrawCommand, Outline};
use crate::stats::{DEFAULT_STATS_CAPACITY, FrameStats, FrameStatsRing};

/// Look of everything the store does not style itself.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RenderConfig {
    /// Outline color of selected nodes.
    pub selection_stroke: Color,
    /// Outline width of selected nodes, in pixels.
    pub selection_stroke_width: f64,
    /// Corner radius of rounded rectangles, in world units.
    pub corner_radius: f64,
    /// Label font size, in world units.
    pub label_font_size: f64,
    /// Labels smaller than this many pixels are skipped.
    pub min_label_font_size: f64,
    /// Horizontal label padding inside a node, in pixels.
    pub label_padding: f64,
    /// Label color.
    pub label_color: Color,
    /// Color of the pan indicator.
    pub pan_indicator_color: Color,
    /// Dash pattern of the pan indicator.
    pub pan_indicator_dash: [f64; 2],
    /// Distance of the pan indicator from the surface edge, in pixels.
    pub pan_indicator_inset: f64,
    /// Frames of timing history to keep.
    pub stats_capacity: usize,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            selection_stroke: Color::from_rgb8(0x25, 0x63, 0xEB),
            selection_stroke_width: 2.5,
            corner_radius: 8.0,
            label_font_size: 14.0,
            min_label_font_size: 4.0,
            label_padding: 4.0,
            label_color: Color::from_rgb8(0x11, 0x18, 0x27),
            pan_indicator_color: Color::from_rgba8(0x25, 0x63, 0xEB, 0x80),
            pan_indicator_dash: [6.0, 4.0],
            pan_indicator_inset: 4.0,
            stats_capacity: DEFAULT_STATS_CAPACITY,
        }
    }
}

/// Commands for one frame, back to front, plus what it took to build them.
#[derive(Clone, Debug, PartialEq)]
pub struct Frame {
    /// Draw commands in paint order.
    pub commands: Vec<DrawCommand>,
    /// Measurements for this frame.
    pub stats: FrameStats,
}

/// Builds the draw commands for what `viewport` currently shows.
///
/// Read-only: the store is queried afresh and nothing is retained, so the
/// store may change freely between calls. Paint order is edges, then nodes
/// from largest to smallest (later-added first among equals) so the node a
/// hit-test picks is the one painted on top, then the pan indicator.
///
/// An edge is drawn when at least one of its endpoints is visible, so a link
/// leading off screen keeps its visible half.
#[must_use]
pub fn render_frame(
    store: &DiagramStore,
    viewport: &Viewport,
    drag: &DragState,
    config: &RenderConfig,
) -> Frame {
    let mut nodes = store.visible_nodes(viewport);
    let edges = store.visible_edges(&nodes);
    nodes.sort_by(|a, b| {
        area(b)
            .total_cmp(&area(a))
            .then_with(|| store.stacking_order(&a.id).cmp(&store.stacking_order(&b.id)))
    });

    let mut commands = Vec::with_capacity(edges.len() + nodes.len() * 3 + 1);
    for edge in &edges {
        let (Some(source), Some(target)) = (store.node(&edge.source), store.node(&edge.target))
        else {
            continue;
        };
        commands.push(DrawCommand::Line {
            edge: edge.id.clone(),
            from: viewport.world_to_screen(source.anchor(edge.source_port)),
            to: viewport.world_to_screen(target.anchor(edge.target_port)),
            color: edge.style.stroke,
            width: edge.style.width,
        });
    }

    let zoom = viewport.zoom();
    let selection = store.selection();
    for node in &nodes {
        let screen = viewport.world_to_screen_rect(node.bounds());
        let outline = Outline::for_shape(node.shape, screen, config.corner_radius * zoom);
        let (stroke, stroke_width) = if selection.contains(&node.id) {
            (config.selection_stroke, config.selection_stroke_width)
        } else {
            (node.style.stroke, node.style.stroke_width)
        };
        commands.push(DrawCommand::Fill {
            node: node.id.clone(),
            outline: outline.clone(),
            color: node.style.fill,
        });
        commands.push(DrawCommand::Stroke {
            node: node.id.clone(),
            outline,
            color: stroke,
            width: stroke_width,
        });

        let font_size = config.label_font_size * zoom;
        if !node.label.is_empty() && font_size >= config.min_label_font_size {
            commands.push(DrawCommand::Label {
                node: node.id.clone(),
                text: node.label.clone(),
                center: screen.center(),
                max_width: (screen.width() - 2.0 * config.label_padding).max(0.0),
                font_size,
                color: config.label_color,
            });
        }
    }

    if drag.is_panning() {
        commands.push(DrawCommand::DashedRect {
            rect: viewport.screen_rect().inset(-config.pan_indicator_inset),
            dash: config.pan_indicator_dash,
            color: config.pan_indicator_color,
        });
    }

    Frame {
        stats: FrameStats {
            visible_nodes: nodes.len(),
            visible_edges: edges.len(),
            commands: commands.len(),
            ..FrameStats::default()
        },
        commands,
    }
}

fn area(node: &Node) -> f64 {
    node.size.width * node.size.height
}

/// Renders frames and keeps their timing history.
#[derive(Clone, Debug)]
pub struct RenderLoop {
    config: RenderConfig,
    stats: FrameStatsRing,
    frames: u64,
}

impl Default for RenderLoop {
    fn default() -> Self {
        Self::new(RenderConfig::default())
    }
}

impl RenderLoop {
    /// Creates a loop with no frames rendered yet.
    #[must_use]
    pub fn new(config: RenderConfig) -> Self {
        Self {
            stats: FrameStatsRing::with_capacity(config.stats_capacity),
            config,
            frames: 0,
        }
    }

    /// The active configuration.
    #[must_use]
    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Builds one frame and records its timing.
    ///
    /// `last_hit_test` is attached to the frame's stats as-is.
    pub fn render(
        &mut self,
        store: &DiagramStore,
        viewport: &Viewport,
        drag: &DragState,
        last_hit_test: Option<Duration>,
    ) -> Frame {
        let start = Instant::now();
        let mut frame = render_frame(store, viewport, drag, &self.config);
        self.frames += 1;
        frame.stats.frame = self.frames;
        frame.stats.render_time = start.elapsed();
        frame.stats.last_hit_test = last_hit_test;
        tracing::trace!(
            frame = frame.stats.frame,
            nodes = frame.stats.visible_nodes,
            edges = frame.stats.visible_edges,
            "frame rendered"
        );
        self.stats.push(frame.stats);
        frame
    }

    /// Number of frames rendered so far.
    #[must_use]
    pub fn frame_count(&self) -> u64 {
        self.frames
    }

    /// Timing history.
    #[must_use]
    pub fn stats(&self) -> &FrameStatsRing {
        &self.stats
    }

    /// Stats of the most recent frame.
    #[must_use]
    pub fn last_stats(&self) -> Option<&FrameStats> {
        self.stats.latest()
    }
}
