// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Backend-neutral draw commands.

use kurbo::{BezPath, Ellipse, Point, Rect, RoundedRect};
use peniko::Color;
use trellis_store::{EdgeId, NodeId, Shape};

/// Screen-space outline of a node.
#[derive(Clone, Debug, PartialEq)]
pub enum Outline {
    /// Plain rectangle.
    Rect(Rect),
    /// Rectangle with uniform corner radius.
    RoundedRect(RoundedRect),
    /// Ellipse inscribed in this rectangle.
    Ellipse(Rect),
    /// Rhombus; corners are top, right, bottom, left.
    Diamond([Point; 4]),
}

impl Outline {
    /// Builds the outline of `shape` filling `bounds`.
    ///
    /// `corner_radius` only applies to [`Shape::RoundedRectangle`] and is
    /// capped at half the shorter side.
    #[must_use]
    pub fn for_shape(shape: Shape, bounds: Rect, corner_radius: f64) -> Self {
        match shape {
            Shape::Rectangle => Self::Rect(bounds),
            Shape::RoundedRectangle => {
                let radius = corner_radius.min(bounds.width().min(bounds.height()) * 0.5);
                Self::RoundedRect(bounds.to_rounded_rect(radius.max(0.0)))
            }
            Shape::Ellipse => Self::Ellipse(bounds),
            Shape::Diamond => {
                let c = bounds.center();
                Self::Diamond([
                    Point::new(c.x, bounds.y0),
                    Point::new(bounds.x1, c.y),
                    Point::new(c.x, bounds.y1),
                    Point::new(bounds.x0, c.y),
                ])
            }
        }
    }

    /// Smallest rectangle containing the outline.
    #[must_use]
    pub fn bounding_box(&self) -> Rect {
        match self {
            Self::Rect(rect) | Self::Ellipse(rect) => *rect,
            Self::RoundedRect(rr) => rr.rect(),
            Self::Diamond([top, right, bottom, left]) => {
                Rect::new(left.x, top.y, right.x, bottom.y)
            }
        }
    }

    /// Converts the outline into a closed path, flattening curves to
    /// `tolerance`.
    #[must_use]
    pub fn to_bez_path(&self, tolerance: f64) -> BezPath {
        use kurbo::Shape as _;

        match self {
            Self::Rect(rect) => rect.to_path(tolerance),
            Self::RoundedRect(rr) => rr.to_path(tolerance),
            Self::Ellipse(rect) => Ellipse::from_rect(*rect).to_path(tolerance),
            Self::Diamond(corners) => {
                let mut path = BezPath::new();
                path.move_to(corners[0]);
                for corner in &corners[1..] {
                    path.line_to(*corner);
                }
                path.close_path();
                path
            }
        }
    }
}

/// One drawing instruction in screen pixels.
///
/// A [`Frame`](crate::Frame) lists these back to front.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    /// Fill a node outline.
    Fill {
        /// Node being drawn.
        node: NodeId,
        /// Screen-space outline.
        outline: Outline,
        /// Fill color.
        color: Color,
    },
    /// Stroke a node outline.
    Stroke {
        /// Node being drawn.
        node: NodeId,
        /// Screen-space outline.
        outline: Outline,
        /// Stroke color.
        color: Color,
        /// Stroke width in pixels.
        width: f64,
    },
    /// Straight edge segment.
    Line {
        /// Edge being drawn.
        edge: EdgeId,
        /// Start point.
        from: Point,
        /// End point.
        to: Point,
        /// Line color.
        color: Color,
        /// Line width in pixels.
        width: f64,
    },
    /// Node label, centered on `center`.
    Label {
        /// Node the label belongs to.
        node: NodeId,
        /// Text to draw.
        text: String,
        /// Center of the text box.
        center: Point,
        /// Width the text should be clipped or ellipsized to.
        max_width: f64,
        /// Font size in pixels.
        font_size: f64,
        /// Text color.
        color: Color,
    },
    /// Dashed rectangle shown while the canvas is being panned.
    DashedRect {
        /// Rectangle to outline.
        rect: Rect,
        /// Dash pattern: on length, off length.
        dash: [f64; 2],
        /// Stroke color.
        color: Color,
    },
}

impl DrawCommand {
    /// Node this command draws, if any.
    #[must_use]
    pub fn node(&self) -> Option<&NodeId> {
        match self {
            Self::Fill { node, .. } | Self::Stroke { node, .. } | Self::Label { node, .. } => {
                Some(node)
            }
            Self::Line { .. } | Self::DashedRect { .. } => None,
        }
    }
}
