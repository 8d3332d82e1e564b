// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Node and edge records.

use std::collections::BTreeMap;
use std::fmt;

use kurbo::{Point, Rect, Size};
use peniko::Color;

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(String);

        impl $name {
            /// Wraps a string as an id.
            #[must_use]
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Returns the id as a string slice.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self::new(id)
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }
    };
}

string_id!(
    /// Unique, immutable identity of a [`Node`].
    NodeId
);

string_id!(
    /// Unique, immutable identity of an [`Edge`].
    EdgeId
);

/// Closed set of node outlines.
///
/// Renderers dispatch on this with an exhaustive `match`, so a new variant is
/// a compile error everywhere a shape is drawn.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Shape {
    /// Axis-aligned rectangle filling the bounds.
    #[default]
    Rectangle,
    /// Rectangle with rounded corners.
    RoundedRectangle,
    /// Ellipse inscribed in the bounds.
    Ellipse,
    /// Rhombus touching the midpoint of each side of the bounds.
    Diamond,
}

impl Shape {
    /// Every variant, in declaration order.
    pub const ALL: [Self; 4] = [
        Self::Rectangle,
        Self::RoundedRectangle,
        Self::Ellipse,
        Self::Diamond,
    ];

    /// Short lowercase name, for labels and logs.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Rectangle => "rectangle",
            Self::RoundedRectangle => "rounded-rectangle",
            Self::Ellipse => "ellipse",
            Self::Diamond => "diamond",
        }
    }
}

/// Side of a node an edge attaches to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Port {
    /// Midpoint of the top side.
    Top,
    /// Midpoint of the right side.
    Right,
    /// Midpoint of the bottom side.
    Bottom,
    /// Midpoint of the left side.
    Left,
}

/// Visual style of a node.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NodeStyle {
    /// Interior color.
    pub fill: Color,
    /// Outline color.
    pub stroke: Color,
    /// Outline width in screen pixels.
    pub stroke_width: f64,
}

impl Default for NodeStyle {
    fn default() -> Self {
        Self {
            fill: Color::from_rgb8(0xF5, 0xF7, 0xFA),
            stroke: Color::from_rgb8(0x3C, 0x46, 0x55),
            stroke_width: 1.5,
        }
    }
}

/// Visual style of an edge.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EdgeStyle {
    /// Line color.
    pub stroke: Color,
    /// Line width in screen pixels.
    pub width: f64,
}

impl Default for EdgeStyle {
    fn default() -> Self {
        Self {
            stroke: Color::from_rgb8(0x6B, 0x72, 0x80),
            width: 1.5,
        }
    }
}

/// A typed box on the diagram surface.
///
/// `position` is the top-left corner of the bounding box in world units.
/// Once a node is in a [`DiagramStore`](crate::DiagramStore), its id never
/// changes and its geometry changes only through
/// [`DiagramStore::move_node`](crate::DiagramStore::move_node).
#[derive(Clone, Debug, PartialEq)]
pub struct Node {
    /// Identity.
    pub id: NodeId,
    /// Outline variant.
    pub shape: Shape,
    /// Text drawn inside the node.
    pub label: String,
    /// Top-left corner in world units.
    pub position: Point,
    /// Width and height in world units.
    pub size: Size,
    /// Colors and stroke.
    pub style: NodeStyle,
    /// Caller-defined payload; never interpreted by the engine.
    pub data: BTreeMap<String, String>,
}

impl Node {
    /// Creates an unlabeled node with the default style.
    #[must_use]
    pub fn new(id: impl Into<NodeId>, shape: Shape, position: Point, size: Size) -> Self {
        Self {
            id: id.into(),
            shape,
            label: String::new(),
            position,
            size,
            style: NodeStyle::default(),
            data: BTreeMap::new(),
        }
    }

    /// Sets the label.
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Sets the style.
    #[must_use]
    pub fn with_style(mut self, style: NodeStyle) -> Self {
        self.style = style;
        self
    }

    /// Adds one payload entry.
    #[must_use]
    pub fn with_data(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.data.insert(key.into(), value.into());
        self
    }

    /// World-space bounding box.
    #[must_use]
    pub fn bounds(&self) -> Rect {
        Rect::from_origin_size(self.position, self.size)
    }

    /// World-space center of the bounding box.
    #[must_use]
    pub fn center(&self) -> Point {
        self.bounds().center()
    }

    /// World-space point an edge attaches to: the port's side midpoint, or the
    /// center when no port is given.
    #[must_use]
    pub fn anchor(&self, port: Option<Port>) -> Point {
        let b = self.bounds();
        let c = b.center();
        match port {
            None => c,
            Some(Port::Top) => Point::new(c.x, b.y0),
            Some(Port::Right) => Point::new(b.x1, c.y),
            Some(Port::Bottom) => Point::new(c.x, b.y1),
            Some(Port::Left) => Point::new(b.x0, c.y),
        }
    }
}

/// A straight connection between two nodes.
#[derive(Clone, Debug, PartialEq)]
pub struct Edge {
    /// Identity.
    pub id: EdgeId,
    /// Node the edge starts at.
    pub source: NodeId,
    /// Node the edge ends at.
    pub target: NodeId,
    /// Attachment side on the source; `None` means the center.
    pub source_port: Option<Port>,
    /// Attachment side on the target; `None` means the center.
    pub target_port: Option<Port>,
    /// Line style.
    pub style: EdgeStyle,
}

impl Edge {
    /// Creates a center-to-center edge with the default style.
    #[must_use]
    pub fn new(
        id: impl Into<EdgeId>,
        source: impl Into<NodeId>,
        target: impl Into<NodeId>,
    ) -> Self {
        Self {
            id: id.into(),
            source: source.into(),
            target: target.into(),
            source_port: None,
            target_port: None,
            style: EdgeStyle::default(),
        }
    }

    /// Sets the attachment ports.
    #[must_use]
    pub fn with_ports(mut self, source: Option<Port>, target: Option<Port>) -> Self {
        self.source_port = source;
        self.target_port = target;
        self
    }

    /// Sets the style.
    #[must_use]
    pub fn with_style(mut self, style: EdgeStyle) -> Self {
        self.style = style;
        self
    }

    /// Returns `true` if either endpoint is `node`.
    #[must_use]
    pub fn touches(&self, node: &NodeId) -> bool {
        &self.source == node || &self.target == node
    }
}
