// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Point, Size};
use peniko::Color;
use trellis_store::{Node, NodeId, NodeStyle, Shape};

/// Payload key under which a dropped node records its template id.
pub const TEMPLATE_DATA_KEY: &str = "template";

/// Palette entry describing the kind of node a drop creates.
#[derive(Clone, Debug, PartialEq)]
pub struct NodeTemplate {
    /// Palette identity, copied into the new node's payload.
    pub id: String,
    /// Display name, used as the new node's label.
    pub name: String,
    /// Outline of the new node.
    pub shape: Shape,
    /// Fill color of the new node.
    pub color: Color,
    /// Width in world units.
    pub width: f64,
    /// Height in world units.
    pub height: f64,
}

impl NodeTemplate {
    /// A 120x60 template with the default fill.
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>, shape: Shape) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            shape,
            color: NodeStyle::default().fill,
            width: 120.0,
            height: 60.0,
        }
    }

    /// Sets the fill color.
    #[must_use]
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    /// Sets the size.
    #[must_use]
    pub fn with_size(mut self, width: f64, height: f64) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// One template per [`Shape`], in declaration order.
    #[must_use]
    pub fn palette() -> Vec<Self> {
        Shape::ALL
            .iter()
            .map(|&shape| {
                let template = Self::new(shape.name(), shape.name(), shape);
                match shape {
                    Shape::Ellipse | Shape::Diamond => template.with_size(80.0, 80.0),
                    Shape::Rectangle | Shape::RoundedRectangle => template,
                }
            })
            .collect()
    }

    /// Builds a node with id `id` whose top-left corner is at `world`.
    #[must_use]
    pub fn instantiate(&self, id: NodeId, world: Point) -> Node {
        let style = NodeStyle {
            fill: self.color,
            ..NodeStyle::default()
        };
        Node::new(id, self.shape, world, Size::new(self.width, self.height))
            .with_label(self.name.clone())
            .with_style(style)
            .with_data(TEMPLATE_DATA_KEY, self.id.clone())
    }
}
