// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Affine, Point, Rect, Size, Vec2};

/// Smallest zoom factor a [`Viewport`] accepts.
pub const MIN_ZOOM: f64 = 0.1;

/// Largest zoom factor a [`Viewport`] accepts.
pub const MAX_ZOOM: f64 = 5.0;

/// Partial viewport state merged by [`Viewport::set_viewport`].
///
/// Fields left as `None` keep their current value. This lets a host forward a
/// surface resize without touching pan or zoom, and vice versa.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ViewportUpdate {
    /// New world-space center.
    pub center: Option<Point>,
    /// New zoom factor; clamped into `[MIN_ZOOM, MAX_ZOOM]`.
    pub zoom: Option<f64>,
    /// New screen width in pixels; must be positive.
    pub screen_width: Option<f64>,
    /// New screen height in pixels; must be positive.
    pub screen_height: Option<f64>,
}

impl ViewportUpdate {
    /// An update that changes only the screen size.
    #[must_use]
    pub fn resize(width: f64, height: f64) -> Self {
        Self {
            screen_width: Some(width),
            screen_height: Some(height),
            ..Self::default()
        }
    }

    /// Sets the center field.
    #[must_use]
    pub fn with_center(mut self, center: Point) -> Self {
        self.center = Some(center);
        self
    }

    /// Sets the zoom field.
    #[must_use]
    pub fn with_zoom(mut self, zoom: f64) -> Self {
        self.zoom = Some(zoom);
        self
    }
}

/// Pan/zoom camera mapping world space onto a screen-space surface.
///
/// The camera is described by the world point shown at the middle of the
/// surface (`center`), a uniform `zoom` factor (screen pixels per world unit)
/// and the surface size in pixels. Screen coordinates have their origin at the
/// surface's top-left corner:
///
/// ```text
/// screen = (world - center) * zoom + screen_size / 2
/// ```
#[derive(Clone, Debug)]
pub struct Viewport {
    center: Point,
    zoom: f64,
    screen_size: Size,
    world_to_screen: Affine,
    screen_to_world: Affine,
}

impl Viewport {
    /// Creates a viewport centered on the world origin at zoom `1.0`.
    ///
    /// A non-positive or non-finite dimension of `screen_size` falls back to `1.0`
    /// so the transform stays invertible.
    #[must_use]
    pub fn new(screen_size: Size) -> Self {
        let screen_size = Size::new(
            valid_extent(screen_size.width).unwrap_or(1.0),
            valid_extent(screen_size.height).unwrap_or(1.0),
        );
        let mut vp = Self {
            center: Point::ORIGIN,
            zoom: 1.0,
            screen_size,
            world_to_screen: Affine::IDENTITY,
            screen_to_world: Affine::IDENTITY,
        };
        vp.rebuild_transforms();
        vp
    }

    /// Returns the world point shown at the middle of the surface.
    #[must_use]
    pub fn center(&self) -> Point {
        self.center
    }

    /// Returns the current zoom factor.
    #[must_use]
    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    /// Returns the surface size in pixels.
    #[must_use]
    pub fn screen_size(&self) -> Size {
        self.screen_size
    }

    /// Returns the surface rectangle in screen coordinates.
    #[must_use]
    pub fn screen_rect(&self) -> Rect {
        self.screen_size.to_rect()
    }

    /// Merges the supplied fields into the current state.
    ///
    /// Zoom is clamped into `[MIN_ZOOM, MAX_ZOOM]`. Non-finite values and
    /// non-positive screen dimensions are ignored and the previous value is kept.
    /// Returns `true` if anything changed.
    pub fn set_viewport(&mut self, update: ViewportUpdate) -> bool {
        let mut changed = false;
        if let Some(center) = update.center
            && center.is_finite()
            && center != self.center
        {
            self.center = center;
            changed = true;
        }
        if let Some(zoom) = update.zoom
            && zoom.is_finite()
        {
            let zoom = clamp_zoom(zoom);
            if zoom != self.zoom {
                self.zoom = zoom;
                changed = true;
            }
        }
        if let Some(width) = update.screen_width.and_then(valid_extent)
            && width != self.screen_size.width
        {
            self.screen_size.width = width;
            changed = true;
        }
        if let Some(height) = update.screen_height.and_then(valid_extent)
            && height != self.screen_size.height
        {
            self.screen_size.height = height;
            changed = true;
        }
        if changed {
            self.rebuild_transforms();
        }
        changed
    }

    /// Moves the center to `center`, keeping zoom.
    pub fn pan_to(&mut self, center: Point) -> bool {
        self.set_viewport(ViewportUpdate::default().with_center(center))
    }

    /// Multiplies zoom by `factor` while keeping the world point under
    /// `screen_point` fixed on screen.
    ///
    /// The world point under the cursor is sampled before and after the naive
    /// zoom change and the center is shifted by the difference. Non-positive or
    /// non-finite factors are ignored. Returns `true` if the zoom changed.
    pub fn zoom_at(&mut self, screen_point: Point, factor: f64) -> bool {
        if !factor.is_finite() || factor <= 0.0 || !screen_point.is_finite() {
            return false;
        }
        let new_zoom = clamp_zoom(self.zoom * factor);
        if new_zoom == self.zoom {
            return false;
        }

        let before = self.screen_to_world(screen_point);
        self.zoom = new_zoom;
        self.rebuild_transforms();
        let after = self.screen_to_world(screen_point);
        self.center += before - after;
        self.rebuild_transforms();
        true
    }

    /// Centers `world_rect` and picks the largest zoom that shows it with
    /// `padding` pixels of margin on every side.
    ///
    /// Degenerate rectangles only re-center. The resulting zoom is clamped.
    pub fn fit_rect(&mut self, world_rect: Rect, padding: f64) {
        if !world_rect.is_finite() {
            return;
        }
        let world_rect = world_rect.abs();
        let padding = if padding.is_finite() { padding.max(0.0) } else { 0.0 };
        let avail_w = (self.screen_size.width - 2.0 * padding).max(1.0);
        let avail_h = (self.screen_size.height - 2.0 * padding).max(1.0);

        let mut update = ViewportUpdate::default().with_center(world_rect.center());
        if world_rect.width() > 0.0 && world_rect.height() > 0.0 {
            let sx = avail_w / world_rect.width();
            let sy = avail_h / world_rect.height();
            update = update.with_zoom(sx.min(sy));
        }
        self.set_viewport(update);
    }

    /// Converts a screen-space point into world coordinates.
    #[must_use]
    pub fn screen_to_world(&self, pt: Point) -> Point {
        self.screen_to_world * pt
    }

    /// Converts a world-space point into screen coordinates.
    #[must_use]
    pub fn world_to_screen(&self, pt: Point) -> Point {
        self.world_to_screen * pt
    }

    /// Converts a screen-space displacement into a world-space displacement at
    /// the current zoom.
    #[must_use]
    pub fn screen_to_world_vec(&self, delta: Vec2) -> Vec2 {
        delta / self.zoom
    }

    /// Converts a screen-space rectangle into world coordinates.
    #[must_use]
    pub fn screen_to_world_rect(&self, rect: Rect) -> Rect {
        // Axis-aligned uniform scale: the two corners are enough.
        Rect::from_points(
            self.screen_to_world(rect.origin()),
            self.screen_to_world(Point::new(rect.x1, rect.y1)),
        )
    }

    /// Converts a world-space rectangle into screen coordinates.
    #[must_use]
    pub fn world_to_screen_rect(&self, rect: Rect) -> Rect {
        Rect::from_points(
            self.world_to_screen(rect.origin()),
            self.world_to_screen(Point::new(rect.x1, rect.y1)),
        )
    }

    /// Returns the world-space rectangle currently covered by the surface.
    #[must_use]
    pub fn visible_world_rect(&self) -> Rect {
        self.screen_to_world_rect(self.screen_rect())
    }

    /// Returns how many world units one screen pixel spans.
    #[must_use]
    pub fn world_units_per_pixel(&self) -> f64 {
        1.0 / self.zoom
    }

    /// Returns the world → screen transform.
    #[must_use]
    pub fn world_to_screen_transform(&self) -> Affine {
        self.world_to_screen
    }

    /// Snapshot of the current viewport state for debugging and inspection.
    #[must_use]
    pub fn debug_info(&self) -> ViewportDebugInfo {
        ViewportDebugInfo {
            center: self.center,
            zoom: self.zoom,
            screen_size: self.screen_size,
            visible_world_rect: self.visible_world_rect(),
        }
    }

    fn rebuild_transforms(&mut self) {
        let half = self.screen_size.to_vec2() * 0.5;
        // World → screen: move center to origin, scale, then move origin to the surface middle.
        self.world_to_screen = Affine::translate(half)
            * Affine::scale(self.zoom)
            * Affine::translate(-self.center.to_vec2());
        self.screen_to_world = self.world_to_screen.inverse();
    }
}

/// Debug snapshot of a [`Viewport`] state.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewportDebugInfo {
    /// World point at the middle of the surface.
    pub center: Point,
    /// Current zoom factor.
    pub zoom: f64,
    /// Surface size in pixels.
    pub screen_size: Size,
    /// World-space rectangle currently visible.
    pub visible_world_rect: Rect,
}

fn clamp_zoom(zoom: f64) -> f64 {
    zoom.clamp(MIN_ZOOM, MAX_ZOOM)
}

fn valid_extent(v: f64) -> Option<f64> {
    (v.is_finite() && v > 0.0).then_some(v)
}
