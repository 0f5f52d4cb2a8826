//! Shared geometric primitives used by the hit-tester, guard, controller and extractor.

use serde::Deserialize;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned rectangle in surface pixels. Values are replaced, never mutated in place.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CropRect {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl CropRect {
    pub const fn new(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }

    /// Width over height. Only meaningful for non-degenerate rectangles.
    pub fn aspect_ratio(&self) -> f32 {
        self.width() / self.height()
    }

    pub fn center(&self) -> Point {
        Point::new(
            (self.left + self.right) / 2.0,
            (self.top + self.bottom) / 2.0,
        )
    }

    pub fn is_valid(&self) -> bool {
        self.left.is_finite()
            && self.top.is_finite()
            && self.right.is_finite()
            && self.bottom.is_finite()
            && self.left <= self.right
            && self.top < self.bottom
    }

    /// Half-open containment: left and top edges are inside, right and bottom are not,
    /// so rectangles sharing an edge never both contain a point on it.
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.left && point.x < self.right && point.y >= self.top && point.y < self.bottom
    }

    pub fn contains_rect(&self, other: &CropRect) -> bool {
        other.left >= self.left
            && other.top >= self.top
            && other.right <= self.right
            && other.bottom <= self.bottom
    }

    pub fn intersects(&self, other: &CropRect) -> bool {
        self.left < other.right
            && other.left < self.right
            && self.top < other.bottom
            && other.top < self.bottom
    }

    pub const fn with_top(self, top: f32) -> Self {
        Self { top, ..self }
    }

    pub const fn with_bottom(self, bottom: f32) -> Self {
        Self { bottom, ..self }
    }

    pub fn translated(self, dx: f32, dy: f32) -> Self {
        Self::new(
            self.left + dx,
            self.top + dy,
            self.right + dx,
            self.bottom + dy,
        )
    }
}

/// Size of the hosting surface for one layout pass.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct ContainerBounds {
    pub width: f32,
    pub height: f32,
}

impl ContainerBounds {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn rect(&self) -> CropRect {
        CropRect::new(0.0, 0.0, self.width, self.height)
    }

    /// Rectangle of the given fractional size centred in the container.
    pub fn centered_fraction(&self, width_fraction: f32, height_fraction: f32) -> CropRect {
        let result_width = self.width * width_fraction;
        let result_height = self.height * height_fraction;
        CropRect::new(
            (self.width - result_width) / 2.0,
            (self.height - result_height) / 2.0,
            (self.width + result_width) / 2.0,
            (self.height + result_height) / 2.0,
        )
    }

    /// Largest rectangle with the given aspect that fits, centred.
    pub fn fit_centered(&self, content_width: f32, content_height: f32) -> CropRect {
        let scale = (self.width / content_width).min(self.height / content_height);
        let fitted_width = content_width * scale;
        let fitted_height = content_height * scale;
        let left = (self.width - fitted_width) / 2.0;
        let top = (self.height - fitted_height) / 2.0;
        CropRect::new(left, top, left + fitted_width, top + fitted_height)
    }
}
