//! Canvas-local points and axis-aligned element geometry.
//!
//! All coordinates are canvas-local: the origin is the top-left corner of the
//! card surface and values are not rounded to integers. Rotation is never part
//! of these types; it is applied at render time only.

#[cfg(test)]
#[path = "geometry_test.rs"]
mod geometry_test;

use serde::{Deserialize, Serialize};

/// A point in canvas-local coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Component-wise difference `self - origin`.
    #[must_use]
    pub fn delta_from(self, origin: Point) -> Point {
        Point { x: self.x - origin.x, y: self.y - origin.y }
    }
}

/// Position and size of an element: top-left corner plus extent.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Geometry {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Geometry {
    #[must_use]
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    /// X coordinate of the right edge.
    #[must_use]
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Y coordinate of the bottom edge.
    #[must_use]
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    #[must_use]
    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Whether `pt` lies inside the rectangle (edges inclusive).
    #[must_use]
    pub fn contains(&self, pt: Point) -> bool {
        pt.x >= self.x && pt.x <= self.right() && pt.y >= self.y && pt.y <= self.bottom()
    }

    /// Square of side `size` centered on `center`.
    #[must_use]
    pub fn centered_square(center: Point, size: f64) -> Self {
        let half = size / 2.0;
        Self { x: center.x - half, y: center.y - half, width: size, height: size }
    }

    /// Smallest rectangle enclosing every rectangle in `items`, or `None` when empty.
    #[must_use]
    pub fn union_all<I>(items: I) -> Option<Self>
    where
        I: IntoIterator<Item = Geometry>,
    {
        items.into_iter().fold(None, |acc, g| {
            Some(match acc {
                None => g,
                Some(u) => {
                    let x = u.x.min(g.x);
                    let y = u.y.min(g.y);
                    Geometry { x, y, width: u.right().max(g.right()) - x, height: u.bottom().max(g.bottom()) - y }
                }
            })
        })
    }
}

/// Round `value` to the nearest multiple of `grid`.
///
/// Ties round toward positive infinity on both sides of zero, so `-30`
/// snaps to `-20` on a 20-unit grid. A zero grid leaves the value untouched.
#[must_use]
pub fn snap_to_grid(value: f64, grid: u32) -> f64 {
    if grid == 0 {
        return value;
    }
    let g = f64::from(grid);
    (value / g + 0.5).floor() * g
}

/// Snap a size to the grid without letting it fall below `min`.
///
/// When the nearest multiple is smaller than `min`, the smallest multiple
/// that is at least `min` is used instead.
#[must_use]
pub fn snap_size(value: f64, grid: u32, min: f64) -> f64 {
    let snapped = snap_to_grid(value, grid);
    if snapped >= min || grid == 0 {
        return snapped.max(min);
    }
    let g = f64::from(grid);
    (min / g).ceil() * g
}

/// Clamp `value` into `[0, max]`, collapsing to `0` when `max` is negative.
///
/// Used for drag bounds where an element wider than the canvas must still
/// produce a finite, non-panicking result.
#[must_use]
pub fn clamp_origin(value: f64, max: f64) -> f64 {
    value.min(max).max(0.0)
}
