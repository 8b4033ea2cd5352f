//! Pointer-to-geometry transform for drag and resize gestures.
//!
//! Both functions are pure: they take the pointer delta since the gesture
//! began and the element's geometry at that moment, and return the complete
//! replacement geometry. Recomputing from the origin on every move keeps the
//! result independent of how many intermediate events were delivered.

#[cfg(test)]
#[path = "transform_test.rs"]
mod transform_test;

use crate::config::CanvasConfig;
use crate::consts::{MIN_HEIGHT, MIN_WIDTH};
use crate::geometry::{Geometry, Point, clamp_origin, snap_size, snap_to_grid};
use crate::hit::ResizeHandle;

/// New geometry for a drag by `delta` from `origin`.
///
/// Position snaps to the grid first and is then clamped so the element stays
/// fully inside the canvas. Clamping uses the origin size, which drag never
/// changes. An element larger than the canvas is pinned to the top-left.
#[must_use]
pub fn drag_geometry(origin: Geometry, delta: Point, config: &CanvasConfig) -> Geometry {
    let mut x = origin.x + delta.x;
    let mut y = origin.y + delta.y;

    if config.snap_to_grid {
        x = snap_to_grid(x, config.grid_size);
        y = snap_to_grid(y, config.grid_size);
    }

    Geometry {
        x: clamp_origin(x, config.width - origin.width),
        y: clamp_origin(y, config.height - origin.height),
        width: origin.width,
        height: origin.height,
    }
}

/// New geometry for a resize by `delta` from `origin` using `handle`.
///
/// Sizes are floored at [`MIN_WIDTH`]/[`MIN_HEIGHT`]. When the west or north
/// edge moves, the position follows the clamped size so the opposite edge
/// stays put. With snapping on, position and size are rounded to the grid
/// independently. The result is not clamped to the canvas.
#[must_use]
pub fn resize_geometry(origin: Geometry, handle: ResizeHandle, delta: Point, config: &CanvasConfig) -> Geometry {
    let effect = handle.effect();
    let mut g = origin;

    if effect.east {
        g.width = (origin.width + delta.x).max(MIN_WIDTH);
    }
    if effect.west {
        g.width = (origin.width - delta.x).max(MIN_WIDTH);
        g.x = origin.x + (origin.width - g.width);
    }
    if effect.south {
        g.height = (origin.height + delta.y).max(MIN_HEIGHT);
    }
    if effect.north {
        g.height = (origin.height - delta.y).max(MIN_HEIGHT);
        g.y = origin.y + (origin.height - g.height);
    }

    if config.snap_to_grid {
        let grid = config.grid_size;
        g.x = snap_to_grid(g.x, grid);
        g.y = snap_to_grid(g.y, grid);
        g.width = snap_size(g.width, grid, MIN_WIDTH);
        g.height = snap_size(g.height, grid, MIN_HEIGHT);
    }

    g
}
