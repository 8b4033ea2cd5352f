//! Hit-testing: resize-handle geometry and element lookup under the pointer.

#[cfg(test)]
#[path = "hit_test.rs"]
mod hit_test;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::consts::HANDLE_SIZE;
use crate::element::{ElementId, ElementList};
use crate::geometry::{Geometry, Point};

/// Which part of an element was hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitPart {
    Body,
    ResizeHandle(ResizeHandle),
}

/// One of the eight resize handles around the selected element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResizeHandle {
    N,
    Ne,
    E,
    Se,
    S,
    Sw,
    W,
    Nw,
}

/// Which sides of the rectangle a handle drags.
///
/// Each letter of the handle name contributes independently: `e` grows the
/// width, `w` grows the width leftwards and moves `x`, `s` grows the height,
/// `n` grows the height upwards and moves `y`.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HandleEffect {
    pub north: bool,
    pub south: bool,
    pub east: bool,
    pub west: bool,
}

impl ResizeHandle {
    /// All handles in clockwise order starting at the top edge.
    pub const ALL: [ResizeHandle; 8] = [Self::N, Self::Ne, Self::E, Self::Se, Self::S, Self::Sw, Self::W, Self::Nw];

    #[must_use]
    pub fn effect(self) -> HandleEffect {
        let name = self.as_str();
        HandleEffect {
            north: name.contains('n'),
            south: name.contains('s'),
            east: name.contains('e'),
            west: name.contains('w'),
        }
    }

    /// The point on the element's outline the handle is centered on.
    #[must_use]
    pub fn anchor(self, g: &Geometry) -> Point {
        let fx = match self {
            Self::Nw | Self::W | Self::Sw => 0.0,
            Self::N | Self::S => 0.5,
            Self::Ne | Self::E | Self::Se => 1.0,
        };
        let fy = match self {
            Self::Nw | Self::N | Self::Ne => 0.0,
            Self::W | Self::E => 0.5,
            Self::Sw | Self::S | Self::Se => 1.0,
        };
        Point::new(g.x + g.width * fx, g.y + g.height * fy)
    }

    /// CSS cursor shown while hovering or dragging this handle.
    #[must_use]
    pub fn cursor(self) -> &'static str {
        match self {
            Self::N | Self::S => "ns-resize",
            Self::E | Self::W => "ew-resize",
            Self::Ne | Self::Sw => "nesw-resize",
            Self::Nw | Self::Se => "nwse-resize",
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::N => "n",
            Self::Ne => "ne",
            Self::E => "e",
            Self::Se => "se",
            Self::S => "s",
            Self::Sw => "sw",
            Self::W => "w",
            Self::Nw => "nw",
        }
    }
}

impl fmt::Display for ResizeHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error for a handle name outside `n, ne, e, se, s, sw, w, nw`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown resize handle: {0}")]
pub struct UnknownHandle(pub String);

impl FromStr for ResizeHandle {
    type Err = UnknownHandle;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|h| h.as_str() == s)
            .ok_or_else(|| UnknownHandle(s.to_owned()))
    }
}

/// Result of a hit test.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hit {
    pub element_id: ElementId,
    pub part: HitPart,
}

/// Hit-zone rectangles for all eight handles of an element.
#[must_use]
pub fn handle_rects(g: &Geometry) -> [(ResizeHandle, Geometry); 8] {
    ResizeHandle::ALL.map(|h| (h, Geometry::centered_square(h.anchor(g), HANDLE_SIZE)))
}

/// The handle of `g` under `pt`, if any.
#[must_use]
pub fn handle_at(g: &Geometry, pt: Point) -> Option<ResizeHandle> {
    handle_rects(g)
        .into_iter()
        .find(|(_, rect)| rect.contains(pt))
        .map(|(h, _)| h)
}

/// Test which element (if any) is under `pt`.
///
/// Handles of the selected element sit above every element, so they are
/// checked first and only when `handles_active` is set. Bodies are then
/// checked top-most first: highest `z_index`, and for equal `z_index` the
/// element later in the list.
#[must_use]
pub fn hit_test(pt: Point, elements: &ElementList, selected: Option<ElementId>, handles_active: bool) -> Option<Hit> {
    if handles_active {
        if let Some(el) = selected.and_then(|id| elements.get(&id)) {
            if let Some(handle) = handle_at(&el.geometry(), pt) {
                return Some(Hit { element_id: el.id, part: HitPart::ResizeHandle(handle) });
            }
        }
    }

    elements
        .sorted_elements()
        .into_iter()
        .rev()
        .find(|el| el.geometry().contains(pt))
        .map(|el| Hit { element_id: el.id, part: HitPart::Body })
}
