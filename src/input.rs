//! Input model: mouse buttons, gesture kinds, and the gesture state machine.
//!
//! `InputState` is the active gesture being tracked between pointer-down and
//! pointer-up. Each active variant carries a [`Gesture`] with everything the
//! transform needs to recompute geometry from scratch on every move: the
//! pointer position and element geometry captured at pointer-down.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use crate::element::ElementId;
use crate::geometry::{Geometry, Point};
use crate::hit::ResizeHandle;

/// Mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    /// Left mouse button (or single-finger tap).
    Primary,
    /// Middle mouse button (scroll wheel click).
    Middle,
    /// Right mouse button (or two-finger tap).
    Secondary,
}

impl Button {
    /// Map a DOM `MouseEvent.button` code. Back/forward buttons map to `None`.
    #[must_use]
    pub fn from_dom(code: i16) -> Option<Self> {
        match code {
            0 => Some(Self::Primary),
            1 => Some(Self::Middle),
            2 => Some(Self::Secondary),
            _ => None,
        }
    }
}

/// What a pointer-down on an element should start.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureMode {
    /// Move the element without changing its size.
    Drag,
    /// Resize the element from one of its eight handles.
    Resize(ResizeHandle),
}

/// Context captured when a gesture starts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Gesture {
    /// Id of the element being manipulated.
    pub target: ElementId,
    /// Canvas-local pointer position at pointer-down.
    pub origin_pointer: Point,
    /// Element geometry at pointer-down.
    pub origin_geometry: Geometry,
    /// Geometry most recently emitted for this gesture, used to suppress
    /// updates that would not change anything.
    pub last_emitted: Geometry,
}

impl Gesture {
    #[must_use]
    pub fn new(target: ElementId, origin_pointer: Point, origin_geometry: Geometry) -> Self {
        Self { target, origin_pointer, origin_geometry, last_emitted: origin_geometry }
    }

    /// Whether the element has been moved or resized since pointer-down.
    #[must_use]
    pub fn has_changed(&self) -> bool {
        self.last_emitted != self.origin_geometry
    }
}

/// Internal state for the input state machine.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum InputState {
    /// No gesture in progress; waiting for the next pointer-down.
    #[default]
    Idle,
    /// The user is moving an element across the canvas.
    Dragging(Gesture),
    /// The user is resizing an element by dragging one of its handles.
    Resizing(Gesture, ResizeHandle),
}

impl InputState {
    /// The gesture in progress, if any.
    #[must_use]
    pub fn gesture(&self) -> Option<&Gesture> {
        match self {
            Self::Idle => None,
            Self::Dragging(g) | Self::Resizing(g, _) => Some(g),
        }
    }

    pub fn gesture_mut(&mut self) -> Option<&mut Gesture> {
        match self {
            Self::Idle => None,
            Self::Dragging(g) | Self::Resizing(g, _) => Some(g),
        }
    }

    #[must_use]
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }
}

/// Cursor shown over empty canvas.
pub const CURSOR_DEFAULT: &str = "default";

/// Cursor shown over an element body.
pub const CURSOR_MOVE: &str = "move";

/// Persistent UI state visible to the renderer.
#[derive(Debug, Clone, PartialEq)]
pub struct UiState {
    /// The id of the currently selected element, if any.
    pub selected_id: Option<ElementId>,
    /// An exclusive drawing/annotation mode owns the pointer; elements and
    /// handles are not hit-testable while it is on.
    pub drawing_mode: bool,
    /// Outline the empty quiz quadrant slots as create affordances.
    pub show_quadrants: bool,
    /// CSS cursor last requested from the host.
    pub cursor: &'static str,
}

impl Default for UiState {
    fn default() -> Self {
        Self { selected_id: None, drawing_mode: false, show_quadrants: false, cursor: CURSOR_DEFAULT }
    }
}

impl UiState {
    /// Whether resize handles are shown and hit-testable.
    #[must_use]
    pub fn handles_active(&self) -> bool {
        self.selected_id.is_some() && !self.drawing_mode
    }
}
