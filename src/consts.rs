//! Shared numeric constants for the canvas crate.

// ── Element bounds ──────────────────────────────────────────────

/// Smallest width an element may be resized to.
pub const MIN_WIDTH: f64 = 50.0;

/// Smallest height an element may be resized to.
pub const MIN_HEIGHT: f64 = 30.0;

// ── Canvas defaults ─────────────────────────────────────────────

/// Default card canvas width in canvas units.
pub const DEFAULT_CANVAS_WIDTH: f64 = 800.0;

/// Default card canvas height in canvas units (3:2 card aspect).
pub const DEFAULT_CANVAS_HEIGHT: f64 = 533.0;

/// Default grid pitch used for the overlay and for snapping.
pub const DEFAULT_GRID_SIZE: u32 = 20;

// ── Hit-testing ─────────────────────────────────────────────────

/// Edge length of a square resize handle, centered on its anchor point.
pub const HANDLE_SIZE: f64 = 8.0;

// ── Auto-arrangement ────────────────────────────────────────────

/// Horizontal pitch of a grid-tiling cell.
pub const GRID_CELL_WIDTH: f64 = 200.0;

/// Vertical pitch of a grid-tiling cell.
pub const GRID_CELL_HEIGHT: f64 = 150.0;

/// Offset of the first grid-tiling cell and inset of the quiz quadrants.
pub const GRID_PAD: f64 = 20.0;

/// Vertical gap between consecutive elements of a layout region.
pub const REGION_GAP: f64 = 15.0;

/// Distance from the canvas edge to the first placed element.
pub const REGION_MARGIN: f64 = 20.0;

/// Text larger than this font size is treated as a title.
pub const TITLE_FONT_SIZE: f64 = 20.0;

/// Number of slots in the quiz quadrant layout.
pub const QUADRANT_SLOTS: usize = 4;
