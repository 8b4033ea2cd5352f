//! Auto-arrangement heuristics.
//!
//! Every function here is pure: it takes the current element list and the
//! canvas size and returns the same elements, in the same order, with new
//! geometry (and for some layouts a new `z_index`). Payloads are never
//! touched. An empty input always yields an empty output.

#[cfg(test)]
#[path = "layout_test.rs"]
mod layout_test;

use serde::{Deserialize, Serialize};

use crate::consts::{GRID_CELL_HEIGHT, GRID_CELL_WIDTH, GRID_PAD, MIN_HEIGHT, MIN_WIDTH, QUADRANT_SLOTS, REGION_GAP, REGION_MARGIN};
use crate::element::{CanvasElement, ElementKind};
use crate::geometry::Geometry;

/// Which arrangement to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ArrangeKind {
    /// Tile elements into a square-ish grid in list order.
    Grid,
    /// Titles on top, images left, body text right, quizzes at the bottom.
    ContentPriority,
    /// Fixed 2x2 quiz layout addressed by `z_index`.
    QuizQuadrant,
    /// Move the group so its bounding box is centered on the canvas.
    Center,
    /// Stack elements vertically, each horizontally centered.
    Stack,
}

/// Run the arrangement selected by `kind`.
#[must_use]
pub fn arrange(kind: ArrangeKind, elements: &[CanvasElement], canvas_width: f64, canvas_height: f64) -> Vec<CanvasElement> {
    match kind {
        ArrangeKind::Grid => arrange_grid(elements),
        ArrangeKind::ContentPriority => arrange_content_priority(elements, canvas_width),
        ArrangeKind::QuizQuadrant => arrange_quiz_quadrants(elements, canvas_width, canvas_height),
        ArrangeKind::Center => arrange_center(elements, canvas_width, canvas_height),
        ArrangeKind::Stack => arrange_stack(elements, canvas_width),
    }
}

// =============================================================
// Grid tiling
// =============================================================

/// Number of grid columns for `n` elements: `ceil(sqrt(n))`.
#[must_use]
pub fn grid_columns(n: usize) -> usize {
    let mut cols = 0;
    while cols * cols < n {
        cols += 1;
    }
    cols
}

/// Place element `i` in cell `(i / cols, i % cols)`. Sizes are unchanged.
#[must_use]
pub fn arrange_grid(elements: &[CanvasElement]) -> Vec<CanvasElement> {
    let cols = grid_columns(elements.len());
    elements
        .iter()
        .enumerate()
        .map(|(i, el)| {
            let (row, col) = (i / cols, i % cols);
            #[allow(clippy::cast_precision_loss)]
            let (x, y) = (col as f64 * GRID_CELL_WIDTH + GRID_PAD, row as f64 * GRID_CELL_HEIGHT + GRID_PAD);
            CanvasElement { x, y, ..el.clone() }
        })
        .collect()
}

// =============================================================
// Content-priority layout
// =============================================================

/// Region an element is assigned to by the content-priority layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Region {
    /// Large text, centered at the top.
    Title,
    /// Images, in a left column below the titles.
    Image,
    /// Remaining text, in a right column beside the images.
    Body,
    /// Quiz elements, centered below everything else.
    Interactive,
    /// Media and embeds that fit none of the above, stacked at the left
    /// margin below the quizzes.
    Unclassified,
}

/// Classify an element for the content-priority layout.
#[must_use]
pub fn classify(el: &CanvasElement) -> Region {
    match el.kind() {
        ElementKind::Text if el.payload.is_title() => Region::Title,
        ElementKind::Text => Region::Body,
        ElementKind::Image => Region::Image,
        k if k.is_interactive() => Region::Interactive,
        _ => Region::Unclassified,
    }
}

/// Vertical cursor for one region.
struct Column {
    y: f64,
}

impl Column {
    /// Return the y for an element of `height` and advance past it.
    fn place(&mut self, height: f64) -> f64 {
        let y = self.y;
        self.y += height + REGION_GAP;
        y
    }
}

/// Lay out elements by what they contain.
///
/// Regions are filled in the order title, image, body, interactive,
/// unclassified. `z_index` is reassigned in placement order so that within
/// each region later elements sit on top of earlier ones.
#[must_use]
pub fn arrange_content_priority(elements: &[CanvasElement], canvas_width: f64) -> Vec<CanvasElement> {
    let mut out = elements.to_vec();
    let regions: Vec<Region> = out.iter().map(classify).collect();
    let indices = |region: Region| -> Vec<usize> { (0..regions.len()).filter(|&i| regions[i] == region).collect() };
    let centered = |width: f64| ((canvas_width - width) / 2.0).max(0.0);
    let mut z = 0;
    let mut place = |el: &mut CanvasElement, x: f64, y: f64| {
        el.x = x;
        el.y = y;
        el.z_index = z;
        z += 1;
    };

    let mut top = Column { y: REGION_MARGIN };
    for i in indices(Region::Title) {
        let y = top.place(out[i].height);
        let x = centered(out[i].width);
        place(&mut out[i], x, y);
    }

    let mut left = Column { y: top.y };
    let mut image_right: Option<f64> = None;
    for i in indices(Region::Image) {
        let y = left.place(out[i].height);
        place(&mut out[i], REGION_MARGIN, y);
        let right = out[i].x + out[i].width;
        image_right = Some(image_right.map_or(right, |r| r.max(right)));
    }

    let body_x = image_right.map_or(REGION_MARGIN, |r| r + REGION_GAP);
    let mut right = Column { y: top.y };
    for i in indices(Region::Body) {
        let y = right.place(out[i].height);
        place(&mut out[i], body_x, y);
    }

    let mut bottom = Column { y: left.y.max(right.y) };
    for i in indices(Region::Interactive) {
        let y = bottom.place(out[i].height);
        let x = centered(out[i].width);
        place(&mut out[i], x, y);
    }

    let mut rest = Column { y: bottom.y };
    for i in indices(Region::Unclassified) {
        let y = rest.place(out[i].height);
        place(&mut out[i], REGION_MARGIN, y);
    }

    out
}

// =============================================================
// Quiz quadrant layout
// =============================================================

/// One cell of the fixed 2x2 quiz layout.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuadrantSlot {
    /// `0` top-left, `1` top-right, `2` bottom-left, `3` bottom-right.
    pub index: usize,
    /// The `z_index` an element must carry to occupy this slot.
    pub z_index: i64,
    /// Where an element in this slot is placed.
    pub geometry: Geometry,
}

/// The four quadrant slots for a canvas, inset by [`GRID_PAD`] on every side
/// and between slots.
#[must_use]
pub fn quadrant_slots(canvas_width: f64, canvas_height: f64) -> [QuadrantSlot; QUADRANT_SLOTS] {
    let width = ((canvas_width - 3.0 * GRID_PAD) / 2.0).max(MIN_WIDTH);
    let height = ((canvas_height - 3.0 * GRID_PAD) / 2.0).max(MIN_HEIGHT);
    std::array::from_fn(|index| {
        let (row, col) = (index / 2, index % 2);
        #[allow(clippy::cast_precision_loss, clippy::cast_possible_wrap)]
        let (fx, fy, z_index) = (col as f64, row as f64, index as i64);
        QuadrantSlot {
            index,
            z_index,
            geometry: Geometry {
                x: GRID_PAD + fx * (width + GRID_PAD),
                y: GRID_PAD + fy * (height + GRID_PAD),
                width,
                height,
            },
        }
    })
}

/// Assign quiz elements (by position in `elements`) to slots.
///
/// An element keeps the slot its `z_index` names when that slot is free.
/// Quiz elements with an out-of-range or already-claimed `z_index` take the
/// first free slot; once all four are taken the rest stay unassigned.
fn assign_slots(elements: &[CanvasElement]) -> [Option<usize>; QUADRANT_SLOTS] {
    let mut slots = [None; QUADRANT_SLOTS];
    let quiz: Vec<usize> = (0..elements.len())
        .filter(|&i| elements[i].kind().is_interactive())
        .collect();

    let mut overflow = Vec::new();
    for &i in &quiz {
        match usize::try_from(elements[i].z_index) {
            Ok(slot) if slot < QUADRANT_SLOTS && slots[slot].is_none() => slots[slot] = Some(i),
            _ => overflow.push(i),
        }
    }
    for i in overflow {
        if let Some(free) = slots.iter_mut().find(|s| s.is_none()) {
            *free = Some(i);
        }
    }
    slots
}

/// Snap every quiz element into its quadrant slot.
///
/// Placed elements take the slot's geometry and `z_index`. Non-quiz elements
/// and quiz elements that did not fit are returned unchanged.
#[must_use]
pub fn arrange_quiz_quadrants(elements: &[CanvasElement], canvas_width: f64, canvas_height: f64) -> Vec<CanvasElement> {
    let mut out = elements.to_vec();
    let slots = quadrant_slots(canvas_width, canvas_height);
    for (slot, assigned) in slots.iter().zip(assign_slots(elements)) {
        let Some(i) = assigned else {
            continue;
        };
        let el = &mut out[i];
        el.x = slot.geometry.x;
        el.y = slot.geometry.y;
        el.width = slot.geometry.width;
        el.height = slot.geometry.height;
        el.z_index = slot.z_index;
    }
    out
}

/// Slots no quiz element would occupy after [`arrange_quiz_quadrants`].
///
/// The host offers a "create question here" affordance for each, creating
/// the new element with the slot's `z_index`.
#[must_use]
pub fn empty_quadrant_slots(elements: &[CanvasElement], canvas_width: f64, canvas_height: f64) -> Vec<QuadrantSlot> {
    quadrant_slots(canvas_width, canvas_height)
        .into_iter()
        .zip(assign_slots(elements))
        .filter(|(_, assigned)| assigned.is_none())
        .map(|(slot, _)| slot)
        .collect()
}

// =============================================================
// Center and stack
// =============================================================

/// Translate every element by the same offset so the group's bounding box is
/// centered on the canvas. Relative positions are preserved.
#[must_use]
pub fn arrange_center(elements: &[CanvasElement], canvas_width: f64, canvas_height: f64) -> Vec<CanvasElement> {
    let Some(bounds) = Geometry::union_all(elements.iter().map(CanvasElement::geometry)) else {
        return Vec::new();
    };
    let dx = (canvas_width - bounds.width) / 2.0 - bounds.x;
    let dy = (canvas_height - bounds.height) / 2.0 - bounds.y;
    elements
        .iter()
        .map(|el| CanvasElement { x: el.x + dx, y: el.y + dy, ..el.clone() })
        .collect()
}

/// Stack elements top to bottom in list order, each centered horizontally.
#[must_use]
pub fn arrange_stack(elements: &[CanvasElement], canvas_width: f64) -> Vec<CanvasElement> {
    let mut column = Column { y: REGION_MARGIN };
    elements
        .iter()
        .map(|el| {
            let y = column.place(el.height);
            let x = ((canvas_width - el.width) / 2.0).max(0.0);
            CanvasElement { x, y, ..el.clone() }
        })
        .collect()
}
