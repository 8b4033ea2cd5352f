//! Rendering: draws the grid and selection overlay to a 2D context.
//!
//! This module is the only place that touches [`web_sys::CanvasRenderingContext2d`].
//! Element content itself is rendered by the host; the overlay canvas sits
//! on top of it and shows the grid, empty quiz-slot placeholders, and the
//! selection outline with its eight resize handles. It reads engine state and
//! never mutates it.
//!
//! All fallible `Canvas2D` calls propagate errors via `Result<(), JsValue>`.
//! The top-level caller ([`crate::engine::Engine::render`]) handles the result.

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use crate::engine::EngineCore;
use crate::geometry::{Geometry, Point};

const GRID_COLOR: &str = "rgba(31, 26, 23, 0.08)";
const SELECTION_COLOR: &str = "#1E90FF";
const HANDLE_FILL: &str = "#fff";
const SLOT_COLOR: &str = "rgba(31, 26, 23, 0.35)";

/// Dash segment length for selection and placeholder outlines.
const DASH: f64 = 4.0;

/// A single grid line in canvas-local units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridLine {
    pub from: Point,
    pub to: Point,
}

/// Interior grid lines for a `width` x `height` canvas at pitch `grid`.
///
/// Lines sit on every multiple of `grid` strictly inside the canvas; the
/// outer border is not included. A zero pitch yields no lines.
#[must_use]
pub fn grid_lines(width: f64, height: f64, grid: u32) -> Vec<GridLine> {
    if grid == 0 {
        return Vec::new();
    }
    let step = f64::from(grid);
    let ticks = |extent: f64| {
        std::iter::successors(Some(step), move |v| Some(v + step)).take_while(move |v| *v < extent)
    };

    let vertical = ticks(width).map(|x| GridLine { from: Point::new(x, 0.0), to: Point::new(x, height) });
    let horizontal = ticks(height).map(|y| GridLine { from: Point::new(0.0, y), to: Point::new(width, y) });
    vertical.chain(horizontal).collect()
}

/// Draw the full overlay for the engine's current state.
///
/// # Errors
///
/// Returns `Err` if any `Canvas2D` call fails (e.g. invalid context state).
pub fn draw(ctx: &CanvasRenderingContext2d, core: &EngineCore) -> Result<(), JsValue> {
    let config = &core.config;
    ctx.clear_rect(0.0, 0.0, config.width, config.height);

    if config.show_grid {
        draw_grid(ctx, &grid_lines(config.width, config.height, config.grid_size));
    }

    if core.ui.show_quadrants {
        for slot in core.empty_quadrant_slots() {
            draw_dashed_rect(ctx, &slot.geometry, SLOT_COLOR)?;
        }
    }

    if let Some(el) = core.ui.selected_id.and_then(|id| core.element(&id)) {
        draw_dashed_rect(ctx, &el.geometry(), SELECTION_COLOR)?;
    }

    if let Some(handles) = core.handle_rects() {
        ctx.save();
        ctx.set_fill_style_str(HANDLE_FILL);
        ctx.set_stroke_style_str(SELECTION_COLOR);
        ctx.set_line_width(1.0);
        for (_, rect) in &handles {
            ctx.fill_rect(rect.x, rect.y, rect.width, rect.height);
            ctx.stroke_rect(rect.x, rect.y, rect.width, rect.height);
        }
        ctx.restore();
    }

    Ok(())
}

fn draw_grid(ctx: &CanvasRenderingContext2d, lines: &[GridLine]) {
    ctx.save();
    ctx.set_stroke_style_str(GRID_COLOR);
    ctx.set_line_width(1.0);
    ctx.begin_path();
    for line in lines {
        ctx.move_to(line.from.x, line.from.y);
        ctx.line_to(line.to.x, line.to.y);
    }
    ctx.stroke();
    ctx.restore();
}

fn draw_dashed_rect(ctx: &CanvasRenderingContext2d, rect: &Geometry, color: &str) -> Result<(), JsValue> {
    ctx.save();
    ctx.set_stroke_style_str(color);
    ctx.set_line_width(1.0);
    let dash_array = js_sys::Array::new();
    dash_array.push(&DASH.into());
    dash_array.push(&DASH.into());
    ctx.set_line_dash(&dash_array)?;
    ctx.stroke_rect(rect.x, rect.y, rect.width, rect.height);
    ctx.set_line_dash(&js_sys::Array::new())?;
    ctx.restore();
    Ok(())
}
