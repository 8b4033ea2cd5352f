use std::cell::RefCell;
use std::rc::Rc;

use tracing::{debug, warn};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, PointerEvent};

use crate::capture::{CaptureError, CaptureGuard, DocumentListeners};
use crate::config::{CanvasConfig, ConfigError};
use crate::element::{CanvasElement, ElementId, ElementList, ElementPayload, GeometryUpdate};
use crate::geometry::{Geometry, Point};
use crate::hit::{self, HitPart, ResizeHandle};
use crate::input::{Button, CURSOR_DEFAULT, CURSOR_MOVE, Gesture, GestureMode, InputState, UiState};
use crate::layout::{self, ArrangeKind, QuadrantSlot};
use crate::render;
use crate::transform;

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

/// Actions returned from input handlers for the host to process.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Commit new geometry for an element to the host's list.
    ElementUpdated { id: ElementId, update: GeometryUpdate },
    /// The selection changed; `None` means nothing is selected.
    SelectionChanged(Option<ElementId>),
    /// Show this CSS cursor over the canvas.
    SetCursor(&'static str),
    /// The overlay needs to be redrawn.
    RenderNeeded,
}

impl Action {
    /// Forward a host-facing action to `host`. Cursor and render requests are
    /// handled by the engine wrapper and ignored here.
    pub fn dispatch<H: EngineHost + ?Sized>(self, host: &mut H) {
        match self {
            Self::ElementUpdated { id, update } => host.update_element(id, update),
            Self::SelectionChanged(id) => host.select_element(id),
            Self::SetCursor(_) | Self::RenderNeeded => {}
        }
    }
}

/// Callbacks the host implements to own the element list and selection.
pub trait EngineHost {
    /// Commit a geometry update to the host's element list.
    fn update_element(&mut self, id: ElementId, update: GeometryUpdate);
    /// Record the new selection.
    fn select_element(&mut self, id: Option<ElementId>);
}

/// [`EngineHost`] built from two closures.
pub struct HostCallbacks {
    pub on_update: Box<dyn FnMut(ElementId, GeometryUpdate)>,
    pub on_select: Box<dyn FnMut(Option<ElementId>)>,
}

impl EngineHost for HostCallbacks {
    fn update_element(&mut self, id: ElementId, update: GeometryUpdate) {
        (self.on_update)(id, update);
    }

    fn select_element(&mut self, id: Option<ElementId>) {
        (self.on_select)(id);
    }
}

/// Core engine state: all logic that doesn't depend on the canvas element.
///
/// Separated from `Engine` so it can be tested without WASM/browser dependencies.
/// `elements` is a replica of the host's list for the active card face; the
/// engine updates it alongside every `ElementUpdated` it emits so queries and
/// hit-testing stay current before the host echoes the change back.
#[derive(Default)]
pub struct EngineCore {
    pub elements: ElementList,
    pub config: CanvasConfig,
    pub ui: UiState,
    pub input: InputState,
}

impl EngineCore {
    #[must_use]
    pub fn new(config: CanvasConfig) -> Self {
        Self { config, ..Self::default() }
    }

    // --- Data inputs ---

    /// Replace the replica with the host's list for the active card face.
    pub fn load_snapshot(&mut self, elements: Vec<CanvasElement>) {
        self.elements.load_snapshot(elements);
        if let Some(id) = self.ui.selected_id {
            if !self.elements.contains(&id) {
                self.ui.selected_id = None;
            }
        }
    }

    /// Host created an element.
    pub fn apply_create(&mut self, element: CanvasElement) {
        self.elements.insert(element);
    }

    /// Host changed an element's geometry.
    pub fn apply_update(&mut self, id: &ElementId, update: &GeometryUpdate) {
        self.elements.apply_geometry(id, update);
    }

    /// Host changed an element's content.
    pub fn apply_payload(&mut self, id: &ElementId, payload: ElementPayload) {
        self.elements.apply_payload(id, payload);
    }

    /// Host deleted an element. A gesture on it goes stale: further moves
    /// emit nothing and the next pointer-up returns to idle.
    pub fn apply_delete(&mut self, id: &ElementId) {
        self.elements.remove(id);
        if self.ui.selected_id.as_ref() == Some(id) {
            self.ui.selected_id = None;
        }
    }

    // --- Configuration ---

    /// Replace the canvas configuration.
    ///
    /// # Errors
    ///
    /// Returns the validation error and keeps the previous config.
    pub fn set_config(&mut self, config: CanvasConfig) -> Result<(), ConfigError> {
        config.validate()?;
        self.config = config;
        Ok(())
    }

    /// Change the grid pitch.
    ///
    /// # Errors
    ///
    /// Returns `ZeroGridSize` for a zero pitch.
    pub fn set_grid_size(&mut self, grid_size: u32) -> Result<(), ConfigError> {
        self.set_config(CanvasConfig { grid_size, ..self.config })
    }

    pub fn set_snap_to_grid(&mut self, snap: bool) {
        self.config.snap_to_grid = snap;
    }

    /// Flip grid overlay visibility.
    pub fn toggle_grid(&mut self) -> Vec<Action> {
        self.config.show_grid = !self.config.show_grid;
        vec![Action::RenderNeeded]
    }

    /// Show or hide the empty quiz-slot placeholders.
    pub fn set_show_quadrants(&mut self, show: bool) -> Vec<Action> {
        self.ui.show_quadrants = show;
        vec![Action::RenderNeeded]
    }

    /// Enter or leave the exclusive drawing mode. Entering ends any gesture.
    pub fn set_drawing_mode(&mut self, on: bool) -> Vec<Action> {
        let mut actions = Vec::new();
        if on && !self.input.is_idle() {
            actions.extend(self.on_pointer_up());
        }
        self.ui.drawing_mode = on;
        actions.push(Action::RenderNeeded);
        actions
    }

    // --- Selection ---

    /// Select an element, or clear the selection with `None`. Unknown ids
    /// are ignored.
    pub fn select(&mut self, id: Option<ElementId>) -> Vec<Action> {
        if let Some(id) = id {
            if !self.elements.contains(&id) {
                debug!(%id, "select: unknown element");
                return Vec::new();
            }
        }
        self.ui.selected_id = id;
        vec![Action::SelectionChanged(id), Action::RenderNeeded]
    }

    // --- Gestures ---

    /// Route a pointer-down to a gesture or a deselect.
    ///
    /// A hit on a handle of the selected element starts a resize, a hit on an
    /// element body selects it and starts a drag, and a hit on empty canvas
    /// clears the selection. Only the primary button acts, and nothing is
    /// hit-testable in drawing mode.
    pub fn on_pointer_down(&mut self, pt: Point, button: Button) -> Vec<Action> {
        if button != Button::Primary || self.ui.drawing_mode {
            return Vec::new();
        }
        if !self.input.is_idle() {
            warn!("pointer-down during an active gesture ignored");
            return Vec::new();
        }

        match hit::hit_test(pt, &self.elements, self.ui.selected_id, self.ui.handles_active()) {
            Some(hit) => {
                let mode = match hit.part {
                    HitPart::Body => GestureMode::Drag,
                    HitPart::ResizeHandle(handle) => GestureMode::Resize(handle),
                };
                self.begin_gesture(pt, hit.element_id, mode)
            }
            None => self.select(None),
        }
    }

    /// Start a drag or resize on `id` with the pointer at `pt`.
    ///
    /// Drag also selects the element. Resize requires the element to be the
    /// current selection. Neither starts in drawing mode. Unknown targets and
    /// calls during an active gesture leave the engine idle.
    pub fn begin_gesture(&mut self, pt: Point, id: ElementId, mode: GestureMode) -> Vec<Action> {
        if !self.input.is_idle() {
            warn!(%id, "begin_gesture during an active gesture ignored");
            return Vec::new();
        }
        if self.ui.drawing_mode {
            debug!(%id, ?mode, "gesture rejected: drawing mode");
            return Vec::new();
        }
        let Some(el) = self.elements.get(&id) else {
            warn!(%id, "begin_gesture: unknown element");
            return Vec::new();
        };
        let gesture = Gesture::new(id, pt, el.geometry());

        let mut actions = Vec::new();
        match mode {
            GestureMode::Drag => {
                self.ui.selected_id = Some(id);
                self.input = InputState::Dragging(gesture);
                actions.push(Action::SelectionChanged(Some(id)));
                actions.extend(self.set_cursor(CURSOR_MOVE));
            }
            GestureMode::Resize(handle) => {
                if self.ui.selected_id != Some(id) {
                    debug!(%id, %handle, "resize rejected: element not selected");
                    return Vec::new();
                }
                self.input = InputState::Resizing(gesture, handle);
                actions.extend(self.set_cursor(handle.cursor()));
            }
        }
        debug!(%id, ?mode, "gesture started");
        actions.push(Action::RenderNeeded);
        actions
    }

    /// Advance the active gesture, or update the hover cursor when idle.
    pub fn on_pointer_move(&mut self, pt: Point) -> Vec<Action> {
        let (gesture, geometry) = match self.input {
            InputState::Idle => return self.hover(pt),
            InputState::Dragging(g) => {
                (g, transform::drag_geometry(g.origin_geometry, pt.delta_from(g.origin_pointer), &self.config))
            }
            InputState::Resizing(g, handle) => (
                g,
                transform::resize_geometry(g.origin_geometry, handle, pt.delta_from(g.origin_pointer), &self.config),
            ),
        };

        if geometry == gesture.last_emitted || !self.elements.contains(&gesture.target) {
            return Vec::new();
        }
        if let Some(g) = self.input.gesture_mut() {
            g.last_emitted = geometry;
        }
        self.emit_geometry(gesture.target, geometry)
    }

    /// End the active gesture wherever the pointer is. Always returns to idle.
    pub fn on_pointer_up(&mut self) -> Vec<Action> {
        let prev = std::mem::take(&mut self.input);
        let Some(gesture) = prev.gesture() else {
            return Vec::new();
        };
        debug!(id = %gesture.target, changed = gesture.has_changed(), "gesture ended");
        self.set_cursor(CURSOR_DEFAULT)
    }

    /// Abort the active gesture at the host's request, restoring the
    /// element's pre-gesture geometry if it had moved.
    pub fn cancel_gesture(&mut self) -> Vec<Action> {
        let prev = std::mem::take(&mut self.input);
        let Some(gesture) = prev.gesture() else {
            return Vec::new();
        };
        debug!(id = %gesture.target, "gesture cancelled");
        let mut actions = Vec::new();
        if gesture.has_changed() && self.elements.contains(&gesture.target) {
            actions.extend(self.emit_geometry(gesture.target, gesture.origin_geometry));
        }
        actions.extend(self.set_cursor(CURSOR_DEFAULT));
        actions
    }

    // --- Auto-arrangement ---

    /// Run an arrangement over the whole list and emit one update per
    /// element, including elements the arrangement left in place.
    ///
    /// Each update carries the full geometry, plus `z_index` when the
    /// arrangement restacked the element. Ignored while a gesture is active.
    pub fn auto_arrange(&mut self, kind: ArrangeKind) -> Vec<Action> {
        if !self.input.is_idle() {
            warn!(?kind, "auto_arrange during an active gesture ignored");
            return Vec::new();
        }

        let arranged = layout::arrange(kind, self.elements.as_slice(), self.config.width, self.config.height);
        let mut actions = Vec::new();
        for (old, new) in self.elements.as_slice().iter().zip(&arranged) {
            let mut update = GeometryUpdate::from(new.geometry());
            if new.z_index != old.z_index {
                update.z_index = Some(new.z_index);
            }
            actions.push(Action::ElementUpdated { id: new.id, update });
        }
        for action in &actions {
            if let Action::ElementUpdated { id, update } = action {
                self.elements.apply_geometry(id, update);
            }
        }
        debug!(?kind, count = arranged.len(), "auto-arrange");

        if !actions.is_empty() {
            actions.push(Action::RenderNeeded);
        }
        actions
    }

    // --- Queries ---

    /// The currently selected element, if any.
    #[must_use]
    pub fn selection(&self) -> Option<ElementId> {
        self.ui.selected_id
    }

    /// Look up an element by ID.
    #[must_use]
    pub fn element(&self, id: &ElementId) -> Option<&CanvasElement> {
        self.elements.get(id)
    }

    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.input.is_idle()
    }

    /// Hit zones of the selected element's handles, when they are active.
    #[must_use]
    pub fn handle_rects(&self) -> Option<[(ResizeHandle, Geometry); 8]> {
        if !self.ui.handles_active() {
            return None;
        }
        let el = self.ui.selected_id.and_then(|id| self.elements.get(&id))?;
        Some(hit::handle_rects(&el.geometry()))
    }

    /// Quiz slots with no element, for the create affordance.
    #[must_use]
    pub fn empty_quadrant_slots(&self) -> Vec<QuadrantSlot> {
        layout::empty_quadrant_slots(self.elements.as_slice(), self.config.width, self.config.height)
    }

    // --- Internals ---

    fn emit_geometry(&mut self, id: ElementId, geometry: Geometry) -> Vec<Action> {
        let update = GeometryUpdate::from(geometry);
        self.elements.apply_geometry(&id, &update);
        vec![Action::ElementUpdated { id, update }, Action::RenderNeeded]
    }

    fn hover(&mut self, pt: Point) -> Vec<Action> {
        if self.ui.drawing_mode {
            return Vec::new();
        }
        let cursor = match hit::hit_test(pt, &self.elements, self.ui.selected_id, self.ui.handles_active()) {
            Some(hit) => match hit.part {
                HitPart::Body => CURSOR_MOVE,
                HitPart::ResizeHandle(handle) => handle.cursor(),
            },
            None => CURSOR_DEFAULT,
        };
        self.set_cursor(cursor)
    }

    fn set_cursor(&mut self, cursor: &'static str) -> Vec<Action> {
        if self.ui.cursor == cursor {
            return Vec::new();
        }
        self.ui.cursor = cursor;
        vec![Action::SetCursor(cursor)]
    }
}

/// Shared handle to a browser engine; document listeners hold a weak copy.
pub type SharedEngine = Rc<RefCell<Engine>>;

/// The full canvas engine. Wraps `EngineCore` and owns the browser canvas element.
///
/// The host wires the canvas's `pointerdown` and `pointermove` to
/// [`Engine::pointer_down`] and [`Engine::pointer_move`]. Once a gesture
/// starts, the engine captures move/up at the document level until the
/// gesture ends, so releases outside the canvas are never lost. Host
/// callbacks run while the engine is borrowed and must not call back into it.
pub struct Engine {
    canvas: HtmlCanvasElement,
    pub core: EngineCore,
    host: Box<dyn EngineHost>,
    capture: Option<CaptureGuard<DocumentListeners>>,
}

impl Engine {
    /// Create a new engine bound to the given overlay canvas element.
    #[must_use]
    pub fn new(canvas: HtmlCanvasElement, config: CanvasConfig, host: Box<dyn EngineHost>) -> SharedEngine {
        Rc::new(RefCell::new(Self { canvas, core: EngineCore::new(config), host, capture: None }))
    }

    // --- Input events ---

    pub fn pointer_down(engine: &SharedEngine, ev: &PointerEvent) {
        let Ok(mut this) = engine.try_borrow_mut() else {
            warn!("engine busy; pointer-down dropped");
            return;
        };
        let Some(button) = Button::from_dom(ev.button()) else {
            return;
        };
        let pt = this.canvas_point(ev);
        let actions = this.core.on_pointer_down(pt, button);
        this.dispatch(actions);

        if !this.core.is_idle() && this.capture.is_none() {
            match Self::capture(engine) {
                Ok(guard) => this.capture = Some(guard),
                Err(e) => {
                    warn!(error = %e, "pointer capture unavailable; cancelling gesture");
                    let actions = this.core.cancel_gesture();
                    this.dispatch(actions);
                }
            }
        }
    }

    pub fn pointer_move(engine: &SharedEngine, ev: &PointerEvent) {
        let Ok(mut this) = engine.try_borrow_mut() else {
            return;
        };
        let pt = this.canvas_point(ev);
        let actions = this.core.on_pointer_move(pt);
        this.dispatch(actions);
    }

    pub fn pointer_up(engine: &SharedEngine) {
        let Ok(mut this) = engine.try_borrow_mut() else {
            warn!("engine busy; pointer-up dropped");
            return;
        };
        let actions = this.core.on_pointer_up();
        this.dispatch(actions);
        this.capture = None;
    }

    /// Abort the active gesture (e.g. on Escape) and release the capture.
    pub fn cancel(&mut self) {
        let actions = self.core.cancel_gesture();
        self.dispatch(actions);
        self.capture = None;
    }

    // --- Delegated commands ---

    pub fn auto_arrange(&mut self, kind: ArrangeKind) {
        let actions = self.core.auto_arrange(kind);
        self.dispatch(actions);
    }

    pub fn toggle_grid(&mut self) {
        let actions = self.core.toggle_grid();
        self.dispatch(actions);
    }

    pub fn set_drawing_mode(&mut self, on: bool) {
        let actions = self.core.set_drawing_mode(on);
        self.dispatch(actions);
        if on {
            self.capture = None;
        }
    }

    pub fn select(&mut self, id: Option<ElementId>) {
        let actions = self.core.select(id);
        self.dispatch(actions);
    }

    pub fn load_snapshot(&mut self, elements: Vec<CanvasElement>) {
        self.core.load_snapshot(elements);
        self.dispatch(vec![Action::RenderNeeded]);
    }

    // --- Render ---

    /// Draw the grid and selection overlay to the canvas.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the 2D context is unavailable or a draw call fails.
    pub fn render(&self) -> Result<(), JsValue> {
        let ctx = self
            .canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
            .dyn_into::<CanvasRenderingContext2d>()?;
        render::draw(&ctx, &self.core)
    }

    // --- Internals ---

    fn capture(engine: &SharedEngine) -> Result<CaptureGuard<DocumentListeners>, CaptureError> {
        let on_move = {
            let weak = Rc::downgrade(engine);
            move |ev: PointerEvent| {
                if let Some(engine) = weak.upgrade() {
                    Self::pointer_move(&engine, &ev);
                }
            }
        };
        let on_end = {
            let weak = Rc::downgrade(engine);
            move |_ev: PointerEvent| {
                if let Some(engine) = weak.upgrade() {
                    Self::pointer_up(&engine);
                }
            }
        };
        CaptureGuard::acquire(DocumentListeners::for_document(on_move, on_end)?)
    }

    /// Convert a pointer event to canvas-local units, accounting for CSS
    /// scaling of the canvas element.
    fn canvas_point(&self, ev: &PointerEvent) -> Point {
        let rect = self.canvas.get_bounding_client_rect();
        let scale = |css: f64, logical: f64| if css > 0.0 { logical / css } else { 1.0 };
        Point::new(
            (f64::from(ev.client_x()) - rect.left()) * scale(rect.width(), self.core.config.width),
            (f64::from(ev.client_y()) - rect.top()) * scale(rect.height(), self.core.config.height),
        )
    }

    fn dispatch(&mut self, actions: Vec<Action>) {
        let mut render = false;
        for action in actions {
            match action {
                Action::SetCursor(cursor) => {
                    if let Err(e) = self.canvas.style().set_property("cursor", cursor) {
                        warn!(error = ?e, cursor, "failed to set cursor");
                    }
                }
                Action::RenderNeeded => render = true,
                other => other.dispatch(self.host.as_mut()),
            }
        }
        if render {
            if let Err(e) = self.render() {
                warn!(error = ?e, "render failed");
            }
        }
    }
}
