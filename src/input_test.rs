use uuid::Uuid;

use super::*;

fn gesture() -> Gesture {
    Gesture::new(Uuid::new_v4(), Point::new(5.0, 5.0), Geometry::new(0.0, 0.0, 100.0, 50.0))
}

// =============================================================
// Button
// =============================================================

#[test]
fn button_from_dom_codes() {
    assert_eq!(Button::from_dom(0), Some(Button::Primary));
    assert_eq!(Button::from_dom(1), Some(Button::Middle));
    assert_eq!(Button::from_dom(2), Some(Button::Secondary));
    assert_eq!(Button::from_dom(3), None);
    assert_eq!(Button::from_dom(-1), None);
}

// =============================================================
// Gesture
// =============================================================

#[test]
fn new_gesture_has_not_changed() {
    let g = gesture();
    assert_eq!(g.last_emitted, g.origin_geometry);
    assert!(!g.has_changed());
}

#[test]
fn gesture_changed_after_emit() {
    let mut g = gesture();
    g.last_emitted.x = 40.0;
    assert!(g.has_changed());
}

// =============================================================
// InputState
// =============================================================

#[test]
fn input_state_default_is_idle() {
    let s = InputState::default();
    assert!(s.is_idle());
    assert!(s.gesture().is_none());
}

#[test]
fn input_state_exposes_gesture_in_both_modes() {
    let g = gesture();
    assert_eq!(InputState::Dragging(g).gesture(), Some(&g));
    assert_eq!(InputState::Resizing(g, ResizeHandle::Se).gesture(), Some(&g));
    assert!(!InputState::Dragging(g).is_idle());
}

#[test]
fn gesture_mut_updates_in_place() {
    let mut s = InputState::Resizing(gesture(), ResizeHandle::N);
    if let Some(g) = s.gesture_mut() {
        g.last_emitted.height = 80.0;
    }
    assert!(s.gesture().is_some_and(Gesture::has_changed));
}

#[test]
fn gesture_mode_equality() {
    assert_eq!(GestureMode::Resize(ResizeHandle::E), GestureMode::Resize(ResizeHandle::E));
    assert_ne!(GestureMode::Resize(ResizeHandle::E), GestureMode::Resize(ResizeHandle::W));
    assert_ne!(GestureMode::Drag, GestureMode::Resize(ResizeHandle::E));
}

// =============================================================
// UiState
// =============================================================

#[test]
fn ui_state_defaults() {
    let ui = UiState::default();
    assert!(ui.selected_id.is_none());
    assert!(!ui.drawing_mode);
    assert!(!ui.show_quadrants);
    assert_eq!(ui.cursor, CURSOR_DEFAULT);
}

#[test]
fn handles_need_selection_and_no_drawing_mode() {
    let mut ui = UiState::default();
    assert!(!ui.handles_active());
    ui.selected_id = Some(Uuid::new_v4());
    assert!(ui.handles_active());
    ui.drawing_mode = true;
    assert!(!ui.handles_active());
}
