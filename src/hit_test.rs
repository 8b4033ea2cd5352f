#![allow(clippy::float_cmp)]

use uuid::Uuid;

use super::*;
use crate::element::{CanvasElement, ElementPayload};

fn make_element_at(x: f64, y: f64, w: f64, h: f64, z: i64) -> CanvasElement {
    CanvasElement {
        id: Uuid::new_v4(),
        x,
        y,
        width: w,
        height: h,
        rotation: 0.0,
        z_index: z,
        payload: ElementPayload::Image { src: "cat.png".into(), alt: None },
        extra: serde_json::Map::new(),
    }
}

fn list(elements: Vec<CanvasElement>) -> ElementList {
    let mut l = ElementList::new();
    l.load_snapshot(elements);
    l
}

// =============================================================
// ResizeHandle
// =============================================================

#[test]
fn handle_effects_follow_letters() {
    let se = ResizeHandle::Se.effect();
    assert!(se.south && se.east && !se.north && !se.west);

    let nw = ResizeHandle::Nw.effect();
    assert!(nw.north && nw.west && !nw.south && !nw.east);

    let n = ResizeHandle::N.effect();
    assert_eq!(n, HandleEffect { north: true, ..Default::default() });

    let w = ResizeHandle::W.effect();
    assert_eq!(w, HandleEffect { west: true, ..Default::default() });
}

#[test]
fn every_handle_has_one_or_two_effects() {
    for h in ResizeHandle::ALL {
        let e = h.effect();
        let count = [e.north, e.south, e.east, e.west].iter().filter(|b| **b).count();
        assert_eq!(count, h.as_str().len(), "{h}");
        assert!(!(e.north && e.south) && !(e.east && e.west), "{h}");
    }
}

#[test]
fn handle_parse_and_display_roundtrip() {
    for h in ResizeHandle::ALL {
        assert_eq!(h.to_string().parse::<ResizeHandle>(), Ok(h));
    }
    assert_eq!("x".parse::<ResizeHandle>(), Err(UnknownHandle("x".into())));
}

#[test]
fn handle_serde_uses_short_names() {
    assert_eq!(serde_json::to_string(&ResizeHandle::Ne).unwrap(), "\"ne\"");
    let h: ResizeHandle = serde_json::from_str("\"sw\"").unwrap();
    assert_eq!(h, ResizeHandle::Sw);
}

#[test]
fn handle_anchors_at_corners_and_midpoints() {
    let g = Geometry::new(10.0, 20.0, 100.0, 60.0);
    assert_eq!(ResizeHandle::Nw.anchor(&g), Point::new(10.0, 20.0));
    assert_eq!(ResizeHandle::N.anchor(&g), Point::new(60.0, 20.0));
    assert_eq!(ResizeHandle::Ne.anchor(&g), Point::new(110.0, 20.0));
    assert_eq!(ResizeHandle::E.anchor(&g), Point::new(110.0, 50.0));
    assert_eq!(ResizeHandle::Se.anchor(&g), Point::new(110.0, 80.0));
    assert_eq!(ResizeHandle::S.anchor(&g), Point::new(60.0, 80.0));
    assert_eq!(ResizeHandle::Sw.anchor(&g), Point::new(10.0, 80.0));
    assert_eq!(ResizeHandle::W.anchor(&g), Point::new(10.0, 50.0));
}

#[test]
fn handle_cursors() {
    assert_eq!(ResizeHandle::N.cursor(), "ns-resize");
    assert_eq!(ResizeHandle::W.cursor(), "ew-resize");
    assert_eq!(ResizeHandle::Ne.cursor(), "nesw-resize");
    assert_eq!(ResizeHandle::Se.cursor(), "nwse-resize");
}

// =============================================================
// Handle geometry
// =============================================================

#[test]
fn handle_rects_are_eight_squares_centered_on_anchors() {
    let g = Geometry::new(0.0, 0.0, 200.0, 100.0);
    let rects = handle_rects(&g);
    assert_eq!(rects.len(), 8);
    for (h, rect) in rects {
        assert_eq!(rect.width, HANDLE_SIZE);
        assert_eq!(rect.height, HANDLE_SIZE);
        assert_eq!(rect.center(), h.anchor(&g));
    }
}

#[test]
fn handle_at_finds_corner() {
    let g = Geometry::new(100.0, 100.0, 200.0, 100.0);
    assert_eq!(handle_at(&g, Point::new(302.0, 198.0)), Some(ResizeHandle::Se));
    assert_eq!(handle_at(&g, Point::new(99.0, 150.0)), Some(ResizeHandle::W));
    assert_eq!(handle_at(&g, Point::new(200.0, 150.0)), None);
}

// =============================================================
// hit_test
// =============================================================

#[test]
fn hit_test_empty_canvas_is_none() {
    assert!(hit_test(Point::new(5.0, 5.0), &ElementList::new(), None, false).is_none());
}

#[test]
fn hit_test_body() {
    let el = make_element_at(10.0, 10.0, 100.0, 100.0, 0);
    let id = el.id;
    let hit = hit_test(Point::new(50.0, 50.0), &list(vec![el]), None, false).unwrap();
    assert_eq!(hit, Hit { element_id: id, part: HitPart::Body });
}

#[test]
fn hit_test_prefers_higher_z() {
    let low = make_element_at(0.0, 0.0, 100.0, 100.0, 5);
    let high = make_element_at(50.0, 50.0, 100.0, 100.0, 9);
    let high_id = high.id;
    let hit = hit_test(Point::new(75.0, 75.0), &list(vec![high, low]), None, false).unwrap();
    assert_eq!(hit.element_id, high_id);
}

#[test]
fn hit_test_equal_z_prefers_later_in_list() {
    let first = make_element_at(0.0, 0.0, 100.0, 100.0, 1);
    let second = make_element_at(0.0, 0.0, 100.0, 100.0, 1);
    let second_id = second.id;
    let hit = hit_test(Point::new(50.0, 50.0), &list(vec![first, second]), None, false).unwrap();
    assert_eq!(hit.element_id, second_id);
}

#[test]
fn hit_test_handle_of_selected_beats_bodies_above_it() {
    let selected = make_element_at(100.0, 100.0, 100.0, 100.0, 0);
    let cover = make_element_at(150.0, 150.0, 100.0, 100.0, 10);
    let sel_id = selected.id;
    let elements = list(vec![selected, cover]);

    let hit = hit_test(Point::new(200.0, 200.0), &elements, Some(sel_id), true).unwrap();
    assert_eq!(hit, Hit { element_id: sel_id, part: HitPart::ResizeHandle(ResizeHandle::Se) });
}

#[test]
fn hit_test_handles_inactive_falls_through_to_body() {
    let el = make_element_at(100.0, 100.0, 100.0, 100.0, 0);
    let id = el.id;
    let hit = hit_test(Point::new(101.0, 101.0), &list(vec![el]), Some(id), false).unwrap();
    assert_eq!(hit.part, HitPart::Body);
}

#[test]
fn hit_test_handle_outside_body_only_when_selected() {
    let el = make_element_at(100.0, 100.0, 100.0, 100.0, 0);
    let id = el.id;
    let elements = list(vec![el]);
    // Just outside the north-west corner, inside its handle square.
    let pt = Point::new(97.0, 97.0);
    assert!(hit_test(pt, &elements, None, true).is_none());
    assert_eq!(
        hit_test(pt, &elements, Some(id), true).map(|h| h.part),
        Some(HitPart::ResizeHandle(ResizeHandle::Nw))
    );
}

#[test]
fn hit_test_ignores_rotation() {
    let mut el = make_element_at(0.0, 0.0, 100.0, 20.0, 0);
    el.rotation = 90.0;
    let id = el.id;
    let hit = hit_test(Point::new(90.0, 10.0), &list(vec![el]), None, false).unwrap();
    assert_eq!(hit.element_id, id);
}
