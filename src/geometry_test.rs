#![allow(clippy::float_cmp)]

use super::*;

// =============================================================
// Point
// =============================================================

#[test]
fn point_delta_from() {
    let d = Point::new(30.0, 5.0).delta_from(Point::new(10.0, 15.0));
    assert_eq!(d, Point::new(20.0, -10.0));
}

// =============================================================
// Geometry
// =============================================================

#[test]
fn geometry_edges_and_center() {
    let g = Geometry::new(10.0, 20.0, 100.0, 50.0);
    assert_eq!(g.right(), 110.0);
    assert_eq!(g.bottom(), 70.0);
    assert_eq!(g.center(), Point::new(60.0, 45.0));
}

#[test]
fn geometry_contains_is_edge_inclusive() {
    let g = Geometry::new(0.0, 0.0, 10.0, 10.0);
    assert!(g.contains(Point::new(0.0, 0.0)));
    assert!(g.contains(Point::new(10.0, 10.0)));
    assert!(g.contains(Point::new(5.0, 5.0)));
    assert!(!g.contains(Point::new(10.1, 5.0)));
    assert!(!g.contains(Point::new(5.0, -0.1)));
}

#[test]
fn centered_square_is_centered() {
    let g = Geometry::centered_square(Point::new(50.0, 50.0), 8.0);
    assert_eq!(g, Geometry::new(46.0, 46.0, 8.0, 8.0));
    assert_eq!(g.center(), Point::new(50.0, 50.0));
}

#[test]
fn union_all_empty_is_none() {
    assert!(Geometry::union_all(Vec::new()).is_none());
}

#[test]
fn union_all_encloses_every_rect() {
    let u = Geometry::union_all([Geometry::new(10.0, 10.0, 20.0, 20.0), Geometry::new(-5.0, 40.0, 10.0, 10.0)]);
    assert_eq!(u, Some(Geometry::new(-5.0, 10.0, 35.0, 40.0)));
}

// =============================================================
// Snapping
// =============================================================

#[test]
fn snap_rounds_to_nearest_multiple() {
    assert_eq!(snap_to_grid(29.0, 20), 20.0);
    assert_eq!(snap_to_grid(31.0, 20), 40.0);
    assert_eq!(snap_to_grid(-9.0, 20), 0.0);
    assert_eq!(snap_to_grid(-11.0, 20), -20.0);
}

#[test]
fn snap_ties_round_toward_positive_infinity() {
    assert_eq!(snap_to_grid(30.0, 20), 40.0);
    assert_eq!(snap_to_grid(10.0, 20), 20.0);
    assert_eq!(snap_to_grid(-10.0, 20), 0.0);
    assert_eq!(snap_to_grid(-30.0, 20), -20.0);
    assert_eq!(snap_to_grid(-50.0, 20), -40.0);
}

#[test]
fn snap_is_idempotent() {
    for v in [-37.5, 0.0, 3.3, 19.99, 250.0, 1234.5] {
        let once = snap_to_grid(v, 20);
        assert_eq!(snap_to_grid(once, 20), once);
    }
}

#[test]
fn snap_zero_grid_is_identity() {
    assert_eq!(snap_to_grid(13.7, 0), 13.7);
}

#[test]
fn snap_size_never_goes_below_min() {
    // 50 / 200 rounds to 0; the floor must win.
    assert_eq!(snap_size(50.0, 200, 50.0), 200.0);
    assert_eq!(snap_size(30.0, 100, 30.0), 100.0);
}

#[test]
fn snap_size_plain_rounding_when_above_min() {
    assert_eq!(snap_size(55.0, 20, 50.0), 60.0);
    assert_eq!(snap_size(71.0, 20, 50.0), 80.0);
}

// =============================================================
// Clamping
// =============================================================

#[test]
fn clamp_origin_bounds() {
    assert_eq!(clamp_origin(-10.0, 100.0), 0.0);
    assert_eq!(clamp_origin(150.0, 100.0), 100.0);
    assert_eq!(clamp_origin(42.0, 100.0), 42.0);
}

#[test]
fn clamp_origin_negative_max_pins_to_zero() {
    assert_eq!(clamp_origin(30.0, -20.0), 0.0);
}
