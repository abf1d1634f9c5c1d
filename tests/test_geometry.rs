use laser_defense::geometry::*;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn rect(x: f32, y: f32, w: f32, h: f32) -> Rect {
    Rect::from_bounds(x, y, w, h)
}

// ── from_bounds ───────────────────────────────────────────────────────────────

#[test]
fn from_bounds_is_top_left_anchored() {
    let r = rect(10.0, 20.0, 30.0, 40.0);
    assert_eq!(r.left, 10.0);
    assert_eq!(r.top, 20.0);
    assert_eq!(r.right, 40.0);
    assert_eq!(r.bottom, 60.0);
    assert_eq!(r.width(), 30.0);
    assert_eq!(r.height(), 40.0);
}

// ── intersects ────────────────────────────────────────────────────────────────

#[test]
fn overlapping_rects_intersect() {
    let a = rect(0.0, 0.0, 10.0, 10.0);
    let b = rect(5.0, 5.0, 10.0, 10.0);
    assert!(intersects(&a, &b));
}

#[test]
fn contained_rect_intersects() {
    let outer = rect(0.0, 0.0, 100.0, 100.0);
    let inner = rect(40.0, 40.0, 5.0, 5.0);
    assert!(intersects(&outer, &inner));
    assert!(intersects(&inner, &outer));
}

#[test]
fn disjoint_on_either_axis_does_not_intersect() {
    let a = rect(0.0, 0.0, 10.0, 10.0);
    assert!(!intersects(&a, &rect(20.0, 0.0, 10.0, 10.0))); // right of a
    assert!(!intersects(&a, &rect(-20.0, 0.0, 10.0, 10.0))); // left of a
    assert!(!intersects(&a, &rect(0.0, 20.0, 10.0, 10.0))); // below a
    assert!(!intersects(&a, &rect(0.0, -20.0, 10.0, 10.0))); // above a
    // Overlapping columns but separate rows
    assert!(!intersects(&a, &rect(5.0, 30.0, 10.0, 10.0)));
}

#[test]
fn shared_edge_is_not_a_collision() {
    // Laser sitting exactly on top of an enemy: bottom edge == enemy top edge
    let enemy = rect(100.0, 200.0, 98.0, 50.0);
    let laser_above = rect(120.0, 167.0, 9.0, 33.0);
    assert!(!intersects(&laser_above, &enemy));

    let laser_below = rect(120.0, 250.0, 9.0, 33.0);
    assert!(!intersects(&laser_below, &enemy));

    let left_neighbour = rect(2.0, 200.0, 98.0, 50.0);
    assert!(!intersects(&left_neighbour, &enemy));
}

#[test]
fn one_pixel_overlap_is_a_collision() {
    let enemy = rect(100.0, 200.0, 98.0, 50.0);
    let laser = rect(120.0, 168.0, 9.0, 33.0);
    assert!(intersects(&laser, &enemy));
}

#[test]
fn intersects_is_symmetric() {
    let mut rng = StdRng::seed_from_u64(42);
    for _ in 0..2_000 {
        // Integer-valued coordinates make shared edges common
        let a = rect(
            rng.gen_range(0..50) as f32,
            rng.gen_range(0..50) as f32,
            rng.gen_range(1..20) as f32,
            rng.gen_range(1..20) as f32,
        );
        let b = rect(
            rng.gen_range(0..50) as f32,
            rng.gen_range(0..50) as f32,
            rng.gen_range(1..20) as f32,
            rng.gen_range(1..20) as f32,
        );
        assert_eq!(intersects(&a, &b), intersects(&b, &a), "{:?} vs {:?}", a, b);
    }
}

#[test]
fn rect_intersects_itself() {
    let a = rect(3.0, 4.0, 5.0, 6.0);
    assert!(intersects(&a, &a));
}
