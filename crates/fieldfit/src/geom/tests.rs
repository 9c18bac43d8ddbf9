use super::*;
use crate::error::InscribeError;
use std::f64::consts::{FRAC_PI_2, PI};

fn v(x: f64, y: f64) -> Vec2 {
    Vec2::new(x, y)
}

fn square(side: f64) -> Vec<Vec2> {
    vec![v(0.0, 0.0), v(side, 0.0), v(side, side), v(0.0, side)]
}

fn l_shape() -> Vec<Vec2> {
    vec![
        v(0.0, 0.0),
        v(100.0, 0.0),
        v(100.0, 30.0),
        v(30.0, 30.0),
        v(30.0, 100.0),
        v(0.0, 100.0),
    ]
}

#[test]
fn area_centroid_and_winding() {
    let sq = square(2.0);
    assert!((signed_area(&sq) - 4.0).abs() < 1e-12);
    let cw: Vec<Vec2> = sq.iter().rev().copied().collect();
    assert!((signed_area(&cw) + 4.0).abs() < 1e-12);
    assert!((centroid(&sq).unwrap() - v(1.0, 1.0)).norm() < 1e-12);
    assert!(centroid(&[v(0.0, 0.0), v(1.0, 1.0), v(2.0, 2.0)]).is_none());

    let l = l_shape();
    assert!((signed_area(&l) - 5100.0).abs() < 1e-9);
    let c = centroid(&l).unwrap();
    let expect = (3000.0 * 50.0 + 2100.0 * 15.0) / 5100.0;
    assert!((c.x - expect).abs() < 1e-9 && (c.y - expect).abs() < 1e-9);
}

#[test]
fn centroid_far_from_origin() {
    let t = v(1e7, -3e6);
    let shifted: Vec<Vec2> = square(2.0).iter().map(|p| p + t).collect();
    assert!((centroid(&shifted).unwrap() - (t + v(1.0, 1.0))).norm() < 1e-6);
}

#[test]
fn edges_and_angles() {
    let sq = square(3.0);
    assert_eq!(edge_lengths(&sq), vec![3.0; 4]);
    assert!((perimeter(&sq) - 12.0).abs() < 1e-12);
    for a in interior_angles(&sq) {
        assert!((a - FRAC_PI_2).abs() < 1e-12);
    }
    let angles = interior_angles(&l_shape());
    assert!((angles[3] - 3.0 * FRAC_PI_2).abs() < 1e-12);
    // Interior angles of a simple n-gon sum to (n-2)π.
    assert!((angles.iter().sum::<f64>() - 4.0 * PI).abs() < 1e-9);
    // Same answer for the clockwise ring.
    let cw: Vec<Vec2> = l_shape().into_iter().rev().collect();
    let mut back = interior_angles(&cw);
    back.reverse();
    for (a, b) in angles.iter().zip(&back) {
        assert!((a - b).abs() < 1e-12);
    }
}

#[test]
fn bounds_and_diameter() {
    let l = l_shape();
    let (lo, hi) = bounds(&l);
    assert_eq!((lo, hi), (v(0.0, 0.0), v(100.0, 100.0)));
    assert!((diameter(&l) - (2.0f64 * 100.0 * 100.0).sqrt()).abs() < 1e-9);
}

#[test]
fn point_in_polygon_boundary_counts() {
    let sq = square(10.0);
    assert!(point_in_polygon(&sq, v(5.0, 5.0), 1e-9));
    assert!(point_in_polygon(&sq, v(0.0, 5.0), 1e-9));
    assert!(point_in_polygon(&sq, v(10.0, 10.0), 1e-9));
    assert!(point_in_polygon(&sq, v(10.0 + 1e-12, 3.0), 1e-9));
    assert!(!point_in_polygon(&sq, v(10.1, 3.0), 1e-9));
    let l = l_shape();
    assert!(!point_in_polygon(&l, v(60.0, 60.0), 1e-9));
    assert!(point_in_polygon(&l, v(60.0, 20.0), 1e-9));
    assert!(point_in_polygon(&l, v(30.0, 30.0), 1e-9));
}

#[test]
fn signed_distance_sign_and_size() {
    let sq = square(10.0);
    assert!((signed_distance(&sq, v(5.0, 2.0)) - 2.0).abs() < 1e-12);
    assert!((signed_distance(&sq, v(13.0, 5.0)) + 3.0).abs() < 1e-12);
    assert!((signed_distance(&sq, v(13.0, 14.0)) + 5.0).abs() < 1e-12);
}

#[test]
fn rigid_motions() {
    let sq = square(2.0);
    let r = rotate(&sq, FRAC_PI_2, v(1.0, 1.0));
    assert!((r[0] - v(2.0, 0.0)).norm() < 1e-12);
    let t = translate(&sq, v(3.0, -1.0));
    assert_eq!(t[2], v(5.0, 1.0));
    let s = scale_about(&sq, 0.5, v(1.0, 1.0));
    assert_eq!(s[0], v(0.5, 0.5));
    assert!((signed_area(&s) - 1.0).abs() < 1e-12);
}

#[test]
fn segment_tests() {
    let hit = segment_intersection(v(0.0, 0.0), v(2.0, 2.0), v(0.0, 2.0), v(2.0, 0.0));
    assert!((hit.unwrap() - v(1.0, 1.0)).norm() < 1e-12);
    assert!(segment_intersection(v(0.0, 0.0), v(1.0, 0.0), v(0.0, 1.0), v(1.0, 1.0)).is_none());
    assert!(segments_cross(v(0.0, 0.0), v(2.0, 2.0), v(0.0, 2.0), v(2.0, 0.0), 1e-9));
    // Touching at an endpoint is not a proper crossing.
    assert!(!segments_cross(v(0.0, 0.0), v(1.0, 1.0), v(1.0, 1.0), v(2.0, 0.0), 1e-9));
    // Collinear overlap is not a proper crossing either.
    assert!(!segments_cross(v(0.0, 0.0), v(2.0, 0.0), v(1.0, 0.0), v(3.0, 0.0), 1e-9));
}

#[test]
fn line_clipping_through_concave_ring() {
    let u = vec![
        v(0.0, 0.0),
        v(90.0, 0.0),
        v(90.0, 60.0),
        v(60.0, 60.0),
        v(60.0, 20.0),
        v(30.0, 20.0),
        v(30.0, 60.0),
        v(0.0, 60.0),
    ];
    let spans = line_crossings(&u, v(0.0, 40.0), v(1.0, 0.0));
    assert_eq!(spans, vec![(0.0, 30.0), (60.0, 90.0)]);
    let spans = line_crossings(&u, v(0.0, 10.0), v(1.0, 0.0));
    assert_eq!(spans, vec![(0.0, 90.0)]);
    // A line through a vertex is counted once.
    let tri = vec![v(0.0, 0.0), v(4.0, 0.0), v(2.0, 2.0)];
    assert_eq!(line_crossings(&tri, v(0.0, 2.0), v(1.0, 0.0)).len(), 0);
    assert!(line_crossings(&tri, v(0.0, 5.0), v(1.0, 0.0)).is_empty());
}

#[test]
fn convexity() {
    assert!(is_convex(&square(1.0)));
    assert!(!is_convex(&l_shape()));
    let with_mid = vec![v(0.0, 0.0), v(1.0, 0.0), v(2.0, 0.0), v(2.0, 1.0), v(0.0, 1.0)];
    assert!(is_convex(&with_mid));
}

#[test]
fn polygon_validation() {
    let p = Polygon::from_xy(&[(0.0, 0.0), (0.0, 1.0), (1.0, 1.0), (1.0, 0.0), (0.0, 0.0)]).unwrap();
    // Closing duplicate removed, stored counter-clockwise.
    assert_eq!(p.len(), 4);
    assert!(signed_area(p.points()) > 0.0);
    assert!((p.area() - 1.0).abs() < 1e-12);
    assert!((p.perimeter() - 4.0).abs() < 1e-12);

    let err = |xy: &[(f64, f64)]| match Polygon::from_xy(xy) {
        Err(InscribeError::InvalidInput { reason }) => reason,
        other => panic!("expected InvalidInput, got {other:?}"),
    };
    assert!(err(&[(0.0, 0.0), (1.0, 1.0), (1.0, 1.0)]).contains("3 distinct"));
    assert!(err(&[(0.0, 0.0), (1.0, 1.0), (2.0, 2.0), (3.0, 3.0)]).contains("degenerate"));
    assert!(err(&[(0.0, 0.0), (4.0, 4.0), (4.0, 0.0), (0.0, 2.0)]).contains("self-intersecting"));
    assert!(err(&[(0.0, 0.0), (f64::NAN, 1.0), (1.0, 0.0)]).contains("non-finite"));
    // Spike: an edge doubling back on its predecessor.
    assert!(err(&[(0.0, 0.0), (4.0, 0.0), (4.0, 4.0), (4.0, 2.0), (0.0, 4.0)])
        .contains("self-intersecting"));
}

#[test]
fn polygon_serde_validates() {
    let p = Polygon::from_xy(&[(0.0, 0.0), (3.0, 0.0), (0.0, 4.0)]).unwrap();
    let json = serde_json::to_string(&p).unwrap();
    let back: Polygon = serde_json::from_str(&json).unwrap();
    assert_eq!(back, p);
    let bad: Result<Polygon, _> = serde_json::from_str("[[0.0,0.0],[1.0,1.0]]");
    assert!(bad.is_err());
}

#[test]
fn hull_of_l_shape() {
    let hull = convex_hull(&l_shape()).unwrap();
    assert_eq!(hull.len(), 5);
    assert!(signed_area(&hull) > 0.0);
    assert!(!hull.contains(&v(30.0, 30.0)));
    assert!(convex_hull(&[v(0.0, 0.0), v(1.0, 1.0), v(2.0, 2.0)]).is_none());
}

#[test]
fn collinear_vertices_dropped() {
    let pts = vec![v(0.0, 0.0), v(5.0, 0.0), v(10.0, 0.0), v(10.0, 5.0), v(5.0, 5.0), v(0.0, 5.0)];
    let out = simplify_collinear(&pts, 1e-6);
    assert_eq!(out, vec![v(0.0, 0.0), v(10.0, 0.0), v(10.0, 5.0), v(0.0, 5.0)]);
    // Real corners survive.
    assert_eq!(simplify_collinear(&l_shape(), 1e-6).len(), 6);
}

#[test]
fn inset_square_and_collapse() {
    let inner = inset_convex(&square(10.0), 1.0).unwrap();
    assert_eq!(inner.len(), 4);
    assert!((inner[0] - v(1.0, 1.0)).norm() < 1e-12);
    assert!((signed_area(&inner) - 64.0).abs() < 1e-9);
    assert!(inset_convex(&square(10.0), 5.5).is_none());
    let tri = vec![v(0.0, 0.0), v(4.0, 0.0), v(0.0, 3.0)];
    // Inradius of the 3-4-5 triangle is 1.
    let t = inset_convex(&tri, 0.5).unwrap();
    assert!((signed_area(&t) - 6.0 * 0.25).abs() < 1e-9);
}

#[test]
fn containment_with_and_without_clearance() {
    let outer = square(10.0);
    let inner = vec![v(1.0, 1.0), v(9.0, 1.0), v(9.0, 9.0), v(1.0, 9.0)];
    assert!(contains_polygon(&outer, &inner, ContainCheck::touching(1e-9)));
    assert!(contains_polygon(&outer, &inner, ContainCheck::with_clearance(1.0, 1e-9)));
    let why = containment_violation(&outer, &inner, ContainCheck::with_clearance(1.5, 1e-9));
    assert!(why.unwrap().starts_with("vertex 0"));
    // Touching the boundary is allowed, poking through is not.
    assert!(contains_polygon(&outer, &outer, ContainCheck::touching(1e-9)));
    let poke = vec![v(1.0, 1.0), v(11.0, 1.0), v(9.0, 9.0)];
    assert!(!contains_polygon(&outer, &poke, ContainCheck::touching(1e-9)));
}

#[test]
fn containment_catches_notch() {
    // Every vertex is inside the L, but the long edge runs through the notch.
    let l = l_shape();
    let across = vec![v(10.0, 10.0), v(90.0, 10.0), v(90.0, 20.0), v(20.0, 90.0), v(10.0, 90.0)];
    assert!(across.iter().all(|&p| point_in_polygon(&l, p, 0.0)));
    let why = containment_violation(&l, &across, ContainCheck::touching(1e-9)).unwrap();
    assert!(why.contains("crosses"), "{why}");
}

#[test]
fn shrink_into_finds_largest_scale() {
    let outer = square(10.0);
    let big = vec![v(-1.0, -1.0), v(11.0, -1.0), v(11.0, 11.0), v(-1.0, 11.0)];
    let fitted = shrink_into(&outer, &big, v(5.0, 5.0), ContainCheck::touching(1e-9)).unwrap();
    // Exact fit is a scale of 10/12.
    let side = (fitted[1] - fitted[0]).norm();
    assert!(side <= 10.0 + 1e-9 && side > 10.0 - 12.0 * 1e-3, "side {side}");
    let huge = scale_about(&big, 3.0, v(5.0, 5.0));
    assert!(shrink_into(&outer, &huge, v(5.0, 5.0), ContainCheck::touching(1e-9)).is_none());
    // Already inside: returned unchanged.
    let small = vec![v(2.0, 2.0), v(4.0, 2.0), v(3.0, 4.0)];
    assert_eq!(
        shrink_into(&outer, &small, v(3.0, 3.0), ContainCheck::touching(1e-9)),
        Some(small)
    );
}

#[test]
fn polygon_methods() {
    let p = Polygon::new(l_shape()).unwrap();
    let cfg = GeomCfg::default();
    assert!(!p.is_convex());
    assert!(p.contains_point(v(10.0, 90.0), &cfg));
    assert!(!p.contains_point(v(90.0, 90.0), &cfg));
    assert!(p.eps(&cfg) > 0.0 && p.eps(&cfg) < 1e-6);
    let moved = p.translated(v(5.0, 5.0)).rotated(PI, v(0.0, 0.0));
    assert!((moved.area() - p.area()).abs() < 1e-9);
    assert!((moved.diameter() - p.diameter()).abs() < 1e-9);
    assert_eq!(p.clone().into_points(), l_shape());
}
