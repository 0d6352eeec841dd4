use super::*;
use crate::tessellate::{CyclicProbes, RngProbes};
use proptest::prelude::*;

fn pt(x: f64, y: f64) -> Point {
    Point::from_f64(x, y)
}

fn close_pt(a: Point, b: Point, tol: f64) -> bool {
    (a - b).norm().to_f64() <= tol
}

#[test]
fn arc_is_orthogonal_to_unit_circle_and_hits_endpoints() {
    let a = pt(0.3, 0.1);
    let b = pt(-0.1, 0.4);
    let g = Geodesic::through(a, b);
    let Geodesic::Arc { center, radius, .. } = g else {
        panic!("expected an arc");
    };
    assert!(((a - center).norm() - radius).abs().to_f64() < 1e-30);
    assert!(((b - center).norm() - radius).abs().to_f64() < 1e-30);
    // orthogonality: |C|² = r² + 1
    assert!((center.norm_sqr() - radius.sqr() - Dd::ONE).abs().to_f64() < 1e-29);
    assert!(center.norm().to_f64() > 1.0);
}

#[test]
fn reflection_fixes_the_line() {
    for (a, b) in [(pt(0.3, 0.1), pt(-0.1, 0.4)), (pt(0.1, 0.1), pt(0.5, 0.5))] {
        let g = Geodesic::through(a, b);
        assert!(close_pt(g.reflect(a), a, 1e-29));
        assert!(close_pt(g.reflect(b), b, 1e-29));
    }
}

#[test]
fn diameter_is_straight_and_mirrors() {
    let g = Geodesic::through(pt(0.1, 0.1), pt(0.5, 0.5));
    assert!(g.is_straight());
    let r = g.reflect(pt(0.3, 0.0));
    assert!(close_pt(r, pt(0.0, 0.3), 1e-16));
    // rounding noise on a diameter still counts as straight
    let noisy = Point::new(Dd::from(0.4), Dd::from(0.4) + Dd::from(1e-20));
    assert!(Geodesic::through(pt(0.2, 0.2), noisy).is_straight());
    assert!(!Geodesic::through(pt(0.2, 0.2), pt(0.4, 0.41)).is_straight());
}

#[test]
fn reflection_keeps_points_in_the_disk() {
    let g = Geodesic::through(pt(0.5, -0.2), pt(0.45, 0.3));
    for &(x, y) in &[(0.0, 0.0), (0.9, 0.0), (-0.7, 0.6), (0.2, -0.95)] {
        let r = g.reflect(pt(x, y));
        assert!(r.norm().to_f64() < 1.0, "({x}, {y}) reflected to {:?}", r.to_f64());
    }
}

#[test]
fn screen_trace_of_arc_runs_between_projected_endpoints() {
    let a = pt(0.6, -0.3);
    let b = pt(0.2, 0.7);
    let g = Geodesic::through(a, b);
    let screen = ScreenMap::new(800, 800).unwrap();
    let mut trace = ScreenTrace::new();
    let cfg = TessellateCfg::default();
    g.append_screen_trace(&mut trace, &screen, &mut RngProbes::seeded(11), &cfg)
        .unwrap();
    let pts = trace.points();
    assert_eq!(pts.first(), Some(&screen.project(a.to_f64())));
    assert_eq!(pts.last(), Some(&screen.project(b.to_f64())));
    assert!(pts.len() > 4);
    assert!(pts.windows(2).all(|w| w[0] != w[1]));
}

#[test]
fn screen_trace_of_diameter_has_two_points() {
    let g = Geodesic::through(pt(-0.5, 0.0), pt(0.5, 0.0));
    assert!(g.is_straight());
    let screen = ScreenMap::new(100, 100).unwrap();
    let mut trace = ScreenTrace::new();
    let mut probes = CyclicProbes::new(vec![0.5]);
    let cfg = TessellateCfg::default();
    g.append_screen_trace(&mut trace, &screen, &mut probes, &cfg).unwrap();
    assert_eq!(trace.points(), &[(25, 50), (75, 50)]);
    // the next edge starting at the same pixel is not duplicated
    let back = Geodesic::through(pt(0.5, 0.0), pt(-0.5, 0.0));
    back.append_screen_trace(&mut trace, &screen, &mut probes, &cfg).unwrap();
    assert_eq!(trace.points(), &[(25, 50), (75, 50), (25, 50)]);
}

#[test]
fn nan_endpoint_is_rejected() {
    let nan = Point::new(Dd::NAN, Dd::ZERO);
    let g = Geodesic::through(pt(0.1, 0.2), nan);
    let screen = ScreenMap::new(100, 100).unwrap();
    let mut trace = ScreenTrace::new();
    let mut probes = CyclicProbes::new(vec![]);
    let err = g
        .append_screen_trace(&mut trace, &screen, &mut probes, &TessellateCfg::default())
        .unwrap_err();
    assert!(matches!(err, TraceError::Degenerate { .. }));
    assert!(trace.is_empty());
}

proptest! {
    #[test]
    fn reflection_is_an_involution(
        ax in -0.7f64..0.7, ay in -0.7f64..0.7,
        bx in -0.7f64..0.7, by in -0.7f64..0.7,
        px in -0.7f64..0.7, py in -0.7f64..0.7,
    ) {
        let a = pt(ax, ay);
        let b = pt(bx, by);
        prop_assume!((a - b).norm().to_f64() > 1e-3);
        let g = Geodesic::through(a, b);
        let p = pt(px, py);
        let back = g.reflect(g.reflect(p));
        prop_assert!(close_pt(back, p, 1e-20), "{:?} -> {:?}", p.to_f64(), back.to_f64());
    }
}
