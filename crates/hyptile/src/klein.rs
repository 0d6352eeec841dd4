//! Klein (Beltrami–Klein) view of a tiling.
//!
//! In the Klein model geodesics are straight chords, so a tiling is drawn as
//! line segments between projected vertices, with no arc tessellation.
//!
//! ```text
//! Poincaré → Klein:  k = 2p / (1 + |p|²)
//! Klein → Poincaré:  p = k / (1 + √(1 − |k|²))
//! ```
//!
//! Both models share the unit disk; points on or outside the circle have no
//! image (`to_poincare` yields NaN there).

use crate::numeric::{Dd, Point};
use crate::polygon::Polygon;
use crate::tessellate::{Pixel, ScreenMap};
use crate::tiling::Tiling;
use std::collections::{HashMap, HashSet};
use tracing::debug;

/// Squared distance below which two vertices are merged by `klein_chords`.
pub const MERGE_TOLERANCE: f64 = 1e-10;

#[inline]
pub fn to_klein(p: Point) -> Point {
    p * (Dd::from(2.0) / (Dd::ONE + p.norm_sqr()))
}

#[inline]
pub fn to_poincare(k: Point) -> Point {
    k / (Dd::ONE + (Dd::ONE - k.norm_sqr()).sqrt())
}

/// Every undirected polygon edge once, as `(start, end)` in Poincaré coordinates.
///
/// Vertices closer than `sqrt(tol)` (squared distance `<= tol`) are merged into
/// the first one seen; edges are listed in first-seen order. Polygons with NaN
/// vertices are ignored.
pub fn unique_edges(polygons: &[Polygon], tol: f64) -> Vec<(Point, Point)> {
    let mut points = VertexIndex::new(tol);
    let mut seen = HashSet::new();
    let mut edges = Vec::new();
    for poly in polygons.iter().filter(|p| p.is_finite()) {
        let n = poly.len();
        for i in 0..n {
            let a = points.insert(poly.vertices()[i]);
            let b = points.insert(poly.vertices()[(i + 1) % n]);
            if a == b {
                continue;
            }
            if seen.insert((a.min(b), a.max(b))) {
                edges.push((a, b));
            }
        }
    }
    debug!(
        vertices = points.len(),
        edges = edges.len(),
        "collected unique edges"
    );
    edges
        .into_iter()
        .map(|(a, b)| (points.get(a), points.get(b)))
        .collect()
}

/// Unique tiling edges as Klein chords in pixel space, shortest first.
pub fn klein_chords(tiling: &Tiling, screen: &ScreenMap) -> Vec<(Pixel, Pixel)> {
    let mut chords: Vec<(Pixel, Pixel, f64)> = unique_edges(tiling.polygons(), MERGE_TOLERANCE)
        .into_iter()
        .map(|(a, b)| {
            let (ka, kb) = (to_klein(a).to_f64(), to_klein(b).to_f64());
            (screen.project(ka), screen.project(kb), (ka - kb).norm_squared())
        })
        .collect();
    chords.sort_by(|x, y| x.2.total_cmp(&y.2));
    chords.into_iter().map(|(a, b, _)| (a, b)).collect()
}

/// Polygon outline in the Klein model: its projected vertices, consecutive
/// duplicates removed.
pub fn klein_outline(polygon: &Polygon, screen: &ScreenMap) -> Vec<Pixel> {
    let mut out: Vec<Pixel> = Vec::with_capacity(polygon.len());
    for &v in polygon.vertices() {
        let px = screen.project(to_klein(v).to_f64());
        if out.last() != Some(&px) {
            out.push(px);
        }
    }
    out
}

/// Merges nearby points using a uniform grid of `sqrt(tol)`-sized cells.
struct VertexIndex {
    tol: f64,
    cell: f64,
    points: Vec<Point>,
    grid: HashMap<(i64, i64), Vec<usize>>,
}

impl VertexIndex {
    fn new(tol: f64) -> Self {
        let tol = tol.max(0.0);
        let cell = if tol > 0.0 { tol.sqrt() } else { 1e-12 };
        Self {
            tol,
            cell,
            points: Vec::new(),
            grid: HashMap::new(),
        }
    }

    fn key(&self, p: Point) -> (i64, i64) {
        let v = p.to_f64();
        ((v.x / self.cell).floor() as i64, (v.y / self.cell).floor() as i64)
    }

    fn insert(&mut self, p: Point) -> usize {
        let (cx, cy) = self.key(p);
        for dx in -1..=1 {
            for dy in -1..=1 {
                if let Some(ids) = self.grid.get(&(cx + dx, cy + dy)) {
                    for &id in ids {
                        if (self.points[id] - p).norm_sqr().to_f64() <= self.tol {
                            return id;
                        }
                    }
                }
            }
        }
        let id = self.points.len();
        self.points.push(p);
        self.grid.entry((cx, cy)).or_default().push(id);
        id
    }

    fn get(&self, id: usize) -> Point {
        self.points[id]
    }

    fn len(&self) -> usize {
        self.points.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::polygon::{construct_center_polygon, SeedKind};
    use crate::tiling::{Palette, TilingParams};
    use proptest::prelude::*;

    fn pt(x: f64, y: f64) -> Point {
        Point::from_f64(x, y)
    }

    #[test]
    fn klein_stretches_radially() {
        let k = to_klein(pt(0.5, 0.0));
        assert!((k.x.to_f64() - 0.8).abs() < 1e-30);
        assert_eq!(to_klein(Point::ORIGIN).norm().to_f64(), 0.0);
        assert!(to_poincare(pt(1.0, 0.5)).is_nan());
    }

    #[test]
    fn klein_maps_geodesics_to_chords() {
        let a = pt(0.3, 0.1);
        let b = pt(-0.1, 0.4);
        let g = crate::geodesic::Geodesic::through(a, b);
        let crate::geodesic::Geodesic::Arc { center, radius, .. } = g else {
            panic!("expected arc");
        };
        let ca = a - center;
        let cb = b - center;
        let (ka, kb) = (to_klein(a), to_klein(b));
        for t in [0.25, 0.5, 0.75] {
            // point on the arc between a and b
            let dir = ca * Dd::from(1.0 - t) + cb * Dd::from(t);
            let on_arc = center + dir * (radius / dir.norm());
            let k = to_klein(on_arc);
            let off = (k - ka).cross(kb - ka).abs().to_f64();
            assert!(off < 1e-28, "t = {t}: {off}");
        }
    }

    #[test]
    fn seed_edges_are_unique() {
        let seed = construct_center_polygon(7, 3, SeedKind::Regular);
        let edges = unique_edges(std::slice::from_ref(&seed), MERGE_TOLERANCE);
        assert_eq!(edges.len(), 7);
        // the same polygon twice adds nothing
        let twice = unique_edges(&[seed.clone(), seed], MERGE_TOLERANCE);
        assert_eq!(twice.len(), 7);
    }

    #[test]
    fn tiling_edges_follow_euler() {
        // one layer of {7,3}: the seed's 7 edges, 6 more per neighbour, minus
        // the 7 edges shared by consecutive neighbours
        let mut colors = Palette::new(vec!["x".into()]).unwrap();
        let tiling = Tiling::build(TilingParams::new(7, 3, 1), &mut colors).unwrap();
        let edges = unique_edges(tiling.polygons(), MERGE_TOLERANCE);
        assert_eq!(edges.len(), 7 + 7 * 6 - 7);
    }

    #[test]
    fn chords_are_sorted_by_length() {
        let mut colors = Palette::new(vec!["x".into(), "y".into()]).unwrap();
        let tiling = Tiling::build(TilingParams::new(5, 4, 2), &mut colors).unwrap();
        let screen = ScreenMap::new(600, 600).unwrap();
        let chords = klein_chords(&tiling, &screen);
        assert!(!chords.is_empty());
        let len = |c: &(Pixel, Pixel)| {
            let (dx, dy) = ((c.0 .0 - c.1 .0) as f64, (c.0 .1 - c.1 .1) as f64);
            (dx * dx + dy * dy).sqrt()
        };
        // rounding each endpoint moves a length by at most √2 px
        for w in chords.windows(2) {
            assert!(len(&w[0]) <= len(&w[1]) + 2.0 * std::f64::consts::SQRT_2);
        }
        for (a, b) in &chords {
            for p in [a, b] {
                let r = (((p.0 - 300).pow(2) + (p.1 - 300).pow(2)) as f64).sqrt();
                assert!(r <= 301.0);
            }
        }
    }

    #[test]
    fn outline_has_one_pixel_per_vertex() {
        let seed = construct_center_polygon(6, 4, SeedKind::Regular);
        let screen = ScreenMap::new(400, 400).unwrap();
        assert_eq!(klein_outline(&seed, &screen).len(), 6);
    }

    proptest! {
        #[test]
        fn klein_round_trip(x in -0.7f64..0.7, y in -0.7f64..0.7) {
            let p = pt(x, y);
            let back = to_poincare(to_klein(p));
            prop_assert!((back - p).norm().to_f64() < 1e-28);
        }
    }
}
