//! Hyperbolic polygons and the seed ("center") polygon of a tiling.
//!
//! Purpose
//! - Hold the n vertices of one tile in a consistent (counter-clockwise) winding.
//! - Build the seed polygon centered at the origin from the Schläfli pair {n,k}.
//!
//! Construction (`construct_center_polygon`)
//! - Triangle A (disk center), B (a vertex), C (midpoint of an adjacent side) has
//!   angles `a = π/n`, `b = π/k`, `c = π/2`. The Euclidean radius of B is
//!   `s = sin(c − b − a) / sqrt(1 − sin²b − sin²a)`.
//! - Quasiregular seeds place vertices at distance AC instead:
//!   `s ← (s²+1)/(2s·cos a)`, then `s ← s − sqrt(s² − 1)`.
//! - Vertex i sits at angle `(3 + 2i)·a`.
//!
//! Parameters are not validated here; spherical {n,k} give NaN vertices, which
//! `Polygon::is_finite` reports.

use crate::geodesic::Geodesic;
use crate::numeric::{Dd, Point};

/// Which distance the seed vertices are placed at.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SeedKind {
    /// Vertices at the tile's circumradius.
    #[default]
    Regular,
    /// Vertices at the tile's inradius (edge midpoints of the regular tiling).
    Quasiregular,
}

/// Closed geodesic polygon; edge i joins vertex i to vertex (i+1) mod n.
#[derive(Clone, Debug)]
pub struct Polygon {
    vertices: Vec<Point>,
}

impl Polygon {
    pub fn new(vertices: Vec<Point>) -> Self {
        Self { vertices }
    }

    #[inline]
    pub fn vertices(&self) -> &[Point] {
        &self.vertices
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Geodesic of edge `i` (indices wrap).
    pub fn edge(&self, i: usize) -> Geodesic {
        let n = self.vertices.len();
        Geodesic::through(self.vertices[i % n], self.vertices[(i + 1) % n])
    }

    pub fn edges(&self) -> impl Iterator<Item = Geodesic> + '_ {
        (0..self.vertices.len()).map(move |i| self.edge(i))
    }

    /// No vertex is NaN.
    pub fn is_finite(&self) -> bool {
        !self.vertices.iter().any(|v| v.is_nan())
    }

    /// Euclidean mean of the vertices.
    pub fn centroid(&self) -> Point {
        if self.vertices.is_empty() {
            return Point::ORIGIN;
        }
        let sum = self
            .vertices
            .iter()
            .fold(Point::ORIGIN, |acc, &v| acc + v);
        sum / Dd::from(self.vertices.len() as f64)
    }

    /// Largest Euclidean vertex norm (< 1 for a polygon inside the disk).
    pub fn max_norm(&self) -> Dd {
        self.vertices
            .iter()
            .map(|v| v.norm())
            .fold(Dd::ZERO, |m, r| if r > m { r } else { m })
    }

    /// Shoelace area of the vertex polygon; positive for counter-clockwise winding.
    pub fn signed_area(&self) -> Dd {
        let n = self.vertices.len();
        let mut acc = Dd::ZERO;
        for i in 0..n {
            acc += self.vertices[i].cross(self.vertices[(i + 1) % n]);
        }
        acc * 0.5
    }
}

/// Seed polygon of the {n,k} tiling, centered at the origin.
pub fn construct_center_polygon(n: usize, k: usize, kind: SeedKind) -> Polygon {
    let a = Dd::PI / n as f64;
    let b = Dd::PI / k as f64;
    let (sin_a, cos_a) = a.sin_cos();
    let sin_b = b.sin();
    let mut s = (Dd::FRAC_PI_2 - b - a).sin() / (Dd::ONE - sin_b.sqr() - sin_a.sqr()).sqrt();
    if kind == SeedKind::Quasiregular {
        s = (s.sqr() + Dd::ONE) / (s * cos_a * 2.0);
        s = s - (s.sqr() - Dd::ONE).sqrt();
    }
    let vertices = (0..n)
        .map(|i| Point::polar(s, a * (3 + 2 * i) as f64))
        .collect();
    Polygon::new(vertices)
}
