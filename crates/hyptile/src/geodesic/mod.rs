//! Hyperbolic lines (geodesics) of the Poincaré disk.
//!
//! Purpose
//! - Model the geodesic through two disk points as either a Euclidean segment
//!   (when it lies on a diameter) or a circular arc orthogonal to the unit circle.
//! - Reflect points across it (the generator of the whole tiling) and trace it
//!   to screen pixels.
//!
//! Classification
//! - Straight iff `|A.x·B.y − B.x·A.y| <= STRAIGHT_EPS`. Diameter edges do occur
//!   (odd k puts tiling edges on mirror lines through the center) and their
//!   determinant is rounding noise, not zero. Treating such an edge as an arc
//!   puts the center ~1/det away and the inversion cancels catastrophically;
//!   the threshold balances that against the straight-line error (~det).
//!
//! Formulas
//! - Straight: `reflect(R) = 2P + 2((R−P)·D)D − R` with `P = A`, `D` unit.
//! - Arc: `s₁ = (1+|A|²)/2`, `s₂ = (1+|B|²)/2`, `C = ((s₁B.y − s₂A.y)/det,
//!   (A.x s₂ − B.x s₁)/det)`, `r² = |C|² − 1`; `reflect(R) = C + r²(R−C)/|R−C|²`.

use crate::numeric::{Dd, Point};
use crate::tessellate::{
    CircularArc, ProbeSampler, ScreenMap, ScreenTrace, TessellateCfg, TraceError,
};

/// Determinant magnitude below which a geodesic is treated as a diameter.
pub const STRAIGHT_EPS: f64 = 1e-16;

/// Geodesic segment between two points of the open unit disk.
#[derive(Clone, Copy, Debug)]
pub enum Geodesic {
    /// Segment of a diameter; `dir` is the unit direction from `a` to `b`.
    Straight { a: Point, b: Point, dir: Point },
    /// Arc of the circle `|z − center| = radius`, orthogonal to the unit circle.
    Arc {
        a: Point,
        b: Point,
        center: Point,
        radius: Dd,
    },
}

impl Geodesic {
    /// Geodesic through `a` and `b`. Requires `a != b`; coincident points give NaN geometry.
    pub fn through(a: Point, b: Point) -> Self {
        let det = a.cross(b);
        if det.abs().to_f64() <= STRAIGHT_EPS {
            let d = b - a;
            return Geodesic::Straight {
                a,
                b,
                dir: d / d.norm(),
            };
        }
        let s1 = (Dd::ONE + a.norm_sqr()) / 2.0;
        let s2 = (Dd::ONE + b.norm_sqr()) / 2.0;
        let center = Point::new((s1 * b.y - s2 * a.y) / det, (a.x * s2 - b.x * s1) / det);
        let radius = (center.norm_sqr() - Dd::ONE).sqrt();
        Geodesic::Arc {
            a,
            b,
            center,
            radius,
        }
    }

    #[inline]
    pub fn endpoints(&self) -> (Point, Point) {
        match *self {
            Geodesic::Straight { a, b, .. } | Geodesic::Arc { a, b, .. } => (a, b),
        }
    }

    #[inline]
    pub fn is_straight(&self) -> bool {
        matches!(self, Geodesic::Straight { .. })
    }

    /// Mirror image of `r` across this geodesic (an involution fixing the line).
    pub fn reflect(&self, r: Point) -> Point {
        match *self {
            Geodesic::Straight { a, dir, .. } => {
                let factor = (r - a).dot(dir) * 2.0;
                a * Dd::from(2.0) + dir * factor - r
            }
            Geodesic::Arc { center, radius, .. } => {
                let rc = r - center;
                center + rc * (radius.sqr() / rc.norm_sqr())
            }
        }
    }

    /// Append the pixels tracing this geodesic from `a` to `b`.
    ///
    /// The projected start is pushed (deduplicated against the trace's last
    /// point); a diameter then adds its projected end, an arc is refined by
    /// `CircularArc::interpolate` along its minor sweep.
    pub fn append_screen_trace<S: ProbeSampler + ?Sized>(
        &self,
        trace: &mut ScreenTrace,
        screen: &ScreenMap,
        sampler: &mut S,
        cfg: &TessellateCfg,
    ) -> Result<(), TraceError> {
        let (a, b) = self.endpoints();
        if a.is_nan() || b.is_nan() {
            return Err(TraceError::degenerate("geodesic endpoint is NaN"));
        }
        trace.push(screen.project(a.to_f64()));
        match *self {
            Geodesic::Straight { .. } => {
                trace.push(screen.project(b.to_f64()));
            }
            Geodesic::Arc { center, radius, .. } => {
                let ca = a - center;
                let cb = b - center;
                let alpha = ca.y.to_f64().atan2(ca.x.to_f64());
                // atan2 of (cross, dot) is the signed angle in (−π, π]: the minor arc.
                let sweep = ca.cross(cb).to_f64().atan2(ca.dot(cb).to_f64());
                let arc = CircularArc::new(
                    a.to_f64(),
                    b.to_f64(),
                    alpha,
                    sweep,
                    radius.to_f64(),
                    *screen,
                );
                arc.interpolate(trace, 0.0, sweep, sampler, cfg);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests;
