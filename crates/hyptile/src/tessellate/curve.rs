use super::{Pixel, ProbeSampler, ScreenMap, ScreenTrace, TessellateCfg};
use nalgebra::Vector2;

/// Circular arc in disk coordinates, parameterized by the signed angle `t`
/// swept from its start point: `t = 0` is the start, `t = sweep` the end.
///
/// Points are computed as `start + 2r·sin(t/2)·(−sin(α + t/2), cos(α + t/2))`
/// (a chord from the start point), which stays accurate for arcs whose radius
/// is far larger than the disk.
#[derive(Clone, Copy, Debug)]
pub struct CircularArc {
    start: Vector2<f64>,
    end: Vector2<f64>,
    /// Angle of `start` as seen from the arc center.
    alpha: f64,
    sweep: f64,
    radius: f64,
    screen: ScreenMap,
}

impl CircularArc {
    pub fn new(
        start: Vector2<f64>,
        end: Vector2<f64>,
        alpha: f64,
        sweep: f64,
        radius: f64,
        screen: ScreenMap,
    ) -> Self {
        Self {
            start,
            end,
            alpha,
            sweep,
            radius,
            screen,
        }
    }

    #[inline]
    pub fn sweep(&self) -> f64 {
        self.sweep
    }

    /// Disk coordinate at parameter `t`. The end parameter returns the stored
    /// endpoint exactly.
    pub fn at(&self, t: f64) -> Vector2<f64> {
        if t == self.sweep {
            return self.end;
        }
        let half = 0.5 * t;
        let chord = 2.0 * self.radius * half.sin();
        let dir = self.alpha + half;
        self.start + Vector2::new(-dir.sin(), dir.cos()) * chord
    }

    #[inline]
    pub fn pixel(&self, t: f64) -> Pixel {
        self.screen.project(self.at(t))
    }

    /// Append pixels approximating the arc over `[a, b]`, assuming the pixel
    /// at `a` is already the last point of `trace`. Ends with the pixel at `b`.
    pub fn interpolate<S: ProbeSampler + ?Sized>(
        &self,
        trace: &mut ScreenTrace,
        a: f64,
        b: f64,
        sampler: &mut S,
        cfg: &TessellateCfg,
    ) {
        self.interpolate_at(trace, a, b, sampler, cfg, 0);
    }

    fn interpolate_at<S: ProbeSampler + ?Sized>(
        &self,
        trace: &mut ScreenTrace,
        a: f64,
        b: f64,
        sampler: &mut S,
        cfg: &TessellateCfg,
        depth: usize,
    ) {
        if self.bent(trace, a, b, 0.5 * (a + b), sampler, cfg, depth) {
            return;
        }
        for _ in 0..cfg.probes {
            let w = sampler.weight();
            if self.bent(trace, a, b, w * a + (1.0 - w) * b, sampler, cfg, depth) {
                return;
            }
        }
        trace.push(self.pixel(b));
    }

    /// Whether the arc over `[a, b]` bends visibly at `c`; if so, refine both
    /// halves into `trace`.
    #[allow(clippy::too_many_arguments)]
    fn bent<S: ProbeSampler + ?Sized>(
        &self,
        trace: &mut ScreenTrace,
        a: f64,
        b: f64,
        c: f64,
        sampler: &mut S,
        cfg: &TessellateCfg,
        depth: usize,
    ) -> bool {
        let pa = as_vec(self.pixel(a));
        let pb = as_vec(self.pixel(b));
        let pc = as_vec(self.pixel(c));
        let excess = (pa - pc).norm() + (pb - pc).norm() - (pa - pb).norm();
        // pc on pa or pb gives exactly 0 here, so a bent probe always adds a point
        if excess <= cfg.tolerance {
            return false;
        }
        if depth >= cfg.max_depth {
            trace.push(self.pixel(b));
            trace.note_capped();
            return true;
        }
        self.interpolate_at(trace, a, c, sampler, cfg, depth + 1);
        self.interpolate_at(trace, c, b, sampler, cfg, depth + 1);
        true
    }
}

#[inline]
fn as_vec(p: Pixel) -> Vector2<f64> {
    Vector2::new(p.0 as f64, p.1 as f64)
}
