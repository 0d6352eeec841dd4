//! Screen traces of whole polygons and tilings (Poincaré model).
//!
//! Each polygon is traced edge by edge into its own `ScreenTrace`; the result is
//! a closed polyline (last point equals the first) ready for a rasterizer.
//! Polygons with NaN vertices are skipped and reported by index; traces that
//! collapse to fewer than two pixels are kept but counted as insignificant.

use crate::polygon::Polygon;
use crate::tessellate::{Pixel, ProbeSampler, ScreenMap, ScreenTrace, TessellateCfg, TraceError};
use crate::tiling::{Color, Rule, Tiling};
use tracing::{debug, warn};

/// Traced outline of one tiling polygon.
#[derive(Clone, Debug, PartialEq)]
pub struct PolygonTrace {
    pub index: usize,
    pub rule: Rule,
    pub color: Color,
    pub points: Vec<Pixel>,
}

/// Result of tracing every polygon of a tiling.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TilingTrace {
    pub polygons: Vec<PolygonTrace>,
    /// Indices of polygons left out because of degenerate geometry.
    pub skipped: Vec<usize>,
    /// Traces with fewer than two distinct pixels.
    pub insignificant: usize,
    /// Arc intervals emitted at the depth cap, summed over all polygons.
    pub capped: usize,
}

impl TilingTrace {
    pub fn total_points(&self) -> usize {
        self.polygons.iter().map(|p| p.points.len()).sum()
    }
}

/// Trace the boundary of `polygon`, edge 0 first.
pub fn trace_polygon<S: ProbeSampler + ?Sized>(
    polygon: &Polygon,
    screen: &ScreenMap,
    sampler: &mut S,
    cfg: &TessellateCfg,
) -> Result<ScreenTrace, TraceError> {
    if polygon.len() < 2 {
        return Err(TraceError::degenerate(format!(
            "polygon has {} vertices",
            polygon.len()
        )));
    }
    if !polygon.is_finite() {
        return Err(TraceError::degenerate("polygon has a NaN vertex"));
    }
    let mut trace = ScreenTrace::new();
    for edge in polygon.edges() {
        edge.append_screen_trace(&mut trace, screen, sampler, cfg)?;
    }
    if trace.capped() > 0 {
        warn!(
            capped = trace.capped(),
            max_depth = cfg.max_depth,
            "arc refinement hit the depth cap"
        );
    }
    Ok(trace)
}

/// Trace every polygon of `tiling` in index order.
pub fn trace_tiling<S: ProbeSampler + ?Sized>(
    tiling: &Tiling,
    screen: &ScreenMap,
    sampler: &mut S,
    cfg: &TessellateCfg,
) -> TilingTrace {
    let items = tiling
        .polygons()
        .iter()
        .zip(tiling.rules())
        .zip(tiling.colors())
        .enumerate()
        .map(|(i, ((p, &r), c))| (i, p, r, c));
    trace_items(items, screen, sampler, cfg)
}

fn trace_items<'a, I, S>(
    items: I,
    screen: &ScreenMap,
    sampler: &mut S,
    cfg: &TessellateCfg,
) -> TilingTrace
where
    I: Iterator<Item = (usize, &'a Polygon, Rule, &'a Color)>,
    S: ProbeSampler + ?Sized,
{
    let mut out = TilingTrace::default();
    for (index, polygon, rule, color) in items {
        let trace = match trace_polygon(polygon, screen, sampler, cfg) {
            Ok(trace) => trace,
            Err(err) => {
                debug!(index, %err, "skipping polygon");
                out.skipped.push(index);
                continue;
            }
        };
        if trace.len() < 2 {
            out.insignificant += 1;
        }
        out.capped += trace.capped();
        out.polygons.push(PolygonTrace {
            index,
            rule,
            color: color.clone(),
            points: trace.into_points(),
        });
    }
    if !out.skipped.is_empty() {
        warn!(
            skipped = out.skipped.len(),
            first = out.skipped[0],
            "skipped degenerate polygons"
        );
    }
    debug!(
        polygons = out.polygons.len(),
        points = out.total_points(),
        insignificant = out.insignificant,
        capped = out.capped,
        "traced tiling"
    );
    out
}
