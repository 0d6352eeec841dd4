//! Curated entry points and re-exports.
//!
//! Callers that only want "grow a tiling, trace its polygons" should not need to
//! know the module layout; these two functions plus the re-exports cover it.

pub use crate::geodesic::Geodesic;
pub use crate::klein::{klein_chords, klein_outline, to_klein, to_poincare, unique_edges};
pub use crate::numeric::{Dd, Point};
pub use crate::polygon::{construct_center_polygon, Polygon, SeedKind};
pub use crate::render::{trace_polygon, trace_tiling, PolygonTrace, TilingTrace};
pub use crate::tessellate::{
    CyclicProbes, Pixel, ProbeSampler, RngProbes, ScreenMap, ScreenTrace, TessellateCfg,
    TraceError,
};
pub use crate::tiling::{
    count_polys, Color, ColorSource, Palette, Rule, Tiling, TilingError, TilingParams, TilingSize,
};

/// Grow the {n,k} tiling `layers` deep with the default polygon limit.
pub fn build_tiling<C: ColorSource + ?Sized>(
    n: usize,
    k: usize,
    layers: usize,
    colors: &mut C,
) -> Result<Tiling, TilingError> {
    Tiling::build(TilingParams::new(n, k, layers), colors)
}

/// Pixel outline of `polygon` on a `width`×`height` canvas with default tolerances.
pub fn tessellate_polygon_edges<S: ProbeSampler + ?Sized>(
    polygon: &Polygon,
    width: u32,
    height: u32,
    sampler: &mut S,
) -> Result<ScreenTrace, TraceError> {
    let screen = ScreenMap::new(width, height)?;
    trace_polygon(polygon, &screen, sampler, &TessellateCfg::default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_and_trace() {
        let mut colors = Palette::new(vec!["#2ecc71".into(), "#8e44ad".into()]).unwrap();
        let tiling = build_tiling(4, 5, 2, &mut colors).unwrap();
        assert_eq!((tiling.inner(), tiling.total()), (13, 61));
        let mut probes = RngProbes::seeded(17);
        for p in tiling.polygons() {
            let trace = tessellate_polygon_edges(p, 300, 200, &mut probes).unwrap();
            assert!(!trace.is_empty());
            assert!(trace.points().windows(2).all(|w| w[0] != w[1]));
        }
    }

    #[test]
    fn bad_inputs_are_errors() {
        let mut colors = Palette::new(vec!["#2ecc71".into()]).unwrap();
        assert!(matches!(
            build_tiling(4, 4, 1, &mut colors),
            Err(TilingError::InvalidParams { .. })
        ));
        let seed = construct_center_polygon(7, 3, SeedKind::Regular);
        let mut probes = CyclicProbes::new(vec![0.5]);
        assert_eq!(
            tessellate_polygon_edges(&seed, 4, 400, &mut probes).unwrap_err(),
            TraceError::InvalidCanvas {
                width: 4,
                height: 400
            }
        );
    }
}
