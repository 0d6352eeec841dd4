//! Timing probe: grow and trace a handful of tilings, print sizes and timings.
//!
//! Run with `cargo run -p hyptile --release --example tiling_counts`.

use std::time::Instant;

use hyptile::render::trace_tiling;
use hyptile::tessellate::{RngProbes, ScreenMap, TessellateCfg};
use hyptile::tiling::{layer_sizes, Palette, Tiling, TilingParams};
use rand::{rngs::StdRng, SeedableRng};

fn main() {
    let screen = ScreenMap::new(1024, 1024).expect("canvas");
    let cfg = TessellateCfg::default();
    for &(n, k, layers) in &[(7usize, 3usize, 5usize), (5, 4, 4), (4, 5, 4), (3, 8, 4), (6, 4, 3)] {
        let params = TilingParams::new(n, k, layers);
        let sizes = layer_sizes(&params).expect("layer sizes");
        let totals: Vec<usize> = sizes.iter().map(|s| s.total).collect();

        let mut colors = Palette::flat(&mut StdRng::seed_from_u64(0));
        let grow_start = Instant::now();
        let tiling = Tiling::build(params, &mut colors).expect("valid tiling");
        let grow_ms = grow_start.elapsed().as_secs_f64() * 1e3;

        let trace_start = Instant::now();
        let trace = trace_tiling(&tiling, &screen, &mut RngProbes::seeded(0), &cfg);
        let trace_ms = trace_start.elapsed().as_secs_f64() * 1e3;

        println!(
            "{{{n},{k}}} x{layers}: totals per layer {totals:?}, inner {}, grow {grow_ms:.1} ms, \
             trace {trace_ms:.1} ms ({} points, {} insignificant, {} skipped)",
            tiling.inner(),
            trace.total_points(),
            trace.insignificant,
            trace.skipped.len(),
        );
    }
}
