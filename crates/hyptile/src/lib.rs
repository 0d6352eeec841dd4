//! Hyperbolic {n,k} tilings of the Poincaré disk.
//!
//! Layers, leaf first:
//! - `numeric`: double-double reals and complex points.
//! - `geodesic`: hyperbolic lines, reflection, screen traces.
//! - `tessellate`: adaptive arc-to-pixel refinement.
//! - `polygon`: polygons and the seed polygon.
//! - `tiling`: count prediction and growth by reflection.
//! - `render`, `klein`: whole-tiling output for the Poincaré and Klein models.
//!
//! `api` collects the common entry points.

pub mod api;
pub mod geodesic;
pub mod klein;
pub mod numeric;
pub mod polygon;
pub mod render;
pub mod tessellate;
pub mod tiling;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::api::{build_tiling, tessellate_polygon_edges};
    pub use crate::numeric::{Dd, Point};
    pub use crate::polygon::{Polygon, SeedKind};
    pub use crate::tessellate::{ProbeSampler, RngProbes, ScreenMap, ScreenTrace, TessellateCfg};
    pub use crate::tiling::{Color, ColorSource, Palette, Rule, Tiling, TilingParams};
}
