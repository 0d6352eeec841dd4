//! Adaptive tessellation of circular arcs into screen-space polylines.
//!
//! Purpose
//! - Turn a geodesic arc into the fewest integer pixel points such that no
//!   straight segment visibly deviates from the arc.
//!
//! Algorithm (`CircularArc::interpolate`)
//! - Flatness test at an interior parameter `c`: the triangle-inequality slack
//!   `|a−c| + |c−b| − |a−b|` of the rounded pixel projections. Above the
//!   tolerance the interval is split at `c` and both halves are refined.
//! - Midpoint first, then `probes` random interior points drawn from an
//!   injected `ProbeSampler` (catches arcs whose midpoint happens to look
//!   collinear).
//! - Flat intervals emit only their end point, deduplicated against the last
//!   emitted pixel.
//! - Recursion is capped at `max_depth`; a capped interval emits its end point
//!   directly and is counted on the trace so callers can warn.
//!
//! Conventions
//! - `ScreenTrace` is built forward (push-back) and never holds the same pixel
//!   twice in a row.
//! - Arc math runs in `f64` (`nalgebra::Vector2`); only the endpoints and the
//!   sweep come from the extended-precision geometry.

mod curve;
mod sampler;
mod screen;
mod types;

pub use curve::CircularArc;
pub use sampler::{CyclicProbes, ProbeSampler, RngProbes};
pub use screen::{Pixel, ScreenMap, ScreenTrace};
pub use types::{TessellateCfg, TraceError};
