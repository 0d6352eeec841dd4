//! Extended-precision coordinate arithmetic.
//!
//! Purpose
//! - Give the hyperbolic engine a real type with ≈32 significant digits so that
//!   repeated reflections (each one a circle inversion) do not visibly distort
//!   deep tiling layers.
//! - Provide the complex-plane `Point` used for every disk coordinate.
//!
//! Model
//! - `Dd` is a double-double: an unevaluated sum `hi + lo` of two `f64`s with
//!   `|lo| <= ulp(hi)/2`. Precision is a property of the type; there is no
//!   ambient rounding context to raise or lower.
//! - `Point` is a value type (`Copy`) with complex `*` and `/`.
//!
//! Conventions
//! - Division by a zero-norm `Point` is not checked; it yields NaN/∞ which
//!   callers detect with `Point::is_nan`.
//! - Screen-space work downstream uses `nalgebra::Vector2<f64>` via `Point::to_f64`.

pub(crate) mod cfg;
mod dd;
mod point;

pub use dd::Dd;
pub use point::Point;
