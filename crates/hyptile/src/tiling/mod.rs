//! Growth of a full {n,k} tiling around a seed polygon.
//!
//! Purpose
//! - Predict the exact polygon count for a number of layers, allocate once, then
//!   fill the storage by reflecting polygons across their edges.
//!
//! Algorithm
//! - Two phases: `count_polys` runs the layer recurrence (checked `i128`), then
//!   `Tiling::build` places the seed at index 0 and expands every index below
//!   `inner` in order (`apply_rule`), appending children in contiguous blocks.
//! - Each polygon carries a `Rule` telling how it touches the previous layer;
//!   the rule decides which of its edges still need neighbours.
//! - Even k is two-colorable: children alternate between `colors[0]` and
//!   `colors[1]`. Odd k draws a fresh color per polygon.
//!
//! Conventions
//! - Configuration errors (`InvalidParams`, `TooLarge`, `Overflow`) are raised
//!   before any allocation. A produced count differing from the prediction is reported as
//!   `CountMismatch`, never truncated.
//! - Growth does not check polygons for NaN; `render` filters degenerate ones.

mod color;
mod params;
mod rules;

pub use color::{Color, ColorSource, Palette, FLAT_COLORS};
pub use params::{
    count_polys, layer_sizes, TilingError, TilingParams, TilingSize, DEFAULT_MAX_POLYGONS,
};
pub use rules::{create_next_poly, Rule};

use crate::polygon::{construct_center_polygon, Polygon, SeedKind};
use rules::Growth;
use tracing::debug;

/// A grown tiling: parallel arrays indexed by polygon.
#[derive(Clone, Debug)]
pub struct Tiling {
    params: TilingParams,
    polygons: Vec<Polygon>,
    rules: Vec<Rule>,
    colors: Vec<Color>,
    inner: usize,
}

impl Tiling {
    /// Validate `params`, then grow the tiling. Colors come from `colors`.
    pub fn build<C: ColorSource + ?Sized>(
        params: TilingParams,
        colors: &mut C,
    ) -> Result<Self, TilingError> {
        let size = params.validate()?;
        debug!(
            n = params.n,
            k = params.k,
            layers = params.layers,
            inner = size.inner,
            total = size.total,
            "growing tiling"
        );
        let seed = construct_center_polygon(params.n, params.k, SeedKind::Regular);
        let mut growth = Growth::new(params.n, params.k, size, seed, colors);
        for i in 0..size.inner {
            growth.apply_rule(i)?;
        }
        let (polygons, rules, colors) = growth.finish()?;
        Ok(Self {
            params,
            polygons,
            rules,
            colors,
            inner: size.inner,
        })
    }

    #[inline]
    pub fn params(&self) -> &TilingParams {
        &self.params
    }

    #[inline]
    pub fn polygons(&self) -> &[Polygon] {
        &self.polygons
    }

    #[inline]
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    #[inline]
    pub fn colors(&self) -> &[Color] {
        &self.colors
    }

    pub fn rule(&self, i: usize) -> Option<Rule> {
        self.rules.get(i).copied()
    }

    pub fn color(&self, i: usize) -> Option<&Color> {
        self.colors.get(i)
    }

    /// Number of expanded polygons; indices below it have all neighbours grown.
    #[inline]
    pub fn inner(&self) -> usize {
        self.inner
    }

    #[inline]
    pub fn total(&self) -> usize {
        self.polygons.len()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.polygons.len()
    }

    /// Always false: a tiling holds at least its seed.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.polygons.is_empty()
    }

    #[inline]
    pub fn is_inner(&self, i: usize) -> bool {
        i < self.inner
    }
}

#[cfg(test)]
mod tests;
