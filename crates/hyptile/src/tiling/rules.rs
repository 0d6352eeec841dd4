//! Growth rules: how one expanded polygon spawns its children.

use super::{Color, ColorSource, TilingError, TilingSize};
use crate::polygon::Polygon;

/// How a polygon attaches to the layer it grew from.
///
/// The discriminants are the numeric codes the growth arithmetic works with.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Rule {
    /// The seed polygon.
    Seed = 0,
    /// Last polygon around a vertex in a triangle tiling.
    VertexLast = 1,
    /// Shares only a vertex with its parent layer.
    Vertex = 2,
    /// Shares an edge with its parent.
    Edge = 3,
    /// First edge child in a k = 3 tiling (one edge already taken).
    EdgeFirst = 4,
}

impl Rule {
    #[inline]
    pub fn code(self) -> u8 {
        self as u8
    }

    pub fn from_code(code: u8) -> Option<Rule> {
        match code {
            0 => Some(Rule::Seed),
            1 => Some(Rule::VertexLast),
            2 => Some(Rule::Vertex),
            3 => Some(Rule::Edge),
            4 => Some(Rule::EdgeFirst),
            _ => None,
        }
    }
}

/// Reflect `p` across its edge `s`. Vertex i lands in slot `(n + s − i + 1) mod n`,
/// which keeps the winding and puts the shared edge at slots 0..1 of the child.
pub fn create_next_poly(p: &Polygon, s: usize) -> Polygon {
    let n = p.len();
    let line = p.edge(s);
    let mut slots: Vec<Option<_>> = vec![None; n];
    for (i, &v) in p.vertices().iter().enumerate() {
        slots[(n + s - i + 1) % n] = Some(line.reflect(v));
    }
    Polygon::new(slots.into_iter().flatten().collect())
}

/// Draws for the second seed color before giving up on a distinct one.
const DISTINCT_COLOR_ATTEMPTS: usize = 64;

/// Growth state: the three parallel arrays, filled front to back.
pub(super) struct Growth<'c, C: ColorSource + ?Sized> {
    n: usize,
    k: usize,
    size: TilingSize,
    polygons: Vec<Polygon>,
    rules: Vec<Rule>,
    colors: Vec<Color>,
    source: &'c mut C,
}

impl<'c, C: ColorSource + ?Sized> Growth<'c, C> {
    /// Allocate exactly `size.total` slots and place the seed.
    pub(super) fn new(
        n: usize,
        k: usize,
        size: TilingSize,
        seed: Polygon,
        source: &'c mut C,
    ) -> Self {
        let mut growth = Self {
            n,
            k,
            size,
            polygons: Vec::with_capacity(size.total),
            rules: Vec::with_capacity(size.total),
            colors: Vec::with_capacity(size.total),
            source,
        };
        let color = growth.source.next_color();
        growth.polygons.push(seed);
        growth.rules.push(Rule::Seed);
        growth.colors.push(color);
        growth
    }

    fn mismatch(&self) -> TilingError {
        TilingError::CountMismatch {
            predicted: self.size.total,
            produced: self.polygons.len(),
        }
    }

    fn push(&mut self, polygon: Polygon, rule: Rule, color: Color) -> Result<(), TilingError> {
        if self.polygons.len() >= self.size.total {
            return Err(TilingError::CountMismatch {
                predicted: self.size.total,
                produced: self.polygons.len() + 1,
            });
        }
        self.polygons.push(polygon);
        self.rules.push(rule);
        self.colors.push(color);
        Ok(())
    }

    /// Color for the next child of `parent`. Even k alternates two colors so
    /// that edge-adjacent polygons differ; the second color is the first child's.
    fn child_color(&mut self, parent: usize) -> Result<Color, TilingError> {
        if self.k % 2 != 0 {
            return Ok(self.source.next_color());
        }
        if self.polygons.len() > 1 {
            let first = &self.colors[0];
            let alt = if &self.colors[parent] == first {
                &self.colors[1]
            } else {
                first
            };
            return Ok(alt.clone());
        }
        for _ in 0..DISTINCT_COLOR_ATTEMPTS {
            let color = self.source.next_color();
            if color != self.colors[0] {
                return Ok(color);
            }
        }
        Err(TilingError::invalid(
            "even k needs two distinct colors but the color source repeats one",
        ))
    }

    /// Expand polygon `i` into its children at the end of the arrays (`apply_rule`).
    pub(super) fn apply_rule(&mut self, i: usize) -> Result<(), TilingError> {
        if i >= self.polygons.len() {
            return Err(self.mismatch());
        }
        let (n, k) = (self.n, self.k);
        let mut r = self.rules[i].code() as usize;
        let special = r == Rule::VertexLast.code() as usize;
        if special {
            r = Rule::Vertex.code() as usize;
        }
        let start = if r == Rule::EdgeFirst.code() as usize { 3 } else { 2 };
        let quantity = if k == 3 && r != 0 {
            n.saturating_sub(r + 1)
        } else {
            n.saturating_sub(r)
        };
        for s in start..start + quantity {
            let child = create_next_poly(&self.polygons[i], s % n);
            let rule = if k == 3 && s == start && r != 0 {
                Rule::EdgeFirst
            } else {
                Rule::Edge
            };
            let color = self.child_color(i)?;
            self.push(child, rule, color)?;

            let m0 = if special {
                2
            } else if s == 2 && r != 0 {
                1
            } else {
                0
            };
            // polygons around the shared vertex, each off the previous one
            for m in m0..k.saturating_sub(3) {
                let parent = self.polygons.len() - 1;
                let child = create_next_poly(&self.polygons[parent], 1);
                let rule = if n == 3 && m + 4 == k {
                    Rule::VertexLast
                } else {
                    Rule::Vertex
                };
                let color = self.child_color(parent)?;
                self.push(child, rule, color)?;
            }
        }
        Ok(())
    }

    /// Check that exactly the predicted number of polygons was produced.
    pub(super) fn finish(self) -> Result<(Vec<Polygon>, Vec<Rule>, Vec<Color>), TilingError> {
        if self.polygons.len() != self.size.total {
            return Err(self.mismatch());
        }
        Ok((self.polygons, self.rules, self.colors))
    }
}
