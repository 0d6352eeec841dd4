//! Tiling parameters, validation and polygon count prediction.

use std::fmt;

/// Default upper bound on the number of polygons a tiling may allocate.
pub const DEFAULT_MAX_POLYGONS: usize = 2_000_000;

/// Schläfli pair {n,k} plus growth depth.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TilingParams {
    /// Sides per polygon.
    pub n: usize,
    /// Polygons meeting at each vertex.
    pub k: usize,
    /// Growth rounds around the seed polygon.
    pub layers: usize,
    /// Predicted totals above this are rejected before allocation.
    pub max_polygons: usize,
}

impl Default for TilingParams {
    fn default() -> Self {
        Self {
            n: 7,
            k: 3,
            layers: 4,
            max_polygons: DEFAULT_MAX_POLYGONS,
        }
    }
}

impl TilingParams {
    pub fn new(n: usize, k: usize, layers: usize) -> Self {
        Self {
            n,
            k,
            layers,
            ..Self::default()
        }
    }

    /// Check that {n,k} is hyperbolic and the tiling fits `max_polygons`.
    pub fn validate(&self) -> Result<TilingSize, TilingError> {
        count_polys(self)
    }

    fn check_shape(&self) -> Result<(), TilingError> {
        let (n, k) = (self.n, self.k);
        if n < 3 {
            return Err(TilingError::invalid(format!("n = {n}: need at least 3 sides")));
        }
        if k < 3 {
            return Err(TilingError::invalid(format!(
                "k = {k}: need at least 3 polygons per vertex"
            )));
        }
        if n == 3 && k < 7 {
            return Err(TilingError::invalid(format!("{{3,{k}}}: triangles need k >= 7")));
        }
        if n == 4 && k < 5 {
            return Err(TilingError::invalid(format!("{{4,{k}}}: squares need k >= 5")));
        }
        if n < 7 && k < 4 {
            return Err(TilingError::invalid(format!("{{{n},{k}}}: n < 7 needs k >= 4")));
        }
        // n, k >= 3 here
        if (n - 2).saturating_mul(k - 2) <= 4 {
            return Err(TilingError::invalid(format!(
                "{{{n},{k}}} is not hyperbolic: (n-2)(k-2) must exceed 4"
            )));
        }
        Ok(())
    }
}

/// Exact sizes of a grown tiling: indices `< inner` get expanded, the rest are leaves.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TilingSize {
    pub inner: usize,
    pub total: usize,
}

/// Errors raised while configuring or growing a tiling.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TilingError {
    InvalidParams { reason: String },
    TooLarge { total: u128, limit: usize },
    /// The count recurrence left 128-bit range while computing `layer`.
    Overflow { layer: usize },
    CountMismatch { predicted: usize, produced: usize },
}

impl TilingError {
    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidParams {
            reason: reason.into(),
        }
    }
}

impl fmt::Display for TilingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidParams { reason } => write!(f, "invalid tiling params: {reason}"),
            Self::TooLarge { total, limit } => {
                write!(f, "tiling needs {total} polygons, limit is {limit}")
            }
            Self::Overflow { layer } => {
                write!(f, "polygon count overflows at layer {layer}")
            }
            Self::CountMismatch {
                predicted,
                produced,
            } => write!(
                f,
                "growth produced {produced} polygons but {predicted} were predicted"
            ),
        }
    }
}

impl std::error::Error for TilingError {}

/// Predicted sizes after growing `params.layers` layers. Same checks as
/// `TilingParams::validate`.
pub fn count_polys(params: &TilingParams) -> Result<TilingSize, TilingError> {
    let sizes = layer_sizes(params)?;
    Ok(sizes
        .last()
        .copied()
        .unwrap_or(TilingSize { inner: 0, total: 1 }))
}

/// Sizes after 0, 1, …, `params.layers` layers.
pub fn layer_sizes(params: &TilingParams) -> Result<Vec<TilingSize>, TilingError> {
    params.check_shape()?;
    let mut counter = LayerCounter::new(params.n, params.k);
    let mut sizes = Vec::with_capacity(params.layers.min(64) + 1);
    sizes.push(counter.size(params.max_polygons)?);
    for layer in 1..=params.layers {
        counter.step().ok_or(TilingError::Overflow { layer })?;
        sizes.push(counter.size(params.max_polygons)?);
    }
    Ok(sizes)
}

/// Layer recurrence: `a` counts polygons of the next layer that share only a
/// vertex with the previous one, `b` those that share an edge. Coefficients can
/// be negative for n = 3, hence the signed arithmetic.
struct LayerCounter {
    n: i128,
    k: i128,
    a: i128,
    b: i128,
    inner: i128,
    total: i128,
}

impl LayerCounter {
    fn new(n: usize, k: usize) -> Self {
        let (n, k) = (n as i128, k as i128);
        Self {
            n,
            k,
            a: n.saturating_mul(k - 3),
            b: n,
            inner: 0,
            total: 1,
        }
    }

    fn step(&mut self) -> Option<()> {
        let (n, k, a, b) = (self.n, self.k, self.a, self.b);
        let (next_a, next_b) = if k == 3 {
            (
                a.checked_add(b)?,
                (n - 6).checked_mul(a)?.checked_add((n - 5).checked_mul(b)?)?,
            )
        } else {
            let ca = (n - 2).checked_mul(k - 3)? - 1;
            let cb = (n - 3).checked_mul(k - 3)? - 1;
            (
                ca.checked_mul(a)?.checked_add(cb.checked_mul(b)?)?,
                (n - 2).checked_mul(a)?.checked_add((n - 3).checked_mul(b)?)?,
            )
        };
        self.inner = self.total;
        self.total = self.total.checked_add(a.checked_add(b)?)?;
        self.a = next_a;
        self.b = next_b;
        Some(())
    }

    fn size(&self, limit: usize) -> Result<TilingSize, TilingError> {
        let too_large = || TilingError::TooLarge {
            total: self.total.max(0) as u128,
            limit,
        };
        let total = usize::try_from(self.total).map_err(|_| too_large())?;
        if total > limit {
            return Err(too_large());
        }
        let inner = usize::try_from(self.inner).map_err(|_| too_large())?;
        Ok(TilingSize { inner, total })
    }
}
