//! Sources for the random curvature probes.
//!
//! The flatness algorithm only needs weights in [0, 1); where they come from is
//! a strategy. Production uses a seeded or entropy-backed RNG; tests pin the
//! sequence with `CyclicProbes`.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Supplies interpolation weights `w ∈ [0, 1)` for probe points `w·a + (1−w)·b`.
pub trait ProbeSampler {
    fn weight(&mut self) -> f64;
}

impl<S: ProbeSampler + ?Sized> ProbeSampler for &mut S {
    #[inline]
    fn weight(&mut self) -> f64 {
        (**self).weight()
    }
}

/// Uniform weights from any `rand::Rng`.
#[derive(Clone, Debug)]
pub struct RngProbes<R> {
    rng: R,
}

impl<R: Rng> RngProbes<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RngProbes<StdRng> {
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }
}

impl<R: Rng> ProbeSampler for RngProbes<R> {
    #[inline]
    fn weight(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }
}

/// Replays a fixed list of weights forever (clamped to [0, 1]).
#[derive(Clone, Debug)]
pub struct CyclicProbes {
    weights: Vec<f64>,
    next: usize,
}

impl CyclicProbes {
    /// An empty list behaves like `[0.5]`.
    pub fn new(weights: Vec<f64>) -> Self {
        let weights = if weights.is_empty() { vec![0.5] } else { weights };
        Self { weights, next: 0 }
    }
}

impl ProbeSampler for CyclicProbes {
    fn weight(&mut self) -> f64 {
        let w = self.weights[self.next % self.weights.len()];
        self.next = self.next.wrapping_add(1);
        w.clamp(0.0, 1.0)
    }
}
