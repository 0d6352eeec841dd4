//! Tolerance defaults for extended-precision arithmetic (internal).
//!
//! Policy
//! - Fixed constants; the precision of `Dd` is static, so the cutoffs are too.

/// Relative size below which a Taylor term no longer changes a double-double sum.
pub(crate) const SERIES_CUTOFF: f64 = 1e-33;
/// Hard bound on Taylor terms after argument reduction to [-π/4, π/4].
pub(crate) const SERIES_MAX_TERMS: usize = 64;
