//! Double-double real numbers.
//!
//! Error-free transformations (`two_sum`, `two_prod` via FMA) keep the rounding
//! error of every `f64` operation in the low word. Algorithms follow the
//! classic QD-library formulations (accurate add, sloppy-free division,
//! one Newton step for sqrt).

use super::cfg::{SERIES_CUTOFF, SERIES_MAX_TERMS};
use std::cmp::Ordering;
use std::ops::{Add, AddAssign, Div, Mul, MulAssign, Neg, Sub, SubAssign};

/// Real number stored as the unevaluated sum `hi + lo`.
///
/// Invariant: normalized, i.e. `hi == hi + lo` in `f64` arithmetic.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Dd {
    hi: f64,
    lo: f64,
}

#[inline]
fn two_sum(a: f64, b: f64) -> (f64, f64) {
    let s = a + b;
    let bb = s - a;
    let err = (a - (s - bb)) + (b - bb);
    (s, err)
}

/// `two_sum` assuming `|a| >= |b|`.
#[inline]
fn quick_two_sum(a: f64, b: f64) -> (f64, f64) {
    let s = a + b;
    let err = b - (s - a);
    (s, err)
}

#[inline]
fn two_prod(a: f64, b: f64) -> (f64, f64) {
    let p = a * b;
    let err = a.mul_add(b, -p);
    (p, err)
}

impl Dd {
    pub const ZERO: Dd = Dd { hi: 0.0, lo: 0.0 };
    pub const ONE: Dd = Dd { hi: 1.0, lo: 0.0 };
    pub const NAN: Dd = Dd {
        hi: f64::NAN,
        lo: f64::NAN,
    };
    pub const PI: Dd = Dd {
        hi: std::f64::consts::PI,
        lo: 1.224_646_799_147_353_2e-16,
    };
    pub const TAU: Dd = Dd {
        hi: std::f64::consts::TAU,
        lo: 2.449_293_598_294_706_4e-16,
    };
    pub const FRAC_PI_2: Dd = Dd {
        hi: std::f64::consts::FRAC_PI_2,
        lo: 6.123_233_995_736_766e-17,
    };

    #[inline]
    fn from_sum(a: f64, b: f64) -> Dd {
        let (hi, lo) = quick_two_sum(a, b);
        Dd { hi, lo }
    }

    /// Leading word (the nearest `f64`).
    #[inline]
    pub fn hi(self) -> f64 {
        self.hi
    }

    /// Trailing word.
    #[inline]
    pub fn lo(self) -> f64 {
        self.lo
    }

    /// Round to the nearest `f64`.
    #[inline]
    pub fn to_f64(self) -> f64 {
        self.hi
    }

    #[inline]
    pub fn is_nan(self) -> bool {
        self.hi.is_nan() || self.lo.is_nan()
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.hi.is_finite() && self.lo.is_finite()
    }

    #[inline]
    pub fn abs(self) -> Dd {
        if self.hi < 0.0 {
            -self
        } else {
            self
        }
    }

    #[inline]
    pub fn sqr(self) -> Dd {
        let (p1, p2) = two_prod(self.hi, self.hi);
        let p2 = p2 + 2.0 * self.hi * self.lo + self.lo * self.lo;
        Dd::from_sum(p1, p2)
    }

    #[inline]
    pub fn recip(self) -> Dd {
        Dd::ONE / self
    }

    /// Square root; NaN for negative or NaN input.
    pub fn sqrt(self) -> Dd {
        if self.hi == 0.0 {
            return Dd::ZERO;
        }
        if self.is_nan() || self.hi < 0.0 {
            return Dd::NAN;
        }
        // One Newton step on 1/sqrt doubles the f64 estimate's precision.
        let x = 1.0 / self.hi.sqrt();
        let ax = self.hi * x;
        let (p, e) = two_prod(ax, ax);
        let residual = self - Dd { hi: p, lo: e };
        let (hi, lo) = two_sum(ax, residual.hi * (x * 0.5));
        Dd { hi, lo }
    }

    pub fn sin(self) -> Dd {
        self.sin_cos().0
    }

    pub fn cos(self) -> Dd {
        self.sin_cos().1
    }

    /// Sine and cosine together: reduce modulo π/2 into [-π/4, π/4], sum the
    /// Taylor series to full precision, then rotate by the quadrant.
    pub fn sin_cos(self) -> (Dd, Dd) {
        if !self.is_finite() {
            return (Dd::NAN, Dd::NAN);
        }
        let quarter = (self.hi / Dd::FRAC_PI_2.hi).round();
        let r = self - Dd::FRAC_PI_2 * quarter;
        let s = alternating_series(r, r, 1);
        let c = alternating_series(r, Dd::ONE, 0);
        match (quarter as i64).rem_euclid(4) {
            0 => (s, c),
            1 => (c, -s),
            2 => (-s, -c),
            _ => (-c, s),
        }
    }
}

/// Sum `first·(1 − x²/((s+1)(s+2)) + …)`, the shape shared by the sine
/// (`first = x`, `s = 1`) and cosine (`first = 1`, `s = 0`) series.
fn alternating_series(x: Dd, first: Dd, start: u32) -> Dd {
    let x2 = x.sqr();
    let mut term = first;
    let mut sum = first;
    let mut i = start as f64;
    for _ in 0..SERIES_MAX_TERMS {
        term = -(term * x2) / ((i + 1.0) * (i + 2.0));
        i += 2.0;
        sum += term;
        if term.hi.abs() <= SERIES_CUTOFF * sum.hi.abs() {
            break;
        }
    }
    sum
}

impl From<f64> for Dd {
    #[inline]
    fn from(hi: f64) -> Self {
        Dd { hi, lo: 0.0 }
    }
}

impl From<i32> for Dd {
    #[inline]
    fn from(v: i32) -> Self {
        Dd::from(v as f64)
    }
}

impl PartialOrd for Dd {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match self.hi.partial_cmp(&other.hi)? {
            Ordering::Equal => self.lo.partial_cmp(&other.lo),
            o => Some(o),
        }
    }
}

impl Neg for Dd {
    type Output = Dd;
    #[inline]
    fn neg(self) -> Dd {
        Dd {
            hi: -self.hi,
            lo: -self.lo,
        }
    }
}

impl Add for Dd {
    type Output = Dd;
    #[inline]
    fn add(self, rhs: Dd) -> Dd {
        let (s1, s2) = two_sum(self.hi, rhs.hi);
        let (t1, t2) = two_sum(self.lo, rhs.lo);
        let (s1, s2) = quick_two_sum(s1, s2 + t1);
        Dd::from_sum(s1, s2 + t2)
    }
}

impl Add<f64> for Dd {
    type Output = Dd;
    #[inline]
    fn add(self, rhs: f64) -> Dd {
        let (s1, s2) = two_sum(self.hi, rhs);
        Dd::from_sum(s1, s2 + self.lo)
    }
}

impl Sub for Dd {
    type Output = Dd;
    #[inline]
    fn sub(self, rhs: Dd) -> Dd {
        self + (-rhs)
    }
}

impl Sub<f64> for Dd {
    type Output = Dd;
    #[inline]
    fn sub(self, rhs: f64) -> Dd {
        self + (-rhs)
    }
}

impl Mul for Dd {
    type Output = Dd;
    #[inline]
    fn mul(self, rhs: Dd) -> Dd {
        let (p1, p2) = two_prod(self.hi, rhs.hi);
        let p2 = p2 + (self.hi * rhs.lo + self.lo * rhs.hi);
        Dd::from_sum(p1, p2)
    }
}

impl Mul<f64> for Dd {
    type Output = Dd;
    #[inline]
    fn mul(self, rhs: f64) -> Dd {
        let (p1, p2) = two_prod(self.hi, rhs);
        Dd::from_sum(p1, p2 + self.lo * rhs)
    }
}

impl Div for Dd {
    type Output = Dd;
    fn div(self, rhs: Dd) -> Dd {
        let q1 = self.hi / rhs.hi;
        let r = self - rhs * q1;
        let q2 = r.hi / rhs.hi;
        let r = r - rhs * q2;
        let q3 = r.hi / rhs.hi;
        Dd::from_sum(q1, q2) + q3
    }
}

impl Div<f64> for Dd {
    type Output = Dd;
    #[inline]
    fn div(self, rhs: f64) -> Dd {
        self / Dd::from(rhs)
    }
}

impl AddAssign for Dd {
    #[inline]
    fn add_assign(&mut self, rhs: Dd) {
        *self = *self + rhs;
    }
}

impl SubAssign for Dd {
    #[inline]
    fn sub_assign(&mut self, rhs: Dd) {
        *self = *self - rhs;
    }
}

impl MulAssign for Dd {
    #[inline]
    fn mul_assign(&mut self, rhs: Dd) {
        *self = *self * rhs;
    }
}
