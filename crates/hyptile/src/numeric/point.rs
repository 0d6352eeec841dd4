use super::Dd;
use nalgebra::Vector2;
use std::ops::{Add, Div, Mul, Neg, Sub};

/// A disk coordinate, treated as the complex number `x + iy`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: Dd,
    pub y: Dd,
}

impl Point {
    pub const ORIGIN: Point = Point {
        x: Dd::ZERO,
        y: Dd::ZERO,
    };

    #[inline]
    pub fn new(x: Dd, y: Dd) -> Self {
        Self { x, y }
    }

    #[inline]
    pub fn from_f64(x: f64, y: f64) -> Self {
        Self {
            x: Dd::from(x),
            y: Dd::from(y),
        }
    }

    /// `r·(cos θ, sin θ)`.
    #[inline]
    pub fn polar(r: Dd, theta: Dd) -> Self {
        let (s, c) = theta.sin_cos();
        Self { x: r * c, y: r * s }
    }

    #[inline]
    pub fn conj(self) -> Self {
        Self {
            x: self.x,
            y: -self.y,
        }
    }

    #[inline]
    pub fn dot(self, other: Point) -> Dd {
        self.x * other.x + self.y * other.y
    }

    /// Determinant `self.x·other.y − other.x·self.y`; zero iff the two points
    /// are collinear with the origin.
    #[inline]
    pub fn cross(self, other: Point) -> Dd {
        self.x * other.y - other.x * self.y
    }

    #[inline]
    pub fn norm_sqr(self) -> Dd {
        self.dot(self)
    }

    #[inline]
    pub fn norm(self) -> Dd {
        self.norm_sqr().sqrt()
    }

    #[inline]
    pub fn recip(self) -> Self {
        let n = self.norm_sqr();
        Self {
            x: self.x / n,
            y: -self.y / n,
        }
    }

    #[inline]
    pub fn is_nan(self) -> bool {
        self.x.is_nan() || self.y.is_nan()
    }

    /// Nearest `f64` coordinates, for screen-space work.
    #[inline]
    pub fn to_f64(self) -> Vector2<f64> {
        Vector2::new(self.x.to_f64(), self.y.to_f64())
    }
}

impl Add for Point {
    type Output = Point;
    #[inline]
    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;
    #[inline]
    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Neg for Point {
    type Output = Point;
    #[inline]
    fn neg(self) -> Point {
        Point::new(-self.x, -self.y)
    }
}

/// Complex product.
impl Mul for Point {
    type Output = Point;
    #[inline]
    fn mul(self, w: Point) -> Point {
        Point::new(self.x * w.x - self.y * w.y, self.y * w.x + self.x * w.y)
    }
}

impl Mul<Dd> for Point {
    type Output = Point;
    #[inline]
    fn mul(self, t: Dd) -> Point {
        Point::new(self.x * t, self.y * t)
    }
}

impl Mul<Point> for Dd {
    type Output = Point;
    #[inline]
    fn mul(self, p: Point) -> Point {
        p * self
    }
}

/// Complex quotient; undefined (NaN) for a zero-norm divisor.
impl Div for Point {
    type Output = Point;
    #[inline]
    fn div(self, w: Point) -> Point {
        let n = w.norm_sqr();
        Point::new(
            (self.x * w.x + self.y * w.y) / n,
            (self.y * w.x - self.x * w.y) / n,
        )
    }
}

impl Div<Dd> for Point {
    type Output = Point;
    #[inline]
    fn div(self, t: Dd) -> Point {
        Point::new(self.x / t, self.y / t)
    }
}
