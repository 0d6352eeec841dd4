//! Disk-to-pixel mapping and the per-polygon point accumulator.

use super::TraceError;
use nalgebra::Vector2;

/// Integer pixel coordinate `(x, y)`.
pub type Pixel = (i32, i32);

/// Affine map from the unit disk to a `width × height` canvas: the disk is
/// centered and its radius is `min(width/2, height/2)` (integer halves).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScreenMap {
    x_center: i32,
    y_center: i32,
    radius: i32,
}

impl ScreenMap {
    pub fn new(width: u32, height: u32) -> Result<Self, TraceError> {
        if width <= 4 || height <= 4 || width > i32::MAX as u32 || height > i32::MAX as u32 {
            return Err(TraceError::InvalidCanvas { width, height });
        }
        let x_center = (width / 2) as i32;
        let y_center = (height / 2) as i32;
        Ok(Self {
            x_center,
            y_center,
            radius: x_center.min(y_center),
        })
    }

    #[inline]
    pub fn radius(&self) -> i32 {
        self.radius
    }

    #[inline]
    pub fn center(&self) -> Vector2<f64> {
        Vector2::new(self.x_center as f64, self.y_center as f64)
    }

    /// Continuous pixel position of a disk coordinate.
    #[inline]
    pub fn to_screen(&self, p: Vector2<f64>) -> Vector2<f64> {
        self.center() + p * self.radius as f64
    }

    /// Rounded pixel of a disk coordinate.
    #[inline]
    pub fn project(&self, p: Vector2<f64>) -> Pixel {
        let s = self.to_screen(p);
        (s.x.round() as i32, s.y.round() as i32)
    }
}

/// Ordered pixel sequence tracing one polygon boundary.
///
/// Invariant: no two consecutive points are equal.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ScreenTrace {
    points: Vec<Pixel>,
    capped: usize,
}

impl ScreenTrace {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `p` unless it repeats the last point. Returns whether it was appended.
    #[inline]
    pub fn push(&mut self, p: Pixel) -> bool {
        if self.points.last() == Some(&p) {
            return false;
        }
        self.points.push(p);
        true
    }

    #[inline]
    pub fn last(&self) -> Option<Pixel> {
        self.points.last().copied()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    #[inline]
    pub fn points(&self) -> &[Pixel] {
        &self.points
    }

    pub fn into_points(self) -> Vec<Pixel> {
        self.points
    }

    /// Intervals that hit the depth cap and were emitted unrefined.
    #[inline]
    pub fn capped(&self) -> usize {
        self.capped
    }

    #[inline]
    pub(crate) fn note_capped(&mut self) {
        self.capped += 1;
    }
}
