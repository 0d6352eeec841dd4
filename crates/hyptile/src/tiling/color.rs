//! Polygon colors and the sources that hand them out.

use super::TilingError;
use rand::Rng;
use std::fmt;

/// "Flat UI" palette used when no colors are given.
pub const FLAT_COLORS: [&str; 20] = [
    "#1abc9c", "#2ecc71", "#3498db", "#9b59b6", "#34495e", "#16a085", "#27ae60", "#2980b9",
    "#8e44ad", "#2c3e50", "#f1c40f", "#e67e22", "#e74c3c", "#ecf0f1", "#95a5a6", "#f39c12",
    "#d35400", "#c0392b", "#bdc3c7", "#7f8c8d",
];

/// Opaque color identifier (typically `#rrggbb`); only compared for equality.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Color(String);

impl Color {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Color {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Hands out colors for freshly grown polygons.
pub trait ColorSource {
    fn next_color(&mut self) -> Color;
}

impl<S: ColorSource + ?Sized> ColorSource for &mut S {
    #[inline]
    fn next_color(&mut self) -> Color {
        (**self).next_color()
    }
}

/// Round-robin over a fixed list, starting at a chosen index.
#[derive(Clone, Debug)]
pub struct Palette {
    colors: Vec<Color>,
    next: usize,
}

impl Palette {
    /// Palette starting at its first color. Empty lists are rejected.
    pub fn new(colors: Vec<Color>) -> Result<Self, TilingError> {
        if colors.is_empty() {
            return Err(TilingError::invalid("palette needs at least one color"));
        }
        Ok(Self { colors, next: 0 })
    }

    /// Palette starting at a uniformly drawn index.
    pub fn with_random_start<R: Rng + ?Sized>(
        colors: Vec<Color>,
        rng: &mut R,
    ) -> Result<Self, TilingError> {
        let mut palette = Self::new(colors)?;
        palette.next = rng.gen_range(0..palette.colors.len());
        Ok(palette)
    }

    /// The flat palette with a random start.
    pub fn flat<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let colors: Vec<Color> = FLAT_COLORS.iter().map(|&c| Color::from(c)).collect();
        let next = rng.gen_range(0..colors.len());
        Self { colors, next }
    }

    pub fn colors(&self) -> &[Color] {
        &self.colors
    }
}

impl ColorSource for Palette {
    fn next_color(&mut self) -> Color {
        let color = self.colors[self.next].clone();
        self.next = (self.next + 1) % self.colors.len();
        color
    }
}
