//! Linear RGB color.
//!
//! Channels are unclamped while shading; only [`Color::to_rgb8`] folds
//! them into display range.

use std::iter::Sum;
use std::ops::{Add, AddAssign, Div, Mul};

/// An RGB color in linear space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Color {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

/// Clamp the upper bound of a channel to 1.
///
/// There is no lower clamp: negative channels survive until the integer
/// conversion floors them.
#[inline]
pub fn legalize(d: f64) -> f64 {
    if d > 1.0 {
        1.0
    } else {
        d
    }
}

impl Color {
    pub const WHITE: Color = Color::new(1.0, 1.0, 1.0);
    pub const GREY: Color = Color::new(0.5, 0.5, 0.5);
    pub const BLACK: Color = Color::new(0.0, 0.0, 0.0);

    #[inline]
    pub const fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    /// A grey with every channel set to `v`.
    #[inline]
    pub const fn splat(v: f64) -> Self {
        Self::new(v, v, v)
    }

    #[inline]
    pub const fn from_array([r, g, b]: [f64; 3]) -> Self {
        Self::new(r, g, b)
    }

    /// Euclidean norm of the channels.
    ///
    /// Only meaningful as a comparison key (picking the brightest of several
    /// samples), not as a luminance.
    #[inline]
    pub fn lightness(&self) -> f64 {
        (self.r * self.r + self.g * self.g + self.b * self.b).sqrt()
    }

    /// Quantize to 8-bit display values: `floor(legalize(c) * 255)`.
    ///
    /// The float to int cast saturates, so negative channels land on 0 and
    /// NaN becomes 0 as well.
    pub fn to_rgb8(&self) -> [u8; 3] {
        let quantize = |d: f64| (legalize(d) * 255.0).floor() as u8;
        [quantize(self.r), quantize(self.g), quantize(self.b)]
    }
}

impl Add for Color {
    type Output = Color;

    #[inline]
    fn add(self, rhs: Color) -> Color {
        Color::new(self.r + rhs.r, self.g + rhs.g, self.b + rhs.b)
    }
}

impl AddAssign for Color {
    #[inline]
    fn add_assign(&mut self, rhs: Color) {
        *self = *self + rhs;
    }
}

/// Component-wise product.
impl Mul for Color {
    type Output = Color;

    #[inline]
    fn mul(self, rhs: Color) -> Color {
        Color::new(self.r * rhs.r, self.g * rhs.g, self.b * rhs.b)
    }
}

impl Mul<f64> for Color {
    type Output = Color;

    #[inline]
    fn mul(self, k: f64) -> Color {
        Color::new(self.r * k, self.g * k, self.b * k)
    }
}

impl Mul<Color> for f64 {
    type Output = Color;

    #[inline]
    fn mul(self, c: Color) -> Color {
        c * self
    }
}

impl Div<f64> for Color {
    type Output = Color;

    #[inline]
    fn div(self, k: f64) -> Color {
        Color::new(self.r / k, self.g / k, self.b / k)
    }
}

impl Sum for Color {
    fn sum<I: Iterator<Item = Color>>(iter: I) -> Color {
        iter.fold(Color::BLACK, Add::add)
    }
}

impl From<[f64; 3]> for Color {
    fn from(rgb: [f64; 3]) -> Self {
        Color::from_array(rgb)
    }
}
