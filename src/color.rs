//! Color encodings, linear gradients and CSS conversions.

use std::marker::PhantomData;
use rgb::{RGB, RGBA, RGB8, RGB16, RGBA8, RGBA16};
use crate::error::{Error, Result};

/// A “continuous” range of colors parametrized by reals in \[0, 1\].
pub trait ColorRange<Color> {
    /// Returns the color corresponding to `t`.  Values of `t` outside
    /// \[0, 1\] are handled as the implementation documents.
    fn rgb(&self, t: f64) -> Color;

    /// Return an iterator yielding `n` evenly spaced points between
    /// `a` and `b` (both included) together with their colors, `a`
    /// being associated to `t = 0` and `b` to `t = 1`.  It is not
    /// required that `a <= b`.
    fn range(self, a: f64, b: f64, n: usize) -> Range<Self, Color>
    where Self: Sized {
        Range { range: self, color: PhantomData, a, b, n, i: 0 }
    }
}

/// An iterator yielding `f64` in a given range together with colors.
///
/// Created by [`ColorRange::range`].
pub struct Range<R, Color> {
    range: R,
    color: PhantomData<Color>,
    a: f64,
    b: f64,
    n: usize, // number of points
    i: usize, // next position to be consumed
}

impl<R, Color> Range<R, Color> where R: ColorRange<Color> {
    fn point(&self, k: usize) -> (f64, Color) {
        if k == 0 {
            (self.a, self.range.rgb(0.))
        } else if k == self.n - 1 {
            (self.b, self.range.rgb(1.))
        } else {
            let t = k as f64 / (self.n - 1) as f64;
            ((1. - t) * self.a + t * self.b, self.range.rgb(t))
        }
    }
}

impl<R, Color> Iterator for Range<R, Color>
where R: ColorRange<Color> {
    type Item = (f64, Color);

    fn next(&mut self) -> Option<Self::Item> {
        if self.i >= self.n { return None }
        let item = self.point(self.i);
        self.i += 1;
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.n - self.i;
        (len, Some(len))
    }
}

impl<R, Color> ExactSizeIterator for Range<R, Color>
where R: ColorRange<Color> {}

/// Specifies the methods a RGB color encoding must provide.
///
/// Channels are expressed in \[0, 255\], alpha included.
pub trait RGBColor: Sized {
    /// Return the red, green, blue and alpha components of the color.
    fn to_rgba(&self) -> RGBA<f64>;

    /// Create a color from its RGBA components.  Integer encodings
    /// round and saturate; floating point ones keep the values as is.
    fn from_rgba(rgba: RGBA<f64>) -> Self;

    /// Return a linear gradient (in RGB space) from `self` to `c1`.
    ///
    /// # Example
    ///
    /// ```
    /// use rgb::RGB8;
    /// use quake_legend::{RGBColor, ColorRange};
    /// let red = RGB8::new(255, 0, 0);
    /// let blue = RGB8::new(0, 0, 255);
    /// let grad = red.gradient(&blue);
    /// assert_eq!(grad.rgb(0.5), RGB8::new(128, 0, 128));
    /// ```
    fn gradient(&self, c1: &Self) -> Gradient<Self> {
        Gradient { c0: self.to_rgba(), c1: c1.to_rgba(), color: PhantomData }
    }

    /// Convert the color to grayscale.
    fn to_gray(&self) -> Self {
        let RGBA{ r, g, b, a } = Self::to_rgba(self);
        let x = 0.299 * r + 0.587 * g + 0.114 * b;
        Self::from_rgba(RGBA{ r: x, g: x, b: x, a })
    }
}

/// Round and clamp a channel to \[0, 255\]; NaN maps to 0.
fn saturate(x: f64) -> f64 {
    let x = x.round();
    if x.is_nan() || x <= 0. { 0. } else { x.min(255.) }
}

impl RGBColor for RGBA<f64> {
    #[inline]
    fn to_rgba(&self) -> RGBA<f64> { *self }

    #[inline]
    fn from_rgba(c: RGBA<f64>) -> Self { c }
}

impl RGBColor for RGB<f64> {
    #[inline]
    fn to_rgba(&self) -> RGBA<f64> {
        RGBA{ r: self.r, g: self.g, b: self.b, a: 255. }
    }

    #[inline]
    fn from_rgba(c: RGBA<f64>) -> Self { RGB { r: c.r, g: c.g, b: c.b } }
}

impl RGBColor for RGB8 {
    #[inline]
    fn to_rgba(&self) -> RGBA<f64> {
        RGBA{ r: self.r as f64, g: self.g as f64, b: self.b as f64, a: 255. }
    }

    #[inline]
    fn from_rgba(c: RGBA<f64>) -> Self {
        RGB8 { r: saturate(c.r) as u8, g: saturate(c.g) as u8,
               b: saturate(c.b) as u8 }
    }
}

impl RGBColor for RGB16 {
    #[inline]
    fn to_rgba(&self) -> RGBA<f64> {
        RGBA{ r: self.r as f64, g: self.g as f64, b: self.b as f64, a: 255. }
    }

    #[inline]
    fn from_rgba(c: RGBA<f64>) -> Self {
        RGB16 { r: saturate(c.r) as u16, g: saturate(c.g) as u16,
                b: saturate(c.b) as u16 }
    }
}

impl RGBColor for RGBA8 {
    #[inline]
    fn to_rgba(&self) -> RGBA<f64> {
        RGBA{ r: self.r as f64, g: self.g as f64, b: self.b as f64,
              a: self.a as f64 }
    }

    #[inline]
    fn from_rgba(c: RGBA<f64>) -> Self {
        RGBA8 { r: saturate(c.r) as u8, g: saturate(c.g) as u8,
                b: saturate(c.b) as u8, a: saturate(c.a) as u8 }
    }
}

impl RGBColor for RGBA16 {
    #[inline]
    fn to_rgba(&self) -> RGBA<f64> {
        RGBA{ r: self.r as f64, g: self.g as f64, b: self.b as f64,
              a: self.a as f64 }
    }

    #[inline]
    fn from_rgba(c: RGBA<f64>) -> Self {
        RGBA16 { r: saturate(c.r) as u16, g: saturate(c.g) as u16,
                 b: saturate(c.b) as u16, a: saturate(c.a) as u16 }
    }
}

/// Linear gradient between two colors.
///
/// Created by [`RGBColor::gradient`].  See the [`ColorRange`] trait
/// for methods.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Gradient<Color> {
    c0: RGBA<f64>,
    c1: RGBA<f64>,
    color: PhantomData<Color>,
}

#[inline]
fn lerp(a: f64, b: f64, t: f64) -> f64 { (1. - t) * a + t * b }

impl<Color> Gradient<Color>
where Color: RGBColor {
    /// Returns the color corresponding to `t` without restricting it
    /// to \[0, 1\]: values outside extrapolate the line through both
    /// colors.  `t == 0.` and `t == 1.` give back the end colors
    /// exactly.
    #[inline]
    pub fn rgb_unclamped(&self, t: f64) -> Color {
        Color::from_rgba(RGBA { r: lerp(self.c0.r, self.c1.r, t),
                                g: lerp(self.c0.g, self.c1.g, t),
                                b: lerp(self.c0.b, self.c1.b, t),
                                a: lerp(self.c0.a, self.c1.a, t) })
    }

    /// The first color of the gradient.
    pub fn start(&self) -> Color { Color::from_rgba(self.c0) }

    /// The last color of the gradient.
    pub fn end(&self) -> Color { Color::from_rgba(self.c1) }
}

impl<Color> ColorRange<Color> for Gradient<Color>
where Color: RGBColor {
    /// Returns the color corresponding to `t` ∈ \[0., 1.\], where
    /// `t == 0.` returns the first color provided in the gradient and
    /// `t == 1.` the second.  `t` is clamped to \[0, 1\].
    fn rgb(&self, t: f64) -> Color { self.rgb_unclamped(t.clamp(0., 1.)) }
}

/// Parse a CSS color: named colors (“lightgreen”), hex notations
/// (“#90ee90”) and functional ones (“rgb(144, 238, 144)”, “hsl(…)”).
pub fn parse<Color: RGBColor>(s: &str) -> Result<Color> {
    let c = csscolorparser::parse(s)
        .map_err(|_| Error::InvalidColor(s.to_string()))?;
    let [r, g, b, a] = c.to_rgba8();
    Ok(Color::from_rgba(RGBA { r: r as f64, g: g as f64, b: b as f64,
                               a: a as f64 }))
}

/// Format the color as a CSS `rgb(r, g, b)` string, or
/// `rgba(r, g, b, a)` when it is not opaque.  Channels are rounded
/// and clamped to \[0, 255\] so extrapolated colors stay displayable.
pub fn css<Color: RGBColor>(c: &Color) -> String {
    let RGBA { r, g, b, a } = c.to_rgba();
    let (r, g, b) = (saturate(r), saturate(g), saturate(b));
    let a = saturate(a);
    if a >= 255. {
        format!("rgb({r}, {g}, {b})")
    } else {
        format!("rgba({r}, {g}, {b}, {})", a / 255.)
    }
}

/// Format the color as `#rrggbb` (alpha is ignored).
pub fn hex<Color: RGBColor>(c: &Color) -> String {
    let RGBA { r, g, b, .. } = c.to_rgba();
    format!("#{:02x}{:02x}{:02x}",
            saturate(r) as u8, saturate(g) as u8, saturate(b) as u8)
}


#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::assert_approx_eq;

    #[test]
    fn parse_names_and_hex() {
        let c: RGB8 = parse("lightgreen").unwrap();
        assert_eq!(c, RGB8::new(144, 238, 144));
        let c: RGB8 = parse("darkred").unwrap();
        assert_eq!(c, RGB8::new(139, 0, 0));
        let c: RGB<f64> = parse("#90ee90").unwrap();
        assert_eq!(c, RGB::new(144., 238., 144.));
        let c: RGBA8 = parse("black").unwrap();
        assert_eq!(c, RGBA8::new(0, 0, 0, 255));
    }

    #[test]
    fn parse_rejects_garbage() {
        let e = parse::<RGB8>("not-a-color").unwrap_err();
        assert!(matches!(e, Error::InvalidColor(ref s) if s == "not-a-color"));
    }

    #[test]
    fn css_rounds_and_clamps() {
        assert_eq!(css(&RGB::new(141.5, 119., 72.)), "rgb(142, 119, 72)");
        assert_eq!(css(&RGB::new(-3.2, 300., f64::NAN)), "rgb(0, 255, 0)");
        assert_eq!(css(&RGBA::new(0., 0., 0., 0.)), "rgba(0, 0, 0, 0)");
        assert_eq!(hex(&RGB8::new(144, 238, 144)), "#90ee90");
    }

    #[test]
    fn gradient_clamps_but_unclamped_extrapolates() {
        let g = RGB::new(0., 0., 0.).gradient(&RGB::new(100., 200., 50.));
        assert_eq!(g.rgb(2.), RGB::new(100., 200., 50.));
        assert_eq!(g.rgb_unclamped(2.), RGB::new(200., 400., 100.));
        assert_eq!(g.start(), RGB::new(0., 0., 0.));
        assert_eq!(g.end(), RGB::new(100., 200., 50.));
    }

    #[test]
    fn integer_encodings_saturate() {
        let g = RGB8::new(250, 10, 0).gradient(&RGB8::new(255, 0, 0));
        assert_eq!(g.rgb_unclamped(3.), RGB8::new(255, 0, 0));
        assert_eq!(g.rgb_unclamped(-3.), RGB8::new(235, 40, 0));
    }

    #[test]
    fn gradient_range() {
        let g = RGB::new(0., 0., 0.).gradient(&RGB::new(100., 100., 100.));
        let pts: Vec<_> = g.range(10., 20., 11).collect();
        assert_eq!(pts.len(), 11);
        for (i, (x, c)) in pts.iter().enumerate() {
            assert_approx_eq!(f64, *x, 10. + i as f64, epsilon = 1e-9);
            assert_approx_eq!(f64, c.r, 10. * i as f64, epsilon = 1e-9);
        }
        assert_eq!(pts[0], (10., RGB::new(0., 0., 0.)));
        assert_eq!(pts[10], (20., RGB::new(100., 100., 100.)));
    }

    #[test]
    fn empty_and_single_range() {
        let g = RGB8::new(0, 0, 0).gradient(&RGB8::new(9, 9, 9));
        assert_eq!(g.range(0., 1., 0).count(), 0);
        let one: Vec<_> = g.range(5., 7., 1).collect();
        assert_eq!(one, vec![(5., RGB8::new(0, 0, 0))]);
    }

    #[test]
    fn gray() {
        assert_eq!(RGB8::new(255, 255, 255).to_gray(), RGB8::new(255, 255, 255));
        assert_eq!(RGB8::new(0, 0, 0).to_gray(), RGB8::new(0, 0, 0));
    }
}
