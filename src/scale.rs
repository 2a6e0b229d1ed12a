//! Linear color scales over a numeric domain.

use tracing::warn;
use crate::color::{ColorRange, Gradient, Range, RGBColor};
use crate::error::{Error, Result};
use crate::legend::LegendBucket;

/// Two colors attached to the bounds of a numeric domain.
///
/// Invariant: both bounds are finite and `domain_min < domain_max`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GradientSpec<Color> {
    domain_min: f64,
    domain_max: f64,
    color_min: Color,
    color_max: Color,
}

impl<Color> GradientSpec<Color> {
    /// Associate `color_min` to `domain_min` and `color_max` to
    /// `domain_max`.  Fails with [`Error::InvalidDomain`] unless
    /// `domain_min < domain_max` and both are finite.
    pub fn new(domain_min: f64, domain_max: f64,
               color_min: Color, color_max: Color) -> Result<Self> {
        if !(domain_min.is_finite() && domain_max.is_finite()
             && domain_min < domain_max) {
            return Err(Error::InvalidDomain { min: domain_min,
                                              max: domain_max })
        }
        Ok(Self::new_unchecked(domain_min, domain_max, color_min, color_max))
    }

    pub(crate) const fn new_unchecked(domain_min: f64, domain_max: f64,
                                      color_min: Color, color_max: Color)
                                      -> Self {
        Self { domain_min, domain_max, color_min, color_max }
    }

    pub fn domain_min(&self) -> f64 { self.domain_min }

    pub fn domain_max(&self) -> f64 { self.domain_max }

    pub fn color_min(&self) -> &Color { &self.color_min }

    pub fn color_max(&self) -> &Color { &self.color_max }
}

/// Maps numbers to colors by linear interpolation between the two
/// colors of a [`GradientSpec`].
///
/// The scale holds no mutable state: it may be shared freely between
/// threads.
///
/// # Example
///
/// ```
/// use rgb::RGB;
/// use quake_legend::{ColorScale, GradientSpec};
/// let spec = GradientSpec::new(0., 100., RGB::new(144., 238., 144.),
///                              RGB::new(139., 0., 0.)).unwrap();
/// let scale = ColorScale::new(spec);
/// assert_eq!(scale.color_for(50.), RGB::new(141.5, 119., 72.));
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct ColorScale<Color> {
    spec: GradientSpec<Color>,
    gradient: Gradient<Color>,
    clamp: bool,
}

impl<Color> ColorScale<Color>
where Color: RGBColor {
    /// Create an unclamped scale: values outside the domain give
    /// extrapolated colors, possibly out of gamut.
    pub fn new(spec: GradientSpec<Color>) -> Self {
        let gradient = spec.color_min.gradient(&spec.color_max);
        ColorScale { spec, gradient, clamp: false }
    }

    /// Whether values outside the domain are brought back to its
    /// bounds before interpolation.
    pub fn clamp(mut self, clamp: bool) -> Self {
        self.clamp = clamp;
        self
    }

    pub fn is_clamped(&self) -> bool { self.clamp }

    pub fn spec(&self) -> &GradientSpec<Color> { &self.spec }

    /// Position of `value` in the domain: 0 at `domain_min`, 1 at
    /// `domain_max`.
    #[inline]
    pub fn normalize(&self, value: f64) -> f64 {
        let t = (value - self.spec.domain_min)
            / (self.spec.domain_max - self.spec.domain_min);
        if self.clamp { t.clamp(0., 1.) } else { t }
    }

    /// Returns the color of `value`.  The bounds of the domain give
    /// back the colors of the spec exactly.  NaN and infinite values
    /// propagate to the channels.
    pub fn color_for(&self, value: f64) -> Color {
        self.gradient.rgb_unclamped(self.normalize(value))
    }

    /// Derive one legend bucket per threshold.  `thresholds` are the
    /// lower bounds of the buckets and should be strictly increasing.
    /// Each bucket ends one unit below the next threshold; the last
    /// one is open-ended.  The representative color is sampled one
    /// unit above the lower bound.
    pub fn legend_buckets(&self, thresholds: &[f64]) -> Vec<LegendBucket<Color>> {
        if thresholds.windows(2).any(|w| !(w[0] < w[1])) {
            warn!(?thresholds, "legend thresholds are not strictly increasing");
        }
        thresholds.iter().enumerate()
            .map(|(i, &lower)| LegendBucket {
                lower_bound: lower,
                upper_bound: thresholds.get(i + 1).map(|next| next - 1.),
                color: self.color_for(lower + 1.),
            })
            .collect()
    }

    /// Return `n` evenly spaced values over the domain (bounds
    /// included) together with their colors, e.g. to draw a color bar.
    pub fn samples(&self, n: usize) -> Range<Gradient<Color>, Color>
    where Color: Clone {
        self.gradient.clone().range(self.spec.domain_min,
                                    self.spec.domain_max, n)
    }
}
