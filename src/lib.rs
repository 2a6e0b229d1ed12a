//! Depth color scales and legends for earthquake maps.
//!
//! - [`ColorScale`]: linear interpolation between two colors over a
//!   numeric domain, and legend buckets derived from thresholds.
//! - [`FeatureCollection`]: the GeoJSON feed, reduced to [`Quake`]s.
//! - [`QuakeMap`]: turns quakes into [`Marker`]s and a [`Legend`]
//!   handed to a [`Renderer`].
//!
//! The default depth scale, [`struct@DEPTH_SCALE`], goes from light
//! green at 0 km to dark red at 100 km and is not clamped.
//!
//! ```
//! use quake_legend::{DEPTH_SCALE, DEPTH_THRESHOLDS};
//! let labels: Vec<_> = DEPTH_SCALE.legend_buckets(&DEPTH_THRESHOLDS)
//!     .iter().map(|b| b.to_string()).collect();
//! assert_eq!(labels, ["0–9", "10–29", "30–49", "50–69", "70–89", "90+"]);
//! ```

use lazy_static::lazy_static;
use rgb::RGB;

pub mod color;
mod error;
mod feed;
mod legend;
mod map;
mod scale;

pub use color::{ColorRange, Gradient, RGBColor};
pub use error::{Error, Result};
pub use feed::{Feature, FeatureCollection, Geometry, Properties, Quake};
pub use legend::{Legend, LegendBucket, LegendPosition};
pub use map::{MapConfig, Marker, MarkerStyle, Popup, QuakeMap, Renderer};
pub use scale::{ColorScale, GradientSpec};

/// Lower bounds, in km, of the default depth legend buckets.
pub const DEPTH_THRESHOLDS: [f64; 6] = [0., 10., 30., 50., 70., 90.];

lazy_static! {
    /// Light green (0 km) to dark red (100 km).
    pub static ref DEPTH_SCALE: ColorScale<RGB<f64>> = ColorScale::new(
        GradientSpec::new_unchecked(0., 100., RGB::new(144., 238., 144.),
                                    RGB::new(139., 0., 0.)));
}
