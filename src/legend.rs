//! Discrete legends derived from a [`ColorScale`](crate::ColorScale).

use std::fmt;
use serde::{Deserialize, Serialize};

/// A range of values sharing one representative color.
///
/// Created by [`ColorScale::legend_buckets`](crate::ColorScale::legend_buckets).
/// Displays as `lower–upper`, or `lower+` for the open-ended bucket.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LegendBucket<Color> {
    pub lower_bound: f64,
    /// `None` for the last, open-ended, bucket.
    pub upper_bound: Option<f64>,
    pub color: Color,
}

impl<Color> fmt::Display for LegendBucket<Color> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.upper_bound {
            Some(upper) => write!(f, "{}–{}", self.lower_bound, upper),
            None => write!(f, "{}+", self.lower_bound),
        }
    }
}

/// Corner of the map holding the legend.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LegendPosition {
    TopLeft,
    TopRight,
    BottomLeft,
    #[default]
    BottomRight,
}

/// A titled list of buckets, ready to be drawn by a
/// [`Renderer`](crate::Renderer).
#[derive(Clone, Debug, PartialEq)]
pub struct Legend<Color> {
    pub title: String,
    pub position: LegendPosition,
    pub buckets: Vec<LegendBucket<Color>>,
}

/// Plain text rendering: the title followed by one label per line.
impl<Color> fmt::Display for Legend<Color> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.title)?;
        for b in &self.buckets {
            write!(f, "\n{b}")?;
        }
        Ok(())
    }
}
