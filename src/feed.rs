//! Earthquake feeds in the GeoJSON format published by the USGS.
//!
//! Only the fields needed to place and describe a quake are kept;
//! everything else in the document is ignored.

use std::io::Read;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use crate::error::Result;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FeatureCollection {
    #[serde(default)]
    pub features: Vec<Feature>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Feature {
    #[serde(default)]
    pub id: Option<serde_json::Value>,
    #[serde(default)]
    pub geometry: Option<Geometry>,
    #[serde(default)]
    pub properties: Option<Properties>,
}

/// A point geometry: `[longitude, latitude, depth]`.  Entries may be
/// `null` in the feed; such features yield no [`Quake`].
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Geometry {
    #[serde(default)]
    pub coordinates: Vec<Option<f64>>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Properties {
    pub mag: Option<f64>,
    pub place: Option<String>,
    /// Origin time, in milliseconds since the epoch.
    pub time: Option<i64>,
    pub url: Option<String>,
}

impl FeatureCollection {
    pub fn from_json(s: &str) -> Result<Self> {
        Ok(serde_json::from_str(s)?)
    }

    pub fn from_reader(rdr: impl Read) -> Result<Self> {
        let feed: Self = serde_json::from_reader(rdr)?;
        debug!(features = feed.features.len(), "feed loaded");
        Ok(feed)
    }

    /// Iterate over the quakes of the feed, skipping features that
    /// lack a coordinate, a depth or a magnitude.
    pub fn quakes(&self) -> impl Iterator<Item = Quake> + '_ {
        self.features.iter().filter_map(|f| {
            let quake = Quake::from_feature(f);
            if quake.is_none() {
                warn!(id = ?f.id, "skipping feature without coordinates, depth or magnitude");
            }
            quake
        })
    }
}

/// The scalars describing one earthquake.
#[derive(Clone, Debug, PartialEq)]
pub struct Quake {
    pub longitude: f64,
    pub latitude: f64,
    /// Depth in kilometers.
    pub depth: f64,
    pub magnitude: f64,
    /// Empty when the feed does not name the location.
    pub place: String,
}

impl Quake {
    /// Extract the quake described by `f`, if its longitude, latitude
    /// and depth are all present and it has a magnitude.
    pub fn from_feature(f: &Feature) -> Option<Quake> {
        let geometry = f.geometry.as_ref()?;
        let &[Some(longitude), Some(latitude), Some(depth), ..] =
            geometry.coordinates.as_slice()
        else { return None };
        let properties = f.properties.as_ref()?;
        Some(Quake {
            longitude, latitude, depth,
            magnitude: properties.mag?,
            place: properties.place.clone().unwrap_or_default(),
        })
    }
}
