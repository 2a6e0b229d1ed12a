//! From a feed to drawable markers and a legend.
//!
//! [`QuakeMap`] owns everything needed to describe the map; drawing
//! is delegated to a [`Renderer`] supplied by the caller.

use std::fmt;
use serde::{Deserialize, Serialize};
use tracing::debug;
use crate::color::{self, RGBColor};
use crate::error::Result;
use crate::feed::{FeatureCollection, Quake};
use crate::legend::{Legend, LegendPosition};
use crate::scale::{ColorScale, GradientSpec};
use crate::DEPTH_THRESHOLDS;

/// How quake circles are drawn.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkerStyle {
    /// CSS color of the circle outline.
    pub stroke: String,
    /// Outline width, in pixels.
    pub weight: f64,
    pub fill_opacity: f64,
    /// Circle radius, in meters, per unit of magnitude.
    pub radius_per_magnitude: f64,
}

impl Default for MarkerStyle {
    fn default() -> Self {
        MarkerStyle { stroke: "black".to_string(), weight: 1.,
                      fill_opacity: 0.8, radius_per_magnitude: 20_000. }
    }
}

/// Settings of a [`QuakeMap`].  Every field has a default, so a
/// configuration file only needs to list what it changes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    /// Initial center, `[latitude, longitude]`.
    pub center: [f64; 2],
    pub zoom: u8,
    pub tile_url: String,
    pub attribution: String,
    pub feed_url: String,
    /// Depths, in km, attached to the two `depth_colors`.
    pub depth_domain: [f64; 2],
    pub depth_colors: [String; 2],
    /// Bring depths outside `depth_domain` back to its bounds.
    pub clamp: bool,
    pub legend_thresholds: Vec<f64>,
    pub legend_title: String,
    pub legend_position: LegendPosition,
    pub marker: MarkerStyle,
}

impl Default for MapConfig {
    fn default() -> Self {
        MapConfig {
            center: [37.09, -95.71],
            zoom: 5,
            tile_url: "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png"
                .to_string(),
            attribution: "&copy; <a href=\"https://www.openstreetmap.org/copyright\">\
                          OpenStreetMap</a> contributors".to_string(),
            feed_url: "https://earthquake.usgs.gov/earthquakes/feed/v1.0/\
                       summary/all_day.geojson".to_string(),
            depth_domain: [0., 100.],
            depth_colors: ["lightgreen".to_string(), "darkred".to_string()],
            clamp: false,
            legend_thresholds: DEPTH_THRESHOLDS.to_vec(),
            legend_title: "Earthquake Depth".to_string(),
            legend_position: LegendPosition::BottomRight,
            marker: MarkerStyle::default(),
        }
    }
}

impl MapConfig {
    pub fn from_json(s: &str) -> Result<Self> {
        Ok(serde_json::from_str(s)?)
    }
}

/// Information shown when a marker is clicked.  Fields are plain
/// text: renderers producing markup must escape them.
#[derive(Clone, Debug, PartialEq)]
pub struct Popup {
    pub place: String,
    pub magnitude: f64,
    /// Depth in kilometers.
    pub depth: f64,
}

impl fmt::Display for Popup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\nMagnitude: {}\nDepth: {} km",
               self.place, self.magnitude, self.depth)
    }
}

/// A circle to be drawn for one quake.
#[derive(Clone, Debug, PartialEq)]
pub struct Marker<Color> {
    pub latitude: f64,
    pub longitude: f64,
    /// Radius in meters.
    pub radius: f64,
    pub fill: Color,
    pub fill_opacity: f64,
    pub stroke: Color,
    pub weight: f64,
    pub popup: Popup,
}

/// The drawing side of a map.
pub trait Renderer<Color> {
    type Error;

    /// Draw one quake circle and bind its popup.
    fn circle(&mut self, marker: &Marker<Color>) -> Result<(), Self::Error>;

    /// Draw the legend.
    fn legend(&mut self, legend: &Legend<Color>) -> Result<(), Self::Error>;
}

/// An earthquake map: depth color scale, marker style and legend.
pub struct QuakeMap<Color> {
    config: MapConfig,
    scale: ColorScale<Color>,
    stroke: Color,
}

impl<Color> QuakeMap<Color>
where Color: RGBColor + Clone {
    /// Check `config` (colors and depth domain) and build the map.
    pub fn new(config: &MapConfig) -> Result<Self> {
        let [min, max] = config.depth_domain;
        let c0 = color::parse(&config.depth_colors[0])?;
        let c1 = color::parse(&config.depth_colors[1])?;
        let scale = ColorScale::new(GradientSpec::new(min, max, c0, c1)?)
            .clamp(config.clamp);
        let stroke = color::parse(&config.marker.stroke)?;
        debug!(min, max, clamp = config.clamp, "quake map configured");
        Ok(QuakeMap { config: config.clone(), scale, stroke })
    }

    pub fn config(&self) -> &MapConfig { &self.config }

    pub fn scale(&self) -> &ColorScale<Color> { &self.scale }

    pub fn marker(&self, q: &Quake) -> Marker<Color> {
        let style = &self.config.marker;
        Marker {
            latitude: q.latitude,
            longitude: q.longitude,
            radius: q.magnitude * style.radius_per_magnitude,
            fill: self.scale.color_for(q.depth),
            fill_opacity: style.fill_opacity,
            stroke: self.stroke.clone(),
            weight: style.weight,
            popup: Popup { place: q.place.clone(), magnitude: q.magnitude,
                           depth: q.depth },
        }
    }

    /// Markers of all usable quakes of `feed`, in feed order.
    pub fn markers<'a>(&'a self, feed: &'a FeatureCollection)
                       -> impl Iterator<Item = Marker<Color>> + 'a {
        feed.quakes().map(move |q| self.marker(&q))
    }

    pub fn legend(&self) -> Legend<Color> {
        Legend {
            title: self.config.legend_title.clone(),
            position: self.config.legend_position,
            buckets: self.scale.legend_buckets(&self.config.legend_thresholds),
        }
    }

    /// Draw every marker of `feed`, then the legend.  Returns the
    /// number of markers drawn.
    pub fn render<R>(&self, feed: &FeatureCollection, renderer: &mut R)
                     -> Result<usize, R::Error>
    where R: Renderer<Color> {
        let mut n = 0;
        for m in self.markers(feed) {
            renderer.circle(&m)?;
            n += 1;
        }
        renderer.legend(&self.legend())?;
        debug!(markers = n, "map rendered");
        Ok(n)
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use rgb::{RGB, RGB8};
    use crate::Error;

    #[derive(Default)]
    struct Recorder {
        circles: Vec<Marker<RGB8>>,
        legends: Vec<Legend<RGB8>>,
    }

    impl Renderer<RGB8> for Recorder {
        type Error = std::convert::Infallible;

        fn circle(&mut self, marker: &Marker<RGB8>) -> Result<(), Self::Error> {
            self.circles.push(marker.clone());
            Ok(())
        }

        fn legend(&mut self, legend: &Legend<RGB8>) -> Result<(), Self::Error> {
            self.legends.push(legend.clone());
            Ok(())
        }
    }

    struct Failing;

    impl Renderer<RGB8> for Failing {
        type Error = String;

        fn circle(&mut self, _: &Marker<RGB8>) -> Result<(), String> {
            Err("disk full".to_string())
        }

        fn legend(&mut self, _: &Legend<RGB8>) -> Result<(), String> { Ok(()) }
    }

    fn feed() -> FeatureCollection {
        FeatureCollection::from_json(r#"{"features": [
          {"properties": {"mag": 2.5, "place": "<b>Somewhere</b>"},
           "geometry": {"coordinates": [-118.5, 34.1, 50]}},
          {"properties": {"mag": 3},
           "geometry": {"coordinates": [-118.5, 34.1]}},
          {"properties": {"mag": 1, "place": "Deep"},
           "geometry": {"coordinates": [10, 20, 100]}}
        ]}"#).unwrap()
    }

    #[test]
    fn render_markers_then_legend() {
        let map = QuakeMap::<RGB8>::new(&MapConfig::default()).unwrap();
        let mut r = Recorder::default();
        assert_eq!(map.render(&feed(), &mut r), Ok(2));
        assert_eq!(r.circles.len(), 2);
        let m = &r.circles[0];
        assert_eq!(m.radius, 50_000.);
        assert_eq!((m.latitude, m.longitude), (34.1, -118.5));
        assert_eq!(m.fill, RGB8::new(142, 119, 72));
        assert_eq!(m.stroke, RGB8::new(0, 0, 0));
        assert_eq!((m.weight, m.fill_opacity), (1., 0.8));
        assert_eq!(m.popup, Popup { place: "<b>Somewhere</b>".to_string(),
                                    magnitude: 2.5, depth: 50. });
        assert_eq!(r.circles[1].fill, RGB8::new(139, 0, 0));
        assert_eq!(r.legends.len(), 1);
        assert_eq!(r.legends[0].to_string(),
                   "Earthquake Depth\n0–9\n10–29\n30–49\n50–69\n70–89\n90+");
    }

    #[test]
    fn renderer_errors_propagate() {
        let map = QuakeMap::<RGB8>::new(&MapConfig::default()).unwrap();
        assert_eq!(map.render(&feed(), &mut Failing),
                   Err("disk full".to_string()));
    }

    #[test]
    fn legend_matches_scale() {
        let map = QuakeMap::<RGB<f64>>::new(&MapConfig::default()).unwrap();
        let legend = map.legend();
        assert_eq!(legend.position, LegendPosition::BottomRight);
        assert_eq!(legend.buckets.len(), 6);
        assert_eq!(legend.buckets[1].color, map.scale().color_for(11.));
    }

    #[test]
    fn config_from_json() {
        let config = MapConfig::from_json(r##"{
          "depth_domain": [0, 300],
          "clamp": true,
          "legend_position": "topleft",
          "marker": {"stroke": "#333"}
        }"##).unwrap();
        assert_eq!(config.depth_domain, [0., 300.]);
        assert_eq!(config.legend_position, LegendPosition::TopLeft);
        assert_eq!(config.marker.stroke, "#333");
        assert_eq!(config.marker.radius_per_magnitude, 20_000.);
        assert_eq!(config.zoom, 5);
        let map = QuakeMap::<RGB8>::new(&config).unwrap();
        assert!(map.scale().is_clamped());
        assert_eq!(map.scale().color_for(500.), RGB8::new(139, 0, 0));
    }

    #[test]
    fn invalid_config() {
        let mut config = MapConfig::default();
        config.depth_colors[1] = "blurple".to_string();
        assert!(matches!(QuakeMap::<RGB8>::new(&config),
                         Err(Error::InvalidColor(_))));
        let mut config = MapConfig::default();
        config.depth_domain = [10., 10.];
        assert!(matches!(QuakeMap::<RGB8>::new(&config),
                         Err(Error::InvalidDomain { .. })));
    }
}
