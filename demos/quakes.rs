//! Write `quakes.html`: a table of the quakes of a USGS GeoJSON feed
//! (downloaded beforehand, e.g. from the `feed_url` of the default
//! configuration) followed by the depth legend and a color bar.
//!
//!     cargo run --example quakes -- all_day.geojson [config.json]

use std::{env,
          io::{self, BufReader, BufWriter, Write},
          fs::{self, File},
          error::Error};
use rgb::RGB8;
use quake_legend::{color, FeatureCollection, Legend, MapConfig, Marker,
                   QuakeMap, Renderer};

type Err = Box<dyn Error>;

fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

fn swatch(c: &RGB8, width: u32) -> String {
    format!("<i style=\"display: inline-block; width: {width}px; \
             height: 18px; background: {}\"></i>", color::css(c))
}

struct Html<W: Write> {
    fh: W,
}

impl<W: Write> Renderer<RGB8> for Html<W> {
    type Error = io::Error;

    fn circle(&mut self, m: &Marker<RGB8>) -> io::Result<()> {
        writeln!(self.fh, "<tr><td>{}</td><td>{:.3}, {:.3}</td>\
                           <td>{:.0} m</td>\
                           <td><h4>{}</h4><p>Magnitude: {}</p>\
                           <p>Depth: {} km</p></td></tr>",
                 swatch(&m.fill, 18), m.latitude, m.longitude, m.radius, escape(&m.popup.place),
                 m.popup.magnitude, m.popup.depth)
    }

    fn legend(&mut self, legend: &Legend<RGB8>) -> io::Result<()> {
        writeln!(self.fh, "</table>\n<h4>{}</h4>", escape(&legend.title))?;
        let labels: Vec<_> = legend.buckets.iter()
            .map(|b| format!("{} {}", swatch(&b.color, 18), escape(&b.to_string())))
            .collect();
        writeln!(self.fh, "{}", labels.join("<br>\n"))
    }
}

fn main() -> Result<(), Err> {
    tracing_subscriber::fmt::init();
    let mut args = env::args().skip(1);
    let Some(feed) = args.next() else {
        eprintln!("Usage: quakes FEED.geojson [CONFIG.json]");
        return Ok(())
    };
    let config = match args.next() {
        Some(path) => MapConfig::from_json(&fs::read_to_string(path)?)?,
        None => MapConfig::default(),
    };
    let feed = FeatureCollection::from_reader(BufReader::new(File::open(feed)?))?;
    let map = QuakeMap::<RGB8>::new(&config)?;

    let mut html = Html { fh: BufWriter::new(File::create("quakes.html")?) };
    writeln!(html.fh, "<html>\n\
                       <head>\n\
                       <title>Earthquakes</title>\n\
                       </head>\n\
                       <body>\n\
                       <table>\n\
                       <tr><th></th><th>Location</th><th>Radius</th>\
                       <th></th></tr>")?;
    let n = map.render(&feed, &mut html)?;

    writeln!(html.fh, "<h4>Color bar</h4>\n\
                       <table style=\"border: 0px; border-spacing: 0px\"><tr>")?;
    for (_, c) in map.scale().samples(100) {
        writeln!(html.fh, "  <td style=\"width: 3px; height: 20px; \
                           background-color: {}\"></td>", color::hex(&c))?;
    }
    writeln!(html.fh, "</tr></table>\n\
                       </body>\n\
                       </html>")?;
    html.fh.flush()?;
    println!("quakes.html: {n} markers");
    Ok(())
}
