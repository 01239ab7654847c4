//! Map artifact rendering.
//!
//! Emits a self-contained Leaflet document with labeled markers for the
//! ranked films, the population choropleth layer, a layer control, and the
//! observer coordinate as the initial view center.

use crate::geo::GeoPoint;
use crate::ranking::RankedFilm;
use serde_json::{json, Value};
use std::fmt;

/// Population thresholds for the three choropleth tiers.
const POP_TIER_MID: f64 = 10_000_000.0;
const POP_TIER_HIGH: f64 = 20_000_000.0;

/// Overlay documents that cannot be used at all.
#[derive(Debug)]
pub enum OverlayError {
    Parse(String),
    /// The document is not a FeatureCollection with a `features` array.
    Shape,
}

impl fmt::Display for OverlayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse(msg) => write!(f, "Overlay is not valid JSON: {}", msg),
            Self::Shape => write!(f, "Overlay is not a FeatureCollection"),
        }
    }
}

impl std::error::Error for OverlayError {}

/// Fill color for a country, by its 2005 population.
pub fn population_color(population: f64) -> &'static str {
    if population < POP_TIER_MID {
        "green"
    } else if population < POP_TIER_HIGH {
        "orange"
    } else {
        "red"
    }
}

/// Parse the overlay FeatureCollection and stamp each feature's fill color
/// into its properties, keyed off the numeric `POP2005` field.
///
/// The source document is UTF-8 with a signature, so a leading BOM is
/// stripped. Features with a missing or non-numeric population classify
/// into the lowest tier.
pub fn classify_overlay(raw: &str) -> Result<Value, OverlayError> {
    let raw = raw.strip_prefix('\u{feff}').unwrap_or(raw);
    let mut doc: Value =
        serde_json::from_str(raw).map_err(|e| OverlayError::Parse(e.to_string()))?;

    let features = doc
        .get_mut("features")
        .and_then(Value::as_array_mut)
        .ok_or(OverlayError::Shape)?;

    for feature in features {
        let population = feature
            .get("properties")
            .and_then(|p| p.get("POP2005"))
            .and_then(Value::as_f64)
            .unwrap_or(0.0);
        let color = population_color(population);
        if let Some(properties) = feature.get_mut("properties").and_then(Value::as_object_mut) {
            properties.insert("fillColor".to_string(), json!(color));
        }
    }
    Ok(doc)
}

/// Instantiate the Leaflet template with markers, overlay, and view center.
pub fn render(films: &[RankedFilm], center: GeoPoint, overlay: &Value) -> String {
    let markers: Vec<Value> = films
        .iter()
        .map(|film| {
            json!({
                "lat": film.point.lat,
                "lon": film.point.lon,
                "title": film.title,
            })
        })
        .collect();

    MAP_HTML
        .replace("__CENTER__", &embed_json(&json!([center.lat, center.lon])))
        .replace("__MARKERS__", &embed_json(&json!(markers)))
        .replace("__OVERLAY__", &embed_json(overlay))
}

/// Serialize for inlining into a `<script>` block. Escaping the solidus in
/// `</` keeps a literal `</script>` inside the data from closing the block.
fn embed_json(value: &Value) -> String {
    value.to_string().replace("</", "<\\/")
}

const MAP_HTML: &str = r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<title>Nearest film shooting locations</title>
<link rel="stylesheet" href="https://unpkg.com/leaflet@1.9.4/dist/leaflet.css">
<script src="https://unpkg.com/leaflet@1.9.4/dist/leaflet.js"></script>
<style>
  html, body, #map { height: 100%; margin: 0; }
</style>
</head>
<body>
<div id="map"></div>
<script>
var map = L.map('map').setView(__CENTER__, 5);
L.tileLayer('https://tile.openstreetmap.org/{z}/{x}/{y}.png', {
  attribution: '&copy; OpenStreetMap contributors'
}).addTo(map);

var films = L.layerGroup();
__MARKERS__.forEach(function (film) {
  L.marker([film.lat, film.lon]).bindPopup(film.title).addTo(films);
});
films.addTo(map);

var population = L.geoJSON(__OVERLAY__, {
  style: function (feature) {
    return {
      fillColor: feature.properties.fillColor,
      color: 'gray',
      weight: 1,
      fillOpacity: 0.6
    };
  }
});
population.addTo(map);

L.control.layers(null, {
  'Ten nearest films': films,
  'Population': population
}).addTo(map);
</script>
</body>
</html>
"#;
