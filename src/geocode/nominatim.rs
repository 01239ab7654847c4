//! Nominatim search provider.

use super::types::{GeocodeError, Geocoder, Lookup};
use crate::geo::GeoPoint;
use serde::Deserialize;

const DEFAULT_BASE_URL: &str = "https://nominatim.openstreetmap.org";
const USER_AGENT: &str = "cinemap/0.3 (film-location-mapper)";

#[derive(Deserialize, Debug)]
struct NominatimResult {
    lat: String,
    lon: String,
}

/// Geocoder backed by the OpenStreetMap Nominatim search API.
pub struct NominatimGeocoder {
    base_url: String,
}

impl NominatimGeocoder {
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Point the client at a different endpoint (for testing).
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }
}

impl Default for NominatimGeocoder {
    fn default() -> Self {
        Self::new()
    }
}

impl Geocoder for NominatimGeocoder {
    fn geocode(&self, query: &str) -> Result<Lookup, GeocodeError> {
        let url = format!(
            "{}/search?q={}&format=json&limit=1",
            self.base_url,
            urlencod(query),
        );

        let response = match ureq::get(&url).set("User-Agent", USER_AGENT).call() {
            Ok(response) => response,
            // Rate limiting and server-side failures are transient; the
            // caller drops the one record and carries on without retrying.
            Err(ureq::Error::Status(code, _)) if code == 429 || code >= 500 => {
                return Ok(Lookup::Unavailable);
            }
            Err(ureq::Error::Status(code, _)) => {
                return Err(GeocodeError::Status(code));
            }
            // Transport-level failures (DNS, refused connection, timeout).
            Err(_) => {
                return Ok(Lookup::Unavailable);
            }
        };

        let results: Vec<NominatimResult> = response
            .into_json()
            .map_err(|e| GeocodeError::InvalidResponse(e.to_string()))?;

        let Some(first) = results.first() else {
            return Ok(Lookup::NotFound);
        };

        let lat = parse_coord(&first.lat, "lat")?;
        let lon = parse_coord(&first.lon, "lon")?;
        Ok(Lookup::Found(GeoPoint { lat, lon }))
    }
}

/// Nominatim serializes coordinates as strings.
fn parse_coord(value: &str, field: &str) -> Result<f64, GeocodeError> {
    value.parse().map_err(|_| {
        GeocodeError::InvalidResponse(format!("{} '{}' is not a number", field, value))
    })
}

/// Minimal percent-encoding for the query parameter, no extra dep.
fn urlencod(s: &str) -> String {
    s.chars()
        .map(|c| match c {
            ' ' => "%20".to_string(),
            '&' => "%26".to_string(),
            '=' => "%3D".to_string(),
            '+' => "%2B".to_string(),
            ',' => "%2C".to_string(),
            _ if c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '.' || c == '~' => {
                c.to_string()
            }
            _ => {
                let mut buf = [0u8; 4];
                c.encode_utf8(&mut buf)
                    .bytes()
                    .map(|b| format!("%{:02X}", b))
                    .collect()
            }
        })
        .collect()
}
