//! Place resolver — applies the drop-or-propagate policy over a geocoder.

use super::nominatim::NominatimGeocoder;
use super::types::{GeocodeError, Geocoder, Lookup};
use crate::geo::GeoPoint;
use std::collections::HashMap;

/// Resolves free-text place strings to coordinates.
///
/// Successful lookups are memoized for the lifetime of the resolver — the
/// catalog repeats location strings heavily and the service is rate-limited.
/// Nothing is persisted across runs.
pub struct PlaceResolver {
    geocoder: Box<dyn Geocoder>,
    memo: HashMap<String, GeoPoint>,
}

impl PlaceResolver {
    pub fn new() -> Self {
        Self::with_geocoder(Box::new(NominatimGeocoder::new()))
    }

    /// Build a resolver over a specific geocoder (for testing, or an
    /// alternate Nominatim endpoint).
    pub fn with_geocoder(geocoder: Box<dyn Geocoder>) -> Self {
        Self {
            geocoder,
            memo: HashMap::new(),
        }
    }

    /// Resolve one place string.
    ///
    /// `None` covers both a no-match answer and transient unavailability:
    /// either way the caller drops the record and continues. Lookups that
    /// fail for any other reason propagate as fatal.
    pub fn resolve(&mut self, raw_location: &str) -> Result<Option<GeoPoint>, GeocodeError> {
        if let Some(&point) = self.memo.get(raw_location) {
            return Ok(Some(point));
        }
        match self.geocoder.geocode(raw_location)? {
            Lookup::Found(point) => {
                self.memo.insert(raw_location.to_string(), point);
                Ok(Some(point))
            }
            // Unavailability is not memoized: a later record naming the
            // same place gets its own single attempt.
            Lookup::NotFound | Lookup::Unavailable => Ok(None),
        }
    }
}

impl Default for PlaceResolver {
    fn default() -> Self {
        Self::new()
    }
}
