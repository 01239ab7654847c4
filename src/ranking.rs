//! Nearest-film selection.
//!
//! Resolution is effectful (one blocking lookup per record); ranking is a
//! pure sort-and-bound over the resolved set, which keeps the geometric
//! logic testable without network access.

use crate::catalog::CatalogRecord;
use crate::geo::{self, GeoPoint};
use crate::geocode::{GeocodeError, PlaceResolver};
use serde::Serialize;
use std::cmp::Ordering;

/// How many films the ranking keeps.
pub const RESULT_LIMIT: usize = 10;

/// A film whose shooting location resolved to a coordinate.
#[derive(Debug, Clone)]
pub struct ResolvedFilm {
    pub title: String,
    pub point: GeoPoint,
}

/// A resolved film with its distance to the observer.
#[derive(Debug, Clone, Serialize)]
pub struct RankedFilm {
    pub title: String,
    pub point: GeoPoint,
    /// Central angle to the observer, in radians.
    pub distance: f64,
}

/// Resolve each record's location, dropping the ones the service has no
/// answer for. A record that fails to resolve is skipped silently; a
/// contract-level geocoder failure aborts the whole pass.
pub fn resolve_films(
    records: &[CatalogRecord],
    resolver: &mut PlaceResolver,
) -> Result<Vec<ResolvedFilm>, GeocodeError> {
    let mut films = Vec::new();
    for record in records {
        if let Some(point) = resolver.resolve(&record.raw_location)? {
            films.push(ResolvedFilm {
                title: record.title.clone(),
                point,
            });
        }
    }
    Ok(films)
}

/// Rank films by distance to `target` and keep the nearest [`RESULT_LIMIT`].
///
/// The sort is stable: films at equal distance keep their catalog order, so
/// identical runs against identical lookup responses produce identical
/// output.
pub fn nearest(films: Vec<ResolvedFilm>, target: GeoPoint) -> Vec<RankedFilm> {
    let mut ranked: Vec<RankedFilm> = films
        .into_iter()
        .map(|film| RankedFilm {
            distance: geo::central_angle(film.point, target),
            title: film.title,
            point: film.point,
        })
        .collect();
    ranked.sort_by(|a, b| a.distance.partial_cmp(&b.distance).unwrap_or(Ordering::Equal));
    ranked.truncate(RESULT_LIMIT);
    ranked
}

/// Full selection: resolve, then rank against `target`.
pub fn select(
    records: &[CatalogRecord],
    target: GeoPoint,
    resolver: &mut PlaceResolver,
) -> Result<Vec<RankedFilm>, GeocodeError> {
    Ok(nearest(resolve_films(records, resolver)?, target))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geocode::{Geocoder, Lookup};
    use std::collections::HashMap;

    /// Geocoder with a fixed answer table; unknown queries are NotFound.
    struct TableGeocoder {
        table: HashMap<String, GeoPoint>,
    }

    impl TableGeocoder {
        fn new(entries: &[(&str, f64, f64)]) -> Self {
            let table = entries
                .iter()
                .map(|&(place, lat, lon)| (place.to_string(), GeoPoint { lat, lon }))
                .collect();
            Self { table }
        }
    }

    impl Geocoder for TableGeocoder {
        fn geocode(&self, query: &str) -> Result<Lookup, GeocodeError> {
            Ok(match self.table.get(query) {
                Some(&point) => Lookup::Found(point),
                None => Lookup::NotFound,
            })
        }
    }

    fn record(title: &str, location: &str) -> CatalogRecord {
        CatalogRecord {
            title: title.to_string(),
            raw_location: location.to_string(),
            year: "2020".to_string(),
        }
    }

    fn paris_resolver() -> PlaceResolver {
        PlaceResolver::with_geocoder(Box::new(TableGeocoder::new(&[
            ("Paris, France", 48.8566, 2.3522),
            ("Berlin, Germany", 52.52, 13.405),
            ("Sydney, Australia", -33.8688, 151.2093),
            ("London, UK", 51.5074, -0.1278),
        ])))
    }

    #[test]
    fn test_orders_by_distance_from_target() {
        let records = vec![
            record("Far ", "Sydney, Australia"),
            record("Near ", "Paris, France"),
            record("Mid ", "London, UK"),
        ];
        let target = GeoPoint { lat: 48.85, lon: 2.35 };
        let ranked = select(&records, target, &mut paris_resolver()).unwrap();
        let titles: Vec<&str> = ranked.iter().map(|f| f.title.as_str()).collect();
        assert_eq!(titles, ["Near ", "Mid ", "Far "]);
    }

    #[test]
    fn test_distances_non_decreasing() {
        let records = vec![
            record("A", "Sydney, Australia"),
            record("B", "Paris, France"),
            record("C", "Berlin, Germany"),
            record("D", "London, UK"),
        ];
        let target = GeoPoint { lat: 0.0, lon: 0.0 };
        let ranked = select(&records, target, &mut paris_resolver()).unwrap();
        for pair in ranked.windows(2) {
            assert!(pair[0].distance <= pair[1].distance);
        }
    }

    #[test]
    fn test_bounded_to_result_limit() {
        let records: Vec<CatalogRecord> = (0..25)
            .map(|i| record(&format!("Film {}", i), "Paris, France"))
            .collect();
        let target = GeoPoint { lat: 0.0, lon: 0.0 };
        let ranked = select(&records, target, &mut paris_resolver()).unwrap();
        assert_eq!(ranked.len(), RESULT_LIMIT);
    }

    #[test]
    fn test_fewer_than_limit() {
        let records = vec![record("Only ", "Paris, France")];
        let target = GeoPoint { lat: 0.0, lon: 0.0 };
        let ranked = select(&records, target, &mut paris_resolver()).unwrap();
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].title, "Only ");
    }

    #[test]
    fn test_equal_distance_keeps_catalog_order() {
        // Same place string resolves to the same point, so all distances tie.
        let records: Vec<CatalogRecord> = (0..12)
            .map(|i| record(&format!("Film {:02}", i), "Paris, France"))
            .collect();
        let target = GeoPoint { lat: 10.0, lon: 10.0 };
        let ranked = select(&records, target, &mut paris_resolver()).unwrap();
        let titles: Vec<&str> = ranked.iter().map(|f| f.title.as_str()).collect();
        let expected: Vec<String> = (0..10).map(|i| format!("Film {:02}", i)).collect();
        assert_eq!(titles, expected);
    }

    #[test]
    fn test_unresolved_records_dropped() {
        let records = vec![
            record("Known ", "Paris, France"),
            record("Unknown ", "Middle of Nowhere"),
        ];
        let target = GeoPoint { lat: 0.0, lon: 0.0 };
        let ranked = select(&records, target, &mut paris_resolver()).unwrap();
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].title, "Known ");
    }

    #[test]
    fn test_all_absent_yields_empty() {
        let records = vec![
            record("A", "Middle of Nowhere"),
            record("B", "Somewhere Else"),
        ];
        let target = GeoPoint { lat: 0.0, lon: 0.0 };
        let ranked = select(&records, target, &mut paris_resolver()).unwrap();
        assert!(ranked.is_empty());
    }

    #[test]
    fn test_zero_distance_for_colocated_target() {
        let records = vec![record("Here ", "Paris, France")];
        let target = GeoPoint { lat: 48.8566, lon: 2.3522 };
        let ranked = select(&records, target, &mut paris_resolver()).unwrap();
        assert_eq!(ranked[0].distance, 0.0);
    }
}
