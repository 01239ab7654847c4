//! Free-text place resolution through an external geocoding lookup.
//!
//! Split per concern: `types` holds the lookup outcome and error taxonomy,
//! `nominatim` is the HTTP provider, `resolver` applies the
//! drop-or-propagate policy and memoizes within a run.

pub mod nominatim;
pub mod resolver;
pub mod types;

pub use nominatim::NominatimGeocoder;
pub use resolver::PlaceResolver;
pub use types::{GeocodeError, Geocoder, Lookup};
