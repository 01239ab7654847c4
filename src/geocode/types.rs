//! Core types for the geocoding subsystem.

use crate::geo::GeoPoint;
use std::fmt;

/// Outcome of one lookup against the geocoding service.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Lookup {
    /// The service matched the query to a coordinate.
    Found(GeoPoint),
    /// The service answered, but had no match for the query.
    NotFound,
    /// The service was unreachable, rate-limited, or failing — a transient
    /// condition worth skipping a single record over.
    Unavailable,
}

/// A geocoding capability. The production implementation talks to
/// Nominatim; tests substitute a canned one.
pub trait Geocoder {
    fn geocode(&self, query: &str) -> Result<Lookup, GeocodeError>;
}

/// Fatal geocoding failures. Transient unavailability is not an error —
/// that is the [`Lookup::Unavailable`] outcome.
#[derive(Debug)]
pub enum GeocodeError {
    /// The service answered with a status outside the transient classes,
    /// which points at a configuration or contract problem.
    Status(u16),
    /// The response body could not be decoded, or violates the contract.
    InvalidResponse(String),
}

impl fmt::Display for GeocodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Status(code) => write!(f, "Geocoding service returned HTTP {}", code),
            Self::InvalidResponse(msg) => write!(f, "Invalid geocoder response: {}", msg),
        }
    }
}

impl std::error::Error for GeocodeError {}
