//! Cinemap — film shooting-location mapper.
//!
//! Parses a semi-structured film-location catalog, resolves free-text place
//! names through a geocoding service, ranks the results by great-circle
//! distance to an observer, and renders the ten nearest onto an interactive
//! map with a population choropleth layer.

pub mod catalog;
pub mod geo;
pub mod geocode;
pub mod map;
pub mod pipeline;
pub mod ranking;
