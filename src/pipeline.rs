//! The pipeline — primary public API.
//!
//! Ties the stages together: catalog scan, place resolution, ranking,
//! overlay classification, and artifact rendering. A run either completes
//! and writes the map document in one shot, or fails fatally with nothing
//! written.

use crate::catalog;
use crate::geo::GeoPoint;
use crate::geocode::{GeocodeError, PlaceResolver};
use crate::map::{self, OverlayError};
use crate::ranking::{self, RankedFilm};
use serde::Serialize;
use std::fmt;
use std::fs;
use std::io;
use std::path::PathBuf;

/// File locations for one run.
pub struct Pipeline {
    pub catalog_path: PathBuf,
    pub overlay_path: PathBuf,
    pub output_path: PathBuf,
}

/// Machine-readable description of a completed run.
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub year: String,
    pub observer: GeoPoint,
    pub films: Vec<RankedFilm>,
    pub map_path: String,
}

#[derive(Debug)]
pub enum PipelineError {
    Io(io::Error),
    Overlay(OverlayError),
    Geocode(GeocodeError),
}

impl fmt::Display for PipelineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {}", e),
            Self::Overlay(e) => write!(f, "{}", e),
            Self::Geocode(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for PipelineError {}

impl From<io::Error> for PipelineError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<OverlayError> for PipelineError {
    fn from(e: OverlayError) -> Self {
        Self::Overlay(e)
    }
}

impl From<GeocodeError> for PipelineError {
    fn from(e: GeocodeError) -> Self {
        Self::Geocode(e)
    }
}

impl Pipeline {
    pub fn new(catalog_path: PathBuf, overlay_path: PathBuf, output_path: PathBuf) -> Self {
        Self {
            catalog_path,
            overlay_path,
            output_path,
        }
    }

    /// Run the full pipeline for one year and observer.
    ///
    /// Inputs are read and validated before the first geocoding call, so a
    /// bad overlay fails fast instead of after 150 lookups.
    pub fn run(
        &self,
        year: &str,
        observer: GeoPoint,
        resolver: &mut PlaceResolver,
    ) -> Result<RunSummary, PipelineError> {
        let text = catalog::read_catalog(&self.catalog_path)?;
        let records = catalog::parse(&text, year);

        let overlay_raw = fs::read_to_string(&self.overlay_path)?;
        let overlay = map::classify_overlay(&overlay_raw)?;

        let films = ranking::select(&records, observer, resolver)?;

        let html = map::render(&films, observer, &overlay);
        fs::write(&self.output_path, html)?;

        Ok(RunSummary {
            year: year.to_string(),
            observer,
            films,
            map_path: self.output_path.display().to_string(),
        })
    }
}
