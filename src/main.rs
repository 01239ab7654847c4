use cinemap::geo::GeoPoint;
use cinemap::geocode::PlaceResolver;
use cinemap::pipeline::Pipeline;
use clap::Parser;
use std::path::PathBuf;

/// Cinemap — ten nearest film shooting locations, on a map.
///
/// Scans a film-location catalog for a release year, geocodes each
/// candidate's shooting location, and writes an interactive map of the ten
/// nearest to the observer, with a population choropleth layer.
///
/// Examples:
///   cinemap 2020 "48.85, 2.35"
///   cinemap 2015 --lat 50.45 --lon 30.52
///   cinemap 2010 "40.71, -74.00" --catalog imdb/locations.list -o nyc.html
#[derive(Parser)]
#[command(name = "cinemap", version, about, long_about = None)]
struct Cli {
    /// Release year to map, e.g. 2020.
    year: String,

    /// Observer coordinate as "lat, long", e.g. "48.85, 2.35".
    #[arg(allow_hyphen_values = true)]
    location: Option<String>,

    /// Observer latitude (-90 to 90), as an alternative to the pair.
    #[arg(long, allow_hyphen_values = true)]
    lat: Option<f64>,

    /// Observer longitude (-180 to 180).
    #[arg(long, allow_hyphen_values = true)]
    lon: Option<f64>,

    /// Catalog file (Latin-1 film locations list).
    #[arg(long, default_value = "locations.list")]
    catalog: PathBuf,

    /// Population overlay (GeoJSON FeatureCollection with POP2005).
    #[arg(long, default_value = "world.json")]
    overlay: PathBuf,

    /// Where to write the map document.
    #[arg(long, short = 'o', default_value = "film_map.html")]
    output: PathBuf,
}

fn main() {
    let cli = Cli::parse();

    let observer = resolve_observer(&cli);
    eprintln!(
        "  Mapping films from {} around {:.4}, {:.4}",
        cli.year, observer.lat, observer.lon
    );

    let pipeline = Pipeline::new(cli.catalog, cli.overlay, cli.output);
    let mut resolver = PlaceResolver::new();
    let summary = pipeline
        .run(&cli.year, observer, &mut resolver)
        .unwrap_or_else(|e| {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        });

    eprintln!("  Finished. Have a look at {}", summary.map_path);

    // JSON to stdout
    println!("{}", serde_json::to_string_pretty(&summary).unwrap());
}

fn resolve_observer(cli: &Cli) -> GeoPoint {
    // Positional "lat, long" pair takes priority over --lat/--lon.
    let (lat, lon) = if let Some(ref location) = cli.location {
        parse_location_pair(location).unwrap_or_else(|| {
            eprintln!(
                "Error: Invalid location '{}'. Expected \"lat, long\", e.g. \"48.85, 2.35\".",
                location
            );
            std::process::exit(1);
        })
    } else if let (Some(lat), Some(lon)) = (cli.lat, cli.lon) {
        (lat, lon)
    } else {
        eprintln!("Error: No observer location specified.");
        eprintln!();
        eprintln!("Usage:");
        eprintln!("  cinemap 2020 \"48.85, 2.35\"");
        eprintln!("  cinemap 2020 --lat 48.85 --lon 2.35");
        std::process::exit(1);
    };

    if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lon) {
        eprintln!("Error: Invalid coordinates. Lat: -90..90, Lon: -180..180");
        std::process::exit(1);
    }
    GeoPoint::new(lat, lon)
}

/// Parse an observer string like "48.85, 2.35" into (lat, lon).
fn parse_location_pair(s: &str) -> Option<(f64, f64)> {
    let mut parts = s.split(',');
    let lat = parts.next()?.trim().parse().ok()?;
    let lon = parts.next()?.trim().parse().ok()?;
    if parts.next().is_some() {
        return None;
    }
    Some((lat, lon))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_location_pair() {
        assert_eq!(parse_location_pair("48.85, 2.35"), Some((48.85, 2.35)));
        assert_eq!(parse_location_pair("-33.87,151.21"), Some((-33.87, 151.21)));
    }

    #[test]
    fn test_parse_location_pair_rejects_garbage() {
        assert_eq!(parse_location_pair("48.85"), None);
        assert_eq!(parse_location_pair("a, b"), None);
        assert_eq!(parse_location_pair("1, 2, 3"), None);
    }
}
