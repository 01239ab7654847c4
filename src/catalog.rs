//! Catalog file parsing.
//!
//! The catalog is a Latin-1, line-oriented dump: a fixed 14-line header, then
//! one record per line. The first tab-delimited field carries the title and a
//! parenthesized release year, optionally followed by `{...}` episode
//! metadata; the first non-empty field after it is the shooting location.
//! The file is externally sourced, so malformed lines are skipped, not fatal.

use std::fs;
use std::io;
use std::path::Path;

/// Fixed header lines at the top of the catalog.
const HEADER_LINES: usize = 14;

/// Width of the `(YYYY)` suffix at the end of the title field.
const YEAR_SUFFIX_LEN: usize = 6;

/// Stop scanning once this many records match, to bound lookup cost.
pub const MATCH_LIMIT: usize = 150;

/// One candidate record extracted from the catalog.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogRecord {
    pub title: String,
    pub raw_location: String,
    pub year: String,
}

/// Read the catalog file, decoding Latin-1.
///
/// Each Latin-1 byte maps to the Unicode code point of the same value, so the
/// decode is a direct byte-to-char widening.
pub fn read_catalog(path: &Path) -> io::Result<String> {
    let bytes = fs::read(path)?;
    Ok(bytes.iter().map(|&b| b as char).collect())
}

/// Extract the records matching `year`, at most [`MATCH_LIMIT`] of them.
pub fn parse(text: &str, year: &str) -> Vec<CatalogRecord> {
    let mut records = Vec::new();
    for line in text.lines().skip(HEADER_LINES) {
        if records.len() >= MATCH_LIMIT {
            break;
        }
        let Some(record) = parse_line(line.trim()) else {
            continue;
        };
        if record.year == year {
            records.push(record);
        }
    }
    records
}

/// Parse a single record line, or `None` if it is malformed.
fn parse_line(line: &str) -> Option<CatalogRecord> {
    let mut fields = line.split('\t');
    let (title, year) = split_title_year(fields.next()?)?;
    let raw_location = fields.find(|f| !f.is_empty())?.to_string();
    Some(CatalogRecord { title, raw_location, year })
}

/// Split the leading field into title and release year.
///
/// The field ends with a `(YYYY)` suffix: the four year characters sit just
/// before the closing paren. Embedded `{...}` metadata is cut off first,
/// together with the separator character preceding the brace, and trailing
/// whitespace is dropped before the fixed-offset split. Suffixes in other
/// shapes (e.g. `(????)` for unknown years) extract as-is and fall out at
/// the year filter.
fn split_title_year(field: &str) -> Option<(String, String)> {
    let mut chars: Vec<char> = field.chars().collect();

    if let Some(brace) = chars.iter().position(|&c| c == '{') {
        chars.truncate(brace.saturating_sub(1));
    }
    while chars.last().is_some_and(|c| c.is_whitespace()) {
        chars.pop();
    }
    if chars.len() < YEAR_SUFFIX_LEN {
        return None;
    }

    let n = chars.len();
    let year = chars[n - 5..n - 1].iter().collect();
    let title = chars[..n - YEAR_SUFFIX_LEN].iter().collect();
    Some((title, year))
}
