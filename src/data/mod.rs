//! Static data loading: the claims dataset and the basemap geometry.
//!
//! Both are read once at startup. The dataset is load-bearing: any failure is
//! terminal for the session. The basemap degrades: a missing or partially
//! unreadable file leaves the dashboard functional with built-in continent
//! outlines and no clickable shapes.

use crate::map::renderer::MapRenderer;
use anyhow::Result;
use geojson::{feature::Id, GeoJson, Value};
use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::Path;
use thiserror::Error;
use tracing::{info, warn};

/// Claims of one country for one year. `total` is trusted as delivered by the
/// data pipeline, never recomputed from `apd + napd`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CountryRecord {
    #[serde(rename = "country")]
    pub name: String,
    pub apd: f64,
    pub napd: f64,
    pub total: f64,
}

/// Precomputed aggregate for one year. Not cross-checked against the
/// per-country records.
#[derive(Debug, Clone, Deserialize)]
pub struct YearTotals {
    pub apd: f64,
    pub napd: f64,
    pub total: f64,
    #[serde(rename = "countryCount")]
    pub country_count: u32,
}

/// Complete per-country and aggregate data for one calendar year.
#[derive(Debug, Clone, Deserialize)]
pub struct YearSnapshot {
    pub countries: HashMap<String, CountryRecord>,
    pub totals: YearTotals,
}

/// Year key ("2020"…) → snapshot. Immutable after load.
pub type Dataset = BTreeMap<String, YearSnapshot>;

/// The only explicit error kind in the system; terminal for the session.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The dataset resource could not be read.
    #[error("lecture des données impossible: {0}")]
    Io(#[from] std::io::Error),

    /// The payload is not a well-formed dataset document.
    #[error("données illisibles: {0}")]
    Parse(String),
}

impl From<simd_json::Error> for LoadError {
    fn from(err: simd_json::Error) -> Self {
        LoadError::Parse(err.to_string())
    }
}

/// Parse a dataset document. simd-json mutates the buffer in place.
///
/// No schema validation beyond what serde guarantees: a syntactically valid
/// document missing an expected year key parses fine and surfaces downstream
/// as absence of data.
pub fn parse_dataset(bytes: &mut [u8]) -> Result<Dataset, LoadError> {
    Ok(simd_json::serde::from_slice(bytes)?)
}

/// One-shot dataset load. No retry: the caller renders a terminal error state
/// on failure.
pub fn load_dataset(path: &Path) -> Result<Dataset, LoadError> {
    let mut bytes = fs::read(path)?;
    let dataset = parse_dataset(&mut bytes)?;
    info!(years = dataset.len(), path = %path.display(), "dataset loaded");
    Ok(dataset)
}

/// Load country shapes from a Natural-Earth-style GeoJSON FeatureCollection.
///
/// Each feature contributes its numeric identifier, display name and polygon
/// rings. Features without usable geometry or identifier are skipped with a
/// warning rather than failing the load.
pub fn load_basemap(renderer: &mut MapRenderer, path: &Path) -> Result<()> {
    let content = fs::read_to_string(path)?;
    let geojson: GeoJson = content.parse()?;

    let GeoJson::FeatureCollection(fc) = geojson else {
        anyhow::bail!("expected a FeatureCollection");
    };

    let mut loaded = 0usize;
    for feature in fc.features {
        let code = feature_code(&feature);
        let name = feature
            .properties
            .as_ref()
            .and_then(|p| p.get("name"))
            .and_then(|v| v.as_str())
            .unwrap_or("")
            .to_string();

        let Some(code) = code else {
            warn!(name = %name, "basemap feature without identifier, skipped");
            continue;
        };

        let rings = match feature.geometry {
            Some(geometry) => exterior_rings(&geometry.value),
            None => Vec::new(),
        };
        if rings.is_empty() {
            warn!(code = %code, "basemap feature without polygon geometry, skipped");
            continue;
        }

        renderer.add_country(code, name, rings);
        loaded += 1;
    }

    renderer.build_index();
    info!(countries = loaded, path = %path.display(), "basemap loaded");
    Ok(())
}

/// Numeric identifier of a basemap feature: the feature `id`, with a
/// properties fallback. Numbers are zero-padded to the 3-digit convention.
fn feature_code(feature: &geojson::Feature) -> Option<String> {
    match &feature.id {
        Some(Id::String(s)) => return Some(s.clone()),
        Some(Id::Number(n)) => {
            if let Some(i) = n.as_i64() {
                return Some(format!("{i:03}"));
            }
        }
        None => {}
    }
    feature
        .properties
        .as_ref()
        .and_then(|p| p.get("id").or_else(|| p.get("iso_n3")))
        .and_then(|v| v.as_str())
        .map(str::to_string)
}

/// Exterior rings of a polygonal geometry (holes are ignored at terminal
/// resolution, matching the outline-only treatment of the reference map).
fn exterior_rings(value: &Value) -> Vec<Vec<(f64, f64)>> {
    fn ring_coords(ring: &[Vec<f64>]) -> Vec<(f64, f64)> {
        ring.iter().map(|c| (c[0], c[1])).collect()
    }

    match value {
        Value::Polygon(rings) => rings
            .first()
            .map(|r| vec![ring_coords(r)])
            .unwrap_or_default(),
        Value::MultiPolygon(polygons) => polygons
            .iter()
            .filter_map(|rings| rings.first())
            .map(|r| ring_coords(r))
            .collect(),
        Value::GeometryCollection(geometries) => geometries
            .iter()
            .flat_map(|g| exterior_rings(&g.value))
            .collect(),
        _ => Vec::new(),
    }
}

/// Rough continent outlines drawn when no basemap file is present. They give
/// the dashboard a recognizable backdrop; none of them is clickable.
pub fn fallback_outlines(renderer: &mut MapRenderer) {
    // North America
    renderer.add_outline(vec![
        (-168.0, 65.0), (-166.0, 60.0), (-141.0, 60.0), (-130.0, 55.0),
        (-125.0, 48.0), (-124.0, 40.0), (-117.0, 32.0), (-110.0, 25.0),
        (-97.0, 25.0), (-97.0, 28.0), (-82.0, 24.0), (-80.0, 25.0),
        (-81.0, 31.0), (-75.0, 35.0), (-70.0, 41.0), (-67.0, 45.0),
        (-65.0, 47.0), (-55.0, 47.0), (-52.0, 47.0), (-55.0, 52.0),
        (-58.0, 55.0), (-64.0, 60.0), (-73.0, 62.0), (-80.0, 63.0),
        (-95.0, 62.0), (-110.0, 68.0), (-130.0, 70.0), (-145.0, 70.0),
        (-168.0, 65.0),
    ]);

    // South America
    renderer.add_outline(vec![
        (-80.0, 10.0), (-75.0, 5.0), (-70.0, 5.0), (-60.0, 5.0),
        (-50.0, 0.0), (-35.0, -5.0), (-35.0, -10.0), (-38.0, -15.0),
        (-40.0, -22.0), (-48.0, -25.0), (-55.0, -34.0), (-58.0, -38.0),
        (-65.0, -42.0), (-68.0, -50.0), (-75.0, -52.0), (-75.0, -45.0),
        (-72.0, -40.0), (-72.0, -30.0), (-70.0, -20.0), (-70.0, -15.0),
        (-80.0, -5.0), (-80.0, 0.0), (-80.0, 10.0),
    ]);

    // Europe
    renderer.add_outline(vec![
        (-10.0, 36.0), (-5.0, 36.0), (0.0, 38.0), (5.0, 43.0),
        (10.0, 44.0), (15.0, 45.0), (20.0, 40.0), (25.0, 37.0),
        (30.0, 40.0), (35.0, 42.0), (40.0, 43.0), (40.0, 55.0),
        (30.0, 60.0), (25.0, 65.0), (20.0, 70.0), (10.0, 71.0),
        (5.0, 62.0), (5.0, 58.0), (-5.0, 58.0), (-10.0, 52.0),
        (-5.0, 48.0), (-5.0, 43.0), (-10.0, 36.0),
    ]);

    // Africa, south then north
    renderer.add_outline(vec![
        (-17.0, 15.0), (-15.0, 10.0), (-10.0, 5.0), (0.0, 5.0),
        (10.0, 5.0), (15.0, 0.0), (20.0, -5.0), (25.0, -10.0),
        (35.0, -20.0), (35.0, -25.0), (30.0, -30.0), (20.0, -35.0),
        (18.0, -35.0), (15.0, -30.0), (10.0, -15.0), (10.0, 0.0),
        (5.0, 5.0), (-5.0, 5.0), (-10.0, 10.0), (-17.0, 15.0),
    ]);
    renderer.add_outline(vec![
        (-17.0, 15.0), (-17.0, 20.0), (-15.0, 28.0), (-5.0, 35.0),
        (10.0, 37.0), (20.0, 33.0), (25.0, 32.0), (35.0, 30.0),
        (35.0, 20.0), (42.0, 12.0), (50.0, 12.0), (45.0, 5.0),
        (35.0, -5.0), (35.0, -20.0),
    ]);

    // Asia
    renderer.add_outline(vec![
        (35.0, 42.0), (40.0, 43.0), (50.0, 40.0), (55.0, 37.0),
        (60.0, 25.0), (65.0, 25.0), (70.0, 20.0), (75.0, 15.0),
        (80.0, 8.0), (80.0, 15.0), (88.0, 22.0), (92.0, 22.0),
        (95.0, 16.0), (100.0, 14.0), (105.0, 10.0), (110.0, 20.0),
        (115.0, 22.0), (120.0, 22.0), (122.0, 25.0), (125.0, 30.0),
        (130.0, 35.0), (135.0, 35.0), (140.0, 40.0), (145.0, 45.0),
        (145.0, 50.0), (140.0, 55.0), (135.0, 55.0), (130.0, 52.0),
        (130.0, 43.0), (120.0, 40.0), (110.0, 45.0), (90.0, 50.0),
        (70.0, 55.0), (60.0, 55.0), (50.0, 50.0), (40.0, 43.0),
    ]);

    // Australia
    renderer.add_outline(vec![
        (115.0, -20.0), (120.0, -18.0), (130.0, -12.0), (140.0, -12.0),
        (145.0, -15.0), (150.0, -25.0), (153.0, -30.0), (150.0, -35.0),
        (145.0, -38.0), (140.0, -38.0), (135.0, -35.0), (130.0, -32.0),
        (125.0, -32.0), (115.0, -35.0), (115.0, -25.0), (115.0, -20.0),
    ]);
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "2024": {
            "countries": {
                "TGO": { "country": "Togo", "apd": 2000000.0, "napd": 0.0, "total": 2000000.0 },
                "USA": { "country": "Etats-Unis", "apd": 0.0, "napd": 5000000000.0, "total": 5000000000.0 }
            },
            "totals": { "apd": 2000000.0, "napd": 5000000000.0, "total": 5002000000.0, "countryCount": 2 }
        }
    }"#;

    #[test]
    fn parses_well_formed_dataset() {
        let mut bytes = SAMPLE.as_bytes().to_vec();
        let dataset = parse_dataset(&mut bytes).unwrap();
        let snapshot = &dataset["2024"];
        assert_eq!(snapshot.totals.country_count, 2);
        assert_eq!(snapshot.countries["TGO"].name, "Togo");
        assert_eq!(snapshot.countries["USA"].total, 5e9);
    }

    #[test]
    fn missing_year_key_is_absence_not_error() {
        let mut bytes = SAMPLE.as_bytes().to_vec();
        let dataset = parse_dataset(&mut bytes).unwrap();
        assert!(dataset.get("2021").is_none());
    }

    #[test]
    fn malformed_payload_is_a_parse_error() {
        let mut bytes = b"{\"2024\": [1, 2, 3]}".to_vec();
        assert!(matches!(parse_dataset(&mut bytes), Err(LoadError::Parse(_))));

        let mut bytes = b"not json at all".to_vec();
        assert!(matches!(parse_dataset(&mut bytes), Err(LoadError::Parse(_))));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = load_dataset(Path::new("/nonexistent/creances.json")).unwrap_err();
        assert!(matches!(err, LoadError::Io(_)));
    }

    #[test]
    fn exterior_rings_of_multipolygon() {
        let geom = Value::MultiPolygon(vec![
            vec![vec![
                vec![0.0, 0.0],
                vec![1.0, 0.0],
                vec![1.0, 1.0],
                vec![0.0, 0.0],
            ]],
            vec![vec![
                vec![5.0, 5.0],
                vec![6.0, 5.0],
                vec![6.0, 6.0],
                vec![5.0, 5.0],
            ]],
        ]);
        let rings = exterior_rings(&geom);
        assert_eq!(rings.len(), 2);
        assert_eq!(rings[0][1], (1.0, 0.0));
    }
}
