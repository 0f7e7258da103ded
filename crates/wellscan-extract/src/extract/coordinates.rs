//! Surface-hole coordinates.
//!
//! A scanned file can carry several latitude/longitude pairs: the surface
//! hole, directional survey calibration references and magnetic reference
//! points. Candidates are collected in document order, then:
//!
//! 1. a latitude whose preceding window holds a calibration token is dropped;
//! 2. each surviving latitude pairs with the first longitude after it, before
//!    the next latitude and within the pair window;
//! 3. a pair outside the county box (or the region box) is dropped.
//!
//! The first surviving pair wins unless Site Position coordinates are
//! preferred by configuration.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use serde::Serialize;
use tracing::debug;
use wellscan_core::{ExtractionConfig, Field, GeoBounds, GeoPoint};

use super::identifiers::floor_boundary;
use super::{ExtractionContext, FieldExtractor, FieldOutcome, FieldValue};
use crate::normalize::NormalizedText;

static DMS_LATITUDE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"(?i)Latitude\s*[:.]?\s*(\d{1,2})[^0-9.\n]{1,6}(\d{1,2})(?:\s*['`]\s*|\s+)(\d{1,2}(?:\.\d+)?) *(?:"|'')? *([NS])\b"#,
    )
    .unwrap()
});

static DMS_LONGITUDE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"(?i)Longitude\s*[:.]?\s*(\d{1,3})[^0-9.\n]{1,6}(\d{1,2})(?:\s*['`]\s*|\s+)(\d{1,2}(?:\.\d+)?) *(?:"|'')? *([EW])\b"#,
    )
    .unwrap()
});

static DECIMAL_LATITUDE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)Latitude\s*[:.]?\s*(-?\d{1,2}\.\d+) *([NS])?\b").unwrap()
});

static DECIMAL_LONGITUDE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)Longitude\s*[:.]?\s*(-?\d{1,3}\.\d+) *([EW])?\b").unwrap()
});

static SITE_POSITION: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)Site\s*Position").unwrap());

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AngleFormat {
    Dms,
    Decimal,
}

/// One latitude or longitude occurrence.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Angle {
    start: usize,
    end: usize,
    /// Unsigned magnitude unless the text carried a minus sign.
    value: f64,
    hemisphere: Option<char>,
    format: AngleFormat,
}

/// A paired, signed, bounded coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CoordinateCandidate {
    pub point: GeoPoint,
    pub offset: usize,
    pub format: AngleFormat,
    pub site_position: bool,
}

/// Every candidate considered for one document.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CoordinateScan {
    pub accepted: Vec<CoordinateCandidate>,
    pub rejected: Vec<String>,
}

impl CoordinateScan {
    /// The winning candidate under `prefer_site_position`.
    pub fn select(&self, prefer_site_position: bool) -> Option<&CoordinateCandidate> {
        if prefer_site_position {
            if let Some(site) = self.accepted.iter().find(|c| c.site_position) {
                return Some(site);
            }
        }
        self.accepted.first()
    }
}

/// Registered unit for [`Field::Coordinates`]; reads the county from the
/// location outcome.
pub struct CoordinateExtractor;

impl FieldExtractor for CoordinateExtractor {
    fn field(&self) -> Field {
        Field::Coordinates
    }

    fn extract(&self, text: &NormalizedText, ctx: &ExtractionContext<'_>) -> FieldOutcome {
        let scan = scan_coordinates(text.as_str(), ctx.config, ctx.county());
        match scan.select(ctx.config.prefer_site_position) {
            Some(candidate) => FieldOutcome::Found(FieldValue::Coordinates(candidate.point)),
            None => match scan.rejected.first() {
                Some(reason) if scan.rejected.len() > 1 => FieldOutcome::Rejected(format!(
                    "{} (and {} more)",
                    reason,
                    scan.rejected.len() - 1
                )),
                Some(reason) => FieldOutcome::Rejected(reason.clone()),
                None => FieldOutcome::Absent,
            },
        }
    }
}

/// Collect, filter and pair every coordinate candidate in `text`.
pub fn scan_coordinates(
    text: &str,
    config: &ExtractionConfig,
    county: Option<&str>,
) -> CoordinateScan {
    let latitudes = angles(text, &DMS_LATITUDE, &DECIMAL_LATITUDE);
    let longitudes = angles(text, &DMS_LONGITUDE, &DECIMAL_LONGITUDE);
    let site_labels: Vec<usize> = SITE_POSITION.find_iter(text).map(|m| m.end()).collect();
    let bounds = config.bounds_for(county);

    let mut scan = CoordinateScan::default();

    for (i, lat) in latitudes.iter().enumerate() {
        let window_start =
            floor_boundary(text, lat.start.saturating_sub(config.calibration_window));
        let context = text[window_start..lat.start].to_uppercase();
        if let Some(token) = config
            .calibration_tokens
            .iter()
            .find(|t| context.contains(t.as_str()))
        {
            scan.rejected
                .push(format!("latitude at {} follows calibration token {}", lat.start, token));
            continue;
        }

        let next_latitude = latitudes.get(i + 1).map_or(text.len(), |l| l.start);
        let Some(lon) = longitudes.iter().find(|lon| {
            lon.start >= lat.end
                && lon.start < next_latitude
                && lon.start - lat.end <= config.pair_window
        }) else {
            scan.rejected
                .push(format!("latitude at {} has no paired longitude", lat.start));
            continue;
        };

        let point = GeoPoint {
            latitude: round6(sign_latitude(lat)),
            longitude: round6(sign_longitude(lon, config.implicit_west_longitude)),
        };
        if !bounds.contains(point.latitude, point.longitude) {
            scan.rejected.push(out_of_bounds(&point, &bounds));
            continue;
        }

        let site_position = site_labels
            .iter()
            .any(|&label| label <= lat.start && lat.start - label <= config.site_position_window);

        scan.accepted.push(CoordinateCandidate {
            point,
            offset: lat.start,
            format: lat.format,
            site_position,
        });
    }

    debug!(
        "coordinate scan: {} accepted, {} rejected",
        scan.accepted.len(),
        scan.rejected.len()
    );
    scan
}

fn out_of_bounds(point: &GeoPoint, bounds: &GeoBounds) -> String {
    format!(
        "({}, {}) outside box lat {}..{} lon {}..{}",
        point.latitude,
        point.longitude,
        bounds.min_lat,
        bounds.max_lat,
        bounds.min_lon,
        bounds.max_lon
    )
}

/// DMS and decimal occurrences for one axis, in document order.
fn angles(text: &str, dms: &Regex, decimal: &Regex) -> Vec<Angle> {
    let mut found: Vec<Angle> = dms
        .captures_iter(text)
        .filter_map(|caps| dms_angle(&caps))
        .chain(decimal.captures_iter(text).filter_map(|caps| decimal_angle(&caps)))
        .collect();
    found.sort_by_key(|a| a.start);
    found.dedup_by_key(|a| a.start);
    found
}

fn hemisphere(caps: &Captures<'_>, group: usize) -> Option<char> {
    caps.get(group)
        .and_then(|m| m.as_str().chars().next())
        .map(|c| c.to_ascii_uppercase())
}

fn dms_angle(caps: &Captures<'_>) -> Option<Angle> {
    let whole = caps.get(0)?;
    let degrees: f64 = caps[1].parse().ok()?;
    let minutes: f64 = caps[2].parse().ok()?;
    let seconds: f64 = caps[3].parse().ok()?;
    if minutes >= 60.0 || seconds >= 60.0 {
        debug!("discarding malformed DMS angle {:?}", whole.as_str());
        return None;
    }
    Some(Angle {
        start: whole.start(),
        end: whole.end(),
        value: degrees + minutes / 60.0 + seconds / 3600.0,
        hemisphere: hemisphere(caps, 4),
        format: AngleFormat::Dms,
    })
}

fn decimal_angle(caps: &Captures<'_>) -> Option<Angle> {
    let whole = caps.get(0)?;
    Some(Angle {
        start: whole.start(),
        end: whole.end(),
        value: caps[1].parse().ok()?,
        hemisphere: hemisphere(caps, 2),
        format: AngleFormat::Decimal,
    })
}

fn sign_latitude(angle: &Angle) -> f64 {
    match angle.hemisphere {
        Some('S') => -angle.value.abs(),
        Some(_) => angle.value.abs(),
        None => angle.value,
    }
}

fn sign_longitude(angle: &Angle, implicit_west: bool) -> f64 {
    match angle.hemisphere {
        Some('W') => -angle.value.abs(),
        Some(_) => angle.value.abs(),
        None if implicit_west && angle.value > 0.0 => -angle.value,
        None => angle.value,
    }
}

fn round6(value: f64) -> f64 {
    (value * 1_000_000.0).round() / 1_000_000.0
}
