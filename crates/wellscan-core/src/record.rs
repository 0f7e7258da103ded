//! Well and stimulation records produced by one extraction pass.

use serde::{Deserialize, Serialize};

use crate::config::GeoBounds;
use crate::error::{Error, Result};

/// Sentinel written by the cleaner into empty text fields.
pub const NOT_AVAILABLE: &str = "N/A";

/// True when a stored or fresh text value carries information.
pub fn is_present(value: &str) -> bool {
    let v = value.trim();
    !v.is_empty() && v != NOT_AVAILABLE
}

/// Well-record fields produced by the extractor registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    FileNo,
    ApiNumber,
    WellName,
    Operator,
    FieldName,
    Location,
    Coordinates,
    ElevationGl,
    ElevationKb,
    SpudDate,
    CompletionDate,
    WellStatus,
    WellType,
    TotalDepth,
    ProducingMethod,
    SurfaceCasing,
    ProductionCasing,
}

impl Field {
    pub const ALL: &'static [Field] = &[
        Field::FileNo,
        Field::ApiNumber,
        Field::WellName,
        Field::Operator,
        Field::FieldName,
        Field::Location,
        Field::Coordinates,
        Field::ElevationGl,
        Field::ElevationKb,
        Field::SpudDate,
        Field::CompletionDate,
        Field::WellStatus,
        Field::WellType,
        Field::TotalDepth,
        Field::ProducingMethod,
        Field::SurfaceCasing,
        Field::ProductionCasing,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Field::FileNo => "file_no",
            Field::ApiNumber => "api_number",
            Field::WellName => "well_name",
            Field::Operator => "operator",
            Field::FieldName => "field_name",
            Field::Location => "location",
            Field::Coordinates => "coordinates",
            Field::ElevationGl => "elevation_gl",
            Field::ElevationKb => "elevation_kb",
            Field::SpudDate => "spud_date",
            Field::CompletionDate => "completion_date",
            Field::WellStatus => "well_status",
            Field::WellType => "well_type",
            Field::TotalDepth => "total_depth",
            Field::ProducingMethod => "producing_method",
            Field::SurfaceCasing => "surface_casing",
            Field::ProductionCasing => "production_casing",
        }
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A WGS84 point in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

/// One well, one per source document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WellRecord {
    pub well_file_no: String,
    pub api_number: Option<String>,
    pub well_name: Option<String>,
    pub operator: Option<String>,
    pub field_name: Option<String>,
    pub location_desc: Option<String>,
    pub section: Option<String>,
    pub township: Option<String>,
    pub range_dir: Option<String>,
    pub county: Option<String>,
    pub state: String,
    latitude: Option<f64>,
    longitude: Option<f64>,
    pub elevation_gl: Option<String>,
    pub elevation_kb: Option<String>,
    pub spud_date: Option<String>,
    pub completion_date: Option<String>,
    pub well_status: Option<String>,
    pub well_type: Option<String>,
    pub total_depth: Option<String>,
    pub producing_method: Option<String>,
    pub surface_casing: Option<String>,
    pub production_casing: Option<String>,
    pub source_file: Option<String>,
}

impl WellRecord {
    /// A record with only the identifier and state set.
    pub fn new(well_file_no: impl Into<String>, state: impl Into<String>) -> Self {
        Self {
            well_file_no: well_file_no.into(),
            api_number: None,
            well_name: None,
            operator: None,
            field_name: None,
            location_desc: None,
            section: None,
            township: None,
            range_dir: None,
            county: None,
            state: state.into(),
            latitude: None,
            longitude: None,
            elevation_gl: None,
            elevation_kb: None,
            spud_date: None,
            completion_date: None,
            well_status: None,
            well_type: None,
            total_depth: None,
            producing_method: None,
            surface_casing: None,
            production_casing: None,
            source_file: None,
        }
    }

    pub fn latitude(&self) -> Option<f64> {
        self.latitude
    }

    pub fn longitude(&self) -> Option<f64> {
        self.longitude
    }

    pub fn coordinates(&self) -> Option<GeoPoint> {
        match (self.latitude, self.longitude) {
            (Some(latitude), Some(longitude)) => Some(GeoPoint { latitude, longitude }),
            _ => None,
        }
    }

    /// Latitude and longitude are only ever set together.
    pub fn set_coordinates(&mut self, point: Option<GeoPoint>) {
        self.latitude = point.map(|p| p.latitude);
        self.longitude = point.map(|p| p.longitude);
    }

    /// Mutable access to every free-text field except the identifier.
    pub fn text_fields_mut(&mut self) -> [(&'static str, &mut Option<String>); 20] {
        [
            ("api_number", &mut self.api_number),
            ("well_name", &mut self.well_name),
            ("operator", &mut self.operator),
            ("field_name", &mut self.field_name),
            ("location_desc", &mut self.location_desc),
            ("section", &mut self.section),
            ("township", &mut self.township),
            ("range_dir", &mut self.range_dir),
            ("county", &mut self.county),
            ("elevation_gl", &mut self.elevation_gl),
            ("elevation_kb", &mut self.elevation_kb),
            ("spud_date", &mut self.spud_date),
            ("completion_date", &mut self.completion_date),
            ("well_status", &mut self.well_status),
            ("well_type", &mut self.well_type),
            ("total_depth", &mut self.total_depth),
            ("producing_method", &mut self.producing_method),
            ("surface_casing", &mut self.surface_casing),
            ("production_casing", &mut self.production_casing),
            ("source_file", &mut self.source_file),
        ]
    }

    /// Merge a freshly extracted record into this stored one.
    ///
    /// Present fresh values overwrite; absent ones (None, empty, or the
    /// `N/A` sentinel) never clobber stored data. The identifier is fixed.
    pub fn merge_fresh(&mut self, fresh: WellRecord) {
        fn keep(stored: &mut Option<String>, fresh: Option<String>) {
            if let Some(value) = fresh.filter(|v| is_present(v)) {
                *stored = Some(value);
            }
        }

        let point = fresh.coordinates();
        keep(&mut self.api_number, fresh.api_number);
        keep(&mut self.well_name, fresh.well_name);
        keep(&mut self.operator, fresh.operator);
        keep(&mut self.field_name, fresh.field_name);
        keep(&mut self.location_desc, fresh.location_desc);
        keep(&mut self.section, fresh.section);
        keep(&mut self.township, fresh.township);
        keep(&mut self.range_dir, fresh.range_dir);
        keep(&mut self.county, fresh.county);
        keep(&mut self.elevation_gl, fresh.elevation_gl);
        keep(&mut self.elevation_kb, fresh.elevation_kb);
        keep(&mut self.spud_date, fresh.spud_date);
        keep(&mut self.completion_date, fresh.completion_date);
        keep(&mut self.well_status, fresh.well_status);
        keep(&mut self.well_type, fresh.well_type);
        keep(&mut self.total_depth, fresh.total_depth);
        keep(&mut self.producing_method, fresh.producing_method);
        keep(&mut self.surface_casing, fresh.surface_casing);
        keep(&mut self.production_casing, fresh.production_casing);
        keep(&mut self.source_file, fresh.source_file);

        if is_present(&fresh.state) {
            self.state = fresh.state;
        }
        if point.is_some() {
            self.set_coordinates(point);
        }
    }

    /// Check the record-level invariants.
    pub fn validate(&self, bounds: &GeoBounds) -> Result<()> {
        if self.well_file_no.trim().is_empty() {
            return Err(Error::InvalidRecord(
                "<unknown>".to_string(),
                "well_file_no is empty".to_string(),
            ));
        }
        match (self.latitude, self.longitude) {
            (None, None) => Ok(()),
            (Some(lat), Some(lon)) if bounds.contains(lat, lon) => Ok(()),
            (Some(lat), Some(lon)) => Err(Error::InvalidRecord(
                self.well_file_no.clone(),
                format!("coordinates ({}, {}) outside bounding box", lat, lon),
            )),
            _ => Err(Error::InvalidRecord(
                self.well_file_no.clone(),
                "only one of latitude/longitude is set".to_string(),
            )),
        }
    }
}

/// One stimulation treatment row.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StimulationRecord {
    pub date_stimulated: Option<String>,
    pub stimulated_formation: Option<String>,
    pub top_ft: Option<String>,
    pub bottom_ft: Option<String>,
    pub stimulation_stages: Option<String>,
    pub volume: Option<String>,
    pub volume_units: Option<String>,
    pub treatment_type: Option<String>,
    pub acid_pct: Option<String>,
    pub lbs_proppant: Option<String>,
    pub max_treatment_pressure_psi: Option<String>,
    pub max_treatment_rate_bbls_min: Option<String>,
    pub details: Option<String>,
}

impl StimulationRecord {
    pub fn text_fields_mut(&mut self) -> [(&'static str, &mut Option<String>); 13] {
        [
            ("date_stimulated", &mut self.date_stimulated),
            ("stimulated_formation", &mut self.stimulated_formation),
            ("top_ft", &mut self.top_ft),
            ("bottom_ft", &mut self.bottom_ft),
            ("stimulation_stages", &mut self.stimulation_stages),
            ("volume", &mut self.volume),
            ("volume_units", &mut self.volume_units),
            ("treatment_type", &mut self.treatment_type),
            ("acid_pct", &mut self.acid_pct),
            ("lbs_proppant", &mut self.lbs_proppant),
            ("max_treatment_pressure_psi", &mut self.max_treatment_pressure_psi),
            ("max_treatment_rate_bbls_min", &mut self.max_treatment_rate_bbls_min),
            ("details", &mut self.details),
        ]
    }

    /// A row produced by a false anchor: no anchored sub-field carries data.
    /// The proppant breakdown in `details` alone does not make a row real.
    pub fn is_ghost(&self) -> bool {
        [
            &self.date_stimulated,
            &self.stimulated_formation,
            &self.top_ft,
            &self.bottom_ft,
            &self.stimulation_stages,
            &self.volume,
            &self.volume_units,
            &self.treatment_type,
            &self.acid_pct,
            &self.lbs_proppant,
            &self.max_treatment_pressure_psi,
            &self.max_treatment_rate_bbls_min,
        ]
        .iter()
        .all(|v| v.as_deref().map_or(true, |s| !is_present(s)))
    }
}
