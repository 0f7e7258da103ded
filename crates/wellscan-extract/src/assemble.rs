//! Record assembly: field outcomes into one well record and its stimulation rows.

use wellscan_core::{Error, ExtractionConfig, Field, Result, StimulationRecord, WellRecord};

use crate::extract::FieldOutcomes;

/// One well plus the stimulation rows found in the same document.
#[derive(Debug, Clone, PartialEq)]
pub struct AssembledRecord {
    pub well: WellRecord,
    pub stimulations: Vec<StimulationRecord>,
}

/// Combine outcomes into a validated record. Fails only when no identifier
/// could be resolved or the record breaks an invariant.
pub fn assemble(
    outcomes: &FieldOutcomes,
    stimulations: Vec<StimulationRecord>,
    source_name: Option<&str>,
    config: &ExtractionConfig,
) -> Result<AssembledRecord> {
    let id = outcomes.text(Field::FileNo).ok_or_else(|| {
        Error::MissingIdentifier(source_name.unwrap_or("<unnamed>").to_string())
    })?;

    let mut well = WellRecord::new(id, config.default_state.clone());
    well.api_number = outcomes.text(Field::ApiNumber);
    well.well_name = outcomes.text(Field::WellName);
    well.operator = outcomes.text(Field::Operator);
    well.field_name = outcomes.text(Field::FieldName);
    well.elevation_gl = outcomes.text(Field::ElevationGl);
    well.elevation_kb = outcomes.text(Field::ElevationKb);
    well.spud_date = outcomes.text(Field::SpudDate);
    well.completion_date = outcomes.text(Field::CompletionDate);
    well.well_status = outcomes.text(Field::WellStatus);
    well.well_type = outcomes.text(Field::WellType);
    well.total_depth = outcomes.text(Field::TotalDepth);
    well.producing_method = outcomes.text(Field::ProducingMethod);
    well.surface_casing = outcomes.text(Field::SurfaceCasing);
    well.production_casing = outcomes.text(Field::ProductionCasing);
    well.source_file = source_name.map(str::to_string);

    if let Some(location) = outcomes.location() {
        well.location_desc = Some(location.description.clone());
        well.section = Some(location.section.clone());
        well.township = Some(location.township.clone());
        well.range_dir = Some(location.range_dir.clone());
        well.county = location.county.clone();
    }
    well.set_coordinates(outcomes.coordinates());

    well.validate(&config.bounds_for(well.county.as_deref()))?;

    Ok(AssembledRecord { well, stimulations })
}

/// Identifier-only record for a document with too little text to search.
pub fn identifier_only(
    id: &str,
    source_name: Option<&str>,
    config: &ExtractionConfig,
) -> AssembledRecord {
    let mut well = WellRecord::new(id, config.default_state.clone());
    well.source_file = source_name.map(str::to_string);
    AssembledRecord {
        well,
        stimulations: Vec::new(),
    }
}
