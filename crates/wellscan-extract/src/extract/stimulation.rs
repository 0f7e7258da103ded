//! Stimulation (frac/acid treatment) rows.
//!
//! The treatment section is located first, then split into one block per
//! `Date Stimulated` header. Scans without the header fall back to rows that
//! open with `date formation top bottom`. Each block yields one record; blocks
//! where nothing anchored matched are discarded as ghosts.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;
use wellscan_core::StimulationRecord;

use super::{clean, first_capture};

static SECTION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?is)Well\s*Specific\s*Stimulations?(.*?)(?:ADDITIONAL\s*INFORMATION|hereby\s*swear|Page\s*\d|SFN\s*\d|\z)",
    )
    .unwrap()
});

static ALT_SECTION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?is)(?:PERFORATION\s*RECORD|Acid,\s*Frac)(.*?)(?:PRODUCTION|Date[^\n]*?First\s*Production)",
    )
    .unwrap()
});

static BLOCK_HEADER: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)Date\s*Stimulated").unwrap());

static ROW_ANCHOR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)^[ ]*\d{1,2}/\d{1,2}/\d{2,4}[ ]+[A-Za-z][A-Za-z ]*?[ ]+\d+[ ]+\d+\b").unwrap()
});

static DATE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(\d{1,2}[/\-]\d{1,2}[/\-]\d{2,4})").unwrap());

static FORMATION_SPAN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b([A-Za-z][A-Za-z ]*?)[ ]+(\d+)[ ]+(\d+)\b").unwrap());

static STAGES_VOLUME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b(\d+)[ ]+(\d+)[ ]+(Barrels|Gallons|BBLS?)\b").unwrap());

static TREATMENT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(Sand\s*Frac|Acid\s*Frac|Fracture|Frac|Hydraulic|Acid)\b").unwrap()
});

static PERCENT_AFTER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[ ]*%").unwrap());

static ACID_PCT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)Acid\s*%?\s*[:.]?[ ]*(\d+(?:\.\d+)?)").unwrap());

static PROPPANT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(?:Lbs\s*)?Proppant\s*[:.]?[ ]*(\d[\d,]*)").unwrap());

static PRESSURE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(?:Maximum\s*)?(?:Treatment\s*)?Pressure\s*(?:\(PSI\))?\s*[:.]?[ ]*(\d[\d,]*)")
        .unwrap()
});

static RATE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)(?:Maximum\s*)?(?:Treatment\s*)?Rate\s*(?:\(BBLS/Min\))?\s*[:.]?[ ]*(\d+(?:\.\d+)?)",
    )
    .unwrap()
});

/// Value row under the treatment header: `[acid] proppant pressure rate`.
static TREATMENT_ROW: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)(?:Sand\s*Frac|Acid\s*Frac|Frac|Acid)[ ]+(?:\d+(?:\.\d+)?[ ]+)?(\d[\d,]*)[ ]+(\d[\d,]*)[ ]+(\d+(?:\.\d+)?)",
    )
    .unwrap()
});

static DETAILS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)(\d+(?:/\d+)?\s+(?:Mesh|White|Ceramic|Sand|Resin)(?:\s+(?:Mesh|White|Ceramic|Sand|Resin))*\s*[:.]?\s*\d[\d,]*)",
    )
    .unwrap()
});

/// Narrative acid job: `Acidized open hole section w/ 5000 gal 15% HCl`.
static ACID_NARRATIVE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)Acidiz\w*\s+(?:open\s+hole\s+)?(?:section\s+)?w/?\s*(\d[\d,]*)\s*gal\w*\s+(\d+(?:\.\d+)?%?\s*HCl)",
    )
    .unwrap()
});

/// Stimulation rows found in one document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StimulationScan {
    pub records: Vec<StimulationRecord>,
    pub ghosts_discarded: usize,
}

/// Extract every stimulation row in `text`.
pub fn extract_stimulations(text: &str) -> StimulationScan {
    let mut scan = StimulationScan::default();

    let section = SECTION
        .captures(text)
        .or_else(|| ALT_SECTION.captures(text))
        .and_then(|c| c.get(1))
        .map(|m| m.as_str());

    if let Some(section) = section {
        for block in blocks(section) {
            let record = parse_block(block);
            if record.is_ghost() {
                scan.ghosts_discarded += 1;
            } else {
                scan.records.push(record);
            }
        }
    }

    if scan.records.is_empty() {
        if let Some(record) = acid_narrative(text) {
            scan.records.push(record);
        }
    }

    if scan.ghosts_discarded > 0 {
        debug!("discarded {} ghost stimulation rows", scan.ghosts_discarded);
    }
    scan
}

/// Split a section into row blocks at each header, or at each anchored row.
fn blocks(section: &str) -> Vec<&str> {
    let starts: Vec<usize> = {
        let headers: Vec<usize> = BLOCK_HEADER.find_iter(section).map(|m| m.end()).collect();
        if headers.is_empty() {
            ROW_ANCHOR.find_iter(section).map(|m| m.start()).collect()
        } else {
            headers
        }
    };

    starts
        .iter()
        .enumerate()
        .map(|(i, &start)| {
            let end = starts
                .get(i + 1)
                .map_or(section.len(), |&next| block_end(section, next));
            &section[start..end.max(start)]
        })
        .collect()
}

/// A header match ends after `Date Stimulated`; the next block begins at the
/// start of that label, so back up over it.
fn block_end(section: &str, next_start: usize) -> usize {
    BLOCK_HEADER
        .find_iter(section)
        .find(|m| m.end() == next_start)
        .map_or(next_start, |m| m.start())
}

fn parse_block(block: &str) -> StimulationRecord {
    let mut record = StimulationRecord {
        date_stimulated: first_capture(&DATE, block),
        ..StimulationRecord::default()
    };

    if let Some(caps) = FORMATION_SPAN.captures(block) {
        record.stimulated_formation = Some(clean(&caps[1]));
        record.top_ft = Some(caps[2].to_string());
        record.bottom_ft = Some(caps[3].to_string());
    }

    if let Some(caps) = STAGES_VOLUME.captures(block) {
        record.stimulation_stages = Some(caps[1].to_string());
        record.volume = Some(caps[2].to_string());
        record.volume_units = Some(caps[3].to_string());
    }

    record.treatment_type = TREATMENT
        .find_iter(block)
        .find(|m| !PERCENT_AFTER.is_match(&block[m.end()..]))
        .map(|m| clean(m.as_str()));

    record.acid_pct = first_capture(&ACID_PCT, block);

    let row = TREATMENT_ROW.captures(block);
    record.lbs_proppant = first_capture(&PROPPANT, block)
        .or_else(|| row.as_ref().map(|c| c[1].to_string()))
        .map(|p| p.replace(',', ""));
    record.max_treatment_pressure_psi = first_capture(&PRESSURE, block)
        .or_else(|| row.as_ref().map(|c| c[2].to_string()))
        .map(|p| p.replace(',', ""));
    record.max_treatment_rate_bbls_min =
        first_capture(&RATE, block).or_else(|| row.as_ref().map(|c| c[3].to_string()));

    let details: Vec<String> = DETAILS
        .captures_iter(block)
        .map(|c| clean(&c[1]))
        .collect();
    if !details.is_empty() {
        record.details = Some(details.join("; "));
    }

    record
}

fn acid_narrative(text: &str) -> Option<StimulationRecord> {
    let caps = ACID_NARRATIVE.captures(text)?;
    Some(StimulationRecord {
        treatment_type: Some("Acid".to_string()),
        volume: Some(caps[1].replace(',', "")),
        volume_units: Some("Gallons".to_string()),
        acid_pct: Some(clean(&caps[2])),
        details: Some(clean(&caps[0])),
        ..StimulationRecord::default()
    })
}
