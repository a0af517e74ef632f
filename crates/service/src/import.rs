//! Bulk CSV source for reset and startup seeding.
//!
//! The file must carry the seventeen malaria columns by name; column order
//! and extra columns do not matter. Empty cells become null, integer columns
//! accept spreadsheet floats like `652230.0`, and `cases`/`deaths` stay as the
//! raw text they were exported with.

use std::io::Read;
use std::path::Path;

use models::coerce::int_from_text;
use models::malaria::NewMalaria;
use serde::Deserialize;
use tracing::info;

use crate::errors::ServiceError;

/// Header names the loader requires.
pub const COLUMNS: [&str; 17] = [
    "region",
    "year",
    "cases",
    "deaths",
    "cases_median",
    "cases_min",
    "cases_max",
    "deaths_median",
    "deaths_min",
    "deaths_max",
    "fips",
    "iso",
    "iso2",
    "land_area_kmsq_2012",
    "languages_en_2012",
    "who_region",
    "world_bank_income_group",
];

#[derive(Debug, Deserialize)]
struct CsvRow {
    region: Option<String>,
    year: Option<String>,
    cases: Option<String>,
    deaths: Option<String>,
    cases_median: Option<String>,
    cases_min: Option<String>,
    cases_max: Option<String>,
    deaths_median: Option<String>,
    deaths_min: Option<String>,
    deaths_max: Option<String>,
    fips: Option<String>,
    iso: Option<String>,
    iso2: Option<String>,
    land_area_kmsq_2012: Option<String>,
    languages_en_2012: Option<String>,
    who_region: Option<String>,
    world_bank_income_group: Option<String>,
}

impl CsvRow {
    fn into_record(self) -> Result<NewMalaria, models::errors::ModelError> {
        let int = |v: Option<String>| v.as_deref().map(int_from_text).transpose().map(Option::flatten);
        Ok(NewMalaria {
            region: text(self.region),
            year: int(self.year)?,
            cases: text(self.cases),
            deaths: text(self.deaths),
            cases_median: int(self.cases_median)?,
            cases_min: int(self.cases_min)?,
            cases_max: int(self.cases_max)?,
            deaths_median: int(self.deaths_median)?,
            deaths_min: int(self.deaths_min)?,
            deaths_max: int(self.deaths_max)?,
            fips: text(self.fips),
            iso: text(self.iso),
            iso2: text(self.iso2),
            land_area_kmsq_2012: int(self.land_area_kmsq_2012)?,
            languages_en_2012: text(self.languages_en_2012),
            who_region: text(self.who_region),
            world_bank_income_group: text(self.world_bank_income_group),
        })
    }
}

fn text(v: Option<String>) -> Option<String> {
    v.filter(|s| !s.trim().is_empty())
}

/// Parse CSV content into records, in file order.
pub fn parse_csv<R: Read>(reader: R) -> Result<Vec<NewMalaria>, ServiceError> {
    let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::Headers).from_reader(reader);
    let headers = rdr
        .headers()
        .map_err(|e| ServiceError::Import(format!("cannot read header: {e}")))?
        .clone();
    if let Some(missing) = COLUMNS.iter().find(|c| !headers.iter().any(|h| h == **c)) {
        return Err(ServiceError::Import(format!("missing column {missing:?}")));
    }

    let mut out = Vec::new();
    for (idx, row) in rdr.deserialize::<CsvRow>().enumerate() {
        // header is line 1
        let line = idx + 2;
        let row = row.map_err(|e| ServiceError::Import(format!("line {line}: {e}")))?;
        let record = row
            .into_record()
            .map_err(|e| ServiceError::Import(format!("line {line}: {e}")))?;
        out.push(record);
    }
    Ok(out)
}

/// Read and parse the CSV file at `path`.
pub async fn read_csv(path: &Path) -> Result<Vec<NewMalaria>, ServiceError> {
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|e| ServiceError::Import(format!("cannot read {}: {e}", path.display())))?;
    let rows = parse_csv(bytes.as_slice())?;
    info!(path = %path.display(), rows = rows.len(), "malaria csv parsed");
    Ok(rows)
}
