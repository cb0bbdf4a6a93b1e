use anyhow::{anyhow, Context};
use chrono::NaiveDateTime;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument};

use crate::models::trip::{City, RawTrip, Schema, TripRecord, TripTable, UserType, Gender};

const TIMESTAMP_FORMATS: [&str; 3] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M"];
const DATASET_EXTENSIONS: [&str; 2] = ["csv", "txt"];

/// Where the driver gets a city's trips from.
pub trait TripSource {
    fn load(&self, city: City) -> anyhow::Result<TripTable>;
}

/// One CSV file per city inside a directory.
#[derive(Debug, Clone)]
pub struct CsvDirectory {
    root: PathBuf,
}

impl CsvDirectory {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn dataset_path(&self, city: City) -> anyhow::Result<PathBuf> {
        DATASET_EXTENSIONS
            .iter()
            .map(|ext| self.root.join(format!("{}.{}", city.file_stem(), ext)))
            .find(|path| path.is_file())
            .ok_or_else(|| {
                anyhow!(
                    "no dataset for {} in {} (expected {}.csv or {}.txt)",
                    city,
                    self.root.display(),
                    city.file_stem(),
                    city.file_stem()
                )
            })
    }
}

impl TripSource for CsvDirectory {
    #[instrument(skip(self))]
    fn load(&self, city: City) -> anyhow::Result<TripTable> {
        let path = self.dataset_path(city)?;
        let table = read_path(&path)?;
        info!("loaded {} trips for {} from {}", table.len(), city, path.display());
        Ok(table)
    }
}

pub fn read_path(path: &Path) -> anyhow::Result<TripTable> {
    let file = std::fs::File::open(path)
        .with_context(|| format!("failed to open {}", path.display()))?;
    read_trips(file).with_context(|| format!("failed to read {}", path.display()))
}

/// Parse a trip CSV stream into a table. Optional columns are recorded in the schema.
pub fn read_trips<R: Read>(reader: R) -> anyhow::Result<TripTable> {
    let mut rdr = csv::Reader::from_reader(reader);
    let headers = rdr.headers()?.clone();
    let schema = Schema {
        has_gender: headers.iter().any(|h| h == "Gender"),
        has_birth_year: headers.iter().any(|h| h == "Birth Year"),
    };
    debug!("dataset columns: {:?}, schema: {:?}", headers, schema);

    let mut records = Vec::new();
    for (row, raw) in rdr.deserialize::<RawTrip>().enumerate() {
        let raw = raw.with_context(|| format!("row {}", row + 1))?;
        let record = to_record(raw, row).with_context(|| format!("row {}", row + 1))?;
        records.push(record);
    }
    Ok(TripTable::new(records, schema))
}

fn to_record(raw: RawTrip, row: usize) -> anyhow::Result<TripRecord> {
    Ok(TripRecord {
        user_id: raw.user_id.unwrap_or(row as u64),
        start_time: parse_timestamp(&raw.start_time)?,
        start_station: raw.start_station,
        end_station: raw.end_station,
        trip_duration: raw.trip_duration.trunc() as i64,
        user_type: raw
            .user_type
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .map(UserType::from),
        gender: raw.gender.as_deref().and_then(Gender::parse),
        birth_year: raw.birth_year,
    })
}

pub fn parse_timestamp(raw: &str) -> anyhow::Result<NaiveDateTime> {
    let raw = raw.trim();
    TIMESTAMP_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .ok_or_else(|| anyhow!("unparsable timestamp '{}'", raw))
}
