use chrono::NaiveDateTime;
use serde::Deserialize;
use std::fmt;

use crate::models::error::InputError;

/// Cities with a bundled trip dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum City {
    Chicago,
    NewYork,
    Washington,
}

impl City {
    /// Parse the free-text answer of the city prompt.
    pub fn parse(input: &str) -> Result<Self, InputError> {
        match input.trim().to_lowercase().as_str() {
            "chicago" => Ok(City::Chicago),
            "new york" | "new york city" | "newyork" => Ok(City::NewYork),
            "washington" => Ok(City::Washington),
            _ => Err(InputError::UnknownCity(input.trim().to_string())),
        }
    }

    /// Dataset file stem under the data directory.
    pub fn file_stem(self) -> &'static str {
        match self {
            City::Chicago => "chicago",
            City::NewYork => "new_york_city",
            City::Washington => "washington",
        }
    }
}

impl fmt::Display for City {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            City::Chicago => "Chicago",
            City::NewYork => "New York City",
            City::Washington => "Washington",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum UserType {
    Subscriber,
    Customer,
    /// Categories outside the two reported ones (e.g. "Dependent").
    Other(String),
}

impl From<&str> for UserType {
    fn from(raw: &str) -> Self {
        match raw.trim() {
            "Subscriber" => UserType::Subscriber,
            "Customer" => UserType::Customer,
            other => UserType::Other(other.to_string()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    /// Blank or unrecognised text maps to `None` so imputation can fill it.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim() {
            "Male" => Some(Gender::Male),
            "Female" => Some(Gender::Female),
            _ => None,
        }
    }
}

/// One trip row as loaded from a city dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct TripRecord {
    pub user_id: u64,
    pub start_time: NaiveDateTime,
    pub start_station: String,
    pub end_station: String,
    /// Whole seconds.
    pub trip_duration: i64,
    pub user_type: Option<UserType>,
    pub gender: Option<Gender>,
    pub birth_year: Option<f64>,
}

/// Row shape as it appears in the CSV file, before typing.
#[derive(Debug, Deserialize)]
pub struct RawTrip {
    #[serde(rename = "", default)]
    pub user_id: Option<u64>,
    #[serde(rename = "Start Time")]
    pub start_time: String,
    #[serde(rename = "Start Station")]
    pub start_station: String,
    #[serde(rename = "End Station")]
    pub end_station: String,
    #[serde(rename = "Trip Duration")]
    pub trip_duration: f64,
    #[serde(rename = "User Type", default)]
    pub user_type: Option<String>,
    #[serde(rename = "Gender", default)]
    pub gender: Option<String>,
    #[serde(rename = "Birth Year", default)]
    pub birth_year: Option<f64>,
}

/// Which optional columns the source file carried.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Schema {
    pub has_gender: bool,
    pub has_birth_year: bool,
}

impl Schema {
    #[cfg(test)]
    pub fn full() -> Self {
        Self {
            has_gender: true,
            has_birth_year: true,
        }
    }
}

/// Ordered, immutable collection of trips for one city.
///
/// Filtering yields a new table with the same schema; nothing is ever
/// written back into an existing table.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TripTable {
    records: Vec<TripRecord>,
    schema: Schema,
}

impl TripTable {
    pub fn new(records: Vec<TripRecord>, schema: Schema) -> Self {
        Self { records, schema }
    }

    pub fn records(&self) -> &[TripRecord] {
        &self.records
    }

    pub fn schema(&self) -> Schema {
        self.schema
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Rows whose mask entry is `true`, in source order, same schema.
    /// Rows beyond the end of `mask` are dropped.
    pub fn select(&self, mask: &[bool]) -> Self {
        Self {
            records: self
                .records
                .iter()
                .zip(mask)
                .filter(|(_, keep)| **keep)
                .map(|(record, _)| record.clone())
                .collect(),
            schema: self.schema,
        }
    }
}

pub const TABLE_HEADER: &str =
    "Users ID | Start Time | Start Station | End Station | Trip Duration | User Type | Gender | Birth Year";

impl fmt::Display for TripRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let user_type = match &self.user_type {
            Some(UserType::Subscriber) => "Subscriber",
            Some(UserType::Customer) => "Customer",
            Some(UserType::Other(other)) => other.as_str(),
            None => "-",
        };
        let gender = match self.gender {
            Some(Gender::Male) => "Male",
            Some(Gender::Female) => "Female",
            None => "-",
        };
        let birth_year = self
            .birth_year
            .map(|y| format!("{}", y))
            .unwrap_or_else(|| "-".to_string());
        write!(
            f,
            "{} | {} | {} | {} | {} | {} | {} | {}",
            self.user_id,
            self.start_time,
            self.start_station,
            self.end_station,
            self.trip_duration,
            user_type,
            gender,
            birth_year
        )
    }
}
