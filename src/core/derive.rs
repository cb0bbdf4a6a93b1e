//! Derived columns.
//!
//! Every function here computes a fresh column from a table and returns it.
//! Nothing is attached to the table, so two callers never see each other's
//! derived values.

use chrono::{Datelike, Month, NaiveDateTime, Timelike, Weekday};
use tracing::debug;

use crate::infra::config::Imputation;
use crate::models::trip::{Gender, TripTable};

const MONTHS: [Month; 12] = [
    Month::January,
    Month::February,
    Month::March,
    Month::April,
    Month::May,
    Month::June,
    Month::July,
    Month::August,
    Month::September,
    Month::October,
    Month::November,
    Month::December,
];

pub fn month_of(ts: &NaiveDateTime) -> Month {
    MONTHS[ts.month0() as usize]
}

pub fn weekdays(table: &TripTable) -> Vec<Weekday> {
    table.records().iter().map(|r| r.start_time.weekday()).collect()
}

pub fn months(table: &TripTable) -> Vec<Month> {
    table.records().iter().map(|r| month_of(&r.start_time)).collect()
}

/// Hour of day, 0-23.
pub fn hours(table: &TripTable) -> Vec<u32> {
    table.records().iter().map(|r| r.start_time.hour()).collect()
}

/// "<start> -to- <end>" per row.
pub fn trip_labels(table: &TripTable) -> Vec<String> {
    table
        .records()
        .iter()
        .map(|r| format!("{} -to- {}", r.start_station, r.end_station))
        .collect()
}

pub fn genders(table: &TripTable, strategy: Imputation) -> Vec<Option<Gender>> {
    let raw: Vec<Option<Gender>> = table.records().iter().map(|r| r.gender).collect();
    match strategy {
        Imputation::ForwardFill => forward_fill(raw),
        Imputation::None => raw,
        Imputation::Mean => {
            debug!("mean imputation is not defined for gender, leaving gaps");
            raw
        }
    }
}

pub fn birth_years(table: &TripTable, strategy: Imputation) -> Vec<Option<f64>> {
    let raw: Vec<Option<f64>> = table.records().iter().map(|r| r.birth_year).collect();
    match strategy {
        Imputation::Mean => mean_fill(raw),
        Imputation::ForwardFill => forward_fill(raw),
        Imputation::None => raw,
    }
}

/// Age against `reference_year`; rows without a birth year after imputation are skipped.
pub fn ages(table: &TripTable, reference_year: i32, strategy: Imputation) -> Vec<f64> {
    birth_years(table, strategy)
        .into_iter()
        .flatten()
        .map(|year| f64::from(reference_year) - year)
        .collect()
}

/// Fill each gap with the nearest preceding known value. Leading gaps stay empty.
pub fn forward_fill<T: Clone>(values: Vec<Option<T>>) -> Vec<Option<T>> {
    let mut last: Option<T> = None;
    values
        .into_iter()
        .map(|value| {
            if value.is_some() {
                last = value.clone();
                value
            } else {
                last.clone()
            }
        })
        .collect()
}

/// Fill each gap with the mean of the known values. All-empty input stays empty.
pub fn mean_fill(values: Vec<Option<f64>>) -> Vec<Option<f64>> {
    let (sum, n) = values
        .iter()
        .flatten()
        .fold((0.0, 0usize), |(sum, n), v| (sum + v, n + 1));
    if n == 0 {
        return values;
    }
    let mean = sum / n as f64;
    values.into_iter().map(|v| v.or(Some(mean))).collect()
}
