//! Fixtures shared by the core unit tests.

use crate::infra::loader::parse_timestamp;
use crate::models::trip::{Schema, TripRecord, TripTable, UserType};

pub fn trip(user_id: u64, start: &str, from: &str, to: &str) -> TripRecord {
    TripRecord {
        user_id,
        start_time: parse_timestamp(start).unwrap(),
        start_station: from.to_string(),
        end_station: to.to_string(),
        trip_duration: 60,
        user_type: Some(UserType::Subscriber),
        gender: None,
        birth_year: None,
    }
}

pub fn table(records: Vec<TripRecord>) -> TripTable {
    TripTable::new(records, Schema::full())
}

/// A few weeks of trips spread over January and February 2017.
pub fn sample_table() -> TripTable {
    let starts = [
        "2017-01-02 08:15:00", // Mon
        "2017-01-03 17:40:00", // Tue
        "2017-01-03 08:05:00", // Tue
        "2017-01-09 08:55:00", // Mon
        "2017-01-11 12:00:00", // Wed
        "2017-02-06 17:10:00", // Mon
        "2017-02-07 08:30:00", // Tue
        "2017-02-14 18:45:00", // Tue
        "2017-02-15 08:20:00", // Wed
    ];
    let stations = ["Canal St", "Clark St", "State St"];
    let records = starts
        .iter()
        .enumerate()
        .map(|(i, start)| {
            let mut r = trip(
                i as u64,
                start,
                stations[i % 3],
                stations[(i + 1) % 3],
            );
            r.trip_duration = 60 + 37 * i as i64;
            r
        })
        .collect();
    table(records)
}
