use std::cmp::Ordering;
use tracing::{debug, instrument};

use crate::core::derive;
use crate::infra::config::ImputationPolicy;
use crate::models::error::StatsError;
use crate::models::stats::{
    AgeStats, DurationStats, GenderCounts, HourStats, Mode, StationStats, UserTypeCounts,
};
use crate::models::trip::{Gender, TripTable, UserType};

/// Most frequent value under `cmp`. Among equally frequent values the
/// smallest one wins, so the result never depends on row order.
pub fn mode_by<T, F>(mut values: Vec<T>, cmp: F) -> Option<Mode<T>>
where
    F: Fn(&T, &T) -> Ordering,
{
    values.sort_by(&cmp);
    let mut best: Option<(usize, usize)> = None; // (start index, count)
    let mut start = 0;
    while start < values.len() {
        let mut end = start + 1;
        while end < values.len() && cmp(&values[start], &values[end]) == Ordering::Equal {
            end += 1;
        }
        let count = end - start;
        if best.map_or(true, |(_, c)| count > c) {
            best = Some((start, count));
        }
        start = end;
    }
    let (index, count) = best?;
    let value = values.swap_remove(index);
    Some(Mode { value, count })
}

pub fn mode<T: Ord>(values: Vec<T>) -> Option<Mode<T>> {
    mode_by(values, T::cmp)
}

fn non_empty(table: &TripTable, statistic: &'static str) -> Result<(), StatsError> {
    if table.is_empty() {
        return Err(StatsError::NoData { statistic });
    }
    Ok(())
}

/// Computes the descriptive statistics of a (filtered) trip table.
///
/// All methods are read-only; calling one twice on the same table gives the
/// same answer.
#[derive(Debug, Clone)]
pub struct StatsEngine {
    reference_year: i32,
    policy: ImputationPolicy,
}

impl StatsEngine {
    pub fn new(reference_year: i32, policy: ImputationPolicy) -> Self {
        Self {
            reference_year,
            policy,
        }
    }

    #[instrument(skip_all, fields(rows = table.len()))]
    pub fn hour_stats(&self, table: &TripTable) -> Result<HourStats, StatsError> {
        non_empty(table, "popular hour")?;
        let popular = mode(derive::hours(table)).ok_or(StatsError::NoData {
            statistic: "popular hour",
        })?;
        debug!("popular hour {} ({} trips)", popular.value, popular.count);
        Ok(HourStats { popular })
    }

    #[instrument(skip_all, fields(rows = table.len()))]
    pub fn station_stats(&self, table: &TripTable) -> Result<StationStats, StatsError> {
        const STAT: &str = "popular stations";
        non_empty(table, STAT)?;
        let no_data = || StatsError::NoData { statistic: STAT };

        let starts: Vec<String> = table.records().iter().map(|r| r.start_station.clone()).collect();
        let ends: Vec<String> = table.records().iter().map(|r| r.end_station.clone()).collect();

        Ok(StationStats {
            start: mode(starts).ok_or_else(no_data)?,
            end: mode(ends).ok_or_else(no_data)?,
            trip: mode(derive::trip_labels(table)).ok_or_else(no_data)?,
        })
    }

    #[instrument(skip_all, fields(rows = table.len()))]
    pub fn duration_stats(&self, table: &TripTable) -> Result<DurationStats, StatsError> {
        const STAT: &str = "trip duration";
        non_empty(table, STAT)?;
        let durations = table.records().iter().map(|r| r.trip_duration);

        let total: i64 = durations.clone().sum();
        let max = durations.clone().max().ok_or(StatsError::NoData { statistic: STAT })?;
        let min = durations.min().ok_or(StatsError::NoData { statistic: STAT })?;

        Ok(DurationStats {
            mean: total as f64 / table.len() as f64,
            max,
            min,
        })
    }

    /// Subscriber and Customer counts; other categories are not reported.
    pub fn user_type_counts(&self, table: &TripTable) -> Result<UserTypeCounts, StatsError> {
        non_empty(table, "user types")?;
        let mut counts = UserTypeCounts::default();
        for record in table.records() {
            match record.user_type {
                Some(UserType::Subscriber) => counts.subscribers += 1,
                Some(UserType::Customer) => counts.customers += 1,
                _ => {}
            }
        }
        Ok(counts)
    }

    pub fn gender_counts(&self, table: &TripTable) -> Result<GenderCounts, StatsError> {
        if !table.schema().has_gender {
            return Err(StatsError::MissingColumn { column: "Gender" });
        }
        non_empty(table, "gender")?;

        let mut counts = GenderCounts::default();
        for gender in derive::genders(table, self.policy.gender) {
            match gender {
                Some(Gender::Male) => counts.male += 1,
                Some(Gender::Female) => counts.female += 1,
                None => counts.unknown += 1,
            }
        }
        Ok(counts)
    }

    pub fn age_stats(&self, table: &TripTable) -> Result<AgeStats, StatsError> {
        const STAT: &str = "age";
        if !table.schema().has_birth_year {
            return Err(StatsError::MissingColumn {
                column: "Birth Year",
            });
        }
        non_empty(table, STAT)?;

        let ages = derive::ages(table, self.reference_year, self.policy.birth_year);
        let max = ages.iter().copied().reduce(f64::max);
        let min = ages.iter().copied().reduce(f64::min);
        let mode = mode_by(ages, f64::total_cmp);

        match (mode, max, min) {
            (Some(mode), Some(max), Some(min)) => Ok(AgeStats { mode, max, min }),
            _ => Err(StatsError::NoData { statistic: STAT }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::filter::filter;
    use crate::core::test_support::{sample_table, table, trip};
    use crate::infra::config::Imputation;
    use crate::models::filter::FilterSpec;
    use crate::models::trip::Schema;
    use chrono::Weekday;

    fn engine() -> StatsEngine {
        StatsEngine::new(2020, ImputationPolicy::default())
    }

    #[test]
    fn mode_ties_pick_smallest_value() {
        let picked = mode(vec!["Clark St", "Adams St", "Clark St", "Adams St"]).unwrap();
        assert_eq!(picked, Mode { value: "Adams St", count: 2 });

        let reversed = mode(vec!["Adams St", "Clark St", "Adams St", "Clark St"]).unwrap();
        assert_eq!(reversed, picked);
        assert_eq!(mode(Vec::<u32>::new()), None);
    }

    #[test]
    fn popular_hour() {
        let stats = engine().hour_stats(&sample_table()).unwrap();
        // 08:xx appears five times in the sample
        assert_eq!(stats.popular, Mode { value: 8, count: 5 });
    }

    #[test]
    fn popular_stations_and_trip() {
        let t = table(vec![
            trip(1, "2017-01-02 08:00:00", "A", "B"),
            trip(2, "2017-01-02 09:00:00", "C", "B"),
            trip(3, "2017-01-02 10:00:00", "C", "A"),
            trip(4, "2017-01-02 11:00:00", "A", "B"),
        ]);
        let stats = engine().station_stats(&t).unwrap();
        assert_eq!(stats.start, Mode { value: "A".to_string(), count: 2 });
        assert_eq!(stats.end, Mode { value: "B".to_string(), count: 3 });
        assert_eq!(stats.trip, Mode { value: "A -to- B".to_string(), count: 2 });
    }

    #[test]
    fn durations() {
        let mut t = vec![
            trip(1, "2017-01-02 08:00:00", "A", "B"),
            trip(2, "2017-01-02 09:00:00", "A", "B"),
            trip(3, "2017-01-02 10:00:00", "A", "B"),
        ];
        t[0].trip_duration = 59;
        t[1].trip_duration = 125;
        t[2].trip_duration = 200;
        let stats = engine().duration_stats(&table(t)).unwrap();
        assert_eq!(stats.max, 200);
        assert_eq!(stats.min, 59);
        assert!((stats.mean - 128.0).abs() < 1e-9);
    }

    #[test]
    fn user_types_absent_category_is_zero() {
        let counts = engine().user_type_counts(&sample_table()).unwrap();
        assert_eq!(counts.subscribers, 9);
        assert_eq!(counts.customers, 0);
    }

    #[test]
    fn gender_counts_forward_fill_and_unknown() {
        let genders = [None, Some(Gender::Male), None, None, Some(Gender::Female)];
        let records = genders
            .iter()
            .enumerate()
            .map(|(i, g)| {
                let mut r = trip(i as u64, "2017-01-02 08:00:00", "A", "B");
                r.gender = *g;
                r
            })
            .collect();
        let t = table(records);

        let counts = engine().gender_counts(&t).unwrap();
        assert_eq!(
            counts,
            GenderCounts {
                male: 3,
                female: 1,
                unknown: 1
            }
        );

        let no_fill = StatsEngine::new(
            2020,
            ImputationPolicy {
                gender: Imputation::None,
                ..ImputationPolicy::default()
            },
        );
        assert_eq!(no_fill.gender_counts(&t).unwrap().unknown, 3);
    }

    #[test]
    fn age_stats_with_mean_imputation() {
        let years = [Some(1990.0), Some(1990.0), None, Some(1980.0), Some(2000.0)];
        let records = years
            .iter()
            .enumerate()
            .map(|(i, y)| {
                let mut r = trip(i as u64, "2017-01-02 08:00:00", "A", "B");
                r.birth_year = *y;
                r
            })
            .collect();
        let stats = engine().age_stats(&table(records)).unwrap();
        assert_eq!(stats.mode, Mode { value: 30.0, count: 3 });
        assert_eq!(stats.max, 40.0);
        assert_eq!(stats.min, 20.0);
    }

    #[test]
    fn missing_columns_are_reported() {
        let t = TripTable::new(sample_table().records().to_vec(), Schema::default());
        assert_eq!(
            engine().gender_counts(&t),
            Err(StatsError::MissingColumn { column: "Gender" })
        );
        assert_eq!(
            engine().age_stats(&t),
            Err(StatsError::MissingColumn { column: "Birth Year" })
        );
    }

    #[test]
    fn empty_selection_reports_no_data() {
        let t = table(vec![
            trip(1, "2017-01-02 08:00:00", "A", "B"),
            trip(2, "2017-01-09 09:00:00", "A", "C"),
            trip(3, "2017-01-16 10:00:00", "B", "C"),
        ]);
        let tuesdays = filter(&t, FilterSpec::Day(Weekday::Tue));
        let e = engine();

        assert!(matches!(e.hour_stats(&tuesdays), Err(StatsError::NoData { .. })));
        assert!(matches!(e.station_stats(&tuesdays), Err(StatsError::NoData { .. })));
        assert!(matches!(e.duration_stats(&tuesdays), Err(StatsError::NoData { .. })));
        assert!(matches!(e.user_type_counts(&tuesdays), Err(StatsError::NoData { .. })));
        assert!(matches!(e.gender_counts(&tuesdays), Err(StatsError::NoData { .. })));
        assert!(matches!(e.age_stats(&tuesdays), Err(StatsError::NoData { .. })));
    }

    #[test]
    fn aggregation_is_idempotent() {
        let t = sample_table();
        let e = engine();
        assert_eq!(e.hour_stats(&t), e.hour_stats(&t));
        assert_eq!(e.station_stats(&t), e.station_stats(&t));
        assert_eq!(e.duration_stats(&t), e.duration_stats(&t));
        assert_eq!(e.gender_counts(&t), e.gender_counts(&t));
        assert_eq!(t, sample_table());
    }
}
