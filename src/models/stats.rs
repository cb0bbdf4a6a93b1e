use std::fmt;

use crate::infra::utils::{format_age, format_duration};

/// Most frequent value of a column and how often it occurs.
#[derive(Debug, Clone, PartialEq)]
pub struct Mode<T> {
    pub value: T,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HourStats {
    pub popular: Mode<u32>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StationStats {
    pub start: Mode<String>,
    pub end: Mode<String>,
    pub trip: Mode<String>,
}

/// Durations in seconds.
#[derive(Debug, Clone, PartialEq)]
pub struct DurationStats {
    pub mean: f64,
    pub max: i64,
    pub min: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct UserTypeCounts {
    pub subscribers: usize,
    pub customers: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GenderCounts {
    pub male: usize,
    pub female: usize,
    /// Rows whose gender stayed unknown after imputation.
    pub unknown: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AgeStats {
    pub mode: Mode<f64>,
    pub max: f64,
    pub min: f64,
}

impl fmt::Display for HourStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Most popular hour: {}", self.popular.value)?;
        write!(f, "Count: {}", self.popular.count)
    }
}

impl fmt::Display for StationStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Most popular start station: {}", self.start.value)?;
        writeln!(f, "Count: {}", self.start.count)?;
        writeln!(f)?;
        writeln!(f, "Most popular end station: {}", self.end.value)?;
        writeln!(f, "Count: {}", self.end.count)?;
        writeln!(f)?;
        writeln!(f, "Most popular trip: {}", self.trip.value)?;
        write!(f, "Count: {}", self.trip.count)
    }
}

impl fmt::Display for DurationStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // fractional seconds of the mean are dropped, not rounded
        writeln!(f, "Average trip time: {}", format_duration(self.mean.trunc() as i64))?;
        writeln!(f, "Maximum trip time: {}", format_duration(self.max))?;
        write!(f, "Least trip time: {}", format_duration(self.min))
    }
}

impl fmt::Display for UserTypeCounts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Numbers of subscribers: {}", self.subscribers)?;
        write!(f, "Numbers of customers: {}", self.customers)
    }
}

impl fmt::Display for GenderCounts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "The count of users gender is:")?;
        writeln!(f, "Male: {}", self.male)?;
        write!(f, "Female: {}", self.female)?;
        if self.unknown > 0 {
            write!(f, "\nUnknown: {}", self.unknown)?;
        }
        Ok(())
    }
}

impl fmt::Display for AgeStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Most common age: {}", format_age(self.mode.value))?;
        writeln!(f, "Maximum age: {}", format_age(self.max))?;
        write!(f, "Minimum age: {}", format_age(self.min))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duration_display_truncates_mean() {
        let stats = DurationStats {
            mean: 125.9,
            max: 3601,
            min: 59,
        };
        assert_eq!(
            stats.to_string(),
            "Average trip time: 2 minute(s) 5 second(s)\n\
             Maximum trip time: 60 minute(s) 1 second(s)\n\
             Least trip time: 0 minute(s) 59 second(s)"
        );
    }

    #[test]
    fn gender_display_hides_zero_unknown() {
        let counts = GenderCounts {
            male: 3,
            female: 1,
            unknown: 0,
        };
        assert!(!counts.to_string().contains("Unknown"));

        let counts = GenderCounts { unknown: 2, ..counts };
        assert!(counts.to_string().ends_with("Unknown: 2"));
    }
}
