use chrono::{Month, Weekday};
use std::fmt;

use crate::models::error::{FilterError, InputError};

/// Which time filter the user asked for, before its parameters are known.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterMode {
    None,
    Day,
    Month,
    Both,
}

impl FilterMode {
    pub fn parse(input: &str) -> Result<Self, InputError> {
        match input.trim().to_lowercase().as_str() {
            "none" => Ok(FilterMode::None),
            "day" => Ok(FilterMode::Day),
            "month" => Ok(FilterMode::Month),
            "both" => Ok(FilterMode::Both),
            _ => Err(InputError::UnknownFilterMode(input.trim().to_string())),
        }
    }
}

impl fmt::Display for FilterMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FilterMode::None => "None",
            FilterMode::Day => "Day",
            FilterMode::Month => "Month",
            FilterMode::Both => "Both",
        };
        f.write_str(name)
    }
}

/// A fully specified time filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterSpec {
    None,
    Day(Weekday),
    Month(Month),
    Both { month: Month, day: Weekday },
}

impl FilterSpec {
    pub fn mode(&self) -> FilterMode {
        match self {
            FilterSpec::None => FilterMode::None,
            FilterSpec::Day(_) => FilterMode::Day,
            FilterSpec::Month(_) => FilterMode::Month,
            FilterSpec::Both { .. } => FilterMode::Both,
        }
    }
}

impl fmt::Display for FilterSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterSpec::None => f.write_str("None"),
            FilterSpec::Day(day) => write!(f, "Day ({})", day_name(*day)),
            FilterSpec::Month(month) => write!(f, "Month ({})", month_name(*month)),
            FilterSpec::Both { month, day } => {
                write!(f, "Both ({}, {})", month_name(*month), day_name(*day))
            }
        }
    }
}

/// Case-insensitive weekday name ("monday", "MON", "Monday").
pub fn parse_day(input: &str) -> Result<Weekday, FilterError> {
    input
        .trim()
        .parse::<Weekday>()
        .map_err(|_| FilterError::UnknownDay(title_case(input.trim())))
}

/// Case-insensitive month name ("january", "Jan").
pub fn parse_month(input: &str) -> Result<Month, FilterError> {
    input
        .trim()
        .parse::<Month>()
        .map_err(|_| FilterError::UnknownMonth(title_case(input.trim())))
}

/// Full English weekday name in title case.
pub fn day_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

pub fn month_name(month: Month) -> &'static str {
    month.name()
}

fn title_case(word: &str) -> String {
    let lower = word.to_lowercase();
    let mut chars = lower.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
