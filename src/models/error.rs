//! Error types for each pipeline stage, so the driver can say which stage failed.

use std::fmt;

/// Bad answer at one of the interactive prompts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    UnknownCity(String),
    UnknownFilterMode(String),
    UnknownAnswer(String),
    InvalidUserId(String),
    EmptyUserList,
}

impl fmt::Display for InputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputError::UnknownCity(city) => write!(
                f,
                "unknown city '{}' (expected Chicago, New York or Washington)",
                city
            ),
            InputError::UnknownFilterMode(mode) => write!(
                f,
                "unknown filter '{}' (expected Month, Day, Both or None)",
                mode
            ),
            InputError::UnknownAnswer(answer) => write!(f, "unexpected answer '{}'", answer),
            InputError::InvalidUserId(id) => write!(f, "'{}' is not a user id", id),
            InputError::EmptyUserList => write!(f, "no user ids given"),
        }
    }
}

impl std::error::Error for InputError {}

/// The time filter could not be built from user input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterError {
    UnknownDay(String),
    UnknownMonth(String),
}

impl fmt::Display for FilterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterError::UnknownDay(day) => write!(f, "filter failed: unknown day '{}'", day),
            FilterError::UnknownMonth(month) => {
                write!(f, "filter failed: unknown month '{}'", month)
            }
        }
    }
}

impl std::error::Error for FilterError {}

/// A statistic could not be computed for the current table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatsError {
    /// The filtered table has no rows (or no usable values) for this statistic.
    NoData { statistic: &'static str },
    /// The dataset does not carry the column this statistic needs.
    MissingColumn { column: &'static str },
}

impl fmt::Display for StatsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatsError::NoData { statistic } => write!(
                f,
                "statistics failed: no trips match the selected filter ({})",
                statistic
            ),
            StatsError::MissingColumn { column } => write!(
                f,
                "statistics failed: this dataset has no '{}' column",
                column
            ),
        }
    }
}

impl std::error::Error for StatsError {}
