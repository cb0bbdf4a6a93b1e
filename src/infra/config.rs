use anyhow::{anyhow, Context};
use chrono::{Datelike, Local};
use std::env;
use std::path::PathBuf;
use std::str::FromStr;

/// How missing values of a column are filled before aggregation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Imputation {
    None,
    ForwardFill,
    Mean,
}

impl FromStr for Imputation {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "none" => Ok(Imputation::None),
            "ffill" | "forward-fill" | "forward_fill" => Ok(Imputation::ForwardFill),
            "mean" => Ok(Imputation::Mean),
            other => Err(anyhow!("unknown imputation strategy '{}'", other)),
        }
    }
}

/// Imputation policy per column that has missing values in the datasets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImputationPolicy {
    pub gender: Imputation,
    pub birth_year: Imputation,
}

impl Default for ImputationPolicy {
    fn default() -> Self {
        Self {
            gender: Imputation::ForwardFill,
            birth_year: Imputation::Mean,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub data_dir: PathBuf,
    /// Year ages are computed against.
    pub reference_year: i32,
    pub imputation: ImputationPolicy,
}

impl Config {
    /// Read settings from the environment (after `.env` has been loaded).
    pub fn from_env() -> anyhow::Result<Self> {
        let data_dir = env::var("BIKESHARE_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("."));

        let reference_year = match env::var("BIKESHARE_REFERENCE_YEAR") {
            Ok(raw) => raw
                .trim()
                .parse::<i32>()
                .with_context(|| format!("BIKESHARE_REFERENCE_YEAR='{}' is not a year", raw))?,
            Err(_) => Local::now().year(),
        };

        let mut imputation = ImputationPolicy::default();
        if let Ok(raw) = env::var("BIKESHARE_GENDER_FILL") {
            imputation.gender = raw.parse().context("BIKESHARE_GENDER_FILL")?;
            if imputation.gender == Imputation::Mean {
                return Err(anyhow!("BIKESHARE_GENDER_FILL: mean is not defined for gender"));
            }
        }
        if let Ok(raw) = env::var("BIKESHARE_BIRTH_YEAR_FILL") {
            imputation.birth_year = raw.parse().context("BIKESHARE_BIRTH_YEAR_FILL")?;
        }

        Ok(Self {
            data_dir,
            reference_year,
            imputation,
        })
    }
}
