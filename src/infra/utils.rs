use regex::Regex;
use std::collections::BTreeSet;

use crate::models::error::InputError;

/// Whole seconds as "M minute(s) S second(s)".
pub fn format_duration(seconds: i64) -> String {
    format!(
        "{} minute(s) {} second(s)",
        seconds.div_euclid(60),
        seconds.rem_euclid(60)
    )
}

/// Ages are floats once mean imputation kicks in; print whole ones without decimals.
pub fn format_age(age: f64) -> String {
    if age.fract() == 0.0 {
        format!("{}", age as i64)
    } else {
        format!("{:.1}", age)
    }
}

/// Parse "5, 17,42" into a set of user ids.
pub fn parse_user_ids(input: &str) -> anyhow::Result<BTreeSet<u64>> {
    let separator = Regex::new(r"\s*,\s*")?;
    let mut ids = BTreeSet::new();
    for token in separator.split(input.trim()) {
        if token.is_empty() {
            continue;
        }
        let id = token
            .parse::<u64>()
            .map_err(|_| InputError::InvalidUserId(token.to_string()))?;
        ids.insert(id);
    }
    if ids.is_empty() {
        return Err(InputError::EmptyUserList.into());
    }
    Ok(ids)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duration_formatting() {
        assert_eq!(format_duration(125), "2 minute(s) 5 second(s)");
        assert_eq!(format_duration(59), "0 minute(s) 59 second(s)");
        assert_eq!(format_duration(0), "0 minute(s) 0 second(s)");
    }

    #[test]
    fn age_formatting() {
        assert_eq!(format_age(34.0), "34");
        assert_eq!(format_age(36.83), "36.8");
    }

    #[test]
    fn user_ids_split_on_commas() {
        let ids = parse_user_ids(" 5, 999 ,12,").unwrap();
        assert_eq!(ids.into_iter().collect::<Vec<_>>(), vec![5, 12, 999]);
    }

    #[test]
    fn user_ids_reject_non_integers() {
        let err = parse_user_ids("5, abc").unwrap_err();
        assert_eq!(
            err.downcast_ref::<InputError>(),
            Some(&InputError::InvalidUserId("abc".to_string()))
        );
        assert!(parse_user_ids(" , ").is_err());
    }
}
