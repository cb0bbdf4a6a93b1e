use tracing::{debug, instrument};

use crate::core::derive;
use crate::models::filter::FilterSpec;
use crate::models::trip::TripTable;

/// Narrow `table` to the rows matching `spec`.
///
/// The result keeps source order and schema; `FilterSpec::None` returns an
/// equal copy. An empty result is not an error here, the aggregation stage
/// reports it.
#[instrument(skip(table), fields(rows = table.len()))]
pub fn filter(table: &TripTable, spec: FilterSpec) -> TripTable {
    let mask: Vec<bool> = match spec {
        FilterSpec::None => return table.clone(),
        FilterSpec::Day(day) => derive::weekdays(table).into_iter().map(|d| d == day).collect(),
        FilterSpec::Month(month) => derive::months(table).into_iter().map(|m| m == month).collect(),
        FilterSpec::Both { month, day } => derive::months(table)
            .into_iter()
            .zip(derive::weekdays(table))
            .map(|(m, d)| m == month && d == day)
            .collect(),
    };

    let filtered = table.select(&mask);
    debug!("filter kept {} of {} rows", filtered.len(), table.len());
    filtered
}
