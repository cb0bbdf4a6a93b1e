use std::collections::BTreeSet;
use tracing::{info, instrument};

use crate::models::trip::TripTable;

#[derive(Debug, Clone, PartialEq)]
pub struct LookupResult {
    /// Matching rows in table order.
    pub rows: TripTable,
    /// Requested ids with no row. Not an error.
    pub unmatched: Vec<u64>,
}

/// Rows of the full, unfiltered table whose user id is in `ids`.
#[instrument(skip_all, fields(requested = ids.len()))]
pub fn lookup(table: &TripTable, ids: &BTreeSet<u64>) -> LookupResult {
    let mask: Vec<bool> = table
        .records()
        .iter()
        .map(|r| ids.contains(&r.user_id))
        .collect();
    let rows = table.select(&mask);

    let found: BTreeSet<u64> = rows.records().iter().map(|r| r.user_id).collect();
    let unmatched: Vec<u64> = ids.difference(&found).copied().collect();
    info!("lookup matched {} rows", rows.len());

    LookupResult { rows, unmatched }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::test_support::{table, trip};

    #[test]
    fn unmatched_ids_are_not_an_error() {
        let t = table(vec![
            trip(3, "2017-01-02 08:00:00", "A", "B"),
            trip(5, "2017-01-03 08:00:00", "B", "C"),
            trip(7, "2017-01-04 08:00:00", "C", "A"),
        ]);
        let ids: BTreeSet<u64> = [5, 999].into_iter().collect();

        let result = lookup(&t, &ids);
        assert_eq!(result.rows.len(), 1);
        assert_eq!(result.rows.records()[0].user_id, 5);
        assert_eq!(result.unmatched, vec![999]);
    }

    #[test]
    fn matches_keep_table_order() {
        let t = table(vec![
            trip(9, "2017-01-02 08:00:00", "A", "B"),
            trip(2, "2017-01-03 08:00:00", "B", "C"),
            trip(9, "2017-01-04 08:00:00", "C", "A"),
        ]);
        let ids: BTreeSet<u64> = [2, 9].into_iter().collect();
        let ids_in_order: Vec<u64> = lookup(&t, &ids)
            .rows
            .records()
            .iter()
            .map(|r| r.user_id)
            .collect();
        assert_eq!(ids_in_order, vec![9, 2, 9]);
    }
}
