// SPDX-FileCopyrightText: 2025 Joost van der Laan <joost@fashionunited.com>
//
// SPDX-License-Identifier: AGPL-3.0-only

use super::exchange_rates::RateSeries;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Column-oriented table consumed by the spreadsheet add-in.
///
/// Each column maps a row index to a cell, which serializes as
/// `{"date": {"0": "2023-01-02"}, "value": {"0": 1.0683}}`.
/// Missing values serialize as `null`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ColumnTable {
    pub date: BTreeMap<usize, NaiveDate>,
    pub value: BTreeMap<usize, Option<f64>>,
}

impl ColumnTable {
    pub fn row_count(&self) -> usize {
        self.date.len()
    }
}

impl From<&RateSeries> for ColumnTable {
    fn from(series: &RateSeries) -> Self {
        let mut table = ColumnTable::default();
        for (row, point) in series.iter().enumerate() {
            table.date.insert(row, point.date);
            table.value.insert(row, point.value);
        }
        table
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RatePoint;
    use serde_json::json;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2023, 1, d).unwrap()
    }

    #[test]
    fn test_table_is_column_oriented() {
        let series = RateSeries::new(
            "USD",
            vec![
                RatePoint { date: day(2), value: Some(1.0683) },
                RatePoint { date: day(3), value: None },
            ],
        );

        let table = ColumnTable::from(&series);
        assert_eq!(table.row_count(), 2);
        assert_eq!(
            serde_json::to_value(&table).unwrap(),
            json!({
                "date": {"0": "2023-01-02", "1": "2023-01-03"},
                "value": {"0": 1.0683, "1": null}
            })
        );
    }

    #[test]
    fn test_empty_series_gives_empty_columns() {
        let table = ColumnTable::from(&RateSeries::new("USD", Vec::new()));
        assert_eq!(
            serde_json::to_value(&table).unwrap(),
            json!({"date": {}, "value": {}})
        );
    }
}
