// SPDX-FileCopyrightText: 2025 Joost van der Laan <joost@fashionunited.com>
//
// SPDX-License-Identifier: AGPL-3.0-only

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Date format used both in the upstream query path and in its response keys.
pub const RATE_DATE_FORMAT: &str = "%Y-%m-%d";

/// Body of a Frankfurter time series response.
///
/// `rates` maps a date key to the quotes published for that day. The other
/// fields are informational and may be missing on error payloads.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TimeseriesResponse {
    #[serde(default)]
    pub amount: Option<f64>,
    #[serde(default)]
    pub base: Option<String>,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default)]
    pub rates: Option<BTreeMap<String, HashMap<String, f64>>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RatePoint {
    pub date: NaiveDate,
    /// `None` when the upstream published the date without this currency.
    pub value: Option<f64>,
}

/// Chronologically ordered EUR/`to` rates for one query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateSeries {
    pub to: String,
    pub points: Vec<RatePoint>,
}

impl RateSeries {
    pub fn new(to: impl Into<String>, points: Vec<RatePoint>) -> Self {
        Self {
            to: to.into(),
            points,
        }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &RatePoint> {
        self.points.iter()
    }
}

pub fn format_rate_date(date: NaiveDate) -> String {
    date.format(RATE_DATE_FORMAT).to_string()
}

pub fn parse_rate_date(value: &str) -> Result<NaiveDate, chrono::ParseError> {
    NaiveDate::parse_from_str(value, RATE_DATE_FORMAT)
}
