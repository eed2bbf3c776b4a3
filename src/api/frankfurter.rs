// SPDX-FileCopyrightText: 2025 Joost van der Laan <joost@fashionunited.com>
//
// SPDX-License-Identifier: AGPL-3.0-only

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::{Client, StatusCode};
use std::collections::{BTreeMap, HashMap};
use std::time::Duration;
use tracing::{debug, info};

use crate::error::FxError;
use crate::models::{format_rate_date, parse_rate_date, RatePoint, RateSeries, TimeseriesResponse};

pub const DEFAULT_BASE_URL: &str = "https://api.frankfurter.app";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(4);

/// Source of EUR-based daily rate series.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RateSource: Send + Sync {
    async fn fetch(&self, to: &str, start: NaiveDate, end: NaiveDate) -> Result<RateSeries, FxError>;
}

#[derive(Debug, Clone)]
pub struct FrankfurterClient {
    client: Client,
    base_url: String,
}

impl FrankfurterClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }
}

#[async_trait]
impl RateSource for FrankfurterClient {
    async fn fetch(&self, to: &str, start: NaiveDate, end: NaiveDate) -> Result<RateSeries, FxError> {
        let code = normalize_currency(to)?;
        let url = timeseries_url(&self.base_url, &code, start, end);
        debug!(%url, "requesting rate series");

        let unavailable = |reason: String| FxError::UpstreamUnavailable {
            to: code.clone(),
            start,
            end,
            reason,
        };

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| unavailable(format!("request failed: {e}")))?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(unavailable(format!("upstream returned {status}")));
        }

        let body: TimeseriesResponse = response
            .json()
            .await
            .map_err(|e| unavailable(format!("failed to parse response: {e}")))?;

        let series = reshape(body.rates, &code, start, end)?;
        info!(to = %code, %start, %end, rows = series.len(), "rate series fetched");
        Ok(series)
    }
}

/// Builds `{base}/{start}..{end}?to={CODE}`.
pub fn timeseries_url(base_url: &str, to: &str, start: NaiveDate, end: NaiveDate) -> String {
    format!(
        "{}/{}..{}?to={}",
        base_url.trim_end_matches('/'),
        format_rate_date(start),
        format_rate_date(end),
        to.to_uppercase()
    )
}

/// Trims and uppercases a currency code, which must be three ASCII letters.
pub fn normalize_currency(to: &str) -> Result<String, FxError> {
    let code = to.trim().to_uppercase();
    if code.len() != 3 || !code.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(FxError::invalid_input(format!("invalid currency code {to:?}")));
    }
    Ok(code)
}

/// Turns the upstream `rates` mapping into a series for `to`.
///
/// Dates outside `start..=end` are dropped: the upstream answers a range that
/// starts on a closed market day with the preceding business day.
pub fn reshape(
    rates: Option<BTreeMap<String, HashMap<String, f64>>>,
    to: &str,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<RateSeries, FxError> {
    let no_data = || FxError::NoDataForRange {
        to: to.to_string(),
        start,
        end,
    };

    let rates = rates.filter(|r| !r.is_empty()).ok_or_else(no_data)?;

    let mut points = Vec::with_capacity(rates.len());
    for (key, quotes) in rates {
        let date = parse_rate_date(&key).map_err(|e| FxError::UpstreamUnavailable {
            to: to.to_string(),
            start,
            end,
            reason: format!("invalid date key {key:?}: {e}"),
        })?;

        if date < start || date > end {
            debug!(%date, "dropping rate outside requested range");
            continue;
        }

        points.push(RatePoint {
            date,
            value: quotes.get(to).copied(),
        });
    }

    if points.is_empty() {
        return Err(no_data());
    }

    points.sort_by_key(|p| p.date);
    Ok(RateSeries::new(to, points))
}
