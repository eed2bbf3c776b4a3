// SPDX-FileCopyrightText: 2025 Joost van der Laan <joost@fashionunited.com>
//
// SPDX-License-Identifier: AGPL-3.0-only

use chrono::NaiveDate;
use thiserror::Error;

/// Failures of the rate fetcher and of add-in parameter extraction.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FxError {
    #[error("unable to load data for {to}, {start}, {end}: {reason}")]
    UpstreamUnavailable {
        to: String,
        start: NaiveDate,
        end: NaiveDate,
        reason: String,
    },

    #[error("no data for EUR/{to}, {start}, {end}")]
    NoDataForRange {
        to: String,
        start: NaiveDate,
        end: NaiveDate,
    },

    #[error("invalid input: {0}")]
    InvalidInput(String),
}

impl FxError {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }
}
