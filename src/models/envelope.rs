// SPDX-FileCopyrightText: 2025 Joost van der Laan <joost@fashionunited.com>
//
// SPDX-License-Identifier: AGPL-3.0-only

//! Wire format of the spreadsheet add-in.
//!
//! A rate table request looks like:
//!
//! ```json
//! {
//!   "data": {
//!     "namespace": "ECB.FX",
//!     "payload": {
//!       "to": [{"value": "USD"}],
//!       "start_date": [{"value": "2023-01-01 00:00:00"}],
//!       "end_date": [{"value": "2023-01-03 00:00:00"}]
//!     }
//!   }
//! }
//! ```

use crate::error::FxError;
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Timestamp format the add-in uses for date cells.
pub const ADDIN_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A request body kept as raw JSON so `data.namespace` can be checked before
/// `data.payload` is given a type.
#[derive(Debug, Clone)]
pub struct RequestEnvelope {
    body: Value,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RateTablePayload {
    #[serde(default)]
    pub to: Option<Vec<Cell>>,
    #[serde(default)]
    pub start_date: Option<Vec<Cell>>,
    #[serde(default)]
    pub end_date: Option<Vec<Cell>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cell {
    pub value: String,
}

/// The three cell lists of a payload once all of them are known to be present.
#[derive(Debug, Clone)]
pub struct RateTableCells {
    pub to: Vec<Cell>,
    pub start_date: Vec<Cell>,
    pub end_date: Vec<Cell>,
}

/// Parameters extracted from the cells, ready for the rate fetcher.
#[derive(Debug, Clone, PartialEq)]
pub struct RateTableRequest {
    pub to: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl RequestEnvelope {
    pub fn from_slice(body: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(body).map(|body| Self { body })
    }

    pub fn namespace(&self) -> Option<&str> {
        self.body.pointer("/data/namespace")?.as_str()
    }

    /// Types `data.payload`; `Ok(None)` when it is absent or `null`.
    pub fn into_payload(mut self) -> Result<Option<RateTablePayload>, serde_json::Error> {
        match self.body.pointer_mut("/data/payload").map(Value::take) {
            None | Some(Value::Null) => Ok(None),
            Some(payload) => serde_json::from_value(payload).map(Some),
        }
    }
}

impl RateTablePayload {
    /// Returns the cell lists, or `None` if any of the keys is absent.
    pub fn into_cells(self) -> Option<RateTableCells> {
        Some(RateTableCells {
            to: self.to?,
            start_date: self.start_date?,
            end_date: self.end_date?,
        })
    }
}

impl RateTableCells {
    pub fn into_request(self) -> Result<RateTableRequest, FxError> {
        let start = parse_addin_timestamp(first_value("start_date", &self.start_date)?)?;
        let end = parse_addin_timestamp(first_value("end_date", &self.end_date)?)?;
        let to = first_value("to", &self.to)?.to_string();
        Ok(RateTableRequest { to, start, end })
    }
}

fn first_value<'a>(name: &str, cells: &'a [Cell]) -> Result<&'a str, FxError> {
    cells
        .first()
        .map(|cell| cell.value.as_str())
        .ok_or_else(|| FxError::invalid_input(format!("{name} has no value")))
}

/// Parses an add-in date cell and keeps only its calendar date.
pub fn parse_addin_timestamp(value: &str) -> Result<NaiveDate, FxError> {
    NaiveDateTime::parse_from_str(value, ADDIN_TIMESTAMP_FORMAT)
        .map(|ts| ts.date())
        .map_err(|e| {
            FxError::invalid_input(format!(
                "time data {value:?} does not match format {ADDIN_TIMESTAMP_FORMAT:?}: {e}"
            ))
        })
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    pub error: ErrorBody,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

/// Connectivity probe answer, shaped like a one-cell table in column `A`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EchoResponse {
    pub data: EchoData,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EchoData {
    #[serde(rename = "A")]
    pub a: BTreeMap<usize, NaiveDateTime>,
}

impl EchoResponse {
    pub fn at(timestamp: NaiveDateTime) -> Self {
        Self {
            data: EchoData {
                a: BTreeMap::from([(0, timestamp)]),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn envelope(value: Value) -> RequestEnvelope {
        RequestEnvelope::from_slice(&serde_json::to_vec(&value).unwrap()).unwrap()
    }

    #[test]
    fn test_parse_addin_timestamp_keeps_date() {
        let date = parse_addin_timestamp("2023-12-27 16:51:36").unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2023, 12, 27).unwrap());
    }

    #[test]
    fn test_parse_addin_timestamp_rejects_iso_format() {
        let err = parse_addin_timestamp("2023-12-27T16:51:36.626Z").unwrap_err();
        match err {
            FxError::InvalidInput(msg) => assert!(msg.contains("2023-12-27T16:51:36.626Z")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_cells_require_all_keys() {
        let missing_end = envelope(json!({
            "data": {
                "namespace": "ECB.FX",
                "payload": {
                    "to": [{"value": "USD"}],
                    "start_date": [{"value": "2023-01-01 00:00:00"}]
                }
            }
        }));
        assert_eq!(missing_end.namespace(), Some("ECB.FX"));
        let payload = missing_end.into_payload().unwrap().unwrap();
        assert!(payload.into_cells().is_none());

        let no_payload = envelope(json!({"data": {"namespace": "ECB.FX"}}));
        assert!(no_payload.into_payload().unwrap().is_none());

        let null_payload = envelope(json!({"data": {"namespace": "ECB.FX", "payload": null}}));
        assert!(null_payload.into_payload().unwrap().is_none());
    }

    #[test]
    fn test_namespace_ignores_malformed_payload() {
        let body = envelope(json!({"data": {"namespace": "FF.FX", "payload": {"to": "USD"}}}));
        assert_eq!(body.namespace(), Some("FF.FX"));
        assert!(body.into_payload().is_err());

        let numeric = envelope(json!({"data": {"namespace": 5}}));
        assert_eq!(numeric.namespace(), None);
    }

    #[test]
    fn test_non_json_body_is_rejected() {
        assert!(RequestEnvelope::from_slice(b"not json").is_err());
    }

    #[test]
    fn test_into_request() {
        let request = envelope(json!({
            "data": {
                "namespace": "ECB.FX",
                "payload": {
                    "to": [{"value": "usd"}],
                    "start_date": [{"value": "2023-01-01 00:00:00"}],
                    "end_date": [{"value": "2023-01-03 12:30:00"}]
                }
            }
        }))
        .into_payload()
        .unwrap()
        .and_then(RateTablePayload::into_cells)
        .unwrap()
        .into_request()
        .unwrap();

        assert_eq!(request.to, "usd");
        assert_eq!(request.start, NaiveDate::from_ymd_opt(2023, 1, 1).unwrap());
        assert_eq!(request.end, NaiveDate::from_ymd_opt(2023, 1, 3).unwrap());
    }

    #[test]
    fn test_empty_cell_list_is_invalid_input() {
        let cells = RateTableCells {
            to: Vec::new(),
            start_date: vec![Cell { value: "2023-01-01 00:00:00".to_string() }],
            end_date: vec![Cell { value: "2023-01-03 00:00:00".to_string() }],
        };
        assert_eq!(
            cells.into_request().unwrap_err(),
            FxError::InvalidInput("to has no value".to_string())
        );
    }

    #[test]
    fn test_error_envelope_omits_missing_detail() {
        let body = ErrorEnvelope {
            error: ErrorBody {
                message: "invalid namespace".to_string(),
                detail: None,
            },
        };
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            json!({"error": {"message": "invalid namespace"}})
        );
    }
}
