// SPDX-FileCopyrightText: 2025 Joost van der Laan <joost@fashionunited.com>
//
// SPDX-License-Identifier: AGPL-3.0-only

//! Relay between the ECB reference rates published by Frankfurter and a
//! spreadsheet add-in that expects column-oriented tables.

pub mod api;
pub mod config;
pub mod error;
pub mod exchange_rates;
pub mod models;
pub mod server;

pub use error::FxError;
