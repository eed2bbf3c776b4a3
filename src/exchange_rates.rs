// SPDX-FileCopyrightText: 2025 Joost van der Laan
// SPDX-License-Identifier: AGPL-3.0-only

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use csv::Writer;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::api::RateSource;
use crate::models::{format_rate_date, RateSeries};

/// Fetch one rate series and export it to CSV.
///
/// Without an explicit `output`, the file goes to
/// `output/rates_{CODE}_{start}_{end}_{timestamp}.csv`.
pub async fn export_rate_series_csv(
    source: &dyn RateSource,
    to: &str,
    start: NaiveDate,
    end: NaiveDate,
    output: Option<&Path>,
) -> Result<PathBuf> {
    let series = source
        .fetch(to, start, end)
        .await
        .with_context(|| format!("Failed to fetch rates for {to}"))?;

    let path = match output {
        Some(path) => path.to_path_buf(),
        None => {
            let output_dir = PathBuf::from("output");
            fs::create_dir_all(&output_dir)?;
            let timestamp = Local::now().format("%Y%m%d_%H%M%S");
            output_dir.join(format!(
                "rates_{}_{}_{}_{}.csv",
                series.to,
                format_rate_date(start),
                format_rate_date(end),
                timestamp
            ))
        }
    };

    let file = fs::File::create(&path)
        .with_context(|| format!("Failed to create {}", path.display()))?;
    write_series_csv(&series, file)?;

    info!(rows = series.len(), path = %path.display(), "rate series written");
    Ok(path)
}

/// Writes `Date,Value` rows; dates without a quote get an empty value.
pub fn write_series_csv<W: io::Write>(series: &RateSeries, out: W) -> Result<()> {
    let mut writer = Writer::from_writer(out);
    writer.write_record(["Date", "Value"])?;

    for point in series.iter() {
        writer.write_record([
            format_rate_date(point.date),
            point.value.map_or_else(String::new, |v| v.to_string()),
        ])?;
    }

    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::MockRateSource;
    use crate::error::FxError;
    use crate::models::RatePoint;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2023, 1, d).unwrap()
    }

    fn sample_series() -> RateSeries {
        RateSeries::new(
            "USD",
            vec![
                RatePoint { date: day(2), value: Some(1.0683) },
                RatePoint { date: day(3), value: None },
            ],
        )
    }

    #[test]
    fn test_write_series_csv() -> Result<()> {
        let mut buf = Vec::new();
        write_series_csv(&sample_series(), &mut buf)?;
        assert_eq!(
            String::from_utf8(buf)?,
            "Date,Value\n2023-01-02,1.0683\n2023-01-03,\n"
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_export_to_explicit_path() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("usd.csv");

        let mut source = MockRateSource::new();
        source
            .expect_fetch()
            .times(1)
            .returning(|_, _, _| Ok(sample_series()));

        let written = export_rate_series_csv(&source, "USD", day(1), day(3), Some(&path)).await?;
        assert_eq!(written, path);

        let contents = fs::read_to_string(&path)?;
        assert!(contents.starts_with("Date,Value\n"));
        assert_eq!(contents.lines().count(), 3);
        Ok(())
    }

    #[tokio::test]
    async fn test_export_fails_without_data() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("empty.csv");

        let mut source = MockRateSource::new();
        source.expect_fetch().returning(|to, start, end| {
            Err(FxError::NoDataForRange {
                to: to.to_string(),
                start,
                end,
            })
        });

        let err = export_rate_series_csv(&source, "USD", day(1), day(1), Some(&path))
            .await
            .unwrap_err();
        assert!(format!("{err:#}").contains("no data for EUR/USD"));
        assert!(!path.exists());
        Ok(())
    }
}
