use std::fs::File;
use std::io;
use std::path::Path;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use csv::{Position, ReaderBuilder, StringRecord, Trim};
use log::{debug, warn};

use crate::encoding::{composite, to_base64, FixtureLine, FIXTURE_LINE_COLUMNS};
use crate::error::FixtureError;
use crate::fixture::{
    DAYS_SINCE_ONSET_MAX, DAYS_SINCE_ONSET_MIN, REPORT_TYPE, VISITED_COUNTRY_COUNT,
};
use crate::region::RegionCode;
use crate::sink::COLUMN_DELIMITER;

/// Splits `[a,b,c]` into its items.
///
/// # Errors
/// Errors when `text` is not wrapped in brackets
pub fn parse_bracketed(text: &str) -> Result<Vec<&str>, FixtureError> {
    let inner = text
        .strip_prefix('[')
        .and_then(|rest| rest.strip_suffix(']'))
        .ok_or_else(|| FixtureError::MalformedBracketList(text.to_owned()))?;
    if inner.is_empty() {
        return Ok(vec![]);
    }
    Ok(inner.split(',').collect())
}

/// # Errors
/// Errors when `text` is not a bracketed list of decimal byte values
pub fn parse_bracketed_bytes(text: &str) -> Result<Vec<u8>, FixtureError> {
    parse_bracketed(text)?
        .into_iter()
        .map(|item| {
            item.parse::<u8>()
                .map_err(|_| FixtureError::MalformedBracketList(text.to_owned()))
        })
        .collect()
}

fn check_base64(field: &'static str, bytes: &[u8], base64: &str) -> Result<(), FixtureError> {
    if STANDARD.decode(base64)? == bytes {
        Ok(())
    } else {
        Err(FixtureError::FieldMismatch { field })
    }
}

fn byte_field(field: &'static str, bracketed: &str, base64: &str) -> Result<Vec<u8>, FixtureError> {
    let bytes = parse_bracketed_bytes(bracketed)?;
    check_base64(field, &bytes, base64)?;
    Ok(bytes)
}

fn int_field(field: &'static str, bracketed: &str, base64: &str) -> Result<[u8; 4], FixtureError> {
    let bytes = byte_field(field, bracketed, base64)?;
    <[u8; 4]>::try_from(bytes.as_slice())
        .map_err(|_| FixtureError::MalformedBracketList(bracketed.to_owned()))
}

fn text_field<'a>(
    field: &'static str,
    bracketed: &'a str,
    base64: &str,
) -> Result<Vec<&'a str>, FixtureError> {
    let items = parse_bracketed(bracketed)?;
    check_base64(field, items.join(",").as_bytes(), base64)?;
    Ok(items)
}

impl FixtureLine {
    /// Checks that every bracketed form matches its Base64 form, that the values are in range and
    /// that the composite token covers the fields in column order.
    ///
    /// # Errors
    /// Errors on the first check that fails
    pub fn verify(&self) -> Result<(), FixtureError> {
        let key_data = byte_field("key_data", &self.key_data, &self.key_data_base64)?;
        let rolling_start_interval_number = int_field(
            "rolling_start_interval_number",
            &self.rolling_start_interval_number,
            &self.rolling_start_interval_number_base64,
        )?;
        let rolling_period = int_field(
            "rolling_period",
            &self.rolling_period,
            &self.rolling_period_base64,
        )?;
        let transmission_risk_level = int_field(
            "transmission_risk_level",
            &self.transmission_risk_level,
            &self.transmission_risk_level_base64,
        )?;
        let visited_countries = text_field(
            "visited_countries",
            &self.visited_countries,
            &self.visited_countries_base64,
        )?;
        let origin = text_field("origin", &self.origin, &self.origin_base64)?;
        let report_type = int_field("report_type", &self.report_type, &self.report_type_base64)?;
        let days_since_onset_of_symptoms = int_field(
            "days_since_onset_of_symptoms",
            &self.days_since_onset_of_symptoms,
            &self.days_since_onset_of_symptoms_base64,
        )?;

        if visited_countries.len() != VISITED_COUNTRY_COUNT {
            return Err(FixtureError::VisitedCountryCount(visited_countries.len()));
        }
        for country in &visited_countries {
            RegionCode::try_from(*country)?;
        }
        if report_type != REPORT_TYPE.to_be_bytes() {
            return Err(FixtureError::ReportTypeMismatch);
        }
        let days = i32::from_ne_bytes(days_since_onset_of_symptoms);
        if !(DAYS_SINCE_ONSET_MIN..=DAYS_SINCE_ONSET_MAX).contains(&days) {
            return Err(FixtureError::DaysSinceOnsetOutOfRange(days));
        }

        let expected = composite(
            [
                to_base64(key_data),
                to_base64(rolling_start_interval_number),
                to_base64(rolling_period),
                to_base64(transmission_risk_level),
                to_base64(visited_countries.join(",")),
                to_base64(origin.join(",")),
                to_base64(report_type),
                to_base64(days_since_onset_of_symptoms),
            ]
            .iter()
            .map(String::as_str),
        );
        if expected == self.composite {
            Ok(())
        } else {
            Err(FixtureError::CompositeMismatch)
        }
    }
}

#[derive(Debug)]
pub struct RowFailure {
    /// 1-based line number in the fixture file
    pub line: usize,
    pub error: FixtureError,
}

#[derive(Debug, Default)]
pub struct VerifyReport {
    pub rows: usize,
    pub failures: Vec<RowFailure>,
}

impl VerifyReport {
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Verifies every record read from `reader`. Blank lines are skipped but still counted in the
/// reported line numbers. Records without exactly 17 columns are recorded as failures like any
/// other.
#[must_use]
pub fn verify_reader<R: io::Read>(reader: R) -> VerifyReport {
    let mut reader = ReaderBuilder::new()
        .delimiter(COLUMN_DELIMITER)
        .has_headers(false)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(reader);

    let mut report = VerifyReport::default();
    let mut last_line = 0;
    for record in reader.records() {
        let line = match &record {
            Ok(record) => record.position().map(Position::line),
            Err(error) => error.position().map(Position::line),
        }
        .and_then(|line| usize::try_from(line).ok())
        .unwrap_or(last_line + 1);
        last_line = line;
        report.rows += 1;

        match record
            .map_err(FixtureError::from)
            .and_then(|record| verify_record(&record))
        {
            Ok(()) => debug!("Line {} verified", line),
            Err(error) => {
                warn!("Line {} failed verification: {}", line, error);
                report.failures.push(RowFailure { line, error });
            }
        }
    }
    report
}

fn verify_record(record: &StringRecord) -> Result<(), FixtureError> {
    if record.len() != FIXTURE_LINE_COLUMNS {
        return Err(FixtureError::ColumnCount(record.len()));
    }
    record.deserialize::<FixtureLine>(None)?.verify()
}

/// # Errors
/// Errors when the file cannot be opened
pub fn verify_path(path: impl AsRef<Path>) -> Result<VerifyReport, FixtureError> {
    Ok(verify_reader(File::open(path)?))
}
