//! The textual forms a fixture row is made of.
//!
//! Every field is written twice: as a bracketed, comma-separated list and as standard padded
//! Base64 of the same bytes. Integers use native byte order, except the report type, which is
//! written big-endian. The last column is the composite token: the Base64 forms of all eight
//! fields, each followed by `.`, Base64-encoded once more.

use std::fmt::Display;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::{Deserialize, Serialize};

use crate::fixture::{DiagnosisKeyFixture, ORIGIN, REPORT_TYPE};

pub const LIST_SEPARATOR: &str = ",";
pub const COMPOSITE_SEPARATOR: char = '.';

#[must_use]
pub fn joined<T: Display>(items: impl IntoIterator<Item = T>) -> String {
    items
        .into_iter()
        .map(|item| ToString::to_string(&item))
        .collect::<Vec<_>>()
        .join(LIST_SEPARATOR)
}

#[must_use]
pub fn bracketed<T: Display>(items: impl IntoIterator<Item = T>) -> String {
    format!("[{}]", joined(items))
}

#[must_use]
pub fn to_base64(bytes: impl AsRef<[u8]>) -> String {
    STANDARD.encode(bytes)
}

/// Base64 of the `.`-terminated concatenation of `segments`.
#[must_use]
pub fn composite<'a>(segments: impl IntoIterator<Item = &'a str>) -> String {
    let mut text = String::new();
    for segment in segments {
        text.push_str(segment);
        text.push(COMPOSITE_SEPARATOR);
    }
    to_base64(text)
}

/// The bracketed and Base64 forms of one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedField {
    pub bracketed: String,
    pub base64: String,
}

impl EncodedField {
    #[must_use]
    pub fn from_bytes(bytes: &[u8]) -> Self {
        EncodedField {
            bracketed: bracketed(bytes),
            base64: to_base64(bytes),
        }
    }

    /// Text items are Base64-encoded from their comma-joined ASCII, so `"DE".chars()` yields
    /// `[D,E]` and the Base64 of `D,E`.
    #[must_use]
    pub fn from_items<T: Display>(items: impl IntoIterator<Item = T>) -> Self {
        let text = joined(items);
        EncodedField {
            base64: to_base64(&text),
            bracketed: format!("[{}]", text),
        }
    }
}

/// One output row, in column order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixtureLine {
    pub key_data: String,
    pub key_data_base64: String,
    pub rolling_start_interval_number: String,
    pub rolling_start_interval_number_base64: String,
    pub rolling_period: String,
    pub rolling_period_base64: String,
    pub transmission_risk_level: String,
    pub transmission_risk_level_base64: String,
    pub visited_countries: String,
    pub visited_countries_base64: String,
    pub origin: String,
    pub origin_base64: String,
    pub report_type: String,
    pub report_type_base64: String,
    pub days_since_onset_of_symptoms: String,
    pub days_since_onset_of_symptoms_base64: String,
    pub composite: String,
}

pub const FIXTURE_LINE_COLUMNS: usize = 17;

impl FixtureLine {
    #[must_use]
    pub fn from_fields(fields: [EncodedField; 8]) -> Self {
        let composite = composite(fields.iter().map(|field| field.base64.as_str()));
        let [
            key_data,
            rolling_start_interval_number,
            rolling_period,
            transmission_risk_level,
            visited_countries,
            origin,
            report_type,
            days_since_onset_of_symptoms,
        ] = fields;
        FixtureLine {
            key_data: key_data.bracketed,
            key_data_base64: key_data.base64,
            rolling_start_interval_number: rolling_start_interval_number.bracketed,
            rolling_start_interval_number_base64: rolling_start_interval_number.base64,
            rolling_period: rolling_period.bracketed,
            rolling_period_base64: rolling_period.base64,
            transmission_risk_level: transmission_risk_level.bracketed,
            transmission_risk_level_base64: transmission_risk_level.base64,
            visited_countries: visited_countries.bracketed,
            visited_countries_base64: visited_countries.base64,
            origin: origin.bracketed,
            origin_base64: origin.base64,
            report_type: report_type.bracketed,
            report_type_base64: report_type.base64,
            days_since_onset_of_symptoms: days_since_onset_of_symptoms.bracketed,
            days_since_onset_of_symptoms_base64: days_since_onset_of_symptoms.base64,
            composite,
        }
    }
}

impl From<&DiagnosisKeyFixture> for FixtureLine {
    fn from(fixture: &DiagnosisKeyFixture) -> Self {
        FixtureLine::from_fields([
            EncodedField::from_bytes(&fixture.key_data),
            EncodedField::from_bytes(&fixture.rolling_start_interval_number.to_ne_bytes()),
            EncodedField::from_bytes(&fixture.rolling_period.to_ne_bytes()),
            EncodedField::from_bytes(&fixture.transmission_risk_level.to_ne_bytes()),
            EncodedField::from_items(&fixture.visited_countries),
            EncodedField::from_items(ORIGIN.chars()),
            EncodedField::from_bytes(&REPORT_TYPE.to_be_bytes()),
            EncodedField::from_bytes(&fixture.days_since_onset_of_symptoms.to_ne_bytes()),
        ])
    }
}
