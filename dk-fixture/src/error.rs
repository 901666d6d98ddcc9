use std::io;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum FixtureError {
    #[error("CSV Error")]
    CsvError(#[from] csv::Error),
    #[error("I/O Error")]
    IoError(#[from] io::Error),
    #[error("Invalid Base64 data")]
    Base64Error(#[from] base64::DecodeError),
    #[error("The region catalog is empty")]
    EmptyRegionCatalog,
    #[error("Cannot draw a random integer from the empty range {min}..{max_exclusive}")]
    EmptyRange { min: i32, max_exclusive: i32 },
    #[error("No region catalog entry at index {0}")]
    RegionIndexOutOfRange(usize),
    #[error("`{0}` is not a two-letter region code")]
    InvalidRegionCode(String),
    #[error("Expected 17 columns, found {0}")]
    ColumnCount(usize),
    #[error("Region catalog of {0} entries is too large to draw from")]
    RegionCatalogTooLarge(usize),
    #[error("Malformed bracketed list `{0}`")]
    MalformedBracketList(String),
    #[error("Bracketed and Base64 forms of `{field}` disagree")]
    FieldMismatch { field: &'static str },
    #[error("Days since onset of symptoms {0} is outside -50..=49")]
    DaysSinceOnsetOutOfRange(i32),
    #[error("Expected 10 visited countries, found {0}")]
    VisitedCountryCount(usize),
    #[error("Report type must encode to [0,0,0,1]")]
    ReportTypeMismatch,
    #[error("Composite token does not match the encoded fields")]
    CompositeMismatch,
}
