use super::date_format::{DateFormat, DateParseError};
use super::domain::{DateField, WorkAssignment};

/// Message shown to people who supplied a file that does not match the chosen format.
pub const INVALID_DATE_FORMAT_MESSAGE: &str = "The file contains entries with invalid date format, please upload another file or choose different date format.";

/// Batch-level rejection raised before any analysis runs.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid date format: record {row} has {field} '{value}' which does not match {format}")]
pub struct ValidationError {
    pub row: usize,
    pub field: DateField,
    pub value: String,
    pub format: DateFormat,
    #[source]
    pub source: DateParseError,
}

impl ValidationError {
    pub const fn user_message(&self) -> &'static str {
        INVALID_DATE_FORMAT_MESSAGE
    }
}

/// Checks both date fields of every record, stopping at the first one that fails.
pub fn validate_all(records: &[WorkAssignment], format: DateFormat) -> Result<(), ValidationError> {
    for (row, record) in records.iter().enumerate() {
        for field in DateField::ordered() {
            let value = record.date_field(field);
            format.parse(value).map_err(|source| ValidationError {
                row,
                field,
                value: value.to_string(),
                format,
                source,
            })?;
        }
    }

    Ok(())
}
