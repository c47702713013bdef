use crate::workflows::collaboration::{WorkAssignment, OPEN_ENDED_MARKER};
use serde::Serialize;
use std::io::Read;
use tracing::{debug, warn};

const REQUIRED_FIELDS: usize = 4;

/// Rows accepted from an assignment export plus the ones that were turned away.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct AssignmentImport {
    pub assignments: Vec<WorkAssignment>,
    pub skipped: Vec<SkippedRow>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedRow {
    /// 1-based line in the source text.
    pub line: u64,
    pub reason: RowSkipReason,
    pub fields: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RowSkipReason {
    NonNumericEmployeeId,
    NonNumericProjectId,
    MissingDateFrom,
}

impl RowSkipReason {
    pub const fn label(self) -> &'static str {
        match self {
            Self::NonNumericEmployeeId => "employee id is not numeric",
            Self::NonNumericProjectId => "project id is not numeric",
            Self::MissingDateFrom => "date from is empty",
        }
    }
}

pub(crate) fn parse_rows<R: Read>(reader: R) -> Result<AssignmentImport, csv::Error> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut import = AssignmentImport::default();

    for record in csv_reader.records() {
        let record = record?;
        let line = record.position().map(|pos| pos.line()).unwrap_or_default();

        if record.len() < REQUIRED_FIELDS {
            debug!(line, fields = record.len(), "ignoring short assignment row");
            continue;
        }

        let employee_id = record[0].trim_start_matches('\u{feff}');
        let project_id = &record[1];
        let date_from = &record[2];
        let date_to = match &record[3] {
            "" => OPEN_ENDED_MARKER,
            value => value,
        };

        let rejection = if !is_integer(employee_id) {
            Some(RowSkipReason::NonNumericEmployeeId)
        } else if !is_integer(project_id) {
            Some(RowSkipReason::NonNumericProjectId)
        } else if date_from.is_empty() {
            Some(RowSkipReason::MissingDateFrom)
        } else {
            None
        };

        match rejection {
            Some(reason) => {
                warn!(line, reason = reason.label(), "skipping assignment row");
                import.skipped.push(SkippedRow {
                    line,
                    reason,
                    fields: record.iter().map(str::to_string).collect(),
                });
            }
            None => import.assignments.push(WorkAssignment::new(
                employee_id,
                project_id,
                date_from,
                date_to,
            )),
        }
    }

    Ok(import)
}

fn is_integer(value: &str) -> bool {
    value.parse::<i64>().is_ok()
}
