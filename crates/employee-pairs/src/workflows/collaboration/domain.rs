use chrono::NaiveDateTime;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Marker stored in `date_to` when an assignment has no recorded end.
pub const OPEN_ENDED_MARKER: &str = "NULL";

/// One employee/project/date-range record as supplied by ingestion.
///
/// Ids stay textual here: callers only guarantee they are present, and the
/// engine decides whether they coerce to integers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkAssignment {
    #[serde(deserialize_with = "deserialize_id_text")]
    pub employee_id: String,
    #[serde(deserialize_with = "deserialize_id_text")]
    pub project_id: String,
    pub date_from: String,
    #[serde(default = "open_ended_marker", deserialize_with = "deserialize_date_to")]
    pub date_to: String,
}

impl WorkAssignment {
    pub fn new(
        employee_id: impl Into<String>,
        project_id: impl Into<String>,
        date_from: impl Into<String>,
        date_to: impl Into<String>,
    ) -> Self {
        Self {
            employee_id: employee_id.into(),
            project_id: project_id.into(),
            date_from: date_from.into(),
            date_to: date_to.into(),
        }
    }

    pub fn date_field(&self, field: DateField) -> &str {
        match field {
            DateField::DateFrom => &self.date_from,
            DateField::DateTo => &self.date_to,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DateField {
    DateFrom,
    DateTo,
}

impl DateField {
    pub const fn ordered() -> [Self; 2] {
        [Self::DateFrom, Self::DateTo]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::DateFrom => "date_from",
            Self::DateTo => "date_to",
        }
    }
}

impl fmt::Display for DateField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// An assignment whose ids and dates have been coerced for one analysis run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedTimeEntry {
    pub employee_id: i64,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

/// Unordered employee pair in canonical form, smaller id first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PairKey {
    low: i64,
    high: i64,
}

impl PairKey {
    /// Returns `None` for a self-pair.
    pub fn new(a: i64, b: i64) -> Option<Self> {
        match a.cmp(&b) {
            std::cmp::Ordering::Less => Some(Self { low: a, high: b }),
            std::cmp::Ordering::Greater => Some(Self { low: b, high: a }),
            std::cmp::Ordering::Equal => None,
        }
    }

    pub const fn low(self) -> i64 {
        self.low
    }

    pub const fn high(self) -> i64 {
        self.high
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectOverlap {
    pub project_id: i64,
    pub overlap_days: u64,
    pub overlap_start: NaiveDateTime,
    pub overlap_end: NaiveDateTime,
}

/// The winning pair and every overlap window that contributed to its total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PairResult {
    pub employee_id_low: i64,
    pub employee_id_high: i64,
    pub total_overlap_days: u64,
    pub overlaps: Vec<ProjectOverlap>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    InvalidEmployeeId,
    InvalidProjectId,
    MissingStartDate,
    InvalidStartDate,
    InvalidEndDate,
}

impl SkipReason {
    pub const fn label(self) -> &'static str {
        match self {
            Self::InvalidEmployeeId => "employee id is not an integer",
            Self::InvalidProjectId => "project id is not an integer",
            Self::MissingStartDate => "start date is missing",
            Self::InvalidStartDate => "start date could not be parsed",
            Self::InvalidEndDate => "end date could not be parsed",
        }
    }
}

/// A record left out of grouping without aborting the run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedAssignment {
    /// Zero-based position in the analyzed record sequence.
    pub row: usize,
    pub reason: SkipReason,
    pub detail: String,
}

fn open_ended_marker() -> String {
    OPEN_ENDED_MARKER.to_string()
}

#[derive(Deserialize)]
#[serde(untagged)]
enum IdText {
    Integer(i64),
    Text(String),
}

fn deserialize_id_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match IdText::deserialize(deserializer)? {
        IdText::Integer(value) => value.to_string(),
        IdText::Text(value) => value,
    })
}

fn deserialize_date_to<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt
        .filter(|value| !value.trim().is_empty())
        .unwrap_or_else(open_ended_marker))
}
