use super::date_format::DateFormat;
use super::domain::{PairResult, SkippedAssignment, WorkAssignment};
use super::engine::{self, PairAnalysis};
use super::projection::{project, ProjectRow};
use super::validation::{validate_all, ValidationError};
use chrono::NaiveDateTime;
use serde::Serialize;
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PairSummary {
    pub employee_id_low: i64,
    pub employee_id_high: i64,
    pub total_overlap_days: u64,
}

impl From<&PairResult> for PairSummary {
    fn from(result: &PairResult) -> Self {
        Self {
            employee_id_low: result.employee_id_low,
            employee_id_high: result.employee_id_high,
            total_overlap_days: result.total_overlap_days,
        }
    }
}

/// Everything a renderer needs from one analysis run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PairReport {
    pub date_format: DateFormat,
    /// The instant open-ended assignments were resolved to.
    pub evaluated_at: NaiveDateTime,
    pub best_pair: Option<PairSummary>,
    pub rows: Vec<ProjectRow>,
    pub skipped: Vec<SkippedAssignment>,
}

/// Runs validation, pairing and projection for a single date format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PairAnalyzer {
    format: DateFormat,
}

impl PairAnalyzer {
    pub fn new(format: DateFormat) -> Self {
        Self { format }
    }

    pub fn format(&self) -> DateFormat {
        self.format
    }

    /// Rejects the whole batch if any date field is malformed; otherwise reports the
    /// best pair (if any), its display rows and the records skipped during grouping.
    pub fn analyze(
        &self,
        records: &[WorkAssignment],
        now: NaiveDateTime,
    ) -> Result<PairReport, ValidationError> {
        info!(records = records.len(), format = %self.format, %now, "analyzing work assignments");

        validate_all(records, self.format).map_err(|err| {
            warn!(%err, "rejecting work assignment batch");
            err
        })?;

        let PairAnalysis { best_pair, skipped } = engine::analyze(records, self.format, now);
        let rows = best_pair.as_ref().map(project).unwrap_or_default();

        match &best_pair {
            Some(pair) => info!(
                employee_low = pair.employee_id_low,
                employee_high = pair.employee_id_high,
                total_days = pair.total_overlap_days,
                projects = rows.len(),
                "longest working pair found"
            ),
            None => info!("no overlapping pair found"),
        }

        Ok(PairReport {
            date_format: self.format,
            evaluated_at: now,
            best_pair: best_pair.as_ref().map(PairSummary::from),
            rows,
            skipped,
        })
    }
}
