use super::domain::PairResult;
use chrono::NaiveDateTime;
use serde::Serialize;

/// Display row for one shared project of the winning pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectRow {
    /// 1-based position in the pair's overlap list.
    pub sequential_id: usize,
    pub employee_id_low: i64,
    pub employee_id_high: i64,
    pub project_id: i64,
    pub days_worked: u64,
    pub overlap_start: NaiveDateTime,
    pub overlap_end: NaiveDateTime,
}

pub fn project(result: &PairResult) -> Vec<ProjectRow> {
    result
        .overlaps
        .iter()
        .enumerate()
        .map(|(index, overlap)| ProjectRow {
            sequential_id: index + 1,
            employee_id_low: result.employee_id_low,
            employee_id_high: result.employee_id_high,
            project_id: overlap.project_id,
            days_worked: overlap.overlap_days,
            overlap_start: overlap.overlap_start,
            overlap_end: overlap.overlap_end,
        })
        .collect()
}
