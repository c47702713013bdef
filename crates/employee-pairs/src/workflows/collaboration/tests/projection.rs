use super::common::*;
use crate::workflows::collaboration::domain::{PairResult, ProjectOverlap};
use crate::workflows::collaboration::projection::{project, ProjectRow};

fn overlap(project_id: i64, days: u64) -> ProjectOverlap {
    ProjectOverlap {
        project_id,
        overlap_days: days,
        overlap_start: midnight(2023, 1, 1),
        overlap_end: midnight(2023, 1, 1) + chrono::Duration::days(days as i64),
    }
}

#[test]
fn rows_are_numbered_from_one_in_overlap_order() {
    let result = PairResult {
        employee_id_low: 3,
        employee_id_high: 8,
        total_overlap_days: 12,
        overlaps: vec![overlap(300, 7), overlap(100, 0), overlap(300, 5)],
    };

    let rows = project(&result);

    let summary: Vec<(usize, i64, u64)> = rows
        .iter()
        .map(|row| (row.sequential_id, row.project_id, row.days_worked))
        .collect();
    assert_eq!(summary, vec![(1, 300, 7), (2, 100, 0), (3, 300, 5)]);
    assert_eq!(
        rows[0],
        ProjectRow {
            sequential_id: 1,
            employee_id_low: 3,
            employee_id_high: 8,
            project_id: 300,
            days_worked: 7,
            overlap_start: midnight(2023, 1, 1),
            overlap_end: midnight(2023, 1, 8),
        }
    );
    assert!(rows
        .iter()
        .all(|row| row.employee_id_low == 3 && row.employee_id_high == 8));
}

#[test]
fn empty_overlap_list_projects_to_no_rows() {
    let result = PairResult {
        employee_id_low: 1,
        employee_id_high: 2,
        total_overlap_days: 0,
        overlaps: Vec::new(),
    };

    assert!(project(&result).is_empty());
}
