use axum::response::Response;
use chrono::{NaiveDate, NaiveDateTime};
use serde_json::Value;

use crate::workflows::collaboration::WorkAssignment;

pub(super) fn assignment(
    employee_id: i64,
    project_id: i64,
    date_from: &str,
    date_to: &str,
) -> WorkAssignment {
    WorkAssignment::new(
        employee_id.to_string(),
        project_id.to_string(),
        date_from,
        date_to,
    )
}

pub(super) fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

pub(super) fn midnight(year: i32, month: u32, day: u32) -> NaiveDateTime {
    date(year, month, day)
        .and_hms_opt(0, 0, 0)
        .expect("valid time")
}

/// Fixed analysis instant so open-ended assignments resolve reproducibly.
pub(super) fn fixed_now() -> NaiveDateTime {
    midnight(2024, 3, 1)
}

/// Scenario used across suites: two employees share project 100 for five days.
pub(super) fn shared_project_records() -> Vec<WorkAssignment> {
    vec![
        assignment(1, 100, "2023-01-01", "2023-01-10"),
        assignment(2, 100, "2023-01-05", "2023-01-15"),
    ]
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
