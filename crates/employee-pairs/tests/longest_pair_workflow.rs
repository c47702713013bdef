use chrono::{NaiveDate, NaiveDateTime};
use employee_pairs::workflows::assignments::{AssignmentImporter, RowSkipReason};
use employee_pairs::workflows::collaboration::{
    find_best_pair, DateFormat, PairAnalyzer, ParsedDate, WorkAssignment,
};

fn evaluation_time() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 3, 1)
        .expect("valid date")
        .and_hms_opt(9, 30, 0)
        .expect("valid time")
}

fn fixture_path() -> std::path::PathBuf {
    std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/assignments.csv")
}

#[test]
fn fixture_export_finds_the_longest_working_pair() {
    let import = AssignmentImporter::from_path(fixture_path()).expect("fixture imports");
    assert_eq!(import.assignments.len(), 8);
    assert_eq!(import.skipped.len(), 1);
    assert_eq!(import.skipped[0].reason, RowSkipReason::NonNumericEmployeeId);

    let report = PairAnalyzer::new(DateFormat::YearMonthDayDash)
        .analyze(&import.assignments, evaluation_time())
        .expect("fixture dates are valid");

    let pair = report.best_pair.expect("pair found");
    assert_eq!((pair.employee_id_low, pair.employee_id_high), (143, 301));
    assert_eq!(pair.total_overlap_days, 181);

    let rows: Vec<(usize, i64, u64)> = report
        .rows
        .iter()
        .map(|row| (row.sequential_id, row.project_id, row.days_worked))
        .collect();
    assert_eq!(rows, vec![(1, 12, 65), (2, 10, 116)]);
}

#[test]
fn fixture_rewritten_in_every_format_gives_the_same_answer() {
    let data = include_bytes!("../fixtures/assignments.csv");
    let import = AssignmentImporter::from_reader(&data[..]).expect("fixture imports");
    let baseline = find_best_pair(
        &import.assignments,
        DateFormat::YearMonthDayDash,
        evaluation_time(),
    )
    .expect("pair found");

    for format in DateFormat::supported() {
        let rewrite = |text: &str| match DateFormat::YearMonthDayDash.parse(text) {
            Ok(ParsedDate::Calendar(date)) => format.render(date),
            Ok(ParsedDate::OpenEnded) => text.to_string(),
            Err(err) => panic!("fixture date {text} is invalid: {err}"),
        };
        let records: Vec<WorkAssignment> = import
            .assignments
            .iter()
            .map(|record| {
                WorkAssignment::new(
                    record.employee_id.clone(),
                    record.project_id.clone(),
                    rewrite(&record.date_from),
                    rewrite(&record.date_to),
                )
            })
            .collect();

        let result = find_best_pair(&records, format, evaluation_time());
        assert_eq!(result.as_ref(), Some(&baseline), "format {format}");
    }
}

#[test]
fn wrong_format_selection_rejects_the_fixture() {
    let data = include_bytes!("../fixtures/assignments.csv");
    let import = AssignmentImporter::from_reader(&data[..]).expect("fixture imports");

    let error = PairAnalyzer::new(DateFormat::MonthDayYearSlash)
        .analyze(&import.assignments, evaluation_time())
        .expect_err("dash dates do not match a slash format");
    assert_eq!(error.row, 0);
}
