use crate::infra::parse_date_format;
use chrono::{Local, NaiveDateTime};
use clap::Args;
use employee_pairs::config::AppConfig;
use employee_pairs::error::AppError;
use employee_pairs::telemetry;
use employee_pairs::workflows::assignments::{AssignmentImporter, SkippedRow};
use employee_pairs::workflows::collaboration::{
    parse_timestamp, AnalyzeResponse, DateFormat, PairAnalyzer, PairReport,
};
use std::fmt::Write as _;
use std::io::Write as _;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub(crate) struct AnalyzeArgs {
    /// CSV export with `employee,project,date_from,date_to` rows
    #[arg(long)]
    pub(crate) csv: PathBuf,
    /// Date format of the file (defaults to APP_DATE_FORMAT, then YYYY-MM-DD)
    #[arg(long, value_parser = parse_date_format)]
    pub(crate) date_format: Option<DateFormat>,
    /// Instant used for open-ended assignments (defaults to now)
    #[arg(long, value_parser = parse_timestamp)]
    pub(crate) now: Option<NaiveDateTime>,
    /// Print the full report as JSON instead of a table
    #[arg(long)]
    pub(crate) json: bool,
}

pub(crate) fn run_analyze(args: AnalyzeArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;

    let AnalyzeArgs {
        csv,
        date_format,
        now,
        json,
    } = args;

    let format = date_format.unwrap_or(config.analysis.default_date_format);
    let now = now.unwrap_or_else(|| Local::now().naive_local());
    let response = analyze_file(csv, format, now)?;

    let mut stdout = std::io::stdout().lock();
    if json {
        serde_json::to_writer_pretty(&mut stdout, &response).map_err(std::io::Error::from)?;
        writeln!(stdout)?;
    } else {
        write!(stdout, "{}", render_table(&response))?;
    }

    Ok(())
}

pub(crate) fn run_formats() -> Result<(), AppError> {
    let mut stdout = std::io::stdout().lock();
    for format in DateFormat::supported() {
        writeln!(stdout, "{format}")?;
    }
    Ok(())
}

pub(crate) fn analyze_file(
    path: PathBuf,
    format: DateFormat,
    now: NaiveDateTime,
) -> Result<AnalyzeResponse, AppError> {
    let import = AssignmentImporter::from_path(path)?;
    let report = PairAnalyzer::new(format).analyze(&import.assignments, now)?;
    Ok(AnalyzeResponse {
        report,
        import_skipped: import.skipped,
    })
}

pub(crate) fn render_table(response: &AnalyzeResponse) -> String {
    let mut out = String::new();
    let report = &response.report;

    let _ = writeln!(
        out,
        "Date format {} | open-ended assignments end {}",
        report.date_format, report.evaluated_at
    );

    match &report.best_pair {
        None => {
            let _ = writeln!(out, "No overlapping pair found");
        }
        Some(pair) => {
            let _ = writeln!(
                out,
                "Longest working pair: {} and {} ({} days)",
                pair.employee_id_low, pair.employee_id_high, pair.total_overlap_days
            );
            let _ = writeln!(out);
            let _ = writeln!(
                out,
                "{:<4} {:>12} {:>12} {:>10} {:>11}  Window",
                "#", "Employee #1", "Employee #2", "Project", "Days worked"
            );
            for row in &report.rows {
                let _ = writeln!(
                    out,
                    "{:<4} {:>12} {:>12} {:>10} {:>11}  {} -> {}",
                    row.sequential_id,
                    row.employee_id_low,
                    row.employee_id_high,
                    row.project_id,
                    row.days_worked,
                    report.date_format.render(row.overlap_start.date()),
                    report.date_format.render(row.overlap_end.date()),
                );
            }
        }
    }

    render_skips(&mut out, report, &response.import_skipped);
    out
}

fn render_skips(out: &mut String, report: &PairReport, import_skipped: &[SkippedRow]) {
    if import_skipped.is_empty() && report.skipped.is_empty() {
        return;
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "Skipped rows");
    for row in import_skipped {
        let _ = writeln!(
            out,
            "- line {}: {} ({})",
            row.line,
            row.reason.label(),
            row.fields.join(",")
        );
    }
    for skipped in &report.skipped {
        let _ = writeln!(
            out,
            "- record {}: {} ({})",
            skipped.row,
            skipped.reason.label(),
            skipped.detail
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use employee_pairs::workflows::collaboration::WorkAssignment;
    use std::path::Path;

    fn fixed_now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 1)
            .expect("valid date")
            .and_hms_opt(0, 0, 0)
            .expect("valid time")
    }

    fn fixture() -> PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("../../crates/employee-pairs/fixtures/assignments.csv")
    }

    #[test]
    fn analyze_file_reports_pair_and_header_skip() {
        let response =
            analyze_file(fixture(), DateFormat::YearMonthDayDash, fixed_now()).expect("analysis runs");

        let pair = response.report.best_pair.expect("pair found");
        assert_eq!((pair.employee_id_low, pair.employee_id_high), (143, 301));
        assert_eq!(response.import_skipped.len(), 1);
        assert_eq!(response.import_skipped[0].line, 1);
    }

    #[test]
    fn analyze_file_rejects_mismatched_format() {
        let error = analyze_file(fixture(), DateFormat::DayMonthYearDot, fixed_now())
            .expect_err("dash dates do not match");
        assert!(matches!(error, AppError::Validation(_)));
    }

    #[test]
    fn table_lists_rows_in_the_selected_format() {
        let response =
            analyze_file(fixture(), DateFormat::YearMonthDayDash, fixed_now()).expect("analysis runs");
        let table = render_table(&response);

        assert!(table.contains("Longest working pair: 143 and 301 (181 days)"));
        assert!(table.contains("2013-11-01 -> 2014-01-05"));
        assert!(table.contains("2011-01-01 -> 2011-04-27"));
        assert!(table.contains("- line 1: employee id is not numeric"));
    }

    #[test]
    fn table_says_when_no_pair_overlaps() {
        let records = vec![
            WorkAssignment::new("1", "100", "2023-01-01", "2023-01-10"),
            WorkAssignment::new("2", "200", "2023-01-01", "2023-01-10"),
        ];
        let report = PairAnalyzer::new(DateFormat::YearMonthDayDash)
            .analyze(&records, fixed_now())
            .expect("dates are valid");
        let table = render_table(&AnalyzeResponse {
            report,
            import_skipped: Vec::new(),
        });

        assert!(table.contains("No overlapping pair found"));
        assert!(!table.contains("Skipped rows"));
    }
}
