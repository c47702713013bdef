use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Years below this are two-digit shorthand, which no supported layout allows.
const MIN_YEAR: u32 = 100;

/// Order in which the year, month and day fields appear in a literal date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldOrder {
    YearMonthDay,
    DayMonthYear,
    MonthDayYear,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Separator {
    Dash,
    Slash,
    Dot,
}

impl Separator {
    pub const fn as_char(self) -> char {
        match self {
            Self::Dash => '-',
            Self::Slash => '/',
            Self::Dot => '.',
        }
    }
}

/// The closed set of literal date layouts accepted in assignment files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum DateFormat {
    #[default]
    #[serde(rename = "YYYY-MM-DD")]
    YearMonthDayDash,
    #[serde(rename = "DD-MM-YYYY")]
    DayMonthYearDash,
    #[serde(rename = "MM-DD-YYYY")]
    MonthDayYearDash,
    #[serde(rename = "YYYY/MM/DD")]
    YearMonthDaySlash,
    #[serde(rename = "DD/MM/YYYY")]
    DayMonthYearSlash,
    #[serde(rename = "MM/DD/YYYY")]
    MonthDayYearSlash,
    #[serde(rename = "YYYY.MM.DD")]
    YearMonthDayDot,
    #[serde(rename = "DD.MM.YYYY")]
    DayMonthYearDot,
    #[serde(rename = "MM.DD.YYYY")]
    MonthDayYearDot,
}

impl DateFormat {
    pub const fn supported() -> [Self; 9] {
        [
            Self::YearMonthDayDash,
            Self::DayMonthYearDash,
            Self::MonthDayYearDash,
            Self::YearMonthDaySlash,
            Self::DayMonthYearSlash,
            Self::MonthDayYearSlash,
            Self::YearMonthDayDot,
            Self::DayMonthYearDot,
            Self::MonthDayYearDot,
        ]
    }

    pub const fn tag(self) -> &'static str {
        match self {
            Self::YearMonthDayDash => "YYYY-MM-DD",
            Self::DayMonthYearDash => "DD-MM-YYYY",
            Self::MonthDayYearDash => "MM-DD-YYYY",
            Self::YearMonthDaySlash => "YYYY/MM/DD",
            Self::DayMonthYearSlash => "DD/MM/YYYY",
            Self::MonthDayYearSlash => "MM/DD/YYYY",
            Self::YearMonthDayDot => "YYYY.MM.DD",
            Self::DayMonthYearDot => "DD.MM.YYYY",
            Self::MonthDayYearDot => "MM.DD.YYYY",
        }
    }

    pub const fn layout(self) -> (FieldOrder, Separator) {
        match self {
            Self::YearMonthDayDash => (FieldOrder::YearMonthDay, Separator::Dash),
            Self::DayMonthYearDash => (FieldOrder::DayMonthYear, Separator::Dash),
            Self::MonthDayYearDash => (FieldOrder::MonthDayYear, Separator::Dash),
            Self::YearMonthDaySlash => (FieldOrder::YearMonthDay, Separator::Slash),
            Self::DayMonthYearSlash => (FieldOrder::DayMonthYear, Separator::Slash),
            Self::MonthDayYearSlash => (FieldOrder::MonthDayYear, Separator::Slash),
            Self::YearMonthDayDot => (FieldOrder::YearMonthDay, Separator::Dot),
            Self::DayMonthYearDot => (FieldOrder::DayMonthYear, Separator::Dot),
            Self::MonthDayYearDot => (FieldOrder::MonthDayYear, Separator::Dot),
        }
    }

    pub const fn field_order(self) -> FieldOrder {
        self.layout().0
    }

    pub const fn separator(self) -> Separator {
        self.layout().1
    }

    /// Parses `text` under this format.
    ///
    /// Empty text and a case-insensitive `null` yield [`ParsedDate::OpenEnded`]. Anything
    /// else must be three unsigned integers joined by the format's separator that name a
    /// real calendar day with a year of at least 100. Malformed input is always an error;
    /// there is no fallback date.
    pub fn parse(self, text: &str) -> Result<ParsedDate, DateParseError> {
        let trimmed = text.trim();
        if is_open_ended(trimmed) {
            return Ok(ParsedDate::OpenEnded);
        }

        let separator = self.separator().as_char();
        let fields: Vec<&str> = trimmed.split(separator).collect();
        let [first, second, third] = fields.as_slice() else {
            return Err(DateParseError::FieldCount {
                separator,
                found: fields.len(),
            });
        };

        let (year, month, day) = match self.field_order() {
            FieldOrder::YearMonthDay => (first, second, third),
            FieldOrder::DayMonthYear => (third, second, first),
            FieldOrder::MonthDayYear => (third, first, second),
        };

        let year = numeric_field(year)?;
        let month = numeric_field(month)?;
        let day = numeric_field(day)?;

        if year < MIN_YEAR {
            return Err(DateParseError::OutOfCalendar { year, month, day });
        }

        i32::try_from(year)
            .ok()
            .and_then(|year| NaiveDate::from_ymd_opt(year, month, day))
            .map(ParsedDate::Calendar)
            .ok_or(DateParseError::OutOfCalendar { year, month, day })
    }

    pub fn is_valid(self, text: &str) -> bool {
        self.parse(text).is_ok()
    }

    /// Writes `date` back out with a four digit year and two digit month and day.
    pub fn render(self, date: NaiveDate) -> String {
        let year = format!("{:04}", date.year());
        let month = format!("{:02}", date.month());
        let day = format!("{:02}", date.day());
        let separator = self.separator().as_char();

        let [a, b, c] = match self.field_order() {
            FieldOrder::YearMonthDay => [year, month, day],
            FieldOrder::DayMonthYear => [day, month, year],
            FieldOrder::MonthDayYear => [month, day, year],
        };

        format!("{a}{separator}{b}{separator}{c}")
    }
}

impl fmt::Display for DateFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for DateFormat {
    type Err = UnknownDateFormat;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let wanted = value.trim();
        Self::supported()
            .into_iter()
            .find(|format| format.tag().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| UnknownDateFormat(value.to_string()))
    }
}

/// Outcome of parsing a literal date field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParsedDate {
    Calendar(NaiveDate),
    /// No end date recorded: the stint is still in progress.
    OpenEnded,
}

impl ParsedDate {
    /// Calendar dates map to midnight; an open-ended date becomes `now`.
    pub fn resolve(self, now: NaiveDateTime) -> NaiveDateTime {
        match self {
            Self::Calendar(date) => date.and_time(NaiveTime::MIN),
            Self::OpenEnded => now,
        }
    }

    #[cfg(test)]
    pub(crate) fn calendar(self) -> Option<NaiveDate> {
        match self {
            Self::Calendar(date) => Some(date),
            Self::OpenEnded => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DateParseError {
    #[error("expected three fields separated by '{separator}', found {found}")]
    FieldCount { separator: char, found: usize },
    #[error("'{0}' is not a numeric date field")]
    NonNumeric(String),
    #[error("year {year}, month {month}, day {day} is not a calendar date")]
    OutOfCalendar { year: u32, month: u32, day: u32 },
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unsupported date format '{0}'")]
pub struct UnknownDateFormat(pub String);

/// Parses the instant used for open-ended assignments: RFC 3339, a naive
/// `YYYY-MM-DDTHH:MM:SS` timestamp, or a bare `YYYY-MM-DD` date (midnight).
pub fn parse_timestamp(raw: &str) -> Result<NaiveDateTime, String> {
    let trimmed = raw.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(dt.naive_local());
    }

    if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S") {
        return Ok(dt);
    }

    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .map(|date| date.and_time(NaiveTime::MIN))
        .map_err(|err| format!("failed to parse '{raw}' as a date or timestamp ({err})"))
}

pub(crate) fn is_open_ended(text: &str) -> bool {
    let trimmed = text.trim();
    trimmed.is_empty() || trimmed.eq_ignore_ascii_case("null")
}

fn numeric_field(raw: &str) -> Result<u32, DateParseError> {
    if raw.is_empty() || !raw.bytes().all(|byte| byte.is_ascii_digit()) {
        return Err(DateParseError::NonNumeric(raw.to_string()));
    }

    raw.parse::<u32>()
        .map_err(|_| DateParseError::NonNumeric(raw.to_string()))
}
