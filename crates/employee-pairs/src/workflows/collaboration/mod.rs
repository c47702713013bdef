//! Longest-collaboration analysis: which two employees overlapped the most on shared
//! projects.
//!
//! Date fields are checked as a batch first ([`validate_all`]); a single malformed date
//! rejects the run. Records that pass the gate but still cannot be used (non-numeric ids,
//! no start date) are skipped individually and reported alongside the result.

pub mod date_format;
pub mod domain;
pub mod engine;
pub mod grouping;
pub mod projection;
pub mod router;
pub mod service;
pub mod validation;

#[cfg(test)]
mod tests;

pub use date_format::{
    parse_timestamp, DateFormat, DateParseError, FieldOrder, ParsedDate, Separator,
    UnknownDateFormat,
};
pub use domain::{
    DateField, PairKey, PairResult, ProjectOverlap, ResolvedTimeEntry, SkipReason,
    SkippedAssignment, WorkAssignment, OPEN_ENDED_MARKER,
};
pub use engine::{analyze, find_best_pair, PairAnalysis};
pub use grouping::{ProjectGroup, ProjectGroups};
pub use projection::{project, ProjectRow};
pub use router::{collaboration_router, AnalyzeRequest, AnalyzeResponse, CollaborationSettings};
pub use service::{PairAnalyzer, PairReport, PairSummary};
pub use validation::{validate_all, ValidationError, INVALID_DATE_FORMAT_MESSAGE};
