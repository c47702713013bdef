use super::date_format::{DateFormat, ParsedDate};
use super::domain::{ResolvedTimeEntry, SkipReason, SkippedAssignment, WorkAssignment};
use chrono::NaiveDateTime;
use std::collections::HashMap;
use tracing::warn;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectGroup {
    pub project_id: i64,
    pub entries: Vec<ResolvedTimeEntry>,
}

/// Resolved entries bucketed by project.
///
/// Groups keep the order in which their project first appeared and entries keep input
/// order, so scanning is deterministic.
#[derive(Debug, Default, Clone)]
pub struct ProjectGroups {
    groups: Vec<ProjectGroup>,
    index: HashMap<i64, usize>,
}

impl ProjectGroups {
    /// Groups every record that resolves cleanly and reports the rest as skipped.
    pub fn build(
        records: &[WorkAssignment],
        format: DateFormat,
        now: NaiveDateTime,
    ) -> (Self, Vec<SkippedAssignment>) {
        let mut groups = Self::default();
        let mut skipped = Vec::new();

        for (row, record) in records.iter().enumerate() {
            match resolve(record, format, now) {
                Ok((project_id, entry)) => groups.push(project_id, entry),
                Err((reason, detail)) => {
                    warn!(row, reason = reason.label(), %detail, "skipping work assignment");
                    skipped.push(SkippedAssignment {
                        row,
                        reason,
                        detail,
                    });
                }
            }
        }

        (groups, skipped)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ProjectGroup> {
        self.groups.iter()
    }

    #[cfg(test)]
    pub(crate) fn get(&self, project_id: i64) -> Option<&ProjectGroup> {
        self.index.get(&project_id).map(|&slot| &self.groups[slot])
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    fn push(&mut self, project_id: i64, entry: ResolvedTimeEntry) {
        let slot = *self.index.entry(project_id).or_insert_with(|| {
            self.groups.push(ProjectGroup {
                project_id,
                entries: Vec::new(),
            });
            self.groups.len() - 1
        });
        self.groups[slot].entries.push(entry);
    }
}

fn resolve(
    record: &WorkAssignment,
    format: DateFormat,
    now: NaiveDateTime,
) -> Result<(i64, ResolvedTimeEntry), (SkipReason, String)> {
    let employee_id = parse_id(&record.employee_id)
        .ok_or_else(|| (SkipReason::InvalidEmployeeId, record.employee_id.clone()))?;
    let project_id = parse_id(&record.project_id)
        .ok_or_else(|| (SkipReason::InvalidProjectId, record.project_id.clone()))?;

    let start = match format.parse(&record.date_from) {
        Ok(ParsedDate::Calendar(date)) => ParsedDate::Calendar(date).resolve(now),
        Ok(ParsedDate::OpenEnded) => {
            return Err((SkipReason::MissingStartDate, record.date_from.clone()))
        }
        Err(err) => return Err((SkipReason::InvalidStartDate, err.to_string())),
    };

    let end = format
        .parse(&record.date_to)
        .map_err(|err| (SkipReason::InvalidEndDate, err.to_string()))?
        .resolve(now);

    Ok((
        project_id,
        ResolvedTimeEntry {
            employee_id,
            start,
            end,
        },
    ))
}

fn parse_id(raw: &str) -> Option<i64> {
    raw.trim().parse::<i64>().ok()
}
