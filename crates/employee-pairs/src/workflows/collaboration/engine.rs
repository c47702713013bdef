use super::date_format::DateFormat;
use super::domain::{
    PairKey, PairResult, ProjectOverlap, ResolvedTimeEntry, SkippedAssignment, WorkAssignment,
};
use super::grouping::ProjectGroups;
use chrono::{Duration, NaiveDateTime};
use std::collections::HashMap;
use tracing::debug;

/// Best pair of one run together with the records that were left out of grouping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PairAnalysis {
    pub best_pair: Option<PairResult>,
    pub skipped: Vec<SkippedAssignment>,
}

/// Returns the employee pair with the longest combined overlap, if any pair overlaps.
///
/// `now` stands in for every open-ended end date.
pub fn find_best_pair(
    records: &[WorkAssignment],
    format: DateFormat,
    now: NaiveDateTime,
) -> Option<PairResult> {
    analyze(records, format, now).best_pair
}

pub fn analyze(records: &[WorkAssignment], format: DateFormat, now: NaiveDateTime) -> PairAnalysis {
    let (groups, skipped) = ProjectGroups::build(records, format, now);
    debug!(
        projects = groups.len(),
        skipped = skipped.len(),
        "grouped work assignments"
    );

    PairAnalysis {
        best_pair: best_pair(&groups),
        skipped,
    }
}

pub fn best_pair(groups: &ProjectGroups) -> Option<PairResult> {
    candidate_overlaps(groups)
        .fold(PairLedger::default(), PairLedger::record)
        .into_winner()
}

/// Every overlapping entry pair, projects in group order and then `(i, j)` index order.
pub fn candidate_overlaps(
    groups: &ProjectGroups,
) -> impl Iterator<Item = (PairKey, ProjectOverlap)> + '_ {
    groups.iter().flat_map(|group| {
        let entries = &group.entries;
        let project_id = group.project_id;
        (0..entries.len())
            .flat_map(move |i| ((i + 1)..entries.len()).map(move |j| (i, j)))
            .filter_map(move |(i, j)| {
                let (first, second) = (&entries[i], &entries[j]);
                let key = PairKey::new(first.employee_id, second.employee_id)?;
                overlap_window(project_id, first, second).map(|overlap| (key, overlap))
            })
    })
}

/// Intersection of two stints on the same project, or `None` when they never meet.
pub fn overlap_window(
    project_id: i64,
    first: &ResolvedTimeEntry,
    second: &ResolvedTimeEntry,
) -> Option<ProjectOverlap> {
    let overlap_start = first.start.max(second.start);
    let overlap_end = first.end.min(second.end);
    if overlap_start > overlap_end {
        return None;
    }

    Some(ProjectOverlap {
        project_id,
        overlap_days: elapsed_days(overlap_end - overlap_start),
        overlap_start,
        overlap_end,
    })
}

/// Whole days covered by a non-negative span, any partial day counting as one.
pub(crate) fn elapsed_days(span: Duration) -> u64 {
    let whole = span.num_days();
    let days = if span > Duration::days(whole) {
        whole + 1
    } else {
        whole
    };
    days.unsigned_abs()
}

/// Running totals for one canonical employee pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PairAccumulator {
    key: PairKey,
    total_overlap_days: u64,
    overlaps: Vec<ProjectOverlap>,
}

impl PairAccumulator {
    fn new(key: PairKey) -> Self {
        Self {
            key,
            total_overlap_days: 0,
            overlaps: Vec::new(),
        }
    }

    fn add(&mut self, overlap: ProjectOverlap) {
        self.total_overlap_days += overlap.overlap_days;
        self.overlaps.push(overlap);
    }

    pub fn key(&self) -> PairKey {
        self.key
    }

    pub fn total_overlap_days(&self) -> u64 {
        self.total_overlap_days
    }

    pub fn overlaps(&self) -> &[ProjectOverlap] {
        &self.overlaps
    }

    fn into_result(self) -> PairResult {
        PairResult {
            employee_id_low: self.key.low(),
            employee_id_high: self.key.high(),
            total_overlap_days: self.total_overlap_days,
            overlaps: self.overlaps,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Leader {
    pub key: PairKey,
    pub total_overlap_days: u64,
}

/// Accumulators for every pair seen so far plus the current leader.
#[derive(Debug, Default, Clone)]
pub struct PairLedger {
    pairs: HashMap<PairKey, PairAccumulator>,
    leader: Option<Leader>,
}

impl PairLedger {
    pub fn record(mut self, (key, overlap): (PairKey, ProjectOverlap)) -> Self {
        let accumulator = self
            .pairs
            .entry(key)
            .or_insert_with(|| PairAccumulator::new(key));
        accumulator.add(overlap);
        let total_overlap_days = accumulator.total_overlap_days;

        if takes_lead(self.leader.as_ref(), total_overlap_days) {
            self.leader = Some(Leader {
                key,
                total_overlap_days,
            });
        }

        self
    }

    pub fn leader(&self) -> Option<Leader> {
        self.leader
    }

    #[cfg(test)]
    pub(crate) fn pair(&self, key: PairKey) -> Option<&PairAccumulator> {
        self.pairs.get(&key)
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.pairs.len()
    }

    #[cfg(test)]
    pub(crate) fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn into_winner(mut self) -> Option<PairResult> {
        let leader = self.leader?;
        self.pairs
            .remove(&leader.key)
            .map(PairAccumulator::into_result)
    }
}

/// A pair takes the lead only by strictly exceeding the current leader's total, so the
/// first pair to reach a maximum keeps it.
pub fn takes_lead(current: Option<&Leader>, candidate_total: u64) -> bool {
    current.map_or(true, |leader| candidate_total > leader.total_overlap_days)
}
