//! Exhaustive backtracking search over the candidate index.
//!
//! Walks the requirements in input order, tentatively extending a
//! partial schedule with each candidate section and pruning any branch
//! whose meeting time lands closer than the minimum gap to an already
//! committed section. Every surviving complete assignment is collected;
//! there is no early stop, so the result set can be compared across
//! options downstream.
//!
//! The gap check runs over a single flat timeline: all committed
//! intervals are kept in one start-sorted sequence regardless of which
//! days they meet on. Two sections on disjoint days therefore still
//! exclude each other when their clock times are too close. The CP-SAT
//! model in [`crate::model`] only constrains pairs that share a day, so
//! the search is the stricter of the two; see DESIGN.md.

use log::{debug, info};

use crate::catalog::{CatalogIndex, Section, SectionId};
use crate::error::ScheduleError;
use crate::rules::ScheduleRules;
use crate::schedule::{AnnotatedSchedule, RequiredCourse, Schedule};

/// Start-sorted committed meeting intervals of a partial schedule.
///
/// Invariant: every adjacent pair is separated by at least the gap the
/// timeline was built with, so an insertion only has to check its two
/// boundary neighbors.
#[derive(Debug, Clone, Default)]
pub struct Timeline(Vec<(u16, u16)>);

impl Timeline {
    pub fn new() -> Self {
        Timeline(Vec::new())
    }

    /// Returns the timeline extended with `[start, end)` if the interval
    /// keeps at least `gap` minutes to both neighbors, `None` otherwise.
    pub fn with_interval(&self, start: u16, end: u16, gap: u16) -> Option<Timeline> {
        let pos = self.0.partition_point(|&(s, _)| s < start);
        if pos > 0 {
            let (_, prev_end) = self.0[pos - 1];
            if prev_end + gap > start {
                return None;
            }
        }
        if pos < self.0.len() {
            let (next_start, _) = self.0[pos];
            if end + gap > next_start {
                return None;
            }
        }
        let mut extended = self.0.clone();
        extended.insert(pos, (start, end));
        Some(Timeline(extended))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Enumerate every complete gap-respecting assignment, invoking
/// `on_solution` once per solution as it is found.
pub fn enumerate_schedules_with(
    catalog: &[Section],
    index: &CatalogIndex,
    rules: &ScheduleRules,
    mut on_solution: impl FnMut(&Schedule),
) {
    let picks = Vec::with_capacity(index.len());
    extend(
        catalog,
        index,
        rules,
        0,
        picks,
        Timeline::new(),
        &mut on_solution,
    );
}

/// Enumerate every complete gap-respecting assignment into a vector.
pub fn enumerate_schedules(
    catalog: &[Section],
    index: &CatalogIndex,
    rules: &ScheduleRules,
) -> Vec<Schedule> {
    let mut solutions = Vec::new();
    enumerate_schedules_with(catalog, index, rules, |s| solutions.push(s.clone()));
    debug!(
        "exhaustive search found {} complete assignments",
        solutions.len()
    );
    solutions
}

fn extend(
    catalog: &[Section],
    index: &CatalogIndex,
    rules: &ScheduleRules,
    depth: usize,
    picks: Vec<SectionId>,
    timeline: Timeline,
    on_solution: &mut impl FnMut(&Schedule),
) {
    if depth == index.len() {
        let entries: Vec<(RequiredCourse, SectionId)> = index
            .required()
            .iter()
            .cloned()
            .zip(picks.iter().copied())
            .collect();
        on_solution(&Schedule::new(entries));
        return;
    }
    for &id in index.candidates(depth) {
        let section = &catalog[id.index()];
        let Some(extended) =
            timeline.with_interval(section.start_minute, section.end_minute, rules.min_gap)
        else {
            continue;
        };
        let mut next_picks = picks.clone();
        next_picks.push(id);
        extend(
            catalog,
            index,
            rules,
            depth + 1,
            next_picks,
            extended,
            on_solution,
        );
    }
}

/// Tag each entry of a schedule with the calendar rule it breaches, if
/// any. Purely diagnostic; the schedule is never dropped.
pub fn annotate(schedule: Schedule, catalog: &[Section], rules: &ScheduleRules) -> AnnotatedSchedule {
    let violations = schedule
        .entries()
        .iter()
        .map(|(_, id)| rules.violation(&catalog[id.index()]))
        .collect();
    AnnotatedSchedule {
        schedule,
        violations,
    }
}

/// Run the full exhaustive strategy: enumerate, then annotate.
///
/// An empty result with a valid index means the constraints are jointly
/// unsatisfiable; requirements with no candidates at all were already
/// rejected when the index was built.
pub fn solve_exhaustive(
    catalog: &[Section],
    index: &CatalogIndex,
    rules: &ScheduleRules,
) -> Result<Vec<AnnotatedSchedule>, ScheduleError> {
    let solutions = enumerate_schedules(catalog, index, rules);
    if solutions.is_empty() {
        return Err(ScheduleError::Infeasible);
    }
    info!("exhaustive search produced {} schedule options", solutions.len());
    Ok(solutions
        .into_iter()
        .map(|s| annotate(s, catalog, rules))
        .collect())
}
