//! Declarative strategy: hand the section-selection model to CP-SAT.

use cp_sat::proto::{CpSolverStatus, SatParameters};
use log::{debug, info};

use super::model_context::{ModelBuilderContext, build_model_pipeline};
use crate::catalog::{CatalogIndex, Section, SectionId};
use crate::error::ScheduleError;
use crate::rules::ScheduleRules;
use crate::schedule::{RequiredCourse, Schedule};

/// Caps on the solver run. The engine gets no bound from the problem
/// itself, so a wall-clock ceiling is always supplied.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolverLimits {
    pub max_time_in_seconds: f64,
    pub random_seed: i32,
    pub log_search_progress: bool,
}

impl Default for SolverLimits {
    fn default() -> Self {
        SolverLimits {
            max_time_in_seconds: 60.0,
            random_seed: 42,
            log_search_progress: false,
        }
    }
}

impl SolverLimits {
    fn to_parameters(self) -> SatParameters {
        let mut params = SatParameters::default();
        params.max_time_in_seconds = Some(self.max_time_in_seconds);
        params.max_deterministic_time = Some(self.max_time_in_seconds);
        params.random_seed = Some(self.random_seed);
        params.log_search_progress = Some(self.log_search_progress);
        params
    }
}

/// Build the model over the candidate index and solve it once.
///
/// Returns the single assignment CP-SAT settles on, or a typed failure:
/// `Infeasible` when the solver proves no assignment exists, and
/// `SolverUndecided` when it hits its time cap without a verdict —
/// the two must never be conflated.
pub fn sat_schedule(
    catalog: &[Section],
    index: &CatalogIndex,
    rules: &ScheduleRules,
    limits: SolverLimits,
) -> Result<Schedule, ScheduleError> {
    let mut ctx = ModelBuilderContext::new(catalog, index, rules);
    build_model_pipeline(&mut ctx);

    let params = limits.to_parameters();
    let response = ctx.model.solve_with_parameters(&params);
    debug!("solver finished with status {:?}", response.status());

    match response.status() {
        CpSolverStatus::Optimal | CpSolverStatus::Feasible => {
            let mut entries: Vec<(RequiredCourse, SectionId)> =
                Vec::with_capacity(ctx.index.len());
            for (slot, req) in ctx.index.required().iter().enumerate() {
                let picked = ctx
                    .entries_for_slot(slot)
                    .find(|entry| entry.var.solution_value(&response))
                    // Exactly-one holds in any feasible response.
                    .ok_or(ScheduleError::ModelInvalid)?;
                entries.push((req.clone(), picked.sections[0]));
            }
            let schedule = Schedule::new(entries);
            info!("solver selected {} sections", schedule.len());
            Ok(schedule)
        }
        CpSolverStatus::Infeasible => Err(ScheduleError::Infeasible),
        CpSolverStatus::ModelInvalid => Err(ScheduleError::ModelInvalid),
        CpSolverStatus::Unknown => Err(ScheduleError::SolverUndecided),
    }
}
