use thiserror::Error;

/// Failure modes of a scheduling run.
///
/// `EmptyCandidates` and `Infeasible` are deliberately distinct: the
/// former means a requirement has nothing to pick from after filtering
/// (no search can ever succeed), the latter means every requirement had
/// candidates but no combination satisfies the gap rules jointly.
#[derive(Debug, Error)]
pub enum ScheduleError {
    #[error("malformed input: {0}")]
    MalformedInput(String),

    #[error("no solution possible for course {}", .courses.join(", "))]
    EmptyCandidates { courses: Vec<String> },

    #[error("no valid schedule found")]
    Infeasible,

    #[error("solver stopped without a verdict (raise the time limit and retry)")]
    SolverUndecided,

    #[error("solver rejected the constraint model")]
    ModelInvalid,
}
