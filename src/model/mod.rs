//! Model building and constraint logic for the CP-SAT strategy.

mod model_context;
mod model_gaps;
mod model_requirements;
mod solve;

use model_gaps::add_gap_constraints;
use model_requirements::add_requirement_constraints;
pub use solve::*;
