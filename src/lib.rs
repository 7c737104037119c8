//! Course-section feasibility solving.
//!
//! Given a catalog of course sections and a list of required
//! course/class-type pairs, pick exactly one section per requirement so
//! that no two selected meetings sit closer than a minimum rest gap,
//! subject to fixed calendar-window rules. Two interchangeable
//! strategies are provided: a declarative CP-SAT model
//! ([`model::sat_schedule`]) returning one feasible assignment, and an
//! exhaustive backtracking search ([`search::solve_exhaustive`])
//! returning every valid assignment annotated with diagnostic
//! calendar-rule tags.

pub mod catalog;
pub mod emit;
pub mod error;
pub mod input;
pub mod model;
pub mod rules;
pub mod schedule;
pub mod search;
