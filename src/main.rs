use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use log::{info, warn};

use sectsolve::catalog::CatalogIndex;
use sectsolve::emit;
use sectsolve::error::ScheduleError;
use sectsolve::input;
use sectsolve::model::{SolverLimits, sat_schedule};
use sectsolve::rules::{ScheduleRules, eligible_sections};
use sectsolve::search::solve_exhaustive;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Strategy {
    /// Declarative CP-SAT model, first feasible assignment.
    Sat,
    /// Exhaustive backtracking, every valid assignment.
    Search,
    /// Run both strategies.
    Both,
}

/// Pick a conflict-free set of course sections from a catalog.
#[derive(Debug, Parser)]
#[command(name = "sectsolve", version)]
struct Args {
    /// Catalog CSV (CRSNO, CLASS TYPE, DAYS, START_TIME, END_TIME).
    catalog: PathBuf,

    /// Requirements CSV (CRSNO, CLASS TYPE), one row per pair to take.
    requirements: PathBuf,

    /// Directory the result workbooks are written to.
    #[arg(long, default_value = "result")]
    out_dir: PathBuf,

    #[arg(long, value_enum, default_value_t = Strategy::Both)]
    strategy: Strategy,

    /// Wall-clock cap for the CP-SAT solve, in seconds.
    #[arg(long, default_value_t = 60.0)]
    max_solve_seconds: f64,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let catalog = input::load_catalog(&args.catalog)?;
    let required = input::load_requirements(&args.requirements)?;
    let rules = ScheduleRules::default();

    let eligible = eligible_sections(&catalog, &rules);
    let index = CatalogIndex::build(&catalog, &eligible, &required)?;

    std::fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("creating {}", args.out_dir.display()))?;

    let mut found_any = false;

    if matches!(args.strategy, Strategy::Sat | Strategy::Both) {
        let limits = SolverLimits {
            max_time_in_seconds: args.max_solve_seconds,
            ..SolverLimits::default()
        };
        match sat_schedule(&catalog, &index, &rules, limits) {
            Ok(schedule) => {
                let path = args.out_dir.join("schedule_sat.xlsx");
                emit::write_sat_schedule(&path, &catalog, &schedule)?;
                for section in schedule.sections(&catalog) {
                    info!("selected {section}");
                }
                found_any = true;
            }
            Err(ScheduleError::Infeasible) => {
                warn!("solver proved the requirements infeasible");
            }
            Err(e) => return Err(e.into()),
        }
    }

    if matches!(args.strategy, Strategy::Search | Strategy::Both) {
        match solve_exhaustive(&catalog, &index, &rules) {
            Ok(solutions) => {
                let path = args.out_dir.join("schedule_options.xlsx");
                emit::write_search_solutions(&path, &catalog, &solutions)?;
                found_any = true;
            }
            Err(ScheduleError::Infeasible) => {
                warn!("exhaustive search found no valid schedule");
            }
            Err(e) => return Err(e.into()),
        }
    }

    if !found_any {
        return Err(ScheduleError::Infeasible.into());
    }
    Ok(())
}
