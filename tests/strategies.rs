//! Cross-validation of the two solving strategies.
//!
//! The declarative CP-SAT model and the exhaustive search must agree on
//! feasibility: whenever one finds a schedule the other must as well.
//! The random catalogs below stay on a single weekday so that the
//! model's per-shared-day pair scan and the search's flat timeline
//! coincide (on multi-day catalogs the search is deliberately
//! stricter).

use proptest::prelude::*;

use sectsolve::catalog::{CatalogIndex, ClassType, DaySet, Section, format_minutes};
use sectsolve::error::ScheduleError;
use sectsolve::model::{SolverLimits, sat_schedule};
use sectsolve::rules::{ScheduleRules, eligible_sections};
use sectsolve::schedule::{RequiredCourse, Schedule};
use sectsolve::search::enumerate_schedules;

fn section(course: &str, class_type: ClassType, days: &str, start: &str, end: &str) -> Section {
    Section::new(course, class_type, days.parse::<DaySet>().unwrap(), start, end).unwrap()
}

fn limits() -> SolverLimits {
    SolverLimits {
        max_time_in_seconds: 10.0,
        ..SolverLimits::default()
    }
}

/// Domain exactness plus the pairwise same-day gap property.
fn assert_valid_schedule(
    schedule: &Schedule,
    catalog: &[Section],
    required: &[RequiredCourse],
    gap: u16,
) {
    assert_eq!(schedule.len(), required.len());
    for req in required {
        assert!(
            schedule.section_for(req).is_some(),
            "missing requirement {req:?}"
        );
    }
    let sections: Vec<&Section> = schedule.sections(catalog).collect();
    for i in 0..sections.len() {
        for j in (i + 1)..sections.len() {
            let (a, b) = (sections[i], sections[j]);
            if a.days.intersects(b.days) {
                assert!(
                    a.end_minute + gap <= b.start_minute || b.end_minute + gap <= a.start_minute,
                    "gap violated between {a} and {b}"
                );
            }
        }
    }
}

#[test]
fn both_strategies_accept_a_thirty_minute_gap() {
    let catalog = vec![
        section("AgSc 12", ClassType::Lecture, "M", "08:00", "09:00"),
        section("Chem 131", ClassType::Lecture, "M", "09:30", "10:30"),
    ];
    let required = vec![
        RequiredCourse::new("AgSc 12", ClassType::Lecture),
        RequiredCourse::new("Chem 131", ClassType::Lecture),
    ];
    let rules = ScheduleRules::default();
    let eligible = eligible_sections(&catalog, &rules);
    let index = CatalogIndex::build(&catalog, &eligible, &required).unwrap();

    let schedule = sat_schedule(&catalog, &index, &rules, limits()).unwrap();
    assert_valid_schedule(&schedule, &catalog, &required, rules.min_gap);

    let solutions = enumerate_schedules(&catalog, &index, &rules);
    assert_eq!(solutions.len(), 1);
    assert_valid_schedule(&solutions[0], &catalog, &required, rules.min_gap);
}

#[test]
fn both_strategies_reject_back_to_back_sections() {
    let catalog = vec![
        section("AgSc 12", ClassType::Lecture, "M", "08:00", "09:00"),
        section("Chem 131", ClassType::Lecture, "M", "09:00", "10:00"),
    ];
    let required = vec![
        RequiredCourse::new("AgSc 12", ClassType::Lecture),
        RequiredCourse::new("Chem 131", ClassType::Lecture),
    ];
    let rules = ScheduleRules::default();
    let eligible = eligible_sections(&catalog, &rules);
    let index = CatalogIndex::build(&catalog, &eligible, &required).unwrap();

    assert!(matches!(
        sat_schedule(&catalog, &index, &rules, limits()),
        Err(ScheduleError::Infeasible)
    ));
    assert!(enumerate_schedules(&catalog, &index, &rules).is_empty());
}

#[test]
fn solver_picks_the_conflict_free_alternative() {
    // Two sections for the second course; only the afternoon one works.
    let catalog = vec![
        section("AgSc 12", ClassType::Lecture, "MWF", "09:00", "10:00"),
        section("Chem 131", ClassType::Lecture, "MWF", "10:15", "11:15"),
        section("Chem 131", ClassType::Lecture, "MWF", "13:00", "14:00"),
    ];
    let required = vec![
        RequiredCourse::new("AgSc 12", ClassType::Lecture),
        RequiredCourse::new("Chem 131", ClassType::Lecture),
    ];
    let rules = ScheduleRules::default();
    let eligible = eligible_sections(&catalog, &rules);
    let index = CatalogIndex::build(&catalog, &eligible, &required).unwrap();

    let schedule = sat_schedule(&catalog, &index, &rules, limits()).unwrap();
    assert_valid_schedule(&schedule, &catalog, &required, rules.min_gap);
    let picked = schedule
        .section_for(&required[1])
        .map(|id| catalog[id.index()].start_minute);
    assert_eq!(picked, Some(780));

    let solutions = enumerate_schedules(&catalog, &index, &rules);
    assert_eq!(solutions.len(), 1);
}

#[test]
fn duplicate_catalog_rows_collapse_to_one_choice() {
    // The same meeting slot listed twice must not confuse the model.
    let catalog = vec![
        section("AgSc 12", ClassType::Lecture, "M", "08:00", "09:00"),
        section("AgSc 12", ClassType::Lecture, "M", "08:00", "09:00"),
    ];
    let required = vec![RequiredCourse::new("AgSc 12", ClassType::Lecture)];
    let rules = ScheduleRules::default();
    let eligible = eligible_sections(&catalog, &rules);
    let index = CatalogIndex::build(&catalog, &eligible, &required).unwrap();

    let schedule = sat_schedule(&catalog, &index, &rules, limits()).unwrap();
    assert_valid_schedule(&schedule, &catalog, &required, rules.min_gap);

    // The search sees both rows and reports one solution per row.
    let solutions = enumerate_schedules(&catalog, &index, &rules);
    assert_eq!(solutions.len(), 2);
}

fn arb_catalog() -> impl Strategy<Value = Vec<Section>> {
    // Single-day catalogs over up to three courses; quarter-hour grid
    // inside and slightly beyond the allowed window so the calendar
    // filter stays exercised.
    prop::collection::vec((0usize..3, 0u16..42u16, 3u16..7u16), 1..9).prop_map(|rows| {
        rows.into_iter()
            .map(|(course, slot, dur)| {
                let start = 450 + slot * 15;
                let end = start + dur * 15;
                section(
                    &format!("C{course}"),
                    ClassType::Lecture,
                    "M",
                    &format_minutes(start),
                    &format_minutes(end),
                )
            })
            .collect()
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn strategies_agree_on_feasibility(catalog in arb_catalog()) {
        let rules = ScheduleRules::default();
        let mut course_ids: Vec<String> =
            catalog.iter().map(|s| s.course_id.clone()).collect();
        course_ids.sort();
        course_ids.dedup();
        let required: Vec<RequiredCourse> = course_ids
            .into_iter()
            .map(|c| RequiredCourse::new(c, ClassType::Lecture))
            .collect();

        let eligible = eligible_sections(&catalog, &rules);
        let index = match CatalogIndex::build(&catalog, &eligible, &required) {
            Ok(index) => index,
            // A requirement lost all candidates to the filter: both
            // strategies are cut off by the same pre-check.
            Err(ScheduleError::EmptyCandidates { .. }) => return Ok(()),
            Err(e) => panic!("unexpected index error: {e}"),
        };

        let sat_found = match sat_schedule(&catalog, &index, &rules, limits()) {
            Ok(schedule) => {
                assert_valid_schedule(&schedule, &catalog, &required, rules.min_gap);
                true
            }
            Err(ScheduleError::Infeasible) => false,
            Err(e) => panic!("unexpected solver error: {e}"),
        };

        let solutions = enumerate_schedules(&catalog, &index, &rules);
        for schedule in &solutions {
            assert_valid_schedule(schedule, &catalog, &required, rules.min_gap);
        }

        prop_assert_eq!(sat_found, !solutions.is_empty());
    }
}
