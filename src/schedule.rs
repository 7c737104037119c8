//! Requirements and candidate schedules.

use crate::catalog::{ClassType, Section, SectionId};
use crate::rules::Violation;

/// A course/class-type pair that must appear exactly once in any valid
/// schedule. List order decides the branching order of the exhaustive
/// search; it has no bearing on correctness.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RequiredCourse {
    pub course_id: String,
    pub class_type: ClassType,
}

impl RequiredCourse {
    pub fn new(course_id: impl Into<String>, class_type: ClassType) -> Self {
        RequiredCourse {
            course_id: course_id.into(),
            class_type,
        }
    }
}

/// A complete assignment: one section per requirement, in requirement
/// order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schedule {
    entries: Vec<(RequiredCourse, SectionId)>,
}

impl Schedule {
    pub fn new(entries: Vec<(RequiredCourse, SectionId)>) -> Self {
        Schedule { entries }
    }

    pub fn entries(&self) -> &[(RequiredCourse, SectionId)] {
        &self.entries
    }

    pub fn section_for(&self, req: &RequiredCourse) -> Option<SectionId> {
        self.entries
            .iter()
            .find(|(r, _)| r == req)
            .map(|(_, id)| *id)
    }

    pub fn sections<'a>(&'a self, catalog: &'a [Section]) -> impl Iterator<Item = &'a Section> {
        self.entries.iter().map(|(_, id)| &catalog[id.index()])
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// A schedule plus per-section diagnostic tags, aligned with
/// `schedule.entries()`. Tags never remove a solution; they only mark
/// which calendar rule a section would breach.
#[derive(Debug, Clone)]
pub struct AnnotatedSchedule {
    pub schedule: Schedule,
    pub violations: Vec<Option<Violation>>,
}
