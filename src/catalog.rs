//! Section catalog: weekdays, meeting times and the candidate index.

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveTime, Timelike};
use lazy_static::lazy_static;
use log::warn;

use crate::error::ScheduleError;
use crate::schedule::RequiredCourse;

/// Day of the week a section meets on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Weekday {
    Mon,
    Tue,
    Wed,
    Thu,
    Fri,
    Sat,
    Sun,
}

impl Weekday {
    pub const ALL: [Weekday; 7] = [
        Weekday::Mon,
        Weekday::Tue,
        Weekday::Wed,
        Weekday::Thu,
        Weekday::Fri,
        Weekday::Sat,
        Weekday::Sun,
    ];

    fn bit(self) -> u8 {
        1 << (self as u8)
    }

    /// Canonical catalog token ("M", "T", "W", "Th", "F", "S", "Su").
    pub fn token(self) -> &'static str {
        match self {
            Weekday::Mon => "M",
            Weekday::Tue => "T",
            Weekday::Wed => "W",
            Weekday::Thu => "Th",
            Weekday::Fri => "F",
            Weekday::Sat => "S",
            Weekday::Sun => "Su",
        }
    }
}

lazy_static! {
    // Longest tokens first so "Th" is not consumed as "T".
    static ref DAY_TOKENS: Vec<(&'static str, Weekday)> = vec![
        ("TH", Weekday::Thu),
        ("TU", Weekday::Tue),
        ("SA", Weekday::Sat),
        ("SU", Weekday::Sun),
        ("M", Weekday::Mon),
        ("T", Weekday::Tue),
        ("W", Weekday::Wed),
        ("R", Weekday::Thu),
        ("F", Weekday::Fri),
        ("S", Weekday::Sat),
    ];
}

/// Set of weekdays, parsed from compact catalog tokens like "MWF" or "TTh".
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct DaySet(u8);

impl DaySet {
    pub const EMPTY: DaySet = DaySet(0);

    pub fn single(day: Weekday) -> Self {
        DaySet(day.bit())
    }

    pub fn with(self, day: Weekday) -> Self {
        DaySet(self.0 | day.bit())
    }

    pub fn contains(self, day: Weekday) -> bool {
        self.0 & day.bit() != 0
    }

    pub fn intersects(self, other: DaySet) -> bool {
        self.0 & other.0 != 0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn iter(self) -> impl Iterator<Item = Weekday> {
        Weekday::ALL.into_iter().filter(move |d| self.contains(*d))
    }
}

impl FromStr for DaySet {
    type Err = ScheduleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_uppercase();
        let mut days = DaySet::EMPTY;
        let mut rest = upper.as_str();
        'scan: while !rest.is_empty() {
            if rest.starts_with([' ', ',', '/', ';', '-']) {
                rest = &rest[1..];
                continue;
            }
            for (token, day) in DAY_TOKENS.iter() {
                if rest.starts_with(token) {
                    days = days.with(*day);
                    rest = &rest[token.len()..];
                    continue 'scan;
                }
            }
            return Err(ScheduleError::MalformedInput(format!(
                "unrecognized day token in {s:?}"
            )));
        }
        if days.is_empty() {
            return Err(ScheduleError::MalformedInput(format!("empty day set {s:?}")));
        }
        Ok(days)
    }
}

impl fmt::Display for DaySet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for day in self.iter() {
            f.write_str(day.token())?;
        }
        Ok(())
    }
}

impl fmt::Debug for DaySet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DaySet({self})")
    }
}

/// Lecture or laboratory meeting of a course.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ClassType {
    Lecture,
    Lab,
}

impl FromStr for ClassType {
    type Err = ScheduleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "lec" | "lecture" => Ok(ClassType::Lecture),
            "lab" | "laboratory" => Ok(ClassType::Lab),
            other => Err(ScheduleError::MalformedInput(format!(
                "unknown class type {other:?}"
            ))),
        }
    }
}

impl fmt::Display for ClassType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClassType::Lecture => f.write_str("Lec"),
            ClassType::Lab => f.write_str("Lab"),
        }
    }
}

/// Index of a section in the loaded catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SectionId(usize);

impl SectionId {
    pub fn new(index: usize) -> Self {
        SectionId(index)
    }

    pub fn index(self) -> usize {
        self.0
    }
}

/// One concrete offering of a course/class-type pair.
///
/// Meeting times are held as minutes from midnight, derived once from
/// the `HH:MM` strings of the input row and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Section {
    pub course_id: String,
    pub class_type: ClassType,
    pub days: DaySet,
    pub start_minute: u16,
    pub end_minute: u16,
}

impl Section {
    pub fn new(
        course_id: impl Into<String>,
        class_type: ClassType,
        days: DaySet,
        start: &str,
        end: &str,
    ) -> Result<Self, ScheduleError> {
        let start_minute = parse_wall_clock(start)?;
        let end_minute = parse_wall_clock(end)?;
        if start_minute >= end_minute {
            return Err(ScheduleError::MalformedInput(format!(
                "section must start before it ends ({start} >= {end})"
            )));
        }
        Ok(Section {
            course_id: course_id.into(),
            class_type,
            days,
            start_minute,
            end_minute,
        })
    }

    pub fn matches(&self, req: &RequiredCourse) -> bool {
        self.course_id == req.course_id && self.class_type == req.class_type
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {}-{}",
            self.course_id,
            self.class_type,
            self.days,
            format_minutes(self.start_minute),
            format_minutes(self.end_minute)
        )
    }
}

/// Parse an `HH:MM` wall-clock string into minutes from midnight.
pub fn parse_wall_clock(s: &str) -> Result<u16, ScheduleError> {
    let t = NaiveTime::parse_from_str(s.trim(), "%H:%M")
        .map_err(|e| ScheduleError::MalformedInput(format!("bad time {s:?}: {e}")))?;
    Ok((t.hour() * 60 + t.minute()) as u16)
}

/// Render minutes from midnight back to `HH:MM`.
pub fn format_minutes(minute: u16) -> String {
    format!("{:02}:{:02}", minute / 60, minute % 60)
}

/// Candidate sections per requirement, built over the filtered catalog.
///
/// Construction fails up front when any requirement has no candidates,
/// so neither solving strategy can mistake "nothing to pick from" for
/// "searched and found nothing".
#[derive(Debug, Clone)]
pub struct CatalogIndex {
    required: Vec<RequiredCourse>,
    candidates: Vec<Vec<SectionId>>,
}

impl CatalogIndex {
    pub fn build(
        catalog: &[Section],
        eligible: &[SectionId],
        required: &[RequiredCourse],
    ) -> Result<Self, ScheduleError> {
        let mut deduped: Vec<RequiredCourse> = Vec::with_capacity(required.len());
        for req in required {
            if deduped.contains(req) {
                warn!("duplicate requirement {} {} ignored", req.course_id, req.class_type);
            } else {
                deduped.push(req.clone());
            }
        }

        let mut candidates = Vec::with_capacity(deduped.len());
        let mut missing = Vec::new();
        for req in &deduped {
            let ids: Vec<SectionId> = eligible
                .iter()
                .copied()
                .filter(|id| catalog[id.index()].matches(req))
                .collect();
            if ids.is_empty() {
                missing.push(format!("{} ({})", req.course_id, req.class_type));
            }
            candidates.push(ids);
        }
        if !missing.is_empty() {
            return Err(ScheduleError::EmptyCandidates { courses: missing });
        }
        Ok(CatalogIndex {
            required: deduped,
            candidates,
        })
    }

    pub fn required(&self) -> &[RequiredCourse] {
        &self.required
    }

    /// Candidate sections for the requirement at `slot`.
    pub fn candidates(&self, slot: usize) -> &[SectionId] {
        &self.candidates[slot]
    }

    pub fn len(&self) -> usize {
        self.required.len()
    }

    pub fn is_empty(&self) -> bool {
        self.required.is_empty()
    }
}
