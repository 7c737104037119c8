//! Calendar-window rules: the eligibility filter and the diagnostic
//! violation tags.
//!
//! The two predicates are intentionally not the same. The filter drops
//! a section only when it sits *wholly inside* an excluded block; the
//! violation tag for the midday block fires on any *overlap* with the
//! block boundaries. Both behaviors are load-bearing for downstream
//! reports and are kept distinct on purpose.

use std::fmt;

use lazy_static::lazy_static;
use log::debug;

use crate::catalog::{DaySet, Section, SectionId, Weekday};

lazy_static! {
    static ref WED_FRI: DaySet = DaySet::single(Weekday::Wed).with(Weekday::Fri);
}

/// Calendar constants for a run. All windows are minutes from midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduleRules {
    /// Earliest allowed section start.
    pub day_start: u16,
    /// Latest allowed section end.
    pub day_end: u16,
    /// Midday exclusion block start.
    pub midday_start: u16,
    /// Midday exclusion block end.
    pub midday_end: u16,
    /// Wednesday/Friday afternoon block start.
    pub wf_start: u16,
    /// Wednesday/Friday afternoon block end.
    pub wf_end: u16,
    /// Minimum idle minutes between two same-day sections.
    pub min_gap: u16,
}

impl Default for ScheduleRules {
    fn default() -> Self {
        ScheduleRules {
            day_start: 480,  // 08:00
            day_end: 1140,   // 19:00
            midday_start: 720,
            midday_end: 780,
            wf_start: 960,
            wf_end: 1110,
            min_gap: 30,
        }
    }
}

impl ScheduleRules {
    /// Whether a section survives the calendar filter.
    ///
    /// Containment-based: a section that merely overlaps an excluded
    /// block without being wholly inside it is kept.
    pub fn is_eligible(&self, section: &Section) -> bool {
        if section.start_minute < self.day_start || section.end_minute > self.day_end {
            return false;
        }
        if section.start_minute >= self.midday_start && section.end_minute <= self.midday_end {
            return false;
        }
        if section.start_minute >= self.wf_start
            && section.end_minute <= self.wf_end
            && section.days.intersects(*WED_FRI)
        {
            return false;
        }
        true
    }

    /// Diagnostic tag for a section, first matching rule wins.
    ///
    /// The midday check here is overlap-based (either endpoint landing
    /// on the block counts), unlike the containment test in
    /// [`is_eligible`](Self::is_eligible).
    pub fn violation(&self, section: &Section) -> Option<Violation> {
        let midday = self.midday_start..=self.midday_end;
        if midday.contains(&section.start_minute) || midday.contains(&section.end_minute) {
            Some(Violation::MiddayClass)
        } else if section.start_minute < self.day_start || section.start_minute >= self.day_end {
            Some(Violation::OutsideAllowedHours)
        } else if section.start_minute >= self.wf_start
            && section.end_minute <= self.wf_end
            && section.days.intersects(*WED_FRI)
        {
            Some(Violation::WedFriAfternoon)
        } else {
            None
        }
    }
}

/// Which calendar rule a section breaches. Display strings are the
/// labels the result sheets carry verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Violation {
    MiddayClass,
    OutsideAllowedHours,
    WedFriAfternoon,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Violation::MiddayClass => f.write_str("12 PM - 1 PM class included"),
            Violation::OutsideAllowedHours => {
                f.write_str("Class beyond allowed hours (7 AM - 7 PM)")
            }
            Violation::WedFriAfternoon => f.write_str("Class 4:00 PM - 5:30 PM on W/F"),
        }
    }
}

/// Apply the calendar filter to the whole catalog once, keeping ids.
pub fn eligible_sections(catalog: &[Section], rules: &ScheduleRules) -> Vec<SectionId> {
    let kept: Vec<SectionId> = catalog
        .iter()
        .enumerate()
        .filter(|(_, s)| rules.is_eligible(s))
        .map(|(i, _)| SectionId::new(i))
        .collect();
    debug!(
        "calendar filter kept {} of {} sections",
        kept.len(),
        catalog.len()
    );
    kept
}
