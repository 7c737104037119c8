//! Shared state for building the CP-SAT section-selection model.

use std::collections::HashMap;

use cp_sat::builder::{BoolVar, CpModelBuilder};
use log::debug;

use crate::catalog::{CatalogIndex, ClassType, DaySet, Section, SectionId};
use crate::rules::ScheduleRules;

/// Identity of a decision variable: sections agreeing on all five
/// fields collapse onto one variable. The collapse is deliberate —
/// duplicate catalog rows describe the same meeting slot, and one
/// boolean per slot keeps the pairwise constraint count down.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SectionKey {
    pub course_id: String,
    pub class_type: ClassType,
    pub days: DaySet,
    pub start_minute: u16,
    pub end_minute: u16,
}

impl SectionKey {
    fn of(section: &Section) -> Self {
        SectionKey {
            course_id: section.course_id.clone(),
            class_type: section.class_type,
            days: section.days,
            start_minute: section.start_minute,
            end_minute: section.end_minute,
        }
    }
}

/// One decision variable and the catalog sections it stands for.
pub struct VarEntry {
    pub key: SectionKey,
    pub var: BoolVar,
    pub sections: Vec<SectionId>,
}

/// Model, variable table and inputs threaded through the builder steps.
pub struct ModelBuilderContext<'a> {
    pub model: CpModelBuilder,
    pub catalog: &'a [Section],
    pub index: &'a CatalogIndex,
    pub rules: &'a ScheduleRules,
    pub entries: Vec<VarEntry>,
}

impl<'a> ModelBuilderContext<'a> {
    pub fn new(catalog: &'a [Section], index: &'a CatalogIndex, rules: &'a ScheduleRules) -> Self {
        ModelBuilderContext {
            model: CpModelBuilder::default(),
            catalog,
            index,
            rules,
            entries: Vec::new(),
        }
    }

    /// Entries whose key matches the requirement at `slot`.
    pub fn entries_for_slot(&self, slot: usize) -> impl Iterator<Item = &VarEntry> {
        let req = &self.index.required()[slot];
        self.entries
            .iter()
            .filter(move |e| e.key.course_id == req.course_id && e.key.class_type == req.class_type)
    }
}

/// Create one boolean per distinct section key across all candidate
/// lists of the index.
pub fn add_section_vars(ctx: &mut ModelBuilderContext) {
    let mut entry_of: HashMap<SectionKey, usize> = HashMap::new();
    let mut total = 0usize;
    for slot in 0..ctx.index.len() {
        for &id in ctx.index.candidates(slot) {
            total += 1;
            let key = SectionKey::of(&ctx.catalog[id.index()]);
            match entry_of.get(&key) {
                Some(&i) => ctx.entries[i].sections.push(id),
                None => {
                    let var = ctx.model.new_bool_var();
                    entry_of.insert(key.clone(), ctx.entries.len());
                    ctx.entries.push(VarEntry {
                        key,
                        var,
                        sections: vec![id],
                    });
                }
            }
        }
    }
    debug!(
        "created {} section variables from {} candidate entries",
        ctx.entries.len(),
        total
    );
}

/// Run all builder steps: variables, exactly-one, pairwise gaps.
pub fn build_model_pipeline(ctx: &mut ModelBuilderContext) {
    add_section_vars(ctx);
    super::add_requirement_constraints(ctx);
    super::add_gap_constraints(ctx);
}
