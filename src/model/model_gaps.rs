//! Pairwise rest-gap constraints between same-day section variables.

use log::debug;

use super::model_context::ModelBuilderContext;

/// For every unordered pair of distinct variables sharing at least one
/// meeting day, forbid selecting both unless their intervals sit at
/// least the minimum gap apart. Pairs that already satisfy the gap need
/// no clause, so only the temporally incompatible ones are emitted.
///
/// The scan is quadratic in the number of variables. Catalogs here are
/// tens of sections, which keeps the clause count harmless.
pub fn add_gap_constraints(ctx: &mut ModelBuilderContext) {
    let model = &mut ctx.model;
    let entries = &ctx.entries;
    let gap = ctx.rules.min_gap;

    let mut clauses = 0usize;
    for i in 0..entries.len() {
        for j in (i + 1)..entries.len() {
            let a = &entries[i].key;
            let b = &entries[j].key;
            if !a.days.intersects(b.days) {
                continue;
            }
            let far_enough = a.end_minute + gap <= b.start_minute
                || b.end_minute + gap <= a.start_minute;
            if far_enough {
                continue;
            }
            model.add_or([entries[i].var.clone().not(), entries[j].var.clone().not()]);
            clauses += 1;
        }
    }
    debug!(
        "emitted {} gap clauses over {} section variables",
        clauses,
        entries.len()
    );
}
