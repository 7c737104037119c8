//! Exactly-one constraints: each requirement picks a single section.

use cp_sat::builder::LinearExpr;
use log::debug;

use super::model_context::ModelBuilderContext;

pub fn add_requirement_constraints(ctx: &mut ModelBuilderContext) {
    let model = &mut ctx.model;
    let entries = &ctx.entries;
    for (slot, req) in ctx.index.required().iter().enumerate() {
        let mut sum = LinearExpr::from(0);
        let mut matched = 0usize;
        for entry in entries {
            if entry.key.course_id == req.course_id && entry.key.class_type == req.class_type {
                sum = sum + LinearExpr::from(entry.var.clone());
                matched += 1;
            }
        }
        debug!(
            "slot {}: {} {} has {} candidate variables",
            slot, req.course_id, req.class_type, matched
        );
        // The index pre-check guarantees matched > 0 here.
        model.add_eq(sum, LinearExpr::from(1));
    }
}
