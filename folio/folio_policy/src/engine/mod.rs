//! Policy evaluation engine.
//!
//! `rules` holds one pure predicate per action; the evaluator dispatches
//! actions to them and the audit keeps a trail of what was decided.

mod audit;
mod evaluator;
pub mod rules;

pub use audit::PolicyAudit;
pub use evaluator::PolicyEvaluator;
pub use rules::{
    can_create, can_destroy, can_edit, can_list_index, can_list_private_index,
    can_manage_collaborators, can_view,
};
