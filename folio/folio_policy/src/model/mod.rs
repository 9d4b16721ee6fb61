//! Policy models.
//!
//! This module defines actions, decisions and evaluation records.

pub mod action;
pub mod evaluation;

pub use action::Action;
pub use evaluation::{Decision, DenyReason, Evaluation};
