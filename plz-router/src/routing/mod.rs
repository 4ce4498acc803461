//! Postal code → responsible person assignment.
//!
//! The leading digit of a postal code selects a rule. Most rules name one
//! person; the choice band names two, and the caller must come back with
//! the postal code plus the chosen person to finish. Nothing is stored
//! between the two calls.

mod contacts;
mod error;
mod router;
mod rules;

pub use contacts::ContactBook;
pub use error::AssignError;
pub use router::{Assignment, AssignmentRouter, ChoiceOption, ChoiceRequest, FinalAssignment};
pub use rules::{AssignmentRule, Outcome, rule_for};
