//! Recurring transaction due-date projection.
//!
//! The projector is a pure date generator: given a rule and an explicit
//! `as_of` date it returns the due dates that elapsed since the rule cursor.
//! Booking those dates is left to [`batch::process_due_rules`] and the
//! [`model::LedgerRepository`] it writes through.

pub use self::batch::{BatchProjection, ProcessReport, RuleWarning, process_due_rules, project_rules, realize};
pub use self::projector::{ProjectionResult, project_due_dates};

pub mod batch;
pub mod calendar;
pub mod projector;
