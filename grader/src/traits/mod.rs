//!
//! Traits Module
//!
//! Extension points of the grading engine.
//!
//! - [`fail_rule`]: Defines the trait for minimum-threshold rules that force a subject to FF.
//!
//! Implement [`fail_rule::FailRule`] to add a new pass/fail override without touching the grader.

pub mod fail_rule;
