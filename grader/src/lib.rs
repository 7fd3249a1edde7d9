//! # Grader
//!
//! Grading engine for a credit-based examination scheme.
//!
//! ## Overview
//!
//! A subject is marked on up to four components (sessional, attendance,
//! termwork, external). The engine turns those marks into a letter grade and
//! grade points, then folds graded subjects into a Semester Performance Index
//! (SPI) and semesters into a Cumulative Performance Index (CPI).
//!
//! ## Grading Flow
//!
//! 1. **Validation**: every enabled component must carry a number in
//!    `[0, cap]`; anything else aborts grading of that subject.
//! 2. **Percentage**: `total obtained * 100 / total possible`.
//! 3. **Grade lookup**: the percentage is mapped through [`grade_table::GRADE_TABLE`].
//! 4. **Fail rules**: each [`traits::fail_rule::FailRule`] may force the grade to
//!    `FF` with 0 points, whatever the percentage said.
//! 5. **Aggregation**: [`aggregator::spi`] and [`aggregator::cpi`] compute
//!    credit-weighted means, recomputed from the full set every time.
//!
//! ## Modules
//!
//! - [`grade_table`]: fixed percentage bands and their points.
//! - [`subject_grader`]: per-subject validation, scoring and overrides.
//! - [`rules`]: the fail rules built from a [`util::grading_config::FailPolicy`].
//! - [`aggregator`]: weighted means for SPI and CPI.
//! - [`sheet`]: caller-owned working sets of graded subjects and semesters.
//! - [`registry`]: registry records and their conversion into engine types.
//! - [`report`]: serializable reports and the response envelope.
//!
//! ## Example
//!
//! ```
//! use grader::subject_grader::grade_subject;
//! use grader::types::{ComponentCaps, MarkEntry, SubjectDefinition};
//! use util::grading_config::FailPolicy;
//!
//! let dbms = SubjectDefinition::new(
//!     "3130703",
//!     "Database Management Systems",
//!     4,
//!     ComponentCaps { sessional: 30, attendance: 0, termwork: 0, external: 70 },
//! );
//! let marks = MarkEntry {
//!     sessional: Some(28.0),
//!     external: Some(60.0),
//!     ..Default::default()
//! };
//!
//! let result = grade_subject(&dbms, &marks, &FailPolicy::default()).unwrap();
//! assert_eq!(result.total_obtained, 88.0);
//! assert_eq!(result.grade.to_string(), "AA");
//! ```

pub mod aggregator;
pub mod error;
pub mod grade_table;
pub mod registry;
pub mod report;
pub mod rules;
pub mod sheet;
pub mod standing;
pub mod subject_grader;
pub mod traits;
pub mod types;

pub use error::GraderError;
pub use grade_table::{Grade, lookup_grade};
pub use sheet::{CumulativeSheet, SemesterEntry, SemesterSheet};
pub use subject_grader::{SubjectGrader, grade_subject};

/// Rounds half away from zero to `places` decimals.
pub fn round_to(value: f64, places: u32) -> f64 {
    let factor = 10f64.powi(places as i32);
    (value * factor).round() / factor
}

/// Display rounding for SPI and CPI.
#[inline]
pub fn round2(value: f64) -> f64 {
    round_to(value, 2)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round2() {
        assert_eq!(round2(87.0 / 11.0), 7.91);
        assert_eq!(round2(8.0), 8.0);
        assert_eq!(round2(0.0), 0.0);
        assert_eq!(round2(6.666), 6.67);
    }

    #[test]
    fn test_round_to_places() {
        assert_eq!(round_to(358.0 / 42.0, 0), 9.0);
        assert_eq!(round_to(358.0 / 42.0, 1), 8.5);
        assert_eq!(round_to(358.0 / 42.0, 3), 8.524);
    }
}
