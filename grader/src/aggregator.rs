//! # Aggregator Module
//!
//! Credit-weighted means over `{weight, value}` pairs. The same reduction
//! produces an SPI (subjects weighted by credit, valued by grade points) and a
//! CPI (semesters weighted by their credit totals, valued by their SPI).
//!
//! There is no running total anywhere: every call recomputes from the full
//! entry set it is given.

use serde::{Deserialize, Serialize};

use crate::sheet::SemesterEntry;
use crate::types::GradedSubjectResult;

/// A single weighted value fed into [`aggregate`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IndexEntry {
    pub weight: u32,
    pub value: f64,
}

impl IndexEntry {
    pub fn new(weight: u32, value: f64) -> Self {
        Self { weight, value }
    }
}

impl From<&GradedSubjectResult> for IndexEntry {
    fn from(result: &GradedSubjectResult) -> Self {
        IndexEntry::new(result.credit, result.grade_points)
    }
}

impl From<&SemesterEntry> for IndexEntry {
    fn from(entry: &SemesterEntry) -> Self {
        IndexEntry::new(entry.credits, entry.spi)
    }
}

/// Computes `Σ(weight·value) / Σweight`.
///
/// # Behavior
///
/// - Entries with weight 0 contribute to neither sum.
/// - An empty input, or one whose weights are all 0, yields `0.0` rather than
///   an error. Callers show that as "no result yet".
///
/// # Example
///
/// ```
/// use grader::aggregator::{aggregate, IndexEntry};
///
/// let entries = vec![
///     IndexEntry::new(4, 8.0),
///     IndexEntry::new(3, 9.0),
///     IndexEntry::new(4, 7.0),
/// ];
///
/// // (32 + 27 + 28) / 11
/// let index = aggregate(entries);
/// assert!((index - 87.0 / 11.0).abs() < 1e-12);
///
/// assert_eq!(aggregate(Vec::<IndexEntry>::new()), 0.0);
/// ```
pub fn aggregate<I>(entries: I) -> f64
where
    I: IntoIterator<Item = IndexEntry>,
{
    let mut weighted_sum = 0.0;
    let mut total_weight: u64 = 0;

    for entry in entries {
        if entry.weight == 0 {
            continue;
        }
        weighted_sum += entry.weight as f64 * entry.value;
        total_weight += entry.weight as u64;
    }

    if total_weight > 0 {
        weighted_sum / total_weight as f64
    } else {
        0.0
    }
}

/// Semester Performance Index over graded subjects.
pub fn spi<'a, I>(results: I) -> f64
where
    I: IntoIterator<Item = &'a GradedSubjectResult>,
{
    aggregate(results.into_iter().map(IndexEntry::from))
}

/// Cumulative Performance Index over semester entries.
pub fn cpi<'a, I>(semesters: I) -> f64
where
    I: IntoIterator<Item = &'a SemesterEntry>,
{
    aggregate(semesters.into_iter().map(IndexEntry::from))
}
