//! Percentage bands → letter grade and grade points.
//!
//! [`GRADE_TABLE`] is the only place band limits and point values are written
//! down. Bands are checked from the top and both bounds are inclusive. A
//! percentage that falls between one band's upper bound and the next band's
//! lower bound (84.495, say), or above 100, matches no band and is FF.

use serde::{Deserialize, Serialize};
use std::fmt;

#[allow(clippy::upper_case_acronyms)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Grade {
    AA,
    AB,
    BB,
    BC,
    CC,
    CD,
    FF,
}

impl Grade {
    pub fn points(self) -> f64 {
        GRADE_TABLE
            .iter()
            .find(|band| band.grade == self)
            .map(|band| band.points)
            .unwrap_or(0.0)
    }

    pub fn is_pass(self) -> bool {
        self != Grade::FF
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Grade::AA => "AA",
            Grade::AB => "AB",
            Grade::BB => "BB",
            Grade::BC => "BC",
            Grade::CC => "CC",
            Grade::CD => "CD",
            Grade::FF => "FF",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GradeBand {
    pub min_percent: f64,
    pub max_percent: f64,
    pub grade: Grade,
    pub points: f64,
}

/// Highest band first.
pub const GRADE_TABLE: [GradeBand; 7] = [
    GradeBand {
        min_percent: 84.5,
        max_percent: 100.0,
        grade: Grade::AA,
        points: 10.0,
    },
    GradeBand {
        min_percent: 74.5,
        max_percent: 84.49,
        grade: Grade::AB,
        points: 9.0,
    },
    GradeBand {
        min_percent: 64.5,
        max_percent: 74.49,
        grade: Grade::BB,
        points: 8.0,
    },
    GradeBand {
        min_percent: 54.5,
        max_percent: 64.49,
        grade: Grade::BC,
        points: 7.0,
    },
    GradeBand {
        min_percent: 44.5,
        max_percent: 54.49,
        grade: Grade::CC,
        points: 6.0,
    },
    GradeBand {
        min_percent: 39.5,
        max_percent: 44.49,
        grade: Grade::CD,
        points: 5.0,
    },
    GradeBand {
        min_percent: 0.0,
        max_percent: 39.49,
        grade: Grade::FF,
        points: 0.0,
    },
];

/// Maps a percentage to `(grade, points)`. Anything outside every band
/// (gaps, above 100, negative, NaN) is FF/0.
pub fn lookup_grade(percentage: f64) -> (Grade, f64) {
    GRADE_TABLE
        .iter()
        .find(|band| band.min_percent <= percentage && percentage <= band.max_percent)
        .map(|band| (band.grade, band.points))
        .unwrap_or((Grade::FF, 0.0))
}
