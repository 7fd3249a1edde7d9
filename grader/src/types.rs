//! # Types Module
//!
//! Core data structures shared by the grader, the aggregator and the sheets.
//! Definitions and mark entries come in from the caller; graded results go out
//! and are never mutated afterwards.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::grade_table::Grade;

/// One of the four mark components a subject can be assessed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Component {
    Sessional,
    Attendance,
    Termwork,
    External,
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Component::Sessional => "sessional",
            Component::Attendance => "attendance",
            Component::Termwork => "termwork",
            Component::External => "external",
        };
        f.write_str(label)
    }
}

/// Maximum attainable marks per component. A cap of 0 disables the component.
///
/// `attendance` is a sub-allotment of `sessional`, not an extra component: a
/// sessional cap of 20 with attendance 4 means 16 sessional marks plus 4
/// attendance marks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentCaps {
    #[serde(default)]
    pub sessional: u32,
    #[serde(default)]
    pub attendance: u32,
    #[serde(default)]
    pub termwork: u32,
    #[serde(default)]
    pub external: u32,
}

impl ComponentCaps {
    /// `sessional + termwork + external`, or `None` if the sum overflows.
    pub fn total_possible(&self) -> Option<u32> {
        self.sessional
            .checked_add(self.termwork)?
            .checked_add(self.external)
    }

    /// Sessional cap excluding the attendance allotment.
    pub fn sessional_without_attendance(&self) -> u32 {
        self.sessional.saturating_sub(self.attendance)
    }

    /// Effective cap of a single component when entering marks.
    pub fn cap_for(&self, component: Component) -> u32 {
        match component {
            Component::Sessional => self.sessional_without_attendance(),
            Component::Attendance if self.sessional == 0 => 0,
            Component::Attendance => self.attendance,
            Component::Termwork => self.termwork,
            Component::External => self.external,
        }
    }

    pub fn is_gradable(&self) -> bool {
        self.sessional > 0 || self.termwork > 0 || self.external > 0
    }
}

/// A validated subject as the engine sees it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubjectDefinition {
    pub code: String,
    pub name: String,
    pub credit: u32,
    #[serde(default)]
    pub caps: ComponentCaps,
}

impl SubjectDefinition {
    pub fn new(
        code: impl Into<String>,
        name: impl Into<String>,
        credit: u32,
        caps: ComponentCaps,
    ) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
            credit,
            caps,
        }
    }
}

/// Raw marks entered for one subject. `None` means the field was left empty.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MarkEntry {
    #[serde(default, alias = "sessionalMarks")]
    pub sessional: Option<f64>,
    #[serde(default, alias = "attendanceMarks")]
    pub attendance: Option<f64>,
    #[serde(default, alias = "termworkMarks")]
    pub termwork: Option<f64>,
    #[serde(default, alias = "externalMarks")]
    pub external: Option<f64>,
}

impl MarkEntry {
    pub fn get(&self, component: Component) -> Option<f64> {
        match component {
            Component::Sessional => self.sessional,
            Component::Attendance => self.attendance,
            Component::Termwork => self.termwork,
            Component::External => self.external,
        }
    }
}

/// Marks after validation, with disabled components zeroed out.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ComponentMarks {
    pub sessional: f64,
    pub attendance: f64,
    pub termwork: f64,
    pub external: f64,
}

impl ComponentMarks {
    pub fn get(&self, component: Component) -> f64 {
        match component {
            Component::Sessional => self.sessional,
            Component::Attendance => self.attendance,
            Component::Termwork => self.termwork,
            Component::External => self.external,
        }
    }

    pub fn total(&self) -> f64 {
        self.sessional + self.attendance + self.termwork + self.external
    }
}

/// Why a fail rule forced a subject down to FF.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FailReason {
    pub component: Component,
    pub message: String,
}

/// Outcome of grading one subject.
///
/// Serializes to the shape the UI consumes (`totalMarks` for the possible
/// total, `points` for grade points).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GradedSubjectResult {
    pub subject_code: String,
    pub subject_name: String,
    pub credit: u32,
    pub sessional_marks: f64,
    pub attendance_marks: f64,
    pub termwork_marks: f64,
    pub external_marks: f64,
    pub total_obtained: f64,
    #[serde(rename = "totalMarks")]
    pub total_possible: u32,
    pub percentage: f64,
    pub grade: Grade,
    #[serde(rename = "points")]
    pub grade_points: f64,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub failed_rules: Vec<FailReason>,
}

impl GradedSubjectResult {
    /// True when a fail rule overrode the percentage-derived grade.
    pub fn was_overridden(&self) -> bool {
        !self.failed_rules.is_empty()
    }
}
