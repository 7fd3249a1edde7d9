//! # Registry Records
//!
//! Shapes handed to the engine by the branch & subject registry, and their
//! conversion into validated engine types.
//!
//! The registry stores caps as nullable numbers (`sessionalMark`,
//! `termWorkMark`, ...). Those defaults are resolved exactly once, here, so
//! nothing downstream ever sees a missing cap.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::warn;
use validator::Validate;

use common::format_validation_errors;

use crate::error::GraderError;
use crate::sheet::SemesterEntry;
use crate::types::{ComponentCaps, SubjectDefinition};

/// A subject as stored by the registry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SubjectRecord {
    #[validate(length(min = 1, message = "subjectCode must not be empty"))]
    pub subject_code: String,

    #[validate(length(min = 1, message = "subjectName must not be empty"))]
    pub subject_name: String,

    #[validate(range(min = 1, message = "subjectCredit must be at least 1"))]
    pub subject_credit: u32,

    /// Informational; the engine always uses the component sum.
    #[serde(default)]
    pub total_marks: Option<u32>,

    /// Sessional cap, attendance allotment included.
    #[serde(default)]
    pub sessional_mark: Option<u32>,

    #[serde(default)]
    pub term_work_mark: Option<u32>,

    #[serde(default)]
    pub external_mark: Option<u32>,

    /// Attendance allotment inside `sessional_mark`.
    #[serde(default)]
    pub attendance: Option<u32>,
}

impl TryFrom<SubjectRecord> for SubjectDefinition {
    type Error = GraderError;

    fn try_from(record: SubjectRecord) -> Result<Self, Self::Error> {
        record
            .validate()
            .map_err(|e| GraderError::InvalidRecord(format_validation_errors(&e)))?;

        let caps = ComponentCaps {
            sessional: record.sessional_mark.unwrap_or(0),
            attendance: record.attendance.unwrap_or(0),
            termwork: record.term_work_mark.unwrap_or(0),
            external: record.external_mark.unwrap_or(0),
        };

        if let Some(total) = record.total_marks {
            if caps.total_possible() != Some(total) {
                warn!(
                    subject = %record.subject_code,
                    total_marks = total,
                    component_total = ?caps.total_possible(),
                    "totalMarks disagrees with component caps; using component total"
                );
            }
        }

        Ok(SubjectDefinition {
            code: record.subject_code,
            name: record.subject_name,
            credit: record.subject_credit,
            caps,
        })
    }
}

/// Converts a batch of records, stopping at the first invalid one.
pub fn definitions_from_records(
    records: Vec<SubjectRecord>,
) -> Result<Vec<SubjectDefinition>, GraderError> {
    records.into_iter().map(SubjectDefinition::try_from).collect()
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Semester {
    pub semester_no: u32,
    #[serde(default)]
    pub subjects: Vec<SubjectDefinition>,
}

impl Semester {
    pub fn new(semester_no: u32) -> Self {
        Self {
            semester_no,
            subjects: Vec::new(),
        }
    }

    /// Credit weight of this semester in a CPI.
    pub fn total_credits(&self) -> u64 {
        self.subjects.iter().map(|s| u64::from(s.credit)).sum()
    }

    pub fn subject(&self, code: &str) -> Option<&SubjectDefinition> {
        self.subjects.iter().find(|s| s.code == code)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Branch {
    pub name: String,
    #[serde(default)]
    pub semesters: Vec<Semester>,
}

impl Branch {
    /// A branch with semesters `1..=count`, all empty.
    pub fn with_semester_count(name: impl Into<String>, count: u32) -> Self {
        Self {
            name: name.into(),
            semesters: (1..=count).map(Semester::new).collect(),
        }
    }

    pub fn semester(&self, semester_no: u32) -> Option<&Semester> {
        self.semesters.iter().find(|s| s.semester_no == semester_no)
    }

    /// Replaces the subject list of `semester_no`, appending the semester if
    /// the branch does not have it yet. Subject codes must be unique.
    pub fn assign_subjects(
        &mut self,
        semester_no: u32,
        subjects: Vec<SubjectDefinition>,
    ) -> Result<&Semester, GraderError> {
        {
            let mut seen = HashSet::new();
            if let Some(dup) = subjects.iter().find(|s| !seen.insert(s.code.as_str())) {
                return Err(GraderError::InvalidRecord(format!(
                    "subject code {} assigned twice to semester {semester_no}",
                    dup.code
                )));
            }
        }

        let index = match self
            .semesters
            .iter()
            .position(|s| s.semester_no == semester_no)
        {
            Some(i) => {
                self.semesters[i].subjects = subjects;
                i
            }
            None => {
                self.semesters.push(Semester {
                    semester_no,
                    subjects,
                });
                self.semesters.len() - 1
            }
        };

        Ok(&self.semesters[index])
    }

    /// CPI entry for `semester_no`, weighted by the semester's credit total.
    pub fn semester_entry(&self, semester_no: u32, spi: f64) -> Result<SemesterEntry, GraderError> {
        let semester = self
            .semester(semester_no)
            .ok_or(GraderError::UnknownSemester(semester_no))?;
        let credits = u32::try_from(semester.total_credits()).map_err(|_| {
            GraderError::InvalidRecord(format!(
                "semester {semester_no} credit total {} is too large",
                semester.total_credits()
            ))
        })?;
        let entry = SemesterEntry::new(semester_no, credits, spi);
        entry.validate()?;
        Ok(entry)
    }
}
