//! # Sheets
//!
//! Caller-owned working sets that sit on top of the pure engine.
//!
//! - [`SemesterSheet`] holds one semester's graded subjects, keyed by subject
//!   code, and derives the SPI.
//! - [`CumulativeSheet`] holds one SPI entry per semester, keyed by semester
//!   number, and derives the CPI.
//!
//! Both keep their entries in key order and recompute the index from the full
//! set on every call. Removing an entry and adding it back therefore gives
//! exactly the same index as before.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use tracing::{debug, info};
use util::grading_config::FailPolicy;

use crate::aggregator::{cpi, spi};
use crate::error::GraderError;
use crate::subject_grader::SubjectGrader;
use crate::types::{GradedSubjectResult, MarkEntry, SubjectDefinition};

/// One semester's contribution to a CPI.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SemesterEntry {
    #[serde(alias = "semNo")]
    pub semester_no: u32,
    /// Sum of the semester's subject credits.
    pub credits: u32,
    pub spi: f64,
}

impl SemesterEntry {
    pub fn new(semester_no: u32, credits: u32, spi: f64) -> Self {
        Self {
            semester_no,
            credits,
            spi,
        }
    }

    pub fn validate(&self) -> Result<(), GraderError> {
        check_spi(self.semester_no, self.spi)
    }
}

fn check_spi(semester_no: u32, value: f64) -> Result<(), GraderError> {
    if value.is_finite() && (0.0..=10.0).contains(&value) {
        Ok(())
    } else {
        Err(GraderError::InvalidSpi { semester_no, value })
    }
}

/// Graded subjects of one semester.
pub struct SemesterSheet {
    grader: SubjectGrader,
    results: BTreeMap<String, GradedSubjectResult>,
}

impl Default for SemesterSheet {
    fn default() -> Self {
        Self::with_grader(SubjectGrader::default())
    }
}

impl SemesterSheet {
    pub fn new(policy: &FailPolicy) -> Self {
        Self::with_grader(SubjectGrader::new(policy))
    }

    pub fn with_grader(grader: SubjectGrader) -> Self {
        Self {
            grader,
            results: BTreeMap::new(),
        }
    }

    /// Grades every subject and replaces the sheet's contents.
    ///
    /// Stops at the first subject that fails to grade and returns its error;
    /// the sheet is left as it was. A subject with no entry in `marks` is
    /// graded against an empty entry, which fails if it has any component.
    pub fn grade_all(
        &mut self,
        subjects: &[SubjectDefinition],
        marks: &HashMap<String, MarkEntry>,
    ) -> Result<(), GraderError> {
        let empty = MarkEntry::default();
        let mut graded = BTreeMap::new();

        for subject in subjects {
            let entry = marks.get(&subject.code).unwrap_or(&empty);
            let result = self.grader.grade(subject, entry)?;
            if graded.insert(subject.code.clone(), result).is_some() {
                return Err(GraderError::InvalidRecord(format!(
                    "subject code {} appears more than once",
                    subject.code
                )));
            }
        }

        self.results = graded;
        info!(
            subjects = self.results.len(),
            spi = self.spi(),
            "Semester graded"
        );
        Ok(())
    }

    /// Grades one subject and stores it, replacing any earlier result with the
    /// same code.
    pub fn record(
        &mut self,
        definition: &SubjectDefinition,
        entry: &MarkEntry,
    ) -> Result<&GradedSubjectResult, GraderError> {
        let result = self.grader.grade(definition, entry)?;
        let code = definition.code.clone();
        if self.results.insert(code.clone(), result).is_some() {
            debug!(subject = %code, "Replaced graded subject");
        }
        Ok(&self.results[&code])
    }

    pub fn remove(&mut self, subject_code: &str) -> Option<GradedSubjectResult> {
        self.results.remove(subject_code)
    }

    pub fn get(&self, subject_code: &str) -> Option<&GradedSubjectResult> {
        self.results.get(subject_code)
    }

    /// Results ordered by subject code.
    pub fn results(&self) -> impl Iterator<Item = &GradedSubjectResult> {
        self.results.values()
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn total_credits(&self) -> u64 {
        self.results.values().map(|r| u64::from(r.credit)).sum()
    }

    pub fn spi(&self) -> f64 {
        spi(self.results.values())
    }

    /// This semester as a CPI entry, weighted by the graded subjects' credits.
    pub fn to_semester_entry(&self, semester_no: u32) -> Result<SemesterEntry, GraderError> {
        let total = self.total_credits();
        let credits = u32::try_from(total).map_err(|_| {
            GraderError::InvalidRecord(format!(
                "semester {semester_no} credit total {total} is too large"
            ))
        })?;
        Ok(SemesterEntry::new(semester_no, credits, self.spi()))
    }
}

/// One SPI entry per semester.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CumulativeSheet {
    entries: BTreeMap<u32, SemesterEntry>,
}

impl CumulativeSheet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a sheet from a list, rejecting duplicates and invalid SPIs.
    pub fn from_entries<I>(entries: I) -> Result<Self, GraderError>
    where
        I: IntoIterator<Item = SemesterEntry>,
    {
        let mut sheet = Self::new();
        for entry in entries {
            sheet.add(entry)?;
        }
        Ok(sheet)
    }

    pub fn add(&mut self, entry: SemesterEntry) -> Result<(), GraderError> {
        entry.validate()?;
        if self.entries.contains_key(&entry.semester_no) {
            return Err(GraderError::DuplicateSemester(entry.semester_no));
        }
        self.entries.insert(entry.semester_no, entry);
        Ok(())
    }

    pub fn update(&mut self, semester_no: u32, spi: f64) -> Result<(), GraderError> {
        check_spi(semester_no, spi)?;
        let entry = self
            .entries
            .get_mut(&semester_no)
            .ok_or(GraderError::UnknownSemester(semester_no))?;
        entry.spi = spi;
        Ok(())
    }

    pub fn remove(&mut self, semester_no: u32) -> Option<SemesterEntry> {
        self.entries.remove(&semester_no)
    }

    /// Entries ordered by semester number.
    pub fn entries(&self) -> impl Iterator<Item = &SemesterEntry> {
        self.entries.values()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn total_credits(&self) -> u64 {
        self.entries.values().map(|e| u64::from(e.credits)).sum()
    }

    pub fn cpi(&self) -> f64 {
        cpi(self.entries.values())
    }
}
