//! Request files accepted by the calculator commands.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use grader::GraderError;
use grader::registry::{SubjectRecord, definitions_from_records};
use grader::report::{CumulativeReport, ReportResponse, SemesterReport};
use grader::sheet::{CumulativeSheet, SemesterEntry, SemesterSheet};
use grader::types::MarkEntry;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use util::grading_config::FailPolicy;

/// `calculator spi`: one semester's subjects and the marks entered for them.
#[derive(Debug, Deserialize)]
pub struct SpiRequest {
    pub subjects: Vec<SubjectRecord>,
    /// Keyed by subject code. A subject without marks fails validation unless
    /// it has no enabled components.
    #[serde(default)]
    pub marks: HashMap<String, MarkEntry>,
}

impl SpiRequest {
    pub fn evaluate(
        self,
        policy: &FailPolicy,
        decimal_places: u32,
    ) -> Result<ReportResponse<SemesterReport>, GraderError> {
        let subjects = definitions_from_records(self.subjects)?;
        let mut sheet = SemesterSheet::new(policy);
        sheet.grade_all(&subjects, &self.marks)?;
        Ok(SemesterReport::from_sheet(&sheet, decimal_places).into())
    }
}

/// `calculator cpi`: previously computed SPIs, one per semester.
#[derive(Debug, Deserialize)]
pub struct CpiRequest {
    pub semesters: Vec<SemesterEntry>,
}

impl CpiRequest {
    pub fn evaluate(
        self,
        decimal_places: u32,
    ) -> Result<ReportResponse<CumulativeReport>, GraderError> {
        let sheet = CumulativeSheet::from_entries(self.semesters)?;
        Ok(CumulativeReport::from_sheet(&sheet, decimal_places).into())
    }
}

pub fn read<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("failed to read request {}", path.display()))?;
    serde_json::from_str(&contents)
        .with_context(|| format!("invalid request JSON in {}", path.display()))
}
