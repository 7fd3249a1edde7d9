//! # Report Module
//!
//! Serializable snapshots of a sheet, and the response envelope the calculator
//! prints.
//!
//! ## JSON Output Example
//!
//! ```json
//! {
//!   "success": true,
//!   "message": "SPI calculated successfully.",
//!   "data": {
//!     "subjects": [
//!       { "subjectCode": "3140702", "grade": "BB", "points": 8.0, ... }
//!     ],
//!     "totalCredits": 11,
//!     "spi": 7.91,
//!     "standing": "good"
//!   }
//! }
//! ```
//!
//! A report is only ever built from a sheet, so the index it carries is always
//! a fresh recompute. Rounding happens here and nowhere else; the sheets keep
//! full precision.

use serde::Serialize;

use crate::round_to;
use crate::sheet::{CumulativeSheet, SemesterEntry, SemesterSheet};
use crate::standing::Standing;
use crate::types::GradedSubjectResult;

/// One semester's graded subjects and the SPI derived from them.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SemesterReport {
    pub subjects: Vec<GradedSubjectResult>,
    pub total_credits: u64,
    pub spi: f64,
    /// `None` until at least one credit-bearing subject is graded.
    pub standing: Option<Standing>,
}

impl SemesterReport {
    pub fn from_sheet(sheet: &SemesterSheet, decimal_places: u32) -> Self {
        let total_credits = sheet.total_credits();
        let spi = sheet.spi();
        Self {
            subjects: sheet.results().cloned().collect(),
            total_credits,
            spi: round_to(spi, decimal_places),
            standing: (total_credits > 0).then(|| Standing::from_index(spi)),
        }
    }
}

/// Every recorded semester and the CPI derived from them.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CumulativeReport {
    pub semesters: Vec<SemesterEntry>,
    pub total_credits: u64,
    pub cpi: f64,
    pub standing: Option<Standing>,
}

impl CumulativeReport {
    pub fn from_sheet(sheet: &CumulativeSheet, decimal_places: u32) -> Self {
        let total_credits = sheet.total_credits();
        let cpi = sheet.cpi();
        Self {
            semesters: sheet.entries().copied().collect(),
            total_credits,
            cpi: round_to(cpi, decimal_places),
            standing: (total_credits > 0).then(|| Standing::from_index(cpi)),
        }
    }
}

/// Response envelope shared by every calculator command.
///
/// - `success`: false only for [`ReportResponse::failure`].
/// - `message`: human-readable outcome or the error text.
/// - `data`: the report, omitted on failure.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportResponse<T> {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> ReportResponse<T> {
    pub fn success(message: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: Some(data),
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            data: None,
        }
    }
}

impl From<SemesterReport> for ReportResponse<SemesterReport> {
    fn from(report: SemesterReport) -> Self {
        ReportResponse::success("SPI calculated successfully.", report)
    }
}

impl From<CumulativeReport> for ReportResponse<CumulativeReport> {
    fn from(report: CumulativeReport) -> Self {
        ReportResponse::success("CPI calculated successfully.", report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ComponentCaps, MarkEntry, SubjectDefinition};
    use serde_json::Value;

    fn subject(code: &str, credit: u32) -> SubjectDefinition {
        SubjectDefinition::new(
            code,
            format!("Subject {code}"),
            credit,
            ComponentCaps {
                sessional: 0,
                attendance: 0,
                termwork: 0,
                external: 100,
            },
        )
    }

    fn external(marks: f64) -> MarkEntry {
        MarkEntry {
            external: Some(marks),
            ..Default::default()
        }
    }

    #[test]
    fn test_semester_report_response_serialization() {
        let mut sheet = SemesterSheet::default();
        sheet.record(&subject("A", 4), &external(70.0)).unwrap();
        sheet.record(&subject("B", 3), &external(80.0)).unwrap();
        sheet.record(&subject("C", 4), &external(60.0)).unwrap();

        let response: ReportResponse<_> = SemesterReport::from_sheet(&sheet, 2).into();
        let value: Value = serde_json::to_value(&response).unwrap();

        assert_eq!(value["success"], true);
        assert_eq!(value["message"], "SPI calculated successfully.");
        assert_eq!(value["data"]["totalCredits"], 11);
        assert_eq!(value["data"]["spi"], 7.91);
        assert_eq!(value["data"]["standing"], "good");
        assert_eq!(value["data"]["subjects"].as_array().unwrap().len(), 3);
        assert_eq!(value["data"]["subjects"][0]["subjectCode"], "A");
        assert_eq!(value["data"]["subjects"][0]["grade"], "BB");
        assert_eq!(value["data"]["subjects"][1]["points"], 9.0);
    }

    #[test]
    fn test_empty_semester_report() {
        let sheet = SemesterSheet::default();
        let report = SemesterReport::from_sheet(&sheet, 2);
        let value: Value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["spi"], 0.0);
        assert_eq!(value["totalCredits"], 0);
        assert!(value["standing"].is_null());
        assert!(value["subjects"].as_array().unwrap().is_empty());
    }

    #[test]
    fn test_cumulative_report_response_serialization() {
        let sheet = CumulativeSheet::from_entries(vec![
            SemesterEntry::new(2, 22, 9.0),
            SemesterEntry::new(1, 20, 8.0),
        ])
        .unwrap();

        let response: ReportResponse<_> = CumulativeReport::from_sheet(&sheet, 2).into();
        let value: Value = serde_json::to_value(&response).unwrap();

        assert_eq!(value["message"], "CPI calculated successfully.");
        assert_eq!(value["data"]["totalCredits"], 42);
        assert_eq!(value["data"]["cpi"], 8.52);
        assert_eq!(value["data"]["standing"], "excellent");
        assert_eq!(value["data"]["semesters"][0]["semesterNo"], 1);
        assert_eq!(value["data"]["semesters"][1]["credits"], 22);
        assert!(value["data"].get("total_credits").is_none());
    }

    #[test]
    fn test_decimal_places_follow_display_option() {
        let sheet = CumulativeSheet::from_entries(vec![
            SemesterEntry::new(1, 20, 8.0),
            SemesterEntry::new(2, 22, 9.0),
        ])
        .unwrap();
        assert_eq!(CumulativeReport::from_sheet(&sheet, 0).cpi, 9.0);
        assert_eq!(CumulativeReport::from_sheet(&sheet, 3).cpi, 8.524);
    }

    #[test]
    fn test_failure_envelope_omits_data() {
        let response = ReportResponse::<SemesterReport>::failure("DBMS: external marks are required");
        let value: Value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["success"], false);
        assert_eq!(value["message"], "DBMS: external marks are required");
        assert!(value.get("data").is_none());
    }
}
