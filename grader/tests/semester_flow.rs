use std::collections::HashMap;

use grader::grade_table::Grade;
use grader::registry::{Branch, SubjectRecord, definitions_from_records};
use grader::report::{CumulativeReport, ReportResponse, SemesterReport};
use grader::sheet::{CumulativeSheet, SemesterSheet};
use grader::types::{Component, MarkEntry};
use grader::{GraderError, round2};
use serde_json::{Value, json};
use util::grading_config::GradingConfig;
use util::test_helpers::write_temp_grading_config;

fn semester_records() -> Vec<SubjectRecord> {
    serde_json::from_value(json!([
        {
            "subjectCode": "3140702",
            "subjectName": "Operating System",
            "subjectCredit": 4,
            "sessionalMark": 20,
            "attendance": 4,
            "termWorkMark": 25,
            "externalMark": 50
        },
        {
            "subjectCode": "3140705",
            "subjectName": "Object Oriented Programming",
            "subjectCredit": 3,
            "sessionalMark": 30,
            "termWorkMark": null,
            "externalMark": 70
        },
        {
            "subjectCode": "3140707",
            "subjectName": "Computer Organization",
            "subjectCredit": 4,
            "totalMarks": 100,
            "sessionalMark": 30,
            "externalMark": 70
        }
    ]))
    .unwrap()
}

fn semester_marks() -> HashMap<String, MarkEntry> {
    serde_json::from_value(json!({
        "3140702": { "sessional": 14, "attendance": 4, "termwork": 20, "external": 10 },
        "3140705": { "sessionalMarks": 25, "externalMarks": 65 },
        "3140707": { "sessional": 20, "external": 50 }
    }))
    .unwrap()
}

#[test]
fn test_semester_spi_from_registry_records() {
    let subjects = definitions_from_records(semester_records()).unwrap();
    let mut sheet = SemesterSheet::default();
    sheet.grade_all(&subjects, &semester_marks()).unwrap();

    let os = sheet.get("3140702").unwrap();
    assert_eq!(os.total_obtained, 48.0);
    assert_eq!(os.total_possible, 95);
    assert!((os.percentage - 50.526).abs() < 0.001);
    assert_eq!(os.grade, Grade::FF);
    assert_eq!(os.grade_points, 0.0);
    assert_eq!(os.failed_rules.len(), 1);
    assert_eq!(os.failed_rules[0].component, Component::External);

    // 90/100 -> AA, 70/100 -> BB
    assert_eq!(sheet.get("3140705").unwrap().grade, Grade::AA);
    assert_eq!(sheet.get("3140707").unwrap().grade, Grade::BB);

    // (4*0 + 3*10 + 4*8) / 11
    assert_eq!(sheet.total_credits(), 11);
    assert!((sheet.spi() - 62.0 / 11.0).abs() < 1e-12);
}

#[test]
fn test_failed_subject_aborts_whole_semester() {
    let subjects = definitions_from_records(semester_records()).unwrap();
    let mut marks = semester_marks();
    marks.get_mut("3140707").unwrap().external = Some(71.0);

    let mut sheet = SemesterSheet::default();
    let err = sheet.grade_all(&subjects, &marks).unwrap_err();
    assert_eq!(
        err,
        GraderError::Validation {
            subject: "3140707".into(),
            message: "external marks cannot exceed 70".into(),
        }
    );
    assert!(sheet.is_empty());
}

#[test]
fn test_semesters_roll_up_into_cpi() {
    let mut branch = Branch::with_semester_count("Computer Engineering", 8);
    let subjects = definitions_from_records(semester_records()).unwrap();
    branch.assign_subjects(4, subjects.clone()).unwrap();

    let mut sheet = SemesterSheet::default();
    sheet.grade_all(&subjects, &semester_marks()).unwrap();

    let mut cumulative = CumulativeSheet::new();
    cumulative.add(sheet.to_semester_entry(4).unwrap()).unwrap();
    let duplicate = branch.semester_entry(4, sheet.spi()).unwrap();
    assert_eq!(duplicate.credits, 11);
    assert_eq!(
        cumulative.add(duplicate).unwrap_err(),
        GraderError::DuplicateSemester(4)
    );

    cumulative
        .add(grader::SemesterEntry::new(3, 22, 8.0))
        .unwrap();

    // (11 * 62/11 + 22 * 8) / 33
    assert_eq!(cumulative.total_credits(), 33);
    assert!((cumulative.cpi() - 238.0 / 33.0).abs() < 1e-12);
    assert_eq!(round2(cumulative.cpi()), 7.21);
}

#[test]
fn test_cpi_is_stable_across_remove_and_re_add() {
    let mut sheet = CumulativeSheet::from_entries(vec![
        grader::SemesterEntry::new(1, 20, 7.35),
        grader::SemesterEntry::new(2, 22, 8.12),
        grader::SemesterEntry::new(3, 24, 6.9),
    ])
    .unwrap();
    let before = sheet.cpi();

    let removed = sheet.remove(2).unwrap();
    assert_ne!(sheet.cpi(), before);
    sheet.add(removed).unwrap();

    assert_eq!(sheet.cpi(), before);
}

#[test]
fn test_policy_file_changes_overrides() {
    let (_tmp, path) = write_temp_grading_config(
        r#"{
            "policy": {
                "external_min_percent": 0,
                "sessional_floor": { "mode": "proportional", "percent": 50 }
            }
        }"#,
    );
    let config = GradingConfig::load(&path).unwrap();
    assert_eq!(config.policy.termwork_min_percent, 35.0);

    let subjects = definitions_from_records(semester_records()).unwrap();
    let mut sheet = SemesterSheet::new(&config.policy);
    sheet.grade_all(&subjects, &semester_marks()).unwrap();

    // External minimum disabled, so 48/95 keeps its CC.
    let os = sheet.get("3140702").unwrap();
    assert_eq!(os.grade, Grade::CC);
    assert!(!os.was_overridden());

    // 20 of 30 sessional passes the proportional floor of 15.
    assert_eq!(sheet.get("3140707").unwrap().grade, Grade::BB);
}

#[test]
fn test_report_envelope_for_semester() {
    let subjects = definitions_from_records(semester_records()).unwrap();
    let mut sheet = SemesterSheet::default();
    sheet.grade_all(&subjects, &semester_marks()).unwrap();

    let response: ReportResponse<_> = SemesterReport::from_sheet(&sheet, 2).into();
    let value: Value = serde_json::to_value(&response).unwrap();

    assert_eq!(value["success"], true);
    assert_eq!(value["data"]["spi"], 5.64);
    assert_eq!(value["data"]["standing"], "poor");
    assert_eq!(value["data"]["subjects"][0]["subjectCode"], "3140702");
    assert_eq!(value["data"]["subjects"][0]["grade"], "FF");
    assert_eq!(value["data"]["subjects"][0]["totalMarks"], 95);
    assert_eq!(
        value["data"]["subjects"][0]["failedRules"][0]["component"],
        "external"
    );
    assert!(value["data"]["subjects"][1].get("failedRules").is_none());

    let cumulative =
        CumulativeSheet::from_entries(vec![sheet.to_semester_entry(1).unwrap()]).unwrap();
    let value = serde_json::to_value(CumulativeReport::from_sheet(&cumulative, 2)).unwrap();
    assert_eq!(value["cpi"], 5.64);
    assert_eq!(value["totalCredits"], 11);
}
