//! # Subject Grader
//!
//! Turns one subject's raw component marks into a [`GradedSubjectResult`].
//!
//! ## Steps
//! 1. Validate the definition (something must be gradable, attendance must fit
//!    inside sessional) and the marks (present when required, finite,
//!    non-negative, within cap).
//! 2. Zero every component whose cap is 0.
//! 3. `percentage = obtained * 100 / possible`, then look up the grade band.
//! 4. Run every fail rule; any one firing forces FF / 0 points.
//!
//! Grading is pure: the same inputs always give the same result.

use tracing::debug;
use util::grading_config::FailPolicy;

use crate::error::GraderError;
use crate::grade_table::{Grade, lookup_grade};
use crate::rules::rules_for;
use crate::traits::fail_rule::FailRule;
use crate::types::{
    Component, ComponentMarks, FailReason, GradedSubjectResult, MarkEntry, SubjectDefinition,
};

/// Grades subjects against a fixed set of fail rules.
pub struct SubjectGrader {
    rules: Vec<Box<dyn FailRule>>,
}

impl Default for SubjectGrader {
    fn default() -> Self {
        Self::new(&FailPolicy::default())
    }
}

impl SubjectGrader {
    /// Grader with the standard rules configured from `policy`.
    pub fn new(policy: &FailPolicy) -> Self {
        Self {
            rules: rules_for(policy),
        }
    }

    /// Grader with no fail rules; grades come from the percentage alone.
    pub fn without_rules() -> Self {
        Self { rules: Vec::new() }
    }

    /// Add an extra fail rule on top of the current set.
    pub fn with_rule<R: FailRule + 'static>(mut self, rule: R) -> Self {
        self.rules.push(Box::new(rule));
        self
    }

    pub fn grade(
        &self,
        definition: &SubjectDefinition,
        entry: &MarkEntry,
    ) -> Result<GradedSubjectResult, GraderError> {
        let (marks, total_possible) = validate(definition, entry)?;

        let total_obtained = marks.total();
        let percentage = total_obtained * 100.0 / total_possible as f64;

        let (mut grade, mut grade_points) = lookup_grade(percentage);

        let failed_rules: Vec<FailReason> = self
            .rules
            .iter()
            .filter_map(|rule| {
                rule.check(&definition.caps, &marks).inspect(|reason| {
                    debug!(
                        subject = %definition.code,
                        rule = rule.name(),
                        "{}",
                        reason.message
                    );
                })
            })
            .collect();

        if !failed_rules.is_empty() {
            grade = Grade::FF;
            grade_points = 0.0;
        }

        debug!(
            subject = %definition.code,
            total_obtained,
            total_possible,
            percentage,
            grade = %grade,
            "Graded subject"
        );

        Ok(GradedSubjectResult {
            subject_code: definition.code.clone(),
            subject_name: definition.name.clone(),
            credit: definition.credit,
            sessional_marks: marks.sessional,
            attendance_marks: marks.attendance,
            termwork_marks: marks.termwork,
            external_marks: marks.external,
            total_obtained,
            total_possible,
            percentage,
            grade,
            grade_points,
            failed_rules,
        })
    }
}

/// Grades one subject with the standard rules for `policy`.
pub fn grade_subject(
    definition: &SubjectDefinition,
    entry: &MarkEntry,
    policy: &FailPolicy,
) -> Result<GradedSubjectResult, GraderError> {
    SubjectGrader::new(policy).grade(definition, entry)
}

const COMPONENTS: [Component; 4] = [
    Component::Sessional,
    Component::Attendance,
    Component::Termwork,
    Component::External,
];

/// Validated marks and the subject's total possible marks.
fn validate(
    definition: &SubjectDefinition,
    entry: &MarkEntry,
) -> Result<(ComponentMarks, u32), GraderError> {
    let caps = &definition.caps;
    let subject = definition.code.as_str();

    if !caps.is_gradable() {
        return Err(GraderError::configuration(
            subject,
            "no mark components are configured",
        ));
    }
    if caps.attendance > caps.sessional {
        return Err(GraderError::configuration(
            subject,
            format!(
                "attendance cap {} exceeds sessional cap {}",
                caps.attendance, caps.sessional
            ),
        ));
    }
    let total_possible = caps.total_possible().ok_or_else(|| {
        GraderError::configuration(subject, "component caps add up to more than u32::MAX")
    })?;

    let mut marks = ComponentMarks::default();
    for component in COMPONENTS {
        let value = match component_mark(definition, entry, component)? {
            Some(v) => v,
            None => continue,
        };
        match component {
            Component::Sessional => marks.sessional = value,
            Component::Attendance => marks.attendance = value,
            Component::Termwork => marks.termwork = value,
            Component::External => marks.external = value,
        }
    }

    Ok((marks, total_possible))
}

/// Validated mark for one component, or `None` when the component is disabled.
fn component_mark(
    definition: &SubjectDefinition,
    entry: &MarkEntry,
    component: Component,
) -> Result<Option<f64>, GraderError> {
    let caps = &definition.caps;
    let enabled = match component {
        Component::Sessional => caps.sessional > 0,
        Component::Attendance => caps.sessional > 0 && caps.attendance > 0,
        Component::Termwork => caps.termwork > 0,
        Component::External => caps.external > 0,
    };
    if !enabled {
        return Ok(None);
    }

    let subject = definition.code.as_str();
    let cap = caps.cap_for(component);
    let value = entry.get(component).ok_or_else(|| {
        GraderError::validation(subject, format!("{component} marks are required"))
    })?;

    if !value.is_finite() {
        return Err(GraderError::validation(
            subject,
            format!("{component} marks must be a number"),
        ));
    }
    if value < 0.0 {
        return Err(GraderError::validation(
            subject,
            format!("{component} marks cannot be negative"),
        ));
    }
    if value > cap as f64 {
        return Err(GraderError::validation(
            subject,
            format!("{component} marks cannot exceed {cap}"),
        ));
    }

    Ok(Some(value))
}
