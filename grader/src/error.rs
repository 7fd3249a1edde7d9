//! Grader Error Types
//!
//! This module defines the [`GraderError`] enum, covering every way a grading or
//! aggregation request can be rejected. Errors are reported synchronously to the
//! caller; none of them is fatal to the process, and a failed subject never
//! yields a partial result.
//!
//! # Example
//!
//! ```rust
//! use grader::error::GraderError;
//!
//! let err = GraderError::validation("CS101", "external marks are required");
//! assert_eq!(err.to_string(), "CS101: external marks are required");
//! ```

/// Represents all error types that can occur in the grading engine.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GraderError {
    /// A component mark is missing, negative, non-finite or above its cap.
    #[error("{subject}: {message}")]
    Validation { subject: String, message: String },

    /// The subject definition itself cannot be graded (e.g. no components configured).
    #[error("{subject} cannot be graded: {message}")]
    Configuration { subject: String, message: String },

    /// A registry record failed boundary validation.
    #[error("Invalid subject record: {0}")]
    InvalidRecord(String),

    /// A semester SPI supplied for CPI aggregation is outside `[0, 10]`.
    #[error("SPI for semester {semester_no} must be between 0 and 10, got {value}")]
    InvalidSpi { semester_no: u32, value: f64 },

    #[error("Semester {0} has already been added")]
    DuplicateSemester(u32),

    #[error("Semester {0} not found")]
    UnknownSemester(u32),
}

impl GraderError {
    pub fn validation(subject: impl Into<String>, message: impl Into<String>) -> Self {
        GraderError::Validation {
            subject: subject.into(),
            message: message.into(),
        }
    }

    pub fn configuration(subject: impl Into<String>, message: impl Into<String>) -> Self {
        GraderError::Configuration {
            subject: subject.into(),
            message: message.into(),
        }
    }
}
