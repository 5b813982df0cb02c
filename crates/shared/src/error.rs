use std::fmt;

use thiserror::Error;

use crate::domain::CourseId;

/// Which required field stopped a submission. Checked in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationFailure {
    MissingName,
    MissingAge,
    NoCoursesSelected,
}

impl ValidationFailure {
    pub fn field(self) -> &'static str {
        match self {
            Self::MissingName => "name",
            Self::MissingAge => "age",
            Self::NoCoursesSelected => "courses",
        }
    }
}

impl fmt::Display for ValidationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingName => f.write_str("student name is empty"),
            Self::MissingAge => f.write_str("no age selected"),
            Self::NoCoursesSelected => f.write_str("no course selected"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EnrollmentError {
    #[error("missing information: {0}")]
    Validation(ValidationFailure),
    #[error("unknown course id '{0}'")]
    UnknownCourse(CourseId),
    #[error("duplicate course id '{0}' in catalog")]
    DuplicateCourse(CourseId),
    #[error("age {0} is outside the selectable range")]
    AgeOutOfRange(u8),
    #[error("invalid age '{0}'")]
    InvalidAge(String),
}

impl EnrollmentError {
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Name of the form field at fault, for validation failures.
    pub fn field(&self) -> Option<&'static str> {
        match self {
            Self::Validation(failure) => Some(failure.field()),
            _ => None,
        }
    }
}

impl From<ValidationFailure> for EnrollmentError {
    fn from(value: ValidationFailure) -> Self {
        Self::Validation(value)
    }
}
