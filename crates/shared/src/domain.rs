use std::{collections::BTreeSet, fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::{EnrollmentError, ValidationFailure};

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CourseId(pub String);

impl CourseId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CourseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CourseId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    pub id: CourseId,
    pub name: String,
    pub time: String,
    pub day: String,
    pub instructor: String,
    pub level: String,
    pub description: String,
}

/// Student age as offered by the age selector: 6 through 15 years.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Age(u8);

impl Age {
    pub const MIN: u8 = 6;
    pub const MAX: u8 = 15;

    pub fn new(years: u8) -> Result<Self, EnrollmentError> {
        if (Self::MIN..=Self::MAX).contains(&years) {
            Ok(Self(years))
        } else {
            Err(EnrollmentError::AgeOutOfRange(years))
        }
    }

    pub fn years(self) -> u8 {
        self.0
    }

    /// Every selectable age, youngest first.
    pub fn options() -> impl Iterator<Item = Age> {
        (Self::MIN..=Self::MAX).map(Age)
    }
}

impl TryFrom<u8> for Age {
    type Error = EnrollmentError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Age> for u8 {
    fn from(value: Age) -> Self {
        value.0
    }
}

impl FromStr for Age {
    type Err = EnrollmentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let years = s
            .parse::<u8>()
            .map_err(|_| EnrollmentError::InvalidAge(s.to_string()))?;
        Self::new(years)
    }
}

impl fmt::Display for Age {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// In-progress form state. Nothing here is validated until submission.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnrollmentDraft {
    pub name: String,
    pub age: Option<Age>,
    pub selected_course_ids: BTreeSet<CourseId>,
}

impl EnrollmentDraft {
    /// Flips membership of `id` and returns whether it is selected afterwards.
    pub fn toggle(&mut self, id: CourseId) -> bool {
        if self.selected_course_ids.remove(&id) {
            false
        } else {
            self.selected_course_ids.insert(id);
            true
        }
    }

    pub fn is_selected(&self, id: &CourseId) -> bool {
        self.selected_course_ids.contains(id)
    }

    /// First failing rule wins: name, then age, then course selection.
    pub fn validate(&self) -> Result<Age, ValidationFailure> {
        if self.name.is_empty() {
            return Err(ValidationFailure::MissingName);
        }
        let Some(age) = self.age else {
            return Err(ValidationFailure::MissingAge);
        };
        if self.selected_course_ids.is_empty() {
            return Err(ValidationFailure::NoCoursesSelected);
        }
        Ok(age)
    }
}

#[cfg(test)]
#[path = "tests/domain_tests.rs"]
mod tests;
